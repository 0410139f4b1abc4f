//! Router-level tests for the gateway handlers.

use axum::{Router, body::Body, http::Request, http::StatusCode};
use http_body_util::BodyExt;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use crate::constants::GRADER_STATUS_HEADER;
use crate::embedding::MiniLmEmbedder;
use crate::extraction::PlainText;
use crate::gateway::create_router_with_state;
use crate::gateway::state::HandlerState;
use crate::scoring::SimilarityScorer;
use crate::storage::Database;

const BOUNDARY: &str = "grader-test-boundary";

const ANSWER_KEY: &str =
    "Answer 1: Photosynthesis turns light into chemical energy\nAnswer 2: Mitochondria";

fn setup_test_state() -> HandlerState {
    setup_test_state_with_limit(1024 * 1024)
}

fn setup_test_state_with_limit(max_upload_bytes: usize) -> HandlerState {
    let database = Arc::new(Database::open_in_memory().expect("in-memory db"));
    let embedder = MiniLmEmbedder::stub().expect("stub embedder");
    let scorer = Arc::new(SimilarityScorer::new(Arc::new(embedder)));

    HandlerState::new(
        database,
        scorer,
        Arc::new(PlainText),
        Duration::from_secs(60),
        max_upload_bytes,
    )
}

fn create_test_router() -> Router {
    create_router_with_state(setup_test_state())
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send_json(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> axum::response::Response {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let request = builder
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();

    router.clone().oneshot(request).await.unwrap()
}

async fn send_get(router: &Router, uri: &str, token: Option<&str>) -> axum::response::Response {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    router
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Registers a teacher, logs in and adds class 10A / Biology. Returns the token.
async fn login_with_class(router: &Router) -> String {
    let response = send_json(
        router,
        "POST",
        "/api/teachers",
        None,
        serde_json::json!({"name": "Ada", "email": "ada@example.com", "password": "engine"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send_json(
        router,
        "POST",
        "/api/login",
        None,
        serde_json::json!({"email": "ada@example.com", "password": "engine"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let token = body_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = send_json(
        router,
        "POST",
        "/api/classes",
        Some(&token),
        serde_json::json!({"class_name": "10A", "subject_name": "Biology"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    token
}

/// `(part name, file name, content)`
fn multipart_body(parts: &[(&str, Option<&str>, &str)]) -> Vec<u8> {
    let mut body = String::new();
    for (name, file_name, content) in parts {
        body.push_str(&format!("--{}\r\n", BOUNDARY));
        match file_name {
            Some(file_name) => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/pdf\r\n\r\n",
                name, file_name
            )),
            None => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                name
            )),
        }
        body.push_str(content);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{}--\r\n", BOUNDARY));
    body.into_bytes()
}

async fn send_grade(
    router: &Router,
    token: &str,
    parts: &[(&str, Option<&str>, &str)],
) -> axum::response::Response {
    let request = Request::builder()
        .method("POST")
        .uri("/api/grade")
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::from(multipart_body(parts)))
        .unwrap();

    router.clone().oneshot(request).await.unwrap()
}

fn grade_config(marks: &[u32]) -> String {
    serde_json::json!({
        "class_name": "10A",
        "subject_name": "Biology",
        "marks_per_question": marks,
    })
    .to_string()
}

mod probe_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        let router = create_test_router();
        let response = send_get(&router, "/healthz", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let status = response.headers().get(GRADER_STATUS_HEADER).unwrap();
        assert_eq!(status.to_str().unwrap(), "healthy");
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_ready_endpoint_reports_stub_embedder() {
        let router = create_test_router();
        let response = send_get(&router, "/ready", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["components"]["database"], "ready");
        assert_eq!(body["components"]["embedder_mode"], "stub");
    }
}

mod account_tests {
    use super::*;

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let router = create_test_router();
        let body = serde_json::json!({"name": "Ada", "email": "ada@example.com", "password": "x"});

        let first = send_json(&router, "POST", "/api/teachers", None, body.clone()).await;
        assert_eq!(first.status(), StatusCode::CREATED);
        assert_eq!(body_json(first).await["email"], "ada@example.com");

        let second = send_json(&router, "POST", "/api/teachers", None, body).await;
        assert_eq!(second.status(), StatusCode::CONFLICT);
        let status = second.headers().get(GRADER_STATUS_HEADER).unwrap();
        assert_eq!(status.to_str().unwrap(), "duplicate_email");
        assert_eq!(body_json(second).await["code"], 409);
    }

    #[tokio::test]
    async fn test_login_with_wrong_password() {
        let router = create_test_router();
        send_json(
            &router,
            "POST",
            "/api/teachers",
            None,
            serde_json::json!({"name": "Ada", "email": "ada@example.com", "password": "engine"}),
        )
        .await;

        let response = send_json(
            &router,
            "POST",
            "/api/login",
            None,
            serde_json::json!({"email": "ada@example.com", "password": "nope"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_dashboard_requires_token() {
        let router = create_test_router();

        let response = send_get(&router, "/api/dashboard", None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = send_get(&router, "/api/dashboard", Some("not-a-session")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_dashboard_lists_classes() {
        let router = create_test_router();
        let token = login_with_class(&router).await;

        let response = send_get(&router, "/api/dashboard", Some(&token)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["teacher"]["name"], "Ada");
        assert_eq!(body["classes"][0]["class_name"], "10A");
        assert_eq!(body["classes"][0]["subject_name"], "Biology");
    }

    #[tokio::test]
    async fn test_logout_ends_session() {
        let router = create_test_router();
        let token = login_with_class(&router).await;

        let response = send_json(&router, "POST", "/api/logout", Some(&token), serde_json::json!({})).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send_get(&router, "/api/dashboard", Some(&token)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_add_class_rejects_blank_names() {
        let router = create_test_router();
        let token = login_with_class(&router).await;

        let response = send_json(
            &router,
            "POST",
            "/api/classes",
            Some(&token),
            serde_json::json!({"class_name": " ", "subject_name": "Biology"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

mod grade_tests {
    use super::*;

    #[tokio::test]
    async fn test_grade_and_fetch_results() {
        let router = create_test_router();
        let token = login_with_class(&router).await;
        let config = grade_config(&[10, 10]);

        let response = send_grade(
            &router,
            &token,
            &[
                ("config", None, config.as_str()),
                ("answer_key", Some("key.pdf"), ANSWER_KEY),
                (
                    "students",
                    Some("alice.pdf"),
                    "Answer 1: Photosynthesis turns light into chemical energy\nAnswer 2:",
                ),
            ],
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let status = response.headers().get(GRADER_STATUS_HEADER).unwrap();
        assert_eq!(status.to_str().unwrap(), "graded");

        let report = body_json(response).await;
        assert_eq!(report["total_possible_marks"], 20.0);
        assert_eq!(report["students"][0]["student_name"], "alice");
        assert_eq!(report["students"][0]["total_marks"], 10.0);

        let response = send_get(
            &router,
            "/api/results?class_name=10A&subject_name=Biology",
            Some(&token),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["student_name"], "alice");
        assert_eq!(results[0]["total_marks"], 10.0);
        assert_eq!(results[0]["max_marks"], 20.0);
    }

    #[tokio::test]
    async fn test_grade_key_mismatch_is_unprocessable() {
        let router = create_test_router();
        let token = login_with_class(&router).await;
        let config = grade_config(&[10, 10, 10]);

        let response = send_grade(
            &router,
            &token,
            &[
                ("config", None, config.as_str()),
                ("answer_key", Some("key.pdf"), ANSWER_KEY),
                ("students", Some("alice.pdf"), "Answer 1: anything"),
            ],
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let status = response.headers().get(GRADER_STATUS_HEADER).unwrap();
        assert_eq!(status.to_str().unwrap(), "answer_key_mismatch");
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("3 were specified"));

        let response = send_get(
            &router,
            "/api/results?class_name=10A&subject_name=Biology",
            Some(&token),
        )
        .await;
        assert!(body_json(response).await["results"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_grade_unreadable_student_records_nothing() {
        let router = create_test_router();
        let token = login_with_class(&router).await;
        let config = grade_config(&[10, 10]);

        let response = send_grade(
            &router,
            &token,
            &[
                ("config", None, config.as_str()),
                ("answer_key", Some("key.pdf"), ANSWER_KEY),
                ("students", Some("alice.pdf"), "Answer 1: Mitochondria"),
                ("students", Some("broken.pdf"), ""),
            ],
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let status = response.headers().get(GRADER_STATUS_HEADER).unwrap();
        assert_eq!(status.to_str().unwrap(), "unreadable_document");

        let response = send_get(
            &router,
            "/api/results?class_name=10A&subject_name=Biology",
            Some(&token),
        )
        .await;
        assert!(body_json(response).await["results"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_grade_oversized_upload_is_rejected() {
        let router = create_router_with_state(setup_test_state_with_limit(512));
        let token = login_with_class(&router).await;
        let config = grade_config(&[10, 10]);
        let oversized = format!("Answer 1: {}", "x".repeat(2048));

        let response = send_grade(
            &router,
            &token,
            &[
                ("config", None, config.as_str()),
                ("answer_key", Some("key.pdf"), ANSWER_KEY),
                ("students", Some("alice.pdf"), oversized.as_str()),
            ],
        )
        .await;

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let status = response.headers().get(GRADER_STATUS_HEADER).unwrap();
        assert_eq!(status.to_str().unwrap(), "payload_too_large");
    }

    #[tokio::test]
    async fn test_grade_invalid_marks_is_unprocessable() {
        let router = create_test_router();
        let token = login_with_class(&router).await;
        let config = grade_config(&[10, 11]);

        let response = send_grade(
            &router,
            &token,
            &[
                ("config", None, config.as_str()),
                ("answer_key", Some("key.pdf"), ANSWER_KEY),
                ("students", Some("alice.pdf"), "Answer 1: x"),
            ],
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let status = response.headers().get(GRADER_STATUS_HEADER).unwrap();
        assert_eq!(status.to_str().unwrap(), "invalid_config");
    }

    #[tokio::test]
    async fn test_grade_missing_answer_key() {
        let router = create_test_router();
        let token = login_with_class(&router).await;
        let config = grade_config(&[10]);

        let response = send_grade(
            &router,
            &token,
            &[
                ("config", None, config.as_str()),
                ("students", Some("alice.pdf"), "Answer 1: x"),
            ],
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_grade_unknown_class_rejected() {
        let router = create_test_router();
        let token = login_with_class(&router).await;
        let config = serde_json::json!({
            "class_name": "9C",
            "subject_name": "Biology",
            "marks_per_question": [10, 10],
        })
        .to_string();

        let response = send_grade(
            &router,
            &token,
            &[
                ("config", None, config.as_str()),
                ("answer_key", Some("key.pdf"), ANSWER_KEY),
                ("students", Some("alice.pdf"), "Answer 1: x"),
            ],
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_grade_with_or_pair() {
        let router = create_test_router();
        let token = login_with_class(&router).await;
        let config = serde_json::json!({
            "class_name": "10A",
            "subject_name": "Biology",
            "marks_per_question": [4, 6],
            "or_pairs": [[1, 2]],
        })
        .to_string();

        let response = send_grade(
            &router,
            &token,
            &[
                ("config", None, config.as_str()),
                ("answer_key", Some("key.pdf"), ANSWER_KEY),
                ("students", Some("bob.pdf"), "Answer 2: Mitochondria"),
            ],
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let report = body_json(response).await;
        assert_eq!(report["total_possible_marks"], 6.0);
        assert_eq!(report["students"][0]["total_marks"], 6.0);
    }

    #[tokio::test]
    async fn test_grade_requires_session() {
        let router = create_test_router();
        let config = grade_config(&[10]);

        let response = send_grade(
            &router,
            "missing",
            &[
                ("config", None, config.as_str()),
                ("answer_key", Some("key.pdf"), "Answer 1: x"),
                ("students", Some("alice.pdf"), "Answer 1: x"),
            ],
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
