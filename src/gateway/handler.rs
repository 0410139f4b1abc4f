use axum::{
    Json,
    extract::{Multipart, Query, State, multipart::MultipartError},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, info, instrument};

use crate::constants::{GRADER_STATUS_GRADED, GRADER_STATUS_HEADER};
use crate::gateway::auth::AuthenticatedTeacher;
use crate::gateway::error::GatewayError;
use crate::gateway::payload::{
    ClassSubjectRequest, DashboardResponse, GradeConfig, LoginRequest, LoginResponse,
    RegisterRequest, ResultsQuery, ResultsResponse,
};
use crate::gateway::state::HandlerState;
use crate::grading::{GradingError, GradingSession, SessionInfo, StudentUpload};

/// Runs blocking work (SQLite, model inference) off the async workers.
async fn run_blocking<T, F>(f: F) -> Result<T, GatewayError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| GatewayError::InternalError(format!("blocking task failed: {}", e)))
}

#[instrument(skip_all)]
pub async fn register_handler(
    State(state): State<HandlerState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Response, GatewayError> {
    let database = state.database.clone();
    let teacher = run_blocking(move || {
        database.register_teacher(&request.name, &request.email, &request.password)
    })
    .await??;

    info!(teacher_id = teacher.id, "Teacher account created");
    Ok((StatusCode::CREATED, Json(teacher)).into_response())
}

#[instrument(skip_all)]
pub async fn login_handler(
    State(state): State<HandlerState>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, GatewayError> {
    let database = state.database.clone();
    let teacher = run_blocking(move || database.authenticate(&request.email, &request.password))
        .await??
        .ok_or(GatewayError::InvalidCredentials)?;

    let token = state.sessions.issue(teacher.id);
    info!(teacher_id = teacher.id, "Teacher logged in");

    Ok(Json(LoginResponse { token, teacher }).into_response())
}

#[instrument(skip_all, fields(teacher_id = auth.teacher_id))]
pub async fn logout_handler(
    State(state): State<HandlerState>,
    auth: AuthenticatedTeacher,
) -> Response {
    state.sessions.revoke(&auth.token);
    StatusCode::NO_CONTENT.into_response()
}

#[instrument(skip_all, fields(teacher_id = auth.teacher_id))]
pub async fn dashboard_handler(
    State(state): State<HandlerState>,
    auth: AuthenticatedTeacher,
) -> Result<Response, GatewayError> {
    let database = state.database.clone();
    let teacher_id = auth.teacher_id;
    let (teacher, classes) = run_blocking(move || {
        let teacher = database.teacher(teacher_id)?;
        let classes = database.classes_subjects(teacher_id)?;
        Ok::<_, crate::storage::StorageError>((teacher, classes))
    })
    .await??;

    let Some(teacher) = teacher else {
        state.sessions.revoke(&auth.token);
        return Err(GatewayError::Unauthorized);
    };

    Ok(Json(DashboardResponse { teacher, classes }).into_response())
}

#[instrument(skip_all, fields(teacher_id = auth.teacher_id))]
pub async fn add_class_handler(
    State(state): State<HandlerState>,
    auth: AuthenticatedTeacher,
    Json(request): Json<ClassSubjectRequest>,
) -> Result<Response, GatewayError> {
    let database = state.database.clone();
    let teacher_id = auth.teacher_id;
    let added = run_blocking(move || {
        database.add_class_subject(teacher_id, &request.class_name, &request.subject_name)
    })
    .await??;

    Ok((StatusCode::CREATED, Json(added)).into_response())
}

#[instrument(skip_all, fields(teacher_id = auth.teacher_id))]
pub async fn results_handler(
    State(state): State<HandlerState>,
    auth: AuthenticatedTeacher,
    Query(query): Query<ResultsQuery>,
) -> Result<Response, GatewayError> {
    let database = state.database.clone();
    let teacher_id = auth.teacher_id;
    let ResultsQuery {
        class_name,
        subject_name,
    } = query;

    let (class_name, subject_name, results) = run_blocking(move || {
        let rows = database.results_for(teacher_id, &class_name, &subject_name);
        (class_name, subject_name, rows)
    })
    .await?;

    Ok(Json(ResultsResponse {
        class_name,
        subject_name,
        results: results?,
    })
    .into_response())
}

/// Grades an uploaded answer key plus student documents.
///
/// Expects multipart parts `config` (JSON [`GradeConfig`]), `answer_key`
/// (file) and one or more `students` (files, named after the student).
#[instrument(skip_all, fields(teacher_id = auth.teacher_id, students = tracing::field::Empty))]
pub async fn grade_handler(
    State(state): State<HandlerState>,
    auth: AuthenticatedTeacher,
    multipart: Multipart,
) -> Result<Response, GatewayError> {
    let upload = read_grade_upload(multipart).await?;
    tracing::Span::current().record("students", upload.students.len());

    let questions = upload
        .config
        .question_config()
        .map_err(GradingError::from)?;

    let class_name = upload.config.class_name.trim().to_string();
    let subject_name = upload.config.subject_name.trim().to_string();
    let teacher_id = auth.teacher_id;

    let database = state.database.clone();
    let classes = run_blocking(move || database.classes_subjects(teacher_id)).await??;
    if !classes
        .iter()
        .any(|c| c.class_name == class_name && c.subject_name == subject_name)
    {
        return Err(GatewayError::InvalidRequest(format!(
            "{} / {} is not one of your classes",
            class_name, subject_name
        )));
    }

    let info = SessionInfo {
        teacher_id,
        class_name,
        subject_name,
    };
    let database = state.database.clone();
    let scorer = state.scorer.clone();
    let extractor = state.extractor.clone();

    let report = run_blocking(move || {
        let session = GradingSession::new(&scorer, database.as_ref(), questions, info);
        session.run(extractor.as_ref(), &upload.answer_key, &upload.students)
    })
    .await??;

    info!(
        class = %report.class_name,
        subject = %report.subject_name,
        graded = report.students.len(),
        "Grading session complete"
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        GRADER_STATUS_HEADER,
        HeaderValue::from_static(GRADER_STATUS_GRADED),
    );

    Ok((StatusCode::OK, headers, Json(report)).into_response())
}

struct GradeUpload {
    config: GradeConfig,
    answer_key: Vec<u8>,
    students: Vec<StudentUpload>,
}

async fn read_grade_upload(mut multipart: Multipart) -> Result<GradeUpload, GatewayError> {
    let mut config = None;
    let mut answer_key = None;
    let mut students = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        match name.as_str() {
            "config" => {
                let parsed: GradeConfig = serde_json::from_slice(&bytes).map_err(|e| {
                    GatewayError::InvalidRequest(format!("invalid grading config: {}", e))
                })?;
                config = Some(parsed);
            }
            "answer_key" => answer_key = Some(bytes.to_vec()),
            "students" => {
                let file_name = file_name.ok_or_else(|| {
                    GatewayError::InvalidRequest("student upload without a file name".to_string())
                })?;
                students.push(StudentUpload::new(file_name, bytes.to_vec()));
            }
            other => debug!(field = other, "Ignoring unknown multipart field"),
        }
    }

    let config = config
        .ok_or_else(|| GatewayError::InvalidRequest("missing `config` part".to_string()))?;
    let answer_key = answer_key
        .ok_or_else(|| GatewayError::InvalidRequest("missing `answer_key` part".to_string()))?;
    if students.is_empty() {
        return Err(GatewayError::InvalidRequest(
            "at least one `students` part is required".to_string(),
        ));
    }

    Ok(GradeUpload {
        config,
        answer_key,
        students,
    })
}

fn multipart_error(e: MultipartError) -> GatewayError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        GatewayError::PayloadTooLarge
    } else {
        GatewayError::InvalidRequest(format!("malformed multipart body: {}", e.body_text()))
    }
}
