//! HTTP client helpers for tests.

use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unexpected status {0}: {1}")]
    UnexpectedStatus(u16, String),
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
            token: None,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn expect_json(
        resp: reqwest::Response,
        expected: u16,
    ) -> Result<Value, TestClientError> {
        let status = resp.status().as_u16();
        if status == expected {
            Ok(resp.json().await?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(TestClientError::UnexpectedStatus(status, body))
        }
    }

    pub async fn get(&self, path: &str) -> Result<reqwest::Response, TestClientError> {
        Ok(self.authorized(self.client.get(self.url(path))).send().await?)
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<reqwest::Response, TestClientError> {
        let body = json!({"name": name, "email": email, "password": password});
        Ok(self
            .client
            .post(self.url("/api/teachers"))
            .json(&body)
            .send()
            .await?)
    }

    /// Logs in and keeps the bearer token for later calls.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Value, TestClientError> {
        let body = json!({"email": email, "password": password});
        let resp = self.client.post(self.url("/api/login")).json(&body).send().await?;
        let value = Self::expect_json(resp, 200).await?;
        self.token = value["token"].as_str().map(str::to_string);
        Ok(value)
    }

    pub async fn add_class(&self, class_name: &str, subject_name: &str) -> Result<Value, TestClientError> {
        let body = json!({"class_name": class_name, "subject_name": subject_name});
        let resp = self
            .authorized(self.client.post(self.url("/api/classes")))
            .json(&body)
            .send()
            .await?;
        Self::expect_json(resp, 201).await
    }

    pub async fn grade(
        &self,
        config: Value,
        answer_key: &str,
        students: &[(&str, &str)],
    ) -> Result<reqwest::Response, TestClientError> {
        let mut form = Form::new()
            .text("config", config.to_string())
            .part(
                "answer_key",
                Part::bytes(answer_key.as_bytes().to_vec()).file_name("key.pdf"),
            );
        for (file_name, content) in students {
            form = form.part(
                "students",
                Part::bytes(content.as_bytes().to_vec()).file_name(file_name.to_string()),
            );
        }

        Ok(self
            .authorized(self.client.post(self.url("/api/grade")))
            .multipart(form)
            .send()
            .await?)
    }

    pub async fn results(&self, class_name: &str, subject_name: &str) -> Result<Value, TestClientError> {
        let resp = self
            .authorized(self.client.get(self.url("/api/results")))
            .query(&[("class_name", class_name), ("subject_name", subject_name)])
            .send()
            .await?;
        Self::expect_json(resp, 200).await
    }
}
