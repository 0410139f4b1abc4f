use serde::{Deserialize, Serialize};

use crate::grading::{QuestionConfig, QuestionConfigError};
use crate::storage::{ClassSubject, ResultRow, Teacher};

#[derive(Deserialize, Debug, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct LoginResponse {
    pub token: String,
    pub teacher: Teacher,
}

#[derive(Serialize, Debug, Clone)]
pub struct DashboardResponse {
    pub teacher: Teacher,
    pub classes: Vec<ClassSubject>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ClassSubjectRequest {
    pub class_name: String,
    pub subject_name: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ResultsQuery {
    pub class_name: String,
    pub subject_name: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct ResultsResponse {
    pub class_name: String,
    pub subject_name: String,
    pub results: Vec<ResultRow>,
}

/// `config` part of a grading upload.
///
/// `or_pairs` use 1-based question numbers, e.g. `[[1, 2]]`.
#[derive(Deserialize, Debug, Clone)]
pub struct GradeConfig {
    pub class_name: String,
    pub subject_name: String,
    pub marks_per_question: Vec<u32>,
    #[serde(default)]
    pub or_pairs: Vec<(u32, u32)>,
}

impl GradeConfig {
    pub fn question_config(&self) -> Result<QuestionConfig, QuestionConfigError> {
        QuestionConfig::from_question_numbers(self.marks_per_question.clone(), &self.or_pairs)
    }
}
