//! Persistence of teachers, class/subject pairs and graded results.
//!
//! Results are append-only: a grading session writes one row per student and
//! nothing updates it afterwards. The dashboard reads them back per teacher,
//! class and subject.

mod database;
pub mod error;
mod schema;


pub use database::Database;
pub use error::{StorageError, StorageResult};
pub use schema::create_schema;

use serde::Serialize;

/// Sink for per-student totals produced by a grading session.
pub trait ResultRecorder: Send + Sync {
    fn record(&self, record: &ResultRecord) -> StorageResult<()>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassSubject {
    pub class_name: String,
    pub subject_name: String,
}

/// One graded student, as handed to a [`ResultRecorder`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    pub teacher_id: i64,
    pub class_name: String,
    pub subject_name: String,
    pub student_name: String,
    pub total_marks: f64,
    pub max_marks: f64,
}

/// Result row as shown on a teacher's dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub student_name: String,
    pub total_marks: f64,
    pub max_marks: f64,
    /// RFC 3339 timestamp of when the row was written.
    pub graded_at: String,
}

/// Result row joined with the grading teacher's name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeacherResultRow {
    pub teacher_name: String,
    pub class_name: String,
    pub subject_name: String,
    pub student_name: String,
    pub total_marks: f64,
    pub max_marks: f64,
}

/// In-memory recorder for tests.
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Default)]
pub struct MemoryRecorder {
    records: parking_lot::Mutex<Vec<ResultRecord>>,
}

#[cfg(any(test, feature = "mock"))]
impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<ResultRecord> {
        self.records.lock().clone()
    }
}

#[cfg(any(test, feature = "mock"))]
impl ResultRecorder for MemoryRecorder {
    fn record(&self, record: &ResultRecord) -> StorageResult<()> {
        self.records.lock().push(record.clone());
        Ok(())
    }
}
