//! Answer-grader library crate (used by the server binary and integration tests).
//!
//! # Public API Surface
//!
//! ## Grading core
//! - [`extract_answers`] - split document text into numbered answers
//! - [`SimilarityScorer`], [`cosine_similarity`] - embedding similarity
//! - [`MarksBand`], [`awarded_marks`] - similarity to marks
//! - [`total_marks`], [`OrPair`], [`QuestionConfig`] - OR-pair aggregation
//! - [`GradingSession`], [`SessionReport`] - one grading run end to end
//!
//! ## Infrastructure
//! - [`Config`], [`ConfigError`] - server configuration
//! - [`MiniLmEmbedder`], [`EmbedderConfig`] - sentence embeddings
//! - [`PdfTextExtractor`] - PDF to text
//! - [`Database`] - teachers, classes and results
//! - [`gateway`] - HTTP API
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod extraction;
pub mod gateway;
pub mod grading;
pub mod hashing;
pub mod scoring;
pub mod storage;

pub use config::{Config, ConfigError};
pub use embedding::{
    EmbedderConfig, EmbeddingError, MINILM_EMBEDDING_DIM, MINILM_MAX_SEQ_LEN, MiniLmEmbedder,
    TextEmbedder,
};
#[cfg(any(test, feature = "mock"))]
pub use embedding::CountingEmbedder;
pub use extraction::{DocumentText, ExtractionError, PdfTextExtractor, extract_answers};
#[cfg(any(test, feature = "mock"))]
pub use extraction::PlainText;
pub use grading::{
    AnswerKey, GradingError, GradingSession, OrPair, QuestionConfig, QuestionConfigError,
    QuestionScore, ScoredStudent, SessionInfo, SessionReport, StudentSubmission, StudentUpload,
    student_name_from_file_name, total_marks,
};
pub use scoring::{MarksBand, ScoringError, SimilarityScorer, awarded_marks, cosine_similarity};
pub use storage::{
    ClassSubject, Database, ResultRecord, ResultRecorder, ResultRow, StorageError, StorageResult,
    Teacher, TeacherResultRow,
};
#[cfg(any(test, feature = "mock"))]
pub use storage::MemoryRecorder;
