//! Grading pipeline: answer key validation, per-question scoring, OR-pair aggregation.
//!
//! A [`GradingSession`] pulls answers out of each document, scores them with
//! the [`SimilarityScorer`](crate::scoring::SimilarityScorer), maps similarity
//! to marks and sums them with [`total_marks`]. The same aggregation produces
//! the achievable total from the configured max marks, so both numbers use the
//! same OR-pair rules.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod session;
pub mod types;


pub use aggregate::total_marks;
pub use config::{OrPair, QuestionConfig};
pub use error::{GradingError, QuestionConfigError};
pub use session::{GradingSession, SessionInfo};
pub use types::{
    AnswerKey, QuestionScore, ScoredStudent, SessionReport, StudentSubmission, StudentUpload,
    student_name_from_file_name,
};
