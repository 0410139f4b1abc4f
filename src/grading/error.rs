use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::scoring::ScoringError;
use crate::storage::StorageError;

/// Rejections of a question configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuestionConfigError {
    #[error("number of questions must be between 1 and 100, got {count}")]
    QuestionCount { count: usize },

    #[error("question {question} has {marks} marks, expected 1 to 10")]
    MarksOutOfRange { question: usize, marks: u32 },

    #[error("question numbers start at 1")]
    QuestionNumberZero,

    #[error("{pairs} OR-pairs configured for {questions} questions (at most half)")]
    TooManyPairs { pairs: usize, questions: usize },

    #[error("OR-pair references question {question}, but only {questions} are configured")]
    PairOutOfRange { question: usize, questions: usize },

    #[error("OR-pair pairs question {question} with itself")]
    PairNotDistinct { question: usize },

    #[error("question {question} appears in more than one OR-pair")]
    PairsOverlap { question: usize },
}

/// Failures of a grading session.
#[derive(Debug, Error)]
pub enum GradingError {
    /// The answer key does not have one answer per configured question.
    #[error("the answer key contains {found} answers, but {expected} were specified")]
    AnswerKeyMismatch { found: usize, expected: usize },

    #[error("invalid question configuration: {0}")]
    InvalidConfig(#[from] QuestionConfigError),

    #[error("failed to read {document}: {source}")]
    Extraction {
        document: String,
        #[source]
        source: ExtractionError,
    },

    #[error("scoring failed for {student}, question {question}: {source}")]
    Scoring {
        student: String,
        question: u32,
        #[source]
        source: ScoringError,
    },

    #[error("failed to record result: {0}")]
    Storage(#[from] StorageError),
}
