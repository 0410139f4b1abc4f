//! Cross-cutting, shared constants.
//!
//! The marks bands and configuration limits are referenced by the grading core,
//! the HTTP layer and the tests. Keep them here so they cannot drift apart.

/// Output dimension of all-MiniLM-L6-v2 sentence embeddings.
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Max tokens fed to the embedding model (longer answers are truncated).
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

/// Smallest number of questions a grading session may configure.
pub const MIN_QUESTIONS: usize = 1;
/// Largest number of questions a grading session may configure.
pub const MAX_QUESTIONS: usize = 100;

/// Smallest max-marks value for a single question.
pub const MIN_QUESTION_MARKS: u32 = 1;
/// Largest max-marks value for a single question.
pub const MAX_QUESTION_MARKS: u32 = 10;

/// Similarity lower bounds for each marks band, highest first.
pub const BAND_FULL_THRESHOLD: f32 = 0.8;
pub const BAND_HIGH_THRESHOLD: f32 = 0.6;
pub const BAND_MID_THRESHOLD: f32 = 0.4;
pub const BAND_LOW_THRESHOLD: f32 = 0.2;

/// Fraction of max marks awarded in each band.
pub const BAND_FULL_FRACTION: f64 = 1.0;
pub const BAND_HIGH_FRACTION: f64 = 0.8;
pub const BAND_MID_FRACTION: f64 = 0.6;
pub const BAND_LOW_FRACTION: f64 = 0.4;

/// Response header carrying a short machine-readable status.
pub const GRADER_STATUS_HEADER: &str = "x-grader-status";
pub const GRADER_STATUS_HEALTHY: &str = "healthy";
pub const GRADER_STATUS_READY: &str = "ready";
pub const GRADER_STATUS_ERROR: &str = "error";
pub const GRADER_STATUS_GRADED: &str = "graded";
