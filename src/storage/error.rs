use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Registration with an email that already has an account.
    #[error("email already registered: {email}")]
    DuplicateEmail { email: String },

    #[error("teacher {id} does not exist")]
    TeacherNotFound { id: i64 },

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}

pub type StorageResult<T> = Result<T, StorageError>;
