use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("uploaded document is empty")]
    EmptyDocument,

    #[error("failed to extract PDF text: {reason}")]
    PdfParseFailed { reason: String },

    #[error("document is not valid text: {reason}")]
    InvalidText { reason: String },
}
