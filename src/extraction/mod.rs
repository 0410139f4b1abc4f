//! Document text -> per-question answers.
//!
//! [`DocumentText`] turns upload bytes into text; [`extract_answers`] splits
//! that text on `Answer <n>:` markers.

mod answers;
pub mod error;
pub mod pdf;


pub use answers::extract_answers;
pub use error::ExtractionError;
#[cfg(any(test, feature = "mock"))]
pub use pdf::PlainText;
pub use pdf::{DocumentText, PdfTextExtractor};
