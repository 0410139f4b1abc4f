//! Answer similarity and marks bands.
//!
//! [`SimilarityScorer`] embeds the reference and candidate answers and returns
//! their cosine similarity; [`awarded_marks`] turns that similarity into marks
//! through fixed [`MarksBand`]s.

pub mod error;
pub mod marks;
pub mod scorer;


pub use error::ScoringError;
pub use marks::{MarksBand, awarded_marks};
pub use scorer::{SimilarityScorer, cosine_similarity};
