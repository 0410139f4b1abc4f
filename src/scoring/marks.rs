use crate::constants::{
    BAND_FULL_FRACTION, BAND_FULL_THRESHOLD, BAND_HIGH_FRACTION, BAND_HIGH_THRESHOLD,
    BAND_LOW_FRACTION, BAND_LOW_THRESHOLD, BAND_MID_FRACTION, BAND_MID_THRESHOLD,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Similarity tier that decides what fraction of a question's marks is awarded.
pub enum MarksBand {
    /// `>= 0.8`: full marks.
    Full,
    /// `>= 0.6`: 80%.
    High,
    /// `>= 0.4`: 60%.
    Mid,
    /// `>= 0.2`: 40%.
    Low,
    /// Below `0.2`: nothing.
    None,
}

impl MarksBand {
    /// First band whose lower bound `similarity` reaches (bounds are inclusive).
    pub fn from_similarity(similarity: f32) -> Self {
        if similarity >= BAND_FULL_THRESHOLD {
            MarksBand::Full
        } else if similarity >= BAND_HIGH_THRESHOLD {
            MarksBand::High
        } else if similarity >= BAND_MID_THRESHOLD {
            MarksBand::Mid
        } else if similarity >= BAND_LOW_THRESHOLD {
            MarksBand::Low
        } else {
            MarksBand::None
        }
    }

    pub fn fraction(self) -> f64 {
        match self {
            MarksBand::Full => BAND_FULL_FRACTION,
            MarksBand::High => BAND_HIGH_FRACTION,
            MarksBand::Mid => BAND_MID_FRACTION,
            MarksBand::Low => BAND_LOW_FRACTION,
            MarksBand::None => 0.0,
        }
    }
}

impl std::fmt::Display for MarksBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MarksBand::Full => "FULL",
            MarksBand::High => "HIGH",
            MarksBand::Mid => "MID",
            MarksBand::Low => "LOW",
            MarksBand::None => "NONE",
        };
        f.write_str(label)
    }
}

/// Marks awarded for an answer with the given similarity. Not rounded.
pub fn awarded_marks(similarity: f32, max_marks: f64) -> f64 {
    match MarksBand::from_similarity(similarity) {
        MarksBand::Full => max_marks,
        MarksBand::None => 0.0,
        band => max_marks * band.fraction(),
    }
}
