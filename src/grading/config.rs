use serde::{Deserialize, Serialize};

use crate::constants::{MAX_QUESTION_MARKS, MAX_QUESTIONS, MIN_QUESTION_MARKS, MIN_QUESTIONS};

use super::error::QuestionConfigError;

/// Two questions of which only the better-scoring one counts.
///
/// Indices are 0-based; use [`OrPair::from_question_numbers`] for 1-based input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrPair {
    pub first: usize,
    pub second: usize,
}

impl OrPair {
    pub fn new(first: usize, second: usize) -> Self {
        Self { first, second }
    }

    /// Converts 1-based question numbers into a 0-based pair.
    pub fn from_question_numbers(first: u32, second: u32) -> Result<Self, QuestionConfigError> {
        if first == 0 || second == 0 {
            return Err(QuestionConfigError::QuestionNumberZero);
        }
        Ok(Self::new(first as usize - 1, second as usize - 1))
    }

    pub fn contains(&self, index: usize) -> bool {
        self.first == index || self.second == index
    }
}

/// Per-question max marks plus the OR-pairs of a grading session.
///
/// Construction validates everything the aggregator relies on: question count,
/// marks range, and OR-pairs that are in range, distinct and pairwise disjoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionConfig {
    max_marks: Vec<u32>,
    or_pairs: Vec<OrPair>,
}

impl QuestionConfig {
    pub fn new(max_marks: Vec<u32>, or_pairs: Vec<OrPair>) -> Result<Self, QuestionConfigError> {
        let count = max_marks.len();
        if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&count) {
            return Err(QuestionConfigError::QuestionCount { count });
        }

        if let Some((index, &marks)) = max_marks
            .iter()
            .enumerate()
            .find(|(_, m)| !(MIN_QUESTION_MARKS..=MAX_QUESTION_MARKS).contains(*m))
        {
            return Err(QuestionConfigError::MarksOutOfRange {
                question: index + 1,
                marks,
            });
        }

        if or_pairs.len() > count / 2 {
            return Err(QuestionConfigError::TooManyPairs {
                pairs: or_pairs.len(),
                questions: count,
            });
        }

        let mut seen = vec![false; count];
        for pair in &or_pairs {
            for index in [pair.first, pair.second] {
                if index >= count {
                    return Err(QuestionConfigError::PairOutOfRange {
                        question: index + 1,
                        questions: count,
                    });
                }
            }

            if pair.first == pair.second {
                return Err(QuestionConfigError::PairNotDistinct {
                    question: pair.first + 1,
                });
            }

            for index in [pair.first, pair.second] {
                if std::mem::replace(&mut seen[index], true) {
                    return Err(QuestionConfigError::PairsOverlap { question: index + 1 });
                }
            }
        }

        Ok(Self {
            max_marks,
            or_pairs,
        })
    }

    /// Builds a config from 1-based OR-pair question numbers.
    pub fn from_question_numbers(
        max_marks: Vec<u32>,
        or_pairs: &[(u32, u32)],
    ) -> Result<Self, QuestionConfigError> {
        let pairs = or_pairs
            .iter()
            .map(|&(a, b)| OrPair::from_question_numbers(a, b))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(max_marks, pairs)
    }

    pub fn num_questions(&self) -> usize {
        self.max_marks.len()
    }

    pub fn max_marks(&self) -> &[u32] {
        &self.max_marks
    }

    /// Max marks of a 0-based question index.
    pub fn max_marks_for(&self, index: usize) -> f64 {
        self.max_marks.get(index).copied().map_or(0.0, f64::from)
    }

    pub fn or_pairs(&self) -> &[OrPair] {
        &self.or_pairs
    }

    /// Highest total a student can reach, counting each OR-pair once.
    pub fn total_possible_marks(&self) -> f64 {
        let marks: Vec<f64> = self.max_marks.iter().copied().map(f64::from).collect();
        super::aggregate::total_marks(&marks, &self.or_pairs)
    }
}
