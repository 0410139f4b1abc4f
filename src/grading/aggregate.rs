use std::collections::HashSet;

use super::config::OrPair;

/// Sums per-question marks, letting each OR-pair contribute only its better member.
///
/// Indices are 0-based. The first pair containing an index decides how it is
/// counted; once either member of a pair has been visited, both are marked as
/// counted. Pairs are assumed pairwise disjoint ([`QuestionConfig`] enforces
/// that); with overlapping pairs an index may be absorbed by one pair and
/// skipped for another. Pair indices past the end of `marks` read as `0.0`.
///
/// [`QuestionConfig`]: super::QuestionConfig
pub fn total_marks(marks: &[f64], or_pairs: &[OrPair]) -> f64 {
    let mut counted: HashSet<usize> = HashSet::new();
    let mut total = 0.0;
    let mark_at = |index: usize| marks.get(index).copied().unwrap_or(0.0);

    for (index, &mark) in marks.iter().enumerate() {
        match or_pairs.iter().find(|pair| pair.contains(index)) {
            Some(pair) => {
                if counted.contains(&index) {
                    continue;
                }
                counted.insert(pair.first);
                counted.insert(pair.second);
                total += mark_at(pair.first).max(mark_at(pair.second));
            }
            None => total += mark,
        }
    }

    total
}
