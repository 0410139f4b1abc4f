use std::collections::BTreeMap;

use serde::Serialize;

/// Reference answers keyed by 1-based question number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerKey {
    answers: BTreeMap<u32, String>,
}

impl AnswerKey {
    pub(crate) fn new(answers: BTreeMap<u32, String>) -> Self {
        Self { answers }
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Reference answer for `question`; a gap in the key numbering reads as "".
    pub fn reference(&self, question: u32) -> &str {
        self.answers.get(&question).map_or("", String::as_str)
    }
}

/// A student's answers for every question `1..=n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentSubmission {
    answers: Vec<String>,
}

impl StudentSubmission {
    /// Fills `1..=num_questions` from extracted answers; missing ones become "".
    ///
    /// Answers numbered outside that range are dropped.
    pub fn densify(mut extracted: BTreeMap<u32, String>, num_questions: usize) -> Self {
        let answers = (1..=num_questions as u32)
            .map(|question| extracted.remove(&question).unwrap_or_default())
            .collect();
        Self { answers }
    }

    pub fn num_questions(&self) -> usize {
        self.answers.len()
    }

    /// Answer to a 1-based question (`""` if out of range).
    pub fn answer(&self, question: u32) -> &str {
        (question as usize)
            .checked_sub(1)
            .and_then(|index| self.answers.get(index))
            .map_or("", String::as_str)
    }

    /// Iterates `(question number, answer)` in question order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.answers
            .iter()
            .enumerate()
            .map(|(index, answer)| (index as u32 + 1, answer.as_str()))
    }
}

/// Score of a single question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionScore {
    pub question: u32,
    pub similarity: f32,
    pub awarded_marks: f64,
    pub max_marks: f64,
}

/// All scores for one student.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredStudent {
    pub student_name: String,
    pub questions: Vec<QuestionScore>,
    pub total_marks: f64,
    pub max_marks: f64,
}

impl ScoredStudent {
    /// Awarded fraction of the achievable total, `0.0` when nothing is achievable.
    pub fn fraction(&self) -> f64 {
        if self.max_marks > 0.0 {
            self.total_marks / self.max_marks
        } else {
            0.0
        }
    }
}

/// An uploaded student document.
#[derive(Debug, Clone)]
pub struct StudentUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl StudentUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn student_name(&self) -> String {
        student_name_from_file_name(&self.file_name)
    }
}

/// Outcome of a full grading session, students in upload order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub class_name: String,
    pub subject_name: String,
    pub total_possible_marks: f64,
    pub students: Vec<ScoredStudent>,
}

/// Student identity derived from an upload's file name: everything before the first `.`.
///
/// Directory components are ignored. A name starting with `.` keeps the whole
/// base name so it never becomes empty.
pub fn student_name_from_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);

    match base.split('.').next() {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => base.to_string(),
    }
}
