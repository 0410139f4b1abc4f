use tracing::{debug, info, instrument};

use crate::extraction::{DocumentText, extract_answers};
use crate::scoring::{SimilarityScorer, awarded_marks};
use crate::storage::{ResultRecord, ResultRecorder};

use super::aggregate::total_marks;
use super::config::QuestionConfig;
use super::error::GradingError;
use super::types::{
    AnswerKey, QuestionScore, ScoredStudent, SessionReport, StudentSubmission, StudentUpload,
};

/// Who is grading, and which class/subject the results belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub teacher_id: i64,
    pub class_name: String,
    pub subject_name: String,
}

/// One grading run: an answer key checked against any number of submissions.
///
/// Everything the run touches (scorer, recorder, configuration) is passed in;
/// the session owns no connection or model of its own.
pub struct GradingSession<'a> {
    scorer: &'a SimilarityScorer,
    recorder: &'a dyn ResultRecorder,
    questions: QuestionConfig,
    info: SessionInfo,
}

impl<'a> GradingSession<'a> {
    pub fn new(
        scorer: &'a SimilarityScorer,
        recorder: &'a dyn ResultRecorder,
        questions: QuestionConfig,
        info: SessionInfo,
    ) -> Self {
        Self {
            scorer,
            recorder,
            questions,
            info,
        }
    }

    pub fn questions(&self) -> &QuestionConfig {
        &self.questions
    }

    pub fn info(&self) -> &SessionInfo {
        &self.info
    }

    pub fn total_possible_marks(&self) -> f64 {
        self.questions.total_possible_marks()
    }

    /// Extracts the answer key and checks it has one answer per configured question.
    pub fn load_answer_key(&self, text: &str) -> Result<AnswerKey, GradingError> {
        let answers = extract_answers(text);
        let expected = self.questions.num_questions();

        if answers.len() != expected {
            return Err(GradingError::AnswerKeyMismatch {
                found: answers.len(),
                expected,
            });
        }

        Ok(AnswerKey::new(answers))
    }

    /// Scores every question of one student's text and aggregates the total.
    pub fn grade_submission(
        &self,
        key: &AnswerKey,
        student_name: &str,
        text: &str,
    ) -> Result<ScoredStudent, GradingError> {
        let submission = StudentSubmission::densify(extract_answers(text), self.questions.num_questions());

        let mut questions = Vec::with_capacity(submission.num_questions());
        for (question, answer) in submission.iter() {
            let similarity = self
                .scorer
                .score(key.reference(question), answer)
                .map_err(|source| GradingError::Scoring {
                    student: student_name.to_string(),
                    question,
                    source,
                })?;

            let max_marks = self.questions.max_marks_for(question as usize - 1);
            let awarded = awarded_marks(similarity, max_marks);
            debug!(
                student = student_name,
                question,
                similarity,
                awarded,
                max_marks,
                "Question scored"
            );

            questions.push(QuestionScore {
                question,
                similarity,
                awarded_marks: awarded,
                max_marks,
            });
        }

        let awarded: Vec<f64> = questions.iter().map(|q| q.awarded_marks).collect();
        let total = total_marks(&awarded, self.questions.or_pairs());

        Ok(ScoredStudent {
            student_name: student_name.to_string(),
            questions,
            total_marks: total,
            max_marks: self.total_possible_marks(),
        })
    }

    /// Hands a student's totals to the recorder.
    pub fn record(&self, scored: &ScoredStudent) -> Result<(), GradingError> {
        self.recorder.record(&ResultRecord {
            teacher_id: self.info.teacher_id,
            class_name: self.info.class_name.clone(),
            subject_name: self.info.subject_name.clone(),
            student_name: scored.student_name.clone(),
            total_marks: scored.total_marks,
            max_marks: scored.max_marks,
        })?;
        Ok(())
    }

    /// Grades every upload, then records them all in upload order.
    ///
    /// The answer key is validated first; on a mismatch nothing is scored.
    /// Nothing is recorded until every upload has been graded, so a failing
    /// upload leaves the recorder untouched.
    #[instrument(skip_all, fields(class = %self.info.class_name, subject = %self.info.subject_name, uploads = uploads.len()))]
    pub fn run(
        &self,
        extractor: &dyn DocumentText,
        answer_key: &[u8],
        uploads: &[StudentUpload],
    ) -> Result<SessionReport, GradingError> {
        let key_text = extractor
            .extract_text(answer_key)
            .map_err(|source| GradingError::Extraction {
                document: "answer key".to_string(),
                source,
            })?;
        let key = self.load_answer_key(&key_text)?;

        let total_possible = self.total_possible_marks();
        info!(
            questions = self.questions.num_questions(),
            or_pairs = self.questions.or_pairs().len(),
            total_possible,
            "Answer key loaded"
        );

        let mut students = Vec::with_capacity(uploads.len());
        for upload in uploads {
            let text = extractor
                .extract_text(&upload.bytes)
                .map_err(|source| GradingError::Extraction {
                    document: upload.file_name.clone(),
                    source,
                })?;

            let scored = self.grade_submission(&key, &upload.student_name(), &text)?;
            info!(
                student = %scored.student_name,
                total_marks = scored.total_marks,
                max_marks = scored.max_marks,
                "Student graded"
            );
            students.push(scored);
        }

        for scored in &students {
            self.record(scored)?;
        }

        Ok(SessionReport {
            class_name: self.info.class_name.clone(),
            subject_name: self.info.subject_name.clone(),
            total_possible_marks: total_possible,
            students,
        })
    }
}
