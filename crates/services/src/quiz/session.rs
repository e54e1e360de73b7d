use std::collections::HashMap;

use quiz_core::model::{Question, QuestionId, Student};

use crate::error::QuizError;
use crate::quiz::progress::SessionProgress;

/// One student working through one drawn set of questions.
///
/// The session walks the questions in order: each is either answered with
/// an option index or skipped, and the cursor never moves backwards. Once
/// the last question has been passed the session is complete and can be
/// turned into a result.
#[derive(Debug, Clone)]
pub struct QuizSession {
    student: Student,
    questions: Vec<Question>,
    answers: HashMap<QuestionId, usize>,
    cursor: usize,
}

impl QuizSession {
    /// Starts a session over the given questions.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::EmptyBank`] when there are no questions to ask.
    pub fn new(student: Student, questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyBank);
        }

        Ok(Self {
            student,
            questions,
            answers: HashMap::new(),
            cursor: 0,
        })
    }

    #[must_use]
    pub fn student(&self) -> &Student {
        &self.student
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Index of the question currently being asked; equals
    /// `question_count` once the session is complete.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// The question awaiting an answer, or `None` once complete.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.cursor)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.questions.len()
    }

    /// Recorded choices so far, keyed by question id. Skipped questions
    /// have no entry.
    #[must_use]
    pub fn answers(&self) -> &HashMap<QuestionId, usize> {
        &self.answers
    }

    /// Snapshot of how many questions were answered, skipped, and are
    /// still ahead of the cursor.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let answered = self.answers.len();
        SessionProgress {
            total: self.questions.len(),
            answered,
            skipped: self.cursor.saturating_sub(answered),
            remaining: self.questions.len().saturating_sub(self.cursor),
        }
    }

    /// Records a choice for the current question and advances.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::SessionComplete`] when every question has
    /// already been passed, and [`QuizError::ChoiceOutOfRange`] when the
    /// choice does not point at one of the current question's options.
    pub fn answer_current(&mut self, choice: usize) -> Result<(), QuizError> {
        let Some(question) = self.questions.get(self.cursor) else {
            return Err(QuizError::SessionComplete);
        };
        if choice >= question.options().len() {
            return Err(QuizError::ChoiceOutOfRange {
                choice,
                options: question.options().len(),
            });
        }

        self.answers.insert(question.id().clone(), choice);
        self.cursor += 1;
        Ok(())
    }

    /// Leaves the current question unanswered and advances. A skipped
    /// question scores as a miss.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::SessionComplete`] when every question has
    /// already been passed.
    pub fn skip_current(&mut self) -> Result<(), QuizError> {
        if self.is_complete() {
            return Err(QuizError::SessionComplete);
        }

        self.cursor += 1;
        Ok(())
    }

    /// Number of questions answered correctly so far.
    #[must_use]
    pub fn correct_count(&self) -> u32 {
        let hits = self
            .questions
            .iter()
            .filter(|question| {
                self.answers
                    .get(question.id())
                    .is_some_and(|choice| question.is_correct(*choice))
            })
            .count();
        u32::try_from(hits).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::StudentId;

    fn build_student() -> Student {
        Student::new(StudentId::new("HS001"), "Alice Bennett")
    }

    fn build_question(id: &str, correct: usize) -> Question {
        Question::new(
            QuestionId::new(id),
            format!("Prompt {id}"),
            vec!["a".to_owned(), "b".to_owned(), "c".to_owned(), "d".to_owned()],
            correct,
            None,
        )
        .unwrap()
    }

    #[test]
    fn session_requires_at_least_one_question() {
        let err = QuizSession::new(build_student(), Vec::new()).unwrap_err();
        assert!(matches!(err, QuizError::EmptyBank));
    }

    #[test]
    fn session_walks_questions_in_order() {
        let questions = vec![build_question("Q1", 0), build_question("Q2", 1)];
        let mut session = QuizSession::new(build_student(), questions).unwrap();

        assert_eq!(session.current_question().unwrap().id().as_str(), "Q1");
        session.answer_current(0).unwrap();
        assert_eq!(session.current_question().unwrap().id().as_str(), "Q2");
        session.answer_current(0).unwrap();

        assert!(session.is_complete());
        assert!(session.current_question().is_none());
        assert!(matches!(
            session.answer_current(0),
            Err(QuizError::SessionComplete)
        ));
    }

    #[test]
    fn skipped_questions_count_as_misses() {
        let questions = vec![build_question("Q1", 2), build_question("Q2", 1)];
        let mut session = QuizSession::new(build_student(), questions).unwrap();

        session.answer_current(2).unwrap();
        session.skip_current().unwrap();

        assert!(session.is_complete());
        assert_eq!(session.correct_count(), 1);
        assert!(!session.answers().contains_key(&QuestionId::new("Q2")));
    }

    #[test]
    fn out_of_range_choice_is_rejected_without_advancing() {
        let questions = vec![build_question("Q1", 0)];
        let mut session = QuizSession::new(build_student(), questions).unwrap();

        let err = session.answer_current(4).unwrap_err();
        assert!(matches!(
            err,
            QuizError::ChoiceOutOfRange {
                choice: 4,
                options: 4
            }
        ));
        assert_eq!(session.position(), 0);
        assert!(!session.is_complete());
    }

    #[test]
    fn progress_tracks_answers_and_skips_separately() {
        let questions = vec![
            build_question("Q1", 0),
            build_question("Q2", 0),
            build_question("Q3", 0),
        ];
        let mut session = QuizSession::new(build_student(), questions).unwrap();

        session.answer_current(1).unwrap();
        session.skip_current().unwrap();

        let progress = session.progress();
        assert_eq!(progress.total, 3);
        assert_eq!(progress.answered, 1);
        assert_eq!(progress.skipped, 1);
        assert_eq!(progress.remaining, 1);
    }
}
