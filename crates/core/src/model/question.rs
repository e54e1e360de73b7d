use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// A multiple-choice question from the built-in bank.
///
/// Immutable once constructed; sessions only ever read it. The correct
/// option is stored as an index into `options`, which the constructor
/// guarantees is in range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: Vec<String>,
    correct_option: usize,
    explanation: Option<String>,
}

impl Question {
    /// Creates a question after checking its shape.
    ///
    /// # Errors
    ///
    /// Returns [`QuestionError::TooFewOptions`] when fewer than two options
    /// are given, and [`QuestionError::CorrectOptionOutOfRange`] when the
    /// answer index does not point into `options`.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_option: usize,
        explanation: Option<String>,
    ) -> Result<Self, QuestionError> {
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions { got: options.len() });
        }
        if correct_option >= options.len() {
            return Err(QuestionError::CorrectOptionOutOfRange {
                index: correct_option,
                options: options.len(),
            });
        }

        Ok(Self {
            id,
            prompt: prompt.into(),
            options,
            correct_option,
            explanation,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_option(&self) -> usize {
        self.correct_option
    }

    /// Text of the correct option.
    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.options[self.correct_option]
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    /// Whether the given option index answers this question correctly.
    #[must_use]
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_option
    }
}

//
// ─── QUESTION VALIDATION ERRORS ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("a multiple-choice question needs at least two options, got {got}")]
    TooFewOptions { got: usize },

    #[error("correct option index {index} is out of range for {options} options")]
    CorrectOptionOutOfRange { index: usize, options: usize },
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
