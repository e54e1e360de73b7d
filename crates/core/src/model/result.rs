use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::model::ids::{QuestionId, StudentId};

//
// ─── SCORING ───────────────────────────────────────────────────────────────────
//

/// Points awarded for each correct answer.
pub const CORRECT_POINTS: f64 = 2.0;

/// Points deducted for each wrong or unanswered question.
pub const MISS_PENALTY: f64 = 0.5;

/// Weighted score of a finished session: +2 per correct answer, −0.5 per
/// miss. Unanswered questions count as misses.
#[must_use]
pub fn weighted_score(correct_count: u32, total_questions: u32) -> f64 {
    let missed = total_questions.saturating_sub(correct_count);
    CORRECT_POINTS * f64::from(correct_count) - MISS_PENALTY * f64::from(missed)
}

//
// ─── QUIZ RESULT ───────────────────────────────────────────────────────────────
//

/// A completed session as it travels between the local cache, the sheet
/// endpoint, and the leaderboard.
///
/// Created once when a session finishes and never mutated. The pair
/// `(student_id, timestamp)` is the only identity a result has; merging
/// dedupes on it. Fields serialize in camelCase to match the sheet's
/// columns. Rows fetched back from the sheet carry a reduced set of
/// columns, so `total_questions` and `answers` default when absent and
/// `score` tolerates a string-typed cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub student_id: StudentId,
    pub student_name: String,
    #[serde(deserialize_with = "score_from_number_or_string")]
    pub score: f64,
    #[serde(default)]
    pub correct_count: u32,
    #[serde(default)]
    pub total_questions: u32,
    pub timestamp: String,
    #[serde(default)]
    pub answers: HashMap<QuestionId, usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_feedback: Option<String>,
}

impl QuizResult {
    /// The `(student id, timestamp)` pair that identifies this result.
    #[must_use]
    pub fn identity(&self) -> (&str, &str) {
        (self.student_id.as_str(), &self.timestamp)
    }
}

/// Sheet cells sometimes come back as text even for numeric columns, so a
/// score is accepted both ways. A non-numeric string fails the row rather
/// than smuggling a NaN into totals.
fn score_from_number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ScoreCell {
        Number(f64),
        Text(String),
    }

    match ScoreCell::deserialize(deserializer)? {
        ScoreCell::Number(score) => Ok(score),
        ScoreCell::Text(text) => text.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
