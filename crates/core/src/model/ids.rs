use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a roster account, e.g. `HS001`
///
/// Serializes as a bare string so it can double as a JSON object key.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    /// Creates a new `StudentId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unique identifier for a question in the built-in bank
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    /// Creates a new `QuestionId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StudentId({:?})", self.0)
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({:?})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── From Implementations ──────────────────────────────────────────────────────

impl From<&str> for StudentId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<&str> for QuestionId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_id_display() {
        let id = StudentId::new("HS007");
        assert_eq!(id.to_string(), "HS007");
        assert_eq!(id.as_str(), "HS007");
    }

    #[test]
    fn test_question_id_display() {
        let id = QuestionId::new("B03");
        assert_eq!(id.to_string(), "B03");
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = QuestionId::new("B03");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""B03""#);

        let back: QuestionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_ids_work_as_map_keys() {
        use std::collections::HashMap;

        let mut answers: HashMap<QuestionId, usize> = HashMap::new();
        answers.insert(QuestionId::new("B01"), 2);
        assert_eq!(answers.get(&QuestionId::from("B01")), Some(&2));
    }
}
