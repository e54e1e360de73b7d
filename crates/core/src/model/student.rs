use crate::model::ids::StudentId;

//
// ─── STUDENT TYPES ─────────────────────────────────────────────────────────────
//

/// A signed-in student. Carries identity only; passwords stay with the
/// roster and the override store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    id: StudentId,
    name: String,
}

impl Student {
    #[must_use]
    pub fn new(id: StudentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &StudentId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// One roster entry: identity plus the seeded default password.
///
/// The default password only applies until an override is stored for the
/// account; resolution order is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    id: StudentId,
    name: String,
    default_password: String,
}

impl CredentialRecord {
    #[must_use]
    pub fn new(
        id: StudentId,
        name: impl Into<String>,
        default_password: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            default_password: default_password.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &StudentId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn default_password(&self) -> &str {
        &self.default_password
    }

    /// The student this record describes, without credential material.
    #[must_use]
    pub fn student(&self) -> Student {
        Student::new(self.id.clone(), self.name.clone())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
