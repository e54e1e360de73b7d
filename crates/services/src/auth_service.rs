use std::sync::Arc;

use quiz_core::Roster;
use quiz_core::model::{Student, StudentId};
use storage::repository::CredentialOverrideRepository;

use crate::error::AuthError;

/// Shortest password `change_password` accepts.
pub const MIN_PASSWORD_LEN: usize = 4;

/// Credential checks against the static roster plus stored overrides.
///
/// The roster carries every account's default password; an override stored
/// through [`AuthService::change_password`] shadows the default from then
/// on. Nothing here is hardened security, it gates a classroom quiz.
#[derive(Clone)]
pub struct AuthService {
    roster: Roster,
    overrides: Arc<dyn CredentialOverrideRepository>,
}

impl AuthService {
    #[must_use]
    pub fn new(roster: Roster, overrides: Arc<dyn CredentialOverrideRepository>) -> Self {
        Self { roster, overrides }
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Check an id/password pair and return the signed-in student.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UnknownStudent` for ids outside the roster,
    /// `AuthError::InvalidCredential` on a password mismatch, and
    /// `AuthError::Storage` if the override store cannot be read.
    pub async fn login(&self, id: &StudentId, password: &str) -> Result<Student, AuthError> {
        let record = self.roster.find(id).ok_or(AuthError::UnknownStudent)?;
        let effective = self.effective_password(record.id()).await?;

        if password != effective {
            return Err(AuthError::InvalidCredential);
        }

        Ok(record.student())
    }

    /// Replace an account's password.
    ///
    /// Checks run in order: the old password must match the effective one,
    /// the new one must be long enough, and the confirmation must repeat it
    /// exactly. Only then is the override persisted.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UnknownStudent`, `AuthError::WrongOldPassword`,
    /// `AuthError::PasswordTooShort`, `AuthError::ConfirmMismatch`, or
    /// `AuthError::Storage` if persisting the override fails.
    pub async fn change_password(
        &self,
        id: &StudentId,
        old: &str,
        new: &str,
        confirm: &str,
    ) -> Result<(), AuthError> {
        let record = self.roster.find(id).ok_or(AuthError::UnknownStudent)?;
        let effective = self.effective_password(record.id()).await?;

        if old != effective {
            return Err(AuthError::WrongOldPassword);
        }
        if new.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }
        if new != confirm {
            return Err(AuthError::ConfirmMismatch);
        }

        self.overrides.set_password_override(id, new).await?;
        Ok(())
    }

    async fn effective_password(&self, id: &StudentId) -> Result<String, AuthError> {
        let record = self.roster.find(id).ok_or(AuthError::UnknownStudent)?;
        let stored = self.overrides.password_override(id).await?;
        Ok(stored.unwrap_or_else(|| record.default_password().to_owned()))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
