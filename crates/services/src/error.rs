//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("no account with that student id")]
    UnknownStudent,
    #[error("wrong password")]
    InvalidCredential,
    #[error("current password does not match")]
    WrongOldPassword,
    #[error("new password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("new password and confirmation do not match")]
    ConfirmMismatch,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the quiz session machinery.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("attempt limit reached ({attempts} attempts on record)")]
    AttemptLimitExceeded { attempts: usize },
    #[error("choice {choice} is out of range for {options} options")]
    ChoiceOutOfRange { choice: usize, options: usize },
    #[error("the question bank is empty")]
    EmptyBank,
    #[error("all questions have been answered already")]
    SessionComplete,
    #[error("the session still has unanswered questions")]
    SessionIncomplete,
}

/// Errors emitted by `FeedbackService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FeedbackError {
    #[error("feedback generation is not configured")]
    Disabled,
    #[error("feedback provider returned an empty response")]
    EmptyResponse,
    #[error("feedback request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors raised while talking to the sheet endpoint. Never surfaced to
/// callers as hard failures; the client recovers with cached data.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RemoteError {
    #[error("endpoint request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("endpoint did not return a list of rows")]
    NotAList,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
