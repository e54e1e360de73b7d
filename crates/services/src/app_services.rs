use std::sync::Arc;

use quiz_core::Roster;
use storage::repository::Storage;

use crate::Clock;
use crate::aggregator::AggregatorClient;
use crate::auth_service::AuthService;
use crate::error::AppServicesError;
use crate::feedback_service::FeedbackService;
use crate::quiz::QuizService;

/// Assembles the app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    auth: Arc<AuthService>,
    quizzes: Arc<QuizService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// Feedback credentials come from the environment; without them the
    /// feedback step degrades to its fixed fallback message.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::assemble(storage, clock))
    }

    /// Build services over in-memory storage, for tests and dry runs.
    #[must_use]
    pub fn new_in_memory(clock: Clock) -> Self {
        Self::assemble(Storage::in_memory(), clock)
    }

    fn assemble(storage: Storage, clock: Clock) -> Self {
        let auth = Arc::new(AuthService::new(
            Roster::classroom(),
            Arc::clone(&storage.credentials),
        ));
        let aggregator =
            AggregatorClient::new(Arc::clone(&storage.settings), Arc::clone(&storage.results));
        let quizzes = Arc::new(QuizService::new(
            clock,
            aggregator,
            FeedbackService::from_env(),
        ));

        Self { auth, quizzes }
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn quizzes(&self) -> Arc<QuizService> {
        Arc::clone(&self.quizzes)
    }
}
