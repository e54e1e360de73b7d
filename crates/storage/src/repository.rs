use async_trait::async_trait;
use quiz_core::model::{QuizResult, StudentId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Most results the local cache keeps. Appending beyond this drops the
/// oldest rows.
pub const RESULT_CACHE_CAP: usize = 100;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for the local result cache.
///
/// The cache keeps the newest [`RESULT_CACHE_CAP`] results and serves two
/// jobs: leaderboard fallback when the sheet is unreachable, and a buffer
/// for rows whose upload never happened.
#[async_trait]
pub trait ResultCacheRepository: Send + Sync {
    /// Fetch cached results, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cache cannot be read.
    async fn recent_results(&self) -> Result<Vec<QuizResult>, StorageError>;

    /// Insert a result at the front of the cache.
    ///
    /// An append whose `(student id, timestamp)` identity is already cached
    /// is a silent no-op; otherwise rows beyond the capacity are dropped
    /// oldest-first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the result cannot be stored.
    async fn append_result(&self, result: &QuizResult) -> Result<(), StorageError>;
}

/// Repository contract for per-account password overrides.
///
/// The roster ships default passwords; an override shadows the default for
/// one account from the moment it is stored.
#[async_trait]
pub trait CredentialOverrideRepository: Send + Sync {
    /// Fetch the stored override for an account, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn password_override(&self, id: &StudentId) -> Result<Option<String>, StorageError>;

    /// Store or replace the override for an account.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the override cannot be stored.
    async fn set_password_override(
        &self,
        id: &StudentId,
        password: &str,
    ) -> Result<(), StorageError>;
}

/// Repository contract for app settings (currently just the sheet endpoint).
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Fetch the configured sheet endpoint, if one was ever saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if settings cannot be read.
    async fn endpoint_url(&self) -> Result<Option<String>, StorageError>;

    /// Store the sheet endpoint.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if settings cannot be stored.
    async fn set_endpoint_url(&self, url: &str) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    results: Arc<Mutex<Vec<QuizResult>>>,
    overrides: Arc<Mutex<HashMap<StudentId, String>>>,
    endpoint: Arc<Mutex<Option<String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResultCacheRepository for InMemoryRepository {
    async fn recent_results(&self) -> Result<Vec<QuizResult>, StorageError> {
        let guard = self
            .results
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn append_result(&self, result: &QuizResult) -> Result<(), StorageError> {
        let mut guard = self
            .results
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if guard.iter().any(|cached| cached.identity() == result.identity()) {
            return Ok(());
        }
        guard.insert(0, result.clone());
        guard.truncate(RESULT_CACHE_CAP);
        Ok(())
    }
}

#[async_trait]
impl CredentialOverrideRepository for InMemoryRepository {
    async fn password_override(&self, id: &StudentId) -> Result<Option<String>, StorageError> {
        let guard = self
            .overrides
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(id).cloned())
    }

    async fn set_password_override(
        &self,
        id: &StudentId,
        password: &str,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .overrides
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(id.clone(), password.to_owned());
        Ok(())
    }
}

#[async_trait]
impl SettingsRepository for InMemoryRepository {
    async fn endpoint_url(&self) -> Result<Option<String>, StorageError> {
        let guard = self
            .endpoint
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn set_endpoint_url(&self, url: &str) -> Result<(), StorageError> {
        let mut guard = self
            .endpoint
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(url.to_owned());
        Ok(())
    }
}

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub results: Arc<dyn ResultCacheRepository>,
    pub credentials: Arc<dyn CredentialOverrideRepository>,
    pub settings: Arc<dyn SettingsRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let results: Arc<dyn ResultCacheRepository> = Arc::new(repo.clone());
        let credentials: Arc<dyn CredentialOverrideRepository> = Arc::new(repo.clone());
        let settings: Arc<dyn SettingsRepository> = Arc::new(repo);
        Self {
            results,
            credentials,
            settings,
        }
    }
}
