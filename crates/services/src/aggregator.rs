use std::sync::Arc;

use quiz_core::model::QuizResult;
use reqwest::Client;
use storage::repository::{ResultCacheRepository, SettingsRepository, StorageError};
use tracing::{debug, warn};

use crate::error::RemoteError;

/// Endpoint baked into the build; a stored setting overrides it.
pub const DEFAULT_ENDPOINT: &str =
    "https://script.google.com/macros/s/AKfycbxQn5rWClassroomQuizBoard/exec";

/// What is known about a remote append after firing it.
///
/// The endpoint's response is never inspected, so "it worked" is not an
/// observable state; the strongest positive signal is that the request
/// left without a transport error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The request was handed to the network without a transport error.
    /// Delivery is unconfirmed by design.
    Dispatched,
    /// No endpoint is configured; nothing was sent.
    NotConfigured,
    /// The request failed before reaching the endpoint.
    TransportError,
}

/// Client for the shared results sheet.
///
/// Owns both halves of persistence: the remote endpoint (fetch-all and
/// append-one) and the local result cache that backs it up. Every network
/// failure degrades to cached data; no method here returns a hard error
/// for an unreachable endpoint.
#[derive(Clone)]
pub struct AggregatorClient {
    http: Client,
    settings: Arc<dyn SettingsRepository>,
    results: Arc<dyn ResultCacheRepository>,
    default_endpoint: Option<String>,
}

impl AggregatorClient {
    #[must_use]
    pub fn new(
        settings: Arc<dyn SettingsRepository>,
        results: Arc<dyn ResultCacheRepository>,
    ) -> Self {
        Self {
            http: Client::new(),
            settings,
            results,
            default_endpoint: Some(DEFAULT_ENDPOINT.to_owned()),
        }
    }

    /// Replace the baked-in default endpoint (or remove it with `None`).
    #[must_use]
    pub fn with_default_endpoint(mut self, default_endpoint: Option<String>) -> Self {
        self.default_endpoint = default_endpoint;
        self
    }

    /// The endpoint in effect: the stored setting when present and
    /// non-blank, else the default.
    pub async fn endpoint(&self) -> Option<String> {
        match self.settings.endpoint_url().await {
            Ok(Some(url)) if !url.trim().is_empty() => Some(url.trim().to_owned()),
            Ok(_) => self.default_endpoint.clone(),
            Err(err) => {
                warn!(error = %err, "could not read endpoint setting, using default");
                self.default_endpoint.clone()
            }
        }
    }

    /// Persist a new endpoint. Blank input is ignored and leaves the
    /// current configuration alone.
    ///
    /// Returns whether anything was stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the setting cannot be persisted.
    pub async fn set_endpoint(&self, url: &str) -> Result<bool, StorageError> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }
        self.settings.set_endpoint_url(trimmed).await?;
        Ok(true)
    }

    /// All rows the endpoint knows about; cached rows when it is
    /// unreachable, answers nonsense, or no endpoint is configured.
    pub async fn fetch_all(&self) -> Vec<QuizResult> {
        let Some(url) = self.endpoint().await else {
            return self.local_results().await;
        };

        match self.try_fetch(&url).await {
            Ok(rows) => rows,
            Err(err) => {
                warn!(error = %err, "endpoint fetch failed, serving cached results");
                self.local_results().await
            }
        }
    }

    /// Contents of the local result cache, newest first. Degrades to empty
    /// on a cache failure rather than erroring.
    pub async fn local_results(&self) -> Vec<QuizResult> {
        match self.results.recent_results().await {
            Ok(results) => results,
            Err(err) => {
                warn!(error = %err, "could not read the result cache");
                Vec::new()
            }
        }
    }

    /// Cache a result locally, then fire it at the endpoint.
    ///
    /// The cache write always happens first so the score survives whatever
    /// the network does. The remote response is never read.
    pub async fn append(&self, result: &QuizResult) -> DispatchOutcome {
        if let Err(err) = self.results.append_result(result).await {
            warn!(error = %err, "could not cache result locally");
        }

        let Some(url) = self.endpoint().await else {
            return DispatchOutcome::NotConfigured;
        };

        match self.http.post(&url).json(result).send().await {
            Ok(_) => DispatchOutcome::Dispatched,
            Err(err) => {
                warn!(error = %err, "result dispatch failed, cached copy kept");
                DispatchOutcome::TransportError
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<Vec<QuizResult>, RemoteError> {
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(RemoteError::HttpStatus(response.status()));
        }

        let body: serde_json::Value = response.json().await?;
        let Some(rows) = body.as_array() else {
            return Err(RemoteError::NotAList);
        };

        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            match serde_json::from_value::<QuizResult>(row.clone()) {
                Ok(result) => results.push(result),
                Err(err) => {
                    debug!(error = %err, "skipping malformed row from endpoint");
                }
            }
        }

        Ok(results)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::StudentId;
    use std::collections::HashMap;
    use storage::repository::InMemoryRepository;

    fn build_client(repo: &InMemoryRepository) -> AggregatorClient {
        AggregatorClient::new(Arc::new(repo.clone()), Arc::new(repo.clone()))
    }

    fn build_result(id: &str, timestamp: &str) -> QuizResult {
        QuizResult {
            student_id: StudentId::new(id),
            student_name: format!("Student {id}"),
            score: 10.0,
            correct_count: 10,
            total_questions: 20,
            timestamp: timestamp.to_owned(),
            answers: HashMap::new(),
            ai_feedback: None,
        }
    }

    #[tokio::test]
    async fn endpoint_falls_back_to_the_default() {
        let repo = InMemoryRepository::new();
        let client = build_client(&repo);

        assert_eq!(client.endpoint().await.as_deref(), Some(DEFAULT_ENDPOINT));
    }

    #[tokio::test]
    async fn stored_endpoint_wins_over_the_default() {
        let repo = InMemoryRepository::new();
        let client = build_client(&repo);

        let saved = client
            .set_endpoint("  https://example.com/sheet  ")
            .await
            .unwrap();
        assert!(saved);
        assert_eq!(
            client.endpoint().await.as_deref(),
            Some("https://example.com/sheet")
        );
    }

    #[tokio::test]
    async fn blank_endpoint_input_is_a_no_op() {
        let repo = InMemoryRepository::new();
        let client = build_client(&repo);

        client.set_endpoint("https://example.com/sheet").await.unwrap();
        let saved = client.set_endpoint("   ").await.unwrap();

        assert!(!saved);
        assert_eq!(
            client.endpoint().await.as_deref(),
            Some("https://example.com/sheet")
        );
    }

    #[tokio::test]
    async fn append_without_any_endpoint_still_caches() {
        let repo = InMemoryRepository::new();
        let client = build_client(&repo).with_default_endpoint(None);

        let outcome = client.append(&build_result("HS001", "t1")).await;

        assert_eq!(outcome, DispatchOutcome::NotConfigured);
        let cached = client.local_results().await;
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].student_id.as_str(), "HS001");
    }

    #[tokio::test]
    async fn fetch_without_any_endpoint_serves_the_cache() {
        let repo = InMemoryRepository::new();
        let client = build_client(&repo).with_default_endpoint(None);

        client.append(&build_result("HS002", "t1")).await;
        let rows = client.fetch_all().await;

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].student_id.as_str(), "HS002");
    }
}
