use async_trait::async_trait;
use sqlx::Row;

use super::SqliteRepository;
use crate::repository::{SettingsRepository, StorageError};

#[async_trait]
impl SettingsRepository for SqliteRepository {
    async fn endpoint_url(&self) -> Result<Option<String>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT endpoint_url
            FROM app_settings
            WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let endpoint_url: Option<String> = row
            .try_get("endpoint_url")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        Ok(endpoint_url)
    }

    async fn set_endpoint_url(&self, url: &str) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO app_settings (id, endpoint_url)
            VALUES (?1, ?2)
            ON CONFLICT(id) DO UPDATE SET
                endpoint_url = excluded.endpoint_url
            ",
        )
        .bind(1_i64)
        .bind(url)
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
