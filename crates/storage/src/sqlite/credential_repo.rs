use async_trait::async_trait;
use quiz_core::model::StudentId;
use sqlx::Row;

use super::SqliteRepository;
use crate::repository::{CredentialOverrideRepository, StorageError};

#[async_trait]
impl CredentialOverrideRepository for SqliteRepository {
    async fn password_override(&self, id: &StudentId) -> Result<Option<String>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT password
            FROM password_overrides
            WHERE student_id = ?1
            ",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        row.try_get("password")
            .map(Some)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    async fn set_password_override(
        &self,
        id: &StudentId,
        password: &str,
    ) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO password_overrides (student_id, password)
            VALUES (?1, ?2)
            ON CONFLICT(student_id) DO UPDATE SET
                password = excluded.password
            ",
        )
        .bind(id.as_str())
        .bind(password)
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
