use std::collections::HashMap;

use quiz_core::model::{QuestionId, QuizResult, StudentId};
use sqlx::Row;

use super::SqliteRepository;
use crate::repository::{RESULT_CACHE_CAP, ResultCacheRepository, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

fn map_result_row(row: &sqlx::sqlite::SqliteRow) -> Result<QuizResult, StorageError> {
    let student_id: String = row.try_get("student_id").map_err(ser)?;
    let student_name: String = row.try_get("student_name").map_err(ser)?;
    let score: f64 = row.try_get("score").map_err(ser)?;
    let correct_count = u32_from_i64(
        "correct_count",
        row.try_get::<i64, _>("correct_count").map_err(ser)?,
    )?;
    let total_questions = u32_from_i64(
        "total_questions",
        row.try_get::<i64, _>("total_questions").map_err(ser)?,
    )?;
    let timestamp: String = row.try_get("timestamp").map_err(ser)?;
    let answers_json: String = row.try_get("answers").map_err(ser)?;
    let ai_feedback: Option<String> = row.try_get("ai_feedback").map_err(ser)?;

    // Rows written by this app always hold valid JSON here; tolerate a
    // mangled column rather than losing the whole cache.
    let answers: HashMap<QuestionId, usize> =
        serde_json::from_str(&answers_json).unwrap_or_default();

    Ok(QuizResult {
        student_id: StudentId::new(student_id),
        student_name,
        score,
        correct_count,
        total_questions,
        timestamp,
        answers,
        ai_feedback,
    })
}

#[async_trait::async_trait]
impl ResultCacheRepository for SqliteRepository {
    async fn recent_results(&self) -> Result<Vec<QuizResult>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT
                    student_id, student_name, score, correct_count,
                    total_questions, timestamp, answers, ai_feedback
                FROM cached_results
                ORDER BY id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(map_result_row(&row)?);
        }

        Ok(out)
    }

    async fn append_result(&self, result: &QuizResult) -> Result<(), StorageError> {
        let answers_json = serde_json::to_string(&result.answers).map_err(ser)?;
        let cap = i64::try_from(RESULT_CACHE_CAP).map_err(ser)?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        // Fresh rows get a new rowid and therefore sort newest. A duplicate
        // (student_id, timestamp) hits the UNIQUE constraint and is dropped,
        // leaving the stored copy and its position untouched.
        sqlx::query(
            r"
                INSERT INTO cached_results (
                    student_id, student_name, score, correct_count,
                    total_questions, timestamp, answers, ai_feedback
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                ON CONFLICT (student_id, timestamp) DO NOTHING
            ",
        )
        .bind(result.student_id.as_str())
        .bind(&result.student_name)
        .bind(result.score)
        .bind(i64::from(result.correct_count))
        .bind(i64::from(result.total_questions))
        .bind(&result.timestamp)
        .bind(answers_json)
        .bind(result.ai_feedback.as_deref())
        .execute(&mut *tx)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        sqlx::query(
            r"
                DELETE FROM cached_results
                WHERE id NOT IN (
                    SELECT id FROM cached_results
                    ORDER BY id DESC
                    LIMIT ?1
                )
            ",
        )
        .bind(cap)
        .execute(&mut *tx)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }
}
