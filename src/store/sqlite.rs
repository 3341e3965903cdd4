// src/store/sqlite.rs

use async_trait::async_trait;
use sqlx::{SqlitePool, types::Json};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::response::{SubmissionDraft, SubmittedRecord},
    store::SubmissionStore,
};

/// `SubmissionStore` backed by the `survey_responses` table.
#[derive(Clone)]
pub struct SqliteSubmissionStore {
    pool: SqlitePool,
}

impl SqliteSubmissionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionStore for SqliteSubmissionStore {
    async fn submit(&self, draft: SubmissionDraft) -> Result<String, AppError> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO survey_responses (id, track_label, answers, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&draft.track_label)
        .bind(Json(&draft.answers))
        .bind(chrono::Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert survey response: {:?}", e);
            AppError::StorageUnavailable(e.to_string())
        })?;

        tracing::info!(
            "Stored survey response {} ({} answers, track '{}')",
            id,
            draft.answers.len(),
            draft.track_label
        );

        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<SubmittedRecord>, AppError> {
        let records = sqlx::query_as::<_, SubmittedRecord>(
            r#"
            SELECT id, track_label, answers, created_at
            FROM survey_responses
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list survey responses: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

        Ok(records)
    }

    async fn delete_all(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM survey_responses")
            .execute(&self.pool)
            .await?;

        tracing::warn!("Deleted {} survey responses", result.rows_affected());

        Ok(result.rows_affected())
    }
}
