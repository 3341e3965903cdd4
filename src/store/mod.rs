// src/store/mod.rs

mod sqlite;

pub use sqlite::SqliteSubmissionStore;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::response::{SubmissionDraft, SubmittedRecord},
};

/// Durable storage for completed surveys.
///
/// Admin reads and deletes run independently of in-flight submissions;
/// no ordering between them is promised.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Persists a finished survey and returns the new record id.
    async fn submit(&self, draft: SubmissionDraft) -> Result<String, AppError>;

    /// All records, newest first.
    async fn list_all(&self) -> Result<Vec<SubmittedRecord>, AppError>;

    /// Removes every record. Returns how many were deleted.
    async fn delete_all(&self) -> Result<u64, AppError>;
}
