pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::content::model::{Content, ContentInput, NewContent};
use crate::error::StorageResult;
use crate::like::model::{Like, LikeId};

/// Storage contract for content records.
///
/// Every list query returns records in ascending id order.
#[async_trait]
pub trait ContentRepository: Send + Sync + 'static {
    /// Returns every stored record.
    async fn find_all(&self) -> StorageResult<Vec<Content>>;

    /// Returns `None` if no record has the given id.
    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Content>>;

    /// Persists a new record and returns it with its generated id.
    async fn insert(&self, content: NewContent) -> StorageResult<Content>;

    /// Overwrites the writable fields and the update timestamp in one step.
    /// Returns `None` if no record has the given id.
    async fn update(
        &self,
        id: i64,
        changes: ContentInput,
        updated_time: DateTime<Utc>,
    ) -> StorageResult<Option<Content>>;

    /// Returns `true` if the record existed and was removed.
    async fn delete(&self, id: i64) -> StorageResult<bool>;

    /// Case-sensitive substring match on the body.
    async fn find_by_body_containing(&self, query: &str) -> StorageResult<Vec<Content>>;

    async fn find_by_category(&self, category: &str) -> StorageResult<Vec<Content>>;

    /// Records created within `[start, end]`, both ends inclusive.
    async fn find_by_created_time_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StorageResult<Vec<Content>>;

    /// Verifies the backend is reachable.
    async fn ping(&self) -> StorageResult<()>;
}

/// Storage contract for likes, keyed by `(content_id, user_id)`.
#[async_trait]
pub trait LikeRepository: Send + Sync + 'static {
    async fn find(&self, id: LikeId) -> StorageResult<Option<Like>>;

    /// Inserts a like. Returns `Err(StorageError::Conflict)` if the pair already exists.
    async fn insert(&self, like: Like) -> StorageResult<()>;

    /// Returns `true` if the like existed and was removed.
    async fn delete(&self, id: LikeId) -> StorageResult<bool>;

    async fn count_for_content(&self, content_id: i64) -> StorageResult<i64>;
}
