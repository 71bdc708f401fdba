use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{ContentRepository, LikeRepository};
use crate::content::model::{Content, ContentInput, NewContent};
use crate::content::validate::DateRange;
use crate::error::{StorageError, StorageResult};
use crate::like::model::{Like, LikeId};

#[derive(Debug, Default)]
struct ContentTable {
    last_id: i64,
    rows: BTreeMap<i64, Content>,
}

/// In-memory implementation of [`ContentRepository`].
///
/// Ids are assigned sequentially starting at 1 and never reused, matching a
/// `BIGSERIAL` column.
#[derive(Debug, Default)]
pub struct InMemoryContentRepository {
    table: RwLock<ContentTable>,
}

impl InMemoryContentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn filter<F>(&self, predicate: F) -> Vec<Content>
    where
        F: Fn(&Content) -> bool + Send,
    {
        self.table
            .read()
            .await
            .rows
            .values()
            .filter(|content| predicate(content))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn find_all(&self) -> StorageResult<Vec<Content>> {
        Ok(self.filter(|_| true).await)
    }

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Content>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, content: NewContent) -> StorageResult<Content> {
        let mut table = self.table.write().await;
        table.last_id += 1;

        let stored = Content {
            id: table.last_id,
            category: content.category,
            body: content.body,
            media: content.media,
            created_time: content.created_time,
            updated_time: content.created_time,
        };
        table.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: i64,
        changes: ContentInput,
        updated_time: DateTime<Utc>,
    ) -> StorageResult<Option<Content>> {
        let mut table = self.table.write().await;
        let Some(stored) = table.rows.get_mut(&id) else {
            return Ok(None);
        };

        stored.category = changes.category;
        stored.body = changes.body;
        stored.media = changes.media;
        stored.updated_time = updated_time;
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: i64) -> StorageResult<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn find_by_body_containing(&self, query: &str) -> StorageResult<Vec<Content>> {
        Ok(self.filter(|content| content.body.contains(query)).await)
    }

    async fn find_by_category(&self, category: &str) -> StorageResult<Vec<Content>> {
        Ok(self.filter(|content| content.category == category).await)
    }

    async fn find_by_created_time_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StorageResult<Vec<Content>> {
        let range = DateRange { start, end };
        Ok(self.filter(|content| range.contains(content.created_time)).await)
    }

    async fn ping(&self) -> StorageResult<()> {
        Ok(())
    }
}

/// In-memory implementation of [`LikeRepository`].
#[derive(Debug, Default)]
pub struct InMemoryLikeRepository {
    rows: RwLock<BTreeMap<LikeId, Like>>,
}

impl InMemoryLikeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored likes across all content.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl LikeRepository for InMemoryLikeRepository {
    async fn find(&self, id: LikeId) -> StorageResult<Option<Like>> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn insert(&self, like: Like) -> StorageResult<()> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&like.id) {
            return Err(StorageError::Conflict(format!(
                "content_likes ({}, {})",
                like.id.content_id, like.id.user_id
            )));
        }
        rows.insert(like.id, like);
        Ok(())
    }

    async fn delete(&self, id: LikeId) -> StorageResult<bool> {
        Ok(self.rows.write().await.remove(&id).is_some())
    }

    async fn count_for_content(&self, content_id: i64) -> StorageResult<i64> {
        let count = self
            .rows
            .read()
            .await
            .keys()
            .filter(|id| id.content_id == content_id)
            .count();
        Ok(count as i64)
    }
}
