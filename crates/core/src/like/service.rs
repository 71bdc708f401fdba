use std::sync::Arc;

use chrono::Utc;

use super::model::{Like, LikeId};
use crate::error::{LikeConflict, ServiceResult, StorageError};
use crate::repository::LikeRepository;

/// Like/unlike use cases. A `(content, user)` pair is either liked or not.
#[derive(Clone)]
pub struct LikeService {
    repository: Arc<dyn LikeRepository>,
}

impl LikeService {
    pub fn new(repository: Arc<dyn LikeRepository>) -> Self {
        Self { repository }
    }

    /// Registers a like. Fails if the user already liked the content.
    ///
    /// The lookup only produces the common-case error; a concurrent insert of
    /// the same pair is caught by the storage constraint and reported the
    /// same way.
    pub async fn like(&self, content_id: i64, user_id: i64) -> ServiceResult<()> {
        tracing::info!(content_id, user_id, "adding like");
        let id = LikeId::new(content_id, user_id);

        if self.repository.find(id).await?.is_some() {
            return Err(LikeConflict::already_liked(id).into());
        }

        let like = Like {
            id,
            created_time: Utc::now(),
        };
        match self.repository.insert(like).await {
            Ok(()) => {
                tracing::info!(content_id, user_id, "like saved");
                Ok(())
            }
            Err(StorageError::Conflict(_)) => Err(LikeConflict::already_liked(id).into()),
            Err(err) => Err(err.into()),
        }
    }

    /// Removes a like. Fails if the user has not liked the content.
    pub async fn unlike(&self, content_id: i64, user_id: i64) -> ServiceResult<()> {
        tracing::info!(content_id, user_id, "removing like");
        let id = LikeId::new(content_id, user_id);

        if self.repository.find(id).await?.is_none() || !self.repository.delete(id).await? {
            return Err(LikeConflict::not_liked(id).into());
        }

        tracing::info!(content_id, user_id, "like removed");
        Ok(())
    }

    pub async fn count(&self, content_id: i64) -> ServiceResult<i64> {
        Ok(self.repository.count_for_content(content_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::{ServiceError, StorageResult};
    use crate::repository::memory::InMemoryLikeRepository;

    fn service() -> (LikeService, Arc<InMemoryLikeRepository>) {
        let repository = Arc::new(InMemoryLikeRepository::new());
        (LikeService::new(repository.clone()), repository)
    }

    #[tokio::test]
    async fn like_stores_the_pair() {
        let (service, repository) = service();

        service.like(1, 100).await.unwrap();

        let stored = repository.find(LikeId::new(1, 100)).await.unwrap().unwrap();
        assert_eq!(stored.id.content_id, 1);
        assert_eq!(stored.id.user_id, 100);
    }

    #[tokio::test]
    async fn second_like_is_a_conflict() {
        let (service, repository) = service();

        service.like(1, 100).await.unwrap();
        let err = service.like(1, 100).await.unwrap_err();

        assert!(matches!(err, ServiceError::Conflict(LikeConflict::AlreadyLiked { .. })));
        assert_eq!(err.to_string(), "User 100 already liked this content 1");
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn same_user_may_like_different_content() {
        let (service, _) = service();

        service.like(1, 100).await.unwrap();
        service.like(2, 100).await.unwrap();
        service.like(1, 101).await.unwrap();

        assert_eq!(service.count(1).await.unwrap(), 2);
        assert_eq!(service.count(2).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn unlike_without_like_is_a_conflict() {
        let (service, _) = service();

        let err = service.unlike(1, 100).await.unwrap_err();

        assert!(matches!(err, ServiceError::Conflict(LikeConflict::NotLiked { .. })));
        assert_eq!(err.to_string(), "User 100 is not liked this content 1");
    }

    #[tokio::test]
    async fn like_unlike_like_cycle() {
        let (service, repository) = service();

        service.like(1, 100).await.unwrap();
        service.unlike(1, 100).await.unwrap();
        assert!(repository.is_empty().await);

        service.like(1, 100).await.unwrap();
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn concurrent_likes_leave_one_row() {
        let (service, repository) = service();

        let attempts: Vec<_> = (0..8)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.like(1, 100).await })
            })
            .collect();

        let mut successes = 0;
        for attempt in attempts {
            match attempt.await.unwrap() {
                Ok(()) => successes += 1,
                Err(err) => assert_eq!(err.to_string(), "User 100 already liked this content 1"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(repository.len().await, 1);
    }

    /// Simulates losing the race: the lookup misses but the insert collides.
    struct RacingRepository;

    #[async_trait]
    impl LikeRepository for RacingRepository {
        async fn find(&self, _id: LikeId) -> StorageResult<Option<Like>> {
            Ok(None)
        }

        async fn insert(&self, _like: Like) -> StorageResult<()> {
            Err(StorageError::Conflict("content_likes (1, 100)".to_string()))
        }

        async fn delete(&self, _id: LikeId) -> StorageResult<bool> {
            Ok(false)
        }

        async fn count_for_content(&self, _content_id: i64) -> StorageResult<i64> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn storage_conflict_is_reported_as_already_liked() {
        let service = LikeService::new(Arc::new(RacingRepository));

        let err = service.like(1, 100).await.unwrap_err();

        assert_eq!(err.to_string(), "User 100 already liked this content 1");
    }

    /// Simulates a concurrent unlike: the lookup hits but the row is gone by
    /// the time the delete runs.
    struct VanishingLikeRepository;

    #[async_trait]
    impl LikeRepository for VanishingLikeRepository {
        async fn find(&self, id: LikeId) -> StorageResult<Option<Like>> {
            Ok(Some(Like {
                id,
                created_time: Utc::now(),
            }))
        }

        async fn insert(&self, _like: Like) -> StorageResult<()> {
            Ok(())
        }

        async fn delete(&self, _id: LikeId) -> StorageResult<bool> {
            Ok(false)
        }

        async fn count_for_content(&self, _content_id: i64) -> StorageResult<i64> {
            Ok(1)
        }
    }

    #[tokio::test]
    async fn unlike_of_concurrently_removed_like_is_a_conflict() {
        let service = LikeService::new(Arc::new(VanishingLikeRepository));

        let err = service.unlike(1, 100).await.unwrap_err();

        assert!(matches!(err, ServiceError::Conflict(LikeConflict::NotLiked { .. })));
        assert_eq!(err.to_string(), "User 100 is not liked this content 1");
    }
}
