use thiserror::Error;

use crate::content::validate::ValidationError;
use crate::like::model::LikeId;

/// Result type for repository operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Result type for service operations.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("record already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

/// A like/unlike request that does not match the current state of the pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LikeConflict {
    #[error("User {user_id} already liked this content {content_id}")]
    AlreadyLiked { content_id: i64, user_id: i64 },
    #[error("User {user_id} is not liked this content {content_id}")]
    NotLiked { content_id: i64, user_id: i64 },
}

impl LikeConflict {
    pub fn already_liked(id: LikeId) -> Self {
        LikeConflict::AlreadyLiked {
            content_id: id.content_id,
            user_id: id.user_id,
        }
    }

    pub fn not_liked(id: LikeId) -> Self {
        LikeConflict::NotLiked {
            content_id: id.content_id,
            user_id: id.user_id,
        }
    }
}

/// Errors surfaced by the content and like services.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Content with id {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Conflict(#[from] LikeConflict),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ServiceError {
    /// Whether the error was caused by the caller's input rather than the backend.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ServiceError::Storage(_))
    }
}
