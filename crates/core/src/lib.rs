//! Domain logic for the AroundMe content service: content posts, likes,
//! and the storage contracts behind them.

pub mod content;
pub mod error;
pub mod like;
pub mod repository;

pub use error::{LikeConflict, ServiceError, ServiceResult, StorageError, StorageResult};
