use std::sync::Arc;

use aroundme_core::content::ContentService;
use aroundme_core::like::LikeService;
use aroundme_core::repository::{ContentRepository, LikeRepository};

use crate::config::AppConfig;

/// Shared application state, passed to all handlers via Axum's `State` extractor.
/// Wrapped in `Arc` so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    config: AppConfig,
    contents: ContentService,
    likes: LikeService,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        content_repository: Arc<dyn ContentRepository>,
        like_repository: Arc<dyn LikeRepository>,
    ) -> Self {
        Self {
            inner: Arc::new(InnerState {
                config,
                contents: ContentService::new(content_repository),
                likes: LikeService::new(like_repository),
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn contents(&self) -> &ContentService {
        &self.inner.contents
    }

    pub fn likes(&self) -> &LikeService {
        &self.inner.likes
    }
}
