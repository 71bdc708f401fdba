use chrono::{DateTime, Utc};

/// Composite identity of a like: one user, one content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LikeId {
    pub content_id: i64,
    pub user_id: i64,
}

impl LikeId {
    pub fn new(content_id: i64, user_id: i64) -> Self {
        Self {
            content_id,
            user_id,
        }
    }
}

/// A stored like. Maps to the `content_likes` PostgreSQL table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    pub id: LikeId,
    pub created_time: DateTime<Utc>,
}

/// Database row representation of a like.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LikeRow {
    pub content_id: i64,
    pub user_id: i64,
    pub created_time: DateTime<Utc>,
}

impl From<LikeRow> for Like {
    fn from(row: LikeRow) -> Self {
        Self {
            id: LikeId::new(row.content_id, row.user_id),
            created_time: row.created_time,
        }
    }
}
