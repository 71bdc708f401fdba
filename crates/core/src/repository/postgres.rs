use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{ContentRepository, LikeRepository};
use crate::content::model::{Content, ContentInput, NewContent};
use crate::error::{StorageError, StorageResult};
use crate::like::model::{Like, LikeId, LikeRow};

const CONTENT_COLUMNS: &str = "id, category, body, media, created_time, updated_time";

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

/// PostgreSQL implementation of [`ContentRepository`].
#[derive(Debug, Clone)]
pub struct PgContentRepository {
    pool: PgPool,
}

impl PgContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_list(&self, sql: &str, bind: ListBind<'_>) -> StorageResult<Vec<Content>> {
        let query = sqlx::query_as::<_, Content>(sql);
        let query = match bind {
            ListBind::None => query,
            ListBind::Text(value) => query.bind(value),
            ListBind::Range(start, end) => query.bind(start).bind(end),
        };
        query.fetch_all(&self.pool).await.map_err(map_sqlx_error)
    }
}

enum ListBind<'a> {
    None,
    Text(&'a str),
    Range(DateTime<Utc>, DateTime<Utc>),
}

#[async_trait]
impl ContentRepository for PgContentRepository {
    async fn find_all(&self) -> StorageResult<Vec<Content>> {
        let sql = format!("SELECT {CONTENT_COLUMNS} FROM content ORDER BY id");
        self.fetch_list(&sql, ListBind::None).await
    }

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Content>> {
        let sql = format!("SELECT {CONTENT_COLUMNS} FROM content WHERE id = $1");
        sqlx::query_as::<_, Content>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn insert(&self, content: NewContent) -> StorageResult<Content> {
        let sql = format!(
            r#"
            INSERT INTO content (category, body, media, created_time, updated_time)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING {CONTENT_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Content>(&sql)
            .bind(content.category)
            .bind(content.body)
            .bind(content.media)
            .bind(content.created_time)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn update(
        &self,
        id: i64,
        changes: ContentInput,
        updated_time: DateTime<Utc>,
    ) -> StorageResult<Option<Content>> {
        let sql = format!(
            r#"
            UPDATE content
            SET category = $2, body = $3, media = $4, updated_time = $5
            WHERE id = $1
            RETURNING {CONTENT_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Content>(&sql)
            .bind(id)
            .bind(changes.category)
            .bind(changes.body)
            .bind(changes.media)
            .bind(updated_time)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn delete(&self, id: i64) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM content WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_body_containing(&self, query: &str) -> StorageResult<Vec<Content>> {
        // strpos avoids LIKE wildcard semantics for '%' and '_' in the query.
        let sql =
            format!("SELECT {CONTENT_COLUMNS} FROM content WHERE strpos(body, $1) > 0 ORDER BY id");
        self.fetch_list(&sql, ListBind::Text(query)).await
    }

    async fn find_by_category(&self, category: &str) -> StorageResult<Vec<Content>> {
        let sql = format!("SELECT {CONTENT_COLUMNS} FROM content WHERE category = $1 ORDER BY id");
        self.fetch_list(&sql, ListBind::Text(category)).await
    }

    async fn find_by_created_time_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StorageResult<Vec<Content>> {
        let sql = format!(
            "SELECT {CONTENT_COLUMNS} FROM content WHERE created_time BETWEEN $1 AND $2 ORDER BY id"
        );
        self.fetch_list(&sql, ListBind::Range(start, end)).await
    }

    async fn ping(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}

/// PostgreSQL implementation of [`LikeRepository`].
///
/// The `(content_id, user_id)` primary key is the source of truth for the
/// one-like-per-user rule; inserts that lose a race surface as a conflict.
#[derive(Debug, Clone)]
pub struct PgLikeRepository {
    pool: PgPool,
}

impl PgLikeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeRepository for PgLikeRepository {
    async fn find(&self, id: LikeId) -> StorageResult<Option<Like>> {
        let row = sqlx::query_as::<_, LikeRow>(
            r#"
            SELECT content_id, user_id, created_time
            FROM content_likes
            WHERE content_id = $1 AND user_id = $2
            "#,
        )
        .bind(id.content_id)
        .bind(id.user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Like::from))
    }

    async fn insert(&self, like: Like) -> StorageResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO content_likes (content_id, user_id, created_time)
            VALUES ($1, $2, $3)
            ON CONFLICT (content_id, user_id) DO NOTHING
            "#,
        )
        .bind(like.id.content_id)
        .bind(like.id.user_id)
        .bind(like.created_time)
        .execute(&self.pool)
        .await;

        let conflict = || {
            StorageError::Conflict(format!(
                "content_likes ({}, {})",
                like.id.content_id, like.id.user_id
            ))
        };

        match result {
            Ok(done) if done.rows_affected() == 0 => Err(conflict()),
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(conflict()),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn delete(&self, id: LikeId) -> StorageResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM content_likes
            WHERE content_id = $1 AND user_id = $2
            "#,
        )
        .bind(id.content_id)
        .bind(id.user_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_for_content(&self, content_id: i64) -> StorageResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM content_likes WHERE content_id = $1")
            .bind(content_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }
}
