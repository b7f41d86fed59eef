//! PostgreSQL implementation of [`LinkRepository`].

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;

/// Link storage backed by the `links` table.
///
/// Short-code uniqueness rests on the table's unique constraint; a
/// violating insert surfaces as [`AppError::Conflict`] via the shared
/// `sqlx::Error` mapping.
#[derive(Clone)]
pub struct PgLinkRepository {
    pool: PgPool,
}

impl PgLinkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            INSERT INTO links (user_id, short_code, target_url, title, tags, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(new_link.user_id)
        .bind(&new_link.short_code)
        .bind(&new_link.target_url)
        .bind(&new_link.title)
        .bind(&new_link.tags)
        .bind(new_link.expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>("SELECT * FROM links WHERE short_code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;

        Ok(link)
    }

    async fn find_by_owner_and_target(
        &self,
        user_id: i64,
        target_url: &str,
    ) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            SELECT * FROM links
            WHERE user_id = $1 AND target_url = $2
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(target_url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(link)
    }

    async fn find_by_id_for_owner(
        &self,
        id: i64,
        user_id: i64,
    ) -> Result<Option<Link>, AppError> {
        let link =
            sqlx::query_as::<_, Link>("SELECT * FROM links WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(link)
    }

    async fn list_for_owner(
        &self,
        user_id: i64,
        skip: i64,
        limit: i64,
        search: Option<String>,
        active_only: bool,
    ) -> Result<Vec<Link>, AppError> {
        let pattern = search.map(|s| format!("%{s}%"));

        let links = sqlx::query_as::<_, Link>(
            r#"
            SELECT * FROM links
            WHERE user_id = $1
              AND ($2::TEXT IS NULL
                   OR short_code ILIKE $2
                   OR target_url ILIKE $2
                   OR title ILIKE $2)
              AND (NOT $3 OR is_active)
            ORDER BY created_at DESC
            OFFSET $4 LIMIT $5
            "#,
        )
        .bind(user_id)
        .bind(pattern)
        .bind(active_only)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(links)
    }

    async fn list_all(&self, skip: i64, limit: i64) -> Result<Vec<Link>, AppError> {
        let links = sqlx::query_as::<_, Link>(
            "SELECT * FROM links ORDER BY created_at DESC OFFSET $1 LIMIT $2",
        )
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(links)
    }

    async fn update(&self, id: i64, user_id: i64, patch: LinkPatch) -> Result<Link, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            UPDATE links SET
                title = COALESCE($3, title),
                is_active = COALESCE($4, is_active),
                tags = COALESCE($5, tags),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&patch.title)
        .bind(patch.is_active)
        .bind(&patch.tags)
        .fetch_optional(&self.pool)
        .await?;

        link.ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))
    }

    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_any(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_for_owner(&self, user_id: i64, active_only: bool) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM links WHERE user_id = $1 AND (NOT $2 OR is_active)",
        )
        .bind(user_id)
        .bind(active_only)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn total_clicks_for_owner(&self, user_id: i64) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(clicks_count), 0)::BIGINT FROM links WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    async fn top_link_for_owner(&self, user_id: i64) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            SELECT * FROM links
            WHERE user_id = $1
            ORDER BY clicks_count DESC, created_at ASC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(link)
    }
}
