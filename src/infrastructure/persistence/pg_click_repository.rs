//! PostgreSQL implementation of [`ClickRepository`].

use crate::domain::entities::{BucketCount, Click, ClickBreakdown, NewClick};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

/// Click storage backed by the `link_clicks` table.
#[derive(Clone)]
pub struct PgClickRepository {
    pool: PgPool,
}

impl PgClickRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn record_visit(&self, new_click: NewClick) -> Result<(), AppError> {
        // Event insert and counter increment commit together or not at all.
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO link_clicks
                (link_id, user_agent, referrer, device_type, browser, os, ip)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(new_click.link_id)
        .bind(&new_click.user_agent)
        .bind(&new_click.referrer)
        .bind(&new_click.device_type)
        .bind(&new_click.browser)
        .bind(&new_click.os)
        .bind(&new_click.ip)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE links SET clicks_count = clicks_count + 1 WHERE id = $1")
            .bind(new_click.link_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn count_for_link(&self, link_id: i64) -> Result<i64, AppError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM link_clicks WHERE link_id = $1")
                .bind(link_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn breakdown_for_link(&self, link_id: i64) -> Result<ClickBreakdown, AppError> {
        let total = self.count_for_link(link_id).await?;

        let by_device = sqlx::query_as::<_, BucketCount>(
            r#"
            SELECT device_type AS value, COUNT(*)::BIGINT AS count
            FROM link_clicks WHERE link_id = $1
            GROUP BY device_type ORDER BY count DESC
            "#,
        )
        .bind(link_id)
        .fetch_all(&self.pool)
        .await?;

        let by_browser = sqlx::query_as::<_, BucketCount>(
            r#"
            SELECT browser AS value, COUNT(*)::BIGINT AS count
            FROM link_clicks WHERE link_id = $1
            GROUP BY browser ORDER BY count DESC
            "#,
        )
        .bind(link_id)
        .fetch_all(&self.pool)
        .await?;

        let by_referrer = sqlx::query_as::<_, BucketCount>(
            r#"
            SELECT COALESCE(referrer, 'direct') AS value, COUNT(*)::BIGINT AS count
            FROM link_clicks WHERE link_id = $1
            GROUP BY COALESCE(referrer, 'direct')
            ORDER BY count DESC
            LIMIT 10
            "#,
        )
        .bind(link_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ClickBreakdown {
            total,
            by_device,
            by_browser,
            by_referrer,
        })
    }

    async fn recent_for_link(
        &self,
        link_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Click>, AppError> {
        let clicks = sqlx::query_as::<_, Click>(
            r#"
            SELECT * FROM link_clicks
            WHERE link_id = $1
            ORDER BY clicked_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(link_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(clicks)
    }
}
