//! PostgreSQL implementation of [`QrRepository`].

use crate::domain::entities::{NewQrCode, QrCodeRecord};
use crate::domain::repositories::QrRepository;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

/// QR code storage backed by the `qr_codes` table.
#[derive(Clone)]
pub struct PgQrRepository {
    pool: PgPool,
}

impl PgQrRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QrRepository for PgQrRepository {
    async fn insert(&self, new_qr: NewQrCode) -> Result<QrCodeRecord, AppError> {
        let record = sqlx::query_as::<_, QrCodeRecord>(
            r#"
            INSERT INTO qr_codes
                (user_id, link_id, content, title, image_base64,
                 foreground_color, background_color, style,
                 box_size, border_size, error_correction, logo_base64)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(new_qr.user_id)
        .bind(new_qr.link_id)
        .bind(&new_qr.content)
        .bind(&new_qr.title)
        .bind(&new_qr.image_base64)
        .bind(&new_qr.foreground_color)
        .bind(&new_qr.background_color)
        .bind(&new_qr.style)
        .bind(new_qr.box_size)
        .bind(new_qr.border_size)
        .bind(&new_qr.error_correction)
        .bind(&new_qr.logo_base64)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn find_by_id_for_owner(
        &self,
        id: i64,
        user_id: i64,
    ) -> Result<Option<QrCodeRecord>, AppError> {
        let record = sqlx::query_as::<_, QrCodeRecord>(
            "SELECT * FROM qr_codes WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn list_for_owner(
        &self,
        user_id: i64,
        skip: i64,
        limit: i64,
        search: Option<String>,
    ) -> Result<(Vec<QrCodeRecord>, i64), AppError> {
        let pattern = search.map(|s| format!("%{s}%"));

        let records = sqlx::query_as::<_, QrCodeRecord>(
            r#"
            SELECT * FROM qr_codes
            WHERE user_id = $1
              AND ($2::TEXT IS NULL OR title ILIKE $2 OR content ILIKE $2)
            ORDER BY created_at DESC
            OFFSET $3 LIMIT $4
            "#,
        )
        .bind(user_id)
        .bind(&pattern)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM qr_codes
            WHERE user_id = $1
              AND ($2::TEXT IS NULL OR title ILIKE $2 OR content ILIKE $2)
            "#,
        )
        .bind(user_id)
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        Ok((records, total))
    }

    async fn count_for_owner(&self, user_id: i64) -> Result<i64, AppError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM qr_codes WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn update_title(
        &self,
        id: i64,
        user_id: i64,
        title: Option<String>,
    ) -> Result<Option<QrCodeRecord>, AppError> {
        let record = sqlx::query_as::<_, QrCodeRecord>(
            r#"
            UPDATE qr_codes SET title = $3, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&title)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM qr_codes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_downloads(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE qr_codes SET downloads_count = downloads_count + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
