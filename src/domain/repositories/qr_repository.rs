//! Repository trait for stored QR codes.

use crate::domain::entities::{NewQrCode, QrCodeRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for QR code records.
///
/// All reads are owner-scoped; an ownership mismatch is indistinguishable
/// from a missing record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QrRepository: Send + Sync {
    /// Stores a new QR code record.
    async fn insert(&self, new_qr: NewQrCode) -> Result<QrCodeRecord, AppError>;

    /// Finds a QR code by id, scoped to its owner.
    async fn find_by_id_for_owner(
        &self,
        id: i64,
        user_id: i64,
    ) -> Result<Option<QrCodeRecord>, AppError>;

    /// Lists an owner's QR codes, newest first, with the total count for
    /// pagination. `search` matches title or content (substring).
    async fn list_for_owner(
        &self,
        user_id: i64,
        skip: i64,
        limit: i64,
        search: Option<String>,
    ) -> Result<(Vec<QrCodeRecord>, i64), AppError>;

    /// Counts an owner's QR codes. Used to enforce the per-user cap.
    async fn count_for_owner(&self, user_id: i64) -> Result<i64, AppError>;

    /// Updates the title of an owner's QR code. Title is the only mutable
    /// field; style changes require a new record.
    ///
    /// Returns `Ok(None)` if no record matches `id` + owner.
    async fn update_title(
        &self,
        id: i64,
        user_id: i64,
        title: Option<String>,
    ) -> Result<Option<QrCodeRecord>, AppError>;

    /// Deletes an owner's QR code. Returns `Ok(true)` if a row was deleted.
    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, AppError>;

    /// Increments the download counter by 1.
    async fn increment_downloads(&self, id: i64) -> Result<(), AppError>;
}
