//! Redirect resolution and synchronous click recording.

use crate::domain::click_recorder::{self, RequestSignals};
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;
use serde_json::json;
use std::sync::Arc;

pub struct RedirectService {
    links: Arc<dyn LinkRepository>,
    clicks: Arc<dyn ClickRepository>,
}

impl RedirectService {
    pub fn new(links: Arc<dyn LinkRepository>, clicks: Arc<dyn ClickRepository>) -> Self {
        Self { links, clicks }
    }

    /// Resolves a short code to its target URL, recording the visit.
    ///
    /// Status checks run before any analytics write: a disabled or expired
    /// link produces no click event and no counter change. Recording is
    /// synchronous; if it fails the redirect fails too, so the counter and
    /// event log never drift from the redirects actually served.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] for unknown codes
    /// - [`AppError::Gone`] for disabled or expired links
    pub async fn resolve(
        &self,
        code: &str,
        signals: &RequestSignals,
    ) -> Result<String, AppError> {
        let link = self
            .links
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        if !link.is_active {
            return Err(AppError::gone("Link is disabled", json!({ "code": code })));
        }
        if link.is_expired() {
            return Err(AppError::gone("Link has expired", json!({ "code": code })));
        }

        let click = click_recorder::build_click(link.id, signals);
        self.clicks.record_visit(click).await?;

        Ok(link.target_url)
    }
}
