//! Shared application state injected into all handlers.

use crate::application::services::{
    AdminService, AuthService, LinkService, QrService, RedirectService, StatsService,
};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Kept for the health check; everything else goes through services.
    pub db: PgPool,
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
    pub qr_service: Arc<QrService>,
    pub stats_service: Arc<StatsService>,
    pub auth_service: Arc<AuthService>,
    pub admin_service: Arc<AdminService>,
}
