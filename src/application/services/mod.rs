//! Business services orchestrating domain rules over the repositories.
//!
//! Services hold `Arc<dyn Trait>` collaborators so transports and tests can
//! supply their own implementations.

pub mod admin_service;
pub mod auth_service;
pub mod link_service;
pub mod qr_service;
pub mod redirect_service;
pub mod stats_service;

pub use admin_service::AdminService;
pub use auth_service::AuthService;
pub use link_service::{CreateLink, LinkService};
pub use qr_service::{CreateQr, QrDownload, QrService};
pub use redirect_service::RedirectService;
pub use stats_service::{LinkStats, Overview, StatsService};
