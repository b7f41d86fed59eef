//! API route configuration.
//!
//! All API endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`]; the admin subtree additionally
//! requires the admin role and carries a stricter rate limit.

use crate::api::handlers::{
    create_link_handler, create_qr_handler, delete_any_link_handler, delete_link_handler,
    delete_qr_handler, delete_user_handler, download_qr_handler, get_link_handler, get_qr_handler,
    link_stats_handler, list_all_links_handler, list_links_handler, list_qr_handler,
    list_users_handler, overview_handler, preview_qr_handler, set_user_active_handler,
    update_link_handler, update_qr_handler,
};
use crate::api::middleware::{auth, rate_limit};
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

/// All API routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `POST   /links`               - Create a short link
/// - `GET    /links`               - List own links (paginated, searchable)
/// - `GET    /links/{id}`          - Fetch one link
/// - `PATCH  /links/{id}`          - Update title / active flag / tags
/// - `DELETE /links/{id}`          - Delete a link and its click history
/// - `GET    /links/{id}/stats`    - Per-link analytics
/// - `GET    /stats/overview`      - Account-wide totals
/// - `POST   /qr`                  - Render and store a QR code
/// - `POST   /qr/preview`          - Render without storing
/// - `GET    /qr`                  - List own QR codes
/// - `GET    /qr/{id}`             - Fetch one QR code
/// - `PATCH  /qr/{id}`             - Rename a QR code
/// - `DELETE /qr/{id}`             - Delete a QR code
/// - `GET    /qr/{id}/download/{format}` - Download as PNG or SVG
/// - `GET    /admin/users`         - List users (admin)
/// - `PATCH  /admin/users/{id}`    - Activate / deactivate a user (admin)
/// - `DELETE /admin/users/{id}`    - Delete a user (admin)
/// - `GET    /admin/links`         - List links platform-wide (admin)
/// - `DELETE /admin/links/{id}`    - Take down any link (admin)
pub fn protected_routes(behind_proxy: bool) -> Router<AppState> {
    let admin = Router::new()
        .route("/admin/users", get(list_users_handler))
        .route(
            "/admin/users/{id}",
            patch(set_user_active_handler).delete(delete_user_handler),
        )
        .route("/admin/links", get(list_all_links_handler))
        .route("/admin/links/{id}", delete(delete_any_link_handler))
        .route_layer(middleware::from_fn(auth::require_admin));
    let admin = if behind_proxy {
        admin.layer(rate_limit::proxied_secure_layer())
    } else {
        admin.layer(rate_limit::secure_layer())
    };

    Router::new()
        .route("/links", post(create_link_handler).get(list_links_handler))
        .route(
            "/links/{id}",
            get(get_link_handler)
                .patch(update_link_handler)
                .delete(delete_link_handler),
        )
        .route("/links/{id}/stats", get(link_stats_handler))
        .route("/stats/overview", get(overview_handler))
        .route("/qr", post(create_qr_handler).get(list_qr_handler))
        .route("/qr/preview", post(preview_qr_handler))
        .route(
            "/qr/{id}",
            get(get_qr_handler)
                .patch(update_qr_handler)
                .delete(delete_qr_handler),
        )
        .route("/qr/{id}/download/{format}", get(download_qr_handler))
        .merge(admin)
}
