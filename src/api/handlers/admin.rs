//! Handlers for the admin endpoints.
//!
//! All routes here run behind both the bearer-token layer and the
//! admin-role check.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::admin::{AdminLinkResponse, SetActiveRequest, UserResponse};
use crate::api::dto::pagination::Pagination;
use crate::domain::entities::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Lists platform users.
///
/// # Endpoint
///
/// `GET /api/v1/admin/users?skip=0&limit=50`
pub async fn list_users_handler(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    page.validate()?;

    let users = state.admin_service.list_users(page.skip, page.limit).await?;

    Ok(Json(users.iter().map(UserResponse::from_user).collect()))
}

/// Enables or disables a user account.
///
/// # Endpoint
///
/// `PATCH /api/v1/admin/users/{id}`
///
/// Deactivated users fail authentication immediately; their links keep
/// redirecting. Admins cannot change their own status.
pub async fn set_user_active_handler(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<SetActiveRequest>,
) -> Result<StatusCode, AppError> {
    state
        .admin_service
        .set_user_active(&admin, id, payload.is_active)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Deletes a user together with their links and QR codes.
///
/// # Endpoint
///
/// `DELETE /api/v1/admin/users/{id}`
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.admin_service.delete_user(&admin, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Lists links platform-wide for moderation.
///
/// # Endpoint
///
/// `GET /api/v1/admin/links?skip=0&limit=50`
pub async fn list_all_links_handler(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<AdminLinkResponse>>, AppError> {
    page.validate()?;

    let links = state
        .admin_service
        .list_all_links(page.skip, page.limit)
        .await?;

    Ok(Json(links.iter().map(AdminLinkResponse::from_link).collect()))
}

/// Removes a link regardless of owner. For abuse takedowns.
///
/// # Endpoint
///
/// `DELETE /api/v1/admin/links/{id}`
pub async fn delete_any_link_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.admin_service.delete_any_link(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
