//! Handlers for link management endpoints.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::links::{
    CreateLinkRequest, LinkListResponse, LinkResponse, ListLinksQuery, UpdateLinkRequest,
};
use crate::domain::entities::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/v1/links`
///
/// # Responses
///
/// - **201 Created** with the new link
/// - **200 OK** with the existing link when the same target was already
///   shortened by this user (no custom code given)
///
/// # Errors
///
/// - 400 for malformed or unreachable targets and bad custom codes
/// - 409 when a custom code is already taken
pub async fn create_link_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let (link, created) = state.link_service.create(&user, payload.into_input()).await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    let short_url = state.link_service.short_url(&link);

    Ok((status, Json(LinkResponse::from_link(&link, short_url))))
}

/// Lists the caller's links, newest first.
///
/// # Endpoint
///
/// `GET /api/v1/links?skip=0&limit=50&search=&active_only=false`
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ListLinksQuery>,
) -> Result<Json<LinkListResponse>, AppError> {
    query.validate()?;

    let links = state
        .link_service
        .list(&user, query.skip, query.limit, query.search, query.active_only)
        .await?;

    let items = links
        .iter()
        .map(|link| LinkResponse::from_link(link, state.link_service.short_url(link)))
        .collect();

    Ok(Json(LinkListResponse {
        items,
        skip: query.skip,
        limit: query.limit,
    }))
}

/// Fetches one of the caller's links.
///
/// # Endpoint
///
/// `GET /api/v1/links/{id}`
pub async fn get_link_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get(&user, id).await?;
    let short_url = state.link_service.short_url(&link);

    Ok(Json(LinkResponse::from_link(&link, short_url)))
}

/// Partially updates a link. The short code and target URL are immutable.
///
/// # Endpoint
///
/// `PATCH /api/v1/links/{id}`
pub async fn update_link_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .update(&user, id, payload.into_patch())
        .await?;
    let short_url = state.link_service.short_url(&link);

    Ok(Json(LinkResponse::from_link(&link, short_url)))
}

/// Deletes a link and its click history.
///
/// # Endpoint
///
/// `DELETE /api/v1/links/{id}`
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete(&user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
