//! Handlers for analytics endpoints.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use crate::api::dto::links::LinkResponse;
use crate::api::dto::stats::{
    ClickResponse, LinkStatsResponse, OverviewResponse, RecentClicksQuery,
};
use crate::domain::entities::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Detailed statistics for one of the caller's links.
///
/// # Endpoint
///
/// `GET /api/v1/links/{id}/stats?recent_limit=20&recent_offset=0`
///
/// Includes device, browser and referrer breakdowns plus a page of the most
/// recent clicks.
pub async fn link_stats_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Query(query): Query<RecentClicksQuery>,
) -> Result<Json<LinkStatsResponse>, AppError> {
    query.validate()?;

    let stats = state
        .stats_service
        .link_stats(&user, id, query.recent_limit, query.recent_offset)
        .await?;

    let short_url = state.link_service.short_url(&stats.link);

    Ok(Json(LinkStatsResponse {
        link: LinkResponse::from_link(&stats.link, short_url),
        total_clicks: stats.breakdown.total,
        by_device: stats.breakdown.by_device,
        by_browser: stats.breakdown.by_browser,
        by_referrer: stats.breakdown.by_referrer,
        recent: stats.recent.iter().map(ClickResponse::from_click).collect(),
    }))
}

/// Account-wide totals for the caller.
///
/// # Endpoint
///
/// `GET /api/v1/stats/overview`
pub async fn overview_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<OverviewResponse>, AppError> {
    let overview = state.stats_service.overview(&user).await?;

    let top_link = overview
        .top_link
        .as_ref()
        .map(|link| LinkResponse::from_link(link, state.link_service.short_url(link)));

    Ok(Json(OverviewResponse {
        total_links: overview.total_links,
        active_links: overview.active_links,
        total_clicks: overview.total_clicks,
        top_link,
    }))
}
