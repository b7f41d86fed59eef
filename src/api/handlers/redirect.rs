//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use std::net::SocketAddr;

use crate::domain::click_recorder::RequestSignals;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its target URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Look up the link by short code
/// 2. Reject disabled (410) and expired (410) links before any recording
/// 3. Record the click event and counter increment in one transaction
/// 4. Answer `302 Found` with the stored target URL verbatim
///
/// Recording is synchronous: a failed analytics write fails the redirect,
/// so served redirects and recorded clicks never drift apart.
///
/// # Errors
///
/// - 404 Not Found for unknown codes
/// - 410 Gone for disabled or expired links
pub async fn redirect_handler(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let signals = RequestSignals {
        user_agent: header_string(&headers, header::USER_AGENT.as_str()),
        referrer: header_string(&headers, header::REFERER.as_str()),
        forwarded_for: header_string(&headers, "x-forwarded-for"),
        peer_ip: Some(addr.ip().to_string()),
    };

    let target = state.redirect_service.resolve(&code, &signals).await?;

    metrics::counter!("redirects_total").increment(1);

    Ok((StatusCode::FOUND, [(header::LOCATION, target)]))
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
