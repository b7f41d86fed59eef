//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::domain::entities::CurrentUser;
use crate::{error::AppError, state::AppState};

/// Authenticates requests using Bearer tokens from the Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// On success, the resolved [`CurrentUser`] is inserted into the request
/// extensions for handlers to read.
///
/// # Errors
///
/// Returns `401 Unauthorized` if:
/// - Authorization header is missing
/// - Token format is invalid
/// - Token is unknown or belongs to a deactivated user
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let user = st.auth_service.authenticate(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Restricts a route tree to admin users.
///
/// Must run after [`layer`], which provides the [`CurrentUser`] extension.
///
/// # Errors
///
/// Returns `403 Forbidden` for authenticated non-admin users and
/// `401 Unauthorized` when the authentication layer did not run.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req.extensions().get::<CurrentUser>().ok_or_else(|| {
        AppError::unauthorized("Unauthorized", serde_json::json!({}))
    })?;

    if !user.is_admin {
        return Err(AppError::forbidden(
            "Admin access required",
            serde_json::json!({}),
        ));
    }

    Ok(next.run(req).await)
}
