//! Handlers for QR code endpoints.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use validator::Validate;

use crate::api::dto::qr::{
    CreateQrRequest, ListQrQuery, QrListResponse, QrPreviewResponse, QrResponse, UpdateQrRequest,
};
use crate::domain::entities::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Renders and stores a QR code.
///
/// # Endpoint
///
/// `POST /api/v1/qr`
///
/// # Errors
///
/// - 400 for bad colors, styles, logos, or oversized content
/// - 403 when the per-user cap of 50 stored codes is reached
/// - 404 when `link_id` does not name one of the caller's links
pub async fn create_qr_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateQrRequest>,
) -> Result<(StatusCode, Json<QrResponse>), AppError> {
    payload.validate()?;

    let record = state.qr_service.create(&user, payload.into_input()).await?;

    Ok((StatusCode::CREATED, Json(QrResponse::from_record(&record))))
}

/// Renders a QR code without storing it.
///
/// # Endpoint
///
/// `POST /api/v1/qr/preview`
pub async fn preview_qr_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateQrRequest>,
) -> Result<Json<QrPreviewResponse>, AppError> {
    payload.validate()?;

    let (image_base64, content) = state.qr_service.preview(&user, payload.into_input()).await?;

    Ok(Json(QrPreviewResponse {
        image_base64,
        content,
    }))
}

/// Lists the caller's QR codes, newest first.
///
/// # Endpoint
///
/// `GET /api/v1/qr?skip=0&limit=50&search=`
pub async fn list_qr_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ListQrQuery>,
) -> Result<Json<QrListResponse>, AppError> {
    query.validate()?;

    let (records, total) = state
        .qr_service
        .list(&user, query.skip, query.limit, query.search)
        .await?;

    Ok(Json(QrListResponse {
        items: records.iter().map(QrResponse::from_record).collect(),
        total,
        skip: query.skip,
        limit: query.limit,
    }))
}

/// Fetches one of the caller's QR codes.
///
/// # Endpoint
///
/// `GET /api/v1/qr/{id}`
pub async fn get_qr_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<QrResponse>, AppError> {
    let record = state.qr_service.get(&user, id).await?;

    Ok(Json(QrResponse::from_record(&record)))
}

/// Renames a QR code. Title is the only mutable field.
///
/// # Endpoint
///
/// `PATCH /api/v1/qr/{id}`
pub async fn update_qr_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateQrRequest>,
) -> Result<Json<QrResponse>, AppError> {
    payload.validate()?;

    let record = state.qr_service.update_title(&user, id, payload.title).await?;

    Ok(Json(QrResponse::from_record(&record)))
}

/// Deletes a QR code.
///
/// # Endpoint
///
/// `DELETE /api/v1/qr/{id}`
pub async fn delete_qr_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.qr_service.delete(&user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Downloads a QR code as a file attachment and counts the download.
///
/// # Endpoint
///
/// `GET /api/v1/qr/{id}/download/{format}` where format is `png` or `svg`
///
/// PNG serves the stored render; SVG is re-rendered from the stored style
/// parameters.
///
/// # Errors
///
/// Returns 400 for formats other than `png` and `svg`.
pub async fn download_qr_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((id, format)): Path<(i64, String)>,
) -> Result<impl IntoResponse, AppError> {
    let download = state.qr_service.download(&user, id, &format).await?;

    metrics::counter!("qr_downloads_total").increment(1);

    Ok((
        [
            (header::CONTENT_TYPE, download.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", download.filename),
            ),
        ],
        download.bytes,
    ))
}
