use anyhow::anyhow;
use axum::{
    extract::{multipart::MultipartError, Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::content::collections::CollectionView;
use crate::content::models::{ContentItem, ContentKind};
use crate::content::upload::{encode_upload, UploadSlot, UploadedFile};
use crate::editing::Outcome;
use crate::errors::AppError;
use crate::state::AppState;
use crate::users::handlers::ConfirmQuery;

#[derive(Debug, Deserialize)]
pub struct TabRequest {
    pub tab: ContentKind,
}

#[derive(Debug, Default, Deserialize)]
pub struct UploadQuery {
    #[serde(default)]
    pub slot: UploadSlot,
}

/// GET /api/v1/academy
pub async fn handle_get_academy(State(state): State<AppState>) -> Json<CollectionView> {
    let academy = state.academy.lock().await;
    Json(academy.view())
}

/// PUT /api/v1/academy/tab
pub async fn handle_select_tab(
    State(state): State<AppState>,
    Json(req): Json<TabRequest>,
) -> Json<CollectionView> {
    let mut academy = state.academy.lock().await;
    Json(academy.select_tab(req.tab))
}

/// POST /api/v1/academy/items
pub async fn handle_add_item(
    State(state): State<AppState>,
    Json(item): Json<ContentItem>,
) -> Result<Outcome<CollectionView>, AppError> {
    let mut academy = state.academy.lock().await;
    academy.add(item)
}

/// POST /api/v1/academy/items/:index/edit
pub async fn handle_begin_item_edit(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<CollectionView>, AppError> {
    let mut academy = state.academy.lock().await;
    Ok(Json(academy.begin_edit(index)?))
}

/// POST /api/v1/academy/cancel
pub async fn handle_cancel_item_edit(State(state): State<AppState>) -> Json<CollectionView> {
    let mut academy = state.academy.lock().await;
    Json(academy.cancel_edit())
}

/// PUT /api/v1/academy/items/:index
pub async fn handle_update_item(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(item): Json<ContentItem>,
) -> Result<Outcome<CollectionView>, AppError> {
    let mut academy = state.academy.lock().await;
    academy.update(index, item)
}

/// DELETE /api/v1/academy/items/:index?confirm=true
pub async fn handle_delete_item(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Query(q): Query<ConfirmQuery>,
) -> Result<Outcome<CollectionView>, AppError> {
    let mut academy = state.academy.lock().await;
    academy.delete(index, q.confirm)
}

/// Bodies over the upload limit surface as 413; anything else is a bad form.
fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("Malformed upload: {}", e.body_text()))
    }
}

/// POST /api/v1/academy/uploads?slot=image|document
/// Multipart form with a single file field.
pub async fn handle_upload(
    Query(q): Query<UploadQuery>,
    mut multipart: Multipart,
) -> Result<Json<UploadedFile>, AppError> {
    let field = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
        .ok_or_else(|| AppError::Validation("No file in upload".to_string()))?;

    let file_name = field.file_name().map(str::to_string);
    let mime = field.content_type().map(str::to_string);
    let bytes = field.bytes().await.map_err(multipart_error)?;

    // Base64 over a multi-megabyte body is CPU-bound.
    let slot = q.slot;
    let uploaded = tokio::task::spawn_blocking(move || {
        encode_upload(slot, file_name.as_deref(), mime.as_deref(), &bytes)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow!("upload encoding task failed: {e}")))??;

    Ok(Json(uploaded))
}
