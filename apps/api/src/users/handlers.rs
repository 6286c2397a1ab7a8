use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::editing::Outcome;
use crate::errors::AppError;
use crate::state::AppState;
use crate::users::detail::{DeletedUser, UserDetailView};
use crate::users::models::UserDraftPatch;
use crate::users::projections::{dashboard_summary, user_rows, DashboardSummary, UserRow};

#[derive(Debug, Default, Deserialize)]
pub struct ConfirmQuery {
    #[serde(default)]
    pub confirm: bool,
}

/// GET /api/v1/dashboard
pub async fn handle_dashboard(State(state): State<AppState>) -> Json<DashboardSummary> {
    Json(dashboard_summary(&state.users.get_all()))
}

/// GET /api/v1/users
pub async fn handle_list_users(State(state): State<AppState>) -> Json<Vec<UserRow>> {
    Json(user_rows(&state.users.get_all()))
}

/// GET /api/v1/users/:id
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<UserDetailView>, AppError> {
    let detail = state.user_detail.lock().await;
    Ok(Json(detail.view(id)?))
}

/// POST /api/v1/users/:id/edit
pub async fn handle_begin_edit(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<UserDetailView>, AppError> {
    let mut detail = state.user_detail.lock().await;
    Ok(Json(detail.begin_edit(id)?))
}

/// PATCH /api/v1/users/:id/draft
pub async fn handle_update_draft(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(patch): Json<UserDraftPatch>,
) -> Result<Json<UserDetailView>, AppError> {
    let mut detail = state.user_detail.lock().await;
    Ok(Json(detail.update_draft(id, &patch)?))
}

/// POST /api/v1/users/:id/save
pub async fn handle_save_edit(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Outcome<UserDetailView>, AppError> {
    let mut detail = state.user_detail.lock().await;
    detail.save_edit(id)
}

/// POST /api/v1/users/:id/cancel
pub async fn handle_cancel_edit(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<UserDetailView>, AppError> {
    let mut detail = state.user_detail.lock().await;
    Ok(Json(detail.cancel_edit(id)?))
}

/// POST /api/v1/users/:id/block?confirm=true
pub async fn handle_toggle_block(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Query(q): Query<ConfirmQuery>,
) -> Result<Outcome<UserDetailView>, AppError> {
    let mut detail = state.user_detail.lock().await;
    detail.toggle_block(id, q.confirm)
}

/// DELETE /api/v1/users/:id?confirm=true
pub async fn handle_delete_user(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Query(q): Query<ConfirmQuery>,
) -> Result<Outcome<DeletedUser>, AppError> {
    let mut detail = state.user_detail.lock().await;
    detail.delete(id, q.confirm)
}
