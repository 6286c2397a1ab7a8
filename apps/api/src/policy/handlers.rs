use axum::{
    extract::State,
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;

use crate::editing::Outcome;
use crate::errors::AppError;
use crate::policy::documents::{PolicyKind, PolicyView};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    pub content: String,
}

/// GET /api/v1/{privacy-policy|terms-of-use}
pub async fn handle_get_policy(state: AppState, kind: PolicyKind) -> Json<PolicyView> {
    let docs = state.policies.lock().await;
    Json(docs.view(kind))
}

/// POST .../edit
pub async fn handle_begin_policy_edit(state: AppState, kind: PolicyKind) -> Json<PolicyView> {
    let mut docs = state.policies.lock().await;
    Json(docs.begin_edit(kind))
}

/// PATCH .../draft
pub async fn handle_update_policy_draft(
    state: AppState,
    kind: PolicyKind,
    req: DraftRequest,
) -> Result<Json<PolicyView>, AppError> {
    let mut docs = state.policies.lock().await;
    Ok(Json(docs.update_draft(kind, req.content)?))
}

/// POST .../cancel
pub async fn handle_cancel_policy_edit(state: AppState, kind: PolicyKind) -> Json<PolicyView> {
    let mut docs = state.policies.lock().await;
    Json(docs.cancel_edit(kind))
}

/// POST .../save
/// Waits the configured save delay before committing.
pub async fn handle_save_policy(
    state: AppState,
    kind: PolicyKind,
) -> Result<Outcome<PolicyView>, AppError> {
    tokio::time::sleep(state.config.save_delay).await;
    let mut docs = state.policies.lock().await;
    docs.save_edit(kind)
}

/// Routes for one policy document, nested under its own path.
pub fn routes(kind: PolicyKind) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(move |State(state): State<AppState>| handle_get_policy(state, kind)),
        )
        .route(
            "/edit",
            post(move |State(state): State<AppState>| handle_begin_policy_edit(state, kind)),
        )
        .route(
            "/draft",
            patch(move |State(state): State<AppState>, Json(req): Json<DraftRequest>| {
                handle_update_policy_draft(state, kind, req)
            }),
        )
        .route(
            "/cancel",
            post(move |State(state): State<AppState>| handle_cancel_policy_edit(state, kind)),
        )
        .route(
            "/save",
            post(move |State(state): State<AppState>| handle_save_policy(state, kind)),
        )
}
