pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
    Router,
};

use crate::content::handlers as academy;
use crate::insights::handlers as insights;
use crate::policy::documents::PolicyKind;
use crate::policy::handlers as policy;
use crate::state::AppState;
use crate::users::handlers as users;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Users
        .route("/api/v1/dashboard", get(users::handle_dashboard))
        .route("/api/v1/users", get(users::handle_list_users))
        .route(
            "/api/v1/users/:id",
            get(users::handle_get_user).delete(users::handle_delete_user),
        )
        .route("/api/v1/users/:id/edit", post(users::handle_begin_edit))
        .route("/api/v1/users/:id/draft", patch(users::handle_update_draft))
        .route("/api/v1/users/:id/save", post(users::handle_save_edit))
        .route("/api/v1/users/:id/cancel", post(users::handle_cancel_edit))
        .route("/api/v1/users/:id/block", post(users::handle_toggle_block))
        // Insights
        .route("/api/v1/users/:id/recoveries", get(insights::handle_recoveries))
        .route("/api/v1/users/:id/activities", get(insights::handle_activities))
        .route("/api/v1/users/:id/achievements", get(insights::handle_achievements))
        .route("/api/v1/users/:id/financial", get(insights::handle_financial))
        .route("/api/v1/users/:id/posts", get(insights::handle_posts))
        .route("/api/v1/users/:id/breathing", get(insights::handle_breathing))
        .route("/api/v1/users/:id/walking", get(insights::handle_walking))
        .route("/api/v1/leaderboard", get(insights::handle_leaderboard))
        // Academy
        .route("/api/v1/academy", get(academy::handle_get_academy))
        .route("/api/v1/academy/tab", put(academy::handle_select_tab))
        .route("/api/v1/academy/items", post(academy::handle_add_item))
        .route(
            "/api/v1/academy/items/:index",
            put(academy::handle_update_item).delete(academy::handle_delete_item),
        )
        .route("/api/v1/academy/items/:index/edit", post(academy::handle_begin_item_edit))
        .route("/api/v1/academy/cancel", post(academy::handle_cancel_item_edit))
        .route(
            "/api/v1/academy/uploads",
            post(academy::handle_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Policies
        .nest("/api/v1/privacy-policy", policy::routes(PolicyKind::PrivacyPolicy))
        .nest("/api/v1/terms-of-use", policy::routes(PolicyKind::TermsOfUse))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::storage::{KeyValueStore, MemoryStore};

    fn app_with(storage: Arc<dyn KeyValueStore>) -> Router {
        build_router(AppState::new(Config::for_tests(), storage))
    }

    fn app() -> Router {
        app_with(Arc::new(MemoryStore::default()))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_dashboard_over_seed() {
        let (status, body) = send(&app(), Method::GET, "/api/v1/dashboard", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_users"], 4);
        assert_eq!(body["recovery_rate_percent"], "50.0");
        assert_eq!(body["average_days_clean"], "84.3");
    }

    #[tokio::test]
    async fn test_unknown_user_is_404() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/api/v1/users/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");

        let (status, _) = send(&app, Method::GET, "/api/v1/users/99/posts", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_edit_save_flow_updates_dashboard() {
        let app = app();
        let (status, _) = send(&app, Method::POST, "/api/v1/users/2/edit", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &app,
            Method::PATCH,
            "/api/v1/users/2/draft",
            Some(json!({ "status": "recovered" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["editing"], true);

        let (status, body) = send(&app, Method::POST, "/api/v1/users/2/save", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["status"], "recovered");
        assert_eq!(body["editing"], false);

        let (_, dashboard) = send(&app, Method::GET, "/api/v1/dashboard", None).await;
        assert_eq!(dashboard["recovered"], 3);
        assert_eq!(dashboard["recovery_rate_percent"], "75.0");
    }

    #[tokio::test]
    async fn test_invalid_draft_is_422() {
        let app = app();
        send(&app, Method::POST, "/api/v1/users/1/edit", None).await;
        send(
            &app,
            Method::PATCH,
            "/api/v1/users/1/draft",
            Some(json!({ "target_days": 0 })),
        )
        .await;
        let (status, body) = send(&app, Method::POST, "/api/v1/users/1/save", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["fields"][0]["field"], "target_days");
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let app = app();
        let (status, body) = send(&app, Method::DELETE, "/api/v1/users/3", None).await;
        assert_eq!(status, StatusCode::PRECONDITION_REQUIRED);
        assert!(body["confirmation"]["prompt"].as_str().unwrap().contains("Kashif Raza"));

        let (status, body) = send(&app, Method::DELETE, "/api/v1/users/3?confirm=true", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["redirect_to"], "/users");

        let (_, users) = send(&app, Method::GET, "/api/v1/users", None).await;
        assert_eq!(users.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_block_toggle_with_confirmation() {
        let app = app();
        let (status, _) = send(&app, Method::POST, "/api/v1/users/4/block", None).await;
        assert_eq!(status, StatusCode::PRECONDITION_REQUIRED);

        let (status, body) =
            send(&app, Method::POST, "/api/v1/users/4/block?confirm=true", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["is_blocked"], true);

        let (_, dashboard) = send(&app, Method::GET, "/api/v1/dashboard", None).await;
        assert_eq!(dashboard["blocked"], 1);
    }

    #[tokio::test]
    async fn test_recoveries_for_recovered_and_in_progress_users() {
        let app = app();
        let (_, body) = send(&app, Method::GET, "/api/v1/users/1/recoveries?day=2", None).await;
        assert_eq!(body["state"], "tracked");
        assert_eq!(body["entries"].as_array().unwrap().len(), 1);
        assert_eq!(body["stats"]["average_progress_percent"], 83);

        let (_, body) = send(&app, Method::GET, "/api/v1/users/2/recoveries", None).await;
        assert_eq!(body["state"], "in_progress");
        assert_eq!(body["remaining_days"], 18);
    }

    #[tokio::test]
    async fn test_insight_pages() {
        let app = app();
        let (_, body) = send(&app, Method::GET, "/api/v1/users/1/financial", None).await;
        assert_eq!(body["saved_percent"], "25.0");
        assert_eq!(body["name"], "Ahsan Ali");

        let (_, body) = send(&app, Method::GET, "/api/v1/users/1/achievements", None).await;
        assert_eq!(body["summary"]["earned_points"], 375);
        assert_eq!(body["milestones"].as_array().unwrap().len(), 2);

        let (_, body) = send(&app, Method::GET, "/api/v1/users/1/walking", None).await;
        assert_eq!(body["goals"][0]["progress_percent"], 84);

        let (status, body) = send(&app, Method::GET, "/api/v1/leaderboard", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stats"]["streak_days"], 7);
    }

    #[tokio::test]
    async fn test_academy_add_persists_media_data() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::default());
        let app = app_with(storage.clone());

        let blog = json!({
            "kind": "blog",
            "image": "data:image/png;base64,aGk=",
            "description": "Five habits that help",
            "author": "Dr. Noor"
        });
        let (status, body) = send(&app, Method::POST, "/api/v1/academy/items", Some(blog)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["counts"]["blogs"], 1);

        let saved = storage.get("mediaData").unwrap().unwrap();
        let saved: Value = serde_json::from_str(&saved).unwrap();
        assert_eq!(saved["blogs"][0]["author"], "Dr. Noor");

        // A fresh app over the same store sees the item.
        let (_, body) = send(&app_with(storage), Method::GET, "/api/v1/academy", None).await;
        assert_eq!(body["items"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_academy_incomplete_item_is_422() {
        let blog = json!({ "kind": "blog", "image": "", "description": "x", "author": "y" });
        let (status, _) = send(&app(), Method::POST, "/api/v1/academy/items", Some(blog)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_policy_edit_and_save() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::default());
        let app = app_with(storage.clone());

        let (status, body) = send(&app, Method::GET, "/api/v1/terms-of-use", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Terms of Use");

        send(&app, Method::POST, "/api/v1/terms-of-use/edit", None).await;
        let (status, _) = send(
            &app,
            Method::PATCH,
            "/api/v1/terms-of-use/draft",
            Some(json!({ "content": "Be kind." })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, Method::POST, "/api/v1/terms-of-use/save", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"], "Be kind.");
        assert_eq!(storage.get("termsOfUse").unwrap().as_deref(), Some("Be kind."));
    }

    fn upload_request(file_name: &str, mime: &str, payload: &[u8]) -> Request<Body> {
        let boundary = "XBOUNDARY";
        let mut body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: {mime}\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(payload);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
        Request::builder()
            .method(Method::POST)
            .uri("/api/v1/academy/uploads?slot=image")
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_upload_returns_data_uri() {
        let request = upload_request("cover.png", "image/png", b"hi");
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["data_uri"], "data:image/png;base64,aGk=");
        assert_eq!(value["file_name"], "cover.png");
    }

    #[tokio::test]
    async fn test_upload_over_limit_is_413() {
        // Twice the 1 MiB limit the test config allows.
        let payload = vec![0u8; 2 * 1024 * 1024];
        let request = upload_request("huge.png", "image/png", &payload);
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["error"]["code"], "PAYLOAD_TOO_LARGE");
    }
}
