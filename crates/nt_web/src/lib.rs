use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::{ApiResult, AppError};
pub use state::AppState;

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/sessions", post(handlers::create_session))
        .route("/api/sessions/:id", delete(handlers::delete_session))
        .route("/api/sessions/:id/reset", post(handlers::reset_session))
        .route("/api/sessions/:id/search", post(handlers::search))
        .route("/api/sessions/:id/more", post(handlers::load_more))
        .route("/api/sessions/:id/view", get(handlers::get_view))
        .route("/api/sessions/:id/export/:format", get(handlers::export_view))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Binds `addr` and serves the API until the process is stopped.
pub async fn serve(state: AppState, addr: &str) -> nt_core::Result<()> {
    let app = create_app(state).await;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🌐 Dashboard API listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

pub mod prelude {
    pub use nt_core::{ArticleRecord, Result, Error};
    pub use crate::AppState;
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use nt_core::testing::{raw, KeywordScorer, ScriptedProvider};
    use nt_core::{SearchConfig, SentimentClassifier};
    use nt_storage::SessionStore;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn app() -> Router {
        let provider = ScriptedProvider::new()
            .with_page(1, vec![
                raw("A", "Hindu", "a good plan"),
                raw("B", "Mint", "a bad plan"),
                raw("A", "Hindu", "a good plan"),
            ])
            .with_page(2, vec![raw("B", "Mint", "a bad plan")]);
        let state = AppState::new(
            Arc::new(SessionStore::new(Arc::new(provider))),
            SentimentClassifier::new(Arc::new(KeywordScorer)),
            SearchConfig::default(),
        );
        create_app(state).await
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = send(app, method, uri, body).await;
        let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, value)
    }

    async fn new_session(app: &Router) -> String {
        let (status, body) = send_json(app, "POST", "/api/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        body["session_id"].as_str().unwrap().to_string()
    }

    fn search_body(query: &str, pages: u32) -> Value {
        json!({ "query": query, "start_date": "2025-01-01", "end_date": "2025-04-29", "pages": pages })
    }

    #[tokio::test]
    async fn test_health() {
        let app = app().await;
        let (status, body) = send_json(&app, "GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["provider"], "scripted");
        assert_eq!(body["model"], "keyword");
    }

    #[tokio::test]
    async fn test_search_load_more_and_view() {
        let app = app().await;
        let id = new_session(&app).await;

        let (status, body) = send_json(&app, "POST", &format!("/api/sessions/{}/search", id), Some(search_body("dharavi", 1))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"]["status"], "loaded");
        assert_eq!(body["outcome"]["new_count"], 2);
        assert_eq!(body["progress"]["current_page"], 1);
        assert_eq!(body["progress"]["sources_encountered"], json!(["Hindu", "Mint"]));

        // page 2 only repeats known titles
        let (status, body) = send_json(&app, "POST", &format!("/api/sessions/{}/more", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], json!({ "status": "exhausted", "page": 2 }));
        assert_eq!(body["progress"]["current_page"], 1);

        let (status, body) = send_json(&app, "GET", &format!("/api/sessions/{}/view", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["query"], "dharavi");
        assert_eq!(body["articles"].as_array().unwrap().len(), 2);
        assert_eq!(body["articles"][0]["title"], "A");
        assert_eq!(body["articles"][0]["sentiment"], "Positive");
        assert_eq!(body["counts"]["by_sentiment"], json!({ "positive": 1, "neutral": 0, "negative": 1 }));

        let (_, body) = send_json(&app, "GET", &format!("/api/sessions/{}/view?sources=Mint", id), None).await;
        assert_eq!(body["articles"].as_array().unwrap().len(), 1);
        assert_eq!(body["counts"]["by_source_by_percent"]["Mint"]["negative"], 100.0);

        let (status, body) = send_json(&app, "POST", &format!("/api/sessions/{}/reset", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "phase": "Idle", "current_page": 0, "total": 0, "sources_encountered": [] }));
    }

    #[tokio::test]
    async fn test_error_statuses() {
        let app = app().await;
        let id = new_session(&app).await;

        let (status, _) = send_json(&app, "POST", &format!("/api/sessions/{}/more", id), None).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = send_json(&app, "POST", &format!("/api/sessions/{}/search", id), Some(search_body("  ", 1))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("query"));

        let (status, body) = send_json(&app, "POST", &format!("/api/sessions/{}/search", id), Some(search_body("dharavi", 0))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("page budget"));

        let inverted = json!({ "query": "q", "start_date": "2025-05-01", "end_date": "2025-01-01" });
        let (status, _) = send_json(&app, "POST", &format!("/api/sessions/{}/search", id), Some(inverted)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let unknown = uuid::Uuid::new_v4();
        let (status, _) = send_json(&app, "GET", &format!("/api/sessions/{}/view", unknown), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send_json(&app, "DELETE", &format!("/api/sessions/{}", id), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send_json(&app, "POST", &format!("/api/sessions/{}/more", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_export_csv() {
        let app = app().await;
        let id = new_session(&app).await;

        let (status, _) = send(&app, "GET", &format!("/api/sessions/{}/export/csv", id), None).await;
        assert_eq!(status, StatusCode::CONFLICT);

        send_json(&app, "POST", &format!("/api/sessions/{}/search", id), Some(search_body("inflación", 3))).await;
        let (status, bytes) = send(&app, "GET", &format!("/api/sessions/{}/export/csv?sources=Hindu", id), None).await;
        assert_eq!(status, StatusCode::OK);

        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Title,Source,Published Date,Description,URL,Sentiment");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "A,Hindu,1 day ago,a good plan,https://example.com/A,Positive");

        let request = Request::builder()
            .uri(format!("/api/sessions/{}/export/xlsx", id))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert!(disposition.starts_with("attachment; filename=\"news_search_inflaci_n_"));
        assert!(disposition.ends_with(".xlsx\""));

        let (status, _) = send(&app, "GET", &format!("/api/sessions/{}/export/pdf", id), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
