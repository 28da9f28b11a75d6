//! HTTP server for the journal API

pub mod api;
pub mod state;

use std::net::{IpAddr, SocketAddr};

use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use state::AppState;

use crate::types::{JournalError, Result};

/// Create the web server router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_router = Router::new().route(
        "/entries",
        get(api::list_entries).post(api::create_entry),
    );

    Router::new()
        .route("/health", get(api::health))
        .nest("/api", api_router)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until Ctrl+C
pub async fn serve(state: AppState, host: &str, port: u16) -> Result<()> {
    let host_addr: IpAddr = host
        .parse()
        .map_err(|e| JournalError::Config(format!("Invalid host address '{}': {}", host, e)))?;
    let addr = SocketAddr::from((host_addr, port));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{AnalysisResult, MoodAnalyzer};
    use crate::ingest::{Clock, EntryIngestor};
    use crate::storage::{Database, SqliteEntryStore};
    use crate::types::AnalysisError;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct Offline;

    #[async_trait]
    impl MoodAnalyzer for Offline {
        async fn analyze(&self, _: &str) -> std::result::Result<AnalysisResult, AnalysisError> {
            Err(AnalysisError::transport("connection refused"))
        }
    }

    struct Cheerful;

    #[async_trait]
    impl MoodAnalyzer for Cheerful {
        async fn analyze(&self, _: &str) -> std::result::Result<AnalysisResult, AnalysisError> {
            Ok(AnalysisResult {
                mood_score: 9,
                summary: Some("A bright day.".to_string()),
            })
        }
    }

    struct June1;

    impl Clock for June1 {
        fn today(&self) -> NaiveDate {
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        }
    }

    fn app(analyzer: Arc<dyn MoodAnalyzer>) -> Router {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        let store = Arc::new(SqliteEntryStore::new(Arc::new(db)));
        let ingestor = EntryIngestor::with_clock(analyzer, store, Arc::new(June1));
        create_router(AppState::new(Arc::new(ingestor)))
    }

    fn post_entry(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/entries")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(Arc::new(Cheerful)).oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_create_and_list_entries() {
        let app = app(Arc::new(Cheerful));

        let body = json!({"journal": "Hiked with friends", "habits": ["hike", "read"]});
        let response = app
            .clone()
            .oneshot(post_entry(&body.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let created = json_body(response).await;
        assert_eq!(created["date"], "2025-06-01");
        assert_eq!(created["journalContent"], "Hiked with friends");
        assert_eq!(created["moodScore"], 9);
        assert_eq!(created["aiSummary"], "A bright day.");
        assert_eq!(created["habitLogs"][1]["habitName"], "read");
        assert_eq!(created["habitLogs"][1]["completed"], true);
        assert!(created["habitLogs"][0].get("entryId").is_none());

        let response = app.oneshot(get("/api/entries")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listed = json_body(response).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(listed[0]["id"], created["id"]);
    }

    #[tokio::test]
    async fn test_create_with_analyzer_down_still_saves() {
        let response = app(Arc::new(Offline))
            .oneshot(post_entry(r#"{"journal": "Quiet evening"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let created = json_body(response).await;
        assert_eq!(created["moodScore"], 5);
        assert_eq!(
            created["aiSummary"],
            "AI is taking a nap, but your entry is saved."
        );
        assert_eq!(created["habitLogs"], json!([]));
    }

    #[tokio::test]
    async fn test_duplicate_date_conflict() {
        let app = app(Arc::new(Cheerful));
        let first = app
            .clone()
            .oneshot(post_entry(r#"{"journal": "one"}"#))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = app
            .oneshot(post_entry(r#"{"journal": "two"}"#))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
        assert!(
            json_body(second).await["error"]
                .as_str()
                .unwrap()
                .contains("2025-06-01")
        );
    }

    #[tokio::test]
    async fn test_bad_requests() {
        let app = app(Arc::new(Cheerful));

        for body in [
            r#"{"journal": "   "}"#,
            r#"{"journal": "ok", "habits": [""]}"#,
            r#"{"journal": "ok", "extra": 1}"#,
            r#"{"habits": ["run"]}"#,
            "not json",
        ] {
            let response = app.clone().oneshot(post_entry(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
            assert!(json_body(response).await["error"].is_string());
        }
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let request = Request::builder()
            .method("GET")
            .uri("/api/entries")
            .header("origin", "http://localhost:5173")
            .body(Body::empty())
            .unwrap();
        let response = app(Arc::new(Cheerful)).oneshot(request).await.unwrap();
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );
    }
}
