//! API Routes
//!
//! Configures the Axum router with all translation server endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    evict_handler, health_handler, search_handler, stats_handler, translate_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /api/translate` - Translate text, served from cache when possible
/// - `GET /api/stats` - Cache and usage statistics for the caller
/// - `GET /api/cache/search` - Substring search over cached translations
/// - `DELETE /api/cache` - Evict cache entries older than a threshold
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/api/translate", post(translate_handler))
        .route("/api/stats", get(stats_handler))
        .route("/api/cache/search", get(search_handler))
        .route("/api/cache", delete(evict_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db::Db;
    use crate::provider::DemoProvider;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    async fn create_test_app() -> Router {
        let db = Db::open_in_memory().await.unwrap();
        let state = AppState::new(db, Arc::new(DemoProvider::new()), Config::default());
        create_router(state)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_requires_api_key() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_translate_endpoint() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/translate")
                    .header("content-type", "application/json")
                    .header("x-api-key", "test-key")
                    .body(Body::from(
                        r#"{"text":"Hello, world!","targetLanguage":"fr"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_search_endpoint_rejects_missing_query() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/cache/search")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // Missing q query parameter fails extraction
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
