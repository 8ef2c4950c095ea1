//! API Routes
//!
//! Configures the Axum router with all inventory endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::auth::{login_handler, refresh_handler, register_handler};
use super::handlers::{
    cache_stats_handler, create_item_handler, delete_item_handler, get_item_handler,
    health_handler, list_items_handler, update_item_handler,
};
use super::AppState;

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/token/refresh", post(refresh_handler))
        .route("/items", post(create_item_handler))
        .route("/items/all", get(list_items_handler))
        .route("/items/:id", get(get_item_handler))
        .route("/items/:id/update", put(update_item_handler))
        .route("/items/:id/delete", delete(delete_item_handler))
        .route("/cache/stats", get(cache_stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    use crate::cache::MemoryBackend;
    use crate::config::Config;

    fn create_test_app() -> Router {
        let state = AppState::from_config(&Config::default(), Arc::new(MemoryBackend::new(100)));
        create_router(state)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();

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
    async fn test_cache_stats_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/cache/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_item_endpoints_require_token() {
        for (method, uri) in [
            ("POST", "/items"),
            ("GET", "/items/all"),
            ("GET", "/items/1"),
            ("PUT", "/items/1/update"),
            ("DELETE", "/items/1/delete"),
        ] {
            let response = create_test_app()
                .oneshot(
                    Request::builder()
                        .method(method)
                        .uri(uri)
                        .header("content-type", "application/json")
                        .body(Body::from("{}"))
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
        }
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/items/1/archive")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
