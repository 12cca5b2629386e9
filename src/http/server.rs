//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (CORS, request ID, tracing, compression, limits)
//! - Bind server to listener
//! - Stop gracefully on shutdown signal

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{DefaultBodyLimit, Request},
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    compression::{
        predicate::{DefaultPredicate, NotForContentType, Predicate},
        CompressionLayer,
    },
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::{Environment, ServiceConfig};
use crate::http::handlers;
use crate::http::middleware::cors_middleware;
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub environment: Environment,
    pub redirect_url: Arc<str>,
}

impl AppState {
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            environment: config.environment,
            redirect_url: Arc::from(config.redirect_url.as_str()),
        }
    }
}

/// HTTP server for the minification API.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Self {
        let state = AppState::from_config(&config);
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        // Gzip endpoint output is already compressed.
        let compress_when = DefaultPredicate::new()
            .and(NotForContentType::const_new("application/octet-stream"));

        let trace = TraceLayer::new_for_http()
            .make_span_with(|request: &Request| {
                let request_id = request
                    .headers()
                    .get(X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            })
            .on_response(DefaultOnResponse::new().level(Level::INFO));

        Router::new()
            .route("/", get(handlers::root).fallback(handlers::not_found))
            .route("/status", get(handlers::status).fallback(handlers::not_found))
            .route("/javascript", post(handlers::javascript).fallback(handlers::not_found))
            .route("/javascript/", post(handlers::javascript).fallback(handlers::not_found))
            .route("/css", post(handlers::css).fallback(handlers::not_found))
            .route("/css/", post(handlers::css).fallback(handlers::not_found))
            .route("/html", post(handlers::html).fallback(handlers::not_found))
            .route("/html/", post(handlers::html).fallback(handlers::not_found))
            .route("/gz/{file_name}", post(handlers::gz).fallback(handlers::not_found))
            .fallback(handlers::not_found)
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.limits.max_body_bytes))
            .layer(CompressionLayer::new().compress_when(compress_when))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(trace)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(middleware::from_fn(cors_middleware))
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            environment = self.config.environment.as_str(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode};
    use tower::ServiceExt;

    async fn send(request: Request) -> axum::response::Response {
        HttpServer::new(ServiceConfig::default())
            .router()
            .oneshot(request)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_status() {
        let response = send(Request::builder().uri("/status").body(Body::empty()).unwrap()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(X_REQUEST_ID));
    }

    #[tokio::test]
    async fn test_wrong_method_is_not_found() {
        let response = send(
            Request::builder()
                .method("GET")
                .uri("/css/")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let response = send(Request::builder().uri("/nope").body(Body::empty()).unwrap()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn test_root_redirects() {
        let response = send(Request::builder().uri("/").body(Body::empty()).unwrap()).await;
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            response.headers()["location"],
            "https://compressor.wei.technology"
        );
    }

    #[tokio::test]
    async fn test_body_limit() {
        let mut config = ServiceConfig::default();
        config.limits.max_body_bytes = 16;
        let router = HttpServer::new(config).router();

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/css/")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from(format!("code={}", "a".repeat(64))))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
