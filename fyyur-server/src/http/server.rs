//! Axum server setup
//!
//! Server skeleton with:
//! - Tracing middleware
//! - Request timeout rendered as a page
//! - Panics rendered as the 500 page
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, StatusCode};
use axum::middleware::map_response;
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::error::{server_error_page, ApiError};
use super::routes;
use crate::db::Catalog;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:5000)
    pub bind_addr: SocketAddr,

    /// Per-request timeout (default: 30s)
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn Catalog>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self { catalog }
    }
}

/// Build the full router. Exposed separately from `run_server` so tests can
/// drive it with `oneshot`.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    let routes = Router::new()
        .merge(routes::home::router())
        .merge(routes::health::router())
        .merge(routes::venues::router())
        .merge(routes::artists::router())
        .merge(routes::shows::router())
        .fallback(fallback)
        .with_state(Arc::new(state));
    with_middleware(routes, request_timeout)
}

/// Panic, timeout and trace layers, innermost first.
fn with_middleware(router: Router, request_timeout: Duration) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(map_response(render_timeout))
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let catalog = Arc::new(PgCatalog::new(create_pool(&database_url).await?));
/// run_server(catalog, ServerConfig::default()).await?;
/// ```
pub async fn run_server(catalog: Arc<dyn Catalog>, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(AppState::new(catalog), config.request_timeout);

    // Bind listener
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    // Run with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn fallback() -> ApiError {
    ApiError::no_route()
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    ApiError::Internal {
        message: format!("handler panicked: {message}"),
    }
    .into_response()
}

/// The timeout layer answers with an empty body; swap in the error page.
async fn render_timeout(response: Response) -> Response {
    let bare = !response.headers().contains_key(header::CONTENT_TYPE);
    if response.status() != StatusCode::REQUEST_TIMEOUT || !bare {
        return response;
    }
    tracing::warn!("Request timed out");
    server_error_page()
        .with_status(StatusCode::REQUEST_TIMEOUT)
        .error("The request took too long. Please try again.")
        .into_response()
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryCatalog;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::routing::get;
    use serde_json::Value;
    use tower::ServiceExt;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 5000);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn unknown_route_renders_404_page() {
        let app = build_router(
            AppState::new(Arc::new(MemoryCatalog::new())),
            Duration::from_secs(5),
        );
        let response = app
            .oneshot(Request::get("/nowhere").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["template"], "errors/404.html");
    }

    #[tokio::test]
    async fn panic_renders_500_page() {
        async fn explode() -> &'static str {
            panic!("boom")
        }

        let app = with_middleware(
            Router::new().route("/explode", get(explode)),
            Duration::from_secs(5),
        );
        let response = app
            .oneshot(Request::get("/explode").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["template"], "errors/500.html");
    }

    #[tokio::test]
    async fn slow_request_renders_timeout_page() {
        async fn stall() -> &'static str {
            tokio::time::sleep(Duration::from_secs(60)).await;
            "late"
        }

        let app = with_middleware(
            Router::new().route("/stall", get(stall)),
            Duration::from_millis(20),
        );
        let response = app
            .oneshot(Request::get("/stall").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["template"], "errors/500.html");
        assert_eq!(body["flashes"][0]["level"], "error");
    }
}
