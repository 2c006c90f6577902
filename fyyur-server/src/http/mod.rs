//! HTTP server layer
//!
//! Axum server with:
//! - Request tracing
//! - Request timeout
//! - Graceful shutdown
//! - Page responses (template + flashes + context), error pages for 404/500

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;
pub mod view;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
pub use view::{Flash, Level, Page};
