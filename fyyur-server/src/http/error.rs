//! Handler error type with IntoResponse
//!
//! Errors render as pages, never bare bodies: 404 and 500 get their error
//! templates, store failures land on the home page with a flash.

use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use super::view::Page;
use crate::db::DbError;

pub const NOT_FOUND_TEMPLATE: &str = "errors/404.html";
pub const SERVER_ERROR_TEMPLATE: &str = "errors/500.html";

/// Handler error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Store failure while reading (500, logged)
    Database(DbError),

    /// Request the extractors could not decode (4xx, home page with flash)
    Rejected { status: StatusCode, message: String },

    /// Internal error (500)
    Internal { message: String },
}

impl ApiError {
    /// 404 for a path that never named a valid resource.
    pub fn no_route() -> Self {
        Self::NotFound {
            resource: "page",
            id: String::new(),
        }
    }
}

/// The bare 404 page.
pub fn not_found_page() -> Page {
    Page::new(NOT_FOUND_TEMPLATE).with_status(StatusCode::NOT_FOUND)
}

/// The bare 500 page.
pub fn server_error_page() -> Page {
    Page::new(SERVER_ERROR_TEMPLATE).with_status(StatusCode::INTERNAL_SERVER_ERROR)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound { resource, id } => {
                tracing::debug!(resource, id = %id, "not found");
                not_found_page()
                    .with_context(json!({ "resource": resource, "id": id }))
                    .into_response()
            }
            Self::Database(e) => {
                // Log the actual error, show a generic message
                tracing::error!("Database error: {}", e);
                Page::home()
                    .with_status(StatusCode::INTERNAL_SERVER_ERROR)
                    .error("Something went wrong. Please try again.")
                    .into_response()
            }
            Self::Rejected { status, message } => {
                tracing::debug!(status = %status, "rejected request: {}", message);
                Page::home()
                    .with_status(status)
                    .error("That request could not be understood. Please try again.")
                    .into_response()
            }
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                server_error_page().into_response()
            }
        }
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            _ => Self::Database(e),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}
