//! Page responses: a template name, flash messages and a JSON context
//!
//! Rendering HTML is left to whatever consumes the page; the server's job
//! ends at naming the template and handing over its context.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

/// Flash message severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
}

/// One-shot message shown above the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub level: Level,
    pub message: String,
}

/// Rendered page
#[derive(Debug, Clone)]
pub struct Page {
    pub status: StatusCode,
    pub template: &'static str,
    pub flashes: Vec<Flash>,
    pub context: Value,
}

#[derive(Serialize)]
struct PageBody<'a> {
    template: &'static str,
    flashes: &'a [Flash],
    context: &'a Value,
}

impl Page {
    pub fn new(template: &'static str) -> Self {
        Self {
            status: StatusCode::OK,
            template,
            flashes: Vec::new(),
            context: Value::Object(Default::default()),
        }
    }

    /// The landing page, also the target of failed mutations.
    pub fn home() -> Self {
        Self::new("pages/home.html")
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn with_context(mut self, context: impl Serialize) -> Self {
        self.context = serde_json::to_value(context).unwrap_or_else(|e| {
            tracing::error!(template = self.template, "unserializable page context: {}", e);
            Value::Null
        });
        self
    }

    pub fn success(mut self, message: impl Into<String>) -> Self {
        self.flashes.push(Flash {
            level: Level::Success,
            message: message.into(),
        });
        self
    }

    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.flashes.push(Flash {
            level: Level::Error,
            message: message.into(),
        });
        self
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        let body = PageBody {
            template: self.template,
            flashes: &self.flashes,
            context: &self.context,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::json;

    #[tokio::test]
    async fn page_serializes_template_flashes_context() {
        let response = Page::new("pages/venues.html")
            .with_status(StatusCode::UNPROCESSABLE_ENTITY)
            .with_context(json!({ "areas": [] }))
            .error("phone is required")
            .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["template"], "pages/venues.html");
        assert_eq!(body["flashes"][0]["level"], "error");
        assert_eq!(body["flashes"][0]["message"], "phone is required");
        assert_eq!(body["context"]["areas"], json!([]));
    }

    #[test]
    fn empty_context_is_an_object() {
        assert!(Page::home().context.is_object());
    }
}
