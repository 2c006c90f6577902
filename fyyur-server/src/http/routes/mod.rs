//! Route handlers organized by resource

pub mod artists;
pub mod health;
pub mod home;
pub mod shows;
pub mod venues;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use super::view::Page;
use crate::models::{ShowListing, Timeline, ValidationError};

/// Entity detail context: the entity's own fields plus its shows.
#[derive(Serialize)]
struct Detail<'a, T> {
    #[serde(flatten)]
    entity: &'a T,
    past_shows: Vec<ShowListing>,
    upcoming_shows: Vec<ShowListing>,
    past_shows_count: usize,
    upcoming_shows_count: usize,
}

impl<'a, T> Detail<'a, T> {
    fn new(entity: &'a T, timeline: Timeline<ShowListing>) -> Self {
        Self {
            entity,
            past_shows_count: timeline.past_count(),
            upcoming_shows_count: timeline.upcoming_count(),
            past_shows: timeline.past,
            upcoming_shows: timeline.upcoming,
        }
    }
}

/// Re-render a submitted form with the validation message.
fn invalid_form(template: &'static str, err: ValidationError, context: impl Serialize) -> Response {
    tracing::debug!(template, field = err.field(), "form rejected: {}", err);
    Page::new(template)
        .with_status(StatusCode::UNPROCESSABLE_ENTITY)
        .with_context(context)
        .error(err.to_string())
        .into_response()
}

/// A form body the extractor could not decode: re-render the form with the
/// rejection's status.
fn undecodable_form<R>(template: &'static str, rejection: R, context: impl Serialize) -> Response
where
    R: IntoResponse + std::fmt::Display,
{
    let reason = rejection.to_string();
    let status = rejection.into_response().status();
    tracing::debug!(template, status = %status, "form body rejected: {}", reason);
    Page::new(template)
        .with_status(status)
        .with_context(context)
        .error("The form could not be read. Please check the fields and try again.")
        .into_response()
}

/// A write that the store refused: home page, error flash, nothing persisted.
fn failed_write(status: StatusCode, message: String) -> Response {
    Page::home()
        .with_status(status)
        .error(message)
        .into_response()
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::db::MemoryCatalog;
    use crate::http::{build_router, AppState};
    use crate::seed::seed;

    /// Router over a catalog holding the demo dataset.
    pub async fn seeded_app() -> (Router, Arc<MemoryCatalog>) {
        let catalog = Arc::new(MemoryCatalog::new());
        seed(catalog.as_ref()).await.unwrap();
        let app = build_router(AppState::new(catalog.clone()), Duration::from_secs(5));
        (app, catalog)
    }

    pub fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    pub fn delete(uri: &str) -> Request<Body> {
        Request::delete(uri).body(Body::empty()).unwrap()
    }

    /// Url-encoded form POST; `body` must already be encoded.
    pub fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    /// Send one request, returning the status and (for page bodies) the JSON.
    pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    /// Send one request expecting a redirect, returning its target.
    pub async fn redirect_target(app: &Router, request: Request<Body>) -> String {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        response.headers()[header::LOCATION]
            .to_str()
            .unwrap()
            .to_owned()
    }
}
