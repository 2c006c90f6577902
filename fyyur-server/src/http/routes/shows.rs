//! Show routes
//!
//! GET  /shows         - every show with both sides denormalized
//! GET  /shows/create  - empty form
//! POST /shows/create  - create, then redirect to the listing

use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use chrono::Utc;
use serde_json::json;

use super::{failed_write, invalid_form, undecodable_form};
use crate::db::DbError;
use crate::http::view::Page;
use crate::http::{ApiError, AppState};
use crate::models::ShowForm;

const NEW_TEMPLATE: &str = "forms/new_show.html";

/// GET /shows
async fn list_shows(State(state): State<Arc<AppState>>) -> Result<Page, ApiError> {
    let shows = state.catalog.list_shows(Utc::now()).await?;
    Ok(Page::new("pages/shows.html").with_context(json!({ "shows": shows })))
}

/// GET /shows/create
async fn create_show_form() -> Page {
    Page::new(NEW_TEMPLATE).with_context(json!({ "form": ShowForm::default() }))
}

/// POST /shows/create
async fn create_show(
    State(state): State<Arc<AppState>>,
    form: Result<Form<ShowForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            return undecodable_form(NEW_TEMPLATE, rejection, json!({ "form": ShowForm::default() }))
        }
    };
    let input = match form.clone().validate() {
        Ok(input) => input,
        Err(e) => return invalid_form(NEW_TEMPLATE, e, json!({ "form": form })),
    };

    match state.catalog.create_show(&input).await {
        Ok(id) => {
            tracing::info!(
                show_id = id,
                venue_id = input.venue_id,
                artist_id = input.artist_id,
                "show listed"
            );
            Redirect::to("/shows").into_response()
        }
        Err(e @ DbError::MissingReference { .. }) => {
            tracing::debug!("show rejected: {}", e);
            Page::new(NEW_TEMPLATE)
                .with_status(StatusCode::UNPROCESSABLE_ENTITY)
                .with_context(json!({ "form": form }))
                .error(format!("The show could not be listed: {e}."))
                .into_response()
        }
        Err(e) => {
            tracing::error!("show create failed: {}", e);
            failed_write(
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred. The show could not be listed.".to_owned(),
            )
        }
    }
}

/// Show routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/shows", get(list_shows))
        .route("/shows/create", get(create_show_form).post(create_show))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{get, post_form, redirect_target, send, seeded_app};
    use super::*;
    use crate::db::ShowStore;
    use axum::body::Body;
    use axum::http::Request;

    #[tokio::test]
    async fn listing_is_denormalized_and_ordered() {
        let (app, _) = seeded_app().await;
        let (status, body) = send(&app, get("/shows")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["template"], "pages/shows.html");

        let shows = body["context"]["shows"].as_array().unwrap();
        assert_eq!(shows.len(), 5);
        assert_eq!(shows[0]["venue_name"], "The Musical Hop");
        assert_eq!(shows[0]["artist_name"], "Guns N Petals");
        assert!(shows[0]["artist_image_link"].is_string());
        assert_eq!(shows[0]["start_time"], "2019-05-21T21:30:00Z");
        assert_eq!(shows[4]["start_time"], "2035-04-15T20:00:00Z");
    }

    #[tokio::test]
    async fn create_redirects_to_listing() {
        let (app, catalog) = seeded_app().await;
        let body = "artist_id=2&venue_id=1&start_time=2036-01-01+20%3A00%3A00";
        let target = redirect_target(&app, post_form("/shows/create", body)).await;
        assert_eq!(target, "/shows");
        assert_eq!(catalog.list_shows(Utc::now()).await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn missing_artist_leaves_no_row() {
        let (app, catalog) = seeded_app().await;
        let body = "artist_id=99&venue_id=1&start_time=2036-01-01+20%3A00%3A00";
        let (status, page) = send(&app, post_form("/shows/create", body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(page["template"], NEW_TEMPLATE);
        assert_eq!(page["flashes"][0]["level"], "error");
        assert_eq!(catalog.list_shows(Utc::now()).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn bad_start_time_is_rejected() {
        let (app, catalog) = seeded_app().await;
        let body = "artist_id=1&venue_id=1&start_time=next+tuesday";
        let (status, page) = send(&app, post_form("/shows/create", body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(page["flashes"][0]["level"], "error");
        assert_eq!(catalog.list_shows(Utc::now()).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn create_without_form_content_type_rerenders_form() {
        let (app, catalog) = seeded_app().await;
        let request = Request::post("/shows/create")
            .body(Body::from("artist_id=1&venue_id=1&start_time=2036-01-01"))
            .unwrap();
        let (status, page) = send(&app, request).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(page["template"], NEW_TEMPLATE);
        assert_eq!(page["flashes"][0]["level"], "error");
        assert_eq!(catalog.list_shows(Utc::now()).await.unwrap().len(), 5);
    }
}
