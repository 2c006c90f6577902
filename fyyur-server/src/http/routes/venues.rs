//! Venue routes
//!
//! GET    /venues              - venues grouped by city/state
//! POST   /venues/search       - partial name search
//! GET    /venues/{id}         - detail with past/upcoming shows
//! GET    /venues/create       - empty form
//! POST   /venues/create       - create, then redirect to detail
//! GET    /venues/{id}/edit    - prefilled form
//! POST   /venues/{id}/edit    - overwrite, then redirect to detail
//! DELETE /venues/{id}         - idempotent delete, refused while shows exist

use std::sync::Arc;

use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use axum_extra::extract::{Form as MultiForm, FormRejection as MultiFormRejection};
use chrono::Utc;
use serde_json::json;

use super::{failed_write, invalid_form, undecodable_form, Detail};
use crate::db::DbError;
use crate::http::extractors::EntityId;
use crate::http::view::Page;
use crate::http::{ApiError, AppState};
use crate::models::{
    group_by_location, LocationParams, SearchForm, SearchResults, SearchTerm, Timeline, VenueForm,
};

const NEW_TEMPLATE: &str = "forms/new_venue.html";
const EDIT_TEMPLATE: &str = "forms/edit_venue.html";

/// GET /venues
async fn list_venues(
    State(state): State<Arc<AppState>>,
    query: Result<Query<LocationParams>, QueryRejection>,
) -> Result<Page, ApiError> {
    let Query(params) = query?;
    let now = Utc::now();
    let filter = params.location();

    let locations = state.catalog.venue_locations().await?;
    let venues = state.catalog.list_venues(filter.as_ref(), now).await?;
    let areas = group_by_location(locations, venues);

    Ok(Page::new("pages/venues.html").with_context(json!({ "areas": areas })))
}

/// POST /venues/search
async fn search_venues(
    State(state): State<Arc<AppState>>,
    form: Result<Form<SearchForm>, FormRejection>,
) -> Result<Page, ApiError> {
    let Form(form) = form?;
    let term = SearchTerm::from(form);
    let hits = state.catalog.search_venues(&term, Utc::now()).await?;

    Ok(Page::new("pages/search_venues.html").with_context(json!({
        "results": SearchResults::from(hits),
        "search_term": term.as_str(),
    })))
}

/// GET /venues/{id}
async fn show_venue(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<Page, ApiError> {
    let now = Utc::now();
    let venue = state.catalog.get_venue(id).await?;
    let shows = state.catalog.venue_shows(id, now).await?;
    let timeline = Timeline::partition(shows, now);

    Ok(Page::new("pages/show_venue.html").with_context(json!({
        "venue": Detail::new(&venue, timeline),
    })))
}

/// GET /venues/create
async fn create_venue_form() -> Page {
    Page::new(NEW_TEMPLATE).with_context(json!({ "form": VenueForm::default() }))
}

/// POST /venues/create
async fn create_venue(
    State(state): State<Arc<AppState>>,
    form: Result<MultiForm<VenueForm>, MultiFormRejection>,
) -> Response {
    let form = match form {
        Ok(MultiForm(form)) => form,
        Err(rejection) => {
            return undecodable_form(NEW_TEMPLATE, rejection, json!({ "form": VenueForm::default() }))
        }
    };
    let input = match form.clone().validate() {
        Ok(input) => input,
        Err(e) => return invalid_form(NEW_TEMPLATE, e, json!({ "form": form })),
    };

    match state.catalog.create_venue(&input).await {
        Ok(id) => {
            tracing::info!(venue_id = id, name = %input.name, "venue listed");
            Redirect::to(&format!("/venues/{id}")).into_response()
        }
        Err(e) => {
            tracing::error!(name = %input.name, "venue create failed: {}", e);
            failed_write(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("An error occurred. Venue {} could not be listed.", input.name),
            )
        }
    }
}

/// GET /venues/{id}/edit
async fn edit_venue_form(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<Page, ApiError> {
    let venue = state.catalog.get_venue(id).await?;
    Ok(Page::new(EDIT_TEMPLATE).with_context(json!({
        "venue_id": id,
        "form": VenueForm::from(&venue),
    })))
}

/// POST /venues/{id}/edit
async fn edit_venue(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    form: Result<MultiForm<VenueForm>, MultiFormRejection>,
) -> Response {
    let form = match form {
        Ok(MultiForm(form)) => form,
        Err(rejection) => {
            let context = json!({ "venue_id": id, "form": VenueForm::default() });
            return undecodable_form(EDIT_TEMPLATE, rejection, context);
        }
    };
    let input = match form.clone().validate() {
        Ok(input) => input,
        Err(e) => return invalid_form(EDIT_TEMPLATE, e, json!({ "venue_id": id, "form": form })),
    };

    match state.catalog.update_venue(id, &input).await {
        Ok(()) => {
            tracing::info!(venue_id = id, "venue updated");
            Redirect::to(&format!("/venues/{id}")).into_response()
        }
        Err(e @ DbError::NotFound { .. }) => ApiError::from(e).into_response(),
        Err(e) => {
            tracing::error!(venue_id = id, "venue update failed: {}", e);
            failed_write(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("An error occurred. Venue {} could not be updated.", input.name),
            )
        }
    }
}

/// DELETE /venues/{id}
async fn delete_venue(State(state): State<Arc<AppState>>, EntityId(id): EntityId) -> Response {
    match state.catalog.delete_venue(id).await {
        Ok(existed) => {
            tracing::info!(venue_id = id, existed, "venue deleted");
            Page::home()
                .success(format!("Venue {id} was successfully deleted."))
                .into_response()
        }
        Err(DbError::InUse { .. }) => failed_write(
            StatusCode::CONFLICT,
            format!("Venue {id} still has shows and could not be deleted."),
        ),
        Err(e) => {
            tracing::error!(venue_id = id, "venue delete failed: {}", e);
            failed_write(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("An error occurred. Venue {id} could not be deleted."),
            )
        }
    }
}

/// Venue routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route("/venues/create", get(create_venue_form).post(create_venue))
        .route("/venues/{id}", get(show_venue).delete(delete_venue))
        .route("/venues/{id}/edit", get(edit_venue_form).post(edit_venue))
}
