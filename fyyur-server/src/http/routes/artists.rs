//! Artist routes
//!
//! Same shape as venues, minus delete and location grouping.

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
use crate::models::{ArtistForm, LocationParams, SearchForm, SearchResults, SearchTerm, Timeline};

const NEW_TEMPLATE: &str = "forms/new_artist.html";
const EDIT_TEMPLATE: &str = "forms/edit_artist.html";

/// GET /artists
async fn list_artists(
    State(state): State<Arc<AppState>>,
    query: Result<Query<LocationParams>, QueryRejection>,
) -> Result<Page, ApiError> {
    let Query(params) = query?;
    let artists = state
        .catalog
        .list_artists(params.location().as_ref(), Utc::now())
        .await?;
    Ok(Page::new("pages/artists.html").with_context(json!({ "artists": artists })))
}

/// POST /artists/search
async fn search_artists(
    State(state): State<Arc<AppState>>,
    form: Result<Form<SearchForm>, FormRejection>,
) -> Result<Page, ApiError> {
    let Form(form) = form?;
    let term = SearchTerm::from(form);
    let hits = state.catalog.search_artists(&term, Utc::now()).await?;

    Ok(Page::new("pages/search_artists.html").with_context(json!({
        "results": SearchResults::from(hits),
        "search_term": term.as_str(),
    })))
}

/// GET /artists/{id}
async fn show_artist(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<Page, ApiError> {
    let now = Utc::now();
    let artist = state.catalog.get_artist(id).await?;
    let shows = state.catalog.artist_shows(id, now).await?;
    let timeline = Timeline::partition(shows, now);

    Ok(Page::new("pages/show_artist.html").with_context(json!({
        "artist": Detail::new(&artist, timeline),
    })))
}

/// GET /artists/create
async fn create_artist_form() -> Page {
    Page::new(NEW_TEMPLATE).with_context(json!({ "form": ArtistForm::default() }))
}

/// POST /artists/create
async fn create_artist(
    State(state): State<Arc<AppState>>,
    form: Result<MultiForm<ArtistForm>, MultiFormRejection>,
) -> Response {
    let form = match form {
        Ok(MultiForm(form)) => form,
        Err(rejection) => {
            return undecodable_form(NEW_TEMPLATE, rejection, json!({ "form": ArtistForm::default() }))
        }
    };
    let input = match form.clone().validate() {
        Ok(input) => input,
        Err(e) => return invalid_form(NEW_TEMPLATE, e, json!({ "form": form })),
    };

    match state.catalog.create_artist(&input).await {
        Ok(id) => {
            tracing::info!(artist_id = id, name = %input.name, "artist listed");
            Redirect::to(&format!("/artists/{id}")).into_response()
        }
        Err(e) => {
            tracing::error!(name = %input.name, "artist create failed: {}", e);
            failed_write(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("An error occurred. Artist {} could not be listed.", input.name),
            )
        }
    }
}

/// GET /artists/{id}/edit
async fn edit_artist_form(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<Page, ApiError> {
    let artist = state.catalog.get_artist(id).await?;
    Ok(Page::new(EDIT_TEMPLATE).with_context(json!({
        "artist_id": id,
        "form": ArtistForm::from(&artist),
    })))
}

/// POST /artists/{id}/edit
async fn edit_artist(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    form: Result<MultiForm<ArtistForm>, MultiFormRejection>,
) -> Response {
    let form = match form {
        Ok(MultiForm(form)) => form,
        Err(rejection) => {
            let context = json!({ "artist_id": id, "form": ArtistForm::default() });
            return undecodable_form(EDIT_TEMPLATE, rejection, context);
        }
    };
    let input = match form.clone().validate() {
        Ok(input) => input,
        Err(e) => return invalid_form(EDIT_TEMPLATE, e, json!({ "artist_id": id, "form": form })),
    };

    match state.catalog.update_artist(id, &input).await {
        Ok(()) => {
            tracing::info!(artist_id = id, "artist updated");
            Redirect::to(&format!("/artists/{id}")).into_response()
        }
        Err(e @ DbError::NotFound { .. }) => ApiError::from(e).into_response(),
        Err(e) => {
            tracing::error!(artist_id = id, "artist update failed: {}", e);
            failed_write(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("An error occurred. Artist {} could not be updated.", input.name),
            )
        }
    }
}

/// Artist routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route("/artists/create", get(create_artist_form).post(create_artist))
        .route("/artists/{id}", get(show_artist))
        .route("/artists/{id}/edit", get(edit_artist_form).post(edit_artist))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{get, post_form, redirect_target, send, seeded_app};
    use super::*;
    use crate::db::ArtistStore;
    use axum::body::Body;
    use axum::http::Request;

    #[tokio::test]
    async fn listing_orders_by_id_with_counts() {
        let (app, _) = seeded_app().await;
        let (status, body) = send(&app, get("/artists")).await;
        assert_eq!(status, StatusCode::OK);

        let artists = body["context"]["artists"].as_array().unwrap();
        let names: Vec<&str> = artists.iter().map(|a| a["name"].as_str().unwrap()).collect();
        assert_eq!(names, ["Guns N Petals", "Matt Quevedo", "The Wild Sax Band"]);
        assert_eq!(artists[2]["num_upcoming_shows"], 3);
        assert_eq!(artists[0]["num_upcoming_shows"], 0);
    }

    #[tokio::test]
    async fn search_matches_partial_names() {
        let (app, _) = seeded_app().await;
        let (_, body) = send(&app, post_form("/artists/search", "search_term=A")).await;
        assert_eq!(body["context"]["results"]["count"], 3);

        let (_, body) = send(&app, post_form("/artists/search", "search_term=band")).await;
        assert_eq!(body["context"]["results"]["count"], 1);
        assert_eq!(body["context"]["results"]["data"][0]["name"], "The Wild Sax Band");
        assert_eq!(body["context"]["search_term"], "band");
    }

    #[tokio::test]
    async fn detail_lists_venue_side_of_shows() {
        let (app, _) = seeded_app().await;
        let (status, body) = send(&app, get("/artists/1")).await;
        assert_eq!(status, StatusCode::OK);

        let artist = &body["context"]["artist"];
        assert_eq!(artist["past_shows_count"], 1);
        assert_eq!(artist["upcoming_shows_count"], 0);
        assert_eq!(artist["past_shows"][0]["venue_name"], "The Musical Hop");
        assert_eq!(artist["past_shows"][0]["venue_upcoming_shows"], 0);
    }

    #[tokio::test]
    async fn repeated_single_field_rerenders_form() {
        let (app, catalog) = seeded_app().await;
        let body = "name=A&name=B&city=Austin&state=TX&phone=512-555-0199";
        let (status, page) = send(&app, post_form("/artists/create", body)).await;
        assert!(status.is_client_error(), "{status}");
        assert_eq!(page["template"], NEW_TEMPLATE);
        assert_eq!(page["flashes"][0]["level"], "error");

        let (status, page) = send(&app, post_form("/artists/2/edit", body)).await;
        assert!(status.is_client_error(), "{status}");
        assert_eq!(page["template"], EDIT_TEMPLATE);
        assert_eq!(page["context"]["artist_id"], 2);

        assert_eq!(catalog.list_artists(None, Utc::now()).await.unwrap().len(), 3);
        assert_eq!(catalog.get_artist(2).await.unwrap().name, "Matt Quevedo");
    }

    #[tokio::test]
    async fn search_without_form_content_type_renders_page() {
        let (app, _) = seeded_app().await;
        let request = Request::post("/artists/search")
            .body(Body::from("search_term=band"))
            .unwrap();
        let (status, page) = send(&app, request).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(page["template"], "pages/home.html");
        assert_eq!(page["flashes"][0]["level"], "error");
    }

    #[tokio::test]
    async fn repeated_location_filter_renders_page() {
        let (app, _) = seeded_app().await;
        let (status, page) = send(&app, get("/artists?state=CA&state=NY")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(page["template"], "pages/home.html");
    }

    #[tokio::test]
    async fn edit_store_failure_keeps_stored_row() {
        let (app, catalog) = seeded_app().await;
        catalog.fail_writes(true);
        let body = "name=Guns+N+Petals&city=Oakland&state=CA&phone=326-123-5000";
        let (status, page) = send(&app, post_form("/artists/1/edit", body)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(page["template"], "pages/home.html");
        assert_eq!(
            page["flashes"][0]["message"],
            "An error occurred. Artist Guns N Petals could not be updated."
        );

        catalog.fail_writes(false);
        assert_eq!(catalog.get_artist(1).await.unwrap().city, "San Francisco");
    }

    #[tokio::test]
    async fn update_city_touches_only_that_artist() {
        let (app, catalog) = seeded_app().await;
        let body = "name=Guns+N+Petals&city=Oakland&state=CA&phone=326-123-5000\
            &genres=Rock+n+Roll";
        let target = redirect_target(&app, post_form("/artists/1/edit", body)).await;
        assert_eq!(target, "/artists/1");

        assert_eq!(catalog.get_artist(1).await.unwrap().city, "Oakland");
        assert_eq!(catalog.get_artist(2).await.unwrap().city, "New York");
        assert_eq!(catalog.get_artist(3).await.unwrap().city, "San Francisco");
    }

    #[tokio::test]
    async fn invalid_edit_rerenders_form() {
        let (app, catalog) = seeded_app().await;
        let body = "name=Guns+N+Petals&city=Oakland&state=California&phone=326-123-5000";
        let (status, page) = send(&app, post_form("/artists/1/edit", body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(page["template"], EDIT_TEMPLATE);
        assert_eq!(page["context"]["artist_id"], 1);
        assert_eq!(catalog.get_artist(1).await.unwrap().city, "San Francisco");
    }

    #[tokio::test]
    async fn create_redirects_to_detail() {
        let (app, _) = seeded_app().await;
        let body = "name=New+Band&city=Austin&state=TX&phone=512-555-0199&seeking_venue=on";
        let target = redirect_target(&app, post_form("/artists/create", body)).await;
        assert_eq!(target, "/artists/4");

        let (_, page) = send(&app, get(&target)).await;
        assert_eq!(page["context"]["artist"]["seeking_venue"], true);
        assert_eq!(page["context"]["artist"]["genres"], json!([]));
    }

    #[tokio::test]
    async fn missing_artist_is_404() {
        let (app, _) = seeded_app().await;
        let (status, _) = send(&app, get("/artists/42/edit")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
