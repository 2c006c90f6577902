//! Store traits - the query layer handlers are written against
//!
//! Two implementations exist:
//! - `PgCatalog`: PostgreSQL via sqlx, one repository per table family
//! - `MemoryCatalog`: in-process maps with the same semantics (tests, demos)
//!
//! Every method that reports upcoming shows takes the evaluation instant
//! `now` so a request classifies all of its shows against one clock reading.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{
    Artist, ArtistInput, Location, SearchTerm, ShowInput, ShowListing, Summary, Venue, VenueInput,
};

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// A foreign key points at a row that does not exist
    #[error("{resource} '{id}' does not exist")]
    MissingReference { resource: &'static str, id: String },

    /// Delete refused because other rows still reference this one
    #[error("{resource} '{id}' still has shows")]
    InUse { resource: &'static str, id: String },
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: i32) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

#[async_trait]
pub trait VenueStore: Send + Sync {
    /// Distinct (city, state) pairs across all venues, ordered by state then city.
    async fn venue_locations(&self) -> Result<Vec<Location>, DbError>;

    /// Venues (optionally in one location) with upcoming-show counts, by id.
    async fn list_venues(
        &self,
        location: Option<&Location>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Summary>, DbError>;

    /// Case-insensitive substring search on the venue name.
    async fn search_venues(
        &self,
        term: &SearchTerm,
        now: DateTime<Utc>,
    ) -> Result<Vec<Summary>, DbError>;

    async fn get_venue(&self, id: i32) -> Result<Venue, DbError>;

    /// Every show booked at the venue, denormalized, with upcoming counts
    /// for both sides taken at `now`.
    async fn venue_shows(&self, id: i32, now: DateTime<Utc>) -> Result<Vec<ShowListing>, DbError>;

    /// Insert venue and genres atomically, returning the new id.
    async fn create_venue(&self, input: &VenueInput) -> Result<i32, DbError>;

    /// Overwrite every field (genres included) of an existing venue.
    async fn update_venue(&self, id: i32, input: &VenueInput) -> Result<(), DbError>;

    /// Remove a venue. Returns whether a row existed; a missing id is not
    /// an error. Fails with `InUse` while shows reference the venue.
    async fn delete_venue(&self, id: i32) -> Result<bool, DbError>;
}

#[async_trait]
pub trait ArtistStore: Send + Sync {
    async fn list_artists(
        &self,
        location: Option<&Location>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Summary>, DbError>;

    async fn search_artists(
        &self,
        term: &SearchTerm,
        now: DateTime<Utc>,
    ) -> Result<Vec<Summary>, DbError>;

    async fn get_artist(&self, id: i32) -> Result<Artist, DbError>;

    async fn artist_shows(&self, id: i32, now: DateTime<Utc>) -> Result<Vec<ShowListing>, DbError>;

    async fn create_artist(&self, input: &ArtistInput) -> Result<i32, DbError>;

    async fn update_artist(&self, id: i32, input: &ArtistInput) -> Result<(), DbError>;
}

#[async_trait]
pub trait ShowStore: Send + Sync {
    /// All shows, ordered by start time.
    async fn list_shows(&self, now: DateTime<Utc>) -> Result<Vec<ShowListing>, DbError>;

    /// Insert a show. Fails with `MissingReference` when the artist or venue
    /// does not exist, leaving nothing behind.
    async fn create_show(&self, input: &ShowInput) -> Result<i32, DbError>;
}

/// The full store handle injected into request handlers
#[async_trait]
pub trait Catalog: VenueStore + ArtistStore + ShowStore {
    /// Cheap round trip used by the health endpoint.
    async fn ping(&self) -> Result<(), DbError>;
}
