//! PostgreSQL-backed catalog

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::repos::{ArtistRepo, ShowRepo, VenueRepo};
use super::{ArtistStore, Catalog, DbError, ShowStore, VenueStore};
use crate::models::{
    Artist, ArtistInput, Location, SearchTerm, ShowInput, ShowListing, Summary, Venue, VenueInput,
};

/// Catalog over a shared connection pool
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl VenueStore for PgCatalog {
    async fn venue_locations(&self) -> Result<Vec<Location>, DbError> {
        VenueRepo::new(&self.pool).locations().await
    }

    async fn list_venues(
        &self,
        location: Option<&Location>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Summary>, DbError> {
        VenueRepo::new(&self.pool).list(location, now).await
    }

    async fn search_venues(
        &self,
        term: &SearchTerm,
        now: DateTime<Utc>,
    ) -> Result<Vec<Summary>, DbError> {
        VenueRepo::new(&self.pool).search(term, now).await
    }

    async fn get_venue(&self, id: i32) -> Result<Venue, DbError> {
        VenueRepo::new(&self.pool).get(id).await
    }

    async fn venue_shows(&self, id: i32, now: DateTime<Utc>) -> Result<Vec<ShowListing>, DbError> {
        ShowRepo::new(&self.pool).for_venue(id, now).await
    }

    async fn create_venue(&self, input: &VenueInput) -> Result<i32, DbError> {
        VenueRepo::new(&self.pool).create(input).await
    }

    async fn update_venue(&self, id: i32, input: &VenueInput) -> Result<(), DbError> {
        VenueRepo::new(&self.pool).update(id, input).await
    }

    async fn delete_venue(&self, id: i32) -> Result<bool, DbError> {
        VenueRepo::new(&self.pool).delete(id).await
    }
}

#[async_trait]
impl ArtistStore for PgCatalog {
    async fn list_artists(
        &self,
        location: Option<&Location>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Summary>, DbError> {
        ArtistRepo::new(&self.pool).list(location, now).await
    }

    async fn search_artists(
        &self,
        term: &SearchTerm,
        now: DateTime<Utc>,
    ) -> Result<Vec<Summary>, DbError> {
        ArtistRepo::new(&self.pool).search(term, now).await
    }

    async fn get_artist(&self, id: i32) -> Result<Artist, DbError> {
        ArtistRepo::new(&self.pool).get(id).await
    }

    async fn artist_shows(&self, id: i32, now: DateTime<Utc>) -> Result<Vec<ShowListing>, DbError> {
        ShowRepo::new(&self.pool).for_artist(id, now).await
    }

    async fn create_artist(&self, input: &ArtistInput) -> Result<i32, DbError> {
        ArtistRepo::new(&self.pool).create(input).await
    }

    async fn update_artist(&self, id: i32, input: &ArtistInput) -> Result<(), DbError> {
        ArtistRepo::new(&self.pool).update(id, input).await
    }
}

#[async_trait]
impl ShowStore for PgCatalog {
    async fn list_shows(&self, now: DateTime<Utc>) -> Result<Vec<ShowListing>, DbError> {
        ShowRepo::new(&self.pool).list(now).await
    }

    async fn create_show(&self, input: &ShowInput) -> Result<i32, DbError> {
        ShowRepo::new(&self.pool).create(input).await
    }
}

#[async_trait]
impl Catalog for PgCatalog {
    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
