//! In-memory catalog for tests and database-less demo runs
//!
//! Enforces the same rules as the PostgreSQL schema: generated ids, foreign
//! keys on shows, restrict-on-delete for venues with shows. Each mutation
//! checks everything before touching the tables, so a failure leaves no
//! partial write.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{ArtistStore, Catalog, DbError, ShowStore, VenueStore};
use crate::models::{
    Artist, ArtistInput, Location, SearchTerm, ShowInput, ShowListing, Summary, Venue, VenueInput,
};

#[derive(Debug, Clone, Copy)]
struct ShowRecord {
    venue_id: i32,
    artist_id: i32,
    start_time: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Tables {
    last_venue_id: i32,
    last_artist_id: i32,
    last_show_id: i32,
    venues: BTreeMap<i32, Venue>,
    artists: BTreeMap<i32, Artist>,
    shows: BTreeMap<i32, ShowRecord>,
}

impl Tables {
    fn upcoming_at_venue(&self, venue_id: i32, now: DateTime<Utc>) -> i64 {
        self.shows
            .values()
            .filter(|s| s.venue_id == venue_id && s.start_time > now)
            .count() as i64
    }

    fn upcoming_for_artist(&self, artist_id: i32, now: DateTime<Utc>) -> i64 {
        self.shows
            .values()
            .filter(|s| s.artist_id == artist_id && s.start_time > now)
            .count() as i64
    }

    fn venue_summary(&self, v: &Venue, now: DateTime<Utc>) -> Summary {
        Summary {
            id: v.id,
            name: v.name.clone(),
            location: v.location(),
            num_upcoming_shows: self.upcoming_at_venue(v.id, now),
        }
    }

    fn artist_summary(&self, a: &Artist, now: DateTime<Utc>) -> Summary {
        Summary {
            id: a.id,
            name: a.name.clone(),
            location: a.location(),
            num_upcoming_shows: self.upcoming_for_artist(a.id, now),
        }
    }

    /// Join shows matching `keep` with both sides, ordered by start time.
    fn listings(&self, now: DateTime<Utc>, keep: impl Fn(&ShowRecord) -> bool) -> Vec<ShowListing> {
        let mut listings: Vec<ShowListing> = self
            .shows
            .iter()
            .filter(|&(_, s)| keep(s))
            .filter_map(|(&id, s)| {
                let venue = self.venues.get(&s.venue_id)?;
                let artist = self.artists.get(&s.artist_id)?;
                Some(ShowListing {
                    id,
                    venue_id: venue.id,
                    venue_name: venue.name.clone(),
                    venue_image_link: venue.image_link.clone(),
                    artist_id: artist.id,
                    artist_name: artist.name.clone(),
                    artist_image_link: artist.image_link.clone(),
                    start_time: s.start_time,
                    venue_upcoming_shows: self.upcoming_at_venue(venue.id, now),
                    artist_upcoming_shows: self.upcoming_for_artist(artist.id, now),
                })
            })
            .collect();
        listings.sort_by_key(|l| (l.start_time, l.id));
        listings
    }
}

fn venue_from(id: i32, input: &VenueInput) -> Venue {
    Venue {
        id,
        name: input.name.clone(),
        city: input.city.clone(),
        state: input.state.clone(),
        address: input.address.clone(),
        phone: input.phone.clone(),
        image_link: input.image_link.clone(),
        facebook_link: input.facebook_link.clone(),
        website: input.website.clone(),
        seeking_talent: input.seeking_talent,
        seeking_description: input.seeking_description.clone(),
        genres: input.genres.clone(),
    }
}

fn artist_from(id: i32, input: &ArtistInput) -> Artist {
    Artist {
        id,
        name: input.name.clone(),
        city: input.city.clone(),
        state: input.state.clone(),
        phone: input.phone.clone(),
        image_link: input.image_link.clone(),
        facebook_link: input.facebook_link.clone(),
        website: input.website.clone(),
        seeking_venue: input.seeking_venue,
        seeking_description: input.seeking_description.clone(),
        genres: input.genres.clone(),
    }
}

/// In-memory catalog
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    tables: Mutex<Tables>,
    fail_writes: AtomicBool,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every mutation and ping fail as if the database were unreachable.
    /// Reads keep working.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock for a mutation, honoring `fail_writes`.
    fn tables_for_write(&self) -> Result<MutexGuard<'_, Tables>, DbError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        Ok(self.tables())
    }
}

#[async_trait]
impl VenueStore for MemoryCatalog {
    async fn venue_locations(&self) -> Result<Vec<Location>, DbError> {
        let tables = self.tables();
        let mut locations: Vec<Location> = tables.venues.values().map(Venue::location).collect();
        locations.sort_by(|a, b| (&a.state, &a.city).cmp(&(&b.state, &b.city)));
        locations.dedup();
        Ok(locations)
    }

    async fn list_venues(
        &self,
        location: Option<&Location>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Summary>, DbError> {
        let tables = self.tables();
        Ok(tables
            .venues
            .values()
            .filter(|v| location.map_or(true, |l| v.city == l.city && v.state == l.state))
            .map(|v| tables.venue_summary(v, now))
            .collect())
    }

    async fn search_venues(
        &self,
        term: &SearchTerm,
        now: DateTime<Utc>,
    ) -> Result<Vec<Summary>, DbError> {
        let tables = self.tables();
        Ok(tables
            .venues
            .values()
            .filter(|v| term.matches(&v.name))
            .map(|v| tables.venue_summary(v, now))
            .collect())
    }

    async fn get_venue(&self, id: i32) -> Result<Venue, DbError> {
        self.tables()
            .venues
            .get(&id)
            .cloned()
            .ok_or_else(|| DbError::not_found("venue", id))
    }

    async fn venue_shows(&self, id: i32, now: DateTime<Utc>) -> Result<Vec<ShowListing>, DbError> {
        Ok(self.tables().listings(now, |s| s.venue_id == id))
    }

    async fn create_venue(&self, input: &VenueInput) -> Result<i32, DbError> {
        let mut tables = self.tables_for_write()?;
        tables.last_venue_id += 1;
        let id = tables.last_venue_id;
        tables.venues.insert(id, venue_from(id, input));
        Ok(id)
    }

    async fn update_venue(&self, id: i32, input: &VenueInput) -> Result<(), DbError> {
        let mut tables = self.tables_for_write()?;
        let venue = tables
            .venues
            .get_mut(&id)
            .ok_or_else(|| DbError::not_found("venue", id))?;
        *venue = venue_from(id, input);
        Ok(())
    }

    async fn delete_venue(&self, id: i32) -> Result<bool, DbError> {
        let mut tables = self.tables_for_write()?;
        if tables.shows.values().any(|s| s.venue_id == id) {
            return Err(DbError::InUse {
                resource: "venue",
                id: id.to_string(),
            });
        }
        Ok(tables.venues.remove(&id).is_some())
    }
}

#[async_trait]
impl ArtistStore for MemoryCatalog {
    async fn list_artists(
        &self,
        location: Option<&Location>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Summary>, DbError> {
        let tables = self.tables();
        Ok(tables
            .artists
            .values()
            .filter(|a| location.map_or(true, |l| a.city == l.city && a.state == l.state))
            .map(|a| tables.artist_summary(a, now))
            .collect())
    }

    async fn search_artists(
        &self,
        term: &SearchTerm,
        now: DateTime<Utc>,
    ) -> Result<Vec<Summary>, DbError> {
        let tables = self.tables();
        Ok(tables
            .artists
            .values()
            .filter(|a| term.matches(&a.name))
            .map(|a| tables.artist_summary(a, now))
            .collect())
    }

    async fn get_artist(&self, id: i32) -> Result<Artist, DbError> {
        self.tables()
            .artists
            .get(&id)
            .cloned()
            .ok_or_else(|| DbError::not_found("artist", id))
    }

    async fn artist_shows(&self, id: i32, now: DateTime<Utc>) -> Result<Vec<ShowListing>, DbError> {
        Ok(self.tables().listings(now, |s| s.artist_id == id))
    }

    async fn create_artist(&self, input: &ArtistInput) -> Result<i32, DbError> {
        let mut tables = self.tables_for_write()?;
        tables.last_artist_id += 1;
        let id = tables.last_artist_id;
        tables.artists.insert(id, artist_from(id, input));
        Ok(id)
    }

    async fn update_artist(&self, id: i32, input: &ArtistInput) -> Result<(), DbError> {
        let mut tables = self.tables_for_write()?;
        let artist = tables
            .artists
            .get_mut(&id)
            .ok_or_else(|| DbError::not_found("artist", id))?;
        *artist = artist_from(id, input);
        Ok(())
    }
}

#[async_trait]
impl ShowStore for MemoryCatalog {
    async fn list_shows(&self, now: DateTime<Utc>) -> Result<Vec<ShowListing>, DbError> {
        Ok(self.tables().listings(now, |_| true))
    }

    async fn create_show(&self, input: &ShowInput) -> Result<i32, DbError> {
        let mut tables = self.tables_for_write()?;
        if !tables.artists.contains_key(&input.artist_id) {
            return Err(DbError::MissingReference {
                resource: "artist",
                id: input.artist_id.to_string(),
            });
        }
        if !tables.venues.contains_key(&input.venue_id) {
            return Err(DbError::MissingReference {
                resource: "venue",
                id: input.venue_id.to_string(),
            });
        }

        tables.last_show_id += 1;
        let id = tables.last_show_id;
        tables.shows.insert(
            id,
            ShowRecord {
                venue_id: input.venue_id,
                artist_id: input.artist_id,
                start_time: input.start_time,
            },
        );
        Ok(id)
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn ping(&self) -> Result<(), DbError> {
        self.tables_for_write().map(drop)
    }
}
