//! Venue repository
//!
//! - list/search: LEFT JOIN on shows for upcoming counts in one query
//! - create/update: venue row and genres in one transaction
//! - delete: shows restrict the delete, genres cascade

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::{replace_genres, violated_foreign_key, GenreTable, SummaryRow};
use crate::db::DbError;
use crate::models::{Genres, Location, SearchTerm, Summary, Venue, VenueInput};

/// Venue record from database
#[derive(Debug, Clone, FromRow)]
struct VenueRow {
    id: i32,
    name: String,
    city: String,
    state: String,
    address: String,
    phone: String,
    image_link: Option<String>,
    facebook_link: Option<String>,
    website: Option<String>,
    seeking_talent: bool,
    seeking_description: Option<String>,
    genres: Vec<String>,
}

impl From<VenueRow> for Venue {
    fn from(r: VenueRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            city: r.city,
            state: r.state,
            address: r.address,
            phone: r.phone,
            image_link: r.image_link,
            facebook_link: r.facebook_link,
            website: r.website,
            seeking_talent: r.seeking_talent,
            seeking_description: r.seeking_description,
            genres: Genres::from(r.genres),
        }
    }
}

/// Venue repository
pub struct VenueRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> VenueRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Distinct locations, stable order.
    pub async fn locations(&self) -> Result<Vec<Location>, DbError> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            r#"
            SELECT DISTINCT city, state
            FROM venues
            ORDER BY state, city
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(city, state)| Location::new(city, state))
            .collect())
    }

    /// Venues with upcoming-show counts, optionally in one location.
    pub async fn list(
        &self,
        location: Option<&Location>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Summary>, DbError> {
        let rows: Vec<SummaryRow> = sqlx::query_as(
            r#"
            SELECT
                v.id,
                v.name,
                v.city,
                v.state,
                COUNT(s.id) FILTER (WHERE s.start_time > $1) AS num_upcoming_shows
            FROM venues v
            LEFT JOIN shows s ON s.venue_id = v.id
            WHERE ($2::text IS NULL OR (v.city = $2 AND v.state = $3))
            GROUP BY v.id
            ORDER BY v.id
            "#,
        )
        .bind(now)
        .bind(location.map(|l| l.city.as_str()))
        .bind(location.map(|l| l.state.as_str()))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Summary::from).collect())
    }

    /// Case-insensitive substring search on name.
    pub async fn search(
        &self,
        term: &SearchTerm,
        now: DateTime<Utc>,
    ) -> Result<Vec<Summary>, DbError> {
        let rows: Vec<SummaryRow> = sqlx::query_as(
            r#"
            SELECT
                v.id,
                v.name,
                v.city,
                v.state,
                COUNT(s.id) FILTER (WHERE s.start_time > $1) AS num_upcoming_shows
            FROM venues v
            LEFT JOIN shows s ON s.venue_id = v.id
            WHERE v.name ILIKE $2
            GROUP BY v.id
            ORDER BY v.id
            "#,
        )
        .bind(now)
        .bind(term.like_pattern())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Summary::from).collect())
    }

    /// Get a single venue with its genres.
    pub async fn get(&self, id: i32) -> Result<Venue, DbError> {
        let row: VenueRow = sqlx::query_as(
            r#"
            SELECT
                v.id, v.name, v.city, v.state, v.address, v.phone,
                v.image_link, v.facebook_link, v.website,
                v.seeking_talent, v.seeking_description,
                ARRAY(
                    SELECT g.genre FROM venue_genres g
                    WHERE g.venue_id = v.id
                    ORDER BY g.id
                ) AS genres
            FROM venues v
            WHERE v.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("venue", id))?;

        Ok(row.into())
    }

    /// Insert venue plus genres (atomic).
    ///
    /// The transaction rolls back on drop if any statement fails.
    pub async fn create(&self, input: &VenueInput) -> Result<i32, DbError> {
        let mut tx = self.pool.begin().await?;

        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO venues (
                name, city, state, address, phone,
                image_link, facebook_link, website,
                seeking_talent, seeking_description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.address)
        .bind(&input.phone)
        .bind(input.image_link.as_deref())
        .bind(input.facebook_link.as_deref())
        .bind(input.website.as_deref())
        .bind(input.seeking_talent)
        .bind(input.seeking_description.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        replace_genres(&mut *tx, GenreTable::Venue, id, &input.genres).await?;

        tx.commit().await?;
        Ok(id)
    }

    /// Overwrite all fields and the genre set (atomic).
    pub async fn update(&self, id: i32, input: &VenueInput) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query_as::<_, (i32,)>(
            r#"
            UPDATE venues SET
                name = $2,
                city = $3,
                state = $4,
                address = $5,
                phone = $6,
                image_link = $7,
                facebook_link = $8,
                website = $9,
                seeking_talent = $10,
                seeking_description = $11
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.address)
        .bind(&input.phone)
        .bind(input.image_link.as_deref())
        .bind(input.facebook_link.as_deref())
        .bind(input.website.as_deref())
        .bind(input.seeking_talent)
        .bind(input.seeking_description.as_deref())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("venue", id))?;

        replace_genres(&mut *tx, GenreTable::Venue, id, &input.genres).await?;

        tx.commit().await?;
        Ok(())
    }

    /// Delete by id; a missing id reports `false`.
    pub async fn delete(&self, id: i32) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM venues WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await;

        match result {
            Ok(done) => Ok(done.rows_affected() > 0),
            Err(e) if violated_foreign_key(&e).is_some() => Err(DbError::InUse {
                resource: "venue",
                id: id.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}
