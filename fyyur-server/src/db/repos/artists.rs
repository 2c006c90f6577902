//! Artist repository
//!
//! Mirrors the venue repository minus delete: artists have no delete path.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::{replace_genres, GenreTable, SummaryRow};
use crate::db::DbError;
use crate::models::{Artist, ArtistInput, Genres, Location, SearchTerm, Summary};

/// Artist record from database
#[derive(Debug, Clone, FromRow)]
struct ArtistRow {
    id: i32,
    name: String,
    city: String,
    state: String,
    phone: String,
    image_link: Option<String>,
    facebook_link: Option<String>,
    website: Option<String>,
    seeking_venue: bool,
    seeking_description: Option<String>,
    genres: Vec<String>,
}

impl From<ArtistRow> for Artist {
    fn from(r: ArtistRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            city: r.city,
            state: r.state,
            phone: r.phone,
            image_link: r.image_link,
            facebook_link: r.facebook_link,
            website: r.website,
            seeking_venue: r.seeking_venue,
            seeking_description: r.seeking_description,
            genres: Genres::from(r.genres),
        }
    }
}

/// Artist repository
pub struct ArtistRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ArtistRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Artists with upcoming-show counts, optionally in one location.
    pub async fn list(
        &self,
        location: Option<&Location>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Summary>, DbError> {
        let rows: Vec<SummaryRow> = sqlx::query_as(
            r#"
            SELECT
                a.id,
                a.name,
                a.city,
                a.state,
                COUNT(s.id) FILTER (WHERE s.start_time > $1) AS num_upcoming_shows
            FROM artists a
            LEFT JOIN shows s ON s.artist_id = a.id
            WHERE ($2::text IS NULL OR (a.city = $2 AND a.state = $3))
            GROUP BY a.id
            ORDER BY a.id
            "#,
        )
        .bind(now)
        .bind(location.map(|l| l.city.as_str()))
        .bind(location.map(|l| l.state.as_str()))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Summary::from).collect())
    }

    pub async fn search(
        &self,
        term: &SearchTerm,
        now: DateTime<Utc>,
    ) -> Result<Vec<Summary>, DbError> {
        let rows: Vec<SummaryRow> = sqlx::query_as(
            r#"
            SELECT
                a.id,
                a.name,
                a.city,
                a.state,
                COUNT(s.id) FILTER (WHERE s.start_time > $1) AS num_upcoming_shows
            FROM artists a
            LEFT JOIN shows s ON s.artist_id = a.id
            WHERE a.name ILIKE $2
            GROUP BY a.id
            ORDER BY a.id
            "#,
        )
        .bind(now)
        .bind(term.like_pattern())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Summary::from).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Artist, DbError> {
        let row: ArtistRow = sqlx::query_as(
            r#"
            SELECT
                a.id, a.name, a.city, a.state, a.phone,
                a.image_link, a.facebook_link, a.website,
                a.seeking_venue, a.seeking_description,
                ARRAY(
                    SELECT g.genre FROM artist_genres g
                    WHERE g.artist_id = a.id
                    ORDER BY g.id
                ) AS genres
            FROM artists a
            WHERE a.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("artist", id))?;

        Ok(row.into())
    }

    /// Insert artist plus genres (atomic).
    pub async fn create(&self, input: &ArtistInput) -> Result<i32, DbError> {
        let mut tx = self.pool.begin().await?;

        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO artists (
                name, city, state, phone,
                image_link, facebook_link, website,
                seeking_venue, seeking_description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.phone)
        .bind(input.image_link.as_deref())
        .bind(input.facebook_link.as_deref())
        .bind(input.website.as_deref())
        .bind(input.seeking_venue)
        .bind(input.seeking_description.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        replace_genres(&mut *tx, GenreTable::Artist, id, &input.genres).await?;

        tx.commit().await?;
        Ok(id)
    }

    /// Overwrite all fields and the genre set (atomic).
    pub async fn update(&self, id: i32, input: &ArtistInput) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query_as::<_, (i32,)>(
            r#"
            UPDATE artists SET
                name = $2,
                city = $3,
                state = $4,
                phone = $5,
                image_link = $6,
                facebook_link = $7,
                website = $8,
                seeking_venue = $9,
                seeking_description = $10
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.phone)
        .bind(input.image_link.as_deref())
        .bind(input.facebook_link.as_deref())
        .bind(input.website.as_deref())
        .bind(input.seeking_venue)
        .bind(input.seeking_description.as_deref())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("artist", id))?;

        replace_genres(&mut *tx, GenreTable::Artist, id, &input.genres).await?;

        tx.commit().await?;
        Ok(())
    }
}
