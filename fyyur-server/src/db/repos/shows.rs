//! Show repository
//!
//! Every read joins both sides so callers get venue and artist names
//! without extra lookups, plus each side's upcoming show count. Creation leans on the foreign keys: a missing
//! artist or venue surfaces as a constraint violation, never a stray row.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::violated_foreign_key;
use crate::db::DbError;
use crate::models::{ShowInput, ShowListing};

/// Joined show record from database
#[derive(Debug, Clone, FromRow)]
struct ShowRow {
    id: i32,
    venue_id: i32,
    venue_name: String,
    venue_image_link: Option<String>,
    artist_id: i32,
    artist_name: String,
    artist_image_link: Option<String>,
    start_time: DateTime<Utc>,
    venue_upcoming_shows: i64,
    artist_upcoming_shows: i64,
}

impl From<ShowRow> for ShowListing {
    fn from(r: ShowRow) -> Self {
        Self {
            id: r.id,
            venue_id: r.venue_id,
            venue_name: r.venue_name,
            venue_image_link: r.venue_image_link,
            artist_id: r.artist_id,
            artist_name: r.artist_name,
            artist_image_link: r.artist_image_link,
            start_time: r.start_time,
            venue_upcoming_shows: r.venue_upcoming_shows,
            artist_upcoming_shows: r.artist_upcoming_shows,
        }
    }
}

/// Show repository
pub struct ShowRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ShowRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All shows.
    pub async fn list(&self, now: DateTime<Utc>) -> Result<Vec<ShowListing>, DbError> {
        self.fetch(None, None, now).await
    }

    /// Shows booked at one venue.
    pub async fn for_venue(
        &self,
        venue_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Vec<ShowListing>, DbError> {
        self.fetch(Some(venue_id), None, now).await
    }

    /// Shows played by one artist.
    pub async fn for_artist(
        &self,
        artist_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Vec<ShowListing>, DbError> {
        self.fetch(None, Some(artist_id), now).await
    }

    async fn fetch(
        &self,
        venue_id: Option<i32>,
        artist_id: Option<i32>,
        now: DateTime<Utc>,
    ) -> Result<Vec<ShowListing>, DbError> {
        let rows: Vec<ShowRow> = sqlx::query_as(
            r#"
            SELECT
                s.id,
                s.start_time,
                v.id AS venue_id,
                v.name AS venue_name,
                v.image_link AS venue_image_link,
                a.id AS artist_id,
                a.name AS artist_name,
                a.image_link AS artist_image_link,
                (SELECT COUNT(*) FROM shows u
                  WHERE u.venue_id = s.venue_id AND u.start_time > $3) AS venue_upcoming_shows,
                (SELECT COUNT(*) FROM shows u
                  WHERE u.artist_id = s.artist_id AND u.start_time > $3) AS artist_upcoming_shows
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            JOIN artists a ON a.id = s.artist_id
            WHERE ($1::int IS NULL OR s.venue_id = $1)
              AND ($2::int IS NULL OR s.artist_id = $2)
            ORDER BY s.start_time, s.id
            "#,
        )
        .bind(venue_id)
        .bind(artist_id)
        .bind(now)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(ShowListing::from).collect())
    }

    /// Insert a show, mapping foreign key violations to `MissingReference`.
    pub async fn create(&self, input: &ShowInput) -> Result<i32, DbError> {
        let result: Result<(i32,), sqlx::Error> = sqlx::query_as(
            r#"
            INSERT INTO shows (venue_id, artist_id, start_time)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(input.venue_id)
        .bind(input.artist_id)
        .bind(input.start_time)
        .fetch_one(self.pool)
        .await;

        match result {
            Ok((id,)) => Ok(id),
            Err(e) => match violated_foreign_key(&e).as_deref() {
                Some("shows_artist_id_fkey") => Err(DbError::MissingReference {
                    resource: "artist",
                    id: input.artist_id.to_string(),
                }),
                Some(_) => Err(DbError::MissingReference {
                    resource: "venue",
                    id: input.venue_id.to_string(),
                }),
                None => Err(e.into()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, migrations};

    #[tokio::test]
    #[ignore = "requires database"]
    async fn missing_artist_leaves_no_row() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");

        let before: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM shows")
            .fetch_one(&pool)
            .await
            .unwrap();

        let err = ShowRepo::new(&pool)
            .create(&ShowInput {
                artist_id: i32::MAX,
                venue_id: i32::MAX,
                start_time: Utc::now(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::MissingReference { .. }));

        let after: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM shows")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(before, after);
    }
}
