//! Repository implementations for PostgreSQL access
//!
//! Each repository follows these patterns:
//! - Upcoming-show counts come from a LEFT JOIN in the listing query (no N+1)
//! - Rely on DB constraints (foreign keys, NOT NULL) instead of check-then-insert
//! - Row plus genre rows are written in one transaction

pub mod venues;
pub mod artists;
pub mod shows;

pub use venues::VenueRepo;
pub use artists::ArtistRepo;
pub use shows::ShowRepo;

use sqlx::{FromRow, PgConnection};

use crate::models::{Genres, Location, Summary};

/// SQLSTATE for foreign_key_violation
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Constraint name when `err` is a foreign key violation.
pub(crate) fn violated_foreign_key(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) => {
            Some(db.constraint().unwrap_or_default().to_owned())
        }
        _ => None,
    }
}

/// Listing row shared by venue and artist queries
#[derive(Debug, FromRow)]
pub(crate) struct SummaryRow {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub num_upcoming_shows: i64,
}

impl From<SummaryRow> for Summary {
    fn from(r: SummaryRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            location: Location::new(r.city, r.state),
            num_upcoming_shows: r.num_upcoming_shows,
        }
    }
}

/// Which genre join table to write
#[derive(Debug, Clone, Copy)]
pub(crate) enum GenreTable {
    Venue,
    Artist,
}

impl GenreTable {
    fn clear_sql(self) -> &'static str {
        match self {
            Self::Venue => "DELETE FROM venue_genres WHERE venue_id = $1",
            Self::Artist => "DELETE FROM artist_genres WHERE artist_id = $1",
        }
    }

    fn insert_sql(self) -> &'static str {
        match self {
            Self::Venue => {
                "INSERT INTO venue_genres (venue_id, genre) VALUES ($1, $2) ON CONFLICT DO NOTHING"
            }
            Self::Artist => {
                "INSERT INTO artist_genres (artist_id, genre) VALUES ($1, $2) ON CONFLICT DO NOTHING"
            }
        }
    }
}

/// Replace the owner's genre set. Call inside the owning transaction.
pub(crate) async fn replace_genres(
    conn: &mut PgConnection,
    table: GenreTable,
    owner_id: i32,
    genres: &Genres,
) -> Result<(), sqlx::Error> {
    sqlx::query(table.clear_sql())
        .bind(owner_id)
        .execute(&mut *conn)
        .await?;

    for genre in genres.iter() {
        sqlx::query(table.insert_sql())
            .bind(owner_id)
            .bind(genre)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}
