//! Schema setup for venues, artists, shows and genre associations
//!
//! Every statement is idempotent so this runs on each startup.

use sqlx::PgPool;

use super::DbError;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS venues (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL CHECK (name <> ''),
        city VARCHAR(120) NOT NULL CHECK (city <> ''),
        state VARCHAR(120) NOT NULL CHECK (state <> ''),
        address VARCHAR(120) NOT NULL CHECK (address <> ''),
        phone VARCHAR(120) NOT NULL CHECK (phone <> ''),
        image_link VARCHAR(500),
        facebook_link VARCHAR(120),
        website VARCHAR(300),
        seeking_talent BOOLEAN NOT NULL DEFAULT FALSE,
        seeking_description TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS artists (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL CHECK (name <> ''),
        city VARCHAR(120) NOT NULL CHECK (city <> ''),
        state VARCHAR(120) NOT NULL CHECK (state <> ''),
        phone VARCHAR(120) NOT NULL CHECK (phone <> ''),
        image_link VARCHAR(500),
        facebook_link VARCHAR(120),
        website VARCHAR(300),
        seeking_venue BOOLEAN NOT NULL DEFAULT FALSE,
        seeking_description TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS shows (
        id SERIAL PRIMARY KEY,
        venue_id INTEGER NOT NULL,
        artist_id INTEGER NOT NULL,
        start_time TIMESTAMPTZ NOT NULL,
        CONSTRAINT shows_venue_id_fkey FOREIGN KEY (venue_id)
            REFERENCES venues(id) ON DELETE RESTRICT,
        CONSTRAINT shows_artist_id_fkey FOREIGN KEY (artist_id)
            REFERENCES artists(id) ON DELETE RESTRICT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS venue_genres (
        id SERIAL PRIMARY KEY,
        venue_id INTEGER NOT NULL REFERENCES venues(id) ON DELETE CASCADE,
        genre TEXT NOT NULL CHECK (char_length(genre) BETWEEN 1 AND 50),
        CONSTRAINT venue_genres_unique UNIQUE (venue_id, genre)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS artist_genres (
        id SERIAL PRIMARY KEY,
        artist_id INTEGER NOT NULL REFERENCES artists(id) ON DELETE CASCADE,
        genre TEXT NOT NULL CHECK (char_length(genre) BETWEEN 1 AND 50),
        CONSTRAINT artist_genres_unique UNIQUE (artist_id, genre)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_venues_location ON venues(state, city)",
    "CREATE INDEX IF NOT EXISTS idx_shows_venue ON shows(venue_id, start_time)",
    "CREATE INDEX IF NOT EXISTS idx_shows_artist ON shows(artist_id, start_time)",
];

/// Create all tables and indexes that don't exist yet.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running schema migrations...");

    let mut tx = pool.begin().await?;
    for statement in SCHEMA {
        sqlx::query(*statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    tracing::info!(statements = SCHEMA.len(), "Schema up to date");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn migrations_are_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool creation failed");

        run(&pool).await.expect("first run failed");
        run(&pool).await.expect("second run failed");
    }
}
