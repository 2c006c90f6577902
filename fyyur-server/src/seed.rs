//! Demo dataset: three venues, three artists, five shows
//!
//! Goes through the same form validation as submitted data, so a broken
//! fixture fails loudly instead of landing in the store.

use chrono::{DateTime, TimeZone, Utc};

use crate::db::{Catalog, DbError};
use crate::models::{ArtistForm, ShowInput, ValidationError, VenueForm};

/// Seed error type
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("invalid seed record: {0}")]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Db(#[from] DbError),
}

/// Ids created by one seeding run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub venues: Vec<i32>,
    pub artists: Vec<i32>,
    pub shows: Vec<i32>,
}

fn text(s: &str) -> Option<String> {
    Some(s.to_string())
}

fn genres(list: &[&str]) -> Vec<String> {
    list.iter().map(|g| g.to_string()).collect()
}

fn venue_forms() -> Vec<VenueForm> {
    vec![
        VenueForm {
            name: text("The Musical Hop"),
            city: text("San Francisco"),
            state: text("CA"),
            address: text("1015 Folsom Street"),
            phone: text("123-123-1234"),
            image_link: text("https://images.unsplash.com/photo-1543900694-133f37abaaa5?ixlib=rb-1.2.1&auto=format&fit=crop&w=400&q=60"),
            facebook_link: text("https://www.facebook.com/TheMusicalHop"),
            website_link: text("https://www.themusicalhop.com"),
            genres: genres(&["Jazz", "Reggae", "Swing", "Classical", "Folk"]),
            seeking_talent: text("y"),
            seeking_description: text(
                "We are on the lookout for a local artist to play every two weeks. Please call us.",
            ),
        },
        VenueForm {
            name: text("The Dueling Pianos Bar"),
            city: text("New York"),
            state: text("NY"),
            address: text("335 Delancey Street"),
            phone: text("914-003-1132"),
            image_link: text("https://images.unsplash.com/photo-1497032205916-ac775f0649ae?ixlib=rb-1.2.1&auto=format&fit=crop&w=750&q=80"),
            facebook_link: text("https://www.facebook.com/theduelingpianos"),
            website_link: text("https://www.theduelingpianos.com"),
            genres: genres(&["Classical", "R&B", "Hip-Hop"]),
            ..Default::default()
        },
        VenueForm {
            name: text("Park Square Live Music & Coffee"),
            city: text("San Francisco"),
            state: text("CA"),
            address: text("34 Whiskey Moore Ave"),
            phone: text("415-000-1234"),
            image_link: text("https://images.unsplash.com/photo-1485686531765-ba63b07845a7?ixlib=rb-1.2.1&auto=format&fit=crop&w=747&q=80"),
            facebook_link: text("https://www.facebook.com/ParkSquareLiveMusicAndCoffee"),
            website_link: text("https://www.parksquarelivemusicandcoffee.com"),
            genres: genres(&["Rock n Roll", "Jazz", "Classical", "Folk"]),
            ..Default::default()
        },
    ]
}

fn artist_forms() -> Vec<ArtistForm> {
    vec![
        ArtistForm {
            name: text("Guns N Petals"),
            city: text("San Francisco"),
            state: text("CA"),
            phone: text("326-123-5000"),
            image_link: text("https://images.unsplash.com/photo-1549213783-8284d0336c4f?ixlib=rb-1.2.1&auto=format&fit=crop&w=300&q=80"),
            facebook_link: text("https://www.facebook.com/GunsNPetals"),
            website_link: text("https://www.gunsnpetalsband.com"),
            genres: genres(&["Rock n Roll"]),
            seeking_venue: text("y"),
            seeking_description: text(
                "Looking for shows to perform at in the San Francisco Bay Area!",
            ),
        },
        ArtistForm {
            name: text("Matt Quevedo"),
            city: text("New York"),
            state: text("NY"),
            phone: text("300-400-5000"),
            image_link: text("https://images.unsplash.com/photo-1495223153807-b916f75de8c5?ixlib=rb-1.2.1&auto=format&fit=crop&w=334&q=80"),
            facebook_link: text("https://www.facebook.com/mattquevedo923251523"),
            genres: genres(&["Jazz"]),
            ..Default::default()
        },
        ArtistForm {
            name: text("The Wild Sax Band"),
            city: text("San Francisco"),
            state: text("CA"),
            phone: text("432-325-5432"),
            image_link: text("https://images.unsplash.com/photo-1558369981-f9ca78462e61?ixlib=rb-1.2.1&auto=format&fit=crop&w=794&q=80"),
            genres: genres(&["Jazz", "Classical"]),
            ..Default::default()
        },
    ]
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .unwrap_or_default()
}

/// (venue index, artist index, start time), indices into the lists above.
fn show_slots() -> Vec<(usize, usize, DateTime<Utc>)> {
    vec![
        (0, 0, at(2019, 5, 21, 21, 30)),
        (2, 1, at(2019, 6, 15, 23, 0)),
        (2, 2, at(2035, 4, 1, 20, 0)),
        (2, 2, at(2035, 4, 8, 20, 0)),
        (2, 2, at(2035, 4, 15, 20, 0)),
    ]
}

/// Insert the demo dataset. Not idempotent: each run adds fresh rows.
pub async fn seed(catalog: &dyn Catalog) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::default();

    for form in venue_forms() {
        let input = form.validate()?;
        report.venues.push(catalog.create_venue(&input).await?);
    }
    for form in artist_forms() {
        let input = form.validate()?;
        report.artists.push(catalog.create_artist(&input).await?);
    }
    for (venue, artist, start_time) in show_slots() {
        let input = ShowInput {
            venue_id: report.venues[venue],
            artist_id: report.artists[artist],
            start_time,
        };
        report.shows.push(catalog.create_show(&input).await?);
    }

    tracing::info!(
        venues = report.venues.len(),
        artists = report.artists.len(),
        shows = report.shows.len(),
        "seeded demo data"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ArtistStore, MemoryCatalog, ShowStore, VenueStore};
    use crate::models::SearchTerm;

    #[test]
    fn fixtures_validate() {
        for form in venue_forms() {
            form.validate().unwrap();
        }
        for form in artist_forms() {
            form.validate().unwrap();
        }
    }

    #[tokio::test]
    async fn seeds_three_venues_three_artists_five_shows() {
        let catalog = MemoryCatalog::new();
        let report = seed(&catalog).await.unwrap();
        assert_eq!(report.venues.len(), 3);
        assert_eq!(report.artists.len(), 3);
        assert_eq!(report.shows.len(), 5);
        assert_eq!(catalog.list_shows(Utc::now()).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn seeded_searches() {
        let catalog = MemoryCatalog::new();
        seed(&catalog).await.unwrap();
        let now = at(2026, 1, 1, 0, 0);

        let music = catalog.search_venues(&SearchTerm::new("Music"), now).await.unwrap();
        let names: Vec<_> = music.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["The Musical Hop", "Park Square Live Music & Coffee"]);

        let a = catalog.search_artists(&SearchTerm::new("A"), now).await.unwrap();
        assert_eq!(a.len(), 3);

        let band = catalog.search_artists(&SearchTerm::new("band"), now).await.unwrap();
        assert_eq!(band.len(), 1);
        assert_eq!(band[0].name, "The Wild Sax Band");
        assert_eq!(band[0].num_upcoming_shows, 3);
    }
}
