//! Domain models with validation at the form boundary
//!
//! Submitted forms deserialize into loose `*Form` structs and are validated
//! once into `*Input` structs before anything reaches the store.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod fields;
pub mod genre;
pub mod location;
pub mod summary;
pub mod search;
pub mod timeline;
pub mod venue;
pub mod artist;
pub mod show;

pub use validation::ValidationError;
pub use genre::Genres;
pub use location::{group_by_location, Area, Location, LocationParams};
pub use summary::{SearchResults, Summary};
pub use search::{SearchForm, SearchTerm};
pub use timeline::{Scheduled, Timeline};
pub use venue::{Venue, VenueForm, VenueInput};
pub use artist::{Artist, ArtistForm, ArtistInput};
pub use show::{ShowForm, ShowInput, ShowListing};
