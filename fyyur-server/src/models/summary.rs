//! Listing rows shared by venue and artist pages

use serde::Serialize;

use super::Location;

/// One venue or artist as shown in listings and search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub id: i32,
    pub name: String,
    #[serde(skip)]
    pub location: Location,
    /// Shows starting strictly after the request's evaluation instant
    pub num_upcoming_shows: i64,
}

/// Search response body: `{count, data}`
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<Summary>,
}

impl From<Vec<Summary>> for SearchResults {
    fn from(data: Vec<Summary>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}
