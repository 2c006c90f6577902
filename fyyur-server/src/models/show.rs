//! Shows: a booking of one artist at one venue

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::fields;
use super::timeline::Scheduled;
use super::ValidationError;

/// Accepted naive timestamp layouts, interpreted as UTC
const START_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Show with both sides denormalized for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListing {
    pub id: i32,
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
    /// Upcoming shows booked at this show's venue
    pub venue_upcoming_shows: i64,
    /// Upcoming shows played by this show's artist
    pub artist_upcoming_shows: i64,
}

impl Scheduled for ShowListing {
    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }
}

/// Raw show form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShowForm {
    pub artist_id: Option<String>,
    pub venue_id: Option<String>,
    pub start_time: Option<String>,
}

/// Validated show fields. References are checked by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowInput {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: DateTime<Utc>,
}

impl ShowForm {
    pub fn validate(self) -> Result<ShowInput, ValidationError> {
        Ok(ShowInput {
            artist_id: parse_id("artist_id", self.artist_id)?,
            venue_id: parse_id("venue_id", self.venue_id)?,
            start_time: parse_start_time(&fields::required("start_time", self.start_time)?)?,
        })
    }
}

fn parse_id(field: &'static str, value: Option<String>) -> Result<i32, ValidationError> {
    let raw = fields::required(field, value)?;
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::InvalidFormat {
            field,
            reason: "must be a positive integer id",
        }),
    }
}

/// Parse a submitted start time (RFC 3339 or a naive UTC timestamp).
pub fn parse_start_time(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    START_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or(ValidationError::InvalidFormat {
            field: "start_time",
            reason: "must look like 2035-04-01 20:00:00",
        })
}
