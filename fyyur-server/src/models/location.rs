//! City/state locations and the grouped venue listing

use serde::{Deserialize, Serialize};

use super::Summary;

/// A (city, state) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub state: String,
}

impl Location {
    pub fn new(city: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            state: state.into(),
        }
    }
}

/// Optional `?city=&state=` listing filter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationParams {
    pub city: Option<String>,
    pub state: Option<String>,
}

impl LocationParams {
    /// Both parts must be present to filter; otherwise list everything.
    pub fn location(&self) -> Option<Location> {
        let city = self.city.as_deref().map(str::trim).filter(|c| !c.is_empty())?;
        let state = self.state.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some(Location::new(city, state.to_uppercase()))
    }
}

/// Venues sharing one location, as rendered on the venues page
#[derive(Debug, Clone, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<Summary>,
}

/// Bucket venues under their location.
///
/// Areas follow the order of `locations`; a venue whose location is missing
/// from that list (created between the two queries) opens a new area at the
/// end. Every venue lands in exactly one area and locations without venues
/// are dropped.
pub fn group_by_location(locations: Vec<Location>, venues: Vec<Summary>) -> Vec<Area> {
    let mut areas: Vec<Area> = locations
        .into_iter()
        .map(|l| Area {
            city: l.city,
            state: l.state,
            venues: Vec::new(),
        })
        .collect();

    for venue in venues {
        let slot = areas
            .iter()
            .position(|a| a.city == venue.location.city && a.state == venue.location.state);
        match slot {
            Some(i) => areas[i].venues.push(venue),
            None => areas.push(Area {
                city: venue.location.city.clone(),
                state: venue.location.state.clone(),
                venues: vec![venue],
            }),
        }
    }

    areas.retain(|a| !a.venues.is_empty());
    areas
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: i32, city: &str, state: &str) -> Summary {
        Summary {
            id,
            name: format!("venue {}", id),
            location: Location::new(city, state),
            num_upcoming_shows: 0,
        }
    }

    #[test]
    fn regrouping_preserves_every_venue() {
        let venues = vec![
            summary(1, "San Francisco", "CA"),
            summary(2, "New York", "NY"),
            summary(3, "San Francisco", "CA"),
            summary(4, "Austin", "TX"),
        ];
        let locations = vec![
            Location::new("San Francisco", "CA"),
            Location::new("New York", "NY"),
            Location::new("Austin", "TX"),
        ];

        let areas = group_by_location(locations, venues.clone());
        assert_eq!(areas.len(), 3);
        assert_eq!(areas[0].venues.len(), 2);

        let mut flattened: Vec<Summary> = areas.into_iter().flat_map(|a| a.venues).collect();
        flattened.sort_by_key(|v| v.id);
        assert_eq!(flattened, venues);
    }

    #[test]
    fn unlisted_location_opens_new_area() {
        let areas = group_by_location(
            vec![Location::new("New York", "NY")],
            vec![summary(1, "New York", "NY"), summary(2, "Austin", "TX")],
        );
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[1].city, "Austin");
    }

    #[test]
    fn empty_locations_are_dropped() {
        let areas = group_by_location(vec![Location::new("Nowhere", "NV")], vec![]);
        assert!(areas.is_empty());
    }

    #[test]
    fn params_need_both_parts() {
        let params = LocationParams {
            city: Some("San Francisco".into()),
            state: Some("ca".into()),
        };
        assert_eq!(params.location(), Some(Location::new("San Francisco", "CA")));

        let params = LocationParams {
            city: Some("San Francisco".into()),
            state: None,
        };
        assert_eq!(params.location(), None);
    }
}
