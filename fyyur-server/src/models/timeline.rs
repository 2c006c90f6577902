//! Past/upcoming classification of shows
//!
//! Classification is derived, never stored: a show is upcoming when its
//! start time is strictly after the evaluation instant, past otherwise.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Anything with a start time
pub trait Scheduled {
    fn start_time(&self) -> DateTime<Utc>;

    fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.start_time() > now
    }
}

/// Disjoint split of an entity's shows, each side sorted by start time
#[derive(Debug, Clone, Serialize)]
pub struct Timeline<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

impl<T: Scheduled> Timeline<T> {
    pub fn partition(shows: Vec<T>, now: DateTime<Utc>) -> Self {
        let (mut upcoming, mut past): (Vec<T>, Vec<T>) =
            shows.into_iter().partition(|s| s.is_upcoming(now));
        past.sort_by_key(|s| s.start_time());
        upcoming.sort_by_key(|s| s.start_time());
        Self { past, upcoming }
    }

    pub fn past_count(&self) -> usize {
        self.past.len()
    }

    pub fn upcoming_count(&self) -> usize {
        self.upcoming.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[derive(Debug, Clone, PartialEq)]
    struct At(i32, DateTime<Utc>);

    impl Scheduled for At {
        fn start_time(&self) -> DateTime<Utc> {
            self.1
        }
    }

    #[test]
    fn partition_is_a_disjoint_cover() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let shows: Vec<At> = (-5..=5)
            .map(|h| At(h, now + Duration::hours(h as i64)))
            .collect();

        let timeline = Timeline::partition(shows.clone(), now);
        assert_eq!(timeline.past_count() + timeline.upcoming_count(), shows.len());
        assert!(timeline.past.iter().all(|s| s.1 <= now));
        assert!(timeline.upcoming.iter().all(|s| s.1 > now));
        for show in &shows {
            let in_past = timeline.past.contains(show);
            let in_upcoming = timeline.upcoming.contains(show);
            assert!(in_past ^ in_upcoming, "show {:?} must be in exactly one side", show);
        }
    }

    #[test]
    fn show_starting_now_is_past() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let timeline = Timeline::partition(vec![At(1, now)], now);
        assert_eq!(timeline.past_count(), 1);
        assert_eq!(timeline.upcoming_count(), 0);
    }

    #[test]
    fn sides_are_sorted() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let later = At(2, now + Duration::days(2));
        let sooner = At(1, now + Duration::days(1));
        let timeline = Timeline::partition(vec![later.clone(), sooner.clone()], now);
        assert_eq!(timeline.upcoming, vec![sooner, later]);
    }
}
