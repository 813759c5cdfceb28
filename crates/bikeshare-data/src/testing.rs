//! Trip builders shared by the unit tests of this crate.

use bikeshare_core::models::{City, TripRecord, TripTable};
use chrono::{Datelike, NaiveDateTime, Timelike};

/// A trip starting at `start` (`YYYY-MM-DD HH:MM:SS`) between two stations.
pub fn trip(start: &str, from: &str, to: &str, duration: f64) -> TripRecord {
    let start_time = NaiveDateTime::parse_from_str(start, "%Y-%m-%d %H:%M:%S").unwrap();
    TripRecord {
        start_time,
        end_time: String::new(),
        start_station: from.to_string(),
        end_station: to.to_string(),
        trip_duration: duration,
        user_type: Some("Subscriber".to_string()),
        gender: None,
        birth_year: None,
        month: start_time.month(),
        day_of_week: start_time.weekday(),
        start_hour: start_time.hour(),
    }
}

/// A trip with only its start time set meaningfully.
pub fn trip_at(start: &str) -> TripRecord {
    trip(start, "Station A", "Station B", 60.0)
}

pub fn table(city: City, records: Vec<TripRecord>) -> TripTable {
    TripTable::new(city, records)
}

pub fn empty(city: City) -> TripTable {
    TripTable::new(city, Vec::new())
}
