use chrono::{Month, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::error::{BikeshareError, Result};

/// Weekdays in calendar order, indexed by `num_days_from_monday`.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

// ── City ──────────────────────────────────────────────────────────────────────

/// One of the three supported bikeshare datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    /// Every supported city, in prompt order.
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Name shown to and typed by the user.
    pub fn display_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// Snake-case identifier, also the stem of the source file name.
    pub fn identifier(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new_york_city",
            City::Washington => "washington",
        }
    }

    /// Whether the city's source carries the `Gender` and `Birth Year` columns.
    pub fn has_demographics(self) -> bool {
        !matches!(self, City::Washington)
    }

    /// Parse either the display name or the identifier, case-insensitively.
    pub fn parse(s: &str) -> Result<Self> {
        let needle = s.trim().to_lowercase();
        City::ALL
            .into_iter()
            .find(|c| c.display_name() == needle || c.identifier() == needle)
            .ok_or_else(|| BikeshareError::UnknownCity(s.trim().to_string()))
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ── Calendar helpers ──────────────────────────────────────────────────────────

/// Full English weekday name, e.g. `"Monday"`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Full English month name for a 1-based month number.
///
/// Returns `None` outside `1..=12`.
pub fn month_name(month: u32) -> Option<&'static str> {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
}

/// Serialise a [`Weekday`] as its full name instead of chrono's `"Mon"`.
pub fn serialize_weekday<S: Serializer>(
    day: &Weekday,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(weekday_name(*day))
}

// ── FilterSpec ────────────────────────────────────────────────────────────────

/// Conjunctive month / weekday predicate. `None` means "all".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterSpec {
    pub month: Option<Month>,
    pub day: Option<Weekday>,
}

impl FilterSpec {
    /// A spec that keeps every record.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(month: Option<Month>, day: Option<Weekday>) -> Self {
        Self { month, day }
    }

    /// `true` when no predicate is applied.
    pub fn is_unfiltered(&self) -> bool {
        self.month.is_none() && self.day.is_none()
    }

    /// Month predicate alone.
    pub fn matches_month(&self, record: &TripRecord) -> bool {
        self.month.map_or(true, |m| record.month == m.number_from_month())
    }

    /// Weekday predicate alone.
    pub fn matches_day(&self, record: &TripRecord) -> bool {
        self.day.map_or(true, |d| record.day_of_week == d)
    }

    /// Both predicates.
    pub fn matches(&self, record: &TripRecord) -> bool {
        self.matches_month(record) && self.matches_day(record)
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let month = self.month.map_or("all", |m| m.name());
        let day = self.day.map_or("all", weekday_name);
        write!(f, "month={month}, day={day}")
    }
}

// ── TripRecord ────────────────────────────────────────────────────────────────

/// One bikeshare trip, with the time fields derived from its start timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    /// Parsed `Start Time`.
    pub start_time: NaiveDateTime,
    /// `End Time` exactly as it appears in the source.
    pub end_time: String,
    pub start_station: String,
    pub end_station: String,
    /// Trip length in seconds.
    pub trip_duration: f64,
    pub user_type: Option<String>,
    /// Always `None` for cities without demographics.
    pub gender: Option<String>,
    /// Always `None` for cities without demographics.
    pub birth_year: Option<i32>,
    /// Month of `start_time`, 1–12.
    pub month: u32,
    #[serde(serialize_with = "serialize_weekday")]
    pub day_of_week: Weekday,
    /// Hour of `start_time`, 0–23.
    pub start_hour: u32,
}

// ── TripTable ─────────────────────────────────────────────────────────────────

/// The ordered trips of one city, sharing that city's schema.
#[derive(Debug, Clone, PartialEq)]
pub struct TripTable {
    city: City,
    records: Vec<TripRecord>,
}

impl TripTable {
    pub fn new(city: City, records: Vec<TripRecord>) -> Self {
        Self { city, records }
    }

    pub fn city(&self) -> City {
        self.city
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TripRecord> {
        self.records.iter()
    }

    /// Consume the table, keeping only records that pass `spec`.
    ///
    /// The month predicate runs before the weekday predicate.
    pub fn retain_matching(mut self, spec: &FilterSpec) -> Self {
        if spec.month.is_some() {
            self.records.retain(|r| spec.matches_month(r));
        }
        if spec.day.is_some() {
            self.records.retain(|r| spec.matches_day(r));
        }
        self
    }
}

impl<'a> IntoIterator for &'a TripTable {
    type Item = &'a TripRecord;
    type IntoIter = std::slice::Iter<'a, TripRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
