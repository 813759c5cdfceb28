//! Bikeshare user breakdowns.
//!
//! Every city reports user types. Gender and birth year exist only for cities
//! whose export carries those columns; for the others the report carries an
//! explicit [`Demographics::NotApplicable`] marker instead of empty counts.

use bikeshare_core::models::{City, TripTable};
use serde::Serialize;

use crate::stats::{category_counts, mode, ValueCount};

/// Extremes and mode of the birth-year column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

/// Gender and birth-year statistics, when the city records them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Demographics {
    /// The city's export has no gender or birth-year columns.
    NotApplicable,
    Available {
        gender_counts: Vec<ValueCount>,
        /// `None` when no row has a birth year.
        birth_years: Option<BirthYearStats>,
    },
}

impl Demographics {
    pub fn is_available(&self) -> bool {
        matches!(self, Demographics::Available { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    /// Trips per user type, most frequent first. Blank user types are skipped.
    pub user_type_counts: Vec<ValueCount>,
    pub demographics: Demographics,
}

/// User-type counts, plus gender counts and birth-year statistics when `city`
/// has them.
pub fn report_user_stats(table: &TripTable, city: City) -> UserStats {
    let user_type_counts = category_counts(table.iter().filter_map(|r| r.user_type.as_deref()));

    let demographics = if city.has_demographics() {
        Demographics::Available {
            gender_counts: category_counts(table.iter().filter_map(|r| r.gender.as_deref())),
            birth_years: birth_year_stats(table),
        }
    } else {
        Demographics::NotApplicable
    };

    UserStats {
        user_type_counts,
        demographics,
    }
}

/// Rows without a birth year are left out of all three figures.
fn birth_year_stats(table: &TripTable) -> Option<BirthYearStats> {
    let years = || table.iter().filter_map(|r| r.birth_year);
    Some(BirthYearStats {
        earliest: years().min()?,
        most_recent: years().max()?,
        most_common: mode(years())?,
    })
}
