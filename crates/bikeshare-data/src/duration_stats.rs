//! Total and average trip duration.

use bikeshare_core::models::TripTable;
use serde::Serialize;

/// Duration totals in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub trip_count: usize,
    /// Sum of every trip's duration; `0` for an empty table.
    pub total_duration: f64,
    /// Mean duration rounded half away from zero; `None` for an empty table.
    pub average_duration: Option<i64>,
}

/// Total and average of the `trip_duration` column.
pub fn report_duration_stats(table: &TripTable) -> DurationStats {
    let trip_count = table.len();
    let total_duration: f64 = table.iter().map(|r| r.trip_duration).sum();
    let average_duration = if trip_count == 0 {
        None
    } else {
        Some((total_duration / trip_count as f64).round() as i64)
    };

    DurationStats {
        trip_count,
        total_duration,
        average_duration,
    }
}
