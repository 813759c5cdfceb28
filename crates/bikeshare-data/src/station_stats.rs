//! Most popular stations and trip.

use bikeshare_core::models::TripTable;
use serde::Serialize;

use crate::stats::mode;

/// Separator joining the two ends of a route.
pub const ROUTE_SEPARATOR: &str = " to ";

/// Modes of the station columns and of the start → end route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStats {
    pub most_common_start: String,
    pub most_common_end: String,
    /// `"<start> to <end>"`.
    pub most_common_route: String,
}

/// Most common start station, end station and route of `table`.
///
/// Returns `None` when the table has no rows. Ties go to the
/// lexicographically smallest name.
pub fn report_station_stats(table: &TripTable) -> Option<StationStats> {
    let most_common_start = mode(table.iter().map(|r| r.start_station.as_str()))?;
    let most_common_end = mode(table.iter().map(|r| r.end_station.as_str()))?;
    let most_common_route = mode(
        table
            .iter()
            .map(|r| format!("{}{}{}", r.start_station, ROUTE_SEPARATOR, r.end_station)),
    )?;

    Some(StationStats {
        most_common_start: most_common_start.to_string(),
        most_common_end: most_common_end.to_string(),
        most_common_route,
    })
}
