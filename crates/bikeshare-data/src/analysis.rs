//! Full report pipeline for one filtered trip table.
//!
//! Runs the four reporters, timing each, and returns a [`TripAnalysis`] that
//! the UI layer renders in one piece.

use std::time::Instant;

use bikeshare_core::models::{City, TripTable};
use serde::Serialize;
use tracing::debug;

use crate::duration_stats::{report_duration_stats, DurationStats};
use crate::station_stats::{report_station_stats, StationStats};
use crate::time_stats::{report_time_stats, TimeStats};
use crate::user_stats::{report_user_stats, UserStats};

/// Wall-clock seconds spent in each reporter.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SectionTimings {
    pub time_seconds: f64,
    pub station_seconds: f64,
    pub duration_seconds: f64,
    pub user_seconds: f64,
}

/// Every report for one table.
#[derive(Debug, Clone, Serialize)]
pub struct TripAnalysis {
    pub city: City,
    pub trip_count: usize,
    /// `None` when the table is empty.
    pub time: Option<TimeStats>,
    /// `None` when the table is empty.
    pub stations: Option<StationStats>,
    pub durations: DurationStats,
    pub users: UserStats,
    pub timings: SectionTimings,
}

impl TripAnalysis {
    /// `true` when the filters left no trips.
    pub fn is_empty(&self) -> bool {
        self.trip_count == 0
    }
}

/// Run all four reporters over `table`.
pub fn analyze_trips(table: &TripTable) -> TripAnalysis {
    let mut timings = SectionTimings::default();

    let (time, secs) = timed(|| report_time_stats(table));
    timings.time_seconds = secs;

    let (stations, secs) = timed(|| report_station_stats(table));
    timings.station_seconds = secs;

    let (durations, secs) = timed(|| report_duration_stats(table));
    timings.duration_seconds = secs;

    let (users, secs) = timed(|| report_user_stats(table, table.city()));
    timings.user_seconds = secs;

    debug!(
        "Analysed {} {} trips in {:.4}s",
        table.len(),
        table.city(),
        timings.time_seconds
            + timings.station_seconds
            + timings.duration_seconds
            + timings.user_seconds
    );

    TripAnalysis {
        city: table.city(),
        trip_count: table.len(),
        time,
        stations,
        durations,
        users,
        timings,
    }
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, f64) {
    let start = Instant::now();
    let value = f();
    (value, start.elapsed().as_secs_f64())
}
