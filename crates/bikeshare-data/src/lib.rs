//! Data layer for the bikeshare explorer.
//!
//! Loads a city's trip export, filters it by month and weekday, computes the
//! time, station, duration and user reports, and pages through raw rows.

pub mod analysis;
pub mod duration_stats;
pub mod filter;
pub mod loader;
pub mod paginator;
pub mod station_stats;
pub mod stats;
pub mod time_stats;
pub mod user_stats;

#[cfg(test)]
mod testing;

pub use bikeshare_core as core;
