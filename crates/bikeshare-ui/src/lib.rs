//! Presentation layer for the bikeshare explorer.
//!
//! Turns a computed [`bikeshare_data::analysis::TripAnalysis`] into report
//! text or JSON, and pages of raw trips into aligned text tables. Nothing here
//! reads input or writes to the terminal; callers print the returned strings.

pub mod raw_view;
pub mod report_view;

pub use bikeshare_core as core;
