//! Shared domain layer for the bikeshare explorer.
//!
//! Holds the trip data model, the error type, input validation, timestamp
//! parsing, command-line settings and number/duration formatting used by the
//! data, UI and binary crates.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;
pub mod validation;

pub use error::{BikeshareError, Result};
pub use models::{City, FilterSpec, TripRecord, TripTable};
