use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the bikeshare explorer.
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// A source file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV source was malformed (bad quoting, ragged row, bad number).
    #[error("Failed to parse CSV {path}: {message}")]
    CsvParse { path: String, message: String },

    /// A column the city's schema requires is absent from the header row.
    #[error("Missing column \"{column}\" in {path}")]
    MissingColumn { column: String, path: String },

    /// A `Start Time` value did not match any recognised format.
    #[error("Invalid timestamp format at row {row}: {value}")]
    TimestampParse { row: u64, value: String },

    /// A city with no entry in the configured source mapping.
    #[error("Unknown city: {0}")]
    UnknownCity(String),

    /// A user-supplied value is not one of the accepted options.
    #[error("Invalid {kind}: \"{value}\" (expected one of: {allowed})")]
    InvalidInput {
        kind: String,
        value: String,
        allowed: String,
    },

    /// A report could not be serialised to JSON.
    #[error("Failed to serialise JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl BikeshareError {
    /// Build a [`BikeshareError::InvalidInput`] listing the accepted options.
    pub fn invalid_input(kind: &str, value: &str, allowed: &[&str]) -> Self {
        Self::InvalidInput {
            kind: kind.to_string(),
            value: value.to_string(),
            allowed: allowed.join(", "),
        }
    }
}

/// Convenience alias used throughout the bikeshare crates.
pub type Result<T> = std::result::Result<T, BikeshareError>;
