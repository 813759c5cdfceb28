use clap::Parser;
use std::path::PathBuf;

use crate::error::Result;
use crate::models::City;
use crate::validation::{validate, DayChoice, MonthChoice};

/// Filters given on the command line. `None` fields are asked for interactively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PresetFilters {
    pub city: Option<City>,
    pub month: Option<MonthChoice>,
    pub day: Option<DayChoice>,
}

impl PresetFilters {
    /// `true` when every filter was supplied, so no prompt is needed.
    pub fn is_complete(&self) -> bool {
        self.city.is_some() && self.month.is_some() && self.day.is_some()
    }
}

/// Explore US bikeshare trip data
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bikeshare",
    about = "Explore US bikeshare trip data",
    version
)]
pub struct Settings {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,

    /// City to analyse (prompted for when omitted)
    #[arg(long, value_parser = ["chicago", "new york city", "washington"], ignore_case = true)]
    pub city: Option<String>,

    /// Month filter (prompted for when omitted)
    #[arg(long, value_parser = ["all", "january", "february", "march", "april", "may", "june"], ignore_case = true)]
    pub month: Option<String>,

    /// Day-of-week filter (prompted for when omitted)
    #[arg(long, value_parser = ["all", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday"], ignore_case = true)]
    pub day: Option<String>,

    /// Raw rows shown per page (1-100)
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u32).range(1..=100))]
    pub page_size: u32,

    /// Report output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Run a single analysis without offering a restart
    #[arg(long)]
    pub once: bool,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::resolve(Self::parse())
    }

    /// Same as [`Settings::load`] over an explicit argument list.
    pub fn load_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Self::parse_from(args))
    }

    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Validate the optional `--city/--month/--day` values into typed filters.
    pub fn preset_filters(&self) -> Result<PresetFilters> {
        Ok(PresetFilters {
            city: self.city.as_deref().map(validate::<City>).transpose()?,
            month: self.month.as_deref().map(validate::<MonthChoice>).transpose()?,
            day: self.day.as_deref().map(validate::<DayChoice>).transpose()?,
        })
    }

    /// `true` when `--format json` was requested.
    pub fn wants_json(&self) -> bool {
        self.format == "json"
    }
}
