//! CSV loading for the bikeshare explorer.
//!
//! Reads one city's trip export, parses `Start Time`, derives the month,
//! weekday and start hour of every trip, and applies the requested
//! [`FilterSpec`] before handing back a [`TripTable`].

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::{City, FilterSpec, TripRecord, TripTable};
use bikeshare_core::time_utils::parse_trip_timestamp;
use chrono::{Datelike, Timelike};
use serde::Deserialize;
use tracing::{debug, info};

// ── Schema ────────────────────────────────────────────────────────────────────

/// Columns every city's export must carry.
pub const BASE_COLUMNS: &[&str] = &[
    "Start Time",
    "End Time",
    "Start Station",
    "End Station",
    "Trip Duration",
    "User Type",
];

/// Columns carried only by cities with demographics.
pub const DEMOGRAPHIC_COLUMNS: &[&str] = &["Gender", "Birth Year"];

/// Header names `city`'s export must contain.
pub fn required_columns(city: City) -> Vec<&'static str> {
    let mut columns = BASE_COLUMNS.to_vec();
    if city.has_demographics() {
        columns.extend_from_slice(DEMOGRAPHIC_COLUMNS);
    }
    columns
}

/// One CSV row as written in the export. Unknown columns (such as the unnamed
/// leading index column) are ignored.
#[derive(Debug, Deserialize)]
struct RawTripRow {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    /// Written as a float (`1992.0`) in the exports.
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

// ── CitySources ───────────────────────────────────────────────────────────────

/// Mapping from each city to the CSV file holding its trips.
#[derive(Debug, Clone, Default)]
pub struct CitySources {
    files: HashMap<City, PathBuf>,
}

impl CitySources {
    /// The standard layout: `chicago.csv`, `new_york_city.csv` and
    /// `washington.csv` inside `data_dir`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        let files = City::ALL
            .into_iter()
            .map(|city| (city, dir.join(Self::standard_file_name(city))))
            .collect();
        Self { files }
    }

    /// A mapping with no cities at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Point `city` at `path`, replacing any existing entry.
    pub fn with_file(mut self, city: City, path: impl Into<PathBuf>) -> Self {
        self.files.insert(city, path.into());
        self
    }

    /// File name used for `city` in the standard layout.
    pub fn standard_file_name(city: City) -> &'static str {
        match city {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    /// Resolve `city` to its source file.
    pub fn path_for(&self, city: City) -> Result<&Path> {
        self.files
            .get(&city)
            .map(PathBuf::as_path)
            .ok_or_else(|| BikeshareError::UnknownCity(city.display_name().to_string()))
    }
}

// ── TripLoader ────────────────────────────────────────────────────────────────

/// Loads trip tables from the files named by a [`CitySources`] mapping.
#[derive(Debug, Clone)]
pub struct TripLoader {
    sources: CitySources,
}

impl TripLoader {
    pub fn new(sources: CitySources) -> Self {
        Self { sources }
    }

    /// Read `city`'s source file and return the trips passing `filter`.
    ///
    /// # Errors
    /// `UnknownCity` when the mapping has no entry for `city`, `FileRead`
    /// when the file cannot be opened, and any error from
    /// [`load_from_reader`].
    pub fn load(&self, city: City, filter: &FilterSpec) -> Result<TripTable> {
        let path = self.sources.path_for(city)?;
        info!("Loading {} trips from {}", city, path.display());

        let file = File::open(path).map_err(|source| BikeshareError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        load_from_reader(
            city,
            BufReader::new(file),
            &path.display().to_string(),
            filter,
        )
    }
}

/// Parse a trip export from any reader and return the trips passing `filter`.
///
/// `source_name` only appears in error messages and logs.
///
/// # Errors
/// `MissingColumn` when the header lacks a column `city` requires,
/// `CsvParse` for malformed rows, and `TimestampParse` for an unreadable
/// `Start Time`. None of these skip the row: the whole load fails.
pub fn load_from_reader<R: Read>(
    city: City,
    reader: R,
    source_name: &str,
    filter: &FilterSpec,
) -> Result<TripTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| csv_error(source_name, &e))?
        .clone();
    check_columns(city, &headers, source_name)?;

    let mut records: Vec<TripRecord> = Vec::new();
    for (idx, result) in rdr.deserialize::<RawTripRow>().enumerate() {
        let raw = result.map_err(|e| csv_error(source_name, &e))?;
        records.push(into_record(city, raw, idx as u64 + 1)?);
    }
    let rows_read = records.len();

    let table = TripTable::new(city, records).retain_matching(filter);

    debug!(
        "{}: {} rows read, {} kept ({})",
        source_name,
        rows_read,
        table.len(),
        filter
    );

    Ok(table)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn check_columns(city: City, headers: &csv::StringRecord, source_name: &str) -> Result<()> {
    for column in required_columns(city) {
        if !headers.iter().any(|h| h == column) {
            return Err(BikeshareError::MissingColumn {
                column: column.to_string(),
                path: source_name.to_string(),
            });
        }
    }
    Ok(())
}

fn csv_error(source_name: &str, err: &csv::Error) -> BikeshareError {
    BikeshareError::CsvParse {
        path: source_name.to_string(),
        message: err.to_string(),
    }
}

/// Convert a raw row into a [`TripRecord`] with its derived time fields.
///
/// `row` is the 1-based data row number, used in error messages.
fn into_record(city: City, raw: RawTripRow, row: u64) -> Result<TripRecord> {
    let start_time =
        parse_trip_timestamp(&raw.start_time).ok_or_else(|| BikeshareError::TimestampParse {
            row,
            value: raw.start_time.clone(),
        })?;

    let (gender, birth_year) = if city.has_demographics() {
        (
            non_blank(raw.gender),
            raw.birth_year.map(|y| y.round() as i32),
        )
    } else {
        (None, None)
    };

    Ok(TripRecord {
        start_time,
        end_time: raw.end_time,
        start_station: raw.start_station,
        end_station: raw.end_station,
        trip_duration: raw.trip_duration,
        user_type: non_blank(raw.user_type),
        gender,
        birth_year,
        month: start_time.month(),
        day_of_week: start_time.weekday(),
        start_hour: start_time.hour(),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Month, Weekday};
    use std::io::Write;
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    const CHICAGO_HEADER: &str =
        ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year";
    const WASHINGTON_HEADER: &str =
        ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type";

    fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    fn chicago_rows() -> Vec<&'static str> {
        vec![
            CHICAGO_HEADER,
            // 2017-01-02 is a Monday.
            "1,2017-01-02 09:07:57,2017-01-02 09:20:53,776,Canal St & Adams St,Clinton St & Madison St,Subscriber,Male,1992.0",
            "2,2017-03-07 17:15:00,2017-03-07 17:30:00,900,Clark St & Elm St,Canal St & Adams St,Customer,,",
            "3,2017-01-09 09:00:00,2017-01-09 09:10:00,600.5,Canal St & Adams St,Clark St & Elm St,Subscriber,Female,1985.0",
        ]
    }

    fn load_str(city: City, csv: &str, filter: &FilterSpec) -> Result<TripTable> {
        load_from_reader(city, csv.as_bytes(), "inline.csv", filter)
    }

    // ── CitySources ───────────────────────────────────────────────────────────

    #[test]
    fn test_city_sources_standard_mapping() {
        let sources = CitySources::new("/data");
        assert_eq!(
            sources.path_for(City::Chicago).unwrap(),
            Path::new("/data/chicago.csv")
        );
        assert_eq!(
            sources.path_for(City::NewYorkCity).unwrap(),
            Path::new("/data/new_york_city.csv")
        );
        assert_eq!(
            sources.path_for(City::Washington).unwrap(),
            Path::new("/data/washington.csv")
        );
    }

    #[test]
    fn test_city_sources_override_and_missing() {
        let sources = CitySources::empty().with_file(City::Chicago, "/tmp/sample.csv");
        assert_eq!(
            sources.path_for(City::Chicago).unwrap(),
            Path::new("/tmp/sample.csv")
        );
        let err = sources.path_for(City::Washington).unwrap_err();
        assert!(matches!(err, BikeshareError::UnknownCity(ref c) if c == "washington"));
    }

    // ── load_from_reader ──────────────────────────────────────────────────────

    #[test]
    fn test_load_derives_time_fields() {
        let csv = chicago_rows().join("\n");
        let table = load_str(City::Chicago, &csv, &FilterSpec::all()).unwrap();

        assert_eq!(table.len(), 3);
        let first = &table.records()[0];
        assert_eq!(first.month, 1);
        assert_eq!(first.day_of_week, Weekday::Mon);
        assert_eq!(first.start_hour, 9);
        assert_eq!(first.start_station, "Canal St & Adams St");
        assert_eq!(first.trip_duration, 776.0);
        assert_eq!(first.gender.as_deref(), Some("Male"));
        assert_eq!(first.birth_year, Some(1992));
        assert_eq!(first.end_time, "2017-01-02 09:20:53");
    }

    #[test]
    fn test_load_missing_demographics_are_none() {
        let csv = chicago_rows().join("\n");
        let table = load_str(City::Chicago, &csv, &FilterSpec::all()).unwrap();
        let second = &table.records()[1];
        assert!(second.gender.is_none());
        assert!(second.birth_year.is_none());
        assert_eq!(table.records()[2].trip_duration, 600.5);
    }

    #[test]
    fn test_load_applies_filter() {
        let csv = chicago_rows().join("\n");
        let spec = FilterSpec::new(Some(Month::January), Some(Weekday::Mon));
        let table = load_str(City::Chicago, &csv, &spec).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.iter().all(|r| r.month == 1));
    }

    #[test]
    fn test_load_later_month_yields_empty_table() {
        let csv = chicago_rows().join("\n");
        let spec = FilterSpec::new(Some(Month::September), None);
        let table = load_str(City::Chicago, &csv, &spec).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.city(), City::Chicago);
    }

    #[test]
    fn test_load_washington_without_demographic_columns() {
        let csv = [
            WASHINGTON_HEADER,
            "0,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber",
        ]
        .join("\n");
        let table = load_str(City::Washington, &csv, &FilterSpec::all()).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.records()[0].gender.is_none());
        assert!(table.records()[0].birth_year.is_none());
    }

    #[test]
    fn test_load_washington_ignores_stray_demographics() {
        let csv = chicago_rows().join("\n");
        let table = load_str(City::Washington, &csv, &FilterSpec::all()).unwrap();
        assert!(table.iter().all(|r| r.gender.is_none() && r.birth_year.is_none()));
    }

    #[test]
    fn test_load_missing_required_column() {
        let csv = [
            WASHINGTON_HEADER,
            "0,2017-06-21 08:36:34,2017-06-21 08:44:43,489,A,B,Subscriber",
        ]
        .join("\n");
        let err = load_str(City::Chicago, &csv, &FilterSpec::all()).unwrap_err();
        match err {
            BikeshareError::MissingColumn { column, .. } => assert_eq!(column, "Gender"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_bad_timestamp_is_fatal() {
        let csv = [
            WASHINGTON_HEADER,
            "0,2017-06-21 08:36:34,2017-06-21 08:44:43,489,A,B,Subscriber",
            "1,sometime in june,2017-06-21 08:44:43,489,A,B,Subscriber",
        ]
        .join("\n");
        let err = load_str(City::Washington, &csv, &FilterSpec::all()).unwrap_err();
        match err {
            BikeshareError::TimestampParse { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "sometime in june");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_bad_duration_is_csv_error() {
        let csv = [
            WASHINGTON_HEADER,
            "0,2017-06-21 08:36:34,2017-06-21 08:44:43,long,A,B,Subscriber",
        ]
        .join("\n");
        let err = load_str(City::Washington, &csv, &FilterSpec::all()).unwrap_err();
        assert!(matches!(err, BikeshareError::CsvParse { .. }), "{err}");
    }

    #[test]
    fn test_load_header_only_is_empty() {
        let table = load_str(City::Washington, WASHINGTON_HEADER, &FilterSpec::all()).unwrap();
        assert!(table.is_empty());
    }

    // ── TripLoader ────────────────────────────────────────────────────────────

    #[test]
    fn test_trip_loader_reads_file() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "chicago.csv", &chicago_rows());

        let loader = TripLoader::new(CitySources::new(dir.path()));
        let table = loader.load(City::Chicago, &FilterSpec::all()).unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_trip_loader_missing_file() {
        let dir = TempDir::new().unwrap();
        let loader = TripLoader::new(CitySources::new(dir.path()));

        let err = loader
            .load(City::NewYorkCity, &FilterSpec::all())
            .unwrap_err();
        match err {
            BikeshareError::FileRead { path, .. } => {
                assert!(path.ends_with("new_york_city.csv"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_trip_loader_unknown_city() {
        let loader = TripLoader::new(CitySources::empty());
        let err = loader.load(City::Chicago, &FilterSpec::all()).unwrap_err();
        assert!(matches!(err, BikeshareError::UnknownCity(_)));
    }

    #[test]
    fn test_trip_loader_uses_injected_mapping() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "synthetic.csv", &chicago_rows());

        let loader = TripLoader::new(CitySources::empty().with_file(City::Chicago, path));
        let table = loader
            .load(City::Chicago, &FilterSpec::new(Some(Month::March), None))
            .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].user_type.as_deref(), Some("Customer"));
    }

    #[test]
    fn test_required_columns() {
        assert_eq!(required_columns(City::Washington).len(), 6);
        let chicago = required_columns(City::NewYorkCity);
        assert!(chicago.contains(&"Gender"));
        assert!(chicago.contains(&"Birth Year"));
    }
}
