//! Raw trip rows as a plain-text table.
//!
//! One page from the paginator becomes a header line, a separator and one
//! line per trip. Columns are padded by display width so station names with
//! wide characters still line up.

use bikeshare_core::formatting;
use bikeshare_core::models::{City, TripRecord};
use unicode_width::UnicodeWidthStr;

/// Columns shown for every city.
const BASE_HEADERS: [&str; 7] = [
    "#",
    "Start Time",
    "End Time",
    "Trip Duration",
    "Start Station",
    "End Station",
    "User Type",
];

/// Extra columns for cities that record demographics.
const DEMOGRAPHIC_HEADERS: [&str; 2] = ["Gender", "Birth Year"];

const COLUMN_GAP: &str = "  ";

/// Header labels for `city`.
pub fn headers(city: City) -> Vec<&'static str> {
    let mut headers = BASE_HEADERS.to_vec();
    if city.has_demographics() {
        headers.extend(DEMOGRAPHIC_HEADERS);
    }
    headers
}

/// Cell text for one trip. `index` is the zero-based row position in the
/// filtered table and is shown one-based.
pub fn row_cells(record: &TripRecord, index: usize, city: City) -> Vec<String> {
    let mut cells = vec![
        (index + 1).to_string(),
        record.start_time.format("%Y-%m-%d %H:%M:%S").to_string(),
        record.end_time.clone(),
        formatting::format_number(record.trip_duration, decimals_for(record.trip_duration)),
        record.start_station.clone(),
        record.end_station.clone(),
        record.user_type.clone().unwrap_or_default(),
    ];
    if city.has_demographics() {
        cells.push(record.gender.clone().unwrap_or_default());
        cells.push(record.birth_year.map(|y| y.to_string()).unwrap_or_default());
    }
    cells
}

/// Render `page` as an aligned table. `first_index` is the position of the
/// page's first row in the filtered table.
pub fn render_raw_page(page: &[TripRecord], first_index: usize, city: City) -> String {
    let headers = headers(city);
    let rows: Vec<Vec<String>> = page
        .iter()
        .enumerate()
        .map(|(i, record)| row_cells(record, first_index + i, city))
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let mut out = String::new();
    push_line(&mut out, headers.iter().copied(), &widths);
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, separator.iter().map(String::as_str), &widths);
    for row in &rows {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.zip(widths).enumerate() {
        if i > 0 {
            line.push_str(COLUMN_GAP);
        }
        line.push_str(cell);
        line.push_str(&" ".repeat(width.saturating_sub(cell.width())));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Whole-second durations print without a fractional part.
fn decimals_for(value: f64) -> u32 {
    if value.fract() == 0.0 {
        0
    } else {
        3
    }
}
