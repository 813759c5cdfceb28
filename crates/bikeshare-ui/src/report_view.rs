//! Text and JSON rendering of a [`TripAnalysis`].
//!
//! Each renderer builds the complete output before returning it, so a report
//! is printed whole or not at all.

use std::fmt;

use bikeshare_core::error::Result;
use bikeshare_core::formatting::{format_count, format_duration, format_number};
use bikeshare_core::models::{month_name, weekday_name, FilterSpec};
use bikeshare_data::analysis::TripAnalysis;
use bikeshare_data::stats::ValueCount;
use bikeshare_data::user_stats::Demographics;
use unicode_width::UnicodeWidthStr;

/// Horizontal rule printed after every section.
pub const RULE_WIDTH: usize = 40;

const NO_DATA: &str = "No trips match these filters.";

/// Render every section of `analysis` as plain text.
pub fn render_report(analysis: &TripAnalysis, filter: &FilterSpec) -> String {
    ReportView { analysis, filter }.to_string()
}

/// Render `analysis` as pretty-printed JSON, with the filter that produced it.
///
/// # Errors
/// Returns `Json` if serialisation fails.
pub fn render_report_json(analysis: &TripAnalysis, filter: &FilterSpec) -> Result<String> {
    let mut value = serde_json::to_value(analysis)?;
    if let Some(object) = value.as_object_mut() {
        object.insert(
            "filter".to_string(),
            serde_json::json!({
                "month": filter.month.map_or("all", |m| m.name()),
                "day": filter.day.map_or("all", weekday_name),
            }),
        );
    }
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Text report for one analysis, written section by section.
struct ReportView<'a> {
    analysis: &'a TripAnalysis,
    filter: &'a FilterSpec,
}

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Bikeshare data for {} ({}): {} trips",
            self.analysis.city,
            self.filter,
            format_count(self.analysis.trip_count)
        )?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;

        self.time_section(f)?;
        self.station_section(f)?;
        self.duration_section(f)?;
        self.user_section(f)
    }
}

// ── Sections ──────────────────────────────────────────────────────────────────

impl ReportView<'_> {
    fn time_section(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        section_header(f, "The Most Frequent Times of Travel")?;
        match &self.analysis.time {
            Some(time) => {
                let month = month_name(time.most_common_month).unwrap_or("unknown");
                writeln!(f, "Most common month: {} ({})", month, time.most_common_month)?;
                writeln!(
                    f,
                    "Most common day of week: {}",
                    weekday_name(time.most_common_weekday)
                )?;
                writeln!(f, "Most common start hour: {}", time.most_common_hour)?;
            }
            None => writeln!(f, "{NO_DATA}")?,
        }
        section_footer(f, self.analysis.timings.time_seconds)
    }

    fn station_section(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        section_header(f, "The Most Popular Stations and Trip")?;
        match &self.analysis.stations {
            Some(stations) => {
                writeln!(f, "Most common start station: {}", stations.most_common_start)?;
                writeln!(f, "Most common end station: {}", stations.most_common_end)?;
                writeln!(
                    f,
                    "Most common combination of start to end stations: {}",
                    stations.most_common_route
                )?;
            }
            None => writeln!(f, "{NO_DATA}")?,
        }
        section_footer(f, self.analysis.timings.station_seconds)
    }

    fn duration_section(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        section_header(f, "Trip Duration")?;
        let durations = &self.analysis.durations;
        writeln!(
            f,
            "Total travel time: {} seconds ({})",
            format_number(durations.total_duration, 0),
            format_duration(durations.total_duration)
        )?;
        match durations.average_duration {
            Some(avg) => writeln!(
                f,
                "Average travel time: {} seconds ({})",
                format_number(avg as f64, 0),
                format_duration(avg as f64)
            )?,
            None => writeln!(f, "Average travel time: no data")?,
        }
        section_footer(f, self.analysis.timings.duration_seconds)
    }

    fn user_section(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        section_header(f, "User Stats")?;
        let users = &self.analysis.users;

        writeln!(f, "User types count:")?;
        write_counts(f, &users.user_type_counts)?;

        match &users.demographics {
            Demographics::Available {
                gender_counts,
                birth_years,
            } => {
                writeln!(f, "Genders count:")?;
                write_counts(f, gender_counts)?;
                match birth_years {
                    Some(years) => {
                        writeln!(f, "Earliest birth year: {}", years.earliest)?;
                        writeln!(f, "Most recent birth year: {}", years.most_recent)?;
                        writeln!(f, "Most common birth year: {}", years.most_common)?;
                    }
                    None => writeln!(f, "Birth years: no data")?,
                }
            }
            Demographics::NotApplicable => writeln!(
                f,
                "{} data does not include gender or birth year.",
                capitalize(self.analysis.city.display_name())
            )?,
        }
        section_footer(f, self.analysis.timings.user_seconds)
    }
}

fn section_header(f: &mut impl fmt::Write, title: &str) -> fmt::Result {
    writeln!(f, "\nCalculating {title}...\n")
}

fn section_footer(f: &mut impl fmt::Write, seconds: f64) -> fmt::Result {
    writeln!(f, "\nThis took {seconds:.6} seconds.")?;
    writeln!(f, "{}", "-".repeat(RULE_WIDTH))
}

/// Two-column value / count listing, values left-aligned by display width.
fn write_counts(f: &mut impl fmt::Write, counts: &[ValueCount]) -> fmt::Result {
    if counts.is_empty() {
        return writeln!(f, "  (none)");
    }
    let width = counts
        .iter()
        .map(|c| UnicodeWidthStr::width(c.value.as_str()))
        .max()
        .unwrap_or(0);
    for c in counts {
        let pad = width - UnicodeWidthStr::width(c.value.as_str());
        writeln!(f, "  {}{}  {}", c.value, " ".repeat(pad), format_count(c.count))?;
    }
    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
