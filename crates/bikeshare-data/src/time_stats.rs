//! Most frequent times of travel.

use bikeshare_core::models::{serialize_weekday, TripTable, WEEKDAYS};
use chrono::Weekday;
use serde::Serialize;

use crate::stats::mode;

/// Modes of the derived time columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeStats {
    /// 1-based month number.
    pub most_common_month: u32,
    #[serde(serialize_with = "serialize_weekday")]
    pub most_common_weekday: Weekday,
    /// Hour of day, 0–23.
    pub most_common_hour: u32,
}

/// Most common month, weekday and start hour of `table`.
///
/// Returns `None` when the table has no rows. Ties go to the earliest month,
/// the earliest weekday (Monday first) and the earliest hour.
pub fn report_time_stats(table: &TripTable) -> Option<TimeStats> {
    let most_common_month = mode(table.iter().map(|r| r.month))?;
    let weekday_index = mode(table.iter().map(|r| r.day_of_week.num_days_from_monday()))?;
    let most_common_weekday = WEEKDAYS.get(weekday_index as usize).copied()?;
    let most_common_hour = mode(table.iter().map(|r| r.start_hour))?;

    Some(TimeStats {
        most_common_month,
        most_common_weekday,
        most_common_hour,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{empty, table, trip_at};
    use bikeshare_core::models::City;

    #[test]
    fn test_time_stats_modes() {
        let t = table(
            City::Chicago,
            vec![
                trip_at("2017-01-02 08:00:00"), // Mon
                trip_at("2017-01-03 08:30:00"), // Tue
                trip_at("2017-01-09 17:00:00"), // Mon
                trip_at("2017-03-06 08:10:00"), // Mon
            ],
        );
        let stats = report_time_stats(&t).unwrap();
        assert_eq!(stats.most_common_month, 1);
        assert_eq!(stats.most_common_weekday, Weekday::Mon);
        assert_eq!(stats.most_common_hour, 8);
    }

    #[test]
    fn test_time_stats_empty_is_none() {
        assert!(report_time_stats(&empty(City::Washington)).is_none());
    }

    #[test]
    fn test_time_stats_ties_resolve_to_earliest() {
        let t = table(
            City::Chicago,
            vec![
                trip_at("2017-05-07 23:00:00"), // Sun
                trip_at("2017-02-08 04:00:00"), // Wed
            ],
        );
        let stats = report_time_stats(&t).unwrap();
        assert_eq!(stats.most_common_month, 2);
        assert_eq!(stats.most_common_weekday, Weekday::Wed);
        assert_eq!(stats.most_common_hour, 4);
    }

    #[test]
    fn test_time_stats_serializes_weekday_name() {
        let t = table(City::Chicago, vec![trip_at("2017-01-06 12:00:00")]);
        let json = serde_json::to_value(report_time_stats(&t).unwrap()).unwrap();
        assert_eq!(json["most_common_weekday"], "Friday");
        assert_eq!(json["most_common_month"], 1);
        assert_eq!(json["most_common_hour"], 12);
    }
}
