//! Month / weekday filtering over loaded trip tables.

use bikeshare_core::models::{FilterSpec, TripTable};
use tracing::debug;

/// Return a new table holding the records of `table` that pass `spec`, in
/// their original order. `table` itself is left untouched.
///
/// An empty result is valid output, not an error.
pub fn filter(table: &TripTable, spec: &FilterSpec) -> TripTable {
    if spec.is_unfiltered() {
        return table.clone();
    }

    let records = table
        .iter()
        .filter(|r| spec.matches_month(r))
        .filter(|r| spec.matches_day(r))
        .cloned()
        .collect::<Vec<_>>();

    debug!(
        "filter {}: {} of {} {} trips kept",
        spec,
        records.len(),
        table.len(),
        table.city()
    );

    TripTable::new(table.city(), records)
}
