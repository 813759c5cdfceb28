//! Fixed-size windows over a table's raw rows.

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::{TripRecord, TripTable};

/// Rows per page when the caller does not choose.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Lazy, restartable iterator over consecutive pages of a [`TripTable`].
///
/// Pages come out in original row order; the last one may be short. An empty
/// table yields no pages at all.
#[derive(Debug, Clone)]
pub struct Paginator<'a> {
    rows: &'a [TripRecord],
    page_size: usize,
    cursor: usize,
}

impl<'a> Paginator<'a> {
    /// # Errors
    /// `InvalidInput` when `page_size` is zero.
    pub fn new(table: &'a TripTable, page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(BikeshareError::InvalidInput {
                kind: "page size".to_string(),
                value: "0".to_string(),
                allowed: "any positive number".to_string(),
            });
        }
        Ok(Self {
            rows: table.records(),
            page_size,
            cursor: 0,
        })
    }

    /// Paginator with [`DEFAULT_PAGE_SIZE`].
    pub fn with_default_size(table: &'a TripTable) -> Self {
        Self {
            rows: table.records(),
            page_size: DEFAULT_PAGE_SIZE,
            cursor: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Rows not yet handed out.
    pub fn rows_remaining(&self) -> usize {
        self.rows.len() - self.cursor
    }

    /// Zero-based index of the first row of the next page.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Total number of pages for the whole table.
    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.page_size)
    }

    /// Start again from the first row.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

impl<'a> Iterator for Paginator<'a> {
    type Item = &'a [TripRecord];

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.rows.len() {
            return None;
        }
        let end = (self.cursor + self.page_size).min(self.rows.len());
        let page = &self.rows[self.cursor..end];
        self.cursor = end;
        Some(page)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pages = self.rows_remaining().div_ceil(self.page_size);
        (pages, Some(pages))
    }
}

impl ExactSizeIterator for Paginator<'_> {}

impl std::iter::FusedIterator for Paginator<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{empty, table, trip};
    use bikeshare_core::models::City;

    fn numbered(n: usize) -> TripTable {
        table(
            City::Chicago,
            (0..n)
                .map(|i| trip("2017-01-02 08:00:00", &format!("S{i}"), "End", i as f64))
                .collect(),
        )
    }

    #[test]
    fn test_pages_reconstruct_table() {
        for n in [0, 1, 4, 5, 6, 10, 12, 23] {
            let t = numbered(n);
            let pages: Vec<&[TripRecord]> = Paginator::with_default_size(&t).collect();
            let joined: Vec<TripRecord> = pages.iter().flat_map(|p| p.iter().cloned()).collect();
            assert_eq!(joined, t.records(), "n = {n}");
        }
    }

    #[test]
    fn test_last_page_length() {
        for n in [1, 4, 5, 6, 10, 12, 23] {
            let t = numbered(n);
            let pages: Vec<&[TripRecord]> = Paginator::with_default_size(&t).collect();
            let expected_last = if n % 5 == 0 { 5 } else { n % 5 };
            assert_eq!(pages.last().unwrap().len(), expected_last, "n = {n}");
            assert!(pages.iter().all(|p| p.len() <= DEFAULT_PAGE_SIZE));
            assert_eq!(pages.len(), n.div_ceil(5));
        }
    }

    #[test]
    fn test_empty_table_yields_no_pages() {
        let t = empty(City::Washington);
        let mut pages = Paginator::with_default_size(&t);
        assert_eq!(pages.page_count(), 0);
        assert!(pages.next().is_none());
    }

    #[test]
    fn test_pages_are_lazy_and_resettable() {
        let t = numbered(7);
        let mut pages = Paginator::new(&t, 3).unwrap();
        assert_eq!(pages.len(), 3);

        let first = pages.next().unwrap();
        assert_eq!(first[0].start_station, "S0");
        assert_eq!(pages.rows_remaining(), 4);
        assert_eq!(pages.position(), 3);

        pages.reset();
        assert_eq!(pages.rows_remaining(), 7);
        let again = pages.next().unwrap();
        assert_eq!(again[0].start_station, "S0");
    }

    #[test]
    fn test_exhausted_stays_exhausted() {
        let t = numbered(2);
        let mut pages = Paginator::new(&t, 5).unwrap();
        assert_eq!(pages.next().map(<[TripRecord]>::len), Some(2));
        assert!(pages.next().is_none());
        assert!(pages.next().is_none());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let t = numbered(3);
        let err = Paginator::new(&t, 0).unwrap_err();
        assert!(matches!(err, BikeshareError::InvalidInput { .. }));
    }

    #[test]
    fn test_paging_does_not_touch_table() {
        let t = numbered(6);
        let before = t.clone();
        let _: Vec<_> = Paginator::new(&t, 4).unwrap().collect();
        assert_eq!(t, before);
    }
}
