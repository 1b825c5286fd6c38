//! Sequential region search: one cell at a time, merged by place ID.
//!
//! Cells are never searched concurrently. Together with the per-page delay
//! inside each cell sweep and the fixed delay between cells, this keeps at
//! most one request in flight for the whole run.

use std::collections::HashSet;
use std::convert::Infallible;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use barscan_core::{GridCell, PlaceRecord};
use barscan_kakao::CategorySweep;

use crate::error::SweepError;

/// Produces the records for one grid cell.
///
/// Implementations are expected to absorb transient API failures themselves;
/// an `Err` here aborts the whole region search.
pub trait CellSearch {
    type Error: std::error::Error + Send + Sync + 'static;

    fn search_cell(
        &self,
        cell: &GridCell,
    ) -> impl Future<Output = Result<Vec<PlaceRecord>, Self::Error>>;
}

impl CellSearch for CategorySweep {
    type Error = Infallible;

    async fn search_cell(&self, cell: &GridCell) -> Result<Vec<PlaceRecord>, Infallible> {
        Ok(CategorySweep::search_cell(self, cell).await)
    }
}

/// Completed-cell counter reported after every cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// Fraction of cells done, in `0.0..=1.0`. An empty run counts as done.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

/// Identity-keyed accumulator: first record seen for an ID wins, and
/// iteration order is discovery order.
#[derive(Debug, Default)]
pub struct PlaceIndex {
    seen: HashSet<String>,
    records: Vec<PlaceRecord>,
}

impl PlaceIndex {
    /// Inserts `record` unless its ID is already present. Returns `true` if
    /// the record was added.
    pub fn insert(&mut self, record: PlaceRecord) -> bool {
        if self.seen.contains(&record.id) {
            return false;
        }
        self.seen.insert(record.id.clone());
        self.records.push(record);
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn into_records(self) -> Vec<PlaceRecord> {
        self.records
    }
}

/// Pacing policy and cancellation flag for a region search.
#[derive(Debug, Clone, Default)]
pub struct RegionSearch {
    cell_delay: Duration,
    cancel: Option<Arc<AtomicBool>>,
}

impl RegionSearch {
    #[must_use]
    pub fn new(cell_delay: Duration) -> Self {
        Self {
            cell_delay,
            cancel: None,
        }
    }

    /// Checks `flag` before each cell; once it is set the run stops with
    /// [`SweepError::Cancelled`]. An in-flight cell always finishes.
    #[must_use]
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    /// Searches `cells` in order and returns the unique records in discovery
    /// order.
    ///
    /// `on_progress` is called once per completed cell with a monotonically
    /// increasing count that ends at `cells.len()`. The cell delay is applied
    /// between cells, not after the last one.
    ///
    /// # Errors
    ///
    /// - [`SweepError::CellFailed`] if `searcher` returns an error; remaining
    ///   cells are skipped.
    /// - [`SweepError::Cancelled`] if the cancel flag is set between cells.
    pub async fn run<S, P>(
        &self,
        cells: &[GridCell],
        searcher: &S,
        mut on_progress: P,
    ) -> Result<Vec<PlaceRecord>, SweepError>
    where
        S: CellSearch,
        P: FnMut(Progress),
    {
        let total = cells.len();
        let mut index = PlaceIndex::default();

        for (i, cell) in cells.iter().enumerate() {
            if self.is_cancelled() {
                tracing::info!(completed = i, total, "region search cancelled");
                return Err(SweepError::Cancelled {
                    completed: i,
                    total,
                });
            }

            let found = searcher.search_cell(cell).await.map_err(|e| {
                tracing::error!(cell = i, error = %e, "cell search failed; aborting region search");
                SweepError::CellFailed {
                    cell_index: i,
                    source: Box::new(e),
                }
            })?;

            let fetched = found.len();
            let added = found
                .into_iter()
                .filter(|record| !record.id.is_empty())
                .map(|record| index.insert(record))
                .filter(|&inserted| inserted)
                .count();

            tracing::debug!(
                cell = i + 1,
                total,
                fetched,
                added,
                unique = index.len(),
                "cell searched"
            );
            on_progress(Progress {
                completed: i + 1,
                total,
            });

            if i + 1 < total && !self.cell_delay.is_zero() {
                tokio::time::sleep(self.cell_delay).await;
            }
        }

        tracing::info!(cells = total, unique = index.len(), "region search complete");
        Ok(index.into_records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str) -> PlaceRecord {
        PlaceRecord {
            id: id.to_owned(),
            name: name.to_owned(),
            category_path: "음식점 > 술집".to_owned(),
            address_legacy: String::new(),
            address_road: String::new(),
            phone: String::new(),
            longitude: String::new(),
            latitude: String::new(),
            detail_url: String::new(),
            distance_meters: String::new(),
        }
    }

    #[test]
    fn index_keeps_first_seen_record() {
        let mut index = PlaceIndex::default();
        assert!(index.insert(record("1", "first")));
        assert!(!index.insert(record("1", "second")));
        assert_eq!(index.len(), 1);
        assert_eq!(index.into_records()[0].name, "first");
    }

    #[test]
    fn index_preserves_discovery_order() {
        let mut index = PlaceIndex::default();
        index.insert(record("b", "b"));
        index.insert(record("a", "a"));
        index.insert(record("b", "dup"));
        let ids: Vec<String> = index.into_records().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn progress_fraction_reaches_one() {
        let p = Progress {
            completed: 3,
            total: 4,
        };
        assert!((p.fraction() - 0.75).abs() < f64::EPSILON);

        let done = Progress {
            completed: 4,
            total: 4,
        };
        assert!((done.fraction() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_run_counts_as_complete() {
        let p = Progress {
            completed: 0,
            total: 0,
        };
        assert!((p.fraction() - 1.0).abs() < f64::EPSILON);
    }
}
