//! The single active search: region, its grid, and the last results.

use barscan_core::{tile, BoundingRegion, GridCell};

use crate::error::SweepError;
use crate::orchestrator::{CellSearch, Progress, RegionSearch};
use crate::store::ResultStore;

/// Non-error outcomes of [`SearchSession::run_search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// No region has been set, or it produced zero cells.
    NoCells,
    /// Every cell was searched and nothing matched.
    NoResults,
    /// Number of unique places found.
    Found(usize),
}

#[derive(Debug, Default)]
pub struct SearchSession {
    region: Option<BoundingRegion>,
    cells: Vec<GridCell>,
    results: ResultStore,
}

impl SearchSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the region, re-tiles it, and drops previous results and sort.
    pub fn set_region(&mut self, region: BoundingRegion, cell_size_m: f64) -> &[GridCell] {
        self.cells = tile(&region, cell_size_m);
        self.region = Some(region);
        self.results = ResultStore::default();
        &self.cells
    }

    /// Forgets the region, its cells, and any results.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn region(&self) -> Option<&BoundingRegion> {
        self.region.as_ref()
    }

    #[must_use]
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    #[must_use]
    pub fn results(&self) -> &ResultStore {
        &self.results
    }

    pub fn results_mut(&mut self) -> &mut ResultStore {
        &mut self.results
    }

    /// Drops previous results and sort ahead of a new run; the cells are kept.
    pub fn begin_search(&mut self) {
        self.results = ResultStore::default();
    }

    /// Runs a region search over the current cells.
    ///
    /// Previous results are discarded before the first request; the cells are
    /// kept. On error the session is left with no results.
    ///
    /// # Errors
    ///
    /// Propagates [`SweepError`] from [`RegionSearch::run`].
    pub async fn run_search<S, P>(
        &mut self,
        search: &RegionSearch,
        searcher: &S,
        on_progress: P,
    ) -> Result<SearchOutcome, SweepError>
    where
        S: CellSearch,
        P: FnMut(Progress),
    {
        self.begin_search();
        if self.cells.is_empty() {
            return Ok(SearchOutcome::NoCells);
        }

        let records = search.run(&self.cells, searcher, on_progress).await?;
        let found = records.len();
        self.results = ResultStore::new(records);

        Ok(if found == 0 {
            SearchOutcome::NoResults
        } else {
            SearchOutcome::Found(found)
        })
    }
}
