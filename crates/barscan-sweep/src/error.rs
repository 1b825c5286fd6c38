use thiserror::Error;

/// Terminal failures of a region search.
///
/// Per-page API failures never show up here; the cell sweep absorbs them.
#[derive(Debug, Error)]
pub enum SweepError {
    /// A cell search returned an error. Remaining cells were not searched.
    #[error("search failed at cell {cell_index}: {source}")]
    CellFailed {
        cell_index: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The run was cancelled between cells.
    #[error("search cancelled after {completed} of {total} cells")]
    Cancelled { completed: usize, total: usize },
}
