pub mod error;
pub mod export;
pub mod orchestrator;
pub mod session;
pub mod store;

pub use error::SweepError;
pub use export::{csv_rows, default_file_name, render_csv, write_csv, CSV_HEADERS};
pub use orchestrator::{CellSearch, PlaceIndex, Progress, RegionSearch};
pub use session::{SearchOutcome, SearchSession};
pub use store::{
    matches_term, sort_records, ParseSortFieldError, ResultStore, SortDirection, SortField,
    SortSpec,
};
