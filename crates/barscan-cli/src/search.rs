//! `barscan search`: sweep a region, then show, sort, filter, and export.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use barscan_core::AppConfig;
use barscan_kakao::{CategorySweep, KakaoClient, SweepParams};
use barscan_sweep::{
    default_file_name, write_csv, RegionSearch, SearchOutcome, SearchSession, SortField,
};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use crate::region::{describe_region, no_region_hint, RegionArgs};
use crate::render::format_table;

#[derive(Debug, Clone, Args)]
pub(crate) struct SearchArgs {
    #[command(flatten)]
    pub(crate) region: RegionArgs,

    /// Grid cell edge in meters (defaults to BARSCAN_GRID_CELL_SIZE_M).
    #[arg(long, value_name = "METERS")]
    pub(crate) cell_size: Option<f64>,

    /// Search radius per cell in meters (defaults to BARSCAN_SEARCH_RADIUS_M).
    #[arg(long, value_name = "METERS")]
    pub(crate) radius: Option<u32>,

    /// Only show places where any column contains this text (case-insensitive).
    #[arg(long, value_name = "TEXT")]
    pub(crate) filter: Option<String>,

    /// Sort by column; repeating the same column flips the direction.
    #[arg(long = "sort", value_name = "COLUMN")]
    pub(crate) sort: Vec<SortField>,

    /// Export all results as CSV. Without a path, writes
    /// bar_search_results_<date>.csv in the current directory.
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub(crate) csv: Option<Option<PathBuf>>,

    /// Show at most this many table rows.
    #[arg(long, value_name = "N")]
    pub(crate) limit: Option<usize>,

    /// Hide the progress bar.
    #[arg(long)]
    pub(crate) quiet: bool,
}

/// Run a region search from CLI arguments.
///
/// The REST key is checked before the region is tiled, so a missing key
/// fails without any network traffic. Missing regions, empty grids, and empty
/// results are reported as messages, not errors.
///
/// # Errors
///
/// Returns an error for configuration problems, an aborted or cancelled
/// search, or a failed CSV write.
pub(crate) async fn run_search(config: &AppConfig, args: SearchArgs) -> anyhow::Result<()> {
    let api_key = config.require_rest_api_key()?;

    let Some(region) = args.region.to_region() else {
        println!(
            "{}",
            no_region_hint(config.default_center, config.default_level)
        );
        return Ok(());
    };

    let cell_size_m = args.cell_size.unwrap_or(config.grid_cell_size_m);
    if !(cell_size_m.is_finite() && cell_size_m > 0.0) {
        anyhow::bail!("--cell-size must be a positive number of meters");
    }

    let mut session = SearchSession::new();
    let cell_count = session.set_region(region, cell_size_m).len();
    println!("{}", describe_region(&region, cell_count, cell_size_m));

    let mut params = SweepParams::from_config(config);
    if let Some(radius) = args.radius {
        params.radius_m = radius;
    }
    tracing::info!(
        cells = cell_count,
        radius_m = params.radius_m,
        max_pages = params.max_pages,
        category_filter = %params.category_filter,
        "starting region search"
    );

    let client = KakaoClient::with_base_url(
        api_key,
        config.request_timeout_secs,
        &config.user_agent,
        &config.api_base_url,
    )?;
    let sweep = CategorySweep::new(client, params);

    let cancel = Arc::new(AtomicBool::new(false));
    let _watcher = spawn_interrupt_watcher(Arc::clone(&cancel));
    let search = RegionSearch::new(Duration::from_millis(config.cell_delay_ms))
        .with_cancel(Arc::clone(&cancel));

    let bar = progress_bar(cell_count, args.quiet);
    let outcome = session
        .run_search(&search, &sweep, |p| {
            bar.set_position(p.completed as u64);
            bar.set_message(format!("cell {}/{}", p.completed, p.total));
            tracing::trace!(fraction = p.fraction(), "search progress");
        })
        .await;
    bar.finish_and_clear();
    // No cells left to stop; a Ctrl-C from here on exits at once.
    cancel.store(true, Ordering::SeqCst);

    match outcome.context("region search failed")? {
        SearchOutcome::NoCells => {
            println!("The region produced no grid cells. Draw a larger region.");
            return Ok(());
        }
        SearchOutcome::NoResults => {
            println!("No results found. Try another region.");
        }
        SearchOutcome::Found(count) => {
            println!("Search complete: {count} unique places.");
        }
    }

    let results = session.results_mut();
    for field in &args.sort {
        let spec = results.toggle_sort(*field);
        tracing::debug!(field = %spec.field, direction = ?spec.direction, "sort applied");
    }

    if !results.is_empty() {
        let term = args.filter.as_deref().unwrap_or("");
        let view = results.view(term);
        if !term.is_empty() {
            println!("{} of {} places match \"{term}\".", view.len(), results.len());
        }
        print!("{}", format_table(&view, args.limit));
    }

    if let Some(target) = args.csv {
        export_csv(session.results(), target)?;
    }

    Ok(())
}

fn export_csv(results: &barscan_sweep::ResultStore, target: Option<PathBuf>) -> anyhow::Result<()> {
    if results.is_empty() {
        println!("Nothing to export.");
        return Ok(());
    }

    let path = target
        .unwrap_or_else(|| PathBuf::from(default_file_name(chrono::Local::now().date_naive())));
    let file = File::create(&path)
        .with_context(|| format!("failed to create CSV file {}", path.display()))?;
    write_csv(BufWriter::new(file), &results.to_csv_rows())
        .with_context(|| format!("failed to write CSV file {}", path.display()))?;

    println!("Exported {} rows to {}", results.len(), path.display());
    Ok(())
}

fn progress_bar(total: usize, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} cells ({percent}%) {msg}")
        .map_or_else(|_| ProgressStyle::default_bar(), |s| s.progress_chars("#>-"));
    bar.set_style(style);
    bar
}

/// Exit status for a process stopped by SIGINT.
const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Sets `cancel` on the first Ctrl-C; the search stops before its next cell.
/// A second Ctrl-C, or any Ctrl-C once `cancel` is already set, exits
/// immediately.
fn spawn_interrupt_watcher(cancel: Arc<AtomicBool>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        if cancel.swap(true, Ordering::SeqCst) {
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
        tracing::warn!("interrupt received; stopping after the current cell (again to quit)");

        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("second interrupt received; exiting");
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    })
}
