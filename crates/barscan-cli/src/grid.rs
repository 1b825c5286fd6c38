//! `barscan grid`: preview how a region will be tiled. Makes no API calls.

use barscan_core::{tile, AppConfig};
use clap::Args;

use crate::region::{describe_region, no_region_hint, RegionArgs};

#[derive(Debug, Clone, Args)]
pub(crate) struct GridArgs {
    #[command(flatten)]
    pub(crate) region: RegionArgs,

    /// Grid cell edge in meters (defaults to BARSCAN_GRID_CELL_SIZE_M).
    #[arg(long, value_name = "METERS")]
    pub(crate) cell_size: Option<f64>,

    /// Print every cell's center and bounds.
    #[arg(long)]
    pub(crate) list: bool,
}

pub(crate) fn run_grid(config: &AppConfig, args: &GridArgs) -> anyhow::Result<()> {
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

    let cells = tile(&region, cell_size_m);
    println!("{}", describe_region(&region, cells.len(), cell_size_m));

    if args.list {
        for (i, cell) in cells.iter().enumerate() {
            println!(
                "{:>6}  center {}  sw {}  ne {}",
                i + 1,
                cell.center,
                cell.bounds.southwest,
                cell.bounds.northeast
            );
        }
    }

    Ok(())
}
