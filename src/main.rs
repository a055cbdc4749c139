use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gridcut::{encode_regions, Partition, PartitionMode, ScanOrder};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Rows,
    Columns,
    Grid,
}

#[derive(Parser, Debug)]
#[command(about = "Cut an image into regions and write them as PNG files")]
struct Args {
    /// Image to partition
    input: PathBuf,

    /// Directory the region files are written to
    #[arg(short, long, default_value = "regions")]
    out_dir: PathBuf,

    #[arg(long, value_enum, default_value = "grid")]
    mode: Mode,

    /// Slice count for the rows/columns modes
    #[arg(long, default_value_t = 3)]
    count: u32,

    /// Nominal slice size in pixels: row height, column width, or block width
    #[arg(long, default_value_t = 200.0)]
    size: f64,

    /// Block height for grid mode; defaults to --size
    #[arg(long)]
    block_height: Option<f64>,

    /// Emit regions column by column instead of row by row
    #[arg(long)]
    column_major: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let image = image::open(&args.input)
        .with_context(|| format!("failed to open {}", args.input.display()))?;

    let mode = match args.mode {
        Mode::Rows => PartitionMode::Rows {
            count: args.count,
            row_height: args.size,
        },
        Mode::Columns => PartitionMode::Columns {
            count: args.count,
            col_width: args.size,
        },
        Mode::Grid => PartitionMode::Grid {
            block_width: args.size,
            block_height: args.block_height.unwrap_or(args.size),
        },
    };
    let partition = Partition::derive(mode, image.width(), image.height())?;
    let order = if args.column_major {
        ScanOrder::ColumnMajor
    } else {
        ScanOrder::RowMajor
    };
    let rectangles = partition.rectangles_in(order);

    let regions = encode_regions(&image, &rectangles, true)?;
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create {}", args.out_dir.display()))?;
    for region in &regions {
        fs::write(args.out_dir.join(&region.file_name), &region.png)
            .with_context(|| format!("failed to write {}", region.file_name))?;
    }

    let summary = partition.summary();
    println!(
        "wrote {} regions ({} columns x {} rows) to {}",
        regions.len(),
        summary.columns,
        summary.rows,
        args.out_dir.display()
    );
    Ok(())
}
