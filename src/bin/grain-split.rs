//! Standalone `grain-split` CLI
//!
//! Sorts Grain `.npz` files into per-year directories using the acquisition
//! date in their file names:
//!   grain-split --dirs data/Grain-Data                      → data/Grain-Data/2020, ...
//!   grain-split --dirs data/Grain-Data --out-strategy sibling → data/Grain-Data-2020, ...

use anyhow::Result;
use clap::Parser;
use std::collections::BTreeSet;
use std::path::PathBuf;

use graindata::commands;
use graindata::core::interface::{Interface, TerminalInterface};
use graindata::core::split::{parse_year, OutStrategy, SplitMode, SplitOptions};

#[derive(Parser)]
#[clap(name = "grain-split")]
#[clap(about = "Split Grain dataset files by year based on filename date tags")]
#[clap(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Source directories containing .npz files (e.g. data/Grain-Data-RGB data/Grain-Data)
    #[clap(long, required = true, num_args = 1..)]
    dirs: Vec<PathBuf>,
    /// Where to place outputs: inplace creates <dir>/<year>, sibling creates <dir>-<year>
    #[clap(long, value_enum, default_value = "inplace")]
    out_strategy: OutStrategy,
    /// How to materialize split files (symlink is non-destructive)
    #[clap(long, value_enum, default_value = "symlink")]
    mode: SplitMode,
    /// Restrict to specific years (default: detect from file names)
    #[clap(long, num_args = 1.., value_parser = parse_year_arg)]
    years: Vec<String>,
    /// Extension of the dataset sample files (default: npz)
    #[clap(long, default_value = "npz")]
    extension: String,
    /// Print actions without making changes
    #[clap(long)]
    dry_run: bool,
}

fn parse_year_arg(value: &str) -> std::result::Result<String, String> {
    parse_year(value).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let years: BTreeSet<String> = cli.years.into_iter().collect();
    let options = SplitOptions {
        strategy: cli.out_strategy,
        mode: cli.mode,
        years: (!years.is_empty()).then_some(years),
        dry_run: cli.dry_run,
        extension: cli.extension.trim_start_matches('.').to_string(),
    };

    if let Err(e) = commands::split::split_dirs(&cli.dirs, &options) {
        TerminalInterface::default().error(&format!("{}: {e}", e.category()));
        std::process::exit(1);
    }

    Ok(())
}
