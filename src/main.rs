use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use graindata::commands;
use graindata::core::acquire::Outcome;
use graindata::core::config::{Config, ConfigOverrides, DATA_DIR_ENV};
use graindata::core::interface::{Interface, TerminalInterface};
use graindata::error::GrainError;

#[derive(Parser)]
#[clap(name = "graindata")]
#[clap(about = "Download and extract the Grain dataset archive")]
#[clap(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// URL of the dataset archive; without it an existing local archive is reused
    source: Option<String>,
    /// Working directory for the archive and the extracted data (default: ./data)
    #[clap(long, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,
    /// Configuration file (default: ./graindata.toml when present)
    #[clap(long)]
    config: Option<PathBuf>,
    /// File name of the archive inside the working directory
    #[clap(long)]
    archive_name: Option<String>,
    /// Name of the extraction directory inside the working directory
    #[clap(long)]
    extract_dir: Option<String>,
    /// Extension of the dataset sample files to count (default: npz)
    #[clap(long)]
    extension: Option<String>,
    /// Answer yes to every confirmation prompt
    #[clap(short, long)]
    yes: bool,
}

fn load_config(cli: &Cli) -> graindata::error::Result<Config> {
    Config::load(cli.config.as_deref())?.with_overrides(ConfigOverrides {
        data_dir: cli.data_dir.clone(),
        archive_name: cli.archive_name.clone(),
        extract_dir_name: cli.extract_dir.clone(),
        data_extension: cli.extension.clone(),
    })
}

fn run(cli: &Cli) -> std::result::Result<Outcome, GrainError> {
    let config = load_config(cli)?;
    commands::fetch::fetch_dataset(&config, cli.source.as_deref(), cli.yes)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match run(&cli) {
        // a declined overwrite is a clean exit
        Ok(_) => Ok(()),
        Err(e) => {
            TerminalInterface::default().error(&format!("{}: {e}", e.category()));
            std::process::exit(1);
        }
    }
}
