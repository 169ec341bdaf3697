use crate::core::interface::{Interface, TerminalInterface};
use crate::core::split::{split_directory, SplitOptions, SplitSummary};
use crate::error::Result;
use std::path::PathBuf;

pub fn split_dirs(dirs: &[PathBuf], options: &SplitOptions) -> Result<Vec<SplitSummary>> {
    let ui = TerminalInterface::default();
    let mut summaries = Vec::new();

    for dir in dirs {
        if let Some(summary) = split_directory(dir, options, &ui)? {
            summaries.push(summary);
        }
    }

    if options.dry_run {
        ui.info("Dry run: no files were changed.");
    }

    Ok(summaries)
}
