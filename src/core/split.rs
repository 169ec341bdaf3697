use crate::core::interface::Interface;
use crate::core::stats::{has_extension, year_tag};
use crate::error::{GrainError, Result};
use crate::utils::fs;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Where the per-year directories are created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutStrategy {
    /// `<dir>/<year>`
    #[default]
    Inplace,
    /// `<dir>-<year>`
    Sibling,
}

/// How a file is materialized in its year directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SplitMode {
    #[default]
    Symlink,
    Copy,
    Move,
}

impl std::fmt::Display for SplitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SplitMode::Symlink => "symlink",
            SplitMode::Copy => "copy",
            SplitMode::Move => "move",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SplitOptions {
    pub strategy: OutStrategy,
    pub mode: SplitMode,
    /// Restrict to these years; `None` uses every year found in file names
    pub years: Option<BTreeSet<String>>,
    pub dry_run: bool,
    pub extension: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitSummary {
    pub total: usize,
    pub matched: usize,
    pub years: Vec<String>,
}

pub fn parse_year(value: &str) -> Result<String> {
    let valid =
        value.len() == 4 && value.starts_with("20") && value.bytes().all(|b| b.is_ascii_digit());
    if valid {
        Ok(value.to_string())
    } else {
        Err(GrainError::InvalidYear {
            year: value.to_string(),
        })
    }
}

pub fn year_dir(src_dir: &Path, year: &str, strategy: OutStrategy) -> PathBuf {
    match strategy {
        OutStrategy::Inplace => src_dir.join(year),
        OutStrategy::Sibling => {
            let mut name = src_dir.as_os_str().to_os_string();
            name.push(format!("-{year}"));
            PathBuf::from(name)
        }
    }
}

fn data_files(src_dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(src_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() && has_extension(&entry.path(), extension) {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// Distribute the data files of `src_dir` into per-year directories.
///
/// Returns `None` when `src_dir` does not exist.
pub fn split_directory<I: Interface>(
    src_dir: &Path,
    options: &SplitOptions,
    ui: &I,
) -> Result<Option<SplitSummary>> {
    if !src_dir.is_dir() {
        ui.warning(&format!("Skipping non-existent directory: {src_dir:?}"));
        return Ok(None);
    }

    let files = data_files(src_dir, &options.extension)?;

    let target_years: BTreeSet<String> = match &options.years {
        Some(years) => years.clone(),
        None => files
            .iter()
            .filter_map(|f| f.file_name()?.to_str().and_then(year_tag))
            .map(str::to_string)
            .collect(),
    };

    if target_years.is_empty() {
        ui.info(&format!("No year tags found in: {src_dir:?}"));
        return Ok(Some(SplitSummary {
            total: files.len(),
            ..Default::default()
        }));
    }

    let mut out_dirs = BTreeMap::new();
    for year in &target_years {
        let dir = year_dir(src_dir, year, options.strategy);
        if options.dry_run {
            ui.info(&format!("[dry-run] mkdir -p {dir:?}"));
        } else {
            fs::ensure_dir_exists(&dir)?;
        }
        out_dirs.insert(year.as_str(), dir);
    }

    let mut matched = 0;
    for file in &files {
        let Some(name) = file.file_name() else {
            continue;
        };
        let Some(out_dir) = name.to_str().and_then(year_tag).and_then(|y| out_dirs.get(y)) else {
            continue;
        };

        let destination = out_dir.join(name);
        if options.dry_run {
            ui.info(&format!(
                "[dry-run] {:<7} {file:?} -> {destination:?}",
                options.mode.to_string()
            ));
        } else {
            apply(file, &destination, options.mode)?;
        }
        matched += 1;
    }

    let years: Vec<String> = target_years.iter().cloned().collect();
    ui.success(&format!(
        "{src_dir:?}: matched {matched}/{} files into {years:?} using mode={}",
        files.len(),
        options.mode
    ));

    Ok(Some(SplitSummary {
        total: files.len(),
        matched,
        years,
    }))
}

fn apply(src: &Path, dst: &Path, mode: SplitMode) -> Result<()> {
    match mode {
        SplitMode::Move => fs::move_file(src, dst),
        SplitMode::Copy => {
            std::fs::copy(src, dst)?;
            Ok(())
        }
        SplitMode::Symlink => {
            if dst.symlink_metadata().is_ok() {
                fs::remove_file(dst)?;
            }
            let target = std::path::absolute(src)?;
            fs::symlink_file(&target, dst)
        }
    }
}
