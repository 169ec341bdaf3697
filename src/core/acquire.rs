//! Acquire-verify-extract-report-cleanup sequence for the dataset archive.
//!
//! A run moves through these stages in order, stopping at the first error:
//!
//! 1. preflight: the fetch and decompression capabilities exist
//! 2. the working directory exists
//! 3. a non-empty extraction directory is only replaced after confirmation
//! 4. the archive is downloaded or an existing one is reused
//! 5. the archive is extracted
//! 6. the data files are counted and reported
//! 7. the operator may delete the archive

use crate::core::config::Config;
use crate::core::download::Fetcher;
use crate::core::extract::Extractor;
use crate::core::interface::Interface;
use crate::core::stats::{self, DatasetSummary};
use crate::error::{GrainError, Result};
use crate::utils::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveSource {
    Downloaded { url: String },
    Reused,
}

#[derive(Debug, Clone)]
pub struct AcquireReport {
    pub archive_path: PathBuf,
    pub extract_dir: PathBuf,
    pub source: ArchiveSource,
    /// Files written by the extractor, of any type
    pub files_extracted: usize,
    pub summary: DatasetSummary,
    pub archive_removed: bool,
}

#[derive(Debug, Clone)]
pub enum Outcome {
    /// The operator declined to overwrite an existing extraction.
    Aborted,
    Completed(AcquireReport),
}

enum ArchivePlan<'s> {
    Download(&'s str),
    Reuse,
}

pub struct DatasetAcquirer<'a, F: Fetcher, I: Interface> {
    config: &'a Config,
    fetcher: F,
    extractor: Extractor,
    ui: &'a I,
}

impl<'a, F: Fetcher, I: Interface> DatasetAcquirer<'a, F, I> {
    pub fn new(config: &'a Config, fetcher: F, extractor: Extractor, ui: &'a I) -> Self {
        Self {
            config,
            fetcher,
            extractor,
            ui,
        }
    }

    /// Ensure an extracted dataset exists under the working directory.
    ///
    /// `source` is the archive URL; without one, an archive already at
    /// the expected path is reused.
    pub fn run(&self, source: Option<&str>) -> Result<Outcome> {
        let source = source.map(str::trim).filter(|s| !s.is_empty());

        self.preflight()?;
        self.prepare_destination()?;

        // Decided before any prompt so an overwrite never deletes an
        // extraction that nothing will replace.
        let plan = self.plan_archive(source)?;

        if !self.clear_existing_output()? {
            self.ui.warning("Aborted: existing extraction directory left untouched.");
            return Ok(Outcome::Aborted);
        }

        let source = self.acquire_archive(plan)?;
        let files_extracted = self.extract()?;
        let summary = self.report()?;
        let archive_removed = self.offer_cleanup()?;

        Ok(Outcome::Completed(AcquireReport {
            archive_path: self.config.archive_path(),
            extract_dir: self.config.extract_dir(),
            source,
            files_extracted,
            summary,
            archive_removed,
        }))
    }

    fn preflight(&self) -> Result<()> {
        self.fetcher.ensure_available()?;
        self.extractor.ensure_supported(&self.config.archive_path())?;
        Ok(())
    }

    fn prepare_destination(&self) -> Result<()> {
        fs::ensure_dir_exists(&self.config.data_dir)
    }

    fn plan_archive<'s>(&self, source: Option<&'s str>) -> Result<ArchivePlan<'s>> {
        let archive_path = self.config.archive_path();
        match source {
            Some(url) => Ok(ArchivePlan::Download(url)),
            None if archive_path.is_file() => Ok(ArchivePlan::Reuse),
            None => Err(GrainError::NoArchive { path: archive_path }),
        }
    }

    /// Returns false when the operator declines to replace existing output.
    fn clear_existing_output(&self) -> Result<bool> {
        let extract_dir = self.config.extract_dir();
        if !fs::is_non_empty_dir(&extract_dir)? {
            return Ok(true);
        }

        self.ui.warning(&format!(
            "Extraction directory {extract_dir:?} already exists and is not empty."
        ));
        if !self.ui.confirm("Overwrite it? All of its current contents will be deleted.")? {
            return Ok(false);
        }

        self.ui.info(&format!("Removing existing directory {extract_dir:?}"));
        fs::remove_dir_recursive(&extract_dir)?;
        Ok(true)
    }

    fn acquire_archive(&self, plan: ArchivePlan<'_>) -> Result<ArchiveSource> {
        let archive_path = self.config.archive_path();
        match plan {
            ArchivePlan::Download(url) => {
                self.ui.info(&format!("Downloading from {url}..."));
                self.fetcher.fetch(url, &archive_path)?;
                self.ui.success(&format!("Downloaded archive to {archive_path:?}"));
                Ok(ArchiveSource::Downloaded {
                    url: url.to_string(),
                })
            }
            ArchivePlan::Reuse => {
                self.ui.info(&format!(
                    "No source URL given; using existing archive {archive_path:?}"
                ));
                Ok(ArchiveSource::Reused)
            }
        }
    }

    fn extract(&self) -> Result<usize> {
        let archive_path = self.config.archive_path();
        let extract_dir = self.config.extract_dir();

        self.ui.info(&format!("Extracting {archive_path:?} to {extract_dir:?}"));
        let files = self.extractor.extract(&archive_path, &extract_dir)?;
        self.ui.success(&format!("Extracted {files} file(s) to {extract_dir:?}"));
        Ok(files)
    }

    fn report(&self) -> Result<DatasetSummary> {
        let extract_dir = self.config.extract_dir();
        let extension = self.config.extension();
        let summary = stats::summarize(&extract_dir, extension)?;

        self.ui.info(&format!("Dataset location: {extract_dir:?}"));
        self.ui.info(&format!("Found {} .{extension} file(s)", summary.total));
        for (year, count) in &summary.by_year {
            self.ui.info(&format!("  {year}: {count}"));
        }
        if !summary.by_year.is_empty() && summary.untagged() > 0 {
            self.ui.info(&format!("  no year tag: {}", summary.untagged()));
        }
        Ok(summary)
    }

    /// Returns true when the archive was deleted.
    fn offer_cleanup(&self) -> Result<bool> {
        let archive_path = self.config.archive_path();
        if !archive_path.is_file() {
            return Err(GrainError::ArchiveMissing { path: archive_path });
        }

        let question = format!("Delete the archive {archive_path:?} now that it is extracted?");
        if !self.ui.confirm(&question)? {
            self.ui.info(&format!("Keeping archive {archive_path:?}"));
            return Ok(false);
        }

        fs::remove_file(&archive_path)?;
        self.ui.success(&format!("Removed archive {archive_path:?}"));
        Ok(true)
    }
}
