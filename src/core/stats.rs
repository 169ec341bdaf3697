use crate::error::{GrainError, Result};
use std::collections::BTreeMap;
use std::path::Path;
use walkdir::WalkDir;

/// Counts of dataset sample files found under an extraction directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetSummary {
    pub total: usize,
    /// Files per acquisition year taken from the file name; untagged files are not listed.
    pub by_year: BTreeMap<String, usize>,
}

impl DatasetSummary {
    pub fn untagged(&self) -> usize {
        self.total - self.by_year.values().sum::<usize>()
    }
}

/// True when `path` ends in `.{extension}`, ignoring ASCII case.
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

/// Walk `dir` recursively and summarize the regular files carrying `extension`.
pub fn summarize(dir: &Path, extension: &str) -> Result<DatasetSummary> {
    let mut summary = DatasetSummary::default();

    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| GrainError::from(std::io::Error::from(e)))?;

        if !entry.file_type().is_file() || !has_extension(entry.path(), extension) {
            continue;
        }

        summary.total += 1;
        if let Some(year) = entry.file_name().to_str().and_then(year_tag) {
            *summary.by_year.entry(year.to_string()).or_insert(0) += 1;
        }
    }

    Ok(summary)
}

pub fn count_data_files(dir: &Path, extension: &str) -> Result<usize> {
    Ok(summarize(dir, extension)?.total)
}

/// Extract the acquisition year from a Grain file name.
///
/// Names look like `grain12205_x45y19-var4_11000_us_2x_2020-12-02T111648_corr.npz`;
/// the year is the first `_20dd-` group.
pub fn year_tag(file_name: &str) -> Option<&str> {
    let bytes = file_name.as_bytes();
    bytes.windows(6).enumerate().find_map(|(i, w)| {
        let matches = w[0] == b'_'
            && w[1] == b'2'
            && w[2] == b'0'
            && w[3].is_ascii_digit()
            && w[4].is_ascii_digit()
            && w[5] == b'-';
        matches.then(|| &file_name[i + 1..i + 5])
    })
}
