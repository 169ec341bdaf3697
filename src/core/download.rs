use crate::error::{GrainError, Result};
use crate::utils::fs;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Network-fetch capability used to obtain the dataset archive.
pub trait Fetcher {
    /// Fails with `MissingCapability` when the fetcher cannot run here.
    fn ensure_available(&self) -> Result<()>;

    /// Fetch `url` into `destination`. On error nothing is left at
    /// `destination`.
    fn fetch(&self, url: &str, destination: &Path) -> Result<()>;
}

pub struct CurlFetcher {
    program: String,
}

impl Default for CurlFetcher {
    fn default() -> Self {
        Self::new("curl")
    }
}

impl CurlFetcher {
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn locate(&self) -> Result<PathBuf> {
        which::which(&self.program).map_err(|_| {
            GrainError::missing_capability(
                &self.program,
                format!(
                    "Install {} (e.g. `apt install curl` or `brew install curl`) and make sure it is on PATH.",
                    self.program
                ),
            )
        })
    }
}

impl Fetcher for CurlFetcher {
    fn ensure_available(&self) -> Result<()> {
        self.locate().map(|_| ())
    }

    fn fetch(&self, url: &str, destination: &Path) -> Result<()> {
        let program = self.locate()?;

        if let Some(parent) = destination.parent() {
            fs::ensure_dir_exists(parent)?;
        }

        let partial = partial_path(destination);

        let status = Command::new(program)
            .arg("--location")
            .arg("--fail")
            .arg("--progress-bar")
            .arg("--user-agent")
            .arg(concat!("graindata/", env!("CARGO_PKG_VERSION")))
            .arg("--output")
            .arg(&partial)
            .arg(url)
            .stdin(Stdio::null())
            .status();

        let failure = match status {
            Ok(status) if status.success() => None,
            Ok(status) => Some(match status.code() {
                Some(22) => "server returned an HTTP error status".to_string(),
                Some(code) => format!("curl exited with status {code}"),
                None => "curl was terminated by a signal".to_string(),
            }),
            Err(e) => Some(format!("failed to run curl: {e}")),
        };

        if let Some(reason) = failure {
            let _ = std::fs::remove_file(&partial);
            return Err(GrainError::Download {
                url: url.to_string(),
                reason,
            });
        }

        std::fs::rename(&partial, destination).map_err(|e| {
            let _ = std::fs::remove_file(&partial);
            GrainError::Download {
                url: url.to_string(),
                reason: format!("could not move download into place: {e}"),
            }
        })?;

        Ok(())
    }
}

/// Temporary location a download is written to before it is renamed into place.
pub fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("download"));
    name.push(".part");
    destination.with_file_name(name)
}
