use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GrainError>;

#[derive(Error, Debug)]
pub enum GrainError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Required capability '{capability}' is not available. {hint}")]
    MissingCapability { capability: String, hint: String },

    #[error(
        "No archive found at {path:?} and no source URL was given. \
         Pass the archive URL as an argument or place the archive there manually."
    )]
    NoArchive { path: PathBuf },

    #[error("Download failed: {url} ({reason})")]
    Download { url: String, reason: String },

    #[error("Extraction failed: {path:?} ({reason})")]
    Extraction { path: PathBuf, reason: String },

    #[error("Archive file not found after extraction: {path:?}")]
    ArchiveMissing { path: PathBuf },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Permission denied: {path:?}")]
    PermissionDenied { path: PathBuf },

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Invalid year '{year}': expected a four digit year such as 2020")]
    InvalidYear { year: String },

    #[error("Not a directory: {path:?}")]
    NotADirectory { path: PathBuf },
}

impl GrainError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        GrainError::Config {
            message: message.into(),
        }
    }

    pub fn missing_capability<C: Into<String>, H: Into<String>>(capability: C, hint: H) -> Self {
        GrainError::MissingCapability {
            capability: capability.into(),
            hint: hint.into(),
        }
    }

    pub fn extraction_error<S: ToString>(path: &std::path::Path, reason: S) -> Self {
        GrainError::Extraction {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Failure class shown to the operator next to the message.
    pub fn category(&self) -> &'static str {
        match self {
            GrainError::MissingCapability { .. } => "environment error",
            GrainError::NoArchive { .. } => "input error",
            GrainError::Download { .. } => "transfer error",
            GrainError::Extraction { .. } => "extraction error",
            GrainError::ArchiveMissing { .. } => "archive error",
            GrainError::Config { .. } | GrainError::InvalidYear { .. } => "configuration error",
            GrainError::Io(_)
            | GrainError::PermissionDenied { .. }
            | GrainError::NotADirectory { .. } => "filesystem error",
            GrainError::Prompt(_) => "prompt error",
        }
    }
}
