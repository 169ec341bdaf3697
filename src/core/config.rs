use crate::error::{GrainError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "graindata.toml";
pub const DATA_DIR_ENV: &str = "GRAINDATA_DIR";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Working directory holding the archive and the extraction directory
    pub data_dir: PathBuf,
    pub archive_name: String,
    pub extract_dir_name: String,
    /// Extension of dataset sample files, without the leading dot
    pub data_extension: String,
    pub fetch_program: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from("data"),
            archive_name: "Grain-Data.zip".to_string(),
            extract_dir_name: "Grain-Data".to_string(),
            data_extension: "npz".to_string(),
            fetch_program: "curl".to_string(),
        }
    }
}

/// Values given on the command line or through the environment.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub archive_name: Option<String>,
    pub extract_dir_name: Option<String>,
    pub data_extension: Option<String>,
}

impl Config {
    /// Load configuration from `path`, or from `graindata.toml` in the
    /// current directory when no path is given. Only an explicitly named
    /// file is required to exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(GrainError::config_error(format!(
                        "config file {path:?} does not exist"
                    )));
                }
                Self::from_file(path)
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| GrainError::config_error(format!("{path:?}: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| GrainError::config_error(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self> {
        if let Some(data_dir) = overrides.data_dir {
            self.data_dir = data_dir;
        }
        if let Some(archive_name) = overrides.archive_name {
            self.archive_name = archive_name;
        }
        if let Some(extract_dir_name) = overrides.extract_dir_name {
            self.extract_dir_name = extract_dir_name;
        }
        if let Some(extension) = overrides.data_extension {
            self.data_extension = extension;
        }
        self.data_extension = self.data_extension.trim_start_matches('.').to_string();
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(GrainError::config_error("data_dir must not be empty"));
        }
        validate_file_name("archive_name", &self.archive_name)?;
        validate_file_name("extract_dir_name", &self.extract_dir_name)?;
        if self.archive_name == self.extract_dir_name {
            return Err(GrainError::config_error(
                "archive_name and extract_dir_name must differ",
            ));
        }
        let extension = self.data_extension.trim_start_matches('.');
        if extension.is_empty() || extension.contains(['/', '\\']) {
            return Err(GrainError::config_error(format!(
                "invalid data_extension '{}'",
                self.data_extension
            )));
        }
        if self.fetch_program.trim().is_empty() {
            return Err(GrainError::config_error("fetch_program must not be empty"));
        }
        Ok(())
    }

    pub fn archive_path(&self) -> PathBuf {
        self.data_dir.join(&self.archive_name)
    }

    pub fn extract_dir(&self) -> PathBuf {
        self.data_dir.join(&self.extract_dir_name)
    }

    pub fn extension(&self) -> &str {
        self.data_extension.trim_start_matches('.')
    }
}

fn validate_file_name(field: &str, name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(GrainError::config_error(format!(
            "{field} must be a plain file name, got '{name}'"
        ))),
    }
}
