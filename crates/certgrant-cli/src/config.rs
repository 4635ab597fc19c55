//! Configuration file loading
//!
//! A config file can carry any subset of the credential inputs; values given
//! on the command line (or via environment) take precedence over the file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Settings read from a configuration file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileSettings {
    /// Directory tenant
    pub tenant_id: Option<String>,
    /// Application (client) id
    pub client_id: Option<String>,
    /// Requested scope
    pub scope: Option<String>,
    /// Path to the X.509 certificate
    pub certificate: Option<PathBuf>,
    /// Path to the RSA private key
    pub private_key: Option<PathBuf>,
    /// Token exchange timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// Configuration file error types
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Config file not found
    #[error("configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// Unsupported file format
    #[error("unsupported configuration file format, use .toml, .yaml, .yml, or .json")]
    UnsupportedFormat,

    /// Configuration parsing error
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] config::ConfigError),
}

impl FileSettings {
    /// Load settings from a file (TOML, YAML, or JSON)
    ///
    /// The format is detected from the file extension.
    ///
    /// # Errors
    /// Returns [`SettingsError`] if the file is missing, its extension is
    /// not recognized, or its contents do not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        use config::{Config, File, FileFormat};

        let path = path.as_ref();

        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let format = match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => FileFormat::Toml,
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            Some("json") => FileFormat::Json,
            _ => return Err(SettingsError::UnsupportedFormat),
        };

        let settings = Config::builder()
            .add_source(File::new(
                path.to_str().ok_or(SettingsError::UnsupportedFormat)?,
                format,
            ))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
