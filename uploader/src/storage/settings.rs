//! Settings file management

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::UploaderError;
use crate::filesys::file::File;
use crate::logs::LogLevel;
use crate::models::deal::DealMetadata;

/// A named base URL offered for quick selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlPreset {
    pub name: String,
    pub url: String,
}

impl UrlPreset {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Find a preset by name, or by its exact URL
pub fn find_preset<'a>(presets: &'a [UrlPreset], key: &str) -> Option<&'a UrlPreset> {
    presets
        .iter()
        .find(|p| p.name == key)
        .or_else(|| presets.iter().find(|p| p.url == key))
}

/// Uploader settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Emit JSON logs on stderr
    #[serde(default)]
    pub json_logs: bool,

    /// Also append logs to the logs directory
    #[serde(default)]
    pub log_to_file: bool,

    /// Base URL used when no `--url` or `--preset` is given
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Base URLs offered by name
    #[serde(default = "default_presets")]
    pub presets: Vec<UrlPreset>,

    /// Deal metadata sent with every upload
    #[serde(default)]
    pub metadata: DealMetadata,

    /// Where downloaded status responses go when no directory is given
    #[serde(default)]
    pub download_dir: Option<PathBuf>,

    /// Per-request timeout in seconds; unset means requests never time out
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:1414".to_string()
}

fn default_presets() -> Vec<UrlPreset> {
    vec![UrlPreset::new("local", default_base_url())]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            json_logs: false,
            log_to_file: false,
            base_url: default_base_url(),
            presets: default_presets(),
            metadata: DealMetadata::default(),
            download_dir: None,
            request_timeout_secs: None,
        }
    }
}

impl Settings {
    /// Load settings from `file`, falling back to defaults when it does not exist
    pub async fn load(file: &File) -> Result<Self, UploaderError> {
        if !file.exists().await {
            debug!("No settings file at {}, using defaults", file.path().display());
            return Ok(Self::default());
        }

        file.read_json::<Settings>().await.map_err(|e| {
            UploaderError::ConfigError(format!("{}: {}", file.path().display(), e))
        })
    }

    /// Request timeout, if any. Zero means no timeout.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn find_preset(&self, key: &str) -> Option<&UrlPreset> {
        find_preset(&self.presets, key)
    }
}
