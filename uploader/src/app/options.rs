//! Per-command options

use std::path::PathBuf;

use secrecy::SecretString;

use crate::models::status::StatusKind;

/// Which base URL a command runs against. Unset fields keep the configured default.
#[derive(Debug, Clone, Default)]
pub struct TargetOptions {
    /// Explicit base URL, selected as if picked from the dropdown
    pub url: Option<String>,

    /// Name (or URL) of a configured preset
    pub preset: Option<String>,
}

/// Upload command options
#[derive(Debug)]
pub struct UploadOptions {
    pub target: TargetOptions,

    /// File to upload
    pub file: PathBuf,

    /// Storage provider, sent as `X-MinerID`
    pub miner_id: String,

    /// Bearer token for the deal endpoint
    pub api_key: SecretString,

    /// Raw JSON replacing the configured deal metadata
    pub metadata: Option<String>,
}

/// Status command options
#[derive(Debug, Clone)]
pub struct StatusOptions {
    pub target: TargetOptions,

    /// Identifier appended to the status URL
    pub content_id: String,

    /// Open-stats collection to query
    pub kind: StatusKind,

    /// Explicit status URL prefix, overriding the one derived from the base URL
    pub content_url: Option<String>,

    /// Save the rendered response into this directory
    pub save_dir: Option<PathBuf>,
}
