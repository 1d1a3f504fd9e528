//! Deal upload models

use std::path::Path;

use bytes::Bytes;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::errors::UploaderError;
use crate::filesys::file::File;

/// Path of the end-to-end deal endpoint, relative to the base URL
pub const DEAL_END_TO_END_PATH: &str = "/api/v1/deal/end-to-end";

/// Deal parameters sent in the `metadata` multipart field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DealMetadata {
    /// "verified" or "unverified"
    pub deal_verify_state: String,

    pub duration_in_days: i64,

    pub start_epoch_in_days: i64,

    /// Let the deal service re-propose failed deals
    pub auto_retry: bool,

    /// Any other deal request fields, forwarded untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for DealMetadata {
    fn default() -> Self {
        Self {
            deal_verify_state: "verified".to_string(),
            duration_in_days: 521,
            start_epoch_in_days: 1,
            auto_retry: true,
            extra: serde_json::Map::new(),
        }
    }
}

impl DealMetadata {
    /// Parse a caller-supplied metadata object. Missing fields keep their defaults.
    pub fn parse(raw: &str) -> Result<Self, UploaderError> {
        serde_json::from_str(raw).map_err(|e| UploaderError::InvalidMetadata(e.to_string()))
    }

    /// Compact JSON string carried by the multipart form
    pub fn to_form_value(&self) -> Result<String, UploaderError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// File contents picked for upload. Clones share one buffer.
#[derive(Debug, Clone)]
pub struct FileBlob {
    pub file_name: String,
    pub bytes: Bytes,
}

impl FileBlob {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, keeping only its final path component as the name
    pub async fn read(path: &Path) -> Result<Self, UploaderError> {
        let bytes = File::new(path).read_bytes().await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("data")
            .to_string();
        Ok(Self::new(file_name, bytes))
    }
}

/// A single end-to-end deal upload
#[derive(Debug)]
pub struct UploadRequest {
    pub base_url: String,
    pub file: FileBlob,
    pub miner_id: String,
    pub api_key: SecretString,
    pub metadata: DealMetadata,
}

impl UploadRequest {
    /// Full endpoint URL, the base URL concatenated as typed
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, DEAL_END_TO_END_PATH)
    }
}

/// Typed view over the deal endpoint's reply
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DealResponse {
    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub content_id: Option<i64>,
}

impl DealResponse {
    /// Best-effort extraction; replies of an unexpected shape yield `None`
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}
