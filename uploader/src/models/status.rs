//! Open status lookup models

use std::fmt;
use std::str::FromStr;

/// Suffix appended to the base URL to form the content status URL
pub const CONTENT_STATUS_PATH: &str = "/open/stats/content/";

/// Derive the content status URL from a base URL, without normalizing either part
pub fn content_status_url(base_url: &str) -> String {
    format!("{}{}", base_url, CONTENT_STATUS_PATH)
}

/// Which open-stats collection an identifier is looked up in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusKind {
    #[default]
    Content,
    DealByCid,
    DealByUuid,
    DealByDealId,
    Miner,
    BatchImport,
}

impl StatusKind {
    pub const ALL: [StatusKind; 6] = [
        StatusKind::Content,
        StatusKind::DealByCid,
        StatusKind::DealByUuid,
        StatusKind::DealByDealId,
        StatusKind::Miner,
        StatusKind::BatchImport,
    ];

    pub fn path_suffix(&self) -> &'static str {
        match self {
            StatusKind::Content => CONTENT_STATUS_PATH,
            StatusKind::DealByCid => "/open/stats/deal/by-cid/",
            StatusKind::DealByUuid => "/open/stats/deal/by-uuid/",
            StatusKind::DealByDealId => "/open/stats/deal/by-deal-id/",
            StatusKind::Miner => "/open/stats/miner/",
            StatusKind::BatchImport => "/open/stats/batch/imports/",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusKind::Content => "content",
            StatusKind::DealByCid => "deal-by-cid",
            StatusKind::DealByUuid => "deal-by-uuid",
            StatusKind::DealByDealId => "deal-by-deal-id",
            StatusKind::Miner => "miner",
            StatusKind::BatchImport => "batch-import",
        }
    }

    /// Status URL prefix for this kind under `base_url`
    pub fn url_prefix(&self, base_url: &str) -> String {
        format!("{}{}", base_url, self.path_suffix())
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatusKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s.to_lowercase())
            .ok_or_else(|| {
                let known: Vec<&str> = StatusKind::ALL.iter().map(|k| k.as_str()).collect();
                format!("Invalid status kind: {} (expected one of {})", s, known.join(", "))
            })
    }
}

/// A single status lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRequest {
    pub content_url_prefix: String,
    pub content_id: String,
}

impl StatusRequest {
    pub fn new(content_url_prefix: impl Into<String>, content_id: impl Into<String>) -> Self {
        Self {
            content_url_prefix: content_url_prefix.into(),
            content_id: content_id.into(),
        }
    }

    /// Prefix and identifier concatenated as-is
    pub fn url(&self) -> String {
        format!("{}{}", self.content_url_prefix, self.content_id)
    }
}
