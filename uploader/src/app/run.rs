//! Command execution on top of the form bridge

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::app::options::{StatusOptions, TargetOptions, UploadOptions};
use crate::bridge::{FormBridge, UploadInput};
use crate::errors::UploaderError;
use crate::filesys::file::File;
use crate::http::client::DealApi;
use crate::models::deal::{DealMetadata, FileBlob};
use crate::models::status::StatusKind;
use crate::storage::settings::Settings;

/// Outcome of a status command
#[derive(Debug, Clone)]
pub struct StatusOutcome {
    /// Text written to the response area
    pub rendered: String,

    /// Where the response was saved, if requested
    pub saved_to: Option<PathBuf>,
}

/// Build a bridge preloaded with the configured base URL, presets and metadata
pub async fn open_bridge(settings: &Settings, api: Arc<dyn DealApi>) -> FormBridge {
    let bridge = FormBridge::new(api, &settings.base_url).with_presets(settings.presets.clone());
    bridge.set_metadata(settings.metadata.clone()).await;
    bridge
}

async fn apply_target(bridge: &FormBridge, target: &TargetOptions) -> Result<(), UploaderError> {
    if let Some(url) = &target.url {
        bridge.select_base_url(url).await;
    } else if let Some(preset) = &target.preset {
        bridge.select_preset(preset).await?;
    }
    Ok(())
}

/// Upload a file and return the rendered message area
pub async fn upload(bridge: &FormBridge, options: UploadOptions) -> Result<String, UploaderError> {
    apply_target(bridge, &options.target).await?;

    if let Some(raw) = &options.metadata {
        bridge.set_metadata(DealMetadata::parse(raw)?).await;
    }

    let file = FileBlob::read(&options.file).await?;
    let input = UploadInput {
        file,
        miner_id: options.miner_id,
        api_key: options.api_key,
    };

    Ok(bridge.submit_upload(input).await)
}

/// Request a status and optionally save the rendered response
pub async fn status(
    bridge: &FormBridge,
    options: StatusOptions,
) -> Result<StatusOutcome, UploaderError> {
    apply_target(bridge, &options.target).await?;

    if options.kind != StatusKind::Content {
        let base_url = bridge.fields().await.base_url;
        bridge
            .set_content_status_url(&options.kind.url_prefix(&base_url))
            .await;
    }
    if let Some(prefix) = &options.content_url {
        bridge.set_content_status_url(prefix).await;
    }

    info!("Looking up {} {}", options.kind, options.content_id);
    let rendered = bridge.request_status(&options.content_id).await;

    let saved_to = match &options.save_dir {
        Some(dir) => Some(bridge.download_response(dir).await?),
        None => None,
    };

    Ok(StatusOutcome { rendered, saved_to })
}

/// Write the default settings to `file`, refusing to overwrite an existing one
pub async fn init_settings(file: &File) -> Result<PathBuf, UploaderError> {
    if file.exists().await {
        return Err(UploaderError::ConfigError(format!(
            "{} already exists",
            file.path().display()
        )));
    }

    file.write_json(&Settings::default()).await?;
    info!("Wrote default settings to {}", file.path().display());
    Ok(file.path().to_path_buf())
}
