//! The form bridge: form fields in, API calls out, text written back

use std::path::{Path, PathBuf};
use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::bridge::display::{render_status, render_upload, DisplayState, UPLOADING_MESSAGE};
use crate::errors::UploaderError;
use crate::filesys::file::File;
use crate::http::client::DealApi;
use crate::models::deal::{DealMetadata, FileBlob, UploadRequest};
use crate::models::status::{content_status_url, StatusRequest};
use crate::storage::settings::{find_preset, UrlPreset};
use crate::utils::sanitize_file_component;

/// Prefix of every downloaded status file name
pub const DOWNLOAD_FILE_PREFIX: &str = "status-check-for";

/// Current values of the form inputs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields {
    /// Base URL of the deal API
    pub base_url: String,

    /// Prefix a content ID is appended to for status lookups
    pub content_status_url: String,

    /// Content ID of the most recent status request
    pub content_id: Option<String>,

    /// Metadata attached to uploads
    pub metadata: DealMetadata,
}

/// Values submitted with the upload form
#[derive(Debug)]
pub struct UploadInput {
    pub file: FileBlob,
    pub miner_id: String,
    pub api_key: SecretString,
}

/// Bridges form input to the deal API and renders replies as text
#[derive(Clone)]
pub struct FormBridge {
    api: Arc<dyn DealApi>,
    presets: Arc<Vec<UrlPreset>>,
    fields: Arc<RwLock<FormFields>>,
    display: Arc<RwLock<DisplayState>>,
}

impl FormBridge {
    /// Create a bridge with `base_url` selected and empty output areas
    pub fn new(api: Arc<dyn DealApi>, base_url: &str) -> Self {
        let fields = FormFields {
            base_url: base_url.to_string(),
            content_status_url: content_status_url(base_url),
            ..Default::default()
        };

        Self {
            api,
            presets: Arc::new(Vec::new()),
            fields: Arc::new(RwLock::new(fields)),
            display: Arc::new(RwLock::new(DisplayState::default())),
        }
    }

    /// Offer these presets to `select_preset`
    pub fn with_presets(mut self, presets: Vec<UrlPreset>) -> Self {
        self.presets = Arc::new(presets);
        self
    }

    /// Attach `metadata` to uploads instead of the default deal parameters
    pub async fn set_metadata(&self, metadata: DealMetadata) {
        self.fields.write().await.metadata = metadata;
    }

    pub fn presets(&self) -> &[UrlPreset] {
        &self.presets
    }

    /// Snapshot of the form inputs
    pub async fn fields(&self) -> FormFields {
        self.fields.read().await.clone()
    }

    pub async fn message_area(&self) -> String {
        self.display.read().await.message_area.clone()
    }

    pub async fn response_area(&self) -> String {
        self.display.read().await.response_area.clone()
    }

    /// Overwrite the response area, as a user editing it would
    pub async fn set_response_area(&self, text: impl Into<String>) {
        self.display.write().await.response_area = text.into();
    }

    /// Select a base URL: rewrites both the base URL and the content status URL
    pub async fn select_base_url(&self, url: &str) {
        let mut fields = self.fields.write().await;
        fields.base_url = url.to_string();
        fields.content_status_url = content_status_url(url);
        debug!("Selected base URL {}", url);
    }

    /// Select a preset by name or URL
    pub async fn select_preset(&self, key: &str) -> Result<(), UploaderError> {
        let url = find_preset(&self.presets, key)
            .map(|p| p.url.clone())
            .ok_or_else(|| UploaderError::NotFound(format!("preset '{}'", key)))?;
        self.select_base_url(&url).await;
        Ok(())
    }

    /// Edit the base URL field alone. The content status URL is left as is.
    pub async fn set_base_url(&self, url: &str) {
        self.fields.write().await.base_url = url.to_string();
    }

    /// Edit the content status URL field alone
    pub async fn set_content_status_url(&self, url: &str) {
        self.fields.write().await.content_status_url = url.to_string();
    }

    /// Upload a file as an end-to-end deal and render the outcome into the message area.
    ///
    /// Returns the text that was written.
    pub async fn submit_upload(&self, input: UploadInput) -> String {
        let (base_url, metadata) = {
            let fields = self.fields.read().await;
            (fields.base_url.clone(), fields.metadata.clone())
        };

        self.display.write().await.message_area = UPLOADING_MESSAGE.to_string();

        let request = UploadRequest {
            base_url,
            file: input.file,
            miner_id: input.miner_id,
            api_key: input.api_key,
            metadata,
        };
        info!(
            "Uploading {} ({} bytes) to {}",
            request.file.file_name,
            request.file.bytes.len(),
            request.endpoint()
        );

        let result = self.api.upload_end_to_end(&request).await;
        if let Err(e) = &result {
            warn!("Upload of {} failed: {}", request.file.file_name, e);
        }

        let rendered = render_upload(&result);
        self.display.write().await.message_area = rendered.clone();
        rendered
    }

    /// Look up `content_id` under the content status URL and render the outcome into the response area.
    ///
    /// Returns the text that was written.
    pub async fn request_status(&self, content_id: &str) -> String {
        let request = {
            let mut fields = self.fields.write().await;
            fields.content_id = Some(content_id.to_string());
            StatusRequest::new(fields.content_status_url.clone(), content_id)
        };
        info!("Requesting status {}", request.url());

        let result = self.api.fetch_status(&request).await;
        if let Err(e) = &result {
            warn!("Status request for {} failed: {}", request.url(), e);
        }

        let rendered = render_status(&result);
        let mut display = self.display.write().await;
        display.response_area = rendered.clone();
        display.response_content_id = Some(request.content_id);
        rendered
    }

    /// Run `submit_upload` on a background task
    pub fn spawn_upload(&self, input: UploadInput) -> JoinHandle<String> {
        let bridge = self.clone();
        tokio::spawn(async move { bridge.submit_upload(input).await })
    }

    /// Run `request_status` on a background task
    pub fn spawn_status(&self, content_id: String) -> JoinHandle<String> {
        let bridge = self.clone();
        tokio::spawn(async move { bridge.request_status(&content_id).await })
    }

    /// Name of the file `download_response` writes, after the content ID whose reply is shown
    pub async fn download_file_name(&self) -> String {
        match &self.display.read().await.response_content_id {
            Some(id) if !id.is_empty() => {
                format!("{}{}.txt", DOWNLOAD_FILE_PREFIX, sanitize_file_component(id))
            }
            _ => "status-check.txt".to_string(),
        }
    }

    /// Save the response area, unchanged, as a text file in `dir`
    pub async fn download_response(&self, dir: &Path) -> Result<PathBuf, UploaderError> {
        let text = self.response_area().await;
        let file = File::new(dir.join(self.download_file_name().await));
        file.write_string(&text).await?;
        info!("Saved response to {}", file.path().display());
        Ok(file.path().to_path_buf())
    }
}
