//! Deal API client

use reqwest::multipart::{Form, Part};
use reqwest::Body;
use serde_json::Value;
use tracing::info;

use crate::errors::UploaderError;
use crate::http::client::HttpClient;
use crate::models::deal::{DealResponse, UploadRequest};

impl HttpClient {
    /// Upload a file as an end-to-end deal
    pub async fn upload_deal(&self, request: &UploadRequest) -> Result<Value, UploaderError> {
        let form = deal_form(request)?;
        let body: Value = self
            .post_multipart(&request.endpoint(), &request.api_key, &request.miner_id, form)
            .await?;

        if let Some(reply) = DealResponse::from_value(&body) {
            info!(
                "Deal upload for {} answered '{}' (content id {:?}): {}",
                request.file.file_name, reply.status, reply.content_id, reply.message
            );
        }

        Ok(body)
    }
}

/// Multipart body with the file under `data` and the metadata JSON under `metadata`.
///
/// The file part borrows the blob's shared buffer, so the contents are never copied.
fn deal_form(request: &UploadRequest) -> Result<Form, UploaderError> {
    let bytes = request.file.bytes.clone();
    let length = bytes.len() as u64;
    let data = Part::stream_with_length(Body::from(bytes), length)
        .file_name(request.file.file_name.clone());
    Ok(Form::new()
        .part("data", data)
        .text("metadata", request.metadata.to_form_value()?))
}
