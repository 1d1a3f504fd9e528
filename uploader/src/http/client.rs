//! HTTP client implementation

use std::time::Duration;

use async_trait::async_trait;
use ::http::header;
use reqwest::{multipart::Form, Client};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::UploaderError;
use crate::models::deal::UploadRequest;
use crate::models::status::StatusRequest;

/// Header carrying the storage provider the deal should go to
pub const MINER_ID_HEADER: &str = "X-MinerID";

/// The two calls the form bridge makes against the deal API.
///
/// Kept as a trait so the bridge can be driven without a network.
#[async_trait]
pub trait DealApi: Send + Sync {
    /// Send an end-to-end deal upload and return the JSON reply
    async fn upload_end_to_end(&self, request: &UploadRequest) -> Result<Value, UploaderError>;

    /// Look up a status URL and return the JSON reply
    async fn fetch_status(&self, request: &StatusRequest) -> Result<Value, UploaderError>;
}

/// HTTP client for the deal API
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client. Requests never time out unless `timeout` is set.
    pub fn new(timeout: Option<Duration>) -> Result<Self, UploaderError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Make an unauthenticated GET request
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, UploaderError> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("HTTP GET failed: {}", status);
            debug!("HTTP GET failure body: {}", body);
            return Err(UploaderError::RequestFailed);
        }

        let body = response.json().await?;
        Ok(body)
    }

    /// Make a multipart POST request with bearer and miner headers
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        url: &str,
        token: &SecretString,
        miner_id: &str,
        form: Form,
    ) -> Result<T, UploaderError> {
        debug!("POST {} (multipart, miner {})", url, miner_id);

        let response = self
            .client
            .post(url)
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", token.expose_secret()),
            )
            .header(MINER_ID_HEADER, miner_id)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("HTTP POST failed: {}", status);
            debug!("HTTP POST failure body: {}", body);
            return Err(UploaderError::UploadFailed);
        }

        let body = response.json().await?;
        Ok(body)
    }
}

#[async_trait]
impl DealApi for HttpClient {
    async fn upload_end_to_end(&self, request: &UploadRequest) -> Result<Value, UploaderError> {
        self.upload_deal(request).await
    }

    async fn fetch_status(&self, request: &StatusRequest) -> Result<Value, UploaderError> {
        self.get_status(request).await
    }
}
