//! Open stats API client

use serde_json::Value;

use crate::errors::UploaderError;
use crate::http::client::HttpClient;
use crate::models::status::StatusRequest;

impl HttpClient {
    /// Fetch the status document for a content (or other open-stats) identifier.
    ///
    /// The open endpoints take no credentials, so none are attached.
    pub async fn get_status(&self, request: &StatusRequest) -> Result<Value, UploaderError> {
        self.get(&request.url()).await
    }
}
