//! Text buffers the bridge renders into

use serde_json::Value;

use crate::errors::UploaderError;
use crate::utils::pretty_json;

/// Placeholder written to the message area while an upload is in flight
pub const UPLOADING_MESSAGE: &str = "Uploading...";

/// The two output areas. Each action overwrites its own buffer; the last write wins.
#[derive(Debug, Default)]
pub struct DisplayState {
    /// Upload outcome
    pub message_area: String,

    /// Status lookup outcome
    pub response_area: String,

    /// Content ID whose reply is in `response_area`
    pub response_content_id: Option<String>,
}

/// Render an upload outcome for the message area.
///
/// Errors become an error `div` fragment. It is stored as plain text, never interpreted as markup.
pub fn render_upload(result: &Result<Value, UploaderError>) -> String {
    match result {
        Ok(body) => pretty_json(body).unwrap_or_else(|e| error_fragment(&e)),
        Err(e) => error_fragment(e),
    }
}

/// Render a status outcome for the response area.
///
/// Errors are shown as their message encoded as a JSON string, quotes included.
pub fn render_status(result: &Result<Value, UploaderError>) -> String {
    match result {
        Ok(body) => pretty_json(body).unwrap_or_else(|e| quoted_message(&e)),
        Err(e) => quoted_message(e),
    }
}

fn error_fragment(error: &UploaderError) -> String {
    format!("<div class=\"message error\">{}</div>", error)
}

fn quoted_message(error: &UploaderError) -> String {
    let message = error.to_string();
    pretty_json(&message).unwrap_or(message)
}
