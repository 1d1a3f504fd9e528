//! HTTP client tests against a local mock server

use std::sync::Arc;

use delta_uploader::bridge::{FormBridge, UploadInput};
use delta_uploader::errors::UploaderError;
use delta_uploader::http::client::HttpClient;
use delta_uploader::models::deal::FileBlob;
use delta_uploader::models::status::StatusRequest;
use mockito::Matcher;
use secrecy::SecretString;

const METADATA_PATTERN: &str = r#"\{"deal_verify_state":"verified","duration_in_days":521,"start_epoch_in_days":1,"auto_retry":true\}"#;

fn bridge_for(url: &str) -> FormBridge {
    let client = HttpClient::new(None).unwrap();
    FormBridge::new(Arc::new(client), url)
}

fn upload_input() -> UploadInput {
    UploadInput {
        file: FileBlob::new("hello.txt", b"hello world".to_vec()),
        miner_id: "f01234".to_string(),
        api_key: SecretString::from("secret-key".to_string()),
    }
}

#[tokio::test]
async fn test_upload_posts_multipart_with_headers() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/deal/end-to-end")
        .match_header("authorization", "Bearer secret-key")
        .match_header("x-minerid", "f01234")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".to_string()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="data"; filename="hello.txt""#.to_string()),
            Matcher::Regex("hello world".to_string()),
            Matcher::Regex(r#"name="metadata""#.to_string()),
            Matcher::Regex(METADATA_PATTERN.to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":"success","message":"File uploaded","content_id":12}"#)
        .expect(1)
        .create_async()
        .await;

    let bridge = bridge_for(&server.url());
    let rendered = bridge.submit_upload(upload_input()).await;

    mock.assert_async().await;
    assert_eq!(
        rendered,
        "{\n    \"status\": \"success\",\n    \"message\": \"File uploaded\",\n    \"content_id\": 12\n}"
    );
}

#[tokio::test]
async fn test_upload_rejected_shows_generic_failure() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/deal/end-to-end")
        .with_status(401)
        .with_body(r#"{"error":"invalid key"}"#)
        .create_async()
        .await;

    let bridge = bridge_for(&server.url());
    bridge.submit_upload(upload_input()).await;

    mock.assert_async().await;
    assert_eq!(
        bridge.message_area().await,
        "<div class=\"message error\">Upload failed</div>"
    );
}

#[tokio::test]
async fn test_status_get_without_auth() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/open/stats/content/abc123")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"content":{"ID":7,"status":"transfer-finished"}}"#)
        .expect(1)
        .create_async()
        .await;

    let bridge = bridge_for(&server.url());
    let rendered = bridge.request_status("abc123").await;

    mock.assert_async().await;
    assert_eq!(
        rendered,
        "{\n    \"content\": {\n        \"ID\": 7,\n        \"status\": \"transfer-finished\"\n    }\n}"
    );
}

#[tokio::test]
async fn test_status_server_error_hides_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/open/stats/content/abc123")
        .with_status(500)
        .with_body("database exploded")
        .create_async()
        .await;

    let bridge = bridge_for(&server.url());
    bridge.request_status("abc123").await;

    let response = bridge.response_area().await;
    assert_eq!(response, "\"Request failed\"");
    assert!(!response.contains("database exploded"));
}

#[tokio::test]
async fn test_status_invalid_json_surfaces_parse_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/open/stats/content/abc123")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let client = HttpClient::new(None).unwrap();
    let request = StatusRequest::new(format!("{}/open/stats/content/", server.url()), "abc123");
    let err = client.get_status(&request).await.unwrap_err();
    assert!(matches!(err, UploaderError::HttpError(_)));

    let bridge = bridge_for(&server.url());
    let response = bridge.request_status("abc123").await;
    assert!(response.starts_with("\"error decoding response body"));
    assert!(response.ends_with('"'));
}

#[tokio::test]
async fn test_status_unreachable_host_surfaces_transport_error() {
    let bridge = bridge_for("http://127.0.0.1:9");
    let response = bridge.request_status("abc123").await;

    assert!(response.starts_with("\"error sending request"));
    assert!(!response.contains("HTTP error"));
}
