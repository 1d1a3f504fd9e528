//! Delta Uploader Library
//!
//! Form bridge and HTTP client for Delta end-to-end deal uploads and
//! open content status checks.

pub mod app;
pub mod bridge;
pub mod errors;
pub mod filesys;
pub mod http;
pub mod logs;
pub mod models;
pub mod storage;
pub mod utils;
