//! HTTP access to the deal API

pub mod client;
pub mod deals;
pub mod stats;
