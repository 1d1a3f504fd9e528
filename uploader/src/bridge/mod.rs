//! Form bridge between user input and the deal API

pub mod display;
pub mod form;

pub use form::{FormBridge, FormFields, UploadInput};
