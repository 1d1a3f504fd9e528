//! Request and response models for the deal API

pub mod deal;
pub mod status;
