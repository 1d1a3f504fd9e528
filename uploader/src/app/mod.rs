//! Command-level wiring

pub mod options;
pub mod run;
