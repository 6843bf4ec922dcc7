//! Common infrastructure shared by the AptyID crates
//!
//! This crate provides:
//! - `env_logger` based logging setup with log-safe fingerprints of sensitive values
//! - A small stopwatch for timing hashing stages

pub mod logging;
pub mod timing;

pub use logging::LoggingTransformer;
pub use timing::Stopwatch;
