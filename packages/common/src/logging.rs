//! Structured logging infrastructure
//!
//! Provides env_logger-based logging with secure handling of password
//! material and proper integration with the standard log crate.

use log::{debug, info, warn};
use sha2::{Digest, Sha256};
use std::sync::Once;
use std::time::Duration;

static INIT_LOGGER: Once = Once::new();

/// Logging setup and log-safe helpers for password hashing
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging system (should be called once at application startup)
    ///
    /// Configure logging levels via `RUST_LOG` environment variable:
    /// - `RUST_LOG=debug` - Enable all debug logs
    /// - `RUST_LOG=info` - Enable info and above
    /// - `RUST_LOG=aptyid_password=debug` - Module-specific levels
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            debug!("Structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    ///
    /// Safe to call from every test; later calls are no-ops.
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log host information relevant to KDF cost tuning
    pub fn log_host_info(available_cpus: usize, configured_parallelism: u32) {
        info!("Host CPUs: {available_cpus} (configured parallelism: {configured_parallelism})");
    }

    /// Log a hashing stage with its wall-clock duration
    pub fn log_performance_metric(operation: &str, elapsed: Duration, success: bool) {
        if success {
            info!("Performance: {operation} completed in {elapsed:?}");
        } else {
            warn!("Performance: {operation} failed after {elapsed:?}");
        }
    }

    /// Log a verification outcome without exposing the stored record
    ///
    /// The record is reduced to a SHA-256 fingerprint for correlation.
    pub fn log_verification(record: &str, matched: bool) {
        let record_hash = Self::fingerprint(record);
        if matched {
            info!("Password verified (record_hash: {record_hash})");
        } else {
            warn!("Password rejected (record_hash: {record_hash})");
        }
    }

    /// Log an error by type and message only
    pub fn log_password_error(operation: &str, error: &dyn std::error::Error) {
        warn!(
            "Password operation failed: {} (error_type: {}, reason: {})",
            operation,
            std::any::type_name_of_val(error),
            error
        );
    }

    /// Log-safe fingerprint of a sensitive value
    ///
    /// Returns `#` followed by the first 12 hex characters of its SHA-256 digest.
    #[must_use]
    pub fn fingerprint(value: &str) -> String {
        let hash = Sha256::digest(value.as_bytes());
        let hex_hash = format!("{hash:x}");
        format!("#{}", &hex_hash[..12])
    }
}
