//! Hashing configuration
//!
//! `HashConfig` is a plain value handed to the encoder. Nothing here is
//! global, so tests and hosts can run several parameter sets side by side.

use crate::algorithm::Cost;
use crate::{PasswordError, Result};
use serde::{Deserialize, Serialize};

/// Default raw salt length in bytes
pub const DEFAULT_SALT_LEN: usize = 32;
/// Shortest raw salt in bytes; its 8-character base64 text is Argon2's minimum salt
pub const MIN_SALT_LEN: usize = 4;
/// Default number of passes
pub const DEFAULT_TIME_COST: u32 = 1;
/// Default memory cost in KiB (64 MiB)
pub const DEFAULT_MEMORY_COST: u32 = 64 * 1024;
/// Default lane count
///
/// Fixed rather than read from the host: stored records carry this value and
/// must verify identically on any machine.
pub const DEFAULT_PARALLELISM: u32 = 10;
/// Default derived key length in bytes
pub const DEFAULT_KEY_LEN: usize = 32;

/// Parameters used when producing new records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashConfig {
    /// Raw salt length in bytes, before base64
    #[serde(default = "default_salt_len")]
    pub salt_len: usize,
    /// Number of passes over memory
    #[serde(default = "default_time_cost")]
    pub time_cost: u32,
    /// Memory cost in KiB
    #[serde(default = "default_memory_cost")]
    pub memory_cost: u32,
    /// Number of lanes
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
    /// Derived key length in bytes
    #[serde(default = "default_key_len")]
    pub key_len: usize,
}

fn default_salt_len() -> usize {
    DEFAULT_SALT_LEN
}

fn default_time_cost() -> u32 {
    DEFAULT_TIME_COST
}

fn default_memory_cost() -> u32 {
    DEFAULT_MEMORY_COST
}

fn default_parallelism() -> u32 {
    DEFAULT_PARALLELISM
}

fn default_key_len() -> usize {
    DEFAULT_KEY_LEN
}

impl HashConfig {
    /// Set the raw salt length
    #[must_use]
    pub fn with_salt_len(mut self, salt_len: usize) -> Self {
        self.salt_len = salt_len;
        self
    }

    /// Set the number of passes
    #[must_use]
    pub fn with_time_cost(mut self, time_cost: u32) -> Self {
        self.time_cost = time_cost;
        self
    }

    /// Set the memory cost in KiB
    #[must_use]
    pub fn with_memory_cost(mut self, memory_cost: u32) -> Self {
        self.memory_cost = memory_cost;
        self
    }

    /// Set the lane count
    #[must_use]
    pub fn with_parallelism(mut self, parallelism: u32) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Set the derived key length
    #[must_use]
    pub fn with_key_len(mut self, key_len: usize) -> Self {
        self.key_len = key_len;
        self
    }

    /// Cost parameters written into each record
    #[must_use]
    pub fn cost(&self) -> Cost {
        Cost {
            time_cost: self.time_cost,
            memory_cost: self.memory_cost,
            parallelism: self.parallelism,
            key_len: self.key_len,
        }
    }

    /// Reject configurations the encoder could not use
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` when the base64 salt would be shorter than
    /// Argon2's minimum or any cost parameter is out of Argon2's range.
    pub fn validate(&self) -> Result<()> {
        if self.salt_len < MIN_SALT_LEN {
            return Err(PasswordError::invalid_parameters(format!(
                "salt length must be at least {MIN_SALT_LEN} bytes, got {}",
                self.salt_len
            )));
        }
        self.cost().validate()
    }
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            salt_len: DEFAULT_SALT_LEN,
            time_cost: DEFAULT_TIME_COST,
            memory_cost: DEFAULT_MEMORY_COST,
            parallelism: DEFAULT_PARALLELISM,
            key_len: DEFAULT_KEY_LEN,
        }
    }
}
