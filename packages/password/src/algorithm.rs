//! Algorithm variants and their key derivation functions
//!
//! Every record starts with a tag naming the variant that produced it. The set
//! of variants is closed: a tag outside it can never be verified.

use crate::{PasswordError, Result};
use argon2::{Algorithm as Argon2Variant, Argon2, Params, Version};
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroizing;

/// Largest lane count Argon2 accepts
pub const MAX_PARALLELISM: u32 = 0x00FF_FFFF;

/// Shortest derived key Argon2 produces, in bytes
pub const MIN_KEY_LEN: usize = 4;

/// Longest derived key accepted in a record, in bytes
pub const MAX_KEY_LEN: usize = 1024;

/// Cost parameters shared by the encoder and by stored records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cost {
    /// Number of passes over memory
    pub time_cost: u32,
    /// Memory size in KiB
    pub memory_cost: u32,
    /// Number of lanes
    pub parallelism: u32,
    /// Derived key length in bytes
    pub key_len: usize,
}

impl Cost {
    /// Check every field against the ranges Argon2 accepts
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` naming the first field out of range.
    pub fn validate(&self) -> Result<()> {
        if self.time_cost == 0 {
            return Err(PasswordError::invalid_parameters("time cost must be positive"));
        }
        if self.parallelism == 0 || self.parallelism > MAX_PARALLELISM {
            return Err(PasswordError::invalid_parameters(format!(
                "parallelism must be in 1..={MAX_PARALLELISM}, got {}",
                self.parallelism
            )));
        }
        if u64::from(self.memory_cost) < 8 * u64::from(self.parallelism) {
            return Err(PasswordError::invalid_parameters(format!(
                "memory cost {} KiB is below 8 KiB per lane ({} lanes)",
                self.memory_cost, self.parallelism
            )));
        }
        if !(MIN_KEY_LEN..=MAX_KEY_LEN).contains(&self.key_len) {
            return Err(PasswordError::invalid_parameters(format!(
                "key length must be in {MIN_KEY_LEN}..={MAX_KEY_LEN}, got {}",
                self.key_len
            )));
        }
        Ok(())
    }

    fn argon2_params(&self) -> Result<Params> {
        self.validate()?;
        Params::new(
            self.memory_cost,
            self.time_cost,
            self.parallelism,
            Some(self.key_len),
        )
        .map_err(|e| PasswordError::invalid_parameters(format!("Invalid Argon2 parameters: {e}")))
    }
}

/// Closed set of record variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// Argon2id v1.3, tag `AptyID`; the only variant used for new records
    #[default]
    AptyId,
    /// Argon2i v1.3, tag `AptyI`; accepted for verification only
    AptyI,
}

impl Algorithm {
    /// Variant written into every new record
    pub const PRIMARY: Self = Self::AptyId;

    /// Every variant the verifier accepts
    pub const ALL: [Self; 2] = [Self::AptyId, Self::AptyI];

    /// Record tag for this variant
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::AptyId => "AptyID",
            Self::AptyI => "AptyI",
        }
    }

    /// Look up the variant for a record tag
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedAlgorithm` for any tag outside the closed set.
    pub fn from_tag(tag: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.tag() == tag)
            .ok_or_else(|| PasswordError::UnsupportedAlgorithm(tag.to_string()))
    }

    /// True for variants kept only so that old records still verify
    #[must_use]
    pub fn is_legacy(self) -> bool {
        self != Self::PRIMARY
    }

    /// Derive `cost.key_len` bytes from `password` and `salt`
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` when `cost` is out of range and
    /// `KeyDerivation` when Argon2 rejects the inputs.
    pub fn derive(self, password: &[u8], salt: &[u8], cost: &Cost) -> Result<Zeroizing<Vec<u8>>> {
        match self {
            Self::AptyId => derive_argon2id(password, salt, cost),
            Self::AptyI => derive_argon2i(password, salt, cost),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Algorithm {
    type Err = PasswordError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_tag(s)
    }
}

fn derive_argon2id(password: &[u8], salt: &[u8], cost: &Cost) -> Result<Zeroizing<Vec<u8>>> {
    derive_with(Argon2Variant::Argon2id, password, salt, cost)
}

fn derive_argon2i(password: &[u8], salt: &[u8], cost: &Cost) -> Result<Zeroizing<Vec<u8>>> {
    derive_with(Argon2Variant::Argon2i, password, salt, cost)
}

fn derive_with(
    variant: Argon2Variant,
    password: &[u8],
    salt: &[u8],
    cost: &Cost,
) -> Result<Zeroizing<Vec<u8>>> {
    let argon2 = Argon2::new(variant, Version::V0x13, cost.argon2_params()?);

    let mut output = Zeroizing::new(vec![0u8; cost.key_len]);
    argon2
        .hash_password_into(password, salt, &mut output)
        .map_err(|e| PasswordError::KeyDerivation(format!("Argon2 key derivation failed: {e}")))?;

    Ok(output)
}
