//! Hash verifier
//!
//! Parse, dispatch on the tag, re-derive with the embedded parameters, then
//! compare in constant time. No step is retried.

use crate::record::EncodedHash;
use crate::{PasswordError, Result};
use log::debug;
use subtle::ConstantTimeEq;

/// Upper bounds on the work a stored record may demand of the verifier
///
/// Cost parameters come from the record itself, so a tampered row can ask
/// Argon2 for up to 4 TiB of memory. Check against these limits before
/// deriving when records are not fully trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyLimits {
    /// Largest accepted number of passes
    pub max_time_cost: u32,
    /// Largest accepted memory cost in KiB
    pub max_memory_cost: u32,
    /// Largest accepted lane count
    pub max_parallelism: u32,
}

impl Default for VerifyLimits {
    /// 64 passes, 1 GiB, 255 lanes
    fn default() -> Self {
        Self {
            max_time_cost: 64,
            max_memory_cost: 1024 * 1024,
            max_parallelism: 255,
        }
    }
}

/// Verify `candidate` against a stored record
///
/// The record's cost parameters are used as stored. A tampered record with
/// huge costs makes Argon2 allocate accordingly; use [`verify_within`] for
/// untrusted input.
///
/// # Errors
///
/// - `PasswordMismatch` when the password is wrong
/// - `MalformedRecord` or `UnsupportedAlgorithm` when the record is unusable
/// - `KeyDerivation` if Argon2 fails
pub fn verify(record: &str, candidate: impl AsRef<[u8]>) -> Result<()> {
    EncodedHash::parse(record)?.verify(candidate)
}

/// Like [`verify`], but reject records whose costs exceed `limits` before deriving
///
/// # Errors
///
/// Every error of [`verify`], plus `CostLimitExceeded`.
pub fn verify_within(
    record: &str,
    candidate: impl AsRef<[u8]>,
    limits: &VerifyLimits,
) -> Result<()> {
    let record = EncodedHash::parse(record)?;
    record.check_limits(limits)?;
    record.verify(candidate)
}

/// Like [`verify`], but a wrong password is `Ok(false)` instead of an error
///
/// # Errors
///
/// Every error of [`verify`] except `PasswordMismatch`.
pub fn check(record: &str, candidate: impl AsRef<[u8]>) -> Result<bool> {
    match verify(record, candidate) {
        Ok(()) => Ok(true),
        Err(PasswordError::PasswordMismatch) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Constant-time comparison of derived keys
///
/// Runtime does not depend on where the inputs first differ. Inputs of
/// different length compare unequal.
#[must_use]
#[inline]
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

impl EncodedHash {
    /// Reject this record if verifying it would exceed `limits`
    ///
    /// # Errors
    ///
    /// Returns `CostLimitExceeded` naming the first parameter over its limit.
    pub fn check_limits(&self, limits: &VerifyLimits) -> Result<()> {
        let cost = self.cost();
        let checks = [
            ("time cost", cost.time_cost, limits.max_time_cost),
            ("memory cost", cost.memory_cost, limits.max_memory_cost),
            ("parallelism", cost.parallelism, limits.max_parallelism),
        ];
        for (name, value, limit) in checks {
            if value > limit {
                return Err(PasswordError::CostLimitExceeded(format!(
                    "{name} {value} exceeds limit {limit}"
                )));
            }
        }
        Ok(())
    }

    /// Verify `candidate` against this record
    ///
    /// # Errors
    ///
    /// Returns `PasswordMismatch` when the password is wrong and
    /// `KeyDerivation` if Argon2 fails.
    pub fn verify(&self, candidate: impl AsRef<[u8]>) -> Result<()> {
        let algorithm = self.algorithm();
        if algorithm.is_legacy() {
            debug!("Verifying legacy {algorithm} record");
        }

        let derived = algorithm.derive(candidate.as_ref(), self.salt().as_bytes(), self.cost())?;

        if constant_time_compare(&derived, self.key()) {
            Ok(())
        } else {
            Err(PasswordError::PasswordMismatch)
        }
    }

    /// Like [`EncodedHash::verify`], but a wrong password is `Ok(false)`
    ///
    /// # Errors
    ///
    /// Returns `KeyDerivation` if Argon2 fails.
    pub fn matches(&self, candidate: impl AsRef<[u8]>) -> Result<bool> {
        match self.verify(candidate) {
            Ok(()) => Ok(true),
            Err(PasswordError::PasswordMismatch) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
