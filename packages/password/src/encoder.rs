//! Hash encoder
//!
//! Derives a key from password and salt with the primary variant and packs
//! tag, cost parameters, salt and key into an [`EncodedHash`].

use crate::algorithm::Algorithm;
use crate::config::HashConfig;
use crate::record::{EncodedHash, MIN_SALT_TEXT_LEN};
use crate::salt::generate_salt_with;
use crate::{PasswordError, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use log::debug;
use rand::TryCryptoRng;
use rand::rngs::OsRng;

/// Produces password records for one configuration
///
/// Holds no mutable state; share it freely between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaltedHasher {
    config: HashConfig,
}

impl SaltedHasher {
    /// Create a hasher for `config`
    #[must_use]
    pub fn new(config: HashConfig) -> Self {
        Self { config }
    }

    /// Configuration used for new records
    #[must_use]
    pub fn config(&self) -> &HashConfig {
        &self.config
    }

    /// Generate a salt of the configured length from the OS
    ///
    /// # Errors
    ///
    /// Returns `RandomSourceExhausted` if the OS entropy source fails.
    pub fn generate_salt(&self) -> Result<String> {
        crate::salt::generate_salt(self.config.salt_len)
    }

    /// Encode `password` with a caller-supplied base64 salt
    ///
    /// The salt text itself is the KDF salt input, so the same password, salt
    /// and configuration always give the same record.
    ///
    /// # Errors
    ///
    /// - `InvalidParameters` if the configuration is out of range, or the salt
    ///   is not base64 or shorter than 8 characters
    /// - `KeyDerivation` if Argon2 fails
    pub fn encode(&self, password: impl AsRef<[u8]>, salt: &str) -> Result<EncodedHash> {
        self.config.validate()?;
        check_salt(salt)?;

        let algorithm = Algorithm::PRIMARY;
        let cost = self.config.cost();
        let key = algorithm.derive(password.as_ref(), salt.as_bytes(), &cost)?;

        debug!(
            "Encoded {algorithm} record (t={}, m={} KiB, p={}, len={})",
            cost.time_cost, cost.memory_cost, cost.parallelism, cost.key_len
        );

        Ok(EncodedHash::new(algorithm, cost, salt.to_string(), key))
    }

    /// Encode `password` with a fresh salt from the OS
    ///
    /// # Errors
    ///
    /// Returns `RandomSourceExhausted` if no salt could be generated, plus
    /// every error of [`SaltedHasher::encode`].
    pub fn hash(&self, password: impl AsRef<[u8]>) -> Result<EncodedHash> {
        self.hash_with(&mut OsRng, password)
    }

    /// Encode `password` with a fresh salt from `rng`
    ///
    /// # Errors
    ///
    /// Same as [`SaltedHasher::hash`].
    pub fn hash_with<R>(&self, rng: &mut R, password: impl AsRef<[u8]>) -> Result<EncodedHash>
    where
        R: TryCryptoRng + ?Sized,
    {
        self.config.validate()?;
        let salt = generate_salt_with(rng, self.config.salt_len)?;
        self.encode(password, &salt)
    }
}

/// Encode `password` under `config` with a caller-supplied base64 salt
///
/// # Errors
///
/// Same as [`SaltedHasher::encode`].
pub fn encode(password: impl AsRef<[u8]>, salt: &str, config: &HashConfig) -> Result<EncodedHash> {
    SaltedHasher::new(*config).encode(password, salt)
}

fn check_salt(salt: &str) -> Result<()> {
    if salt.len() < MIN_SALT_TEXT_LEN {
        return Err(PasswordError::invalid_parameters(format!(
            "salt must be at least {MIN_SALT_TEXT_LEN} characters"
        )));
    }
    BASE64_STANDARD
        .decode(salt)
        .map(|_| ())
        .map_err(|e| PasswordError::invalid_parameters(format!("salt is not valid base64: {e}")))
}
