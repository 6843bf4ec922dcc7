//! # AptyID password records
//!
//! Salted password hashing with Argon2id and constant-time verification.
//!
//! A record is one `$`-delimited line that carries everything needed to
//! verify a password later:
//!
//! ```text
//! AptyID$1$65536$10$32$<base64 salt>$<base64 key>
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aptyid_password::{HashConfig, SaltedHasher, check};
//!
//! # fn main() -> aptyid_password::Result<()> {
//! let hasher = SaltedHasher::new(HashConfig::default());
//! let record = hasher.hash("correct horse")?.to_string();
//!
//! assert!(check(&record, "correct horse")?);
//! assert!(!check(&record, "wrong horse")?);
//! # Ok(())
//! # }
//! ```
//!
//! Key derivation is delegated to the RustCrypto `argon2` crate. This crate
//! only owns salt generation, the record format and the comparison.

#![forbid(unsafe_code)]

pub mod algorithm;
pub mod config;
pub mod encoder;
pub mod error;
pub mod record;
pub mod salt;
pub mod verifier;

pub use algorithm::{Algorithm, Cost};
pub use config::HashConfig;
pub use encoder::{SaltedHasher, encode};
pub use error::{PasswordError, Result};
pub use record::EncodedHash;
pub use salt::{generate_salt, generate_salt_with};
pub use verifier::{VerifyLimits, check, constant_time_compare, verify, verify_within};
