//! Salt generation

use crate::{PasswordError, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use rand::TryCryptoRng;
use rand::rngs::OsRng;
use zeroize::Zeroizing;

/// Generate `length` random bytes from the operating system and base64 them
///
/// # Errors
///
/// Returns `RandomSourceExhausted` if the OS entropy source fails and
/// `InvalidParameters` if `length` is zero.
pub fn generate_salt(length: usize) -> Result<String> {
    generate_salt_with(&mut OsRng, length)
}

/// Generate a base64 salt from a caller-supplied secure source
///
/// A source failure is surfaced as is; no fallback source is tried.
///
/// # Errors
///
/// Returns `RandomSourceExhausted` if `rng` cannot fill the buffer and
/// `InvalidParameters` if `length` is zero.
pub fn generate_salt_with<R>(rng: &mut R, length: usize) -> Result<String>
where
    R: TryCryptoRng + ?Sized,
{
    if length == 0 {
        return Err(PasswordError::invalid_parameters("salt length must be positive"));
    }

    let mut raw = Zeroizing::new(vec![0u8; length]);
    rng.try_fill_bytes(&mut raw)
        .map_err(|e| PasswordError::RandomSourceExhausted(e.to_string()))?;

    Ok(BASE64_STANDARD.encode(&*raw))
}
