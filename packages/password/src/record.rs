//! Encoded hash records
//!
//! A record is seven `$`-separated fields:
//!
//! ```text
//! <algorithm>$<timeCost>$<memoryCostKB>$<parallelism>$<keyLength>$<base64 salt>$<base64 key>
//! ```
//!
//! Parsing fails closed: every field must decode, nothing is defaulted.

use crate::algorithm::{Algorithm, Cost};
use crate::{PasswordError, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroizing;

/// Field separator
pub const FIELD_SEPARATOR: char = '$';

/// Number of fields in every record
pub const FIELD_COUNT: usize = 7;

/// Argon2 needs at least this many salt bytes; the salt text is the KDF input
pub(crate) const MIN_SALT_TEXT_LEN: usize = 8;

/// Parsed, validated password record
///
/// Immutable once built. The derived key is wiped on drop and never shown by
/// `Debug`.
#[derive(Clone)]
pub struct EncodedHash {
    algorithm: Algorithm,
    cost: Cost,
    salt: String,
    key: Zeroizing<Vec<u8>>,
}

impl EncodedHash {
    pub(crate) fn new(
        algorithm: Algorithm,
        cost: Cost,
        salt: String,
        key: Zeroizing<Vec<u8>>,
    ) -> Self {
        Self {
            algorithm,
            cost,
            salt,
            key,
        }
    }

    /// Parse and validate a stored record
    ///
    /// # Errors
    ///
    /// - `MalformedRecord` when there are not exactly seven fields, or a cost
    ///   field, the salt or the key does not decode
    /// - `UnsupportedAlgorithm` when the tag is not a known variant
    pub fn parse(record: &str) -> Result<Self> {
        let fields: Vec<&str> = record.split(FIELD_SEPARATOR).collect();
        let [tag, time_cost, memory_cost, parallelism, key_len, salt, key] = fields.as_slice()
        else {
            return Err(PasswordError::malformed(format!(
                "expected {FIELD_COUNT} fields, found {}",
                fields.len()
            )));
        };

        let algorithm = Algorithm::from_tag(tag)?;

        let cost = Cost {
            time_cost: parse_positive("time cost", time_cost)?,
            memory_cost: parse_positive("memory cost", memory_cost)?,
            parallelism: parse_positive("parallelism", parallelism)?,
            key_len: parse_positive("key length", key_len)?,
        };
        cost.validate()
            .map_err(|e| PasswordError::malformed(format!("cost parameters out of range: {e}")))?;

        if salt.len() < MIN_SALT_TEXT_LEN {
            return Err(PasswordError::malformed(format!(
                "salt must be at least {MIN_SALT_TEXT_LEN} characters"
            )));
        }
        BASE64_STANDARD
            .decode(salt)
            .map_err(|e| PasswordError::malformed(format!("salt is not valid base64: {e}")))?;

        let key = Zeroizing::new(
            BASE64_STANDARD
                .decode(key)
                .map_err(|e| PasswordError::malformed(format!("key is not valid base64: {e}")))?,
        );
        if key.len() != cost.key_len {
            return Err(PasswordError::malformed(format!(
                "key decodes to {} bytes, record declares {}",
                key.len(),
                cost.key_len
            )));
        }

        Ok(Self::new(algorithm, cost, (*salt).to_string(), key))
    }

    /// Variant that produced this record
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Embedded cost parameters
    #[must_use]
    pub fn cost(&self) -> &Cost {
        &self.cost
    }

    /// Salt field exactly as stored (base64 text)
    #[must_use]
    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Stored derived key
    #[must_use]
    pub fn key(&self) -> &[u8] {
        &self.key
    }
}

fn parse_positive<T>(name: &str, field: &str) -> Result<T>
where
    T: FromStr + Default + PartialEq,
{
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PasswordError::malformed(format!(
            "{name} is not a decimal integer: {field:?}"
        )));
    }
    let value = field
        .parse::<T>()
        .map_err(|_| PasswordError::malformed(format!("{name} is out of range: {field}")))?;
    if value == T::default() {
        return Err(PasswordError::malformed(format!("{name} must be positive")));
    }
    Ok(value)
}

impl fmt::Display for EncodedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = FIELD_SEPARATOR;
        write!(
            f,
            "{}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}",
            self.algorithm,
            self.cost.time_cost,
            self.cost.memory_cost,
            self.cost.parallelism,
            self.cost.key_len,
            self.salt,
            BASE64_STANDARD.encode(&*self.key)
        )
    }
}

impl fmt::Debug for EncodedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedHash")
            .field("algorithm", &self.algorithm)
            .field("cost", &self.cost)
            .field("salt", &self.salt)
            .field("key", &"<redacted>")
            .finish()
    }
}

impl FromStr for EncodedHash {
    type Err = PasswordError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SALT: &str = "c2FsdHNhbHRzYWx0c2FsdA==";
    const KEY: &str = "AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8=";

    fn record(fields: [&str; 5]) -> String {
        format!(
            "{}${}${}${}${}${SALT}${KEY}",
            fields[0], fields[1], fields[2], fields[3], fields[4]
        )
    }

    #[test]
    fn test_parse_and_display() {
        let text = record(["AptyID", "1", "65536", "10", "32"]);
        let parsed = EncodedHash::parse(&text).unwrap();
        assert_eq!(parsed.algorithm(), Algorithm::AptyId);
        assert_eq!(
            *parsed.cost(),
            Cost {
                time_cost: 1,
                memory_cost: 65536,
                parallelism: 10,
                key_len: 32
            }
        );
        assert_eq!(parsed.salt(), SALT);
        assert_eq!(parsed.key(), (0u8..32).collect::<Vec<_>>().as_slice());
        assert_eq!(parsed.to_string(), text);
    }

    #[test]
    fn test_field_count() {
        for text in ["", "not-enough-fields", "AptyID$1$1$1$1$AA==", "a$b$c$d$e$f$g$h"] {
            assert!(
                matches!(EncodedHash::parse(text), Err(PasswordError::MalformedRecord(_))),
                "{text:?}"
            );
        }
    }

    #[test]
    fn test_tag_checked_before_fields() {
        assert_eq!(
            EncodedHash::parse("UnknownAlgo$x$y$z$w$!!$!!").unwrap_err(),
            PasswordError::UnsupportedAlgorithm("UnknownAlgo".to_string())
        );
    }

    #[test]
    fn test_bad_integers_fail_closed() {
        let cases = [
            ["AptyID", "one", "65536", "10", "32"],
            ["AptyID", "0", "65536", "10", "32"],
            ["AptyID", "1", "", "10", "32"],
            ["AptyID", "1", "-65536", "10", "32"],
            ["AptyID", "1", "65536", "+10", "32"],
            ["AptyID", "1", "65536", "0", "32"],
            ["AptyID", "1", "99999999999", "10", "32"],
            ["AptyID", "1", "65536", "10", "3.2"],
            ["AptyID", "1", "8", "10", "32"],
        ];
        for fields in cases {
            let text = record(fields);
            assert!(
                matches!(EncodedHash::parse(&text), Err(PasswordError::MalformedRecord(_))),
                "{text}"
            );
        }
    }

    #[test]
    fn test_key_length_must_match() {
        let text = record(["AptyID", "1", "65536", "10", "16"]);
        assert!(matches!(
            EncodedHash::parse(&text),
            Err(PasswordError::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_bad_base64_rejected() {
        let bad_key = format!("AptyID$1$65536$10$32${SALT}$not*base64");
        let bad_salt = format!("AptyID$1$65536$10$32$not*base64*salt${KEY}");
        let short_salt = format!("AptyID$1$65536$10$32$AA==${KEY}");
        for text in [bad_key, bad_salt, short_salt] {
            assert!(
                matches!(EncodedHash::parse(&text), Err(PasswordError::MalformedRecord(_))),
                "{text}"
            );
        }
    }

    #[test]
    fn test_debug_redacts_key() {
        let parsed = EncodedHash::parse(&record(["AptyID", "1", "65536", "10", "32"])).unwrap();
        let debug = format!("{parsed:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains(KEY));
    }
}
