//! Property tests for the record format and the verification contract

use aptyid_password::{EncodedHash, HashConfig, PasswordError, SaltedHasher, check, encode};
use proptest::prelude::*;

fn light_config() -> HashConfig {
    HashConfig::default()
        .with_memory_cost(32)
        .with_parallelism(1)
        .with_salt_len(16)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_own_password_verifies(password in proptest::collection::vec(any::<u8>(), 0..64)) {
        let hasher = SaltedHasher::new(light_config());
        let record = hasher.hash(&password).unwrap().to_string();
        prop_assert_eq!(check(&record, &password), Ok(true));
    }

    #[test]
    fn prop_other_password_is_mismatch(
        password in "[ -~]{0,32}",
        other in "[ -~]{0,32}",
    ) {
        prop_assume!(password != other);
        let hasher = SaltedHasher::new(light_config());
        let record = hasher.hash(&password).unwrap().to_string();
        let err = aptyid_password::verify(&record, &other).unwrap_err();
        prop_assert_eq!(err, PasswordError::PasswordMismatch);
    }

    #[test]
    fn prop_encoding_is_deterministic(
        password in "[ -~]{0,32}",
        raw_salt in proptest::collection::vec(any::<u8>(), 8..48),
    ) {
        use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};

        let salt = BASE64_STANDARD.encode(&raw_salt);
        let a = encode(&password, &salt, &light_config()).unwrap();
        let b = encode(&password, &salt, &light_config()).unwrap();
        prop_assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn prop_arbitrary_text_never_panics(text in "\\PC{0,96}") {
        match EncodedHash::parse(&text) {
            Ok(record) => prop_assert!(EncodedHash::parse(&record.to_string()).is_ok()),
            Err(PasswordError::MalformedRecord(_) | PasswordError::UnsupportedAlgorithm(_)) => {}
            Err(other) => prop_assert!(false, "unexpected parse error: {other}"),
        }
    }

    #[test]
    fn prop_dollar_count_decides_shape(fields in proptest::collection::vec("[A-Za-z0-9+/=]{1,8}", 1..12)) {
        prop_assume!(fields.len() != 7);
        let text = fields.join("$");
        prop_assert!(matches!(
            EncodedHash::parse(&text),
            Err(PasswordError::MalformedRecord(_))
        ));
    }
}
