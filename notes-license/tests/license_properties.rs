//! Property-based tests for license issuance and verification.
//!
//! These tests verify security properties that must always hold:
//! - Issued keys verify with the same secret
//! - Any flipped bit in the claims or tag is detected
//! - Keys signed under one secret never verify under another
//! - Arbitrary input never panics the verifier

mod common;

use common::{clock_at_t0, config_with_key, flip_bit, pair_with_clock, reference_token, test_config, T0};
use notes_license::{decode_token, LicenseErrorKind, SECS_PER_DAY};
use proptest::prelude::*;

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn server_id_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z0-9][A-Za-z0-9_.:-]{0,40}").unwrap()
}

fn owner_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z][A-Za-z0-9 ,.'\"|\\\\éü中文-]{0,60}").unwrap()
}

fn days_strategy() -> impl Strategy<Value = i64> {
    1i64..=36_500
}

fn key_strategy() -> impl Strategy<Value = [u8; 32]> {
    prop::array::uniform32(any::<u8>())
}

// =============================================================================
// ROUNDTRIP PROPERTIES
// =============================================================================

mod roundtrip_properties {
    use super::*;

    proptest! {
        /// Issued keys verify and carry the inputs back out
        #[test]
        fn issue_then_verify(
            server_id in server_id_strategy(),
            owner_name in owner_name_strategy(),
            days in days_strategy(),
        ) {
            let (issuer, verifier) = pair_with_clock(&test_config(), clock_at_t0());
            let issued = issuer.issue(&server_id, &owner_name, days).unwrap();
            let claims = verifier.verify(&issued.token).unwrap();

            prop_assert_eq!(claims.server_id(), server_id.as_str());
            prop_assert_eq!(claims.owner_name(), owner_name.as_str());
            prop_assert_eq!(claims.days(), days);
            prop_assert_eq!(claims.generated_at(), T0);
            prop_assert_eq!(claims.expires_at(), T0 + days * SECS_PER_DAY);
        }

        /// Keys are rejected as expired one second after their window
        #[test]
        fn expires_after_window(days in days_strategy()) {
            let clock = clock_at_t0();
            let (issuer, verifier) = pair_with_clock(&test_config(), clock.clone());
            let token = issuer.issue("srv", "owner", days).unwrap().token;

            clock.advance_secs(days * SECS_PER_DAY);
            prop_assert!(verifier.verify(&token).is_ok());

            clock.advance_secs(1);
            let err = verifier.verify(&token).unwrap_err();
            prop_assert_eq!(err.kind(), LicenseErrorKind::Expired);
        }
    }
}

// =============================================================================
// TAMPER PROPERTIES
// =============================================================================

mod tamper_properties {
    use super::*;

    proptest! {
        /// Flipping any bit of the claims or tag breaks the signature
        #[test]
        fn any_bit_flip_detected(seed in any::<usize>()) {
            let token = reference_token();
            let (message, tag) = decode_token(&token).unwrap();
            let bit = seed % ((message.len() + tag.len()) * 8);

            let (_, verifier) = pair_with_clock(&test_config(), clock_at_t0());
            let err = verifier.verify(&flip_bit(&token, bit)).unwrap_err();
            prop_assert_eq!(err.kind(), LicenseErrorKind::InvalidSignature);
        }

        /// A key signed under one secret never verifies under another
        #[test]
        fn key_sensitivity(
            key_a in key_strategy(),
            key_b in key_strategy(),
            server_id in server_id_strategy(),
            days in days_strategy(),
        ) {
            prop_assume!(key_a != key_b);

            let (issuer, _) = pair_with_clock(&config_with_key(&key_a), clock_at_t0());
            let (_, verifier) = pair_with_clock(&config_with_key(&key_b), clock_at_t0());

            let token = issuer.issue(&server_id, "owner", days).unwrap().token;
            let err = verifier.verify(&token).unwrap_err();
            prop_assert_eq!(err.kind(), LicenseErrorKind::InvalidSignature);
        }
    }
}

// =============================================================================
// ROBUSTNESS PROPERTIES
// =============================================================================

mod robustness_properties {
    use super::*;

    proptest! {
        /// Arbitrary text is rejected as malformed, never a panic
        #[test]
        fn garbage_is_invalid_format(input in "\\PC{0,200}") {
            let (_, verifier) = pair_with_clock(&test_config(), clock_at_t0());
            let err = verifier.verify(&input).unwrap_err();
            prop_assert_eq!(err.kind(), LicenseErrorKind::InvalidFormat);
        }

        /// Well-formed base64 of the wrong shape is still malformed
        #[test]
        fn base64_garbage_is_invalid_format(input in "[A-Za-z0-9_-]{0,120}") {
            let (_, verifier) = pair_with_clock(&test_config(), clock_at_t0());
            let err = verifier.verify(&input).unwrap_err();
            prop_assert_eq!(err.kind(), LicenseErrorKind::InvalidFormat);
        }
    }
}
