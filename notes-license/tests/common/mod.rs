//! Shared test helpers for license tests.

#![allow(dead_code)]

use notes_license::{
    decode_token, encode_token, FixedClock, LicenseConfig, LicenseIssuer, LicenseVerifier,
    SecretKey, Tag,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Fixed issue time used across tests: 2025-10-09T08:53:20Z.
pub const T0: i64 = 1_760_000_000;

/// Returns a config with a deterministic test secret.
pub fn test_config() -> LicenseConfig {
    config_with_key(b"test-license-secret")
}

/// Returns a config for the given raw key.
pub fn config_with_key(key: &[u8]) -> LicenseConfig {
    LicenseConfig::new(SecretKey::from_bytes(key.to_vec()).unwrap())
}

/// Returns a clock frozen at [`T0`].
pub fn clock_at_t0() -> Arc<FixedClock> {
    Arc::new(FixedClock::at_secs(T0))
}

/// Routes license logs to the test harness; `RUST_LOG=notes_license=debug` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Builds an issuer and verifier sharing one config and one clock.
pub fn pair_with_clock(
    config: &LicenseConfig,
    clock: Arc<FixedClock>,
) -> (LicenseIssuer, LicenseVerifier) {
    init_tracing();
    let issuer = LicenseIssuer::new(config).unwrap().with_clock(clock.clone());
    let verifier = LicenseVerifier::new(config).unwrap().with_clock(clock);
    (issuer, verifier)
}

/// Issues the reference license at [`T0`] with the test key.
pub fn reference_token() -> String {
    let (issuer, _) = pair_with_clock(&test_config(), clock_at_t0());
    issuer.issue("ABC123DEF456", "John Doe", 365).unwrap().token
}

/// Flips one bit in `message || tag` and re-encodes the key.
pub fn flip_bit(token: &str, bit: usize) -> String {
    let (mut message, mut tag) = decode_token(token).unwrap();
    let byte = bit / 8;
    let mask = 1u8 << (bit % 8);
    if byte < message.len() {
        message[byte] ^= mask;
    } else {
        tag[byte - message.len()] ^= mask;
    }
    encode_token(&message, &tag).unwrap()
}

/// Frames and encodes `message` with an explicit tag.
pub fn encode_raw(message: &[u8], tag: &Tag) -> String {
    encode_token(message, tag).unwrap()
}
