//! HMAC-SHA256 signing and verification of canonical claim bytes.

use crate::error::{LicenseError, LicenseResult};
use crate::key::SecretKey;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Length of an HMAC-SHA256 tag in bytes.
pub const TAG_LEN: usize = 32;

/// An HMAC-SHA256 authentication tag.
pub type Tag = [u8; TAG_LEN];

/// Keyed MAC over arbitrary bytes.
///
/// The key schedule is computed once and cloned per message.
#[derive(Clone)]
pub struct Signer {
    mac: HmacSha256,
}

impl Signer {
    /// Creates a signer keyed with `key`.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Config`] if the key is rejected by HMAC.
    pub fn new(key: &SecretKey) -> LicenseResult<Self> {
        let mac = HmacSha256::new_from_slice(key.as_bytes())
            .map_err(|e| LicenseError::Config(format!("invalid HMAC key: {e}")))?;
        Ok(Self { mac })
    }

    /// Computes the tag for `message`. Deterministic for a given key.
    #[must_use]
    pub fn sign(&self, message: &[u8]) -> Tag {
        let mut mac = self.mac.clone();
        mac.update(message);
        let digest = mac.finalize().into_bytes();

        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&digest);
        tag
    }

    /// Checks `tag` against `message` in constant time.
    ///
    /// A tag of the wrong length is a mismatch, not an error.
    #[must_use]
    pub fn verify(&self, message: &[u8], tag: &[u8]) -> bool {
        let mut mac = self.mac.clone();
        mac.update(message);
        mac.verify_slice(tag).is_ok()
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("algorithm", &"HMAC-SHA256")
            .finish_non_exhaustive()
    }
}
