//! The shared secret that anchors license signatures.

use crate::error::{LicenseError, LicenseResult};
use serde::Deserialize;
use tracing::warn;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Development key shared with the legacy generator script.
const DEVELOPMENT_KEY: &[u8] = b"notes-service-license-secret-key-change-in-production";

/// HMAC secret with automatic zeroization on drop.
///
/// The issuing tool and every verifying server must hold byte-identical keys.
#[derive(Clone, Zeroize, ZeroizeOnDrop, Deserialize)]
#[serde(try_from = "String")]
pub struct SecretKey {
    bytes: Vec<u8>,
}

impl SecretKey {
    /// Creates a secret key from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Config`] if `bytes` is empty.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> LicenseResult<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(LicenseError::Config("secret key must not be empty".to_string()));
        }
        Ok(Self { bytes })
    }

    /// Returns the well-known development key.
    ///
    /// Anyone can forge licenses for a server configured with this key.
    #[must_use]
    pub fn development() -> Self {
        warn!("using the built-in development license key; do not deploy this");
        Self {
            bytes: DEVELOPMENT_KEY.to_vec(),
        }
    }

    /// Returns the key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the key length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false; empty keys are rejected at construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl TryFrom<String> for SecretKey {
    type Error = LicenseError;

    fn try_from(value: String) -> LicenseResult<Self> {
        Self::from_bytes(value.into_bytes())
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
