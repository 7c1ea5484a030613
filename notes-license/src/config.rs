//! Loading the license secret from the environment or a config file.
//!
//! The caller reads the configuration once at startup and hands it to
//! [`LicenseIssuer`](crate::LicenseIssuer) and
//! [`LicenseVerifier`](crate::LicenseVerifier). Nothing here is cached.

use crate::error::{LicenseError, LicenseResult};
use crate::key::SecretKey;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Environment variable holding the shared secret.
pub const SECRET_KEY_ENV: &str = "NOTES_LICENSE_SECRET_KEY";

/// License signing configuration.
///
/// File form:
///
/// ```json
/// { "secret_key": "..." }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LicenseConfig {
    /// Shared HMAC secret.
    pub secret_key: SecretKey,
}

impl LicenseConfig {
    /// Creates a config from an already-loaded key.
    #[must_use]
    pub fn new(secret_key: SecretKey) -> Self {
        Self { secret_key }
    }

    /// Reads the secret from [`SECRET_KEY_ENV`].
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Config`] if the variable is unset, not UTF-8,
    /// or empty.
    pub fn from_env() -> LicenseResult<Self> {
        let value = std::env::var(SECRET_KEY_ENV)
            .map_err(|e| LicenseError::Config(format!("{SECRET_KEY_ENV}: {e}")))?;
        let secret_key = SecretKey::try_from(value)?;
        debug!(key_len = secret_key.len(), "loaded license secret from environment");
        Ok(Self { secret_key })
    }

    /// Parses a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Config`] if the JSON is malformed or the key
    /// is empty.
    pub fn from_json_str(json: &str) -> LicenseResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| LicenseError::Config(format!("invalid license config: {e}")))
    }

    /// Reads and parses a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> LicenseResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| LicenseError::Config(format!("{}: {e}", path.display())))?;
        let config = Self::from_json_str(&json)?;
        debug!(path = %path.display(), "loaded license config");
        Ok(config)
    }
}
