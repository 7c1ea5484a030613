//! Error types for the licensing module.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Licensing-specific errors.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// Issuer input rejected (empty identifiers, non-positive days).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The key could not be decoded, unframed, or parsed into claims.
    #[error("invalid license key format: {0}")]
    InvalidFormat(String),

    /// HMAC tag does not match the embedded claims.
    #[error("license key signature invalid")]
    InvalidSignature,

    /// The signature is valid but the license has expired.
    #[error("license expired on {0}")]
    Expired(String),

    /// Secret key or configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),
}

impl LicenseError {
    /// Returns the failure tag for this error.
    #[must_use]
    pub fn kind(&self) -> LicenseErrorKind {
        match self {
            Self::InvalidInput(_) => LicenseErrorKind::InvalidInput,
            Self::InvalidFormat(_) => LicenseErrorKind::InvalidFormat,
            Self::InvalidSignature => LicenseErrorKind::InvalidSignature,
            Self::Expired(_) => LicenseErrorKind::Expired,
            Self::Config(_) => LicenseErrorKind::Config,
        }
    }

    /// Returns the human-readable detail message.
    #[must_use]
    pub fn detail(&self) -> String {
        self.to_string()
    }
}

/// Tag identifying which check a license operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseErrorKind {
    /// See [`LicenseError::InvalidInput`].
    InvalidInput,
    /// See [`LicenseError::InvalidFormat`].
    InvalidFormat,
    /// See [`LicenseError::InvalidSignature`].
    InvalidSignature,
    /// See [`LicenseError::Expired`].
    Expired,
    /// See [`LicenseError::Config`].
    Config,
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
