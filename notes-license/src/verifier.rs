//! License key verification.
//!
//! Checks run in a fixed order and the first failure wins:
//! decode and unframe, signature, claims structure, expiry. Claims are only
//! parsed once the signature has been accepted.

use crate::claims::Claims;
use crate::clock::{Clock, SystemClock};
use crate::config::LicenseConfig;
use crate::error::{LicenseError, LicenseErrorKind, LicenseResult};
use crate::signer::Signer;
use crate::token::decode_token;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of verifying a license key, in a displayable form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// True if the key verified and has not expired.
    pub valid: bool,
    /// Failure tag, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<LicenseErrorKind>,
    /// Failure message, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// The verified claims, if valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claims: Option<Claims>,
}

impl From<LicenseResult<Claims>> for VerificationReport {
    fn from(result: LicenseResult<Claims>) -> Self {
        match result {
            Ok(claims) => Self {
                valid: true,
                kind: None,
                detail: None,
                claims: Some(claims),
            },
            Err(e) => Self {
                valid: false,
                kind: Some(e.kind()),
                detail: Some(e.detail()),
                claims: None,
            },
        }
    }
}

/// Verifies license keys signed with the shared secret.
#[derive(Clone)]
pub struct LicenseVerifier {
    signer: Signer,
    clock: Arc<dyn Clock>,
}

impl LicenseVerifier {
    /// Creates a verifier using the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Config`] if the secret key is unusable.
    pub fn new(config: &LicenseConfig) -> LicenseResult<Self> {
        Ok(Self {
            signer: Signer::new(&config.secret_key)?,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replaces the clock used for expiry checks.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Verifies `token` and returns its claims.
    ///
    /// Accepts keys with or without readability separators.
    ///
    /// # Errors
    ///
    /// - [`LicenseError::InvalidFormat`] if the key cannot be decoded,
    ///   unframed, or parsed into claims
    /// - [`LicenseError::InvalidSignature`] if the tag does not match
    /// - [`LicenseError::Expired`] if `expires_at` is before now
    pub fn verify(&self, token: &str) -> LicenseResult<Claims> {
        let (message, tag) = decode_token(token).inspect_err(|e| {
            debug!(error = %e, "rejected malformed license key");
        })?;

        if !self.signer.verify(&message, &tag) {
            warn!("license key signature mismatch");
            return Err(LicenseError::InvalidSignature);
        }

        let claims = Claims::from_canonical_bytes(&message).inspect_err(|e| {
            warn!(error = %e, "signed license key carries malformed claims");
        })?;

        let now = self.clock.now_secs();
        if claims.is_expired_at(now) {
            warn!(
                server_id = claims.server_id(),
                expires_at = claims.expires_at(),
                "license key expired"
            );
            return Err(LicenseError::Expired(claims.expires_at_rfc3339()));
        }

        debug!(
            server_id = claims.server_id(),
            expires_at = claims.expires_at(),
            "license key verified"
        );
        Ok(claims)
    }

    /// Verifies `token` and folds the outcome into a report.
    #[must_use]
    pub fn inspect(&self, token: &str) -> VerificationReport {
        self.verify(token).into()
    }
}

impl std::fmt::Debug for LicenseVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LicenseVerifier")
            .field("signer", &self.signer)
            .finish_non_exhaustive()
    }
}
