//! License key issuance.

use crate::claims::Claims;
use crate::clock::{Clock, SystemClock};
use crate::config::LicenseConfig;
use crate::error::{LicenseError, LicenseResult};
use crate::signer::Signer;
use crate::token::encode_token;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Display summary of a freshly issued license.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseSummary {
    /// Licensed server identifier.
    pub server_id: String,
    /// License owner.
    pub owner_name: String,
    /// Expiry as RFC 3339 UTC (`2027-10-19T08:00:00Z`).
    pub expires_at: String,
    /// Validity window in days.
    pub days: i64,
    /// The formatted license key.
    pub token: String,
}

/// A signed license key with the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedLicense {
    /// The formatted license key.
    pub token: String,
    /// Human-readable summary for display.
    pub summary: LicenseSummary,
    /// The signed claims.
    pub claims: Claims,
}

/// Issues license keys signed with the shared secret.
#[derive(Clone)]
pub struct LicenseIssuer {
    signer: Signer,
    clock: Arc<dyn Clock>,
}

impl LicenseIssuer {
    /// Creates an issuer using the system clock.
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

    /// Replaces the clock used for `generated_at`.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Issues a license for `server_id` valid for `days` days from now.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidInput`] if `server_id` or `owner_name`
    /// is blank, or `days` is not positive.
    pub fn issue(
        &self,
        server_id: &str,
        owner_name: &str,
        days: i64,
    ) -> LicenseResult<IssuedLicense> {
        if server_id.trim().is_empty() {
            return Err(LicenseError::InvalidInput("server ID must not be empty".to_string()));
        }
        if owner_name.trim().is_empty() {
            return Err(LicenseError::InvalidInput("owner name must not be empty".to_string()));
        }
        if days <= 0 {
            return Err(LicenseError::InvalidInput(format!(
                "days must be positive, got {days}"
            )));
        }

        let now = self.clock.now_secs();
        let claims = Claims::new(server_id, owner_name, now, days)?;
        let token = self.sign_claims(&claims)?;

        debug!(
            server_id = claims.server_id(),
            expires_at = claims.expires_at(),
            days,
            "issued license key"
        );

        let summary = LicenseSummary {
            server_id: claims.server_id().to_string(),
            owner_name: claims.owner_name().to_string(),
            expires_at: claims.expires_at_rfc3339(),
            days,
            token: token.clone(),
        };

        Ok(IssuedLicense {
            token,
            summary,
            claims,
        })
    }

    /// Signs and encodes an arbitrary claim set without validating it.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidInput`] if the claims cannot be encoded.
    pub fn sign_claims(&self, claims: &Claims) -> LicenseResult<String> {
        let message = claims.to_canonical_bytes()?;
        let tag = self.signer.sign(&message);
        encode_token(&message, &tag)
    }
}

impl std::fmt::Debug for LicenseIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LicenseIssuer")
            .field("signer", &self.signer)
            .finish_non_exhaustive()
    }
}
