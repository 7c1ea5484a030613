//! The licensed fact set and its canonical byte form.
//!
//! Both sides of the MAC must see identical bytes, so claims are encoded as
//! compact JSON with keys in lexicographic order. `serde_json` escapes every
//! string, which keeps distinct claim sets from colliding.

use crate::error::{LicenseError, LicenseResult};
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Seconds in one license day.
pub const SECS_PER_DAY: i64 = 24 * 60 * 60;

/// The claims bound into a license key.
///
/// Field declaration order is the canonical key order and must stay sorted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Claims {
    days: i64,
    expires_at: i64,
    generated_at: i64,
    owner_name: String,
    server_id: String,
}

impl Claims {
    /// Builds claims valid for `days` days from `generated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidInput`] if the expiry overflows.
    pub fn new(
        server_id: impl Into<String>,
        owner_name: impl Into<String>,
        generated_at: i64,
        days: i64,
    ) -> LicenseResult<Self> {
        let expires_at = days
            .checked_mul(SECS_PER_DAY)
            .and_then(|secs| generated_at.checked_add(secs))
            .ok_or_else(|| LicenseError::InvalidInput(format!("{days} days is out of range")))?;

        Ok(Self::from_parts(
            server_id,
            owner_name,
            expires_at,
            generated_at,
            days,
        ))
    }

    /// Assembles claims from explicit fields without deriving the expiry.
    #[must_use]
    pub fn from_parts(
        server_id: impl Into<String>,
        owner_name: impl Into<String>,
        expires_at: i64,
        generated_at: i64,
        days: i64,
    ) -> Self {
        Self {
            days,
            expires_at,
            generated_at,
            owner_name: owner_name.into(),
            server_id: server_id.into(),
        }
    }

    /// Returns the licensed server identifier.
    #[must_use]
    pub fn server_id(&self) -> &str {
        &self.server_id
    }

    /// Returns the license owner's display name.
    #[must_use]
    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    /// Returns the expiry (Unix seconds, UTC).
    #[must_use]
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    /// Returns the issue time (Unix seconds, UTC).
    #[must_use]
    pub fn generated_at(&self) -> i64 {
        self.generated_at
    }

    /// Returns the validity window in days.
    #[must_use]
    pub fn days(&self) -> i64 {
        self.days
    }

    /// Returns true if the license has expired at `now_secs`.
    #[must_use]
    pub fn is_expired_at(&self, now_secs: i64) -> bool {
        self.expires_at < now_secs
    }

    /// Returns the expiry as a UTC datetime, if representable.
    #[must_use]
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.expires_at, 0).single()
    }

    /// Returns the expiry as RFC 3339 (`2026-10-19T12:00:00Z`).
    ///
    /// Falls back to the raw Unix seconds when out of chrono's range.
    #[must_use]
    pub fn expires_at_rfc3339(&self) -> String {
        self.expires_at_utc()
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_else(|| self.expires_at.to_string())
    }

    /// Encodes the claims as canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidInput`] if serialization fails.
    pub fn to_canonical_bytes(&self) -> LicenseResult<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| LicenseError::InvalidInput(format!("cannot encode claims: {e}")))
    }

    /// Decodes claims from their canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidFormat`] if the bytes are not a
    /// complete claims object.
    pub fn from_canonical_bytes(bytes: &[u8]) -> LicenseResult<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| LicenseError::InvalidFormat(format!("invalid claims JSON: {e}")))
    }
}
