//! Licensing for the Notes Service.
//!
//! This crate handles:
//! - Issuing license keys bound to a server ID and owner name
//! - Offline verification of license keys via HMAC-SHA256
//! - Expiry enforcement against an injectable clock
//!
//! # Design Principles
//!
//! - **Shared secret**: the issuing tool and the verifying server hold the
//!   same [`SecretKey`]; a mismatch surfaces as an invalid signature
//! - **Self-contained keys**: everything needed to verify travels in the key
//!   itself, there is no license database
//! - **Explicit configuration**: the secret is passed in through
//!   [`LicenseConfig`], never read from a global
//!
//! # License Key Format
//!
//! The signed bytes are framed as `len(u32 BE) || claims_json || hmac_tag`,
//! encoded with the URL-safe base64 alphabet and split into 4-character
//! groups joined by `-`:
//!
//! ```text
//! AAAA-cXsi-ZGF5-cyI6-MzY1-LCJl-eHBp-...
//! ```
//!
//! The claims JSON is compact with keys sorted:
//! `{"days":..,"expires_at":..,"generated_at":..,"owner_name":"..","server_id":".."}`.

mod claims;
mod clock;
mod config;
mod error;
mod issuer;
mod key;
mod signer;
mod token;
mod verifier;

pub use claims::{Claims, SECS_PER_DAY};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{LicenseConfig, SECRET_KEY_ENV};
pub use error::{LicenseError, LicenseErrorKind, LicenseResult};
pub use issuer::{IssuedLicense, LicenseIssuer, LicenseSummary};
pub use key::SecretKey;
pub use signer::{Signer, Tag, TAG_LEN};
pub use token::{
    decode_token, encode_token, format_groups, strip_groups, GROUP_LEN, GROUP_SEPARATOR,
};
pub use verifier::{LicenseVerifier, VerificationReport};
