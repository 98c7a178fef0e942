//! Bearer token rules.
//!
//! Everything here is a pure function of the token state and `now`, so the
//! lifecycle can be tested without a clock.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::constants::tokens::{REVOKE_BACKDATE_SECONDS, TOKEN_BYTES};

/// Generate a new token: 24 bytes from the thread CSPRNG, base64-encoded.
#[must_use]
pub fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; TOKEN_BYTES] = rng.random();
    STANDARD.encode(bytes)
}

/// A token is live while its expiration is strictly after `now`.
#[must_use]
pub fn is_token_live(expiration: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    expiration.is_some_and(|expires| expires > now)
}

/// Whether an existing token may be handed out again instead of rotating.
/// It must exist and stay live for more than `threshold` past `now`.
#[must_use]
pub fn can_reuse_token(
    token: Option<&str>,
    expiration: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    threshold: Duration,
) -> bool {
    token.is_some() && is_token_live(expiration, now + threshold)
}

/// Expiration to store when revoking: just behind `now`.
#[must_use]
pub fn revoked_expiration(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::seconds(REVOKE_BACKDATE_SECONDS)
}
