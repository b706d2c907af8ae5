//! Password-reset token generation.
//!
//! The plain token is handed to the user out of band; only its SHA-256
//! digest is persisted on the `User` record, alongside a 10-minute
//! expiry.

use chrono::{DateTime, TimeDelta, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};

use quill_core::domain::User;

/// Lifetime of a freshly issued reset token.
const RESET_TOKEN_TTL_MINUTES: i64 = 10;

/// A freshly generated reset token pair.
#[derive(Debug, Clone)]
pub struct ResetToken {
    /// The token to hand to the user. Never persisted.
    pub plain: String,
    /// SHA-256 hex digest to store on the user record.
    pub hash: String,
    pub expires_at: DateTime<Utc>,
}

/// Generate a reset token (20 random bytes, hex-encoded) and assign its
/// digest and expiry to the user.
pub fn generate_reset_token(user: &mut User) -> ResetToken {
    let mut bytes = [0u8; 20];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    let plain = hex::encode(bytes);
    let hash = hash_reset_token(&plain);
    let expires_at = Utc::now() + TimeDelta::minutes(RESET_TOKEN_TTL_MINUTES);

    user.reset_token_hash = Some(hash.clone());
    user.reset_token_expires = Some(expires_at);
    user.updated_at = Utc::now();

    ResetToken {
        plain,
        hash,
        expires_at,
    }
}

/// Digest a plain reset token for storage or comparison.
pub fn hash_reset_token(plain: &str) -> String {
    hex::encode(Sha256::digest(plain.as_bytes()))
}
