//! Shared-password gate primitives.
//!
//! The admin panel is protected by a single shared password. Only its SHA-256
//! hex digest is ever stored. A successful login sets a session cookie whose
//! value is an HMAC of the current password hash, so changing the password
//! invalidates every outstanding session.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::error::CoreError;

type HmacSha256 = Hmac<Sha256>;

/// Fixed key for password digest comparison.
const PASSWORD_MAC_KEY: &[u8] = b"admin-password-check";

/// Minimum accepted length for a new admin password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash a plaintext password into the stored representation.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Compare a candidate password with a stored hex hash.
///
/// Both digests go through the MAC so the final comparison is the
/// constant-time one from [`Mac::verify_slice`].
pub fn verify_password(candidate: &str, stored_hash: &str) -> bool {
    let stored = password_mac(&stored_hash.to_ascii_lowercase()).finalize().into_bytes();
    password_mac(&hash_password(candidate))
        .verify_slice(&stored)
        .is_ok()
}

fn password_mac(hash: &str) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(PASSWORD_MAC_KEY)
        .expect("HMAC-SHA256 accepts keys of any length");
    mac.update(hash.as_bytes());
    mac
}

fn session_mac(secret: &str, password_hash: &str) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC-SHA256 accepts keys of any length");
    mac.update(password_hash.as_bytes());
    mac
}

/// Derive the session cookie value (hex HMAC) for the given password hash.
pub fn session_token(secret: &str, password_hash: &str) -> String {
    hex::encode(session_mac(secret, password_hash).finalize().into_bytes())
}

/// Check a presented cookie value against the session token for
/// `password_hash`. Malformed hex never verifies.
pub fn verify_session_token(secret: &str, password_hash: &str, presented: &str) -> bool {
    let Ok(tag) = hex::decode(presented) else {
        return false;
    };
    session_mac(secret, password_hash).verify_slice(&tag).is_ok()
}

/// Validate that a new password meets the minimum requirements.
pub fn validate_new_password(password: &str, min_length: usize) -> Result<(), CoreError> {
    if password.trim().is_empty() {
        return Err(CoreError::Validation("Password must not be empty".into()));
    }
    if password.chars().count() < min_length {
        return Err(CoreError::Validation(format!(
            "Password must be at least {min_length} characters long"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_lowercase_sha256_hex() {
        assert_eq!(
            hash_password("password"),
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
    }

    #[test]
    fn correct_password_verifies() {
        let stored = hash_password("throttle-open");
        assert!(verify_password("throttle-open", &stored));
    }

    #[test]
    fn wrong_password_fails() {
        let stored = hash_password("throttle-open");
        assert!(!verify_password("throttle-closed", &stored));
        assert!(!verify_password("", &stored));
    }

    #[test]
    fn stored_hash_comparison_ignores_hex_case() {
        let stored = hash_password("secret").to_uppercase();
        assert!(verify_password("secret", &stored));
    }

    #[test]
    fn session_token_is_stable_and_bound_to_hash() {
        let a = session_token("key", &hash_password("one"));
        let b = session_token("key", &hash_password("one"));
        let c = session_token("key", &hash_password("two"));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn session_token_depends_on_secret() {
        let hash = hash_password("one");
        assert_ne!(session_token("alpha", &hash), session_token("bravo", &hash));
    }

    #[test]
    fn verify_session_token_rejects_prefix_and_garbage() {
        let token = session_token("key", "hash");
        assert!(verify_session_token("key", "hash", &token));
        assert!(verify_session_token("key", "hash", &token.to_uppercase()));
        assert!(!verify_session_token("key", "hash", &token[..10]));
        assert!(!verify_session_token("key", "hash", "authenticated"));
        assert!(!verify_session_token("key", "other-hash", &token));
        assert!(!verify_session_token("other-key", "hash", &token));
    }

    #[test]
    fn new_password_too_short() {
        let err = validate_new_password("short", 8).unwrap_err();
        assert!(err.to_string().contains("at least 8 characters"));
    }

    #[test]
    fn new_password_blank_rejected() {
        assert!(validate_new_password("        ", 4).is_err());
    }

    #[test]
    fn new_password_at_minimum_accepted() {
        assert!(validate_new_password("eightchr", 8).is_ok());
    }
}
