//! Secret fingerprinting.
//!
//! The configured credential is stored as a fingerprint of the secret, never
//! the secret itself. A presented secret is fingerprinted with the same key
//! and compared.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use common::{AppError, AppResult};

type HmacSha256 = Hmac<Sha256>;

/// Base64 of HMAC-SHA256(`key`, `secret`).
///
/// Same inputs always give the same output. An empty secret is fingerprinted
/// like any other.
pub fn fingerprint_secret(secret: &str, key: &[u8]) -> AppResult<String> {
    Ok(STANDARD.encode(keyed(secret, key)?.finalize().into_bytes()))
}

/// Whether `secret` fingerprints to `fingerprint` under `key`.
///
/// The digest comparison runs in constant time. A fingerprint that is not
/// valid base64 never matches.
pub fn verify_fingerprint(secret: &str, key: &[u8], fingerprint: &str) -> AppResult<bool> {
    let Ok(expected) = STANDARD.decode(fingerprint) else {
        return Ok(false);
    };
    Ok(keyed(secret, key)?.verify_slice(&expected).is_ok())
}

fn keyed(secret: &str, key: &[u8]) -> AppResult<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| AppError::internal(format!("fingerprint key rejected: {}", e)))?;
    mac.update(secret.as_bytes());
    Ok(mac)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"0123456789abcdef0123456789abcdef";

    #[test]
    fn test_fingerprint_is_deterministic() {
        let first = fingerprint_secret("hunter2", KEY).unwrap();
        let second = fingerprint_secret("hunter2", KEY).unwrap();

        assert_eq!(first, second);
        // 32-byte digest, padded base64
        assert_eq!(first.len(), 44);
    }

    #[test]
    fn test_fingerprint_depends_on_secret_and_key() {
        let base = fingerprint_secret("hunter2", KEY).unwrap();

        assert_ne!(base, fingerprint_secret("hunter3", KEY).unwrap());
        assert_ne!(base, fingerprint_secret("hunter2", b"another-signing-key!").unwrap());
    }

    #[test]
    fn test_empty_secret_is_fingerprinted() {
        let fp = fingerprint_secret("", KEY).unwrap();
        assert!(!fp.is_empty());
    }

    #[test]
    fn test_verify_matches_only_the_fingerprinted_secret() {
        let fp = fingerprint_secret("hunter2", KEY).unwrap();

        assert!(verify_fingerprint("hunter2", KEY, &fp).unwrap());
        assert!(!verify_fingerprint("hunter3", KEY, &fp).unwrap());
        assert!(!verify_fingerprint("hunter2", KEY, "not base64!").unwrap());
        assert!(!verify_fingerprint("hunter2", KEY, "").unwrap());
    }
}
