//! Cryptographic utilities for admin key checks and token generation.

use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Computes SHA-256 hash of the input and returns it as a hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compares two secrets by their SHA-256 digests.
///
/// Hashing first keeps the comparison length-independent of the secret,
/// so a simple equality check does not leak the secret's length.
pub fn secrets_match(candidate: &str, expected: &str) -> bool {
    sha256_hex(candidate) == sha256_hex(expected)
}

/// Generates a random alphanumeric token of the given length.
pub fn generate_token(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex() {
        let hash = sha256_hex("test");
        assert_eq!(hash.len(), 64);
        assert_eq!(
            hash,
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
    }

    #[test]
    fn test_sha256_hex_empty_string() {
        let hash = sha256_hex("");
        assert_eq!(hash.len(), 64);
        // SHA256 of empty string
        assert_eq!(
            hash,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha256_hex_deterministic() {
        let hash1 = sha256_hex("same_input");
        let hash2 = sha256_hex("same_input");
        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_secrets_match() {
        assert!(secrets_match("fs_admin_abc123", "fs_admin_abc123"));
        assert!(!secrets_match("fs_admin_abc123", "fs_admin_abc124"));
        assert!(!secrets_match("", "fs_admin_abc123"));
    }

    #[test]
    fn test_generate_token_length() {
        assert_eq!(generate_token(32).len(), 32);
        assert_eq!(generate_token(0).len(), 0);
    }

    #[test]
    fn test_generate_token_alphanumeric() {
        let token = generate_token(64);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_token_unique() {
        assert_ne!(generate_token(32), generate_token(32));
    }
}
