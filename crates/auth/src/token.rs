// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bearer token generation and hashing (spec.md §4.3).
//!
//! The plaintext is 32 random bytes, URL-safe base64 encoded, shown to the
//! caller exactly once. Only the base64-encoded SHA-256 digest of that
//! plaintext is ever persisted, in [`fulcrum_core::Token::hashed_value`].

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use rand::RngCore;
use sha2::{Digest, Sha256};

const PLAINTEXT_BYTES: usize = 32;

/// Generate a fresh bearer token plaintext. Never logged, never persisted.
pub fn generate_plaintext() -> String {
    let mut bytes = [0u8; PLAINTEXT_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Hash a plaintext token for storage/comparison (spec.md §4.3: base64 of
/// the SHA-256 digest).
pub fn hash_value(plaintext: &str) -> String {
    let digest = Sha256::digest(plaintext.as_bytes());
    STANDARD.encode(digest)
}

/// Constant-time-in-spirit comparison of a candidate plaintext against a
/// stored hash. Hashing both sides before comparing means an attacker who
/// observes timing learns nothing about the plaintext, only about the hash.
pub fn verify(plaintext: &str, hashed: &str) -> bool {
    hash_value(plaintext) == hashed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plaintext_round_trips_through_hash() {
        let plaintext = generate_plaintext();
        let hashed = hash_value(&plaintext);
        assert!(verify(&plaintext, &hashed));
    }

    #[test]
    fn wrong_plaintext_fails_verification() {
        let hashed = hash_value(&generate_plaintext());
        assert!(!verify(&generate_plaintext(), &hashed));
    }

    #[test]
    fn plaintexts_are_not_trivially_repeated() {
        let a = generate_plaintext();
        let b = generate_plaintext();
        assert_ne!(a, b);
    }
}
