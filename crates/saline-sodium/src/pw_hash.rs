//! Argon2 password hashing (`crypto_pwhash`).
//!
//! Encoded hash strings are self-describing (`$argon2id$v=19$m=...`) and
//! should be stored verbatim.

use saline_core::{params::pw_hash::SALT_BYTES, PwHashAlgorithm, PwHashPreset, PwHashSalt, Result};

use crate::sodium::{safe, Initialized};

#[derive(Debug, Clone, Copy)]
pub struct PwHash {
    _init: Initialized,
}

impl PwHash {
    pub(crate) fn new(init: Initialized) -> Self {
        Self { _init: init }
    }

    /// Hashes `password` into an encoded string with a random salt.
    /// Fails with `InvalidLimits` if either limit is outside what libsodium accepts.
    pub fn hash_str(&self, password: &[u8], ops_limit: u64, mem_limit: usize) -> Result<String> {
        safe::pwhash_str(password, ops_limit, mem_limit)
    }

    pub fn hash_str_with_preset(&self, password: &[u8], preset: PwHashPreset) -> Result<String> {
        self.hash_str(password, preset.ops_limit(), preset.mem_limit())
    }

    /// False on mismatch and on any malformed `encoded` string.
    pub fn verify_str(&self, encoded: &str, password: &[u8]) -> bool {
        safe::pwhash_str_verify(encoded, password)
    }

    /// True if `encoded` was produced with parameters other than the given ones.
    pub fn needs_rehash(&self, encoded: &str, ops_limit: u64, mem_limit: usize) -> Result<bool> {
        safe::pwhash_str_needs_rehash(encoded, ops_limit, mem_limit)
    }

    pub fn salt(&self) -> PwHashSalt {
        let mut salt = [0u8; SALT_BYTES];
        safe::random_bytes(&mut salt);
        PwHashSalt(salt)
    }

    /// Derives `output_len` bytes of key material from a password and salt.
    pub fn derive_key(
        &self,
        output_len: usize,
        password: &[u8],
        salt: &PwHashSalt,
        ops_limit: u64,
        mem_limit: usize,
        algorithm: PwHashAlgorithm,
    ) -> Result<Vec<u8>> {
        safe::pwhash(output_len, password, salt, ops_limit, mem_limit, algorithm.id())
    }
}
