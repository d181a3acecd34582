//! SipHash-2-4 (`crypto_shorthash`).
//!
//! Meant for hash-table and bloom-filter hardening against flooding, not for
//! message authentication.

use saline_core::{Result, ShortHashDigest, ShortHashKey};

use crate::sodium::{safe, Initialized};

#[derive(Debug, Clone, Copy)]
pub struct ShortHash {
    _init: Initialized,
}

impl ShortHash {
    pub(crate) fn new(init: Initialized) -> Self {
        Self { _init: init }
    }

    pub fn key(&self) -> ShortHashKey {
        safe::shorthash_keygen()
    }

    pub fn hash(&self, message: &[u8], key: &ShortHashKey) -> Result<ShortHashDigest> {
        safe::shorthash(message, key)
    }
}
