//! Primitive parameters. These mirror libsodium's compile-time constants for
//! the default primitive of each family; saline-sodium checks them against
//! the linked library at test time.

use std::{fmt, str::FromStr};

use crate::error::UnknownPreset;

/// `crypto_box` (X25519-XSalsa20-Poly1305).
pub mod crypto_box {
    pub const PUBLIC_KEY_BYTES: usize = 32;
    pub const SECRET_KEY_BYTES: usize = 32;
    pub const SEED_BYTES: usize = 32;
    pub const NONCE_BYTES: usize = 24;
    pub const MAC_BYTES: usize = 16;
    pub const BEFORE_NM_BYTES: usize = 32;
    /// Overhead of an anonymous sealed box: ephemeral public key plus MAC.
    pub const SEAL_BYTES: usize = PUBLIC_KEY_BYTES + MAC_BYTES;
}

/// `crypto_secretbox` (XSalsa20-Poly1305).
pub mod secret_box {
    pub const KEY_BYTES: usize = 32;
    pub const NONCE_BYTES: usize = 24;
    pub const MAC_BYTES: usize = 16;
}

/// `crypto_sign` (Ed25519).
pub mod sign {
    pub const PUBLIC_KEY_BYTES: usize = 32;
    pub const SECRET_KEY_BYTES: usize = 64;
    pub const SEED_BYTES: usize = 32;
    pub const BYTES: usize = 64;
}

/// `crypto_generichash` (BLAKE2b).
pub mod generic_hash {
    pub const BYTES: usize = 32;
    pub const BYTES_MIN: usize = 16;
    pub const BYTES_MAX: usize = 64;
    pub const KEY_BYTES: usize = 32;
    pub const KEY_BYTES_MIN: usize = 16;
    pub const KEY_BYTES_MAX: usize = 64;
}

/// `crypto_shorthash` (SipHash-2-4).
pub mod short_hash {
    pub const BYTES: usize = 8;
    pub const KEY_BYTES: usize = 16;
}

/// `crypto_pwhash` (Argon2).
pub mod pw_hash {
    pub const STR_BYTES: usize = 128;
    pub const SALT_BYTES: usize = 16;
    pub const BYTES_MIN: usize = 16;

    pub const OPS_LIMIT_INTERACTIVE: u64 = 2;
    pub const MEM_LIMIT_INTERACTIVE: usize = 67_108_864;
    pub const OPS_LIMIT_MODERATE: u64 = 3;
    pub const MEM_LIMIT_MODERATE: usize = 268_435_456;
    pub const OPS_LIMIT_SENSITIVE: u64 = 4;
    pub const MEM_LIMIT_SENSITIVE: usize = 1_073_741_824;

    pub const ALG_ARGON2I13: i32 = 1;
    pub const ALG_ARGON2ID13: i32 = 2;
}

/// `randombytes_buf_deterministic`.
pub mod random {
    pub const SEED_BYTES: usize = 32;
}

/// Named cost presets for password hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PwHashPreset {
    #[default]
    Interactive,
    Moderate,
    Sensitive,
}

impl PwHashPreset {
    pub fn ops_limit(self) -> u64 {
        match self {
            Self::Interactive => pw_hash::OPS_LIMIT_INTERACTIVE,
            Self::Moderate => pw_hash::OPS_LIMIT_MODERATE,
            Self::Sensitive => pw_hash::OPS_LIMIT_SENSITIVE,
        }
    }

    pub fn mem_limit(self) -> usize {
        match self {
            Self::Interactive => pw_hash::MEM_LIMIT_INTERACTIVE,
            Self::Moderate => pw_hash::MEM_LIMIT_MODERATE,
            Self::Sensitive => pw_hash::MEM_LIMIT_SENSITIVE,
        }
    }
}

impl fmt::Display for PwHashPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Interactive => "interactive",
            Self::Moderate => "moderate",
            Self::Sensitive => "sensitive",
        };
        f.write_str(name)
    }
}

impl FromStr for PwHashPreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "interactive" => Ok(Self::Interactive),
            "moderate" => Ok(Self::Moderate),
            "sensitive" => Ok(Self::Sensitive),
            _ => Err(UnknownPreset(s.to_string())),
        }
    }
}

/// Argon2 variant used by raw password-based key derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PwHashAlgorithm {
    Argon2i13,
    #[default]
    Argon2id13,
}

impl PwHashAlgorithm {
    pub fn id(self) -> i32 {
        match self {
            Self::Argon2i13 => pw_hash::ALG_ARGON2I13,
            Self::Argon2id13 => pw_hash::ALG_ARGON2ID13,
        }
    }
}
