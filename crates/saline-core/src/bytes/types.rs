use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
    bytes::FixedBytes,
    error::{check_len, check_range, Result},
    params::{crypto_box, generic_hash, pw_hash, random, secret_box, short_hash, sign},
};

// Public values: copyable, comparable, printable.
macro_rules! public_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr, $what:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub [u8; $len]);

        impl FixedBytes for $name {
            const LEN: usize = $len;
            const NAME: &'static str = $what;

            fn from_slice(bytes: &[u8]) -> Result<Self> {
                check_len($what, $len, bytes.len())?;
                let mut out = [0u8; $len];
                out.copy_from_slice(bytes);
                Ok(Self(out))
            }

            fn as_slice(&self) -> &[u8] {
                &self.0
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = crate::SodiumError;

            fn try_from(bytes: &[u8]) -> Result<Self> {
                Self::from_slice(bytes)
            }
        }
    };
}

// Secret values: zeroed on drop, never Copy, redacted in Debug.
macro_rules! secret_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr, $what:literal) => {
        $(#[$meta])*
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct $name([u8; $len]);

        impl $name {
            /// An all-zero value, to be filled in place by the native layer.
            pub fn zeroed() -> Self {
                Self([0u8; $len])
            }

            pub fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            pub fn as_mut_bytes(&mut self) -> &mut [u8; $len] {
                &mut self.0
            }
        }

        impl FixedBytes for $name {
            const LEN: usize = $len;
            const NAME: &'static str = $what;

            fn from_slice(bytes: &[u8]) -> Result<Self> {
                check_len($what, $len, bytes.len())?;
                let mut out = Self::zeroed();
                out.0.copy_from_slice(bytes);
                Ok(out)
            }

            fn as_slice(&self) -> &[u8] {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(concat!(stringify!($name), "(<redacted>)"))
            }
        }
    };
}

// --- Box ---
public_bytes!(BoxPublicKey, crypto_box::PUBLIC_KEY_BYTES, "box public key");
secret_bytes!(BoxSecretKey, crypto_box::SECRET_KEY_BYTES, "box secret key");
secret_bytes!(BoxSeed, crypto_box::SEED_BYTES, "box seed");
public_bytes!(BoxNonce, crypto_box::NONCE_BYTES, "box nonce");
public_bytes!(BoxMac, crypto_box::MAC_BYTES, "box mac");
secret_bytes!(
    /// Shared key precomputed from one party's secret key and the other's public key.
    BoxSharedKey,
    crypto_box::BEFORE_NM_BYTES,
    "box shared key"
);

// --- SecretBox ---
secret_bytes!(SecretBoxKey, secret_box::KEY_BYTES, "secretbox key");
public_bytes!(SecretBoxNonce, secret_box::NONCE_BYTES, "secretbox nonce");
public_bytes!(SecretBoxMac, secret_box::MAC_BYTES, "secretbox mac");

// --- Sign ---
public_bytes!(SignPublicKey, sign::PUBLIC_KEY_BYTES, "sign public key");
secret_bytes!(
    /// libsodium format: the 32-byte seed followed by the 32-byte public key.
    SignSecretKey,
    sign::SECRET_KEY_BYTES,
    "sign secret key"
);
secret_bytes!(SignSeed, sign::SEED_BYTES, "sign seed");
public_bytes!(Signature, sign::BYTES, "signature");

// --- ShortHash ---
secret_bytes!(ShortHashKey, short_hash::KEY_BYTES, "shorthash key");
public_bytes!(ShortHashDigest, short_hash::BYTES, "shorthash digest");

// --- PwHash / Random ---
public_bytes!(PwHashSalt, pw_hash::SALT_BYTES, "pwhash salt");
secret_bytes!(RandomSeed, random::SEED_BYTES, "random seed");

#[derive(Debug, Clone)]
pub struct BoxKeyPair {
    pub public_key: BoxPublicKey,
    pub secret_key: BoxSecretKey,
}

#[derive(Debug, Clone)]
pub struct SignKeyPair {
    pub public_key: SignPublicKey,
    pub secret_key: SignSecretKey,
}

/// Box output with nonce and MAC kept apart from the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetachedBox {
    pub cipher_text: Vec<u8>,
    pub nonce: BoxNonce,
    pub mac: BoxMac,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetachedSecretBox {
    pub cipher_text: Vec<u8>,
    pub nonce: SecretBoxNonce,
    pub mac: SecretBoxMac,
}

/// BLAKE2b key. Any length in `[KEY_BYTES_MIN, KEY_BYTES_MAX]` is accepted.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct GenericHashKey(Vec<u8>);

impl GenericHashKey {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        check_range(
            "generichash key",
            generic_hash::KEY_BYTES_MIN,
            generic_hash::KEY_BYTES_MAX,
            bytes.len(),
        )?;
        Ok(Self(bytes.to_vec()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for GenericHashKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for GenericHashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GenericHashKey(<redacted {} bytes>)", self.0.len())
    }
}
