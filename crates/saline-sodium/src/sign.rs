//! Ed25519 signatures (`crypto_sign`).

use saline_core::{FixedBytes, Result, SignKeyPair, SignPublicKey, SignSecretKey, SignSeed, Signature};

use crate::sodium::{safe, Initialized};

#[derive(Debug, Clone, Copy)]
pub struct Sign {
    _init: Initialized,
}

impl Sign {
    pub(crate) fn new(init: Initialized) -> Self {
        Self { _init: init }
    }

    pub fn key_pair(&self) -> Result<SignKeyPair> {
        safe::sign_keypair()
    }

    pub fn key_pair_from_seed(&self, seed: &[u8]) -> Result<SignKeyPair> {
        let seed = SignSeed::from_slice(seed)?;
        safe::sign_seed_keypair(&seed)
    }

    pub fn public_key(&self, secret_key: &SignSecretKey) -> Result<SignPublicKey> {
        safe::sign_sk_to_pk(secret_key)
    }

    /// Returns `signature || message`.
    pub fn sign(&self, message: &[u8], secret_key: &SignSecretKey) -> Result<Vec<u8>> {
        safe::sign_combined(message, secret_key)
    }

    pub fn signature(&self, message: &[u8], secret_key: &SignSecretKey) -> Result<Signature> {
        safe::sign_detached(message, secret_key)
    }

    pub fn verify(&self, message: &[u8], public_key: &SignPublicKey, signature: &Signature) -> bool {
        safe::sign_verify_detached(message, public_key, signature)
    }

    pub fn verify_signed(&self, signed_message: &[u8], public_key: &SignPublicKey) -> bool {
        safe::sign_open(signed_message, public_key).is_ok()
    }

    /// Verifies `signature || message` and returns the message.
    pub fn open(&self, signed_message: &[u8], public_key: &SignPublicKey) -> Result<Vec<u8>> {
        safe::sign_open(signed_message, public_key)
    }
}
