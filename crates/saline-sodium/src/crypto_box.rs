//! Public-key authenticated encryption (`crypto_box`) and anonymous sealed boxes.
//!
//! Combined ciphertexts are laid out as `nonce || mac || payload`. Anonymous
//! sealed boxes are `ephemeral_pk || mac || payload` and are interchangeable
//! with libsodium's `crypto_box_seal`.

use saline_core::{
    params::crypto_box::{NONCE_BYTES, PUBLIC_KEY_BYTES},
    BoxKeyPair, BoxMac, BoxNonce, BoxPublicKey, BoxSecretKey, BoxSeed, BoxSharedKey, DetachedBox, FixedBytes,
    Result, SodiumError,
};

use crate::sodium::{safe, Initialized};

#[derive(Debug, Clone, Copy)]
pub struct CryptoBox {
    _init: Initialized,
}

impl CryptoBox {
    pub(crate) fn new(init: Initialized) -> Self {
        Self { _init: init }
    }

    pub fn key_pair(&self) -> Result<BoxKeyPair> {
        safe::box_keypair()
    }

    /// Deterministic key pair. `seed` must be exactly `SEED_BYTES` long.
    pub fn key_pair_from_seed(&self, seed: &[u8]) -> Result<BoxKeyPair> {
        let seed = BoxSeed::from_slice(seed)?;
        safe::box_seed_keypair(&seed)
    }

    pub fn nonce(&self) -> BoxNonce {
        let mut n = [0u8; NONCE_BYTES];
        safe::random_bytes(&mut n);
        BoxNonce(n)
    }

    /// Encrypts under a fresh nonce and returns `nonce || mac || payload`.
    pub fn seal(
        &self,
        message: &[u8],
        recipient_public_key: &BoxPublicKey,
        sender_secret_key: &BoxSecretKey,
    ) -> Result<Vec<u8>> {
        let (authenticated, nonce) = self.seal_detached_nonce(message, recipient_public_key, sender_secret_key)?;
        Ok(prepend(&nonce.0, &authenticated))
    }

    /// Encrypts under a fresh nonce and returns `(mac || payload, nonce)`.
    pub fn seal_detached_nonce(
        &self,
        message: &[u8],
        recipient_public_key: &BoxPublicKey,
        sender_secret_key: &BoxSecretKey,
    ) -> Result<(Vec<u8>, BoxNonce)> {
        let nonce = self.nonce();
        let authenticated = safe::box_easy(message, &nonce, recipient_public_key, sender_secret_key)?;
        Ok((authenticated, nonce))
    }

    pub fn seal_detached(
        &self,
        message: &[u8],
        recipient_public_key: &BoxPublicKey,
        sender_secret_key: &BoxSecretKey,
    ) -> Result<DetachedBox> {
        let nonce = self.nonce();
        let (cipher_text, mac) = safe::box_detached(message, &nonce, recipient_public_key, sender_secret_key)?;
        Ok(DetachedBox { cipher_text, nonce, mac })
    }

    /// Opens `nonce || mac || payload`. Truncated input and a failed MAC are
    /// both reported as `AuthenticationFailed`.
    pub fn open(
        &self,
        nonce_and_authenticated: &[u8],
        sender_public_key: &BoxPublicKey,
        recipient_secret_key: &BoxSecretKey,
    ) -> Result<Vec<u8>> {
        let (nonce, authenticated) = split_nonce(nonce_and_authenticated)?;
        safe::box_open_easy(authenticated, &nonce, sender_public_key, recipient_secret_key)
    }

    pub fn open_with_nonce(
        &self,
        authenticated: &[u8],
        sender_public_key: &BoxPublicKey,
        recipient_secret_key: &BoxSecretKey,
        nonce: &BoxNonce,
    ) -> Result<Vec<u8>> {
        safe::box_open_easy(authenticated, nonce, sender_public_key, recipient_secret_key)
    }

    pub fn open_detached(
        &self,
        cipher_text: &[u8],
        sender_public_key: &BoxPublicKey,
        recipient_secret_key: &BoxSecretKey,
        nonce: &BoxNonce,
        mac: &BoxMac,
    ) -> Result<Vec<u8>> {
        safe::box_open_detached(cipher_text, mac, nonce, sender_public_key, recipient_secret_key)
    }

    /// Precomputes the shared key for many messages between the same two parties.
    pub fn before_nm(&self, public_key: &BoxPublicKey, secret_key: &BoxSecretKey) -> Result<BoxSharedKey> {
        safe::box_beforenm(public_key, secret_key)
    }

    pub fn seal_precomputed(&self, message: &[u8], shared_key: &BoxSharedKey) -> Result<Vec<u8>> {
        let nonce = self.nonce();
        let authenticated = safe::box_easy_afternm(message, &nonce, shared_key)?;
        Ok(prepend(&nonce.0, &authenticated))
    }

    pub fn open_precomputed(&self, nonce_and_authenticated: &[u8], shared_key: &BoxSharedKey) -> Result<Vec<u8>> {
        let (nonce, authenticated) = split_nonce(nonce_and_authenticated)?;
        safe::box_open_easy_afternm(authenticated, &nonce, shared_key)
    }

    /// Anonymous sealed box: only the recipient can open it, and the sender
    /// is not identified.
    ///
    /// A throwaway key pair encrypts the message under the nonce
    /// `BLAKE2b-192(ephemeral_pk || recipient_pk)`. The ephemeral secret key
    /// is wiped when it goes out of scope, on success and on every error path.
    pub fn seal_anonymous(&self, message: &[u8], recipient_public_key: &BoxPublicKey) -> Result<Vec<u8>> {
        let ephemeral = safe::box_keypair()?;
        let ephemeral_public_key = ephemeral.public_key;

        let nonce = seal_nonce(&ephemeral_public_key, recipient_public_key)?;
        let authenticated = safe::box_easy(message, &nonce, recipient_public_key, &ephemeral.secret_key)?;
        drop(ephemeral);

        Ok(prepend(&ephemeral_public_key.0, &authenticated))
    }

    pub fn open_anonymous(
        &self,
        anonymous_cipher_text: &[u8],
        recipient_public_key: &BoxPublicKey,
        recipient_secret_key: &BoxSecretKey,
    ) -> Result<Vec<u8>> {
        safe::box_seal_open(anonymous_cipher_text, recipient_public_key, recipient_secret_key)
    }
}

fn prepend(head: &[u8], tail: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(head.len() + tail.len());
    out.extend_from_slice(head);
    out.extend_from_slice(tail);
    out
}

fn split_nonce(input: &[u8]) -> Result<(BoxNonce, &[u8])> {
    if input.len() < NONCE_BYTES {
        return Err(SodiumError::AuthenticationFailed);
    }
    let (nonce, rest) = input.split_at(NONCE_BYTES);
    Ok((BoxNonce::from_slice(nonce)?, rest))
}

fn seal_nonce(ephemeral_public_key: &BoxPublicKey, recipient_public_key: &BoxPublicKey) -> Result<BoxNonce> {
    let mut both = [0u8; 2 * PUBLIC_KEY_BYTES];
    both[..PUBLIC_KEY_BYTES].copy_from_slice(&ephemeral_public_key.0);
    both[PUBLIC_KEY_BYTES..].copy_from_slice(&recipient_public_key.0);

    let digest = safe::generichash(&both, None, NONCE_BYTES)?;
    BoxNonce::from_slice(&digest)
}
