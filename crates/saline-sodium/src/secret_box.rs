//! Symmetric authenticated encryption (`crypto_secretbox`).

use saline_core::{
    params::secret_box::NONCE_BYTES, DetachedSecretBox, FixedBytes, Result, SecretBoxKey, SecretBoxMac,
    SecretBoxNonce, SodiumError,
};

use crate::sodium::{safe, Initialized};

#[derive(Debug, Clone, Copy)]
pub struct SecretBox {
    _init: Initialized,
}

impl SecretBox {
    pub(crate) fn new(init: Initialized) -> Self {
        Self { _init: init }
    }

    pub fn key(&self) -> SecretBoxKey {
        safe::secretbox_keygen()
    }

    pub fn nonce(&self) -> SecretBoxNonce {
        let mut n = [0u8; NONCE_BYTES];
        safe::random_bytes(&mut n);
        SecretBoxNonce(n)
    }

    /// Encrypts under a fresh nonce and returns `nonce || mac || payload`.
    pub fn seal(&self, message: &[u8], key: &SecretBoxKey) -> Result<Vec<u8>> {
        let (authenticated, nonce) = self.seal_detached_nonce(message, key)?;

        let mut out = Vec::with_capacity(NONCE_BYTES + authenticated.len());
        out.extend_from_slice(&nonce.0);
        out.extend_from_slice(&authenticated);
        Ok(out)
    }

    pub fn seal_detached_nonce(&self, message: &[u8], key: &SecretBoxKey) -> Result<(Vec<u8>, SecretBoxNonce)> {
        let nonce = self.nonce();
        let authenticated = safe::secretbox_easy(message, &nonce, key)?;
        Ok((authenticated, nonce))
    }

    pub fn seal_detached(&self, message: &[u8], key: &SecretBoxKey) -> Result<DetachedSecretBox> {
        let nonce = self.nonce();
        let (cipher_text, mac) = safe::secretbox_detached(message, &nonce, key)?;
        Ok(DetachedSecretBox { cipher_text, nonce, mac })
    }

    pub fn open(&self, nonce_and_authenticated: &[u8], key: &SecretBoxKey) -> Result<Vec<u8>> {
        if nonce_and_authenticated.len() < NONCE_BYTES {
            return Err(SodiumError::AuthenticationFailed);
        }
        let (nonce, authenticated) = nonce_and_authenticated.split_at(NONCE_BYTES);
        let nonce = SecretBoxNonce::from_slice(nonce)?;
        safe::secretbox_open_easy(authenticated, &nonce, key)
    }

    pub fn open_with_nonce(&self, authenticated: &[u8], key: &SecretBoxKey, nonce: &SecretBoxNonce) -> Result<Vec<u8>> {
        safe::secretbox_open_easy(authenticated, nonce, key)
    }

    pub fn open_detached(
        &self,
        cipher_text: &[u8],
        key: &SecretBoxKey,
        nonce: &SecretBoxNonce,
        mac: &SecretBoxMac,
    ) -> Result<Vec<u8>> {
        safe::secretbox_open_detached(cipher_text, mac, nonce, key)
    }
}
