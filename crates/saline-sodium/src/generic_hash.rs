//! BLAKE2b (`crypto_generichash`), one-shot and streaming.

use std::fmt;

use saline_core::{params::generic_hash::BYTES, GenericHashKey, Result, SodiumError};

use crate::sodium::{ffi::GenericHashState, safe, Initialized};

#[derive(Debug, Clone, Copy)]
pub struct GenericHash {
    _init: Initialized,
}

impl GenericHash {
    pub(crate) fn new(init: Initialized) -> Self {
        Self { _init: init }
    }

    /// A random key of the recommended length.
    pub fn key(&self) -> Result<GenericHashKey> {
        safe::generichash_keygen()
    }

    /// Hashes `message`, optionally keyed. `output_len` defaults to `BYTES`
    /// and must lie in `[BYTES_MIN, BYTES_MAX]`.
    pub fn hash(&self, message: &[u8], key: Option<&[u8]>, output_len: Option<usize>) -> Result<Vec<u8>> {
        safe::generichash(message, key, output_len.unwrap_or(BYTES))
    }

    pub fn init_stream(&self, key: Option<&[u8]>, output_len: Option<usize>) -> Result<HashStream> {
        let output_len = output_len.unwrap_or(BYTES);
        let state = safe::generichash_init(key, output_len)?;
        Ok(HashStream { state, output_len, phase: StreamPhase::Initialized })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamPhase {
    Initialized,
    Updating,
    Finalized,
}

/// Incremental BLAKE2b computation.
///
/// `update` may be called any number of times before `finalize`; once
/// finalized, both return `StreamFinalized`. The native state is wiped on
/// finalize and again on drop.
pub struct HashStream {
    state: Box<GenericHashState>,
    output_len: usize,
    phase: StreamPhase,
}

impl HashStream {
    pub fn phase(&self) -> StreamPhase {
        self.phase
    }

    pub fn output_len(&self) -> usize {
        self.output_len
    }

    pub fn update(&mut self, input: &[u8]) -> Result<()> {
        if self.phase == StreamPhase::Finalized {
            return Err(SodiumError::StreamFinalized);
        }
        safe::generichash_update(&mut self.state, input)?;
        self.phase = StreamPhase::Updating;
        Ok(())
    }

    pub fn finalize(&mut self) -> Result<Vec<u8>> {
        if self.phase == StreamPhase::Finalized {
            return Err(SodiumError::StreamFinalized);
        }
        let digest = safe::generichash_final(&mut self.state, self.output_len);
        self.phase = StreamPhase::Finalized;
        safe::generichash_state_wipe(&mut self.state);
        digest
    }
}

impl Drop for HashStream {
    fn drop(&mut self) {
        safe::generichash_state_wipe(&mut self.state);
    }
}

impl fmt::Debug for HashStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashStream")
            .field("output_len", &self.output_len)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{sodium::ffi, Sodium};

    #[test]
    fn state_is_wiped_after_finalize() {
        let sodium = Sodium::new().unwrap();
        let mut stream = sodium.generic_hash.init_stream(None, None).unwrap();
        stream.update(b"some input").unwrap();
        assert!(ffi::generichash_state_bytes(&stream.state).iter().any(|&b| b != 0));

        stream.finalize().unwrap();
        assert_eq!(stream.phase(), StreamPhase::Finalized);
        assert!(ffi::generichash_state_bytes(&stream.state).iter().all(|&b| b == 0));
    }

    #[test]
    fn phases_advance() {
        let sodium = Sodium::new().unwrap();
        let mut stream = sodium.generic_hash.init_stream(None, Some(16)).unwrap();
        assert_eq!(stream.phase(), StreamPhase::Initialized);
        assert_eq!(stream.output_len(), 16);

        stream.update(b"a").unwrap();
        assert_eq!(stream.phase(), StreamPhase::Updating);
        stream.update(b"").unwrap();
        assert_eq!(stream.phase(), StreamPhase::Updating);

        assert_eq!(stream.finalize().unwrap().len(), 16);
        assert_eq!(stream.update(b"late"), Err(SodiumError::StreamFinalized));
        assert_eq!(stream.finalize(), Err(SodiumError::StreamFinalized));
    }
}
