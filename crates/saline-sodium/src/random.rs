//! Cryptographically secure randomness (`randombytes`).

use saline_core::{RandomSeed, Result};

use crate::sodium::{safe, Initialized};

#[derive(Debug, Clone, Copy)]
pub struct RandomBytes {
    _init: Initialized,
}

impl RandomBytes {
    pub(crate) fn new(init: Initialized) -> Self {
        Self { _init: init }
    }

    pub fn buf(&self, len: usize) -> Vec<u8> {
        let mut out = vec![0u8; len];
        safe::random_bytes(&mut out);
        out
    }

    pub fn fill(&self, out: &mut [u8]) {
        safe::random_bytes(out)
    }

    pub fn random(&self) -> u32 {
        safe::random_u32()
    }

    /// Uniform in `[0, upper_bound)`, without modulo bias. Returns 0 when
    /// `upper_bound < 2`.
    pub fn uniform(&self, upper_bound: u32) -> u32 {
        safe::random_uniform(upper_bound)
    }

    /// Same seed, same bytes. For reproducible test vectors, not for keys.
    pub fn deterministic(&self, len: usize, seed: &RandomSeed) -> Result<Vec<u8>> {
        safe::random_deterministic(len, seed)
    }
}
