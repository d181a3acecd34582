/*
    saline-core
        data model for the saline libsodium bindings: fixed-length keys,
        nonces, MACs and signatures, primitive parameters, and errors.
        No native code lives here.
 */

pub mod error;

pub mod bytes;
pub mod params;

pub use bytes::*;
pub use error::{check_len, check_range, Result, SodiumError, UnknownPreset};
pub use params::{PwHashAlgorithm, PwHashPreset};

#[cfg(test)]
mod lib_tests;
