pub(crate) mod ffi;
pub(crate) mod safe;

use once_cell::sync::Lazy;
use saline_core::{Result, SodiumError};

/// Outcome of the one-time libsodium initialization.
static SODIUM_INIT: Lazy<bool> = Lazy::new(|| safe::sodium_init().is_ok());

/// Proof that libsodium initialized successfully in this process.
///
/// Components hold one of these, and it can only be minted by `init`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Initialized(());

pub(crate) fn init() -> Result<Initialized> {
    if *Lazy::force(&SODIUM_INIT) {
        Ok(Initialized(()))
    } else {
        Err(SodiumError::InitFailed)
    }
}
