/*
    saline-sodium
      - safe bindings over libsodium: box, secretbox, sign, generic/short/password
        hashing, randomness, and constant-time utilities.
      - All `unsafe` is confined to `sodium::ffi`.
      - Nothing is reachable until `Sodium::new` has initialized libsodium.
*/
mod sodium;

pub mod crypto_box;
pub mod generic_hash;
pub mod pw_hash;
pub mod random;
pub mod secret_box;
pub mod short_hash;
pub mod sign;
pub mod utils;

pub use saline_core::*;

pub use crypto_box::CryptoBox;
pub use generic_hash::{GenericHash, HashStream, StreamPhase};
pub use pw_hash::PwHash;
pub use random::RandomBytes;
pub use secret_box::SecretBox;
pub use short_hash::ShortHash;
pub use sign::Sign;
pub use utils::{Base64Variant, Utils};

/// Entry point: one handle per primitive family.
///
/// `new` initializes libsodium once per process; later calls, from any
/// thread, reuse the first outcome.
#[derive(Debug, Clone, Copy)]
pub struct Sodium {
    pub crypto_box: CryptoBox,
    pub secret_box: SecretBox,
    pub sign: Sign,
    pub generic_hash: GenericHash,
    pub short_hash: ShortHash,
    pub pw_hash: PwHash,
    pub random_bytes: RandomBytes,
    pub utils: Utils,
}

impl Sodium {
    pub fn new() -> Result<Self> {
        let init = sodium::init()?;
        Ok(Self {
            crypto_box: CryptoBox::new(init),
            secret_box: SecretBox::new(init),
            sign: Sign::new(init),
            generic_hash: GenericHash::new(init),
            short_hash: ShortHash::new(init),
            pw_hash: PwHash::new(init),
            random_bytes: RandomBytes::new(init),
            utils: Utils::new(init),
        })
    }
}
