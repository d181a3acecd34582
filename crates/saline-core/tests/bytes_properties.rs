//! Length validation properties for the fixed-length byte types.

use proptest::prelude::*;
use saline_core::{
    BoxPublicKey, FixedBytes, GenericHashKey, ShortHashKey, SignSecretKey, SodiumError,
};

/// Only the exact length is accepted; everything else reports the
/// expected and actual sizes.
#[test]
fn property_fixed_length_is_exact() {
    proptest!(|(bytes in prop::collection::vec(any::<u8>(), 0..100))| {
        match BoxPublicKey::from_slice(&bytes) {
            Ok(pk) => {
                prop_assert_eq!(bytes.len(), BoxPublicKey::LEN);
                prop_assert_eq!(pk.as_slice(), &bytes[..]);
            }
            Err(SodiumError::InvalidLength { expected, actual, .. }) => {
                prop_assert_eq!(expected, 32);
                prop_assert_eq!(actual, bytes.len());
                prop_assert_ne!(bytes.len(), 32);
            }
            Err(other) => prop_assert!(false, "unexpected error {other:?}"),
        }

        prop_assert_eq!(ShortHashKey::from_slice(&bytes).is_ok(), bytes.len() == 16);
        prop_assert_eq!(SignSecretKey::from_slice(&bytes).is_ok(), bytes.len() == 64);
    });
}

/// BLAKE2b keys accept the whole [16, 64] range.
#[test]
fn property_generic_hash_key_range() {
    proptest!(|(bytes in prop::collection::vec(any::<u8>(), 0..100))| {
        let ok = (16..=64).contains(&bytes.len());
        match GenericHashKey::from_slice(&bytes) {
            Ok(key) => {
                prop_assert!(ok);
                prop_assert_eq!(key.as_bytes(), &bytes[..]);
            }
            Err(SodiumError::LengthOutOfRange { min, max, actual, .. }) => {
                prop_assert!(!ok);
                prop_assert_eq!((min, max, actual), (16, 64, bytes.len()));
            }
            Err(other) => prop_assert!(false, "unexpected error {other:?}"),
        }
    });
}
