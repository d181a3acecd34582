//! Generic (BLAKE2b) and short (SipHash) hashing.

use proptest::prelude::*;
use saline_sodium::{params::generic_hash, FixedBytes, ShortHashKey, Sodium, SodiumError, StreamPhase};

fn sodium() -> Sodium {
    Sodium::new().expect("libsodium init")
}

#[test]
fn blake2b_256_of_empty_input() {
    let s = sodium();
    let digest = s.generic_hash.hash(b"", None, None).unwrap();
    assert_eq!(
        s.utils.bin2hex(&digest),
        "0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8"
    );
}

#[test]
fn output_length_bounds() {
    let s = sodium();
    assert_eq!(s.generic_hash.hash(b"x", None, None).unwrap().len(), generic_hash::BYTES);
    assert_eq!(s.generic_hash.hash(b"x", None, Some(16)).unwrap().len(), 16);
    assert_eq!(s.generic_hash.hash(b"x", None, Some(64)).unwrap().len(), 64);

    for bad in [0, 15, 65] {
        assert!(matches!(
            s.generic_hash.hash(b"x", None, Some(bad)),
            Err(SodiumError::LengthOutOfRange { min: 16, max: 64, .. })
        ));
        assert!(s.generic_hash.init_stream(None, Some(bad)).is_err());
    }
}

#[test]
fn key_length_bounds() {
    let s = sodium();
    let key = s.generic_hash.key().unwrap();
    assert_eq!(key.as_bytes().len(), generic_hash::KEY_BYTES);

    let keyed = s.generic_hash.hash(b"x", Some(key.as_bytes()), None).unwrap();
    let unkeyed = s.generic_hash.hash(b"x", None, None).unwrap();
    assert_ne!(keyed, unkeyed);

    assert!(s.generic_hash.hash(b"x", Some(&[1u8; 16]), None).is_ok());
    assert!(s.generic_hash.hash(b"x", Some(&[1u8; 64]), None).is_ok());
    assert!(s.generic_hash.hash(b"x", Some(&[1u8; 15]), None).is_err());
    assert!(s.generic_hash.hash(b"x", Some(&[1u8; 65]), None).is_err());
    assert!(s.generic_hash.init_stream(Some(&[1u8; 8]), None).is_err());
}

#[test]
fn stream_matches_one_shot_and_refuses_reuse() {
    let s = sodium();
    let key = [9u8; 32];

    let mut stream = s.generic_hash.init_stream(Some(&key), Some(48)).unwrap();
    stream.update(b"My Test ").unwrap();
    stream.update(b"Message").unwrap();
    let streamed = stream.finalize().unwrap();

    assert_eq!(streamed, s.generic_hash.hash(b"My Test Message", Some(&key), Some(48)).unwrap());
    assert_eq!(stream.phase(), StreamPhase::Finalized);
    assert_eq!(stream.update(b"more"), Err(SodiumError::StreamFinalized));
    assert_eq!(stream.finalize(), Err(SodiumError::StreamFinalized));
}

#[test]
fn stream_finalized_without_updates_hashes_empty_input() {
    let s = sodium();
    let mut stream = s.generic_hash.init_stream(None, None).unwrap();
    assert_eq!(stream.finalize().unwrap(), s.generic_hash.hash(b"", None, None).unwrap());
}

#[test]
fn siphash_reference_vector() {
    let s = sodium();
    let key: Vec<u8> = (0u8..16).collect();
    let key = ShortHashKey::from_slice(&key).unwrap();

    let digest = s.short_hash.hash(b"", &key).unwrap();
    assert_eq!(digest.0, [0x31, 0x0e, 0x0e, 0xdd, 0x47, 0xdb, 0x6f, 0x72]);
}

#[test]
fn short_hash_is_keyed() {
    let s = sodium();
    let k1 = s.short_hash.key();
    let k2 = s.short_hash.key();

    let a = s.short_hash.hash(b"bucket", &k1).unwrap();
    assert_eq!(a, s.short_hash.hash(b"bucket", &k1).unwrap());
    assert_ne!(a, s.short_hash.hash(b"bucket", &k2).unwrap());

    assert!(ShortHashKey::from_slice(&[0u8; 15]).is_err());
    assert!(ShortHashKey::from_slice(&[0u8; 17]).is_err());
}

/// Streaming over any split of a message equals hashing it in one go.
#[test]
fn property_stream_equivalence() {
    let s = sodium();

    proptest!(|(
        message in prop::collection::vec(any::<u8>(), 0..2048),
        split in any::<prop::sample::Index>(),
        keyed in any::<bool>(),
        out_len in 16usize..=64,
    )| {
        let key = [0x5au8; 32];
        let key = keyed.then_some(&key[..]);
        let cut = split.index(message.len() + 1);
        let (m1, m2) = message.split_at(cut);

        let mut stream = s.generic_hash.init_stream(key, Some(out_len)).unwrap();
        stream.update(m1).unwrap();
        stream.update(m2).unwrap();
        let streamed = stream.finalize().unwrap();

        prop_assert_eq!(streamed, s.generic_hash.hash(&message, key, Some(out_len)).unwrap());
    });
}

/// BLAKE2b is deterministic and its output depends on the requested length.
#[test]
fn property_generic_hash_determinism() {
    let s = sodium();

    proptest!(|(data in prop::collection::vec(any::<u8>(), 0..1000))| {
        let a = s.generic_hash.hash(&data, None, None).unwrap();
        let b = s.generic_hash.hash(&data, None, None).unwrap();
        prop_assert_eq!(&a, &b);

        let long = s.generic_hash.hash(&data, None, Some(64)).unwrap();
        prop_assert_ne!(&a[..], &long[..32]);
    });
}
