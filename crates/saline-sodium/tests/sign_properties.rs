//! Ed25519 signing behaviour.

use proptest::prelude::*;
use saline_sodium::{params::sign, Signature, Sodium, SodiumError};

fn sodium() -> Sodium {
    Sodium::new().expect("libsodium init")
}

#[test]
fn combined_signature_precedes_message() {
    let s = sodium();
    let kp = s.sign.key_pair().unwrap();

    let signed = s.sign.sign(b"hello", &kp.secret_key).unwrap();
    assert_eq!(signed.len(), sign::BYTES + 5);
    assert_eq!(&signed[sign::BYTES..], b"hello");

    let detached = s.sign.signature(b"hello", &kp.secret_key).unwrap();
    assert_eq!(&signed[..sign::BYTES], &detached.0[..]);

    assert_eq!(s.sign.open(&signed, &kp.public_key).unwrap(), b"hello");
    assert!(s.sign.verify_signed(&signed, &kp.public_key));
}

#[test]
fn verify_rejects_altered_message_and_other_key() {
    let s = sodium();
    let kp = s.sign.key_pair().unwrap();
    let other = s.sign.key_pair().unwrap();

    let sig = s.sign.signature(b"saline ed25519 test", &kp.secret_key).unwrap();
    assert!(s.sign.verify(b"saline ed25519 test", &kp.public_key, &sig));
    assert!(!s.sign.verify(b"saline ed25519 tesU", &kp.public_key, &sig));
    assert!(!s.sign.verify(b"saline ed25519 test", &other.public_key, &sig));

    let mut bad = sig;
    bad.0[63] ^= 0x40;
    assert!(!s.sign.verify(b"saline ed25519 test", &kp.public_key, &bad));
}

#[test]
fn open_rejects_short_and_forged() {
    let s = sodium();
    let kp = s.sign.key_pair().unwrap();

    assert_eq!(s.sign.open(&[0u8; 63], &kp.public_key), Err(SodiumError::AuthenticationFailed));
    assert_eq!(s.sign.open(&[0u8; 80], &kp.public_key), Err(SodiumError::AuthenticationFailed));
    assert!(!s.sign.verify_signed(&[], &kp.public_key));

    let mut signed = s.sign.sign(b"", &kp.secret_key).unwrap();
    assert_eq!(signed.len(), sign::BYTES);
    assert_eq!(s.sign.open(&signed, &kp.public_key).unwrap(), b"");
    signed[0] ^= 1;
    assert!(s.sign.open(&signed, &kp.public_key).is_err());
}

#[test]
fn seeded_key_pairs_and_public_key_derivation() {
    let s = sodium();
    let seed = [7u8; sign::SEED_BYTES];
    let a = s.sign.key_pair_from_seed(&seed).unwrap();
    let b = s.sign.key_pair_from_seed(&seed).unwrap();
    assert_eq!(a.public_key, b.public_key);

    // Secret key is seed || public key.
    assert_eq!(&a.secret_key.as_bytes()[..32], &seed[..]);
    assert_eq!(&a.secret_key.as_bytes()[32..], &a.public_key.0[..]);
    assert_eq!(s.sign.public_key(&a.secret_key).unwrap(), a.public_key);

    // Ed25519 is deterministic.
    let sig_a = s.sign.signature(b"m", &a.secret_key).unwrap();
    let sig_b = s.sign.signature(b"m", &b.secret_key).unwrap();
    assert_eq!(sig_a, sig_b);

    assert!(matches!(
        s.sign.key_pair_from_seed(&seed[..16]),
        Err(SodiumError::InvalidLength { expected: 32, actual: 16, .. })
    ));
}

/// For any message, verify(m, pk, signature(m, sk)) holds and open(sign(m)) == m.
#[test]
fn property_sign_round_trip() {
    let s = sodium();
    let kp = s.sign.key_pair().unwrap();

    proptest!(|(message in prop::collection::vec(any::<u8>(), 0..512))| {
        let sig: Signature = s.sign.signature(&message, &kp.secret_key).unwrap();
        prop_assert!(s.sign.verify(&message, &kp.public_key, &sig));

        let signed = s.sign.sign(&message, &kp.secret_key).unwrap();
        prop_assert_eq!(s.sign.open(&signed, &kp.public_key).unwrap(), message);
    });
}

/// Altering any byte of the message invalidates the signature.
#[test]
fn property_altered_message_fails() {
    let s = sodium();
    let kp = s.sign.key_pair().unwrap();

    proptest!(|(message in prop::collection::vec(any::<u8>(), 1..256), pos in any::<prop::sample::Index>(), flip in 1u8..=255)| {
        let sig = s.sign.signature(&message, &kp.secret_key).unwrap();
        let mut altered = message.clone();
        let i = pos.index(altered.len());
        altered[i] ^= flip;
        prop_assert!(!s.sign.verify(&altered, &kp.public_key, &sig));
    });
}
