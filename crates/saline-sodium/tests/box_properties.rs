//! Public-key box and anonymous sealed box behaviour.

use proptest::prelude::*;
use saline_sodium::{params::crypto_box, BoxNonce, FixedBytes, Sodium, SodiumError};

fn sodium() -> Sodium {
    Sodium::new().expect("libsodium init")
}

#[test]
fn my_test_message_round_trips() {
    let s = sodium();
    let alice = s.crypto_box.key_pair().unwrap();
    let bob = s.crypto_box.key_pair().unwrap();
    let message = "My Test Message".as_bytes();

    let sealed = s.crypto_box.seal(message, &bob.public_key, &alice.secret_key).unwrap();
    assert_eq!(sealed.len(), message.len() + crypto_box::NONCE_BYTES + crypto_box::MAC_BYTES);

    let opened = s.crypto_box.open(&sealed, &alice.public_key, &bob.secret_key).unwrap();
    assert_eq!(opened, message);
}

#[test]
fn fresh_nonce_per_seal() {
    let s = sodium();
    let alice = s.crypto_box.key_pair().unwrap();
    let bob = s.crypto_box.key_pair().unwrap();

    let a = s.crypto_box.seal(b"same", &bob.public_key, &alice.secret_key).unwrap();
    let b = s.crypto_box.seal(b"same", &bob.public_key, &alice.secret_key).unwrap();
    assert_ne!(a[..crypto_box::NONCE_BYTES], b[..crypto_box::NONCE_BYTES]);
    assert_ne!(a, b);
}

#[test]
fn detached_nonce_and_detached_mac_round_trip() {
    let s = sodium();
    let alice = s.crypto_box.key_pair().unwrap();
    let bob = s.crypto_box.key_pair().unwrap();

    let (authenticated, nonce) = s
        .crypto_box
        .seal_detached_nonce(b"detached nonce", &bob.public_key, &alice.secret_key)
        .unwrap();
    assert_eq!(authenticated.len(), 14 + crypto_box::MAC_BYTES);
    let opened = s
        .crypto_box
        .open_with_nonce(&authenticated, &alice.public_key, &bob.secret_key, &nonce)
        .unwrap();
    assert_eq!(opened, b"detached nonce");

    let wrong_nonce = BoxNonce([0u8; 24]);
    assert_eq!(
        s.crypto_box.open_with_nonce(&authenticated, &alice.public_key, &bob.secret_key, &wrong_nonce),
        Err(SodiumError::AuthenticationFailed)
    );

    let d = s.crypto_box.seal_detached(b"fully detached", &bob.public_key, &alice.secret_key).unwrap();
    assert_eq!(d.cipher_text.len(), 14);
    let opened = s
        .crypto_box
        .open_detached(&d.cipher_text, &alice.public_key, &bob.secret_key, &d.nonce, &d.mac)
        .unwrap();
    assert_eq!(opened, b"fully detached");

    let mut bad_mac = d.mac;
    bad_mac.0[0] ^= 1;
    assert!(s
        .crypto_box
        .open_detached(&d.cipher_text, &alice.public_key, &bob.secret_key, &d.nonce, &bad_mac)
        .is_err());
}

#[test]
fn open_rejects_short_input() {
    let s = sodium();
    let kp = s.crypto_box.key_pair().unwrap();
    let overhead = crypto_box::NONCE_BYTES + crypto_box::MAC_BYTES;

    for len in [0, 1, crypto_box::NONCE_BYTES, overhead - 1] {
        let input = vec![0u8; len];
        assert_eq!(
            s.crypto_box.open(&input, &kp.public_key, &kp.secret_key),
            Err(SodiumError::AuthenticationFailed),
            "len {len}"
        );
    }
}

#[test]
fn wrong_keys_fail() {
    let s = sodium();
    let alice = s.crypto_box.key_pair().unwrap();
    let bob = s.crypto_box.key_pair().unwrap();
    let eve = s.crypto_box.key_pair().unwrap();

    let sealed = s.crypto_box.seal(b"for bob", &bob.public_key, &alice.secret_key).unwrap();
    assert!(s.crypto_box.open(&sealed, &alice.public_key, &eve.secret_key).is_err());
    assert!(s.crypto_box.open(&sealed, &eve.public_key, &bob.secret_key).is_err());
}

#[test]
fn seeded_key_pairs_are_deterministic() {
    let s = sodium();
    let seed = [42u8; crypto_box::SEED_BYTES];

    let a = s.crypto_box.key_pair_from_seed(&seed).unwrap();
    let b = s.crypto_box.key_pair_from_seed(&seed).unwrap();
    assert_eq!(a.public_key, b.public_key);
    assert_eq!(a.secret_key.as_bytes(), b.secret_key.as_bytes());

    let other = s.crypto_box.key_pair_from_seed(&[43u8; 32]).unwrap();
    assert_ne!(a.public_key, other.public_key);

    let err = s.crypto_box.key_pair_from_seed(&seed[..31]).unwrap_err();
    assert!(matches!(err, SodiumError::InvalidLength { expected: 32, actual: 31, .. }));
}

#[test]
fn precomputed_keys_interoperate_with_plain_box() {
    let s = sodium();
    let alice = s.crypto_box.key_pair().unwrap();
    let bob = s.crypto_box.key_pair().unwrap();

    let alice_shared = s.crypto_box.before_nm(&bob.public_key, &alice.secret_key).unwrap();
    let bob_shared = s.crypto_box.before_nm(&alice.public_key, &bob.secret_key).unwrap();
    assert_eq!(alice_shared.as_bytes(), bob_shared.as_bytes());

    let sealed = s.crypto_box.seal_precomputed(b"precomputed", &alice_shared).unwrap();
    assert_eq!(s.crypto_box.open_precomputed(&sealed, &bob_shared).unwrap(), b"precomputed");
    assert_eq!(s.crypto_box.open(&sealed, &alice.public_key, &bob.secret_key).unwrap(), b"precomputed");

    assert_eq!(
        s.crypto_box.open_precomputed(&sealed[..30], &bob_shared),
        Err(SodiumError::AuthenticationFailed)
    );
}

#[test]
fn anonymous_seal_round_trips() {
    let s = sodium();
    let bob = s.crypto_box.key_pair().unwrap();

    let sealed = s.crypto_box.seal_anonymous(b"anonymous", &bob.public_key).unwrap();
    assert_eq!(sealed.len(), 9 + crypto_box::SEAL_BYTES);

    let opened = s.crypto_box.open_anonymous(&sealed, &bob.public_key, &bob.secret_key).unwrap();
    assert_eq!(opened, b"anonymous");

    // A new ephemeral key every time.
    let again = s.crypto_box.seal_anonymous(b"anonymous", &bob.public_key).unwrap();
    assert_ne!(sealed[..32], again[..32]);
}

#[test]
fn anonymous_open_rejects_short_and_foreign() {
    let s = sodium();
    let bob = s.crypto_box.key_pair().unwrap();
    let eve = s.crypto_box.key_pair().unwrap();

    let sealed = s.crypto_box.seal_anonymous(b"", &bob.public_key).unwrap();
    assert_eq!(sealed.len(), crypto_box::SEAL_BYTES);
    assert_eq!(s.crypto_box.open_anonymous(&sealed, &bob.public_key, &bob.secret_key).unwrap(), b"");

    assert_eq!(
        s.crypto_box.open_anonymous(&sealed[..47], &bob.public_key, &bob.secret_key),
        Err(SodiumError::AuthenticationFailed)
    );
    assert!(s.crypto_box.open_anonymous(&sealed, &eve.public_key, &eve.secret_key).is_err());
}

#[test]
fn anonymous_seal_nonce_is_blake2b_of_both_public_keys() {
    // Open the sealed box by hand: ephemeral pk, derived nonce, plain box.
    let s = sodium();
    let bob = s.crypto_box.key_pair().unwrap();
    let sealed = s.crypto_box.seal_anonymous(b"by hand", &bob.public_key).unwrap();

    let epk = saline_sodium::BoxPublicKey::from_slice(&sealed[..32]).unwrap();
    let mut both = epk.0.to_vec();
    both.extend_from_slice(&bob.public_key.0);
    let nonce = BoxNonce::from_slice(&s.generic_hash.hash(&both, None, Some(24)).unwrap()).unwrap();

    let opened = s.crypto_box.open_with_nonce(&sealed[32..], &epk, &bob.secret_key, &nonce).unwrap();
    assert_eq!(opened, b"by hand");
}

/// For any message, open(seal(m)) == m.
#[test]
fn property_box_round_trip() {
    let s = sodium();
    let alice = s.crypto_box.key_pair().unwrap();
    let bob = s.crypto_box.key_pair().unwrap();

    proptest!(|(message in prop::collection::vec(any::<u8>(), 0..512))| {
        let sealed = s.crypto_box.seal(&message, &bob.public_key, &alice.secret_key).unwrap();
        let opened = s.crypto_box.open(&sealed, &alice.public_key, &bob.secret_key).unwrap();
        prop_assert_eq!(opened, message.clone());

        let anon = s.crypto_box.seal_anonymous(&message, &bob.public_key).unwrap();
        let opened = s.crypto_box.open_anonymous(&anon, &bob.public_key, &bob.secret_key).unwrap();
        prop_assert_eq!(opened, message);
    });
}

/// Flipping any single bit of a sealed box makes it fail to open.
#[test]
fn property_box_tamper_detection() {
    let s = sodium();
    let alice = s.crypto_box.key_pair().unwrap();
    let bob = s.crypto_box.key_pair().unwrap();

    proptest!(|(message in prop::collection::vec(any::<u8>(), 1..64), pos in any::<prop::sample::Index>(), bit in 0u8..8)| {
        let mut sealed = s.crypto_box.seal(&message, &bob.public_key, &alice.secret_key).unwrap();
        let i = pos.index(sealed.len());
        sealed[i] ^= 1 << bit;
        prop_assert!(s.crypto_box.open(&sealed, &alice.public_key, &bob.secret_key).is_err());

        let mut anon = s.crypto_box.seal_anonymous(&message, &bob.public_key).unwrap();
        let i = pos.index(anon.len());
        anon[i] ^= 1 << bit;
        prop_assert!(s.crypto_box.open_anonymous(&anon, &bob.public_key, &bob.secret_key).is_err());
    });
}

#[test]
fn every_tamper_position_fails() {
    let s = sodium();
    let alice = s.crypto_box.key_pair().unwrap();
    let bob = s.crypto_box.key_pair().unwrap();
    let sealed = s.crypto_box.seal(b"My Test Message", &bob.public_key, &alice.secret_key).unwrap();

    for i in 0..sealed.len() {
        let mut tampered = sealed.clone();
        tampered[i] ^= 0x80;
        assert!(
            s.crypto_box.open(&tampered, &alice.public_key, &bob.secret_key).is_err(),
            "tamper at {i} went unnoticed"
        );
    }
}
