use crate::params::{crypto_box, pw_hash, secret_box, sign};
use crate::{
    BoxMac, BoxNonce, BoxPublicKey, BoxSecretKey, FixedBytes, PwHashAlgorithm, PwHashPreset, Signature,
    SignSecretKey, SodiumError,
};

#[test]
fn size_assumptions_hold() {
    assert_eq!(std::mem::size_of::<BoxPublicKey>(), crypto_box::PUBLIC_KEY_BYTES);
    assert_eq!(std::mem::size_of::<BoxSecretKey>(), crypto_box::SECRET_KEY_BYTES);
    assert_eq!(std::mem::size_of::<BoxNonce>(), 24);
    assert_eq!(std::mem::size_of::<BoxMac>(), 16);
    assert_eq!(std::mem::size_of::<SignSecretKey>(), 64);
    assert_eq!(std::mem::size_of::<Signature>(), sign::BYTES);
    assert_eq!(crypto_box::SEAL_BYTES, 48);
    assert_eq!(secret_box::NONCE_BYTES, crypto_box::NONCE_BYTES);
}

#[test]
fn from_slice_rejects_wrong_length() {
    let err = BoxNonce::from_slice(&[0u8; 23]).unwrap_err();
    assert_eq!(
        err,
        SodiumError::InvalidLength { what: "box nonce", expected: 24, actual: 23 }
    );

    assert!(BoxSecretKey::from_slice(&[1u8; 33]).is_err());
    assert!(BoxSecretKey::from_slice(&[]).is_err());

    let nonce = BoxNonce::try_from(&[7u8; 24][..]).unwrap();
    assert_eq!(nonce.as_slice(), &[7u8; 24]);
}

#[test]
fn secret_debug_is_redacted() {
    let sk = BoxSecretKey::from_bytes([0xAB; 32]);
    let shown = format!("{sk:?}");
    assert_eq!(shown, "BoxSecretKey(<redacted>)");
    assert!(!shown.contains("171"));
}

#[test]
fn presets_parse_and_display() {
    assert_eq!("interactive".parse::<PwHashPreset>().unwrap(), PwHashPreset::Interactive);
    assert_eq!(" Moderate ".parse::<PwHashPreset>().unwrap(), PwHashPreset::Moderate);
    assert_eq!("SENSITIVE".parse::<PwHashPreset>().unwrap(), PwHashPreset::Sensitive);
    assert!("paranoid".parse::<PwHashPreset>().is_err());

    assert_eq!(PwHashPreset::Moderate.to_string(), "moderate");
    assert_eq!(PwHashPreset::default(), PwHashPreset::Interactive);
}

#[test]
fn presets_increase_in_cost() {
    let presets = [PwHashPreset::Interactive, PwHashPreset::Moderate, PwHashPreset::Sensitive];
    for pair in presets.windows(2) {
        assert!(pair[0].ops_limit() < pair[1].ops_limit());
        assert!(pair[0].mem_limit() < pair[1].mem_limit());
    }
    assert_eq!(PwHashPreset::Interactive.mem_limit(), pw_hash::MEM_LIMIT_INTERACTIVE);
    assert_eq!(PwHashAlgorithm::default().id(), pw_hash::ALG_ARGON2ID13);
}
