use std::{cmp::Ordering, ffi::CString, mem, os::raw::c_int};

use saline_core::{
    check_len, check_range,
    params::{crypto_box, generic_hash, pw_hash, secret_box, short_hash, sign},
    BoxKeyPair, BoxMac, BoxNonce, BoxPublicKey, BoxSecretKey, BoxSeed, BoxSharedKey, GenericHashKey, PwHashSalt,
    RandomSeed, Result, SecretBoxKey, SecretBoxMac, SecretBoxNonce, ShortHashDigest, ShortHashKey, SignKeyPair,
    SignPublicKey, SignSecretKey, SignSeed, Signature, SodiumError,
};
use zeroize::Zeroizing;

use super::ffi::{self, GenericHashState};

// randombytes_buf_deterministic aborts the process above this size.
const DETERMINISTIC_MAX: u64 = 0x40_0000_0000;

pub(crate) fn sodium_init() -> Result<()> {
    let rc = ffi::sodium_init();
    if rc < 0 {
        return Err(SodiumError::InitFailed);
    }
    Ok(())
}

fn output_len(what: &'static str, len: usize, overhead: usize) -> Result<usize> {
    len.checked_add(overhead).ok_or(SodiumError::LengthOutOfRange {
        what,
        min: 0,
        max: usize::MAX - overhead,
        actual: len,
    })
}

// Drops a failed output buffer only after clearing whatever the native side wrote.
fn discard(mut buf: Vec<u8>) {
    memzero(&mut buf);
}

// --- Memory / utils ---
pub(crate) fn memzero(buf: &mut [u8]) {
    if buf.is_empty() {
        return;
    }
    ffi::memzero(buf.as_mut_ptr(), buf.len());
}

pub(crate) fn equals(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    if a.is_empty() {
        return true;
    }
    ffi::memcmp(a.as_ptr(), b.as_ptr(), a.len()) == 0
}

pub(crate) fn compare(a: &[u8], b: &[u8]) -> Result<Ordering> {
    check_len("compare operand", a.len(), b.len())?;
    if a.is_empty() {
        return Ok(Ordering::Equal);
    }
    Ok(ffi::compare(a.as_ptr(), b.as_ptr(), a.len()).cmp(&0))
}

pub(crate) fn increment(n: &mut [u8]) {
    if n.is_empty() {
        return;
    }
    ffi::increment(n.as_mut_ptr(), n.len());
}

pub(crate) fn bin2hex(bin: &[u8]) -> String {
    // Slices never exceed isize::MAX bytes, so this cannot overflow.
    let mut hex = vec![0u8; bin.len() * 2 + 1];
    ffi::bin2hex(hex.as_mut_ptr() as *mut _, hex.len(), bin.as_ptr(), bin.len());
    hex.pop();
    hex.into_iter().map(char::from).collect()
}

pub(crate) fn hex2bin(hex: &str, ignore: Option<&str>) -> Result<Vec<u8>> {
    // Ignored characters are stripped before digits are paired, so a separator
    // may also sit between the two digits of one byte.
    let digits: Zeroizing<Vec<u8>> = Zeroizing::new(match ignore {
        Some(ignore) => hex
            .chars()
            .filter(|c| !ignore.contains(*c))
            .collect::<String>()
            .into_bytes(),
        None => hex.as_bytes().to_vec(),
    });

    if digits.len() % 2 != 0 {
        return Err(SodiumError::MalformedEncoding("hex"));
    }

    let expected = digits.len() / 2;
    let mut bin = vec![0u8; expected];
    let mut bin_len = 0usize;
    let rc = ffi::hex2bin(
        bin.as_mut_ptr(),
        bin.len(),
        digits.as_ptr() as *const _,
        digits.len(),
        std::ptr::null(),
        &mut bin_len,
    );

    if rc != 0 || bin_len != expected {
        discard(bin);
        return Err(SodiumError::MalformedEncoding("hex"));
    }
    Ok(bin)
}

pub(crate) fn bin2base64(bin: &[u8], variant: c_int) -> String {
    let mut b64 = vec![0u8; ffi::base64_encoded_len(bin.len(), variant)];
    ffi::bin2base64(b64.as_mut_ptr() as *mut _, b64.len(), bin.as_ptr(), bin.len(), variant);
    b64.into_iter().take_while(|&b| b != 0).map(char::from).collect()
}

pub(crate) fn base642bin(b64: &str, variant: c_int, ignore: Option<&str>) -> Result<Vec<u8>> {
    let ignore = ignore
        .map(CString::new)
        .transpose()
        .map_err(|_| SodiumError::MalformedEncoding("base64 ignore set"))?;

    let mut bin = vec![0u8; b64.len() / 4 * 3 + 3];
    let mut bin_len = 0usize;
    let rc = ffi::base642bin(
        bin.as_mut_ptr(),
        bin.len(),
        b64.as_ptr() as *const _,
        b64.len(),
        ignore.as_ref().map_or(std::ptr::null(), |s| s.as_ptr()),
        &mut bin_len,
        variant,
    );

    if rc != 0 {
        discard(bin);
        return Err(SodiumError::MalformedEncoding("base64"));
    }
    bin.truncate(bin_len);
    Ok(bin)
}

pub(crate) fn pad(buf: &mut Vec<u8>, block_size: usize) -> Result<()> {
    check_range("block size", 1, usize::MAX, block_size)?;
    let unpadded = buf.len();
    let max_len = output_len("padded buffer", unpadded, block_size)?;
    if max_len > isize::MAX as usize || buf.try_reserve_exact(max_len - unpadded).is_err() {
        return Err(SodiumError::LengthOutOfRange {
            what: "padded buffer",
            min: 0,
            max: isize::MAX as usize,
            actual: max_len,
        });
    }
    buf.resize(max_len, 0);

    let mut padded = 0usize;
    let rc = ffi::pad(&mut padded, buf.as_mut_ptr(), unpadded, block_size, max_len);
    if rc != 0 {
        buf.truncate(unpadded);
        return Err(SodiumError::NativeFailure("sodium_pad"));
    }
    buf.truncate(padded);
    Ok(())
}

pub(crate) fn unpad(buf: &mut Vec<u8>, block_size: usize) -> Result<()> {
    check_range("block size", 1, usize::MAX, block_size)?;
    let mut unpadded = 0usize;
    let rc = ffi::unpad(&mut unpadded, buf.as_ptr(), buf.len(), block_size);
    if rc != 0 {
        return Err(SodiumError::MalformedEncoding("padding"));
    }
    buf.truncate(unpadded);
    Ok(())
}

// --- Random ---
pub(crate) fn random_bytes(out: &mut [u8]) {
    if out.is_empty() {
        return;
    }
    ffi::randombytes_buf(out.as_mut_ptr(), out.len());
}

pub(crate) fn random_u32() -> u32 {
    ffi::randombytes_random()
}

pub(crate) fn random_uniform(upper_bound: u32) -> u32 {
    ffi::randombytes_uniform(upper_bound)
}

pub(crate) fn random_deterministic(len: usize, seed: &RandomSeed) -> Result<Vec<u8>> {
    if len as u64 > DETERMINISTIC_MAX {
        return Err(SodiumError::LengthOutOfRange {
            what: "deterministic output",
            min: 0,
            max: DETERMINISTIC_MAX as usize,
            actual: len,
        });
    }
    let mut out = vec![0u8; len];
    if len > 0 {
        ffi::randombytes_buf_deterministic(out.as_mut_ptr(), len, seed.as_bytes().as_ptr());
    }
    Ok(out)
}

// --- Box ---
pub(crate) fn box_keypair() -> Result<BoxKeyPair> {
    let mut pk = [0u8; crypto_box::PUBLIC_KEY_BYTES];
    let mut sk = BoxSecretKey::zeroed();

    let rc = ffi::box_keypair(pk.as_mut_ptr(), sk.as_mut_bytes().as_mut_ptr());
    if rc != 0 {
        return Err(SodiumError::NativeFailure("crypto_box_keypair"));
    }

    Ok(BoxKeyPair { public_key: BoxPublicKey(pk), secret_key: sk })
}

pub(crate) fn box_seed_keypair(seed: &BoxSeed) -> Result<BoxKeyPair> {
    let mut pk = [0u8; crypto_box::PUBLIC_KEY_BYTES];
    let mut sk = BoxSecretKey::zeroed();

    let rc = ffi::box_seed_keypair(pk.as_mut_ptr(), sk.as_mut_bytes().as_mut_ptr(), seed.as_bytes().as_ptr());
    if rc != 0 {
        return Err(SodiumError::NativeFailure("crypto_box_seed_keypair"));
    }

    Ok(BoxKeyPair { public_key: BoxPublicKey(pk), secret_key: sk })
}

pub(crate) fn box_easy(m: &[u8], n: &BoxNonce, pk: &BoxPublicKey, sk: &BoxSecretKey) -> Result<Vec<u8>> {
    let mut c = vec![0u8; output_len("message", m.len(), crypto_box::MAC_BYTES)?];

    let rc = ffi::box_easy(
        c.as_mut_ptr(),
        m.as_ptr(),
        m.len() as u64,
        n.0.as_ptr(),
        pk.0.as_ptr(),
        sk.as_bytes().as_ptr(),
    );
    if rc != 0 {
        discard(c);
        return Err(SodiumError::NativeFailure("crypto_box_easy"));
    }

    Ok(c)
}

pub(crate) fn box_open_easy(c: &[u8], n: &BoxNonce, pk: &BoxPublicKey, sk: &BoxSecretKey) -> Result<Vec<u8>> {
    if c.len() < crypto_box::MAC_BYTES {
        return Err(SodiumError::AuthenticationFailed);
    }
    let mut m = vec![0u8; c.len() - crypto_box::MAC_BYTES];

    let rc = ffi::box_open_easy(
        m.as_mut_ptr(),
        c.as_ptr(),
        c.len() as u64,
        n.0.as_ptr(),
        pk.0.as_ptr(),
        sk.as_bytes().as_ptr(),
    );
    if rc != 0 {
        discard(m);
        return Err(SodiumError::AuthenticationFailed);
    }

    Ok(m)
}

pub(crate) fn box_detached(
    m: &[u8],
    n: &BoxNonce,
    pk: &BoxPublicKey,
    sk: &BoxSecretKey,
) -> Result<(Vec<u8>, BoxMac)> {
    let mut c = vec![0u8; m.len()];
    let mut mac = [0u8; crypto_box::MAC_BYTES];

    let rc = ffi::box_detached(
        c.as_mut_ptr(),
        mac.as_mut_ptr(),
        m.as_ptr(),
        m.len() as u64,
        n.0.as_ptr(),
        pk.0.as_ptr(),
        sk.as_bytes().as_ptr(),
    );
    if rc != 0 {
        discard(c);
        return Err(SodiumError::NativeFailure("crypto_box_detached"));
    }

    Ok((c, BoxMac(mac)))
}

pub(crate) fn box_open_detached(
    c: &[u8],
    mac: &BoxMac,
    n: &BoxNonce,
    pk: &BoxPublicKey,
    sk: &BoxSecretKey,
) -> Result<Vec<u8>> {
    let mut m = vec![0u8; c.len()];

    let rc = ffi::box_open_detached(
        m.as_mut_ptr(),
        c.as_ptr(),
        mac.0.as_ptr(),
        c.len() as u64,
        n.0.as_ptr(),
        pk.0.as_ptr(),
        sk.as_bytes().as_ptr(),
    );
    if rc != 0 {
        discard(m);
        return Err(SodiumError::AuthenticationFailed);
    }

    Ok(m)
}

pub(crate) fn box_beforenm(pk: &BoxPublicKey, sk: &BoxSecretKey) -> Result<BoxSharedKey> {
    let mut k = BoxSharedKey::zeroed();

    let rc = ffi::box_beforenm(k.as_mut_bytes().as_mut_ptr(), pk.0.as_ptr(), sk.as_bytes().as_ptr());
    if rc != 0 {
        return Err(SodiumError::NativeFailure("crypto_box_beforenm"));
    }

    Ok(k)
}

pub(crate) fn box_easy_afternm(m: &[u8], n: &BoxNonce, k: &BoxSharedKey) -> Result<Vec<u8>> {
    let mut c = vec![0u8; output_len("message", m.len(), crypto_box::MAC_BYTES)?];

    let rc = ffi::box_easy_afternm(c.as_mut_ptr(), m.as_ptr(), m.len() as u64, n.0.as_ptr(), k.as_bytes().as_ptr());
    if rc != 0 {
        discard(c);
        return Err(SodiumError::NativeFailure("crypto_box_easy_afternm"));
    }

    Ok(c)
}

pub(crate) fn box_open_easy_afternm(c: &[u8], n: &BoxNonce, k: &BoxSharedKey) -> Result<Vec<u8>> {
    if c.len() < crypto_box::MAC_BYTES {
        return Err(SodiumError::AuthenticationFailed);
    }
    let mut m = vec![0u8; c.len() - crypto_box::MAC_BYTES];

    let rc = ffi::box_open_easy_afternm(m.as_mut_ptr(), c.as_ptr(), c.len() as u64, n.0.as_ptr(), k.as_bytes().as_ptr());
    if rc != 0 {
        discard(m);
        return Err(SodiumError::AuthenticationFailed);
    }

    Ok(m)
}

pub(crate) fn box_seal_open(c: &[u8], pk: &BoxPublicKey, sk: &BoxSecretKey) -> Result<Vec<u8>> {
    if c.len() < crypto_box::SEAL_BYTES {
        return Err(SodiumError::AuthenticationFailed);
    }
    let mut m = vec![0u8; c.len() - crypto_box::SEAL_BYTES];

    let rc = ffi::box_seal_open(m.as_mut_ptr(), c.as_ptr(), c.len() as u64, pk.0.as_ptr(), sk.as_bytes().as_ptr());
    if rc != 0 {
        discard(m);
        return Err(SodiumError::AuthenticationFailed);
    }

    Ok(m)
}

// --- SecretBox ---
pub(crate) fn secretbox_keygen() -> SecretBoxKey {
    let mut k = SecretBoxKey::zeroed();
    ffi::secretbox_keygen(k.as_mut_bytes().as_mut_ptr());
    k
}

pub(crate) fn secretbox_easy(m: &[u8], n: &SecretBoxNonce, k: &SecretBoxKey) -> Result<Vec<u8>> {
    let mut c = vec![0u8; output_len("message", m.len(), secret_box::MAC_BYTES)?];

    let rc = ffi::secretbox_easy(c.as_mut_ptr(), m.as_ptr(), m.len() as u64, n.0.as_ptr(), k.as_bytes().as_ptr());
    if rc != 0 {
        discard(c);
        return Err(SodiumError::NativeFailure("crypto_secretbox_easy"));
    }

    Ok(c)
}

pub(crate) fn secretbox_open_easy(c: &[u8], n: &SecretBoxNonce, k: &SecretBoxKey) -> Result<Vec<u8>> {
    if c.len() < secret_box::MAC_BYTES {
        return Err(SodiumError::AuthenticationFailed);
    }
    let mut m = vec![0u8; c.len() - secret_box::MAC_BYTES];

    let rc = ffi::secretbox_open_easy(m.as_mut_ptr(), c.as_ptr(), c.len() as u64, n.0.as_ptr(), k.as_bytes().as_ptr());
    if rc != 0 {
        discard(m);
        return Err(SodiumError::AuthenticationFailed);
    }

    Ok(m)
}

pub(crate) fn secretbox_detached(
    m: &[u8],
    n: &SecretBoxNonce,
    k: &SecretBoxKey,
) -> Result<(Vec<u8>, SecretBoxMac)> {
    let mut c = vec![0u8; m.len()];
    let mut mac = [0u8; secret_box::MAC_BYTES];

    let rc = ffi::secretbox_detached(
        c.as_mut_ptr(),
        mac.as_mut_ptr(),
        m.as_ptr(),
        m.len() as u64,
        n.0.as_ptr(),
        k.as_bytes().as_ptr(),
    );
    if rc != 0 {
        discard(c);
        return Err(SodiumError::NativeFailure("crypto_secretbox_detached"));
    }

    Ok((c, SecretBoxMac(mac)))
}

pub(crate) fn secretbox_open_detached(
    c: &[u8],
    mac: &SecretBoxMac,
    n: &SecretBoxNonce,
    k: &SecretBoxKey,
) -> Result<Vec<u8>> {
    let mut m = vec![0u8; c.len()];

    let rc = ffi::secretbox_open_detached(
        m.as_mut_ptr(),
        c.as_ptr(),
        mac.0.as_ptr(),
        c.len() as u64,
        n.0.as_ptr(),
        k.as_bytes().as_ptr(),
    );
    if rc != 0 {
        discard(m);
        return Err(SodiumError::AuthenticationFailed);
    }

    Ok(m)
}

// --- Ed25519 ---
pub(crate) fn sign_keypair() -> Result<SignKeyPair> {
    let mut pk = [0u8; sign::PUBLIC_KEY_BYTES];
    let mut sk = SignSecretKey::zeroed();

    let rc = ffi::sign_keypair(pk.as_mut_ptr(), sk.as_mut_bytes().as_mut_ptr());
    if rc != 0 {
        return Err(SodiumError::NativeFailure("crypto_sign_keypair"));
    }

    Ok(SignKeyPair { public_key: SignPublicKey(pk), secret_key: sk })
}

pub(crate) fn sign_seed_keypair(seed: &SignSeed) -> Result<SignKeyPair> {
    let mut pk = [0u8; sign::PUBLIC_KEY_BYTES];
    let mut sk = SignSecretKey::zeroed();

    let rc = ffi::sign_seed_keypair(pk.as_mut_ptr(), sk.as_mut_bytes().as_mut_ptr(), seed.as_bytes().as_ptr());
    if rc != 0 {
        return Err(SodiumError::NativeFailure("crypto_sign_seed_keypair"));
    }

    Ok(SignKeyPair { public_key: SignPublicKey(pk), secret_key: sk })
}

pub(crate) fn sign_sk_to_pk(sk: &SignSecretKey) -> Result<SignPublicKey> {
    let mut pk = [0u8; sign::PUBLIC_KEY_BYTES];

    let rc = ffi::sign_ed25519_sk_to_pk(pk.as_mut_ptr(), sk.as_bytes().as_ptr());
    if rc != 0 {
        return Err(SodiumError::NativeFailure("crypto_sign_ed25519_sk_to_pk"));
    }

    Ok(SignPublicKey(pk))
}

pub(crate) fn sign_combined(m: &[u8], sk: &SignSecretKey) -> Result<Vec<u8>> {
    let mut sm = vec![0u8; output_len("message", m.len(), sign::BYTES)?];
    let mut smlen: u64 = 0;

    let rc = ffi::sign_combined(
        sm.as_mut_ptr(),
        &mut smlen as *mut u64 as *mut _,
        m.as_ptr(),
        m.len() as u64,
        sk.as_bytes().as_ptr(),
    );
    if rc != 0 || smlen as usize != sm.len() {
        discard(sm);
        return Err(SodiumError::NativeFailure("crypto_sign"));
    }

    Ok(sm)
}

pub(crate) fn sign_open(sm: &[u8], pk: &SignPublicKey) -> Result<Vec<u8>> {
    if sm.len() < sign::BYTES {
        return Err(SodiumError::AuthenticationFailed);
    }
    let mut m = vec![0u8; sm.len() - sign::BYTES];
    let mut mlen: u64 = 0;

    let rc = ffi::sign_open(
        m.as_mut_ptr(),
        &mut mlen as *mut u64 as *mut _,
        sm.as_ptr(),
        sm.len() as u64,
        pk.0.as_ptr(),
    );
    if rc != 0 {
        discard(m);
        return Err(SodiumError::AuthenticationFailed);
    }

    m.truncate(mlen as usize);
    Ok(m)
}

pub(crate) fn sign_detached(m: &[u8], sk: &SignSecretKey) -> Result<Signature> {
    let mut sig = [0u8; sign::BYTES];
    let mut siglen: u64 = 0;

    let rc = ffi::sign_detached(
        sig.as_mut_ptr(),
        &mut siglen as *mut u64 as *mut _,
        m.as_ptr(),
        m.len() as u64,
        sk.as_bytes().as_ptr(),
    );
    if rc != 0 || siglen as usize != sign::BYTES {
        return Err(SodiumError::NativeFailure("crypto_sign_detached"));
    }

    Ok(Signature(sig))
}

pub(crate) fn sign_verify_detached(m: &[u8], pk: &SignPublicKey, sig: &Signature) -> bool {
    ffi::sign_verify_detached(sig.0.as_ptr(), m.as_ptr(), m.len() as u64, pk.0.as_ptr()) == 0
}

// --- Generic hash (BLAKE2b) ---
fn key_ptr(key: Option<&[u8]>) -> Result<(*const u8, usize)> {
    match key {
        Some(k) => {
            check_range(
                "generichash key",
                generic_hash::KEY_BYTES_MIN,
                generic_hash::KEY_BYTES_MAX,
                k.len(),
            )?;
            Ok((k.as_ptr(), k.len()))
        }
        None => Ok((std::ptr::null(), 0)),
    }
}

fn check_digest_len(out_len: usize) -> Result<()> {
    check_range("generichash output", generic_hash::BYTES_MIN, generic_hash::BYTES_MAX, out_len)
}

pub(crate) fn generichash(data: &[u8], key: Option<&[u8]>, out_len: usize) -> Result<Vec<u8>> {
    check_digest_len(out_len)?;
    let (kptr, klen) = key_ptr(key)?;
    let mut out = vec![0u8; out_len];

    let rc = ffi::generichash(out.as_mut_ptr(), out.len(), data.as_ptr(), data.len() as u64, kptr, klen);
    if rc != 0 {
        return Err(SodiumError::NativeFailure("crypto_generichash"));
    }

    Ok(out)
}

pub(crate) fn generichash_keygen() -> Result<GenericHashKey> {
    let mut k = Zeroizing::new([0u8; generic_hash::KEY_BYTES]);
    ffi::generichash_keygen(k.as_mut_ptr());
    GenericHashKey::from_slice(&k[..])
}

pub(crate) fn generichash_init(key: Option<&[u8]>, out_len: usize) -> Result<Box<GenericHashState>> {
    check_digest_len(out_len)?;
    let (kptr, klen) = key_ptr(key)?;
    let mut state = ffi::generichash_state_zeroed();

    let rc = ffi::generichash_init(&mut *state, kptr, klen, out_len);
    if rc != 0 {
        generichash_state_wipe(&mut state);
        return Err(SodiumError::NativeFailure("crypto_generichash_init"));
    }

    Ok(state)
}

pub(crate) fn generichash_update(state: &mut GenericHashState, data: &[u8]) -> Result<()> {
    let rc = ffi::generichash_update(state, data.as_ptr(), data.len() as u64);
    if rc != 0 {
        return Err(SodiumError::NativeFailure("crypto_generichash_update"));
    }
    Ok(())
}

pub(crate) fn generichash_final(state: &mut GenericHashState, out_len: usize) -> Result<Vec<u8>> {
    check_digest_len(out_len)?;
    let mut out = vec![0u8; out_len];

    let rc = ffi::generichash_final(state, out.as_mut_ptr(), out.len());
    if rc != 0 {
        return Err(SodiumError::NativeFailure("crypto_generichash_final"));
    }

    Ok(out)
}

pub(crate) fn generichash_state_wipe(state: &mut GenericHashState) {
    ffi::memzero(state as *mut GenericHashState as *mut u8, mem::size_of::<GenericHashState>());
}

// --- Short hash (SipHash-2-4) ---
pub(crate) fn shorthash(data: &[u8], k: &ShortHashKey) -> Result<ShortHashDigest> {
    let mut out = [0u8; short_hash::BYTES];

    let rc = ffi::shorthash(out.as_mut_ptr(), data.as_ptr(), data.len() as u64, k.as_bytes().as_ptr());
    if rc != 0 {
        return Err(SodiumError::NativeFailure("crypto_shorthash"));
    }

    Ok(ShortHashDigest(out))
}

pub(crate) fn shorthash_keygen() -> ShortHashKey {
    let mut k = ShortHashKey::zeroed();
    ffi::shorthash_keygen(k.as_mut_bytes().as_mut_ptr());
    k
}

// --- Password hash (Argon2) ---
// Bounds differ per algorithm: Argon2i needs at least 3 passes.
fn check_limits(alg: c_int, ops_limit: u64, mem_limit: usize) -> Result<()> {
    let (ops_min, ops_max, mem_min, mem_max) = match alg {
        pw_hash::ALG_ARGON2I13 => ffi::pwhash_argon2i_limits(),
        pw_hash::ALG_ARGON2ID13 => ffi::pwhash_argon2id_limits(),
        _ => return Err(SodiumError::InvalidLimits),
    };
    let ops_ok = ops_limit >= ops_min as u64 && ops_limit <= ops_max as u64;
    let mem_ok = mem_limit >= mem_min && mem_limit <= mem_max;
    if !ops_ok || !mem_ok {
        return Err(SodiumError::InvalidLimits);
    }
    Ok(())
}

// crypto_pwhash_str always produces Argon2id.
pub(crate) fn pwhash_str(passwd: &[u8], ops_limit: u64, mem_limit: usize) -> Result<String> {
    check_limits(pw_hash::ALG_ARGON2ID13, ops_limit, mem_limit)?;
    let mut out = [0u8; pw_hash::STR_BYTES];

    let rc = ffi::pwhash_str(
        out.as_mut_ptr() as *mut _,
        passwd.as_ptr() as *const _,
        passwd.len() as u64,
        ops_limit,
        mem_limit,
    );
    if rc != 0 {
        return Err(SodiumError::NativeFailure("crypto_pwhash_str"));
    }

    let end = out.iter().position(|&b| b == 0).unwrap_or(out.len());
    String::from_utf8(out[..end].to_vec()).map_err(|_| SodiumError::MalformedEncoding("password hash string"))
}

pub(crate) fn pwhash_str_verify(encoded: &str, passwd: &[u8]) -> bool {
    // An interior NUL can never be part of a valid encoded hash.
    let Ok(encoded) = CString::new(encoded) else {
        return false;
    };
    ffi::pwhash_str_verify(encoded.as_ptr(), passwd.as_ptr() as *const _, passwd.len() as u64) == 0
}

pub(crate) fn pwhash_str_needs_rehash(encoded: &str, ops_limit: u64, mem_limit: usize) -> Result<bool> {
    let encoded = CString::new(encoded).map_err(|_| SodiumError::MalformedEncoding("password hash string"))?;
    match ffi::pwhash_str_needs_rehash(encoded.as_ptr(), ops_limit, mem_limit) {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(SodiumError::MalformedEncoding("password hash string")),
    }
}

pub(crate) fn pwhash(
    out_len: usize,
    passwd: &[u8],
    salt: &PwHashSalt,
    ops_limit: u64,
    mem_limit: usize,
    alg: c_int,
) -> Result<Vec<u8>> {
    check_range("pwhash output", pw_hash::BYTES_MIN, ffi::pwhash_bytes_max(), out_len)?;
    check_limits(alg, ops_limit, mem_limit)?;
    let mut out = vec![0u8; out_len];

    let rc = ffi::pwhash(
        out.as_mut_ptr(),
        out_len as u64,
        passwd.as_ptr() as *const _,
        passwd.len() as u64,
        salt.0.as_ptr(),
        ops_limit,
        mem_limit,
        alg,
    );
    if rc != 0 {
        discard(out);
        return Err(SodiumError::NativeFailure("crypto_pwhash"));
    }

    Ok(out)
}
