//! Unsafe FFI calls into libsodium.
//!
//! Policy: This is the only module allowed to use `unsafe` in this crate.
//! Callers in `safe` own the length checks; nothing here validates.

use libsodium_sys as sodium;
use std::os::raw::{c_char, c_int, c_uchar, c_ulonglong};

pub(crate) type GenericHashState = sodium::crypto_generichash_state;

pub(crate) fn sodium_init() -> c_int {
    unsafe { sodium::sodium_init() }
}

// --- Memory / utils ---
pub(crate) fn memzero(pnt: *mut c_uchar, len: usize) {
    unsafe { sodium::sodium_memzero(pnt as *mut _, len) }
}

pub(crate) fn memcmp(b1: *const c_uchar, b2: *const c_uchar, len: usize) -> c_int {
    unsafe { sodium::sodium_memcmp(b1 as *const _, b2 as *const _, len) }
}

pub(crate) fn compare(b1: *const c_uchar, b2: *const c_uchar, len: usize) -> c_int {
    unsafe { sodium::sodium_compare(b1 as *const _, b2 as *const _, len) }
}

pub(crate) fn increment(n: *mut c_uchar, nlen: usize) {
    unsafe { sodium::sodium_increment(n as *mut _, nlen) }
}

pub(crate) fn bin2hex(hex: *mut c_char, hex_maxlen: usize, bin: *const c_uchar, bin_len: usize) -> *mut c_char {
    unsafe { sodium::sodium_bin2hex(hex as *mut _, hex_maxlen, bin as *const _, bin_len) }
}

pub(crate) fn hex2bin(
    bin: *mut c_uchar,
    bin_maxlen: usize,
    hex: *const c_char,
    hex_len: usize,
    ignore: *const c_char,
    bin_len: *mut usize,
) -> c_int {
    unsafe {
        sodium::sodium_hex2bin(
            bin as *mut _,
            bin_maxlen,
            hex as *const _,
            hex_len,
            ignore as *const _,
            bin_len as *mut _,
            std::ptr::null_mut(),
        )
    }
}

pub(crate) fn base64_encoded_len(bin_len: usize, variant: c_int) -> usize {
    unsafe { sodium::sodium_base64_encoded_len(bin_len, variant) }
}

pub(crate) fn bin2base64(
    b64: *mut c_char,
    b64_maxlen: usize,
    bin: *const c_uchar,
    bin_len: usize,
    variant: c_int,
) -> *mut c_char {
    unsafe { sodium::sodium_bin2base64(b64 as *mut _, b64_maxlen, bin as *const _, bin_len, variant) }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn base642bin(
    bin: *mut c_uchar,
    bin_maxlen: usize,
    b64: *const c_char,
    b64_len: usize,
    ignore: *const c_char,
    bin_len: *mut usize,
    variant: c_int,
) -> c_int {
    unsafe {
        sodium::sodium_base642bin(
            bin as *mut _,
            bin_maxlen,
            b64 as *const _,
            b64_len,
            ignore as *const _,
            bin_len as *mut _,
            std::ptr::null_mut(),
            variant,
        )
    }
}

pub(crate) fn pad(
    padded_len: *mut usize,
    buf: *mut c_uchar,
    unpadded_len: usize,
    block_size: usize,
    max_len: usize,
) -> c_int {
    unsafe { sodium::sodium_pad(padded_len as *mut _, buf as *mut _, unpadded_len, block_size, max_len) }
}

pub(crate) fn unpad(unpadded_len: *mut usize, buf: *const c_uchar, padded_len: usize, block_size: usize) -> c_int {
    unsafe { sodium::sodium_unpad(unpadded_len as *mut _, buf as *const _, padded_len, block_size) }
}

// --- Random ---
pub(crate) fn randombytes_buf(buf: *mut c_uchar, size: usize) {
    unsafe { sodium::randombytes_buf(buf as *mut _, size) }
}

pub(crate) fn randombytes_buf_deterministic(buf: *mut c_uchar, size: usize, seed: *const c_uchar) {
    unsafe { sodium::randombytes_buf_deterministic(buf as *mut _, size, seed as *const _) }
}

pub(crate) fn randombytes_random() -> u32 {
    unsafe { sodium::randombytes_random() }
}

pub(crate) fn randombytes_uniform(upper_bound: u32) -> u32 {
    unsafe { sodium::randombytes_uniform(upper_bound) }
}

// --- Box (X25519-XSalsa20-Poly1305) ---
pub(crate) fn box_keypair(pk: *mut c_uchar, sk: *mut c_uchar) -> c_int {
    unsafe { sodium::crypto_box_keypair(pk as *mut _, sk as *mut _) }
}

pub(crate) fn box_seed_keypair(pk: *mut c_uchar, sk: *mut c_uchar, seed: *const c_uchar) -> c_int {
    unsafe { sodium::crypto_box_seed_keypair(pk as *mut _, sk as *mut _, seed as *const _) }
}

pub(crate) fn box_easy(
    c: *mut c_uchar,
    m: *const c_uchar,
    mlen: c_ulonglong,
    n: *const c_uchar,
    pk: *const c_uchar,
    sk: *const c_uchar,
) -> c_int {
    unsafe { sodium::crypto_box_easy(c as *mut _, m as *const _, mlen, n as *const _, pk as *const _, sk as *const _) }
}

pub(crate) fn box_open_easy(
    m: *mut c_uchar,
    c: *const c_uchar,
    clen: c_ulonglong,
    n: *const c_uchar,
    pk: *const c_uchar,
    sk: *const c_uchar,
) -> c_int {
    unsafe {
        sodium::crypto_box_open_easy(m as *mut _, c as *const _, clen, n as *const _, pk as *const _, sk as *const _)
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn box_detached(
    c: *mut c_uchar,
    mac: *mut c_uchar,
    m: *const c_uchar,
    mlen: c_ulonglong,
    n: *const c_uchar,
    pk: *const c_uchar,
    sk: *const c_uchar,
) -> c_int {
    unsafe {
        sodium::crypto_box_detached(
            c as *mut _,
            mac as *mut _,
            m as *const _,
            mlen,
            n as *const _,
            pk as *const _,
            sk as *const _,
        )
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn box_open_detached(
    m: *mut c_uchar,
    c: *const c_uchar,
    mac: *const c_uchar,
    clen: c_ulonglong,
    n: *const c_uchar,
    pk: *const c_uchar,
    sk: *const c_uchar,
) -> c_int {
    unsafe {
        sodium::crypto_box_open_detached(
            m as *mut _,
            c as *const _,
            mac as *const _,
            clen,
            n as *const _,
            pk as *const _,
            sk as *const _,
        )
    }
}

pub(crate) fn box_beforenm(k: *mut c_uchar, pk: *const c_uchar, sk: *const c_uchar) -> c_int {
    unsafe { sodium::crypto_box_beforenm(k as *mut _, pk as *const _, sk as *const _) }
}

pub(crate) fn box_easy_afternm(
    c: *mut c_uchar,
    m: *const c_uchar,
    mlen: c_ulonglong,
    n: *const c_uchar,
    k: *const c_uchar,
) -> c_int {
    unsafe { sodium::crypto_box_easy_afternm(c as *mut _, m as *const _, mlen, n as *const _, k as *const _) }
}

pub(crate) fn box_open_easy_afternm(
    m: *mut c_uchar,
    c: *const c_uchar,
    clen: c_ulonglong,
    n: *const c_uchar,
    k: *const c_uchar,
) -> c_int {
    unsafe { sodium::crypto_box_open_easy_afternm(m as *mut _, c as *const _, clen, n as *const _, k as *const _) }
}

pub(crate) fn box_seal_open(
    m: *mut c_uchar,
    c: *const c_uchar,
    clen: c_ulonglong,
    pk: *const c_uchar,
    sk: *const c_uchar,
) -> c_int {
    unsafe { sodium::crypto_box_seal_open(m as *mut _, c as *const _, clen, pk as *const _, sk as *const _) }
}

// --- SecretBox (XSalsa20-Poly1305) ---
pub(crate) fn secretbox_keygen(k: *mut c_uchar) {
    unsafe { sodium::crypto_secretbox_keygen(k as *mut _) }
}

pub(crate) fn secretbox_easy(
    c: *mut c_uchar,
    m: *const c_uchar,
    mlen: c_ulonglong,
    n: *const c_uchar,
    k: *const c_uchar,
) -> c_int {
    unsafe { sodium::crypto_secretbox_easy(c as *mut _, m as *const _, mlen, n as *const _, k as *const _) }
}

pub(crate) fn secretbox_open_easy(
    m: *mut c_uchar,
    c: *const c_uchar,
    clen: c_ulonglong,
    n: *const c_uchar,
    k: *const c_uchar,
) -> c_int {
    unsafe { sodium::crypto_secretbox_open_easy(m as *mut _, c as *const _, clen, n as *const _, k as *const _) }
}

pub(crate) fn secretbox_detached(
    c: *mut c_uchar,
    mac: *mut c_uchar,
    m: *const c_uchar,
    mlen: c_ulonglong,
    n: *const c_uchar,
    k: *const c_uchar,
) -> c_int {
    unsafe {
        sodium::crypto_secretbox_detached(c as *mut _, mac as *mut _, m as *const _, mlen, n as *const _, k as *const _)
    }
}

pub(crate) fn secretbox_open_detached(
    m: *mut c_uchar,
    c: *const c_uchar,
    mac: *const c_uchar,
    clen: c_ulonglong,
    n: *const c_uchar,
    k: *const c_uchar,
) -> c_int {
    unsafe {
        sodium::crypto_secretbox_open_detached(
            m as *mut _,
            c as *const _,
            mac as *const _,
            clen,
            n as *const _,
            k as *const _,
        )
    }
}

// --- Ed25519 ---
pub(crate) fn sign_keypair(pk: *mut c_uchar, sk: *mut c_uchar) -> c_int {
    unsafe { sodium::crypto_sign_keypair(pk as *mut _, sk as *mut _) }
}

pub(crate) fn sign_seed_keypair(pk: *mut c_uchar, sk: *mut c_uchar, seed: *const c_uchar) -> c_int {
    unsafe { sodium::crypto_sign_seed_keypair(pk as *mut _, sk as *mut _, seed as *const _) }
}

pub(crate) fn sign_ed25519_sk_to_pk(pk: *mut c_uchar, sk: *const c_uchar) -> c_int {
    unsafe { sodium::crypto_sign_ed25519_sk_to_pk(pk as *mut _, sk as *const _) }
}

pub(crate) fn sign_combined(
    sm: *mut c_uchar,
    smlen: *mut c_ulonglong,
    m: *const c_uchar,
    mlen: c_ulonglong,
    sk: *const c_uchar,
) -> c_int {
    unsafe { sodium::crypto_sign(sm as *mut _, smlen as *mut _, m as *const _, mlen, sk as *const _) }
}

pub(crate) fn sign_open(
    m: *mut c_uchar,
    mlen: *mut c_ulonglong,
    sm: *const c_uchar,
    smlen: c_ulonglong,
    pk: *const c_uchar,
) -> c_int {
    unsafe { sodium::crypto_sign_open(m as *mut _, mlen as *mut _, sm as *const _, smlen, pk as *const _) }
}

pub(crate) fn sign_detached(
    sig: *mut c_uchar,
    siglen: *mut c_ulonglong,
    msg: *const c_uchar,
    msglen: c_ulonglong,
    sk: *const c_uchar,
) -> c_int {
    unsafe {
        sodium::crypto_sign_detached(sig as *mut _, siglen as *mut _, msg as *const _, msglen, sk as *const _)
    }
}

pub(crate) fn sign_verify_detached(
    sig: *const c_uchar,
    msg: *const c_uchar,
    msglen: c_ulonglong,
    pk: *const c_uchar,
) -> c_int {
    unsafe { sodium::crypto_sign_verify_detached(sig as *const _, msg as *const _, msglen, pk as *const _) }
}

// --- Generic hash (BLAKE2b) ---
pub(crate) fn generichash(
    out: *mut c_uchar,
    outlen: usize,
    input: *const c_uchar,
    inlen: c_ulonglong,
    key: *const c_uchar,
    keylen: usize,
) -> c_int {
    unsafe { sodium::crypto_generichash(out as *mut _, outlen, input as *const _, inlen, key as *const _, keylen) }
}

pub(crate) fn generichash_keygen(k: *mut c_uchar) {
    unsafe { sodium::crypto_generichash_keygen(k as *mut _) }
}

pub(crate) fn generichash_state_zeroed() -> Box<GenericHashState> {
    // All-zero bytes are a valid (if meaningless) value of the opaque state.
    Box::new(unsafe { std::mem::zeroed() })
}

#[cfg(test)]
pub(crate) fn generichash_state_bytes(state: &GenericHashState) -> &[u8] {
    unsafe {
        std::slice::from_raw_parts(
            state as *const GenericHashState as *const u8,
            std::mem::size_of::<GenericHashState>(),
        )
    }
}

pub(crate) fn generichash_init(state: *mut GenericHashState, key: *const c_uchar, keylen: usize, outlen: usize) -> c_int {
    unsafe { sodium::crypto_generichash_init(state, key as *const _, keylen, outlen) }
}

pub(crate) fn generichash_update(state: *mut GenericHashState, input: *const c_uchar, inlen: c_ulonglong) -> c_int {
    unsafe { sodium::crypto_generichash_update(state, input as *const _, inlen) }
}

pub(crate) fn generichash_final(state: *mut GenericHashState, out: *mut c_uchar, outlen: usize) -> c_int {
    unsafe { sodium::crypto_generichash_final(state, out as *mut _, outlen) }
}

// --- Short hash (SipHash-2-4) ---
pub(crate) fn shorthash(out: *mut c_uchar, input: *const c_uchar, inlen: c_ulonglong, k: *const c_uchar) -> c_int {
    unsafe { sodium::crypto_shorthash(out as *mut _, input as *const _, inlen, k as *const _) }
}

pub(crate) fn shorthash_keygen(k: *mut c_uchar) {
    unsafe { sodium::crypto_shorthash_keygen(k as *mut _) }
}

// --- Password hash (Argon2) ---
pub(crate) fn pwhash_str(
    out: *mut c_char,
    passwd: *const c_char,
    passwdlen: c_ulonglong,
    opslimit: c_ulonglong,
    memlimit: usize,
) -> c_int {
    unsafe { sodium::crypto_pwhash_str(out as *mut _, passwd as *const _, passwdlen, opslimit, memlimit) }
}

pub(crate) fn pwhash_str_verify(s: *const c_char, passwd: *const c_char, passwdlen: c_ulonglong) -> c_int {
    unsafe { sodium::crypto_pwhash_str_verify(s as *const _, passwd as *const _, passwdlen) }
}

pub(crate) fn pwhash_str_needs_rehash(s: *const c_char, opslimit: c_ulonglong, memlimit: usize) -> c_int {
    unsafe { sodium::crypto_pwhash_str_needs_rehash(s as *const _, opslimit, memlimit) }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn pwhash(
    out: *mut c_uchar,
    outlen: c_ulonglong,
    passwd: *const c_char,
    passwdlen: c_ulonglong,
    salt: *const c_uchar,
    opslimit: c_ulonglong,
    memlimit: usize,
    alg: c_int,
) -> c_int {
    unsafe {
        sodium::crypto_pwhash(
            out as *mut _,
            outlen,
            passwd as *const _,
            passwdlen,
            salt as *const _,
            opslimit,
            memlimit,
            alg,
        )
    }
}

/// Argon2 cost bounds as (ops min, ops max, mem min, mem max).
pub(crate) type PwHashLimits = (usize, usize, usize, usize);

pub(crate) fn pwhash_argon2i_limits() -> PwHashLimits {
    unsafe {
        (
            sodium::crypto_pwhash_argon2i_opslimit_min(),
            sodium::crypto_pwhash_argon2i_opslimit_max(),
            sodium::crypto_pwhash_argon2i_memlimit_min(),
            sodium::crypto_pwhash_argon2i_memlimit_max(),
        )
    }
}

pub(crate) fn pwhash_argon2id_limits() -> PwHashLimits {
    unsafe {
        (
            sodium::crypto_pwhash_argon2id_opslimit_min(),
            sodium::crypto_pwhash_argon2id_opslimit_max(),
            sodium::crypto_pwhash_argon2id_memlimit_min(),
            sodium::crypto_pwhash_argon2id_memlimit_max(),
        )
    }
}

pub(crate) fn pwhash_bytes_max() -> usize {
    unsafe { sodium::crypto_pwhash_bytes_max() }
}
