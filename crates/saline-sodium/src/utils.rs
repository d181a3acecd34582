//! Constant-time helpers and encodings (`sodium_*` utilities).

use std::cmp::Ordering;

use saline_core::Result;

use crate::sodium::{safe, Initialized};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Base64Variant {
    #[default]
    Original,
    OriginalNoPadding,
    UrlSafe,
    UrlSafeNoPadding,
}

impl Base64Variant {
    fn id(self) -> i32 {
        match self {
            Self::Original => 1,
            Self::OriginalNoPadding => 3,
            Self::UrlSafe => 5,
            Self::UrlSafeNoPadding => 7,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Utils {
    _init: Initialized,
}

impl Utils {
    pub(crate) fn new(init: Initialized) -> Self {
        Self { _init: init }
    }

    /// Overwrites `buf` with zeros; the write is never elided.
    pub fn zero(&self, buf: &mut [u8]) {
        safe::memzero(buf)
    }

    /// Constant-time equality. Buffers of different length are never equal.
    pub fn equals(&self, a: &[u8], b: &[u8]) -> bool {
        safe::equals(a, b)
    }

    /// Constant-time comparison of two equal-length little-endian numbers.
    pub fn compare(&self, a: &[u8], b: &[u8]) -> Result<Ordering> {
        safe::compare(a, b)
    }

    /// Constant-time little-endian increment, e.g. for counter nonces.
    pub fn increment(&self, n: &mut [u8]) {
        safe::increment(n)
    }

    pub fn bin2hex(&self, bin: &[u8]) -> String {
        safe::bin2hex(bin)
    }

    /// Decodes hex, first dropping every character found in `ignore`.
    pub fn hex2bin(&self, hex: &str, ignore: Option<&str>) -> Result<Vec<u8>> {
        safe::hex2bin(hex, ignore)
    }

    pub fn bin2base64(&self, bin: &[u8], variant: Base64Variant) -> String {
        safe::bin2base64(bin, variant.id())
    }

    pub fn base642bin(&self, b64: &str, variant: Base64Variant, ignore: Option<&str>) -> Result<Vec<u8>> {
        safe::base642bin(b64, variant.id(), ignore)
    }

    /// ISO/IEC 7816-4 padding up to a multiple of `block_size`.
    pub fn pad(&self, buf: &mut Vec<u8>, block_size: usize) -> Result<()> {
        safe::pad(buf, block_size)
    }

    pub fn unpad(&self, buf: &mut Vec<u8>, block_size: usize) -> Result<()> {
        safe::unpad(buf, block_size)
    }
}
