use crate::error::Result;

/// A byte string whose length is fixed by the primitive it belongs to.
///
/// `from_slice` is the only way in from untrusted input, so a wrong-length
/// buffer never reaches the native layer.
pub trait FixedBytes: Sized {
    const LEN: usize;
    const NAME: &'static str;

    fn from_slice(bytes: &[u8]) -> Result<Self>;
    fn as_slice(&self) -> &[u8];
}
