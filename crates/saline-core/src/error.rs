use thiserror::Error;

/// Every failure a saline operation can report.
///
/// Authentication failures carry no detail on purpose: a truncated box and a
/// forged box surface as the same `AuthenticationFailed`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SodiumError {
    #[error("libsodium initialization failed")]
    InitFailed,

    #[error("invalid {what} length: expected {expected}, got {actual}")]
    InvalidLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{what} length {actual} outside [{min}, {max}]")]
    LengthOutOfRange {
        what: &'static str,
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("authentication failed")]
    AuthenticationFailed,

    /// The native call reported failure despite well-formed inputs, for
    /// example an out-of-memory password hash or a low-order public key.
    #[error("{0} failed")]
    NativeFailure(&'static str),

    #[error("malformed {0}")]
    MalformedEncoding(&'static str),

    #[error("password hash limits out of range")]
    InvalidLimits,

    #[error("hash stream already finalized")]
    StreamFinalized,
}

pub type Result<T> = std::result::Result<T, SodiumError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown password hash preset: {0} (expected interactive, moderate or sensitive)")]
pub struct UnknownPreset(pub String);

/// Rejects `actual` unless it is exactly `expected`.
pub fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if actual != expected {
        return Err(SodiumError::InvalidLength { what, expected, actual });
    }
    Ok(())
}

/// Rejects `actual` unless `min <= actual <= max`.
pub fn check_range(what: &'static str, min: usize, max: usize, actual: usize) -> Result<()> {
    if actual < min || actual > max {
        return Err(SodiumError::LengthOutOfRange { what, min, max, actual });
    }
    Ok(())
}
