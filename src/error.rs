//! Errors for digest handling.

/// Errors returned when comparing or decoding digests.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// One or both digests are not exactly [`crate::DIGEST_LEN`] bytes.
    #[error("invalid digest length (left {left}, right {right}, expected 32)")]
    InvalidDigestLength {
        /// Length of the first digest.
        left: usize,
        /// Length of the second digest.
        right: usize,
    },
    /// A hex-encoded digest contained non-hex characters or an odd number of digits.
    #[error("invalid hex digest: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}
