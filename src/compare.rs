//! Digest comparison.
//!
//! The score is `128 - hamming_distance`, so it lives in `[-128, 128]`: 128 for identical
//! digests, around 0 for unrelated inputs, -128 when every bit differs.

use crate::digest::DIGEST_LEN;
use crate::error::Error;
use crate::tables::POPC;

/// Compare two raw digests.
///
/// Both must be exactly [`DIGEST_LEN`] bytes, otherwise [`Error::InvalidDigestLength`] is
/// returned and nothing is computed.
pub fn compare_digest(a: &[u8], b: &[u8]) -> Result<i32, Error> {
    if a.len() != b.len() || a.len() != DIGEST_LEN {
        tracing::debug!(left = a.len(), right = b.len(), "rejecting digest comparison");
        return Err(Error::InvalidDigestLength {
            left: a.len(),
            right: b.len(),
        });
    }

    let bit_diff_sum: i32 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| POPC[(x ^ y) as usize] as i32)
        .sum();
    Ok(128 - bit_diff_sum)
}

/// Compare two hex-encoded digests.
pub fn compare_hex(a: &str, b: &str) -> Result<i32, Error> {
    let a = hex::decode(a)?;
    let b = hex::decode(b)?;
    compare_digest(&a, &b)
}
