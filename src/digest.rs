//! Nilsimsa digests: construction from a histogram, and hex encoding.
//!
//! A digest packs one bit per histogram slot: the bit is set when the slot count exceeds
//! the mean count expected for the stream length. The 32 packed bytes are then stored
//! in reverse order, which is what every published Nilsimsa vector assumes.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::tables::POPC;

/// Digest length in bytes (256 bits).
pub const DIGEST_LEN: usize = 32;

/// A 256-bit Nilsimsa digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Build a digest from a histogram snapshot and the number of symbols consumed.
    pub fn from_histogram(histogram: &[u64; 256], count: u64) -> Self {
        let total = total_for_count(count);

        // `slot > total / 256` over the reals, kept in integers.
        let mut code = [0u8; DIGEST_LEN];
        for (i, &slot) in histogram.iter().enumerate() {
            if u128::from(slot) * 256 > u128::from(total) {
                code[i >> 3] |= 1 << (i & 7);
            }
        }

        code.reverse();
        Self(code)
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Lowercase hex rendering (64 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a 64-character hex string (either case).
    pub fn from_hex(s: &str) -> Result<Self, Error> {
        let bytes = hex::decode(s)?;
        Self::try_from(bytes.as_slice())
    }

    /// Number of differing bits (XOR + popcount), in `0..=256`.
    pub fn hamming_distance(&self, other: &Self) -> u32 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| POPC[(a ^ b) as usize] as u32)
            .sum()
    }

    /// Similarity score in `[-128, 128]`; 128 means identical.
    pub fn compare(&self, other: &Self) -> i32 {
        128 - self.hamming_distance(other) as i32
    }
}

/// Threshold numerator for a stream of `count` symbols.
///
/// Short streams generate fewer trigrams than `8 * count - 28` would predict, so they
/// get fixed totals instead.
fn total_for_count(count: u64) -> u64 {
    match count {
        0..=2 => 0,
        3 => 1,
        4 => 4,
        n => n.saturating_mul(8) - 28,
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<Digest> for [u8; DIGEST_LEN] {
    fn from(d: Digest) -> Self {
        d.0
    }
}

impl TryFrom<&[u8]> for Digest {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; DIGEST_LEN] = bytes.try_into().map_err(|_| Error::InvalidDigestLength {
            left: bytes.len(),
            right: bytes.len(),
        })?;
        Ok(Self(arr))
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for Digest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Digest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Digest {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HexVisitor;

        impl serde::de::Visitor<'_> for HexVisitor {
            type Value = Digest;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a 64-character hex Nilsimsa digest")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Digest, E> {
                Digest::from_hex(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(HexVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOX: &str = "0a31b4be01a0808a29e0ec60e9a258545dc0526770022348380a2128708f2fdb";

    #[test]
    fn totals_for_short_streams() {
        assert_eq!(total_for_count(0), 0);
        assert_eq!(total_for_count(2), 0);
        assert_eq!(total_for_count(3), 1);
        assert_eq!(total_for_count(4), 4);
        assert_eq!(total_for_count(5), 12);
        assert_eq!(total_for_count(19), 124);
    }

    #[test]
    fn empty_histogram_gives_zero_digest() {
        let d = Digest::from_histogram(&[0; 256], 0);
        assert_eq!(d, Digest::default());
    }

    #[test]
    fn bits_are_packed_then_reversed() {
        let mut h = [0u64; 256];
        // Slot 0 -> bit 0 of byte 0 -> last byte after reversal.
        h[0] = 1;
        // Slot 255 -> bit 7 of byte 31 -> first byte after reversal.
        h[255] = 1;
        let d = Digest::from_histogram(&h, 2);
        assert_eq!(d.as_bytes()[0], 0x80);
        assert_eq!(d.as_bytes()[31], 0x01);
        assert_eq!(d.hamming_distance(&Digest::default()), 2);
    }

    #[test]
    fn threshold_is_strict_and_real_valued() {
        // count = 37 -> total = 268, threshold = 1.046875: a slot of 1 stays clear.
        let mut h = [0u64; 256];
        h[8] = 1;
        h[9] = 2;
        let d = Digest::from_histogram(&h, 37);
        assert_eq!(d.as_bytes()[30], 0b0000_0010);
    }

    #[test]
    fn hex_round_trip_and_display() {
        let d: Digest = FOX.parse().unwrap();
        assert_eq!(d.to_hex(), FOX);
        assert_eq!(d.to_string(), FOX);
        assert_eq!(format!("{d:x}"), FOX);
        assert_eq!(Digest::from_hex(&FOX.to_uppercase()).unwrap(), d);
    }

    #[test]
    fn bad_hex_is_rejected() {
        assert!(matches!(
            Digest::from_hex("zz"),
            Err(Error::InvalidHex(_))
        ));
        assert!(matches!(
            Digest::from_hex(&FOX[..60]),
            Err(Error::InvalidDigestLength { left: 30, right: 30 })
        ));
    }

    #[test]
    fn try_from_slice_checks_length() {
        assert!(Digest::try_from(&[0u8; 32][..]).is_ok());
        assert!(Digest::try_from(&[0u8; 33][..]).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_hex_string() {
        let d: Digest = FOX.parse().unwrap();
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, format!("\"{FOX}\""));
        let back: Digest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
        assert!(serde_json::from_str::<Digest>("\"abcd\"").is_err());
    }
}
