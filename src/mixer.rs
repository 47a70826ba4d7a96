//! The trigram mixer ("Tran53").
//!
//! Combines three window symbols and a small index into one histogram slot.

use crate::tables::TRAN;

/// The default mixing strategy type.
///
/// [`crate::Nilsimsa::with_mixer`] accepts any `Fn(u8, u8, u8, u8) -> u8`; this alias names
/// the plain function pointer used by [`crate::Nilsimsa::new`].
pub type MixFn = fn(u8, u8, u8, u8) -> u8;

/// Mix symbols `a`, `b`, `c` under index `n` (`0..=7`) into a histogram slot.
///
/// `((TRAN[a + n] ^ TRAN[b] * (2n + 1)) + TRAN[c ^ TRAN[n]]) mod 256`.
///
/// Only the low byte of the result survives, so wrapping `u8` arithmetic is exact.
#[inline]
pub fn tran3(a: u8, b: u8, c: u8, n: u8) -> u8 {
    let x = TRAN[a.wrapping_add(n) as usize];
    let y = TRAN[b as usize].wrapping_mul(n.wrapping_mul(2).wrapping_add(1));
    let z = TRAN[(c ^ TRAN[n as usize]) as usize];
    (x ^ y).wrapping_add(z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tran3_wide(a: u8, b: u8, c: u8, n: u8) -> u8 {
        let (a, b, c, n) = (a as u32, b as u32, c as u32, n as u32);
        let t = |i: u32| TRAN[(i & 255) as usize] as u32;
        (((t(a + n) ^ (t(b) * (n + n + 1))) + t(c ^ t(n))) & 255) as u8
    }

    #[test]
    fn known_values() {
        // TRAN[0] ^ TRAN[0] = 0, plus TRAN[0 ^ TRAN[0]] = TRAN[2].
        assert_eq!(tran3(0, 0, 0, 0), TRAN[2]);
        assert_eq!(tran3(0, 0, 0, 0), 0x9e);
    }

    #[test]
    fn index_changes_output() {
        let outs: Vec<u8> = (0..8).map(|n| tran3(b'f', b'o', b'x', n)).collect();
        assert!(outs.windows(2).any(|w| w[0] != w[1]));
    }

    proptest! {
        #[test]
        fn prop_wrapping_matches_widened(a: u8, b: u8, c: u8, n in 0u8..8) {
            prop_assert_eq!(tran3(a, b, c, n), tran3_wide(a, b, c, n));
        }
    }
}
