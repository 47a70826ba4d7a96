//! The streaming Nilsimsa accumulator.
//!
//! Each consumed byte is mixed with up to four preceding bytes into as many as eight
//! histogram slots. Window positions that have not been filled yet are `None`, so a
//! genuine `0x00` byte is never mistaken for "no symbol".
//!
//! Feeding the stream in chunks is equivalent to feeding it at once: the window carries
//! over between [`Nilsimsa::update`] calls.

use std::fmt;
use std::io;

use crate::digest::Digest;
use crate::mixer::{tran3, MixFn};

/// Incremental Nilsimsa hasher.
///
/// `M` is the trigram mixing strategy; [`Nilsimsa::new`] uses [`tran3`].
#[derive(Clone)]
pub struct Nilsimsa<M = MixFn> {
    count: u64,
    acc: [u64; 256],
    /// Most recent symbol first.
    window: [Option<u8>; 4],
    mixer: M,
}

impl Nilsimsa<MixFn> {
    /// Create an empty accumulator with the standard mixer.
    pub fn new() -> Self {
        Self::with_mixer(tran3)
    }

    /// Create an accumulator and feed it `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut n = Self::new();
        n.update(data);
        n
    }
}

impl Default for Nilsimsa<MixFn> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Nilsimsa<M>
where
    M: Fn(u8, u8, u8, u8) -> u8,
{
    /// Create an empty accumulator with a custom mixing function.
    ///
    /// The function receives `(a, b, c, n)` with `n` in `0..=7` and returns a slot index.
    pub fn with_mixer(mixer: M) -> Self {
        Self {
            count: 0,
            acc: [0; 256],
            window: [None; 4],
            mixer,
        }
    }

    /// Feed more bytes.
    pub fn update(&mut self, data: &[u8]) {
        for &ch in data {
            self.consume(ch);
        }
    }

    /// Digest of everything fed so far. Does not reset the accumulator.
    pub fn digest(&self) -> Digest {
        tracing::trace!(count = self.count, "building nilsimsa digest");
        Digest::from_histogram(&self.acc, self.count)
    }

    /// Number of bytes consumed.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Current slot counts.
    pub fn histogram(&self) -> &[u64; 256] {
        &self.acc
    }

    fn consume(&mut self, ch: u8) {
        self.count += 1;

        let mix = &self.mixer;
        let acc = &mut self.acc;
        let mut bump = |a: u8, b: u8, c: u8, n: u8| acc[mix(a, b, c, n) as usize] += 1;

        match self.window {
            [Some(w0), Some(w1), Some(w2), Some(w3)] => {
                bump(ch, w0, w1, 0);
                bump(ch, w0, w2, 1);
                bump(ch, w1, w2, 2);
                bump(ch, w0, w3, 3);
                bump(ch, w1, w3, 4);
                bump(ch, w2, w3, 5);
                bump(w3, w0, ch, 6);
                bump(w3, w2, ch, 7);
            }
            [Some(w0), Some(w1), Some(w2), None] => {
                bump(ch, w0, w1, 0);
                bump(ch, w0, w2, 1);
                bump(ch, w1, w2, 2);
            }
            [Some(w0), Some(w1), None, None] => {
                bump(ch, w0, w1, 0);
            }
            _ => {}
        }

        self.window.rotate_right(1);
        self.window[0] = Some(ch);
    }
}

impl<M> fmt::Debug for Nilsimsa<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Nilsimsa")
            .field("count", &self.count)
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

impl<M> io::Write for Nilsimsa<M>
where
    M: Fn(u8, u8, u8, u8) -> u8,
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<M> Extend<u8> for Nilsimsa<M>
where
    M: Fn(u8, u8, u8, u8) -> u8,
{
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        for ch in iter {
            self.consume(ch);
        }
    }
}

impl<'a, M> Extend<&'a u8> for Nilsimsa<M>
where
    M: Fn(u8, u8, u8, u8) -> u8,
{
    fn extend<I: IntoIterator<Item = &'a u8>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}
