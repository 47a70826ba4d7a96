//! `nilsimsa`: locality-sensitive digests for near-duplicate detection.
//!
//! Nilsimsa maps an arbitrary byte stream to a 256-bit digest such that similar
//! streams produce digests with small Hamming distance, while unrelated streams land
//! near 128 differing bits.
//!
//! Scope here is the *primitive*: accumulate, build a digest, compare two digests.
//! Thresholds, persistence and candidate indexing belong in the caller.
//!
//! # Example
//!
//! ```rust
//! use nilsimsa::{compare_digest, Nilsimsa};
//!
//! let a = Nilsimsa::from_bytes(b"The quick brown fox").digest();
//!
//! let mut acc = Nilsimsa::new();
//! acc.update(b"The quicker ");
//! acc.update(b"brown fox");
//! let b = acc.digest();
//!
//! assert_eq!(
//!     a.to_hex(),
//!     "0a31b4be01a0808a29e0ec60e9a258545dc0526770022348380a2128708f2fdb"
//! );
//! assert_eq!(a.compare(&b), 91);
//! assert_eq!(compare_digest(a.as_bytes(), b.as_bytes()).unwrap(), 91);
//! ```

#![warn(missing_docs)]

pub mod accumulator;
pub mod compare;
pub mod digest;
pub mod error;
pub mod mixer;
pub mod tables;

pub use accumulator::Nilsimsa;
pub use compare::{compare_digest, compare_hex};
pub use digest::{Digest, DIGEST_LEN};
pub use error::Error;
pub use mixer::{tran3, MixFn};
