//! Bit operations over caller-owned words.
//!
//! Bitmaps used for page tracking, CPU masks, feature flags or allocation maps are, at the bottom, arrays of machine
//! words viewed as a flat sequence of bits. This crate provides the primitives to manipulate such arrays, and nothing
//! else: it never allocates, copies, or owns the words, it only operates on what the caller lends it.
//!
//! #   Organization
//!
//! This crate is composed of two top modules:
//!
//! -   The `utils` module contains the vocabulary: the `Word` trait and its atomic counterpart, and the addressing of
//!     bits within a sequence of words.
//! -   The `ops` module contains the operations themselves: atomic and non-atomic mutators, bit tests, and bit
//!     scanners.
//!
//!
//! #   Addressing
//!
//! Bit 0 is the least significant bit of the first word, bit `W::BITS` the least significant bit of the second word,
//! and so on. The bit index may thus be much larger than a single word.
//!
//! ```
//! #   use core::sync::atomic::{AtomicUsize, Ordering};
//! #   use kernel_bitops::ops::{atomic, test_bit};
//! let words: [AtomicUsize; 4] = Default::default();
//!
//! let nr = usize::BITS as usize + 3;
//!
//! assert!(!atomic::test_and_set_bit(nr, &words));
//! assert!(test_bit(nr, &words));
//!
//! assert_eq!(0, words[0].load(Ordering::Relaxed));
//! assert_eq!(0b1000, words[1].load(Ordering::Relaxed));
//! ```
//!
//!
//! #   Contracts
//!
//! The operations are contract-based, rather than error-based:
//!
//! -   The slice-based operations panic if the bit lies beyond the slice; a `try_` flavour returns an error instead.
//!     The pointer-based operations of `ops::raw` do not check anything, it is up to the caller to guarantee that the
//!     word containing the bit is valid.
//! -   The 0-based scanners (`first_set`, `first_zero`, `last_set`) require a non-degenerate word, and only check it
//!     in Debug. The 1-based scanners (`ffs`, `fls`) accept any value, and return 0 when no bit is set.
//!
//!
//! #   Why is the bit index a `usize`?
//!
//! The bit index is only ever used to compute a word index, which is a slice index, or a pointer offset. Both are
//! `usize`, and a bit index beyond `usize::MAX` would address a word beyond any addressable memory for any word of at
//! least 8 bits.
//!
//! It also makes negative bit indexes unrepresentable.

#![cfg_attr(not(test), no_std)]
//  Lints
#![deny(missing_docs)]
//  This author prefers to keep its test modules close to what they are testing.
#![allow(clippy::items_after_test_module)]

pub mod ops;
pub mod utils;
