//  See `split` and `locate`.
//
//  #   Why not compute the byte address, like the assembly does?
//
//  Atomic operations of different sizes on overlapping memory are not permitted by the memory model, so the granule
//  of every access must be the word the caller handed over. Byte-level addressing would only be valid for `u8` words
//  anyway, where it coincides with word-level addressing.

use core::marker::PhantomData;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::utils::{BitRangeError, Word};

/// The index of a word, in a sequence of words.
///
/// #   Why `usize`?
///
/// In Rust, all slices are indexed by a `usize`, and pointers are offset by a `usize`, which is all that
/// `WordIndex` is used for.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct WordIndex(pub usize);

/// The offset of a bit in a word.
///
/// The offset of a bit in a word is expected to always be strictly less than `Word::BITS`. No offset created by
/// `split` will ever violate this invariant.
///
/// #   Panics
///
/// In Debug, `mask` will panic if its value is greater than or equal to `Word::BITS`.
///
/// In Release, any high bit will be ignored (masked away).
///
/// #   Why `u32`?
///
/// In Rust, all shift operations take a `u32` as their right-hand argument, and the `BitOffset` will be used nigh
/// exclusively with shift operations.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct BitOffset(pub u32);

impl BitOffset {
    /// Returns the mask selecting this bit in a `W`.
    ///
    /// #   Panics
    ///
    /// See `BitOffset`.
    ///
    /// #   Examples
    ///
    /// ```
    /// #   use kernel_bitops::utils::BitOffset;
    /// assert_eq!(0b0000_1000, BitOffset(3).mask::<u8>());
    /// assert_eq!(1 << 63, BitOffset(63).mask::<u64>());
    /// ```
    #[inline(always)]
    pub fn mask<W>(self) -> W
    where
        W: Word,
    {
        debug_assert!(self.0 < W::BITS, "{} >= {}", self.0, W::BITS);

        W::bit(self.0)
    }
}

/// Splits a bit index into a word-index/bit-offset pair.
///
/// `nr` may be arbitrarily large, it is not restricted to a single word.
///
/// #   Examples
///
/// ```
/// #   use kernel_bitops::utils::split;
/// let (word, offset) = split::<u64>(133);
///
/// assert_eq!(2, word.0);
/// assert_eq!(5, offset.0);
/// ```
#[inline(always)]
pub const fn split<W>(nr: usize) -> (WordIndex, BitOffset)
where
    W: Word,
{
    let bits = W::BITS as usize;

    //  Compute both / and % close together, so the optimizer fuses both in a single instruction.
    let word = nr / bits;
    let offset = nr % bits;

    (WordIndex(word), BitOffset(offset as u32))
}

/// Splits a bit index into a word-index/bit-offset pair, checking it against the number of words available.
///
/// Returns an error if bit `nr` lies beyond the `len` words of the bit vector.
///
/// #   Examples
///
/// ```
/// #   use kernel_bitops::utils::{locate, BitRangeError};
/// assert!(locate::<u8>(15, 2).is_ok());
/// assert_eq!(Err(BitRangeError), locate::<u8>(16, 2));
/// ```
#[inline]
pub const fn locate<W>(nr: usize, len: usize) -> Result<(WordIndex, BitOffset), BitRangeError>
where
    W: Word,
{
    let (word, offset) = split::<W>(nr);

    if word.0 < len {
        Ok((word, offset))
    } else {
        Err(BitRangeError)
    }
}

/// Returns the number of `W` words necessary to hold `bits` bits.
///
/// #   Examples
///
/// ```
/// #   use kernel_bitops::utils::bits_to_words;
/// assert_eq!(0, bits_to_words::<u64>(0));
/// assert_eq!(1, bits_to_words::<u64>(1));
/// assert_eq!(1, bits_to_words::<u64>(64));
/// assert_eq!(2, bits_to_words::<u64>(65));
/// ```
#[inline]
pub const fn bits_to_words<W>(bits: usize) -> usize
where
    W: Word,
{
    //  Not `(bits + W::BITS - 1) / W::BITS`, which overflows near `usize::MAX`.
    bits.div_ceil(W::BITS as usize)
}

/// A bit index whose split is computed at compile-time.
pub(crate) struct ConstIndex<const NR: usize, W>(PhantomData<fn(W) -> W>);

impl<const NR: usize, W> ConstIndex<NR, W>
where
    W: Word,
{
    /// Index of the word containing bit `NR`.
    pub(crate) const WORD: usize = split::<W>(NR).0.0;

    /// Offset of bit `NR` in its word.
    pub(crate) const OFFSET: u32 = split::<W>(NR).1.0;
}

// mod tests
