//! Bit scanners.
//!
//! Two families, with deliberately different contracts:
//!
//! -   `first_set`, `first_zero` and `last_set` return a 0-based offset, ready to be added to the index of the first
//!     bit of the word. Degenerate input -- no set bit, resp. no zero bit -- is a violated pre-condition: the caller
//!     is expected to have checked the word already, typically while skipping empty words of a bitmap, and does not
//!     pay for a second check.
//! -   `ffs` and `fls` follow the libc convention: a 1-based position, with 0 meaning that no bit is set.
//!
//! #   Panics
//!
//! In Debug, the 0-based family panics on degenerate input.
//!
//! In Release, the 0-based family returns an unspecified value on degenerate input.

use crate::utils::Word;

/// Returns the offset of the first (lowest) set bit of `word`.
///
/// #   Panics
///
/// In Debug, if `word` is all-zeros. See the module documentation.
///
/// #   Examples
///
/// ```
/// #   use kernel_bitops::ops::scan::first_set;
/// assert_eq!(3, first_set(0b0000_1000u8));
/// assert_eq!(0, first_set(!0u64));
/// assert_eq!(63, first_set(1u64 << 63));
/// ```
#[doc(alias = "__ffs")]
#[inline(always)]
#[track_caller]
pub fn first_set<W>(word: W) -> u32
where
    W: Word,
{
    debug_assert!(word != W::ALL_ZEROS, "no set bit in {word:#b}");

    word.trailing_zeros()
}

/// Returns the offset of the first (lowest) zero bit of `word`.
///
/// #   Panics
///
/// In Debug, if `word` is all-ones. See the module documentation.
///
/// #   Examples
///
/// ```
/// #   use kernel_bitops::ops::scan::first_zero;
/// assert_eq!(0, first_zero(0u8));
/// assert_eq!(3, first_zero(0b0000_0111u8));
/// assert_eq!(63, first_zero(!(1u64 << 63)));
/// ```
#[doc(alias = "ffz")]
#[inline(always)]
#[track_caller]
pub fn first_zero<W>(word: W) -> u32
where
    W: Word,
{
    debug_assert!(word != W::ALL_ONES, "no zero bit in {word:#b}");

    word.trailing_ones()
}

/// Returns the offset of the last (highest) set bit of `word`.
///
/// #   Panics
///
/// In Debug, if `word` is all-zeros. See the module documentation.
///
/// #   Examples
///
/// ```
/// #   use kernel_bitops::ops::scan::last_set;
/// assert_eq!(3, last_set(0b0000_1001u8));
/// assert_eq!(0, last_set(1u64));
/// assert_eq!(63, last_set(!0u64));
/// ```
#[doc(alias = "__fls")]
#[inline(always)]
#[track_caller]
pub fn last_set<W>(word: W) -> u32
where
    W: Word,
{
    debug_assert!(word != W::ALL_ZEROS, "no set bit in {word:#b}");

    //  Wraps in Release on an all-zeros word, which is as unspecified as any other value.
    (W::BITS - 1).wrapping_sub(word.leading_zeros())
}

/// Returns the position of the first (least significant) set bit of `x`, counting from 1, or 0 if `x` is 0.
///
/// Negative values are scanned as their two's complement bit pattern.
///
/// #   Examples
///
/// ```
/// #   use kernel_bitops::ops::scan::ffs;
/// assert_eq!(0, ffs(0));
/// assert_eq!(1, ffs(1));
/// assert_eq!(4, ffs(0b0000_1000));
/// assert_eq!(32, ffs(i32::MIN));
/// ```
#[inline]
pub const fn ffs(x: i32) -> i32 {
    if x == 0 {
        return 0;
    }

    x.trailing_zeros() as i32 + 1
}

/// Returns the position of the last (most significant) set bit of `x`, counting from 1, or 0 if `x` is 0.
///
/// Negative values are scanned as their two's complement bit pattern, hence `fls` of any negative value is 32.
///
/// #   Examples
///
/// ```
/// #   use kernel_bitops::ops::scan::fls;
/// assert_eq!(0, fls(0));
/// assert_eq!(1, fls(1));
/// assert_eq!(4, fls(0b0000_1001));
/// assert_eq!(32, fls(-1));
/// ```
#[inline]
pub const fn fls(x: i32) -> i32 {
    //  No branch needed: `leading_zeros` of 0 is 32.
    (i32::BITS - x.leading_zeros()) as i32
}

// mod zero_based_tests

// mod one_based_tests
