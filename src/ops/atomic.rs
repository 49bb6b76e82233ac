//! Atomic bit mutators.
//!
//! Every operation is a single hardware read-modify-write on the word containing the bit, with `SeqCst` ordering: it
//! cannot be observed partially applied, and it acts as a full barrier. No ordering is implied between operations on
//! different words beyond what `SeqCst` already provides; callers needing multi-word consistency bring their own lock.
//!
//! See `non_atomic` for the unsynchronized variants.

use core::sync::atomic::Ordering;

use crate::utils::{self, AtomicWord, BitRangeError, Word};

//  All four operations are full barriers.
const ORDER: Ordering = Ordering::SeqCst;

/// Atomically sets bit `nr`.
///
/// `nr` may be almost arbitrarily large; it is not restricted to the first word.
///
/// #   Panics
///
/// If bit `nr` lies beyond `words`.
///
/// #   Examples
///
/// ```
/// #   use core::sync::atomic::AtomicU8;
/// #   use kernel_bitops::ops::atomic::set_bit;
/// let words = [AtomicU8::new(0), AtomicU8::new(0)];
///
/// set_bit(3, &words);
/// set_bit(9, &words);
///
/// assert_eq!(0b0000_1000, words[0].load(core::sync::atomic::Ordering::Relaxed));
/// assert_eq!(0b0000_0010, words[1].load(core::sync::atomic::Ordering::Relaxed));
/// ```
#[inline]
#[track_caller]
pub fn set_bit<A>(nr: usize, words: &[A])
where
    A: AtomicWord,
{
    let (word, offset) = utils::split::<A::Word>(nr);

    words[word.0].fetch_or(offset.mask(), ORDER);
}

/// Atomically clears bit `nr`.
///
/// #   Panics
///
/// If bit `nr` lies beyond `words`.
///
/// #   Examples
///
/// ```
/// #   use core::sync::atomic::{AtomicU8, Ordering};
/// #   use kernel_bitops::ops::atomic::clear_bit;
/// let words = [AtomicU8::new(!0)];
///
/// clear_bit(3, &words);
///
/// assert_eq!(0b1111_0111, words[0].load(Ordering::Relaxed));
/// ```
#[inline]
#[track_caller]
pub fn clear_bit<A>(nr: usize, words: &[A])
where
    A: AtomicWord,
{
    let (word, offset) = utils::split::<A::Word>(nr);

    words[word.0].fetch_and(!offset.mask::<A::Word>(), ORDER);
}

/// Atomically sets bit `nr`, and returns whether it was set before.
///
/// Among any number of concurrent callers on the same clear bit, exactly one observes `false`.
///
/// #   Panics
///
/// If bit `nr` lies beyond `words`.
///
/// #   Examples
///
/// ```
/// #   use core::sync::atomic::AtomicU64;
/// #   use kernel_bitops::ops::atomic::test_and_set_bit;
/// let words = [AtomicU64::new(0)];
///
/// assert!(!test_and_set_bit(6, &words));
/// assert!(test_and_set_bit(6, &words));
/// ```
#[inline]
#[track_caller]
pub fn test_and_set_bit<A>(nr: usize, words: &[A]) -> bool
where
    A: AtomicWord,
{
    let (word, offset) = utils::split::<A::Word>(nr);

    let mask = offset.mask::<A::Word>();
    let previous = words[word.0].fetch_or(mask, ORDER);

    (previous & mask) != <A::Word as Word>::ALL_ZEROS
}

/// Atomically clears bit `nr`, and returns whether it was set before.
///
/// #   Panics
///
/// If bit `nr` lies beyond `words`.
///
/// #   Examples
///
/// ```
/// #   use core::sync::atomic::AtomicU64;
/// #   use kernel_bitops::ops::atomic::test_and_clear_bit;
/// let words = [AtomicU64::new(0b1)];
///
/// assert!(test_and_clear_bit(0, &words));
/// assert!(!test_and_clear_bit(0, &words));
/// ```
#[inline]
#[track_caller]
pub fn test_and_clear_bit<A>(nr: usize, words: &[A]) -> bool
where
    A: AtomicWord,
{
    let (word, offset) = utils::split::<A::Word>(nr);

    let mask = offset.mask::<A::Word>();
    let previous = words[word.0].fetch_and(!mask, ORDER);

    (previous & mask) != <A::Word as Word>::ALL_ZEROS
}

//
//  Checked operations.
//

/// Atomically sets bit `nr`, or returns an error if it lies beyond `words`.
#[inline]
pub fn try_set_bit<A>(nr: usize, words: &[A]) -> Result<(), BitRangeError>
where
    A: AtomicWord,
{
    let (word, offset) = utils::locate::<A::Word>(nr, words.len())?;

    words[word.0].fetch_or(offset.mask(), ORDER);

    Ok(())
}

/// Atomically clears bit `nr`, or returns an error if it lies beyond `words`.
#[inline]
pub fn try_clear_bit<A>(nr: usize, words: &[A]) -> Result<(), BitRangeError>
where
    A: AtomicWord,
{
    let (word, offset) = utils::locate::<A::Word>(nr, words.len())?;

    words[word.0].fetch_and(!offset.mask::<A::Word>(), ORDER);

    Ok(())
}

/// Atomically sets bit `nr` and returns whether it was set before, or returns an error if it lies beyond `words`.
#[inline]
pub fn try_test_and_set_bit<A>(nr: usize, words: &[A]) -> Result<bool, BitRangeError>
where
    A: AtomicWord,
{
    utils::locate::<A::Word>(nr, words.len())?;

    Ok(test_and_set_bit(nr, words))
}

/// Atomically clears bit `nr` and returns whether it was set before, or returns an error if it lies beyond `words`.
#[inline]
pub fn try_test_and_clear_bit<A>(nr: usize, words: &[A]) -> Result<bool, BitRangeError>
where
    A: AtomicWord,
{
    utils::locate::<A::Word>(nr, words.len())?;

    Ok(test_and_clear_bit(nr, words))
}

// mod tests
