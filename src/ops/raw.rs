//! Unchecked bit operations over raw pointers.
//!
//! These mirror the slice-based operations for memory which cannot be described as a slice: a bitmap embedded at the
//! end of a foreign structure, a page mapped for a guest, etc... Bit `nr` is addressed from `addr` without any bounds
//! check, exactly like the slice-based operations would address it from the first word.
//!
//! #   Safety
//!
//! All functions share the same pre-conditions:
//!
//! -   Validity: the word containing bit `nr`, that is `addr.add(nr / W::BITS)`, must be valid for reads and writes
//!     for the duration of the call, even for `test_bit`, which reads it through an atomic.
//! -   Alignment: `addr` must be aligned to `align_of::<W::Atomic>()`, which may be stricter than the alignment of the
//!     word itself on some platforms.
//!
//! The atomic operations and `test_bit` may race with one another. The non-atomic operations must not race with any
//! other access to the same word: it is up to the caller to guarantee exclusive access, for example by holding a lock.

use core::sync::atomic::Ordering;

use crate::utils::{self, AtomicWord, Word, WordIndex};

/// Atomically sets bit `nr`. See `atomic::set_bit`.
///
/// #   Safety
///
/// See module documentation.
///
/// #   Examples
///
/// ```
/// #   use core::sync::atomic::{AtomicU64, Ordering};
/// #   use kernel_bitops::ops::raw;
/// let words = [AtomicU64::new(0), AtomicU64::new(0)];
///
/// //  Safety:
/// //  -   `words` holds bit 65, and is properly aligned.
/// unsafe { raw::set_bit(65, words.as_ptr()) };
///
/// assert_eq!(0b10, words[1].load(Ordering::Relaxed));
/// ```
#[inline]
pub unsafe fn set_bit<A>(nr: usize, addr: *const A)
where
    A: AtomicWord,
{
    let (word, offset) = utils::split::<A::Word>(nr);

    //  Safety:
    //  -   Validity & Alignment: as per pre-conditions.
    let word = unsafe { atomic_at(addr, word) };

    word.fetch_or(offset.mask(), Ordering::SeqCst);
}

/// Atomically clears bit `nr`. See `atomic::clear_bit`.
///
/// #   Safety
///
/// See module documentation.
#[inline]
pub unsafe fn clear_bit<A>(nr: usize, addr: *const A)
where
    A: AtomicWord,
{
    let (word, offset) = utils::split::<A::Word>(nr);

    //  Safety:
    //  -   Validity & Alignment: as per pre-conditions.
    let word = unsafe { atomic_at(addr, word) };

    word.fetch_and(!offset.mask::<A::Word>(), Ordering::SeqCst);
}

/// Atomically sets bit `nr`, and returns whether it was set before. See `atomic::test_and_set_bit`.
///
/// #   Safety
///
/// See module documentation.
#[inline]
pub unsafe fn test_and_set_bit<A>(nr: usize, addr: *const A) -> bool
where
    A: AtomicWord,
{
    let (word, offset) = utils::split::<A::Word>(nr);

    //  Safety:
    //  -   Validity & Alignment: as per pre-conditions.
    let word = unsafe { atomic_at(addr, word) };

    let mask = offset.mask::<A::Word>();

    (word.fetch_or(mask, Ordering::SeqCst) & mask) != <A::Word as Word>::ALL_ZEROS
}

/// Atomically clears bit `nr`, and returns whether it was set before. See `atomic::test_and_clear_bit`.
///
/// #   Safety
///
/// See module documentation.
#[inline]
pub unsafe fn test_and_clear_bit<A>(nr: usize, addr: *const A) -> bool
where
    A: AtomicWord,
{
    let (word, offset) = utils::split::<A::Word>(nr);

    //  Safety:
    //  -   Validity & Alignment: as per pre-conditions.
    let word = unsafe { atomic_at(addr, word) };

    let mask = offset.mask::<A::Word>();

    (word.fetch_and(!mask, Ordering::SeqCst) & mask) != <A::Word as Word>::ALL_ZEROS
}

/// Sets bit `nr`, non-atomically. See `non_atomic::set_bit`.
///
/// #   Safety
///
/// See module documentation. The word must not be accessed concurrently.
///
/// #   Examples
///
/// ```
/// #   use kernel_bitops::ops::raw;
/// let mut words = [0u32; 2];
///
/// //  Safety:
/// //  -   `words` holds bit 33, is properly aligned, and exclusively borrowed.
/// unsafe { raw::__set_bit(33, words.as_mut_ptr()) };
///
/// assert_eq!([0, 0b10], words);
/// ```
#[inline]
pub unsafe fn __set_bit<W>(nr: usize, addr: *mut W)
where
    W: Word,
{
    let (word, offset) = utils::split::<W>(nr);

    //  Safety:
    //  -   Validity: as per pre-conditions, `addr + word` is in bounds of the caller's storage.
    let ptr = unsafe { addr.add(word.0) };

    //  Safety:
    //  -   Validity & Alignment & Exclusivity: as per pre-conditions.
    unsafe { ptr.write(ptr.read() | offset.mask()) };
}

/// Clears bit `nr`, non-atomically. See `non_atomic::clear_bit`.
///
/// #   Safety
///
/// See module documentation. The word must not be accessed concurrently.
#[inline]
pub unsafe fn __clear_bit<W>(nr: usize, addr: *mut W)
where
    W: Word,
{
    let (word, offset) = utils::split::<W>(nr);

    //  Safety:
    //  -   Validity: as per pre-conditions, `addr + word` is in bounds of the caller's storage.
    let ptr = unsafe { addr.add(word.0) };

    //  Safety:
    //  -   Validity & Alignment & Exclusivity: as per pre-conditions.
    unsafe { ptr.write(ptr.read() & !offset.mask::<W>()) };
}

/// Sets bit `nr` non-atomically, and returns whether it was set before. See `non_atomic::test_and_set_bit`.
///
/// #   Safety
///
/// See module documentation. The word must not be accessed concurrently.
#[inline]
pub unsafe fn __test_and_set_bit<W>(nr: usize, addr: *mut W) -> bool
where
    W: Word,
{
    let (word, offset) = utils::split::<W>(nr);

    let mask = offset.mask::<W>();

    //  Safety:
    //  -   Validity: as per pre-conditions, `addr + word` is in bounds of the caller's storage.
    let ptr = unsafe { addr.add(word.0) };

    //  Safety:
    //  -   Validity & Alignment & Exclusivity: as per pre-conditions.
    let previous = unsafe { ptr.read() };

    //  Safety:
    //  -   Validity & Alignment & Exclusivity: as per pre-conditions.
    unsafe { ptr.write(previous | mask) };

    (previous & mask) != W::ALL_ZEROS
}

/// Clears bit `nr` non-atomically, and returns whether it was set before. See `non_atomic::test_and_clear_bit`.
///
/// #   Safety
///
/// See module documentation. The word must not be accessed concurrently.
#[inline]
pub unsafe fn __test_and_clear_bit<W>(nr: usize, addr: *mut W) -> bool
where
    W: Word,
{
    let (word, offset) = utils::split::<W>(nr);

    let mask = offset.mask::<W>();

    //  Safety:
    //  -   Validity: as per pre-conditions, `addr + word` is in bounds of the caller's storage.
    let ptr = unsafe { addr.add(word.0) };

    //  Safety:
    //  -   Validity & Alignment & Exclusivity: as per pre-conditions.
    let previous = unsafe { ptr.read() };

    //  Safety:
    //  -   Validity & Alignment & Exclusivity: as per pre-conditions.
    unsafe { ptr.write(previous & !mask) };

    (previous & mask) != W::ALL_ZEROS
}

/// Returns whether bit `nr` is set. See `query::test_bit`.
///
/// The word is read with a single `Relaxed` atomic load, so it may race with the atomic operations.
///
/// #   Safety
///
/// See module documentation. The word must not be concurrently written by a non-atomic operation.
///
/// #   Examples
///
/// ```
/// #   use kernel_bitops::ops::raw;
/// let mut words = [0u8, 0b1000_0000];
///
/// //  Safety:
/// //  -   `words` holds bit 15, is writable, and is trivially aligned.
/// assert!(unsafe { raw::test_bit(15, words.as_mut_ptr()) });
/// ```
#[inline]
pub unsafe fn test_bit<W>(nr: usize, addr: *const W) -> bool
where
    W: Word,
{
    let (word, offset) = utils::split::<W>(nr);

    //  Safety:
    //  -   Validity & Alignment: as per pre-conditions.
    //  -   The atomic is only used for a load, so the cast to `*mut` is never written through.
    let word = unsafe { atomic_at(addr.cast::<W::Atomic>(), word) };

    (word.load(Ordering::Relaxed) & offset.mask()) != W::ALL_ZEROS
}

//
//  Implementation details
//

//  Returns a reference to the atomic word at `index`.
//
//  #   Safety
//
//  -   Validity: `addr.add(index.0)` must be valid for reads and writes for the duration of `'a`.
//  -   Alignment: `addr` must be aligned to `align_of::<A>()`.
#[inline(always)]
unsafe fn atomic_at<'a, A>(addr: *const A, index: WordIndex) -> &'a A
where
    A: AtomicWord,
{
    //  Safety:
    //  -   Validity: as per pre-conditions, `addr + index` is in bounds of the caller's storage.
    let ptr = unsafe { addr.add(index.0) };

    //  Safety:
    //  -   Validity & Alignment: as per pre-conditions.
    //  -   `A` is the atomic counterpart of `A::Word`, with identical size and layout.
    unsafe { A::from_ptr(ptr.cast_mut().cast::<A::Word>()) }
}

#[cfg(test)]
mod tests {
    use core::sync::atomic::{AtomicU8, AtomicU64};

    use crate::ops::{atomic, non_atomic, query};

    use super::*;

    #[test]
    fn atomic_matches_slice() {
        for nr in 0..128 {
            let by_slice = [AtomicU64::new(0x0F0F), AtomicU64::new(0xF0F0)];
            let by_ptr = [AtomicU64::new(0x0F0F), AtomicU64::new(0xF0F0)];

            let expected = atomic::test_and_set_bit(nr, &by_slice);

            //  Safety:
            //  -   `by_ptr` holds 128 bits, and is properly aligned.
            let actual = unsafe { test_and_set_bit(nr, by_ptr.as_ptr()) };

            assert_eq!(expected, actual, "{nr}");

            let expected = atomic::test_and_clear_bit(nr + 1 - nr % 2, &by_slice);

            //  Safety:
            //  -   `by_ptr` holds 128 bits, and is properly aligned.
            let actual = unsafe { test_and_clear_bit(nr + 1 - nr % 2, by_ptr.as_ptr()) };

            assert_eq!(expected, actual, "{nr}");

            assert_eq!(load(&by_slice), load(&by_ptr), "{nr}");
        }
    }

    #[test]
    fn atomic_set_clear() {
        let words = [AtomicU8::new(0), AtomicU8::new(0)];

        //  Safety:
        //  -   `words` holds 16 bits, and `AtomicU8` is trivially aligned.
        unsafe {
            set_bit(11, words.as_ptr());
            set_bit(2, words.as_ptr());
        }

        assert_eq!(0b0000_0100, words[0].load(Ordering::Relaxed));
        assert_eq!(0b0000_1000, words[1].load(Ordering::Relaxed));

        //  Safety:
        //  -   `words` holds 16 bits, and `AtomicU8` is trivially aligned.
        unsafe { clear_bit(11, words.as_ptr()) };

        assert_eq!(0, words[1].load(Ordering::Relaxed));
    }

    #[test]
    fn non_atomic_matches_slice() {
        for nr in 0..64 {
            let mut by_slice = [0x00FF_u32, 0xFF00_u32];
            let mut by_ptr = by_slice;

            let expected = non_atomic::test_and_set_bit(nr, &mut by_slice);

            //  Safety:
            //  -   `by_ptr` holds 64 bits, is properly aligned, and exclusively borrowed.
            let actual = unsafe { __test_and_set_bit(nr, by_ptr.as_mut_ptr()) };

            assert_eq!(expected, actual, "{nr}");

            let expected = non_atomic::test_and_clear_bit(63 - nr, &mut by_slice);

            //  Safety:
            //  -   `by_ptr` holds 64 bits, is properly aligned, and exclusively borrowed.
            let actual = unsafe { __test_and_clear_bit(63 - nr, by_ptr.as_mut_ptr()) };

            assert_eq!(expected, actual, "{nr}");
            assert_eq!(by_slice, by_ptr, "{nr}");
        }
    }

    #[test]
    fn non_atomic_set_clear() {
        let mut words = [0u16; 2];

        //  Safety:
        //  -   `words` holds 32 bits, is properly aligned, and exclusively borrowed.
        unsafe { __set_bit(20, words.as_mut_ptr()) };

        assert_eq!([0, 0b1_0000], words);

        //  Safety:
        //  -   `words` holds 32 bits, is properly aligned, and exclusively borrowed.
        unsafe { __clear_bit(20, words.as_mut_ptr()) };

        assert_eq!([0, 0], words);
    }

    #[test]
    fn test_bit_matches_slice() {
        let mut words = [0x8000_0001u32, 0x0000_0000, 0x89AB_CDEF, 0x0123_4567];

        for nr in 0..128 {
            //  Safety:
            //  -   `words` holds 128 bits, and is writable.
            //  -   `u32` and `AtomicU32` share the same alignment.
            let actual = unsafe { test_bit(nr, words.as_mut_ptr()) };

            assert_eq!(query::test_bit(nr, &words), actual, "{nr}");
        }
    }

    fn load(words: &[AtomicU64; 2]) -> [u64; 2] {
        [words[0].load(Ordering::Relaxed), words[1].load(Ordering::Relaxed)]
    }
} // mod tests
