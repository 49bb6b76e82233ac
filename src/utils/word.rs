//  See `Word`, `AtomicWord` and `WordCell` traits.
//
//  #   Why a sealed trait?
//
//  The operations rely on `Word::BITS` being the exact width of the type, and on `AtomicWord` being a genuine
//  hardware read-modify-write. Neither can be checked for an arbitrary user type, so the set of implementations is
//  closed.
//
//
//  #   Why generic at all, rather than `usize`?
//
//  The platform register width is `usize`, and that is what bitmaps in a kernel are made of. Yet CPU masks exchanged
//  with firmware are `u32`, feature words read off `cpuid` are `u32` or `u64`, and tests are much easier to read on
//  `u8`. All of them obey the very same addressing convention.

use core::{
    fmt,
    ops::{BitAnd, BitOr, Not},
    sync::atomic::{self, Ordering},
};

/// A fixed-width unsigned machine word, the addressable granule of a bit vector.
///
/// Bit 0 is the least-significant bit of the first word, bit `BITS` the least-significant bit of the second word, and
/// so on.
pub trait Word:
    Copy
    + Eq
    + fmt::Debug
    + fmt::Binary
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + Not<Output = Self>
    + sealed::Sealed
{
    /// Number of bits in a word.
    const BITS: u32;

    /// An all-zeros word.
    const ALL_ZEROS: Self;

    /// An all-ones word.
    const ALL_ONES: Self;

    /// The atomic counterpart of this word, with identical size and bit layout.
    type Atomic: AtomicWord<Word = Self>;

    /// Returns a word with only bit `offset` set.
    ///
    /// `offset` is masked to `0..BITS`.
    fn bit(offset: u32) -> Self;

    /// Returns the number of trailing zeros, `BITS` for an all-zeros word.
    fn trailing_zeros(self) -> u32;

    /// Returns the number of leading zeros, `BITS` for an all-zeros word.
    fn leading_zeros(self) -> u32;

    /// Returns the number of trailing ones, `BITS` for an all-ones word.
    fn trailing_ones(self) -> u32;
}

/// The atomic counterpart of a `Word`.
///
/// Only the read-modify-write primitives the bit operations need are exposed.
pub trait AtomicWord: Sync + fmt::Debug + sealed::Sealed {
    /// The plain word.
    type Word: Word<Atomic = Self>;

    /// Creates a new atomic word.
    fn new(word: Self::Word) -> Self;

    /// Loads the word.
    fn load(&self, order: Ordering) -> Self::Word;

    /// Bitwise "or" with the current word, returning the previous word.
    fn fetch_or(&self, word: Self::Word, order: Ordering) -> Self::Word;

    /// Bitwise "and" with the current word, returning the previous word.
    fn fetch_and(&self, word: Self::Word, order: Ordering) -> Self::Word;

    /// Returns the underlying word, consuming the atomic.
    fn into_inner(self) -> Self::Word;

    /// Creates a reference to an atomic word from a pointer to a plain word.
    ///
    /// #   Safety
    ///
    /// -   Alignment: `ptr` must be aligned to `align_of::<Self>()`, which may be stricter than the alignment of the
    ///     plain word on some platforms.
    /// -   Validity: `ptr` must be valid for reads and writes for the whole lifetime `'a`.
    /// -   Exclusivity: for the whole lifetime `'a`, the word must only be accessed through atomic operations.
    unsafe fn from_ptr<'a>(ptr: *mut Self::Word) -> &'a Self;
}

/// A storage cell from which a single coherent word read can be made.
///
/// Implemented by both plain words and atomic words, so that a bit can be tested regardless of how the bit vector
/// is otherwise mutated.
pub trait WordCell: sealed::Sealed {
    /// The word read.
    type Word: Word;

    /// Reads the word.
    ///
    /// Atomic words are read with a single `Relaxed` load: coherent, not ordered.
    fn read(&self) -> Self::Word;
}

//
//  Implementations.
//

macro_rules! impl_word {
    ($word:ty, $atomic:ty) => {
        impl sealed::Sealed for $word {}

        impl sealed::Sealed for $atomic {}

        impl Word for $word {
            const BITS: u32 = <$word>::BITS;

            const ALL_ZEROS: Self = 0;

            const ALL_ONES: Self = !0;

            type Atomic = $atomic;

            #[inline(always)]
            fn bit(offset: u32) -> Self {
                1 << (offset % Self::BITS)
            }

            #[inline(always)]
            fn trailing_zeros(self) -> u32 {
                <$word>::trailing_zeros(self)
            }

            #[inline(always)]
            fn leading_zeros(self) -> u32 {
                <$word>::leading_zeros(self)
            }

            #[inline(always)]
            fn trailing_ones(self) -> u32 {
                <$word>::trailing_ones(self)
            }
        }

        impl AtomicWord for $atomic {
            type Word = $word;

            #[inline(always)]
            fn new(word: $word) -> Self {
                <$atomic>::new(word)
            }

            #[inline(always)]
            fn load(&self, order: Ordering) -> $word {
                <$atomic>::load(self, order)
            }

            #[inline(always)]
            fn fetch_or(&self, word: $word, order: Ordering) -> $word {
                <$atomic>::fetch_or(self, word, order)
            }

            #[inline(always)]
            fn fetch_and(&self, word: $word, order: Ordering) -> $word {
                <$atomic>::fetch_and(self, word, order)
            }

            #[inline(always)]
            fn into_inner(self) -> $word {
                <$atomic>::into_inner(self)
            }

            #[inline(always)]
            unsafe fn from_ptr<'a>(ptr: *mut $word) -> &'a Self {
                //  Safety:
                //  -   Forwarded pre-conditions.
                unsafe { <$atomic>::from_ptr(ptr) }
            }
        }

        impl WordCell for $word {
            type Word = $word;

            #[inline(always)]
            fn read(&self) -> $word {
                *self
            }
        }

        impl WordCell for $atomic {
            type Word = $word;

            #[inline(always)]
            fn read(&self) -> $word {
                <$atomic>::load(self, Ordering::Relaxed)
            }
        }
    };
}

#[cfg(target_has_atomic = "8")]
impl_word!(u8, atomic::AtomicU8);

#[cfg(target_has_atomic = "16")]
impl_word!(u16, atomic::AtomicU16);

#[cfg(target_has_atomic = "32")]
impl_word!(u32, atomic::AtomicU32);

#[cfg(target_has_atomic = "64")]
impl_word!(u64, atomic::AtomicU64);

#[cfg(target_has_atomic = "ptr")]
impl_word!(usize, atomic::AtomicUsize);

mod sealed {
    pub trait Sealed {}
}

// mod tests
