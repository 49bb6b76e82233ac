//! Bit tests.
//!
//! `test_bit` computes the word and mask at run-time, `test_bit_const` at compile-time. Both read the containing word
//! once, and agree on every input; the latter only exists for hot paths testing a fixed flag.

use crate::utils::{self, BitRangeError, ConstIndex, Word, WordCell};

/// Returns whether bit `nr` is set.
///
/// `words` may be plain words, or atomic words concurrently mutated through `atomic`; in the latter case the word is
/// read with a single `Relaxed` load.
///
/// #   Panics
///
/// If bit `nr` lies beyond `words`.
///
/// #   Examples
///
/// ```
/// #   use core::sync::atomic::AtomicU8;
/// #   use kernel_bitops::ops::query::test_bit;
/// let plain = [0b0000_1000u8, 0b0000_0001];
///
/// assert!(test_bit(3, &plain));
/// assert!(test_bit(8, &plain));
/// assert!(!test_bit(9, &plain));
///
/// let atomic = [AtomicU8::new(0b0000_1000)];
///
/// assert!(test_bit(3, &atomic));
/// ```
#[inline]
#[track_caller]
pub fn test_bit<C>(nr: usize, words: &[C]) -> bool
where
    C: WordCell,
{
    let (word, offset) = utils::split::<C::Word>(nr);

    let mask = offset.mask::<C::Word>();

    (words[word.0].read() & mask) != <C::Word as Word>::ALL_ZEROS
}

/// Returns whether bit `NR` is set, with `NR` known at compile-time.
///
/// #   Panics
///
/// If bit `NR` lies beyond `words`.
///
/// #   Examples
///
/// ```
/// #   use kernel_bitops::ops::query::{test_bit, test_bit_const};
/// let words = [0u64, 1 << 5];
///
/// assert!(test_bit_const::<69, _>(&words));
/// assert_eq!(test_bit(68, &words), test_bit_const::<68, _>(&words));
/// ```
#[inline(always)]
#[track_caller]
pub fn test_bit_const<const NR: usize, C>(words: &[C]) -> bool
where
    C: WordCell,
{
    let word = ConstIndex::<NR, C::Word>::WORD;
    let mask = <C::Word as Word>::bit(ConstIndex::<NR, C::Word>::OFFSET);

    (words[word].read() & mask) != <C::Word as Word>::ALL_ZEROS
}

/// Returns whether bit `nr` is set, or an error if it lies beyond `words`.
///
/// #   Examples
///
/// ```
/// #   use kernel_bitops::{ops::query::try_test_bit, utils::BitRangeError};
/// let words = [0b0000_1000u8];
///
/// assert_eq!(Ok(true), try_test_bit(3, &words));
/// assert_eq!(Err(BitRangeError), try_test_bit(8, &words));
/// ```
#[inline]
pub fn try_test_bit<C>(nr: usize, words: &[C]) -> Result<bool, BitRangeError>
where
    C: WordCell,
{
    utils::locate::<C::Word>(nr, words.len())?;

    Ok(test_bit(nr, words))
}

#[cfg(test)]
mod tests {
    use core::sync::atomic::AtomicU32;

    use super::*;

    const PATTERN: [u32; 3] = [0x8000_0001, 0x0000_0000, 0x1234_5678];

    #[test]
    fn test_bit_brush() {
        for nr in 0..96 {
            let expected = (PATTERN[nr / 32] >> (nr % 32)) & 1 == 1;

            assert_eq!(expected, test_bit(nr, &PATTERN), "{nr}");
        }
    }

    #[test]
    fn test_bit_atomic() {
        let words = PATTERN.map(AtomicU32::new);

        for nr in 0..96 {
            assert_eq!(test_bit(nr, &PATTERN), test_bit(nr, &words), "{nr}");
        }
    }

    #[test]
    fn test_bit_empty_full() {
        for nr in 0..128 {
            assert!(!test_bit(nr, &[0u64; 2]), "{nr}");
            assert!(test_bit(nr, &[!0u64; 2]), "{nr}");
        }
    }

    #[test]
    fn test_bit_const_agrees() {
        macro_rules! check {
            ($($nr:literal)*) => {
                $(
                    assert_eq!(test_bit($nr, &PATTERN), test_bit_const::<$nr, _>(&PATTERN), "{}", $nr);
                )*
            };
        }

        check!(0 1 2 30 31 32 33 63 64 65 67 68 69 70 94 95);
    }

    #[test]
    fn test_bit_const_atomic() {
        let words = PATTERN.map(AtomicU32::new);

        assert!(test_bit_const::<0, _>(&words));
        assert!(test_bit_const::<31, _>(&words));
        assert!(!test_bit_const::<32, _>(&words));
        assert!(test_bit_const::<67, _>(&words));
    }

    #[test]
    #[should_panic]
    fn test_bit_out_of_range() {
        test_bit(96, &PATTERN);
    }

    #[test]
    #[should_panic]
    fn test_bit_const_out_of_range() {
        test_bit_const::<96, _>(&PATTERN);
    }

    #[test]
    fn try_test_bit_bounds() {
        assert_eq!(Ok(true), try_test_bit(67, &PATTERN));
        assert_eq!(Ok(false), try_test_bit(32, &PATTERN));
        assert_eq!(Err(BitRangeError), try_test_bit(96, &PATTERN));
    }
} // mod tests
