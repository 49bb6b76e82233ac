//! Non-atomic bit mutators.
//!
//! Same operations as `atomic`, without atomicity, ordering, or barrier. The exclusive access the caller would have to
//! establish by external locking is expressed as `&mut`, so a racy use cannot be written without `unsafe`; see `raw`
//! for the unchecked pointer flavour, where it can.

use crate::utils::{self, BitRangeError, Word};

/// Sets bit `nr`.
///
/// #   Panics
///
/// If bit `nr` lies beyond `words`.
///
/// #   Examples
///
/// ```
/// #   use kernel_bitops::ops::non_atomic::set_bit;
/// let mut words = [0u8; 2];
///
/// set_bit(3, &mut words);
/// set_bit(9, &mut words);
///
/// assert_eq!([0b0000_1000, 0b0000_0010], words);
/// ```
#[doc(alias = "__set_bit")]
#[inline]
#[track_caller]
pub fn set_bit<W>(nr: usize, words: &mut [W])
where
    W: Word,
{
    let (word, offset) = utils::split::<W>(nr);

    let slot = &mut words[word.0];

    *slot = *slot | offset.mask();
}

/// Clears bit `nr`.
///
/// #   Panics
///
/// If bit `nr` lies beyond `words`.
///
/// #   Examples
///
/// ```
/// #   use kernel_bitops::ops::non_atomic::clear_bit;
/// let mut words = [!0u8; 2];
///
/// clear_bit(9, &mut words);
///
/// assert_eq!([0b1111_1111, 0b1111_1101], words);
/// ```
#[doc(alias = "__clear_bit")]
#[inline]
#[track_caller]
pub fn clear_bit<W>(nr: usize, words: &mut [W])
where
    W: Word,
{
    let (word, offset) = utils::split::<W>(nr);

    let slot = &mut words[word.0];

    *slot = *slot & !offset.mask::<W>();
}

/// Sets bit `nr`, and returns whether it was set before.
///
/// #   Panics
///
/// If bit `nr` lies beyond `words`.
///
/// #   Examples
///
/// ```
/// #   use kernel_bitops::ops::non_atomic::test_and_set_bit;
/// let mut words = [0u32; 2];
///
/// assert!(!test_and_set_bit(33, &mut words));
/// assert!(test_and_set_bit(33, &mut words));
///
/// assert_eq!([0, 0b10], words);
/// ```
#[doc(alias = "__test_and_set_bit")]
#[inline]
#[track_caller]
pub fn test_and_set_bit<W>(nr: usize, words: &mut [W]) -> bool
where
    W: Word,
{
    let (word, offset) = utils::split::<W>(nr);

    let mask = offset.mask::<W>();
    let slot = &mut words[word.0];

    let previous = *slot;
    *slot = previous | mask;

    (previous & mask) != W::ALL_ZEROS
}

/// Clears bit `nr`, and returns whether it was set before.
///
/// #   Panics
///
/// If bit `nr` lies beyond `words`.
///
/// #   Examples
///
/// ```
/// #   use kernel_bitops::ops::non_atomic::test_and_clear_bit;
/// let mut words = [0b10u32, 0];
///
/// assert!(test_and_clear_bit(1, &mut words));
/// assert!(!test_and_clear_bit(1, &mut words));
///
/// assert_eq!([0, 0], words);
/// ```
#[doc(alias = "__test_and_clear_bit")]
#[inline]
#[track_caller]
pub fn test_and_clear_bit<W>(nr: usize, words: &mut [W]) -> bool
where
    W: Word,
{
    let (word, offset) = utils::split::<W>(nr);

    let mask = offset.mask::<W>();
    let slot = &mut words[word.0];

    let previous = *slot;
    *slot = previous & !mask;

    (previous & mask) != W::ALL_ZEROS
}

//
//  Checked operations.
//

/// Sets bit `nr`, or returns an error if it lies beyond `words`.
#[inline]
pub fn try_set_bit<W>(nr: usize, words: &mut [W]) -> Result<(), BitRangeError>
where
    W: Word,
{
    utils::locate::<W>(nr, words.len())?;

    set_bit(nr, words);

    Ok(())
}

/// Clears bit `nr`, or returns an error if it lies beyond `words`.
#[inline]
pub fn try_clear_bit<W>(nr: usize, words: &mut [W]) -> Result<(), BitRangeError>
where
    W: Word,
{
    utils::locate::<W>(nr, words.len())?;

    clear_bit(nr, words);

    Ok(())
}

/// Sets bit `nr` and returns whether it was set before, or returns an error if it lies beyond `words`.
#[inline]
pub fn try_test_and_set_bit<W>(nr: usize, words: &mut [W]) -> Result<bool, BitRangeError>
where
    W: Word,
{
    utils::locate::<W>(nr, words.len())?;

    Ok(test_and_set_bit(nr, words))
}

/// Clears bit `nr` and returns whether it was set before, or returns an error if it lies beyond `words`.
#[inline]
pub fn try_test_and_clear_bit<W>(nr: usize, words: &mut [W]) -> Result<bool, BitRangeError>
where
    W: Word,
{
    utils::locate::<W>(nr, words.len())?;

    Ok(test_and_clear_bit(nr, words))
}

#[cfg(test)]
mod tests {
    use crate::ops::query::test_bit;

    use super::*;

    const BITS: usize = u64::BITS as usize;

    #[test]
    fn set_bit_empty() {
        for i in 0..BITS {
            let mut words = [0u64];

            set_bit(i, &mut words);

            assert!(test_bit(i, &words), "{i}");
            assert_eq!([1 << i], words, "{i}");
        }
    }

    #[test]
    fn set_bit_preserves_others() {
        for i in 0..BITS {
            let pattern = 0xAAAA_AAAA_AAAA_AAAAu64;
            let mut words = [pattern];

            set_bit(i, &mut words);

            assert_eq!([pattern | (1 << i)], words, "{i}");
        }
    }

    #[test]
    fn clear_bit_full() {
        for i in 0..BITS {
            let mut words = [!0u64];

            clear_bit(i, &mut words);

            assert!(!test_bit(i, &words), "{i}");
            assert_eq!([!(1 << i)], words, "{i}");
        }
    }

    #[test]
    fn test_and_set_bit_empty() {
        for i in 0..BITS {
            let mut words = [0u64];

            assert!(!test_and_set_bit(i, &mut words), "{i}");
            assert!(test_and_set_bit(i, &mut words), "{i}");

            assert_eq!([1 << i], words, "{i}");
        }
    }

    #[test]
    fn test_and_clear_bit_full() {
        for i in 0..BITS {
            let mut words = [!0u64];

            assert!(test_and_clear_bit(i, &mut words), "{i}");
            assert!(!test_and_clear_bit(i, &mut words), "{i}");

            assert_eq!([!(1 << i)], words, "{i}");
        }
    }

    #[test]
    fn multi_word() {
        for nr in 0..(3 * BITS) {
            let mut words = [0u64; 3];

            set_bit(nr, &mut words);

            let mut expected = [0u64; 3];
            expected[nr / BITS] = 1 << (nr % BITS);

            assert_eq!(expected, words, "{nr}");

            clear_bit(nr, &mut words);

            assert_eq!([0u64; 3], words, "{nr}");
        }
    }

    #[test]
    fn walkthrough() {
        let mut words = [0b0000_0000u8];

        set_bit(3, &mut words);
        assert_eq!([0b0000_1000], words);

        assert!(test_and_set_bit(3, &mut words));
        assert_eq!([0b0000_1000], words);

        clear_bit(3, &mut words);
        assert_eq!([0b0000_0000], words);
    }

    #[test]
    #[should_panic]
    fn clear_bit_out_of_range() {
        let mut words = [0u8; 2];

        clear_bit(16, &mut words);
    }

    #[test]
    fn try_out_of_range() {
        let mut words = [0u16];

        assert_eq!(Err(BitRangeError), try_set_bit(16, &mut words));
        assert_eq!(Err(BitRangeError), try_clear_bit(16, &mut words));
        assert_eq!(Err(BitRangeError), try_test_and_set_bit(16, &mut words));
        assert_eq!(Err(BitRangeError), try_test_and_clear_bit(16, &mut words));

        assert_eq!([0], words);
    }

    #[test]
    fn try_in_range() {
        let mut words = [0u16; 2];

        assert_eq!(Ok(()), try_set_bit(17, &mut words));
        assert_eq!(Ok(true), try_test_and_set_bit(17, &mut words));
        assert_eq!(Ok(true), try_test_and_clear_bit(17, &mut words));
        assert_eq!(Ok(false), try_test_and_clear_bit(17, &mut words));

        assert_eq!(Ok(()), try_set_bit(31, &mut words));
        assert_eq!(Ok(()), try_clear_bit(31, &mut words));

        assert_eq!([0, 0], words);
    }
} // mod tests
