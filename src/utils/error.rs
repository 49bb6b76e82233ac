//  Errors.

use core::{error, fmt};

/// An error in addressing a bit: the bit lies beyond the words of the bit vector.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct BitRangeError;

impl fmt::Display for BitRangeError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str("bit index out of range")
    }
}

impl error::Error for BitRangeError {}

// mod tests
