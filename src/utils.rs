//! Vocabulary types: words, their atomic counterparts, and bit addressing.

mod error;
mod index;
mod word;

pub use error::BitRangeError;
pub use index::{BitOffset, WordIndex, bits_to_words, locate, split};
pub use word::{AtomicWord, Word, WordCell};

pub(crate) use index::ConstIndex;
