//! The bit operations.
//!
//! -   `atomic`: indivisible, fully ordered, mutators over atomic words.
//! -   `non_atomic`: unsynchronized mutators over exclusively borrowed words.
//! -   `query`: testing a bit, with a run-time or compile-time index.
//! -   `scan`: finding the first or last set, or zero, bit of a single word.
//! -   `raw`: unchecked flavours of the above over raw pointers, for memory not expressible as a slice.
//!
//! All of them share the addressing convention of `utils::split`: bit 0 is the least significant bit of the first
//! word, bit `W::BITS` the least significant bit of the second word, and so on.

pub mod atomic;
pub mod non_atomic;
pub mod query;
pub mod raw;
pub mod scan;

pub use query::{test_bit, test_bit_const};
pub use scan::{ffs, first_set, first_zero, fls, last_set};
