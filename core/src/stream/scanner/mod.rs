//! Buffered, boundary-safe delimiter scanning for text record streams.

pub mod utf8;
pub mod delimiter;

pub use delimiter::DelimiterScanner;
pub use utf8::{decode_char, Decoded};
