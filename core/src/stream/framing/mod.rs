//! Wire framing for binary record streams.
//!
//! Responsibilities:
//! - Encode and decode the fixed-width big-endian length prefix
//! - Build and validate single frames
//!
//! Non-responsibilities:
//! - IO
//! - Record encoding

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{FrameView, FramingError};
pub use encode::{encode_frame, encode_length};
pub use decode::{decode_frame, decode_length, parse_length_prefix};
