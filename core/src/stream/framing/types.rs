use std::fmt;

use crate::constants::{LENGTH_PREFIX_LEN, MAX_FRAME_PAYLOAD};

/// One length-prefixed frame borrowed from a wire buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameView<'a> {
    pub payload_len: u32,
    pub payload: &'a [u8],
}

impl FrameView<'_> {
    /// Total encoded size, prefix included.
    pub fn wire_len(&self) -> usize {
        LENGTH_PREFIX_LEN + self.payload_len as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FramingError {
    /// Fewer than `LENGTH_PREFIX_LEN` bytes were available for the prefix.
    Truncated { have: usize },
    /// Payload does not fit the fixed-width prefix.
    PayloadTooLarge { len: usize },
    LengthMismatch {
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for FramingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use FramingError::*;
        match self {
            Truncated { have } =>
                write!(f, "truncated length prefix: {} of {} bytes", have, LENGTH_PREFIX_LEN),
            PayloadTooLarge { len } =>
                write!(f, "payload too large: {} > {}", len, MAX_FRAME_PAYLOAD),
            LengthMismatch { expected, actual } =>
                write!(f, "length mismatch: expected {}, got {}", expected, actual),
        }
    }
}

impl std::error::Error for FramingError {}
