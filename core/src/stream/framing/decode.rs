use byteorder::{BigEndian, ByteOrder};

use crate::constants::LENGTH_PREFIX_LEN;
use crate::stream::framing::types::{FrameView, FramingError};

/// Decode a 4-byte big-endian prefix. Exact inverse of `encode_length`.
#[inline]
pub fn decode_length(prefix: [u8; LENGTH_PREFIX_LEN]) -> u32 {
    BigEndian::read_u32(&prefix)
}

/// Read the length prefix at the front of `wire`.
#[inline]
pub fn parse_length_prefix(wire: &[u8]) -> Result<u32, FramingError> {
    if wire.len() < LENGTH_PREFIX_LEN {
        return Err(FramingError::Truncated { have: wire.len() });
    }
    Ok(BigEndian::read_u32(&wire[..LENGTH_PREFIX_LEN]))
}

/// Decode a single frame from bytes.
///
/// Caller guarantees the full frame is provided; anything more or less is a
/// `LengthMismatch`.
pub fn decode_frame(wire: &[u8]) -> Result<FrameView<'_>, FramingError> {
    let payload_len = parse_length_prefix(wire)?;

    let expected_len = LENGTH_PREFIX_LEN + payload_len as usize;
    if wire.len() != expected_len {
        return Err(FramingError::LengthMismatch {
            expected: expected_len,
            actual: wire.len(),
        });
    }

    Ok(FrameView {
        payload_len,
        payload: &wire[LENGTH_PREFIX_LEN..expected_len],
    })
}
