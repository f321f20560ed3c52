use byteorder::{BigEndian, ByteOrder};

use crate::constants::{LENGTH_PREFIX_LEN, MAX_FRAME_PAYLOAD};
use crate::stream::framing::types::FramingError;

/// Encode a payload length as a 4-byte big-endian prefix.
#[inline]
pub fn encode_length(n: u32) -> [u8; LENGTH_PREFIX_LEN] {
    let mut prefix = [0u8; LENGTH_PREFIX_LEN];
    BigEndian::write_u32(&mut prefix, n);
    prefix
}

/// Encode one payload into canonical wire format.
///
/// Layout:
///
/// ```text
/// [ payload_len (4, big-endian) ]
/// [ payload (N) ]
/// ```
pub fn encode_frame(payload: &[u8]) -> Result<Vec<u8>, FramingError> {
    if payload.len() > MAX_FRAME_PAYLOAD {
        return Err(FramingError::PayloadTooLarge { len: payload.len() });
    }

    let expected = LENGTH_PREFIX_LEN + payload.len();
    let mut out = Vec::with_capacity(expected);
    out.extend_from_slice(&encode_length(payload.len() as u32));
    out.extend_from_slice(payload);

    if out.len() != expected {
        return Err(FramingError::LengthMismatch {
            expected,
            actual: out.len(),
        });
    }

    Ok(out)
}
