//! record/serializer.rs
//! Binary and text forms of a record.
//!
//! Binary form: bincode, standard configuration (varint lengths) with a decode limit.
//! Text form: compact JSON with camelCase keys. Compact JSON escapes control
//! characters, so a token never contains a raw newline.

use bincode::config::{self, Config};
use thiserror::Error;

use crate::constants::{MAX_RECORD_BYTES, RECORD_DECODE_LIMIT};
use crate::record::types::Invoice;

#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("binary encode failed: {0}")]
    BinaryEncode(#[from] bincode::error::EncodeError),

    #[error("binary decode failed: {0}")]
    BinaryDecode(#[from] bincode::error::DecodeError),

    #[error("trailing bytes after record: consumed {consumed} of {len}")]
    TrailingBytes { consumed: usize, len: usize },

    #[error("binary record of {len} bytes exceeds the maximum of {max}")]
    RecordTooLarge { len: usize, max: usize },

    #[error("field {field} is not a finite number")]
    NonFiniteFloat { field: &'static str },

    #[error("text codec failed: {0}")]
    Text(#[from] serde_json::Error),

    #[error("base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// The four operations the stream layer needs from a record type.
///
/// Encoding must be deterministic; decoding must reject malformed input with
/// an `EncodingError` rather than produce a partial value.
pub trait Record: Sized {
    fn binary_encode(&self) -> Result<Vec<u8>, EncodingError>;
    fn binary_decode(bytes: &[u8]) -> Result<Self, EncodingError>;
    fn text_encode(&self) -> Result<String, EncodingError>;
    fn text_decode(text: &str) -> Result<Self, EncodingError>;
}

/// Standard config with a decode limit, so a corrupt length inside the
/// payload fails as `LimitExceeded` instead of allocating.
#[inline]
fn binary_config() -> impl Config {
    config::standard().with_limit::<{ RECORD_DECODE_LIMIT }>()
}

impl Record for Invoice {
    fn binary_encode(&self) -> Result<Vec<u8>, EncodingError> {
        let bytes = bincode::encode_to_vec(self, binary_config())?;
        if bytes.len() > MAX_RECORD_BYTES {
            return Err(EncodingError::RecordTooLarge { len: bytes.len(), max: MAX_RECORD_BYTES });
        }
        Ok(bytes)
    }

    fn binary_decode(bytes: &[u8]) -> Result<Self, EncodingError> {
        let (invoice, consumed): (Invoice, usize) =
            bincode::decode_from_slice(bytes, binary_config())?;
        if consumed != bytes.len() {
            return Err(EncodingError::TrailingBytes { consumed, len: bytes.len() });
        }
        Ok(invoice)
    }

    /// JSON has no NaN or infinity; serde_json would write `null` and the
    /// token could not be read back.
    fn text_encode(&self) -> Result<String, EncodingError> {
        if let Some(field) = self.first_non_finite() {
            return Err(EncodingError::NonFiniteFloat { field });
        }
        Ok(serde_json::to_string(self)?)
    }

    fn text_decode(text: &str) -> Result<Self, EncodingError> {
        Ok(serde_json::from_str(text)?)
    }
}
