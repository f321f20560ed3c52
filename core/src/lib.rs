//! record-codec
//!
//! Streaming codecs for invoice records: length-prefixed binary frames,
//! delimited structured text, and delimited base64 of the binary form.
//! Decoders are correct under arbitrary read chunking.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod config;
pub mod types;

pub mod record;
pub mod telemetry;

// Stream layers
pub mod stream;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::config::{CodecConfig, StreamFormat};
    pub use crate::record::{Address, Invoice, InvoiceLine, Record};
    pub use crate::stream::{decode_stream, encode_stream, TokenFormat};
    pub use crate::types::{PartialDecode, StreamError};
}
