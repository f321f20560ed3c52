//! stream/mod.rs
//! Record stream encoders and decoders.
//!
//! Layers, bottom up:
//! - `framing`: fixed-width length prefix
//! - `scanner`: chunk-boundary-safe delimiter tokenizer
//! - `binary` / `delimited`: decoders composing the above with `Record`
//! - `core`: config-driven entry points

pub mod io;
pub mod framing;
pub mod scanner;
pub mod binary;
pub mod delimited;
pub mod encode;
pub mod core;

pub use binary::{decode_binary_stream, BinaryStreamDecoder};
pub use delimited::{decode_delimited_stream, DelimitedStreamDecoder, TokenFormat};
pub use encode::{write_binary_stream, write_delimited_stream};
pub use scanner::DelimiterScanner;

pub use self::core::{
    decode_stream,
    decode_stream_with_telemetry,
    encode_stream,
    open_decoder,
    RecordDecoder,
};
