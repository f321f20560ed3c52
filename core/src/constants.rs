/// Width of the binary frame length prefix (big-endian u32).
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Largest payload a single frame can declare.
pub const MAX_FRAME_PAYLOAD: usize = u32::MAX as usize;

/// Upper bound on the payload buffer reserved up front; larger frames grow as bytes arrive.
pub const PAYLOAD_PREALLOC_LIMIT: usize = 64 * 1024;

/// Largest binary record `binary_encode` will produce.
pub const MAX_RECORD_BYTES: usize = 16 * 1024 * 1024;

/// bincode decode budget. Counted in in-memory sizes, which run up to ~6x the
/// encoded size for line items; any declared length beyond it is rejected
/// before allocation.
pub const RECORD_DECODE_LIMIT: usize = 8 * MAX_RECORD_BYTES;

/// Default token delimiter for delimited text streams.
pub const DEFAULT_DELIMITER: char = '\n';

/// Default scanner read buffer in bytes.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 128;

/// Widest UTF-8 encoded character. The scanner buffer can never be smaller.
pub const MAX_CHAR_WIDTH: usize = 4;

/// Read buffer sanity bound (32 MiB).
pub const MAX_READ_BUFFER_SIZE: usize = 32 * 1024 * 1024;

/// Format names accepted by `StreamFormat::from_str`.
pub mod format_names {
    pub const BINARY: &str = "binary";
    pub const TEXT: &str = "text";
    pub const BASE64_TEXT: &str = "base64-text";
}
