use std::fmt;
use std::io;
use thiserror::Error;

use crate::{
    config::ConfigError,
    constants::LENGTH_PREFIX_LEN,
    record::EncodingError,
    stream::framing::FramingError,
};

/// Unified stream error covering I/O, framing, text scanning and record encoding.
/// - `From<T>` impls enable `?` across the decoders and writers.
/// - Offsets are absolute byte positions in the input stream.
#[derive(Debug, Error)]
pub enum StreamError {
    /// Propagated verbatim from the underlying reader or writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stream ended inside a length prefix.
    #[error("malformed frame at byte {offset}: length prefix has {have} of {} bytes", LENGTH_PREFIX_LEN)]
    MalformedFrame { offset: u64, have: usize },

    /// The stream ended before a declared payload was complete.
    #[error("short read at byte {offset}: frame declares {expected} payload bytes, stream ended after {actual}")]
    ShortRead { offset: u64, expected: usize, actual: usize },

    /// A payload or token did not parse as a record.
    #[error("invalid encoding in record {index}: {source}")]
    InvalidEncoding {
        index: usize,
        #[source]
        source: EncodingError,
    },

    /// Bytes that cannot become text no matter how much more data arrives.
    #[error("invalid character sequence at byte {offset}")]
    InvalidCharacterSequence { offset: u64 },

    /// Frame construction failed on the write side.
    #[error("framing error: {0}")]
    Framing(#[from] FramingError),

    /// An encoded token contains the delimiter and could not be read back.
    #[error("record {index} encodes to a token containing the delimiter {delimiter:?}")]
    DelimiterInToken { index: usize, delimiter: char },

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl StreamError {
    pub(crate) fn encoding(index: usize, source: EncodingError) -> Self {
        StreamError::InvalidEncoding { index, source }
    }
}

/// A decode that aborted part-way: the records decoded before the failure, and the failure.
#[derive(Debug)]
pub struct PartialDecode<T> {
    pub records: Vec<T>,
    pub error: StreamError,
}

impl<T> PartialDecode<T> {
    /// Drop the partial records and keep the error.
    pub fn into_error(self) -> StreamError {
        self.error
    }
}

impl<T> fmt::Display for PartialDecode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stream decode aborted after {} record(s): {}", self.records.len(), self.error)
    }
}

impl<T: fmt::Debug> std::error::Error for PartialDecode<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl<T> From<PartialDecode<T>> for StreamError {
    fn from(p: PartialDecode<T>) -> Self {
        p.error
    }
}

/// Drain a record iterator, stopping at the first error and keeping what came before it.
pub fn collect_records<T, I>(iter: I) -> Result<Vec<T>, PartialDecode<T>>
where
    I: IntoIterator<Item = Result<T, StreamError>>,
{
    let mut records = Vec::new();
    for item in iter {
        match item {
            Ok(record) => records.push(record),
            Err(error) => return Err(PartialDecode { records, error }),
        }
    }
    Ok(records)
}
