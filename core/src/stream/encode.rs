//! Write side of the three stream formats.
//!
//! Writers borrow the sink and never flush-and-close it; they return the
//! number of bytes written.

use std::io::Write;
use log::debug;

use crate::constants::LENGTH_PREFIX_LEN;
use crate::record::Record;
use crate::stream::delimited::TokenFormat;
use crate::stream::framing::{encode_length, FramingError};
use crate::types::StreamError;

/// Write records as `[u32 BE length][binary record]` frames.
pub fn write_binary_stream<'a, W, T, I>(w: &mut W, records: I) -> Result<u64, StreamError>
where
    W: Write + ?Sized,
    T: Record + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut written = 0u64;
    let mut count = 0usize;

    for (index, record) in records.into_iter().enumerate() {
        let payload = record
            .binary_encode()
            .map_err(|e| StreamError::encoding(index, e))?;
        let len = u32::try_from(payload.len())
            .map_err(|_| FramingError::PayloadTooLarge { len: payload.len() })?;

        w.write_all(&encode_length(len))?;
        w.write_all(&payload)?;
        written += (LENGTH_PREFIX_LEN + payload.len()) as u64;
        count += 1;
    }

    debug!("wrote {} binary frame(s), {} byte(s)", count, written);
    Ok(written)
}

/// Write records as delimiter-terminated tokens.
///
/// A token containing the delimiter would split into two on the way back,
/// so it is rejected with `DelimiterInToken` before anything for that record is written.
pub fn write_delimited_stream<'a, W, T, I>(
    w: &mut W,
    records: I,
    format: TokenFormat,
    delimiter: char,
) -> Result<u64, StreamError>
where
    W: Write + ?Sized,
    T: Record + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut delim_buf = [0u8; 4];
    let delim = delimiter.encode_utf8(&mut delim_buf).as_bytes();

    let mut written = 0u64;
    let mut count = 0usize;

    for (index, record) in records.into_iter().enumerate() {
        let token = format
            .encode_token(record)
            .map_err(|e| StreamError::encoding(index, e))?;
        if token.contains(delimiter) {
            return Err(StreamError::DelimiterInToken { index, delimiter });
        }

        w.write_all(token.as_bytes())?;
        w.write_all(delim)?;
        written += (token.len() + delim.len()) as u64;
        count += 1;
    }

    debug!("wrote {} {:?} token(s), {} byte(s)", count, format, written);
    Ok(written)
}
