//! Read helpers that keep going across short reads.
//!
//! `Read::read` may return fewer bytes than asked for at any point before
//! end of stream. Everything here loops until the request is satisfied or the
//! reader reports EOF, and retries `Interrupted`.

use std::io::{self, ErrorKind, Read};
use bytes::Bytes;

use crate::constants::PAYLOAD_PREALLOC_LIMIT;

/// Fill `buf` as far as the stream allows.
///
/// Returns the number of bytes read; anything below `buf.len()` means EOF was reached.
pub fn read_full<R: Read + ?Sized>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut off = 0;

    while off < buf.len() {
        match r.read(&mut buf[off..]) {
            Ok(0) => break,
            Ok(n) => off += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(off)
}

/// Read up to `len` bytes, stopping early only at EOF.
///
/// The buffer grows as bytes arrive, so a bogus `len` from a corrupt length
/// prefix costs at most `PAYLOAD_PREALLOC_LIMIT` before the stream runs dry.
pub fn read_exact_or_eof<R: Read + ?Sized>(r: &mut R, len: usize) -> io::Result<Bytes> {
    let mut buf = Vec::with_capacity(len.min(PAYLOAD_PREALLOC_LIMIT));
    Read::take(&mut *r, len as u64).read_to_end(&mut buf)?;
    Ok(Bytes::from(buf))
}
