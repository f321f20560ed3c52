//! Length-prefixed binary record streams.
//!
//! Wire: `[u32 BE payload_len][payload]` repeated; a clean stream ends on a
//! frame boundary.

use std::io::Read;
use std::marker::PhantomData;
use std::time::Instant;
use bytes::Bytes;
use log::{debug, trace, warn};

use crate::constants::LENGTH_PREFIX_LEN;
use crate::record::Record;
use crate::stream::framing::decode_length;
use crate::stream::io::{read_exact_or_eof, read_full};
use crate::telemetry::{DecodeCounters, Stage, TelemetrySnapshot, TelemetryTimer};
use crate::types::{collect_records, PartialDecode, StreamError};

/// Pulls records out of a binary frame stream, one frame per `next`.
///
/// Yields `Err` at most once; after an error or a clean end the iterator is exhausted.
#[derive(Debug)]
pub struct BinaryStreamDecoder<R, T> {
    reader: R,
    /// Stream offset of the next length prefix.
    offset: u64,
    /// Index of the next record.
    index: usize,
    done: bool,
    counters: DecodeCounters,
    timer: TelemetryTimer,
    _record: PhantomData<fn() -> T>,
}

impl<R: Read, T: Record> BinaryStreamDecoder<R, T> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            offset: 0,
            index: 0,
            done: false,
            counters: DecodeCounters::default(),
            timer: TelemetryTimer::new(),
            _record: PhantomData,
        }
    }

    /// Read the next frame's payload without decoding it.
    ///
    /// `Ok(None)` only for a clean end of stream exactly at a frame boundary.
    pub fn next_payload(&mut self) -> Result<Option<Bytes>, StreamError> {
        let started = Instant::now();

        // --- awaiting length ---
        let mut prefix = [0u8; LENGTH_PREFIX_LEN];
        let have = read_full(&mut self.reader, &mut prefix)?;
        if have == 0 {
            self.timer.add_stage_time(Stage::Read, started.elapsed());
            return Ok(None);
        }
        if have < LENGTH_PREFIX_LEN {
            return Err(StreamError::MalformedFrame { offset: self.offset, have });
        }
        let expected = decode_length(prefix) as usize;

        // --- awaiting payload ---
        let payload = read_exact_or_eof(&mut self.reader, expected)?;
        self.timer.add_stage_time(Stage::Read, started.elapsed());
        if payload.len() < expected {
            return Err(StreamError::ShortRead {
                offset: self.offset + LENGTH_PREFIX_LEN as u64,
                expected,
                actual: payload.len(),
            });
        }

        trace!("frame at byte {}: {} payload bytes", self.offset, expected);
        self.counters.add_frame(LENGTH_PREFIX_LEN, expected);
        self.offset += (LENGTH_PREFIX_LEN + expected) as u64;
        Ok(Some(payload))
    }

    /// Read and decode the next record.
    pub fn next_record(&mut self) -> Result<Option<T>, StreamError> {
        let Some(payload) = self.next_payload()? else {
            return Ok(None);
        };

        let record = self
            .timer
            .time(Stage::Decode, || T::binary_decode(&payload))
            .map_err(|e| StreamError::encoding(self.index, e))?;

        self.index += 1;
        self.counters.add_record();
        Ok(Some(record))
    }

    /// Stream offset of the next unread frame.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn records_decoded(&self) -> usize {
        self.index
    }

    pub fn counters(&self) -> &DecodeCounters {
        &self.counters
    }

    pub fn telemetry(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(&self.counters, &self.timer)
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read, T: Record> Iterator for BinaryStreamDecoder<R, T> {
    type Item = Result<T, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                self.timer.finish();
                debug!(
                    "binary stream complete: {} record(s), {} byte(s)",
                    self.index, self.offset
                );
                None
            }
            Err(e) => {
                self.done = true;
                self.timer.finish();
                warn!("binary stream aborted after {} record(s): {}", self.index, e);
                Some(Err(e))
            }
        }
    }
}

/// Decode a whole binary frame stream.
///
/// On failure the records decoded before the bad frame come back inside the `PartialDecode`.
pub fn decode_binary_stream<R: Read, T: Record>(reader: R) -> Result<Vec<T>, PartialDecode<T>> {
    collect_records(BinaryStreamDecoder::new(reader))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::EncodingError;
    use crate::stream::framing::encode_frame;
    use std::io::Cursor;

    #[derive(Debug, PartialEq)]
    struct Raw(Vec<u8>);

    impl Record for Raw {
        fn binary_encode(&self) -> Result<Vec<u8>, EncodingError> {
            Ok(self.0.clone())
        }
        fn binary_decode(bytes: &[u8]) -> Result<Self, EncodingError> {
            Ok(Raw(bytes.to_vec()))
        }
        fn text_encode(&self) -> Result<String, EncodingError> {
            unimplemented!()
        }
        fn text_decode(_: &str) -> Result<Self, EncodingError> {
            unimplemented!()
        }
    }

    fn wire(payloads: &[&[u8]]) -> Vec<u8> {
        payloads.iter().flat_map(|p| encode_frame(p).unwrap()).collect()
    }

    #[test]
    fn zero_length_frames_are_records() {
        let out: Vec<Raw> = decode_binary_stream(Cursor::new(wire(&[b"", b"x", b""]))).unwrap();
        assert_eq!(out, vec![Raw(vec![]), Raw(b"x".to_vec()), Raw(vec![])]);
    }

    #[test]
    fn offsets_point_at_the_broken_frame() {
        let mut bytes = wire(&[b"abc", b"defg"]);
        bytes.truncate(7 + 4 + 2);
        let err = decode_binary_stream::<_, Raw>(Cursor::new(bytes)).unwrap_err();
        assert_eq!(err.records, vec![Raw(b"abc".to_vec())]);
        assert!(matches!(
            err.error,
            StreamError::ShortRead { offset: 11, expected: 4, actual: 2 }
        ));
    }

    #[test]
    fn iterator_is_exhausted_after_error() {
        let mut dec = BinaryStreamDecoder::<_, Raw>::new(Cursor::new(vec![0u8, 0]));
        assert!(matches!(dec.next(), Some(Err(StreamError::MalformedFrame { offset: 0, have: 2 }))));
        assert!(dec.next().is_none());
    }
}
