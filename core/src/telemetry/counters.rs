//! telemetry/counters.rs
//! Mutable counters collected while a decoder runs.
//!
//! Converted into an immutable `TelemetrySnapshot` once the stream is done.
use bincode::{Encode, Decode};
use std::ops::AddAssign;

/// Deterministic counters collected during stream decoding
#[derive(Default, Clone, Debug, Encode, Decode, PartialEq, Eq)]
pub struct DecodeCounters {
    /// Records successfully handed to the caller.
    pub records: u64,
    /// Calls into the underlying reader (scanner only).
    pub reads: u64,
    /// All bytes pulled from the underlying reader.
    pub bytes_read: u64,
    /// Bytes belonging to frame payloads or text tokens.
    pub bytes_payload: u64,
    /// Length prefixes and delimiters.
    pub bytes_overhead: u64,
    /// Times a partial multi-byte character was carried into the next read.
    pub carry_overs: u64,
}

impl DecodeCounters {
    /// Record one reader call that returned `n` bytes.
    pub fn add_read(&mut self, n: usize) {
        self.reads += 1;
        self.bytes_read += n as u64;
    }

    /// Record one complete binary frame.
    ///
    /// - `prefix_len`: length prefix bytes
    /// - `payload_len`: payload bytes following the prefix
    pub fn add_frame(&mut self, prefix_len: usize, payload_len: usize) {
        self.bytes_read += (prefix_len + payload_len) as u64;
        self.bytes_payload += payload_len as u64;
        self.bytes_overhead += prefix_len as u64;
    }

    /// Record one finished text token and the delimiter that closed it (0 at end of stream).
    pub fn add_token(&mut self, token_len: usize, delimiter_len: usize) {
        self.bytes_payload += token_len as u64;
        self.bytes_overhead += delimiter_len as u64;
    }

    pub fn add_record(&mut self) {
        self.records += 1;
    }

    pub fn add_carry_over(&mut self) {
        self.carry_overs += 1;
    }

    /// Bytes the decoder consumed as structure rather than payload.
    pub fn framing_overhead_bytes(&self) -> u64 {
        self.bytes_overhead
    }

    pub fn merge(&mut self, other: &DecodeCounters) {
        self.records += other.records;
        self.reads += other.reads;
        self.bytes_read += other.bytes_read;
        self.bytes_payload += other.bytes_payload;
        self.bytes_overhead += other.bytes_overhead;
        self.carry_overs += other.carry_overs;
    }
}

impl AddAssign for DecodeCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
