use std::io::{ErrorKind, Read};
use std::mem;
use std::time::{Duration, Instant};
use log::{debug, trace};

use crate::config::{validate_read_buffer_size, ConfigError};
use crate::constants::{DEFAULT_DELIMITER, DEFAULT_READ_BUFFER_SIZE};
use crate::stream::scanner::utf8::{decode_char, Decoded};
use crate::telemetry::{DecodeCounters, Stage, TelemetrySnapshot, TelemetryTimer};
use crate::types::StreamError;

/// Splits a byte stream into delimiter-separated text tokens.
///
/// The result does not depend on how the reader chunks its data: a
/// multi-byte character cut by a read boundary is carried to the front of
/// the buffer and completed by the next read.
///
/// State is instance-local; two scanners never share anything.
#[derive(Debug)]
pub struct DelimiterScanner<R> {
    reader: R,
    delimiter: char,
    buf: Box<[u8]>,
    /// Next undecoded byte in `buf`.
    pos: usize,
    /// End of valid data in `buf`.
    filled: usize,
    /// Decoded text of the token in progress.
    token: String,
    /// Stream offset of `buf[pos]`.
    offset: u64,
    eof: bool,
    done: bool,
    counters: DecodeCounters,
    timer: TelemetryTimer,
}

impl<R: Read> DelimiterScanner<R> {
    /// Scanner with a newline delimiter and the default buffer size.
    pub fn new(reader: R) -> Self {
        Self::build(reader, DEFAULT_DELIMITER, DEFAULT_READ_BUFFER_SIZE)
    }

    pub fn with_delimiter(reader: R, delimiter: char) -> Self {
        Self::build(reader, delimiter, DEFAULT_READ_BUFFER_SIZE)
    }

    /// `capacity` must fit at least one maximal UTF-8 character.
    pub fn with_capacity(reader: R, delimiter: char, capacity: usize) -> Result<Self, ConfigError> {
        validate_read_buffer_size(capacity)?;
        Ok(Self::build(reader, delimiter, capacity))
    }

    fn build(reader: R, delimiter: char, capacity: usize) -> Self {
        Self {
            reader,
            delimiter,
            buf: vec![0u8; capacity].into_boxed_slice(),
            pos: 0,
            filled: 0,
            token: String::new(),
            offset: 0,
            eof: false,
            done: false,
            counters: DecodeCounters::default(),
            timer: TelemetryTimer::new(),
        }
    }

    /// Next complete token, or `None` once the stream is exhausted.
    ///
    /// Every delimiter ends a token, so adjacent delimiters yield an empty
    /// token. A trailing token without a delimiter is returned at end of
    /// stream if it is non-empty.
    pub fn next_token(&mut self) -> Result<Option<String>, StreamError> {
        if self.done {
            return Ok(None);
        }

        loop {
            while self.pos < self.filled {
                match decode_char(&self.buf[self.pos..self.filled]) {
                    Decoded::Char(ch, width) => {
                        self.pos += width;
                        self.offset += width as u64;
                        if ch == self.delimiter {
                            return Ok(Some(self.finish_token(width)));
                        }
                        self.token.push(ch);
                    }
                    // more bytes may complete it; carry over on the next fill
                    Decoded::Incomplete if !self.eof => break,
                    Decoded::Incomplete | Decoded::Invalid => {
                        self.done = true;
                        self.timer.finish();
                        debug!(
                            "invalid character sequence at byte {}: {:02X?}",
                            self.offset,
                            &self.buf[self.pos..self.filled.min(self.pos + 4)]
                        );
                        return Err(StreamError::InvalidCharacterSequence { offset: self.offset });
                    }
                }
            }

            if self.eof {
                self.done = true;
                self.timer.finish();
                debug!(
                    "scanner reached end of stream at byte {} after {} read(s)",
                    self.offset, self.counters.reads
                );
                if self.token.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(self.finish_token(0)));
            }

            self.fill()?;
        }
    }

    fn finish_token(&mut self, delimiter_len: usize) -> String {
        let token = mem::take(&mut self.token);
        self.counters.add_token(token.len(), delimiter_len);
        trace!("token of {} bytes ends at byte {}", token.len(), self.offset);
        token
    }

    /// Move the unconsumed tail to the front and read after it.
    fn fill(&mut self) -> Result<(), StreamError> {
        let rem = self.filled - self.pos;
        if rem > 0 {
            self.buf.copy_within(self.pos..self.filled, 0);
            self.counters.add_carry_over();
            trace!("carrying {} byte(s) of a split character at byte {}", rem, self.offset);
        }
        self.pos = 0;
        self.filled = rem;

        let started = Instant::now();
        let n = loop {
            match self.reader.read(&mut self.buf[rem..]) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.done = true;
                    self.timer.finish();
                    return Err(StreamError::Io(e));
                }
            }
        };
        self.timer.add_stage_time(Stage::Read, started.elapsed());
        self.counters.add_read(n);

        self.filled = rem + n;
        if n == 0 {
            self.eof = true;
        }
        Ok(())
    }

    pub(crate) fn note_record(&mut self, decode_time: Duration) {
        self.counters.add_record();
        self.timer.add_stage_time(Stage::Decode, decode_time);
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Bytes scanned so far. A carried-over partial character counts once it completes.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn counters(&self) -> &DecodeCounters {
        &self.counters
    }

    pub fn telemetry(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(&self.counters, &self.timer)
    }

    /// Give back the reader. Bytes already buffered but not scanned are lost.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> Iterator for DelimiterScanner<R> {
    type Item = Result<String, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}
