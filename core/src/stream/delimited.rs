//! Delimited text record streams: one token per record, tokens separated by
//! a single delimiter character.

use std::io::Read;
use std::marker::PhantomData;
use std::time::Instant;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine as _;
use log::{debug, trace, warn};

use crate::config::ConfigError;
use crate::constants::DEFAULT_DELIMITER;
use crate::record::{EncodingError, Record};
use crate::stream::scanner::DelimiterScanner;
use crate::telemetry::{DecodeCounters, TelemetrySnapshot};
use crate::types::{collect_records, PartialDecode, StreamError};

/// How a single token maps to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenFormat {
    /// The record's structured text form.
    Text,
    /// Unpadded standard base64 of the record's binary form.
    Base64,
}

impl TokenFormat {
    pub fn encode_token<T: Record>(self, record: &T) -> Result<String, EncodingError> {
        match self {
            TokenFormat::Text => record.text_encode(),
            TokenFormat::Base64 => Ok(STANDARD_NO_PAD.encode(record.binary_encode()?)),
        }
    }

    /// Whether `token` carries no record. Whitespace between JSON documents is
    /// insignificant, so blank text lines are skipped; base64 tokens never are.
    pub fn is_blank(self, token: &str) -> bool {
        match self {
            TokenFormat::Text => token.trim().is_empty(),
            TokenFormat::Base64 => false,
        }
    }

    pub fn decode_token<T: Record>(self, token: &str) -> Result<T, EncodingError> {
        match self {
            TokenFormat::Text => T::text_decode(token),
            TokenFormat::Base64 => T::binary_decode(&STANDARD_NO_PAD.decode(token)?),
        }
    }
}

/// Decodes each scanner token into a record.
#[derive(Debug)]
pub struct DelimitedStreamDecoder<R, T> {
    scanner: DelimiterScanner<R>,
    format: TokenFormat,
    index: usize,
    done: bool,
    _record: PhantomData<fn() -> T>,
}

impl<R: Read, T: Record> DelimitedStreamDecoder<R, T> {
    /// Newline-delimited stream.
    pub fn new(reader: R, format: TokenFormat) -> Self {
        Self::with_delimiter(reader, format, DEFAULT_DELIMITER)
    }

    pub fn with_delimiter(reader: R, format: TokenFormat, delimiter: char) -> Self {
        Self::from_scanner(DelimiterScanner::with_delimiter(reader, delimiter), format)
    }

    pub fn with_capacity(
        reader: R,
        format: TokenFormat,
        delimiter: char,
        capacity: usize,
    ) -> Result<Self, ConfigError> {
        Ok(Self::from_scanner(
            DelimiterScanner::with_capacity(reader, delimiter, capacity)?,
            format,
        ))
    }

    pub fn from_scanner(scanner: DelimiterScanner<R>, format: TokenFormat) -> Self {
        Self {
            scanner,
            format,
            index: 0,
            done: false,
            _record: PhantomData,
        }
    }

    pub fn next_record(&mut self) -> Result<Option<T>, StreamError> {
        let token = loop {
            let Some(token) = self.scanner.next_token()? else {
                return Ok(None);
            };
            if !self.format.is_blank(&token) {
                break token;
            }
            trace!("skipping blank token before record {}", self.index);
        };

        let started = Instant::now();
        let record = self
            .format
            .decode_token(&token)
            .map_err(|e| StreamError::encoding(self.index, e))?;
        self.scanner.note_record(started.elapsed());

        self.index += 1;
        Ok(Some(record))
    }

    pub fn format(&self) -> TokenFormat {
        self.format
    }

    pub fn records_decoded(&self) -> usize {
        self.index
    }

    pub fn offset(&self) -> u64 {
        self.scanner.offset()
    }

    pub fn counters(&self) -> &DecodeCounters {
        self.scanner.counters()
    }

    pub fn telemetry(&self) -> TelemetrySnapshot {
        self.scanner.telemetry()
    }

    pub fn into_inner(self) -> R {
        self.scanner.into_inner()
    }
}

impl<R: Read, T: Record> Iterator for DelimitedStreamDecoder<R, T> {
    type Item = Result<T, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                debug!("{:?} stream complete: {} record(s)", self.format, self.index);
                None
            }
            Err(e) => {
                self.done = true;
                warn!("{:?} stream aborted after {} record(s): {}", self.format, self.index, e);
                Some(Err(e))
            }
        }
    }
}

/// Decode a whole delimited stream.
pub fn decode_delimited_stream<R: Read, T: Record>(
    reader: R,
    format: TokenFormat,
    delimiter: char,
) -> Result<Vec<T>, PartialDecode<T>> {
    collect_records(DelimitedStreamDecoder::with_delimiter(reader, format, delimiter))
}
