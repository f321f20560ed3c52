// Stable public API: one entry point per direction, format chosen by `CodecConfig`.

use std::io::{Read, Write};

use crate::{
    config::CodecConfig,
    record::Record,
    stream::{
        binary::BinaryStreamDecoder,
        delimited::DelimitedStreamDecoder,
        encode::{write_binary_stream, write_delimited_stream},
    },
    telemetry::{DecodeCounters, TelemetrySnapshot},
    types::{collect_records, PartialDecode, StreamError},
};

/// A decoder for whichever format the config names.
#[derive(Debug)]
pub enum RecordDecoder<R, T> {
    Binary(BinaryStreamDecoder<R, T>),
    Delimited(DelimitedStreamDecoder<R, T>),
}

impl<R: Read, T: Record> RecordDecoder<R, T> {
    pub fn counters(&self) -> &DecodeCounters {
        match self {
            RecordDecoder::Binary(d) => d.counters(),
            RecordDecoder::Delimited(d) => d.counters(),
        }
    }

    pub fn telemetry(&self) -> TelemetrySnapshot {
        match self {
            RecordDecoder::Binary(d) => d.telemetry(),
            RecordDecoder::Delimited(d) => d.telemetry(),
        }
    }

    pub fn into_inner(self) -> R {
        match self {
            RecordDecoder::Binary(d) => d.into_inner(),
            RecordDecoder::Delimited(d) => d.into_inner(),
        }
    }
}

impl<R: Read, T: Record> Iterator for RecordDecoder<R, T> {
    type Item = Result<T, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            RecordDecoder::Binary(d) => d.next(),
            RecordDecoder::Delimited(d) => d.next(),
        }
    }
}

/// Validate `config` and build the matching decoder over `reader`.
pub fn open_decoder<R: Read, T: Record>(
    reader: R,
    config: &CodecConfig,
) -> Result<RecordDecoder<R, T>, StreamError> {
    config.validate()?;

    let decoder = match config.format.token_format() {
        None => RecordDecoder::Binary(BinaryStreamDecoder::new(reader)),
        Some(format) => RecordDecoder::Delimited(DelimitedStreamDecoder::with_capacity(
            reader,
            format,
            config.delimiter,
            config.read_buffer_size,
        )?),
    };
    Ok(decoder)
}

/// Decode every record in `reader`.
///
/// Stops at the first error; the records before it are returned in the `PartialDecode`.
pub fn decode_stream<R: Read, T: Record>(
    reader: R,
    config: &CodecConfig,
) -> Result<Vec<T>, PartialDecode<T>> {
    decode_stream_with_telemetry(reader, config).map(|(records, _)| records)
}

/// As `decode_stream`, also returning the decoder's telemetry.
pub fn decode_stream_with_telemetry<R: Read, T: Record>(
    reader: R,
    config: &CodecConfig,
) -> Result<(Vec<T>, TelemetrySnapshot), PartialDecode<T>> {
    let mut decoder = open_decoder(reader, config)
        .map_err(|error| PartialDecode { records: Vec::new(), error })?;
    let records = collect_records(&mut decoder)?;
    Ok((records, decoder.telemetry()))
}

/// Encode `records` into `writer` in the configured format. Returns bytes written.
pub fn encode_stream<'a, W, T, I>(
    writer: &mut W,
    records: I,
    config: &CodecConfig,
) -> Result<u64, StreamError>
where
    W: Write + ?Sized,
    T: Record + 'a,
    I: IntoIterator<Item = &'a T>,
{
    config.validate()?;

    match config.format.token_format() {
        None => write_binary_stream(writer, records),
        Some(format) => write_delimited_stream(writer, records, format, config.delimiter),
    }
}
