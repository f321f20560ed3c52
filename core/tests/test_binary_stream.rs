mod common;

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};

    use record_codec::record::Invoice;
    use record_codec::stream::{decode_binary_stream, write_binary_stream, BinaryStreamDecoder};
    use record_codec::types::StreamError;

    use crate::common::{init_logging, invoices, ChunkedReader, FailingReader, RawPayload, CHUNK_SIZES};

    fn encode(records: &[Invoice]) -> Vec<u8> {
        let mut wire = Vec::new();
        let written = write_binary_stream(&mut wire, records).unwrap();
        assert_eq!(written as usize, wire.len());
        wire
    }

    #[test]
    fn concatenated_frames_decode_in_order() {
        init_logging();
        let records = invoices(25);
        let wire = encode(&records);

        for chunk in CHUNK_SIZES {
            let out: Vec<Invoice> = decode_binary_stream(ChunkedReader::new(wire.clone(), chunk)).unwrap();
            assert_eq!(out, records, "chunk size {chunk}");
        }
    }

    #[test]
    fn empty_stream_yields_nothing() {
        let out: Vec<Invoice> = decode_binary_stream(Cursor::new(Vec::new())).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn truncation_mid_payload_is_short_read() {
        let records = invoices(3);
        let mut wire = encode(&records);
        wire.pop();

        let err = decode_binary_stream::<_, Invoice>(Cursor::new(wire)).unwrap_err();
        assert_eq!(err.records, &records[..2]);
        match err.error {
            StreamError::ShortRead { expected, actual, .. } => assert_eq!(actual + 1, expected),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn truncation_mid_prefix_is_malformed_frame() {
        let records = invoices(2);
        let mut wire = encode(&records);
        let frame_end = wire.len();
        wire.extend_from_slice(&[0, 0]);

        for chunk in [1, 4096] {
            let err = decode_binary_stream::<_, Invoice>(ChunkedReader::new(wire.clone(), chunk)).unwrap_err();
            assert_eq!(err.records, records);
            assert!(matches!(
                err.error,
                StreamError::MalformedFrame { offset, have: 2 } if offset == frame_end as u64
            ));
        }
    }

    #[test]
    fn declared_length_beyond_stream_is_short_read() {
        // claims 4 GiB, delivers 3 bytes
        let wire = vec![0xFF, 0xFF, 0xFF, 0xFF, 1, 2, 3];
        let err = decode_binary_stream::<_, RawPayload>(Cursor::new(wire)).unwrap_err();
        assert!(err.records.is_empty());
        assert!(matches!(
            err.error,
            StreamError::ShortRead { offset: 4, expected: 0xFFFF_FFFF, actual: 3 }
        ));
    }

    #[test]
    fn garbage_payload_is_invalid_encoding() {
        let records = invoices(1);
        let mut wire = encode(&records);
        wire.extend_from_slice(&[0, 0, 0, 2, 0xFF, 0xFF]);

        let err = decode_binary_stream::<_, Invoice>(Cursor::new(wire)).unwrap_err();
        assert_eq!(err.records, records);
        assert!(matches!(err.error, StreamError::InvalidEncoding { index: 1, .. }));
    }

    #[test]
    fn reader_errors_are_propagated() {
        let records = invoices(2);
        let wire = encode(&records);

        let err = decode_binary_stream::<_, Invoice>(FailingReader::new(wire, io::ErrorKind::ConnectionReset))
            .unwrap_err();
        assert_eq!(err.records, records);
        match err.error {
            StreamError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::ConnectionReset),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn stream_is_borrowed_not_consumed() {
        let records = invoices(2);
        let mut wire = encode(&records);
        wire.extend_from_slice(b"tail");
        let mut cursor = Cursor::new(wire);

        let mut dec = BinaryStreamDecoder::<_, Invoice>::new(&mut cursor);
        assert_eq!(dec.next_record().unwrap().unwrap(), records[0]);
        assert_eq!(dec.next_record().unwrap().unwrap(), records[1]);
        let consumed = dec.offset();
        assert_eq!(dec.records_decoded(), 2);
        drop(dec);

        assert_eq!(cursor.position(), consumed);
    }
}
