// Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::io::{self, Read};

use record_codec::record::{Address, EncodingError, Invoice, InvoiceLine, Record};

pub const CHUNK_SIZES: [usize; 5] = [1, 3, 7, 128, 4096];

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Reader that hands out at most `chunk` bytes per `read` call.
pub struct ChunkedReader {
    data: Vec<u8>,
    pos: usize,
    chunk: usize,
}

impl ChunkedReader {
    pub fn new(data: impl Into<Vec<u8>>, chunk: usize) -> Self {
        Self { data: data.into(), pos: 0, chunk }
    }
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.chunk.min(buf.len()).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Reader that serves `data`, then fails with `kind` instead of reporting EOF.
pub struct FailingReader {
    data: io::Cursor<Vec<u8>>,
    kind: io::ErrorKind,
}

impl FailingReader {
    pub fn new(data: impl Into<Vec<u8>>, kind: io::ErrorKind) -> Self {
        Self { data: io::Cursor::new(data.into()), kind }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.read(buf)? {
            0 => Err(io::Error::new(self.kind, "source went away")),
            n => Ok(n),
        }
    }
}

/// Record whose binary form is its own bytes and whose text form is its own UTF-8.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPayload(pub Vec<u8>);

impl Record for RawPayload {
    fn binary_encode(&self) -> Result<Vec<u8>, EncodingError> {
        Ok(self.0.clone())
    }

    fn binary_decode(bytes: &[u8]) -> Result<Self, EncodingError> {
        Ok(RawPayload(bytes.to_vec()))
    }

    fn text_encode(&self) -> Result<String, EncodingError> {
        Ok(String::from_utf8_lossy(&self.0).into_owned())
    }

    fn text_decode(text: &str) -> Result<Self, EncodingError> {
        Ok(RawPayload(text.as_bytes().to_vec()))
    }
}

pub fn invoice(invoicee: &str) -> Invoice {
    let lines = vec![
        InvoiceLine { product_name: "Hagelslag".into(), price: 3.25, quantity: 2 },
        InvoiceLine { product_name: "Drop 日本".into(), price: 0.99, quantity: 10 },
    ];
    let subtotal: f32 = lines.iter().map(InvoiceLine::amount).sum();
    Invoice {
        invoicee: invoicee.into(),
        address: Address {
            house_number: 221,
            street: "Prinsengracht".into(),
            postal_code: "1016HK".into(),
            country: "Nederland".into(),
        },
        invoice_lines: lines,
        subtotal,
        tax_pct: 0.09,
        total: subtotal * 1.09,
    }
}

/// Invoices whose text and binary forms are full of multi-byte characters.
pub fn invoices(n: usize) -> Vec<Invoice> {
    (0..n)
        .map(|i| match i % 3 {
            0 => invoice(&format!("\u{E001}fred日本{i}")),
            1 => invoice(&format!("\u{E001}日本john{i}")),
            _ => invoice(&format!("Zoë 😀 {i}")),
        })
        .collect()
}
