//! record/mod.rs
//! Invoice record type and its binary/text serializer.

pub mod types;
pub mod serializer;

pub use types::{Address, Invoice, InvoiceLine};
pub use serializer::{EncodingError, Record};
