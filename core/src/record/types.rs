//! record/types.rs
//! The invoice record carried by every stream format.
//!
//! The codec treats these as opaque payloads: the subtotal/total relations
//! are maintained by whoever builds the record and are never checked here.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// One invoice: owner, address, ordered line items and totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub invoicee: String,
    pub address: Address,
    #[serde(default)]
    pub invoice_lines: Vec<InvoiceLine>,
    pub subtotal: f32,
    pub tax_pct: f32,
    pub total: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub house_number: i32,
    pub street: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    pub product_name: String,
    pub price: f32,
    pub quantity: i32,
}

impl InvoiceLine {
    /// Line amount before tax.
    pub fn amount(&self) -> f32 {
        self.price * self.quantity as f32
    }
}

impl Invoice {
    /// Sum of all line amounts, in line order.
    pub fn line_total(&self) -> f32 {
        self.invoice_lines.iter().map(InvoiceLine::amount).sum()
    }

    /// Name of the first NaN or infinite float field, if any.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        let totals = [
            ("subtotal", self.subtotal),
            ("taxPct", self.tax_pct),
            ("total", self.total),
        ];
        totals
            .into_iter()
            .chain(self.invoice_lines.iter().map(|line| ("invoiceLines.price", line.price)))
            .find(|(_, value)| !value.is_finite())
            .map(|(field, _)| field)
    }
}
