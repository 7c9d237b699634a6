//! CSV export of an invoice view.

use serde::Serialize;
use std::io::Write;
use tracing::debug;

use crate::error::Result;
use crate::format::format_abn;
use crate::ledger::Invoice;

/// One exported row; money stays a plain decimal so spreadsheets can sum it
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    id: u32,
    #[serde(rename = "type")]
    invoice_type: &'a str,
    status: &'a str,
    invoice_number: &'a str,
    company_name: &'a str,
    contact_name: &'a str,
    amount: String,
    due_date: String,
    paid_date: String,
    pay_id: &'a str,
    abn: String,
    email: &'a str,
    mobile: &'a str,
}

impl<'a> From<&'a Invoice> for CsvRow<'a> {
    fn from(invoice: &'a Invoice) -> Self {
        fn text(field: &Option<String>) -> &str {
            field.as_deref().unwrap_or_default()
        }

        Self {
            id: invoice.id,
            invoice_type: invoice.invoice_type.as_str(),
            status: invoice.status.as_str(),
            invoice_number: text(&invoice.invoice_number),
            company_name: text(&invoice.company_name),
            contact_name: text(&invoice.contact_name),
            amount: invoice
                .amount
                .map(|a| a.round_dp(2).to_string())
                .unwrap_or_default(),
            due_date: invoice.due_date.map(|d| d.to_string()).unwrap_or_default(),
            paid_date: invoice.paid_date.map(|d| d.to_string()).unwrap_or_default(),
            pay_id: text(&invoice.pay_id),
            abn: invoice.abn.as_deref().map(format_abn).unwrap_or_default(),
            email: text(&invoice.email),
            mobile: text(&invoice.mobile),
        }
    }
}

/// Column names, in `CsvRow` field order
const HEADER: [&str; 13] = [
    "id",
    "type",
    "status",
    "invoice_number",
    "company_name",
    "contact_name",
    "amount",
    "due_date",
    "paid_date",
    "pay_id",
    "abn",
    "email",
    "mobile",
];

/// Write invoices as CSV with a header row, even for an empty view; returns the number of
/// rows written
pub fn write_csv<W: Write>(invoices: &[Invoice], out: W) -> Result<usize> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);
    writer.write_record(HEADER)?;
    for invoice in invoices {
        writer.serialize(CsvRow::from(invoice))?;
    }
    writer.flush()?;
    debug!("Exported {} invoices to CSV", invoices.len());
    Ok(invoices.len())
}
