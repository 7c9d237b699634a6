pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod ledger;

pub use config::{Config, InvoiceStore, NewInvoice};
pub use error::{LedgerError, Result};
pub use ledger::{
    apply, summarize, Invoice, InvoiceFilter, InvoiceId, InvoiceStatus, InvoiceType,
    LedgerSummary, SortConfig, SortDirection, SortKey, StatusTab,
};
