use std::path::PathBuf;
use thiserror::Error;

use crate::ledger::InvoiceId;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Config directory not found at {0}. Run 'ledger init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize invoice store: {0}")]
    StoreSerialize(#[from] toml::ser::Error),

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Invoice with id {0} not found")]
    InvoiceNotFound(InvoiceId),

    #[error("Unknown sort key '{0}'. Use amount, dueDate, paidDate, companyName, contactName, invoiceNumber, payId, abn, email, mobile, status or type.")]
    UnknownSortKey(String),

    #[error("Unknown invoice status '{0}'. Use paid, unpaid, overdue, clearing, mismatch or scheduled.")]
    UnknownStatus(String),

    #[error("Unknown invoice type '{0}'. Use 'receivable' or 'payable'.")]
    UnknownInvoiceType(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD.")]
    InvalidDate(String),

    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
