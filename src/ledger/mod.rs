pub mod dates;
mod invoice;
pub mod selection;
pub mod summary;
pub mod view;

pub use dates::{
    classify_due_date, days_until_settlement, is_overdue, is_settlement_day_today,
    next_settlement_date, DueDateStatus,
};
pub use invoice::{Invoice, InvoiceId, InvoiceStatus, InvoiceType};
pub use selection::{SelectionSet, SelectionSummary};
pub use summary::{summarize, LedgerSummary};
pub use view::{apply, InvoiceFilter, SortConfig, SortDirection, SortKey, StatusTab};
