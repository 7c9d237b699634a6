//! Filtering and sorting of invoice collections for tabular display.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::invoice::{Invoice, InvoiceStatus};
use crate::error::LedgerError;

/// Columns an invoice list can be sorted by.
///
/// Each key belongs to exactly one comparison family; see [`SortKey::compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Amount,
    DueDate,
    PaidDate,
    CompanyName,
    ContactName,
    InvoiceNumber,
    PayId,
    Abn,
    Email,
    Mobile,
    Status,
    Type,
}

impl SortKey {
    pub const ALL: [SortKey; 12] = [
        SortKey::Amount,
        SortKey::DueDate,
        SortKey::PaidDate,
        SortKey::CompanyName,
        SortKey::ContactName,
        SortKey::InvoiceNumber,
        SortKey::PayId,
        SortKey::Abn,
        SortKey::Email,
        SortKey::Mobile,
        SortKey::Status,
        SortKey::Type,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Amount => "amount",
            SortKey::DueDate => "dueDate",
            SortKey::PaidDate => "paidDate",
            SortKey::CompanyName => "companyName",
            SortKey::ContactName => "contactName",
            SortKey::InvoiceNumber => "invoiceNumber",
            SortKey::PayId => "payId",
            SortKey::Abn => "abn",
            SortKey::Email => "email",
            SortKey::Mobile => "mobile",
            SortKey::Status => "status",
            SortKey::Type => "type",
        }
    }

    /// Ascending three-way comparison of two invoices on this key
    pub fn compare(&self, a: &Invoice, b: &Invoice) -> Ordering {
        match self {
            SortKey::Amount => a.amount_or_zero().cmp(&b.amount_or_zero()),
            SortKey::DueDate => date_or_epoch(a.due_date).cmp(&date_or_epoch(b.due_date)),
            SortKey::PaidDate => date_or_epoch(a.paid_date).cmp(&date_or_epoch(b.paid_date)),
            _ => self.text(a).cmp(&self.text(b)),
        }
    }

    fn text(&self, invoice: &Invoice) -> String {
        let value = match self {
            SortKey::CompanyName => invoice.company_name.as_deref(),
            SortKey::ContactName => invoice.contact_name.as_deref(),
            SortKey::InvoiceNumber => invoice.invoice_number.as_deref(),
            SortKey::PayId => invoice.pay_id.as_deref(),
            SortKey::Abn => invoice.abn.as_deref(),
            SortKey::Email => invoice.email.as_deref(),
            SortKey::Mobile => invoice.mobile.as_deref(),
            SortKey::Status => Some(invoice.status.as_str()),
            SortKey::Type => Some(invoice.invoice_type.as_str()),
            SortKey::Amount | SortKey::DueDate | SortKey::PaidDate => None,
        };
        value.unwrap_or_default().to_lowercase()
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = LedgerError;

    /// Accepts `dueDate`, `due_date` and `due-date` alike
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str().to_lowercase() == folded)
            .ok_or_else(|| LedgerError::UnknownSortKey(s.to_string()))
    }
}

fn date_or_epoch(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortConfig {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self {
            key: Some(key),
            direction,
        }
    }

    /// Column-header click: the same key flips direction, a new key starts ascending
    pub fn toggle(self, key: SortKey) -> Self {
        let direction = match (self.key, self.direction) {
            (Some(current), SortDirection::Asc) if current == key => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        Self::new(key, direction)
    }
}

/// Which status tab is active
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusTab {
    #[default]
    All,
    Only(InvoiceStatus),
}

impl FromStr for StatusTab {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusTab::All);
        }
        s.parse().map(StatusTab::Only)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceFilter {
    pub status_tab: StatusTab,
    pub search_text: Option<String>,
}

impl InvoiceFilter {
    pub fn matches(&self, invoice: &Invoice) -> bool {
        if let StatusTab::Only(status) = self.status_tab {
            if invoice.status != status {
                return false;
            }
        }

        let Some(needle) = self.search_text.as_deref().filter(|s| !s.is_empty()) else {
            return true;
        };
        let needle = needle.to_lowercase();

        [
            &invoice.company_name,
            &invoice.invoice_number,
            &invoice.contact_name,
            &invoice.email,
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Filter then sort a snapshot of invoices.
///
/// With no sort key the surviving invoices keep their input order. Sorting is stable, so
/// ties also keep input order in either direction.
pub fn apply(invoices: &[Invoice], filter: &InvoiceFilter, sort: &SortConfig) -> Vec<Invoice> {
    let mut view: Vec<Invoice> = invoices
        .iter()
        .filter(|invoice| filter.matches(invoice))
        .cloned()
        .collect();

    if let Some(key) = sort.key {
        view.sort_by(|a, b| {
            let ord = key.compare(a, b);
            match sort.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
    }

    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::invoice::InvoiceType;

    fn with_amount(id: u32, amount: Option<i64>) -> Invoice {
        let mut inv = Invoice::new(id, InvoiceType::Receivable, InvoiceStatus::Unpaid);
        inv.amount = amount.map(Decimal::from);
        inv
    }

    fn named(id: u32, status: InvoiceStatus, company: Option<&str>) -> Invoice {
        let mut inv = Invoice::new(id, InvoiceType::Receivable, status);
        inv.company_name = company.map(str::to_string);
        inv
    }

    fn ids(invoices: &[Invoice]) -> Vec<u32> {
        invoices.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_no_filter_no_sort_is_identity() {
        let invoices = vec![with_amount(3, Some(1)), with_amount(1, None), with_amount(2, Some(9))];
        let view = apply(&invoices, &InvoiceFilter::default(), &SortConfig::default());
        assert_eq!(view, invoices);
    }

    #[test]
    fn test_sort_by_amount_treats_missing_as_zero() {
        let invoices = vec![
            with_amount(1, Some(50)),
            with_amount(2, Some(5)),
            with_amount(3, None),
        ];
        let filter = InvoiceFilter::default();

        let asc = apply(&invoices, &filter, &SortConfig::new(SortKey::Amount, SortDirection::Asc));
        assert_eq!(ids(&asc), vec![3, 2, 1]);

        let desc = apply(&invoices, &filter, &SortConfig::new(SortKey::Amount, SortDirection::Desc));
        assert_eq!(ids(&desc), vec![1, 2, 3]);
    }

    #[test]
    fn test_ties_keep_input_order_both_directions() {
        let invoices = vec![
            with_amount(1, Some(10)),
            with_amount(2, Some(10)),
            with_amount(3, Some(5)),
            with_amount(4, Some(10)),
        ];
        let filter = InvoiceFilter::default();

        let asc = apply(&invoices, &filter, &SortConfig::new(SortKey::Amount, SortDirection::Asc));
        assert_eq!(ids(&asc), vec![3, 1, 2, 4]);

        let desc = apply(&invoices, &filter, &SortConfig::new(SortKey::Amount, SortDirection::Desc));
        assert_eq!(ids(&desc), vec![1, 2, 4, 3]);
    }

    #[test]
    fn test_sort_by_due_date_missing_sorts_first() {
        let mut a = with_amount(1, None);
        a.due_date = NaiveDate::from_ymd_opt(2026, 3, 1);
        let mut b = with_amount(2, None);
        b.due_date = NaiveDate::from_ymd_opt(2025, 12, 24);
        let c = with_amount(3, None);

        let view = apply(
            &[a, b, c],
            &InvoiceFilter::default(),
            &SortConfig::new(SortKey::DueDate, SortDirection::Asc),
        );
        assert_eq!(ids(&view), vec![3, 2, 1]);
    }

    #[test]
    fn test_string_sort_is_case_insensitive() {
        let invoices = vec![
            named(1, InvoiceStatus::Paid, Some("beta pty")),
            named(2, InvoiceStatus::Paid, Some("Alpha Ltd")),
            named(3, InvoiceStatus::Paid, None),
            named(4, InvoiceStatus::Paid, Some("CHARLIE")),
        ];
        let view = apply(
            &invoices,
            &InvoiceFilter::default(),
            &SortConfig::new(SortKey::CompanyName, SortDirection::Asc),
        );
        assert_eq!(ids(&view), vec![3, 2, 1, 4]);
    }

    #[test]
    fn test_status_tab_filter() {
        let invoices = vec![
            named(1, InvoiceStatus::Paid, None),
            named(2, InvoiceStatus::Overdue, None),
            named(3, InvoiceStatus::Paid, None),
        ];
        let filter = InvoiceFilter {
            status_tab: StatusTab::Only(InvoiceStatus::Paid),
            search_text: None,
        };
        assert_eq!(ids(&apply(&invoices, &filter, &SortConfig::default())), vec![1, 3]);
    }

    #[test]
    fn test_search_is_case_insensitive_and_skips_missing_fields() {
        let mut by_email = named(3, InvoiceStatus::Unpaid, None);
        by_email.email = Some("accounts@abc.example".to_string());
        let mut by_number = named(4, InvoiceStatus::Unpaid, None);
        by_number.invoice_number = Some("INV-ABC-1".to_string());
        let mut by_mobile_only = named(5, InvoiceStatus::Unpaid, None);
        by_mobile_only.mobile = Some("abc".to_string());

        let invoices = vec![
            named(1, InvoiceStatus::Unpaid, Some("abc corp")),
            named(2, InvoiceStatus::Unpaid, Some("Other Co")),
            by_email,
            by_number,
            by_mobile_only,
            named(6, InvoiceStatus::Unpaid, None),
        ];
        let filter = InvoiceFilter {
            status_tab: StatusTab::All,
            search_text: Some("ABC".to_string()),
        };
        assert_eq!(
            ids(&apply(&invoices, &filter, &SortConfig::default())),
            vec![1, 3, 4]
        );
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let invoices = vec![named(1, InvoiceStatus::Paid, None)];
        let filter = InvoiceFilter {
            status_tab: StatusTab::All,
            search_text: Some(String::new()),
        };
        assert_eq!(apply(&invoices, &filter, &SortConfig::default()).len(), 1);
    }

    #[test]
    fn test_sort_config_toggle() {
        let config = SortConfig::default().toggle(SortKey::Amount);
        assert_eq!(config, SortConfig::new(SortKey::Amount, SortDirection::Asc));

        let config = config.toggle(SortKey::Amount);
        assert_eq!(config.direction, SortDirection::Desc);

        let config = config.toggle(SortKey::Amount);
        assert_eq!(config.direction, SortDirection::Asc);

        let config = config.toggle(SortKey::Amount).toggle(SortKey::DueDate);
        assert_eq!(config, SortConfig::new(SortKey::DueDate, SortDirection::Asc));
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("dueDate".parse::<SortKey>().unwrap(), SortKey::DueDate);
        assert_eq!("due_date".parse::<SortKey>().unwrap(), SortKey::DueDate);
        assert_eq!("company-name".parse::<SortKey>().unwrap(), SortKey::CompanyName);
        assert!(matches!(
            "bogus".parse::<SortKey>(),
            Err(LedgerError::UnknownSortKey(_))
        ));
    }

    #[test]
    fn test_status_tab_parsing() {
        assert_eq!("all".parse::<StatusTab>().unwrap(), StatusTab::All);
        assert_eq!(
            "Clearing".parse::<StatusTab>().unwrap(),
            StatusTab::Only(InvoiceStatus::Clearing)
        );
        assert!("archived".parse::<StatusTab>().is_err());
    }
}
