use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;

/// Identifier assigned by the invoice store
pub type InvoiceId = u32;

/// Whether an invoice is owed to the business or by it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceType {
    Receivable,
    Payable,
}

impl InvoiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceType::Receivable => "receivable",
            InvoiceType::Payable => "payable",
        }
    }
}

impl fmt::Display for InvoiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "receivable" | "receivables" => Ok(InvoiceType::Receivable),
            "payable" | "payables" => Ok(InvoiceType::Payable),
            _ => Err(LedgerError::UnknownInvoiceType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Paid,
    Unpaid,
    Overdue,
    /// Payment initiated but not yet settled
    Clearing,
    Mismatch,
    Scheduled,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 6] = [
        InvoiceStatus::Paid,
        InvoiceStatus::Unpaid,
        InvoiceStatus::Overdue,
        InvoiceStatus::Clearing,
        InvoiceStatus::Mismatch,
        InvoiceStatus::Scheduled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Unpaid => "unpaid",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Clearing => "clearing",
            InvoiceStatus::Mismatch => "mismatch",
            InvoiceStatus::Scheduled => "scheduled",
        }
    }

    /// Human-facing badge label
    pub fn label(&self) -> &'static str {
        match self {
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Unpaid => "Unpaid",
            InvoiceStatus::Overdue => "Overdue",
            InvoiceStatus::Clearing => "Set to Clear",
            InvoiceStatus::Mismatch => "Mismatch",
            InvoiceStatus::Scheduled => "Scheduled",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        InvoiceStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| LedgerError::UnknownStatus(s.to_string()))
    }
}

/// An invoice record as held by the store.
///
/// The ledger core only ever reads these. Every optional field degrades gracefully:
/// a missing amount counts as zero and missing text never matches a search.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Invoice {
    pub id: InvoiceId,
    #[serde(rename = "type")]
    pub invoice_type: InvoiceType,
    pub status: InvoiceStatus,
    #[serde(
        default,
        with = "amount_serde",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
}

impl Invoice {
    /// A bare invoice with only the required fields set
    pub fn new(id: InvoiceId, invoice_type: InvoiceType, status: InvoiceStatus) -> Self {
        Self {
            id,
            invoice_type,
            status,
            amount: None,
            due_date: None,
            paid_date: None,
            company_name: None,
            contact_name: None,
            invoice_number: None,
            pay_id: None,
            abn: None,
            email: None,
            mobile: None,
        }
    }

    /// The amount used in every calculation; absent amounts are zero
    pub fn amount_or_zero(&self) -> Decimal {
        self.amount.unwrap_or(Decimal::ZERO)
    }
}

/// Amounts are written as plain decimal strings and read leniently: numbers, strings with
/// `$` and thousands separators, or nothing at all. Anything unparseable reads as absent.
mod amount_serde {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::format::parse_amount;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(amount) => serializer.serialize_str(&amount.normalize().to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawAmount>::deserialize(deserializer)?;
        let text = match raw {
            None => return Ok(None),
            Some(RawAmount::Number(n)) => n.to_string(),
            Some(RawAmount::Text(s)) => s,
        };
        let parsed = parse_amount(&text);
        if parsed.is_none() && !text.trim().is_empty() {
            tracing::warn!("Ignoring unparseable invoice amount '{text}'");
        }
        Ok(parsed)
    }
}
