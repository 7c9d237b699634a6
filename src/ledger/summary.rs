use rust_decimal::Decimal;
use serde::Serialize;

use super::invoice::{Invoice, InvoiceStatus, InvoiceType};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReceivablesSummary {
    pub total: Decimal,
    pub count: usize,
    pub clearing: Decimal,
    pub paid: Decimal,
    pub overdue: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PayablesSummary {
    pub total: Decimal,
    pub count: usize,
    pub clearing: Decimal,
    pub unpaid: Decimal,
    pub overdue: Decimal,
}

/// Totals for the overview metrics.
///
/// `total` for each side is the sum of every invoice of that type. The status buckets only
/// track the statuses shown on the dashboard, so they need not add up to `total`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    pub receivables: ReceivablesSummary,
    pub payables: PayablesSummary,
    pub net_receivable: Decimal,
}

/// Fold an invoice collection into a [`LedgerSummary`].
///
/// Sums are exact decimals, so the result does not depend on iteration order. Totals beyond
/// the `Decimal` range saturate at `Decimal::MAX` / `Decimal::MIN`.
pub fn summarize(invoices: &[Invoice]) -> LedgerSummary {
    let mut summary = invoices
        .iter()
        .fold(LedgerSummary::default(), |mut acc, invoice| {
            let amount = invoice.amount_or_zero();
            match invoice.invoice_type {
                InvoiceType::Receivable => {
                    let r = &mut acc.receivables;
                    r.total = r.total.saturating_add(amount);
                    r.count += 1;
                    match invoice.status {
                        InvoiceStatus::Clearing => r.clearing = r.clearing.saturating_add(amount),
                        InvoiceStatus::Paid => r.paid = r.paid.saturating_add(amount),
                        InvoiceStatus::Overdue => r.overdue = r.overdue.saturating_add(amount),
                        _ => {}
                    }
                }
                InvoiceType::Payable => {
                    let p = &mut acc.payables;
                    p.total = p.total.saturating_add(amount);
                    p.count += 1;
                    match invoice.status {
                        InvoiceStatus::Clearing => p.clearing = p.clearing.saturating_add(amount),
                        InvoiceStatus::Unpaid => p.unpaid = p.unpaid.saturating_add(amount),
                        InvoiceStatus::Overdue => p.overdue = p.overdue.saturating_add(amount),
                        _ => {}
                    }
                }
            }
            acc
        });

    summary.net_receivable = summary
        .receivables
        .total
        .saturating_sub(summary.payables.total);
    summary
}

/// Sum of amounts over invoices with the given status
pub fn status_total(invoices: &[Invoice], status: InvoiceStatus) -> Decimal {
    invoices
        .iter()
        .filter(|invoice| invoice.status == status)
        .map(Invoice::amount_or_zero)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Invoice counts for the status tabs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub all: usize,
    pub by_status: Vec<(InvoiceStatus, usize)>,
}

impl StatusCounts {
    pub fn get(&self, status: InvoiceStatus) -> usize {
        self.by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map_or(0, |(_, n)| *n)
    }
}

pub fn status_counts(invoices: &[Invoice]) -> StatusCounts {
    let by_status = InvoiceStatus::ALL
        .into_iter()
        .map(|status| {
            let n = invoices.iter().filter(|i| i.status == status).count();
            (status, n)
        })
        .collect();

    StatusCounts {
        all: invoices.len(),
        by_status,
    }
}
