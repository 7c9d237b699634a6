use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{LedgerError, Result};
use crate::format::generate_pay_id;
use crate::ledger::{Invoice, InvoiceId, InvoiceStatus, InvoiceType};

pub const STORE_FILE: &str = "invoices.toml";

/// File-backed invoice repository.
///
/// Reads hand out copies; every mutation returns the record as stored so callers can
/// recompute from a fresh snapshot instead of holding on to stale data.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct InvoiceStore {
    #[serde(default)]
    invoices: Vec<Invoice>,
}

/// Fields supplied when recording a new invoice
#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub invoice_type: InvoiceType,
    pub status: InvoiceStatus,
    pub amount: Option<Decimal>,
    pub due_date: Option<NaiveDate>,
    pub company_name: Option<String>,
    pub contact_name: Option<String>,
    pub invoice_number: Option<String>,
    pub pay_id: Option<String>,
    pub abn: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
}

impl InvoiceStore {
    /// Load `invoices.toml` (empty store if missing)
    pub fn load(config_dir: &Path) -> Result<Self> {
        let path = config_dir.join(STORE_FILE);
        if !path.exists() {
            debug!("No invoice store at {}, starting empty", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        let store: Self =
            toml::from_str(&content).map_err(|e| LedgerError::ConfigParse { path, source: e })?;
        debug!("Loaded {} invoices", store.invoices.len());
        Ok(store)
    }

    pub fn save(&self, config_dir: &Path) -> Result<()> {
        let path = config_dir.join(STORE_FILE);
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        debug!("Wrote {} invoices to {}", self.invoices.len(), path.display());
        Ok(())
    }

    pub fn all(&self) -> Vec<Invoice> {
        self.invoices.clone()
    }

    pub fn by_type(&self, invoice_type: InvoiceType) -> Vec<Invoice> {
        self.invoices
            .iter()
            .filter(|i| i.invoice_type == invoice_type)
            .cloned()
            .collect()
    }

    pub fn by_status(
        &self,
        status: InvoiceStatus,
        invoice_type: Option<InvoiceType>,
    ) -> Vec<Invoice> {
        self.invoices
            .iter()
            .filter(|i| i.status == status)
            .filter(|i| invoice_type.map_or(true, |t| i.invoice_type == t))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: InvoiceId) -> Result<Invoice> {
        self.invoices
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or(LedgerError::InvoiceNotFound(id))
    }

    fn next_id(&self) -> InvoiceId {
        self.invoices.iter().map(|i| i.id).max().unwrap_or(0) + 1
    }

    pub fn create(&mut self, new: NewInvoice, pay_id_domain: &str) -> Invoice {
        let pay_id = new.pay_id.or_else(|| {
            new.invoice_number
                .as_deref()
                .map(|number| generate_pay_id(number, pay_id_domain))
                .filter(|p| !p.is_empty())
        });

        let invoice = Invoice {
            id: self.next_id(),
            invoice_type: new.invoice_type,
            status: new.status,
            amount: new.amount,
            due_date: new.due_date,
            paid_date: None,
            company_name: new.company_name,
            contact_name: new.contact_name,
            invoice_number: new.invoice_number,
            pay_id,
            abn: new.abn,
            email: new.email,
            mobile: new.mobile,
        };
        debug!("Created invoice {}", invoice.id);
        self.invoices.push(invoice.clone());
        invoice
    }

    /// Change an invoice's status; `paid_date` is set to `today` only for `Paid`
    pub fn update_status(
        &mut self,
        id: InvoiceId,
        status: InvoiceStatus,
        today: NaiveDate,
    ) -> Result<Invoice> {
        let invoice = self
            .invoices
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(LedgerError::InvoiceNotFound(id))?;

        invoice.status = status;
        invoice.paid_date = (status == InvoiceStatus::Paid).then_some(today);
        debug!("Invoice {id} is now {status}");
        Ok(invoice.clone())
    }

    pub fn delete(&mut self, id: InvoiceId) -> Result<Invoice> {
        let idx = self
            .invoices
            .iter()
            .position(|i| i.id == id)
            .ok_or(LedgerError::InvoiceNotFound(id))?;
        debug!("Deleted invoice {id}");
        Ok(self.invoices.remove(idx))
    }
}
