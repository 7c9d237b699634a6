use serde::{Deserialize, Serialize};

use crate::format::{CURRENCY_SYMBOL, DEFAULT_DATE_FORMAT};

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub company: Company,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub invoice: InvoiceSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Company {
    pub name: String,
    #[serde(default)]
    pub abn: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DisplaySettings {
    pub currency_symbol: String,
    /// Fraction digits for money columns (2 for cents, 0 for whole dollars)
    pub decimals: u32,
    pub date_format: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            currency_symbol: CURRENCY_SYMBOL.to_string(),
            decimals: 2,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct InvoiceSettings {
    /// Domain used when generating a PayID for new invoices
    pub pay_id_domain: String,
}

impl Default for InvoiceSettings {
    fn default() -> Self {
        Self {
            pay_id_domain: "clearitt.com".to_string(),
        }
    }
}
