mod settings;
pub mod store;

pub use settings::{Company, Config, DisplaySettings, InvoiceSettings};
pub use store::{InvoiceStore, NewInvoice, STORE_FILE};

use crate::error::{LedgerError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE: &str = "config.toml";

/// Get the config directory path (XDG config dir, or ~/.ledger/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "ledger") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = std::env::var_os("HOME").map(PathBuf::from).ok_or_else(|| {
        LedgerError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".ledger"))
}

/// Load the main config.toml
pub fn load_config(config_dir: &Path) -> Result<Config> {
    let path = config_dir.join(CONFIG_FILE);
    if !path.exists() {
        return Err(LedgerError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    let config = toml::from_str(&content).map_err(|e| LedgerError::ConfigParse { path, source: e })?;
    debug!("Loaded config from {}", config_dir.display());
    Ok(config)
}

/// Create the config directory with a template config and an empty store
pub fn init_config_dir(config_dir: &Path) -> Result<()> {
    if config_dir.exists() {
        return Err(LedgerError::AlreadyInitialized(config_dir.to_path_buf()));
    }

    fs::create_dir_all(config_dir)?;
    fs::write(config_dir.join(CONFIG_FILE), CONFIG_TEMPLATE)?;
    InvoiceStore::default().save(config_dir)?;
    Ok(())
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[company]
name = "Your Company Pty Ltd"
# abn = "51824753556"          # optional, shown as 51 824 753 556

[display]
currency_symbol = "$"
decimals = 2                   # 0 for whole dollars
date_format = "%d %b %Y"       # e.g. 16 Oct 2026

[invoice]
pay_id_domain = "clearitt.com" # new invoices get asp<number>@<domain>
"#;
