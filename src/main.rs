use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use std::fs::File;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing::{debug, trace, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use invoice_ledger::config::{config_dir, init_config_dir, load_config, Config, InvoiceStore, NewInvoice};
use invoice_ledger::error::{LedgerError, Result};
use invoice_ledger::export::write_csv;
use invoice_ledger::format::{format_abn, format_currency_with, format_date, parse_amount};
use invoice_ledger::ledger::dates::{relative_day_label, settlement_message};
use invoice_ledger::ledger::selection::{select_all, selected_or_all, selection_summary};
use invoice_ledger::ledger::summary::{status_counts, status_total};
use invoice_ledger::ledger::{
    apply, classify_due_date, next_settlement_date, summarize, Invoice, InvoiceFilter,
    InvoiceId, InvoiceStatus, InvoiceType, SortConfig, SortDirection, SortKey, StatusTab,
};

#[derive(Parser)]
#[command(name = "ledger")]
#[command(version, about = "Receivables, payables and weekly settlement tracking", long_about = None)]
struct Cli {
    /// Path to config directory (default: XDG config dir or ~/.ledger)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// Date to treat as today, YYYY-MM-DD (default: local date)
    #[arg(long, global = true, env = "LEDGER_TODAY")]
    today: Option<String>,

    /// Log level when RUST_LOG is not set (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Commands,
}

/// Filter and sort options shared by list and export
#[derive(Args, Debug)]
struct ViewArgs {
    /// Only receivable or payable invoices
    #[arg(short = 't', long = "type")]
    invoice_type: Option<String>,

    /// Status tab: all, paid, unpaid, overdue, clearing, mismatch, scheduled
    #[arg(short, long, default_value = "all")]
    status: String,

    /// Match company, invoice number, contact or email (case-insensitive)
    #[arg(long)]
    search: Option<String>,

    /// Sort column (amount, dueDate, paidDate, companyName, invoiceNumber, ...)
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    desc: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template config and empty invoice store
    Init,

    /// Show receivable and payable totals with the settlement countdown
    Summary {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show when the next weekly settlement runs
    Settlement,

    /// List invoices
    List {
        #[command(flatten)]
        view: ViewArgs,

        /// Number of invoices to show (default: all)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show a single invoice
    Show {
        id: InvoiceId,
    },

    /// Record a new invoice
    Add {
        /// receivable or payable
        #[arg(short = 't', long = "type")]
        invoice_type: String,

        /// Invoice amount (e.g. 1250.00 or $1,250.00)
        #[arg(short, long)]
        amount: String,

        #[arg(short, long, default_value = "unpaid")]
        status: String,

        #[arg(long)]
        company: Option<String>,

        #[arg(long)]
        contact: Option<String>,

        /// Invoice number (also used to generate the PayID)
        #[arg(long)]
        number: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        #[arg(long)]
        abn: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        mobile: Option<String>,

        /// Explicit PayID (default: generated from the invoice number)
        #[arg(long)]
        pay_id: Option<String>,
    },

    /// Change an invoice's status
    SetStatus {
        id: InvoiceId,
        status: String,
    },

    /// Delete an invoice
    Delete {
        id: InvoiceId,
    },

    /// Export invoices as CSV
    Export {
        #[command(flatten)]
        view: ViewArgs,

        /// Only export these invoice ids (can be repeated)
        #[arg(long = "select", value_name = "ID")]
        select: Vec<InvoiceId>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.log_level);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber.
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!(
            "invoice_ledger={},{}={}",
            level,
            env!("CARGO_CRATE_NAME"),
            level
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };
    let today = match cli.today.as_deref() {
        Some(s) => parse_date(s)?,
        None => chrono::Local::now().date_naive(),
    };
    debug!("Config directory {}, today is {today}", cfg_dir.display());

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Summary { json } => cmd_summary(&cfg_dir, today, json),
        Commands::Settlement => cmd_settlement(&cfg_dir, today),
        Commands::List { view, limit } => cmd_list(&cfg_dir, today, &view, limit),
        Commands::Show { id } => cmd_show(&cfg_dir, today, id),
        Commands::Add {
            invoice_type,
            amount,
            status,
            company,
            contact,
            number,
            due,
            abn,
            email,
            mobile,
            pay_id,
        } => {
            let new = NewInvoice {
                invoice_type: invoice_type.parse()?,
                status: status.parse()?,
                amount: Some(
                    parse_amount(&amount).ok_or_else(|| LedgerError::InvalidAmount(amount.clone()))?,
                ),
                due_date: due.as_deref().map(parse_date).transpose()?,
                company_name: company,
                contact_name: contact,
                invoice_number: number,
                pay_id,
                abn,
                email,
                mobile,
            };
            cmd_add(&cfg_dir, new)
        }
        Commands::SetStatus { id, status } => cmd_set_status(&cfg_dir, today, id, &status),
        Commands::Delete { id } => cmd_delete(&cfg_dir, id),
        Commands::Export {
            view,
            select,
            output,
        } => cmd_export(&cfg_dir, &view, &select, output.as_deref()),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| LedgerError::InvalidDate(s.to_string()))
}

fn ensure_initialized(cfg_dir: &Path) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(LedgerError::ConfigNotFound(cfg_dir.to_path_buf()));
    }
    Ok(())
}

/// Format money using the configured symbol and precision
fn money(config: &Config, amount: Decimal) -> String {
    format_currency_with(
        amount,
        config.display.decimals,
        &config.display.currency_symbol,
    )
}

/// Initialize config directory
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    init_config_dir(cfg_dir)?;

    println!("Initialized ledger config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Edit your company details:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!("  2. Record an invoice:          ledger add --type receivable --amount 1250 --company \"Acme\"");
    println!("  3. Check the overview:         ledger summary");

    Ok(())
}

/// Show the metric block and settlement banner
fn cmd_summary(cfg_dir: &Path, today: NaiveDate, json: bool) -> Result<()> {
    ensure_initialized(cfg_dir)?;

    let config = load_config(cfg_dir)?;
    let store = InvoiceStore::load(cfg_dir)?;
    let summary = summarize(&store.all());

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let r = &summary.receivables;
    let p = &summary.payables;

    match config.company.abn.as_deref() {
        Some(abn) => println!(
            "Financial Overview - {} (ABN {})",
            config.company.name,
            format_abn(abn)
        ),
        None => println!("Financial Overview - {}", config.company.name),
    }
    println!("{}", "-".repeat(50));
    println!(
        "Total receivables:  {} ({} invoices)",
        money(&config, r.total),
        r.count
    );
    println!("  Clearing:         {}", money(&config, r.clearing));
    println!("  Paid:             {}", money(&config, r.paid));
    println!("  Overdue:          {}", money(&config, r.overdue));
    println!(
        "Total payables:     {} ({} invoices)",
        money(&config, p.total),
        p.count
    );
    println!("  Clearing:         {}", money(&config, p.clearing));
    println!("  Unpaid:           {}", money(&config, p.unpaid));
    println!("  Overdue:          {}", money(&config, p.overdue));
    println!("Net receivable:     {}", money(&config, summary.net_receivable));
    println!();
    println!("{}", settlement_message(today));
    println!(
        "Next settlement:    {}",
        next_settlement_date(today).format("%A, %d %b %Y")
    );

    Ok(())
}

/// Show the settlement banner and what is expected to clear
fn cmd_settlement(cfg_dir: &Path, today: NaiveDate) -> Result<()> {
    ensure_initialized(cfg_dir)?;

    let config = load_config(cfg_dir)?;
    let store = InvoiceStore::load(cfg_dir)?;
    let summary = summarize(&store.all());

    println!("{}", settlement_message(today));
    println!(
        "Next settlement:    {}",
        next_settlement_date(today).format("%A, %d %b %Y")
    );
    println!("Weekly settlement:  every Friday");
    println!(
        "Clearing in:        {}",
        money(&config, summary.receivables.clearing)
    );
    println!(
        "Clearing out:       {}",
        money(&config, summary.payables.clearing)
    );

    Ok(())
}

// Table row structs for tabled
#[derive(Tabled)]
struct InvoiceRow {
    #[tabled(rename = "ID")]
    id: InvoiceId,
    #[tabled(rename = "INVOICE #")]
    number: String,
    #[tabled(rename = "COMPANY")]
    company: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
    #[tabled(rename = "DUE")]
    due: String,
    #[tabled(rename = "DUE STATUS")]
    due_status: String,
    #[tabled(rename = "PAID")]
    paid: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "TYPE")]
    invoice_type: String,
}

/// Snapshot plus filter and sort resolved from the command line
struct View {
    snapshot: Vec<Invoice>,
    filter: InvoiceFilter,
    sort: SortConfig,
}

fn resolve_view(store: &InvoiceStore, args: &ViewArgs) -> Result<View> {
    let invoice_type: Option<InvoiceType> =
        args.invoice_type.as_deref().map(str::parse::<InvoiceType>).transpose()?;
    let status_tab: StatusTab = args.status.parse()?;
    let sort = match args.sort.as_deref() {
        Some(key) => {
            let direction = if args.desc {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            };
            SortConfig::new(key.parse::<SortKey>()?, direction)
        }
        None => SortConfig::default(),
    };

    let snapshot = match invoice_type {
        Some(t) => store.by_type(t),
        None => store.all(),
    };
    trace!("{args:?} -> {sort:?}");

    Ok(View {
        snapshot,
        filter: InvoiceFilter {
            status_tab,
            search_text: args.search.clone(),
        },
        sort,
    })
}

/// List invoices with due badges, tab counts and status totals
fn cmd_list(cfg_dir: &Path, today: NaiveDate, args: &ViewArgs, limit: Option<usize>) -> Result<()> {
    ensure_initialized(cfg_dir)?;

    let config = load_config(cfg_dir)?;
    let store = InvoiceStore::load(cfg_dir)?;
    let view = resolve_view(&store, args)?;
    let rows_view = apply(&view.snapshot, &view.filter, &view.sort);

    if rows_view.is_empty() {
        println!("No invoices found.");
        return Ok(());
    }

    let shown = match limit {
        Some(n) => &rows_view[..n.min(rows_view.len())],
        None => &rows_view[..],
    };

    let fmt = &config.display.date_format;
    let rows: Vec<InvoiceRow> = shown
        .iter()
        .map(|inv| InvoiceRow {
            id: inv.id,
            number: inv.invoice_number.clone().unwrap_or_else(|| "-".to_string()),
            company: inv.company_name.clone().unwrap_or_else(|| "-".to_string()),
            amount: money(&config, inv.amount_or_zero()),
            due: format_date(inv.due_date, fmt),
            due_status: match inv.due_date {
                Some(due) if inv.status != InvoiceStatus::Paid => format!(
                    "{} ({})",
                    classify_due_date(Some(due), today),
                    relative_day_label(due, today)
                ),
                _ => classify_due_date(inv.due_date, today).to_string(),
            },
            paid: format_date(inv.paid_date, fmt),
            status: inv.status.label().to_string(),
            invoice_type: inv.invoice_type.to_string(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    println!();
    let shown_total = shown
        .iter()
        .map(Invoice::amount_or_zero)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    println!(
        "Showing {} of {} invoices  Total: {}",
        shown.len(),
        view.snapshot.len(),
        money(&config, shown_total)
    );

    let counts = status_counts(&view.snapshot);
    let tabs: Vec<String> = counts
        .by_status
        .iter()
        .map(|(status, n)| format!("{status} {n}"))
        .collect();
    println!("Tabs: all {} | {}", counts.all, tabs.join(" | "));

    // Totals cover the whole type, like the tab counts, not just the current tab

    println!(
        "Past due: {}  Still to pay: {}  Scheduled: {}  Clearing: {}",
        money(&config, status_total(&view.snapshot, InvoiceStatus::Overdue)),
        money(&config, status_total(&view.snapshot, InvoiceStatus::Unpaid)),
        money(&config, status_total(&view.snapshot, InvoiceStatus::Scheduled)),
        money(&config, status_total(&view.snapshot, InvoiceStatus::Clearing)),
    );

    Ok(())
}

/// Show one invoice in detail
fn cmd_show(cfg_dir: &Path, today: NaiveDate, id: InvoiceId) -> Result<()> {
    ensure_initialized(cfg_dir)?;

    let config = load_config(cfg_dir)?;
    let store = InvoiceStore::load(cfg_dir)?;
    let inv = store.get(id)?;
    let fmt = &config.display.date_format;
    let text = |field: &Option<String>| field.clone().unwrap_or_else(|| "-".to_string());

    println!("Invoice {}", inv.id);
    println!("{}", "-".repeat(50));
    println!("Type:        {}", inv.invoice_type);
    println!("Status:      {}", inv.status.label());
    println!("Number:      {}", text(&inv.invoice_number));
    println!("Company:     {}", text(&inv.company_name));
    println!("Contact:     {}", text(&inv.contact_name));
    println!("Amount:      {}", money(&config, inv.amount_or_zero()));
    println!(
        "Due:         {} ({})",
        format_date(inv.due_date, fmt),
        classify_due_date(inv.due_date, today)
    );
    println!("Paid:        {}", format_date(inv.paid_date, fmt));
    println!("PayID:       {}", text(&inv.pay_id));
    println!(
        "ABN:         {}",
        inv.abn.as_deref().map(format_abn).unwrap_or_else(|| "-".to_string())
    );
    println!("Email:       {}", text(&inv.email));
    println!("Mobile:      {}", text(&inv.mobile));

    Ok(())
}

/// Record a new invoice
fn cmd_add(cfg_dir: &Path, new: NewInvoice) -> Result<()> {
    ensure_initialized(cfg_dir)?;

    let config = load_config(cfg_dir)?;
    let mut store = InvoiceStore::load(cfg_dir)?;
    let created = store.create(new, &config.invoice.pay_id_domain);
    store.save(cfg_dir)?;

    println!(
        "Created invoice {} ({}, {}, {})",
        created.id,
        created.invoice_type,
        created.status,
        money(&config, created.amount_or_zero())
    );
    if let Some(pay_id) = &created.pay_id {
        println!("  PayID: {pay_id}");
    }

    Ok(())
}

/// Change an invoice's status
fn cmd_set_status(cfg_dir: &Path, today: NaiveDate, id: InvoiceId, status: &str) -> Result<()> {
    ensure_initialized(cfg_dir)?;

    let status: InvoiceStatus = status.parse()?;
    let mut store = InvoiceStore::load(cfg_dir)?;
    let updated = store.update_status(id, status, today)?;
    store.save(cfg_dir)?;

    println!("Invoice {} status updated to {}", updated.id, updated.status);
    if let Some(paid) = updated.paid_date {
        println!("  Paid on: {paid}");
    }

    Ok(())
}

fn cmd_delete(cfg_dir: &Path, id: InvoiceId) -> Result<()> {
    ensure_initialized(cfg_dir)?;

    let mut store = InvoiceStore::load(cfg_dir)?;
    let removed = store.delete(id)?;
    store.save(cfg_dir)?;

    println!("Deleted invoice {}", removed.id);
    Ok(())
}

/// Export the filtered view, or just the selected rows of it, as CSV
fn cmd_export(
    cfg_dir: &Path,
    args: &ViewArgs,
    select: &[InvoiceId],
    output: Option<&Path>,
) -> Result<()> {
    ensure_initialized(cfg_dir)?;

    let store = InvoiceStore::load(cfg_dir)?;
    let view = resolve_view(&store, args)?;
    let rows_view = apply(&view.snapshot, &view.filter, &view.sort);

    let selection = select_all(select.iter().copied());
    for id in &selection {
        if !rows_view.iter().any(|inv| inv.id == *id) {
            warn!("Selected invoice {id} is not in the filtered view");
        }
    }
    debug!("{:?}", selection_summary(&selection, rows_view.len()));
    let to_export = selected_or_all(&rows_view, &selection);

    match output {
        Some(path) => {
            let count = write_csv(&to_export, File::create(path)?)?;
            println!("Exported {} invoices to {}", count, path.display());
        }
        None => {
            write_csv(&to_export, std::io::stdout().lock())?;
        }
    }

    Ok(())
}
