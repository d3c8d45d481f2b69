//! CLI definitions using clap derive API.
//!
//! Free-form entries (`--bill`, `--item`, `--document`, amounts) are parsed
//! with `campo-core`'s input-boundary parsers, so malformed numbers are
//! rejected before any command runs.

use campo_core::drafts::{parse_document_entry, parse_quotation_item_entry, parse_sale_item_entry};
use campo_core::cash::parse_denomination_entry;
use campo_core::validation::{parse_amount, ValidationResult};
use campo_core::{Money, PaymentMethod, QuotationItem, QuotationStatus, SaleItem};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Campo Admin - back-office for AGRO INSUMOS EL CAMPO
#[derive(Parser, Debug)]
#[command(
    name = "campo",
    author,
    version,
    about = "Back-office tools: inventory, customers, sales, quotations and cash audits",
    after_help = "EXAMPLES:\n    \
                  campo products list --search urea\n    \
                  campo sales new --customer \"Juan Pérez\" --payment cash --item \"Urea 46%=2@25.5\"\n    \
                  campo audits new --employee Tatiana --initial-balance 200000 --bill 100000=6 --bill 1000=1\n    \
                  campo --json dashboard"
)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "CAMPO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in to the backend and save the access token
    Login(LoginArgs),

    /// Inventory (backend)
    #[command(subcommand)]
    Products(ProductCommand),

    /// Customers (backend)
    #[command(subcommand)]
    Customers(CustomerCommand),

    /// Sales (local ledger)
    #[command(subcommand)]
    Sales(SaleCommand),

    /// Quotations (local ledger)
    #[command(subcommand)]
    Quotations(QuotationCommand),

    /// Cash-register audits (local ledger)
    #[command(subcommand)]
    Audits(AuditCommand),

    /// Store overview: products, month sales, today's sales, customers
    Dashboard,
}

impl Commands {
    /// Command group name, for logs. Arguments are left out since they
    /// may carry credentials.
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Login(_) => "login",
            Commands::Products(_) => "products",
            Commands::Customers(_) => "customers",
            Commands::Sales(_) => "sales",
            Commands::Quotations(_) => "quotations",
            Commands::Audits(_) => "audits",
            Commands::Dashboard => "dashboard",
        }
    }

    /// Whether the command talks to the REST backend.
    pub fn uses_backend(&self) -> bool {
        matches!(
            self,
            Commands::Login(_) | Commands::Products(_) | Commands::Customers(_) | Commands::Dashboard
        )
    }
}

#[derive(Args, Debug, Clone)]
pub struct LoginArgs {
    #[arg(long, short)]
    pub username: String,

    #[arg(long, short, env = "CAMPO_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Case-insensitive substring filter shared by every `list`.
#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    #[arg(long, short)]
    pub search: Option<String>,
}

// =============================================================================
// Products
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum ProductCommand {
    List(SearchArgs),
    Add(ProductAddArgs),
    Update(ProductUpdateArgs),
    Delete {
        /// Product id (`producto_id`)
        id: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ProductAddArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub category: String,

    #[arg(long, value_parser = parse_price)]
    pub price: Money,

    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub stock: i64,

    /// Sale unit ("bulto", "litro", "kg")
    #[arg(long, default_value = "unidad")]
    pub unit: String,

    /// Generated (13 digits) when omitted
    #[arg(long)]
    pub barcode: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ProductUpdateArgs {
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long, value_parser = parse_price)]
    pub price: Option<Money>,

    #[arg(long, allow_negative_numbers = true)]
    pub stock: Option<i64>,

    #[arg(long)]
    pub unit: Option<String>,

    #[arg(long)]
    pub barcode: Option<String>,
}

// =============================================================================
// Customers
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum CustomerCommand {
    List(SearchArgs),
    Add(CustomerAddArgs),
    Update(CustomerUpdateArgs),
    Delete {
        /// Customer id (`cliente_id`)
        id: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct CustomerAddArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    #[arg(long, default_value = "")]
    pub address: String,
}

#[derive(Args, Debug, Clone)]
pub struct CustomerUpdateArgs {
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub address: Option<String>,
}

// =============================================================================
// Sales
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum SaleCommand {
    List(SearchArgs),
    New(SaleNewArgs),
    Show { id: String },
}

#[derive(Args, Debug, Clone)]
pub struct SaleNewArgs {
    #[arg(long)]
    pub customer: String,

    /// cash | card | transfer (Spanish labels accepted)
    #[arg(long, default_value = "cash")]
    pub payment: PaymentMethod,

    /// Line item as "name=qty@price", repeatable
    #[arg(long = "item", value_parser = parse_sale_item_entry, required = true)]
    pub items: Vec<SaleItem>,
}

// =============================================================================
// Quotations
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum QuotationCommand {
    List(SearchArgs),
    New(QuotationNewArgs),
    Show {
        id: String,
    },
    /// Change a quotation's status
    Status {
        id: String,
        /// pending | approved | rejected
        status: QuotationStatus,
    },
}

#[derive(Args, Debug, Clone)]
pub struct QuotationNewArgs {
    #[arg(long)]
    pub customer: String,

    #[arg(long, default_value = "")]
    pub address: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    /// Customer document (cédula / NIT)
    #[arg(long, default_value = "")]
    pub document: String,

    /// Line item as "code:name=qty@price", repeatable
    #[arg(long = "item", value_parser = parse_quotation_item_entry, required = true)]
    pub items: Vec<QuotationItem>,
}

// =============================================================================
// Cash Audits
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum AuditCommand {
    List(SearchArgs),
    New(AuditNewArgs),
    Show { id: String },
}

#[derive(Args, Debug, Clone)]
pub struct AuditNewArgs {
    #[arg(long)]
    pub employee: String,

    /// Opening balance (the expected total)
    #[arg(long, value_parser = parse_balance)]
    pub initial_balance: Money,

    /// Bill count as "face=count", repeatable
    #[arg(long = "bill", value_parser = parse_denomination_entry)]
    pub bills: Vec<(u32, u32)>,

    /// Coin count as "face=count", repeatable
    #[arg(long = "coin", value_parser = parse_denomination_entry)]
    pub coins: Vec<(u32, u32)>,

    #[arg(long, value_parser = parse_transfers, default_value = "0")]
    pub transfers: Money,

    /// Ancillary document as "concept=value", repeatable
    #[arg(long = "document", value_parser = parse_document_entry)]
    pub documents: Vec<(String, Money)>,

    /// Print the summary without saving
    #[arg(long)]
    pub dry_run: bool,
}

fn parse_price(text: &str) -> ValidationResult<Money> {
    parse_amount("price", text)
}

fn parse_balance(text: &str) -> ValidationResult<Money> {
    parse_amount("initial balance", text)
}

fn parse_transfers(text: &str) -> ValidationResult<Money> {
    parse_amount("transfers", text)
}
