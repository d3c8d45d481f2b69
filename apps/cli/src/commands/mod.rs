//! # Commands Module
//!
//! One module per command group. Each operation takes only the state it
//! needs and returns a report; [`execute`] picks the state, runs the
//! operation and renders the report.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Group        Backend (campo-client)      Ledger (campo-db)             │
//! │  ──────────   ──────────────────────      ─────────────────             │
//! │  login        POST /auth/login                                          │
//! │  products     /api/productos                                            │
//! │  customers    /api/clientes                                             │
//! │  sales                                    sales, sale_items             │
//! │  quotations                               quotations, quotation_items   │
//! │  audits                                   cash_audits                   │
//! │  dashboard    products + customers        sales                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod cash_audit;
pub mod customer;
pub mod dashboard;
pub mod product;
pub mod quotation;
pub mod sale;

use campo_client::DeleteOutcome;
use serde::Serialize;
use serde_json::Value;

use crate::cli::{
    AuditCommand, Cli, Commands, CustomerCommand, ProductCommand, QuotationCommand, SaleCommand,
};
use crate::error::ApiResult;
use crate::output::{emit, Render};
use crate::state::{ConfigState, DbState};

/// Report for a backend DELETE.
#[derive(Debug, Clone, Serialize)]
pub struct Deleted {
    pub resource: &'static str,
    pub id: String,
    /// Body the backend answered with, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
}

impl Deleted {
    pub fn new(resource: &'static str, id: &str, outcome: DeleteOutcome) -> Self {
        let response = match outcome {
            DeleteOutcome::Deleted => None,
            DeleteOutcome::Body(body) => Some(body),
        };
        Deleted {
            resource,
            id: id.trim().to_string(),
            response,
        }
    }
}

impl Render for Deleted {
    fn render(&self, _config: &ConfigState) -> String {
        match &self.response {
            None => format!("{} {} deleted.", self.resource, self.id),
            Some(body) => format!("{} {} deleted. Backend answered: {}", self.resource, self.id, body),
        }
    }
}

async fn open_ledger(config: &ConfigState) -> ApiResult<DbState> {
    DbState::open(config.config().database_path()).await
}

/// Runs one parsed command and returns its rendered output.
pub async fn execute(cli: Cli, mut config: ConfigState) -> ApiResult<String> {
    let json = cli.json;

    match cli.command {
        Commands::Login(args) => {
            let report = auth::login(&mut config, args).await?;
            emit(&report, &config, json)
        }

        Commands::Products(command) => {
            let client = config.backend()?;
            match command {
                ProductCommand::List(args) => {
                    emit(&product::list(&client, args.search.as_deref()).await?, &config, json)
                }
                ProductCommand::Add(args) => emit(&product::add(&client, args).await?, &config, json),
                ProductCommand::Update(args) => {
                    emit(&product::update(&client, args).await?, &config, json)
                }
                ProductCommand::Delete { id } => {
                    emit(&product::delete(&client, &id).await?, &config, json)
                }
            }
        }

        Commands::Customers(command) => {
            let client = config.backend()?;
            match command {
                CustomerCommand::List(args) => {
                    emit(&customer::list(&client, args.search.as_deref()).await?, &config, json)
                }
                CustomerCommand::Add(args) => emit(&customer::add(&client, args).await?, &config, json),
                CustomerCommand::Update(args) => {
                    emit(&customer::update(&client, args).await?, &config, json)
                }
                CustomerCommand::Delete { id } => {
                    emit(&customer::delete(&client, &id).await?, &config, json)
                }
            }
        }

        Commands::Sales(command) => {
            let db = open_ledger(&config).await?;
            match command {
                SaleCommand::List(args) => {
                    emit(&sale::list(&db, args.search.as_deref()).await?, &config, json)
                }
                SaleCommand::New(args) => emit(&sale::create(&db, args).await?, &config, json),
                SaleCommand::Show { id } => emit(&sale::show(&db, &id).await?, &config, json),
            }
        }

        Commands::Quotations(command) => {
            let db = open_ledger(&config).await?;
            match command {
                QuotationCommand::List(args) => {
                    emit(&quotation::list(&db, args.search.as_deref()).await?, &config, json)
                }
                QuotationCommand::New(args) => {
                    emit(&quotation::create(&db, args).await?, &config, json)
                }
                QuotationCommand::Show { id } => {
                    emit(&quotation::show(&db, &id).await?, &config, json)
                }
                QuotationCommand::Status { id, status } => {
                    emit(&quotation::set_status(&db, &id, status).await?, &config, json)
                }
            }
        }

        Commands::Audits(command) => {
            let db = open_ledger(&config).await?;
            match command {
                AuditCommand::List(args) => {
                    emit(&cash_audit::list(&db, args.search.as_deref()).await?, &config, json)
                }
                AuditCommand::New(args) => emit(&cash_audit::create(&db, args).await?, &config, json),
                AuditCommand::Show { id } => emit(&cash_audit::show(&db, &id).await?, &config, json),
            }
        }

        Commands::Dashboard => {
            let client = config.backend()?;
            let db = open_ledger(&config).await?;
            let report = dashboard::show(&client, &db, config.store_name()).await?;
            emit(&report, &config, json)
        }
    }
}
