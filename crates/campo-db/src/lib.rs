//! # campo-db: Local Ledger for Campo Admin
//!
//! SQLite storage (via sqlx) for cash audits, sales and quotations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Campo Admin Data Flow                            │
//! │                                                                         │
//! │  campo CLI (audits new ...)                                            │
//! │       │                                                                 │
//! │       │  CashAuditDraft::submit() ──► CashAuditRecord                  │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     campo-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌──────────────────┐  ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories    │  │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│  CashAuditRepo   │  │  (embedded)  │  │   │
//! │  │   │  SqlitePool   │    │  SaleRepo        │  │ 001_initial  │  │   │
//! │  │   │               │    │  QuotationRepo   │  │              │  │   │
//! │  │   └───────────────┘    └──────────────────┘  └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file  (<data dir>/campo.db or CAMPO_DB_PATH)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use campo_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("campo.db")).await?;
//! db.cash_audits().insert(&record).await?;
//! let audits = db.cash_audits().list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::cash_audit::CashAuditRepository;
pub use repository::quotation::QuotationRepository;
pub use repository::sale::SaleRepository;
