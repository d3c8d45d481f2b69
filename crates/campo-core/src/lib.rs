//! # campo-core: Pure Business Logic for Campo Admin
//!
//! Everything the store back-office computes lives here as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Campo Admin Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 campo CLI (apps/cli)                            │   │
//! │  │    products, customers, sales, quotations, audits, dashboard   │   │
//! │  └───────────────┬───────────────────────────────┬─────────────────┘   │
//! │                  │                               │                      │
//! │  ┌───────────────▼────────────┐   ┌──────────────▼────────────────┐    │
//! │  │  campo-db (local ledger)   │   │  campo-client (REST backend)  │    │
//! │  └───────────────┬────────────┘   └──────────────┬────────────────┘    │
//! │                  │                               │                      │
//! │  ┌───────────────▼───────────────────────────────▼─────────────────┐   │
//! │  │               ★ campo-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │  money   │ │   cash   │ │  drafts  │ │ search / summary │  │   │
//! │  │   │  Money   │ │reconcile │ │ forms    │ │  filters, stats  │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Customer, Sale, Quotation, CashAuditRecord)
//! - [`money`] - Money type with integer arithmetic
//! - [`cash`] - Denomination totalizer and reconciliation engine
//! - [`line_items`] - Line-item totals shared by sales and quotations
//! - [`drafts`] - Form state for audits, sales, quotations, products, customers
//! - [`search`] - Case-insensitive list filters
//! - [`summary`] - Page and dashboard statistics
//! - [`validation`] - Input-boundary parsing and business rule checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use campo_core::cash::{reconcile, DenominationCount};
//! use campo_core::{AuditStatus, Money};
//!
//! let mut bills = DenominationCount::bills();
//! bills.set(50_000, 2);
//!
//! let result = reconcile(
//!     Money::from_major(100_000),
//!     &bills,
//!     &DenominationCount::coins(),
//!     Money::zero(),
//! );
//!
//! assert_eq!(result.difference, Money::zero());
//! assert_eq!(result.status, AuditStatus::Balanced);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cash;
pub mod drafts;
pub mod error;
pub mod line_items;
pub mod money;
pub mod search;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cash::{reconcile, DenominationCount, Reconciliation};
pub use error::{CoreError, CoreResult, ValidationError};
pub use line_items::{line_items_total, LineItem};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Store name printed on quotations and audit headers.
pub const STORE_NAME: &str = "AGRO INSUMOS EL CAMPO";

/// Store tagline shown under the name on quotations.
pub const STORE_TAGLINE: &str = "EL ALIADO PARA TUS CULTIVOS";

/// Bill face values counted in a cash audit, largest first.
pub const BILL_DENOMINATIONS: [u32; 7] = [100_000, 50_000, 20_000, 10_000, 5_000, 2_000, 1_000];

/// Coin face values counted in a cash audit, largest first.
pub const COIN_DENOMINATIONS: [u32; 5] = [1_000, 500, 200, 100, 50];

/// Upper bound on a single denomination count.
///
/// Keeps `face × count` far away from `i64` overflow in the totalizer.
pub const MAX_DENOMINATION_COUNT: u32 = 1_000_000;

/// Largest face value accepted as a denomination label.
pub const MAX_FACE_VALUE: u32 = 1_000_000;

/// Largest quantity on a single sale or quotation line.
pub const MAX_ITEM_QUANTITY: u32 = 100_000;

/// Largest amount accepted anywhere an amount is entered: balances,
/// transfers, prices, documents, and the total of a sale or quotation.
///
/// Ten trillion pesos. Sums of a few bounded amounts stay inside `i64`,
/// and the cent count stays below 2^53 so the decimal wire form is exact.
pub const MAX_AMOUNT: Money = Money::from_major(10_000_000_000_000);

/// Barcodes are EAN-13 sized at most.
pub const BARCODE_LENGTH: usize = 13;

/// Products with fewer units than this are flagged on the inventory page.
pub const LOW_STOCK_THRESHOLD: i64 = 20;
