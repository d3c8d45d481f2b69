//! # Domain Types
//!
//! Core domain types used throughout Campo Admin.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  REST backend (campo-client)          Local ledger (campo-db)           │
//! │  ┌─────────────────┐                  ┌──────────────────────┐          │
//! │  │    Product      │                  │   CashAuditRecord    │          │
//! │  │  id, name       │                  │  bills / coins       │          │
//! │  │  price, stock   │                  │  documents           │          │
//! │  │  unit, barcode  │                  │  difference, status  │          │
//! │  └─────────────────┘                  └──────────────────────┘          │
//! │  ┌─────────────────┐                  ┌──────────────────────┐          │
//! │  │    Customer     │                  │  Sale ─► SaleItem    │          │
//! │  │  name, email    │                  │  Quotation ─►        │          │
//! │  │  purchases      │                  │     QuotationItem    │          │
//! │  └─────────────────┘                  └──────────────────────┘          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Wire enums keep the store's Spanish labels (`"Cuadrada"`, `"Efectivo"`,
//! `"Pendiente"`); the database stores lowercase English names.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use uuid::Uuid;

use crate::cash::DenominationCount;
use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Record Identity
// =============================================================================

/// Identity stamped on a locally stored record when it is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordMeta {
    /// UUID v4.
    pub id: String,
    /// Business date shown in listings (store-local calendar day).
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl RecordMeta {
    /// Fresh identity for "now".
    pub fn generate() -> Self {
        RecordMeta {
            id: Uuid::new_v4().to_string(),
            date: Local::now().date_naive(),
            created_at: Utc::now(),
        }
    }

    /// Fixed identity, mostly for seeds and tests.
    pub fn new(id: impl Into<String>, date: NaiveDate, created_at: DateTime<Utc>) -> Self {
        RecordMeta {
            id: id.into(),
            date,
            created_at,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the store inventory (owned by the REST backend).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Backend identifier, normalized from `producto_id`.
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: Money,
    /// Units on hand.
    pub stock: i64,
    /// Sale unit ("bulto", "litro", "kg").
    pub unit: String,
    pub barcode: String,
}

impl Product {
    /// Whether stock has dropped below [`crate::LOW_STOCK_THRESHOLD`].
    pub fn is_low_stock(&self) -> bool {
        self.stock < crate::LOW_STOCK_THRESHOLD
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer record (owned by the REST backend).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    /// Backend identifier, normalized from `cliente_id`.
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Number of purchases on record.
    pub total_purchases: u32,
    #[ts(as = "Option<String>")]
    pub last_purchase: Option<NaiveDate>,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was paid.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentMethod {
    #[serde(rename = "Efectivo")]
    Cash,
    #[serde(rename = "Tarjeta")]
    Card,
    #[serde(rename = "Transferencia")]
    Transfer,
}

impl PaymentMethod {
    /// Label shown to the operator.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Efectivo",
            PaymentMethod::Card => "Tarjeta",
            PaymentMethod::Transfer => "Transferencia",
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts the English name or the store label, case-insensitive.
impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" | "efectivo" => Ok(PaymentMethod::Cash),
            "card" | "tarjeta" => Ok(PaymentMethod::Card),
            "transfer" | "transferencia" => Ok(PaymentMethod::Transfer),
            _ => Err(ValidationError::NotAllowed {
                field: "payment method".to_string(),
                allowed: vec!["cash".into(), "card".into(), "transfer".into()],
            }),
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// One line of a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleItem {
    pub product_name: String,
    pub quantity: u32,
    /// Unit price.
    pub price: Money,
}

/// A recorded sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    pub id: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub customer_name: String,
    pub items: Vec<SaleItem>,
    /// Line-item total at submission time.
    pub total: Money,
    pub payment_method: PaymentMethod,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Quotation
// =============================================================================

/// Lifecycle of a quotation. The only mutable field of a stored quotation.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum QuotationStatus {
    #[serde(rename = "Pendiente")]
    Pending,
    #[serde(rename = "Aprobada")]
    Approved,
    #[serde(rename = "Rechazada")]
    Rejected,
}

impl QuotationStatus {
    pub const fn label(&self) -> &'static str {
        match self {
            QuotationStatus::Pending => "Pendiente",
            QuotationStatus::Approved => "Aprobada",
            QuotationStatus::Rejected => "Rechazada",
        }
    }
}

impl Default for QuotationStatus {
    fn default() -> Self {
        QuotationStatus::Pending
    }
}

impl fmt::Display for QuotationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for QuotationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" | "pendiente" => Ok(QuotationStatus::Pending),
            "approved" | "aprobada" => Ok(QuotationStatus::Approved),
            "rejected" | "rechazada" => Ok(QuotationStatus::Rejected),
            _ => Err(ValidationError::NotAllowed {
                field: "quotation status".to_string(),
                allowed: vec!["pending".into(), "approved".into(), "rejected".into()],
            }),
        }
    }
}

/// One line of a quotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuotationItem {
    /// Product code as printed on the quotation.
    pub code: String,
    pub product_name: String,
    pub quantity: u32,
    pub price: Money,
}

/// A price quotation handed to a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Quotation {
    pub id: String,
    /// Zero-padded sequence number ("001").
    pub number: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub customer_name: String,
    pub customer_address: String,
    pub customer_phone: String,
    /// NIT / CC of the customer.
    pub customer_document: String,
    pub items: Vec<QuotationItem>,
    pub total: Money,
    pub status: QuotationStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Cash Audit
// =============================================================================

/// Outcome of comparing counted money against the opening balance.
///
/// ```text
///   difference == 0  →  Balanced  ("Cuadrada")
///   difference  < 0  →  Shortage  ("Faltante")
///   difference  > 0  →  Surplus   ("Sobrante")
/// ```
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum AuditStatus {
    #[serde(rename = "Cuadrada")]
    Balanced,
    #[serde(rename = "Faltante")]
    Shortage,
    #[serde(rename = "Sobrante")]
    Surplus,
}

impl AuditStatus {
    /// Classifies a difference. Total over every value.
    pub const fn classify(difference: Money) -> Self {
        if difference.is_zero() {
            AuditStatus::Balanced
        } else if difference.is_negative() {
            AuditStatus::Shortage
        } else {
            AuditStatus::Surplus
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            AuditStatus::Balanced => "Cuadrada",
            AuditStatus::Shortage => "Faltante",
            AuditStatus::Surplus => "Sobrante",
        }
    }
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A non-cash item listed during an audit (vouchers, receipts).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AncillaryDocument {
    pub concept: String,
    pub value: Money,
}

/// A submitted cash-register audit ("arqueo de caja").
///
/// Built once from a [`crate::drafts::CashAuditDraft`]; every derived field
/// is the output of [`crate::cash::reconcile`] over the base fields. Stored
/// audits are never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CashAuditRecord {
    pub id: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub employee_name: String,

    // ---- base fields ----
    pub initial_balance: Money,
    pub bills: DenominationCount,
    pub coins: DenominationCount,
    pub transfers: Money,
    pub documents: Vec<AncillaryDocument>,

    // ---- derived at submission ----
    pub total_cash: Money,
    /// Always equal to `initial_balance`.
    pub expected_total: Money,
    pub actual_total: Money,
    pub difference: Money,
    pub status: AuditStatus,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl CashAuditRecord {
    /// Sum of the ancillary documents. Reported next to the totals, never
    /// part of them.
    pub fn documents_total(&self) -> Money {
        crate::cash::documents_total(&self.documents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_status_classify() {
        assert_eq!(AuditStatus::classify(Money::zero()), AuditStatus::Balanced);
        assert_eq!(AuditStatus::classify(Money::from_cents(-1)), AuditStatus::Shortage);
        assert_eq!(AuditStatus::classify(Money::from_cents(1)), AuditStatus::Surplus);
    }

    #[test]
    fn test_enum_wire_labels() {
        assert_eq!(serde_json::to_string(&AuditStatus::Surplus).unwrap(), "\"Sobrante\"");
        assert_eq!(serde_json::to_string(&PaymentMethod::Transfer).unwrap(), "\"Transferencia\"");
        let status: QuotationStatus = serde_json::from_str("\"Aprobada\"").unwrap();
        assert_eq!(status, QuotationStatus::Approved);
    }

    #[test]
    fn test_payment_method_from_str() {
        assert_eq!("cash".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert_eq!("Tarjeta".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
        assert!("cheque".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_quotation_status_defaults_to_pending() {
        assert_eq!(QuotationStatus::default(), QuotationStatus::Pending);
        assert_eq!("REJECTED".parse::<QuotationStatus>().unwrap(), QuotationStatus::Rejected);
    }

    #[test]
    fn test_record_meta_generate_is_unique() {
        let a = RecordMeta::generate();
        let b = RecordMeta::generate();
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn test_product_low_stock() {
        let product = Product {
            id: "7".into(),
            name: "Urea 46%".into(),
            category: "Fertilizantes".into(),
            price: Money::from_major(120_000),
            stock: 3,
            unit: "bulto".into(),
            barcode: "7701234567890".into(),
        };
        assert!(product.is_low_stock());
        assert!(!Product { stock: 20, ..product }.is_low_stock());
    }
}
