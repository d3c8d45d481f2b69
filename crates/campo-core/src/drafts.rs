//! # Drafts
//!
//! In-progress form state for everything the operator creates: cash audits,
//! sales, quotations, products and customers.
//!
//! ## Draft Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Draft::new() ──► set_* / add_* / remove_* ──► submit(meta) ──► Record │
//! │                         │                           │                   │
//! │                         ▼                           ▼                   │
//! │                 rejects bad input          checks required fields,      │
//! │                 immediately                computes derived totals      │
//! │                                                                         │
//! │   CashAuditDraft ──► CashAuditRecord   (reconcile)                      │
//! │   SaleDraft      ──► Sale              (line_items_total)               │
//! │   QuotationDraft ──► Quotation         (line_items_total, Pending)      │
//! │   ProductDraft / CustomerDraft ──► validate() ──► REST backend          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Derived fields are only ever produced here, at submission. Records are
//! never patched field by field.

use rand::Rng;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cash::{documents_total, reconcile, DenominationCount};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::line_items::line_items_total;
use crate::money::Money;
use crate::types::{
    AncillaryDocument, AuditStatus, CashAuditRecord, PaymentMethod, Quotation, QuotationItem,
    QuotationStatus, RecordMeta, Sale, SaleItem,
};
use crate::validation::{
    parse_positive_amount, parse_quantity, validate_amount_limit, validate_barcode, validate_email,
    validate_line_amount, validate_non_negative, validate_positive, validate_quantity,
    validate_required,
    ValidationResult,
};
use crate::{BARCODE_LENGTH, MAX_DENOMINATION_COUNT};

// =============================================================================
// Cash Audit Draft
// =============================================================================

/// The live totals panel of a cash audit being counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AuditPreview {
    pub bills_total: Money,
    pub coins_total: Money,
    pub documents_total: Money,
    pub total_cash: Money,
    pub expected_total: Money,
    pub actual_total: Money,
    pub difference: Money,
    pub status: AuditStatus,
}

/// A cash audit being counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashAuditDraft {
    pub employee_name: String,
    initial_balance: Money,
    bills: DenominationCount,
    coins: DenominationCount,
    transfers: Money,
    documents: Vec<AncillaryDocument>,
}

impl Default for CashAuditDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl CashAuditDraft {
    /// Empty draft with the drawer's bill and coin layout, all counts zero.
    pub fn new() -> Self {
        CashAuditDraft {
            employee_name: String::new(),
            initial_balance: Money::zero(),
            bills: DenominationCount::bills(),
            coins: DenominationCount::coins(),
            transfers: Money::zero(),
            documents: Vec::new(),
        }
    }

    pub fn bills(&self) -> &DenominationCount {
        &self.bills
    }

    pub fn coins(&self) -> &DenominationCount {
        &self.coins
    }

    pub fn documents(&self) -> &[AncillaryDocument] {
        &self.documents
    }

    pub fn initial_balance(&self) -> Money {
        self.initial_balance
    }

    pub fn transfers(&self) -> Money {
        self.transfers
    }

    pub fn set_employee_name(&mut self, name: impl Into<String>) {
        self.employee_name = name.into();
    }

    /// Sets the opening balance. Must not be negative.
    pub fn set_initial_balance(&mut self, amount: Money) -> CoreResult<()> {
        validate_non_negative("initial balance", amount)?;
        self.initial_balance = amount;
        Ok(())
    }

    /// Sets the transfers received. Must not be negative.
    pub fn set_transfers(&mut self, amount: Money) -> CoreResult<()> {
        validate_non_negative("transfers", amount)?;
        self.transfers = amount;
        Ok(())
    }

    /// Sets how many bills of `face` were counted.
    pub fn set_bill_count(&mut self, face: u32, count: u32) -> CoreResult<()> {
        set_count(&mut self.bills, "bill", face, count)
    }

    /// Sets how many coins of `face` were counted.
    pub fn set_coin_count(&mut self, face: u32, count: u32) -> CoreResult<()> {
        set_count(&mut self.coins, "coin", face, count)
    }

    /// Adds an ancillary document. Needs a concept and a positive value.
    pub fn add_document(&mut self, concept: &str, value: Money) -> CoreResult<()> {
        let concept = validate_required("concept", concept)?;
        validate_positive("document value", value)?;
        validate_amount_limit("documents total", documents_total(&self.documents) + value)?;
        self.documents.push(AncillaryDocument { concept, value });
        Ok(())
    }

    /// Removes the document at `index`, returning it.
    pub fn remove_document(&mut self, index: usize) -> CoreResult<AncillaryDocument> {
        if index >= self.documents.len() {
            return Err(CoreError::index_out_of_range(
                "document",
                index,
                self.documents.len(),
            ));
        }
        Ok(self.documents.remove(index))
    }

    /// Current totals, recomputed from the base fields.
    pub fn summary(&self) -> AuditPreview {
        let result = reconcile(self.initial_balance, &self.bills, &self.coins, self.transfers);

        AuditPreview {
            bills_total: self.bills.total(),
            coins_total: self.coins.total(),
            documents_total: documents_total(&self.documents),
            total_cash: result.total_cash,
            expected_total: self.initial_balance,
            actual_total: result.actual_total,
            difference: result.difference,
            status: result.status,
        }
    }

    /// Builds the immutable audit record.
    pub fn submit(&self, meta: RecordMeta) -> CoreResult<CashAuditRecord> {
        let employee_name = validate_required("employee name", &self.employee_name)?;
        let result = reconcile(self.initial_balance, &self.bills, &self.coins, self.transfers);

        Ok(CashAuditRecord {
            id: meta.id,
            date: meta.date,
            employee_name,
            initial_balance: self.initial_balance,
            bills: self.bills.clone(),
            coins: self.coins.clone(),
            transfers: self.transfers,
            documents: self.documents.clone(),
            total_cash: result.total_cash,
            expected_total: self.initial_balance,
            actual_total: result.actual_total,
            difference: result.difference,
            status: result.status,
            created_at: meta.created_at,
        })
    }
}

fn set_count(counts: &mut DenominationCount, kind: &str, face: u32, count: u32) -> CoreResult<()> {
    if !counts.contains(face) {
        return Err(CoreError::UnknownDenomination {
            kind: kind.to_string(),
            face,
        });
    }
    if count > MAX_DENOMINATION_COUNT {
        return Err(ValidationError::OutOfRange {
            field: "count".to_string(),
            min: 0,
            max: i64::from(MAX_DENOMINATION_COUNT),
        }
        .into());
    }
    counts.set(face, count);
    Ok(())
}

/// Parses a `"<concept>=<value>"` document entry (`"INCIPIO=80000"`).
///
/// Splits on the last `=`, so concepts may contain one.
pub fn parse_document_entry(entry: &str) -> ValidationResult<(String, Money)> {
    let (concept, value) = entry.rsplit_once('=').ok_or_else(|| {
        ValidationError::invalid_format(
            "document entry",
            format!("'{entry}' must look like <concept>=<value>"),
        )
    })?;
    Ok((
        validate_required("concept", concept)?,
        parse_positive_amount("document value", value)?,
    ))
}

// =============================================================================
// Sale Draft
// =============================================================================

/// A sale being rung up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaleDraft {
    pub customer_name: String,
    pub payment_method: PaymentMethod,
    items: Vec<SaleItem>,
}

impl SaleDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[SaleItem] {
        &self.items
    }

    /// Adds a line. Needs a product name, quantity > 0 and price > 0; the
    /// line and the sale total must stay within [`crate::MAX_AMOUNT`].
    pub fn add_item(&mut self, product_name: &str, quantity: u32, price: Money) -> CoreResult<()> {
        let product_name = validate_required("product name", product_name)?;
        validate_quantity(quantity)?;
        validate_positive("price", price)?;
        let line = validate_line_amount(quantity, price)?;
        validate_amount_limit("sale total", self.total() + line)?;

        self.items.push(SaleItem {
            product_name,
            quantity,
            price,
        });
        Ok(())
    }

    pub fn remove_item(&mut self, index: usize) -> CoreResult<SaleItem> {
        if index >= self.items.len() {
            return Err(CoreError::index_out_of_range("item", index, self.items.len()));
        }
        Ok(self.items.remove(index))
    }

    pub fn total(&self) -> Money {
        line_items_total(&self.items)
    }

    /// Builds the sale. Needs a customer name and at least one item.
    pub fn submit(&self, meta: RecordMeta) -> CoreResult<Sale> {
        let customer_name = validate_required("customer name", &self.customer_name)?;
        if self.items.is_empty() {
            return Err(CoreError::NoItems {
                kind: "Sale".to_string(),
            });
        }

        Ok(Sale {
            id: meta.id,
            date: meta.date,
            customer_name,
            items: self.items.clone(),
            total: self.total(),
            payment_method: self.payment_method,
            created_at: meta.created_at,
        })
    }
}

/// Parses a `"<name>=<qty>@<price>"` sale line (`"Urea 46%=2@120000"`).
pub fn parse_sale_item_entry(entry: &str) -> ValidationResult<SaleItem> {
    let (name, quantity, price) = split_item_entry(entry, "<name>=<qty>@<price>")?;
    Ok(SaleItem {
        product_name: validate_required("product name", name)?,
        quantity,
        price,
    })
}

fn split_item_entry<'a>(entry: &'a str, shape: &str) -> ValidationResult<(&'a str, u32, Money)> {
    let malformed =
        || ValidationError::invalid_format("item entry", format!("'{entry}' must look like {shape}"));

    let (head, amounts) = entry.rsplit_once('=').ok_or_else(malformed)?;
    let (quantity, price) = amounts.split_once('@').ok_or_else(malformed)?;

    let quantity = parse_quantity(quantity)?;
    let price = parse_positive_amount("price", price)?;
    validate_line_amount(quantity, price)?;
    Ok((head, quantity, price))
}

// =============================================================================
// Quotation Draft
// =============================================================================

/// A quotation being prepared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuotationDraft {
    pub customer_name: String,
    pub customer_address: String,
    pub customer_phone: String,
    pub customer_document: String,
    items: Vec<QuotationItem>,
}

impl QuotationDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[QuotationItem] {
        &self.items
    }

    /// Adds a line. Needs a code, a product name, quantity > 0 and price > 0;
    /// the line and the quotation total must stay within [`crate::MAX_AMOUNT`].
    pub fn add_item(
        &mut self,
        code: &str,
        product_name: &str,
        quantity: u32,
        price: Money,
    ) -> CoreResult<()> {
        let code = validate_required("code", code)?;
        let product_name = validate_required("product name", product_name)?;
        validate_quantity(quantity)?;
        validate_positive("price", price)?;
        let line = validate_line_amount(quantity, price)?;
        validate_amount_limit("quotation total", self.total() + line)?;

        self.items.push(QuotationItem {
            code,
            product_name,
            quantity,
            price,
        });
        Ok(())
    }

    pub fn remove_item(&mut self, index: usize) -> CoreResult<QuotationItem> {
        if index >= self.items.len() {
            return Err(CoreError::index_out_of_range("item", index, self.items.len()));
        }
        Ok(self.items.remove(index))
    }

    pub fn total(&self) -> Money {
        line_items_total(&self.items)
    }

    /// Builds the quotation with the given sequence number. New quotations
    /// always start as Pending.
    pub fn submit(&self, meta: RecordMeta, number: String) -> CoreResult<Quotation> {
        let customer_name = validate_required("customer name", &self.customer_name)?;
        if self.items.is_empty() {
            return Err(CoreError::NoItems {
                kind: "Quotation".to_string(),
            });
        }

        Ok(Quotation {
            id: meta.id,
            number,
            date: meta.date,
            customer_name,
            customer_address: self.customer_address.trim().to_string(),
            customer_phone: self.customer_phone.trim().to_string(),
            customer_document: self.customer_document.trim().to_string(),
            items: self.items.clone(),
            total: self.total(),
            status: QuotationStatus::Pending,
            created_at: meta.created_at,
        })
    }
}

/// Formats a quotation sequence number: `1 → "001"`.
pub fn quotation_number(sequence: u32) -> String {
    format!("{sequence:03}")
}

/// Parses a `"<code>:<name>=<qty>@<price>"` quotation line.
pub fn parse_quotation_item_entry(entry: &str) -> ValidationResult<QuotationItem> {
    let (head, quantity, price) = split_item_entry(entry, "<code>:<name>=<qty>@<price>")?;
    let (code, name) = head.split_once(':').ok_or_else(|| {
        ValidationError::invalid_format(
            "item entry",
            format!("'{entry}' must look like <code>:<name>=<qty>@<price>"),
        )
    })?;

    Ok(QuotationItem {
        code: validate_required("code", code)?,
        product_name: validate_required("product name", name)?,
        quantity,
        price,
    })
}

// =============================================================================
// Product & Customer Drafts
// =============================================================================

/// Fields of a product to create in the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub price: Money,
    pub stock: i64,
    pub unit: String,
    pub barcode: String,
}

impl ProductDraft {
    /// Checks required fields, non-negative price and stock, digit barcode.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_required("name", &self.name)?;
        validate_required("category", &self.category)?;
        validate_required("unit", &self.unit)?;
        validate_barcode(&self.barcode)?;
        validate_non_negative("price", self.price)?;
        if self.stock < 0 {
            return Err(ValidationError::MustNotBeNegative {
                field: "stock".to_string(),
            });
        }
        Ok(())
    }

    /// Fills an empty barcode with a generated one.
    pub fn ensure_barcode<R: Rng>(&mut self, rng: &mut R) {
        if self.barcode.trim().is_empty() {
            self.barcode = generate_barcode(rng);
        }
    }
}

/// Partial update of a product. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Money>,
    pub stock: Option<i64>,
    pub unit: Option<String>,
    pub barcode: Option<String>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self == &ProductChanges::default()
    }

    /// Applies the same rules as [`ProductDraft::validate`] to present fields.
    pub fn validate(&self) -> ValidationResult<()> {
        if let Some(name) = &self.name {
            validate_required("name", name)?;
        }
        if let Some(category) = &self.category {
            validate_required("category", category)?;
        }
        if let Some(unit) = &self.unit {
            validate_required("unit", unit)?;
        }
        if let Some(barcode) = &self.barcode {
            validate_barcode(barcode)?;
        }
        if let Some(price) = self.price {
            validate_non_negative("price", price)?;
        }
        if matches!(self.stock, Some(stock) if stock < 0) {
            return Err(ValidationError::MustNotBeNegative {
                field: "stock".to_string(),
            });
        }
        Ok(())
    }
}

/// Random EAN-13 sized barcode (13 decimal digits).
pub fn generate_barcode<R: Rng>(rng: &mut R) -> String {
    (0..BARCODE_LENGTH)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Fields of a customer to create in the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl CustomerDraft {
    /// Name is required; email must look like one when given.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_required("name", &self.name)?;
        validate_email(&self.email)?;
        Ok(())
    }
}

/// Partial update of a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl CustomerChanges {
    pub fn is_empty(&self) -> bool {
        self == &CustomerChanges::default()
    }

    pub fn validate(&self) -> ValidationResult<()> {
        if let Some(name) = &self.name {
            validate_required("name", name)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BILL_DENOMINATIONS, COIN_DENOMINATIONS, MAX_AMOUNT, MAX_ITEM_QUANTITY};
    use chrono::{NaiveDate, TimeZone, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn meta() -> RecordMeta {
        RecordMeta::new(
            "6f1c1d9e-2b7a-4f0e-9a55-0c2f5f7c1a11",
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 15, 18, 30, 0).unwrap(),
        )
    }

    fn pesos(major: i64) -> Money {
        Money::from_major(major)
    }

    // ---- cash audit ----

    #[test]
    fn test_new_audit_draft_is_all_zero() {
        let draft = CashAuditDraft::new();
        let summary = draft.summary();

        assert_eq!(summary.total_cash, Money::zero());
        assert_eq!(summary.difference, Money::zero());
        assert_eq!(summary.status, AuditStatus::Balanced);
        assert_eq!(draft.bills().iter().count(), 7);
        assert_eq!(draft.coins().iter().count(), 5);
    }

    #[test]
    fn test_audit_submit_matches_reconcile() {
        let mut draft = CashAuditDraft::new();
        draft.set_employee_name("Tatiana Natib");
        draft.set_initial_balance(pesos(200_000)).unwrap();
        draft.set_bill_count(50_000, 12).unwrap();
        draft.set_bill_count(1_000, 1).unwrap();
        draft.add_document("AGRONEX LITRO", pesos(22_000)).unwrap();
        draft.add_document("ALARM", pesos(20_000)).unwrap();
        draft.add_document("INCIPIO", pesos(80_000)).unwrap();

        let record = draft.submit(meta()).unwrap();

        assert_eq!(record.employee_name, "Tatiana Natib");
        assert_eq!(record.total_cash, pesos(601_000));
        assert_eq!(record.expected_total, pesos(200_000));
        assert_eq!(record.actual_total, pesos(601_000));
        assert_eq!(record.difference, pesos(401_000));
        assert_eq!(record.status, AuditStatus::Surplus);
        assert_eq!(record.documents_total(), pesos(122_000));
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn test_audit_summary_tracks_edits() {
        let mut draft = CashAuditDraft::new();
        draft.set_initial_balance(pesos(500)).unwrap();
        draft.set_coin_count(100, 3).unwrap();
        assert_eq!(draft.summary().difference, pesos(-200));
        assert_eq!(draft.summary().status, AuditStatus::Shortage);

        draft.set_transfers(pesos(200)).unwrap();
        assert_eq!(draft.summary().status, AuditStatus::Balanced);
        assert_eq!(draft.summary().coins_total, pesos(300));
    }

    #[test]
    fn test_audit_rejects_unknown_denominations() {
        let mut draft = CashAuditDraft::new();
        assert!(matches!(
            draft.set_bill_count(3_000, 1),
            Err(CoreError::UnknownDenomination { face: 3_000, .. })
        ));
        assert!(draft.set_coin_count(100_000, 1).is_err());
        // 1000 is both a bill and a coin
        assert!(draft.set_bill_count(1_000, 1).is_ok());
        assert!(draft.set_coin_count(1_000, 1).is_ok());
    }

    #[test]
    fn test_audit_rejects_negative_amounts() {
        let mut draft = CashAuditDraft::new();
        assert!(draft.set_initial_balance(pesos(-1)).is_err());
        assert!(draft.set_transfers(pesos(-1)).is_err());
    }

    #[test]
    fn test_audit_amounts_are_capped() {
        let mut draft = CashAuditDraft::new();
        assert!(matches!(
            draft.set_transfers(Money::from_cents(i64::MAX)),
            Err(CoreError::Validation(ValidationError::TooLarge { .. }))
        ));
        assert!(draft.set_initial_balance(MAX_AMOUNT + Money::from_cents(1)).is_err());

        draft.set_transfers(MAX_AMOUNT).unwrap();
        draft.set_initial_balance(MAX_AMOUNT).unwrap();
        for face in BILL_DENOMINATIONS {
            draft.set_bill_count(face, MAX_DENOMINATION_COUNT).unwrap();
        }
        for face in COIN_DENOMINATIONS {
            draft.set_coin_count(face, MAX_DENOMINATION_COUNT).unwrap();
        }

        let summary = draft.summary();
        assert_eq!(summary.actual_total, summary.total_cash + MAX_AMOUNT);
        assert_eq!(summary.difference, summary.total_cash);
        assert_eq!(summary.status, AuditStatus::Surplus);
    }

    #[test]
    fn test_documents_total_is_capped() {
        let mut draft = CashAuditDraft::new();
        draft.add_document("Vale", MAX_AMOUNT - pesos(1)).unwrap();
        draft.add_document("Recibo", pesos(1)).unwrap();
        assert!(draft.add_document("Recibo", Money::from_cents(1)).is_err());
        assert_eq!(draft.documents().len(), 2);
    }

    #[test]
    fn test_audit_document_rules() {
        let mut draft = CashAuditDraft::new();
        assert!(draft.add_document("  ", pesos(1_000)).is_err());
        assert!(draft.add_document("Recibo", Money::zero()).is_err());
        draft.add_document("Recibo", pesos(1_000)).unwrap();

        assert!(draft.remove_document(1).is_err());
        let removed = draft.remove_document(0).unwrap();
        assert_eq!(removed.concept, "Recibo");
        assert!(draft.documents().is_empty());
    }

    #[test]
    fn test_documents_never_change_the_difference() {
        let mut draft = CashAuditDraft::new();
        draft.set_initial_balance(pesos(1_000)).unwrap();
        draft.set_coin_count(500, 2).unwrap();
        let before = draft.summary();

        draft.add_document("Vale", pesos(50_000)).unwrap();
        let after = draft.summary();

        assert_eq!(before.actual_total, after.actual_total);
        assert_eq!(after.status, AuditStatus::Balanced);
        assert_eq!(after.documents_total, pesos(50_000));
    }

    #[test]
    fn test_audit_requires_employee() {
        let draft = CashAuditDraft::new();
        assert!(matches!(
            draft.submit(meta()),
            Err(CoreError::Validation(ValidationError::Required { .. }))
        ));
    }

    #[test]
    fn test_parse_document_entry() {
        let (concept, value) = parse_document_entry("AGRONEX LITRO=22000").unwrap();
        assert_eq!(concept, "AGRONEX LITRO");
        assert_eq!(value, pesos(22_000));

        let (concept, _) = parse_document_entry("a=b=5").unwrap();
        assert_eq!(concept, "a=b");

        assert!(parse_document_entry("=100").is_err());
        assert!(parse_document_entry("Vale=0").is_err());
        assert!(parse_document_entry("Vale").is_err());
    }

    // ---- sales ----

    #[test]
    fn test_sale_draft_submit() {
        let mut draft = SaleDraft::new();
        draft.customer_name = "Finca La Esperanza".into();
        draft.payment_method = PaymentMethod::Transfer;
        draft.add_item("Glifosato", 2, "25.5".parse().unwrap()).unwrap();
        draft.add_item("Guantes", 1, pesos(45)).unwrap();

        let sale = draft.submit(meta()).unwrap();
        assert_eq!(sale.total.cents(), 9600);
        assert_eq!(sale.items.len(), 2);
        assert_eq!(sale.payment_method, PaymentMethod::Transfer);
    }

    #[test]
    fn test_sale_draft_rules() {
        let mut draft = SaleDraft::new();
        assert!(draft.add_item("", 1, pesos(1)).is_err());
        assert!(draft.add_item("Pala", 0, pesos(1)).is_err());
        assert!(draft.add_item("Pala", 1, Money::zero()).is_err());

        draft.customer_name = "Cliente".into();
        assert!(matches!(draft.submit(meta()), Err(CoreError::NoItems { .. })));

        draft.add_item("Pala", 1, pesos(30_000)).unwrap();
        draft.customer_name.clear();
        assert!(draft.submit(meta()).is_err());
    }

    #[test]
    fn test_sale_line_and_total_are_capped() {
        let at_cap = Money::from_cents(MAX_AMOUNT.cents() / i64::from(MAX_ITEM_QUANTITY));
        let mut draft = SaleDraft::new();

        assert!(draft
            .add_item("Urea", MAX_ITEM_QUANTITY, at_cap + Money::from_cents(1))
            .is_err());
        draft.add_item("Urea", MAX_ITEM_QUANTITY, at_cap).unwrap();
        assert_eq!(draft.total(), MAX_AMOUNT);

        assert!(draft.add_item("Pala", 1, Money::from_cents(1)).is_err());
        assert_eq!(draft.items().len(), 1);
    }

    #[test]
    fn test_oversized_item_entries_are_rejected() {
        assert!(parse_sale_item_entry("Urea=100000@92233720368547").is_err());
        assert!(parse_sale_item_entry("Urea=100000@100000001").is_err());
        assert_eq!(
            parse_sale_item_entry("Urea=100000@100000000").unwrap().price,
            pesos(100_000_000)
        );
        assert!(parse_quotation_item_entry("FER-01:Abono=100000@100000000.01").is_err());
    }

    #[test]
    fn test_sale_remove_item() {
        let mut draft = SaleDraft::new();
        draft.add_item("Pala", 1, pesos(30_000)).unwrap();
        assert!(draft.remove_item(3).is_err());
        draft.remove_item(0).unwrap();
        assert_eq!(draft.total(), Money::zero());
    }

    #[test]
    fn test_parse_sale_item_entry() {
        let item = parse_sale_item_entry("Urea 46%=2@120000").unwrap();
        assert_eq!(item.product_name, "Urea 46%");
        assert_eq!(item.quantity, 2);
        assert_eq!(item.price, pesos(120_000));

        assert!(parse_sale_item_entry("Urea=2").is_err());
        assert!(parse_sale_item_entry("Urea=0@10").is_err());
        assert!(parse_sale_item_entry("Urea=1@-10").is_err());
        assert!(parse_sale_item_entry("=1@10").is_err());
    }

    // ---- quotations ----

    #[test]
    fn test_quotation_draft_submit() {
        let mut draft = QuotationDraft::new();
        draft.customer_name = "Hacienda El Roble".into();
        draft.customer_document = " 900123456 ".into();
        draft.add_item("FER-01", "Abono triple 15", 4, pesos(95_000)).unwrap();

        let quote = draft.submit(meta(), quotation_number(1)).unwrap();
        assert_eq!(quote.number, "001");
        assert_eq!(quote.status, QuotationStatus::Pending);
        assert_eq!(quote.total, pesos(380_000));
        assert_eq!(quote.customer_document, "900123456");
    }

    #[test]
    fn test_quotation_draft_rules() {
        let mut draft = QuotationDraft::new();
        assert!(draft.add_item("", "Abono", 1, pesos(1)).is_err());
        draft.customer_name = "X".into();
        assert!(matches!(
            draft.submit(meta(), quotation_number(2)),
            Err(CoreError::NoItems { .. })
        ));
    }

    #[test]
    fn test_quotation_total_is_capped() {
        let mut draft = QuotationDraft::new();
        draft.add_item("A", "Tractor", 1, MAX_AMOUNT).unwrap();
        assert!(draft.add_item("B", "Pala", 1, pesos(1)).is_err());
        assert_eq!(draft.total(), MAX_AMOUNT);
    }

    #[test]
    fn test_quotation_number_padding() {
        assert_eq!(quotation_number(7), "007");
        assert_eq!(quotation_number(42), "042");
        assert_eq!(quotation_number(1234), "1234");
    }

    #[test]
    fn test_parse_quotation_item_entry() {
        let item = parse_quotation_item_entry("FER-01:Abono triple 15=4@95000").unwrap();
        assert_eq!(item.code, "FER-01");
        assert_eq!(item.product_name, "Abono triple 15");
        assert_eq!(item.quantity, 4);

        assert!(parse_quotation_item_entry("Abono=4@95000").is_err());
        assert!(parse_quotation_item_entry(":Abono=4@95000").is_err());
    }

    // ---- products & customers ----

    #[test]
    fn test_product_draft_validate() {
        let mut draft = ProductDraft {
            name: "Urea 46%".into(),
            category: "Fertilizantes".into(),
            price: pesos(120_000),
            stock: 10,
            unit: "bulto".into(),
            barcode: String::new(),
        };
        assert!(draft.validate().is_err());

        let mut rng = StdRng::seed_from_u64(7);
        draft.ensure_barcode(&mut rng);
        assert_eq!(draft.barcode.len(), 13);
        assert!(draft.validate().is_ok());

        draft.stock = -1;
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_ensure_barcode_keeps_existing() {
        let mut draft = ProductDraft {
            barcode: "123".into(),
            ..ProductDraft::default()
        };
        draft.ensure_barcode(&mut StdRng::seed_from_u64(1));
        assert_eq!(draft.barcode, "123");
    }

    #[test]
    fn test_generate_barcode_is_digits() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let code = generate_barcode(&mut rng);
            assert_eq!(code.len(), 13);
            assert!(code.bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn test_product_changes_validate() {
        assert!(ProductChanges::default().is_empty());
        let changes = ProductChanges {
            price: Some(pesos(-5)),
            ..ProductChanges::default()
        };
        assert!(!changes.is_empty());
        assert!(changes.validate().is_err());
    }

    #[test]
    fn test_customer_draft_validate() {
        let mut draft = CustomerDraft {
            name: "Don Julio".into(),
            email: "julio@finca.co".into(),
            ..CustomerDraft::default()
        };
        assert!(draft.validate().is_ok());

        draft.email = "julio".into();
        assert!(draft.validate().is_err());

        let changes = CustomerChanges {
            name: Some(" ".into()),
            ..CustomerChanges::default()
        };
        assert!(changes.validate().is_err());
    }
}
