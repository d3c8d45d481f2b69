//! # Wire Adapter
//!
//! The one place where backend payloads become domain types and back.
//!
//! ```text
//! backend JSON                          campo-core
//! ────────────────────────────────      ─────────────────────
//! { "producto_id": 7, "price": 25.5 }   Product { id: "7", price: 2550¢ }
//! { "cliente_id": "c-1", ... }          Customer { id: "c-1", ... }
//! ```
//!
//! Identifiers arrive as numbers or strings under a resource-specific key
//! (`producto_id`, `cliente_id`); a plain `id` is accepted when the specific
//! key is absent. Amounts travel as decimal numbers.

use campo_core::drafts::{CustomerChanges, CustomerDraft, ProductChanges, ProductDraft};
use campo_core::{Customer, Money, Product};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClientError, ClientResult};

// =============================================================================
// Identifiers
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum WireId {
    Number(i64),
    Text(String),
}

impl WireId {
    fn into_string(self) -> String {
        match self {
            WireId::Number(n) => n.to_string(),
            WireId::Text(s) => s,
        }
    }
}

/// Picks the resource-specific id, falling back to a generic `id`.
fn normalize_id(resource: &str, specific: Option<WireId>, generic: Option<WireId>) -> ClientResult<String> {
    specific
        .or(generic)
        .map(WireId::into_string)
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ClientError::Decode(format!("{} record without an identifier", resource)))
}

// =============================================================================
// Inbound Records
// =============================================================================

/// A product as the backend sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    #[serde(default)]
    producto_id: Option<WireId>,
    #[serde(default)]
    id: Option<WireId>,
    name: String,
    #[serde(default)]
    category: String,
    #[serde(with = "campo_core::money::decimal")]
    price: Money,
    #[serde(default)]
    stock: i64,
    #[serde(default)]
    unit: String,
    #[serde(default)]
    barcode: String,
}

impl TryFrom<ProductRecord> for Product {
    type Error = ClientError;

    fn try_from(record: ProductRecord) -> ClientResult<Self> {
        Ok(Product {
            id: normalize_id("producto", record.producto_id, record.id)?,
            name: record.name,
            category: record.category,
            price: record.price,
            stock: record.stock,
            unit: record.unit,
            barcode: record.barcode,
        })
    }
}

/// A customer as the backend sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerRecord {
    #[serde(default)]
    cliente_id: Option<WireId>,
    #[serde(default)]
    id: Option<WireId>,
    name: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default, alias = "totalPurchases")]
    total_purchases: Option<u32>,
    #[serde(default, alias = "lastPurchase")]
    last_purchase: Option<String>,
}

impl TryFrom<CustomerRecord> for Customer {
    type Error = ClientError;

    fn try_from(record: CustomerRecord) -> ClientResult<Self> {
        Ok(Customer {
            id: normalize_id("cliente", record.cliente_id, record.id)?,
            name: record.name,
            email: record.email.unwrap_or_default(),
            phone: record.phone.unwrap_or_default(),
            address: record.address.unwrap_or_default(),
            total_purchases: record.total_purchases.unwrap_or(0),
            last_purchase: record.last_purchase.as_deref().and_then(parse_purchase_date),
        })
    }
}

/// `"2025-01-15"` or a timestamp starting with one; placeholders like `"-"`
/// mean no purchase yet.
fn parse_purchase_date(text: &str) -> Option<NaiveDate> {
    let day = text.trim().get(..10)?;
    match NaiveDate::parse_from_str(day, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            debug!(value = %text, "Ignoring unparseable last purchase date");
            None
        }
    }
}

/// Decodes a list response. Anything other than an array is read as empty.
pub(crate) fn decode_list<R, T>(value: serde_json::Value) -> ClientResult<Vec<T>>
where
    R: for<'de> Deserialize<'de>,
    T: TryFrom<R, Error = ClientError>,
{
    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| T::try_from(serde_json::from_value::<R>(item)?))
            .collect(),
        other => {
            debug!(kind = json_kind(&other), "List endpoint did not return an array");
            Ok(Vec::new())
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

// =============================================================================
// Outbound Bodies
// =============================================================================

/// Amount serialized as a decimal number.
#[derive(Debug, Clone, Copy, Serialize)]
struct Decimal(#[serde(with = "campo_core::money::decimal")] Money);

#[derive(Debug, Serialize)]
pub(crate) struct ProductBody<'a> {
    name: &'a str,
    category: &'a str,
    price: Decimal,
    stock: i64,
    unit: &'a str,
    barcode: &'a str,
}

impl<'a> From<&'a ProductDraft> for ProductBody<'a> {
    fn from(draft: &'a ProductDraft) -> Self {
        ProductBody {
            name: draft.name.trim(),
            category: draft.category.trim(),
            price: Decimal(draft.price),
            stock: draft.stock,
            unit: draft.unit.trim(),
            barcode: draft.barcode.trim(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ProductPatch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    barcode: Option<&'a str>,
}

impl<'a> From<&'a ProductChanges> for ProductPatch<'a> {
    fn from(changes: &'a ProductChanges) -> Self {
        ProductPatch {
            name: changes.name.as_deref().map(str::trim),
            category: changes.category.as_deref().map(str::trim),
            price: changes.price.map(Decimal),
            stock: changes.stock,
            unit: changes.unit.as_deref().map(str::trim),
            barcode: changes.barcode.as_deref().map(str::trim),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CustomerBody<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    address: &'a str,
}

impl<'a> From<&'a CustomerDraft> for CustomerBody<'a> {
    fn from(draft: &'a CustomerDraft) -> Self {
        CustomerBody {
            name: draft.name.trim(),
            email: draft.email.trim(),
            phone: draft.phone.trim(),
            address: draft.address.trim(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CustomerPatch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<&'a str>,
}

impl<'a> From<&'a CustomerChanges> for CustomerPatch<'a> {
    fn from(changes: &'a CustomerChanges) -> Self {
        CustomerPatch {
            name: changes.name.as_deref().map(str::trim),
            email: changes.email.as_deref().map(str::trim),
            phone: changes.phone.as_deref().map(str::trim),
            address: changes.address.as_deref().map(str::trim),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product(value: serde_json::Value) -> ClientResult<Product> {
        serde_json::from_value::<ProductRecord>(value)?.try_into()
    }

    fn customer(value: serde_json::Value) -> ClientResult<Customer> {
        serde_json::from_value::<CustomerRecord>(value)?.try_into()
    }

    #[test]
    fn test_product_id_is_normalized() {
        let p = product(json!({
            "producto_id": 7,
            "name": "Urea 46%",
            "category": "Fertilizantes",
            "price": 25.5,
            "stock": 150,
            "unit": "bulto",
            "barcode": "7891234567890"
        }))
        .unwrap();

        assert_eq!(p.id, "7");
        assert_eq!(p.price, Money::from_cents(2550));
        assert_eq!(p.stock, 150);
    }

    #[test]
    fn test_specific_id_wins_over_generic() {
        let p = product(json!({"producto_id": "abc", "id": 99, "name": "Pala", "price": "45.00"})).unwrap();
        assert_eq!(p.id, "abc");
        assert_eq!(p.price, Money::from_major(45));

        let fallback = product(json!({"id": 99, "name": "Pala", "price": 45})).unwrap();
        assert_eq!(fallback.id, "99");
    }

    #[test]
    fn test_missing_id_is_a_decode_error() {
        let err = product(json!({"name": "Pala", "price": 45})).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));

        let err = customer(json!({"cliente_id": "", "name": "Ana"})).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn test_customer_normalization() {
        let c = customer(json!({
            "cliente_id": 3,
            "name": "Juan Pérez",
            "email": "juan@email.com",
            "phone": null,
            "totalPurchases": 5,
            "lastPurchase": "2025-01-15T10:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(c.id, "3");
        assert_eq!(c.phone, "");
        assert_eq!(c.total_purchases, 5);
        assert_eq!(c.last_purchase, NaiveDate::from_ymd_opt(2025, 1, 15));

        let newcomer = customer(json!({"cliente_id": 4, "name": "Ana", "last_purchase": "-"})).unwrap();
        assert_eq!(newcomer.last_purchase, None);
        assert_eq!(newcomer.total_purchases, 0);
    }

    #[test]
    fn test_decode_list_non_array_is_empty() {
        let products: Vec<Product> = decode_list::<ProductRecord, _>(json!({"error": "x"})).unwrap();
        assert!(products.is_empty());

        let products: Vec<Product> =
            decode_list::<ProductRecord, _>(json!([{"producto_id": 1, "name": "A", "price": 1}])).unwrap();
        assert_eq!(products.len(), 1);
    }

    #[test]
    fn test_outbound_bodies() {
        let draft = ProductDraft {
            name: " Urea ".into(),
            category: "Fertilizantes".into(),
            price: Money::from_cents(2550),
            stock: 10,
            unit: "bulto".into(),
            barcode: "7891234567890".into(),
        };
        let body = serde_json::to_value(ProductBody::from(&draft)).unwrap();
        assert_eq!(body["name"], "Urea");
        assert_eq!(body["price"], json!(25.5));

        let changes = ProductChanges {
            price: Some(Money::from_major(30)),
            ..Default::default()
        };
        let patch = serde_json::to_value(ProductPatch::from(&changes)).unwrap();
        assert_eq!(patch, json!({"price": 30}));

        let changes = CustomerChanges {
            phone: Some("3001234567".into()),
            ..Default::default()
        };
        let patch = serde_json::to_value(CustomerPatch::from(&changes)).unwrap();
        assert_eq!(patch, json!({"phone": "3001234567"}));
    }
}
