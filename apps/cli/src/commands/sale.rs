//! # Sale Commands
//!
//! Sales are rung up locally and kept in the ledger.
//!
//! ```text
//!  --item "Urea=2@25.5" ... ──► SaleDraft ──► submit(RecordMeta) ──► SaleRepository
//!                                  │
//!                                  └── total = Σ quantity × price
//! ```

use campo_core::drafts::SaleDraft;
use campo_core::search::filter;
use campo_core::validation::{validate_search_query, validate_uuid};
use campo_core::summary::SalesSummary;
use campo_core::{RecordMeta, Sale};
use chrono::Local;
use serde::Serialize;
use tracing::info;

use crate::cli::SaleNewArgs;
use crate::error::{ApiError, ApiResult};
use crate::output::{fields, Render, Table};
use crate::state::{ConfigState, DbState};

#[derive(Debug, Clone, Serialize)]
pub struct SaleList {
    /// Over every stored sale.
    pub summary: SalesSummary,
    pub sales: Vec<Sale>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaleDetail {
    pub sale: Sale,
}

pub async fn list(db: &DbState, search: Option<&str>) -> ApiResult<SaleList> {
    let query = validate_search_query(search.unwrap_or_default())?;
    let sales = db.inner().sales().list().await?;
    let summary = SalesSummary::from_sales(&sales, Local::now().date_naive());
    let sales = filter(&sales, &query)
        .into_iter()
        .cloned()
        .collect();
    Ok(SaleList { summary, sales })
}

pub async fn create(db: &DbState, args: SaleNewArgs) -> ApiResult<SaleDetail> {
    let mut draft = SaleDraft::new();
    draft.customer_name = args.customer;
    draft.payment_method = args.payment;
    for item in &args.items {
        draft.add_item(&item.product_name, item.quantity, item.price)?;
    }

    let sale = draft.submit(RecordMeta::generate())?;
    db.inner().sales().insert(&sale).await?;

    info!(sale_id = %sale.id, total = %sale.total, "Sale recorded");
    Ok(SaleDetail { sale })
}

pub async fn show(db: &DbState, id: &str) -> ApiResult<SaleDetail> {
    validate_uuid(id)?;
    let sale = db
        .inner()
        .sales()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Sale", id))?;
    Ok(SaleDetail { sale })
}

impl Render for SaleList {
    fn render(&self, config: &ConfigState) -> String {
        let header = fields(&[
            ("Sales", self.summary.count.to_string()),
            ("Total", config.format_currency(self.summary.total)),
            ("Today", config.format_currency(self.summary.today_total)),
        ]);

        if self.sales.is_empty() {
            return format!("{}\n\nNo sales found.", header);
        }

        let mut table = Table::new(["ID", "Date", "Customer", "Items", "Payment", "Total"]);
        for s in &self.sales {
            table.row([
                s.id.clone(),
                s.date.to_string(),
                s.customer_name.clone(),
                s.items.len().to_string(),
                s.payment_method.label().to_string(),
                config.format_currency(s.total),
            ]);
        }
        format!("{}\n\n{}", header, table.render())
    }
}

impl Render for SaleDetail {
    fn render(&self, config: &ConfigState) -> String {
        let s = &self.sale;
        let mut table = Table::new(["Product", "Qty", "Price", "Subtotal"]);
        for item in &s.items {
            table.row([
                item.product_name.clone(),
                item.quantity.to_string(),
                config.format_currency(item.price),
                config.format_currency(item.price * item.quantity),
            ]);
        }

        format!(
            "{}\n\n{}\n\n{}",
            fields(&[
                ("Sale", s.id.clone()),
                ("Date", s.date.to_string()),
                ("Customer", s.customer_name.clone()),
                ("Payment", s.payment_method.label().to_string()),
            ]),
            table.render(),
            fields(&[("Total", config.format_currency(s.total))])
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use campo_core::{Money, PaymentMethod, SaleItem};

    fn item(name: &str, quantity: u32, cents: i64) -> SaleItem {
        SaleItem {
            product_name: name.into(),
            quantity,
            price: Money::from_cents(cents),
        }
    }

    fn args(customer: &str, items: Vec<SaleItem>) -> SaleNewArgs {
        SaleNewArgs {
            customer: customer.into(),
            payment: PaymentMethod::Transfer,
            items,
        }
    }

    #[tokio::test]
    async fn test_create_show_and_list() {
        let db = DbState::in_memory().await.unwrap();

        let created = create(
            &db,
            args("Juan Pérez", vec![item("Glifosato", 2, 2550), item("Guantes", 1, 4500)]),
        )
        .await
        .unwrap();
        assert_eq!(created.sale.total, Money::from_cents(9600));

        let shown = show(&db, &created.sale.id).await.unwrap();
        assert_eq!(shown.sale, created.sale);

        let listed = list(&db, Some("juan")).await.unwrap();
        assert_eq!(listed.summary.count, 1);
        assert_eq!(listed.summary.today_total, Money::from_cents(9600));
        assert_eq!(listed.sales.len(), 1);

        let none = list(&db, Some("maría")).await.unwrap();
        assert!(none.sales.is_empty());
        assert_eq!(none.summary.count, 1);
    }

    #[tokio::test]
    async fn test_create_requires_customer() {
        let db = DbState::in_memory().await.unwrap();
        let err = create(&db, args("  ", vec![item("Urea", 1, 100)])).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(db.inner().sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_show_unknown_sale() {
        let db = DbState::in_memory().await.unwrap();
        let err = show(&db, "6f1c1d9e-2b7a-4f0e-9a55-0c2f5f7c1a11").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = show(&db, "missing").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_list_rejects_overlong_search() {
        let db = DbState::in_memory().await.unwrap();
        let err = list(&db, Some(&"a".repeat(101))).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let padded = list(&db, Some("  ")).await.unwrap();
        assert_eq!(padded.summary.count, 0);
    }

    #[tokio::test]
    async fn test_detail_render() {
        let db = DbState::in_memory().await.unwrap();
        let created = create(&db, args("Ana", vec![item("Urea 46%", 2, 2550)])).await.unwrap();

        let text = created.render(&ConfigState::default());
        assert!(text.contains("Transferencia"));
        assert!(text.contains("$51.00"));
    }
}
