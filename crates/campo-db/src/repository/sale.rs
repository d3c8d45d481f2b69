//! # Sale Repository
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sales                         sale_items                               │
//! │  ─────────────                 ─────────────────────────                │
//! │  id ◄───────────────────────── sale_id                                  │
//! │  date, customer_name           position (0, 1, 2 ... entry order)       │
//! │  total_cents                   product_name, quantity, price_cents      │
//! │  payment_method                                                         │
//! │                                                                         │
//! │  insert() writes the sale and all its items in one transaction.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, SqlitePool};
use std::collections::HashMap;
use tracing::debug;

use super::stored_u32;
use crate::error::{DbError, DbResult};
use campo_core::{Money, PaymentMethod, Sale, SaleItem};

#[derive(Debug, FromRow)]
struct SaleRow {
    id: String,
    date: NaiveDate,
    customer_name: String,
    total_cents: i64,
    payment_method: PaymentMethod,
    created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct SaleItemRow {
    sale_id: String,
    product_name: String,
    quantity: i64,
    price_cents: i64,
}

impl SaleRow {
    fn into_sale(self, items: Vec<SaleItem>) -> Sale {
        Sale {
            id: self.id,
            date: self.date,
            customer_name: self.customer_name,
            items,
            total: Money::from_cents(self.total_cents),
            payment_method: self.payment_method,
            created_at: self.created_at,
        }
    }
}

impl TryFrom<SaleItemRow> for SaleItem {
    type Error = DbError;

    fn try_from(row: SaleItemRow) -> DbResult<Self> {
        Ok(SaleItem {
            product_name: row.product_name,
            quantity: stored_u32("sale_items.quantity", row.quantity)?,
            price: Money::from_cents(row.price_cents),
        })
    }
}

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Stores a sale with its items atomically.
    pub async fn insert(&self, sale: &Sale) -> DbResult<()> {
        debug!(
            id = %sale.id,
            items = sale.items.len(),
            total = %sale.total,
            "Inserting sale"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO sales (id, date, customer_name, total_cents, payment_method, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&sale.id)
        .bind(sale.date)
        .bind(&sale.customer_name)
        .bind(sale.total.cents())
        .bind(sale.payment_method)
        .bind(sale.created_at)
        .execute(&mut *tx)
        .await?;

        for (position, item) in sale.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO sale_items (sale_id, position, product_name, quantity, price_cents)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(&sale.id)
            .bind(position as i64)
            .bind(&item.product_name)
            .bind(i64::from(item.quantity))
            .bind(item.price.cents())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let row: Option<SaleRow> = sqlx::query_as(
            r#"
            SELECT id, date, customer_name, total_cents, payment_method, created_at
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items: Vec<SaleItemRow> = sqlx::query_as(
            r#"
            SELECT sale_id, product_name, quantity, price_cents
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY position
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let items = items
            .into_iter()
            .map(SaleItem::try_from)
            .collect::<DbResult<Vec<_>>>()?;

        Ok(Some(row.into_sale(items)))
    }

    /// All sales with their items, newest first.
    pub async fn list(&self) -> DbResult<Vec<Sale>> {
        let rows: Vec<SaleRow> = sqlx::query_as(
            r#"
            SELECT id, date, customer_name, total_cents, payment_method, created_at
            FROM sales
            ORDER BY created_at DESC, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let item_rows: Vec<SaleItemRow> = sqlx::query_as(
            r#"
            SELECT sale_id, product_name, quantity, price_cents
            FROM sale_items
            ORDER BY sale_id, position
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut items_by_sale: HashMap<String, Vec<SaleItem>> = HashMap::new();
        for item in item_rows {
            let sale_id = item.sale_id.clone();
            items_by_sale
                .entry(sale_id)
                .or_default()
                .push(SaleItem::try_from(item)?);
        }

        debug!(count = rows.len(), "Loaded sales");

        Ok(rows
            .into_iter()
            .map(|row| {
                let items = items_by_sale.remove(&row.id).unwrap_or_default();
                row.into_sale(items)
            })
            .collect())
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use campo_core::drafts::SaleDraft;
    use campo_core::RecordMeta;
    use chrono::TimeZone;

    fn sample_sale(id: &str, hour: u32) -> Sale {
        let mut draft = SaleDraft::new();
        draft.customer_name = "Finca La Esperanza".into();
        draft.payment_method = PaymentMethod::Card;
        draft.add_item("Glifosato", 2, "25.5".parse().unwrap()).unwrap();
        draft.add_item("Guantes", 1, Money::from_major(45)).unwrap();

        draft
            .submit(RecordMeta::new(
                id,
                NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
                Utc.with_ymd_and_hms(2024, 3, 15, hour, 0, 0).unwrap(),
            ))
            .unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get_keeps_item_order() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let sale = sample_sale("sale-1", 10);

        db.sales().insert(&sale).await.unwrap();
        let loaded = db.sales().get_by_id("sale-1").await.unwrap().unwrap();

        assert_eq!(loaded, sale);
        assert_eq!(loaded.items[0].product_name, "Glifosato");
        assert_eq!(loaded.total.cents(), 9600);
    }

    #[tokio::test]
    async fn test_list_groups_items_per_sale() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.sales().insert(&sample_sale("a", 8)).await.unwrap();
        db.sales().insert(&sample_sale("b", 12)).await.unwrap();

        let sales = db.sales().list().await.unwrap();
        assert_eq!(sales.len(), 2);
        assert_eq!(sales[0].id, "b");
        assert!(sales.iter().all(|s| s.items.len() == 2));
        assert_eq!(db.sales().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_failed_insert_leaves_nothing_behind() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut sale = sample_sale("broken", 9);
        // violates the positive price CHECK on the second item
        sale.items[1].price = Money::zero();

        let err = db.sales().insert(&sale).await.unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));
        assert!(db.sales().get_by_id("broken").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.sales().get_by_id("missing").await.unwrap().is_none());
    }
}
