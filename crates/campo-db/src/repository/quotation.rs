//! # Quotation Repository
//!
//! Quotations are stored with their items in one transaction. The status
//! is the only column that changes after insert.
//!
//! Numbers are a zero-padded sequence ("001", "002", ...) allocated by
//! [`QuotationRepository::next_number`]; the UNIQUE index on `number`
//! rejects a second insert that raced for the same one.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, SqlitePool};
use std::collections::HashMap;
use tracing::debug;

use super::stored_u32;
use crate::error::{DbError, DbResult};
use campo_core::drafts::quotation_number;
use campo_core::{Money, Quotation, QuotationItem, QuotationStatus};

const SELECT_QUOTATION: &str = r#"
    SELECT
        id, number, date,
        customer_name, customer_address, customer_phone, customer_document,
        total_cents, status, created_at
    FROM quotations
"#;

#[derive(Debug, FromRow)]
struct QuotationRow {
    id: String,
    number: String,
    date: NaiveDate,
    customer_name: String,
    customer_address: String,
    customer_phone: String,
    customer_document: String,
    total_cents: i64,
    status: QuotationStatus,
    created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct QuotationItemRow {
    quotation_id: String,
    code: String,
    product_name: String,
    quantity: i64,
    price_cents: i64,
}

impl QuotationRow {
    fn into_quotation(self, items: Vec<QuotationItem>) -> Quotation {
        Quotation {
            id: self.id,
            number: self.number,
            date: self.date,
            customer_name: self.customer_name,
            customer_address: self.customer_address,
            customer_phone: self.customer_phone,
            customer_document: self.customer_document,
            items,
            total: Money::from_cents(self.total_cents),
            status: self.status,
            created_at: self.created_at,
        }
    }
}

impl TryFrom<QuotationItemRow> for QuotationItem {
    type Error = DbError;

    fn try_from(row: QuotationItemRow) -> DbResult<Self> {
        Ok(QuotationItem {
            code: row.code,
            product_name: row.product_name,
            quantity: stored_u32("quotation_items.quantity", row.quantity)?,
            price: Money::from_cents(row.price_cents),
        })
    }
}

/// Repository for quotation database operations.
#[derive(Debug, Clone)]
pub struct QuotationRepository {
    pool: SqlitePool,
}

impl QuotationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        QuotationRepository { pool }
    }

    /// The number the next quotation should carry.
    pub async fn next_number(&self) -> DbResult<String> {
        let highest: i64 =
            sqlx::query_scalar("SELECT COALESCE(MAX(CAST(number AS INTEGER)), 0) FROM quotations")
                .fetch_one(&self.pool)
                .await?;

        let next = u32::try_from(highest.saturating_add(1))
            .map_err(|_| DbError::Corrupt(format!("quotation number {highest} is out of range")))?;
        Ok(quotation_number(next))
    }

    /// Stores a quotation with its items atomically.
    pub async fn insert(&self, quotation: &Quotation) -> DbResult<()> {
        debug!(
            id = %quotation.id,
            number = %quotation.number,
            items = quotation.items.len(),
            "Inserting quotation"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO quotations (
                id, number, date,
                customer_name, customer_address, customer_phone, customer_document,
                total_cents, status, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)
            "#,
        )
        .bind(&quotation.id)
        .bind(&quotation.number)
        .bind(quotation.date)
        .bind(&quotation.customer_name)
        .bind(&quotation.customer_address)
        .bind(&quotation.customer_phone)
        .bind(&quotation.customer_document)
        .bind(quotation.total.cents())
        .bind(quotation.status)
        .bind(quotation.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } if field.ends_with("number") => {
                DbError::duplicate("quotation number", quotation.number.clone())
            }
            other => other,
        })?;

        for (position, item) in quotation.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO quotation_items (
                    quotation_id, position, code, product_name, quantity, price_cents
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(&quotation.id)
            .bind(position as i64)
            .bind(&item.code)
            .bind(&item.product_name)
            .bind(i64::from(item.quantity))
            .bind(item.price.cents())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Quotation>> {
        let row: Option<QuotationRow> =
            sqlx::query_as(&format!("{SELECT_QUOTATION} WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items: Vec<QuotationItemRow> = sqlx::query_as(
            r#"
            SELECT quotation_id, code, product_name, quantity, price_cents
            FROM quotation_items
            WHERE quotation_id = ?1
            ORDER BY position
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let items = items
            .into_iter()
            .map(QuotationItem::try_from)
            .collect::<DbResult<Vec<_>>>()?;

        Ok(Some(row.into_quotation(items)))
    }

    /// All quotations with their items, newest first.
    pub async fn list(&self) -> DbResult<Vec<Quotation>> {
        let rows: Vec<QuotationRow> =
            sqlx::query_as(&format!("{SELECT_QUOTATION} ORDER BY created_at DESC, number DESC"))
                .fetch_all(&self.pool)
                .await?;

        let item_rows: Vec<QuotationItemRow> = sqlx::query_as(
            r#"
            SELECT quotation_id, code, product_name, quantity, price_cents
            FROM quotation_items
            ORDER BY quotation_id, position
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut items_by_quotation: HashMap<String, Vec<QuotationItem>> = HashMap::new();
        for item in item_rows {
            let quotation_id = item.quotation_id.clone();
            items_by_quotation
                .entry(quotation_id)
                .or_default()
                .push(QuotationItem::try_from(item)?);
        }

        debug!(count = rows.len(), "Loaded quotations");

        Ok(rows
            .into_iter()
            .map(|row| {
                let items = items_by_quotation.remove(&row.id).unwrap_or_default();
                row.into_quotation(items)
            })
            .collect())
    }

    /// Changes the status of a stored quotation.
    pub async fn update_status(&self, id: &str, status: QuotationStatus) -> DbResult<()> {
        debug!(id = %id, status = ?status, "Updating quotation status");

        let result = sqlx::query("UPDATE quotations SET status = ?2, updated_at = ?3 WHERE id = ?1")
            .bind(id)
            .bind(status)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Quotation", id));
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
    use crate::{Database, DbConfig};
    use campo_core::drafts::QuotationDraft;
    use campo_core::RecordMeta;
    use chrono::TimeZone;

    fn sample_quotation(id: &str, number: String, hour: u32) -> Quotation {
        let mut draft = QuotationDraft::new();
        draft.customer_name = "Hacienda El Roble".into();
        draft.customer_phone = "3105551234".into();
        draft
            .add_item("FER-01", "Abono triple 15", 4, Money::from_major(95_000))
            .unwrap();
        draft
            .add_item("HER-07", "Machete", 2, Money::from_major(28_500))
            .unwrap();

        draft
            .submit(
                RecordMeta::new(
                    id,
                    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
                    Utc.with_ymd_and_hms(2024, 3, 15, hour, 0, 0).unwrap(),
                ),
                number,
            )
            .unwrap()
    }

    async fn setup() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_numbers_start_at_001_and_increase() {
        let db = setup().await;
        let repo = db.quotations();

        assert_eq!(repo.next_number().await.unwrap(), "001");
        repo.insert(&sample_quotation("q1", "001".into(), 9)).await.unwrap();
        assert_eq!(repo.next_number().await.unwrap(), "002");
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = setup().await;
        let quote = sample_quotation("q1", "001".into(), 9);
        db.quotations().insert(&quote).await.unwrap();

        let loaded = db.quotations().get_by_id("q1").await.unwrap().unwrap();
        assert_eq!(loaded, quote);
        assert_eq!(loaded.status, QuotationStatus::Pending);
        assert_eq!(loaded.items[1].code, "HER-07");
    }

    #[tokio::test]
    async fn test_duplicate_number_is_rejected() {
        let db = setup().await;
        db.quotations()
            .insert(&sample_quotation("q1", "001".into(), 9))
            .await
            .unwrap();

        let err = db
            .quotations()
            .insert(&sample_quotation("q2", "001".into(), 10))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { ref value, .. } if value == "001"));
        assert!(db.quotations().get_by_id("q2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_status() {
        let db = setup().await;
        db.quotations()
            .insert(&sample_quotation("q1", "001".into(), 9))
            .await
            .unwrap();

        db.quotations()
            .update_status("q1", QuotationStatus::Approved)
            .await
            .unwrap();
        let loaded = db.quotations().get_by_id("q1").await.unwrap().unwrap();
        assert_eq!(loaded.status, QuotationStatus::Approved);

        let err = db
            .quotations()
            .update_status("missing", QuotationStatus::Rejected)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let db = setup().await;
        db.quotations()
            .insert(&sample_quotation("q1", "001".into(), 9))
            .await
            .unwrap();
        db.quotations()
            .insert(&sample_quotation("q2", "002".into(), 11))
            .await
            .unwrap();

        let numbers: Vec<String> = db
            .quotations()
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|q| q.number)
            .collect();
        assert_eq!(numbers, vec!["002", "001"]);
    }
}
