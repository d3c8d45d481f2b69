//! # Cash Audit Repository
//!
//! Append-only storage of submitted cash audits. There is no update or
//! delete: an audit is a historical fact.
//!
//! Denomination counts and documents are stored as JSON text and decoded
//! on read. Derived fields are stored exactly as computed at submission.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use campo_core::{AncillaryDocument, AuditStatus, CashAuditRecord, DenominationCount, Money};

const SELECT_AUDIT: &str = r#"
    SELECT
        id, date, employee_name,
        initial_balance_cents, bills, coins, transfers_cents, documents,
        total_cash_cents, expected_total_cents, actual_total_cents, difference_cents,
        status, created_at
    FROM cash_audits
"#;

#[derive(Debug, FromRow)]
struct CashAuditRow {
    id: String,
    date: NaiveDate,
    employee_name: String,
    initial_balance_cents: i64,
    bills: String,
    coins: String,
    transfers_cents: i64,
    documents: String,
    total_cash_cents: i64,
    expected_total_cents: i64,
    actual_total_cents: i64,
    difference_cents: i64,
    status: AuditStatus,
    created_at: DateTime<Utc>,
}

impl TryFrom<CashAuditRow> for CashAuditRecord {
    type Error = DbError;

    fn try_from(row: CashAuditRow) -> DbResult<Self> {
        let bills: DenominationCount = serde_json::from_str(&row.bills)?;
        let coins: DenominationCount = serde_json::from_str(&row.coins)?;
        let documents: Vec<AncillaryDocument> = serde_json::from_str(&row.documents)?;

        Ok(CashAuditRecord {
            id: row.id,
            date: row.date,
            employee_name: row.employee_name,
            initial_balance: Money::from_cents(row.initial_balance_cents),
            bills,
            coins,
            transfers: Money::from_cents(row.transfers_cents),
            documents,
            total_cash: Money::from_cents(row.total_cash_cents),
            expected_total: Money::from_cents(row.expected_total_cents),
            actual_total: Money::from_cents(row.actual_total_cents),
            difference: Money::from_cents(row.difference_cents),
            status: row.status,
            created_at: row.created_at,
        })
    }
}

/// Repository for cash audit records.
#[derive(Debug, Clone)]
pub struct CashAuditRepository {
    pool: SqlitePool,
}

impl CashAuditRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CashAuditRepository { pool }
    }

    /// Stores a submitted audit.
    pub async fn insert(&self, record: &CashAuditRecord) -> DbResult<()> {
        debug!(
            id = %record.id,
            employee = %record.employee_name,
            status = ?record.status,
            "Inserting cash audit"
        );

        let bills = serde_json::to_string(&record.bills)?;
        let coins = serde_json::to_string(&record.coins)?;
        let documents = serde_json::to_string(&record.documents)?;

        sqlx::query(
            r#"
            INSERT INTO cash_audits (
                id, date, employee_name,
                initial_balance_cents, bills, coins, transfers_cents, documents,
                total_cash_cents, expected_total_cents, actual_total_cents, difference_cents,
                status, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            "#,
        )
        .bind(&record.id)
        .bind(record.date)
        .bind(&record.employee_name)
        .bind(record.initial_balance.cents())
        .bind(bills)
        .bind(coins)
        .bind(record.transfers.cents())
        .bind(documents)
        .bind(record.total_cash.cents())
        .bind(record.expected_total.cents())
        .bind(record.actual_total.cents())
        .bind(record.difference.cents())
        .bind(record.status)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<CashAuditRecord>> {
        let row: Option<CashAuditRow> = sqlx::query_as(&format!("{SELECT_AUDIT} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(CashAuditRecord::try_from).transpose()
    }

    /// All audits, newest first.
    pub async fn list(&self) -> DbResult<Vec<CashAuditRecord>> {
        let rows: Vec<CashAuditRow> =
            sqlx::query_as(&format!("{SELECT_AUDIT} ORDER BY created_at DESC, id"))
                .fetch_all(&self.pool)
                .await?;

        debug!(count = rows.len(), "Loaded cash audits");
        rows.into_iter().map(CashAuditRecord::try_from).collect()
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cash_audits")
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
    use campo_core::drafts::CashAuditDraft;
    use campo_core::RecordMeta;
    use chrono::TimeZone;

    fn meta(id: &str, hour: u32) -> RecordMeta {
        RecordMeta::new(
            id,
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 15, hour, 0, 0).unwrap(),
        )
    }

    fn sample_audit(id: &str, hour: u32) -> CashAuditRecord {
        let mut draft = CashAuditDraft::new();
        draft.set_employee_name("Tatiana Natib");
        draft.set_initial_balance(Money::from_major(200_000)).unwrap();
        draft.set_bill_count(50_000, 12).unwrap();
        draft.set_bill_count(1_000, 1).unwrap();
        draft.set_coin_count(500, 3).unwrap();
        draft.add_document("INCIPIO", Money::from_major(80_000)).unwrap();
        draft.submit(meta(id, hour)).unwrap()
    }

    async fn setup() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trips_every_field() {
        let db = setup().await;
        let audit = sample_audit("audit-1", 9);

        db.cash_audits().insert(&audit).await.unwrap();
        let loaded = db.cash_audits().get_by_id("audit-1").await.unwrap().unwrap();

        assert_eq!(loaded, audit);
        assert_eq!(loaded.bills.get(50_000), 12);
        assert_eq!(loaded.status, AuditStatus::Surplus);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let db = setup().await;
        assert!(db.cash_audits().get_by_id("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let db = setup().await;
        db.cash_audits().insert(&sample_audit("morning", 8)).await.unwrap();
        db.cash_audits().insert(&sample_audit("evening", 19)).await.unwrap();

        let ids: Vec<String> = db
            .cash_audits()
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec!["evening", "morning"]);
        assert_eq!(db.cash_audits().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() {
        let db = setup().await;
        let audit = sample_audit("dup", 9);
        db.cash_audits().insert(&audit).await.unwrap();

        let err = db.cash_audits().insert(&audit).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}
