//! # Repository Module
//!
//! One repository per locally stored record type.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CLI command                                                           │
//! │       │  db.cash_audits().list()                                       │
//! │       ▼                                                                 │
//! │  CashAuditRepository   insert, get_by_id, list, count                  │
//! │  SaleRepository        insert (with items), get_by_id, list            │
//! │  QuotationRepository   insert (with items), next_number, get_by_id,    │
//! │                        list, update_status                             │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rows are read into private `*Row` structs (`sqlx::FromRow`) and turned
//! into campo-core types there; nothing outside this module sees a row.

pub mod cash_audit;
pub mod quotation;
pub mod sale;

use crate::error::{DbError, DbResult};

/// Narrows a stored INTEGER to `u32`, rejecting values that cannot be one.
pub(crate) fn stored_u32(column: &str, value: i64) -> DbResult<u32> {
    u32::try_from(value).map_err(|_| DbError::Corrupt(format!("{column} = {value} is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_u32() {
        assert_eq!(stored_u32("quantity", 3).unwrap(), 3);
        assert!(stored_u32("quantity", -1).is_err());
        assert!(stored_u32("quantity", i64::MAX).is_err());
    }
}
