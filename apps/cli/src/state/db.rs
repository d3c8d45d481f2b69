//! # Database State
//!
//! Wraps the local ledger for the `sales`, `quotations`, `audits` and
//! `dashboard` commands. Opened lazily so backend-only commands never touch
//! the SQLite file.

use campo_db::{Database, DbConfig};
use std::path::PathBuf;
use tracing::info;

use crate::error::ApiResult;

#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Opens (creating and migrating if needed) the ledger at `path`.
    pub async fn open(path: PathBuf) -> ApiResult<Self> {
        info!(?path, "Opening ledger");
        let db = Database::new(DbConfig::new(path)).await?;
        Ok(DbState::new(db))
    }

    /// Empty in-memory ledger.
    pub async fn in_memory() -> ApiResult<Self> {
        let db = Database::new(DbConfig::in_memory()).await?;
        Ok(DbState::new(db))
    }

    pub fn inner(&self) -> &Database {
        &self.db
    }
}
