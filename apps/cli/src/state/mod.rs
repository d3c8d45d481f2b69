//! # State Module
//!
//! Focused state types, each passed only to the commands that need it.
//!
//! ```text
//! ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐
//! │   ConfigState    │  │     DbState      │  │     ViewState<T>     │
//! │  campo.toml      │  │  SQLite ledger   │  │  Arc<Mutex<Slot>>    │
//! │  + env overrides │  │  (sqlx pool)     │  │  stale-result guard  │
//! └──────────────────┘  └──────────────────┘  └──────────────────────┘
//! ```

mod config;
mod db;
mod view;

pub use config::ConfigState;
pub use db::DbState;
pub use view::{Ticket, ViewState};
