//! # campo-client: REST Backend Client
//!
//! Products and customers are owned by the store's backend. This crate
//! configures the connection, calls the endpoints and normalizes the
//! payloads into `campo-core` types.
//!
//! ## Modules
//!
//! - [`config`] - `campo.toml` loading with environment overrides
//! - [`client`] - [`BackendClient`] and its request helpers
//! - [`products`] - `/api/productos`
//! - [`customers`] - `/api/clientes`
//! - [`auth`] - `/auth/login`
//! - [`adapter`] - `producto_id` / `cliente_id` normalization
//! - [`error`] - [`ClientError`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use campo_client::{BackendClient, CampoConfig};
//!
//! # async fn run() -> campo_client::ClientResult<()> {
//! let config = CampoConfig::load(None)?;
//! let client = BackendClient::new(&config.backend)?;
//!
//! for product in client.products().list().await? {
//!     println!("{} {}", product.name, product.price);
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod auth;
pub mod client;
pub mod config;
pub mod customers;
pub mod error;
pub mod products;

#[cfg(test)]
mod testing;

pub use auth::LoginSession;
pub use client::{BackendClient, DeleteOutcome};
pub use config::{BackendSettings, CampoConfig, DatabaseSettings, StoreSettings};
pub use customers::CustomerService;
pub use error::{ClientError, ClientResult};
pub use products::ProductService;
