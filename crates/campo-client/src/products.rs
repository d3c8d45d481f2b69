//! Product endpoints: `/api/productos`.

use campo_core::drafts::{ProductChanges, ProductDraft};
use campo_core::{Product, ValidationError};
use reqwest::Method;
use tracing::{debug, info};

use crate::adapter::{decode_list, ProductBody, ProductPatch, ProductRecord};
use crate::client::{BackendClient, DeleteOutcome};
use crate::error::ClientResult;

const COLLECTION: [&str; 2] = ["api", "productos"];

/// Inventory stored in the backend.
#[derive(Debug, Clone, Copy)]
pub struct ProductService<'a> {
    client: &'a BackendClient,
}

impl<'a> ProductService<'a> {
    pub(crate) fn new(client: &'a BackendClient) -> Self {
        ProductService { client }
    }

    pub async fn list(&self) -> ClientResult<Vec<Product>> {
        let value: serde_json::Value = self.client.get_json(&COLLECTION).await?;
        let products: Vec<Product> = decode_list::<ProductRecord, _>(value)?;
        debug!(count = products.len(), "Products loaded");
        Ok(products)
    }

    /// Validates and creates a product. The barcode must already be set
    /// (see [`ProductDraft::ensure_barcode`]).
    pub async fn create(&self, draft: &ProductDraft) -> ClientResult<Product> {
        draft.validate()?;

        let record: ProductRecord = self
            .client
            .send_json(Method::POST, &COLLECTION, &ProductBody::from(draft))
            .await?;
        let product = Product::try_from(record)?;

        info!(product_id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    pub async fn update(&self, id: &str, changes: &ProductChanges) -> ClientResult<Product> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ValidationError::required("id").into());
        }
        if changes.is_empty() {
            return Err(ValidationError::required("changes").into());
        }
        changes.validate()?;

        let record: ProductRecord = self
            .client
            .send_json(Method::PATCH, &[COLLECTION[0], COLLECTION[1], id], &ProductPatch::from(changes))
            .await?;
        let product = Product::try_from(record)?;

        info!(product_id = %product.id, "Product updated");
        Ok(product)
    }

    pub async fn delete(&self, id: &str) -> ClientResult<DeleteOutcome> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ValidationError::required("id").into());
        }

        let outcome = self.client.delete(&[COLLECTION[0], COLLECTION[1], id]).await?;
        info!(product_id = %id, "Product deleted");
        Ok(outcome)
    }
}
