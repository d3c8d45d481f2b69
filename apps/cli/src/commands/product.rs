//! # Product Commands
//!
//! Inventory lives in the backend; these commands are a thin layer over
//! [`campo_client::ProductService`].
//!
//! ```text
//!  campo products list --search urea
//!        │
//!        ▼
//!  GET /api/productos ──► adapter (producto_id → id) ──► filter ──► table
//! ```

use campo_client::BackendClient;
use campo_core::drafts::{ProductChanges, ProductDraft};
use campo_core::search::filter;
use campo_core::validation::validate_search_query;
use campo_core::Product;
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::{ProductAddArgs, ProductUpdateArgs};
use crate::commands::Deleted;
use crate::error::ApiResult;
use crate::output::{fields, Render, Table};
use crate::state::ConfigState;

#[derive(Debug, Clone, Serialize)]
pub struct ProductList {
    pub products: Vec<Product>,
    /// Low-stock count over the whole inventory, not just the matches.
    pub low_stock: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductSaved {
    pub action: &'static str,
    pub product: Product,
}

pub async fn list(client: &BackendClient, search: Option<&str>) -> ApiResult<ProductList> {
    let query = validate_search_query(search.unwrap_or_default())?;
    let products = client.products().list().await?;
    let low_stock = products.iter().filter(|p| p.is_low_stock()).count();

    let matches: Vec<Product> = filter(&products, &query)
        .into_iter()
        .cloned()
        .collect();
    debug!(total = products.len(), shown = matches.len(), "Products filtered");

    Ok(ProductList {
        products: matches,
        low_stock,
    })
}

pub async fn add(client: &BackendClient, args: ProductAddArgs) -> ApiResult<ProductSaved> {
    let mut draft = ProductDraft {
        name: args.name,
        category: args.category,
        price: args.price,
        stock: args.stock,
        unit: args.unit,
        barcode: args.barcode.unwrap_or_default(),
    };
    draft.ensure_barcode(&mut rand::thread_rng());

    let product = client.products().create(&draft).await?;
    info!(product_id = %product.id, barcode = %product.barcode, "Product added");

    Ok(ProductSaved {
        action: "created",
        product,
    })
}

pub async fn update(client: &BackendClient, args: ProductUpdateArgs) -> ApiResult<ProductSaved> {
    let changes = ProductChanges {
        name: args.name,
        category: args.category,
        price: args.price,
        stock: args.stock,
        unit: args.unit,
        barcode: args.barcode,
    };

    let product = client.products().update(&args.id, &changes).await?;
    Ok(ProductSaved {
        action: "updated",
        product,
    })
}

pub async fn delete(client: &BackendClient, id: &str) -> ApiResult<Deleted> {
    let outcome = client.products().delete(id).await?;
    Ok(Deleted::new("Product", id, outcome))
}

impl Render for ProductList {
    fn render(&self, config: &ConfigState) -> String {
        if self.products.is_empty() {
            return "No products found.".to_string();
        }

        let mut table = Table::new(["ID", "Name", "Category", "Price", "Stock", "Unit", "Barcode"]);
        for p in &self.products {
            let stock = if p.is_low_stock() {
                format!("{} (low)", p.stock)
            } else {
                p.stock.to_string()
            };
            table.row([
                p.id.clone(),
                p.name.clone(),
                p.category.clone(),
                config.format_currency(p.price),
                stock,
                p.unit.clone(),
                p.barcode.clone(),
            ]);
        }

        format!(
            "{}\n\n{} product(s), {} with low stock",
            table.render(),
            self.products.len(),
            self.low_stock
        )
    }
}

impl Render for ProductSaved {
    fn render(&self, config: &ConfigState) -> String {
        let p = &self.product;
        format!(
            "Product {}.\n{}",
            self.action,
            fields(&[
                ("ID", p.id.clone()),
                ("Name", p.name.clone()),
                ("Category", p.category.clone()),
                ("Price", config.format_currency(p.price)),
                ("Stock", format!("{} {}", p.stock, p.unit)),
                ("Barcode", p.barcode.clone()),
            ])
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::spawn_backend;
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::{delete as delete_route, get};
    use axum::{Json, Router};
    use campo_core::Money;
    use serde_json::{json, Value};

    async fn backend() -> BackendClient {
        let router = Router::new()
            .route(
                "/api/productos",
                get(|| async {
                    Json(json!([
                        {
                            "producto_id": 1,
                            "name": "Fertilizante NPK 15-15-15",
                            "category": "Fertilizantes",
                            "price": 85000,
                            "stock": 150,
                            "unit": "bulto",
                            "barcode": "7701234567890"
                        },
                        {
                            "producto_id": 2,
                            "name": "Glifosato 480 SL",
                            "category": "Herbicidas",
                            "price": 42500.5,
                            "stock": 8,
                            "unit": "litro",
                            "barcode": "7701234567891"
                        }
                    ]))
                })
                .post(|Json(mut body): Json<Value>| async move {
                    body["producto_id"] = json!(10);
                    (StatusCode::CREATED, Json(body))
                }),
            )
            .route(
                "/api/productos/{id}",
                delete_route(|Path(_id): Path<String>| async { StatusCode::NO_CONTENT }),
            );
        BackendClient::from_url(&spawn_backend(router).await).unwrap()
    }

    #[tokio::test]
    async fn test_list_filters_and_counts_low_stock() {
        let client = backend().await;

        let all = list(&client, None).await.unwrap();
        assert_eq!(all.products.len(), 2);
        assert_eq!(all.low_stock, 1);

        let herbicidas = list(&client, Some("herbicidas")).await.unwrap();
        assert_eq!(herbicidas.products.len(), 1);
        assert_eq!(herbicidas.products[0].price, Money::from_cents(4_250_050));
        assert_eq!(herbicidas.low_stock, 1);

        let rendered = herbicidas.render(&ConfigState::default());
        assert!(rendered.contains("8 (low)"));
    }

    #[tokio::test]
    async fn test_list_rejects_overlong_search() {
        let client = backend().await;
        let err = list(&client, Some(&"urea".repeat(30))).await.unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_add_generates_barcode() {
        let client = backend().await;
        let args = ProductAddArgs {
            name: "Urea 46%".into(),
            category: "Fertilizantes".into(),
            price: Money::from_major(95_000),
            stock: 40,
            unit: "bulto".into(),
            barcode: None,
        };

        let saved = add(&client, args).await.unwrap();
        assert_eq!(saved.product.id, "10");
        assert_eq!(saved.product.barcode.len(), campo_core::BARCODE_LENGTH);
        assert!(saved.product.barcode.chars().all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_update_without_changes_is_rejected() {
        let client = backend().await;
        let args = ProductUpdateArgs {
            id: "1".into(),
            name: None,
            category: None,
            price: None,
            stock: None,
            unit: None,
            barcode: None,
        };

        let err = update(&client, args).await.unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_delete() {
        let client = backend().await;
        let deleted = delete(&client, "1").await.unwrap();
        assert_eq!(deleted.id, "1");
        assert!(deleted.response.is_none());
    }
}
