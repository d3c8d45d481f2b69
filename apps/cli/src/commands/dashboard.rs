//! Store overview: inventory and customers from the backend, sales from the
//! local ledger.

use campo_client::BackendClient;
use campo_core::summary::DashboardSummary;
use chrono::Local;
use serde::Serialize;

use crate::error::ApiResult;
use crate::output::{fields, Render};
use crate::state::{ConfigState, DbState};

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub store: String,
    pub summary: DashboardSummary,
}

pub async fn show(client: &BackendClient, db: &DbState, store: &str) -> ApiResult<Dashboard> {
    let (product_service, customer_service) = (client.products(), client.customers());
    let (products, customers) = tokio::try_join!(product_service.list(), customer_service.list())?;
    let sales = db.inner().sales().list().await?;

    let summary = DashboardSummary::compute(
        &products,
        customers.len(),
        &sales,
        Local::now().date_naive(),
    );

    Ok(Dashboard {
        store: store.to_string(),
        summary,
    })
}

impl Render for Dashboard {
    fn render(&self, config: &ConfigState) -> String {
        let s = &self.summary;
        format!(
            "{}\n\n{}",
            self.store,
            fields(&[
                ("Products", s.product_count.to_string()),
                ("Low stock", s.low_stock_count.to_string()),
                ("Sales this month", config.format_currency(s.month_sales)),
                ("Sales today", s.today_sales_count.to_string()),
                ("Customers", s.customer_count.to_string()),
            ])
        )
    }
}
