//! Customer commands over `/api/clientes`.

use campo_client::BackendClient;
use campo_core::drafts::{CustomerChanges, CustomerDraft};
use campo_core::search::filter;
use campo_core::validation::validate_search_query;
use campo_core::Customer;
use serde::Serialize;
use tracing::info;

use crate::cli::{CustomerAddArgs, CustomerUpdateArgs};
use crate::commands::Deleted;
use crate::error::ApiResult;
use crate::output::{fields, Render, Table};
use crate::state::ConfigState;

#[derive(Debug, Clone, Serialize)]
pub struct CustomerList {
    pub customers: Vec<Customer>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerSaved {
    pub action: &'static str,
    pub customer: Customer,
}

pub async fn list(client: &BackendClient, search: Option<&str>) -> ApiResult<CustomerList> {
    let query = validate_search_query(search.unwrap_or_default())?;
    let customers = client.customers().list().await?;
    let customers = filter(&customers, &query)
        .into_iter()
        .cloned()
        .collect();
    Ok(CustomerList { customers })
}

pub async fn add(client: &BackendClient, args: CustomerAddArgs) -> ApiResult<CustomerSaved> {
    let draft = CustomerDraft {
        name: args.name,
        email: args.email,
        phone: args.phone,
        address: args.address,
    };

    let customer = client.customers().create(&draft).await?;
    info!(customer_id = %customer.id, "Customer added");
    Ok(CustomerSaved {
        action: "created",
        customer,
    })
}

pub async fn update(client: &BackendClient, args: CustomerUpdateArgs) -> ApiResult<CustomerSaved> {
    let changes = CustomerChanges {
        name: args.name,
        email: args.email,
        phone: args.phone,
        address: args.address,
    };

    let customer = client.customers().update(&args.id, &changes).await?;
    Ok(CustomerSaved {
        action: "updated",
        customer,
    })
}

pub async fn delete(client: &BackendClient, id: &str) -> ApiResult<Deleted> {
    let outcome = client.customers().delete(id).await?;
    Ok(Deleted::new("Customer", id, outcome))
}

fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

impl Render for CustomerList {
    fn render(&self, _config: &ConfigState) -> String {
        if self.customers.is_empty() {
            return "No customers found.".to_string();
        }

        let mut table = Table::new(["ID", "Name", "Email", "Phone", "Purchases", "Last purchase"]);
        for c in &self.customers {
            table.row([
                c.id.clone(),
                c.name.clone(),
                or_dash(&c.email),
                or_dash(&c.phone),
                c.total_purchases.to_string(),
                c.last_purchase
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ]);
        }
        format!("{}\n\n{} customer(s)", table.render(), self.customers.len())
    }
}

impl Render for CustomerSaved {
    fn render(&self, _config: &ConfigState) -> String {
        let c = &self.customer;
        format!(
            "Customer {}.\n{}",
            self.action,
            fields(&[
                ("ID", c.id.clone()),
                ("Name", c.name.clone()),
                ("Email", or_dash(&c.email)),
                ("Phone", or_dash(&c.phone)),
                ("Address", or_dash(&c.address)),
            ])
        )
    }
}
