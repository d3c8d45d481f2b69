//! Customer endpoints: `/api/clientes`.

use campo_core::drafts::{CustomerChanges, CustomerDraft};
use campo_core::{Customer, ValidationError};
use reqwest::Method;
use tracing::{debug, info};

use crate::adapter::{decode_list, CustomerBody, CustomerPatch, CustomerRecord};
use crate::client::{BackendClient, DeleteOutcome};
use crate::error::ClientResult;

const COLLECTION: [&str; 2] = ["api", "clientes"];

#[derive(Debug, Clone, Copy)]
pub struct CustomerService<'a> {
    client: &'a BackendClient,
}

impl<'a> CustomerService<'a> {
    pub(crate) fn new(client: &'a BackendClient) -> Self {
        CustomerService { client }
    }

    pub async fn list(&self) -> ClientResult<Vec<Customer>> {
        let value: serde_json::Value = self.client.get_json(&COLLECTION).await?;
        let customers: Vec<Customer> = decode_list::<CustomerRecord, _>(value)?;
        debug!(count = customers.len(), "Customers loaded");
        Ok(customers)
    }

    pub async fn create(&self, draft: &CustomerDraft) -> ClientResult<Customer> {
        draft.validate()?;

        let record: CustomerRecord = self
            .client
            .send_json(Method::POST, &COLLECTION, &CustomerBody::from(draft))
            .await?;
        let customer = Customer::try_from(record)?;

        info!(customer_id = %customer.id, name = %customer.name, "Customer created");
        Ok(customer)
    }

    pub async fn update(&self, id: &str, changes: &CustomerChanges) -> ClientResult<Customer> {
        let id = required_id(id)?;
        if changes.is_empty() {
            return Err(ValidationError::required("changes").into());
        }
        changes.validate()?;

        let record: CustomerRecord = self
            .client
            .send_json(Method::PATCH, &[COLLECTION[0], COLLECTION[1], id], &CustomerPatch::from(changes))
            .await?;
        let customer = Customer::try_from(record)?;

        info!(customer_id = %customer.id, "Customer updated");
        Ok(customer)
    }

    pub async fn delete(&self, id: &str) -> ClientResult<DeleteOutcome> {
        let id = required_id(id)?;
        let outcome = self.client.delete(&[COLLECTION[0], COLLECTION[1], id]).await?;
        info!(customer_id = %id, "Customer deleted");
        Ok(outcome)
    }
}

fn required_id(id: &str) -> ClientResult<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ValidationError::required("id").into());
    }
    Ok(id)
}
