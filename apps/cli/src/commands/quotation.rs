//! Quotation commands: create, list, show, and the one allowed mutation,
//! changing the status.

use campo_core::drafts::QuotationDraft;
use campo_core::search::filter;
use campo_core::validation::{validate_search_query, validate_uuid};
use campo_core::summary::QuotationSummary;
use campo_core::{Quotation, QuotationStatus, RecordMeta};
use serde::Serialize;
use tracing::info;

use crate::cli::QuotationNewArgs;
use crate::error::{ApiError, ApiResult};
use crate::output::{fields, Render, Table};
use crate::state::{ConfigState, DbState};

#[derive(Debug, Clone, Serialize)]
pub struct QuotationList {
    pub summary: QuotationSummary,
    pub quotations: Vec<Quotation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuotationDetail {
    pub quotation: Quotation,
}

pub async fn list(db: &DbState, search: Option<&str>) -> ApiResult<QuotationList> {
    let query = validate_search_query(search.unwrap_or_default())?;
    let quotations = db.inner().quotations().list().await?;
    let summary = QuotationSummary::from_quotations(&quotations);
    let quotations = filter(&quotations, &query)
        .into_iter()
        .cloned()
        .collect();
    Ok(QuotationList { summary, quotations })
}

pub async fn create(db: &DbState, args: QuotationNewArgs) -> ApiResult<QuotationDetail> {
    let mut draft = QuotationDraft::new();
    draft.customer_name = args.customer;
    draft.customer_address = args.address;
    draft.customer_phone = args.phone;
    draft.customer_document = args.document;
    for item in &args.items {
        draft.add_item(&item.code, &item.product_name, item.quantity, item.price)?;
    }

    let repo = db.inner().quotations();
    let number = repo.next_number().await?;
    let quotation = draft.submit(RecordMeta::generate(), number)?;
    repo.insert(&quotation).await?;

    info!(quotation_id = %quotation.id, number = %quotation.number, "Quotation created");
    Ok(QuotationDetail { quotation })
}

pub async fn show(db: &DbState, id: &str) -> ApiResult<QuotationDetail> {
    validate_uuid(id)?;
    let quotation = db
        .inner()
        .quotations()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Quotation", id))?;
    Ok(QuotationDetail { quotation })
}

pub async fn set_status(db: &DbState, id: &str, status: QuotationStatus) -> ApiResult<QuotationDetail> {
    validate_uuid(id)?;
    db.inner().quotations().update_status(id, status).await?;
    info!(quotation_id = %id, %status, "Quotation status changed");
    show(db, id).await
}

impl Render for QuotationList {
    fn render(&self, config: &ConfigState) -> String {
        let header = fields(&[
            ("Quotations", self.summary.count.to_string()),
            ("Pending", self.summary.pending.to_string()),
            ("Total value", config.format_currency(self.summary.total_value)),
        ]);

        if self.quotations.is_empty() {
            return format!("{}\n\nNo quotations found.", header);
        }

        let mut table = Table::new(["No.", "ID", "Date", "Customer", "Status", "Total"]);
        for q in &self.quotations {
            table.row([
                q.number.clone(),
                q.id.clone(),
                q.date.to_string(),
                q.customer_name.clone(),
                q.status.label().to_string(),
                config.format_currency(q.total),
            ]);
        }
        format!("{}\n\n{}", header, table.render())
    }
}

impl Render for QuotationDetail {
    fn render(&self, config: &ConfigState) -> String {
        let q = &self.quotation;
        let mut table = Table::new(["Code", "Product", "Qty", "Price", "Subtotal"]);
        for item in &q.items {
            table.row([
                item.code.clone(),
                item.product_name.clone(),
                item.quantity.to_string(),
                config.format_currency(item.price),
                config.format_currency(item.price * item.quantity),
            ]);
        }

        format!(
            "{}\n{}\n\n{}\n\n{}\n\n{}",
            config.store_name(),
            config.config().store.tagline,
            fields(&[
                ("Quotation", format!("No. {}", q.number)),
                ("Date", q.date.to_string()),
                ("Customer", q.customer_name.clone()),
                ("Document", q.customer_document.clone()),
                ("Address", q.customer_address.clone()),
                ("Phone", q.customer_phone.clone()),
                ("Status", q.status.label().to_string()),
            ]),
            table.render(),
            fields(&[("Total", config.format_currency(q.total))])
        )
    }
}
