//! # Cash Audit Commands
//!
//! Counting the drawer ("arqueo de caja") and keeping the result.
//!
//! ```text
//!  --bill 100000=6 --coin 500=3 ...
//!        │
//!        ▼
//!  CashAuditDraft ──► summary()  ──► --dry-run prints the live totals
//!        │
//!        └──────────► submit()   ──► CashAuditRepository (never edited)
//! ```
//!
//! Documents are listed and totalled on their own line; they are not part
//! of the actual total.

use campo_core::drafts::{AuditPreview, CashAuditDraft};
use campo_core::search::filter;
use campo_core::validation::{validate_search_query, validate_uuid};
use campo_core::summary::AuditSummary;
use campo_core::{CashAuditRecord, DenominationCount, Money, RecordMeta};
use chrono::Local;
use serde::Serialize;
use tracing::info;

use crate::cli::AuditNewArgs;
use crate::error::{ApiError, ApiResult};
use crate::output::{fields, Render, Table};
use crate::state::{ConfigState, DbState};

#[derive(Debug, Clone, Serialize)]
pub struct AuditList {
    pub summary: AuditSummary,
    pub audits: Vec<CashAuditRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditDetail {
    pub audit: CashAuditRecord,
}

/// Result of `audits new`: either the saved record or, with `--dry-run`,
/// the totals it would have.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AuditCreated {
    Preview {
        employee_name: String,
        preview: AuditPreview,
    },
    Saved {
        audit: CashAuditRecord,
    },
}

pub async fn list(db: &DbState, search: Option<&str>) -> ApiResult<AuditList> {
    let query = validate_search_query(search.unwrap_or_default())?;
    let audits = db.inner().cash_audits().list().await?;
    let summary = AuditSummary::from_records(&audits, Local::now().date_naive());
    let audits = filter(&audits, &query)
        .into_iter()
        .cloned()
        .collect();
    Ok(AuditList { summary, audits })
}

/// Fills a draft from the command line. Unknown bill or coin faces are
/// rejected rather than added.
pub fn build_draft(args: &AuditNewArgs) -> ApiResult<CashAuditDraft> {
    let mut draft = CashAuditDraft::new();
    draft.set_employee_name(args.employee.clone());
    draft.set_initial_balance(args.initial_balance)?;
    draft.set_transfers(args.transfers)?;

    for &(face, count) in &args.bills {
        draft.set_bill_count(face, count)?;
    }
    for &(face, count) in &args.coins {
        draft.set_coin_count(face, count)?;
    }
    for (concept, value) in &args.documents {
        draft.add_document(concept, *value)?;
    }

    Ok(draft)
}

pub async fn create(db: &DbState, args: AuditNewArgs) -> ApiResult<AuditCreated> {
    let draft = build_draft(&args)?;

    if args.dry_run {
        return Ok(AuditCreated::Preview {
            employee_name: draft.employee_name.clone(),
            preview: draft.summary(),
        });
    }

    let audit = draft.submit(RecordMeta::generate())?;
    db.inner().cash_audits().insert(&audit).await?;

    info!(
        audit_id = %audit.id,
        employee = %audit.employee_name,
        difference = %audit.difference,
        status = %audit.status,
        "Cash audit recorded"
    );
    Ok(AuditCreated::Saved { audit })
}

pub async fn show(db: &DbState, id: &str) -> ApiResult<AuditDetail> {
    validate_uuid(id)?;
    let audit = db
        .inner()
        .cash_audits()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Cash audit", id))?;
    Ok(AuditDetail { audit })
}

// =============================================================================
// Rendering
// =============================================================================

fn denomination_table(title: &str, count: &DenominationCount, config: &ConfigState) -> String {
    let mut table = Table::new([title, "Count", "Subtotal"]);
    for (face, pieces) in count.iter().filter(|(_, pieces)| *pieces > 0) {
        let face_value = Money::from_major(i64::from(face));
        table.row([
            config.format_currency(face_value),
            pieces.to_string(),
            config.format_currency(face_value * pieces),
        ]);
    }
    if table.is_empty() {
        return format!("{}: none counted", title);
    }
    table.row([
        "Total".to_string(),
        count.pieces().to_string(),
        config.format_currency(count.total()),
    ]);
    table.render()
}

fn preview_fields(preview: &AuditPreview, config: &ConfigState) -> String {
    fields(&[
        ("Bills", config.format_currency(preview.bills_total)),
        ("Coins", config.format_currency(preview.coins_total)),
        ("Total cash", config.format_currency(preview.total_cash)),
        ("Actual total", config.format_currency(preview.actual_total)),
        ("Expected total", config.format_currency(preview.expected_total)),
        ("Difference", config.format_currency(preview.difference)),
        ("Status", preview.status.label().to_string()),
        ("Documents", config.format_currency(preview.documents_total)),
    ])
}

fn record_text(audit: &CashAuditRecord, config: &ConfigState) -> String {
    let mut sections = vec![
        fields(&[
            ("Audit", audit.id.clone()),
            ("Date", audit.date.to_string()),
            ("Employee", audit.employee_name.clone()),
            ("Initial balance", config.format_currency(audit.initial_balance)),
            ("Transfers", config.format_currency(audit.transfers)),
        ]),
        denomination_table("Bills", &audit.bills, config),
        denomination_table("Coins", &audit.coins, config),
    ];

    if !audit.documents.is_empty() {
        let mut docs = Table::new(["Document", "Value"]);
        for doc in &audit.documents {
            docs.row([doc.concept.clone(), config.format_currency(doc.value)]);
        }
        sections.push(docs.render());
    }

    sections.push(fields(&[
        ("Total cash", config.format_currency(audit.total_cash)),
        ("Actual total", config.format_currency(audit.actual_total)),
        ("Expected total", config.format_currency(audit.expected_total)),
        ("Difference", config.format_currency(audit.difference)),
        ("Status", audit.status.label().to_string()),
        ("Documents", config.format_currency(audit.documents_total())),
    ]));

    sections.join("\n\n")
}

impl Render for AuditList {
    fn render(&self, config: &ConfigState) -> String {
        let header = fields(&[
            ("Audits", self.summary.count.to_string()),
            ("This month", self.summary.this_month.to_string()),
            ("Total variance", config.format_currency(self.summary.total_variance)),
        ]);

        if self.audits.is_empty() {
            return format!("{}\n\nNo cash audits found.", header);
        }

        let mut table = Table::new(["ID", "Date", "Employee", "Expected", "Actual", "Difference", "Status"]);
        for a in &self.audits {
            table.row([
                a.id.clone(),
                a.date.to_string(),
                a.employee_name.clone(),
                config.format_currency(a.expected_total),
                config.format_currency(a.actual_total),
                config.format_currency(a.difference),
                a.status.label().to_string(),
            ]);
        }
        format!("{}\n\n{}", header, table.render())
    }
}

impl Render for AuditDetail {
    fn render(&self, config: &ConfigState) -> String {
        record_text(&self.audit, config)
    }
}

impl Render for AuditCreated {
    fn render(&self, config: &ConfigState) -> String {
        match self {
            AuditCreated::Preview {
                employee_name,
                preview,
            } => format!(
                "Summary for {} (not saved)\n\n{}",
                employee_name,
                preview_fields(preview, config)
            ),
            AuditCreated::Saved { audit } => {
                format!("Cash audit saved.\n\n{}", record_text(audit, config))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use campo_core::AuditStatus;

    fn args(employee: &str, initial: i64, bills: Vec<(u32, u32)>) -> AuditNewArgs {
        AuditNewArgs {
            employee: employee.into(),
            initial_balance: Money::from_major(initial),
            bills,
            coins: Vec::new(),
            transfers: Money::zero(),
            documents: Vec::new(),
            dry_run: false,
        }
    }

    #[tokio::test]
    async fn test_surplus_audit_is_saved() {
        let db = DbState::in_memory().await.unwrap();

        let created = create(&db, args("Tatiana Natib", 200_000, vec![(100_000, 6), (1_000, 1)]))
            .await
            .unwrap();

        let audit = match created {
            AuditCreated::Saved { audit } => audit,
            other => panic!("expected a saved audit, got {other:?}"),
        };
        assert_eq!(audit.actual_total, Money::from_major(601_000));
        assert_eq!(audit.difference, Money::from_major(401_000));
        assert_eq!(audit.status, AuditStatus::Surplus);

        let shown = show(&db, &audit.id).await.unwrap();
        assert_eq!(shown.audit, audit);

        let text = shown.render(&ConfigState::default());
        let bill_total = text
            .lines()
            .find(|line| line.starts_with("Total "))
            .unwrap();
        assert!(bill_total.contains(" 7 "));
    }

    #[tokio::test]
    async fn test_dry_run_does_not_store() {
        let db = DbState::in_memory().await.unwrap();
        let mut dry = args("Tatiana", 500, Vec::new());
        dry.coins = vec![(100, 3)];
        dry.documents = vec![("Vale de caja".into(), Money::from_major(5_000))];
        dry.dry_run = true;

        let created = create(&db, dry).await.unwrap();
        match &created {
            AuditCreated::Preview { preview, .. } => {
                assert_eq!(preview.actual_total, Money::from_major(300));
                assert_eq!(preview.difference, Money::from_major(-200));
                assert_eq!(preview.status, AuditStatus::Shortage);
                assert_eq!(preview.documents_total, Money::from_major(5_000));
            }
            other => panic!("expected a preview, got {other:?}"),
        }
        assert_eq!(db.inner().cash_audits().count().await.unwrap(), 0);

        let text = created.render(&ConfigState::default());
        assert!(text.contains("not saved"));
        assert!(text.contains("Faltante"));
    }

    #[test]
    fn test_unknown_face_is_rejected() {
        let err = build_draft(&args("Tatiana", 0, vec![(3_000, 1)])).unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
    }

    #[tokio::test]
    async fn test_employee_required() {
        let db = DbState::in_memory().await.unwrap();
        let err = create(&db, args("", 100, vec![(100_000, 1)])).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_list_summary_and_search() {
        let db = DbState::in_memory().await.unwrap();
        create(&db, args("Tatiana", 100_000, vec![(100_000, 1)])).await.unwrap();
        create(&db, args("Carlos", 50_000, vec![(20_000, 2)])).await.unwrap();

        let listed = list(&db, None).await.unwrap();
        assert_eq!(listed.summary.count, 2);
        assert_eq!(listed.summary.this_month, 2);
        assert_eq!(listed.summary.total_variance, Money::from_major(10_000));

        let carlos = list(&db, Some("carl")).await.unwrap();
        assert_eq!(carlos.audits.len(), 1);
        assert_eq!(carlos.audits[0].status, AuditStatus::Shortage);

        let err = show(&db, "carlos").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_oversized_transfers_are_rejected() {
        let mut too_much = args("Tatiana", 0, Vec::new());
        too_much.transfers = Money::from_cents(i64::MAX);
        let err = build_draft(&too_much).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
