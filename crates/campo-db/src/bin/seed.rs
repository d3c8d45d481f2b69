//! # Seed Data Generator
//!
//! Populates a local ledger with the store's sample records, for trying the
//! CLI without typing a week of audits first.
//!
//! ## Usage
//! ```bash
//! cargo run -p campo-db --bin seed
//! cargo run -p campo-db --bin seed -- --db ./data/campo.db
//! ```
//!
//! ## Generated Records
//! - One cash audit: Tatiana Natib, opening 200000, counted 601000 (Sobrante)
//! - Three sales across cash, card and transfer
//! - Two quotations, one of them already approved

use campo_core::drafts::{quotation_number, CashAuditDraft, QuotationDraft, SaleDraft};
use campo_core::{Money, PaymentMethod, QuotationStatus, RecordMeta};
use campo_db::{Database, DbConfig};
use chrono::{Duration, Local, Utc};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Campo Admin sample data")]
struct Args {
    /// Database file path
    #[arg(short, long, default_value = "./campo_dev.db")]
    db: String,
}

/// Fixed UUIDs, so `campo ... show <id>` works on seeded records; dated
/// `days_ago` days back.
fn record_meta(id: &str, days_ago: i64) -> RecordMeta {
    let created_at = Utc::now() - Duration::days(days_ago);
    let date = Local::now().date_naive() - Duration::days(days_ago);
    RecordMeta::new(id, date, created_at)
}

fn pesos(major: i64) -> Money {
    Money::from_major(major)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("🌱 Campo Admin Seed Data Generator");
    println!("==================================");
    println!("Database: {}", args.db);
    println!();

    let db = Database::new(DbConfig::new(&args.db)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    if db.cash_audits().count().await? > 0 || db.sales().count().await? > 0 {
        println!("⚠ Database already has records");
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    // ---- cash audit ----
    let mut audit = CashAuditDraft::new();
    audit.set_employee_name("Tatiana Natib");
    audit.set_initial_balance(pesos(200_000))?;
    audit.set_bill_count(50_000, 12)?;
    audit.set_bill_count(1_000, 1)?;
    audit.add_document("AGRONEX LITRO", pesos(22_000))?;
    audit.add_document("ALARM", pesos(20_000))?;
    audit.add_document("INCIPIO", pesos(80_000))?;
    let audit = audit.submit(record_meta("00000000-0000-4000-8000-00000000a001", 1))?;
    db.cash_audits().insert(&audit).await?;
    println!(
        "✓ Cash audit for {}: {} ({})",
        audit.employee_name, audit.difference, audit.status
    );

    // ---- sales ----
    let sales: [(&str, &str, PaymentMethod, &[(&str, u32, i64)]); 3] = [
        (
            "00000000-0000-4000-8000-000000005001",
            "Finca La Esperanza",
            PaymentMethod::Cash,
            &[("Urea 46% bulto 50kg", 2, 120_000), ("Guantes de nitrilo", 3, 8_500)],
        ),
        (
            "00000000-0000-4000-8000-000000005002",
            "Hacienda El Roble",
            PaymentMethod::Card,
            &[("Glifosato 1L", 4, 32_000)],
        ),
        (
            "00000000-0000-4000-8000-000000005003",
            "Don Julio Perez",
            PaymentMethod::Transfer,
            &[("Semilla de maiz 20kg", 1, 210_000), ("Machete 22\"", 1, 28_500)],
        ),
    ];

    for (days_ago, (id, customer, method, items)) in sales.into_iter().enumerate() {
        let mut draft = SaleDraft::new();
        draft.customer_name = customer.to_string();
        draft.payment_method = method;
        for (name, qty, price) in items {
            draft.add_item(name, *qty, pesos(*price))?;
        }
        let sale = draft.submit(record_meta(id, days_ago as i64))?;
        db.sales().insert(&sale).await?;
        println!("✓ Sale to {}: {}", sale.customer_name, sale.total);
    }

    // ---- quotations ----
    for (index, customer) in ["Cooperativa Agraria del Valle", "Finca La Esperanza"]
        .into_iter()
        .enumerate()
    {
        let mut draft = QuotationDraft::new();
        draft.customer_name = customer.to_string();
        draft.customer_address = "Vereda El Salitre".to_string();
        draft.customer_phone = "3105551234".to_string();
        draft.add_item("FER-01", "Abono triple 15", 10, pesos(95_000))?;
        draft.add_item("FUN-03", "Fungicida sistemico 1L", 2, pesos(64_000))?;

        let number = quotation_number(index as u32 + 1);
        let id = format!("00000000-0000-4000-8000-000000000{number}");
        let quotation = draft.submit(record_meta(&id, 2), number)?;
        db.quotations().insert(&quotation).await?;
        println!("✓ Quotation {} for {}", quotation.number, quotation.customer_name);
    }

    db.quotations()
        .update_status("00000000-0000-4000-8000-000000000001", QuotationStatus::Approved)
        .await?;

    println!();
    println!("✓ Seed complete");
    db.close().await;
    Ok(())
}
