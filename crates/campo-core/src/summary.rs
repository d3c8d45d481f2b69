//! # Summaries
//!
//! Statistic cards shown at the top of each list page and on the dashboard.
//! All functions take "today" explicitly so results do not depend on the
//! wall clock.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CashAuditRecord, Product, Quotation, QuotationStatus, Sale};

/// Whether two dates fall in the same calendar month of the same year.
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Cash audit page statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AuditSummary {
    pub count: usize,
    pub this_month: usize,
    /// Sum of |difference| over every audit.
    pub total_variance: Money,
}

impl AuditSummary {
    pub fn from_records(records: &[CashAuditRecord], today: NaiveDate) -> Self {
        AuditSummary {
            count: records.len(),
            this_month: records.iter().filter(|r| same_month(r.date, today)).count(),
            total_variance: records.iter().map(|r| r.difference.abs()).sum(),
        }
    }
}

/// Sales page statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesSummary {
    pub count: usize,
    pub total: Money,
    pub today_total: Money,
}

impl SalesSummary {
    pub fn from_sales(sales: &[Sale], today: NaiveDate) -> Self {
        SalesSummary {
            count: sales.len(),
            total: sales.iter().map(|s| s.total).sum(),
            today_total: sales.iter().filter(|s| s.date == today).map(|s| s.total).sum(),
        }
    }
}

/// Quotation page statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuotationSummary {
    pub count: usize,
    pub pending: usize,
    pub total_value: Money,
}

impl QuotationSummary {
    pub fn from_quotations(quotations: &[Quotation]) -> Self {
        QuotationSummary {
            count: quotations.len(),
            pending: quotations
                .iter()
                .filter(|q| q.status == QuotationStatus::Pending)
                .count(),
            total_value: quotations.iter().map(|q| q.total).sum(),
        }
    }
}

/// Dashboard cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardSummary {
    pub product_count: usize,
    /// Products under the low-stock threshold.
    pub low_stock_count: usize,
    pub month_sales: Money,
    pub today_sales_count: usize,
    pub customer_count: usize,
}

impl DashboardSummary {
    pub fn compute(
        products: &[Product],
        customer_count: usize,
        sales: &[Sale],
        today: NaiveDate,
    ) -> Self {
        DashboardSummary {
            product_count: products.len(),
            low_stock_count: products.iter().filter(|p| p.is_low_stock()).count(),
            month_sales: sales
                .iter()
                .filter(|s| same_month(s.date, today))
                .map(|s| s.total)
                .sum(),
            today_sales_count: sales.iter().filter(|s| s.date == today).count(),
            customer_count,
        }
    }
}
