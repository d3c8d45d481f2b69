//! # Cash Reconciliation
//!
//! The denomination totalizer and the reconciliation engine behind the
//! cash-register audit.
//!
//! ## Reconciliation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  bills ──► Totalizer ──┐                                                │
//! │                        ├──► total_cash ──┐                              │
//! │  coins ──► Totalizer ──┘                 ├──► actual_total              │
//! │                                          │          │                   │
//! │  transfers ──────────────────────────────┘          ▼                   │
//! │                                  actual_total − initial_balance         │
//! │                                                     │                   │
//! │                                                     ▼                   │
//! │                                  difference ──► classify ──► status     │
//! │                                                                         │
//! │  documents ──► documents_total (reported alongside, never added)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both functions are total over validated input: counts are capped at
//! [`crate::MAX_DENOMINATION_COUNT`] and amounts at [`MAX_AMOUNT`], which keeps
//! every sum inside `i64`. Text is turned into counts by
//! [`DenominationCount::parse_labels`] and [`parse_denomination_entry`],
//! which reject anything malformed or oversized.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{AncillaryDocument, AuditStatus};
use crate::validation::{parse_count, parse_denomination_label, ValidationResult};
use crate::{BILL_DENOMINATIONS, COIN_DENOMINATIONS, MAX_AMOUNT};

// =============================================================================
// Denomination Count
// =============================================================================

/// Face value (whole currency units) → number of pieces counted.
///
/// Counts are `u32`, so a negative count cannot be represented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct DenominationCount(BTreeMap<u32, u32>);

impl DenominationCount {
    /// Empty count with no denominations.
    pub fn new() -> Self {
        DenominationCount(BTreeMap::new())
    }

    /// The drawer's bill layout, every count at zero.
    pub fn bills() -> Self {
        Self::with_denominations(&BILL_DENOMINATIONS)
    }

    /// The drawer's coin layout, every count at zero.
    pub fn coins() -> Self {
        Self::with_denominations(&COIN_DENOMINATIONS)
    }

    /// A layout of the given face values, every count at zero.
    pub fn with_denominations(faces: &[u32]) -> Self {
        DenominationCount(faces.iter().map(|&face| (face, 0)).collect())
    }

    /// Sets the count for a face value, adding it if absent.
    pub fn set(&mut self, face: u32, count: u32) {
        self.0.insert(face, count);
    }

    /// Count for a face value (zero when absent).
    pub fn get(&self, face: u32) -> u32 {
        self.0.get(&face).copied().unwrap_or(0)
    }

    /// Whether the face value is part of this layout.
    pub fn contains(&self, face: u32) -> bool {
        self.0.contains_key(&face)
    }

    /// `(face, count)` pairs, smallest face first.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.0.iter().map(|(&face, &count)| (face, count))
    }

    /// Number of pieces across all faces.
    pub fn pieces(&self) -> u64 {
        self.0.values().map(|&c| u64::from(c)).sum()
    }

    /// The totalizer: `Σ face × count`.
    ///
    /// ## Example
    /// ```rust
    /// use campo_core::cash::DenominationCount;
    /// use campo_core::Money;
    ///
    /// let mut bills = DenominationCount::bills();
    /// bills.set(50_000, 12);
    /// bills.set(1_000, 1);
    /// assert_eq!(bills.total(), Money::from_major(601_000));
    /// ```
    pub fn total(&self) -> Money {
        self.0
            .iter()
            .map(|(&face, &count)| Money::from_major(i64::from(face)) * count)
            .sum()
    }

    fn checked_total(&self) -> Option<Money> {
        self.0.iter().try_fold(Money::zero(), |acc, (&face, &count)| {
            Money::from_major(i64::from(face))
                .checked_mul_quantity(count)
                .and_then(|subtotal| acc.checked_add(subtotal))
        })
    }

    /// Builds a count from textual `(label, count)` pairs.
    ///
    /// Labels must be positive integers and counts non-negative integers.
    /// A repeated label keeps its last count. The total may not exceed
    /// [`MAX_AMOUNT`].
    pub fn parse_labels<'a, I>(entries: I) -> ValidationResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut counts = DenominationCount::new();
        for (label, count) in entries {
            counts.set(parse_denomination_label(label)?, parse_count(count)?);
        }

        match counts.checked_total() {
            Some(total) if total <= MAX_AMOUNT => Ok(counts),
            _ => Err(ValidationError::too_large("denomination total")),
        }
    }
}

impl FromIterator<(u32, u32)> for DenominationCount {
    fn from_iter<T: IntoIterator<Item = (u32, u32)>>(iter: T) -> Self {
        DenominationCount(iter.into_iter().collect())
    }
}

/// Parses a `"<face>=<count>"` entry (`"50000=12"`).
pub fn parse_denomination_entry(entry: &str) -> ValidationResult<(u32, u32)> {
    let (label, count) = entry.split_once('=').ok_or_else(|| {
        ValidationError::invalid_format(
            "denomination entry",
            format!("'{entry}' must look like <face>=<count>"),
        )
    })?;
    Ok((parse_denomination_label(label)?, parse_count(count)?))
}

// =============================================================================
// Reconciliation
// =============================================================================

/// Result of reconciling a drawer against its opening balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Reconciliation {
    /// Bills total + coins total.
    pub total_cash: Money,
    /// Physical cash + transfers.
    pub actual_total: Money,
    /// `actual_total − initial_balance`.
    pub difference: Money,
    pub status: AuditStatus,
}

/// Reconciles counted money against the expected (opening) balance.
///
/// Deterministic and side-effect free; calling it twice with the same
/// input gives the same output.
pub fn reconcile(
    initial_balance: Money,
    bills: &DenominationCount,
    coins: &DenominationCount,
    transfers: Money,
) -> Reconciliation {
    let total_cash = bills.total() + coins.total();
    let actual_total = total_cash + transfers;
    let difference = actual_total - initial_balance;

    Reconciliation {
        total_cash,
        actual_total,
        difference,
        status: AuditStatus::classify(difference),
    }
}

/// Sum of ancillary document values.
pub fn documents_total(documents: &[AncillaryDocument]) -> Money {
    documents.iter().map(|d| d.value).sum()
}

// =============================================================================
// Unit Tests
// =============================================================================
