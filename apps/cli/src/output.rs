//! # Output
//!
//! Every command produces a report that can be shown two ways: a plain-text
//! table for the operator, or JSON (`--json`) for scripts. Amounts in JSON
//! are integer cents, matching the ledger.

use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::state::ConfigState;

/// Human-readable rendering of a report.
pub trait Render {
    fn render(&self, config: &ConfigState) -> String;
}

/// Renders `report` as text or pretty JSON.
pub fn emit<T>(report: &T, config: &ConfigState, json: bool) -> ApiResult<String>
where
    T: Serialize + Render,
{
    if json {
        serde_json::to_string_pretty(report).map_err(|e| {
            tracing::error!("Failed to serialize report: {}", e);
            ApiError::internal("Could not encode the result as JSON")
        })
    } else {
        Ok(report.render(config))
    }
}

/// Left-aligned text table sized to its widest cell.
#[derive(Debug, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Table {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(width) => *width = (*width).max(len),
                    None => widths.push(len),
                }
            }
        }

        let line = |cells: &[String]| -> String {
            let padded: Vec<String> = cells
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let pad = widths[i].saturating_sub(cell.chars().count());
                    format!("{}{}", cell, " ".repeat(pad))
                })
                .collect();
            padded.join("  ").trim_end().to_string()
        };

        let mut out = vec![line(self.headers.as_slice())];
        out.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("  "),
        );
        out.extend(self.rows.iter().map(|row| line(row.as_slice())));
        out.join("\n")
    }
}

/// `"label: value"` lines with the labels aligned.
pub fn fields(pairs: &[(&str, String)]) -> String {
    let width = pairs.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
    pairs
        .iter()
        .map(|(label, value)| {
            let pad = width - label.chars().count();
            format!("{}:{} {}", label, " ".repeat(pad), value)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
