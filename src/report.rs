//! # Report Module
//!
//! Questo modulo aggrega gli esiti dei worker nel report finale.
//!
//! ## Aggregazione:
//! - I successi sono ordinati per percentuale di risparmio decrescente
//! - `total_bytes_saved` è la somma con segno di `old - new`: un output più
//!   grande dell'input sottrae onestamente dal totale
//! - Skip e failure sono contati ma esclusi dalla tabella
//!
//! ## Rendering:
//! - Tabella testuale con `tabled` (File / Old Size / New Size / Reduction)
//! - JSON pretty-printed per uso programmatico

use crate::benchmark::format_size;
use crate::outcome::{OptimizedAsset, WorkerOutcome};
use anyhow::Result;
use serde::Serialize;
use std::cmp::Ordering;
use tabled::{Table, Tabled};

/// Aggregated result of a batch run
#[derive(Debug, Default, Serialize)]
pub struct Report {
    /// Successful optimizations, sorted by savings percentage descending
    pub successes: Vec<OptimizedAsset>,
    pub skipped: usize,
    pub failures: usize,
    /// Signed sum of `old_bytes - new_bytes` over successes
    pub total_bytes_saved: i64,
}

impl Report {
    /// Build the report from raw worker outcomes.
    pub fn from_outcomes(outcomes: Vec<WorkerOutcome>) -> Self {
        let mut successes = Vec::new();
        let mut skipped = 0;
        let mut failures = 0;

        for outcome in outcomes {
            match outcome {
                WorkerOutcome::Success(asset) => successes.push(asset),
                WorkerOutcome::Skipped { .. } => skipped += 1,
                WorkerOutcome::Failure { .. } => failures += 1,
            }
        }

        successes.sort_by(|a, b| {
            b.savings_pct
                .partial_cmp(&a.savings_pct)
                .unwrap_or(Ordering::Equal)
        });

        let total_bytes_saved = successes
            .iter()
            .map(|a| a.old_bytes as i64 - a.new_bytes as i64)
            .sum();

        Self {
            successes,
            skipped,
            failures,
            total_bytes_saved,
        }
    }

    /// Render the ranked success table, or `None` when there are no successes.
    pub fn render_table(&self) -> Option<String> {
        if self.successes.is_empty() {
            return None;
        }
        let rows: Vec<ReportRow> = self.successes.iter().map(ReportRow::from).collect();
        Some(Table::new(rows).to_string())
    }

    /// Machine-readable report for programmatic consumers.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Old Size")]
    old_size: String,
    #[tabled(rename = "New Size")]
    new_size: String,
    #[tabled(rename = "Reduction")]
    reduction: String,
}

impl From<&OptimizedAsset> for ReportRow {
    fn from(asset: &OptimizedAsset) -> Self {
        Self {
            file: asset.original_name.clone(),
            old_size: format_size(asset.old_bytes),
            new_size: format_size(asset.new_bytes),
            reduction: format!("{:.1}%", asset.savings_pct),
        }
    }
}
