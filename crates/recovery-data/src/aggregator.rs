//! Monthly aggregation of daily recovery records.

use std::borrow::Borrow;

use recovery_core::error::Result;
use recovery_core::models::{DailyRecord, MonthlyTotals};

// ── Filtering ─────────────────────────────────────────────────────────────────

/// Keep only the records for `state_abbrev` (exact, case-sensitive match),
/// preserving input order.
pub fn filter_by_state<'a>(records: &'a [DailyRecord], state_abbrev: &str) -> Vec<&'a DailyRecord> {
    records
        .iter()
        .filter(|r| r.state_abbrev == state_abbrev)
        .collect()
}

// ── MonthlyAggregator ─────────────────────────────────────────────────────────

/// Stateless helper that groups daily records by calendar month.
pub struct MonthlyAggregator;

impl MonthlyAggregator {
    /// Sum `recovered` per month key.
    ///
    /// Keys are emitted in the order each month is first encountered, not in
    /// calendar order. No state filtering happens here: mixed-state input is
    /// summed together. A month whose total leaves the `i64` range fails the
    /// whole aggregation with `CountOverflow`.
    pub fn aggregate<I, R>(records: I) -> Result<MonthlyTotals>
    where
        I: IntoIterator<Item = R>,
        R: Borrow<DailyRecord>,
    {
        let mut totals = MonthlyTotals::new();
        for record in records {
            let record = record.borrow();
            totals.add(record.month_key(), record.recovered)?;
        }
        Ok(totals)
    }

    /// Filter to one state, then aggregate.
    pub fn aggregate_state(records: &[DailyRecord], state_abbrev: &str) -> Result<MonthlyTotals> {
        Self::aggregate(filter_by_state(records, state_abbrev))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
