use crate::table::CountedLabel;
use serde::Serialize;

/// Aggregate view of the income distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeSummary {
    pub total_households: f64,
    pub low_income_households: f64,
    pub high_income_households: f64,
    /// Percentage of households in the low-income brackets; `None` when
    /// there are no households at all.
    pub low_income_pct: Option<f64>,
    /// Percentage of households in the top bracket; `None` when there are
    /// no households at all.
    pub high_income_pct: Option<f64>,
}

/// Summarise an ordered bracket sequence. Missing counts add nothing.
///
/// `low_income_brackets` leading rows form the low-income group and the
/// last row is the high-income group.
pub fn summarize(rows: &[CountedLabel], low_income_brackets: usize) -> IncomeSummary {
    let total = sum_counts(rows);
    let low = sum_counts(&rows[..low_income_brackets.min(rows.len())]);
    let high = rows.last().and_then(|r| r.count).unwrap_or(0.0);

    IncomeSummary {
        total_households: total,
        low_income_households: low,
        high_income_households: high,
        low_income_pct: percent(low, total),
        high_income_pct: percent(high, total),
    }
}

fn sum_counts(rows: &[CountedLabel]) -> f64 {
    rows.iter().filter_map(|r| r.count).sum()
}

fn percent(part: f64, total: f64) -> Option<f64> {
    if total == 0.0 {
        None
    } else {
        Some(part / total * 100.0)
    }
}
