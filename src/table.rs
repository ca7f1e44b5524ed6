use crate::load::RawTable;
use serde::Serialize;
use tracing::debug;

/// One row of a single topic: the category label and its raw `Total` text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicRow {
    pub label: String,
    pub count: String,
}

/// Rows of one topic, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicTable {
    pub rows: Vec<TopicRow>,
}

impl TopicTable {
    /// Keep rows whose topic is exactly `topic`, projected to (label, count).
    pub fn select(raw: &RawTable, topic: &str) -> Self {
        let rows: Vec<TopicRow> = raw
            .rows
            .iter()
            .filter(|r| r.topic == topic)
            .map(|r| TopicRow {
                label: r.characteristic.clone(),
                count: r.total.clone(),
            })
            .collect();
        debug!(topic, rows = rows.len(), "selected topic rows");
        Self { rows }
    }

    /// Strip leading/trailing whitespace from every label.
    ///
    /// The export indents characteristics to show hierarchy, so this must run
    /// before any comparison against a taxonomy.
    pub fn normalize_labels(&mut self) {
        for row in &mut self.rows {
            let trimmed = row.label.trim();
            if trimmed.len() != row.label.len() {
                row.label = trimmed.to_string();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A resolved (label, count) pair; `None` marks a missing count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountedLabel {
    pub label: String,
    pub count: Option<f64>,
}

impl CountedLabel {
    pub fn new(label: impl Into<String>, count: Option<f64>) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Parse a `Total` cell. Anything that is not a finite number is missing.
pub fn parse_count(raw: &str) -> Option<f64> {
    let cleaned = raw.trim();
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            if !cleaned.is_empty() {
                debug!(value = cleaned, "count is not numeric; treating as missing");
            }
            None
        }
    }
}
