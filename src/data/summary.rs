use std::collections::BTreeMap;

use super::model::Record;

// ---------------------------------------------------------------------------
// ProportionSummary – outcome share per distinct `y` value
// ---------------------------------------------------------------------------

/// One bar of the outcome chart.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeShare {
    pub value: String,
    pub count: usize,
    /// Share in percent, 0–100.
    pub percent: f64,
}

/// Percentage breakdown of the outcome field, ordered by outcome value.
///
/// Empty when computed over no records; callers render that as "no data".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProportionSummary {
    pub entries: Vec<OutcomeShare>,
    pub total: usize,
}

impl ProportionSummary {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Percentage for a given outcome value, if present.
    pub fn percent_of(&self, value: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.value == value)
            .map(|e| e.percent)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OutcomeShare> {
        self.entries.iter()
    }
}

/// Group `records` by outcome, count, and normalise to percentages.
pub fn summarize(records: &[Record]) -> ProportionSummary {
    if records.is_empty() {
        return ProportionSummary::default();
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for rec in records {
        *counts.entry(rec.y.as_str()).or_default() += 1;
    }

    let total = records.len();
    let entries = counts
        .into_iter()
        .map(|(value, count)| OutcomeShare {
            value: value.to_string(),
            count,
            percent: count as f64 / total as f64 * 100.0,
        })
        .collect();

    ProportionSummary { entries, total }
}
