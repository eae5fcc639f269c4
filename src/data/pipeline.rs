use super::filter::{FilterCriteria, filter};
use super::model::{Dataset, Record};
use super::summary::{ProportionSummary, summarize};

/// Everything one interaction needs to render.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PipelineOutput {
    pub subset: Vec<Record>,
    pub full: ProportionSummary,
    pub filtered: ProportionSummary,
}

/// Filter `dataset` by `criteria` and summarise both the full table and the subset.
pub fn run(dataset: &Dataset, criteria: &FilterCriteria) -> PipelineOutput {
    let subset = filter(&dataset.records, criteria);
    let full = summarize(&dataset.records);
    let filtered = summarize(&subset);
    PipelineOutput {
        subset,
        full,
        filtered,
    }
}
