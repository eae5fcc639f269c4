use std::collections::BTreeSet;

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Filter criteria: age interval + selected job categories
// ---------------------------------------------------------------------------

/// User-selected constraints for one interaction.
///
/// The age interval is closed on both ends. An empty `jobs` set selects
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub min_age: i64,
    pub max_age: i64,
    pub jobs: BTreeSet<String>,
}

impl FilterCriteria {
    pub fn new(min_age: i64, max_age: i64, jobs: BTreeSet<String>) -> Self {
        let (min_age, max_age) = if min_age <= max_age {
            (min_age, max_age)
        } else {
            (max_age, min_age)
        };
        Self {
            min_age,
            max_age,
            jobs,
        }
    }

    /// Criteria covering the whole dataset (i.e., show everything).
    pub fn full(dataset: &Dataset) -> Self {
        let (min_age, max_age) = dataset.age_range.unwrap_or((0, 0));
        Self {
            min_age,
            max_age,
            jobs: dataset.jobs.clone(),
        }
    }

    /// Move the lower bound, dragging the upper bound along if needed.
    pub fn set_min_age(&mut self, age: i64) {
        self.min_age = age;
        if self.max_age < age {
            self.max_age = age;
        }
    }

    /// Move the upper bound, dragging the lower bound along if needed.
    pub fn set_max_age(&mut self, age: i64) {
        self.max_age = age;
        if self.min_age > age {
            self.min_age = age;
        }
    }

    /// Whether a single record passes both predicates.
    pub fn matches(&self, record: &Record) -> bool {
        (self.min_age..=self.max_age).contains(&record.age) && self.jobs.contains(&record.job)
    }
}

/// Return indices of records that pass the criteria, in original order.
pub fn filtered_indices(records: &[Record], criteria: &FilterCriteria) -> Vec<usize> {
    if criteria.jobs.is_empty() {
        return Vec::new();
    }
    records
        .iter()
        .enumerate()
        .filter(|(_, rec)| criteria.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

/// Return the records that pass the criteria, in original order.
pub fn filter(records: &[Record], criteria: &FilterCriteria) -> Vec<Record> {
    filtered_indices(records, criteria)
        .into_iter()
        .map(|i| records[i].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_minimal(vec![
            Record::new(25, "admin", "no"),
            Record::new(40, "admin", "yes"),
            Record::new(60, "blue-collar", "no"),
        ])
    }

    fn jobs(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn keeps_matching_records_in_order() {
        let ds = sample();
        let crit = FilterCriteria::new(20, 45, jobs(&["admin"]));
        let out = filter(&ds.records, &crit);
        assert_eq!(out, ds.records[..2].to_vec());
    }

    #[test]
    fn unknown_job_yields_empty_subset() {
        let ds = sample();
        let crit = FilterCriteria::new(20, 45, jobs(&["technician"]));
        assert!(filter(&ds.records, &crit).is_empty());
    }

    #[test]
    fn empty_job_set_selects_nothing() {
        let ds = sample();
        let crit = FilterCriteria::new(0, 200, BTreeSet::new());
        assert!(filtered_indices(&ds.records, &crit).is_empty());
    }

    #[test]
    fn bounds_are_inclusive() {
        let ds = sample();
        let crit = FilterCriteria::new(25, 60, ds.jobs.clone());
        assert_eq!(filtered_indices(&ds.records, &crit), vec![0, 1, 2]);

        let crit = FilterCriteria::new(26, 59, ds.jobs.clone());
        assert_eq!(filtered_indices(&ds.records, &crit), vec![1]);
    }

    #[test]
    fn full_criteria_return_whole_dataset() {
        let ds = sample();
        let crit = FilterCriteria::full(&ds);
        assert_eq!((crit.min_age, crit.max_age), (25, 60));
        assert_eq!(filter(&ds.records, &crit), ds.records);
    }

    #[test]
    fn filter_is_idempotent() {
        let ds = sample();
        for crit in [
            FilterCriteria::new(20, 45, jobs(&["admin"])),
            FilterCriteria::new(30, 70, jobs(&["admin", "blue-collar"])),
            FilterCriteria::new(61, 90, ds.jobs.clone()),
        ] {
            let once = filter(&ds.records, &crit);
            let twice = filter(&once, &crit);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn filter_is_exact() {
        let ds = sample();
        let crit = FilterCriteria::new(30, 65, jobs(&["blue-collar", "admin"]));
        let idx = filtered_indices(&ds.records, &crit);
        for (i, rec) in ds.records.iter().enumerate() {
            assert_eq!(idx.contains(&i), crit.matches(rec), "record {i}");
        }
    }

    #[test]
    fn swapped_bounds_are_normalised() {
        let crit = FilterCriteria::new(50, 30, BTreeSet::new());
        assert_eq!((crit.min_age, crit.max_age), (30, 50));
    }

    #[test]
    fn setters_keep_interval_ordered() {
        let mut crit = FilterCriteria::new(30, 40, BTreeSet::new());
        crit.set_min_age(55);
        assert_eq!((crit.min_age, crit.max_age), (55, 55));
        crit.set_max_age(20);
        assert_eq!((crit.min_age, crit.max_age), (20, 20));
    }
}
