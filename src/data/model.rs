use std::collections::BTreeSet;

use anyhow::{Context, Result};

// ---------------------------------------------------------------------------
// Record – one row of the campaign table
// ---------------------------------------------------------------------------

/// A single client contact (one row of the source file).
///
/// `age`, `job` and `y` are decoded for the pipeline; `cells` keeps the raw
/// row in header order so inert columns survive an export untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub age: i64,
    pub job: String,
    /// Campaign outcome (`"yes"` / `"no"` in the bank dataset).
    pub y: String,
    pub cells: Vec<String>,
}

impl Record {
    /// Build a record whose raw cells are just `age;job;y`.
    pub fn new(age: i64, job: impl Into<String>, y: impl Into<String>) -> Self {
        let job = job.into();
        let y = y.into();
        Record {
            cells: vec![age.to_string(), job.clone(), y.clone()],
            age,
            job,
            y,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// Header names of the three columns the pipeline reads.
pub const AGE_COLUMN: &str = "age";
pub const JOB_COLUMN: &str = "job";
pub const OUTCOME_COLUMN: &str = "y";

/// Positions of the pipeline columns within a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub age: usize,
    pub job: usize,
    pub y: usize,
}

impl ColumnIndex {
    /// Locate `age`, `job` and `y` in `headers`; all three are required.
    pub fn locate(headers: &[String]) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .with_context(|| format!("missing '{name}' column"))
        };
        Ok(ColumnIndex {
            age: find(AGE_COLUMN)?,
            job: find(JOB_COLUMN)?,
            y: find(OUTCOME_COLUMN)?,
        })
    }

    /// Decode one raw row into a [`Record`].
    pub fn record_from_cells(&self, cells: Vec<String>, row: usize) -> Result<Record> {
        let cell = |idx: usize, name: &str| {
            cells
                .get(idx)
                .with_context(|| format!("row {row}: no value for '{name}'"))
        };
        let age_text = cell(self.age, AGE_COLUMN)?;
        let age = age_text
            .trim()
            .parse::<i64>()
            .with_context(|| format!("row {row}: age '{age_text}' is not an integer"))?;
        let job = cell(self.job, JOB_COLUMN)?.clone();
        let y = cell(self.y, OUTCOME_COLUMN)?.clone();

        Ok(Record { age, job, y, cells })
    }
}

/// The full parsed dataset with pre-computed column indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Column names in file order.
    pub headers: Vec<String>,
    /// All records (rows), in file order.
    pub records: Vec<Record>,
    /// Observed `(min, max)` age, `None` for an empty table.
    pub age_range: Option<(i64, i64)>,
    /// Sorted set of observed job categories.
    pub jobs: BTreeSet<String>,
    /// Sorted set of observed outcome values.
    pub outcomes: BTreeSet<String>,
}

impl Dataset {
    /// Build the column indices from the loaded records.
    pub fn from_records(headers: Vec<String>, records: Vec<Record>) -> Self {
        let mut age_range: Option<(i64, i64)> = None;
        let mut jobs = BTreeSet::new();
        let mut outcomes = BTreeSet::new();

        for rec in &records {
            age_range = Some(match age_range {
                Some((lo, hi)) => (lo.min(rec.age), hi.max(rec.age)),
                None => (rec.age, rec.age),
            });
            if !jobs.contains(&rec.job) {
                jobs.insert(rec.job.clone());
            }
            if !outcomes.contains(&rec.y) {
                outcomes.insert(rec.y.clone());
            }
        }

        Dataset {
            headers,
            records,
            age_range,
            jobs,
            outcomes,
        }
    }

    /// Dataset with the minimal `age;job;y` header.
    pub fn from_minimal(records: Vec<Record>) -> Self {
        let headers = [AGE_COLUMN, JOB_COLUMN, OUTCOME_COLUMN]
            .iter()
            .map(|h| h.to_string())
            .collect();
        Self::from_records(headers, records)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
