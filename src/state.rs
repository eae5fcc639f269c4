use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::color::OutcomeColors;
use crate::data::export;
use crate::data::filter::FilterCriteria;
use crate::data::loader::{self, LoadError};
use crate::data::model::Dataset;
use crate::data::pipeline::{self, PipelineOutput};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Arc<Dataset>>,

    /// Current age interval and job selection.
    pub criteria: FilterCriteria,

    /// Result of the last pipeline run.
    pub output: PipelineOutput,

    /// Colour per outcome value.
    pub colors: Option<OutcomeColors>,

    /// Why the dataset is unavailable; suppresses all data views.
    pub load_error: Option<String>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,

    /// Rows shown in the preview table.
    pub preview_rows: usize,

    /// Show every filtered row instead of the preview.
    pub show_all_rows: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            criteria: FilterCriteria::default(),
            output: PipelineOutput::default(),
            colors: None,
            load_error: None,
            status_message: None,
            preview_rows: 5,
            show_all_rows: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset, select everything and run the pipeline.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        self.criteria = FilterCriteria::full(&dataset);
        self.colors = Some(OutcomeColors::new(&dataset.outcomes));
        self.dataset = Some(dataset);
        self.load_error = None;
        self.status_message = None;
        self.refilter();
    }

    /// Load `path`, replacing the current dataset on success.
    ///
    /// On failure the previous dataset is dropped so no stale view is shown.
    pub fn load_from_path(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records from {} ({} jobs)",
                    dataset.len(),
                    path.display(),
                    dataset.jobs.len()
                );
                self.set_dataset(Arc::new(dataset));
            }
            Err(e) => {
                match &e {
                    LoadError::SourceNotFound(_) => log::error!("{e}"),
                    LoadError::Malformed(_) => log::error!("Failed to load file: {e:#}"),
                }
                self.dataset = None;
                self.colors = None;
                self.output = PipelineOutput::default();
                self.load_error = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Re-run the pipeline after a criteria change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.output = pipeline::run(ds, &self.criteria);
            log::debug!(
                "age {}..={}, {} jobs → {} matching",
                self.criteria.min_age,
                self.criteria.max_age,
                self.criteria.jobs.len(),
                self.output.subset.len()
            );
        }
    }

    /// Clamp an age bound into the observed range of the loaded dataset.
    fn clamp_age(&self, age: i64) -> i64 {
        match self.dataset.as_ref().and_then(|ds| ds.age_range) {
            Some((lo, hi)) => age.clamp(lo, hi),
            None => age,
        }
    }

    pub fn set_min_age(&mut self, age: i64) {
        let age = self.clamp_age(age);
        self.criteria.set_min_age(age);
        self.refilter();
    }

    pub fn set_max_age(&mut self, age: i64) {
        let age = self.clamp_age(age);
        self.criteria.set_max_age(age);
        self.refilter();
    }

    /// Set both bounds at once; swapped bounds are reordered and both are
    /// clamped into the observed age range.
    pub fn set_age_range(&mut self, min_age: i64, max_age: i64) {
        let (min_age, max_age) = (self.clamp_age(min_age), self.clamp_age(max_age));
        let jobs = std::mem::take(&mut self.criteria.jobs);
        self.criteria = FilterCriteria::new(min_age, max_age, jobs);
        self.refilter();
    }

    /// Toggle a single job category in the selection.
    pub fn toggle_job(&mut self, job: &str) {
        if !self.criteria.jobs.remove(job) {
            self.criteria.jobs.insert(job.to_string());
        }
        self.refilter();
    }

    /// Select all observed job categories.
    pub fn select_all_jobs(&mut self) {
        if let Some(ds) = &self.dataset {
            self.criteria.jobs = ds.jobs.clone();
            self.refilter();
        }
    }

    /// Deselect every job category.
    pub fn select_no_jobs(&mut self) {
        self.criteria.jobs.clear();
        self.refilter();
    }

    /// Rows the preview table should display.
    pub fn visible_rows(&self) -> usize {
        let n = self.output.subset.len();
        if self.show_all_rows {
            n
        } else {
            n.min(self.preview_rows)
        }
    }

    /// CSV bytes of the current filtered subset.
    pub fn export_csv_bytes(&self) -> Result<Vec<u8>> {
        let ds = self.dataset.as_ref().context("no dataset loaded")?;
        export::to_csv_bytes(&ds.headers, &self.output.subset)
    }

    /// Save the current filtered subset as CSV.
    pub fn export_csv(&self, path: &Path) -> Result<()> {
        let ds = self.dataset.as_ref().context("no dataset loaded")?;
        export::save_csv(path, &ds.headers, &self.output.subset)?;
        log::info!(
            "Exported {} rows to {}",
            self.output.subset.len(),
            path.display()
        );
        Ok(())
    }

    /// Save the current filtered subset as Parquet.
    pub fn export_parquet(&self, path: &Path) -> Result<()> {
        let ds = self.dataset.as_ref().context("no dataset loaded")?;
        export::save_parquet(path, &ds.headers, &self.output.subset)?;
        log::info!(
            "Exported {} rows to {}",
            self.output.subset.len(),
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn loaded_state() -> AppState {
        let ds = Dataset::from_minimal(vec![
            Record::new(25, "admin", "no"),
            Record::new(40, "admin", "yes"),
            Record::new(60, "blue-collar", "no"),
        ]);
        let mut state = AppState::default();
        state.set_dataset(Arc::new(ds));
        state
    }

    #[test]
    fn new_dataset_selects_everything() {
        let state = loaded_state();
        assert_eq!(state.output.subset.len(), 3);
        assert_eq!(state.output.filtered, state.output.full);
        assert_eq!((state.criteria.min_age, state.criteria.max_age), (25, 60));
    }

    #[test]
    fn filter_changes_rerun_pipeline() {
        let mut state = loaded_state();
        state.set_max_age(45);
        assert_eq!(state.output.subset.len(), 2);

        state.toggle_job("admin");
        assert!(state.output.subset.is_empty());
        assert!(state.output.filtered.is_empty());

        // Only blue-collar is still selected.
        state.set_age_range(70, 50);
        assert_eq!((state.criteria.min_age, state.criteria.max_age), (50, 60));
        assert_eq!(state.output.subset.len(), 1);
        assert_eq!(state.output.subset[0].job, "blue-collar");

        state.select_no_jobs();
        assert!(state.output.subset.is_empty());
        state.select_all_jobs();
        assert_eq!(state.output.subset.len(), 1);
    }

    #[test]
    fn age_bounds_are_clamped_to_observed_range() {
        let mut state = loaded_state();
        state.set_min_age(10);
        state.set_max_age(99);
        assert_eq!((state.criteria.min_age, state.criteria.max_age), (25, 60));

        state.set_age_range(-5, 200);
        assert_eq!((state.criteria.min_age, state.criteria.max_age), (25, 60));
        assert_eq!(state.output.subset.len(), 3);

        state.set_min_age(75);
        assert_eq!((state.criteria.min_age, state.criteria.max_age), (60, 60));
        assert_eq!(state.output.subset.len(), 1);
    }

    #[test]
    fn preview_is_capped_unless_show_all() {
        let mut state = loaded_state();
        state.preview_rows = 2;
        assert_eq!(state.visible_rows(), 2);
        state.show_all_rows = true;
        assert_eq!(state.visible_rows(), 3);
    }

    #[test]
    fn missing_file_clears_data_views() {
        let mut state = loaded_state();
        state.load_from_path(Path::new("no/such/dir/bank.csv"));
        assert!(state.dataset.is_none());
        assert!(state.output.subset.is_empty());
        assert!(state.load_error.as_deref().unwrap().contains("not found"));
        assert!(state.export_csv_bytes().is_err());
    }

    #[test]
    fn export_bytes_follow_current_subset() {
        let mut state = loaded_state();
        state.set_min_age(30);
        let text = String::from_utf8(state.export_csv_bytes().unwrap()).unwrap();
        assert_eq!(text, "age;job;y\n40;admin;yes\n60;blue-collar;no\n");
    }
}
