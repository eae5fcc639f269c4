use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Cheap Arc clone so we can mutate state inside the loops.
    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Age interval ----
            ui.strong("Age range");
            if let Some((lo, hi)) = dataset.age_range {
                let mut min_age = state.criteria.min_age;
                if ui
                    .add(egui::Slider::new(&mut min_age, lo..=hi).text("from"))
                    .changed()
                {
                    state.set_min_age(min_age);
                }
                let mut max_age = state.criteria.max_age;
                if ui
                    .add(egui::Slider::new(&mut max_age, lo..=hi).text("to"))
                    .changed()
                {
                    state.set_max_age(max_age);
                }
                if ui.small_button("Reset").clicked() {
                    state.set_age_range(lo, hi);
                }
            }
            ui.separator();

            // ---- Job categories ----
            let header_text = format!(
                "Job  ({}/{})",
                state.criteria.jobs.len(),
                dataset.jobs.len()
            );
            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("job_filter")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_jobs();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_jobs();
                        }
                    });

                    for job in &dataset.jobs {
                        let mut checked = state.criteria.jobs.contains(job);
                        if ui.checkbox(&mut checked, job.as_str()).changed() {
                            state.toggle_job(job);
                        }
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        let has_data = state.dataset.is_some();
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui
                .add_enabled(has_data, egui::Button::new("Export CSV…"))
                .clicked()
            {
                export_dialog(state, ExportFormat::Csv);
                ui.close_menu();
            }
            if ui
                .add_enabled(has_data, egui::Button::new("Export Parquet…"))
                .clicked()
            {
                export_dialog(state, ExportFormat::Parquet);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records, {} matching",
                ds.len(),
                state.output.subset.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open campaign data")
        .add_filter("Supported files", &["csv", "txt", "parquet", "pq"])
        .add_filter("CSV (;-separated)", &["csv", "txt"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_from_path(&path);
    }
}

#[derive(Debug, Clone, Copy)]
enum ExportFormat {
    Csv,
    Parquet,
}

fn export_dialog(state: &mut AppState, format: ExportFormat) {
    let (name, label, ext) = match format {
        ExportFormat::Csv => ("bank_filtered.csv", "CSV", "csv"),
        ExportFormat::Parquet => ("bank_filtered.parquet", "Parquet", "parquet"),
    };
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export filtered data")
        .set_file_name(name)
        .add_filter(label, &[ext])
        .save_file()
    else {
        return;
    };

    let result = match format {
        ExportFormat::Csv => state.export_csv(&path),
        ExportFormat::Parquet => state.export_parquet(&path),
    };
    match result {
        Ok(()) => state.status_message = None,
        Err(e) => {
            log::error!("Export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
