use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

/// Render the filtered rows, capped at the preview size unless "Show all" is on.
pub fn filtered_table(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = state.dataset.clone() else {
        return;
    };

    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Filtered rows");
        ui.checkbox(&mut state.show_all_rows, "Show all rows");
    });

    let subset = &state.output.subset;
    if subset.is_empty() {
        ui.label("No matching data for the current filters.");
        return;
    }

    let n_rows = state.visible_rows();
    ui.label(format!("Showing {n_rows} of {} matching rows", subset.len()));

    egui::ScrollArea::horizontal()
        .id_salt("filtered_table_scroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .vscroll(false)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .columns(Column::auto().at_least(40.0), dataset.headers.len())
                .header(20.0, |mut header| {
                    for name in &dataset.headers {
                        header.col(|ui: &mut Ui| {
                            ui.strong(name.as_str());
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, n_rows, |mut row| {
                        let record = &subset[row.index()];
                        for cell in &record.cells {
                            row.col(|ui: &mut Ui| {
                                ui.label(cell.as_str());
                            });
                        }
                    });
                });
        });
}
