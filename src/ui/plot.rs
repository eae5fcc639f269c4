use eframe::egui::{self, Color32, Ui};
use egui_plot::{Bar, BarChart, Plot, PlotPoint, Text};

use crate::color::OutcomeColors;
use crate::data::summary::ProportionSummary;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Outcome comparison charts (central panel)
// ---------------------------------------------------------------------------

/// Render the full-vs-filtered outcome share charts side by side.
pub fn outcome_charts(ui: &mut Ui, state: &AppState) {
    ui.heading(format!(
        "Age {} to {} years",
        state.criteria.min_age, state.criteria.max_age
    ));
    ui.label("Share of campaign outcomes (y)");

    let colors = state.colors.as_ref();
    ui.columns(2, |cols: &mut [Ui]| {
        outcome_chart(
            &mut cols[0],
            "full_outcome",
            "Full dataset",
            &state.output.full,
            colors,
        );
        outcome_chart(
            &mut cols[1],
            "filtered_outcome",
            "Filtered",
            &state.output.filtered,
            colors,
        );
    });
}

fn outcome_chart(
    ui: &mut Ui,
    id: &str,
    title: &str,
    summary: &ProportionSummary,
    colors: Option<&OutcomeColors>,
) {
    ui.strong(format!("{title}  (n = {})", summary.total));

    if summary.is_empty() {
        ui.allocate_ui(egui::vec2(ui.available_width(), CHART_HEIGHT), |ui: &mut Ui| {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label("No matching data for the current filters.");
            });
        });
        return;
    }

    let bars: Vec<Bar> = summary
        .iter()
        .enumerate()
        .map(|(i, share)| {
            let color = colors
                .map(|c| c.color_for(&share.value))
                .unwrap_or(Color32::LIGHT_BLUE);
            Bar::new(i as f64, share.percent)
                .name(&share.value)
                .fill(color)
                .width(0.6)
        })
        .collect();

    let labels: Vec<String> = summary.iter().map(|s| s.value.clone()).collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .include_y(0.0)
        .include_y(110.0)
        .x_axis_label("Outcome (y)")
        .y_axis_label("Share (%)")
        .x_axis_formatter(move |mark, _range| {
            let slot = mark.value.round();
            if (mark.value - slot).abs() > 1e-6 || slot < 0.0 {
                return String::new();
            }
            labels.get(slot as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).element_formatter(Box::new(
                |bar: &Bar, _chart: &BarChart| format!("{}: {:.2}%", bar.name, bar.value),
            )));

            for (i, share) in summary.iter().enumerate() {
                plot_ui.text(Text::new(
                    PlotPoint::new(i as f64, share.percent + 5.0),
                    format!("{:.2}%", share.percent),
                ));
            }
        });
}
