use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            // Offset so a two-value outcome lands on red / teal.
            let hue = (i as f32 / n as f32) * 360.0 + 10.0;
            let hsl = Hsl::new(hue, 0.65, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Outcome colours: `y` value → Color32
// ---------------------------------------------------------------------------

/// Stable colour per outcome value, shared by both charts.
#[derive(Debug, Clone)]
pub struct OutcomeColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl OutcomeColors {
    pub fn new(outcomes: &BTreeSet<String>) -> Self {
        let mapping = outcomes
            .iter()
            .cloned()
            .zip(generate_palette(outcomes.len()))
            .collect();
        OutcomeColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given outcome value.
    pub fn color_for(&self, value: &str) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }
}
