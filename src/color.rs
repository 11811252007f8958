use std::collections::BTreeMap;

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
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
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
// Color mapping: brand → Color32
// ---------------------------------------------------------------------------

/// Stable brand-to-colour assignment for the per-brand bar chart.
///
/// Built once from the full brand list of the prepared table, so a brand
/// keeps its colour no matter which subset of brands is selected.
#[derive(Debug, Clone, Default)]
pub struct BrandColors {
    mapping: BTreeMap<String, Color32>,
}

impl BrandColors {
    /// Assign a colour to every brand, in the given order.
    pub fn new(brands: &[String]) -> Self {
        let palette = generate_palette(brands.len());
        let mapping = brands
            .iter()
            .cloned()
            .zip(palette)
            .collect::<BTreeMap<String, Color32>>();
        BrandColors { mapping }
    }

    /// Look up the colour for a brand; unknown brands render gray.
    pub fn color_for(&self, brand: &str) -> Color32 {
        self.mapping.get(brand).copied().unwrap_or(Color32::GRAY)
    }
}
