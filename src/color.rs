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
// Color mapping: kind → Color32 (scatter plot series)
// ---------------------------------------------------------------------------

/// Maps the distinct `kind` values of a catalog to distinct colours.
#[derive(Debug, Clone, Default)]
pub struct KindColors {
    mapping: BTreeMap<String, Color32>,
}

impl KindColors {
    /// Build a colour map from the sorted distinct kind values.
    pub fn new(kinds: &[String]) -> Self {
        let palette = generate_palette(kinds.len());
        let mapping = kinds
            .iter()
            .cloned()
            .zip(palette)
            .collect();
        KindColors { mapping }
    }

    /// Look up the colour for a kind.
    pub fn color_for(&self, kind: &str) -> Color32 {
        self.mapping.get(kind).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_colors() {
        let palette = generate_palette(4);
        assert_eq!(palette.len(), 4);
        for i in 0..palette.len() {
            for j in (i + 1)..palette.len() {
                assert_ne!(palette[i], palette[j]);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_kind_falls_back_to_gray() {
        let colors = KindColors::new(&["Movie".to_string(), "TV Show".to_string()]);
        assert_ne!(colors.color_for("Movie"), colors.color_for("TV Show"));
        assert_eq!(colors.color_for("Documentary"), Color32::GRAY);
    }
}
