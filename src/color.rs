use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Rgb – toolkit-independent colour used in chart specifications
// ---------------------------------------------------------------------------

/// An opaque sRGB colour. Serializes as `"#rrggbb"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// CSS `DarkSlateGrey`, the scatter marker outline.
    pub const DARK_SLATE_GREY: Rgb = Rgb(0x2f, 0x4f, 0x4f);
    pub const GRAY: Rgb = Rgb(0xa0, 0xa0, 0xa0);

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Convert for painting, applying `opacity` in `[0, 1]`.
    pub fn with_opacity(self, opacity: f32) -> Color32 {
        let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color32::from_rgba_unmultiplied(self.0, self.1, self.2, alpha)
    }
}

impl From<Rgb> for Color32 {
    fn from(c: Rgb) -> Self {
        Color32::from_rgb(c.0, c.1, c.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category → Rgb
// ---------------------------------------------------------------------------

/// Maps every category of a column to a distinct colour.
///
/// Built once from the whole dataset, so a category keeps its colour no
/// matter which subset is currently plotted.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Rgb>,
    default_color: Rgb,
}

impl ColorMap {
    pub fn new(categories: &BTreeSet<String>) -> Self {
        let palette = generate_palette(categories.len());
        let mapping = categories.iter().cloned().zip(palette).collect();

        ColorMap {
            mapping,
            default_color: Rgb::GRAY,
        }
    }

    /// Look up the colour for a category; unknown categories are grey.
    pub fn color_for(&self, category: &str) -> Rgb {
        self.mapping
            .get(category)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_colours() {
        assert!(generate_palette(0).is_empty());
        let colours = generate_palette(5);
        assert_eq!(colours.len(), 5);
        let unique: BTreeSet<_> = colours.iter().map(Rgb::hex).collect();
        assert_eq!(unique.len(), 5);
    }

    #[test]
    fn category_colours_are_stable() {
        let all: BTreeSet<String> = ["B4", "B5", "FT", "v1.0", "v1.1"]
            .into_iter()
            .map(String::from)
            .collect();
        let a = ColorMap::new(&all);
        let b = ColorMap::new(&all);
        for cat in &all {
            assert_eq!(a.color_for(cat), b.color_for(cat));
        }
        assert_eq!(a.color_for("unknown"), Rgb::GRAY);
    }

    #[test]
    fn hex_and_opacity() {
        assert_eq!(Rgb::DARK_SLATE_GREY.hex(), "#2f4f4f");
        assert_eq!(Rgb(255, 0, 0).with_opacity(0.5).a(), 128);
        assert_eq!(Rgb(255, 0, 0).with_opacity(2.0).a(), 255);
    }
}
