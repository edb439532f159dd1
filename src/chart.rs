//! Chart specifications handed to the renderer.
//!
//! Everything here is a pure mapping from aggregated data to a plain,
//! serializable description of what to draw. The egui widgets in
//! [`crate::ui::plot`] and the `--print-specs` JSON output both consume it.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::color::{generate_palette, ColorMap, Rgb};
use crate::data::aggregate::{scatter_summary, success_summary, PieSummary, ScatterSummary};
use crate::data::filter::Selection;
use crate::data::model::{LaunchDataset, Outcome, PAYLOAD_COLUMN};

pub const MISSION_OUTCOME_TITLE: &str = "Mission Outcome";
pub const LEGEND_TITLE: &str = "Booster Version Category";

/// Horizontally centered title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
    /// Horizontal anchor as a fraction of the chart width.
    pub x: f32,
}

impl Title {
    pub fn centered(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            x: 0.5,
        }
    }
}

// ---------------------------------------------------------------------------
// Pie
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: usize,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename = "pie")]
pub struct PieChart {
    pub title: Title,
    pub slices: Vec<PieSlice>,
    /// Slice annotation, drawn inside each slice.
    pub text_info: &'static str,
}

impl PieChart {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.value).sum()
    }
}

pub fn pie_chart(summary: &PieSummary) -> PieChart {
    let palette = generate_palette(summary.counts.len());
    let slices = summary
        .counts
        .iter()
        .zip(palette)
        .map(|((label, value), color)| PieSlice {
            label: label.clone(),
            value: *value,
            color,
        })
        .collect();

    PieChart {
        title: Title::centered(summary.title()),
        slices,
        text_info: "percent+label",
    }
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
    /// Fixed tick positions; `None` lets the renderer choose.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<Vec<Tick>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerStyle {
    /// Diameter in points.
    pub size: f32,
    pub opacity: f32,
    pub line_width: f32,
    pub line_color: Rgb,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            size: 12.0,
            opacity: 0.7,
            line_width: 1.0,
            line_color: Rgb::DARK_SLATE_GREY,
        }
    }
}

/// All points of one booster category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub name: String,
    pub color: Rgb,
    /// `[payload_kg, class]` pairs.
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename = "scatter")]
pub struct ScatterChart {
    pub title: Title,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub legend_title: String,
    pub marker: MarkerStyle,
    pub series: Vec<ScatterSeries>,
}

impl ScatterChart {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

fn outcome_ticks() -> Vec<Tick> {
    [Outcome::Failure, Outcome::Success]
        .into_iter()
        .map(|o| Tick {
            value: o.class() as f64,
            label: o.label().to_string(),
        })
        .collect()
}

/// Group points into one series per booster category, in category order.
pub fn scatter_chart(summary: &ScatterSummary, colors: &ColorMap) -> ScatterChart {
    let mut grouped: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for point in &summary.points {
        grouped
            .entry(point.booster_category.as_str())
            .or_default()
            .push([point.payload_kg, point.class as f64]);
    }

    let series = grouped
        .into_iter()
        .map(|(name, points)| ScatterSeries {
            name: name.to_string(),
            color: colors.color_for(name),
            points,
        })
        .collect();

    ScatterChart {
        title: Title::centered(summary.title()),
        x_axis: Axis {
            title: PAYLOAD_COLUMN.to_string(),
            ticks: None,
        },
        y_axis: Axis {
            title: MISSION_OUTCOME_TITLE.to_string(),
            ticks: Some(outcome_ticks()),
        },
        legend_title: LEGEND_TITLE.to_string(),
        marker: MarkerStyle::default(),
        series,
    }
}

// ---------------------------------------------------------------------------
// Both charts for one selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardFigures {
    pub pie: PieChart,
    pub scatter: ScatterChart,
}

/// Run the whole pipeline (filter → aggregate → present) for `selection`.
pub fn render(dataset: &LaunchDataset, selection: &Selection, colors: &ColorMap) -> DashboardFigures {
    let summary = success_summary(dataset, &selection.site);
    let pie = pie_chart(&summary);
    let scatter = scatter_chart(&scatter_summary(dataset, selection), colors);

    log::debug!(
        "site={} payload=[{}, {}]: {} launches in {} pie slices, {} scatter points",
        selection.site,
        selection.payload.low(),
        selection.payload.high(),
        summary.total(),
        pie.slices.len(),
        scatter.point_count()
    );

    DashboardFigures { pie, scatter }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{PayloadRange, SiteFilter};
    use crate::data::model::tests::sample_dataset;

    fn figures(site: &str, low: f64, high: f64) -> DashboardFigures {
        let ds = sample_dataset();
        let colors = ColorMap::new(ds.booster_categories());
        let sel = Selection::new(SiteFilter::from_value(site), PayloadRange::new(low, high));
        render(&ds, &sel, &colors)
    }

    fn slice_values(pie: &PieChart) -> Vec<(&str, usize)> {
        pie.slices.iter().map(|s| (s.label.as_str(), s.value)).collect()
    }

    #[test]
    fn all_sites_pie() {
        let f = figures("ALL", 0.0, 10_000.0);
        assert_eq!(slice_values(&f.pie), [("VAFB", 2), ("CCAFS", 1)]);
        assert_eq!(f.pie.title, Title::centered("Total Success Launches By Site"));
        assert_eq!(f.pie.total(), 3);
    }

    #[test]
    fn single_site_pie() {
        let f = figures("CCAFS", 0.0, 10_000.0);
        assert_eq!(slice_values(&f.pie), [("Success", 1), ("Failure", 1)]);
    }

    #[test]
    fn pie_ignores_payload_range() {
        let narrow = figures("CCAFS", 0.0, 100.0);
        let wide = figures("CCAFS", 0.0, 10_000.0);
        assert_eq!(narrow.pie, wide.pie);
    }

    #[test]
    fn scatter_range_filter() {
        let f = figures("ALL", 1000.0, 5000.0);
        assert_eq!(f.scatter.point_count(), 1);
        assert_eq!(f.scatter.series.len(), 1);
        assert_eq!(f.scatter.series[0].name, "FT");
        assert_eq!(f.scatter.series[0].points, [[3000.0, 1.0]]);
    }

    #[test]
    fn scatter_axes_and_marker_are_fixed() {
        let f = figures("VAFB", 0.0, 10_000.0);
        let s = &f.scatter;
        assert_eq!(s.title.text, "Correlation between Payload and Success for site VAFB");
        assert_eq!(s.title.x, 0.5);
        assert_eq!(s.x_axis.title, "Payload Mass (kg)");
        assert_eq!(s.y_axis.title, "Mission Outcome");
        assert_eq!(
            s.y_axis.ticks,
            Some(vec![
                Tick { value: 0.0, label: "Failure".to_string() },
                Tick { value: 1.0, label: "Success".to_string() },
            ])
        );
        assert_eq!(s.legend_title, "Booster Version Category");
        assert_eq!(s.marker, MarkerStyle::default());
        assert_eq!(s.marker.line_color, Rgb::DARK_SLATE_GREY);
    }

    #[test]
    fn category_colour_survives_filtering() {
        let wide = figures("ALL", 0.0, 10_000.0);
        let narrow = figures("ALL", 1000.0, 5000.0);
        let ft_wide = wide.scatter.series.iter().find(|s| s.name == "FT").unwrap();
        let ft_narrow = narrow.scatter.series.iter().find(|s| s.name == "FT").unwrap();
        assert_eq!(ft_wide.color, ft_narrow.color);
    }

    #[test]
    fn empty_selection_renders_empty_charts() {
        let f = figures("KSC", 0.0, 10_000.0);
        assert_eq!(slice_values(&f.pie), [("Success", 0), ("Failure", 0)]);
        assert_eq!(f.pie.total(), 0);
        assert!(f.scatter.series.is_empty());
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(figures("ALL", 500.0, 7000.0), figures("ALL", 500.0, 7000.0));
    }

    #[test]
    fn specs_serialize_with_kind_tags() {
        let f = figures("ALL", 0.0, 10_000.0);
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["pie"]["kind"], "pie");
        assert_eq!(json["scatter"]["kind"], "scatter");
        assert_eq!(json["scatter"]["y_axis"]["ticks"][1]["label"], "Success");
        assert_eq!(json["scatter"]["marker"]["line_color"], "#2f4f4f");
        assert!(json["scatter"]["x_axis"].get("ticks").is_none());
    }
}
