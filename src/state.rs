use std::sync::Arc;

use crate::chart::{render, DashboardFigures};
use crate::color::ColorMap;
use crate::data::filter::{slider_max, PayloadRange, Selection, SiteFilter};
use crate::data::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded once at startup, read-only afterwards.
    pub dataset: Arc<LaunchDataset>,

    /// Current filter, with the payload range clamped to the dataset.
    pub selection: Selection,

    /// Payload slider handle positions as the user left them. May reach past
    /// the observed payloads, up to `slider_max`.
    pub handles: PayloadRange,

    /// Booster category colours, fixed for the dataset.
    pub color_map: ColorMap,

    /// Charts for the current selection (cached until the selection changes).
    pub figures: DashboardFigures,

    /// Upper bound of the payload control.
    pub slider_max: f64,
}

impl AppState {
    /// Start with the initial selection.
    pub fn new(dataset: Arc<LaunchDataset>) -> Self {
        let color_map = ColorMap::new(dataset.booster_categories());
        let selection = Selection::initial(&dataset);
        let figures = render(&dataset, &selection, &color_map);
        let slider_max = slider_max(&dataset);
        Self {
            handles: selection.payload,
            dataset,
            selection,
            color_map,
            figures,
            slider_max,
        }
    }

    /// Replace both controls at once.
    pub fn apply(&mut self, selection: Selection) {
        self.handles = selection.payload;
        self.selection = selection;
        self.refresh();
    }

    /// Recompute `selection` from the controls, then `figures`.
    pub fn refresh(&mut self) {
        self.selection =
            Selection::new(self.selection.site.clone(), self.handles).clamped_to(&self.dataset);
        self.figures = render(&self.dataset, &self.selection, &self.color_map);
    }

    /// Dropdown changed.
    pub fn set_site(&mut self, site: SiteFilter) {
        if self.selection.site != site {
            self.selection.site = site;
            self.refresh();
        }
    }

    /// Range control changed. Inverted bounds are swapped.
    pub fn set_payload_range(&mut self, low: f64, high: f64) {
        let handles = PayloadRange::new(low, high);
        if self.handles != handles {
            self.handles = handles;
            self.refresh();
        }
    }

    /// Back to all sites and the full observed payload range.
    pub fn reset(&mut self) {
        self.apply(Selection::initial(&self.dataset));
    }

    /// Launches passing the current payload range and site filter.
    pub fn visible_launches(&self) -> usize {
        self.figures.scatter.point_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::filter_records;
    use crate::data::model::tests::sample_dataset;

    fn state() -> AppState {
        AppState::new(Arc::new(sample_dataset()))
    }

    #[test]
    fn starts_with_everything_visible() {
        let s = state();
        assert!(s.selection.site.is_all());
        assert_eq!(s.visible_launches(), 4);
        assert_eq!(s.slider_max, 10_000.0);
    }

    #[test]
    fn site_change_recomputes_both_charts() {
        let mut s = state();
        s.set_site(SiteFilter::from_value("CCAFS"));
        assert_eq!(s.figures.pie.slices.len(), 2);
        assert_eq!(s.visible_launches(), 2);
        assert!(s.figures.scatter.title.text.ends_with("for site CCAFS"));
    }

    #[test]
    fn range_change_only_moves_scatter() {
        let mut s = state();
        let pie_before = s.figures.pie.clone();
        s.set_payload_range(1000.0, 5000.0);
        assert_eq!(s.visible_launches(), 1);
        assert_eq!(s.figures.pie, pie_before);
    }

    #[test]
    fn inverted_range_is_normalized() {
        let mut s = state();
        s.set_payload_range(5000.0, 1000.0);
        assert_eq!(s.selection.payload.low(), 1000.0);
        assert_eq!(s.selection.payload.high(), 5000.0);
        assert_eq!(s.visible_launches(), 1);
    }

    #[test]
    fn range_is_clamped_to_observed_payloads() {
        let mut s = state();
        s.set_payload_range(0.0, 10_000.0);
        assert_eq!(s.selection.payload.high(), 9000.0);
        assert_eq!(s.handles.high(), 10_000.0);
        assert_eq!(s.visible_launches(), 4);
    }

    #[test]
    fn range_above_heaviest_launch_shows_nothing() {
        let mut s = state();
        s.set_payload_range(10_000.0, 10_000.0);
        let unclamped = Selection::new(SiteFilter::All, PayloadRange::new(10_000.0, 10_000.0));
        assert!(filter_records(&s.dataset, &unclamped).is_empty());
        assert_eq!(s.visible_launches(), 0);
        assert_eq!((s.handles.low(), s.handles.high()), (10_000.0, 10_000.0));
    }

    #[test]
    fn apply_routes_through_the_same_clamp() {
        let mut s = state();
        s.apply(Selection::new(
            SiteFilter::from_value("VAFB"),
            PayloadRange::new(-50.0, 600.0),
        ));
        assert_eq!((s.selection.payload.low(), s.selection.payload.high()), (0.0, 600.0));
        assert_eq!(s.visible_launches(), 1);
    }

    #[test]
    fn reset_restores_initial_selection() {
        let mut s = state();
        s.set_site(SiteFilter::from_value("VAFB"));
        s.set_payload_range(0.0, 100.0);
        s.reset();
        assert_eq!(s.selection, Selection::initial(&s.dataset));
        assert_eq!(s.visible_launches(), 4);
    }
}
