use std::fmt;

use super::model::{LaunchDataset, LaunchRecord};

/// Dropdown value meaning "every launch site".
pub const ALL_SITES: &str = "ALL";
/// Dropdown label shown for [`ALL_SITES`].
pub const ALL_SITES_LABEL: &str = "All Sites";

/// Payload range control domain, in kg.
pub const SLIDER_MIN: f64 = 0.0;
pub const SLIDER_MAX: f64 = 10_000.0;
pub const SLIDER_STEP: f64 = 1_000.0;
pub const SLIDER_MARKS: [f64; 5] = [0.0, 2_500.0, 5_000.0, 7_500.0, 10_000.0];

/// Upper end of the payload control for `dataset`; never below [`SLIDER_MAX`].
pub fn slider_max(dataset: &LaunchDataset) -> f64 {
    SLIDER_MAX.max(dataset.payload_max().ceil())
}

// ---------------------------------------------------------------------------
// Site filter
// ---------------------------------------------------------------------------

/// Site dropdown state: the "all sites" sentinel or one concrete site.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteFilter {
    #[default]
    All,
    Site(String),
}

impl SiteFilter {
    /// Parse a dropdown value; [`ALL_SITES`] maps to [`SiteFilter::All`].
    pub fn from_value(value: &str) -> Self {
        if value == ALL_SITES {
            SiteFilter::All
        } else {
            SiteFilter::Site(value.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, SiteFilter::All)
    }

    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteFilter::All => true,
            SiteFilter::Site(selected) => selected == site,
        }
    }

    /// Text shown in the dropdown.
    pub fn label(&self) -> &str {
        match self {
            SiteFilter::All => ALL_SITES_LABEL,
            SiteFilter::Site(site) => site,
        }
    }
}

impl fmt::Display for SiteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteFilter::All => f.write_str(ALL_SITES),
            SiteFilter::Site(site) => f.write_str(site),
        }
    }
}

// ---------------------------------------------------------------------------
// Payload range
// ---------------------------------------------------------------------------

/// Inclusive payload interval in kg. `low <= high` always holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    /// Build a range; inverted bounds are swapped.
    pub fn new(a: f64, b: f64) -> Self {
        if a > b {
            log::warn!("payload range [{a}, {b}] is inverted, using [{b}, {a}]");
            Self { low: b, high: a }
        } else {
            Self { low: a, high: b }
        }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// Both ends inclusive.
    pub fn contains(&self, payload_kg: f64) -> bool {
        payload_kg >= self.low && payload_kg <= self.high
    }

    /// Pull the outer bounds in to `[0, max]`.
    ///
    /// A range lying entirely outside `[0, max]` is returned unchanged and
    /// keeps matching nothing.
    pub fn clamped(&self, max: f64) -> Self {
        if self.high < 0.0 || self.low > max {
            return *self;
        }
        Self {
            low: self.low.max(0.0),
            high: self.high.min(max),
        }
    }
}

// ---------------------------------------------------------------------------
// Selection – the full control state for one interaction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub site: SiteFilter,
    pub payload: PayloadRange,
}

impl Selection {
    pub fn new(site: SiteFilter, payload: PayloadRange) -> Self {
        Self { site, payload }
    }

    /// The state the controls start in: all sites, full observed payload range.
    pub fn initial(dataset: &LaunchDataset) -> Self {
        Self {
            site: SiteFilter::All,
            payload: PayloadRange::new(dataset.payload_min(), dataset.payload_max()),
        }
    }

    /// Clamp the payload range to `[0, max observed payload]`.
    ///
    /// Payloads are never negative and never above the observed maximum, so
    /// the clamped selection matches exactly the same records.
    pub fn clamped_to(&self, dataset: &LaunchDataset) -> Self {
        if let SiteFilter::Site(site) = &self.site {
            if !dataset.has_site(site) {
                log::warn!("site '{site}' does not occur in the dataset");
            }
        }
        Self {
            site: self.site.clone(),
            payload: self.payload.clamped(dataset.payload_max()),
        }
    }
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

/// Records at the selected site, ignoring the payload range.
pub fn records_for_site<'a>(dataset: &'a LaunchDataset, site: &SiteFilter) -> Vec<&'a LaunchRecord> {
    dataset
        .records()
        .iter()
        .filter(|record| site.matches(&record.site))
        .collect()
}

/// Records passing both the site filter and the payload range, in source order.
///
/// An unknown site or an empty range yields an empty vector.
pub fn filter_records<'a>(dataset: &'a LaunchDataset, selection: &Selection) -> Vec<&'a LaunchRecord> {
    dataset
        .records()
        .iter()
        .filter(|record| {
            selection.payload.contains(record.payload_kg) && selection.site.matches(&record.site)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::sample_dataset;

    fn payloads(records: &[&LaunchRecord]) -> Vec<f64> {
        records.iter().map(|r| r.payload_kg).collect()
    }

    #[test]
    fn all_sites_full_range_keeps_everything() {
        let ds = sample_dataset();
        let sel = Selection::new(SiteFilter::All, PayloadRange::new(0.0, 10_000.0));
        assert_eq!(filter_records(&ds, &sel).len(), 4);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let ds = sample_dataset();
        let sel = Selection::new(SiteFilter::All, PayloadRange::new(3000.0, 7000.0));
        assert_eq!(payloads(&filter_records(&ds, &sel)), [3000.0, 7000.0]);
    }

    #[test]
    fn site_and_range_are_combined() {
        let ds = sample_dataset();
        let sel = Selection::new(SiteFilter::from_value("VAFB"), PayloadRange::new(0.0, 5000.0));
        let hits = filter_records(&ds, &sel);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].site, "VAFB");
        assert_eq!(hits[0].payload_kg, 500.0);
    }

    #[test]
    fn every_result_satisfies_the_predicate() {
        let ds = sample_dataset();
        for site in ["ALL", "CCAFS", "VAFB", "KSC"] {
            for (low, high) in [(0.0, 10_000.0), (1000.0, 5000.0), (7000.0, 9000.0), (600.0, 700.0)] {
                let sel = Selection::new(SiteFilter::from_value(site), PayloadRange::new(low, high));
                for record in filter_records(&ds, &sel) {
                    assert!(record.payload_kg >= low && record.payload_kg <= high);
                    assert!(site == ALL_SITES || record.site == site);
                }
            }
        }
    }

    #[test]
    fn unknown_site_yields_empty_not_error() {
        let ds = sample_dataset();
        let sel = Selection::new(SiteFilter::from_value("KSC"), PayloadRange::new(0.0, 10_000.0));
        assert!(filter_records(&ds, &sel).is_empty());
        assert!(records_for_site(&ds, &sel.site).is_empty());
    }

    #[test]
    fn inverted_range_is_swapped() {
        let range = PayloadRange::new(5000.0, 1000.0);
        assert_eq!((range.low(), range.high()), (1000.0, 5000.0));

        let ds = sample_dataset();
        let sel = Selection::new(SiteFilter::All, range);
        assert_eq!(payloads(&filter_records(&ds, &sel)), [3000.0]);
    }

    #[test]
    fn site_view_ignores_payload() {
        let ds = sample_dataset();
        let hits = records_for_site(&ds, &SiteFilter::from_value("CCAFS"));
        assert_eq!(payloads(&hits), [3000.0, 7000.0]);
    }

    #[test]
    fn initial_selection_spans_observed_payloads() {
        let ds = sample_dataset();
        let sel = Selection::initial(&ds);
        assert!(sel.site.is_all());
        assert_eq!((sel.payload.low(), sel.payload.high()), (500.0, 9000.0));
    }

    #[test]
    fn clamping_keeps_bounds_inside_observed_range() {
        let ds = sample_dataset();
        let sel = Selection::new(SiteFilter::All, PayloadRange::new(-100.0, 10_000.0)).clamped_to(&ds);
        assert_eq!((sel.payload.low(), sel.payload.high()), (0.0, 9000.0));
        assert_eq!(slider_max(&ds), SLIDER_MAX);
    }

    #[test]
    fn clamping_does_not_change_matches() {
        let ds = sample_dataset();
        let ranges = [
            (10_000.0, 10_000.0),
            (9_500.0, 10_000.0),
            (-5.0, -1.0),
            (-100.0, 500.0),
            (0.0, 10_000.0),
            (3000.0, 3000.0),
        ];
        for (low, high) in ranges {
            let raw = Selection::new(SiteFilter::All, PayloadRange::new(low, high));
            let clamped = raw.clamped_to(&ds);
            assert_eq!(
                filter_records(&ds, &clamped),
                filter_records(&ds, &raw),
                "range [{low}, {high}]"
            );
        }
    }

    #[test]
    fn range_beyond_heaviest_launch_stays_empty() {
        let ds = sample_dataset();
        let sel = Selection::new(SiteFilter::All, PayloadRange::new(10_000.0, 10_000.0)).clamped_to(&ds);
        assert_eq!((sel.payload.low(), sel.payload.high()), (10_000.0, 10_000.0));
        assert!(filter_records(&ds, &sel).is_empty());

        let below = PayloadRange::new(-5.0, -1.0).clamped(ds.payload_max());
        assert_eq!((below.low(), below.high()), (-5.0, -1.0));
    }

    #[test]
    fn sentinel_round_trips_through_display() {
        assert_eq!(SiteFilter::from_value(ALL_SITES), SiteFilter::All);
        assert_eq!(SiteFilter::All.to_string(), ALL_SITES);
        assert_eq!(SiteFilter::All.label(), ALL_SITES_LABEL);
        assert_eq!(SiteFilter::from_value("VAFB").label(), "VAFB");
    }
}
