use std::collections::BTreeMap;

use super::filter::{filter_records, records_for_site, Selection, SiteFilter};
use super::model::{LaunchDataset, Outcome};

// ---------------------------------------------------------------------------
// Success / failure counts (pie chart)
// ---------------------------------------------------------------------------

/// Category counts behind the pie chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSummary {
    pub site: SiteFilter,
    /// `(label, count)` in display order.
    pub counts: Vec<(String, usize)>,
}

impl PieSummary {
    pub fn title(&self) -> String {
        match &self.site {
            SiteFilter::All => "Total Success Launches By Site".to_string(),
            SiteFilter::Site(site) => format!("Total Success Launches for site {site}"),
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}

/// Count successes for the pie chart. The payload range plays no part here.
///
/// * All sites: successes grouped by site, largest first; sites without a
///   single success are left out.
/// * One site: exactly two entries, `Success` then `Failure`.
pub fn success_summary(dataset: &LaunchDataset, site: &SiteFilter) -> PieSummary {
    let counts = match site {
        SiteFilter::All => {
            let mut by_site: BTreeMap<&str, usize> = BTreeMap::new();
            for record in dataset.records().iter().filter(|r| r.outcome.is_success()) {
                *by_site.entry(record.site.as_str()).or_default() += 1;
            }
            let mut counts: Vec<(String, usize)> = by_site
                .into_iter()
                .map(|(site, n)| (site.to_string(), n))
                .collect();
            // Stable sort keeps the alphabetical order among equal counts.
            counts.sort_by(|a, b| b.1.cmp(&a.1));
            counts
        }
        SiteFilter::Site(_) => {
            let records = records_for_site(dataset, site);
            let successes = records.iter().filter(|r| r.outcome.is_success()).count();
            vec![
                (Outcome::Success.label().to_string(), successes),
                (Outcome::Failure.label().to_string(), records.len() - successes),
            ]
        }
    };

    PieSummary {
        site: site.clone(),
        counts,
    }
}

// ---------------------------------------------------------------------------
// Payload vs outcome projection (scatter chart)
// ---------------------------------------------------------------------------

/// One scatter marker: x = payload, y = class, colour = booster category.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub payload_kg: f64,
    pub class: u8,
    pub booster_category: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSummary {
    pub site: SiteFilter,
    pub points: Vec<ScatterPoint>,
}

impl ScatterSummary {
    pub fn title(&self) -> String {
        match &self.site {
            SiteFilter::All => "Correlation between Payload and Success for all Sites".to_string(),
            SiteFilter::Site(site) => {
                format!("Correlation between Payload and Success for site {site}")
            }
        }
    }
}

/// Project every record matching `selection` to a scatter point, 1:1.
pub fn scatter_summary(dataset: &LaunchDataset, selection: &Selection) -> ScatterSummary {
    let points = filter_records(dataset, selection)
        .into_iter()
        .map(|record| ScatterPoint {
            payload_kg: record.payload_kg,
            class: record.outcome.class(),
            booster_category: record.booster_category.clone(),
        })
        .collect();

    ScatterSummary {
        site: selection.site.clone(),
        points,
    }
}
