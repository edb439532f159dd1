use std::collections::BTreeSet;
use std::fmt;

use super::error::DatasetError;

/// Column headers expected in every launch dataset.
pub const SITE_COLUMN: &str = "Launch Site";
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
pub const BOOSTER_COLUMN: &str = "Booster Version Category";
pub const CLASS_COLUMN: &str = "class";

pub const REQUIRED_COLUMNS: [&str; 4] = [SITE_COLUMN, PAYLOAD_COLUMN, BOOSTER_COLUMN, CLASS_COLUMN];

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Mission outcome as recorded in the `class` column (1 = success, 0 = failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Interpret a numeric class cell. Accepts `0`, `1`, `0.0` and `1.0`.
    pub fn from_class(value: f64) -> Option<Self> {
        if value == 0.0 {
            Some(Outcome::Failure)
        } else if value == 1.0 {
            Some(Outcome::Success)
        } else {
            None
        }
    }

    /// The numeric class value, used as the scatter y coordinate.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub site: String,
    pub payload_kg: f64,
    pub booster_category: String,
    pub outcome: Outcome,
}

impl LaunchRecord {
    pub fn new(
        site: impl Into<String>,
        payload_kg: f64,
        booster_category: impl Into<String>,
        outcome: Outcome,
    ) -> Self {
        Self {
            site: site.into(),
            payload_kg,
            booster_category: booster_category.into(),
            outcome,
        }
    }

    /// Build a record from raw cell values, rejecting anything the
    /// dashboard cannot plot. `row` is zero-based and only used in errors.
    pub fn from_cells(
        row: usize,
        site: &str,
        payload_kg: f64,
        booster_category: &str,
        class: f64,
    ) -> Result<Self, DatasetError> {
        let site = site.trim();
        if site.is_empty() {
            return Err(DatasetError::EmptyCell { row, column: SITE_COLUMN });
        }
        let booster_category = booster_category.trim();
        if booster_category.is_empty() {
            return Err(DatasetError::EmptyCell { row, column: BOOSTER_COLUMN });
        }
        if !payload_kg.is_finite() || payload_kg < 0.0 {
            return Err(DatasetError::InvalidPayload {
                row,
                value: payload_kg.to_string(),
            });
        }
        let outcome = Outcome::from_class(class).ok_or_else(|| DatasetError::InvalidClass {
            row,
            value: class.to_string(),
        })?;

        Ok(Self::new(site, payload_kg, booster_category, outcome))
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full, immutable dataset with pre-computed indices.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    sites: BTreeSet<String>,
    booster_categories: BTreeSet<String>,
    payload_min: f64,
    payload_max: f64,
}

impl LaunchDataset {
    /// Build indices from the loaded records. An empty table is an error.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut sites = BTreeSet::new();
        let mut booster_categories = BTreeSet::new();
        let mut payload_min = f64::INFINITY;
        let mut payload_max = f64::NEG_INFINITY;

        for record in &records {
            sites.insert(record.site.clone());
            booster_categories.insert(record.booster_category.clone());
            payload_min = payload_min.min(record.payload_kg);
            payload_max = payload_max.max(record.payload_kg);
        }

        Ok(Self {
            records,
            sites,
            booster_categories,
            payload_min,
            payload_max,
        })
    }

    /// All records in source order.
    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Distinct launch sites, sorted.
    pub fn sites(&self) -> &BTreeSet<String> {
        &self.sites
    }

    /// Distinct booster version categories, sorted.
    pub fn booster_categories(&self) -> &BTreeSet<String> {
        &self.booster_categories
    }

    pub fn has_site(&self, site: &str) -> bool {
        self.sites.contains(site)
    }

    /// Smallest observed payload mass in kg.
    pub fn payload_min(&self) -> f64 {
        self.payload_min
    }

    /// Largest observed payload mass in kg.
    pub fn payload_max(&self) -> f64 {
        self.payload_max
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}
