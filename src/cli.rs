use clap::Parser;

use crate::data::filter::{PayloadRange, Selection, SiteFilter, ALL_SITES};
use crate::data::loader::DEFAULT_SOURCE;
use crate::data::model::LaunchDataset;

/// Launch records dashboard.
#[derive(Debug, Parser)]
#[command(name = "launch-dash", version, about)]
pub struct Cli {
    /// Dataset to load: an http(s) URL or a .csv / .json / .parquet file.
    #[arg(long, short, env = "LAUNCH_DASH_SOURCE", default_value = DEFAULT_SOURCE)]
    pub source: String,

    /// Print both chart specifications as JSON and exit instead of opening a window.
    #[arg(long)]
    pub print_specs: bool,

    /// Initial launch site, or ALL.
    #[arg(long, default_value = ALL_SITES)]
    pub site: String,

    /// Initial lower payload bound in kg (defaults to the smallest observed payload).
    #[arg(long, value_name = "KG")]
    pub payload_min: Option<f64>,

    /// Initial upper payload bound in kg (defaults to the largest observed payload).
    #[arg(long, value_name = "KG")]
    pub payload_max: Option<f64>,
}

impl Cli {
    /// Selection described by the flags, falling back to the dataset's defaults.
    pub fn selection(&self, dataset: &LaunchDataset) -> Selection {
        let low = self.payload_min.unwrap_or(dataset.payload_min());
        let high = self.payload_max.unwrap_or(dataset.payload_max());
        Selection::new(SiteFilter::from_value(&self.site), PayloadRange::new(low, high))
    }
}
