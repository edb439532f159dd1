mod app;
mod chart;
mod cli;
mod color;
mod data;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::{Context, Result};
use app::LaunchDashApp;
use clap::Parser;
use eframe::egui;

use cli::Cli;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    // Nothing is served until the dataset is loaded and validated.
    let dataset = Arc::new(data::loader::load_source(&cli.source)?);
    let mut state = AppState::new(dataset.clone());
    state.apply(cli.selection(&dataset));

    if cli.print_specs {
        let json = serde_json::to_string_pretty(&state.figures).context("serializing chart specs")?;
        println!("{json}");
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard window: {e}"))
}
