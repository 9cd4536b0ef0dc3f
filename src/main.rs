mod app;
mod color;
mod config;
mod data;
mod error;
mod fit;
mod render;
mod state;
mod ui;

use anyhow::{anyhow, Context};
use app::BenchViewerApp;
use config::ViewerConfig;
use eframe::egui;
use state::{AppState, ViewState};

/// Logger reading its filter from `filter_var`, `warn` when unset so that
/// skipped rows are always reported.
fn log_builder(filter_var: &str) -> env_logger::Builder {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(filter_var, "warn"))
}

fn main() -> anyhow::Result<()> {
    log_builder(env_logger::DEFAULT_FILTER_ENV).init();

    let config = ViewerConfig::load().context("loading configuration")?;

    let collection = match data::loader::load_dir(&config.results_dir) {
        Ok(Some(collection)) => collection,
        Ok(None) => {
            log::warn!("No valid data found in {}", config.results_dir.display());
            println!("No valid data found.");
            return Ok(());
        }
        Err(e) => {
            let e = anyhow::Error::from(e);
            log::error!("{e:#}");
            eprintln!("{e:#}");
            return Ok(());
        }
    };
    log::info!(
        "Loaded {} series from {}",
        collection.len(),
        config.results_dir.display()
    );

    // Start on the other group when the configured one has no files.
    let group = if collection.group_len(config.initial_group) > 0 {
        config.initial_group
    } else {
        config.initial_group.other()
    };
    let view = ViewState::with_toggles(&collection, group, config.log_scale, false);

    let state = AppState::new(collection, view, config.fit, config.results_dir.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Bench Viewer – Sorting Benchmarks",
        options,
        Box::new(|_cc| Ok(Box::new(BenchViewerApp::new(state)))),
    )
    .map_err(|e| anyhow!("running viewer: {e}"))
}
