use std::sync::Arc;

mod backend_bridge;
mod config;
mod controller;
mod media;
mod ui;

use anyhow::Context;
use clap::Parser;
use client_core::HttpCatalog;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::config::{Cli, StartupConfig};
use crate::controller::events::UiEvent;
use crate::ui::ProductGridApp;

const APP_NAME: &str = "Product Grid";

fn init_tracing(cli_filter: Option<&str>) {
    let filter = cli_filter
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_filter.as_deref());

    let startup = StartupConfig::load(&cli).context("failed to load startup configuration")?;
    tracing::info!(
        catalog_url = %startup.catalog_url,
        timeout_secs = startup.request_timeout.as_secs(),
        "starting product grid"
    );
    let catalog = HttpCatalog::new(startup.catalog_url.clone(), startup.request_timeout)
        .context("failed to build catalog client")?;

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, Arc::new(catalog));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([720.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |_cc| Ok(Box::new(ProductGridApp::bootstrap(cmd_tx, ui_rx, &startup)))),
    )
    .map_err(|err| anyhow::anyhow!("ui event loop failed: {err}"))
}
