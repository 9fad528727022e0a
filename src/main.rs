//! Revolution Chat - Main Entry Point
//!
//! Native chat window backed by a remote `/chat` endpoint.

use anyhow::Context;
use eframe::egui;
use revolution_chat::{ChatApp, Config};
use tracing::info;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    // Requests run here; the window stays on the main thread
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let app = ChatApp::from_config(&config, runtime.handle().clone())
        .context("failed to initialize chat session")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&config.ui.title)
            .with_inner_size([520.0, 700.0])
            .with_min_inner_size([360.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        &config.ui.title,
        options,
        Box::new(move |cc| Box::new(app.attach_repaint(&cc.egui_ctx))),
    )
    .map_err(|e| anyhow::anyhow!("window error: {}", e))?;

    info!("Chat window closed");
    Ok(())
}
