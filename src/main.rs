use anyhow::{anyhow, Context, Result};
use eframe::egui;

use command_explorer::{AppConfig, ExplorerApp};

fn main() -> Result<()> {
    // A missing .env file is fine; everything has a default.
    let _ = dotenvy::dotenv();

    env_logger::Builder::from_env(
        env_logger::Env::new()
            .filter_or("EXPLORER_LOG", "info")
            .write_style("EXPLORER_LOG_STYLE"),
    )
    .init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let app = ExplorerApp::new(&config)?;
    log::info!("starting in {}", std::env::current_dir()?.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.width, config.height])
            .with_title(config.title.clone())
            .with_resizable(true),
        ..Default::default()
    };

    let font_size = config.font_size;
    eframe::run_native(
        "command-explorer",
        options,
        Box::new(move |cc| {
            ExplorerApp::apply_theme(&cc.egui_ctx, font_size);
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| anyhow!("window closed with an error: {err}"))
}
