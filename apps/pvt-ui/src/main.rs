#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod playback;
mod scene_view;

use app::PvtApp;
use clap::Parser;
use pvt_scene::{SceneConfig, load_yaml};
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pvt-ui")]
#[command(about = "Animated pressure-volume diagram", long_about = None)]
struct Args {
    /// Answer property queries from the built-in analytic water dome instead of CoolProp
    #[arg(long)]
    offline: bool,

    /// Scene configuration YAML file
    config: Option<PathBuf>,
}

/// Scene to start with; a file that fails to load yields the default scene and the error.
fn initial_config(path: Option<&Path>) -> (SceneConfig, Option<String>) {
    let Some(path) = path else {
        return (SceneConfig::default(), None);
    };
    match load_yaml(path) {
        Ok(config) => (config, None),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "scene file failed to load");
            (
                SceneConfig::default(),
                Some(format!("{}: {e}", path.display())),
            )
        }
    }
}

fn main() -> eframe::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .init();

    let args = Args::parse();
    let (config, load_error) = initial_config(args.config.as_deref());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_title("Pressure-Volume Diagram"),
        ..Default::default()
    };

    eframe::run_native(
        "Pressure-Volume Diagram",
        options,
        Box::new(move |cc| Ok(Box::new(PvtApp::new(cc, config, args.offline, load_error)))),
    )
}
