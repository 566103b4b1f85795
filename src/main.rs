// Application entry point for the Disk Info Viewer

// Command-line options
mod config;
// Administrator privilege shim
mod elevation;
// Import the GUI module containing the main application state
mod gui;
// Import data models for parsed disk rows
mod models;

use anyhow::anyhow;
use clap::Parser;
use config::Args;
use elevation::ElevationOutcome;

/// Entry point for the application.
/// Makes sure the process is elevated, then opens the viewer window.
fn main() -> anyhow::Result<()> {
    // Log level comes from DISK_INFO_LOG; bad or missing values mean INFO
    let log_level = std::env::var("DISK_INFO_LOG")
        .ok()
        .and_then(|v| v.parse::<tracing::Level>().ok())
        .unwrap_or(tracing::Level::INFO);

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if !args.no_elevate {
        let cap = elevation::platform();
        if elevation::ensure_elevated(&cap, args.relaunched)? == ElevationOutcome::Relaunched {
            return Ok(());
        }
    }

    let lister = gui::DiskLister::new(args.tool_path()?);
    let theme = args.theme;

    // Configure window options: 800x600 at (100, 100)
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Disk Info Viewer")
            .with_position([100.0, 100.0])
            .with_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    // The tool runs inside AppState::new, before the first frame
    eframe::run_native(
        "Disk Info Viewer",
        options,
        Box::new(move |cc| Ok(Box::new(gui::AppState::new(cc, &lister, theme)))),
    )
    .map_err(|e| anyhow!("eframe error: {e}"))
}
