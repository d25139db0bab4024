//! GUI entry point for Plastiscan

mod analyzing_panel;
mod app;
mod capture_panel;
mod result_panel;

use app::PlastiscanApp;
use eframe::egui;
use plastiscan_app::{logging, Config};

fn main() -> eframe::Result<()> {
    let config = Config::load().unwrap_or_default();
    logging::init(&config.log_level);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start async runtime: {}", e);
            std::process::exit(1);
        }
    };
    let _guard = runtime.enter();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 760.0])
            .with_min_inner_size([640.0, 520.0]),
        ..Default::default()
    };

    let handle = runtime.handle().clone();
    eframe::run_native(
        "Plastiscan",
        options,
        Box::new(move |cc| Ok(Box::new(PlastiscanApp::new(cc, config, handle)))),
    )
}
