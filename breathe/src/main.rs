//! breathe - guided breathing timer

mod app;
mod breath;
mod countdown;
mod pulse;
mod session;

use app::BreatheApp;
use breathcore::settings::{settings_path, BreathSettings};
use eframe::NativeOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("breathe=info,breathcore=info")),
        )
        .init();

    let path = settings_path();
    let settings = BreathSettings::load_or_default(&path);
    info!(
        config = %path.display(),
        default_duration_ms = settings.default_duration_ms,
        "starting breathe v{}",
        env!("CARGO_PKG_VERSION")
    );

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([380.0, 640.0])
        .with_title("Breathe & relax");

    if let Some(pos) = breathcore::cascade_position() {
        viewport = viewport.with_position(pos);
    }

    let options = NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "breathe",
        options,
        Box::new(move |cc| {
            breathcore::BreathTheme::default().apply(&cc.egui_ctx);
            Box::new(BreatheApp::new(cc, &settings))
        }),
    )
}
