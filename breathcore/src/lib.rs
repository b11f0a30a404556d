//! breathcore — shared building blocks for the breathe app

pub mod animation;
pub mod repaint;
pub mod settings;
pub mod theme;
pub mod timer;
pub mod widgets;

pub use repaint::RepaintController;
pub use settings::BreathSettings;
pub use theme::BreathTheme;

/// Initial window offset from the BREATHE_CASCADE environment variable.
/// Used to stagger several windows opened side by side.
pub fn cascade_position() -> Option<egui::Pos2> {
    std::env::var("BREATHE_CASCADE").ok()
        .and_then(|s| s.parse::<u32>().ok())
        .map(|n| {
            let offset = (n as f32) * 30.0;
            egui::Pos2::new(100.0 + offset, 100.0 + offset)
        })
}
