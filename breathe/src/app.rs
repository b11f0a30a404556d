//! Breathe & relax - the one screen
//!
//! Draws the session: gradient backdrop, phase label, countdown ring with the
//! pulsing logo, time readout, play/pause and the duration pills.

use crate::session::{Session, SessionState};
use breathcore::repaint::RepaintController;
use breathcore::theme::{consume_special_keys, menu_bar, BreathColors};
use breathcore::widgets::{gradient_background, status_bar, CountdownRing, DurationPill, Icon, IconButton};
use breathcore::BreathSettings;
use egui::{Context, Key, Painter, Pos2, Rect, Stroke};
use std::f32::consts::TAU;
use std::time::Instant;

const DURATION_KEYS: [Key; 3] = [Key::Num1, Key::Num2, Key::Num3];

pub struct BreatheApp {
    session: Session,
    last_update: Instant,
    show_about: bool,
    repaint: RepaintController,
}

impl BreatheApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: &BreathSettings) -> Self {
        Self {
            session: Session::new(settings),
            last_update: Instant::now(),
            show_about: false,
            repaint: RepaintController::new(),
        }
    }

    fn select(&mut self, index: usize) {
        if let Some(&ms) = self.session.durations_ms().get(index) {
            self.session.select_duration(ms);
            self.repaint.mark_needs_repaint();
        }
    }

    fn handle_keys(&mut self, ctx: &Context) {
        let (toggle, escape, picked) = ctx.input(|i| {
            (
                i.key_pressed(Key::Space),
                i.key_pressed(Key::Escape),
                DURATION_KEYS.iter().position(|k| i.key_pressed(*k)),
            )
        });
        if toggle {
            self.session.toggle_play();
        }
        if escape {
            self.session.pause();
        }
        if let Some(index) = picked {
            self.select(index);
        }
    }

    fn draw_session(&mut self, ui: &mut egui::Ui) {
        let full_rect = ui.max_rect();
        gradient_background(ui.painter(), full_rect, BreathColors::GRADIENT_TOP, BreathColors::GRADIENT_BOTTOM);

        let ring_size = (full_rect.width() - 40.0)
            .min(full_rect.height() - 300.0)
            .clamp(120.0, 290.0);

        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.label(egui::RichText::new("Breathe & relax").size(23.0).strong().color(BreathColors::WHITE));
            ui.add_space(12.0);

            let fade = BreathColors::WHITE.gamma_multiply(self.session.pulse().opacity());
            ui.label(egui::RichText::new(self.session.phase_label()).size(22.0).color(fade));
            ui.add_space(12.0);

            let scale = self.session.pulse().scale();
            CountdownRing::new(self.session.ring_fraction())
                .size(ring_size)
                .stroke_width(8.0)
                .show(ui, |painter, inner| draw_center(painter, inner, scale));

            ui.add_space(12.0);
            ui.label(egui::RichText::new(self.session.time_label()).size(18.0).color(BreathColors::WHITE));
            ui.add_space(12.0);

            let icon = if self.session.is_playing() { Icon::Pause } else { Icon::Play };
            if ui.add(IconButton::new(icon)).clicked() {
                self.session.toggle_play();
            }
            ui.add_space(16.0);

            let selected = self.session.selected_duration_ms();
            let options: Vec<u64> = self.session.durations_ms().to_vec();
            let mut picked = None;
            ui.horizontal(|ui| {
                let pills_width = options.len() as f32 * 110.0;
                ui.add_space(((ui.available_width() - pills_width) / 2.0).max(0.0));
                for (index, &ms) in options.iter().enumerate() {
                    let label = duration_label(ms);
                    if ui.add(DurationPill::new(&label).selected(ms == selected)).clicked() {
                        picked = Some(index);
                    }
                    ui.add_space(10.0);
                }
            });
            if let Some(index) = picked {
                self.select(index);
            }
        });
    }
}

impl eframe::App for BreatheApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.repaint.begin_frame();
        consume_special_keys(ctx);

        let now = Instant::now();
        let dt = now.duration_since(self.last_update);
        self.last_update = now;

        if !self.session.advance(dt).is_empty() {
            self.repaint.mark_needs_repaint();
        }

        if !self.show_about {
            self.handle_keys(ctx);
        }

        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            menu_bar(ui, |ui| {
                ui.menu_button("session", |ui| {
                    let label = if self.session.is_playing() { "pause      space" } else { "play       space" };
                    if ui.button(label).clicked() {
                        self.session.toggle_play();
                        ui.close_menu();
                    }
                    ui.separator();
                    let selected = self.session.selected_duration_ms();
                    let options: Vec<u64> = self.session.durations_ms().to_vec();
                    for (index, ms) in options.into_iter().enumerate() {
                        let mark = if ms == selected { "*" } else { " " };
                        if ui.button(format!("{} {}      {}", mark, duration_label(ms), index + 1)).clicked() {
                            self.select(index);
                            ui.close_menu();
                        }
                    }
                });
                ui.menu_button("help", |ui| {
                    if ui.button("about").clicked() {
                        self.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            status_bar(ui, &status_text(&self.session));
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.draw_session(ui));

        if self.show_about {
            egui::Window::new("about breathe")
                .collapsible(false)
                .resizable(false)
                .default_width(280.0)
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Breathe & relax");
                        ui.label(format!("version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        ui.label("follow the logo: grow as you inhale, shrink as you exhale");
                    });
                    ui.add_space(8.0);
                    ui.separator();
                    ui.label("controls:");
                    ui.label("  space: play/pause");
                    ui.label("  esc: pause");
                    ui.label("  1 / 2 / 3: session length");
                    ui.add_space(8.0);
                    ui.vertical_centered(|ui| {
                        if ui.button("ok").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }

        self.repaint.set_continuous(self.session.needs_frames());
        self.repaint.end_frame(ctx);
    }
}

impl Drop for BreatheApp {
    fn drop(&mut self) {
        self.session.teardown();
    }
}

/// Nested discs with the logo mark, scaled by the pulse.
fn draw_center(painter: &Painter, inner: Rect, scale: f32) {
    let center = inner.center();
    let outer = inner.width() / 2.0;
    painter.circle_filled(center, outer, BreathColors::DISC_OUTER);
    painter.circle_filled(center, outer - 12.0, BreathColors::DISC_INNER);

    // logo: six petals around a core, sized to sit inside the inner disc
    let petal = outer * 0.16 * scale;
    let ring = outer * 0.22 * scale;
    let stroke = Stroke::new(2.0, BreathColors::WHITE);
    for i in 0..6 {
        let angle = TAU * i as f32 / 6.0;
        let at = Pos2::new(center.x + ring * angle.cos(), center.y + ring * angle.sin());
        painter.circle_stroke(at, petal, stroke);
    }
    painter.circle_filled(center, petal * 0.6, BreathColors::WHITE);
}

/// Pill text for a session length.
pub fn duration_label(ms: u64) -> String {
    if ms % 60_000 == 0 {
        format!("{} min", ms / 60_000)
    } else {
        format!("{} s", ms / 1000)
    }
}

/// Status bar line.
pub fn status_text(session: &Session) -> String {
    match session.state() {
        SessionState::Running => {
            // one breath is an inhale flip plus an exhale flip
            let breaths = session.breath_count() / 2;
            format!(
                "breathing  |  {}  |  {} {}",
                session.phase_label().to_lowercase(),
                breaths,
                if breaths == 1 { "breath" } else { "breaths" }
            )
        }
        SessionState::Idle if session.is_completed() => "session complete".to_string(),
        SessionState::Idle => format!("idle  |  {} session", duration_label(session.selected_duration_ms())),
    }
}
