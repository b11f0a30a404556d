//! Breathe theme — soft lavender on a violet gradient
//!
//! White text and outlines over a two-stop vertical gradient. Widgets keep
//! square-ish shapes and 1px strokes; only the session controls are rounded.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

/// Palette shared by every widget on the screen.
pub struct BreathColors;

impl BreathColors {
    pub const WHITE: Color32 = Color32::from_rgb(255, 255, 255);
    pub const GRADIENT_TOP: Color32 = Color32::from_rgb(0xbc, 0xbc, 0xc9);
    pub const GRADIENT_BOTTOM: Color32 = Color32::from_rgb(0x7c, 0x66, 0xff);
    pub const RING: Color32 = Color32::from_rgb(0xc3, 0xbd, 0xef);
    pub const RING_TRAIL: Color32 = Color32::from_rgb(0x7f, 0x7d, 0x99);
    pub const DISC_OUTER: Color32 = Color32::from_rgb(0x8d, 0x7e, 0xf1);
    pub const DISC_INNER: Color32 = Color32::from_rgb(0x7f, 0x6c, 0xfb);
    pub const PILL_SELECTED: Color32 = Color32::from_rgb(0x9f, 0x91, 0xf8);
    pub const PILL: Color32 = Color32::from_rgb(0x69, 0x5c, 0xc1);
    pub const PANEL: Color32 = Color32::from_rgb(0x5a, 0x4c, 0xb0);
}

/// Theme configuration for the breathe window
pub struct BreathTheme {
    pub font_size_body: f32,
    pub font_size_heading: f32,
    pub font_size_small: f32,
    pub window_padding: f32,
    pub item_spacing: f32,
}

impl Default for BreathTheme {
    fn default() -> Self {
        Self {
            font_size_body: 14.0,
            font_size_heading: 23.0,
            font_size_small: 11.0,
            window_padding: 8.0,
            item_spacing: 4.0,
        }
    }
}

impl BreathTheme {
    /// Apply the theme to an egui context
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = Style::default();

        style.text_styles = [
            (TextStyle::Small, FontId::new(self.font_size_small, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.font_size_heading, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(self.font_size_body, FontFamily::Monospace)),
        ]
        .into();

        let mut visuals = Visuals::dark();

        visuals.override_text_color = Some(BreathColors::WHITE);
        visuals.window_fill = BreathColors::PANEL;
        visuals.panel_fill = BreathColors::PANEL;
        visuals.faint_bg_color = BreathColors::PILL;
        visuals.extreme_bg_color = BreathColors::PILL;

        visuals.window_rounding = Rounding::same(7.0);
        visuals.menu_rounding = Rounding::same(7.0);
        visuals.window_stroke = Stroke::new(1.0, BreathColors::WHITE);

        let soft = |ws: &mut egui::style::WidgetVisuals, fill: Color32| {
            ws.bg_fill = fill;
            ws.weak_bg_fill = fill;
            ws.bg_stroke = Stroke::new(1.0, BreathColors::WHITE);
            ws.fg_stroke = Stroke::new(1.0, BreathColors::WHITE);
            ws.rounding = Rounding::same(7.0);
        };
        soft(&mut visuals.widgets.noninteractive, BreathColors::PANEL);
        soft(&mut visuals.widgets.inactive, BreathColors::PILL);
        soft(&mut visuals.widgets.hovered, BreathColors::PILL_SELECTED);
        soft(&mut visuals.widgets.active, BreathColors::PILL_SELECTED);
        soft(&mut visuals.widgets.open, BreathColors::PILL_SELECTED);

        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;

        visuals.selection.bg_fill = BreathColors::PILL_SELECTED;
        visuals.selection.stroke = Stroke::new(1.0, BreathColors::WHITE);

        style.visuals = visuals;

        style.spacing.window_margin = egui::Margin::same(self.window_padding);
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);

        ctx.set_style(style);
    }
}

/// Menu bar styling helper
pub fn menu_bar<R>(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> egui::InnerResponse<R> {
    let frame_resp = egui::Frame::none()
        .fill(BreathColors::PANEL)
        .inner_margin(egui::Margin::symmetric(4.0, 2.0))
        .show(ui, |ui| {
            ui.horizontal(add_contents).inner
        });
    egui::InnerResponse {
        inner: frame_resp.inner,
        response: frame_resp.response,
    }
}

/// Drop Tab and Cmd+/- so focus cycling and zoom don't fight the
/// single-key shortcuts. Call at the start of `update()`.
pub fn consume_special_keys(ctx: &egui::Context) {
    ctx.input_mut(|i| {
        i.events.retain(|event| match event {
            egui::Event::Key { key: egui::Key::Tab, .. } => false,
            egui::Event::Key { key, modifiers, .. }
                if modifiers.command
                    && matches!(key, egui::Key::Plus | egui::Key::Minus | egui::Key::Equals) =>
            {
                false
            }
            _ => true,
        });
    });
}
