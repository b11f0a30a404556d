//! Custom widgets — gradient backdrop, countdown ring, icon buttons

use crate::theme::BreathColors;
use egui::{Color32, Mesh, Painter, Pos2, Rect, Response, Sense, Shape, Stroke, Ui, Widget};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Fill `rect` with a vertical two-stop gradient.
pub fn gradient_background(painter: &Painter, rect: Rect, top: Color32, bottom: Color32) {
    painter.add(Shape::mesh(gradient_mesh(rect, top, bottom)));
}

fn gradient_mesh(rect: Rect, top: Color32, bottom: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    mesh.colored_vertex(rect.left_top(), top);
    mesh.colored_vertex(rect.right_top(), top);
    mesh.colored_vertex(rect.right_bottom(), bottom);
    mesh.colored_vertex(rect.left_bottom(), bottom);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    mesh
}

/// Points along a circular arc starting at 12 o'clock, sweeping clockwise.
pub fn arc_points(center: Pos2, radius: f32, fraction: f32, segments: usize) -> Vec<Pos2> {
    let fraction = fraction.clamp(0.0, 1.0);
    let segments = ((segments as f32 * fraction).ceil() as usize).max(1);
    (0..=segments)
        .map(|i| {
            let angle = -FRAC_PI_2 + TAU * fraction * (i as f32 / segments as f32);
            Pos2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}

/// Circular countdown ring.
///
/// The coloured arc shows the share of the session still remaining; the
/// trail shows what has been used. `show` hands the inner area to the caller
/// for decorative centre content.
pub struct CountdownRing {
    remaining: f32,
    size: f32,
    stroke_width: f32,
}

impl CountdownRing {
    pub fn new(remaining: f32) -> Self {
        Self {
            remaining: remaining.clamp(0.0, 1.0),
            size: 290.0,
            stroke_width: 8.0,
        }
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }

    pub fn show(self, ui: &mut Ui, add_center: impl FnOnce(&Painter, Rect)) -> Response {
        let (rect, response) = ui.allocate_exact_size(egui::vec2(self.size, self.size), Sense::hover());
        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let center = rect.center();
            let radius = (self.size - self.stroke_width) / 2.0;

            painter.circle_stroke(center, radius, Stroke::new(self.stroke_width, BreathColors::RING_TRAIL));
            if self.remaining > 0.0 {
                painter.add(Shape::line(
                    arc_points(center, radius, self.remaining, 128),
                    Stroke::new(self.stroke_width, BreathColors::RING),
                ));
            }

            let inner = Rect::from_center_size(
                center,
                egui::Vec2::splat((radius - self.stroke_width) * 2.0),
            );
            add_center(painter, inner);
        }
        response
    }
}

/// Glyphs drawn by [`IconButton`] and [`DurationPill`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Play,
    Pause,
    Clock,
}

/// Paint `icon` centred on `center`, fitting a square of side `size`.
pub fn paint_icon(painter: &Painter, icon: Icon, center: Pos2, size: f32, color: Color32) {
    let h = size / 2.0;
    match icon {
        Icon::Play => {
            let points = vec![
                Pos2::new(center.x - h * 0.7, center.y - h),
                Pos2::new(center.x + h, center.y),
                Pos2::new(center.x - h * 0.7, center.y + h),
            ];
            painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
        }
        Icon::Pause => {
            let bar = egui::vec2(size * 0.3, size);
            for dx in [-h * 0.5, h * 0.5] {
                painter.rect_filled(Rect::from_center_size(center + egui::vec2(dx, 0.0), bar), 1.0, color);
            }
        }
        Icon::Clock => {
            let stroke = Stroke::new(1.5, color);
            painter.circle_stroke(center, h, stroke);
            painter.line_segment([center, center + egui::vec2(0.0, -h * 0.6)], stroke);
            painter.line_segment([center, center + egui::vec2(h * 0.45, 0.0)], stroke);
        }
    }
}

/// Round outlined button holding a single glyph.
pub struct IconButton {
    icon: Icon,
    glyph_size: f32,
    padding: f32,
}

impl IconButton {
    pub fn new(icon: Icon) -> Self {
        Self {
            icon,
            glyph_size: 18.0,
            padding: 15.0,
        }
    }
}

impl Widget for IconButton {
    fn ui(self, ui: &mut Ui) -> Response {
        let side = self.glyph_size + self.padding * 2.0;
        let (rect, response) = ui.allocate_exact_size(egui::vec2(side, side), Sense::click());
        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            if response.hovered() {
                painter.circle_filled(rect.center(), side / 2.0, BreathColors::WHITE.gamma_multiply(0.15));
            }
            painter.circle_stroke(rect.center(), side / 2.0 - 0.5, Stroke::new(1.0, BreathColors::WHITE));
            paint_icon(painter, self.icon, rect.center(), self.glyph_size, BreathColors::WHITE);
        }
        response
    }
}

/// Session-length selector: clock glyph plus a label on a rounded pill.
pub struct DurationPill<'a> {
    text: &'a str,
    selected: bool,
}

impl<'a> DurationPill<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, selected: false }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl<'a> Widget for DurationPill<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let font = egui::FontId::proportional(17.0);
        let galley = ui.painter().layout_no_wrap(self.text.to_owned(), font, BreathColors::WHITE);
        let glyph = 18.0;
        let desired = egui::vec2(6.0 + glyph + 12.0 + galley.size().x + 12.0, galley.size().y + 14.0);
        let (rect, response) = ui.allocate_exact_size(desired, Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let fill = if self.selected || response.is_pointer_button_down_on() {
                BreathColors::PILL_SELECTED
            } else {
                BreathColors::PILL
            };
            painter.rect_filled(rect, 7.0, fill);
            if response.hovered() {
                painter.rect_stroke(rect, 7.0, Stroke::new(1.0, BreathColors::WHITE));
            }
            let glyph_center = Pos2::new(rect.min.x + 6.0 + glyph / 2.0 + 5.0, rect.center().y);
            paint_icon(painter, Icon::Clock, glyph_center, glyph, BreathColors::WHITE);
            let text_pos = Pos2::new(glyph_center.x + glyph / 2.0 + 7.0, rect.center().y - galley.size().y / 2.0);
            painter.galley(text_pos, galley, BreathColors::WHITE);
        }
        response
    }
}

/// Status bar: translucent strip, white text
pub fn status_bar(ui: &mut Ui, text: &str) {
    egui::Frame::none()
        .fill(BreathColors::PANEL)
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.label(text);
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_starts_at_top() {
        let pts = arc_points(Pos2::new(0.0, 0.0), 10.0, 1.0, 64);
        assert!((pts[0].x - 0.0).abs() < 1e-4);
        assert!((pts[0].y + 10.0).abs() < 1e-4);
        let last = pts[pts.len() - 1];
        assert!((last.y + 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_arc_quarter_ends_at_three_oclock() {
        let pts = arc_points(Pos2::new(0.0, 0.0), 10.0, 0.25, 64);
        let last = pts[pts.len() - 1];
        assert!((last.x - 10.0).abs() < 1e-3);
        assert!(last.y.abs() < 1e-3);
    }

    #[test]
    fn test_arc_segments_scale_with_fraction() {
        assert_eq!(arc_points(Pos2::ZERO, 1.0, 0.5, 100).len(), 51);
        assert_eq!(arc_points(Pos2::ZERO, 1.0, 0.0, 100).len(), 2);
    }

    #[test]
    fn test_gradient_mesh_colors() {
        let rect = Rect::from_min_size(Pos2::ZERO, egui::vec2(100.0, 200.0));
        let mesh = gradient_mesh(rect, BreathColors::GRADIENT_TOP, BreathColors::GRADIENT_BOTTOM);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
        assert_eq!(mesh.vertices[0].color, BreathColors::GRADIENT_TOP);
        assert_eq!(mesh.vertices[2].color, BreathColors::GRADIENT_BOTTOM);
    }
}
