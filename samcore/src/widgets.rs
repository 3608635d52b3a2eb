//! Custom widgets: traffic lights, tooltip bubbles, slider tracks

use crate::theme::AquaColors;
use egui::{Color32, FontId, Painter, Pos2, Rect, Sense, Stroke, Ui};

/// Action returned by window control buttons
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowAction {
    None,
    Close,
}

const LIGHT_DIAMETER: f32 = 12.0;
const LIGHT_GAP: f32 = 8.0;

/// Rects of the three traffic lights for a title bar starting at `origin`
/// (left edge, vertical center).
pub fn traffic_light_rects(origin: Pos2) -> [Rect; 3] {
    let rect = |i: usize| {
        let x = origin.x + i as f32 * (LIGHT_DIAMETER + LIGHT_GAP);
        Rect::from_min_size(
            egui::pos2(x, origin.y - LIGHT_DIAMETER / 2.0),
            egui::vec2(LIGHT_DIAMETER, LIGHT_DIAMETER),
        )
    };
    [rect(0), rect(1), rect(2)]
}

/// Draw close / minimize / zoom lights. Only close does anything.
///
/// `origin` is the left edge and vertical center of the group. The caller
/// must exclude the returned close rect from title-bar dragging.
pub fn traffic_lights(ui: &mut Ui, id_source: impl std::hash::Hash, origin: Pos2) -> (WindowAction, Rect) {
    let [close, minimize, zoom] = traffic_light_rects(origin);
    let painter = ui.painter();
    let lights = [
        (close, AquaColors::CLOSE, AquaColors::CLOSE_EDGE),
        (minimize, AquaColors::MINIMIZE, AquaColors::MINIMIZE_EDGE),
        (zoom, AquaColors::ZOOM, AquaColors::ZOOM_EDGE),
    ];
    for (rect, fill, edge) in lights {
        painter.circle_filled(rect.center(), LIGHT_DIAMETER / 2.0, fill);
        painter.circle_stroke(rect.center(), LIGHT_DIAMETER / 2.0, Stroke::new(1.0, edge));
    }

    let id = ui.id().with(id_source).with("close");
    let response = ui.interact(close, id, Sense::click());
    if response.hovered() {
        painter.circle_filled(close.center(), LIGHT_DIAMETER / 2.0, Color32::from_black_alpha(25));
        let m = 3.5;
        let stroke = Stroke::new(1.2, Color32::from_rgb(77, 0, 0));
        painter.line_segment([close.left_top() + egui::vec2(m, m), close.right_bottom() - egui::vec2(m, m)], stroke);
        painter.line_segment([close.right_top() + egui::vec2(-m, m), close.left_bottom() + egui::vec2(m, -m)], stroke);
    }
    let action = if response.clicked() { WindowAction::Close } else { WindowAction::None };
    (action, close)
}

/// Dark rounded label with a downward arrow whose tip sits on `anchor`.
pub fn tooltip_bubble(painter: &Painter, anchor: Pos2, text: &str) {
    let font = FontId::proportional(12.0);
    let galley = painter.layout_no_wrap(text.to_string(), font, AquaColors::WHITE);
    let size = galley.size() + egui::vec2(24.0, 12.0);
    let arrow = 6.0;
    let body = Rect::from_min_size(
        egui::pos2(anchor.x - size.x / 2.0, anchor.y - arrow - size.y),
        size,
    );
    painter.rect_filled(body, 8.0, AquaColors::TOOLTIP);
    painter.rect_stroke(body, 8.0, Stroke::new(1.0, Color32::from_white_alpha(50)));
    painter.add(egui::Shape::convex_polygon(
        vec![
            egui::pos2(anchor.x - arrow, body.max.y),
            egui::pos2(anchor.x + arrow, body.max.y),
            anchor,
        ],
        AquaColors::TOOLTIP,
        Stroke::NONE,
    ));
    painter.galley(body.center() - galley.size() / 2.0, galley, AquaColors::WHITE);
}

/// Rounded slider track with a blue fill for `percent` and an optional knob.
pub fn paint_track(painter: &Painter, track: Rect, percent: f32, vertical: bool, knob: bool) {
    let pct = crate::geometry::clamp_percent(percent) / 100.0;
    let rounding = track.width().min(track.height()) / 2.0;
    painter.rect_filled(track, rounding, AquaColors::TRACK);
    let fill = if vertical {
        Rect::from_min_max(egui::pos2(track.min.x, track.max.y - track.height() * pct), track.max)
    } else {
        Rect::from_min_max(track.min, egui::pos2(track.min.x + track.width() * pct, track.max.y))
    };
    painter.rect_filled(fill, rounding, AquaColors::SELECTION_LIGHT);
    if knob {
        let center = if vertical {
            egui::pos2(track.center().x, fill.min.y)
        } else {
            egui::pos2(fill.max.x, track.center().y)
        };
        painter.circle_filled(center, 7.0, AquaColors::SELECTION);
        painter.circle_stroke(center, 7.0, Stroke::new(2.0, AquaColors::WHITE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traffic_lights_layout() {
        let [close, minimize, zoom] = traffic_light_rects(egui::pos2(8.0, 14.0));
        assert_eq!(close.center().y, 14.0);
        assert_eq!(close.left(), 8.0);
        assert_eq!(minimize.left() - close.left(), 20.0);
        assert_eq!(zoom.left() - minimize.left(), 20.0);
        assert!(!close.intersects(minimize));
    }
}
