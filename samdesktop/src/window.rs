//! Window chrome and dragging
//!
//! A window is an `egui::Area` in the middle layer. The shell stacks the
//! areas by z-order every frame; this module draws the frame around the
//! content and turns raw pointer input into [`WindowEvent`]s for the window
//! manager.

use crate::wm::{AppKind, WindowRecord};
use egui::{pos2, vec2, Align2, Context, FontId, Id, Order, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use samcore::config::LayoutConfig;
use samcore::gesture::DragState;
use samcore::theme::{paint_pinstripe, paint_title_bar, AquaColors};
use samcore::widgets::{traffic_lights, WindowAction};

pub const TITLE_BAR_HEIGHT: f32 = 28.0;
pub const TOOLBAR_HEIGHT: f32 = 34.0;
const CORNER_RADIUS: f32 = 6.0;

/// Narrow layout: gap to the screen edges.
const NARROW_MARGIN: f32 = 8.0;
/// Narrow layout: space kept free for the menu bar and dock.
const NARROW_RESERVED_HEIGHT: f32 = 114.0;
/// Narrow layout: windows sit right under the menu bar.
const NARROW_TOP: f32 = 36.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Where inside a window a press landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    TitleBar,
    CloseButton,
    /// Plain window body (labels, background).
    Body,
    /// A button, text field or other control inside the body.
    Interactive,
}

/// Title-bar presses drag with any pointer; body presses only with touch,
/// and never on a control.
pub fn should_start_drag(kind: PointerKind, target: HitTarget) -> bool {
    match target {
        HitTarget::TitleBar => true,
        HitTarget::Body => kind == PointerKind::Touch,
        HitTarget::CloseButton | HitTarget::Interactive => false,
    }
}

/// Rect a window is drawn in this frame.
///
/// Narrow viewports ignore the stored position and shrink the window to fit;
/// this is recomputed from the live viewport every frame.
pub fn layout_rect(record: &WindowRecord, viewport: Vec2, layout: &LayoutConfig) -> Rect {
    if !crate::wm::is_narrow(viewport, layout) {
        return Rect::from_min_size(record.position, record.size);
    }
    let w = record.size.x.min(viewport.x - 2.0 * NARROW_MARGIN);
    let h = record.size.y.min(viewport.y - NARROW_RESERVED_HEIGHT);
    let x = NARROW_MARGIN.max((viewport.x - w) / 2.0);
    Rect::from_min_size(pos2(x, NARROW_TOP), vec2(w, h))
}

/// Requests a window makes of the window manager.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    Focus,
    Close,
    MoveTo(Pos2),
}

/// Per-window pointer bookkeeping.
#[derive(Debug, Default)]
pub struct WindowChrome {
    drag: DragState,
}

impl WindowChrome {
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// A press landed inside the window. Always focuses; starts a drag when
    /// the target allows it.
    pub fn press(&mut self, kind: PointerKind, target: HitTarget, pointer: Pos2, origin: Pos2) -> Vec<WindowEvent> {
        // stale drags from a lost release are dropped here
        self.drag.end();
        if should_start_drag(kind, target) {
            self.drag.begin(pointer, origin);
            log::debug!("window drag start ({:?}, {:?})", kind, target);
        }
        vec![WindowEvent::Focus]
    }

    /// Pointer sample anywhere on screen.
    pub fn pointer_moved(&self, pointer: Pos2) -> Option<WindowEvent> {
        self.drag.position_for(pointer).map(WindowEvent::MoveTo)
    }

    pub fn release(&mut self) {
        if self.drag.is_dragging() {
            log::debug!("window drag end");
        }
        self.drag.end();
    }

    /// Draw the window and collect its events for this frame.
    pub fn show(
        &mut self,
        ctx: &Context,
        record: &WindowRecord,
        rect: Rect,
        add_contents: impl FnOnce(&mut Ui),
    ) -> Vec<WindowEvent> {
        let mut events = Vec::new();
        let area_id = Id::new(("window", record.id.as_str()));

        egui::Area::new(area_id)
            .order(Order::Middle)
            .fixed_pos(rect.min)
            .constrain(false)
            .movable(false)
            .show(ctx, |ui| {
                ui.set_min_size(rect.size());
                ui.set_max_size(rect.size());
                let painter = ui.painter().clone();

                // shadow and frame
                painter.rect_filled(rect.translate(vec2(0.0, 4.0)).expand(2.0), CORNER_RADIUS + 2.0, egui::Color32::from_black_alpha(40));
                painter.rect_filled(rect, CORNER_RADIUS, AquaColors::WHITE);

                let title_rect = Rect::from_min_size(rect.min, vec2(rect.width(), TITLE_BAR_HEIGHT));
                paint_title_bar(
                    &painter,
                    title_rect,
                    Rounding { nw: CORNER_RADIUS, ne: CORNER_RADIUS, sw: 0.0, se: 0.0 },
                );
                let (action, close_rect) =
                    traffic_lights(ui, record.id.as_str(), pos2(title_rect.min.x + 10.0, title_rect.center().y));
                if action == WindowAction::Close {
                    events.push(WindowEvent::Close);
                }
                painter.text(
                    title_rect.center(),
                    Align2::CENTER_CENTER,
                    &record.title,
                    FontId::proportional(13.0),
                    AquaColors::TEXT,
                );

                let mut body = Rect::from_min_max(pos2(rect.min.x, title_rect.max.y), rect.max);
                if record.kind == AppKind::FileBrowser {
                    let toolbar = Rect::from_min_size(body.min, vec2(body.width(), TOOLBAR_HEIGHT));
                    draw_file_toolbar(ui, toolbar);
                    body.min.y = toolbar.max.y;
                }
                if matches!(record.kind, AppKind::FileBrowser | AppKind::Trash) {
                    paint_pinstripe(&painter.with_clip_rect(body), body);
                }

                // registered before the content so controls stack on top of it
                let body_response = ui.interact(body, area_id.with("body"), Sense::hover());

                let (pressed, touch, pointer) = ui.input(|i| {
                    (i.pointer.any_pressed(), i.any_touches(), i.pointer.interact_pos())
                });
                if pressed && ui.rect_contains_pointer(rect) {
                    if let Some(p) = pointer {
                        let target = if close_rect.contains(p) {
                            HitTarget::CloseButton
                        } else if title_rect.contains(p) {
                            HitTarget::TitleBar
                        } else if body_response.hovered() {
                            HitTarget::Body
                        } else {
                            HitTarget::Interactive
                        };
                        let kind = if touch { PointerKind::Touch } else { PointerKind::Mouse };
                        events.extend(self.press(kind, target, p, record.position));
                    }
                }

                let mut content_ui = ui.child_ui(body.shrink(1.0), egui::Layout::top_down(egui::Align::Min));
                content_ui.set_clip_rect(body.intersect(ui.clip_rect()));
                add_contents(&mut content_ui);

                painter.rect_stroke(rect, CORNER_RADIUS, Stroke::new(1.0, AquaColors::BORDER));
            });

        if self.drag.is_dragging() {
            let (released, latest) = ctx.input(|i| (i.pointer.any_released(), i.pointer.latest_pos()));
            if let Some(event) = latest.and_then(|p| self.pointer_moved(p)) {
                events.push(event);
            }
            if released {
                self.release();
            }
        }

        events
    }
}

/// Layer of a window's area, for stacking.
pub fn layer_id(record: &WindowRecord) -> egui::LayerId {
    egui::LayerId::new(Order::Middle, Id::new(("window", record.id.as_str())))
}

fn draw_file_toolbar(ui: &mut Ui, rect: Rect) {
    let painter = ui.painter();
    painter.rect_filled(rect, 0.0, AquaColors::TOOLBAR);
    painter.hline(rect.x_range(), rect.max.y, Stroke::new(1.0, AquaColors::BORDER));

    let button = |x: f32| Rect::from_min_size(pos2(x, rect.center().y - 11.0), vec2(26.0, 22.0));
    for (r, glyph) in [(button(rect.min.x + 8.0), "‹"), (button(rect.min.x + 36.0), "›")] {
        painter.rect_filled(r, 4.0, AquaColors::WHITE);
        painter.rect_stroke(r, 4.0, Stroke::new(1.0, AquaColors::BORDER));
        painter.text(r.center(), Align2::CENTER_CENTER, glyph, FontId::proportional(16.0), AquaColors::TEXT_MUTED);
    }

    let path = Rect::from_min_max(pos2(rect.min.x + 72.0, rect.center().y - 10.0), pos2(rect.max.x - 8.0, rect.center().y + 10.0));
    if path.width() > 0.0 {
        painter.rect_filled(path, 4.0, AquaColors::WHITE);
        painter.rect_stroke(path, 4.0, Stroke::new(1.0, AquaColors::BORDER));
        painter.text(pos2(path.min.x + 8.0, path.center().y), Align2::LEFT_CENTER, "/", FontId::proportional(12.0), AquaColors::TEXT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(x: f32, y: f32, w: f32, h: f32) -> WindowRecord {
        WindowRecord {
            id: "finder-main".into(),
            kind: AppKind::FileBrowser,
            title: "Macintosh HD".into(),
            position: pos2(x, y),
            size: vec2(w, h),
            z_order: 1,
            is_open: true,
        }
    }

    #[test]
    fn test_drag_policy() {
        assert!(should_start_drag(PointerKind::Mouse, HitTarget::TitleBar));
        assert!(should_start_drag(PointerKind::Touch, HitTarget::TitleBar));
        assert!(should_start_drag(PointerKind::Touch, HitTarget::Body));
        assert!(!should_start_drag(PointerKind::Mouse, HitTarget::Body));
        assert!(!should_start_drag(PointerKind::Touch, HitTarget::Interactive));
        assert!(!should_start_drag(PointerKind::Mouse, HitTarget::CloseButton));
    }

    #[test]
    fn test_press_always_focuses() {
        let mut chrome = WindowChrome::default();
        let events = chrome.press(PointerKind::Mouse, HitTarget::Body, pos2(150.0, 150.0), pos2(100.0, 100.0));
        assert_eq!(events, vec![WindowEvent::Focus]);
        assert!(!chrome.is_dragging());
    }

    #[test]
    fn test_title_drag_moves_window() {
        let mut chrome = WindowChrome::default();
        chrome.press(PointerKind::Mouse, HitTarget::TitleBar, pos2(120.0, 110.0), pos2(100.0, 100.0));
        assert!(chrome.is_dragging());
        let mut last = None;
        for step in 1..=10 {
            let t = step as f32 / 10.0;
            last = chrome.pointer_moved(pos2(120.0 + 50.0 * t, 110.0 - 30.0 * t));
        }
        assert_eq!(last, Some(WindowEvent::MoveTo(pos2(150.0, 70.0))));
        chrome.release();
        assert_eq!(chrome.pointer_moved(pos2(0.0, 0.0)), None);
    }

    #[test]
    fn test_new_press_resets_stale_drag() {
        let mut chrome = WindowChrome::default();
        chrome.press(PointerKind::Mouse, HitTarget::TitleBar, pos2(120.0, 110.0), pos2(100.0, 100.0));
        // release lost; next press lands on the body
        chrome.press(PointerKind::Mouse, HitTarget::Body, pos2(300.0, 300.0), pos2(100.0, 100.0));
        assert!(!chrome.is_dragging());
    }

    #[test]
    fn test_wide_layout_uses_record() {
        let r = record(40.0, 60.0, 400.0, 300.0);
        let rect = layout_rect(&r, vec2(1280.0, 800.0), &LayoutConfig::default());
        assert_eq!(rect, Rect::from_min_size(pos2(40.0, 60.0), vec2(400.0, 300.0)));
    }

    #[test]
    fn test_narrow_layout_fits_screen() {
        let r = record(40.0, 60.0, 500.0, 900.0);
        let rect = layout_rect(&r, vec2(375.0, 667.0), &LayoutConfig::default());
        assert_eq!(rect.width(), 359.0);
        assert_eq!(rect.height(), 553.0);
        assert_eq!(rect.min, pos2(8.0, 36.0));
    }

    #[test]
    fn test_narrow_layout_centers_small_window() {
        let r = record(0.0, 0.0, 300.0, 200.0);
        let rect = layout_rect(&r, vec2(700.0, 900.0), &LayoutConfig::default());
        assert_eq!(rect.min, pos2(200.0, 36.0));
        assert_eq!(rect.size(), vec2(300.0, 200.0));
    }
}
