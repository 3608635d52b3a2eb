//! Dock and desktop icons
//!
//! Both are lists of launch targets. Clicking one issues an open-or-focus
//! request; the dock also shows which targets are open and a tooltip for the
//! hovered entry.

use crate::wm::{AppKind, OpenRequest, WindowManager};
use egui::{pos2, vec2, Align2, Color32, Context, FontId, Id, LayerId, Order, Painter, Pos2, Rect, Sense, Stroke};
use samcore::theme::AquaColors;
use samcore::widgets::tooltip_bubble;

const DOCK_ICON: f32 = 48.0;
const DOCK_ICON_NARROW: f32 = 40.0;
const DOCK_GAP: f32 = 10.0;
const DOCK_PADDING: f32 = 8.0;
/// Hovered dock icons rise by this much.
const HOVER_LIFT: f32 = 16.0;
/// Gap between the icon top and the tooltip arrow tip.
const TOOLTIP_GAP: f32 = 12.0;

const DESKTOP_ICON: f32 = 56.0;
const DESKTOP_ICON_SPACING: f32 = 96.0;
const DESKTOP_MARGIN: f32 = 24.0;

pub fn finder_main() -> OpenRequest {
    OpenRequest::new("finder-main", AppKind::FileBrowser, "Macintosh HD")
}

pub fn finder_apps() -> OpenRequest {
    OpenRequest::new("finder-apps", AppKind::FileBrowser, "Applications")
}

pub fn chat() -> OpenRequest {
    OpenRequest::new("chat", AppKind::Chat, "ChatGPT").with_size(500.0, 350.0)
}

pub fn trash() -> OpenRequest {
    OpenRequest::new("trash", AppKind::Trash, "Trash")
}

pub fn ipod() -> OpenRequest {
    OpenRequest::new("ipod", AppKind::MediaPlayer, "iPod").with_size(320.0, 508.0)
}

/// Artwork drawn for an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconArt {
    Finder,
    Chat,
    Browser,
    Applications,
    Trash,
    HardDrive,
    Ipod,
}

#[derive(Debug, Clone)]
pub struct LaunchTarget {
    pub label: &'static str,
    pub art: IconArt,
    /// `None` for entries that do nothing when clicked.
    pub request: Option<OpenRequest>,
}

impl LaunchTarget {
    fn new(label: &'static str, art: IconArt, request: Option<OpenRequest>) -> Self {
        Self { label, art, request }
    }

    pub fn is_open(&self, wm: &WindowManager) -> bool {
        self.request.as_ref().is_some_and(|r| wm.is_open(&r.id))
    }
}

#[derive(Debug, Clone)]
pub enum DockItem {
    Launch(LaunchTarget),
    Separator,
}

pub fn dock_items() -> Vec<DockItem> {
    vec![
        DockItem::Launch(LaunchTarget::new("Finder", IconArt::Finder, Some(finder_main()))),
        DockItem::Launch(LaunchTarget::new("ChatGPT", IconArt::Chat, Some(chat()))),
        DockItem::Launch(LaunchTarget::new("Internet Explorer", IconArt::Browser, None)),
        DockItem::Launch(LaunchTarget::new("Applications", IconArt::Applications, Some(finder_apps()))),
        DockItem::Separator,
        DockItem::Launch(LaunchTarget::new("Trash", IconArt::Trash, Some(trash()))),
    ]
}

pub fn desktop_icons() -> Vec<LaunchTarget> {
    vec![
        LaunchTarget::new("Macintosh HD", IconArt::HardDrive, Some(finder_main())),
        LaunchTarget::new("iPod", IconArt::Ipod, Some(ipod())),
    ]
}

/// Arrow tip of the tooltip for a dock icon whose resting rect is `item`.
pub fn tooltip_anchor(item: Rect, hovered: bool) -> Pos2 {
    let lift = if hovered { -HOVER_LIFT } else { 0.0 };
    pos2(item.center().x, item.top() + lift - TOOLTIP_GAP)
}

/// Resting rects of the dock items, laid out centered along the bottom edge.
fn dock_layout(items: &[DockItem], screen: Rect, icon: f32) -> (Rect, Vec<Rect>) {
    let widths: Vec<f32> = items
        .iter()
        .map(|i| match i {
            DockItem::Launch(_) => icon,
            DockItem::Separator => 1.0,
        })
        .collect();
    let inner = widths.iter().sum::<f32>() + DOCK_GAP * (items.len().saturating_sub(1)) as f32;
    let shelf_h = icon + DOCK_PADDING * 2.0;
    let shelf = Rect::from_min_size(
        pos2(screen.center().x - inner / 2.0 - DOCK_PADDING, screen.max.y - shelf_h - 4.0),
        vec2(inner + DOCK_PADDING * 2.0, shelf_h),
    );
    let mut x = shelf.min.x + DOCK_PADDING;
    let rects = widths
        .iter()
        .map(|w| {
            let r = Rect::from_min_size(pos2(x, shelf.min.y + DOCK_PADDING), vec2(*w, icon));
            x += w + DOCK_GAP;
            r
        })
        .collect();
    (shelf, rects)
}

pub struct Dock {
    items: Vec<DockItem>,
}

impl Default for Dock {
    fn default() -> Self {
        Self { items: dock_items() }
    }
}

impl Dock {
    /// Draw the dock above all windows; returns a launch request on click.
    pub fn show(&self, ctx: &Context, screen: Rect, wm: &WindowManager) -> Option<OpenRequest> {
        let icon = if wm.is_narrow() { DOCK_ICON_NARROW } else { DOCK_ICON };
        let (shelf, rects) = dock_layout(&self.items, screen, icon);
        let mut launched = None;
        let mut tooltip = None;

        egui::Area::new(Id::new("dock"))
            .order(Order::Foreground)
            .fixed_pos(shelf.min)
            .constrain(false)
            .movable(false)
            .show(ctx, |ui| {
                ui.set_min_size(shelf.size());
                let painter = ui.painter().clone();
                painter.rect_filled(shelf, 16.0, AquaColors::DOCK_GLASS);
                painter.rect_stroke(shelf, 16.0, Stroke::new(1.0, Color32::from_white_alpha(90)));

                for (index, (item, rect)) in self.items.iter().zip(rects.iter()).enumerate() {
                    match item {
                        DockItem::Separator => {
                            painter.vline(rect.center().x, rect.y_range(), Stroke::new(1.0, Color32::from_white_alpha(140)));
                        }
                        DockItem::Launch(target) => {
                            let response = ui.interact(*rect, Id::new(("dock_item", index)), Sense::click());
                            let hovered = response.hovered();
                            let drawn = if hovered { rect.translate(vec2(0.0, -HOVER_LIFT)) } else { *rect };
                            paint_icon(&painter, drawn, target.art);
                            if target.is_open(wm) {
                                painter.circle_filled(pos2(rect.center().x, shelf.max.y - 4.0), 2.0, AquaColors::BLACK);
                            }
                            if hovered {
                                tooltip = Some((tooltip_anchor(*rect, true), target.label));
                            }
                            if response.clicked() {
                                launched = target.request.clone();
                            }
                        }
                    }
                }
            });

        if let Some((anchor, label)) = tooltip {
            let painter = ctx.layer_painter(LayerId::new(Order::Tooltip, Id::new("dock_tooltip")));
            tooltip_bubble(&painter, anchor, label);
        }
        if let Some(req) = &launched {
            log::debug!("dock launch {}", req.id);
        }
        launched
    }
}

/// Desktop icons, one column in the top-right corner under the menu bar.
pub fn show_desktop_icons(ui: &mut egui::Ui, area: Rect, icons: &[LaunchTarget]) -> Option<OpenRequest> {
    let mut launched = None;
    for (row, target) in icons.iter().enumerate() {
        let top = area.min.y + DESKTOP_MARGIN + row as f32 * DESKTOP_ICON_SPACING;
        let icon_rect = Rect::from_min_size(pos2(area.max.x - DESKTOP_MARGIN - DESKTOP_ICON, top), vec2(DESKTOP_ICON, DESKTOP_ICON));
        let hit = icon_rect.expand2(vec2(12.0, 0.0)).union(Rect::from_min_size(icon_rect.left_bottom(), vec2(DESKTOP_ICON, 20.0)));
        let response = ui.interact(hit, Id::new(("desktop_icon", row)), Sense::click());
        let painter = ui.painter();
        if response.hovered() {
            painter.rect_filled(icon_rect.expand(4.0), 6.0, Color32::from_white_alpha(40));
        }
        paint_icon(painter, icon_rect, target.art);
        let label_pos = pos2(icon_rect.center().x, icon_rect.max.y + 10.0);
        let galley = painter.layout_no_wrap(target.label.to_string(), FontId::proportional(12.0), AquaColors::WHITE);
        let label_rect = Rect::from_center_size(label_pos, galley.size() + vec2(8.0, 2.0));
        painter.rect_filled(label_rect, 3.0, Color32::from_black_alpha(90));
        painter.galley(label_rect.center() - galley.size() / 2.0, galley, AquaColors::WHITE);
        if response.clicked() {
            launched = target.request.clone();
        }
    }
    launched
}

/// Draw icon artwork filling `rect`.
pub fn paint_icon(painter: &Painter, rect: Rect, art: IconArt) {
    let r = rect.width().min(rect.height());
    let glyph = |text: &str, color: Color32| {
        painter.text(rect.center(), Align2::CENTER_CENTER, text, FontId::proportional(r * 0.5), color);
    };
    match art {
        IconArt::Finder => {
            painter.rect_filled(rect, r * 0.2, Color32::from_rgb(96, 165, 250));
            let right = Rect::from_min_max(pos2(rect.center().x, rect.min.y), rect.max);
            painter.rect_filled(right, egui::Rounding { ne: r * 0.2, se: r * 0.2, ..Default::default() }, Color32::from_rgb(219, 234, 254));
            let eye = r * 0.06;
            painter.circle_filled(pos2(rect.min.x + r * 0.32, rect.min.y + r * 0.38), eye, AquaColors::BLACK);
            painter.circle_filled(pos2(rect.min.x + r * 0.68, rect.min.y + r * 0.38), eye, AquaColors::BLACK);
            painter.line_segment(
                [pos2(rect.min.x + r * 0.3, rect.min.y + r * 0.68), pos2(rect.min.x + r * 0.7, rect.min.y + r * 0.68)],
                Stroke::new(2.0, AquaColors::BLACK),
            );
        }
        IconArt::Chat => {
            painter.rect_filled(rect, r * 0.22, Color32::from_rgb(16, 163, 127));
            glyph("✦", AquaColors::WHITE);
        }
        IconArt::Browser => {
            painter.circle_filled(rect.center(), r * 0.45, Color32::from_rgb(37, 99, 235));
            glyph("e", AquaColors::WHITE);
        }
        IconArt::Applications => {
            painter.rect_filled(rect.shrink(r * 0.05), r * 0.12, Color32::from_rgb(59, 130, 246));
            glyph("A", AquaColors::WHITE);
        }
        IconArt::Trash => {
            let can = Rect::from_min_max(pos2(rect.min.x + r * 0.22, rect.min.y + r * 0.22), pos2(rect.max.x - r * 0.22, rect.max.y - r * 0.04));
            painter.rect_filled(can, r * 0.06, Color32::from_rgb(209, 213, 219));
            painter.rect_stroke(can, r * 0.06, Stroke::new(1.0, AquaColors::BORDER));
            let lid = Rect::from_min_max(pos2(rect.min.x + r * 0.16, rect.min.y + r * 0.12), pos2(rect.max.x - r * 0.16, rect.min.y + r * 0.22));
            painter.rect_filled(lid, r * 0.03, Color32::from_rgb(156, 163, 175));
        }
        IconArt::HardDrive => {
            let body = Rect::from_min_max(pos2(rect.min.x, rect.min.y + r * 0.3), pos2(rect.max.x, rect.max.y - r * 0.2));
            painter.rect_filled(body, r * 0.08, Color32::from_rgb(203, 213, 225));
            painter.rect_stroke(body, r * 0.08, Stroke::new(1.0, AquaColors::BORDER));
            painter.circle_filled(pos2(body.max.x - r * 0.12, body.center().y), r * 0.04, Color32::from_rgb(34, 197, 94));
        }
        IconArt::Ipod => {
            let body = Rect::from_center_size(rect.center(), vec2(r * 0.6, r * 0.95));
            painter.rect_filled(body, r * 0.08, Color32::from_rgb(243, 244, 246));
            painter.rect_stroke(body, r * 0.08, Stroke::new(1.0, AquaColors::BORDER));
            let screen = Rect::from_min_size(body.min + vec2(r * 0.06, r * 0.06), vec2(body.width() - r * 0.12, r * 0.3));
            painter.rect_filled(screen, 2.0, Color32::from_rgb(191, 219, 254));
            painter.circle_stroke(pos2(body.center().x, body.max.y - r * 0.25), r * 0.16, Stroke::new(1.5, AquaColors::BORDER));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets() -> Vec<LaunchTarget> {
        dock_items()
            .into_iter()
            .filter_map(|i| match i {
                DockItem::Launch(t) => Some(t),
                DockItem::Separator => None,
            })
            .collect()
    }

    #[test]
    fn test_dock_targets() {
        let ids: Vec<Option<String>> = targets().iter().map(|t| t.request.as_ref().map(|r| r.id.clone())).collect();
        assert_eq!(
            ids,
            vec![
                Some("finder-main".to_string()),
                Some("chat".to_string()),
                None,
                Some("finder-apps".to_string()),
                Some("trash".to_string()),
            ]
        );
        assert!(matches!(dock_items()[4], DockItem::Separator));
    }

    #[test]
    fn test_launch_sizes() {
        assert_eq!(chat().size, vec2(500.0, 350.0));
        assert_eq!(ipod().size, vec2(320.0, 508.0));
        assert_eq!(trash().size, vec2(400.0, 300.0));
    }

    #[test]
    fn test_desktop_icons() {
        let icons = desktop_icons();
        assert_eq!(icons[0].request.as_ref().unwrap().id, "finder-main");
        assert_eq!(icons[1].request.as_ref().unwrap().kind, AppKind::MediaPlayer);
    }

    #[test]
    fn test_tooltip_anchor() {
        let item = Rect::from_min_size(pos2(100.0, 500.0), vec2(48.0, 48.0));
        assert_eq!(tooltip_anchor(item, false), pos2(124.0, 488.0));
        assert_eq!(tooltip_anchor(item, true), pos2(124.0, 472.0));
    }

    #[test]
    fn test_open_indicator() {
        let mut wm = WindowManager::new(vec2(1000.0, 800.0));
        let finder = &targets()[0];
        assert!(!finder.is_open(&wm));
        wm.open_or_focus(finder_main());
        assert!(finder.is_open(&wm));
        assert!(!targets()[2].is_open(&wm));
    }

    #[test]
    fn test_dock_layout_is_centered() {
        let screen = Rect::from_min_size(pos2(0.0, 0.0), vec2(1000.0, 800.0));
        let (shelf, rects) = dock_layout(&dock_items(), screen, DOCK_ICON);
        assert_eq!(rects.len(), 6);
        assert!((shelf.center().x - 500.0).abs() < 0.01);
        assert!(shelf.max.y <= 800.0);
        assert!(rects.windows(2).all(|w| w[0].max.x < w[1].min.x));
    }
}
