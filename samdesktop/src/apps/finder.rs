//! File browser grid
//!
//! A fixed set of folders in three columns. Clicking selects; nothing opens.

use egui::{pos2, vec2, Align2, Color32, FontId, Id, Painter, Rect, Sense, Stroke, Ui};
use samcore::theme::AquaColors;

pub const FOLDERS: [&str; 8] = [
    "Applets",
    "Applications",
    "Desktop",
    "Documents",
    "Images",
    "Music",
    "Sites",
    "Videos",
];

const COLUMNS: usize = 3;
const CELL: egui::Vec2 = vec2(96.0, 80.0);
const ICON: f32 = 48.0;
const PADDING: f32 = 16.0;

/// Grid cell of the item at `index`, relative to the content's top-left.
pub fn cell_rect(origin: egui::Pos2, index: usize) -> Rect {
    let col = (index % COLUMNS) as f32;
    let row = (index / COLUMNS) as f32;
    Rect::from_min_size(origin + vec2(PADDING + col * CELL.x, PADDING + row * CELL.y), CELL)
}

#[derive(Debug, Default)]
pub struct FinderView {
    selected: Option<usize>,
}

impl FinderView {
    pub fn selected(&self) -> Option<&'static str> {
        self.selected.and_then(|i| FOLDERS.get(i).copied())
    }

    pub fn select(&mut self, index: usize) {
        if index < FOLDERS.len() {
            self.selected = Some(index);
        }
    }

    pub fn show(&mut self, ui: &mut Ui, id: &str) {
        let origin = ui.max_rect().min;
        for (index, label) in FOLDERS.iter().enumerate() {
            let cell = cell_rect(origin, index);
            let response = ui.interact(cell, Id::new(("finder_item", id, index)), Sense::click());
            if response.clicked() {
                self.select(index);
            }
            let icon = Rect::from_center_size(pos2(cell.center().x, cell.min.y + ICON / 2.0), vec2(ICON, ICON));
            paint_folder(ui.painter(), icon, index == 0);

            let selected = self.selected == Some(index);
            let galley = ui.painter().layout_no_wrap(label.to_string(), FontId::proportional(12.0), AquaColors::TEXT);
            let label_rect = Rect::from_center_size(pos2(cell.center().x, icon.max.y + 10.0), galley.size() + vec2(6.0, 2.0));
            if selected {
                ui.painter().rect_filled(label_rect, 3.0, AquaColors::SELECTION);
            } else if response.hovered() {
                ui.painter().rect_filled(label_rect, 3.0, Color32::from_rgb(191, 219, 254));
            }
            let text_color = if selected { AquaColors::WHITE } else { AquaColors::TEXT };
            ui.painter().text(label_rect.center(), Align2::CENTER_CENTER, *label, FontId::proportional(12.0), text_color);
        }
        let rows = FOLDERS.len().div_ceil(COLUMNS) as f32;
        ui.allocate_space(vec2(PADDING * 2.0 + CELL.x * COLUMNS as f32, PADDING * 2.0 + CELL.y * rows));
    }
}

fn paint_folder(painter: &Painter, rect: Rect, applets: bool) {
    let tab = Rect::from_min_size(rect.min + vec2(2.0, 6.0), vec2(rect.width() * 0.4, 8.0));
    let body = Rect::from_min_max(rect.min + vec2(0.0, 10.0), rect.max - vec2(0.0, 4.0));
    let (fill, edge) = if applets {
        (Color32::from_rgb(167, 139, 250), Color32::from_rgb(124, 58, 237))
    } else {
        (Color32::from_rgb(147, 197, 253), Color32::from_rgb(59, 130, 246))
    };
    painter.rect_filled(tab, 2.0, edge);
    painter.rect_filled(body, 4.0, fill);
    painter.rect_stroke(body, 4.0, Stroke::new(1.0, edge));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_is_three_wide() {
        let origin = pos2(0.0, 0.0);
        assert_eq!(cell_rect(origin, 0).min, pos2(16.0, 16.0));
        assert_eq!(cell_rect(origin, 2).min, pos2(208.0, 16.0));
        assert_eq!(cell_rect(origin, 3).min, pos2(16.0, 96.0));
        assert_eq!(cell_rect(origin, 7).min, pos2(112.0, 176.0));
    }

    #[test]
    fn test_select() {
        let mut view = FinderView::default();
        assert_eq!(view.selected(), None);
        view.select(5);
        assert_eq!(view.selected(), Some("Music"));
        view.select(42);
        assert_eq!(view.selected(), Some("Music"));
    }
}
