//! Trash window

use crate::dock::{paint_icon, IconArt};
use egui::{vec2, Color32, RichText, Sense, Ui};
use samcore::theme::AquaColors;

pub const EMPTY_MESSAGE: &str = "The Trash is empty";

pub fn show_trash(ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space((ui.available_height() / 2.0 - 50.0).max(0.0));
        let (rect, _) = ui.allocate_exact_size(vec2(64.0, 64.0), Sense::hover());
        paint_icon(ui.painter(), rect, IconArt::Trash);
        // faded
        ui.painter().rect_filled(rect, 0.0, Color32::from_white_alpha(120));
        ui.label(RichText::new(EMPTY_MESSAGE).size(14.0).color(AquaColors::TEXT_MUTED));
    });
}
