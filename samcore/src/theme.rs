//! Aqua theme
//!
//! Brushed-grey title bars, pinstriped window bodies, blue selection and
//! slider fills, translucent white dock glass.

use egui::{Color32, FontFamily, FontId, Painter, Rect, Rounding, Stroke, Style, TextStyle, Visuals};

/// Palette used across the desktop.
pub struct AquaColors;

impl AquaColors {
    pub const WHITE: Color32 = Color32::from_rgb(255, 255, 255);
    pub const BLACK: Color32 = Color32::from_rgb(0, 0, 0);
    pub const TEXT: Color32 = Color32::from_rgb(55, 65, 81);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(107, 114, 128);
    pub const PINSTRIPE: Color32 = Color32::from_rgb(245, 245, 245);
    pub const TITLE_TOP: Color32 = Color32::from_rgb(230, 230, 230);
    pub const TITLE_MID_HI: Color32 = Color32::from_rgb(220, 220, 220);
    pub const TITLE_MID_LO: Color32 = Color32::from_rgb(200, 200, 200);
    pub const TITLE_BOTTOM: Color32 = Color32::from_rgb(180, 180, 180);
    pub const BORDER: Color32 = Color32::from_rgb(156, 163, 175);
    pub const MENU_BG: Color32 = Color32::from_rgb(240, 240, 240);
    pub const TOOLBAR: Color32 = Color32::from_rgb(236, 236, 236);
    pub const SELECTION: Color32 = Color32::from_rgb(38, 104, 227);
    pub const SELECTION_LIGHT: Color32 = Color32::from_rgb(92, 148, 250);
    pub const TRACK: Color32 = Color32::from_rgb(209, 213, 219);
    pub const CLOSE: Color32 = Color32::from_rgb(255, 95, 87);
    pub const CLOSE_EDGE: Color32 = Color32::from_rgb(224, 68, 62);
    pub const MINIMIZE: Color32 = Color32::from_rgb(255, 189, 46);
    pub const MINIMIZE_EDGE: Color32 = Color32::from_rgb(225, 161, 29);
    pub const ZOOM: Color32 = Color32::from_rgb(39, 201, 63);
    pub const ZOOM_EDGE: Color32 = Color32::from_rgb(26, 171, 41);
    pub const DESKTOP: Color32 = Color32::from_rgb(58, 110, 165);
    pub const DOCK_GLASS: Color32 = Color32::from_rgba_premultiplied(77, 77, 77, 77);
    pub const TOOLTIP: Color32 = Color32::from_rgba_premultiplied(27, 27, 27, 230);
}

/// Theme configuration for the desktop.
pub struct AquaTheme {
    pub font_size_body: f32,
    pub font_size_heading: f32,
    pub font_size_small: f32,
    pub window_padding: f32,
    pub item_spacing: f32,
}

impl Default for AquaTheme {
    fn default() -> Self {
        Self {
            font_size_body: 13.0,
            font_size_heading: 18.0,
            font_size_small: 11.0,
            window_padding: 8.0,
            item_spacing: 6.0,
        }
    }
}

impl AquaTheme {
    /// Apply the theme to an egui context.
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

        let mut visuals = Visuals::light();
        visuals.window_fill = AquaColors::WHITE;
        visuals.panel_fill = AquaColors::MENU_BG;
        visuals.window_rounding = Rounding::same(6.0);
        visuals.menu_rounding = Rounding::same(4.0);
        visuals.window_stroke = Stroke::new(1.0, AquaColors::BORDER);
        visuals.selection.bg_fill = AquaColors::SELECTION;
        visuals.selection.stroke = Stroke::new(1.0, AquaColors::WHITE);
        visuals.override_text_color = Some(AquaColors::TEXT);
        visuals.hyperlink_color = AquaColors::SELECTION;

        style.visuals = visuals;
        style.spacing.window_margin = egui::Margin::same(self.window_padding);
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(8.0, 3.0);

        ctx.set_style(style);
    }

    /// Menu bar frame: light grey glass with a bottom hairline.
    pub fn menu_bar_frame() -> egui::Frame {
        egui::Frame::none()
            .fill(AquaColors::MENU_BG)
            .stroke(Stroke::new(1.0, AquaColors::BORDER))
            .inner_margin(egui::Margin::symmetric(8.0, 0.0))
    }
}

/// Vertical two-band gradient of a classic Aqua title bar.
pub fn paint_title_bar(painter: &Painter, rect: Rect, rounding: Rounding) {
    let mid = rect.center().y;
    let top = Rect::from_min_max(rect.min, egui::pos2(rect.max.x, mid));
    let bottom = Rect::from_min_max(egui::pos2(rect.min.x, mid), rect.max);
    paint_vertical_gradient(
        painter,
        top,
        AquaColors::TITLE_TOP,
        AquaColors::TITLE_MID_HI,
        Rounding { nw: rounding.nw, ne: rounding.ne, sw: 0.0, se: 0.0 },
    );
    paint_vertical_gradient(painter, bottom, AquaColors::TITLE_MID_LO, AquaColors::TITLE_BOTTOM, Rounding::ZERO);
    painter.hline(rect.x_range(), rect.max.y, Stroke::new(1.0, AquaColors::BORDER));
}

/// Fill `rect` with a top-to-bottom gradient.
///
/// Rounded corners are painted as a flat fill in the `top` colour; the mesh
/// starts below them.
pub fn paint_vertical_gradient(painter: &Painter, rect: Rect, top: Color32, bottom: Color32, rounding: Rounding) {
    let inset = rounding.nw.max(rounding.ne).min(rect.height());
    if inset > 0.0 {
        painter.rect_filled(rect, rounding, top);
    }
    let inner = Rect::from_min_max(egui::pos2(rect.min.x, rect.min.y + inset), rect.max);
    let start = lerp_color(top, bottom, inset / rect.height().max(1.0));
    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(inner.left_top(), start);
    mesh.colored_vertex(inner.right_top(), start);
    mesh.colored_vertex(inner.left_bottom(), bottom);
    mesh.colored_vertex(inner.right_bottom(), bottom);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(1, 2, 3);
    painter.add(egui::Shape::mesh(mesh));
}

/// White body with thin vertical pinstripes.
pub fn paint_pinstripe(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, AquaColors::WHITE);
    let mut x = rect.min.x;
    while x < rect.max.x {
        let stripe = Rect::from_min_max(egui::pos2(x, rect.min.y), egui::pos2((x + 2.0).min(rect.max.x), rect.max.y));
        painter.rect_filled(stripe, 0.0, AquaColors::PINSTRIPE);
        x += 4.0;
    }
}

fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color32::from_rgb(mix(a.r(), b.r()), mix(a.g(), b.g()), mix(a.b(), b.b()))
}
