//! The player's case, screen and click wheel drawn with egui

use crate::catalogue::MENU;
use crate::player::{format_remaining, format_status_clock, format_time, Player, View};
use egui::{pos2, vec2, Align2, Color32, FontId, Id, Painter, Pos2, Rect, Sense, Stroke, Ui, Vec2};
use samcore::geometry::point_on_circle;
use samcore::theme::{paint_vertical_gradient, AquaColors};
use samcore::widgets::paint_track;

const CENTER_BUTTON_DIAMETER: f32 = 64.0;
const RING_BUTTON_SIZE: f32 = 30.0;
const PROGRESS_HEIGHT: f32 = 8.0;

/// Outer diameter of the click wheel.
pub fn wheel_diameter(narrow: bool) -> f32 {
    if narrow {
        176.0
    } else {
        192.0
    }
}

/// Radius of the circle through the middle of the ring, where the four
/// buttons sit.
pub fn ring_radius(wheel_diameter: f32) -> f32 {
    (CENTER_BUTTON_DIAMETER / 2.0 + wheel_diameter / 2.0) / 2.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingButton {
    Menu,
    Next,
    PlayPause,
    Prev,
}

impl RingButton {
    pub const ALL: [RingButton; 4] = [RingButton::Menu, RingButton::Next, RingButton::PlayPause, RingButton::Prev];

    /// Clockwise from 3 o'clock, screen coordinates.
    pub fn angle(self) -> f32 {
        match self {
            RingButton::Next => 0.0,
            RingButton::PlayPause => 90.0,
            RingButton::Prev => 180.0,
            RingButton::Menu => 270.0,
        }
    }

    pub fn center(self, wheel_center: Pos2, wheel_diameter: f32) -> Pos2 {
        point_on_circle(wheel_center, ring_radius(wheel_diameter), self.angle())
    }
}

/// Case and screen sizes.
fn case_size(narrow: bool) -> Vec2 {
    if narrow {
        vec2(280.0, 448.0)
    } else {
        vec2(300.0, 480.0)
    }
}

fn screen_size(narrow: bool) -> Vec2 {
    if narrow {
        vec2(230.0, 175.0)
    } else {
        vec2(250.0, 190.0)
    }
}

/// Player window content.
#[derive(Default)]
pub struct IpodApp {
    player: Player,
    last_time: Option<f64>,
}

impl IpodApp {
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Frames must keep coming while the clock runs or the user drags.
    pub fn needs_continuous(&self) -> bool {
        self.player.is_playing() || self.player.is_seeking() || self.player.is_turning()
    }

    pub fn on_frame(&mut self) {
        self.player.on_frame();
    }

    pub fn has_pending(&self) -> bool {
        self.player.has_pending()
    }

    /// Run the playback clock from egui's frame time. Call once per frame,
    /// whether or not the window is visible.
    pub fn tick(&mut self, now: f64) {
        if let Some(last) = self.last_time {
            self.player.advance((now - last) as f32);
        }
        self.last_time = Some(now);
    }

    pub fn show(&mut self, ui: &mut Ui, global_volume: Option<f32>, narrow: bool) {
        let area = ui.max_rect();
        let case = Rect::from_center_size(area.center(), case_size(narrow));
        ui.allocate_rect(area, Sense::hover());
        let painter = ui.painter().clone();

        paint_vertical_gradient(
            &painter,
            case,
            Color32::from_rgb(227, 227, 227),
            Color32::from_rgb(212, 212, 212),
            egui::Rounding::same(30.0),
        );
        painter.rect_stroke(case, 30.0, Stroke::new(1.0, Color32::from_rgb(170, 170, 170)));

        let top_margin = if narrow { 24.0 } else { 32.0 };
        let screen = Rect::from_min_size(
            pos2(case.center().x - screen_size(narrow).x / 2.0, case.min.y + top_margin),
            screen_size(narrow),
        );
        self.draw_screen(ui, &painter, screen, global_volume);

        let diameter = wheel_diameter(narrow);
        let wheel_center = pos2(case.center().x, screen.max.y + (case.max.y - screen.max.y) / 2.0);
        self.draw_wheel(ui, &painter, wheel_center, diameter);
    }

    fn draw_screen(&mut self, ui: &mut Ui, painter: &Painter, screen: Rect, global_volume: Option<f32>) {
        painter.rect_filled(screen.expand(4.0), 8.0, Color32::from_rgb(68, 68, 68));
        painter.rect_filled(screen, 2.0, AquaColors::WHITE);
        let painter = painter.with_clip_rect(screen);

        // status bar
        let bar = Rect::from_min_size(screen.min, vec2(screen.width(), 24.0));
        paint_vertical_gradient(&painter, bar, Color32::from_rgb(243, 244, 246), Color32::from_rgb(209, 213, 219), egui::Rounding::ZERO);
        painter.hline(bar.x_range(), bar.max.y, Stroke::new(1.0, Color32::from_rgb(156, 163, 175)));
        let glyph = if self.player.is_playing() { "▶" } else { "⏸" };
        painter.text(pos2(bar.min.x + 8.0, bar.center().y), Align2::LEFT_CENTER, glyph, FontId::proportional(9.0), AquaColors::TEXT);
        let clock = format_status_clock(chrono::Local::now().time());
        painter.text(bar.center(), Align2::CENTER_CENTER, clock, FontId::proportional(10.0), AquaColors::TEXT);
        let battery = Rect::from_min_size(pos2(bar.max.x - 28.0, bar.center().y - 4.0), vec2(20.0, 8.0));
        painter.rect_stroke(battery, 1.0, Stroke::new(1.0, Color32::from_rgb(75, 85, 99)));
        painter.rect_filled(
            Rect::from_min_size(battery.min + vec2(1.5, 1.5), vec2(battery.width() * 2.0 / 3.0, battery.height() - 3.0)),
            0.0,
            Color32::from_rgb(22, 163, 74),
        );

        let body = Rect::from_min_max(pos2(screen.min.x, bar.max.y), screen.max);
        match self.player.view() {
            View::Menu => self.draw_menu(&painter, body),
            View::NowPlaying => self.draw_now_playing(ui, &painter, body, global_volume),
        }
    }

    fn draw_menu(&self, painter: &Painter, body: Rect) {
        let list = Rect::from_min_max(body.min, pos2(body.center().x, body.max.y));
        let art = Rect::from_min_max(pos2(body.center().x, body.min.y), body.max);
        painter.rect_filled(art, 0.0, Color32::from_rgb(243, 244, 246));
        painter.text(art.center(), Align2::CENTER_CENTER, "♫", FontId::proportional(40.0), Color32::from_rgb(209, 213, 219));

        let header = Rect::from_min_size(list.min, vec2(list.width(), 22.0));
        painter.text(header.center(), Align2::CENTER_CENTER, "iPod", FontId::proportional(13.0), AquaColors::BLACK);
        painter.hline(header.x_range(), header.max.y, Stroke::new(1.0, Color32::from_rgb(209, 213, 219)));

        for (i, entry) in MENU.iter().enumerate() {
            let row = Rect::from_min_size(pos2(list.min.x, header.max.y + 2.0 + i as f32 * 20.0), vec2(list.width(), 20.0));
            let selected = i == self.player.selected_index();
            if selected {
                paint_vertical_gradient(painter, row, AquaColors::SELECTION_LIGHT, AquaColors::SELECTION, egui::Rounding::ZERO);
            }
            let color = if selected { AquaColors::WHITE } else { AquaColors::BLACK };
            painter.text(pos2(row.min.x + 10.0, row.center().y), Align2::LEFT_CENTER, entry.label, FontId::proportional(11.0), color);
            if entry.has_submenu {
                painter.text(pos2(row.max.x - 8.0, row.center().y), Align2::RIGHT_CENTER, "›", FontId::proportional(12.0), color);
            }
        }
    }

    fn draw_now_playing(&mut self, ui: &mut Ui, painter: &Painter, body: Rect, global_volume: Option<f32>) {
        let song = self.player.current_song();
        let info = Rect::from_min_size(body.min, vec2(body.width(), 100.0));
        let cover = Rect::from_min_size(info.min + vec2(8.0, 10.0), vec2(80.0, 80.0));
        painter.rect_filled(cover, 0.0, song.cover);
        painter.text(cover.center(), Align2::CENTER_CENTER, "♫", FontId::proportional(30.0), Color32::from_white_alpha(50));

        let text_x = cover.max.x + 8.0;
        painter.text(pos2(text_x, info.center().y - 14.0), Align2::LEFT_CENTER, song.title, FontId::proportional(13.0), AquaColors::BLACK);
        painter.text(pos2(text_x, info.center().y + 2.0), Align2::LEFT_CENTER, song.artist, FontId::proportional(11.0), AquaColors::TEXT_MUTED);
        painter.text(pos2(text_x, info.center().y + 16.0), Align2::LEFT_CENTER, song.album, FontId::proportional(9.0), Color32::from_rgb(156, 163, 175));
        if self.player.output_level(global_volume) > 0.0 {
            painter.text(pos2(info.max.x - 8.0, info.min.y + 8.0), Align2::RIGHT_TOP, "🔊", FontId::proportional(9.0), AquaColors::TEXT_MUTED);
        }

        let strip = Rect::from_min_max(pos2(body.min.x, info.max.y), body.max);
        painter.hline(strip.x_range(), strip.min.y, Stroke::new(1.0, Color32::from_rgb(209, 213, 219)));
        let shown = self.player.displayed_secs();
        let times_y = strip.min.y + 12.0;
        painter.text(pos2(strip.min.x + 12.0, times_y), Align2::LEFT_CENTER, format_time(shown), FontId::monospace(9.0), AquaColors::TEXT_MUTED);
        painter.text(
            pos2(strip.max.x - 12.0, times_y),
            Align2::RIGHT_CENTER,
            format_remaining(shown, song.duration_secs),
            FontId::monospace(9.0),
            AquaColors::TEXT_MUTED,
        );

        let track = Rect::from_min_size(pos2(strip.min.x + 12.0, times_y + 10.0), vec2(strip.width() - 24.0, PROGRESS_HEIGHT));
        let response = ui.interact(track.expand2(vec2(0.0, 6.0)), Id::new("ipod_progress"), Sense::click_and_drag());
        let (pressed, released, latest) =
            ui.input(|i| (i.pointer.any_pressed(), i.pointer.any_released(), i.pointer.latest_pos()));
        if pressed && response.is_pointer_button_down_on() {
            if let Some(p) = latest {
                self.player.progress_press(track, p);
            }
        } else if self.player.is_seeking() {
            if released {
                self.player.progress_release(track, latest);
            } else if let Some(p) = latest {
                self.player.progress_drag(track, p);
            }
        }
        let knob = response.hovered() || self.player.is_seeking();
        paint_track(painter, track, self.player.progress_percent(), false, knob);
    }

    fn draw_wheel(&mut self, ui: &mut Ui, painter: &Painter, center: Pos2, diameter: f32) {
        let outer = diameter / 2.0;
        let inner = CENTER_BUTTON_DIAMETER / 2.0;
        painter.circle_filled(center, outer, AquaColors::WHITE);
        painter.circle_stroke(center, outer, Stroke::new(1.0, Color32::from_rgb(200, 200, 200)));

        let wheel_rect = Rect::from_center_size(center, Vec2::splat(diameter));

        // ring buttons on top of the wheel surface
        for button in RingButton::ALL {
            let c = button.center(center, diameter);
            let rect = Rect::from_center_size(c, Vec2::splat(RING_BUTTON_SIZE));
            let response = ui.interact(rect, Id::new(("ipod_ring", button.angle() as u32)), Sense::click());
            paint_ring_glyph(painter, c, button);
            if response.clicked() {
                match button {
                    RingButton::Menu => self.player.press_menu(),
                    RingButton::Next => self.player.next(),
                    RingButton::PlayPause => self.player.toggle_play(),
                    RingButton::Prev => self.player.prev(),
                }
            }
        }

        let center_rect = Rect::from_center_size(center, Vec2::splat(CENTER_BUTTON_DIAMETER));
        let center_response = ui.interact(center_rect, Id::new("ipod_center"), Sense::click());
        paint_vertical_gradient(
            painter,
            center_rect,
            Color32::from_rgb(240, 240, 240),
            Color32::from_rgb(205, 205, 205),
            egui::Rounding::same(inner),
        );
        painter.circle_stroke(center, inner, Stroke::new(1.0, Color32::from_rgb(180, 180, 180)));
        if center_response.clicked() {
            self.player.press_center();
        }

        let (pressed, down, released, press_origin, latest) = ui.input(|i| {
            (
                i.pointer.any_pressed(),
                i.pointer.any_down(),
                i.pointer.any_released(),
                i.pointer.press_origin(),
                i.pointer.latest_pos(),
            )
        });
        if pressed {
            if let Some(p) = press_origin {
                let dist = p.distance(center);
                if ui.rect_contains_pointer(wheel_rect) && dist <= outer && dist > inner {
                    self.player.wheel_begin(center, p);
                }
            }
        } else if self.player.is_turning() {
            if down {
                if let Some(p) = latest {
                    self.player.wheel_drag(center, p);
                }
            }
            if released || !down {
                self.player.wheel_end();
            }
        }
    }
}

fn paint_ring_glyph(painter: &Painter, at: Pos2, button: RingButton) {
    let color = Color32::from_rgb(160, 160, 160);
    match button {
        RingButton::Menu => {
            painter.text(at, Align2::CENTER_CENTER, "MENU", FontId::proportional(11.0), color);
        }
        RingButton::Next => {
            painter.text(at, Align2::CENTER_CENTER, "⏭", FontId::proportional(13.0), color);
        }
        RingButton::Prev => {
            painter.text(at, Align2::CENTER_CENTER, "⏮", FontId::proportional(13.0), color);
        }
        RingButton::PlayPause => {
            painter.text(at, Align2::CENTER_CENTER, "⏯", FontId::proportional(13.0), color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_radius() {
        assert_eq!(ring_radius(wheel_diameter(true)), 60.0);
        assert_eq!(ring_radius(wheel_diameter(false)), 64.0);
    }

    #[test]
    fn test_ring_button_positions() {
        let c = pos2(96.0, 96.0);
        let d = wheel_diameter(false);
        let close = |a: Pos2, b: Pos2| (a - b).length() < 1e-3;
        assert!(close(RingButton::Menu.center(c, d), pos2(96.0, 32.0)));
        assert!(close(RingButton::Next.center(c, d), pos2(160.0, 96.0)));
        assert!(close(RingButton::PlayPause.center(c, d), pos2(96.0, 160.0)));
        assert!(close(RingButton::Prev.center(c, d), pos2(32.0, 96.0)));
    }

    #[test]
    fn test_tick_runs_clock() {
        let mut app = IpodApp::default();
        app.tick(1.0);
        app.player.toggle_play();
        app.tick(3.5);
        assert_eq!(app.player().position_secs(), 2.5);
        assert!(app.needs_continuous());
    }
}
