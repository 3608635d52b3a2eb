//! Menu bar: logo, static menus, volume popover, clock

use chrono::{Local, NaiveDateTime};
use egui::{pos2, vec2, Context, FontId, Id, Order, Pos2, Rect, RichText, Sense, Stroke};
use samcore::gesture::LinearSlider;
use samcore::theme::{AquaColors, AquaTheme};
use samcore::widgets::paint_track;

pub const MENU_BAR_HEIGHT: f32 = 28.0;

const POPOVER_SIZE: egui::Vec2 = vec2(32.0, 128.0);
const TRACK_SIZE: egui::Vec2 = vec2(4.0, 80.0);

/// Menu commands that do something.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    NewFinderWindow,
    CloseWindow,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuItem {
    Entry { label: &'static str, checked: bool, action: Option<MenuAction> },
    Separator,
}

fn item(label: &'static str) -> MenuItem {
    MenuItem::Entry { label, checked: false, action: None }
}

/// The five menus and their items, left to right.
pub fn menus() -> Vec<(&'static str, Vec<MenuItem>)> {
    use MenuItem::Separator;
    vec![
        (
            "File",
            vec![
                MenuItem::Entry { label: "New Finder Window", checked: false, action: Some(MenuAction::NewFinderWindow) },
                item("New Folder"),
                Separator,
                item("Get Info"),
                Separator,
                item("Eject"),
                Separator,
                MenuItem::Entry { label: "Close Window", checked: false, action: Some(MenuAction::CloseWindow) },
            ],
        ),
        ("Edit", vec![item("Undo"), item("Redo"), Separator, item("Cut"), item("Copy"), item("Paste")]),
        (
            "View",
            vec![
                MenuItem::Entry { label: "as Icons", checked: true, action: None },
                item("as List"),
                item("as Columns"),
                Separator,
                item("Show View Options"),
            ],
        ),
        (
            "Go",
            vec![
                item("Back"),
                item("Forward"),
                Separator,
                item("Computer"),
                item("Home"),
                item("Desktop"),
                item("Applications"),
            ],
        ),
        ("Help", vec![item("samOS Help")]),
    ]
}

/// `Mon Jan 5 3:04 PM`
pub fn format_clock(now: NaiveDateTime) -> String {
    now.format("%a %b %-d %-I:%M %p").to_string()
}

pub struct MenuBar {
    menus: Vec<(&'static str, Vec<MenuItem>)>,
    volume: LinearSlider,
    volume_open: bool,
}

impl MenuBar {
    pub fn new(initial_volume: f32) -> Self {
        Self {
            menus: menus(),
            volume: LinearSlider::vertical(initial_volume),
            volume_open: false,
        }
    }

    /// Global output volume, 0–100.
    pub fn volume(&self) -> f32 {
        self.volume.value()
    }

    pub fn is_volume_open(&self) -> bool {
        self.volume_open
    }

    /// Apply a drag value deferred from the previous frame.
    pub fn on_frame(&mut self) {
        self.volume.on_frame();
    }

    pub fn has_pending(&self) -> bool {
        self.volume.has_pending()
    }

    /// Presses outside the popover and its icon close it.
    fn dismiss_on_outside_press(&mut self, press: Pos2, popover: Rect, icon: Rect) {
        if self.volume_open && !popover.contains(press) && !icon.contains(press) {
            self.volume_open = false;
        }
    }

    pub fn show(&mut self, ctx: &Context) -> Option<MenuAction> {
        let mut action = None;
        let mut icon_rect = Rect::NOTHING;

        egui::TopBottomPanel::top("menu_bar")
            .exact_height(MENU_BAR_HEIGHT)
            .frame(AquaTheme::menu_bar_frame())
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    let (logo, _) = ui.allocate_exact_size(vec2(20.0, 20.0), Sense::hover());
                    paint_logo(ui.painter(), logo);
                    ui.label(RichText::new("Finder").strong().color(AquaColors::BLACK));

                    for (title, items) in &self.menus {
                        ui.menu_button(*title, |ui| {
                            ui.set_min_width(220.0);
                            for entry in items {
                                match entry {
                                    MenuItem::Separator => {
                                        ui.separator();
                                    }
                                    MenuItem::Entry { label, checked, action: item_action } => {
                                        let mut button = egui::Button::new(*label).frame(false);
                                        if *checked {
                                            button = button.shortcut_text("✓");
                                        }
                                        if ui.add(button).clicked() {
                                            action = *item_action;
                                            ui.close_menu();
                                        }
                                    }
                                }
                            }
                        });
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add_space(8.0);
                        let clock = format_clock(Local::now().naive_local());
                        ui.label(RichText::new(clock).font(FontId::proportional(12.0)).color(AquaColors::TEXT));
                        ui.add_space(8.0);
                        let (rect, response) = ui.allocate_exact_size(vec2(20.0, 20.0), Sense::click());
                        paint_speaker(ui.painter(), rect, self.volume.value());
                        if response.clicked() {
                            self.volume_open = !self.volume_open;
                        }
                        icon_rect = rect;
                    });
                });
            });

        let popover = Rect::from_min_size(
            pos2(icon_rect.center().x - POPOVER_SIZE.x / 2.0, MENU_BAR_HEIGHT),
            POPOVER_SIZE,
        );
        if let Some(press) = ctx.input(|i| if i.pointer.any_pressed() { i.pointer.interact_pos() } else { None }) {
            self.dismiss_on_outside_press(press, popover, icon_rect);
        }
        if self.volume_open {
            self.show_volume_popover(ctx, popover);
        } else if self.volume.is_dragging() {
            let last = ctx.input(|i| i.pointer.latest_pos());
            self.volume.release(Self::track_rect(popover), last);
        }

        action
    }

    fn track_rect(popover: Rect) -> Rect {
        Rect::from_center_size(popover.center(), TRACK_SIZE)
    }

    fn show_volume_popover(&mut self, ctx: &Context, popover: Rect) {
        let track = Self::track_rect(popover);
        egui::Area::new(Id::new("volume_popover"))
            .order(Order::Foreground)
            .fixed_pos(popover.min)
            .constrain(false)
            .show(ctx, |ui| {
                ui.set_min_size(popover.size());
                let painter = ui.painter();
                painter.rect_filled(popover, 2.0, AquaColors::MENU_BG);
                painter.rect_stroke(popover, 2.0, Stroke::new(1.0, AquaColors::BORDER));

                let hit = track.expand2(vec2(10.0, 6.0));
                let response = ui.interact(hit, Id::new("volume_track"), Sense::click_and_drag());
                let (pressed, released, latest) =
                    ui.input(|i| (i.pointer.any_pressed(), i.pointer.any_released(), i.pointer.latest_pos()));

                if pressed && response.is_pointer_button_down_on() {
                    if let Some(p) = latest {
                        self.volume.press(track, p);
                    }
                } else if self.volume.is_dragging() {
                    if released {
                        self.volume.release(track, latest);
                    } else if let Some(p) = latest {
                        self.volume.drag(track, p);
                    }
                }

                paint_track(ui.painter(), track, self.volume.value(), true, true);
            });
    }
}

fn paint_logo(painter: &egui::Painter, rect: Rect) {
    let c = rect.center() + vec2(0.0, 1.5);
    let body = egui::Color32::from_rgb(60, 60, 60);
    painter.circle_filled(c + vec2(-2.5, 0.0), 5.5, body);
    painter.circle_filled(c + vec2(2.5, 0.0), 5.5, body);
    painter.circle_filled(c + vec2(6.5, -1.5), 3.0, AquaColors::MENU_BG);
    painter.line_segment([c + vec2(0.0, -5.0), c + vec2(2.5, -9.0)], Stroke::new(1.8, body));
}

fn paint_speaker(painter: &egui::Painter, rect: Rect, volume: f32) {
    let color = AquaColors::TEXT;
    let c = rect.center();
    let cone = vec![c + vec2(-7.0, -3.0), c + vec2(-4.0, -3.0), c + vec2(0.0, -7.0), c + vec2(0.0, 7.0), c + vec2(-4.0, 3.0), c + vec2(-7.0, 3.0)];
    painter.add(egui::Shape::convex_polygon(cone, color, Stroke::NONE));
    let waves = if volume <= 0.0 { 0 } else if volume < 50.0 { 1 } else { 2 };
    for i in 0..waves {
        let r = 4.0 + i as f32 * 3.5;
        let points: Vec<Pos2> = (-4..=4)
            .map(|k| {
                let a = k as f32 * 0.15;
                pos2(c.x + 1.0 + r * a.cos(), c.y + r * a.sin())
            })
            .collect();
        painter.add(egui::Shape::line(points, Stroke::new(1.5, color)));
    }
}
