//! samOS desktop: menu bar, desktop icons, windows and dock, wired per frame
//!
//! Frame order:
//! - flush slider values deferred from the previous frame
//! - advance the playback clock and collect chat replies
//! - menu bar, desktop background and icons
//! - open windows bottom to top, applying their events to the window manager
//! - dock on top of everything

use crate::apps::{show_trash, FinderView};
use crate::dock::{self, show_desktop_icons, Dock, LaunchTarget};
use crate::menubar::{MenuAction, MenuBar};
use crate::window::{layer_id, layout_rect, WindowChrome, WindowEvent};
use crate::wm::{AppKind, OpenRequest, WindowManager, WindowRecord};
use chat::ChatApp;
use egui::{Context, Ui};
use ipod::IpodApp;
use samcore::repaint::RepaintController;
use samcore::safety::catch_or;
use samcore::theme::AquaColors;
use samcore::ShellConfig;
use std::collections::HashMap;

pub struct DesktopApp {
    wm: WindowManager,
    /// Pointer state per window id.
    chrome: HashMap<String, WindowChrome>,
    dock: Dock,
    icons: Vec<LaunchTarget>,
    menubar: MenuBar,
    /// Each file browser window keeps its own selection.
    finders: HashMap<String, FinderView>,
    ipod: IpodApp,
    chat: ChatApp,
    repaint: RepaintController,
}

impl DesktopApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let path = ShellConfig::default_path();
        Self::with_config(ShellConfig::load_or_default(&path))
    }

    pub fn with_config(config: ShellConfig) -> Self {
        if config.chat.base_url.is_none() {
            log::warn!("no chat backend configured; chat replies will fall back");
        }
        Self {
            wm: WindowManager::with_layout(config.layout.clone()),
            chrome: HashMap::new(),
            dock: Dock::default(),
            icons: dock::desktop_icons(),
            menubar: MenuBar::new(config.initial_volume),
            finders: HashMap::new(),
            ipod: IpodApp::default(),
            chat: ChatApp::from_config(config.chat),
            repaint: RepaintController::new(),
        }
    }

    pub fn window_manager(&self) -> &WindowManager {
        &self.wm
    }

    fn apply_menu_action(&mut self, action: MenuAction) {
        match action {
            MenuAction::NewFinderWindow => self.wm.open_or_focus(dock::finder_main()),
            MenuAction::CloseWindow => {
                if let Some(id) = self.wm.active_id().map(str::to_string) {
                    self.wm.close(&id);
                }
            }
        }
    }

    fn apply_window_events(&mut self, id: &str, events: Vec<WindowEvent>) {
        for event in events {
            match event {
                WindowEvent::Focus => self.wm.focus(id),
                WindowEvent::Close => {
                    self.wm.close(id);
                    if let Some(chrome) = self.chrome.get_mut(id) {
                        chrome.release();
                    }
                }
                WindowEvent::MoveTo(position) => self.wm.move_to(id, position),
            }
        }
    }

    fn any_dragging(&self) -> bool {
        self.chrome.values().any(WindowChrome::is_dragging)
    }

    fn draw_windows(&mut self, ctx: &Context) {
        let viewport = self.wm.viewport();
        let narrow = self.wm.is_narrow();
        let volume = self.menubar.volume();
        let records: Vec<WindowRecord> = self.wm.paint_order().into_iter().cloned().collect();

        for record in records {
            let rect = layout_rect(&record, viewport, self.wm.layout());
            let chrome = self.chrome.entry(record.id.clone()).or_default();
            let finders = &mut self.finders;
            let ipod = &mut self.ipod;
            let chat = &mut self.chat;
            let events = chrome.show(ctx, &record, rect, |ui| {
                catch_or(&record.title, (), || match record.kind {
                    AppKind::FileBrowser => finders.entry(record.id.clone()).or_default().show(ui, &record.id),
                    AppKind::Trash => show_trash(ui),
                    AppKind::Chat => chat.show(ui),
                    AppKind::MediaPlayer => ipod.show(ui, Some(volume), narrow),
                })
            });
            ctx.move_to_top(layer_id(&record));
            self.apply_window_events(&record.id, events);
        }
    }

    fn draw_desktop(&mut self, ctx: &Context) -> Option<OpenRequest> {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(AquaColors::DESKTOP))
            .show(ctx, |ui: &mut Ui| {
                let area = ui.available_rect_before_wrap();
                show_desktop_icons(ui, area, &self.icons)
            })
            .inner
    }
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.repaint.begin_frame();

        self.menubar.on_frame();
        self.ipod.on_frame();
        self.ipod.tick(ctx.input(|i| i.time));
        self.chat.poll();

        self.wm.set_viewport(ctx.screen_rect().size());

        if let Some(action) = self.menubar.show(ctx) {
            self.apply_menu_action(action);
        }
        if let Some(request) = self.draw_desktop(ctx) {
            self.wm.open_or_focus(request);
        }

        self.draw_windows(ctx);

        if let Some(request) = self.dock.show(ctx, ctx.screen_rect(), &self.wm) {
            self.wm.open_or_focus(request);
        }

        self.repaint
            .set_continuous(self.ipod.needs_continuous() || self.chat.is_waiting() || self.any_dragging());
        if self.menubar.has_pending() || self.ipod.has_pending() {
            self.repaint.mark_pending();
        }
        self.repaint.end_frame(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn app() -> DesktopApp {
        let mut app = DesktopApp::with_config(ShellConfig::default());
        app.wm.set_viewport(vec2(1280.0, 800.0));
        app
    }

    #[test]
    fn test_new_finder_window_menu() {
        let mut app = app();
        app.apply_menu_action(MenuAction::NewFinderWindow);
        assert!(app.window_manager().is_open("finder-main"));
        assert_eq!(app.window_manager().active_id(), Some("finder-main"));
    }

    #[test]
    fn test_close_window_menu_closes_active() {
        let mut app = app();
        app.wm.open_or_focus(dock::chat());
        app.wm.open_or_focus(dock::trash());
        app.apply_menu_action(MenuAction::CloseWindow);
        assert!(!app.window_manager().is_open("trash"));
        assert!(app.window_manager().is_open("chat"));
    }

    #[test]
    fn test_close_window_menu_without_windows() {
        let mut app = app();
        app.apply_menu_action(MenuAction::CloseWindow);
        assert!(app.window_manager().windows().is_empty());
    }

    #[test]
    fn test_window_events_reach_manager() {
        let mut app = app();
        app.wm.open_or_focus(dock::chat());
        app.wm.open_or_focus(dock::trash());
        app.apply_window_events("chat", vec![WindowEvent::Focus, WindowEvent::MoveTo(pos2(5.0, 40.0))]);
        let order: Vec<&str> = app.wm.paint_order().iter().map(|w| w.id.as_str()).collect();
        assert_eq!(order, vec!["trash", "chat"]);
        assert_eq!(app.wm.get("chat").map(|w| w.position), Some(pos2(5.0, 40.0)));

        app.apply_window_events("chat", vec![WindowEvent::Close]);
        assert!(!app.wm.is_open("chat"));
        assert!(!app.any_dragging());
    }
}
