//! Window manager
//!
//! Owns every window record of the session plus the focus bookkeeping
//! (active id, z-counter). All mutation goes through [`WindowManager::open_or_focus`],
//! [`WindowManager::close`], [`WindowManager::focus`] and
//! [`WindowManager::move_to`].
//!
//! Records are never removed. Closing a window only clears `is_open`; the
//! record stays in the arena for the rest of the session and is reused when
//! the same id is opened again.

use egui::{vec2, Pos2, Vec2};
use samcore::config::LayoutConfig;
use serde::{Deserialize, Serialize};

/// Z-order of the dock. Windows always stay below it.
pub const DOCK_Z: u32 = 9999;

/// Highest z-order a window can reach.
pub const Z_CAP: u32 = DOCK_Z - 1;

pub const DEFAULT_WINDOW_SIZE: Vec2 = vec2(400.0, 300.0);

/// What a window shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppKind {
    FileBrowser,
    Trash,
    Chat,
    MediaPlayer,
}

/// Arguments of an open-or-focus call.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenRequest {
    pub id: String,
    pub kind: AppKind,
    pub title: String,
    pub size: Vec2,
}

impl OpenRequest {
    pub fn new(id: impl Into<String>, kind: AppKind, title: impl Into<String>) -> Self {
        Self { id: id.into(), kind, title: title.into(), size: DEFAULT_WINDOW_SIZE }
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.size = vec2(width, height);
        self
    }
}

/// Durable state of one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: String,
    pub kind: AppKind,
    pub title: String,
    /// Top-left corner.
    pub position: Pos2,
    pub size: Vec2,
    pub z_order: u32,
    pub is_open: bool,
}

/// Whether a viewport of this size uses the narrow (phone) layout.
pub fn is_narrow(viewport: Vec2, layout: &LayoutConfig) -> bool {
    viewport.x <= layout.narrow_breakpoint
}

pub struct WindowManager {
    windows: Vec<WindowRecord>,
    active: Option<String>,
    z_counter: u32,
    viewport: Vec2,
    layout: LayoutConfig,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::with_layout(LayoutConfig::default())
    }
}

impl WindowManager {
    pub fn new(viewport: Vec2) -> Self {
        let mut wm = Self::default();
        wm.viewport = viewport;
        wm
    }

    pub fn with_layout(layout: LayoutConfig) -> Self {
        Self {
            windows: Vec::new(),
            active: None,
            z_counter: 0,
            viewport: vec2(1024.0, 768.0),
            layout,
        }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Live viewport size, refreshed by the shell every frame.
    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn is_narrow(&self) -> bool {
        is_narrow(self.viewport, &self.layout)
    }

    /// Open a window, or bring an existing one to the front.
    ///
    /// A new or previously closed window is centered on the viewport (plus a
    /// cascade offset on narrow viewports). A window that is already open
    /// keeps its position and is only raised.
    pub fn open_or_focus(&mut self, request: OpenRequest) {
        let z = self.next_z();
        let open_count = self.open_count();
        let placed = self.initial_position(request.size, open_count);

        match self.windows.iter_mut().find(|w| w.id == request.id) {
            Some(window) if window.is_open => {
                window.z_order = z;
                log::debug!("focus {} (z={})", window.id, z);
            }
            Some(window) => {
                window.position = placed;
                window.is_open = true;
                window.z_order = z;
                log::info!("reopen {} at ({:.0}, {:.0})", window.id, placed.x, placed.y);
            }
            None => {
                log::info!("open {} at ({:.0}, {:.0})", request.id, placed.x, placed.y);
                self.windows.push(WindowRecord {
                    id: request.id.clone(),
                    kind: request.kind,
                    title: request.title,
                    position: placed,
                    size: request.size,
                    z_order: z,
                    is_open: true,
                });
            }
        }

        self.active = Some(request.id);
        self.z_counter = z;
    }

    /// Hide a window. Unknown ids are ignored.
    pub fn close(&mut self, id: &str) {
        if let Some(window) = self.windows.iter_mut().find(|w| w.id == id) {
            window.is_open = false;
            log::info!("close {}", id);
        }
    }

    /// Raise a window and make it active. Unknown ids are ignored.
    pub fn focus(&mut self, id: &str) {
        let z = self.next_z();
        let Some(window) = self.windows.iter_mut().find(|w| w.id == id) else {
            return;
        };
        window.z_order = z;
        self.z_counter = z;
        self.active = Some(id.to_string());
    }

    /// Set a window's top-left. Not clamped to the viewport.
    pub fn move_to(&mut self, id: &str, position: Pos2) {
        if let Some(window) = self.windows.iter_mut().find(|w| w.id == id) {
            window.position = position;
        }
    }

    /// Open windows from bottom to top.
    ///
    /// Equal z-orders (only possible once the cap is reached) keep creation
    /// order, so the most recently created of them paints last.
    pub fn paint_order(&self) -> Vec<&WindowRecord> {
        let mut open: Vec<&WindowRecord> = self.windows.iter().filter(|w| w.is_open).collect();
        open.sort_by_key(|w| w.z_order);
        open
    }

    pub fn get(&self, id: &str) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == id)
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.get(id).is_some_and(|w| w.is_open)
    }

    /// All records ever opened this session, in creation order.
    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn z_counter(&self) -> u32 {
        self.z_counter
    }

    fn next_z(&self) -> u32 {
        (self.z_counter + 1).min(Z_CAP)
    }

    fn open_count(&self) -> usize {
        self.windows.iter().filter(|w| w.is_open).count()
    }

    fn initial_position(&self, size: Vec2, open_count: usize) -> Pos2 {
        let centered = Pos2::new(
            self.viewport.x / 2.0 - size.x / 2.0,
            self.viewport.y / 2.0 - size.y / 2.0,
        );
        if self.is_narrow() {
            let offset = self.layout.cascade_step * open_count as f32;
            centered + vec2(offset, offset)
        } else {
            centered
        }
    }
}
