//! samOS desktop shell
//!
//! Menu bar, dock, desktop icons and a window manager for the applets.

pub mod apps;
pub mod desktop;
pub mod dock;
pub mod menubar;
pub mod window;
pub mod wm;

pub use desktop::DesktopApp;
