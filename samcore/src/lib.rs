//! samcore: shared library for the samOS desktop and its applets

pub mod config;
pub mod geometry;
pub mod gesture;
pub mod repaint;
pub mod safety;
pub mod theme;
pub mod widgets;

pub use config::ShellConfig;
pub use repaint::RepaintController;
pub use theme::AquaTheme;
