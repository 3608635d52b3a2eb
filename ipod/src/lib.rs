//! ipod: click-wheel music player for the samOS desktop
//!
//! Playback is simulated: a song "plays" by advancing a clock each frame.
//! The output level is reported so the shell can show it, but nothing is
//! decoded or sent to an audio device.

pub mod catalogue;
pub mod player;
mod view;

pub use catalogue::{MenuEntry, Song, MENU, SONGS};
pub use player::{Player, View};
pub use view::IpodApp;
