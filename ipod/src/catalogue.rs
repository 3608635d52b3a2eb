//! Built-in songs and the main menu

use egui::Color32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Song {
    pub title: &'static str,
    pub artist: &'static str,
    pub album: &'static str,
    pub duration_secs: u32,
    /// Only songs with audio make any sound.
    pub has_audio: bool,
    pub cover: Color32,
}

pub const SONGS: [Song; 5] = [
    Song {
        title: "LUV SIC",
        artist: "Nujabes",
        album: "Modal Soul",
        duration_secs: 274,
        has_audio: true,
        cover: Color32::from_rgb(107, 33, 168),
    },
    Song {
        title: "Tiramisu",
        artist: "Don Toliver",
        album: "Life of a Don",
        duration_secs: 180,
        has_audio: false,
        cover: Color32::from_rgb(4, 120, 87),
    },
    Song {
        title: "Less Than Zero",
        artist: "The Weeknd",
        album: "Dawn FM",
        duration_secs: 213,
        has_audio: false,
        cover: Color32::from_rgb(30, 64, 175),
    },
    Song {
        title: "Instant Crush",
        artist: "Daft Punk",
        album: "RAM",
        duration_secs: 337,
        has_audio: false,
        cover: Color32::from_rgb(30, 41, 59),
    },
    Song {
        title: "Nights",
        artist: "Frank Ocean",
        album: "Blonde",
        duration_secs: 307,
        has_audio: false,
        cover: Color32::from_rgb(0, 0, 0),
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: &'static str,
    /// Shows a chevron.
    pub has_submenu: bool,
}

pub const MENU: [MenuEntry; 5] = [
    MenuEntry { label: "Music", has_submenu: true },
    MenuEntry { label: "Extras", has_submenu: true },
    MenuEntry { label: "Settings", has_submenu: true },
    MenuEntry { label: "Shuffle Songs", has_submenu: false },
    MenuEntry { label: "Now Playing", has_submenu: false },
];

/// Index of the entry that switches to the now-playing screen.
pub const NOW_PLAYING_ENTRY: usize = 4;
