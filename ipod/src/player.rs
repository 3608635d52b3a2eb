//! Player state: menu navigation, playback clock, wheel and progress bar

use crate::catalogue::{Song, MENU, NOW_PLAYING_ENTRY, SONGS};
use egui::{Pos2, Rect};
use samcore::gesture::{ClickWheel, LinearSlider, WheelTick};

/// Volume change per wheel tick on the now-playing screen.
const VOLUME_STEP: f32 = 2.0;
const INITIAL_VOLUME: f32 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Menu,
    NowPlaying,
}

pub struct Player {
    view: View,
    selected: usize,
    song: usize,
    playing: bool,
    /// Playback position of the current song, seconds.
    position: f32,
    volume: f32,
    progress: LinearSlider,
    wheel: ClickWheel,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            view: View::NowPlaying,
            selected: 0,
            song: 0,
            playing: false,
            position: 0.0,
            volume: INITIAL_VOLUME,
            progress: LinearSlider::horizontal(0.0),
            wheel: ClickWheel::new(),
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn song_index(&self) -> usize {
        self.song
    }

    pub fn current_song(&self) -> &'static Song {
        &SONGS[self.song]
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn position_secs(&self) -> f32 {
        self.position
    }

    /// Wheel-controlled volume, 0–100.
    pub fn local_volume(&self) -> f32 {
        self.volume
    }

    /// The desktop volume wins when there is one.
    pub fn effective_volume(&self, global: Option<f32>) -> f32 {
        global.unwrap_or(self.volume)
    }

    /// What would reach the speakers right now, 0–100.
    pub fn output_level(&self, global: Option<f32>) -> f32 {
        if self.playing && self.current_song().has_audio {
            self.effective_volume(global)
        } else {
            0.0
        }
    }

    // -- buttons --------------------------------------------------------

    pub fn press_menu(&mut self) {
        self.view = View::Menu;
    }

    pub fn press_center(&mut self) {
        match self.view {
            View::Menu => {
                if self.selected == NOW_PLAYING_ENTRY {
                    self.view = View::NowPlaying;
                }
            }
            View::NowPlaying => self.toggle_play(),
        }
    }

    pub fn toggle_play(&mut self) {
        self.playing = !self.playing;
        log::debug!("ipod {}", if self.playing { "play" } else { "pause" });
    }

    pub fn next(&mut self) {
        self.change_song((self.song + 1) % SONGS.len());
    }

    pub fn prev(&mut self) {
        self.change_song((self.song + SONGS.len() - 1) % SONGS.len());
    }

    fn change_song(&mut self, index: usize) {
        self.song = index;
        self.position = 0.0;
        self.progress.set_value(0.0);
        self.playing = true;
        log::info!("ipod now playing {} - {}", SONGS[index].artist, SONGS[index].title);
    }

    // -- wheel ----------------------------------------------------------

    /// One wheel step: moves the menu selection or the volume.
    pub fn scroll(&mut self, tick: WheelTick) {
        match self.view {
            View::Menu => {
                let n = MENU.len() as i32;
                self.selected = (self.selected as i32 + tick.step()).rem_euclid(n) as usize;
            }
            View::NowPlaying => {
                self.volume = (self.volume + VOLUME_STEP * tick.step() as f32).clamp(0.0, 100.0);
            }
        }
    }

    pub fn wheel_begin(&mut self, center: Pos2, pointer: Pos2) {
        self.wheel.begin(center, pointer);
    }

    pub fn wheel_drag(&mut self, center: Pos2, pointer: Pos2) {
        for tick in self.wheel.drag(center, pointer) {
            self.scroll(tick);
        }
    }

    pub fn wheel_end(&mut self) {
        self.wheel.end();
    }

    pub fn is_turning(&self) -> bool {
        self.wheel.is_turning()
    }

    // -- progress bar ---------------------------------------------------

    /// Percentage shown by the progress bar. Follows the pointer while
    /// dragging, the playback clock otherwise.
    pub fn progress_percent(&self) -> f32 {
        self.progress.value()
    }

    /// Elapsed time to display, seconds.
    pub fn displayed_secs(&self) -> f32 {
        if self.progress.is_dragging() {
            self.percent_to_secs(self.progress.value())
        } else {
            self.position
        }
    }

    pub fn is_seeking(&self) -> bool {
        self.progress.is_dragging()
    }

    pub fn has_pending(&self) -> bool {
        self.progress.has_pending()
    }

    /// Press on the bar seeks at once.
    pub fn progress_press(&mut self, track: Rect, pointer: Pos2) {
        let pct = self.progress.press(track, pointer);
        self.position = self.percent_to_secs(pct);
    }

    /// Dragging only moves the display.
    pub fn progress_drag(&mut self, track: Rect, pointer: Pos2) {
        self.progress.drag(track, pointer);
    }

    /// Release commits the seek.
    pub fn progress_release(&mut self, track: Rect, pointer: Option<Pos2>) {
        if let Some(pct) = self.progress.release(track, pointer) {
            self.position = self.percent_to_secs(pct);
            log::debug!("ipod seek to {:.1}s", self.position);
        }
    }

    /// Apply the drag value deferred from the previous frame.
    pub fn on_frame(&mut self) {
        self.progress.on_frame();
    }

    /// Run the playback clock. Finishing a song moves on to the next one.
    pub fn advance(&mut self, dt: f32) {
        if !self.playing || dt <= 0.0 {
            return;
        }
        self.position += dt;
        let duration = self.current_song().duration_secs as f32;
        if self.position >= duration {
            self.next();
        }
        let pct = self.position / self.current_song().duration_secs.max(1) as f32 * 100.0;
        self.progress.set_value(pct);
    }

    fn percent_to_secs(&self, pct: f32) -> f32 {
        pct / 100.0 * self.current_song().duration_secs as f32
    }
}

/// `m:ss`
pub fn format_time(secs: f32) -> String {
    let total = secs.max(0.0).floor() as u32;
    format!("{}:{:02}", total / 60, total % 60)
}

/// `-m:ss` left in a song.
pub fn format_remaining(position: f32, duration_secs: u32) -> String {
    format!("-{}", format_time(duration_secs as f32 - position))
}

/// Status-bar clock, `h:mm AM`.
pub fn format_status_clock(now: chrono::NaiveTime) -> String {
    now.format("%-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn track() -> Rect {
        Rect::from_min_size(pos2(0.0, 0.0), vec2(200.0, 8.0))
    }

    #[test]
    fn test_initial_state() {
        let p = Player::new();
        assert_eq!(p.view(), View::NowPlaying);
        assert!(!p.is_playing());
        assert_eq!(p.local_volume(), 60.0);
        assert_eq!(p.current_song().title, "LUV SIC");
    }

    #[test]
    fn test_menu_wraps() {
        let mut p = Player::new();
        p.press_menu();
        p.scroll(WheelTick::CounterClockwise);
        assert_eq!(p.selected_index(), MENU.len() - 1);
        p.scroll(WheelTick::Clockwise);
        assert_eq!(p.selected_index(), 0);
    }

    #[test]
    fn test_volume_ticks_clamp() {
        let mut p = Player::new();
        p.scroll(WheelTick::Clockwise);
        assert_eq!(p.local_volume(), 62.0);
        for _ in 0..40 {
            p.scroll(WheelTick::Clockwise);
        }
        assert_eq!(p.local_volume(), 100.0);
        for _ in 0..80 {
            p.scroll(WheelTick::CounterClockwise);
        }
        assert_eq!(p.local_volume(), 0.0);
    }

    #[test]
    fn test_wheel_drag_scrolls_menu() {
        let mut p = Player::new();
        p.press_menu();
        let c = pos2(100.0, 100.0);
        // 0 deg -> 47 deg clockwise: three ticks
        p.wheel_begin(c, pos2(150.0, 100.0));
        let a = 47f32.to_radians();
        p.wheel_drag(c, pos2(100.0 + 50.0 * a.cos(), 100.0 + 50.0 * a.sin()));
        assert_eq!(p.selected_index(), 3);
        p.wheel_end();
        assert!(!p.is_turning());
    }

    #[test]
    fn test_center_in_menu() {
        let mut p = Player::new();
        p.press_menu();
        p.press_center();
        assert_eq!(p.view(), View::Menu);
        for _ in 0..NOW_PLAYING_ENTRY {
            p.scroll(WheelTick::Clockwise);
        }
        p.press_center();
        assert_eq!(p.view(), View::NowPlaying);
        p.press_center();
        assert!(p.is_playing());
    }

    #[test]
    fn test_next_prev_wrap_and_play() {
        let mut p = Player::new();
        p.prev();
        assert_eq!(p.song_index(), SONGS.len() - 1);
        assert!(p.is_playing());
        p.next();
        assert_eq!(p.song_index(), 0);
        assert_eq!(p.position_secs(), 0.0);
    }

    #[test]
    fn test_song_end_advances() {
        let mut p = Player::new();
        p.toggle_play();
        p.advance(273.5);
        assert_eq!(p.song_index(), 0);
        p.advance(1.0);
        assert_eq!(p.song_index(), 1);
        assert_eq!(p.position_secs(), 0.0);
        assert!(p.is_playing());
    }

    #[test]
    fn test_paused_clock_stands_still() {
        let mut p = Player::new();
        p.advance(10.0);
        assert_eq!(p.position_secs(), 0.0);
    }

    #[test]
    fn test_progress_seek_flow() {
        let mut p = Player::new();
        p.toggle_play();
        p.progress_press(track(), pos2(100.0, 4.0));
        assert_eq!(p.position_secs(), 137.0);

        p.progress_drag(track(), pos2(150.0, 4.0));
        p.on_frame();
        assert_eq!(p.progress_percent(), 75.0);
        // clock keeps running but does not move the bar mid-drag
        p.advance(1.0);
        assert_eq!(p.progress_percent(), 75.0);
        assert_eq!(p.displayed_secs(), 205.5);
        assert_eq!(p.position_secs(), 138.0);

        p.progress_release(track(), Some(pos2(50.0, 4.0)));
        assert_eq!(p.position_secs(), 68.5);
        assert!(!p.is_seeking());
    }

    #[test]
    fn test_release_drops_pending_drag() {
        let mut p = Player::new();
        p.progress_press(track(), pos2(10.0, 4.0));
        p.progress_drag(track(), pos2(190.0, 4.0));
        p.progress_release(track(), Some(pos2(20.0, 4.0)));
        p.on_frame();
        assert_eq!(p.progress_percent(), 10.0);
    }

    #[test]
    fn test_effective_volume() {
        let mut p = Player::new();
        assert_eq!(p.effective_volume(None), 60.0);
        assert_eq!(p.effective_volume(Some(25.0)), 25.0);
        assert_eq!(p.output_level(Some(25.0)), 0.0);
        p.toggle_play();
        assert_eq!(p.output_level(Some(25.0)), 25.0);
        p.next();
        assert_eq!(p.output_level(Some(25.0)), 0.0);
    }

    #[test]
    fn test_time_formats() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(65.9), "1:05");
        assert_eq!(format_remaining(200.0, 274), "-1:14");
        assert_eq!(format_remaining(300.0, 274), "-0:00");
        let t = chrono::NaiveTime::from_hms_opt(0, 7, 0).unwrap();
        assert_eq!(format_status_clock(t), "12:07 AM");
        let t = chrono::NaiveTime::from_hms_opt(13, 45, 0).unwrap();
        assert_eq!(format_status_clock(t), "1:45 PM");
    }
}
