//! Gesture state machines
//!
//! Each draggable thing on the desktop owns one of these:
//!
//! - [`DragState`]: a window being moved by its title bar.
//! - [`LinearSlider`]: the volume bar and the track-progress bar.
//! - [`ClickWheel`]: the circular scroll wheel of the music player.
//!
//! All of them follow the same rule: a press resets the gesture
//! unconditionally. If a release was lost (pointer left the window, focus
//! changed mid-drag) the widget stays in its dragging state until the next
//! press, and that press starts clean instead of trusting stale offsets.

use crate::geometry::{angle_from_center, shortest_delta, track_percentage, Orientation};
use egui::{Pos2, Rect, Vec2};

// ---------------------------------------------------------------------------
// Window drag
// ---------------------------------------------------------------------------

/// Drag state of a single window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// `offset` is the pointer position minus the window's top-left at press time.
    Dragging { offset: Vec2 },
}

impl DragState {
    /// Start dragging a window whose top-left is `origin`.
    pub fn begin(&mut self, pointer: Pos2, origin: Pos2) {
        *self = DragState::Dragging { offset: pointer - origin };
    }

    /// New top-left for a pointer sample, or `None` when idle.
    ///
    /// Positions are not clamped; windows may be dragged off-screen.
    pub fn position_for(&self, pointer: Pos2) -> Option<Pos2> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { offset } => Some(pointer - *offset),
        }
    }

    pub fn end(&mut self) {
        *self = DragState::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }
}

// ---------------------------------------------------------------------------
// Per-frame coalescing
// ---------------------------------------------------------------------------

/// Holds at most one deferred update until the next frame.
///
/// Fast pointer movement produces many samples per frame; only the latest one
/// matters. `defer` replaces whatever was pending, `take` hands the pending
/// value to the frame that applies it, and `cancel` drops it so a final,
/// authoritative update can never be overwritten by a stale one.
#[derive(Debug, Clone, Default)]
pub struct FrameCoalescer<T> {
    pending: Option<T>,
}

impl<T> FrameCoalescer<T> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Schedule `value` for the next frame, superseding any pending value.
    pub fn defer(&mut self, value: T) {
        self.pending = Some(value);
    }

    /// Take the pending value (call once at the start of a frame).
    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Drop the pending value without applying it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

// ---------------------------------------------------------------------------
// Linear sliders
// ---------------------------------------------------------------------------

/// Press/drag/release bookkeeping for a 1-D track.
///
/// The value is a percentage in `[0, 100]`. The caller supplies the track rect
/// measured this frame with every event.
#[derive(Debug, Clone)]
pub struct LinearSlider {
    orientation: Orientation,
    value: f32,
    dragging: bool,
    last_pointer: Option<Pos2>,
    batch: FrameCoalescer<f32>,
}

impl LinearSlider {
    pub fn new(orientation: Orientation, value: f32) -> Self {
        Self {
            orientation,
            value: crate::geometry::clamp_percent(value),
            dragging: false,
            last_pointer: None,
            batch: FrameCoalescer::new(),
        }
    }

    pub fn vertical(value: f32) -> Self {
        Self::new(Orientation::Vertical, value)
    }

    pub fn horizontal(value: f32) -> Self {
        Self::new(Orientation::Horizontal, value)
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Overwrite the value from outside (e.g. playback advancing the progress
    /// bar). Ignored while the user is dragging.
    pub fn set_value(&mut self, value: f32) {
        if !self.dragging {
            self.value = crate::geometry::clamp_percent(value);
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn has_pending(&self) -> bool {
        self.batch.is_pending()
    }

    /// Pointer went down on the track: reset and jump to the pointer at once.
    pub fn press(&mut self, track: Rect, pointer: Pos2) -> f32 {
        self.batch.cancel();
        self.dragging = true;
        self.last_pointer = Some(pointer);
        self.value = track_percentage(self.orientation, track, pointer);
        log::debug!("slider press -> {:.1}", self.value);
        self.value
    }

    /// Pointer moved while pressed. The value lands on the next [`on_frame`].
    ///
    /// [`on_frame`]: LinearSlider::on_frame
    pub fn drag(&mut self, track: Rect, pointer: Pos2) {
        if !self.dragging {
            return;
        }
        self.last_pointer = Some(pointer);
        self.batch.defer(track_percentage(self.orientation, track, pointer));
    }

    /// Apply the coalesced drag value, if any. Call once per frame.
    pub fn on_frame(&mut self) -> Option<f32> {
        let v = self.batch.take()?;
        self.value = v;
        Some(v)
    }

    /// Pointer released. Cancels any pending frame update and applies the
    /// final value immediately. Returns `None` if no press was seen.
    ///
    /// `pointer` may be absent (touch end carries no position); the last
    /// sampled pointer is used then.
    pub fn release(&mut self, track: Rect, pointer: Option<Pos2>) -> Option<f32> {
        if !self.dragging {
            return None;
        }
        self.batch.cancel();
        self.dragging = false;
        if let Some(p) = pointer.or(self.last_pointer) {
            self.value = track_percentage(self.orientation, track, p);
        }
        self.last_pointer = None;
        log::debug!("slider release -> {:.1}", self.value);
        Some(self.value)
    }

    /// Press and release in place.
    pub fn click(&mut self, track: Rect, pointer: Pos2) -> f32 {
        self.press(track, pointer);
        self.release(track, Some(pointer)).unwrap_or(self.value)
    }
}

// ---------------------------------------------------------------------------
// Click wheel
// ---------------------------------------------------------------------------

/// Rotation needed for one scroll tick.
pub const WHEEL_TICK_DEGREES: f32 = 15.0;

/// One discrete step of the click wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelTick {
    /// Next item / volume up.
    Clockwise,
    /// Previous item / volume down.
    CounterClockwise,
}

impl WheelTick {
    /// +1 for clockwise, -1 for counter-clockwise.
    pub fn step(self) -> i32 {
        match self {
            WheelTick::Clockwise => 1,
            WheelTick::CounterClockwise => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum WheelState {
    Idle,
    Turning { reference: f32, accumulated: f32 },
}

/// Turns circular drags into discrete ticks.
///
/// Every sample measures the shortest rotation since the previous sample and
/// adds it to an accumulator. Whenever the accumulator exceeds
/// [`WHEEL_TICK_DEGREES`] a tick is emitted; the remainder carries over.
#[derive(Debug, Clone)]
pub struct ClickWheel {
    state: WheelState,
    threshold: f32,
}

impl Default for ClickWheel {
    fn default() -> Self {
        Self::new()
    }
}

impl ClickWheel {
    pub fn new() -> Self {
        Self::with_threshold(WHEEL_TICK_DEGREES)
    }

    pub fn with_threshold(threshold: f32) -> Self {
        Self { state: WheelState::Idle, threshold: threshold.max(f32::EPSILON) }
    }

    pub fn is_turning(&self) -> bool {
        matches!(self.state, WheelState::Turning { .. })
    }

    /// Rotation carried toward the next tick, signed.
    pub fn remainder(&self) -> f32 {
        match self.state {
            WheelState::Idle => 0.0,
            WheelState::Turning { accumulated, .. } => accumulated,
        }
    }

    pub fn begin(&mut self, center: Pos2, pointer: Pos2) {
        self.state = WheelState::Turning {
            reference: angle_from_center(center, pointer),
            accumulated: 0.0,
        };
    }

    /// Feed a pointer sample; returns the ticks it produced.
    pub fn drag(&mut self, center: Pos2, pointer: Pos2) -> Vec<WheelTick> {
        self.rotate_to(angle_from_center(center, pointer))
    }

    /// Feed an already computed angle in degrees.
    pub fn rotate_to(&mut self, angle: f32) -> Vec<WheelTick> {
        let WheelState::Turning { reference, accumulated } = self.state else {
            return Vec::new();
        };
        let mut acc = accumulated + shortest_delta(reference, angle);
        let mut ticks = Vec::new();
        while acc.abs() > self.threshold {
            if acc > 0.0 {
                ticks.push(WheelTick::Clockwise);
                acc -= self.threshold;
            } else {
                ticks.push(WheelTick::CounterClockwise);
                acc += self.threshold;
            }
        }
        self.state = WheelState::Turning { reference: angle, accumulated: acc };
        ticks
    }

    pub fn end(&mut self) {
        self.state = WheelState::Idle;
    }
}
