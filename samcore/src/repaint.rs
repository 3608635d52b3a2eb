//! Repaint scheduling for the desktop
//!
//! egui only runs a frame when something asks for one. The desktop needs
//! frames for three different reasons:
//!
//! 1. **Input**: pointer moved, button pressed, key typed. egui wakes up by
//!    itself for these.
//! 2. **Pending**: a slider deferred a value to the next frame (see
//!    [`FrameCoalescer`](crate::gesture::FrameCoalescer)). Without a follow-up
//!    frame the value would sit there until the mouse moves again.
//! 3. **Continuous**: music is playing or a chat reply is in flight; the
//!    screen has to advance on its own at a steady rate.
//!
//! Otherwise the menu-bar clock only needs a tick every second.

use std::time::Duration;

/// Idle tick: enough for the menu-bar clock.
const CLOCK_INTERVAL: Duration = Duration::from_millis(1000);

/// Rate while something animates on its own.
const CONTINUOUS_INTERVAL: Duration = Duration::from_millis(33);

/// Decides when to ask egui for the next frame.
///
/// Call [`begin_frame`](Self::begin_frame) at the top of `update()` and
/// [`end_frame`](Self::end_frame) at the bottom.
#[derive(Debug, Default)]
pub struct RepaintController {
    continuous: bool,
    pending: bool,
}

impl RepaintController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep frames coming at the continuous rate until switched off.
    pub fn set_continuous(&mut self, continuous: bool) {
        self.continuous = continuous;
    }

    /// Something was deferred to the next frame; make sure there is one.
    pub fn mark_pending(&mut self) {
        self.pending = true;
    }

    /// The frame a pending value was waiting for has started.
    pub fn begin_frame(&mut self) {
        self.pending = false;
    }

    /// Delay until the next frame should run, given the state at the end of
    /// this frame.
    pub fn next_delay(&self) -> Duration {
        if self.pending {
            Duration::ZERO
        } else if self.continuous {
            CONTINUOUS_INTERVAL
        } else {
            CLOCK_INTERVAL
        }
    }

    pub fn end_frame(&self, ctx: &egui::Context) {
        let delay = self.next_delay();
        if delay.is_zero() {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_wins_over_continuous() {
        let mut rc = RepaintController::new();
        rc.set_continuous(true);
        assert_eq!(rc.next_delay(), CONTINUOUS_INTERVAL);
        rc.mark_pending();
        assert_eq!(rc.next_delay(), Duration::ZERO);
    }

    #[test]
    fn test_idle_ticks_for_clock() {
        let rc = RepaintController::new();
        assert_eq!(rc.next_delay(), CLOCK_INTERVAL);
    }

    #[test]
    fn test_pending_cleared_when_frame_starts() {
        let mut rc = RepaintController::new();
        rc.mark_pending();
        assert_eq!(rc.next_delay(), Duration::ZERO);
        rc.begin_frame();
        assert_eq!(rc.next_delay(), CLOCK_INTERVAL);
    }
}
