//! Pointer geometry for sliders and the click wheel
//!
//! Everything here is a pure function of a pointer position and the measured
//! rect of the widget it is interacting with. Callers re-measure the rect every
//! frame, so nothing is cached.

use egui::{Pos2, Rect};

/// Angle of `pointer` around `center`, in degrees within `[0, 360)`.
///
/// Screen coordinates grow downward, so increasing angles run clockwise:
/// 0° is 3 o'clock, 90° is 6 o'clock.
pub fn angle_from_center(center: Pos2, pointer: Pos2) -> f32 {
    let d = pointer - center;
    normalize_degrees(d.y.atan2(d.x).to_degrees())
}

/// Fold any angle into `[0, 360)`.
pub fn normalize_degrees(deg: f32) -> f32 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if r >= 360.0 { 0.0 } else { r }
}

/// Signed shortest rotation from `from` to `to`, in degrees within `[-180, 180]`.
///
/// Positive is clockwise. Crossing the 0°/360° seam does not register as a
/// large jump: 350° → 10° is +20°, not -340°.
pub fn shortest_delta(from: f32, to: f32) -> f32 {
    let mut delta = to - from;
    if delta > 180.0 {
        delta -= 360.0;
    }
    if delta < -180.0 {
        delta += 360.0;
    }
    delta
}

/// Which way a linear track measures its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// 0 % at the bottom edge, 100 % at the top (volume bar).
    Vertical,
    /// 0 % at the left edge, 100 % at the right (progress bar).
    Horizontal,
}

/// Percentage in `[0, 100]` of `pointer` along `track`.
///
/// A track with no extent yields 0.
pub fn track_percentage(orientation: Orientation, track: Rect, pointer: Pos2) -> f32 {
    match orientation {
        Orientation::Vertical => {
            if track.height() <= 0.0 {
                return 0.0;
            }
            let from_top = pointer.y - track.top();
            clamp_percent(100.0 - from_top / track.height() * 100.0)
        }
        Orientation::Horizontal => {
            if track.width() <= 0.0 {
                return 0.0;
            }
            let from_left = pointer.x - track.left();
            clamp_percent(from_left / track.width() * 100.0)
        }
    }
}

/// Clamp to `[0, 100]`, mapping NaN to 0.
pub fn clamp_percent(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Point on a circle of `radius` around `center` at `angle_deg` (clockwise from 3 o'clock).
pub fn point_on_circle(center: Pos2, radius: f32, angle_deg: f32) -> Pos2 {
    let rad = angle_deg.to_radians();
    Pos2::new(center.x + radius * rad.cos(), center.y + radius * rad.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_angle_quadrants() {
        let c = pos2(100.0, 100.0);
        assert!(approx(angle_from_center(c, pos2(150.0, 100.0)), 0.0));
        assert!(approx(angle_from_center(c, pos2(100.0, 150.0)), 90.0));
        assert!(approx(angle_from_center(c, pos2(50.0, 100.0)), 180.0));
        // Above the center: atan2 is negative, folded into the positive range
        assert!(approx(angle_from_center(c, pos2(100.0, 50.0)), 270.0));
    }

    #[test]
    fn test_delta_wraps_across_zero() {
        assert!(approx(shortest_delta(350.0, 10.0), 20.0));
        assert!(approx(shortest_delta(10.0, 350.0), -20.0));
        assert!(approx(shortest_delta(90.0, 120.0), 30.0));
        assert!(approx(shortest_delta(120.0, 90.0), -30.0));
    }

    #[test]
    fn test_vertical_measures_from_bottom() {
        let track = Rect::from_min_size(pos2(10.0, 20.0), vec2(4.0, 80.0));
        assert!(approx(track_percentage(Orientation::Vertical, track, pos2(12.0, 100.0)), 0.0));
        assert!(approx(track_percentage(Orientation::Vertical, track, pos2(12.0, 20.0)), 100.0));
        assert!(approx(track_percentage(Orientation::Vertical, track, pos2(12.0, 60.0)), 50.0));
    }

    #[test]
    fn test_horizontal_measures_from_left() {
        let track = Rect::from_min_size(pos2(0.0, 0.0), vec2(200.0, 6.0));
        assert!(approx(track_percentage(Orientation::Horizontal, track, pos2(50.0, 3.0)), 25.0));
    }

    #[test]
    fn test_outside_track_clamps_exactly() {
        let track = Rect::from_min_size(pos2(100.0, 100.0), vec2(200.0, 80.0));
        assert_eq!(track_percentage(Orientation::Horizontal, track, pos2(-500.0, 0.0)), 0.0);
        assert_eq!(track_percentage(Orientation::Horizontal, track, pos2(9000.0, 0.0)), 100.0);
        assert_eq!(track_percentage(Orientation::Vertical, track, pos2(0.0, 9000.0)), 0.0);
        assert_eq!(track_percentage(Orientation::Vertical, track, pos2(0.0, -9000.0)), 100.0);
    }

    #[test]
    fn test_degenerate_track() {
        let flat = Rect::from_min_size(pos2(0.0, 0.0), vec2(0.0, 0.0));
        assert_eq!(track_percentage(Orientation::Horizontal, flat, pos2(5.0, 5.0)), 0.0);
        assert_eq!(track_percentage(Orientation::Vertical, flat, pos2(5.0, 5.0)), 0.0);
    }

    #[test]
    fn test_point_on_circle() {
        let p = point_on_circle(pos2(96.0, 96.0), 64.0, 270.0);
        assert!(approx(p.x, 96.0));
        assert!(approx(p.y, 32.0));
    }
}
