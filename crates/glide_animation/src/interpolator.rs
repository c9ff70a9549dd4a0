//! Time-based interpolators
//!
//! [`Interpolator`] tracks elapsed time against a duration and an optional
//! leading delay. The typed interpolators wrap it and derive their duration
//! from their endpoints so that camera moves feel uniform regardless of size.

use crate::config::TimingConfig;
use glide_core::{interpolate_f64, interpolate_point, Point, Screen};
use std::f64::consts::FRAC_PI_4;

const EPS: f64 = 1e-5;

/// Duration needed to cover `diff` at `speed`, zero for a negligible difference
fn speed_duration(diff: f64, speed: f64) -> f64 {
    if diff.abs() < EPS {
        return 0.0;
    }
    diff.abs() / speed
}

/// Progress tracker for a single timed transition
#[derive(Clone, Debug, PartialEq)]
pub struct Interpolator {
    elapsed_time: f64,
    duration: f64,
    delay: f64,
}

impl Interpolator {
    pub fn new(duration: f64, delay: f64) -> Self {
        debug_assert!(duration >= 0.0, "interpolator duration must not be negative");
        debug_assert!(delay >= 0.0, "interpolator delay must not be negative");
        Self {
            elapsed_time: 0.0,
            duration: duration.max(0.0),
            delay: delay.max(0.0),
        }
    }

    /// Whether the delay and the whole duration have elapsed.
    ///
    /// A zero-duration interpolator finishes as soon as its delay is over.
    pub fn is_finished(&self) -> bool {
        if self.duration == 0.0 {
            return self.elapsed_time >= self.delay;
        }
        self.elapsed_time > self.duration + self.delay
    }

    pub fn advance(&mut self, elapsed_seconds: f64) {
        debug_assert!(elapsed_seconds >= 0.0);
        self.elapsed_time += elapsed_seconds;
    }

    /// Shrink the duration to at most `max_duration`
    pub fn set_max_duration(&mut self, max_duration: f64) {
        self.duration = self.duration.min(max_duration.max(0.0));
    }

    /// Normalized progress in [0, 1]
    pub fn t(&self) -> f64 {
        if self.is_finished() {
            return 1.0;
        }
        if self.duration == 0.0 {
            return 0.0;
        }
        (self.elapsed_time - self.delay).max(0.0) / self.duration
    }

    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn delay(&self) -> f64 {
        self.delay
    }
}

/// Forwards the timing API of the wrapped [`Interpolator`]
macro_rules! timing_api {
    ($ty:ty) => {
        impl $ty {
            pub fn is_finished(&self) -> bool {
                self.timing.is_finished()
            }

            pub fn set_max_duration(&mut self, max_duration: f64) {
                self.timing.set_max_duration(max_duration);
            }

            pub fn t(&self) -> f64 {
                self.timing.t()
            }

            pub fn elapsed_time(&self) -> f64 {
                self.timing.elapsed_time()
            }

            pub fn duration(&self) -> f64 {
                self.timing.duration()
            }

            pub fn delay(&self) -> f64 {
                self.timing.delay()
            }
        }
    };
}

// ============================================================================
// Position
// ============================================================================

/// Moves the viewport center between two global points
#[derive(Clone, Debug, PartialEq)]
pub struct PositionInterpolator {
    timing: Interpolator,
    start: Point,
    end: Point,
    position: Point,
}

impl PositionInterpolator {
    pub fn new(start: Point, end: Point, screen: &Screen) -> Self {
        Self::with_timing(0.0, start, end, screen, &TimingConfig::DEFAULT)
    }

    pub fn with_delay(delay: f64, start: Point, end: Point, screen: &Screen) -> Self {
        Self::with_timing(delay, start, end, screen, &TimingConfig::DEFAULT)
    }

    pub fn with_timing(
        delay: f64,
        start: Point,
        end: Point,
        screen: &Screen,
        timing: &TimingConfig,
    ) -> Self {
        let duration = Self::move_duration_with(start, end, screen, timing);
        Self {
            timing: Interpolator::new(duration, delay),
            start,
            end,
            position: start,
        }
    }

    /// Natural duration of a move with the default timing
    pub fn move_duration(start: Point, end: Point, screen: &Screen) -> f64 {
        Self::move_duration_with(start, end, screen, &TimingConfig::DEFAULT)
    }

    /// Short moves take a fixed time, long moves travel at a speed relative
    /// to the viewport size.
    pub fn move_duration_with(
        start: Point,
        end: Point,
        screen: &Screen,
        timing: &TimingConfig,
    ) -> f64 {
        let pixel_length = screen.gtop(end).length(screen.gtop(start));
        if pixel_length < EPS {
            return 0.0;
        }

        let min_size = screen.pixel_rect().size().min_side();
        if pixel_length < timing.min_speed_scalar * min_size {
            return timing.min_move_duration;
        }

        let pixel_speed = timing.max_speed_scalar * min_size;
        speed_duration(pixel_length, pixel_speed)
    }

    pub fn advance(&mut self, elapsed_seconds: f64) {
        self.timing.advance(elapsed_seconds);
        self.position = interpolate_point(self.start, self.end, self.timing.t());
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }
}

timing_api!(PositionInterpolator);

// ============================================================================
// Angle
// ============================================================================

/// Rotates the map plane between two angles (radians)
#[derive(Clone, Debug, PartialEq)]
pub struct AngleInterpolator {
    timing: Interpolator,
    start: f64,
    end: f64,
    angle: f64,
}

impl AngleInterpolator {
    pub fn new(start: f64, end: f64) -> Self {
        Self::with_timing(0.0, start, end, &TimingConfig::DEFAULT)
    }

    pub fn with_delay(delay: f64, start: f64, end: f64) -> Self {
        Self::with_timing(delay, start, end, &TimingConfig::DEFAULT)
    }

    pub fn with_timing(delay: f64, start: f64, end: f64, timing: &TimingConfig) -> Self {
        Self {
            timing: Interpolator::new(Self::rotate_duration_with(start, end, timing), delay),
            start,
            end,
            angle: start,
        }
    }

    /// A quarter turn takes half a second, scaled linearly
    pub fn rotate_duration(start: f64, end: f64) -> f64 {
        Self::rotate_duration_with(start, end, &TimingConfig::DEFAULT)
    }

    pub fn rotate_duration_with(start: f64, end: f64, timing: &TimingConfig) -> f64 {
        timing.quarter_turn_duration * (end - start).abs() / FRAC_PI_4
    }

    pub fn advance(&mut self, elapsed_seconds: f64) {
        self.timing.advance(elapsed_seconds);
        self.angle = interpolate_f64(self.start, self.end, self.timing.t());
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }
}

timing_api!(AngleInterpolator);

// ============================================================================
// Scale
// ============================================================================

/// Zooms between two scale factors
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleInterpolator {
    timing: Interpolator,
    start: f64,
    end: f64,
    scale: f64,
}

impl ScaleInterpolator {
    pub fn new(start: f64, end: f64) -> Self {
        Self::with_timing(0.0, start, end, &TimingConfig::DEFAULT)
    }

    pub fn with_delay(delay: f64, start: f64, end: f64) -> Self {
        Self::with_timing(delay, start, end, &TimingConfig::DEFAULT)
    }

    pub fn with_timing(delay: f64, start: f64, end: f64, timing: &TimingConfig) -> Self {
        Self {
            timing: Interpolator::new(Self::scale_duration_with(start, end, timing), delay),
            start,
            end,
            scale: start,
        }
    }

    /// Duration of a zoom, depending only on the ratio between the two scales
    pub fn scale_duration(start: f64, end: f64) -> f64 {
        Self::scale_duration_with(start, end, &TimingConfig::DEFAULT)
    }

    pub fn scale_duration_with(start: f64, end: f64, timing: &TimingConfig) -> f64 {
        debug_assert!(start > 0.0 && end > 0.0, "scale factors must be positive");
        let (low, high) = if start > end {
            (end, start)
        } else {
            (start, end)
        };
        let ratio = high / low;
        if (ratio - 1.0).abs() < EPS {
            return 0.0;
        }
        speed_duration(ratio, timing.zoom_speed)
    }

    pub fn advance(&mut self, elapsed_seconds: f64) {
        self.timing.advance(elapsed_seconds);
        self.scale = interpolate_f64(self.start, self.end, self.timing.t());
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }
}

timing_api!(ScaleInterpolator);

#[cfg(test)]
mod tests {
    use super::*;
    use glide_core::Rect;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn screen() -> Screen {
        // 1 global unit per pixel, 800x600 viewport
        Screen::new(Rect::new(0.0, 0.0, 800.0, 600.0), Point::ZERO, 0.0, 1.0)
    }

    #[test]
    fn test_t_stays_in_range_and_grows() {
        let mut interp = Interpolator::new(1.0, 0.25);
        let mut last = interp.t();
        assert_eq!(last, 0.0);
        for _ in 0..40 {
            interp.advance(0.05);
            let t = interp.t();
            assert!((0.0..=1.0).contains(&t));
            assert!(t >= last);
            last = t;
        }
        assert!(interp.is_finished());
        assert_eq!(interp.t(), 1.0);
    }

    #[test]
    fn test_delay_holds_progress() {
        let mut interp = Interpolator::new(1.0, 0.5);
        interp.advance(0.4);
        assert_eq!(interp.t(), 0.0);
        interp.advance(0.6);
        assert!((interp.t() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_finished_only_after_full_duration() {
        let mut interp = Interpolator::new(1.0, 0.0);
        interp.advance(1.0);
        assert!(!interp.is_finished());
        assert_eq!(interp.t(), 1.0);
        interp.advance(0.001);
        assert!(interp.is_finished());
    }

    #[test]
    fn test_zero_duration_finishes_after_delay() {
        let interp = Interpolator::new(0.0, 0.0);
        assert!(interp.is_finished());
        assert_eq!(interp.t(), 1.0);

        let mut delayed = Interpolator::new(0.0, 0.3);
        assert!(!delayed.is_finished());
        assert_eq!(delayed.t(), 0.0);
        delayed.advance(0.3);
        assert!(delayed.is_finished());
        assert_eq!(delayed.t(), 1.0);
    }

    #[test]
    fn test_set_max_duration_only_shrinks() {
        let mut interp = Interpolator::new(2.0, 0.0);
        interp.set_max_duration(5.0);
        assert_eq!(interp.duration(), 2.0);
        interp.set_max_duration(0.5);
        assert_eq!(interp.duration(), 0.5);
        interp.set_max_duration(1.0);
        assert_eq!(interp.duration(), 0.5);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn test_negative_duration_asserts() {
        let _ = Interpolator::new(-1.0, 0.0);
    }

    #[test]
    fn test_position_same_point_is_instant() {
        let p = Point::new(12.0, -4.0);
        let interp = PositionInterpolator::new(p, p, &screen());
        assert_eq!(interp.duration(), 0.0);
        assert!(interp.is_finished());
        assert_eq!(interp.position(), p);
    }

    #[test]
    fn test_delayed_same_endpoints_hold_value() {
        let p = Point::new(3.0, 7.0);
        let mut position = PositionInterpolator::with_delay(0.5, p, p, &screen());
        let mut angle = AngleInterpolator::with_delay(0.5, 1.0, 1.0);
        let mut scale = ScaleInterpolator::with_delay(0.5, 2.0, 2.0);

        position.advance(0.1);
        angle.advance(0.1);
        scale.advance(0.1);
        assert!(!position.is_finished());
        assert_eq!(position.t(), 0.0);
        assert_eq!(position.position(), p);
        assert_eq!(angle.angle(), 1.0);
        assert_eq!(scale.scale(), 2.0);

        position.advance(0.5);
        assert!(position.is_finished());
        assert_eq!(position.position(), p);
    }

    #[test]
    fn test_position_short_move_uses_min_duration() {
        // 100px < 0.2 * 600px
        let d = PositionInterpolator::move_duration(Point::ZERO, Point::new(100.0, 0.0), &screen());
        assert_eq!(d, 0.2);
    }

    #[test]
    fn test_position_long_move_uses_speed() {
        // 2100px at 7 * 600 px/s
        let d =
            PositionInterpolator::move_duration(Point::ZERO, Point::new(2100.0, 0.0), &screen());
        assert!((d - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_position_measures_in_pixels() {
        let zoomed_out = Screen::new(Rect::new(0.0, 0.0, 800.0, 600.0), Point::ZERO, 0.0, 10.0);
        // 1000 global units are only 100px at this scale
        let d = PositionInterpolator::move_duration(
            Point::ZERO,
            Point::new(1000.0, 0.0),
            &zoomed_out,
        );
        assert_eq!(d, 0.2);
    }

    #[test]
    fn test_position_advance_interpolates() {
        let end = Point::new(2100.0, 0.0);
        let mut interp = PositionInterpolator::new(Point::ZERO, end, &screen());
        interp.advance(0.25);
        assert!(interp.position().almost_eq(Point::new(1050.0, 0.0), 1e-9));
        interp.advance(1.0);
        assert_eq!(interp.position(), end);
    }

    #[test]
    fn test_position_custom_timing() {
        let timing = TimingConfig {
            min_move_duration: 0.1,
            ..TimingConfig::DEFAULT
        };
        let interp = PositionInterpolator::with_timing(
            0.0,
            Point::ZERO,
            Point::new(10.0, 0.0),
            &screen(),
            &timing,
        );
        assert_eq!(interp.duration(), 0.1);
    }

    #[test]
    fn test_angle_duration() {
        assert!((AngleInterpolator::rotate_duration(0.0, FRAC_PI_2) - 1.0).abs() < 1e-12);
        assert!((AngleInterpolator::rotate_duration(PI, 0.0) - 2.0).abs() < 1e-12);
        assert_eq!(AngleInterpolator::rotate_duration(1.0, 1.0), 0.0);
    }

    #[test]
    fn test_angle_with_delay() {
        let mut interp = AngleInterpolator::with_delay(0.5, 0.0, FRAC_PI_2);
        interp.advance(0.5);
        assert_eq!(interp.angle(), 0.0);
        interp.advance(0.5);
        assert!((interp.angle() - FRAC_PI_2 / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_scale_duration_same_scale_is_zero() {
        for s in [0.01, 1.0, 3.7, 1000.0] {
            assert_eq!(ScaleInterpolator::scale_duration(s, s), 0.0);
        }
    }

    #[test]
    fn test_scale_duration_is_symmetric() {
        let pairs = [(1.0, 2.0), (0.5, 8.0), (3.0, 0.1)];
        for (a, b) in pairs {
            assert_eq!(
                ScaleInterpolator::scale_duration(a, b),
                ScaleInterpolator::scale_duration(b, a)
            );
        }
    }

    #[test]
    fn test_scale_doubling_takes_300ms() {
        assert!((ScaleInterpolator::scale_duration(1.0, 2.0) - 0.3).abs() < 1e-12);
        assert!((ScaleInterpolator::scale_duration(4.0, 2.0) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_scale_advance() {
        let mut interp = ScaleInterpolator::new(1.0, 2.0);
        interp.advance(0.15);
        assert!((interp.scale() - 1.5).abs() < 1e-9);
        interp.advance(0.2);
        assert!(interp.is_finished());
        assert_eq!(interp.scale(), 2.0);
    }
}
