use megacube_core::constants::MILLIAMPS_PER_CHANNEL;

use crate::frame::RawFrame;

/// Estimated supply current for a frame shown at full brightness.
///
/// Linear model: each channel draws `MILLIAMPS_PER_CHANNEL * value / 255`.
pub fn estimate_milliamps(frame: &RawFrame) -> f32 {
    let total: u64 = frame.voxels().iter().map(|c| c.channel_sum() as u64).sum();
    total as f32 * MILLIAMPS_PER_CHANNEL / 255.0
}

/// Brightness forced into [0, 1]; non-finite values become 0.
fn clamp_brightness(brightness: f32) -> f32 {
    if brightness.is_finite() {
        brightness.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Largest brightness not above `brightness` that keeps the frame within
/// `max_milliamps`. A budget of 0 disables limiting.
pub fn limited_brightness(frame: &RawFrame, brightness: f32, max_milliamps: u32) -> f32 {
    let brightness = clamp_brightness(brightness);
    if max_milliamps == 0 {
        return brightness;
    }

    let draw = estimate_milliamps(frame) * brightness;
    let budget = max_milliamps as f32;
    if draw <= budget {
        brightness
    } else {
        brightness * budget / draw
    }
}

/// Per-host limiter that remembers whether it is currently engaged, so
/// logging happens on transitions instead of every frame.
#[derive(Debug, Clone)]
pub struct PowerLimiter {
    max_milliamps: u32,
    engaged: bool,
}

impl PowerLimiter {
    pub fn new(max_milliamps: u32) -> Self {
        Self {
            max_milliamps,
            engaged: false,
        }
    }

    /// Brightness to present `frame` with. Logs when limiting starts or stops.
    pub fn apply(&mut self, frame: &RawFrame, brightness: f32) -> f32 {
        let brightness = clamp_brightness(brightness);
        let limited = limited_brightness(frame, brightness, self.max_milliamps);
        let engaged = limited < brightness;
        if engaged != self.engaged {
            if engaged {
                log::warn!(
                    "Power limit engaged: {:.0} mA exceeds {} mA budget, brightness {:.3} -> {:.3}",
                    estimate_milliamps(frame) * brightness,
                    self.max_milliamps,
                    brightness,
                    limited
                );
            } else {
                log::info!("Power limit released");
            }
            self.engaged = engaged;
        }
        limited
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    pub fn max_milliamps(&self) -> u32 {
        self.max_milliamps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use megacube_core::constants::VOXEL_COUNT;
    use megacube_core::Color;

    fn filled(color: Color) -> RawFrame {
        let mut frame = RawFrame::new();
        frame.voxels_mut().fill(color);
        frame
    }

    #[test]
    fn test_black_frame_draws_nothing() {
        let frame = RawFrame::new();
        assert_eq!(estimate_milliamps(&frame), 0.0);
        assert_eq!(limited_brightness(&frame, 0.8, 100), 0.8);
    }

    #[test]
    fn test_full_white_estimate() {
        let frame = filled(Color::WHITE);
        let expected = VOXEL_COUNT as f32 * 3.0 * MILLIAMPS_PER_CHANNEL;
        assert!((estimate_milliamps(&frame) - expected).abs() < 1.0);
    }

    #[test]
    fn test_limited_within_budget() {
        let frame = filled(Color::WHITE);
        let budget = 18_000;
        let b = limited_brightness(&frame, 1.0, budget);
        assert!(b < 1.0);
        assert!(estimate_milliamps(&frame) * b <= budget as f32 + 0.5);
    }

    #[test]
    fn test_zero_budget_disables_limit() {
        let frame = filled(Color::WHITE);
        assert_eq!(limited_brightness(&frame, 0.5, 0), 0.5);
    }

    #[test]
    fn test_bad_brightness_clamped() {
        let frame = RawFrame::new();
        assert_eq!(limited_brightness(&frame, 3.0, 100), 1.0);
        assert_eq!(limited_brightness(&frame, f32::NAN, 100), 0.0);
    }

    #[test]
    fn test_limiter_tracks_engagement() {
        let bright = filled(Color::WHITE);
        let dark = RawFrame::new();
        let mut limiter = PowerLimiter::new(18_000);
        assert!(!limiter.is_engaged());

        let first = limiter.apply(&bright, 1.0);
        assert!(first < 1.0);
        assert!(limiter.is_engaged());
        // Staying over budget keeps the same state and result.
        assert_eq!(limiter.apply(&bright, 1.0), first);
        assert!(limiter.is_engaged());

        assert_eq!(limiter.apply(&dark, 1.0), 1.0);
        assert!(!limiter.is_engaged());
    }

    #[test]
    fn test_limiter_disabled_never_engages() {
        let mut limiter = PowerLimiter::new(0);
        assert_eq!(limiter.apply(&filled(Color::WHITE), 0.7), 0.7);
        assert!(!limiter.is_engaged());
        // Out-of-range requests are clamped, not reported as limiting.
        assert_eq!(limiter.apply(&RawFrame::new(), 3.0), 1.0);
        assert!(!limiter.is_engaged());
    }
}
