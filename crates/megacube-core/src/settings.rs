use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BRIGHTNESS, DEFAULT_LIFE_INTERVAL, DEFAULT_MAX_MILLIAMPS, DEFAULT_MOTION_BLUR,
};

/// Host-level display settings loaded from RON data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubeSettings {
    /// Motion blur weight: 0 = none, 255 = keep the previous frame.
    #[serde(default = "default_motion_blur")]
    pub motion_blur: u8,
    /// Global brightness handed to the renderer (0.0-1.0).
    #[serde(default = "default_brightness")]
    pub brightness: f32,
    /// Power supply budget; brightness is scaled down to stay below it.
    #[serde(default = "default_max_milliamps")]
    pub max_milliamps: u32,
    /// Fixed RNG seed. None = host picks one per run.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Seconds between automaton generations.
    #[serde(default = "default_life_interval")]
    pub life_interval: f32,
}

fn default_motion_blur() -> u8 {
    DEFAULT_MOTION_BLUR
}

fn default_brightness() -> f32 {
    DEFAULT_BRIGHTNESS
}

fn default_max_milliamps() -> u32 {
    DEFAULT_MAX_MILLIAMPS
}

fn default_life_interval() -> f32 {
    DEFAULT_LIFE_INTERVAL
}

impl Default for CubeSettings {
    fn default() -> Self {
        Self {
            motion_blur: DEFAULT_MOTION_BLUR,
            brightness: DEFAULT_BRIGHTNESS,
            max_milliamps: DEFAULT_MAX_MILLIAMPS,
            seed: None,
            life_interval: DEFAULT_LIFE_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = CubeSettings::default();
        assert_eq!(s.motion_blur, 64);
        assert_eq!(s.brightness, 1.0);
        assert_eq!(s.max_milliamps, 18_000);
        assert!(s.seed.is_none());
    }
}
