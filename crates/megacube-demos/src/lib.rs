pub mod host;
pub mod playlist;
pub mod programs;

use megacube_core::{NoiseGenerator, PaletteSet};
use megacube_display::VoxelVolume;

pub use host::{CubeHost, FrameSink};
pub use playlist::Playlist;

/// Everything a program may touch while drawing one frame.
pub struct Frame<'a> {
    pub volume: &'a mut VoxelVolume,
    pub noise: &'a mut NoiseGenerator,
    pub palettes: &'a PaletteSet,
}

/// An animation program driven by the host once per frame.
///
/// `update` draws into the volume's write buffer; the host composes and
/// presents the frame afterwards. Programs keep their own phase state and
/// must tolerate any `dt >= 0`, including 0.
pub trait Animation {
    fn name(&self) -> &'static str;

    /// Reset phase state. Called on selection and on explicit reset.
    fn init(&mut self, noise: &mut NoiseGenerator);

    fn update(&mut self, dt: f32, frame: &mut Frame<'_>);
}

/// 16.8 fixed-point hue accumulator shared by the color-cycling programs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HueCycle(u16);

impl HueCycle {
    /// Advance by `speed` hue steps per second.
    pub fn advance(&mut self, dt: f32, speed: f32) {
        self.0 = self.0.wrapping_add((dt * speed * 255.0) as u16);
    }

    /// Current 8-bit base hue.
    pub fn hue(&self) -> i32 {
        (self.0 >> 8) as i32
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }
}
