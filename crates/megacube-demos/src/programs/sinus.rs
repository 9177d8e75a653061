use glam::Vec3;
use megacube_core::math::map_range;
use megacube_core::{NoiseGenerator, Quaternion};

use super::RAINBOW;
use crate::{Animation, Frame, HueCycle};

/// Radial sine ripple on a tilted, spinning plane.
pub struct Sinus {
    phase: f32,
    phase_speed: f32,
    hue_speed: f32,
    extent: f32,
    radius: f32,
    resolution: u32,
    hue: HueCycle,
}

impl Default for Sinus {
    fn default() -> Self {
        Self {
            phase: 0.0,
            phase_speed: 1.0,
            hue_speed: 50.0,
            extent: 2.0,
            radius: 7.5,
            resolution: 32,
            hue: HueCycle::default(),
        }
    }
}

impl Animation for Sinus {
    fn name(&self) -> &'static str {
        "Sinus"
    }

    fn init(&mut self, _noise: &mut NoiseGenerator) {
        self.phase = 0.0;
        self.hue.reset();
    }

    fn update(&mut self, dt: f32, frame: &mut Frame<'_>) {
        self.phase += dt * self.phase_speed;
        self.hue.advance(dt, self.hue_speed);

        let q = Quaternion::from_angle_axis(self.phase * 10.0, Vec3::ONE);
        let palette = frame.palettes.get_or_first(RAINBOW);
        let res = self.resolution as f32;

        for xi in 0..=self.resolution {
            let x = map_range(xi as f32, 0.0, res, -self.extent, self.extent);
            for zi in 0..=self.resolution {
                let z = map_range(zi as f32, 0.0, res, -self.extent, self.extent);
                let y = (self.phase + (x * x + z * z).sqrt()).sin();
                let point = Vec3::new(
                    2.0 * (xi as f32 / res) - 1.0,
                    2.0 * (zi as f32 / res) - 1.0,
                    y,
                );
                let color = palette.get_wrapped(self.hue.hue() + (y * 64.0) as i32);
                frame.volume.radiate(q.rotate(point) * self.radius, color, 1.0);
            }
        }
    }
}
