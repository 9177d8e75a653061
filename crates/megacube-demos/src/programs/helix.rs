use std::f32::consts::TAU;

use glam::Vec3;
use megacube_core::math::map_range;
use megacube_core::{NoiseGenerator, Quaternion};

use super::RAINBOW;
use crate::{Animation, Frame, HueCycle};

/// Double helix: one strand and its 180 degree twin, tumbling around x.
pub struct Helix {
    phase: f32,
    angle: f32,
    phase_speed: f32,
    angle_speed: f32,
    hue_speed: f32,
    radius: f32,
    resolution: u32,
    thickness: u8,
    hue: HueCycle,
}

impl Default for Helix {
    fn default() -> Self {
        Self {
            phase: 0.0,
            angle: 0.0,
            phase_speed: 2.0,
            angle_speed: 15.0,
            hue_speed: 50.0,
            radius: 7.0,
            resolution: 32,
            thickness: 3,
            hue: HueCycle::default(),
        }
    }
}

impl Animation for Helix {
    fn name(&self) -> &'static str {
        "Helix"
    }

    fn init(&mut self, _noise: &mut NoiseGenerator) {
        self.phase = 0.0;
        self.angle = 0.0;
        self.hue.reset();
    }

    fn update(&mut self, dt: f32, frame: &mut Frame<'_>) {
        self.phase += dt * self.phase_speed;
        self.angle += dt * self.angle_speed;
        self.hue.advance(dt, self.hue_speed);

        let twin = Quaternion::from_angle_axis(180.0, Vec3::Y);
        let tumble = Quaternion::from_angle_axis(self.angle, Vec3::X);
        let both = tumble * twin;
        let palette = frame.palettes.get_or_first(RAINBOW);
        let res = self.resolution as f32;
        let size = 1.0 + self.thickness as f32 / 20.0;

        for yi in 0..=self.resolution {
            let turn = self.phase + map_range(yi as f32, 0.0, res, 0.0, TAU);
            let p0 = Vec3::new(turn.sin(), 2.0 * (yi as f32 / res) - 1.0, turn.cos()) * self.radius;
            let hue = self.hue.hue() + 2 * yi as i32;

            frame
                .volume
                .radiate(tumble.rotate(p0), palette.get_wrapped(hue), size);
            frame
                .volume
                .radiate(both.rotate(p0), palette.get_wrapped(hue + 128), size);
        }
    }
}
