use glam::Vec3;
use megacube_core::{NoiseGenerator, Quaternion};

use super::RAINBOW;
use crate::{Animation, Frame, HueCycle};

const STAR_COUNT: usize = 200;

/// Stars streaming back and forth along z inside a slowly turning unit cube.
pub struct Starfield {
    stars: Vec<Vec3>,
    phase: f32,
    phase_speed: f32,
    hue_speed: f32,
    /// Scale from unit space to the lattice; reaches the cube corners.
    body_diagonal: f32,
    hue: HueCycle,
}

impl Default for Starfield {
    fn default() -> Self {
        Self {
            stars: Vec::with_capacity(STAR_COUNT),
            phase: 0.0,
            phase_speed: 1.0,
            hue_speed: 50.0,
            body_diagonal: 13.0,
            hue: HueCycle::default(),
        }
    }
}

impl Animation for Starfield {
    fn name(&self) -> &'static str {
        "Starfield"
    }

    fn init(&mut self, noise: &mut NoiseGenerator) {
        self.phase = 0.0;
        self.hue.reset();
        // Star positions persist across re-initialisation.
        if self.stars.is_empty() {
            for _ in 0..STAR_COUNT {
                self.stars.push(Vec3::new(
                    noise.next_random(-1.0, 1.0),
                    noise.next_random(-1.0, 1.0),
                    noise.next_random(-1.0, 1.0),
                ));
            }
        }
    }

    fn update(&mut self, dt: f32, frame: &mut Frame<'_>) {
        self.phase += dt * self.phase_speed;
        self.hue.advance(dt, self.hue_speed);

        let q = Quaternion::from_angle_axis(25.0 * self.phase, Vec3::Y);
        let palette = frame.palettes.get_or_first(RAINBOW);
        let drift = self.phase.sin() * 1.75 * dt;

        for star in &mut self.stars {
            let r = (*star * 3.0 - Vec3::new(0.0, 0.0, -2.0)).length();
            star.z += drift * r;

            if star.z > 1.0 {
                *star = Vec3::new(
                    frame.noise.next_random(-1.0, 1.0),
                    frame.noise.next_random(-1.0, 1.0),
                    -1.0,
                );
            } else if star.z < -1.0 {
                *star = Vec3::new(
                    frame.noise.next_random(-1.0, 1.0),
                    frame.noise.next_random(-1.0, 1.0),
                    1.0,
                );
            }

            let color = palette.get_wrapped(self.hue.hue() + (r * 6.0) as i8 as i32);
            frame.volume.set_world(q.rotate(*star) * self.body_diagonal, color);
        }
    }
}
