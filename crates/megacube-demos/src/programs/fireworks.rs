use glam::Vec3;
use megacube_core::{Color, NoiseGenerator, Particle};

use super::RAINBOW;
use crate::{Animation, Frame};

const MAX_DEBRIS: u32 = 200;

/// A rocket launched from the floor that bursts into falling, fading debris.
///
/// Positions live in unit space (-1..1) and are scaled by `radius` when drawn.
pub struct Fireworks {
    radius: f32,
    gravity: Vec3,
    target: Vec3,
    missile: Particle,
    debris: Vec<Particle>,
    exploded: bool,
}

impl Default for Fireworks {
    fn default() -> Self {
        Self {
            radius: 7.5,
            gravity: Vec3::new(0.0, -1.0, 0.0),
            target: Vec3::ZERO,
            missile: Particle::default(),
            debris: Vec::with_capacity(MAX_DEBRIS as usize),
            exploded: false,
        }
    }
}

impl Fireworks {
    fn launch(&mut self, noise: &mut NoiseGenerator) {
        let source = Vec3::new(
            noise.next_gaussian(0.0, 0.25),
            -1.0,
            noise.next_gaussian(0.0, 0.25),
        );
        self.target = Vec3::new(
            noise.next_gaussian(0.0, 0.25),
            noise.next_gaussian(0.8, 0.10),
            noise.next_gaussian(0.0, 0.25),
        );
        // Flight time; clamped away from zero so the launch velocity stays finite.
        let t = noise.next_gaussian(0.60, 0.20).max(0.05);
        self.missile = Particle::new(source, (self.target - source) / t, 0, 1.0, 0.0);
        self.debris.clear();
        self.exploded = false;
    }

    fn explode(&mut self, at: Vec3, noise: &mut NoiseGenerator) {
        self.exploded = true;
        let count = MAX_DEBRIS / 2 + noise.next_below(MAX_DEBRIS / 2);
        let power = noise.next_random(0.5, 1.0);
        let hue = noise.next_u8();

        self.debris.clear();
        for _ in 0..count {
            let velocity = Vec3::new(
                noise.next_random(-power, power),
                noise.next_random(-power, power),
                noise.next_random(-power, power),
            );
            let tint = hue.wrapping_add(noise.next_below(64) as u8);
            let seconds = noise.next_random(1.0, 2.0);
            self.debris.push(Particle::new(at, velocity, tint, 1.0, seconds));
        }
    }
}

impl Animation for Fireworks {
    fn name(&self) -> &'static str {
        "Fireworks"
    }

    fn init(&mut self, noise: &mut NoiseGenerator) {
        self.launch(noise);
    }

    fn update(&mut self, dt: f32, frame: &mut Frame<'_>) {
        if !self.exploded {
            let before = self.missile.position;
            self.missile.advance(dt, self.gravity);

            // Burst at the apex or once the target height is passed.
            if before.y > self.missile.position.y || self.missile.position.y > self.target.y {
                self.explode(before, frame.noise);
            } else {
                frame
                    .volume
                    .set_world(self.missile.position * self.radius, Color::WHITE);
            }
        }

        if self.exploded {
            let palette = frame.palettes.get_or_first(RAINBOW);
            let mut visible = 0;
            for debris in &mut self.debris {
                if debris.position.y > -1.0 {
                    debris.advance(dt, self.gravity);
                } else {
                    debris.position.y = -1.0;
                }

                if debris.brightness > 0.0 {
                    visible += 1;
                    debris.brightness -= dt / debris.seconds;
                } else {
                    debris.brightness = 0.0;
                }

                let mut color = if frame.noise.next_below(20) == 0 {
                    Color::WHITE
                } else {
                    palette.get(debris.hue)
                };
                color.scale((debris.brightness.clamp(0.0, 1.0) * 255.0) as u8);
                frame.volume.add_world(debris.position * self.radius, color);
            }

            if visible == 0 {
                self.launch(frame.noise);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use megacube_core::PaletteSet;
    use megacube_display::VoxelVolume;

    #[test]
    fn test_rocket_explodes_then_relaunches() {
        let mut fireworks = Fireworks::default();
        let mut noise = NoiseGenerator::new(21);
        let mut volume = VoxelVolume::new();
        let palettes = PaletteSet::default();
        fireworks.init(&mut noise);

        let mut exploded_once = false;
        let mut relaunched = false;
        for _ in 0..60 * 10 {
            let mut frame = Frame {
                volume: &mut volume,
                noise: &mut noise,
                palettes: &palettes,
            };
            fireworks.update(1.0 / 60.0, &mut frame);
            volume.advance_frame(0);
            if fireworks.exploded {
                exploded_once = true;
                assert!((100..200).contains(&fireworks.debris.len()));
            } else if exploded_once {
                relaunched = true;
                break;
            }
        }
        assert!(exploded_once && relaunched);
    }
}
