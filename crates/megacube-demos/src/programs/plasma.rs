use megacube_core::constants::{CUBE_SIZE, VOXEL_COUNT};
use megacube_core::NoiseGenerator;
use megacube_display::voxel_index;

use super::LAVA;
use crate::{Animation, Frame, HueCycle};

/// 4D noise field sampled on the lattice and colored through the lava palette.
pub struct Plasma {
    speed_offset: f32,
    speed_offset_speed: f32,
    hue_speed: f32,
    /// Position in noise space; drifts each frame.
    origin: [f32; 4],
    hue: HueCycle,
    field: Vec<u8>,
}

impl Default for Plasma {
    fn default() -> Self {
        Self {
            speed_offset: 0.0,
            speed_offset_speed: 0.5,
            hue_speed: 50.0,
            origin: [0.0; 4],
            hue: HueCycle::default(),
            field: vec![0; VOXEL_COUNT],
        }
    }
}

impl Animation for Plasma {
    fn name(&self) -> &'static str {
        "Plasma"
    }

    fn init(&mut self, noise: &mut NoiseGenerator) {
        self.speed_offset = 0.0;
        for axis in &mut self.origin {
            *axis = noise.next_random(0.0, 255.0);
        }
        self.hue.reset();
    }

    fn update(&mut self, dt: f32, frame: &mut Frame<'_>) {
        let noise = &*frame.noise;
        self.speed_offset += dt * self.speed_offset_speed;
        for (i, axis) in self.origin.iter_mut().enumerate() {
            let speed = 2.0 * (noise.noise1(self.speed_offset + 50.0 * i as f32) - 0.5);
            *axis += speed * dt;
        }
        let scale = 0.15 + noise.noise1(self.speed_offset + 200.0) / 6.6;
        self.hue.advance(dt, self.hue_speed);

        let [ox, oy, oz, ow] = self.origin;
        for x in 0..CUBE_SIZE {
            let xo = ox + scale * x as f32;
            for y in 0..CUBE_SIZE {
                let yo = oy + scale * y as f32;
                for z in 0..CUBE_SIZE {
                    let zo = oz + scale * z as f32;
                    self.field[voxel_index(x, y, z)] = (noise.noise4(xo, yo, zo, ow) * 255.0) as u8;
                }
            }
        }

        let palette = frame.palettes.get_or_first(LAVA);
        let base = self.hue.hue();
        for x in 0..CUBE_SIZE {
            for y in 0..CUBE_SIZE {
                for z in 0..CUBE_SIZE {
                    let index = self.field[voxel_index(x, y, z)];
                    // Brightness is sampled with x and y swapped.
                    let level = self.field[voxel_index(y, x, z)];
                    let color = palette.get_wrapped(base + index as i32).scaled(level);
                    frame.volume.set_local(x, y, z, color);
                }
            }
        }
    }
}
