use megacube_core::constants::{CUBE_SIZE, VOXEL_COUNT};
use megacube_core::{Color, NoiseGenerator};
use megacube_display::voxel_index;

use crate::{Animation, Frame};

/// Random voxels flare up in a random hue and fade out again.
pub struct Twinkles {
    colors: Vec<Color>,
    /// Seconds since each twinkle started.
    age: Vec<f32>,
    timer: f32,
    interval: f32,
    fade_in: f32,
    fade_out: f32,
}

impl Default for Twinkles {
    fn default() -> Self {
        Self {
            colors: vec![Color::BLACK; VOXEL_COUNT],
            age: vec![0.0; VOXEL_COUNT],
            timer: 0.0,
            interval: 0.01,
            fade_in: 0.5,
            fade_out: 1.5,
        }
    }
}

impl Twinkles {
    /// Brightness factor for a twinkle of this age, or None once it has ended.
    fn envelope(&self, age: f32) -> Option<u8> {
        if age < self.fade_in {
            Some((255.0 * age / self.fade_in) as u8)
        } else if age < self.fade_in + self.fade_out {
            Some((255.0 * (1.0 - (age - self.fade_in) / self.fade_out)) as u8)
        } else {
            None
        }
    }
}

impl Animation for Twinkles {
    fn name(&self) -> &'static str {
        "Twinkles"
    }

    fn init(&mut self, _noise: &mut NoiseGenerator) {
        self.timer = 0.0;
        self.colors.fill(Color::BLACK);
        self.age.fill(0.0);
    }

    fn update(&mut self, dt: f32, frame: &mut Frame<'_>) {
        self.timer += dt;

        for x in 0..CUBE_SIZE {
            for y in 0..CUBE_SIZE {
                for z in 0..CUBE_SIZE {
                    let i = voxel_index(x, y, z);
                    if self.colors[i].is_black() {
                        continue;
                    }
                    match self.envelope(self.age[i]) {
                        Some(level) => {
                            frame.volume.set_local(x, y, z, self.colors[i].scaled(level));
                            self.age[i] += dt;
                        }
                        None => {
                            self.age[i] = 0.0;
                            self.colors[i] = Color::BLACK;
                        }
                    }
                }
            }
        }

        if self.timer >= self.interval {
            self.timer = 0.0;
            let n = CUBE_SIZE as u32;
            let x = frame.noise.next_below(n) as usize;
            let y = frame.noise.next_below(n) as usize;
            let z = frame.noise.next_below(n) as usize;
            let i = voxel_index(x, y, z);
            if self.age[i] == 0.0 {
                self.colors[i] = Color::from_hue(frame.noise.next_u8());
            }
        }
    }
}
