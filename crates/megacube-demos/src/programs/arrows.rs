use glam::Vec3;
use megacube_core::{NoiseGenerator, Quaternion};

use super::RAINBOW;
use crate::{Animation, Frame, HueCycle};

/// Arrow glyph, one row per entry, most significant bit = leftmost column.
const BITMAP: [u16; 10] = [
    0b0000_0001_1000_0000,
    0b0000_0011_1100_0000,
    0b0000_0111_1110_0000,
    0b0000_1111_1111_0000,
    0b0001_1111_1111_1000,
    0b0011_1111_1111_1100,
    0b0000_0011_1100_0000,
    0b0000_0011_1100_0000,
    0b0000_0011_1100_0000,
    0b0000_0011_1100_0000,
];

/// Three arrows bent around the cube's floor, each tumbling on its own axis.
pub struct Arrows {
    angle: f32,
    angle_speed: f32,
    hue_speed: f32,
    radius: f32,
    distance: f32,
    brightness: u8,
    hue: HueCycle,
}

impl Default for Arrows {
    fn default() -> Self {
        Self {
            angle: 0.0,
            angle_speed: 60.0,
            hue_speed: 50.0,
            radius: 7.0,
            distance: 1.5,
            brightness: 255,
            hue: HueCycle::default(),
        }
    }
}

impl Animation for Arrows {
    fn name(&self) -> &'static str {
        "Arrows"
    }

    fn init(&mut self, _noise: &mut NoiseGenerator) {
        self.angle = 0.0;
        self.hue.reset();
    }

    fn update(&mut self, dt: f32, frame: &mut Frame<'_>) {
        self.angle += dt * self.angle_speed;
        self.hue.advance(dt, self.hue_speed);

        // Degrees subtended by half a voxel at the drawing radius.
        let arc = 2.0 * (0.5 / self.radius).asin().to_degrees();
        let spins = [
            (Quaternion::from_angle_axis(self.angle * 0.6, Vec3::ONE), 0.8, 0),
            (Quaternion::from_angle_axis(self.angle * 0.7, -Vec3::ONE), 0.9, 64),
            (Quaternion::from_angle_axis(self.angle * 0.8, Vec3::Y), 1.0, 128),
        ];
        let palette = frame.palettes.get_or_first(RAINBOW);

        for (row, bits) in BITMAP.iter().enumerate() {
            for column in 0..16 {
                if bits & (0x8000 >> column) == 0 {
                    continue;
                }
                let point =
                    Vec3::new(column as f32 - 7.5, 4.5 - row as f32, 0.0) / 7.5 * self.radius;
                let floor = Vec3::new(point.x, -self.radius, 0.0);
                let bend = Quaternion::from_angle_axis(self.angle - arc * point.y, Vec3::X);

                for (spin, reach, hue_offset) in spins {
                    let hue = self.hue.hue() + hue_offset + 8 * row as i32;
                    let color = palette.get_wrapped(hue).scaled(self.brightness);
                    frame
                        .volume
                        .radiate((spin * bend).rotate(floor * reach), color, self.distance);
                }
            }
        }
    }
}
