use glam::Vec3;
use megacube_core::{NoiseGenerator, Quaternion};

use super::RAINBOW;
use crate::{Animation, Frame, HueCycle};

/// Nine glowing points orbiting the center on slowly wobbling axes.
pub struct Atoms {
    angle: f32,
    angle_speed: f32,
    hue_speed: f32,
    radius: f32,
    distance: f32,
    hue: HueCycle,
}

impl Default for Atoms {
    fn default() -> Self {
        Self {
            angle: 0.0,
            angle_speed: 200.0,
            hue_speed: 50.0,
            radius: 6.5,
            distance: 3.0,
            hue: HueCycle::default(),
        }
    }
}

/// Wobble divisors per atom: axis component `i` is `sign * sin(a / divisor)`.
const WOBBLE: [[f32; 3]; 9] = [
    [95.0, 75.0, -95.0],
    [90.0, -85.0, -95.0],
    [-94.0, 80.0, -75.0],
    [90.0, 70.0, -90.0],
    [80.0, -70.0, -99.0],
    [-99.0, 90.0, -80.0],
    [-90.0, -90.0, 99.0],
    [-70.0, -80.0, -90.0],
    [-99.0, 70.0, 80.0],
];

fn atom_home(i: usize) -> Vec3 {
    match i {
        0 => Vec3::X,
        1 => Vec3::Y,
        2 => Vec3::Z,
        3 => Vec3::NEG_X,
        4 => Vec3::NEG_Y,
        5 => Vec3::NEG_Z,
        6 => Vec3::new(1.0, 0.0, 1.0).normalize(),
        7 => Vec3::new(1.0, 1.0, 0.0).normalize(),
        _ => Vec3::new(0.0, 1.0, 1.0).normalize(),
    }
}

impl Animation for Atoms {
    fn name(&self) -> &'static str {
        "Atoms"
    }

    fn init(&mut self, _noise: &mut NoiseGenerator) {
        self.angle = 0.0;
        self.hue.reset();
    }

    fn update(&mut self, dt: f32, frame: &mut Frame<'_>) {
        self.angle += dt * self.angle_speed;
        self.hue.advance(dt, self.hue_speed);

        let a = self.angle;
        let t = self.angle * 0.1;
        let palette = frame.palettes.get_or_first(RAINBOW);

        for (i, wobble) in WOBBLE.iter().enumerate() {
            // Divisor sign carries the component sign.
            let axis = Vec3::from_array(wobble.map(|d| d.signum() * (a / d.abs()).sin()));
            let q = Quaternion::from_angle_axis(t, axis);
            let v = q.rotate(atom_home(i)) * self.radius;
            let color = palette.get_wrapped(self.hue.hue() + 8 * i as i32);
            frame.volume.radiate5(v, color, self.distance);
        }
    }
}
