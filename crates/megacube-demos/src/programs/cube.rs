use glam::Vec3;
use megacube_core::{NoiseGenerator, Quaternion};

use super::RAINBOW;
use crate::{Animation, Frame};

const CORNERS: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
];

/// Corner index pairs of the twelve edges.
const EDGES: [(usize, usize); 12] = [
    (0, 1),
    (2, 3),
    (0, 2),
    (1, 3),
    (4, 5),
    (6, 7),
    (4, 6),
    (5, 7),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Rotating wireframe cube drawn with soft spheres along each edge.
pub struct Cube {
    angle: f32,
    /// Degrees per second.
    angle_speed: f32,
    radius: f32,
    distance: f32,
}

impl Default for Cube {
    fn default() -> Self {
        Self {
            angle: 0.0,
            angle_speed: 45.0,
            radius: 6.0,
            distance: 1.5,
        }
    }
}

impl Cube {
    /// Rotation axis changes every two full turns: z, then (1,1,1), then y.
    fn rotation(&mut self) -> Quaternion {
        if self.angle > 6.0 * 360.0 {
            self.angle -= 6.0 * 360.0;
        }
        let axis = if self.angle > 4.0 * 360.0 {
            Vec3::Y
        } else if self.angle > 2.0 * 360.0 {
            Vec3::ONE
        } else {
            Vec3::Z
        };
        Quaternion::from_angle_axis(self.angle, axis)
    }
}

impl Animation for Cube {
    fn name(&self) -> &'static str {
        "Cube"
    }

    fn init(&mut self, _noise: &mut NoiseGenerator) {
        self.angle = 0.0;
    }

    fn update(&mut self, dt: f32, frame: &mut Frame<'_>) {
        self.angle += dt * self.angle_speed;
        let q = self.rotation();
        let palette = frame.palettes.get_or_first(RAINBOW);
        let mut pixel: u8 = 0;

        for (a, b) in EDGES {
            let v1 = q.rotate(CORNERS[a] * self.radius);
            let v2 = q.rotate(CORNERS[b] * self.radius);
            let n = v1 - v2;
            let steps = 1.0 + n.abs().max_element();
            let inc = n / steps;
            for j in 0..=steps as u32 {
                pixel = pixel.wrapping_add(6);
                frame
                    .volume
                    .radiate(v1 - inc * j as f32, palette.get(pixel), self.distance);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_cycles_and_wraps() {
        let mut cube = Cube::default();
        cube.angle = 3.0 * 360.0 + 90.0;
        let q = cube.rotation();
        // Points on the diagonal axis are fixed.
        assert!((q.rotate(Vec3::ONE) - Vec3::ONE).length() < 1e-3);
        assert!((q.rotate(Vec3::X) - Vec3::X).length() > 0.1);

        cube.angle = 6.0 * 360.0 + 10.0;
        cube.rotation();
        assert!((cube.angle - 10.0).abs() < 1e-3);
    }
}
