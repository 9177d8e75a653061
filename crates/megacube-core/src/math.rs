use std::ops::Mul;

use glam::{Quat, Vec3};

use crate::constants::{CUBE_CENTER, LATTICE_OUT_OF_RANGE_MASK};

/// World-space vector. Centered coordinates: (0, 0, 0) is the middle of the cube.
pub type Vector3 = Vec3;

/// Unit rotation built from an angle in degrees around an axis.
///
/// Composition follows the usual convention: `(a * b).rotate(v)` rotates by
/// `b` first, then by `a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion(Quat);

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion(Quat::IDENTITY);

    /// Rotation of `degrees` around `axis`. The axis need not be normalized;
    /// a zero-length axis yields the identity rotation.
    pub fn from_angle_axis(degrees: f32, axis: Vector3) -> Self {
        let axis = axis.normalize_or_zero();
        if axis == Vec3::ZERO || !degrees.is_finite() {
            return Self::IDENTITY;
        }
        Self(Quat::from_axis_angle(axis, degrees.to_radians()))
    }

    /// Apply this rotation to a vector.
    #[inline]
    pub fn rotate(&self, v: Vector3) -> Vector3 {
        self.0 * v
    }

    pub fn inverse(&self) -> Self {
        Self(self.0.inverse())
    }

    /// Rotation angle in degrees and its (unit) axis.
    pub fn to_angle_axis(&self) -> (f32, Vector3) {
        let (axis, radians) = self.0.to_axis_angle();
        (radians.to_degrees(), axis)
    }

    pub fn as_quat(&self) -> Quat {
        self.0
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: Quaternion) -> Quaternion {
        Quaternion((self.0 * rhs.0).normalize())
    }
}

/// Linearly remap `x` from one range to another. A zero-width input range maps to `out_min`.
pub fn map_range(x: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let span = in_max - in_min;
    if span == 0.0 {
        return out_min;
    }
    (x - in_min) * (out_max - out_min) / span + out_min
}

/// Map one world-space axis value to its nearest lattice index (round half up).
///
/// The result may be negative or beyond the lattice; callers bounds-check.
#[inline]
pub fn world_axis_to_lattice(value: f32) -> i32 {
    (value + CUBE_CENTER + 0.5).floor() as i32
}

/// Lattice cell containing a world-space point, or None when the point is
/// outside the cube or not finite.
pub fn world_to_lattice(v: Vector3) -> Option<[usize; 3]> {
    if !v.is_finite() {
        return None;
    }
    let x = world_axis_to_lattice(v.x) as usize;
    let y = world_axis_to_lattice(v.y) as usize;
    let z = world_axis_to_lattice(v.z) as usize;
    // Negative indices wrap to huge usize values and fail the same mask.
    if (x | y | z) & LATTICE_OUT_OF_RANGE_MASK == 0 {
        Some([x, y, z])
    } else {
        None
    }
}

/// Center of a lattice cell in world space.
pub fn lattice_to_world(x: usize, y: usize, z: usize) -> Vector3 {
    Vec3::new(x as f32, y as f32, z as f32) - Vec3::splat(CUBE_CENTER)
}
