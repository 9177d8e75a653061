use glam::Vec3;
use megacube_core::constants::{CUBE_CENTER, CUBE_SIZE, LATTICE_OUT_OF_RANGE_MASK, VOXEL_COUNT};
use megacube_core::math::world_to_lattice;
use megacube_core::Color;

use crate::frame::{voxel_index, RawFrame};

/// Double-buffered 16x16x16 color volume.
///
/// Two grids alternate roles every frame: one is written by the active
/// program, the other holds the previous frame's writes. `advance_frame`
/// blends them, publishes the raw frame, flips the roles and clears the new
/// write side, all inside one `&mut self` call.
pub struct VoxelVolume {
    buffers: [Vec<Color>; 2],
    /// 0 or 1: index of the buffer currently being written.
    write_index: usize,
    frame: RawFrame,
    frames_advanced: u64,
}

impl Default for VoxelVolume {
    fn default() -> Self {
        Self::new()
    }
}

/// Inclusive lattice range of cells strictly closer than `r` to `center`
/// along one axis, clipped to the cube. None when the range is empty.
fn sweep_range(center: f32, r: f32) -> Option<(usize, usize)> {
    let lo = ((center - r).floor() + 1.0).max(0.0);
    let hi = ((center + r).ceil() - 1.0).min((CUBE_SIZE - 1) as f32);
    if lo > hi {
        None
    } else {
        Some((lo as usize, hi as usize))
    }
}

/// Half-width of the world-space box whose points round into the lattice.
const WORLD_LIMIT: f32 = CUBE_CENTER + 0.5;

/// Clip segment `a`-`b` to the world box (Liang-Barsky). None when it misses
/// the cube or is not finite.
fn clip_to_cube(a: Vec3, b: Vec3) -> Option<(Vec3, Vec3)> {
    if !a.is_finite() || !b.is_finite() {
        return None;
    }
    let d = b - a;
    let (mut t0, mut t1) = (0.0f32, 1.0f32);
    for axis in 0..3 {
        let (start, delta) = (a[axis], d[axis]);
        if delta == 0.0 {
            if !(-WORLD_LIMIT..=WORLD_LIMIT).contains(&start) {
                return None;
            }
            continue;
        }
        let near = (-WORLD_LIMIT - start) / delta;
        let far = (WORLD_LIMIT - start) / delta;
        t0 = t0.max(near.min(far));
        t1 = t1.min(near.max(far));
        if t0 > t1 {
            return None;
        }
    }
    Some((a + d * t0, a + d * t1))
}

impl VoxelVolume {
    /// Allocate both buffers once, cleared to black.
    pub fn new() -> Self {
        Self {
            buffers: [vec![Color::BLACK; VOXEL_COUNT], vec![Color::BLACK; VOXEL_COUNT]],
            write_index: 0,
            frame: RawFrame::new(),
            frames_advanced: 0,
        }
    }

    #[inline]
    fn write_buffer(&mut self) -> &mut [Color] {
        &mut self.buffers[self.write_index]
    }

    /// Set a lattice cell directly. Silently dropped unless every coordinate is in [0, 16).
    #[inline]
    pub fn set_local(&mut self, x: usize, y: usize, z: usize, color: Color) {
        if (x | y | z) & LATTICE_OUT_OF_RANGE_MASK == 0 {
            self.write_buffer()[voxel_index(x, y, z)] = color;
        }
    }

    /// Read a lattice cell from the buffer being written this frame.
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> Option<Color> {
        if (x | y | z) & LATTICE_OUT_OF_RANGE_MASK == 0 {
            Some(self.buffers[self.write_index][voxel_index(x, y, z)])
        } else {
            None
        }
    }

    /// Read a lattice cell as written during the previous frame.
    pub fn get_previous(&self, x: usize, y: usize, z: usize) -> Option<Color> {
        if (x | y | z) & LATTICE_OUT_OF_RANGE_MASK == 0 {
            Some(self.buffers[1 - self.write_index][voxel_index(x, y, z)])
        } else {
            None
        }
    }

    /// Set the cell nearest to a centered world-space point.
    pub fn set_world(&mut self, v: Vec3, color: Color) {
        if let Some([x, y, z]) = world_to_lattice(v) {
            self.write_buffer()[voxel_index(x, y, z)] = color;
        }
    }

    /// Saturating-add into the cell nearest to a centered world-space point.
    pub fn add_world(&mut self, v: Vec3, color: Color) {
        if let Some([x, y, z]) = world_to_lattice(v) {
            self.write_buffer()[voxel_index(x, y, z)] += color;
        }
    }

    /// Sphere of light with linear falloff, merged by per-channel maximum.
    pub fn radiate(&mut self, center: Vec3, color: Color, r: f32) {
        self.sweep(center, r, |distance| 255.0 * (1.0 - distance / r), color);
    }

    /// Sphere of light with `1 / (1 + d^5)` falloff: a tighter, hotter core.
    pub fn radiate5(&mut self, center: Vec3, color: Color, r: f32) {
        self.sweep(center, r, |distance| 255.0 / (1.0 + distance.powi(5)), color);
    }

    /// Visit every cell strictly inside the sphere and maximize in the scaled color.
    fn sweep(&mut self, center: Vec3, r: f32, falloff: impl Fn(f32) -> f32, color: Color) {
        if !(r.is_finite() && r > 0.0) || !center.is_finite() {
            return;
        }
        let c = center + Vec3::splat(CUBE_CENTER);
        let (Some((x1, x2)), Some((y1, y2)), Some((z1, z2))) = (
            sweep_range(c.x, r),
            sweep_range(c.y, r),
            sweep_range(c.z, r),
        ) else {
            return;
        };

        let buffer = &mut self.buffers[self.write_index];
        for x in x1..=x2 {
            for y in y1..=y2 {
                for z in z1..=z2 {
                    let distance = (Vec3::new(x as f32, y as f32, z as f32) - c).length();
                    if distance < r {
                        let factor = falloff(distance).clamp(0.0, 255.0) as u8;
                        buffer[voxel_index(x, y, z)].maximize(color.scaled(factor));
                    }
                }
            }
        }
    }

    /// Straight line of voxels between two world-space points.
    ///
    /// The segment is clipped to the cube first, so far-away endpoints cost
    /// no more than a line across the lattice.
    pub fn line(&mut self, a: Vec3, b: Vec3, color: Color) {
        let Some((a, b)) = clip_to_cube(a, b) else {
            return;
        };
        let n = a - b;
        let steps = 1.0 + n.abs().max_element();
        if !steps.is_finite() {
            return;
        }
        let inc = n / steps;
        for i in 0..=steps as u32 {
            self.set_world(a - inc * i as f32, color);
        }
    }

    /// Clear the write buffer to black.
    pub fn clear(&mut self) {
        self.write_buffer().fill(Color::BLACK);
    }

    /// Compose the frame and rotate the buffers.
    ///
    /// Each cell of the write buffer is blended toward the previous frame's
    /// writes by `motion_blur` (0 = none, 255 = show previous) and published
    /// as the raw frame. Both buffers keep the unblended writes, so a trail
    /// lasts exactly one frame. The older buffer becomes the cleared write side.
    pub fn advance_frame(&mut self, motion_blur: u8) -> &RawFrame {
        let write = &self.buffers[self.write_index];
        let read = &self.buffers[1 - self.write_index];

        for ((cell, previous), out) in write
            .iter()
            .zip(read.iter())
            .zip(self.frame.voxels_mut().iter_mut())
        {
            let mut composed = *cell;
            composed.blend(motion_blur, *previous);
            *out = composed;
        }

        self.write_index = 1 - self.write_index;
        self.clear();
        self.frames_advanced += 1;
        &self.frame
    }

    /// The most recently composed frame.
    pub fn raw_frame(&self) -> &RawFrame {
        &self.frame
    }

    /// Number of completed `advance_frame` calls.
    pub fn frames_advanced(&self) -> u64 {
        self.frames_advanced
    }
}
