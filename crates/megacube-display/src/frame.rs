use megacube_core::constants::{CUBE_SIZE, RAW_FRAME_BYTES, VOXEL_COUNT};
use megacube_core::Color;

/// Flat index of lattice cell (x, y, z). Layout is x-major: `[x][y][z]`.
#[inline]
pub fn voxel_index(x: usize, y: usize, z: usize) -> usize {
    (x * CUBE_SIZE + y) * CUBE_SIZE + z
}

/// The most recently composed frame, as handed to the renderer.
///
/// Owned by `VoxelVolume` and only reachable through a shared borrow, so it
/// can never be read while the next `advance_frame` is compositing.
#[derive(Debug, Clone)]
pub struct RawFrame {
    voxels: Vec<Color>,
}

impl Default for RawFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl RawFrame {
    pub fn new() -> Self {
        Self {
            voxels: vec![Color::BLACK; VOXEL_COUNT],
        }
    }

    /// Raw `16 x 16 x 16 x 3` bytes, index order x, y, z, channel.
    pub fn as_bytes(&self) -> &[u8] {
        let bytes: &[u8] = bytemuck::cast_slice(&self.voxels);
        debug_assert_eq!(bytes.len(), RAW_FRAME_BYTES);
        bytes
    }

    pub fn voxels(&self) -> &[Color] {
        &self.voxels
    }

    /// Color of a lattice cell. Panics on out-of-range coordinates.
    pub fn get(&self, x: usize, y: usize, z: usize) -> Color {
        self.voxels[voxel_index(x, y, z)]
    }

    /// Number of voxels that are not black.
    pub fn lit_count(&self) -> usize {
        self.voxels.iter().filter(|c| !c.is_black()).count()
    }

    pub(crate) fn voxels_mut(&mut self) -> &mut [Color] {
        &mut self.voxels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_layout() {
        assert_eq!(voxel_index(0, 0, 0), 0);
        assert_eq!(voxel_index(0, 0, 1), 1);
        assert_eq!(voxel_index(0, 1, 0), 16);
        assert_eq!(voxel_index(1, 0, 0), 256);
        assert_eq!(voxel_index(15, 15, 15), VOXEL_COUNT - 1);
    }

    #[test]
    fn test_byte_view() {
        let mut frame = RawFrame::new();
        frame.voxels_mut()[voxel_index(0, 0, 1)] = Color::new(9, 8, 7);
        let bytes = frame.as_bytes();
        assert_eq!(bytes.len(), RAW_FRAME_BYTES);
        assert_eq!(&bytes[3..6], &[9, 8, 7]);
        assert_eq!(frame.lit_count(), 1);
    }
}
