pub mod frame;
pub mod power;
pub mod volume;

pub use frame::{voxel_index, RawFrame};
pub use power::PowerLimiter;
pub use volume::VoxelVolume;
