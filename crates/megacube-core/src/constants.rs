//! Single source of truth for shared constants.
//! Display, automaton and demo crates all size their buffers from these.

/// Side length of the cube in voxels.
pub const CUBE_SIZE: usize = 16;

/// Total voxels in the cube (16^3).
pub const VOXEL_COUNT: usize = CUBE_SIZE * CUBE_SIZE * CUBE_SIZE;

/// Bytes per voxel in the raw frame (r, g, b).
pub const VOXEL_BYTES: usize = 3;

/// Total bytes in one raw frame handed to the renderer.
pub const RAW_FRAME_BYTES: usize = VOXEL_COUNT * VOXEL_BYTES;

/// Bits that must be clear in a lattice coordinate for it to lie in [0, 16).
pub const LATTICE_OUT_OF_RANGE_MASK: usize = !(CUBE_SIZE - 1);

/// World-space offset of the lattice center on every axis.
/// World (0, 0, 0) sits between the middle eight voxels.
pub const CUBE_CENTER: f32 = 7.5;

/// Number of entries in a palette (one per 8-bit hue).
pub const PALETTE_SIZE: usize = 256;

/// Default motion blur weight (0 = none, 255 = keep previous frame).
pub const DEFAULT_MOTION_BLUR: u8 = 64;

/// Default global brightness passed to the renderer.
pub const DEFAULT_BRIGHTNESS: f32 = 1.0;

/// Default power supply budget for the LED matrix.
pub const DEFAULT_MAX_MILLIAMPS: u32 = 18_000;

/// Current drawn by one LED channel at full intensity.
pub const MILLIAMPS_PER_CHANNEL: f32 = 20.0;

/// Default interval between automaton generations in seconds.
pub const DEFAULT_LIFE_INTERVAL: f32 = 0.15;

/// Rule table entries: one per possible live-neighbor count (0..=26).
pub const LIFE_RULE_COUNT: usize = 27;

/// Highest neighbor count a 3x3x3 Moore neighborhood can produce.
pub const LIFE_MAX_NEIGHBORS: u8 = 26;

/// Generation hashes remembered for stagnation detection.
pub const STAGNATION_WINDOW: usize = 256;

/// Recurrences of one hash inside the window that count as stagnation.
pub const STAGNATION_MATCHES: usize = 6;

/// Population at or above which the automaton is frozen.
pub const LIFE_POPULATION_CEILING: u32 = 500;

/// Fixed timestep used by the headless host (60 Hz).
pub const HOST_FRAME_DT: f32 = 1.0 / 60.0;
