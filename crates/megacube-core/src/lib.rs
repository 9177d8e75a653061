pub mod color;
pub mod constants;
pub mod error;
pub mod life;
pub mod math;
pub mod noise;
pub mod palette;
pub mod particle;
pub mod settings;

pub use color::Color;
pub use error::PaletteError;
pub use math::{Quaternion, Vector3};
pub use noise::NoiseGenerator;
pub use palette::{Palette, PaletteSet};
pub use particle::Particle;
pub use settings::CubeSettings;
