//! Built-in animation programs.

mod arrows;
mod atoms;
mod cube;
mod fireworks;
mod helix;
mod life;
mod plasma;
mod sinus;
mod starfield;
mod twinkles;

use megacube_core::life::PresetList;

use crate::playlist::Playlist;

pub use arrows::Arrows;
pub use atoms::Atoms;
pub use cube::Cube;
pub use fireworks::Fireworks;
pub use helix::Helix;
pub use life::Life;
pub use plasma::Plasma;
pub use sinus::Sinus;
pub use starfield::Starfield;
pub use twinkles::Twinkles;

/// Palette used by most color-cycling programs.
pub const RAINBOW: &str = "Rainbow";
/// Palette used by the plasma program.
pub const LAVA: &str = "Lava";

/// Every built-in program in show order.
pub fn default_playlist(presets: PresetList, life_interval: f32) -> Playlist {
    Playlist::new(vec![
        Box::new(Plasma::default()),
        Box::new(Cube::default()),
        Box::new(Atoms::default()),
        Box::new(Sinus::default()),
        Box::new(Starfield::default()),
        Box::new(Helix::default()),
        Box::new(Fireworks::default()),
        Box::new(Life::new(presets, life_interval)),
        Box::new(Twinkles::default()),
        Box::new(Arrows::default()),
    ])
}
