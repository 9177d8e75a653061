//! Built-in configuration embedded from the `data/` directory.
//! Used whenever the host is not handed user-supplied RON.

use megacube_core::life::PresetList;
use megacube_core::{CubeSettings, PaletteSet};

use crate::loader::{
    build_palette_set, load_palettes_from_str, load_presets_from_str, load_settings_from_str,
    LoadError,
};

pub const SETTINGS_RON: &str = include_str!("../../../data/settings.ron");
pub const PALETTES_RON: &str = include_str!("../../../data/palettes.ron");
pub const LIFE_PRESETS_RON: &str = include_str!("../../../data/life_presets.ron");

pub fn default_settings() -> Result<CubeSettings, LoadError> {
    load_settings_from_str(SETTINGS_RON)
}

pub fn default_palettes() -> Result<PaletteSet, LoadError> {
    build_palette_set(&load_palettes_from_str(PALETTES_RON)?)
}

pub fn default_presets() -> Result<PresetList, LoadError> {
    load_presets_from_str(LIFE_PRESETS_RON)
}
