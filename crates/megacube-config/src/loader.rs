use megacube_core::life::{LifePreset, PresetList};
use megacube_core::palette::PaletteDef;
use megacube_core::{CubeSettings, Palette, PaletteError, PaletteSet};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to parse settings RON: {0}")]
    SettingsParseError(String),
    #[error("Failed to parse palettes RON: {0}")]
    PaletteParseError(String),
    #[error("Failed to parse life presets RON: {0}")]
    PresetParseError(String),
    #[error("Invalid palette: {0}")]
    InvalidPalette(#[from] PaletteError),
}

/// Parse host settings. Missing fields take their defaults.
pub fn load_settings_from_str(ron_str: &str) -> Result<CubeSettings, LoadError> {
    let options = ron::Options::default();
    options
        .from_str(ron_str)
        .map_err(|e| LoadError::SettingsParseError(e.to_string()))
}

/// Parse palette definitions without expanding them.
pub fn load_palettes_from_str(ron_str: &str) -> Result<Vec<PaletteDef>, LoadError> {
    let options = ron::Options::default();
    options
        .from_str(ron_str)
        .map_err(|e| LoadError::PaletteParseError(e.to_string()))
}

/// Parse a life preset list.
pub fn load_presets_from_str(ron_str: &str) -> Result<PresetList, LoadError> {
    let options = ron::Options::default();
    let presets: Vec<LifePreset> = options
        .from_str(ron_str)
        .map_err(|e| LoadError::PresetParseError(e.to_string()))?;
    Ok(PresetList { presets })
}

/// Expand palette definitions into a ready-to-use set.
pub fn build_palette_set(defs: &[PaletteDef]) -> Result<PaletteSet, LoadError> {
    let palettes = defs
        .iter()
        .map(Palette::from_def)
        .collect::<Result<Vec<_>, _>>()?;
    let set = PaletteSet::new(palettes)?;
    log::info!("Loaded {} palettes", set.len());
    Ok(set)
}

/// Parse and expand palettes from several sources into one set.
pub fn load_all_palettes(sources: &[&str]) -> Result<PaletteSet, LoadError> {
    let mut defs = Vec::new();
    for source in sources {
        defs.extend(load_palettes_from_str(source)?);
    }
    build_palette_set(&defs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_settings_partial() {
        let settings = load_settings_from_str("(motion_blur: 10)").expect("should parse");
        assert_eq!(settings.motion_blur, 10);
        assert_eq!(settings.max_milliamps, CubeSettings::default().max_milliamps);
    }

    #[test]
    fn test_load_settings_with_seed() {
        let settings = load_settings_from_str("(seed: Some(42), brightness: 0.5)")
            .expect("should parse");
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.brightness, 0.5);
    }

    #[test]
    fn test_load_single_palette() {
        let ron = r#"[
            (
                name: "Mono",
                stops: [(0, (0, 0, 0)), (255, (255, 255, 255))],
            ),
        ]"#;
        let defs = load_palettes_from_str(ron).expect("should parse");
        assert_eq!(defs.len(), 1);
        let set = build_palette_set(&defs).expect("should build");
        let mono = set.get("Mono").expect("present");
        assert_eq!(mono.get(255), megacube_core::Color::WHITE);
    }

    #[test]
    fn test_bad_stops_rejected() {
        let ron = r#"[(name: "Broken", stops: [(10, (1, 2, 3)), (255, (0, 0, 0))])]"#;
        let defs = load_palettes_from_str(ron).expect("syntax is fine");
        let result = build_palette_set(&defs);
        assert!(matches!(
            result,
            Err(LoadError::InvalidPalette(PaletteError::MissingStart { .. }))
        ));
    }

    #[test]
    fn test_empty_palette_list_rejected() {
        assert!(matches!(
            load_all_palettes(&["[]"]),
            Err(LoadError::InvalidPalette(PaletteError::EmptySet))
        ));
    }

    #[test]
    fn test_load_presets() {
        let ron = r#"[(name: "4555", survive: [4], birth: [5], population: (200, 399), radius: (5.0, 7.0))]"#;
        let list = load_presets_from_str(ron).expect("should parse");
        assert_eq!(list.len(), 1);
        assert_eq!(list.presets[0].birth, vec![5]);
    }

    #[test]
    fn test_malformed_ron_rejected() {
        assert!(matches!(
            load_presets_from_str("[this is not valid RON {"),
            Err(LoadError::PresetParseError(_))
        ));
        assert!(load_settings_from_str("(motion_blur: 300)").is_err());
    }

    #[test]
    fn test_load_all_merges() {
        let a = r#"[(name: "A", stops: [(0, (0, 0, 0)), (255, (1, 1, 1))])]"#;
        let b = r#"[(name: "B", stops: [(0, (0, 0, 0)), (255, (2, 2, 2))])]"#;
        let set = load_all_palettes(&[a, b]).expect("should merge");
        assert_eq!(set.len(), 2);
    }
}
