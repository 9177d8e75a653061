use std::collections::HashSet;

use megacube_core::constants::{CUBE_SIZE, LIFE_MAX_NEIGHBORS};
use megacube_core::life::PresetList;
use megacube_core::palette::PaletteDef;
use megacube_core::{CubeSettings, Palette, PaletteError};
use thiserror::Error;

/// Largest seeding radius that still reaches inside the lattice.
const MAX_SEED_RADIUS: f32 = (CUBE_SIZE / 2) as f32;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate palette name '{0}'")]
    DuplicatePaletteName(String),
    #[error("Palette stops invalid: {0}")]
    BadStops(PaletteError),
    #[error("Duplicate life preset name '{0}'")]
    DuplicatePresetName(String),
    #[error("Preset '{name}' uses neighbor count {count}, max is {max}")]
    NeighborCountOutOfRange { name: String, count: u8, max: u8 },
    #[error("Preset '{name}' has no survive or birth counts")]
    EmptyRules { name: String },
    #[error("Preset '{name}' population range {min}..={max} is inverted")]
    InvertedPopulation { name: String, min: u32, max: u32 },
    #[error("Preset '{name}' radius range {min}..={max} is inverted or not finite")]
    InvalidRadius { name: String, min: f32, max: f32 },
    #[error("Preset '{name}' radius {value} exceeds lattice half-width {max}")]
    RadiusTooLarge { name: String, value: f32, max: f32 },
    #[error("Settings brightness {0} outside 0.0..=1.0")]
    BrightnessOutOfRange(f32),
    #[error("Settings life_interval {0} must be positive")]
    NonPositiveLifeInterval(f32),
}

/// Validate palette definitions: unique names and well-formed stops.
pub fn validate_palettes(defs: &[PaletteDef]) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    for def in defs {
        if !seen.insert(def.name.as_str()) {
            errors.push(ValidationError::DuplicatePaletteName(def.name.clone()));
        }
        if let Err(e) = Palette::from_def(def) {
            errors.push(ValidationError::BadStops(e));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate life presets for counts, ranges and unique names.
pub fn validate_presets(list: &PresetList) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    for preset in &list.presets {
        if !seen.insert(preset.name.as_str()) {
            errors.push(ValidationError::DuplicatePresetName(preset.name.clone()));
        }
    }

    for preset in &list.presets {
        for &count in preset.survive.iter().chain(&preset.birth) {
            if count > LIFE_MAX_NEIGHBORS {
                errors.push(ValidationError::NeighborCountOutOfRange {
                    name: preset.name.clone(),
                    count,
                    max: LIFE_MAX_NEIGHBORS,
                });
            }
        }
        if preset.survive.is_empty() && preset.birth.is_empty() {
            errors.push(ValidationError::EmptyRules {
                name: preset.name.clone(),
            });
        }

        let (min, max) = preset.population;
        if min > max {
            errors.push(ValidationError::InvertedPopulation {
                name: preset.name.clone(),
                min,
                max,
            });
        }

        let (r_min, r_max) = preset.radius;
        if !r_min.is_finite() || !r_max.is_finite() || r_min < 0.0 || r_min > r_max {
            errors.push(ValidationError::InvalidRadius {
                name: preset.name.clone(),
                min: r_min,
                max: r_max,
            });
        } else if r_max > MAX_SEED_RADIUS {
            errors.push(ValidationError::RadiusTooLarge {
                name: preset.name.clone(),
                value: r_max,
                max: MAX_SEED_RADIUS,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate host settings ranges. `motion_blur` and `max_milliamps` are
/// range-checked by their integer types.
pub fn validate_settings(settings: &CubeSettings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !(0.0..=1.0).contains(&settings.brightness) {
        errors.push(ValidationError::BrightnessOutOfRange(settings.brightness));
    }
    if !(settings.life_interval.is_finite() && settings.life_interval > 0.0) {
        errors.push(ValidationError::NonPositiveLifeInterval(
            settings.life_interval,
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use megacube_core::life::LifePreset;
    use megacube_core::palette::GradientStop;

    fn def(name: &str, stops: Vec<GradientStop>) -> PaletteDef {
        PaletteDef {
            name: name.into(),
            stops,
        }
    }

    fn preset(name: &str) -> LifePreset {
        LifePreset {
            name: name.into(),
            survive: vec![4],
            birth: vec![5],
            population: (200, 399),
            radius: (5.0, 7.0),
        }
    }

    #[test]
    fn test_valid_palettes_pass() {
        let stops = vec![GradientStop(0, (0, 0, 0)), GradientStop(255, (9, 9, 9))];
        assert!(validate_palettes(&[def("A", stops.clone()), def("B", stops)]).is_ok());
    }

    #[test]
    fn test_duplicate_palette_and_bad_stops_collected() {
        let good = vec![GradientStop(0, (0, 0, 0)), GradientStop(255, (9, 9, 9))];
        let bad = vec![GradientStop(0, (0, 0, 0)), GradientStop(200, (9, 9, 9))];
        let errors = validate_palettes(&[def("A", good), def("A", bad)])
            .expect_err("should fail");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0], ValidationError::DuplicatePaletteName("A".into()));
        assert!(matches!(
            errors[1],
            ValidationError::BadStops(PaletteError::MissingEnd { last: 200, .. })
        ));
    }

    #[test]
    fn test_valid_presets_pass() {
        let list = PresetList {
            presets: vec![preset("4555"), preset("5766")],
        };
        assert!(validate_presets(&list).is_ok());
    }

    #[test]
    fn test_preset_errors_collected() {
        let mut bad = preset("bad");
        bad.survive = vec![27];
        bad.population = (10, 5);
        bad.radius = (2.0, 12.0);
        let mut empty = preset("empty");
        empty.survive.clear();
        empty.birth.clear();
        empty.radius = (4.0, 1.0);

        let errors = validate_presets(&PresetList {
            presets: vec![bad, empty, preset("empty")],
        })
        .expect_err("should fail");

        assert!(errors.contains(&ValidationError::DuplicatePresetName("empty".into())));
        assert!(errors.contains(&ValidationError::NeighborCountOutOfRange {
            name: "bad".into(),
            count: 27,
            max: 26
        }));
        assert!(errors.contains(&ValidationError::InvertedPopulation {
            name: "bad".into(),
            min: 10,
            max: 5
        }));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::RadiusTooLarge { value, .. } if *value == 12.0)));
        assert!(errors.contains(&ValidationError::EmptyRules {
            name: "empty".into()
        }));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidRadius { name, .. } if name == "empty")));
    }

    #[test]
    fn test_settings_ranges() {
        assert!(validate_settings(&CubeSettings::default()).is_ok());
        let settings = CubeSettings {
            brightness: 1.5,
            life_interval: 0.0,
            ..CubeSettings::default()
        };
        let errors = validate_settings(&settings).expect_err("should fail");
        assert_eq!(errors.len(), 2);

        let nan = CubeSettings {
            brightness: f32::NAN,
            ..CubeSettings::default()
        };
        assert!(validate_settings(&nan).is_err());
    }
}
