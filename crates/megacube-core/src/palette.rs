use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::constants::PALETTE_SIZE;
use crate::error::PaletteError;

/// One gradient stop: palette index and the color at that index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradientStop(pub u8, pub (u8, u8, u8));

/// A named palette definition loaded from RON data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteDef {
    pub name: String,
    pub stops: Vec<GradientStop>,
}

/// 256 colors spanning the hue wheel, expanded from gradient stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    name: String,
    colors: [Color; PALETTE_SIZE],
}

impl Palette {
    /// Expand ordered gradient stops into a full 256-entry palette.
    ///
    /// The first stop must sit at index 0 and the last at 255. Colors between
    /// two stops are linearly interpolated; repeated indices give hard edges.
    pub fn from_stops(name: &str, stops: &[GradientStop]) -> Result<Self, PaletteError> {
        let (first, last) = match (stops.first(), stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(PaletteError::NoStops(name.to_string())),
        };
        if first.0 != 0 {
            return Err(PaletteError::MissingStart {
                name: name.to_string(),
                first: first.0,
            });
        }
        if last.0 != 255 {
            return Err(PaletteError::MissingEnd {
                name: name.to_string(),
                last: last.0,
            });
        }
        for (position, pair) in stops.windows(2).enumerate() {
            if pair[1].0 < pair[0].0 {
                return Err(PaletteError::UnorderedStops {
                    name: name.to_string(),
                    position: position + 1,
                    previous: pair[0].0,
                    index: pair[1].0,
                });
            }
        }

        let mut colors = [Color::BLACK; PALETTE_SIZE];
        colors[0] = Color::from(first.1);
        for pair in stops.windows(2) {
            let (start, end) = (pair[0].0 as usize, pair[1].0 as usize);
            let (from, to) = (Color::from(pair[0].1), Color::from(pair[1].1));
            let span = end - start;
            for (offset, slot) in colors[start..=end].iter_mut().enumerate() {
                *slot = if span == 0 {
                    to
                } else {
                    Color::mix((offset * 255 / span) as u8, from, to)
                };
            }
        }

        Ok(Self {
            name: name.to_string(),
            colors,
        })
    }

    /// Build a palette from a loaded definition.
    pub fn from_def(def: &PaletteDef) -> Result<Self, PaletteError> {
        Self::from_stops(&def.name, &def.stops)
    }

    /// Procedural fallback palette: the full-saturation hue wheel.
    pub fn rainbow() -> Self {
        let mut colors = [Color::BLACK; PALETTE_SIZE];
        for (hue, slot) in colors.iter_mut().enumerate() {
            *slot = Color::from_hue(hue as u8);
        }
        Self {
            name: "Rainbow".to_string(),
            colors,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Color at an 8-bit hue.
    #[inline]
    pub fn get(&self, hue: u8) -> Color {
        self.colors[hue as usize]
    }

    /// Color at any integer index, wrapped modulo 256.
    #[inline]
    pub fn get_wrapped(&self, index: i32) -> Color {
        self.colors[index.rem_euclid(PALETTE_SIZE as i32) as usize]
    }

    pub fn colors(&self) -> &[Color; PALETTE_SIZE] {
        &self.colors
    }
}

/// Non-empty collection of palettes looked up by name.
#[derive(Debug, Clone)]
pub struct PaletteSet {
    palettes: Vec<Palette>,
}

impl Default for PaletteSet {
    fn default() -> Self {
        Self {
            palettes: vec![Palette::rainbow()],
        }
    }
}

impl PaletteSet {
    pub fn new(palettes: Vec<Palette>) -> Result<Self, PaletteError> {
        if palettes.is_empty() {
            return Err(PaletteError::EmptySet);
        }
        Ok(Self { palettes })
    }

    /// Look up a palette by name. Returns None if not found.
    pub fn get(&self, name: &str) -> Option<&Palette> {
        self.palettes.iter().find(|p| p.name == name)
    }

    /// Look up a palette by name, falling back to the first palette.
    pub fn get_or_first(&self, name: &str) -> &Palette {
        self.get(name).unwrap_or(&self.palettes[0])
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Palette> {
        self.palettes.iter()
    }
}
