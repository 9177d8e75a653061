use serde::{Deserialize, Serialize};

/// A 3D life rule preset loaded from RON data.
///
/// Survive counts keep a live cell alive (and leave dead cells dead); birth
/// counts make a cell alive regardless of its current state. Every other
/// neighbor count kills the cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifePreset {
    /// Human-readable name, e.g. "4555".
    pub name: String,
    /// Neighbor counts (0-26) that keep a cell in its current state.
    pub survive: Vec<u8>,
    /// Neighbor counts (0-26) that bring a cell to life.
    pub birth: Vec<u8>,
    /// Number of seeding attempts, inclusive range.
    pub population: (u32, u32),
    /// Seeding sphere radius around the cube center, inclusive range.
    pub radius: (f32, f32),
}

/// Collection of life presets, played in order.
#[derive(Debug, Clone, Default)]
pub struct PresetList {
    pub presets: Vec<LifePreset>,
}

impl PresetList {
    /// Look up a preset by name. Returns None if not found.
    pub fn get(&self, name: &str) -> Option<&LifePreset> {
        self.presets.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
