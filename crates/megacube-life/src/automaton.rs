use megacube_core::constants::LIFE_POPULATION_CEILING;
use megacube_core::life::{LifePreset, PresetList};
use megacube_core::NoiseGenerator;

use crate::grid::{GenerationStats, LifeGrid};
use crate::rules::RuleTable;
use crate::stagnation::StagnationDetector;

/// Outcome of one `LifeSim::progress` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// A normal generation was computed.
    Evolved,
    /// The grid died out and was reseeded from the preset at this index.
    Reseeded { preset: usize },
    /// The pattern stagnated or overgrew; rules were switched to all-die and
    /// one extra generation was run.
    Frozen,
}

/// 3D life with automatic restart.
///
/// State cycle: Empty -> (progress) Reseeded -> Evolved* -> Frozen ->
/// (dies out) Reseeded with the next preset, and so on forever.
#[derive(Debug, Clone)]
pub struct LifeSim {
    grid: LifeGrid,
    rules: RuleTable,
    stagnation: StagnationDetector,
    presets: PresetList,
    /// Index of the preset applied on the next reseed.
    next_preset: usize,
    last_stats: GenerationStats,
}

impl LifeSim {
    pub fn new(presets: PresetList) -> Self {
        if presets.is_empty() {
            log::warn!("Life automaton created without presets; it will stay empty");
        }
        Self {
            grid: LifeGrid::new(),
            rules: RuleTable::all_die(),
            stagnation: StagnationDetector::new(),
            presets,
            next_preset: 0,
            last_stats: GenerationStats {
                population: 0,
                hash: 0,
            },
        }
    }

    /// Clear cells, rules and history. The next `progress` reseeds.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.rules = RuleTable::all_die();
        self.stagnation.reset();
        self.last_stats = GenerationStats {
            population: 0,
            hash: 0,
        };
    }

    /// Replace the state with a scripted configuration.
    pub fn seed_with(&mut self, rules: RuleTable, cells: &[[usize; 3]]) {
        self.reset();
        self.rules = rules;
        for &[x, y, z] in cells {
            self.grid.set_cell(x, y, z, true);
        }
        self.last_stats.population = self.grid.population();
    }

    /// Compute one generation and handle extinction or stagnation.
    pub fn progress(&mut self, noise: &mut NoiseGenerator) -> Progress {
        let stats = self.grid.step(&self.rules);
        self.last_stats = stats;

        if stats.population == 0 {
            self.reset();
            let preset = self.reseed(noise);
            return Progress::Reseeded { preset };
        }

        if self.stagnation.observe(stats.hash) || stats.population >= LIFE_POPULATION_CEILING {
            log::debug!(
                "Life frozen at population {} (hash {:#010x})",
                stats.population,
                stats.hash
            );
            self.rules = RuleTable::all_die();
            self.last_stats = self.grid.step(&self.rules);
            return Progress::Frozen;
        }

        Progress::Evolved
    }

    /// Apply the next preset in rotation and scatter its initial population.
    fn reseed(&mut self, noise: &mut NoiseGenerator) -> usize {
        let index = self.next_preset;
        let Some(preset) = self.presets.presets.get(index) else {
            return index;
        };
        self.rules = RuleTable::from_preset(preset);
        let count = pick_count(preset, noise);
        let radius = noise.next_random(preset.radius.0, preset.radius.1);
        let population = self.grid.randomize(count, radius, noise);
        self.last_stats.population = population;
        log::debug!(
            "Life reseeded with {} ({} cells, radius {:.2})",
            preset.name,
            population,
            radius
        );
        self.next_preset = (index + 1) % self.presets.len();
        index
    }

    pub fn grid(&self) -> &LifeGrid {
        &self.grid
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn population(&self) -> u32 {
        self.grid.population()
    }

    pub fn last_stats(&self) -> GenerationStats {
        self.last_stats
    }

    pub fn preset(&self, index: usize) -> Option<&LifePreset> {
        self.presets.presets.get(index)
    }
}

/// Uniform seeding count in the preset's inclusive population range.
fn pick_count(preset: &LifePreset, noise: &mut NoiseGenerator) -> u32 {
    let (lo, hi) = preset.population;
    if hi <= lo {
        return lo;
    }
    lo + noise.next_below(hi - lo + 1)
}
