use std::f32::consts::TAU;

use megacube_core::constants::{CUBE_CENTER, CUBE_SIZE, LATTICE_OUT_OF_RANGE_MASK};
use megacube_core::NoiseGenerator;

use crate::rules::{Fate, RuleTable};

/// One column of cells along z, bit `z` set = alive.
type Column = u16;

/// Result of one generation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationStats {
    /// Live cells after the step.
    pub population: u32,
    /// Neighbor-count fingerprint of the pre-step grid, used to spot cycles.
    pub hash: u32,
}

/// How a cell changed over the last step. Drives the fade renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellTransition {
    /// Alive before and after.
    Alive,
    /// Alive before, dead now.
    Dying,
    /// Dead before, alive now.
    Born,
    /// Dead before and after.
    Empty,
}

impl CellTransition {
    pub fn from_states(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (true, true) => CellTransition::Alive,
            (true, false) => CellTransition::Dying,
            (false, true) => CellTransition::Born,
            (false, false) => CellTransition::Empty,
        }
    }
}

/// 16x16x16 toroidal life grid, two generations deep.
///
/// Columns are indexed `[x][y]` with one bit per z. `previous` holds the
/// generation before the last `step`; `current` holds the newest one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifeGrid {
    previous: [[Column; CUBE_SIZE]; CUBE_SIZE],
    current: [[Column; CUBE_SIZE]; CUBE_SIZE],
}

impl Default for LifeGrid {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn in_lattice(x: usize, y: usize, z: usize) -> bool {
    (x | y | z) & LATTICE_OUT_OF_RANGE_MASK == 0
}

#[inline]
fn wrap(v: i32) -> usize {
    v.rem_euclid(CUBE_SIZE as i32) as usize
}

impl LifeGrid {
    pub fn new() -> Self {
        Self {
            previous: [[0; CUBE_SIZE]; CUBE_SIZE],
            current: [[0; CUBE_SIZE]; CUBE_SIZE],
        }
    }

    /// Kill every cell in both generations.
    pub fn clear(&mut self) {
        self.previous = [[0; CUBE_SIZE]; CUBE_SIZE];
        self.current = [[0; CUBE_SIZE]; CUBE_SIZE];
    }

    /// Set a cell in the current generation. Out-of-range coordinates are ignored.
    pub fn set_cell(&mut self, x: usize, y: usize, z: usize, alive: bool) {
        if !in_lattice(x, y, z) {
            return;
        }
        if alive {
            self.current[x][y] |= 1 << z;
        } else {
            self.current[x][y] &= !(1 << z);
        }
    }

    pub fn cell(&self, x: usize, y: usize, z: usize) -> bool {
        in_lattice(x, y, z) && self.current[x][y] & (1 << z) != 0
    }

    pub fn previous_cell(&self, x: usize, y: usize, z: usize) -> bool {
        in_lattice(x, y, z) && self.previous[x][y] & (1 << z) != 0
    }

    pub fn transition(&self, x: usize, y: usize, z: usize) -> CellTransition {
        CellTransition::from_states(self.previous_cell(x, y, z), self.cell(x, y, z))
    }

    /// Live cells in the current generation.
    pub fn population(&self) -> u32 {
        self.current
            .iter()
            .flatten()
            .map(|column| column.count_ones())
            .sum()
    }

    /// Live neighbors of (x, y, z) in the previous generation, wrapping at the edges.
    fn count_neighbors(&self, x: usize, y: usize, z: usize) -> u8 {
        let mut count = 0u8;
        for dx in -1i32..=1 {
            for dy in -1i32..=1 {
                let column = self.previous[wrap(x as i32 + dx)][wrap(y as i32 + dy)];
                for dz in -1i32..=1 {
                    if dx == 0 && dy == 0 && dz == 0 {
                        continue;
                    }
                    if column & (1 << wrap(z as i32 + dz)) != 0 {
                        count += 1;
                    }
                }
            }
        }
        count
    }

    /// Advance one generation under `rules`.
    pub fn step(&mut self, rules: &RuleTable) -> GenerationStats {
        self.previous = self.current;
        let mut population = 0u32;
        let mut hash = 0u32;

        for x in 0..CUBE_SIZE {
            for y in 0..CUBE_SIZE {
                let mut column = self.previous[x][y];
                for z in 0..CUBE_SIZE {
                    let count = self.count_neighbors(x, y, z);
                    let weight = (3 * x + 5 * y + 7 * z) as u32;
                    hash = hash.wrapping_add(count as u32 * weight);
                    match rules.fate(count) {
                        Fate::Die => column &= !(1 << z),
                        Fate::Birth => column |= 1 << z,
                        Fate::Live => {}
                    }
                }
                population += column.count_ones();
                self.current[x][y] = column;
            }
        }

        GenerationStats { population, hash }
    }

    /// Replace the current generation with `count` random cells scattered in a
    /// sphere of `radius` around the lattice center. Returns the population.
    ///
    /// Attempts that round outside the lattice are dropped and duplicates
    /// collapse, so the result may be below `count`.
    pub fn randomize(&mut self, count: u32, radius: f32, noise: &mut NoiseGenerator) -> u32 {
        self.current = [[0; CUBE_SIZE]; CUBE_SIZE];
        for _ in 0..count {
            let r = noise.next_random(0.0, radius);
            let theta = noise.next_random(0.0, TAU);
            let psi = noise.next_random(0.0, TAU);
            let x = (CUBE_CENTER + r * psi.sin() * theta.cos()).round();
            let y = (CUBE_CENTER + r * psi.sin() * theta.sin()).round();
            let z = (CUBE_CENTER + r * psi.cos()).round();
            if x < 0.0 || y < 0.0 || z < 0.0 {
                continue;
            }
            self.set_cell(x as usize, y as usize, z as usize, true);
        }
        self.population()
    }
}
