pub mod automaton;
pub mod grid;
pub mod rules;
pub mod stagnation;

#[cfg(test)]
mod test_harness;

pub use automaton::{LifeSim, Progress};
pub use grid::{CellTransition, GenerationStats, LifeGrid};
pub use rules::{Fate, RuleTable};
pub use stagnation::StagnationDetector;
