use megacube_core::constants::{LIFE_MAX_NEIGHBORS, LIFE_RULE_COUNT};
use megacube_core::life::LifePreset;

/// What happens to a cell with a given live-neighbor count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fate {
    /// Cell is cleared.
    #[default]
    Die,
    /// Cell keeps its current state.
    Live,
    /// Cell is set alive.
    Birth,
}

/// One fate per neighbor count 0..=26.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleTable {
    fates: [Fate; LIFE_RULE_COUNT],
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::all_die()
    }
}

impl RuleTable {
    pub fn all_die() -> Self {
        Self {
            fates: [Fate::Die; LIFE_RULE_COUNT],
        }
    }

    /// Survive counts become `Live`, then birth counts become `Birth`.
    /// Counts above 26 are ignored.
    pub fn from_preset(preset: &LifePreset) -> Self {
        let mut table = Self::all_die();
        for &count in &preset.survive {
            table.set(count, Fate::Live);
        }
        for &count in &preset.birth {
            table.set(count, Fate::Birth);
        }
        table
    }

    pub fn set(&mut self, count: u8, fate: Fate) {
        if count <= LIFE_MAX_NEIGHBORS {
            self.fates[count as usize] = fate;
        }
    }

    #[inline]
    pub fn fate(&self, count: u8) -> Fate {
        self.fates
            .get(count as usize)
            .copied()
            .unwrap_or(Fate::Die)
    }

    /// True when every count leads to death.
    pub fn is_all_die(&self) -> bool {
        self.fates.iter().all(|f| *f == Fate::Die)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preset(survive: &[u8], birth: &[u8]) -> LifePreset {
        LifePreset {
            name: "test".into(),
            survive: survive.to_vec(),
            birth: birth.to_vec(),
            population: (1, 1),
            radius: (1.0, 1.0),
        }
    }

    #[test]
    fn test_all_die() {
        let table = RuleTable::all_die();
        assert!(table.is_all_die());
        for count in 0..=LIFE_MAX_NEIGHBORS {
            assert_eq!(table.fate(count), Fate::Die);
        }
    }

    #[test]
    fn test_from_preset_5766() {
        let table = RuleTable::from_preset(&preset(&[5, 7], &[6]));
        assert_eq!(table.fate(4), Fate::Die);
        assert_eq!(table.fate(5), Fate::Live);
        assert_eq!(table.fate(6), Fate::Birth);
        assert_eq!(table.fate(7), Fate::Live);
        assert_eq!(table.fate(8), Fate::Die);
        assert!(!table.is_all_die());
    }

    #[test]
    fn test_birth_overrides_survive() {
        let table = RuleTable::from_preset(&preset(&[5], &[5]));
        assert_eq!(table.fate(5), Fate::Birth);
    }

    #[test]
    fn test_out_of_range_count_ignored() {
        let table = RuleTable::from_preset(&preset(&[27, 200], &[]));
        assert!(table.is_all_die());
        assert_eq!(table.fate(200), Fate::Die);
    }
}
