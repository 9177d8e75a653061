/// Scenario tests for the automaton lifecycle.
///
/// These drive `LifeSim` through whole extinction / stagnation cycles with a
/// fixed seed, complementing the per-module unit tests.

#[cfg(test)]
mod tests {
    use megacube_core::constants::STAGNATION_MATCHES;
    use megacube_core::life::{LifePreset, PresetList};
    use megacube_core::NoiseGenerator;

    use crate::automaton::{LifeSim, Progress};
    use crate::rules::{Fate, RuleTable};
    use crate::stagnation::StagnationDetector;

    fn builtin_like() -> PresetList {
        PresetList {
            presets: vec![
                LifePreset {
                    name: "4555".into(),
                    survive: vec![4],
                    birth: vec![5],
                    population: (200, 399),
                    radius: (5.0, 7.0),
                },
                LifePreset {
                    name: "5855".into(),
                    survive: vec![6, 7, 8],
                    birth: vec![5],
                    population: (25, 25),
                    radius: (3.0, 3.0),
                },
            ],
        }
    }

    fn block(origin: usize) -> Vec<[usize; 3]> {
        let mut cells = Vec::new();
        for x in origin..origin + 2 {
            for y in origin..origin + 2 {
                for z in origin..origin + 2 {
                    cells.push([x, y, z]);
                }
            }
        }
        cells
    }

    #[test]
    fn test_extinction_reseeds_next_preset() {
        let mut sim = LifeSim::new(builtin_like());
        let mut noise = NoiseGenerator::new(77);
        assert_eq!(sim.progress(&mut noise), Progress::Reseeded { preset: 0 });

        // Single live cell under all-die rules dies in one generation.
        sim.seed_with(RuleTable::all_die(), &[[8, 8, 8]]);
        assert_eq!(sim.population(), 1);
        assert_eq!(sim.progress(&mut noise), Progress::Reseeded { preset: 1 });
        assert!(sim.population() > 0);
        assert!(sim.population() <= 25);
    }

    #[test]
    fn test_still_life_freezes_then_reseeds() {
        let mut sim = LifeSim::new(builtin_like());
        let mut noise = NoiseGenerator::new(5);
        let mut rules = RuleTable::all_die();
        rules.set(7, Fate::Live);
        sim.seed_with(rules, &block(3));

        for _ in 0..STAGNATION_MATCHES {
            assert_eq!(sim.progress(&mut noise), Progress::Evolved);
            assert_eq!(sim.population(), 8);
        }
        assert_eq!(sim.progress(&mut noise), Progress::Frozen);
        assert_eq!(sim.population(), 0);
        assert!(matches!(
            sim.progress(&mut noise),
            Progress::Reseeded { preset: 0 }
        ));
        assert!(sim.population() > 0);
    }

    #[test]
    fn test_period_two_cycle_detected_within_window() {
        let mut detector = StagnationDetector::new();
        let mut triggered_at = None;
        for generation in 0..256 {
            let hash = if generation % 2 == 0 { 0xAAAA } else { 0x5555 };
            if detector.observe(hash) {
                triggered_at = Some(generation);
                break;
            }
        }
        assert_eq!(triggered_at, Some(2 * STAGNATION_MATCHES));
    }

    #[test]
    fn test_oscillator_freezes_within_window() {
        // Two interleaved halves of a 2x2x2 block. Under birth-on-4 every
        // empty block cell sees all four live ones and each live cell sees
        // only three, so the halves swap every generation.
        let even = [[7, 7, 7], [7, 8, 6], [8, 8, 6], [8, 8, 7]];
        let odd = [[7, 7, 6], [7, 8, 7], [8, 7, 6], [8, 7, 7]];
        let mut rules = RuleTable::all_die();
        rules.set(4, Fate::Birth);

        let mut sim = LifeSim::new(builtin_like());
        let mut noise = NoiseGenerator::new(31);
        sim.seed_with(rules, &even);

        let mut hashes = Vec::new();
        let mut frozen_at = None;
        for generation in 1..=256 {
            match sim.progress(&mut noise) {
                Progress::Evolved => {
                    let expected = if generation % 2 == 1 { &odd } else { &even };
                    assert_eq!(sim.population(), 4, "generation {generation}");
                    for &[x, y, z] in expected {
                        assert!(sim.grid().cell(x, y, z), "generation {generation}");
                    }
                    hashes.push(sim.last_stats().hash);
                }
                Progress::Frozen => {
                    frozen_at = Some(generation);
                    break;
                }
                other => panic!("unexpected {other:?} at generation {generation}"),
            }
        }

        assert_ne!(hashes[0], hashes[1]);
        assert!(hashes.chunks(2).all(|pair| pair == [hashes[0], hashes[1]]));
        assert_eq!(frozen_at, Some(2 * STAGNATION_MATCHES + 1));
        assert_eq!(sim.population(), 0);
        assert_eq!(sim.progress(&mut noise), Progress::Reseeded { preset: 0 });
    }

    #[test]
    fn test_long_run_never_stalls() {
        let mut sim = LifeSim::new(builtin_like());
        let mut noise = NoiseGenerator::new(2024);
        let mut reseeds = 0;
        for _ in 0..600 {
            if let Progress::Reseeded { .. } = sim.progress(&mut noise) {
                reseeds += 1;
            }
            assert!(sim.population() < 16 * 16 * 16);
        }
        assert!(reseeds >= 1);
    }

    #[test]
    fn test_same_seed_same_history() {
        let run = |seed| {
            let mut sim = LifeSim::new(builtin_like());
            let mut noise = NoiseGenerator::new(seed);
            (0..200)
                .map(|_| {
                    sim.progress(&mut noise);
                    sim.last_stats()
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(9), run(9));
    }
}
