use megacube_core::constants::{STAGNATION_MATCHES, STAGNATION_WINDOW};

/// Ring of recent generation hashes.
///
/// A pattern that keeps revisiting the same fingerprint (still lifes,
/// oscillators) is reported as stagnant once the hash has been seen
/// `STAGNATION_MATCHES` times within the last `STAGNATION_WINDOW` records.
#[derive(Debug, Clone)]
pub struct StagnationDetector {
    hashes: [u32; STAGNATION_WINDOW],
    /// Total hashes recorded since the last reset; the ring slot is `recorded % WINDOW`.
    recorded: usize,
}

impl Default for StagnationDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl StagnationDetector {
    pub fn new() -> Self {
        Self {
            hashes: [0; STAGNATION_WINDOW],
            recorded: 0,
        }
    }

    pub fn reset(&mut self) {
        self.recorded = 0;
    }

    /// Number of occurrences of `hash` currently in the window.
    pub fn occurrences(&self, hash: u32) -> usize {
        let filled = self.recorded.min(STAGNATION_WINDOW);
        self.hashes[..filled].iter().filter(|&&h| h == hash).count()
    }

    /// Returns true when `hash` is stagnant. Otherwise records it and returns false.
    pub fn observe(&mut self, hash: u32) -> bool {
        if self.occurrences(hash) >= STAGNATION_MATCHES {
            return true;
        }
        self.hashes[self.recorded % STAGNATION_WINDOW] = hash;
        self.recorded += 1;
        false
    }

    pub fn recorded(&self) -> usize {
        self.recorded
    }
}
