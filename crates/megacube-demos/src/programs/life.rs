use megacube_core::constants::CUBE_SIZE;
use megacube_core::life::PresetList;
use megacube_core::{Color, NoiseGenerator};
use megacube_life::{CellTransition, LifeSim};

use crate::{Animation, Frame};

const ALIVE: Color = Color::new(255, 150, 30);
const SPARKLE: Color = Color::new(255, 30, 150);
const DYING: Color = Color::new(150, 0, 0);
const BORN: Color = Color::new(150, 255, 0);

/// 3D life, one generation per two fade intervals.
///
/// The first interval fades every cell from its "from" color to its "to"
/// color for the last transition, the second continues to the settled color;
/// then the next generation is computed.
pub struct Life {
    sim: LifeSim,
    time_phase: f32,
    interval: f32,
}

impl Life {
    pub fn new(presets: PresetList, interval: f32) -> Self {
        Self {
            sim: LifeSim::new(presets),
            time_phase: 0.0,
            interval,
        }
    }

    /// (fade stage, 0..=255 progress within it), or None when a generation is due.
    fn fade_stage(&self) -> Option<(usize, u8)> {
        let interval = self.interval;
        if self.time_phase <= interval {
            Some((0, (255.0 * self.time_phase / interval) as u8))
        } else if self.time_phase <= 2.0 * interval {
            Some((1, (255.0 * (self.time_phase - interval) / interval) as u8))
        } else {
            None
        }
    }
}

/// Color of a cell given its transition, fade stage and progress.
fn cell_color(transition: CellTransition, stage: usize, scale: u8) -> Option<Color> {
    let (from, to) = match (transition, stage) {
        (CellTransition::Alive, 0) => (ALIVE, SPARKLE),
        (CellTransition::Alive, _) => (SPARKLE, ALIVE),
        (CellTransition::Dying, 0) => (ALIVE, DYING),
        (CellTransition::Dying, _) => (DYING, Color::BLACK),
        (CellTransition::Born, 0) => (Color::BLACK, BORN),
        (CellTransition::Born, _) => (BORN, ALIVE),
        (CellTransition::Empty, _) => return None,
    };
    Some(Color::mix(scale, from, to))
}

impl Animation for Life {
    fn name(&self) -> &'static str {
        "Life"
    }

    fn init(&mut self, _noise: &mut NoiseGenerator) {
        self.sim.reset();
        self.time_phase = 0.0;
    }

    fn update(&mut self, dt: f32, frame: &mut Frame<'_>) {
        self.time_phase += dt;
        let (stage, scale) = match self.fade_stage() {
            Some(stage) => stage,
            None => {
                self.time_phase = 0.0;
                self.sim.progress(frame.noise);
                (0, 0)
            }
        };

        let grid = self.sim.grid();
        for x in 0..CUBE_SIZE {
            for y in 0..CUBE_SIZE {
                for z in 0..CUBE_SIZE {
                    if let Some(color) = cell_color(grid.transition(x, y, z), stage, scale) {
                        frame.volume.set_local(x, y, z, color);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_colors() {
        assert_eq!(cell_color(CellTransition::Empty, 0, 100), None);
        assert_eq!(cell_color(CellTransition::Born, 0, 0), Some(Color::BLACK));
        assert_eq!(cell_color(CellTransition::Born, 1, 255), Some(ALIVE));
        assert_eq!(cell_color(CellTransition::Dying, 1, 255), Some(Color::BLACK));
        assert_eq!(cell_color(CellTransition::Alive, 0, 255), Some(SPARKLE));
    }

    #[test]
    fn test_stage_timing() {
        let mut life = Life::new(PresetList::default(), 0.15);
        life.time_phase = 0.075;
        assert_eq!(life.fade_stage().map(|s| s.0), Some(0));
        life.time_phase = 0.2;
        assert_eq!(life.fade_stage().map(|s| s.0), Some(1));
        life.time_phase = 0.31;
        assert_eq!(life.fade_stage(), None);
    }
}
