use std::time::{SystemTime, UNIX_EPOCH};

use megacube_core::life::PresetList;
use megacube_core::{CubeSettings, NoiseGenerator, PaletteSet};
use megacube_display::{PowerLimiter, RawFrame, VoxelVolume};

use crate::playlist::Playlist;
use crate::{programs, Frame};

/// Renderer boundary: receives every composed frame.
pub trait FrameSink {
    fn present(&mut self, frame: &RawFrame, brightness: f32);
}

/// Owns the volume, generator, palettes and playlist and drives one frame per tick.
pub struct CubeHost {
    volume: VoxelVolume,
    noise: NoiseGenerator,
    palettes: PaletteSet,
    settings: CubeSettings,
    limiter: PowerLimiter,
    playlist: Playlist,
}

/// Elapsed time is untrusted: negative or non-finite values become 0.
fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        0.0
    }
}

fn entropy_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

impl CubeHost {
    /// Host with the built-in program playlist.
    pub fn new(settings: CubeSettings, palettes: PaletteSet, presets: PresetList) -> Self {
        let playlist = programs::default_playlist(presets, settings.life_interval);
        Self::with_playlist(settings, palettes, playlist)
    }

    pub fn with_playlist(settings: CubeSettings, palettes: PaletteSet, playlist: Playlist) -> Self {
        let seed = settings.seed.unwrap_or_else(entropy_seed);
        log::info!("Cube host seeded with {}", seed);
        let mut host = Self {
            volume: VoxelVolume::new(),
            noise: NoiseGenerator::new(seed),
            palettes,
            limiter: PowerLimiter::new(settings.max_milliamps),
            settings,
            playlist,
        };
        host.init_current();
        host
    }

    fn init_current(&mut self) {
        if let Some(program) = self.playlist.current_mut() {
            program.init(&mut self.noise);
            log::info!("Animation: {}", program.name());
        }
    }

    /// Run one frame: update the current program, compose, present.
    pub fn tick(&mut self, dt: f32, sink: &mut dyn FrameSink) {
        let dt = sanitize_dt(dt);
        if let Some(program) = self.playlist.current_mut() {
            let mut frame = Frame {
                volume: &mut self.volume,
                noise: &mut self.noise,
                palettes: &self.palettes,
            };
            program.update(dt, &mut frame);
        }

        let raw = self.volume.advance_frame(self.settings.motion_blur);
        let brightness = self.limiter.apply(raw, self.settings.brightness);
        sink.present(raw, brightness);
    }

    /// Switch to the next program and initialise it.
    pub fn next_program(&mut self) {
        self.playlist.next();
        self.init_current();
    }

    /// Switch to program `index`. Returns false if out of range.
    pub fn select_program(&mut self, index: usize) -> bool {
        if !self.playlist.select(index) {
            log::warn!("No program at index {}", index);
            return false;
        }
        self.init_current();
        true
    }

    /// Re-initialise the current program.
    pub fn reset_program(&mut self) {
        if let Some(program) = self.playlist.current_mut() {
            program.init(&mut self.noise);
            log::info!("Reset: {}", program.name());
        }
    }

    pub fn current_name(&self) -> Option<&'static str> {
        self.playlist.current().map(|p| p.name())
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn volume(&self) -> &VoxelVolume {
        &self.volume
    }

    pub fn settings(&self) -> &CubeSettings {
        &self.settings
    }

    pub fn limiter(&self) -> &PowerLimiter {
        &self.limiter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Animation;
    use glam::Vec3;
    use megacube_core::Color;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<(Vec<u8>, f32)>,
    }

    impl FrameSink for Recorder {
        fn present(&mut self, frame: &RawFrame, brightness: f32) {
            self.frames.push((frame.as_bytes().to_vec(), brightness));
        }
    }

    /// Lights the center voxel and records every dt it sees.
    struct CenterMarker {
        dts: std::rc::Rc<std::cell::RefCell<Vec<f32>>>,
    }

    impl Animation for CenterMarker {
        fn name(&self) -> &'static str {
            "center-marker"
        }
        fn init(&mut self, _noise: &mut NoiseGenerator) {}
        fn update(&mut self, dt: f32, frame: &mut Frame<'_>) {
            self.dts.borrow_mut().push(dt);
            frame.volume.set_world(Vec3::ZERO, Color::RED);
        }
    }

    fn settings() -> CubeSettings {
        CubeSettings {
            motion_blur: 0,
            seed: Some(1),
            ..CubeSettings::default()
        }
    }

    #[test]
    fn test_tick_presents_composed_frame() {
        let dts: std::rc::Rc<std::cell::RefCell<Vec<f32>>> = Default::default();
        let playlist = Playlist::new(vec![Box::new(CenterMarker {
            dts: std::rc::Rc::clone(&dts),
        })]);
        let mut host = CubeHost::with_playlist(settings(), PaletteSet::default(), playlist);
        let mut sink = Recorder::default();
        host.tick(0.016, &mut sink);

        assert_eq!(sink.frames.len(), 1);
        let (bytes, brightness) = &sink.frames[0];
        let lit: Vec<usize> = bytes
            .chunks(3)
            .enumerate()
            .filter(|(_, c)| c.iter().any(|&b| b != 0))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(lit, vec![megacube_display::voxel_index(8, 8, 8)]);
        assert_eq!(*brightness, 1.0);
    }

    #[test]
    fn test_bad_dt_clamped() {
        let dts: std::rc::Rc<std::cell::RefCell<Vec<f32>>> = Default::default();
        let playlist = Playlist::new(vec![Box::new(CenterMarker {
            dts: std::rc::Rc::clone(&dts),
        })]);
        let mut host = CubeHost::with_playlist(settings(), PaletteSet::default(), playlist);
        let mut sink = Recorder::default();
        for dt in [-1.0, f32::NAN, f32::INFINITY, 0.5] {
            host.tick(dt, &mut sink);
        }
        assert_eq!(*dts.borrow(), vec![0.0, 0.0, 0.0, 0.5]);
    }

    #[test]
    fn test_default_playlist_switching() {
        let mut host = CubeHost::new(settings(), PaletteSet::default(), PresetList::default());
        let first = host.current_name();
        assert!(first.is_some());
        host.next_program();
        assert_ne!(host.current_name(), first);
        assert!(host.select_program(0));
        assert_eq!(host.current_name(), first);
        assert!(!host.select_program(host.playlist().len()));
    }

    #[test]
    fn test_empty_playlist_presents_black() {
        let mut host =
            CubeHost::with_playlist(settings(), PaletteSet::default(), Playlist::new(Vec::new()));
        let mut sink = Recorder::default();
        host.tick(0.1, &mut sink);
        assert!(sink.frames[0].0.iter().all(|&b| b == 0));
        assert!(host.current_name().is_none());
    }

    /// Fills the whole volume with white every frame.
    struct Floodlight;

    impl Animation for Floodlight {
        fn name(&self) -> &'static str {
            "floodlight"
        }
        fn init(&mut self, _noise: &mut NoiseGenerator) {}
        fn update(&mut self, _dt: f32, frame: &mut Frame<'_>) {
            frame.volume.radiate(Vec3::ZERO, Color::WHITE, 1000.0);
        }
    }

    #[test]
    fn test_over_budget_frames_are_limited() {
        let settings = CubeSettings {
            max_milliamps: 18_000,
            ..settings()
        };
        let playlist = Playlist::new(vec![Box::new(Floodlight)]);
        let mut host = CubeHost::with_playlist(settings, PaletteSet::default(), playlist);
        let mut sink = Recorder::default();
        for _ in 0..3 {
            host.tick(0.016, &mut sink);
        }
        assert!(host.limiter().is_engaged());
        assert!(sink.frames.iter().all(|(_, b)| *b < 1.0));
    }

    #[test]
    fn test_sanitize_dt() {
        assert_eq!(sanitize_dt(0.25), 0.25);
        assert_eq!(sanitize_dt(-0.25), 0.0);
        assert_eq!(sanitize_dt(f32::NAN), 0.0);
    }
}
