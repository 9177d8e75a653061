use std::time::Instant;

use megacube_core::constants::HOST_FRAME_DT;
use megacube_core::life::PresetList;
use megacube_core::{CubeSettings, PaletteSet};
use megacube_demos::{CubeHost, FrameSink};
use megacube_display::RawFrame;

/// Timing data for a single benchmark run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TimingSeries {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Result of benchmarking one program.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkResult {
    pub program_name: String,
    pub frame_count: u32,
    pub mean_lit_voxels: f64,
    pub peak_lit_voxels: u32,
    /// Lowest brightness handed to the sink; below the configured value
    /// means the power limiter kicked in.
    pub min_brightness: f32,
    pub timings: TimingSeries,
}

/// Sink that only counts lit voxels and tracks brightness.
#[derive(Debug, Default)]
struct StatsSink {
    lit_total: u64,
    lit_peak: u32,
    min_brightness: Option<f32>,
}

impl FrameSink for StatsSink {
    fn present(&mut self, frame: &RawFrame, brightness: f32) {
        let lit = frame.lit_count() as u32;
        self.lit_total += lit as u64;
        self.lit_peak = self.lit_peak.max(lit);
        self.min_brightness = Some(
            self.min_brightness
                .map_or(brightness, |b: f32| b.min(brightness)),
        );
    }
}

/// Runs every program of the built-in playlist headless at a fixed timestep.
pub struct BenchmarkRunner {
    settings: CubeSettings,
    palettes: PaletteSet,
    presets: PresetList,
    frame_count: u32,
}

impl BenchmarkRunner {
    pub fn new(
        settings: CubeSettings,
        palettes: PaletteSet,
        presets: PresetList,
        frame_count: u32,
    ) -> Self {
        Self {
            settings,
            palettes,
            presets,
            frame_count,
        }
    }

    /// Benchmark every program in playlist order.
    pub fn run_all(&self) -> Vec<BenchmarkResult> {
        let host = self.build_host();
        (0..host.playlist().len())
            .map(|index| self.run_program(index))
            .collect()
    }

    fn build_host(&self) -> CubeHost {
        CubeHost::new(
            self.settings.clone(),
            self.palettes.clone(),
            self.presets.clone(),
        )
    }

    /// Run program `index` on a fresh host and return its timing results.
    pub fn run_program(&self, index: usize) -> BenchmarkResult {
        let mut host = self.build_host();
        host.select_program(index);
        let name = host.current_name().unwrap_or("unknown").to_string();
        log::info!("Running program '{}' for {} frames...", name, self.frame_count);

        let mut sink = StatsSink::default();
        let mut frame_times = Vec::with_capacity(self.frame_count as usize);
        for _ in 0..self.frame_count {
            let frame_start = Instant::now();
            host.tick(HOST_FRAME_DT, &mut sink);
            frame_times.push(frame_start.elapsed().as_secs_f64() * 1000.0);
        }

        let timings = compute_timings(&frame_times);
        log::info!(
            "  Done: mean={:.3}ms, p95={:.3}ms, p99={:.3}ms",
            timings.mean_ms,
            timings.p95_ms,
            timings.p99_ms
        );

        let mean_lit_voxels = if self.frame_count == 0 {
            0.0
        } else {
            sink.lit_total as f64 / self.frame_count as f64
        };

        BenchmarkResult {
            program_name: name,
            frame_count: self.frame_count,
            mean_lit_voxels,
            peak_lit_voxels: sink.lit_peak,
            min_brightness: sink.min_brightness.unwrap_or(self.settings.brightness),
            timings,
        }
    }
}

/// Compute timing statistics from a list of frame times in milliseconds.
pub fn compute_timings(times: &[f64]) -> TimingSeries {
    if times.is_empty() {
        return TimingSeries {
            mean_ms: 0.0,
            median_ms: 0.0,
            p95_ms: 0.0,
            p99_ms: 0.0,
            min_ms: 0.0,
            max_ms: 0.0,
        };
    }

    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let p95_idx = ((n as f64) * 0.95).ceil() as usize;
    let p99_idx = ((n as f64) * 0.99).ceil() as usize;

    TimingSeries {
        mean_ms: mean,
        median_ms: median,
        p95_ms: sorted[p95_idx.min(n - 1)],
        p99_ms: sorted[p99_idx.min(n - 1)],
        min_ms: sorted[0],
        max_ms: sorted[n - 1],
    }
}
