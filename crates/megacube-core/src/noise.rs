//! Seedable random sampling and coherent gradient noise.
//!
//! `NoiseGenerator` is an explicit context object handed to every animation
//! program. Random sampling advances its `StdRng`; the `noise*` functions
//! only read the permutation table built at construction, so they are pure
//! functions of their inputs for a given generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Output scale bringing raw 1D gradient noise into roughly [-1, 1].
const NOISE1_SCALE: f32 = 0.188;
const NOISE2_SCALE: f32 = 0.507;
const NOISE3_SCALE: f32 = 0.936;
const NOISE4_SCALE: f32 = 0.87;

/// Quintic fade curve: zero first and second derivative at the lattice points.
#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f32, a: f32, b: f32) -> f32 {
    a + t * (b - a)
}

#[inline]
fn grad1(hash: u8, x: f32) -> f32 {
    let h = hash & 15;
    let g = 1.0 + (h & 7) as f32;
    if h & 8 != 0 {
        -g * x
    } else {
        g * x
    }
}

#[inline]
fn grad2(hash: u8, x: f32, y: f32) -> f32 {
    let h = hash & 7;
    let (u, v) = if h < 4 { (x, y) } else { (y, x) };
    let u = if h & 1 != 0 { -u } else { u };
    let v = if h & 2 != 0 { -2.0 * v } else { 2.0 * v };
    u + v
}

#[inline]
fn grad3(hash: u8, x: f32, y: f32, z: f32) -> f32 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 != 0 { -u } else { u }) + (if h & 2 != 0 { -v } else { v })
}

#[inline]
fn grad4(hash: u8, x: f32, y: f32, z: f32, w: f32) -> f32 {
    let h = hash & 31;
    let u = if h < 24 { x } else { y };
    let v = if h < 16 { y } else { z };
    let t = if h < 8 { z } else { w };
    (if h & 1 != 0 { -u } else { u })
        + (if h & 2 != 0 { -v } else { v })
        + (if h & 4 != 0 { -t } else { t })
}

/// Integer lattice cell (wrapped to the permutation range) and fractional offset.
#[inline]
fn split(v: f32) -> (usize, f32) {
    let cell = v.floor();
    ((cell as i64 & 255) as usize, v - cell)
}

/// Map raw gradient noise into [0, 1].
#[inline]
fn to_unit(raw: f32, scale: f32) -> f32 {
    (0.5 + 0.5 * raw * scale).clamp(0.0, 1.0)
}

/// Process-wide random and noise source, passed explicitly to clients.
pub struct NoiseGenerator {
    rng: StdRng,
    /// Permutation table, doubled so `perm[i + perm[j]]` never needs wrapping.
    perm: [u8; 512],
    /// Second Box-Muller sample, returned by the next `next_gaussian` call.
    spare_gaussian: Option<f32>,
}

impl NoiseGenerator {
    /// Create a generator whose whole output stream is determined by `seed`.
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut perm = [0u8; 512];
        for (i, p) in perm.iter_mut().take(256).enumerate() {
            *p = i as u8;
        }
        // Fisher-Yates shuffle driven by the seeded generator
        for i in (1..256usize).rev() {
            let j = rng.gen_range(0..=i);
            perm.swap(i, j);
        }
        let (low, high) = perm.split_at_mut(256);
        high.copy_from_slice(low);
        Self {
            rng,
            perm,
            spare_gaussian: None,
        }
    }

    #[inline]
    fn p(&self, index: usize) -> usize {
        self.perm[index & 511] as usize
    }

    /// Uniform sample in [min, max). Returns `min` when the range is empty.
    pub fn next_random(&mut self, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        let t: f32 = self.rng.gen();
        (min + t * (max - min)).min(max)
    }

    /// Uniform integer in [0, n). Returns 0 when `n` is 0.
    pub fn next_below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Uniform random byte.
    pub fn next_u8(&mut self) -> u8 {
        self.rng.gen()
    }

    /// Normally distributed sample (Box-Muller, pairs cached).
    pub fn next_gaussian(&mut self, mean: f32, stddev: f32) -> f32 {
        if let Some(z) = self.spare_gaussian.take() {
            return mean + stddev * z;
        }
        // u1 in (0, 1] keeps ln() finite.
        let u1: f32 = 1.0 - self.rng.gen::<f32>();
        let u2: f32 = self.rng.gen();
        let radius = (-2.0 * u1.ln()).sqrt();
        let angle = std::f32::consts::TAU * u2;
        self.spare_gaussian = Some(radius * angle.sin());
        mean + stddev * radius * angle.cos()
    }

    /// Smooth 1D noise in [0, 1].
    pub fn noise1(&self, x: f32) -> f32 {
        let (ix, fx) = split(x);
        let u = fade(fx);
        let n0 = grad1(self.p(ix) as u8, fx);
        let n1 = grad1(self.p(ix + 1) as u8, fx - 1.0);
        to_unit(lerp(u, n0, n1), NOISE1_SCALE)
    }

    /// Smooth 2D noise in [0, 1].
    pub fn noise2(&self, x: f32, y: f32) -> f32 {
        let (ix, fx) = split(x);
        let (iy, fy) = split(y);
        let (u, v) = (fade(fx), fade(fy));
        let a = self.p(ix) + iy;
        let b = self.p(ix + 1) + iy;
        let raw = lerp(
            v,
            lerp(
                u,
                grad2(self.p(a) as u8, fx, fy),
                grad2(self.p(b) as u8, fx - 1.0, fy),
            ),
            lerp(
                u,
                grad2(self.p(a + 1) as u8, fx, fy - 1.0),
                grad2(self.p(b + 1) as u8, fx - 1.0, fy - 1.0),
            ),
        );
        to_unit(raw, NOISE2_SCALE)
    }

    /// Smooth 3D noise in [0, 1].
    pub fn noise3(&self, x: f32, y: f32, z: f32) -> f32 {
        let (ix, fx) = split(x);
        let (iy, fy) = split(y);
        let (iz, fz) = split(z);
        let (u, v, w) = (fade(fx), fade(fy), fade(fz));

        let corner = |dx: usize, dy: usize, dz: usize| -> f32 {
            let h = self.p(self.p(self.p(ix + dx) + iy + dy) + iz + dz) as u8;
            grad3(h, fx - dx as f32, fy - dy as f32, fz - dz as f32)
        };

        let x00 = lerp(u, corner(0, 0, 0), corner(1, 0, 0));
        let x10 = lerp(u, corner(0, 1, 0), corner(1, 1, 0));
        let x01 = lerp(u, corner(0, 0, 1), corner(1, 0, 1));
        let x11 = lerp(u, corner(0, 1, 1), corner(1, 1, 1));
        let raw = lerp(w, lerp(v, x00, x10), lerp(v, x01, x11));
        to_unit(raw, NOISE3_SCALE)
    }

    /// Smooth 4D noise in [0, 1]. Drives the plasma field.
    pub fn noise4(&self, x: f32, y: f32, z: f32, w: f32) -> f32 {
        let (ix, fx) = split(x);
        let (iy, fy) = split(y);
        let (iz, fz) = split(z);
        let (iw, fw) = split(w);
        let (s, t, r, q) = (fade(fx), fade(fy), fade(fz), fade(fw));

        let corner = |dx: usize, dy: usize, dz: usize, dw: usize| -> f32 {
            let h = self.p(self.p(self.p(self.p(ix + dx) + iy + dy) + iz + dz) + iw + dw) as u8;
            grad4(
                h,
                fx - dx as f32,
                fy - dy as f32,
                fz - dz as f32,
                fw - dw as f32,
            )
        };

        let mut w_layers = [0.0f32; 2];
        for (dw, layer) in w_layers.iter_mut().enumerate() {
            let mut z_layers = [0.0f32; 2];
            for (dz, slab) in z_layers.iter_mut().enumerate() {
                let y0 = lerp(s, corner(0, 0, dz, dw), corner(1, 0, dz, dw));
                let y1 = lerp(s, corner(0, 1, dz, dw), corner(1, 1, dz, dw));
                *slab = lerp(t, y0, y1);
            }
            *layer = lerp(r, z_layers[0], z_layers[1]);
        }
        to_unit(lerp(q, w_layers[0], w_layers[1]), NOISE4_SCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_is_stateful() {
        let mut n = NoiseGenerator::new(7);
        let a = n.next_random(0.0, 1.0);
        let b = n.next_random(0.0, 1.0);
        assert_ne!(a, b);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = NoiseGenerator::new(42);
        let mut b = NoiseGenerator::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_random(-5.0, 5.0), b.next_random(-5.0, 5.0));
            assert_eq!(a.next_gaussian(0.0, 1.0), b.next_gaussian(0.0, 1.0));
        }
        assert_eq!(a.noise4(1.3, 2.7, 0.2, 9.9), b.noise4(1.3, 2.7, 0.2, 9.9));
    }

    #[test]
    fn test_random_range() {
        let mut n = NoiseGenerator::new(1);
        for _ in 0..10_000 {
            let v = n.next_random(-2.0, 3.0);
            assert!((-2.0..=3.0).contains(&v), "out of range: {v}");
        }
        assert_eq!(n.next_random(4.0, 4.0), 4.0);
        assert_eq!(n.next_random(4.0, 1.0), 4.0);
    }

    #[test]
    fn test_next_below() {
        let mut n = NoiseGenerator::new(3);
        assert_eq!(n.next_below(0), 0);
        for _ in 0..1000 {
            assert!(n.next_below(16) < 16);
        }
    }

    #[test]
    fn test_gaussian_moments() {
        let mut n = NoiseGenerator::new(99);
        let samples: Vec<f32> = (0..20_000).map(|_| n.next_gaussian(0.8, 0.1)).collect();
        let mean = samples.iter().sum::<f32>() / samples.len() as f32;
        let var = samples.iter().map(|s| (s - mean).powi(2)).sum::<f32>() / samples.len() as f32;
        assert!((mean - 0.8).abs() < 0.01, "mean {mean}");
        assert!((var.sqrt() - 0.1).abs() < 0.01, "stddev {}", var.sqrt());
    }

    #[test]
    fn test_noise_is_pure() {
        let mut n = NoiseGenerator::new(5);
        let before = n.noise1(12.34);
        let _ = n.next_random(0.0, 1.0);
        assert_eq!(n.noise1(12.34), before);
        assert_eq!(n.noise4(0.1, 0.2, 0.3, 0.4), n.noise4(0.1, 0.2, 0.3, 0.4));
    }

    #[test]
    fn test_noise_range() {
        let n = NoiseGenerator::new(11);
        for i in 0..2000 {
            let x = i as f32 * 0.137 - 100.0;
            for v in [
                n.noise1(x),
                n.noise2(x, x * 0.5),
                n.noise3(x, -x, x * 0.3),
                n.noise4(x, x * 0.7, -x * 0.2, x * 1.1),
            ] {
                assert!((0.0..=1.0).contains(&v), "noise out of range: {v}");
            }
        }
    }

    #[test]
    fn test_noise_is_coherent() {
        let n = NoiseGenerator::new(21);
        for i in 0..500 {
            let x = i as f32 * 0.31;
            let d1 = (n.noise1(x) - n.noise1(x + 0.001)).abs();
            let d4 = (n.noise4(x, 1.0, 2.0, 3.0) - n.noise4(x + 0.001, 1.0, 2.0, 3.0)).abs();
            assert!(d1 < 0.01, "noise1 jumped by {d1} at {x}");
            assert!(d4 < 0.01, "noise4 jumped by {d4} at {x}");
        }
    }

    #[test]
    fn test_noise_lattice_points_are_midpoint() {
        // Gradient noise is zero at integer lattice points.
        let n = NoiseGenerator::new(8);
        assert_eq!(n.noise1(3.0), 0.5);
        assert_eq!(n.noise4(1.0, 2.0, 3.0, 4.0), 0.5);
    }

    #[test]
    fn test_noise_varies() {
        let n = NoiseGenerator::new(13);
        let values: Vec<f32> = (0..50).map(|i| n.noise1(i as f32 * 0.5 + 0.25)).collect();
        let min = values.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = values.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        assert!(max - min > 0.1, "noise is flat: {min}..{max}");
    }
}
