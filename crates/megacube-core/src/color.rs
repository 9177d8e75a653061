use std::ops::{Add, AddAssign};

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::palette::Palette;

/// Gamma 2.8 correction table for 8-bit LED channels.
#[rustfmt::skip]
const GAMMA8: [u8; 256] = [
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   1,   1,   1,   1,
      1,   1,   1,   1,   1,   1,   1,   1,   1,   2,   2,   2,   2,   2,   2,   2,
      2,   3,   3,   3,   3,   3,   3,   3,   4,   4,   4,   4,   4,   5,   5,   5,
      5,   6,   6,   6,   6,   7,   7,   7,   7,   8,   8,   8,   9,   9,   9,  10,
     10,  10,  11,  11,  11,  12,  12,  13,  13,  13,  14,  14,  15,  15,  16,  16,
     17,  17,  18,  18,  19,  19,  20,  20,  21,  21,  22,  22,  23,  24,  24,  25,
     25,  26,  27,  27,  28,  29,  29,  30,  31,  32,  32,  33,  34,  35,  35,  36,
     37,  38,  39,  39,  40,  41,  42,  43,  44,  45,  46,  47,  48,  49,  50,  50,
     51,  52,  54,  55,  56,  57,  58,  59,  60,  61,  62,  63,  64,  66,  67,  68,
     69,  70,  72,  73,  74,  75,  77,  78,  79,  81,  82,  83,  85,  86,  87,  89,
     90,  92,  93,  95,  96,  98,  99, 101, 102, 104, 105, 107, 109, 110, 112, 114,
    115, 117, 119, 120, 122, 124, 126, 127, 129, 131, 133, 135, 137, 138, 140, 142,
    144, 146, 148, 150, 152, 154, 156, 158, 160, 162, 164, 167, 169, 171, 173, 175,
    177, 180, 182, 184, 186, 189, 191, 193, 196, 198, 200, 203, 205, 208, 210, 213,
    215, 218, 220, 223, 225, 228, 231, 233, 236, 239, 241, 244, 247, 249, 252, 255,
];

/// 8-bit RGB color of a single voxel.
///
/// `#[repr(C)]` with three `u8` fields: a `&[Color]` can be viewed as raw
/// bytes (r, g, b, r, g, b, ...) through `bytemuck::cast_slice`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable, Serialize, Deserialize,
)]
#[repr(C)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Scale one channel by `factor / 255`.
#[inline]
fn scale_channel(value: u8, factor: u8) -> u8 {
    ((value as u16 * factor as u16) / 255) as u8
}

/// Move `from` toward `to` by `weight / 255`.
#[inline]
fn blend_channel(from: u8, to: u8, weight: u8) -> u8 {
    let delta = (to as i32 - from as i32) * weight as i32 / 255;
    (from as i32 + delta).clamp(0, 255) as u8
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Look up `hue` in a 256-entry palette. Hue wraps by construction.
    pub fn from_palette(hue: u8, palette: &Palette) -> Self {
        palette.get(hue)
    }

    /// Fully saturated color on the rainbow hue wheel.
    pub fn from_hue(hue: u8) -> Self {
        // Six 43-step sectors: red -> yellow -> green -> cyan -> blue -> magenta -> red.
        let sector = hue / 43;
        let offset = (hue - sector * 43) as u16 * 6;
        let rising = offset.min(255) as u8;
        let falling = 255 - rising;
        match sector {
            0 => Color::new(255, rising, 0),
            1 => Color::new(falling, 255, 0),
            2 => Color::new(0, 255, rising),
            3 => Color::new(0, falling, 255),
            4 => Color::new(rising, 0, 255),
            _ => Color::new(255, 0, falling),
        }
    }

    /// `from` blended toward `to` by `weight`. Equivalent to `from.blend(weight, to)` on a copy.
    pub fn mix(weight: u8, from: Color, to: Color) -> Self {
        let mut c = from;
        c.blend(weight, to);
        c
    }

    /// Blend each channel toward `other`. Weight 0 keeps `self`, 255 yields `other`.
    pub fn blend(&mut self, weight: u8, other: Color) -> &mut Self {
        self.r = blend_channel(self.r, other.r, weight);
        self.g = blend_channel(self.g, other.g, weight);
        self.b = blend_channel(self.b, other.b, weight);
        self
    }

    /// Multiply every channel by `factor / 255`.
    pub fn scale(&mut self, factor: u8) -> &mut Self {
        self.r = scale_channel(self.r, factor);
        self.g = scale_channel(self.g, factor);
        self.b = scale_channel(self.b, factor);
        self
    }

    /// Scaled copy; `self` is untouched.
    pub fn scaled(self, factor: u8) -> Self {
        let mut c = self;
        c.scale(factor);
        c
    }

    /// Per-channel maximum with `other`.
    pub fn maximize(&mut self, other: Color) -> &mut Self {
        self.r = self.r.max(other.r);
        self.g = self.g.max(other.g);
        self.b = self.b.max(other.b);
        self
    }

    /// Apply the fixed gamma table to every channel.
    pub fn gamma(&mut self) -> &mut Self {
        self.r = GAMMA8[self.r as usize];
        self.g = GAMMA8[self.g as usize];
        self.b = GAMMA8[self.b as usize];
        self
    }

    pub fn is_black(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }

    /// Sum of all channels, used for power estimation.
    pub fn channel_sum(&self) -> u32 {
        self.r as u32 + self.g as u32 + self.b as u32
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color::new(
            self.r.saturating_add(rhs.r),
            self.g.saturating_add(rhs.g),
            self.b.saturating_add(rhs.b),
        )
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        *self = *self + rhs;
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::new(r, g, b)
    }
}
