//! maps a sample to a color depending on the selected `ColorScheme`
//!
//! `color_for` is a pure function, the sample value is always passed in
//! explicitly instead of being read from some per-frame cache.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColorScheme {
    Rainbow,
    Fire,
    Ocean,
    Neon,
    PurpleHaze,

    /// fallback for unknown schemes, plain hue sweep over the index
    HueSweep,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 5] = [
        ColorScheme::Rainbow,
        ColorScheme::Fire,
        ColorScheme::Ocean,
        ColorScheme::Neon,
        ColorScheme::PurpleHaze,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ColorScheme::Rainbow => "rainbow",
            ColorScheme::Fire => "fire",
            ColorScheme::Ocean => "ocean",
            ColorScheme::Neon => "neon",
            ColorScheme::PurpleHaze => "purple",
            ColorScheme::HueSweep => "default",
        }
    }

    /// never fails, unknown names become `HueSweep`
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "rainbow" => ColorScheme::Rainbow,
            "fire" => ColorScheme::Fire,
            "ocean" => ColorScheme::Ocean,
            "neon" => ColorScheme::Neon,
            "purple" | "purple-haze" | "purplehaze" => ColorScheme::PurpleHaze,
            "default" | "hue" => ColorScheme::HueSweep,
            other => {
                log::warn!("unknown color scheme '{}', falling back to hue sweep", other);
                ColorScheme::HueSweep
            }
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        ColorScheme::Rainbow
    }
}

impl FromStr for ColorScheme {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ColorScheme::parse(s))
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// color as produced by the mapper, either in HSL space or as explicit channels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// hue in degrees, saturation and lightness in percent
    Hsl { h: f32, s: f32, l: f32 },
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    pub fn hsl(h: f32, s: f32, l: f32) -> Self {
        Color::Hsl { h, s, l }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    pub fn hue(&self) -> Option<f32> {
        match self {
            Color::Hsl { h, .. } => Some(*h),
            Color::Rgb { .. } => None,
        }
    }

    pub fn lightness(&self) -> Option<f32> {
        match self {
            Color::Hsl { l, .. } => Some(*l),
            Color::Rgb { .. } => None,
        }
    }

    pub fn to_rgba(self) -> Rgba {
        self.with_alpha(1.0)
    }

    pub fn with_alpha(self, a: f32) -> Rgba {
        match self {
            Color::Hsl { h, s, l } => {
                let (r, g, b) = hsl_to_rgb(h, s / 100.0, l / 100.0);
                Rgba::new(r, g, b, a)
            }
            Color::Rgb { r, g, b } => Rgba::new(r, g, b, a),
        }
    }
}

/// straight (not premultiplied) alpha color used for painting
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba { r: 0, g: 0, b: 0, a: 0.0 };
    pub const BLACK: Rgba = Rgba { r: 0, g: 0, b: 0, a: 1.0 };
    pub const WHITE: Rgba = Rgba { r: 255, g: 255, b: 255, a: 1.0 };

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Rgba { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Rgba { a, ..self }
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        color.to_rgba()
    }
}

/// h in degrees, s and l in 0..=1
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (u8, u8, u8) {
    let h = h.rem_euclid(360.0) / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        let v = to_byte(l);
        return (v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    (
        to_byte(hue_to_channel(p, q, h + 1.0 / 3.0)),
        to_byte(hue_to_channel(p, q, h)),
        to_byte(hue_to_channel(p, q, h - 1.0 / 3.0)),
    )
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[inline]
fn to_byte(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// color of sample `index` out of `total` with the given byte value
///
/// out of range input is tolerated: `total` of 0 is treated as 1 and the value is a byte anyway
pub fn color_for(index: usize, total: usize, value: u8, scheme: ColorScheme) -> Color {
    let total = total.max(1);
    let position = index as f32 / total as f32;
    let intensity = value as f32 / 255.0;

    match scheme {
        ColorScheme::Rainbow => Color::hsl(360.0 * position, 100.0, 60.0 + 40.0 * intensity),
        // red to yellow
        ColorScheme::Fire => Color::hsl(60.0 * intensity, 100.0, 50.0 + 40.0 * intensity),
        // cyan to blue
        ColorScheme::Ocean => Color::hsl(180.0 + 60.0 * intensity, 90.0, 50.0 + 40.0 * intensity),
        ColorScheme::Neon => {
            let v = to_byte(intensity);
            match index % 3 {
                0 => Color::rgb(v, 0, v),
                1 => Color::rgb(0, v, v),
                _ => Color::rgb(v, v, 0),
            }
        }
        ColorScheme::PurpleHaze => {
            Color::hsl(270.0 + 60.0 * intensity, 90.0, 50.0 + 40.0 * intensity)
        }
        ColorScheme::HueSweep => Color::hsl(360.0 * position, 100.0, 50.0),
    }
}
