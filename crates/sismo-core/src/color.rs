//! Color primitives shared by the formatter and the renderers.

use serde::{Deserialize, Serialize};

/// An opaque 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` literal.
    pub const fn from_u32(packed: u32) -> Self {
        Self {
            r: ((packed >> 16) & 0xff) as u8,
            g: ((packed >> 8) & 0xff) as u8,
            b: (packed & 0xff) as u8,
        }
    }

    /// Convert HSL (hue in degrees, saturation and lightness in `0.0..=1.0`).
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r1, g1, b1) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;
        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::new(channel(r1), channel(g1), channel(b1))
    }

    /// `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear interpolation towards `other`; `t` is clamped to `0.0..=1.0`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

/// A piecewise-linear continuous color scale.
#[derive(Debug, Clone)]
pub struct ColorScale {
    stops: Vec<(f64, Rgb)>,
}

impl ColorScale {
    /// Build a scale from `(position, color)` stops. Positions must be
    /// ascending within `0.0..=1.0`.
    pub fn new(stops: Vec<(f64, Rgb)>) -> Self {
        Self { stops }
    }

    /// The "Portland" scale: dark blue through yellow to red.
    pub fn portland() -> Self {
        Self::new(vec![
            (0.0, Rgb::new(12, 51, 131)),
            (0.25, Rgb::new(10, 136, 186)),
            (0.5, Rgb::new(242, 211, 56)),
            (0.75, Rgb::new(242, 143, 56)),
            (1.0, Rgb::new(217, 30, 30)),
        ])
    }

    /// Sample the scale at `t` (clamped to `0.0..=1.0`).
    pub fn sample(&self, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let Some(&(_, first)) = self.stops.first() else {
            return Rgb::BLACK;
        };
        let mut previous = (0.0, first);
        for &(position, color) in &self.stops {
            if t <= position {
                let span = position - previous.0;
                if span <= f64::EPSILON {
                    return color;
                }
                return previous.1.lerp(color, (t - previous.0) / span);
            }
            previous = (position, color);
        }
        previous.1
    }

    /// Map `value` from `min..=max` onto the scale. A degenerate range maps
    /// to the scale midpoint.
    pub fn map(&self, value: f64, min: f64, max: f64) -> Rgb {
        if (max - min).abs() <= f64::EPSILON {
            return self.sample(0.5);
        }
        self.sample((value - min) / (max - min))
    }
}
