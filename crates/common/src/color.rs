use serde::{Deserialize, Serialize};

/// An RGB colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Convert from hue/saturation/lightness.
    ///
    /// Hue wraps into `[0, 1)`; saturation and lightness are clamped to `[0, 1]`.
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let h = h.rem_euclid(1.0);
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        if s == 0.0 {
            return Self::new(l, l, l);
        }

        let p = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let q = 2.0 * l - p;

        Self {
            r: hue_to_channel(q, p, h + 1.0 / 3.0),
            g: hue_to_channel(q, p, h),
            b: hue_to_channel(q, p, h - 1.0 / 3.0),
        }
    }

    /// Packed `0xRRGGBB`.
    pub fn to_hex(self) -> u32 {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (c(self.r) << 16) | (c(self.g) << 8) | c(self.b)
    }
}

fn hue_to_channel(lo: f32, hi: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return lo + (hi - lo) * 6.0 * t;
    }
    if t < 0.5 {
        return hi;
    }
    if t < 2.0 / 3.0 {
        return lo + (hi - lo) * 6.0 * (2.0 / 3.0 - t);
    }
    lo
}
