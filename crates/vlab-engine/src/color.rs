//! Liquid colors and reaction color ramps.
//!
//! Interpolation is linear per RGB channel, not perceptual — matching how the
//! lab's color transitions are specified.

use serde::de::{self, Deserialize, Deserializer};
use std::fmt;

/// Linear RGB color, channels in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` (or `RRGGBB`) hex string.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
        ))
    }

    /// Linear interpolation toward `other` by `t` in [0, 1].
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        Rgb::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    /// Channel average of a set of colors. Returns None for an empty set.
    pub fn average<I: IntoIterator<Item = Rgb>>(colors: I) -> Option<Rgb> {
        let mut sum = Rgb::default();
        let mut n = 0u32;
        for c in colors {
            sum.r += c.r;
            sum.g += c.g;
            sum.b += c.b;
            n += 1;
        }
        if n == 0 {
            return None;
        }
        let inv = 1.0 / n as f32;
        Some(Rgb::new(sum.r * inv, sum.g * inv, sum.b * inv))
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HexVisitor;

        impl<'de> de::Visitor<'de> for HexVisitor {
            type Value = Rgb;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a #RRGGBB hex color string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Rgb, E> {
                Rgb::from_hex(v)
                    .ok_or_else(|| E::custom(format!("invalid hex color: {v:?}")))
            }
        }

        deserializer.deserialize_str(HexVisitor)
    }
}

/// A one- or two-segment reaction color transition.
///
/// Two-segment ramps (e.g. purple → pink → colorless) split progress at the
/// midpoint: `p <= 0.5` interpolates start→mid over `p/0.5`, `p > 0.5`
/// interpolates mid→end over `(p-0.5)/0.5`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorRamp {
    pub start: Rgb,
    pub mid: Option<Rgb>,
    pub end: Rgb,
}

impl ColorRamp {
    pub fn single(start: Rgb, end: Rgb) -> Self {
        Self {
            start,
            mid: None,
            end,
        }
    }

    pub fn two_segment(start: Rgb, mid: Rgb, end: Rgb) -> Self {
        Self {
            start,
            mid: Some(mid),
            end,
        }
    }

    /// Color at progress `p` in [0, 1].
    pub fn at(&self, p: f32) -> Rgb {
        let p = p.clamp(0.0, 1.0);
        match self.mid {
            None => self.start.lerp(self.end, p),
            Some(mid) => {
                if p <= 0.5 {
                    self.start.lerp(mid, p / 0.5)
                } else {
                    mid.lerp(self.end, (p - 0.5) / 0.5)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parse_with_and_without_hash() {
        let purple = Rgb::from_hex("#800080").unwrap();
        assert!((purple.r - 128.0 / 255.0).abs() < 0.001);
        assert_eq!(purple.g, 0.0);
        assert!((purple.b - 128.0 / 255.0).abs() < 0.001);
        assert_eq!(Rgb::from_hex("FFFFFF"), Some(Rgb::WHITE));
    }

    #[test]
    fn hex_parse_rejects_garbage() {
        assert!(Rgb::from_hex("#80008").is_none());
        assert!(Rgb::from_hex("#gggggg").is_none());
        assert!(Rgb::from_hex("").is_none());
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Rgb::new(0.0, 0.0, 0.0);
        let b = Rgb::new(1.0, 0.5, 0.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        let mid = a.lerp(b, 0.5);
        assert!((mid.r - 0.5).abs() < 0.001);
        assert!((mid.g - 0.25).abs() < 0.001);
    }

    #[test]
    fn average_of_two_colors() {
        let avg = Rgb::average([Rgb::new(1.0, 0.0, 0.0), Rgb::new(0.0, 1.0, 0.0)]).unwrap();
        assert!((avg.r - 0.5).abs() < 0.001);
        assert!((avg.g - 0.5).abs() < 0.001);
        assert_eq!(avg.b, 0.0);
    }

    #[test]
    fn average_of_empty_set_is_none() {
        assert!(Rgb::average([]).is_none());
    }

    #[test]
    fn single_segment_ramp() {
        let ramp = ColorRamp::single(Rgb::new(0.0, 0.0, 0.0), Rgb::new(1.0, 1.0, 1.0));
        let half = ramp.at(0.5);
        assert!((half.r - 0.5).abs() < 0.001);
    }

    #[test]
    fn two_segment_ramp_hits_mid_at_half() {
        let mid = Rgb::new(0.97, 0.66, 0.85); // light pink
        let ramp = ColorRamp::two_segment(Rgb::new(0.6, 0.2, 0.8), mid, Rgb::WHITE);
        assert_eq!(ramp.at(0.5), mid);
        assert_eq!(ramp.at(0.0), ramp.start);
        assert_eq!(ramp.at(1.0), ramp.end);
    }

    #[test]
    fn ramp_clamps_out_of_range_progress() {
        let ramp = ColorRamp::single(Rgb::WHITE, Rgb::new(0.0, 0.0, 0.0));
        assert_eq!(ramp.at(-1.0), ramp.start);
        assert_eq!(ramp.at(2.0), ramp.end);
    }

    #[test]
    fn deserializes_from_hex_string() {
        let c: Rgb = serde_json::from_str("\"#F8A8D8\"").unwrap();
        assert!((c.r - 248.0 / 255.0).abs() < 0.001);
        assert!(serde_json::from_str::<Rgb>("\"oops\"").is_err());
    }
}
