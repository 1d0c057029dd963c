//! RGBA color type used for strokes and background gradients.
//!
//! Components are straight (non-premultiplied) `f64` values in [0, 1].
//! Serializes as a hex string, `"#rrggbb"` when opaque and `"#rrggbbaa"`
//! otherwise.

use crate::error::EngineError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Straight-alpha RGBA color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    /// Opaque black, the stroke color of every segment.
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `"#rrggbb"` or `"#rrggbbaa"` (leading `#` optional, case insensitive).
    ///
    /// Returns `EngineError::InvalidColor` for any other shape.
    pub fn from_hex(hex: &str) -> Result<Rgba, EngineError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 && hex.len() != 8 {
            return Err(EngineError::InvalidColor(format!(
                "expected 6 or 8 hex digits, got {}",
                hex.len()
            )));
        }
        if !hex.is_ascii() {
            return Err(EngineError::InvalidColor(format!("non-ascii color '{hex}'")));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map(|v| v as f64 / 255.0)
                .map_err(|e| EngineError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        let r = channel(0..2, "red")?;
        let g = channel(2..4, "green")?;
        let b = channel(4..6, "blue")?;
        let a = if hex.len() == 8 {
            channel(6..8, "alpha")?
        } else {
            1.0
        };
        Ok(Rgba { r, g, b, a })
    }

    /// Formats as `"#rrggbb"`, or `"#rrggbbaa"` when alpha is below 1.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// Quantizes to 8-bit channels with rounding.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Builds a color from 8-bit channels.
    pub fn from_rgba8(px: [u8; 4]) -> Self {
        let f = |c: u8| c as f64 / 255.0;
        Self::new(f(px[0]), f(px[1]), f(px[2]), f(px[3]))
    }

    /// Component-wise linear interpolation; `t` is clamped to [0, 1].
    pub fn lerp(self, other: Rgba, t: f64) -> Rgba {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        Rgba {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Composites `self` over `dst` (Porter-Duff source-over, straight alpha).
    pub fn over(self, dst: Rgba) -> Rgba {
        let a = self.a + dst.a * (1.0 - self.a);
        if a <= 0.0 {
            return Rgba::TRANSPARENT;
        }
        let mix = |s: f64, d: f64| (s * self.a + d * dst.a * (1.0 - self.a)) / a;
        Rgba {
            r: mix(self.r, dst.r),
            g: mix(self.g, dst.g),
            b: mix(self.b, dst.b),
            a,
        }
    }

    /// Returns the same color with alpha scaled by `coverage`.
    pub fn with_coverage(self, coverage: f64) -> Rgba {
        Rgba {
            a: self.a * coverage.clamp(0.0, 1.0),
            ..self
        }
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgba::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn from_hex_parses_opaque_color() {
        let c = Rgba::from_hex("#ff8000").unwrap();
        assert!(approx(c.r, 1.0));
        assert!(approx(c.g, 128.0 / 255.0));
        assert!(approx(c.b, 0.0));
        assert!(approx(c.a, 1.0));
    }

    #[test]
    fn from_hex_parses_alpha_channel() {
        let c = Rgba::from_hex("B3000080").unwrap();
        assert!(approx(c.r, 179.0 / 255.0));
        assert!(approx(c.a, 128.0 / 255.0));
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        let err = Rgba::from_hex("#fff").unwrap_err();
        assert!(matches!(err, EngineError::InvalidColor(_)));
    }

    #[test]
    fn from_hex_rejects_non_hex_digits() {
        assert!(Rgba::from_hex("#gg0000").is_err());
    }

    #[test]
    fn from_hex_rejects_multibyte_input() {
        assert!(Rgba::from_hex("#ffé000").is_err());
    }

    #[test]
    fn to_hex_omits_alpha_when_opaque() {
        assert_eq!(Rgba::BLACK.to_hex(), "#000000");
        assert_eq!(Rgba::new(1.0, 0.0, 0.0, 0.5).to_hex(), "#ff000080");
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&Rgba::new(0.0, 1.0, 0.0, 1.0)).unwrap();
        assert_eq!(json, "\"#00ff00\"");
        let back: Rgba = serde_json::from_str("\"#00ff0080\"").unwrap();
        assert!(approx(back.g, 1.0));
        assert!(approx(back.a, 128.0 / 255.0));
    }

    #[test]
    fn serde_rejects_bad_hex() {
        assert!(serde_json::from_str::<Rgba>("\"nope\"").is_err());
    }

    #[test]
    fn lerp_hits_endpoints_and_midpoint() {
        let a = Rgba::new(0.0, 0.0, 0.0, 0.0);
        let b = Rgba::new(1.0, 0.5, 0.25, 1.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        let mid = a.lerp(b, 0.5);
        assert!(approx(mid.r, 0.5) && approx(mid.g, 0.25) && approx(mid.a, 0.5));
    }

    #[test]
    fn lerp_clamps_and_handles_nan() {
        let a = Rgba::BLACK;
        let b = Rgba::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(a.lerp(b, 2.0), b);
        assert_eq!(a.lerp(b, f64::NAN), a);
    }

    #[test]
    fn opaque_source_over_replaces_destination() {
        let dst = Rgba::new(0.9, 0.7, 0.2, 1.0);
        assert_eq!(Rgba::BLACK.over(dst), Rgba::BLACK);
    }

    #[test]
    fn transparent_source_over_keeps_destination() {
        let dst = Rgba::new(0.9, 0.7, 0.2, 0.5);
        let out = Rgba::TRANSPARENT.over(dst);
        assert!(approx(out.r, 0.9) && approx(out.a, 0.5));
    }

    #[test]
    fn half_coverage_black_over_white_is_grey() {
        let white = Rgba::new(1.0, 1.0, 1.0, 1.0);
        let out = Rgba::BLACK.with_coverage(0.5).over(white);
        assert!(approx(out.r, 0.5));
        assert!(approx(out.a, 1.0));
    }

    #[test]
    fn rgba8_round_trip_is_stable() {
        let px = [12, 200, 0, 128];
        assert_eq!(Rgba::from_rgba8(px).to_rgba8(), px);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn component() -> impl Strategy<Value = f64> {
            0.0_f64..=1.0
        }

        proptest! {
            #[test]
            fn over_alpha_never_exceeds_one(
                sa in component(),
                da in component(),
                r in component(),
            ) {
                let src = Rgba::new(r, r, r, sa);
                let dst = Rgba::new(1.0 - r, 0.5, 0.5, da);
                let out = src.over(dst);
                prop_assert!(out.a <= 1.0 + 1e-12, "alpha {}", out.a);
                prop_assert!(out.a + 1e-12 >= sa.max(da), "alpha {} below inputs", out.a);
            }

            #[test]
            fn hex_round_trip_within_quantization(
                r in component(),
                g in component(),
                b in component(),
                a in component(),
            ) {
                let original = Rgba::new(r, g, b, a);
                let back = Rgba::from_hex(&original.to_hex()).unwrap();
                prop_assert!((back.r - r).abs() <= 0.5 / 255.0 + 1e-9);
                prop_assert!((back.g - g).abs() <= 0.5 / 255.0 + 1e-9);
                prop_assert!((back.b - b).abs() <= 0.5 / 255.0 + 1e-9);
                prop_assert!((back.a - a).abs() <= 0.5 / 255.0 + 1e-9);
            }
        }
    }
}
