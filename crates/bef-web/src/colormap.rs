use std::fmt;
use std::str::FromStr;

use bef_core::errors::{BefError, ErrorInfo};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#rrggbb` form used in SVG attributes.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    fn lerp(self, other: Rgb, frac: f64) -> Rgb {
        let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
        Rgb(
            channel(self.0, other.0),
            channel(self.1, other.1),
            channel(self.2, other.2),
        )
    }
}

const BWR: [Rgb; 3] = [Rgb(0, 0, 255), Rgb(255, 255, 255), Rgb(255, 0, 0)];
const BWR_R: [Rgb; 3] = [Rgb(255, 0, 0), Rgb(255, 255, 255), Rgb(0, 0, 255)];
const PU_OR: [Rgb; 11] = [
    Rgb(0x7f, 0x3b, 0x08),
    Rgb(0xb3, 0x58, 0x06),
    Rgb(0xe0, 0x82, 0x14),
    Rgb(0xfd, 0xb8, 0x63),
    Rgb(0xfe, 0xe0, 0xb6),
    Rgb(0xf7, 0xf7, 0xf7),
    Rgb(0xd8, 0xda, 0xeb),
    Rgb(0xb2, 0xab, 0xd2),
    Rgb(0x80, 0x73, 0xac),
    Rgb(0x54, 0x27, 0x88),
    Rgb(0x2d, 0x00, 0x4b),
];

/// Diverging colormaps with evenly spaced anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Colormap {
    /// Blue, white, red.
    #[serde(rename = "bwr")]
    Bwr,
    /// Red, white, blue.
    #[serde(rename = "bwr_r")]
    BwrR,
    /// Orange, white, purple.
    #[default]
    #[serde(rename = "PuOr")]
    PuOr,
}

impl Colormap {
    /// Every supported colormap.
    pub const ALL: [Colormap; 3] = [Colormap::Bwr, Colormap::BwrR, Colormap::PuOr];

    /// Conventional name.
    pub fn name(self) -> &'static str {
        match self {
            Colormap::Bwr => "bwr",
            Colormap::BwrR => "bwr_r",
            Colormap::PuOr => "PuOr",
        }
    }

    fn anchors(self) -> &'static [Rgb] {
        match self {
            Colormap::Bwr => &BWR,
            Colormap::BwrR => &BWR_R,
            Colormap::PuOr => &PU_OR,
        }
    }

    /// Colour at `t` in `[0, 1]`; out-of-range input is clamped and NaN maps
    /// to the centre.
    pub fn sample(self, t: f64) -> Rgb {
        let anchors = self.anchors();
        let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
        let pos = t * (anchors.len() - 1) as f64;
        let idx = (pos.floor() as usize).min(anchors.len() - 2);
        anchors[idx].lerp(anchors[idx + 1], pos - idx as f64)
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned for unknown colormap names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown colormap '{0}' (expected bwr, bwr_r or PuOr)")]
pub struct ParseColormapError(pub String);

impl FromStr for Colormap {
    type Err = ParseColormapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bwr" => Ok(Colormap::Bwr),
            "bwr_r" | "bwr-r" => Ok(Colormap::BwrR),
            "puor" => Ok(Colormap::PuOr),
            _ => Err(ParseColormapError(s.to_string())),
        }
    }
}

/// Piecewise-linear normalisation sending `vcenter` to 0.5 with independent
/// slopes on either side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TwoSlopeNorm {
    /// Maps to 0.
    pub vmin: f64,
    /// Maps to 0.5.
    pub vcenter: f64,
    /// Maps to 1.
    pub vmax: f64,
}

impl TwoSlopeNorm {
    /// Requires `vmin < vcenter < vmax`, all finite.
    pub fn new(vmin: f64, vcenter: f64, vmax: f64) -> Result<Self, BefError> {
        if !(vmin.is_finite() && vcenter.is_finite() && vmax.is_finite()) {
            return Err(BefError::NonFinite(
                ErrorInfo::new("norm-non-finite", "norm bounds must be finite")
                    .with_context("vmin", vmin)
                    .with_context("vcenter", vcenter)
                    .with_context("vmax", vmax),
            ));
        }
        if vmin >= vcenter || vcenter >= vmax {
            return Err(BefError::Plan(
                ErrorInfo::new("norm-order", "norm requires vmin < vcenter < vmax")
                    .with_context("vmin", vmin)
                    .with_context("vcenter", vcenter)
                    .with_context("vmax", vmax),
            ));
        }
        Ok(Self {
            vmin,
            vcenter,
            vmax,
        })
    }

    /// Norm on `[-limit, limit]` centred at zero. A zero or non-finite limit
    /// falls back to one.
    pub fn symmetric(limit: f64) -> Self {
        let limit = if limit.is_finite() && limit != 0.0 {
            limit.abs()
        } else {
            1.0
        };
        Self {
            vmin: -limit,
            vcenter: 0.0,
            vmax: limit,
        }
    }

    /// Maps `value` into `[0, 1]`.
    pub fn apply(&self, value: f64) -> f64 {
        if value.is_nan() {
            return 0.5;
        }
        let scaled = if value <= self.vcenter {
            0.5 - 0.5 * (self.vcenter - value) / (self.vcenter - self.vmin)
        } else {
            0.5 + 0.5 * (value - self.vcenter) / (self.vmax - self.vcenter)
        };
        scaled.clamp(0.0, 1.0)
    }

    /// Colour for `value` under `cmap`.
    pub fn colour(&self, cmap: Colormap, value: f64) -> Rgb {
        cmap.sample(self.apply(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_and_centre() {
        assert_eq!(Colormap::Bwr.sample(0.0), Rgb(0, 0, 255));
        assert_eq!(Colormap::Bwr.sample(0.5), Rgb(255, 255, 255));
        assert_eq!(Colormap::BwrR.sample(1.0), Rgb(0, 0, 255));
        assert_eq!(Colormap::PuOr.sample(0.5), Rgb(0xf7, 0xf7, 0xf7));
        assert_eq!(Colormap::PuOr.sample(2.0), Rgb(0x2d, 0x00, 0x4b));
        assert_eq!(Colormap::PuOr.sample(f64::NAN), Rgb(0xf7, 0xf7, 0xf7));
    }

    #[test]
    fn norm_slopes_are_independent() {
        let norm = TwoSlopeNorm::new(-1.0, 0.0, 4.0).unwrap();
        assert_eq!(norm.apply(0.0), 0.5);
        assert_eq!(norm.apply(-0.5), 0.25);
        assert_eq!(norm.apply(2.0), 0.75);
        assert_eq!(norm.apply(10.0), 1.0);
        assert_eq!(norm.apply(-10.0), 0.0);
    }
}
