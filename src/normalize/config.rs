//! Normalizer configuration.

use std::fmt;
use std::str::FromStr;

use image::Rgb;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::image::ICON_SIZE;

/// Default near-white cutoff. Pixels brighter than this on every channel
/// are treated as background.
pub const DEFAULT_THRESHOLD: u8 = 230;

/// Default fraction of the canvas the content occupies.
pub const DEFAULT_SCALE: f64 = 0.85;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color(pub [u8; 3]);

impl Color {
    /// CSS `whitesmoke`, the canvas color of the generated icons.
    pub const WHITE_SMOKE: Self = Self([245, 245, 245]);

    /// Pure white.
    pub const WHITE: Self = Self([255, 255, 255]);

    #[must_use]
    pub const fn rgb(self) -> Rgb<u8> {
        Rgb(self.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE_SMOKE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02X}{g:02X}{b:02X}")
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Accepts `#RRGGBB`, `RRGGBB` or `r,g,b`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.contains(',') {
            let channels: Vec<&str> = s.split(',').map(str::trim).collect();
            let &[r, g, b] = channels.as_slice() else {
                return Err(Error::invalid("color", format!("expected r,g,b, got `{s}`")));
            };
            let channel = |c: &str| {
                c.parse::<u8>()
                    .map_err(|_| Error::invalid("color", format!("channel `{c}` is not 0-255")))
            };
            return Ok(Self([channel(r)?, channel(g)?, channel(b)?]));
        }

        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::invalid("color", format!("expected #RRGGBB, got `{s}`")));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| Error::invalid("color", format!("`{s}` is not a hex color")))
        };
        Ok(Self([channel(0)?, channel(2)?, channel(4)?]))
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "[u32; 2]")]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub const fn square(edge: u32) -> Self {
        Self::new(edge, edge)
    }

    /// The shorter of the two sides.
    #[must_use]
    pub fn min_side(self) -> u32 {
        self.width.min(self.height)
    }
}

impl From<[u32; 2]> for Size {
    fn from([width, height]: [u32; 2]) -> Self {
        Self::new(width, height)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Size {
    type Err = Error;

    /// Accepts `WIDTHxHEIGHT` or a single edge for a square canvas.
    fn from_str(s: &str) -> Result<Self> {
        let parse = |v: &str| {
            v.trim()
                .parse::<u32>()
                .map_err(|_| Error::invalid("size", format!("`{s}` is not WIDTHxHEIGHT")))
        };

        match s.split_once(['x', 'X']) {
            Some((w, h)) => Ok(Self::new(parse(w)?, parse(h)?)),
            None => parse(s).map(Self::square),
        }
    }
}

/// Parameters for one normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizeConfig {
    /// Output canvas dimensions.
    pub target: Size,

    /// Fraction (0.0-1.0] of the canvas' shorter side the content spans.
    pub scale: f64,

    /// Near-white cutoff; pixels strictly above it on all three channels
    /// are cleared.
    ///
    /// A cutoff that clears channels `>= n` is expressed as `n - 1`, so
    /// clearing everything from 235 up means `threshold = 234`.
    pub threshold: u8,

    /// Canvas fill color.
    pub background: Color,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            target: Size::square(ICON_SIZE),
            scale: DEFAULT_SCALE,
            threshold: DEFAULT_THRESHOLD,
            background: Color::WHITE_SMOKE,
        }
    }
}

impl NormalizeConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if self.target.width == 0 || self.target.height == 0 {
            return Err(Error::invalid(
                "target",
                format!("dimensions must be positive, got {}", self.target),
            ));
        }

        if !self.scale.is_finite() || self.scale <= 0.0 || self.scale > 1.0 {
            return Err(Error::invalid(
                "scale",
                "must be greater than 0.0 and at most 1.0",
            ));
        }

        Ok(())
    }
}
