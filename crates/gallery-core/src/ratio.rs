#![forbid(unsafe_code)]

//! Aspect ratios.
//!
//! An [`AspectRatio`] is intrinsic width divided by intrinsic height. The
//! type guarantees the stored value is finite and strictly positive: any
//! degenerate input (zero, negative, NaN, infinite) collapses to
//! [`AspectRatio::DEFAULT`], a square. Layout code can therefore divide by a
//! ratio sum without checking.

use std::fmt;

/// Width / height of an image's natural pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "f64", into = "f64"))]
pub struct AspectRatio(f64);

impl AspectRatio {
    /// Ratio used when the real one is unknown or unusable.
    pub const DEFAULT: Self = Self(1.0);

    /// Normalize a raw ratio, substituting [`Self::DEFAULT`] for degenerate values.
    #[inline]
    pub fn new(raw: f64) -> Self {
        Self::try_new(raw).unwrap_or(Self::DEFAULT)
    }

    /// Accept a raw ratio only if it is finite and strictly positive.
    #[inline]
    pub fn try_new(raw: f64) -> Option<Self> {
        (raw.is_finite() && raw > 0.0).then_some(Self(raw))
    }

    /// Ratio of a `width x height` pixel grid.
    ///
    /// A zero dimension yields [`Self::DEFAULT`].
    #[inline]
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return Self::DEFAULT;
        }
        Self::new(f64::from(width) / f64::from(height))
    }

    /// The raw value. Always finite and `> 0`.
    #[inline]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Width of an item displayed at `height` pixels.
    #[inline]
    pub fn width_at(self, height: f64) -> f64 {
        self.0 * height
    }

    /// Height of an item displayed at `width` pixels.
    #[inline]
    pub fn height_at(self, width: f64) -> f64 {
        width / self.0
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<f64> for AspectRatio {
    fn from(raw: f64) -> Self {
        Self::new(raw)
    }
}

impl From<AspectRatio> for f64 {
    fn from(ratio: AspectRatio) -> Self {
        ratio.0
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}
