#![forbid(unsafe_code)]

//! Justified row layout for photo galleries.
//!
//! This crate turns a sequence of images with known aspect ratios into rows
//! that exactly fill a container width, in the style of Google Photos:
//!
//! - [`pack`] / [`RowPacker`] - greedy row grouping and per-row sizing
//! - [`rounding`] - conversion of fractional sizes to integer pixels
//! - [`placement`] - absolute pixel boxes for every item
//! - [`breakpoint`] - mobile/desktop layout mode selection
//!
//! # Example
//!
//! ```
//! use gallery_layout::{LayoutParams, pack};
//!
//! let params = LayoutParams::new(600.0, 200.0);
//! let rows = pack(&[1.0, 1.0, 1.0, 1.0, 1.0, 1.0], &params);
//!
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[0].range(), 0..3);
//! assert_eq!(rows[0].height(), 200.0);
//! assert!(!rows[1].stretched());
//! ```
//!
//! # Invariants
//!
//! - Rows partition the input in order; no row is ever empty.
//! - Every row except the last is stretched so that its image widths plus
//!   gaps plus frame overhead equal the container width.
//! - The last row keeps the target row height.
//! - Row heights are finite and at least [`MIN_ROW_HEIGHT`].

pub mod breakpoint;
pub mod packer;
pub mod placement;
pub mod rounding;

pub use breakpoint::{Breakpoint, LayoutMode};
pub use gallery_core::{AspectRatio, FrameChrome, PixelBox};
pub use packer::{MIN_ROW_HEIGHT, Measured, Row, RowPacker, group_rows, pack};
pub use placement::{GalleryLayout, Placement, place};
pub use rounding::{RoundedRow, RoundingMode, round_exact, round_row};

use std::fmt;

/// Inputs to a single layout pass.
///
/// All values are in CSS pixels. The container width must be sampled once
/// per pass; the packer never re-reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutParams {
    /// Available horizontal space.
    pub container_width: f64,
    /// Row height before stretching.
    pub target_row_height: f64,
    /// Space between adjacent items in a row.
    pub gap: f64,
    /// Space reserved per item for its frame (padding and border).
    pub frame_overhead: f64,
}

impl LayoutParams {
    /// Params with no gap and no frame overhead.
    pub const fn new(container_width: f64, target_row_height: f64) -> Self {
        Self {
            container_width,
            target_row_height,
            gap: 0.0,
            frame_overhead: 0.0,
        }
    }

    /// Set the gap between items.
    #[must_use]
    pub const fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Set the per-item frame overhead.
    #[must_use]
    pub const fn with_frame_overhead(mut self, frame_overhead: f64) -> Self {
        self.frame_overhead = frame_overhead;
        self
    }

    /// Set the frame overhead from a frame's horizontal chrome.
    #[must_use]
    pub fn with_frame_chrome(self, chrome: &FrameChrome) -> Self {
        self.with_frame_overhead(chrome.horizontal_extent())
    }

    /// Check the preconditions of [`pack`].
    ///
    /// [`pack`] itself never fails; it declines to run on a degenerate
    /// container and tolerates everything else. Callers that want to tell
    /// a misconfiguration apart from an empty gallery call this first.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.container_width.is_finite() && self.container_width > 0.0) {
            return Err(LayoutError::DegenerateContainer {
                width: self.container_width,
            });
        }
        if !(self.target_row_height.is_finite() && self.target_row_height > 0.0) {
            return Err(LayoutError::InvalidTargetHeight {
                height: self.target_row_height,
            });
        }
        for (field, value) in [("gap", self.gap), ("frame_overhead", self.frame_overhead)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(LayoutError::NegativeSpacing { field, value });
            }
        }
        Ok(())
    }

    /// Whether the container can hold a layout at all.
    #[inline]
    pub fn has_usable_container(&self) -> bool {
        self.container_width.is_finite() && self.container_width > 0.0
    }

    /// Horizontal space reserved for gaps and frames in a row of `count` items.
    #[inline]
    pub fn reserved_width(&self, count: usize) -> f64 {
        if count == 0 {
            return 0.0;
        }
        self.gap * (count - 1) as f64 + self.frame_overhead * count as f64
    }

    /// Width of a row of `count` items with the given ratio sum, at target height.
    #[inline]
    pub fn estimated_width(&self, ratio_sum: f64, count: usize) -> f64 {
        ratio_sum * self.target_row_height + self.reserved_width(count)
    }
}

/// Violated layout precondition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutError {
    /// Container width is zero, negative, or not finite.
    DegenerateContainer { width: f64 },
    /// Target row height is zero, negative, or not finite.
    InvalidTargetHeight { height: f64 },
    /// Gap or frame overhead is negative or not finite.
    NegativeSpacing { field: &'static str, value: f64 },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateContainer { width } => {
                write!(f, "container width must be positive, got {width}")
            }
            Self::InvalidTargetHeight { height } => {
                write!(f, "target row height must be positive, got {height}")
            }
            Self::NegativeSpacing { field, value } => {
                write!(f, "{field} must be non-negative, got {value}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}
