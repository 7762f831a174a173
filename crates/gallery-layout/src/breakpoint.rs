#![forbid(unsafe_code)]

//! Desktop/mobile layout selection.
//!
//! Narrow viewports skip row packing entirely and fall back to a simple flow
//! where each image takes the full column width. The switch mirrors a
//! `max-width` media query: a viewport exactly at the threshold is mobile.

use std::fmt;

/// Which layout applies at a given viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutMode {
    /// Mobile: items stack in a flow, the packer is not invoked.
    Flow,
    /// Desktop: justified rows.
    Justified,
}

impl LayoutMode {
    /// Short label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            LayoutMode::Flow => "flow",
            LayoutMode::Justified => "justified",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mobile breakpoint threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Breakpoint {
    /// Widest viewport still treated as mobile, in pixels.
    pub mobile_max_width: f64,
}

impl Breakpoint {
    /// Default threshold: 900 px.
    pub const DEFAULT: Self = Self {
        mobile_max_width: 900.0,
    };

    /// Create a breakpoint with an explicit threshold.
    pub const fn new(mobile_max_width: f64) -> Self {
        Self { mobile_max_width }
    }

    /// Classify a viewport width.
    #[inline]
    pub fn classify(self, viewport_width: f64) -> LayoutMode {
        if viewport_width <= self.mobile_max_width {
            LayoutMode::Flow
        } else {
            LayoutMode::Justified
        }
    }

    /// Whether the viewport counts as mobile.
    #[inline]
    pub fn is_mobile(self, viewport_width: f64) -> bool {
        self.classify(viewport_width) == LayoutMode::Flow
    }

    /// Whether moving between two widths crosses the threshold.
    #[inline]
    pub fn crossed(self, previous_width: f64, next_width: f64) -> bool {
        self.classify(previous_width) != self.classify(next_width)
    }
}

impl Default for Breakpoint {
    fn default() -> Self {
        Self::DEFAULT
    }
}
