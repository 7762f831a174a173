#![forbid(unsafe_code)]

//! Pixel geometry primitives.

use crate::ratio::AspectRatio;

/// Natural pixel size of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Create new dimensions.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Check if either side is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Aspect ratio, falling back to square for empty dimensions.
    #[inline]
    pub fn aspect_ratio(&self) -> AspectRatio {
        AspectRatio::from_dimensions(self.width, self.height)
    }
}

/// Horizontal decoration drawn around each gallery item.
///
/// This is the padding and border of the clickable frame wrapping an image.
/// Only the horizontal sides matter to the row packer: they are reserved
/// once per item regardless of the item's scaled width.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameChrome {
    pub padding_left: f64,
    pub padding_right: f64,
    pub border_left: f64,
    pub border_right: f64,
}

impl FrameChrome {
    /// No decoration.
    pub const NONE: Self = Self {
        padding_left: 0.0,
        padding_right: 0.0,
        border_left: 0.0,
        border_right: 0.0,
    };

    /// Create chrome with explicit sides.
    pub const fn new(padding_left: f64, padding_right: f64, border_left: f64, border_right: f64) -> Self {
        Self {
            padding_left,
            padding_right,
            border_left,
            border_right,
        }
    }

    /// Same padding and border on both sides.
    pub const fn symmetric(padding: f64, border: f64) -> Self {
        Self::new(padding, padding, border, border)
    }

    /// Total horizontal space consumed per item.
    ///
    /// Sides that are negative or not finite count as zero.
    pub fn horizontal_extent(&self) -> f64 {
        [
            self.padding_left,
            self.padding_right,
            self.border_left,
            self.border_right,
        ]
        .into_iter()
        .map(sanitize_side)
        .sum()
    }
}

#[inline]
fn sanitize_side(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}

/// An integer pixel rectangle on the rendering surface.
///
/// Origin is the top-left corner of the gallery container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelBox {
    /// Left edge (inclusive).
    pub x: u32,
    /// Top edge (inclusive).
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelBox {
    /// Create a new box.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Area in pixels.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Check if the box has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point is inside the box.
    #[inline]
    pub const fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check whether two boxes share any pixel.
    #[inline]
    pub const fn overlaps(&self, other: &PixelBox) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::{Dimensions, FrameChrome, PixelBox};

    #[test]
    fn dimensions_ratio() {
        assert_eq!(Dimensions::new(300, 200).aspect_ratio().get(), 1.5);
        assert!(Dimensions::new(0, 200).is_empty());
        assert_eq!(Dimensions::new(0, 200).aspect_ratio().get(), 1.0);
    }

    #[test]
    fn chrome_extent_sums_horizontal_sides() {
        let chrome = FrameChrome::new(6.0, 6.0, 1.0, 1.0);
        assert_eq!(chrome.horizontal_extent(), 14.0);
        assert_eq!(FrameChrome::symmetric(4.0, 2.0).horizontal_extent(), 12.0);
        assert_eq!(FrameChrome::NONE.horizontal_extent(), 0.0);
    }

    #[test]
    fn chrome_ignores_unparseable_sides() {
        let chrome = FrameChrome::new(f64::NAN, 5.0, -2.0, f64::INFINITY);
        assert_eq!(chrome.horizontal_extent(), 5.0);
    }

    #[test]
    fn box_contains_edges() {
        let b = PixelBox::new(2, 3, 4, 5);
        assert!(b.contains(2, 3));
        assert!(b.contains(5, 7));
        assert!(!b.contains(6, 3));
        assert!(!b.contains(2, 8));
    }

    #[test]
    fn adjacent_boxes_do_not_overlap() {
        let a = PixelBox::new(0, 0, 10, 10);
        let b = PixelBox::new(10, 0, 10, 10);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&PixelBox::new(9, 9, 2, 2)));
    }

    #[test]
    fn area_does_not_overflow() {
        assert_eq!(PixelBox::new(0, 0, u32::MAX, 2).area(), u64::from(u32::MAX) * 2);
    }
}
