#![forbid(unsafe_code)]

//! Absolute placement of packed rows.
//!
//! Rows stack top to bottom separated by `row_spacing`; items run left to
//! right separated by the gap. Each [`Placement`] carries two boxes: the
//! item's frame (image plus horizontal chrome) and the image size inside it.
//! Positions are accumulated in integer pixels from the rounded sizes so
//! that neighbouring frames never overlap.

use gallery_core::PixelBox;

use crate::LayoutParams;
use crate::packer::Row;
use crate::rounding::{RoundedRow, RoundingMode, round_px, round_row};

/// Where one item lands on the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// Index of the item in the input sequence.
    pub index: usize,
    /// Row number, top to bottom.
    pub row: usize,
    /// Outer box including frame overhead.
    pub frame: PixelBox,
    /// Image width in pixels.
    pub image_width: u32,
    /// Image height in pixels.
    pub image_height: u32,
}

/// A complete pixel layout of the gallery.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GalleryLayout {
    /// Rounded rows, top to bottom.
    pub rows: Vec<RoundedRow>,
    /// One placement per input item, in input order.
    pub placements: Vec<Placement>,
}

impl GalleryLayout {
    /// Height from the top of the first row to the bottom of the last.
    pub fn total_height(&self) -> u32 {
        self.placements
            .iter()
            .map(|p| p.frame.bottom())
            .max()
            .unwrap_or(0)
    }

    /// Widest row extent.
    pub fn total_width(&self) -> u32 {
        self.placements
            .iter()
            .map(|p| p.frame.right())
            .max()
            .unwrap_or(0)
    }

    /// Placement of input item `index`.
    pub fn get(&self, index: usize) -> Option<&Placement> {
        self.placements.get(index).filter(|p| p.index == index)
    }

    /// Item under a point, if any (for click hit-testing).
    pub fn hit_test(&self, x: u32, y: u32) -> Option<usize> {
        self.placements
            .iter()
            .find(|p| p.frame.contains(x, y))
            .map(|p| p.index)
    }

    /// Number of rows.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether there is nothing to draw.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Compute pixel boxes for packed rows.
pub fn place(
    rows: &[Row],
    params: &LayoutParams,
    mode: RoundingMode,
    row_spacing: f64,
) -> GalleryLayout {
    let gap = round_px(params.gap);
    let frame = round_px(params.frame_overhead);
    let spacing = round_px(row_spacing);

    let rounded: Vec<RoundedRow> = rows.iter().map(|row| round_row(row, params, mode)).collect();
    let mut placements = Vec::with_capacity(rounded.iter().map(RoundedRow::len).sum());

    let mut y = 0u32;
    for (row_idx, row) in rounded.iter().enumerate() {
        let mut x = 0u32;
        for (offset, &width) in row.widths.iter().enumerate() {
            let outer = width.saturating_add(frame);
            placements.push(Placement {
                index: row.start + offset,
                row: row_idx,
                frame: PixelBox::new(x, y, outer, row.height),
                image_width: width,
                image_height: row.height,
            });
            x = x.saturating_add(outer).saturating_add(gap);
        }
        y = y.saturating_add(row.height).saturating_add(spacing);
    }

    GalleryLayout {
        rows: rounded,
        placements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack;

    fn layout(ratios: &[f64], params: &LayoutParams, spacing: f64) -> GalleryLayout {
        place(&pack(ratios, params), params, RoundingMode::ExactFill, spacing)
    }

    #[test]
    fn empty_rows_place_nothing() {
        let params = LayoutParams::new(600.0, 200.0);
        let result = place(&[], &params, RoundingMode::Nearest, 24.0);
        assert!(result.is_empty());
        assert_eq!(result.total_height(), 0);
        assert_eq!(result.row_count(), 0);
    }

    #[test]
    fn items_flow_left_to_right_with_gap() {
        let params = LayoutParams::new(600.0, 200.0).with_gap(10.0);
        let result = layout(&[1.0, 1.0], &params, 0.0);
        assert_eq!(result.placements[0].frame, PixelBox::new(0, 0, 200, 200));
        assert_eq!(result.placements[1].frame, PixelBox::new(210, 0, 200, 200));
    }

    #[test]
    fn rows_stack_with_spacing() {
        let params = LayoutParams::new(600.0, 200.0);
        let result = layout(&[1.0; 6], &params, 24.0);
        assert_eq!(result.row_count(), 2);
        assert_eq!(result.placements[3].frame.y, 224);
        assert_eq!(result.placements[3].row, 1);
        assert_eq!(result.total_height(), 424);
        assert_eq!(result.total_width(), 600);
    }

    #[test]
    fn frame_overhead_widens_outer_box() {
        let params = LayoutParams::new(1000.0, 200.0)
            .with_gap(10.0)
            .with_frame_overhead(14.0);
        let result = layout(&[1.0; 8], &params, 0.0);
        let first = result.placements[0];
        assert_eq!(first.frame.width, first.image_width + 14);
        // Stretched first row reaches the container edge exactly.
        let last_in_row = result
            .placements
            .iter()
            .filter(|p| p.row == 0)
            .last()
            .copied()
            .map(|p| p.frame.right());
        assert_eq!(last_in_row, Some(1000));
    }

    #[test]
    fn fractional_gap_still_reaches_container_edge() {
        let params = LayoutParams::new(1000.0, 200.0).with_gap(2.5);
        let result = layout(&[1.0; 8], &params, 0.0);
        let right = result
            .placements
            .iter()
            .filter(|p| p.row == 0)
            .map(|p| p.frame.right())
            .max();
        assert_eq!(result.rows[0].len(), 5);
        assert_eq!(right, Some(1000));
    }

    #[test]
    fn frames_never_overlap() {
        let params = LayoutParams::new(777.0, 180.0).with_gap(6.0);
        let result = layout(&[1.5, 0.66, 1.0, 2.4, 0.75, 1.33, 1.0, 3.2, 0.5], &params, 6.0);
        for (i, a) in result.placements.iter().enumerate() {
            for b in &result.placements[i + 1..] {
                assert!(!a.frame.overlaps(&b.frame), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn hit_test_and_lookup() {
        let params = LayoutParams::new(600.0, 200.0).with_gap(10.0);
        let result = layout(&[1.0, 1.0], &params, 0.0);
        assert_eq!(result.hit_test(5, 5), Some(0));
        assert_eq!(result.hit_test(205, 5), None);
        assert_eq!(result.hit_test(215, 5), Some(1));
        assert_eq!(result.get(1).map(|p| p.frame.x), Some(210));
        assert!(result.get(2).is_none());
    }
}
