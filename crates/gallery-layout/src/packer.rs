#![forbid(unsafe_code)]

//! Greedy justified row packing.
//!
//! # Algorithm
//!
//! **Grouping** is a single forward pass. Items are appended to a pending
//! row while a running ratio sum is kept. After each append the row's width
//! at the target height is estimated:
//!
//! ```text
//! est = Σ ratio · target_row_height + gap · (n − 1) + frame_overhead · n
//! ```
//!
//! The row closes as soon as `est >= container_width` and it holds more than
//! one item. A lone panorama that overshoots on its own therefore stays open
//! and takes the next item with it. Whatever is pending at the end becomes
//! the final row. Closed rows are never revisited.
//!
//! **Sizing** stretches every row except the last:
//!
//! ```text
//! height = (container_width − gap · (n − 1) − frame_overhead · n) / Σ ratio
//! ```
//!
//! The last row keeps `target_row_height`. Each item's width is
//! `ratio · height`. A height that is not finite or falls below
//! [`MIN_ROW_HEIGHT`] is clamped to it and the row is flagged.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | Empty input | Returns no rows |
//! | Container width <= 0 or NaN | Returns no rows (caller skips relayout) |
//! | Degenerate ratio | Treated as 1 |
//! | Overhead >= container width | Height clamped to [`MIN_ROW_HEIGHT`], logged |

use std::ops::Range;

use gallery_core::{AspectRatio, debug, debug_span, warn};

use crate::LayoutParams;

/// Smallest row height the packer will emit, in pixels.
pub const MIN_ROW_HEIGHT: f64 = 1.0;

/// Anything the packer can lay out.
///
/// The packer only reads the ratio; the rest of the item stays opaque.
pub trait Measured {
    /// Intrinsic width / height.
    fn aspect_ratio(&self) -> AspectRatio;
}

impl Measured for AspectRatio {
    #[inline]
    fn aspect_ratio(&self) -> AspectRatio {
        *self
    }
}

impl Measured for f64 {
    #[inline]
    fn aspect_ratio(&self) -> AspectRatio {
        AspectRatio::new(*self)
    }
}

impl<T: Measured + ?Sized> Measured for &T {
    #[inline]
    fn aspect_ratio(&self) -> AspectRatio {
        (**self).aspect_ratio()
    }
}

/// One justified row: a contiguous run of input items sharing a height.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    start: usize,
    ratios: Vec<AspectRatio>,
    widths: Vec<f64>,
    height: f64,
    stretched: bool,
    clamped: bool,
}

impl Row {
    /// Index of the first item in the input sequence.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Input indices covered by this row.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.ratios.len()
    }

    /// Number of items in the row. Never zero.
    #[inline]
    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    /// Always `false`; rows are never emitted empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }

    /// Shared display height.
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Display width of each item, in row order.
    #[inline]
    pub fn widths(&self) -> &[f64] {
        &self.widths
    }

    /// Normalized ratio of each item, in row order.
    #[inline]
    pub fn ratios(&self) -> &[AspectRatio] {
        &self.ratios
    }

    /// Sum of the row's ratios.
    pub fn ratio_sum(&self) -> f64 {
        self.ratios.iter().map(|r| r.get()).sum()
    }

    /// Whether the height was computed to fill the container.
    #[inline]
    pub fn stretched(&self) -> bool {
        self.stretched
    }

    /// Whether the height hit the [`MIN_ROW_HEIGHT`] floor.
    #[inline]
    pub fn clamped(&self) -> bool {
        self.clamped
    }

    /// Total horizontal extent: image widths plus gaps plus frame overhead.
    pub fn outer_width(&self, params: &LayoutParams) -> f64 {
        self.widths.iter().sum::<f64>() + params.reserved_width(self.len())
    }

    /// `(input index, width)` for every item in the row.
    pub fn items(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.widths
            .iter()
            .enumerate()
            .map(move |(offset, &width)| (self.start + offset, width))
    }
}

/// Builder-style front end to [`pack`].
///
/// ```
/// use gallery_layout::RowPacker;
///
/// let rows = RowPacker::new(900.0, 240.0).gap(10.0).pack(&[1.0, 1.0, 1.0]);
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].widths(), &[240.0, 240.0, 240.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowPacker {
    params: LayoutParams,
}

impl RowPacker {
    /// Create a packer for the given container and target row height.
    pub const fn new(container_width: f64, target_row_height: f64) -> Self {
        Self {
            params: LayoutParams::new(container_width, target_row_height),
        }
    }

    /// Create a packer from prepared params.
    pub const fn with_params(params: LayoutParams) -> Self {
        Self { params }
    }

    /// Set the gap between items.
    #[must_use]
    pub const fn gap(mut self, gap: f64) -> Self {
        self.params.gap = gap;
        self
    }

    /// Set the per-item frame overhead.
    #[must_use]
    pub const fn frame_overhead(mut self, frame_overhead: f64) -> Self {
        self.params.frame_overhead = frame_overhead;
        self
    }

    /// The params this packer will use.
    #[inline]
    pub const fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Pack `items` into justified rows.
    pub fn pack<T: Measured>(&self, items: &[T]) -> Vec<Row> {
        pack(items, &self.params)
    }
}

/// Pack `items` into justified rows.
///
/// Pure: the result depends only on the arguments. See the [module
/// docs](self) for the algorithm.
pub fn pack<T: Measured>(items: &[T], params: &LayoutParams) -> Vec<Row> {
    if items.is_empty() {
        return Vec::new();
    }
    if !params.has_usable_container() {
        debug!(
            container_width = params.container_width,
            "skipping pack: container has no usable width"
        );
        return Vec::new();
    }

    let span = debug_span!("pack", items = items.len());
    let _guard = span.enter();

    let ratios: Vec<AspectRatio> = items.iter().map(Measured::aspect_ratio).collect();
    let groups = group_rows(&ratios, params);
    let last = groups.len() - 1;

    let rows: Vec<Row> = groups
        .into_iter()
        .enumerate()
        .map(|(idx, range)| size_row(range.start, &ratios[range], idx == last, params))
        .collect();

    debug!(rows = rows.len(), "packed gallery rows");
    rows
}

/// Greedy row grouping (step one of [`pack`]).
///
/// Returns contiguous, non-empty index ranges covering `0..ratios.len()`.
/// Exposed so callers and tests can inspect row boundaries without sizing.
pub fn group_rows(ratios: &[AspectRatio], params: &LayoutParams) -> Vec<Range<usize>> {
    let mut rows = Vec::new();
    let mut start = 0;
    let mut ratio_sum = 0.0;

    for (idx, ratio) in ratios.iter().enumerate() {
        ratio_sum += ratio.get();
        let len = idx + 1 - start;
        if len > 1 && params.estimated_width(ratio_sum, len) >= params.container_width {
            rows.push(start..idx + 1);
            start = idx + 1;
            ratio_sum = 0.0;
        }
    }
    if start < ratios.len() {
        rows.push(start..ratios.len());
    }

    rows
}

fn size_row(start: usize, ratios: &[AspectRatio], is_last: bool, params: &LayoutParams) -> Row {
    let stretched = !is_last;
    let ratio_sum: f64 = ratios.iter().map(|r| r.get()).sum();

    let raw_height = if stretched {
        let available = params.container_width - params.reserved_width(ratios.len());
        available / ratio_sum
    } else {
        params.target_row_height
    };

    let clamped = !(raw_height.is_finite() && raw_height >= MIN_ROW_HEIGHT);
    let height = if clamped {
        warn!(
            start,
            items = ratios.len(),
            raw_height,
            container_width = params.container_width,
            "row height below floor; container too narrow for gap and frame overhead"
        );
        MIN_ROW_HEIGHT
    } else {
        raw_height
    };

    Row {
        start,
        widths: ratios.iter().map(|r| r.width_at(height)).collect(),
        ratios: ratios.to_vec(),
        height,
        stretched,
        clamped,
    }
}
