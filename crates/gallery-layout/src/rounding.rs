#![forbid(unsafe_code)]

//! Integer pixel rounding for packed rows.
//!
//! Packing runs in `f64` so that rounding error never compounds across the
//! grouping pass. Only the sizes handed to the rendering surface are rounded.
//!
//! [`RoundingMode::Nearest`] rounds every width independently, so a stretched
//! row of `n` items can miss the container edge by up to `n / 2` pixels.
//! [`RoundingMode::ExactFill`] distributes the row's integer image width with
//! the largest remainder method instead, so the right edge lands exactly.

use std::ops::Range;

use crate::LayoutParams;
use crate::packer::Row;

/// How fractional widths become pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundingMode {
    /// Round each dimension to the nearest pixel.
    #[default]
    Nearest,
    /// Stretched rows sum exactly to the container width.
    ExactFill,
}

impl RoundingMode {
    /// Parse `nearest` or `exact` (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "nearest" | "round" => Some(Self::Nearest),
            "exact" | "exact-fill" | "exact_fill" => Some(Self::ExactFill),
            _ => None,
        }
    }
}

/// A row with pixel dimensions ready to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundedRow {
    /// Index of the first item in the input sequence.
    pub start: usize,
    /// Shared height in pixels.
    pub height: u32,
    /// Width of each item in pixels.
    pub widths: Vec<u32>,
    /// Whether the row was stretched to the container width.
    pub stretched: bool,
}

impl RoundedRow {
    /// Input indices covered by this row.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.widths.len()
    }

    /// Number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    /// Always `false` for rows produced by the packer.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Sum of the item widths, excluding gaps and frames.
    pub fn image_width(&self) -> u64 {
        self.widths.iter().map(|&w| u64::from(w)).sum()
    }
}

/// Round a packed row for the rendering surface.
pub fn round_row(row: &Row, params: &LayoutParams, mode: RoundingMode) -> RoundedRow {
    let widths = match mode {
        RoundingMode::ExactFill if row.stretched() && !row.clamped() => {
            round_exact(row.widths(), image_budget(params, row.len()))
        }
        _ => row.widths().iter().map(|&w| round_px(w)).collect(),
    };

    RoundedRow {
        start: row.start(),
        height: round_px(row.height()),
        widths,
        stretched: row.stretched(),
    }
}

/// Integer pixels left for images once a row of `count` items has placed
/// its rounded gaps and frames, as [`place`](crate::place) lays them out.
fn image_budget(params: &LayoutParams, count: usize) -> u32 {
    let count = u32::try_from(count).unwrap_or(u32::MAX);
    let gaps = round_px(params.gap).saturating_mul(count.saturating_sub(1));
    let frames = round_px(params.frame_overhead).saturating_mul(count);
    round_px(params.container_width)
        .saturating_sub(gaps)
        .saturating_sub(frames)
}

/// Round a non-negative value to the nearest pixel, saturating.
///
/// Negative and non-finite values become 0.
#[inline]
pub fn round_px(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

/// Round real-valued targets to integers that sum exactly to `total`.
///
/// Largest remainder method: floor every target, then hand the missing
/// pixels one at a time to the targets with the largest fractional parts,
/// breaking ties by smaller index. Each result is `floor` or `ceil` of its
/// target whenever the targets sum to `total`.
///
/// ```
/// use gallery_layout::round_exact;
///
/// let result = round_exact(&[10.4, 20.6, 9.0], 40);
/// assert_eq!(result, vec![10, 21, 9]);
/// ```
pub fn round_exact(targets: &[f64], total: u32) -> Vec<u32> {
    if targets.is_empty() {
        return Vec::new();
    }

    let floors: Vec<u32> = targets
        .iter()
        .map(|&t| {
            if t.is_finite() && t > 0.0 {
                t.floor().min(f64::from(u32::MAX)) as u32
            } else {
                0
            }
        })
        .collect();
    let floor_sum: u64 = floors.iter().map(|&f| u64::from(f)).sum();

    if floor_sum > u64::from(total) {
        return redistribute_overflow(floors, total);
    }
    let deficit = u64::from(total) - floor_sum;
    if deficit == 0 {
        return floors;
    }

    let mut priority: Vec<(usize, f64)> = targets
        .iter()
        .enumerate()
        .map(|(i, &t)| {
            let remainder = if t.is_finite() { t - f64::from(floors[i]) } else { 0.0 };
            (i, remainder)
        })
        .collect();
    priority.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    let mut result = floors;
    // More than one extra pixel per item means the targets were far from
    // `total`; keep cycling so the sum still holds.
    let n = result.len();
    for step in 0..deficit {
        let (i, _) = priority[(step % n as u64) as usize];
        result[i] = result[i].saturating_add(1);
    }
    result
}

/// Floors already exceed `total`: take pixels from the largest items first.
fn redistribute_overflow(mut values: Vec<u32>, total: u32) -> Vec<u32> {
    let mut sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
    while sum > u64::from(total) {
        let Some((idx, _)) = values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v > 0)
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(&a.0)))
        else {
            break;
        };
        values[idx] -= 1;
        sum -= 1;
    }
    values
}
