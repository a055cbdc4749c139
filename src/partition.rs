//! Derivation of boundary pairs from partition parameters and the mapping
//! from boundaries to exported pixel rectangles.

use tracing::{debug, trace};

use crate::boundary::BoundarySet;
use crate::{ParameterError, SmallVecLine, MIN_SLICE};

/// The rule set governing how boundaries are derived from user parameters.
///
/// Sizes are in image pixels and must be at least [`MIN_SLICE`]; counts must
/// be at least 1. The defaults mirror a fresh session: a 200x200 grid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PartitionMode {
    /// Horizontal slices of `row_height`, one column spanning the full width.
    Rows { count: u32, row_height: f64 },
    /// Vertical slices of `col_width`, one row spanning the full height.
    Columns { count: u32, col_width: f64 },
    /// Fixed-step tiling on both axes.
    Grid { block_width: f64, block_height: f64 },
}

impl Default for PartitionMode {
    fn default() -> Self {
        PartitionMode::Grid {
            block_width: 200.0,
            block_height: 200.0,
        }
    }
}

impl PartitionMode {
    /// Whether horizontal boundary lines (Y axis) respond to dragging.
    pub fn drags_y(&self) -> bool {
        matches!(self, PartitionMode::Rows { .. } | PartitionMode::Grid { .. })
    }

    /// Whether vertical boundary lines (X axis) respond to dragging.
    pub fn drags_x(&self) -> bool {
        matches!(
            self,
            PartitionMode::Columns { .. } | PartitionMode::Grid { .. }
        )
    }

    fn validate(&self, width: u32, height: u32) -> Result<(), ParameterError> {
        if width == 0 || height == 0 {
            return Err(ParameterError::InvalidDimensions { width, height });
        }
        match *self {
            PartitionMode::Rows { count, row_height } => {
                check_size("row height", row_height)?;
                check_count(count, row_height, f64::from(height))
            }
            PartitionMode::Columns { count, col_width } => {
                check_size("column width", col_width)?;
                check_count(count, col_width, f64::from(width))
            }
            PartitionMode::Grid {
                block_width,
                block_height,
            } => {
                check_size("block width", block_width)?;
                check_size("block height", block_height)
            }
        }
    }
}

fn check_size(name: &'static str, size: f64) -> Result<(), ParameterError> {
    if !size.is_finite() {
        return Err(ParameterError::NonFinite { name });
    }
    if size < MIN_SLICE {
        return Err(ParameterError::BelowMinimum { name, value: size });
    }
    Ok(())
}

fn check_count(count: u32, size: f64, axis_length: f64) -> Result<(), ParameterError> {
    if count == 0 {
        return Err(ParameterError::ZeroCount);
    }
    if f64::from(count) * size > axis_length + MIN_SLICE {
        return Err(ParameterError::Overflow {
            count,
            size,
            axis_length,
        });
    }
    Ok(())
}

/// Enumeration order for [`Partition::rectangles_in`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ScanOrder {
    /// Left to right, then top to bottom.
    RowMajor,
    /// Top to bottom, then left to right.
    ColumnMajor,
}

/// One exported region in integer pixel coordinates, with its position in the
/// emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rectangle {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub index: usize,
}

/// Aggregate counts for the stats panel collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PartitionSummary {
    pub columns: usize,
    pub rows: usize,
    pub regions: usize,
}

/// A boundary pair for both axes, derived from a [`PartitionMode`].
///
/// Re-deriving replaces the pair wholesale by value; manual drags applied to
/// the previous pair are not carried over.
///
/// # Example
/// ```
/// use gridcut::{Partition, PartitionMode};
///
/// let mode = PartitionMode::Rows {
///     count: 3,
///     row_height: 100.0,
/// };
/// let partition = Partition::derive(mode, 400, 250).unwrap();
///
/// // The final slice absorbs the 50px remainder.
/// assert_eq!(partition.y.positions(), &[0.0, 100.0, 200.0, 250.0]);
/// assert_eq!(partition.x.positions(), &[0.0, 400.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Partition {
    pub mode: PartitionMode,
    /// Vertical boundary lines (cuts along the X axis).
    pub x: BoundarySet,
    /// Horizontal boundary lines (cuts along the Y axis).
    pub y: BoundarySet,
}

impl Partition {
    /// Derives a fresh boundary pair for an image of `width` x `height`.
    ///
    /// Validation happens before anything is built, so a failing call leaves
    /// no partial state behind and the caller keeps its previous boundaries.
    pub fn derive(
        mode: PartitionMode,
        width: u32,
        height: u32,
    ) -> Result<Self, ParameterError> {
        mode.validate(width, height)?;
        trace!(?mode, width, height, "deriving boundary pair");
        let (w, h) = (f64::from(width), f64::from(height));
        let (x, y) = match mode {
            PartitionMode::Rows { count, row_height } => {
                (BoundarySet::full_span(w), counted(h, count, row_height))
            }
            PartitionMode::Columns { count, col_width } => {
                (counted(w, count, col_width), BoundarySet::full_span(h))
            }
            PartitionMode::Grid {
                block_width,
                block_height,
            } => (stepped(w, block_width), stepped(h, block_height)),
        };
        Ok(Partition { mode, x, y })
    }

    /// Rectangles in row-major order: outer loop over Y slices, inner over X
    /// slices.
    pub fn rectangles(&self) -> SmallVecLine<Rectangle> {
        self.rectangles_in(ScanOrder::RowMajor)
    }

    /// Rectangles in the requested enumeration order.
    ///
    /// Coordinates and extents are rounded to whole pixels; a rectangle whose
    /// rounded width or height is not positive is skipped, not an error.
    /// `index` follows emission order starting at 0, so it stays dense even
    /// when something is skipped.
    pub fn rectangles_in(&self, order: ScanOrder) -> SmallVecLine<Rectangle> {
        let mut out = SmallVecLine::new();
        match order {
            ScanOrder::RowMajor => {
                for (y0, y1) in self.y.slice_extents() {
                    for (x0, x1) in self.x.slice_extents() {
                        push_region(&mut out, x0, x1, y0, y1);
                    }
                }
            }
            ScanOrder::ColumnMajor => {
                for (x0, x1) in self.x.slice_extents() {
                    for (y0, y1) in self.y.slice_extents() {
                        push_region(&mut out, x0, x1, y0, y1);
                    }
                }
            }
        }
        out
    }

    /// Slice counts per axis and the resulting region count.
    pub fn summary(&self) -> PartitionSummary {
        PartitionSummary {
            columns: self.x.slice_count(),
            rows: self.y.slice_count(),
            regions: self.rectangles().len(),
        }
    }
}

fn push_region(out: &mut SmallVecLine<Rectangle>, x0: f64, x1: f64, y0: f64, y1: f64) {
    let width = (x1 - x0).round();
    let height = (y1 - y0).round();
    if width <= 0.0 || height <= 0.0 {
        debug!(x0, y0, width, height, "skipping zero-extent rectangle");
        return;
    }
    let index = out.len();
    out.push(Rectangle {
        x: x0.round() as u32,
        y: y0.round() as u32,
        width: width as u32,
        height: height as u32,
        index,
    });
}

/// Boundaries for `count` slices of nominal `size`, clamped so the last
/// interior boundary keeps at least [`MIN_SLICE`] of room before the axis end.
///
/// A clamped boundary that would then crowd its predecessor below the minimum
/// gap is dropped rather than emitted, so the produced set is valid for every
/// parameter set that passes validation.
fn counted(length: f64, count: u32, size: f64) -> BoundarySet {
    let cap = length - MIN_SLICE;
    let mut positions = SmallVecLine::new();
    positions.push(0.0);
    for i in 1..count {
        let value = (f64::from(i) * size).min(cap);
        if value - positions[positions.len() - 1] >= MIN_SLICE {
            positions.push(value);
        }
    }
    positions.push(length);
    BoundarySet::from_positions(positions)
}

/// Fixed-step tiling boundaries: multiples of `step` while they stay clear of
/// the axis end, then the axis length itself. The final slice absorbs the
/// remainder and may be larger or smaller than `step`.
fn stepped(length: f64, step: f64) -> BoundarySet {
    let mut positions = SmallVecLine::new();
    positions.push(0.0);
    let mut k = 1u32;
    loop {
        let value = f64::from(k) * step;
        if value >= length - MIN_SLICE {
            break;
        }
        positions.push(value);
        k += 1;
    }
    positions.push(length);
    BoundarySet::from_positions(positions)
}
