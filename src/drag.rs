//! Interactive boundary dragging.
//!
//! [`DragController`] is a two-state machine (`Idle` and `Dragging`) driven by
//! abstract pointer events in display coordinates. A [`DisplayScale`] converts
//! between display and image space, so the controller is decoupled from any
//! windowing toolkit: it only sees `(x, y)` pairs and a scale factor.

use tracing::trace;

use crate::boundary::BoundarySet;
use crate::partition::Partition;

/// Hit-test tolerance around a boundary line, in display pixels.
pub const HIT_TOLERANCE: f64 = 8.0;

/// The axis a boundary belongs to. `X` boundaries are vertical lines, `Y`
/// boundaries horizontal ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Display-to-image scale factor per axis: `display = image * scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayScale {
    pub x: f64,
    pub y: f64,
}

impl DisplayScale {
    /// Display coordinates equal image coordinates.
    pub const IDENTITY: DisplayScale = DisplayScale { x: 1.0, y: 1.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

impl Default for DisplayScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Cursor affordance reported while hovering, so the surface can show a
/// resize cursor before any drag starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Neutral,
    /// Over a horizontal line: dragging it resizes rows.
    ResizeRow,
    /// Over a vertical line: dragging it resizes columns.
    ResizeColumn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging {
        axis: Axis,
        index: usize,
    },
}

/// Drives one boundary at a time from pointer input.
///
/// `pointer_down` captures the nearest movable boundary within
/// [`HIT_TOLERANCE`], `pointer_move` forwards clamped moves to it, and
/// `pointer_up` (or the pointer leaving the surface) releases it. The
/// captured `(axis, index)` pair is transient state that never outlives the
/// drag.
///
/// # Example
/// ```
/// use gridcut::{DisplayScale, DragController, Partition, PartitionMode};
///
/// let mode = PartitionMode::Rows { count: 3, row_height: 100.0 };
/// let mut partition = Partition::derive(mode, 400, 300).unwrap();
/// let mut drag = DragController::new();
///
/// let scale = DisplayScale::IDENTITY;
/// assert!(drag.pointer_down(&partition, 50.0, 102.0, scale));
/// assert_eq!(drag.pointer_move(&mut partition, 50.0, 130.0, scale), Some(130.0));
/// drag.pointer_up();
///
/// assert_eq!(partition.y.positions(), &[0.0, 130.0, 200.0, 300.0]);
/// ```
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Tries to start a drag at a display-space pointer position.
    ///
    /// Returns whether a boundary was captured. Ignored while a drag is
    /// already active; only one boundary moves at a time.
    pub fn pointer_down(
        &mut self,
        partition: &Partition,
        x: f64,
        y: f64,
        scale: DisplayScale,
    ) -> bool {
        if self.is_dragging() {
            return false;
        }
        match hit_test(partition, x, y, scale) {
            Some((axis, index)) => {
                trace!(?axis, index, "drag started");
                self.state = DragState::Dragging { axis, index };
                true
            }
            None => false,
        }
    }

    /// Forwards a pointer move to the captured boundary.
    ///
    /// The display coordinate is converted to image space through the inverse
    /// scale and handed to [`BoundarySet::move_interior`]; the clamped value
    /// actually applied is returned. While idle this is a no-op returning
    /// `None` (use [`DragController::cursor_hint`] for hover feedback).
    pub fn pointer_move(
        &mut self,
        partition: &mut Partition,
        x: f64,
        y: f64,
        scale: DisplayScale,
    ) -> Option<f64> {
        let DragState::Dragging { axis, index } = self.state else {
            return None;
        };
        let (set, pointer) = match axis {
            Axis::X => (&mut partition.x, x),
            Axis::Y => (&mut partition.y, y),
        };
        let proposed = pointer / scale.along(axis);
        Some(set.move_interior(index, proposed))
    }

    /// Ends the drag. Also the right call when the pointer leaves the
    /// interactive surface; the captured state is simply dropped.
    pub fn pointer_up(&mut self) {
        if self.is_dragging() {
            trace!("drag ended");
        }
        self.state = DragState::Idle;
    }

    /// Cursor affordance for the current pointer position.
    ///
    /// While dragging, reports the captured axis; while idle, this is the
    /// same hit test as `pointer_down` with no state change.
    pub fn cursor_hint(
        &self,
        partition: &Partition,
        x: f64,
        y: f64,
        scale: DisplayScale,
    ) -> CursorHint {
        let axis = match self.state {
            DragState::Dragging { axis, .. } => Some(axis),
            DragState::Idle => hit_test(partition, x, y, scale).map(|(axis, _)| axis),
        };
        match axis {
            Some(Axis::Y) => CursorHint::ResizeRow,
            Some(Axis::X) => CursorHint::ResizeColumn,
            None => CursorHint::Neutral,
        }
    }
}

/// Finds the first movable boundary within [`HIT_TOLERANCE`] of the pointer,
/// scanning only the axes the current mode makes draggable. Y boundaries are
/// scanned before X, so grid mode prefers row handles on ties.
fn hit_test(partition: &Partition, x: f64, y: f64, scale: DisplayScale) -> Option<(Axis, usize)> {
    if partition.mode.drags_y() {
        if let Some(index) = hit_axis(&partition.y, y, scale.y) {
            return Some((Axis::Y, index));
        }
    }
    if partition.mode.drags_x() {
        if let Some(index) = hit_axis(&partition.x, x, scale.x) {
            return Some((Axis::X, index));
        }
    }
    None
}

/// Scans the interior boundaries of one axis in order; first match wins.
fn hit_axis(set: &BoundarySet, pointer: f64, scale: f64) -> Option<usize> {
    let positions = set.positions();
    (1..positions.len().saturating_sub(1))
        .find(|&index| (positions[index] * scale - pointer).abs() <= HIT_TOLERANCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::PartitionMode;
    use pretty_assertions::assert_eq;

    fn rows_partition() -> Partition {
        let mode = PartitionMode::Rows {
            count: 3,
            row_height: 100.0,
        };
        Partition::derive(mode, 400, 300).unwrap()
    }

    fn grid_partition() -> Partition {
        let mode = PartitionMode::Grid {
            block_width: 100.0,
            block_height: 100.0,
        };
        Partition::derive(mode, 300, 300).unwrap()
    }

    #[test]
    fn pointer_down_captures_a_boundary_within_tolerance() {
        let partition = rows_partition();
        let mut drag = DragController::new();

        assert!(drag.pointer_down(&partition, 10.0, 107.5, DisplayScale::IDENTITY));
        assert!(drag.is_dragging());
    }

    #[test]
    fn pointer_down_misses_outside_tolerance() {
        let partition = rows_partition();
        let mut drag = DragController::new();

        assert!(!drag.pointer_down(&partition, 10.0, 120.0, DisplayScale::IDENTITY));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn rows_mode_ignores_vertical_lines() {
        let partition = rows_partition();
        let mut drag = DragController::new();

        // No pointer y near a row boundary; x happens to sit on the axis end,
        // which is not movable anyway.
        assert!(!drag.pointer_down(&partition, 200.0, 50.0, DisplayScale::IDENTITY));
    }

    #[test]
    fn tolerance_is_measured_in_display_pixels() {
        let partition = rows_partition();
        let mut drag = DragController::new();
        // Image is shown at half size: boundary y=100 displays at 50.
        let scale = DisplayScale::new(0.5, 0.5);

        // Both boundaries display at 50 and 100; 75 is 25px from each.
        assert!(!drag.pointer_down(&partition, 10.0, 75.0, scale));
        assert!(drag.pointer_down(&partition, 10.0, 54.0, scale));
    }

    #[test]
    fn grid_mode_prefers_y_boundaries_on_ties() {
        let partition = grid_partition();
        let mut drag = DragController::new();

        // (100, 100) is within tolerance of both a vertical and a horizontal
        // line; scan order picks the horizontal one.
        assert!(drag.pointer_down(&partition, 100.0, 100.0, DisplayScale::IDENTITY));
        assert_eq!(
            drag.cursor_hint(&partition, 100.0, 100.0, DisplayScale::IDENTITY),
            CursorHint::ResizeRow
        );
    }

    #[test]
    fn drag_moves_are_converted_to_image_space_and_clamped() {
        let mut partition = rows_partition();
        let mut drag = DragController::new();
        let scale = DisplayScale::new(0.5, 0.5);

        assert!(drag.pointer_down(&partition, 10.0, 50.0, scale));
        // Display y=20 is image y=40.
        assert_eq!(drag.pointer_move(&mut partition, 10.0, 20.0, scale), Some(40.0));
        // Way past the next boundary: clamps to 200 - MIN_SLICE.
        assert_eq!(drag.pointer_move(&mut partition, 10.0, 400.0, scale), Some(195.0));
        assert_eq!(partition.y.positions(), &[0.0, 195.0, 200.0, 300.0]);
    }

    #[test]
    fn pointer_move_while_idle_mutates_nothing() {
        let mut partition = rows_partition();
        let before = partition.clone();
        let mut drag = DragController::new();

        assert_eq!(
            drag.pointer_move(&mut partition, 10.0, 102.0, DisplayScale::IDENTITY),
            None
        );
        assert_eq!(partition, before);
    }

    #[test]
    fn pointer_down_while_dragging_is_ignored() {
        let partition = rows_partition();
        let mut drag = DragController::new();

        assert!(drag.pointer_down(&partition, 10.0, 100.0, DisplayScale::IDENTITY));
        assert!(!drag.pointer_down(&partition, 10.0, 200.0, DisplayScale::IDENTITY));

        drag.pointer_up();
        assert!(drag.pointer_down(&partition, 10.0, 200.0, DisplayScale::IDENTITY));
    }

    #[test]
    fn hover_reports_affordances_without_capturing() {
        let partition = grid_partition();
        let drag = DragController::new();
        let scale = DisplayScale::IDENTITY;

        assert_eq!(
            drag.cursor_hint(&partition, 100.0, 50.0, scale),
            CursorHint::ResizeColumn
        );
        assert_eq!(
            drag.cursor_hint(&partition, 50.0, 100.0, scale),
            CursorHint::ResizeRow
        );
        assert_eq!(
            drag.cursor_hint(&partition, 50.0, 50.0, scale),
            CursorHint::Neutral
        );
        assert!(!drag.is_dragging());
    }

    #[test]
    fn stale_index_after_a_rederive_is_a_no_op() {
        let mut partition = grid_partition();
        let mut drag = DragController::new();
        let scale = DisplayScale::IDENTITY;

        assert!(drag.pointer_down(&partition, 50.0, 200.0, scale));

        // The pair is replaced wholesale; the captured index now points past
        // the new set's movable range.
        let mode = PartitionMode::Grid {
            block_width: 200.0,
            block_height: 200.0,
        };
        partition = Partition::derive(mode, 300, 300).unwrap();
        let before = partition.clone();

        assert_eq!(drag.pointer_move(&mut partition, 50.0, 20.0, scale), Some(300.0));
        assert_eq!(partition, before);
    }
}
