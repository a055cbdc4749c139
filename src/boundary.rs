//! Ordered boundary coordinates for a single axis.
//!
//! A [`BoundarySet`] is the sequence `[0, b1, .., bn, L]` where `L` is the
//! axis length. The endpoints are pinned, the interior points are strictly
//! increasing, and every gap is at least [`MIN_SLICE`]. All mutation goes
//! through [`BoundarySet::move_interior`], which clamps instead of failing so
//! the invariants hold continuously during a drag.

use tracing::trace;

use crate::{BoundaryError, SmallVecLine, MIN_SLICE};

/// Slice boundaries along one axis, endpoints included.
///
/// # Example
/// ```
/// use gridcut::BoundarySet;
///
/// let set = BoundarySet::new(300.0, &[100.0, 200.0]).unwrap();
/// assert_eq!(set.slice_count(), 3);
/// assert_eq!(set.positions(), &[0.0, 100.0, 200.0, 300.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BoundarySet {
    positions: SmallVecLine<f64>,
}

impl BoundarySet {
    /// Creates the trivial set `[0, length]`: one slice spanning the whole
    /// axis.
    pub fn full_span(length: f64) -> Self {
        debug_assert!(length > 0.0 && length.is_finite());
        let mut positions = SmallVecLine::new();
        positions.push(0.0);
        positions.push(length);
        Self { positions }
    }

    /// Builds a set from interior points strictly within `(0, length)`.
    ///
    /// The points must be strictly increasing and keep every gap, including
    /// the gaps against the implicit `0` and `length` endpoints, at or above
    /// [`MIN_SLICE`].
    pub fn new(length: f64, interior: &[f64]) -> Result<Self, BoundaryError> {
        if !(length > 0.0 && length.is_finite()) {
            return Err(BoundaryError::InvalidLength { length });
        }

        let mut positions = SmallVecLine::new();
        positions.push(0.0);
        for (i, &value) in interior.iter().enumerate() {
            // Index as it will appear in the assembled set.
            let index = i + 1;
            if !value.is_finite() {
                return Err(BoundaryError::NonFinite { index });
            }
            if value <= 0.0 || value >= length {
                return Err(BoundaryError::OutOfRange {
                    index,
                    value,
                    length,
                });
            }
            let previous = positions[positions.len() - 1];
            if value <= previous {
                return Err(BoundaryError::NotIncreasing {
                    index,
                    value,
                    previous,
                });
            }
            let gap = value - previous;
            if gap < MIN_SLICE {
                return Err(BoundaryError::GapBelowMinimum { index, gap });
            }
            positions.push(value);
        }

        let closing_gap = length - positions[positions.len() - 1];
        if !interior.is_empty() && closing_gap < MIN_SLICE {
            return Err(BoundaryError::GapBelowMinimum {
                index: positions.len(),
                gap: closing_gap,
            });
        }
        positions.push(length);
        Ok(Self { positions })
    }

    /// Wraps positions already known to satisfy the invariants (the derivation
    /// paths construct them that way).
    pub(crate) fn from_positions(positions: SmallVecLine<f64>) -> Self {
        debug_assert!(positions.len() >= 2);
        debug_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        Self { positions }
    }

    /// The axis length, i.e. the last boundary.
    pub fn length(&self) -> f64 {
        self.positions[self.positions.len() - 1]
    }

    /// All boundary positions, endpoints included.
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// The movable boundaries, endpoints excluded.
    pub fn interior(&self) -> &[f64] {
        &self.positions[1..self.positions.len() - 1]
    }

    /// Number of slices between consecutive boundaries.
    pub fn slice_count(&self) -> usize {
        self.positions.len() - 1
    }

    /// Whether `index` addresses a movable (non-endpoint) boundary.
    pub fn is_interior(&self, index: usize) -> bool {
        index > 0 && index + 1 < self.positions.len()
    }

    /// Lazy `(start, end)` pairs for each slice, recomputed from the current
    /// positions on every call.
    ///
    /// # Example
    /// ```
    /// use gridcut::BoundarySet;
    ///
    /// let set = BoundarySet::new(300.0, &[100.0]).unwrap();
    /// let extents: Vec<_> = set.slice_extents().collect();
    /// assert_eq!(extents, vec![(0.0, 100.0), (100.0, 300.0)]);
    /// ```
    pub fn slice_extents(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.positions.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Moves an interior boundary toward `proposed`, clamping into
    /// `[prev + MIN_SLICE, next - MIN_SLICE]`, and returns the value actually
    /// applied.
    ///
    /// Clamping is deliberate: a drag that overshoots sticks to the nearest
    /// valid position rather than being rejected. Addressing an endpoint is a
    /// no-op that returns the endpoint's current value.
    ///
    /// # Example
    /// ```
    /// use gridcut::BoundarySet;
    ///
    /// let mut set = BoundarySet::new(300.0, &[100.0, 200.0]).unwrap();
    /// assert_eq!(set.move_interior(1, 5.0), 5.0);
    /// assert_eq!(set.move_interior(1, 296.0), 195.0);
    /// ```
    pub fn move_interior(&mut self, index: usize, proposed: f64) -> f64 {
        if !self.is_interior(index) {
            return self
                .positions
                .get(index)
                .copied()
                .unwrap_or_else(|| self.length());
        }
        let lo = self.positions[index - 1] + MIN_SLICE;
        let hi = self.positions[index + 1] - MIN_SLICE;
        // lo <= hi holds because both neighboring gaps are >= MIN_SLICE.
        let applied = proposed.max(lo).min(hi);
        trace!(index, proposed, applied, "moving interior boundary");
        self.positions[index] = applied;
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn full_span_has_a_single_slice() {
        let set = BoundarySet::full_span(250.0);
        assert_eq!(set.positions(), &[0.0, 250.0]);
        assert_eq!(set.slice_count(), 1);
        assert_eq!(set.interior(), &[] as &[f64]);
        assert_eq!(set.length(), 250.0);
    }

    #[test]
    fn new_accepts_sorted_interior_points() {
        let set = BoundarySet::new(250.0, &[100.0, 200.0]).unwrap();
        assert_eq!(set.positions(), &[0.0, 100.0, 200.0, 250.0]);
        assert_eq!(set.slice_count(), 3);
    }

    #[test]
    fn new_rejects_unsorted_points() {
        let err = BoundarySet::new(250.0, &[200.0, 100.0]).unwrap_err();
        assert_eq!(
            err,
            BoundaryError::NotIncreasing {
                index: 2,
                value: 100.0,
                previous: 200.0,
            }
        );
    }

    #[test]
    fn new_rejects_points_outside_the_axis() {
        let err = BoundarySet::new(250.0, &[300.0]).unwrap_err();
        assert_eq!(
            err,
            BoundaryError::OutOfRange {
                index: 1,
                value: 300.0,
                length: 250.0,
            }
        );
    }

    #[test]
    fn new_rejects_gaps_below_the_minimum() {
        // 3px from the leading endpoint.
        let err = BoundarySet::new(250.0, &[3.0]).unwrap_err();
        assert_eq!(err, BoundaryError::GapBelowMinimum { index: 1, gap: 3.0 });

        // 2px from the trailing endpoint.
        let err = BoundarySet::new(250.0, &[248.0]).unwrap_err();
        assert_eq!(err, BoundaryError::GapBelowMinimum { index: 2, gap: 2.0 });
    }

    #[test]
    fn new_rejects_non_finite_input() {
        let err = BoundarySet::new(250.0, &[f64::NAN]).unwrap_err();
        assert_eq!(err, BoundaryError::NonFinite { index: 1 });

        let err = BoundarySet::new(f64::INFINITY, &[]).unwrap_err();
        assert_eq!(
            err,
            BoundaryError::InvalidLength {
                length: f64::INFINITY
            }
        );
    }

    #[test]
    fn move_interior_clamps_against_both_neighbors() {
        let mut set = BoundarySet::new(300.0, &[100.0, 200.0]).unwrap();

        // Toward the leading endpoint: clamps to 0 + MIN_SLICE.
        assert_eq!(set.move_interior(1, 5.0), 5.0);
        assert_eq!(set.positions(), &[0.0, 5.0, 200.0, 300.0]);

        // Toward the next boundary: clamps to 200 - MIN_SLICE.
        assert_eq!(set.move_interior(1, 296.0), 195.0);
        assert_eq!(set.positions(), &[0.0, 195.0, 200.0, 300.0]);
    }

    #[test]
    fn move_interior_is_idempotent_for_a_repeated_proposal() {
        let mut set = BoundarySet::new(300.0, &[100.0, 200.0]).unwrap();
        let first = set.move_interior(1, 296.0);
        let second = set.move_interior(1, 296.0);
        assert_eq!(first, second);
        assert_eq!(second, 195.0);
    }

    #[test]
    fn endpoints_are_never_movable() {
        let mut set = BoundarySet::new(300.0, &[100.0]).unwrap();
        assert_eq!(set.move_interior(0, 50.0), 0.0);
        assert_eq!(set.move_interior(2, 50.0), 300.0);
        // Out-of-range index reports the axis length, mutating nothing.
        assert_eq!(set.move_interior(9, 50.0), 300.0);
        assert_eq!(set.positions(), &[0.0, 100.0, 300.0]);
    }

    #[test]
    fn slice_extents_restart_from_current_state() {
        let mut set = BoundarySet::new(300.0, &[100.0, 200.0]).unwrap();
        let before: Vec<_> = set.slice_extents().collect();
        assert_eq!(before, vec![(0.0, 100.0), (100.0, 200.0), (200.0, 300.0)]);

        set.move_interior(1, 150.0);
        let after: Vec<_> = set.slice_extents().collect();
        assert_eq!(after, vec![(0.0, 150.0), (150.0, 200.0), (200.0, 300.0)]);
    }

    /// Interior points built from gaps so every candidate set is valid.
    fn interior_points() -> impl Strategy<Value = (f64, Vec<f64>)> {
        prop::collection::vec(5u32..50u32, 1..8).prop_map(|gaps| {
            let mut points = Vec::new();
            let mut position = 0.0;
            for gap in &gaps {
                position += f64::from(*gap);
                points.push(position);
            }
            // Leave room for the closing gap.
            (position + MIN_SLICE + 1.0, points)
        })
    }

    proptest! {
        #[test]
        fn any_sequence_of_moves_preserves_the_invariants(
            (length, points) in interior_points(),
            moves in prop::collection::vec((0usize..10, -500.0..500.0f64), 0..32),
        ) {
            let mut set = BoundarySet::new(length, &points).unwrap();
            for (index, proposed) in moves {
                set.move_interior(index, proposed);

                let positions = set.positions();
                prop_assert_eq!(positions[0], 0.0);
                prop_assert_eq!(positions[positions.len() - 1], length);
                for pair in positions.windows(2) {
                    prop_assert!(pair[1] - pair[0] >= MIN_SLICE - 1e-9);
                }
            }
        }

        #[test]
        fn applied_value_is_within_the_clamp_interval(
            (length, points) in interior_points(),
            index in 1usize..8,
            proposed in -500.0..500.0f64,
        ) {
            let mut set = BoundarySet::new(length, &points).unwrap();
            if set.is_interior(index) {
                let lo = set.positions()[index - 1] + MIN_SLICE;
                let hi = set.positions()[index + 1] - MIN_SLICE;
                let applied = set.move_interior(index, proposed);
                prop_assert!(applied >= lo && applied <= hi);
            }
        }
    }
}
