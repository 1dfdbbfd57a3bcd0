//! The breakpoint store and its range-update algorithm.

use std::ops::Range;

use intensity_common::{Result, error::Error, verify_arg, verify_data};
use itertools::Itertools;

use crate::{
    binary_search::{lower_bound_by_key, lower_bound_by_key_in},
    breakpoint::Breakpoint,
    domain::{Intensity, Position},
};

/// A piecewise-constant intensity function, stored as an ordered list of breakpoints.
///
/// Each breakpoint `(position, intensity)` sets the intensity from `position`
/// (inclusive) up to the next breakpoint (exclusive). Before the first breakpoint,
/// and everywhere for an empty store, the intensity is `V::default()` (zero).
///
/// Invariants, maintained by every public operation:
/// - Breakpoint positions are finite and strictly increasing; intensities are finite.
/// - No two adjacent breakpoints have the same intensity. The implicit zero before
///   the first breakpoint counts as a neighbor, so the first breakpoint never has
///   a zero intensity.
/// - The last breakpoint (if any) has a zero intensity.
///
/// Together these make the representation canonical: two stores describe the same
/// function if and only if their breakpoint lists are equal.
///
/// Updates take a half-open range `[from, to)`. The store is a plain owned value with
/// no internal synchronization; concurrent writers must wrap it in a lock.
///
/// Complexity overview:
/// - `value_at`: O(log n)
/// - `add`, `set`, `set_with`: O(log n + k) comparisons, where `k` is the number of
///   breakpoints inside the range, plus O(n) element moves for the at most two
///   insertions and the removals performed by compaction
/// - Iteration: O(n)
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct IntensitySegments<P = i64, V = i64> {
    /// Breakpoints in canonical form, sorted by position.
    breakpoints: Vec<Breakpoint<P, V>>,
}

impl<P, V> IntensitySegments<P, V> {
    /// Creates an empty store (the everywhere-zero function).
    pub fn new() -> IntensitySegments<P, V> {
        IntensitySegments {
            breakpoints: Vec::new(),
        }
    }

    /// Creates an empty store with room for `capacity` breakpoints.
    pub fn with_capacity(capacity: usize) -> IntensitySegments<P, V> {
        IntensitySegments {
            breakpoints: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of breakpoints.
    #[inline]
    pub fn len(&self) -> usize {
        self.breakpoints.len()
    }

    /// Returns `true` if the store has no breakpoints, i.e. the intensity is zero
    /// everywhere.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty()
    }

    /// Returns the live breakpoint list in ascending position order.
    ///
    /// The view is read-only and borrows the store; it reflects the canonical form.
    #[inline]
    pub fn breakpoints(&self) -> &[Breakpoint<P, V>] {
        &self.breakpoints
    }

    /// Returns an iterator over the breakpoints in ascending position order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Breakpoint<P, V>> {
        self.breakpoints.iter()
    }

    /// Consumes the store and returns its breakpoints.
    pub fn into_breakpoints(self) -> Vec<Breakpoint<P, V>> {
        self.breakpoints
    }

    /// Resets the store to the everywhere-zero function, keeping the allocation.
    pub fn clear(&mut self) {
        self.breakpoints.clear();
    }
}

impl<P: Position, V: Intensity> IntensitySegments<P, V> {
    /// Builds a store from a breakpoint list that is already in canonical form.
    ///
    /// The list is validated, not normalized: positions and intensities must be
    /// finite, positions strictly increasing, adjacent intensities must differ, the
    /// first intensity must be non-zero and the last one zero. Any violation yields an
    /// `InvalidFormat` error.
    pub fn from_breakpoints(breakpoints: Vec<Breakpoint<P, V>>) -> Result<Self> {
        let finite_values = breakpoints
            .iter()
            .all(|bp| bp.position.is_finite() && bp.intensity.is_finite());
        verify_data!(breakpoints, finite_values);

        let increasing_positions = breakpoints
            .iter()
            .tuple_windows()
            .all(|(prev, next)| prev.position < next.position);
        verify_data!(breakpoints, increasing_positions);

        let no_redundant_breakpoints = breakpoints
            .first()
            .is_none_or(|first| first.intensity != V::default())
            && breakpoints
                .iter()
                .tuple_windows()
                .all(|(prev, next)| prev.intensity != next.intensity);
        verify_data!(breakpoints, no_redundant_breakpoints);

        let ends_at_zero = breakpoints
            .last()
            .is_none_or(|last| last.intensity == V::default());
        verify_data!(breakpoints, ends_at_zero);

        Ok(IntensitySegments { breakpoints })
    }

    /// Returns the intensity stored at breakpoint `index`.
    ///
    /// Defined for every index: a negative index or one at or past the end yields
    /// `V::default()`, which is the intensity before the first breakpoint. This lets
    /// the update algorithm read the left neighbor of any breakpoint (`index - 1`)
    /// without special-casing the start of the list.
    #[inline]
    pub fn value_at_index(&self, index: isize) -> V {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.breakpoints.get(index))
            .map_or_else(V::default, |bp| bp.intensity)
    }

    /// Returns the intensity of the function at `position`.
    ///
    /// This is the intensity of the last breakpoint whose position is less than or
    /// equal to `position`, or zero if there is none.
    pub fn value_at(&self, position: P) -> V {
        let index = self.lower_bound(position);
        if self.has_breakpoint_at(index, position) {
            self.breakpoints[index].intensity
        } else {
            self.value_at_index(index as isize - 1)
        }
    }

    /// Returns an iterator over the finite pieces of the function as
    /// `(range, intensity)` pairs, one per pair of adjacent breakpoints.
    ///
    /// Pieces with a zero intensity between two non-zero pieces are included. The
    /// unbounded zero pieces before the first and after the last breakpoint are not.
    pub fn segments(&self) -> impl Iterator<Item = (Range<P>, V)> + '_ {
        self.breakpoints
            .iter()
            .tuple_windows()
            .map(|(start, end)| (start.position..end.position, start.intensity))
    }

    /// Returns the breakpoints whose positions lie within `range`.
    ///
    /// An empty or inverted range yields an empty slice. Note that the intensity at
    /// `range.start` may be set by a breakpoint preceding the returned slice; use
    /// [`value_at`](Self::value_at) to read it.
    pub fn breakpoints_in(&self, range: Range<P>) -> &[Breakpoint<P, V>] {
        let start = self.lower_bound(range.start);
        let end = self.lower_bound_from(start, range.end);
        &self.breakpoints[start..end]
    }

    /// Overwrites the intensity over `[from, to)` with `amount`.
    ///
    /// Returns the store itself to allow chaining.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` unless `from < to` and both are finite, or if `amount` is
    /// not finite. The store is left untouched on error.
    pub fn set(&mut self, from: P, to: P, amount: V) -> Result<&mut Self> {
        self.try_set_with(from, to, |_| Some(amount))
    }

    /// Replaces the intensity `v` over `[from, to)` with `transform(v)`.
    ///
    /// `transform` is called once for each breakpoint inside the range and once more
    /// for the intensity in effect just before `from`, if `from` is not already a
    /// breakpoint. The intensity from `to` onwards is left unchanged.
    ///
    /// Returns the store itself to allow chaining.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` unless `from < to` and both are finite, or if `transform`
    /// yields a non-finite intensity. The store is left untouched on error.
    pub fn set_with<F>(&mut self, from: P, to: P, mut transform: F) -> Result<&mut Self>
    where
        F: FnMut(V) -> V,
    {
        self.try_set_with(from, to, |prev| Some(transform(prev)))
    }

    /// Same as [`set_with`](Self::set_with), for transforms that may fail.
    ///
    /// If `transform` returns `None` for any affected intensity, the update is
    /// abandoned with `InvalidArgument` and the store is left untouched. All new
    /// intensities are computed before the first breakpoint is modified.
    pub fn try_set_with<F>(&mut self, from: P, to: P, transform: F) -> Result<&mut Self>
    where
        F: FnMut(V) -> Option<V>,
    {
        self.update(from, to, transform).inspect_err(|e| {
            log::debug!("rejected update of [{from:?}, {to:?}): {e}");
        })?;
        Ok(self)
    }

    fn update<F>(&mut self, from: P, to: P, mut transform: F) -> Result<()>
    where
        F: FnMut(V) -> Option<V>,
    {
        Self::verify_range(from, to)?;

        let left = self.lower_bound(from);
        let mut right = left
            + self.breakpoints[left..]
                .iter()
                .take_while(|bp| bp.position < to)
                .count();

        // Intensities in effect right before `from` and right before `to`, prior to
        // the update. The latter is restored at `to` so that the function is
        // unchanged from there on.
        let before = self.value_at_index(left as isize - 1);
        let carried = self.value_at_index(right as isize - 1);

        let updated = self.breakpoints[left..right]
            .iter()
            .map(|bp| Self::apply(&mut transform, bp.intensity))
            .collect::<Result<Vec<V>>>()?;
        let from_intensity = if self.has_breakpoint_at(left, from) {
            None
        } else {
            Some(Self::apply(&mut transform, before)?)
        };

        for (bp, intensity) in self.breakpoints[left..right].iter_mut().zip(updated) {
            bp.intensity = intensity;
        }

        // Right boundary first: `right` was computed before any insertion.
        let mut inserted = 0;
        if !self.has_breakpoint_at(right, to) {
            self.breakpoints.insert(right, Breakpoint::new(to, carried));
            inserted += 1;
        }
        if let Some(intensity) = from_intensity {
            self.breakpoints
                .insert(left, Breakpoint::new(from, intensity));
            right += 1;
            inserted += 1;
        }

        // On an empty store this also drops both boundaries when the transform
        // maps zero to zero.
        let removed = self.merge(left, right);
        log::trace!(
            "update of [{from:?}, {to:?}): window {left}..={right}, \
             {inserted} inserted, {removed} removed, {} breakpoints",
            self.breakpoints.len()
        );
        Ok(())
    }

    fn apply<F>(transform: &mut F, prev: V) -> Result<V>
    where
        F: FnMut(V) -> Option<V>,
    {
        match transform(prev) {
            Some(intensity) if intensity.is_finite() => Ok(intensity),
            Some(intensity) => Err(Error::invalid_arg(
                "intensity",
                format!("{intensity:?} is not finite"),
            )),
            None => Err(Error::invalid_arg(
                "intensity",
                format!("no representable update of {prev:?}"),
            )),
        }
    }

    /// Verifies the canonical-form invariants.
    ///
    /// # Panics
    ///
    /// Panics if any invariant listed on [`IntensitySegments`] does not hold.
    pub fn check_invariants(&self) {
        for bp in &self.breakpoints {
            assert!(
                bp.position.is_finite() && bp.intensity.is_finite(),
                "non-finite breakpoint {:?}",
                bp
            );
        }
        for (prev, next) in self.breakpoints.iter().tuple_windows() {
            assert!(
                prev.position < next.position,
                "breakpoint positions out of order: {:?} followed by {:?}",
                prev.position,
                next.position
            );
            assert!(
                prev.intensity != next.intensity,
                "redundant breakpoint at {:?}: intensity {:?} repeats",
                next.position,
                next.intensity
            );
        }
        if let Some(first) = self.breakpoints.first() {
            assert!(
                first.intensity != V::default(),
                "redundant leading breakpoint at {:?}",
                first.position
            );
        }
        if let Some(last) = self.breakpoints.last() {
            assert!(
                last.intensity == V::default(),
                "trailing breakpoint at {:?} has non-zero intensity {:?}",
                last.position,
                last.intensity
            );
        }
    }

    fn verify_range(from: P, to: P) -> Result<()> {
        verify_arg!(from, from.is_finite());
        verify_arg!(to, to.is_finite());
        verify_arg!(range, from < to);
        Ok(())
    }

    /// Index of the first breakpoint at or after `position`.
    #[inline]
    fn lower_bound(&self, position: P) -> usize {
        lower_bound_by_key(&self.breakpoints, position, |bp| bp.position)
    }

    /// Same as [`lower_bound`](Self::lower_bound), skipping the first `hint` breakpoints.
    #[inline]
    fn lower_bound_from(&self, hint: usize, position: P) -> usize {
        lower_bound_by_key_in(
            &self.breakpoints,
            hint..self.breakpoints.len(),
            position,
            |bp| bp.position,
        )
    }

    #[inline]
    fn has_breakpoint_at(&self, index: usize, position: P) -> bool {
        self.breakpoints
            .get(index)
            .is_some_and(|bp| bp.position == position)
    }

    /// Removes every breakpoint in `left..=right` whose intensity equals that of
    /// its left neighbor. Returns the number of removed breakpoints.
    ///
    /// Walks right to left so that removals never shift the indices still to be
    /// visited.
    fn merge(&mut self, left: usize, right: usize) -> usize {
        let mut removed = 0;
        for index in (left..=right).rev() {
            let redundant = self
                .breakpoints
                .get(index)
                .is_some_and(|bp| bp.intensity == self.value_at_index(index as isize - 1));
            if redundant {
                self.breakpoints.remove(index);
                removed += 1;
            }
        }
        removed
    }

    /// Adds `amount` to the intensity over `[from, to)`.
    ///
    /// Returns the store itself to allow chaining.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` unless `from < to` and both are finite, or if the sum
    /// overflows `V` for any affected piece. The store is left untouched on error.
    pub fn add(&mut self, from: P, to: P, amount: V) -> Result<&mut Self> {
        self.try_set_with(from, to, |prev| prev.checked_add(amount))
    }
}

impl<P, V> Default for IntensitySegments<P, V> {
    fn default() -> Self {
        IntensitySegments::new()
    }
}

impl<P: Position, V: Intensity> TryFrom<Vec<Breakpoint<P, V>>> for IntensitySegments<P, V> {
    type Error = intensity_common::error::Error;

    fn try_from(breakpoints: Vec<Breakpoint<P, V>>) -> Result<Self> {
        IntensitySegments::from_breakpoints(breakpoints)
    }
}

impl<P: Position, V: Intensity> TryFrom<Vec<(P, V)>> for IntensitySegments<P, V> {
    type Error = intensity_common::error::Error;

    fn try_from(breakpoints: Vec<(P, V)>) -> Result<Self> {
        IntensitySegments::from_breakpoints(breakpoints.into_iter().map(Into::into).collect())
    }
}

impl<'a, P, V> IntoIterator for &'a IntensitySegments<P, V> {
    type Item = &'a Breakpoint<P, V>;
    type IntoIter = std::slice::Iter<'a, Breakpoint<P, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.breakpoints.iter()
    }
}

impl<P, V> std::fmt::Debug for IntensitySegments<P, V>
where
    P: std::fmt::Debug,
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntensitySegments")
            .field("breakpoints", &self.breakpoints)
            .finish()
    }
}
