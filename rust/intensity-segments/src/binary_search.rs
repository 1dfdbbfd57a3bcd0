//! Lower-bound search over sorted sequences.
//!
//! Both functions take a projection that extracts the sort key from each element, so
//! they work directly over records (such as breakpoints) without building a separate
//! key array.

use std::ops::Range;

/// Returns the smallest index `i` such that `key(&items[i]) >= target`, or
/// `items.len()` if there is no such element.
///
/// The keys produced by `key` must be sorted in ascending order. When `target` equals
/// an existing key, the index of that key is returned, so callers can detect an
/// exact match by inspecting `items[i]`.
///
/// Complexity: O(log n) projections and comparisons.
///
/// # Examples
///
/// ```
/// use intensity_segments::binary_search::lower_bound_by_key;
///
/// let items = [(10, 'a'), (20, 'b'), (30, 'c')];
/// assert_eq!(lower_bound_by_key(&items, 5, |item| item.0), 0);
/// assert_eq!(lower_bound_by_key(&items, 20, |item| item.0), 1);
/// assert_eq!(lower_bound_by_key(&items, 25, |item| item.0), 2);
/// assert_eq!(lower_bound_by_key(&items, 40, |item| item.0), 3);
/// ```
#[inline]
pub fn lower_bound_by_key<T, K, F>(items: &[T], target: K, key: F) -> usize
where
    K: PartialOrd,
    F: FnMut(&T) -> K,
{
    lower_bound_by_key_in(items, 0..items.len(), target, key)
}

/// Same as [`lower_bound_by_key`], but only inspects the elements within `window`.
///
/// The returned index is absolute (relative to `items`, not to `window`) and lies in
/// `window.start..=window.end`. This is useful when the caller already knows that the
/// answer cannot precede `window.start`, e.g. when searching for the end of a range
/// whose start was located previously.
///
/// # Panics
///
/// Panics if `window` is inverted or extends past the end of `items`.
pub fn lower_bound_by_key_in<T, K, F>(
    items: &[T],
    window: Range<usize>,
    target: K,
    mut key: F,
) -> usize
where
    K: PartialOrd,
    F: FnMut(&T) -> K,
{
    assert!(
        window.start <= window.end && window.end <= items.len(),
        "search window {window:?} is out of bounds for a sequence of length {}",
        items.len()
    );

    let Range {
        start: mut low,
        end: mut high,
    } = window;
    while low < high {
        let mid = low.midpoint(high);
        if key(&items[mid]) < target {
            low = mid + 1;
        } else {
            high = mid;
        }
    }
    low
}
