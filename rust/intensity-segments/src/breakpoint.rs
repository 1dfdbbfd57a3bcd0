//! The `(position, intensity)` pair that makes up the segment store.

/// A point where the intensity function changes value.
///
/// `intensity` applies from `position` (inclusive) up to the position of the next
/// breakpoint (exclusive). Breakpoints are created and removed by
/// [`IntensitySegments`](crate::IntensitySegments) only; callers observe them through
/// shared references.
///
/// Serialized as a two-element sequence `[position, intensity]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Breakpoint<P, V> {
    /// Left-inclusive coordinate where `intensity` starts to apply.
    pub position: P,
    /// Intensity in effect from `position` until the next breakpoint.
    pub intensity: V,
}

impl<P, V> Breakpoint<P, V> {
    #[inline]
    pub fn new(position: P, intensity: V) -> Breakpoint<P, V> {
        Breakpoint {
            position,
            intensity,
        }
    }

    #[inline]
    pub fn into_tuple(self) -> (P, V) {
        (self.position, self.intensity)
    }
}

impl<P, V> From<(P, V)> for Breakpoint<P, V> {
    #[inline]
    fn from((position, intensity): (P, V)) -> Self {
        Breakpoint::new(position, intensity)
    }
}

impl<P, V> From<Breakpoint<P, V>> for (P, V) {
    #[inline]
    fn from(breakpoint: Breakpoint<P, V>) -> Self {
        breakpoint.into_tuple()
    }
}
