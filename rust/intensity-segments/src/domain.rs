//! Numeric domains accepted by the segment store.
//!
//! Positions need a total order over the values actually stored, plus a way to reject
//! values that cannot be ordered (`NaN`) or that do not name a real coordinate
//! (infinities). Intensities need equality, a zero value and overflow-aware addition.

use std::fmt::Debug;

/// A coordinate type usable as a breakpoint position.
///
/// Implemented for all primitive integers (always finite) and for `f32`/`f64`
/// (finite unless `NaN` or infinite).
pub trait Position: Copy + PartialOrd + Debug {
    /// Returns `true` if the value is a real, ordered coordinate.
    fn is_finite(&self) -> bool;
}

macro_rules! impl_integer_domain {
    ($($t:ty),* $(,)?) => {
        $(
            impl Position for $t {
                #[inline]
                fn is_finite(&self) -> bool {
                    true
                }
            }

            impl Intensity for $t {
                #[inline]
                fn is_finite(&self) -> bool {
                    true
                }

                #[inline]
                fn checked_add(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_add(self, rhs)
                }
            }
        )*
    };
}

macro_rules! impl_float_domain {
    ($($t:ty),* $(,)?) => {
        $(
            impl Position for $t {
                #[inline]
                fn is_finite(&self) -> bool {
                    <$t>::is_finite(*self)
                }
            }

            impl Intensity for $t {
                #[inline]
                fn is_finite(&self) -> bool {
                    <$t>::is_finite(*self)
                }

                /// Never fails; an infinite sum is rejected by the finiteness check.
                #[inline]
                fn checked_add(self, rhs: Self) -> Option<Self> {
                    Some(self + rhs)
                }
            }
        )*
    };
}

/// An intensity value.
///
/// `Default::default()` is the implicit intensity outside of the stored breakpoints
/// (zero for all numeric types). Implemented for all primitive integers and for
/// `f32`/`f64`; `NaN` and infinities are never stored.
pub trait Intensity: Copy + PartialEq + Default + Debug {
    /// Returns `true` if the value may be stored in a breakpoint.
    fn is_finite(&self) -> bool;

    /// Sum of two intensities, or `None` if it is not representable.
    fn checked_add(self, rhs: Self) -> Option<Self>;
}

impl_integer_domain!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize
);

impl_float_domain!(f32, f64);
