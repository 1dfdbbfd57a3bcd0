//! A piecewise-constant intensity function over an ordered coordinate axis.
//!
//! The function is stored as a sorted list of breakpoints. Each breakpoint marks the
//! position where a new intensity starts to apply; the intensity holds until the next
//! breakpoint. Before the first breakpoint (and for an empty list) the intensity is zero.
//!
//! The crate offers:
//!
//! - **Range updates**: add a delta to, or overwrite, the intensity over a half-open
//!   range `[from, to)`, or apply an arbitrary transform to it
//! - **Canonical form**: after every update no two adjacent breakpoints share an
//!   intensity, so equal functions always have equal representations
//! - **Rendering**: the breakpoint list serializes as compact positional JSON
//!   (`[[10,1],[30,0]]`) and can be parsed back
//!
//! # Key Types
//!
//! - [`IntensitySegments`] - The breakpoint store and its update algorithm
//! - [`Breakpoint`] - A `(position, intensity)` pair
//! - [`binary_search`] - The lower-bound search used to locate update boundaries
//!
//! # Example
//!
//! ```
//! use intensity_segments::IntensitySegments;
//!
//! let mut segments: IntensitySegments = IntensitySegments::new();
//! assert_eq!(segments.to_string(), "[]");
//! segments.add(10, 30, 1)?;
//! assert_eq!(segments.to_string(), "[[10,1],[30,0]]");
//! segments.add(20, 40, 1)?;
//! assert_eq!(segments.to_string(), "[[10,1],[20,2],[30,1],[40,0]]");
//! segments.add(10, 40, -1)?;
//! assert_eq!(segments.to_string(), "[[20,1],[30,0]]");
//! segments.add(10, 40, -1)?;
//! assert_eq!(segments.to_string(), "[[10,-1],[20,0],[30,-1],[40,0]]");
//! segments.set(10, 20, 0)?;
//! assert_eq!(segments.to_string(), "[[30,-1],[40,0]]");
//! # Ok::<(), intensity_segments::Error>(())
//! ```

pub mod binary_search;
pub mod breakpoint;
pub mod domain;
pub mod render;
pub mod segments;

#[cfg(test)]
mod tests;

pub use breakpoint::Breakpoint;
pub use domain::{Intensity, Position};
pub use segments::IntensitySegments;

pub use intensity_common::{Result, error::Error};
