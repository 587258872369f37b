//! One-dimensional interpolation used to map physical coordinates on a
//! rectilinear grid axis into fractional index space.
//!
//! The cubic spline here extrapolates by extending its end pieces rather
//! than clamping, so that points just outside an axis map to indices just
//! outside `[0, n-1]` and can be told apart from points far outside.

pub mod cubic;
pub mod index;

pub use cubic::CubicSpline1D;
pub use index::IndexMap1D;

use num_traits::Float;

use crate::error::GridError;

/// Extrapolation flag
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extrap {
    Inside,
    OutsideLow,
    OutsideHigh,
}

/// A one-dimensional interpolator.
pub trait Interp1D<T: Float> {
    /// Evaluate the interpolant at an observation point.
    ///
    /// It is highly recommended to inline implementations of this function.
    fn eval_one(&self, loc: T) -> T;

    /// Evaluate the interpolant at a set of observation points, allocating
    /// for the output values for convenience.
    #[inline]
    fn eval_alloc(&self, locs: &[T]) -> Vec<T> {
        locs.iter().map(|&x| self.eval_one(x)).collect()
    }
}

/// A rectilinear axis, which may have uneven spacing.
/// Assumes the coordinates are strictly increasing.
#[derive(Clone, Copy, Debug)]
pub struct RectilinearGrid1D<'a, T: Float> {
    grid: &'a [T],
}

impl<'a, T: Float> RectilinearGrid1D<'a, T> {
    pub fn new(grid: &'a [T]) -> Result<Self, GridError> {
        if grid.len() < 2 {
            return Err(GridError::NotEnoughPoints(grid.len()));
        }

        Ok(Self { grid })
    }

    /// Get the index of the lower corner of the containing cell,
    /// clipped so that a full cell `[i, i + 1]` always exists.
    ///
    /// A location equal to an interior knot belongs to the cell
    /// starting at that knot.
    #[inline]
    pub fn index(&self, loc: T) -> (usize, Extrap) {
        let n = self.grid.len();
        let i = (self.grid.partition_point(|v| *v <= loc) as isize - 1).max(0) as usize;
        let i = i.min(n - 2);

        let extrap = match loc {
            x if x < self.grid[0] => Extrap::OutsideLow,
            x if x > self.grid[n - 1] => Extrap::OutsideHigh,
            _ => Extrap::Inside,
        };

        (i, extrap)
    }
}
