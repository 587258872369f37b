//! Inversion of a rectilinear grid axis into fractional index space.
use num_traits::Float;

use super::{CubicSpline1D, Interp1D};
use crate::error::GridError;

/// Map from a physical coordinate on one grid axis to its fractional
/// position in the axis's index sequence `0..n`.
///
/// Built as a cubic spline of the index against the coordinate values,
/// so it is exact at the grid nodes and extrapolates smoothly past either
/// end of the axis.
#[derive(Clone, Debug)]
pub struct IndexMap1D<T: Float> {
    spline: CubicSpline1D<T>,
}

impl<T: Float> IndexMap1D<T> {
    /// # Errors
    /// * If the axis has fewer than 2 entries
    /// * If the axis contains non-finite or repeated entries
    pub fn new(axis: &[T]) -> Result<Self, GridError> {
        let index = (0..axis.len())
            .map(|i| T::from(i).ok_or(GridError::Unrepresentable))
            .collect::<Result<Vec<T>, GridError>>()?;
        let spline = CubicSpline1D::new(axis, &index)?;

        Ok(Self { spline })
    }
}

impl<T: Float> Interp1D<T> for IndexMap1D<T> {
    #[inline]
    fn eval_one(&self, loc: T) -> T {
        self.spline.eval_one(loc)
    }
}
