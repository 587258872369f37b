//! Cubic spline resampling of real or complex data on a rectilinear 3D grid.
//!
//! Evaluation runs in two stages. First, each coordinate of an observation
//! point is mapped to a fractional index along its grid axis by a cubic
//! spline of the index against the axis coordinates; this map extrapolates
//! past the ends of the axis. Second, the data is resampled at those index
//! coordinates with a cubic B-spline. Points whose index falls outside the
//! grid on any axis are not extrapolated; they take a fill value, zero
//! unless configured otherwise.
//!
//! ```rust
//! use gridresample::{resample, GridResampler3D};
//! use ndarray::Array3;
//!
//! let x = [0.0_f64, 1.0, 2.0, 3.0];
//! let values = Array3::from_shape_fn((4, 4, 4), |(i, j, k)| (i + j + k) as f64);
//!
//! // One-shot
//! let out = resample([&x[..], &x[..], &x[..]], values.view(), [1.0, 1.0, 1.0]).unwrap();
//! assert!((out.iter().next().unwrap() - 3.0).abs() < 1e-12);
//!
//! // Reusable, for many batches of observation points
//! let resampler = GridResampler3D::new([&x[..], &x[..], &x[..]], values.view()).unwrap();
//! let pts = vec![[1.0, 1.0, 1.0], [10.0, 10.0, 10.0]];
//! let out = resampler.resample(&pts).unwrap();
//! assert_eq!(out.shape(), &[2]);
//! assert_eq!(out.iter().nth(1), Some(&0.0));
//! ```
use ndarray::{ArrayD, ArrayView3, IxDyn};
use num_traits::Zero;
use tracing::{debug, trace};

use crate::error::ResampleError;
use crate::multicubic::prefilter::prefilter;
use crate::multicubic::MulticubicBSpline;
use crate::one_dim::{IndexMap1D, Interp1D};
use crate::queries::Queries;
use crate::sample::Sample;

/// Cubic spline resampler over a fixed rectilinear 3D grid and its values.
///
/// Construction does all the work that does not depend on the observation
/// points: fitting the three coordinate-to-index maps and prefiltering the
/// values into B-spline coefficients, once per real plane of the sample type.
#[derive(Clone, Debug)]
pub struct GridResampler3D<S: Sample> {
    /// Coordinate-to-index map of each axis
    axes: [IndexMap1D<S::Real>; 3],

    /// Size of each dimension
    dims: [usize; 3],

    /// B-spline coefficients of each real plane, C-ordered, size prod(dims)
    planes: Vec<Vec<S::Real>>,

    /// Value of observation points outside the grid
    fill: S,
}

impl<S: Sample> GridResampler3D<S> {
    /// Build a resampler over grid axes `points` and values of shape
    /// `(points[0].len(), points[1].len(), points[2].len())`.
    ///
    /// Axes may be ascending or descending and need not be evenly spaced.
    ///
    /// # Errors
    /// * If the shape of `values` does not match the axis lengths
    /// * If any axis has fewer than 2 entries
    /// * If any axis has non-finite or repeated entries
    pub fn new(points: [&[S::Real]; 3], values: ArrayView3<'_, S>) -> Result<Self, ResampleError> {
        let shape = values.shape();
        for axis in 0..3 {
            if shape[axis] != points[axis].len() {
                return Err(ResampleError::ShapeMismatch {
                    axis,
                    grid: points[axis].len(),
                    values: shape[axis],
                });
            }
        }
        let dims = [shape[0], shape[1], shape[2]];

        let index_map = |axis: usize| {
            IndexMap1D::new(points[axis]).map_err(|source| ResampleError::Axis { axis, source })
        };
        let axes = [index_map(0)?, index_map(1)?, index_map(2)?];

        let planes = (0..S::PLANES)
            .map(|p| -> Result<Vec<S::Real>, ResampleError> {
                let mut plane = S::plane(&values, p);
                MulticubicBSpline::new(dims, &plane)?;
                prefilter(&dims, &mut plane);
                Ok(plane)
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(?dims, planes = S::PLANES, "prefiltered grid values");

        Ok(Self {
            axes,
            dims,
            planes,
            fill: S::zero(),
        })
    }

    /// Set the value returned for observation points outside the grid.
    pub fn with_fill_value(mut self, fill: S) -> Self {
        self.fill = fill;
        self
    }

    /// Size of each dimension of the grid
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Map one observation point to fractional index coordinates.
    #[inline]
    pub fn index_coord(&self, x: [S::Real; 3]) -> [S::Real; 3] {
        [
            self.axes[0].eval_one(x[0]),
            self.axes[1].eval_one(x[1]),
            self.axes[2].eval_one(x[2]),
        ]
    }

    /// Map observation points to fractional index coordinates, which may lie
    /// outside the grid.
    pub fn index_coords(&self, x: &[[S::Real; 3]]) -> Vec<[S::Real; 3]> {
        x.iter().map(|&p| self.index_coord(p)).collect()
    }

    /// Resample at a single observation point.
    #[inline]
    pub fn resample_one(&self, x: [S::Real; 3]) -> S {
        self.eval_index(self.index_coord(x)).unwrap_or(self.fill)
    }

    /// Resample at a set of observation points given in any of the shapes
    /// accepted by [`Queries`]. The output has the leading shape of the
    /// queries, without the trailing coordinate axis.
    ///
    /// # Errors
    /// * If the queries do not describe an array of 3-vectors
    pub fn resample<'q, Q>(&self, queries: Q) -> Result<ArrayD<S>, ResampleError>
    where
        Q: Into<Queries<'q, S::Real>>,
        S::Real: 'q,
    {
        let queries = queries.into().normalize()?;

        let mut outside = 0_usize;
        let out: Vec<S> = queries
            .points
            .iter()
            .map(|&p| {
                self.eval_index(self.index_coord(p)).unwrap_or_else(|| {
                    outside += 1;
                    self.fill
                })
            })
            .collect();

        trace!(n = out.len(), outside, "resampled observation points");

        // Point count always matches the product of the leading shape
        ArrayD::from_shape_vec(IxDyn(&queries.shape), out).map_err(|_| {
            ResampleError::QueryShape(queries.shape.iter().copied().chain([3]).collect())
        })
    }

    /// Interpolator over one real plane, borrowing its coefficients
    #[inline]
    fn spline(&self, plane: usize) -> MulticubicBSpline<'_, S::Real, 3> {
        // Dimensions were checked against every plane on construction
        MulticubicBSpline::new_unchecked(self.dims, &self.planes[plane])
    }

    /// Evaluate every plane at the same index coordinates and recombine,
    /// or `None` if the coordinates are outside the grid.
    #[inline]
    fn eval_index(&self, idx: [S::Real; 3]) -> Option<S> {
        if !self.spline(0).contains(idx) {
            return None;
        }

        // At most two planes, for complex samples
        let mut parts = [<S::Real as Zero>::zero(); 2];
        for (p, part) in parts.iter_mut().take(S::PLANES).enumerate() {
            *part = self.spline(p).interp_one(idx);
        }
        Some(S::from_planes(&parts[..S::PLANES]))
    }
}

/// Resample `values` on the rectilinear grid `points` at `queries`.
///
/// This is a convenience function which builds a [`GridResampler3D`] on
/// every call; to evaluate the same data repeatedly, build the resampler
/// once instead.
///
/// # Errors
/// * Any error from [`GridResampler3D::new`] or [`GridResampler3D::resample`]
pub fn resample<'q, S, Q>(
    points: [&[S::Real]; 3],
    values: ArrayView3<'_, S>,
    queries: Q,
) -> Result<ArrayD<S>, ResampleError>
where
    S: Sample,
    Q: Into<Queries<'q, S::Real>>,
    S::Real: 'q,
{
    GridResampler3D::new(points, values)?.resample(queries)
}

/// Alias of [`resample`].
pub fn interp_cubic_spline_3d<'q, S, Q>(
    points: [&[S::Real]; 3],
    values: ArrayView3<'_, S>,
    queries: Q,
) -> Result<ArrayD<S>, ResampleError>
where
    S: Sample,
    Q: Into<Queries<'q, S::Real>>,
    S::Real: 'q,
{
    resample(points, values, queries)
}
