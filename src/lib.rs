//! Cubic spline resampling of real or complex values on rectilinear
//! (unevenly spaced) 3D grids, with out-of-grid observation points
//! mapped to zero.
//!
//! # Method
//! Resampling is split into two stages that use different cubic splines:
//!
//! 1. Each coordinate of an observation point is converted to a fractional
//!    index along its axis by a not-a-knot cubic spline of the axis index
//!    against the axis coordinates ([`one_dim::IndexMap1D`]). This map is
//!    exact at the grid nodes and extrapolates past the ends of the axis,
//!    so a point slightly off the grid maps to an index slightly outside
//!    `[0, n-1]`.
//! 2. The values are resampled at those index coordinates by a cubic
//!    B-spline over the whole volume ([`multicubic::MulticubicBSpline`]),
//!    after a one-off recursive prefilter that makes the B-spline pass
//!    through every sample. Any point whose index is outside `[0, n-1]` on
//!    any axis takes a fill value, zero by default.
//!
//! Complex values are resampled as independent real and imaginary planes
//! at the same index coordinates.
//!
//! # Performance Scalings
//!
//! | Stage                          | RAM            | Cost                              |
//! |--------------------------------|----------------|-----------------------------------|
//! | index maps (construction)      | O(n per axis)  | O(n per axis)                     |
//! | prefilter (construction)       | O(gridsize)    | O(ndims * gridsize)               |
//! | evaluation, inside the grid    | O(ndims)       | O(4^ndims) + log2(n per axis)     |
//! | evaluation, outside the grid   | O(ndims)       | log2(n per axis)                  |
//!
//! # Example
//! ```rust
//! use gridresample::GridResampler3D;
//! use ndarray::{Array3, Array2};
//! use num_complex::Complex64;
//!
//! // Uneven grid
//! let x = [0.0_f64, 0.5, 2.0, 3.0];
//! let y = [-1.0_f64, 0.0, 1.0, 2.0, 4.0];
//! let z = [10.0_f64, 20.0, 30.0, 40.0];
//!
//! let values = Array3::from_shape_fn((4, 5, 4), |(i, j, k)| {
//!     Complex64::new((i + j + k) as f64, (i * j * k) as f64)
//! });
//! let resampler = GridResampler3D::new([&x[..], &y[..], &z[..]], values.view()).unwrap();
//!
//! // Observation points as rows of a 2D array; the last one is off the grid
//! let obs = Array2::from_shape_vec(
//!     (3, 3),
//!     vec![2.0, 1.0, 30.0, 1.0, 0.5, 25.0, 5.0, 0.0, 20.0],
//! )
//! .unwrap();
//!
//! let out = resampler.resample(obs.view()).unwrap();
//! assert_eq!(out.shape(), &[3]);
//! let out: Vec<Complex64> = out.iter().copied().collect();
//! assert!((out[0] - Complex64::new(6.0, 8.0)).norm() < 1e-12);
//! assert_eq!(out[2], Complex64::new(0.0, 0.0));
//! ```
// These "needless" range loops are a significant speedup
#![allow(clippy::needless_range_loop)]

pub mod error;
pub use error::{GridError, ResampleError};

pub mod one_dim;
pub use one_dim::{CubicSpline1D, IndexMap1D};

pub mod multicubic;
pub use multicubic::MulticubicBSpline;

pub mod queries;
pub use queries::{Queries, QueryPoints};

pub mod sample;
pub use sample::Sample;

pub mod resampler;
pub use resampler::{interp_cubic_spline_3d, resample, GridResampler3D};

pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

/// Index a single value from an array
#[inline]
pub(crate) fn index_arr<T: Copy>(loc: &[usize], dimprod: &[usize], data: &[T]) -> T {
    let mut i = 0;
    for j in 0..dimprod.len() {
        i += loc[j] * dimprod[j];
    }

    data[i]
}
