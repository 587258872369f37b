//! Cubic B-spline evaluation at fractional index coordinates.
//!
//! ```rust
//! use gridresample::multicubic::bspline;
//!
//! // 4x4 grid of values, indexed [i][j]
//! let z: Vec<f64> = (0..16).map(|k| (k / 4 + k % 4) as f64).collect();
//!
//! // Observation points in index space; the last one is off the grid
//! let iobs = [1.0_f64, 1.5, 4.0];
//! let jobs = [2.0_f64, 0.5, 0.0];
//! let mut out = [0.0; 3];
//!
//! bspline::interpn([4, 4], &z, &[&iobs[..], &jobs[..]], 0.0, &mut out).unwrap();
//! assert!((out[0] - 3.0).abs() < 1e-12);
//! assert_eq!(out[2], 0.0);
//! ```
use num_traits::{Float, NumCast};

use super::{bspline_weights, mirror_index, prefilter::prefilter};
use crate::error::ResampleError;
use crate::index_arr;

/// Evaluate cubic B-spline interpolation of C-ordered `vals` on an index
/// grid of size `dims`, at index-space observation points `obs`.
///
/// Points outside `[0, dims[i] - 1]` on any axis evaluate to `fill`.
///
/// This is a convenience function that prefilters a copy of `vals` on
/// every call; to evaluate the same data repeatedly, prefilter once and
/// use [`MulticubicBSpline`] directly.
pub fn interpn<T: Float, const N: usize>(
    dims: [usize; N],
    vals: &[T],
    obs: &[&[T]; N],
    fill: T,
    out: &mut [T],
) -> Result<(), ResampleError> {
    let mut coeffs = vals.to_vec();
    check_dims(&dims, coeffs.len())?;
    prefilter(&dims, &mut coeffs);
    MulticubicBSpline::new(dims, &coeffs)?
        .with_fill(fill)
        .interp(obs, out)
}

/// Evaluate interpolant, allocating a new Vec for the output.
pub fn interpn_alloc<T: Float, const N: usize>(
    dims: [usize; N],
    vals: &[T],
    obs: &[&[T]; N],
    fill: T,
) -> Result<Vec<T>, ResampleError> {
    let n = obs.first().map_or(0, |x| x.len());
    let mut out = vec![T::zero(); n];
    interpn(dims, vals, obs, fill, &mut out)?;
    Ok(out)
}

fn check_dims(dims: &[usize], nvals: usize) -> Result<(), ResampleError> {
    if dims.iter().any(|&n| n == 0) {
        return Err(ResampleError::EmptyDimension);
    }
    let expected: usize = dims.iter().product();
    if expected != nvals {
        return Err(ResampleError::ValueCount {
            expected,
            found: nvals,
        });
    }
    Ok(())
}

/// An N-dimensional cubic B-spline interpolator over prefiltered
/// coefficients, in index-space coordinates.
///
/// Assumes C-style ordering of coefficients (c(x0, y0), c(x0, y1), ..., c(x0, yn), c(x1, y0), ...).
///
/// Operation Complexity
/// * O(4^ndims) for interpolation
/// * O(ndims) for points outside the grid, which are not evaluated
///
/// Memory Complexity
/// * Peak stack usage is O(N).
/// * While evaluation is recursive, the recursion has constant
///   max depth of N, which provides a guarantee on peak
///   memory usage.
#[derive(Clone, Copy, Debug)]
pub struct MulticubicBSpline<'a, T: Float, const N: usize> {
    /// Size of each dimension
    dims: [usize; N],

    /// Stride of each dimension in `coeffs`
    dimprod: [usize; N],

    /// B-spline coefficients at each point, size prod(dims)
    coeffs: &'a [T],

    /// Value returned outside the grid
    fill: T,
}

impl<'a, T: Float, const N: usize> MulticubicBSpline<'a, T, N> {
    /// Build a new interpolator over coefficients already passed through
    /// [`prefilter`](super::prefilter::prefilter), with a fill value of zero.
    ///
    /// # Errors
    /// * If any dimension has size zero
    /// * If the number of coefficients does not match the dimensions
    pub fn new(dims: [usize; N], coeffs: &'a [T]) -> Result<Self, ResampleError> {
        check_dims(&dims, coeffs.len())?;
        Ok(Self::new_unchecked(dims, coeffs))
    }

    /// Build a new interpolator over coefficients whose dimensions have
    /// already been validated.
    pub(crate) fn new_unchecked(dims: [usize; N], coeffs: &'a [T]) -> Self {
        // Cumulative product of higher dimensions for indexing.
        let mut dimprod = [1_usize; N];
        let mut acc = 1;
        for i in 0..N {
            dimprod[N - i - 1] = acc;
            acc *= dims[N - i - 1];
        }

        Self {
            dims,
            dimprod,
            coeffs,
            fill: T::zero(),
        }
    }

    /// Set the value returned for observation points outside the grid.
    pub fn with_fill(mut self, fill: T) -> Self {
        self.fill = fill;
        self
    }

    /// Interpolate on a contiguous list of observation points.
    ///
    /// # Errors
    ///   * If the number of points on any axis does not match the output
    pub fn interp(&self, x: &[&[T]; N], out: &mut [T]) -> Result<(), ResampleError> {
        let n = out.len();

        // Make sure the size of inputs and output match
        if let Some(bad) = x.iter().find(|xx| xx.len() != n) {
            return Err(ResampleError::OutputLength {
                expected: n,
                found: bad.len(),
            });
        }

        let mut tmp = [T::zero(); N];
        for i in 0..n {
            (0..N).for_each(|j| tmp[j] = x[j][i]);
            out[i] = self.interp_one(tmp);
        }

        Ok(())
    }

    /// Interpolate the value at a point,
    /// using fixed-size intermediate storage of O(ndims) and no allocation.
    #[inline]
    pub fn interp_one(&self, x: [T; N]) -> T {
        let mut origin = [0_isize; N]; // Index of the first tap on each axis
        let mut weights = [[T::zero(); 4]; N];

        for i in 0..N {
            match self.get_loc(x[i], i) {
                Some((o, t)) => {
                    origin[i] = o;
                    weights[i] = bspline_weights(t);
                }
                None => return self.fill,
            }
        }

        // Recursive interpolation of one dependency tree at a time
        let mut loc = [0_usize; N];
        self.populate(N, &origin, &weights, &mut loc)
    }

    /// Whether a point lies inside the grid on every axis
    #[inline]
    pub fn contains(&self, x: [T; N]) -> bool {
        (0..N).all(|i| self.get_loc(x[i], i).is_some())
    }

    /// Get the first tap index along this dimension and the normalized
    /// location within the containing cell, or `None` if `v` is outside
    /// `[0, n-1]` or NaN.
    #[inline]
    fn get_loc(&self, v: T, dim: usize) -> Option<(isize, T)> {
        let hi = <T as NumCast>::from(self.dims[dim] - 1)?;
        // Written so that NaN lands outside
        if !(v >= T::zero() && v <= hi) {
            return None;
        }

        let floc = v.floor();
        let iloc = <isize as NumCast>::from(floc)?;

        Some((iloc - 1, v - floc))
    }

    /// Recursive evaluation of interpolant on each dimension
    #[inline]
    fn populate(
        &self,
        dim: usize,
        origin: &[isize; N],
        weights: &[[T; 4]; N],
        loc: &mut [usize; N],
    ) -> T {
        match dim {
            // If we have arrived at a leaf, index into data
            0 => index_arr(loc, &self.dimprod, self.coeffs),

            // Otherwise, continue recursion
            _ => {
                let next_dim = dim - 1;
                let mut acc = T::zero();
                for i in 0..4 {
                    let w = weights[next_dim][i];
                    if w == T::zero() {
                        continue;
                    }
                    loc[next_dim] =
                        mirror_index(origin[next_dim] + i as isize, self.dims[next_dim]);
                    acc = acc + w * self.populate(next_dim, origin, weights, loc);
                }
                acc
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{interpn, interpn_alloc, MulticubicBSpline};
    use crate::error::ResampleError;
    use crate::multicubic::prefilter::prefilter;
    use crate::testing::*;
    use crate::utils::*;

    /// Every grid node reproduces its sample, for 1 to 4 dimensions
    #[test]
    fn test_exact_at_nodes_1d_to_4d() {
        let mut rng = rng_fixed_seed();

        macro_rules! check {
            ($ndims:expr, $size:expr) => {{
                let dims = [$size; $ndims];
                let nvals: usize = dims.iter().product();
                let vals = randn::<f64>(&mut rng, nvals);

                let xs: Vec<Vec<f64>> = (0..$ndims)
                    .map(|_| linspace(0.0, ($size - 1) as f64, $size))
                    .collect();
                let nodes = meshgrid(xs.iter().collect());
                let obs_t: Vec<Vec<f64>> = (0..$ndims)
                    .map(|i| nodes.iter().map(|x| x[i]).collect())
                    .collect(); // transpose
                let obs: [&[f64]; $ndims] = core::array::from_fn(|i| &obs_t[i][..]);

                let out = interpn_alloc(dims, &vals, &obs, 0.0).unwrap();
                (0..nvals).for_each(|i| assert!((out[i] - vals[i]).abs() < 1e-12));
            }};
        }

        check!(1, 7);
        check!(2, 5);
        check!(3, 4);
        check!(4, 4);
    }

    /// A constant is reproduced everywhere inside the grid,
    /// and points off the grid get the fill value.
    #[test]
    fn test_constant_and_fill_2d() {
        let (nx, ny) = (5, 4);
        let mut coeffs = vec![3.5_f64; nx * ny];
        prefilter(&[nx, ny], &mut coeffs);
        let interpolator = MulticubicBSpline::new([nx, ny], &coeffs)
            .unwrap()
            .with_fill(-7.0);

        let xobs = linspace(-1.0_f64, 5.0, 25);
        let yobs = linspace(-1.0_f64, 4.0, 25);
        for &xi in xobs.iter() {
            for &yi in yobs.iter() {
                let v = interpolator.interp_one([xi, yi]);
                let inside = (0.0..=4.0).contains(&xi) && (0.0..=3.0).contains(&yi);
                assert_eq!(interpolator.contains([xi, yi]), inside);
                if inside {
                    assert!((v - 3.5).abs() < 1e-12);
                } else {
                    assert_eq!(v, -7.0);
                }
            }
        }

        assert_eq!(interpolator.interp_one([f64::NAN, 1.0]), -7.0);
    }

    /// Small steps in the observation point give small steps in the output
    #[test]
    fn test_continuity_1d() {
        let mut rng = rng_fixed_seed();
        let vals = randn::<f64>(&mut rng, 6);
        let obs = linspace(0.0, 5.0, 5001);
        let out = interpn_alloc([6], &vals, &[&obs[..]], 0.0).unwrap();

        out.windows(2)
            .for_each(|w| assert!((w[1] - w[0]).abs() < 1e-2));
    }

    /// Values between the nodes of a 1D line, including the cells at
    /// either edge, against the periodic cubic spline through the
    /// mirror-extended samples
    #[test]
    fn test_reference_1d() {
        let vals = [1.0_f64, -2.0, 0.5, 3.0, 4.0, -1.0];
        let expected = [
            (0.0, 1.0),
            (0.25, 0.588441985645933),
            (0.5, -0.34748803827751196),
            (1.3, -1.8523181818181818),
            (2.75, 2.388344796650718),
            (4.5, 1.0406698564593302),
            (4.9, -0.8930717703349282),
            (5.0, -1.0),
        ];

        let obs: Vec<f64> = expected.iter().map(|e| e.0).collect();
        let out = interpn_alloc([6], &vals, &[&obs[..]], 0.0).unwrap();
        for ((x, v), o) in expected.iter().zip(out.iter()) {
            assert!((o - v).abs() < 1e-12, "x={x}: {o} vs {v}");
        }
    }

    /// Off-node values of a 3D grid with uneven dimension sizes, against
    /// the tensor product of 1D mirror-periodic splines
    #[test]
    fn test_reference_3d() {
        let dims = [4, 3, 5];
        let mut vals = Vec::with_capacity(60);
        for i in 0..4 {
            for j in 0..3 {
                for k in 0..5 {
                    let v = ((i * 7 + j * 3 + k * k) % 5) as f64 - 2.0 + (i * j) as f64 / 2.0;
                    vals.push(v);
                }
            }
        }

        let expected = [
            ([0.2, 1.9, 3.7], 0.01149942),
            ([2.5, 0.4, 0.1], 1.031469857142857),
            ([3.0, 1.0, 4.0], -0.5),
            ([1.1, 0.0, 2.6], -1.4134322857142858),
            ([2.95, 2.0, 0.05], 2.987518060825893),
        ];

        let mut coeffs = vals.clone();
        prefilter(&dims, &mut coeffs);
        let interpolator = MulticubicBSpline::new(dims, &coeffs).unwrap();
        for (x, v) in expected {
            let out = interpolator.interp_one(x);
            assert!((out - v).abs() < 1e-12, "x={x:?}: {out} vs {v}");
        }
    }

    #[test]
    fn test_errors() {
        let vals = [1.0_f64; 6];
        let mut out = [0.0; 2];
        let a = [0.0_f64, 1.0];
        let b = [0.0_f64];

        assert_eq!(
            interpn([2, 2], &vals, &[&a[..], &a[..]], 0.0, &mut out).unwrap_err(),
            ResampleError::ValueCount {
                expected: 4,
                found: 6
            }
        );
        assert_eq!(
            interpn([3, 2], &vals, &[&a[..], &b[..]], 0.0, &mut out).unwrap_err(),
            ResampleError::OutputLength {
                expected: 2,
                found: 1
            }
        );
        assert_eq!(
            MulticubicBSpline::new([0, 6], &vals[..0]).unwrap_err(),
            ResampleError::EmptyDimension
        );
    }
}
