//! Multicubic B-spline resampling in index space.
//!
//! Grid values are first converted into cubic B-spline coefficients by a
//! separable recursive prefilter, after which the interpolant at a
//! fractional index location is a weighted sum over a 4^ndims footprint of
//! coefficients. The resulting interpolant passes through every sample and
//! has continuous first and second derivatives everywhere inside the grid.
//!
//! Compared to a local Hermite-style cubic, this
//! * Requires one O(size) pass per dimension over the data before evaluation
//! * Requires storing a coefficient array the size of the data
//! * Couples every output value to every sample through the prefilter,
//!   although the influence decays geometrically with distance
//!
//! Coefficients past the edges of the grid are taken as mirror images of
//! the interior ones (`-k -> k`, `n-1+k -> n-1-k`), matching the boundary
//! condition the prefilter is initialized with.
//!
//! Observation points are not extrapolated: any point outside
//! `[0, n-1]` on any axis evaluates to a fill value.
//!
//! References
//! * Unser, M. "Splines: a perfect fit for signal and image processing",
//!   IEEE Signal Processing Magazine, 1999
use num_traits::Float;

pub mod bspline;
pub mod prefilter;

pub use bspline::MulticubicBSpline;

/// Cubic B-spline weights for the 4 coefficients starting one below the
/// containing cell, at normalized offset `t` in `[0, 1)` from the cell's
/// lower index.
#[inline]
pub(crate) fn bspline_weights<T: Float>(t: T) -> [T; 4] {
    let one = T::one();
    let two = one + one;
    let three = two + one;
    let four = two + two;
    let sixth = one / (three + three);

    let t2 = t * t;
    let t3 = t2 * t;
    let u = one - t;

    [
        u * u * u * sixth,
        (three * t3 - (three + three) * t2 + four) * sixth,
        (-three * t3 + three * t2 + three * t + one) * sixth,
        t3 * sixth,
    ]
}

/// Reflect a possibly out-of-range index back into `0..n`
/// with whole-sample symmetry about the end points.
#[inline]
pub(crate) fn mirror_index(i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let period = 2 * (n as isize - 1);
    let mut i = i.rem_euclid(period);
    if i >= n as isize {
        i = period - i;
    }
    i as usize
}
