//! Helpers for building grids and observation points.
use itertools::Itertools;
use num_traits::Float;

/// Evenly spaced values from `start` to `stop`, including both ends.
///
/// A single value is just `start`.
pub fn linspace<T: Float>(start: T, stop: T, n: usize) -> Vec<T> {
    if n < 2 {
        return vec![start; n];
    }
    let last = T::from(n - 1).unwrap_or_else(T::one);
    let dx = (stop - start) / last;
    (0..n)
        .map(|i| match i {
            i if i == n - 1 => stop,
            i => start + T::from(i).unwrap_or_else(T::zero) * dx,
        })
        .collect()
}

/// Every combination of the given axis values, in C ordering
/// (x0, y0, z0), (x0, y0, z1), ..., (x0, yn, zn), (x1, y0, z0), ...
///
/// This is the order in which values on the corresponding grid are stored.
pub fn meshgrid<T: Copy>(x: Vec<&Vec<T>>) -> Vec<Vec<T>> {
    x.into_iter()
        .multi_cartesian_product()
        .map(|xx| xx.into_iter().copied().collect())
        .collect()
}
