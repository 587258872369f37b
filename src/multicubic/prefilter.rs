//! Recursive prefilter converting samples into cubic B-spline coefficients.
//!
//! The cubic B-spline interpolation condition is a symmetric convolution
//! `(c[i-1] + 4 c[i] + c[i+1]) / 6 = s[i]`, which is inverted exactly by
//! a causal and an anti-causal first-order recursive filter sharing the
//! pole `z = sqrt(3) - 2`. Both passes are initialized assuming the line
//! continues as its own mirror image past either end.
use num_traits::Float;

/// Pole of the cubic B-spline interpolation filter
#[inline]
fn cubic_pole<T: Float>() -> T {
    let two = T::one() + T::one();
    let three = two + T::one();
    three.sqrt() - two
}

/// Convert one line of samples into B-spline coefficients in place.
///
/// Lines of length 1 are left as-is.
pub fn prefilter_line<T: Float>(c: &mut [T]) {
    let n = c.len();
    if n < 2 {
        return;
    }

    let one = T::one();
    let z = cubic_pole::<T>();

    // Overall gain of the two passes is 1 / ((1 - z)(1 - 1/z))
    let gain = (one - z) * (one - one / z);
    c.iter_mut().for_each(|x| *x = *x * gain);

    // Causal pass, with the sum over the mirrored line folded into c[0]
    let zn1 = z.powi((n - 1).min(i32::MAX as usize) as i32);
    let mut zi = z;
    let mut c0 = c[0] + zn1 * c[n - 1];
    for i in 1..n - 1 {
        c0 = c0 + zi * (c[i] + zn1 * c[n - 1 - i]);
        zi = zi * z;
    }
    c[0] = c0 / (one - zn1 * zn1);
    for i in 1..n {
        c[i] = c[i] + z * c[i - 1];
    }

    // Anti-causal pass
    c[n - 1] = (z * c[n - 2] + c[n - 1]) * z / (z * z - one);
    for i in (0..n - 1).rev() {
        c[i] = z * (c[i + 1] - c[i]);
    }
}

/// Apply the prefilter along one axis of a C-ordered array, in place.
///
/// Assumes `vals.len() == dims.iter().product()`.
pub fn prefilter_axis<T: Float>(dims: &[usize], axis: usize, vals: &mut [T]) {
    let n = dims[axis];
    if n < 2 {
        return;
    }

    // Stride between consecutive entries along this axis, and the number
    // of independent lines above and below it in memory
    let stride: usize = dims[axis + 1..].iter().product();
    let nouter: usize = dims[..axis].iter().product();

    let mut line = vec![T::zero(); n];
    for outer in 0..nouter {
        for inner in 0..stride {
            let base = outer * n * stride + inner;
            (0..n).for_each(|k| line[k] = vals[base + k * stride]);
            prefilter_line(&mut line);
            (0..n).for_each(|k| vals[base + k * stride] = line[k]);
        }
    }
}

/// Apply the prefilter along every axis of a C-ordered array, in place.
pub fn prefilter<T: Float>(dims: &[usize], vals: &mut [T]) {
    for axis in 0..dims.len() {
        prefilter_axis(dims, axis, vals);
    }
}
