//! Cubic spline interpolation / extrapolation on a rectilinear axis
//! with not-a-knot end conditions.
//!
//! The not-a-knot condition requires the third derivative to be continuous
//! across the second and second-to-last knots, so the first two and last two
//! cells each share a single cubic. A consequence is that any cubic
//! polynomial sampled on four or more knots is reproduced exactly, which in
//! particular makes a linear coordinate-to-index map exact on uniform grids.
//!
//! With fewer than four knots the spline degrades to the highest-order
//! polynomial the knots can pin down: a line through two points, and a
//! parabola through three.
//!
//! Outside the knots, the first and last polynomial pieces are extended
//! as-is.
use core::cmp::Ordering;

use num_traits::Float;

use super::{Extrap, Interp1D, RectilinearGrid1D};
use crate::error::GridError;

/// Not-a-knot cubic spline through a set of (x, y) points.
#[derive(Clone, Debug)]
pub struct CubicSpline1D<T: Float> {
    /// Knot locations, strictly increasing
    x: Vec<T>,

    /// Polynomial coefficients `[y0, b, c, d]` of each cell, in powers of
    /// the offset from the cell's lower knot
    coeffs: Vec<[T; 4]>,

    /// Value at the last knot, returned exactly there
    y_last: T,
}

impl<T: Float> CubicSpline1D<T> {
    /// Fit a spline through the given points.
    ///
    /// Points are sorted by `x` first, so descending or unordered inputs
    /// are accepted.
    ///
    /// # Errors
    /// * If `x` and `y` have different lengths
    /// * If there are fewer than 2 points
    /// * If any `x` is NaN or infinite
    /// * If any `x` value is repeated
    pub fn new(x: &[T], y: &[T]) -> Result<Self, GridError> {
        if x.len() != y.len() {
            return Err(GridError::LengthMismatch {
                grid: x.len(),
                vals: y.len(),
            });
        }
        let n = x.len();
        if n < 2 {
            return Err(GridError::NotEnoughPoints(n));
        }
        if !x.iter().all(|v| v.is_finite()) {
            return Err(GridError::NonFinite);
        }

        let mut pairs: Vec<(T, T)> = x.iter().copied().zip(y.iter().copied()).collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        if pairs.windows(2).any(|w| w[1].0 <= w[0].0) {
            return Err(GridError::Repeated);
        }
        let (xs, ys): (Vec<T>, Vec<T>) = pairs.into_iter().unzip();

        let m = second_derivatives(&xs, &ys)?;

        let six = T::from(6).ok_or(GridError::Unrepresentable)?;
        let two = T::one() + T::one();
        let coeffs = (0..n - 1)
            .map(|i| {
                let h = xs[i + 1] - xs[i];
                let d = (ys[i + 1] - ys[i]) / h;
                [
                    ys[i],
                    d - h * (two * m[i] + m[i + 1]) / six,
                    m[i] / two,
                    (m[i + 1] - m[i]) / (six * h),
                ]
            })
            .collect();

        Ok(Self {
            y_last: ys[n - 1],
            x: xs,
            coeffs,
        })
    }

    /// Sorted knot locations
    pub fn knots(&self) -> &[T] {
        &self.x
    }

    /// Classify a location relative to the knot span
    #[inline]
    pub fn locate(&self, loc: T) -> (usize, Extrap) {
        RectilinearGrid1D { grid: &self.x }.index(loc)
    }
}

impl<T: Float> Interp1D<T> for CubicSpline1D<T> {
    #[inline]
    fn eval_one(&self, loc: T) -> T {
        let (i, extrap) = self.locate(loc);

        // The lower knot of a cell is hit exactly through `t == 0`;
        // the last knot has no cell of its own.
        if extrap == Extrap::Inside && loc == self.x[self.x.len() - 1] {
            return self.y_last;
        }

        let [y0, b, c, d] = self.coeffs[i];
        let t = loc - self.x[i];
        y0 + t * (b + t * (c + t * d))
    }
}

/// Solve for the second derivative of the spline at each knot.
///
/// For four or more knots, the end unknowns are eliminated using the
/// not-a-knot conditions, leaving a tridiagonal system on the interior knots.
fn second_derivatives<T: Float>(x: &[T], y: &[T]) -> Result<Vec<T>, GridError> {
    let n = x.len();
    let two = T::one() + T::one();
    let six = T::from(6).ok_or(GridError::Unrepresentable)?;

    let h: Vec<T> = (0..n - 1).map(|i| x[i + 1] - x[i]).collect();
    let slope: Vec<T> = (0..n - 1).map(|i| (y[i + 1] - y[i]) / h[i]).collect();

    match n {
        // Straight line
        2 => Ok(vec![T::zero(); 2]),
        // Single parabola, constant curvature
        3 => {
            let curv = two * (slope[1] - slope[0]) / (h[0] + h[1]);
            Ok(vec![curv; 3])
        }
        _ => {
            // Interior unknowns m[1..=n-2], stored at offset 1
            let nint = n - 2;
            let p = n - 2; // Last interior knot
            let mut sub = vec![T::zero(); nint];
            let mut diag = vec![T::zero(); nint];
            let mut sup = vec![T::zero(); nint];
            let mut rhs = vec![T::zero(); nint];

            for i in 1..=p {
                let k = i - 1;
                sub[k] = h[i - 1];
                diag[k] = two * (h[i - 1] + h[i]);
                sup[k] = h[i];
                rhs[k] = six * (slope[i] - slope[i - 1]);
            }

            // Not-a-knot at x[1]:  m0 = ((h0 + h1) m1 - h0 m2) / h1
            let (h0, h1) = (h[0], h[1]);
            diag[0] = (h0 + h1) * (h0 + two * h1) / h1;
            sup[0] = (h1 * h1 - h0 * h0) / h1;

            // Not-a-knot at x[n-2]:  m[n-1] = ((h[p-1] + h[p]) m[p] - h[p] m[p-1]) / h[p-1]
            let (ha, hb) = (h[p - 1], h[p]);
            sub[nint - 1] = (ha * ha - hb * hb) / ha;
            diag[nint - 1] = (ha + hb) * (two * ha + hb) / ha;

            let interior = solve_tridiagonal(&sub, &diag, &sup, &mut rhs);

            let mut m = vec![T::zero(); n];
            m[1..=p].copy_from_slice(&interior);
            m[0] = ((h0 + h1) * m[1] - h0 * m[2]) / h1;
            m[n - 1] = ((ha + hb) * m[p] - hb * m[p - 1]) / ha;

            Ok(m)
        }
    }
}

/// Thomas algorithm for a tridiagonal system. `sub[0]` and the last entry
/// of `sup` are ignored. `rhs` is used as scratch space.
fn solve_tridiagonal<T: Float>(sub: &[T], diag: &[T], sup: &[T], rhs: &mut [T]) -> Vec<T> {
    let n = diag.len();
    let mut diag_mod = diag.to_vec();

    // Forward sweep
    for k in 1..n {
        let w = sub[k] / diag_mod[k - 1];
        diag_mod[k] = diag_mod[k] - w * sup[k - 1];
        rhs[k] = rhs[k] - w * rhs[k - 1];
    }

    // Back substitution
    let mut out = vec![T::zero(); n];
    out[n - 1] = rhs[n - 1] / diag_mod[n - 1];
    for k in (0..n - 1).rev() {
        out[k] = (rhs[k] - sup[k] * out[k + 1]) / diag_mod[k];
    }

    out
}

#[cfg(test)]
mod test {
    use super::CubicSpline1D;
    use crate::one_dim::Interp1D;
    use crate::testing::*;
    use crate::utils::linspace;

    /// A cubic sampled on four or more knots is reproduced exactly,
    /// including under extrapolation.
    #[test]
    fn test_reproduces_cubic() {
        let mut rng = rng_fixed_seed();
        let f = |x: f64| 0.5 * x.powi(3) - 2.0 * x * x + x - 3.0;

        for n in 4..10 {
            // Uneven grid
            let mut x = linspace(-2.0, 3.0, n);
            let dx = randn::<f64>(&mut rng, n);
            (0..n).for_each(|i| x[i] += (dx[i] - 0.5) / (2.0 * n as f64));
            let y: Vec<f64> = x.iter().map(|&v| f(v)).collect();

            let spline = CubicSpline1D::new(&x, &y).unwrap();
            for loc in linspace(-4.0, 5.0, 37) {
                let err = (spline.eval_one(loc) - f(loc)).abs();
                assert!(err < 1e-9, "n={n} loc={loc} err={err}");
            }
        }
    }

    #[test]
    fn test_exact_at_knots() {
        let x = [0.0_f64, 0.3, 1.1, 1.2, 2.9, 3.0];
        let y = [1.0_f64, -2.0, 0.5, 4.0, 3.0, -1.0];
        let spline = CubicSpline1D::new(&x, &y).unwrap();

        x.iter()
            .zip(y.iter())
            .for_each(|(&xi, &yi)| assert_eq!(spline.eval_one(xi), yi));
    }

    #[test]
    fn test_descending_input() {
        let x = [3.0_f64, 2.0, 1.0, 0.0];
        let y = [0.0_f64, 1.0, 2.0, 3.0];
        let spline = CubicSpline1D::new(&x, &y).unwrap();

        assert_eq!(spline.knots(), &[0.0, 1.0, 2.0, 3.0]);
        for loc in linspace(-1.0, 4.0, 11) {
            assert!((spline.eval_one(loc) - (3.0 - loc)).abs() < 1e-12);
        }
    }

    /// Values between and past the knots of an uneven grid, against an
    /// exact solution of the not-a-knot system
    #[test]
    fn test_nonuniform_reference() {
        let x = [0.0_f64, 0.4, 1.0, 1.5, 2.7, 3.0];
        let y = [1.0_f64, -1.0, 2.0, 0.5, 3.0, -2.0];
        let expected = [
            (-0.5, 19.786670918367346),
            (0.2, -0.9587755102040816),
            (0.7, 0.7000892857142857),
            (1.2, 1.5613265306122448),
            (2.0, 2.3855820105820107),
            (2.9, 0.19915343915343917),
            (3.0, -2.0),
            (3.5, -23.404383975812546),
        ];

        // Same spline whatever order the knots arrive in
        let order = [3, 0, 5, 1, 4, 2];
        let xs: Vec<f64> = order.iter().map(|&i| x[i]).collect();
        let ys: Vec<f64> = order.iter().map(|&i| y[i]).collect();

        for spline in [
            CubicSpline1D::new(&x, &y).unwrap(),
            CubicSpline1D::new(&xs, &ys).unwrap(),
        ] {
            for (loc, v) in expected {
                let out = spline.eval_one(loc);
                assert!((out - v).abs() < 1e-11, "x={loc}: {out} vs {v}");
            }
        }
    }

    #[test]
    fn test_degenerate_sizes() {
        // Two points: line, extrapolated both ways
        let spline = CubicSpline1D::new(&[1.0_f64, 3.0], &[0.0, 1.0]).unwrap();
        assert!((spline.eval_one(-1.0) + 1.0).abs() < 1e-12);
        assert!((spline.eval_one(2.0) - 0.5).abs() < 1e-12);

        // Three points: parabola
        let f = |x: f64| x * x - x;
        let x = [0.0_f64, 0.5, 2.0];
        let y: Vec<f64> = x.iter().map(|&v| f(v)).collect();
        let spline = CubicSpline1D::new(&x, &y).unwrap();
        let locs = linspace(-3.0, 3.0, 13);
        let vals = spline.eval_alloc(&locs);
        locs.iter()
            .zip(vals.iter())
            .for_each(|(&l, &v)| assert!((v - f(l)).abs() < 1e-12));
    }

    #[test]
    fn test_errors() {
        use crate::error::GridError;

        assert_eq!(
            CubicSpline1D::new(&[1.0_f64], &[1.0]).unwrap_err(),
            GridError::NotEnoughPoints(1)
        );
        assert_eq!(
            CubicSpline1D::new(&[1.0_f64, 2.0], &[1.0]).unwrap_err(),
            GridError::LengthMismatch { grid: 2, vals: 1 }
        );
        assert_eq!(
            CubicSpline1D::new(&[1.0_f64, f64::NAN], &[1.0, 2.0]).unwrap_err(),
            GridError::NonFinite
        );
        assert_eq!(
            CubicSpline1D::new(&[1.0_f64, 2.0, 2.0, 3.0], &[1.0, 2.0, 3.0, 4.0]).unwrap_err(),
            GridError::Repeated
        );
    }
}
