//! Real and complex sample types.
//!
//! B-spline resampling is defined on real numbers, so complex samples are
//! split into real and imaginary planes which are resampled independently
//! at the same index-space coordinates and recombined.
use core::fmt::Debug;

use ndarray::ArrayView3;
use num_complex::Complex;
use num_traits::{Float, Zero};

/// A value that can be stored on the grid and resampled.
pub trait Sample: Copy + Zero + Debug {
    /// Real scalar type of the grid coordinates and of each plane
    type Real: Float + Debug;

    /// Number of real planes per sample
    const PLANES: usize;

    /// Extract one real plane, flattened in C order.
    fn plane(values: &ArrayView3<'_, Self>, plane: usize) -> Vec<Self::Real>;

    /// Rebuild a sample from one resampled value per plane.
    fn from_planes(parts: &[Self::Real]) -> Self;
}

macro_rules! impl_real_sample {
    ($T:ty) => {
        impl Sample for $T {
            type Real = $T;
            const PLANES: usize = 1;

            #[inline]
            fn plane(values: &ArrayView3<'_, Self>, _plane: usize) -> Vec<Self::Real> {
                values.iter().copied().collect()
            }

            #[inline]
            fn from_planes(parts: &[Self::Real]) -> Self {
                parts[0]
            }
        }
    };
}

macro_rules! impl_complex_sample {
    ($T:ty) => {
        impl Sample for Complex<$T> {
            type Real = $T;
            const PLANES: usize = 2;

            #[inline]
            fn plane(values: &ArrayView3<'_, Self>, plane: usize) -> Vec<Self::Real> {
                match plane {
                    0 => values.iter().map(|c| c.re).collect(),
                    _ => values.iter().map(|c| c.im).collect(),
                }
            }

            #[inline]
            fn from_planes(parts: &[Self::Real]) -> Self {
                Complex::new(parts[0], parts[1])
            }
        }
    };
}

impl_real_sample!(f32);
impl_real_sample!(f64);
impl_complex_sample!(f32);
impl_complex_sample!(f64);
