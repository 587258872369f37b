//! Normalization of observation points given in flexible shapes.
//!
//! Queries can be a single point, a list of points, an array of any
//! dimensionality whose last axis holds the 3 coordinates, or three separate
//! coordinate arrays that broadcast against each other. All of them are
//! flattened to a list of points in C order, together with the leading
//! shape the output should be given.
use ndarray::{ArrayView, ArrayViewD, Axis, Dimension, IxDyn};

use crate::error::ResampleError;

/// Observation points in one of the accepted shapes.
#[derive(Clone, Debug)]
pub enum Queries<'a, T> {
    /// A single point; the output has shape `[1]`
    Point([T; 3]),

    /// A list of points; the output has shape `[n]`
    List(&'a [[T; 3]]),

    /// An array of shape `[..., 3]`; the output has shape `[...]`.
    /// A 1D array of length `3k` is read as `k` consecutive points.
    Array(ArrayViewD<'a, T>),

    /// Separate x, y and z coordinate arrays; the output has their
    /// broadcast shape
    Axes([ArrayViewD<'a, T>; 3]),
}

/// Observation points flattened to a list, with the shape to restore
/// on the output.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryPoints<T> {
    pub shape: Vec<usize>,
    pub points: Vec<[T; 3]>,
}

impl<'a, T: Copy> Queries<'a, T> {
    /// Separate coordinate arrays, which will be broadcast together.
    pub fn from_axes<D1, D2, D3>(
        x: ArrayView<'a, T, D1>,
        y: ArrayView<'a, T, D2>,
        z: ArrayView<'a, T, D3>,
    ) -> Self
    where
        D1: Dimension,
        D2: Dimension,
        D3: Dimension,
    {
        Queries::Axes([x.into_dyn(), y.into_dyn(), z.into_dyn()])
    }

    /// Flatten into a list of points.
    ///
    /// # Errors
    /// * If an array's last axis does not have length 3,
    ///   or a 1D array's length is not a multiple of 3
    /// * If coordinate arrays cannot be broadcast to a common shape
    pub fn normalize(&self) -> Result<QueryPoints<T>, ResampleError> {
        match self {
            Queries::Point(p) => Ok(QueryPoints {
                shape: vec![1],
                points: vec![*p],
            }),
            Queries::List(pts) => Ok(QueryPoints {
                shape: vec![pts.len()],
                points: pts.to_vec(),
            }),
            Queries::Array(arr) => {
                let ndim = arr.ndim();
                let shape = arr.shape();
                match ndim {
                    0 => Err(ResampleError::QueryShape(vec![])),
                    // Flat list of coordinates, x0, y0, z0, x1, ...
                    1 if shape[0] % 3 == 0 => {
                        let flat: Vec<T> = arr.iter().copied().collect();
                        let points: Vec<[T; 3]> =
                            flat.chunks_exact(3).map(|p| [p[0], p[1], p[2]]).collect();
                        Ok(QueryPoints {
                            shape: vec![points.len()],
                            points,
                        })
                    }
                    _ if shape[ndim - 1] != 3 => Err(ResampleError::QueryShape(shape.to_vec())),
                    _ => {
                        let points = arr
                            .lanes(Axis(ndim - 1))
                            .into_iter()
                            .map(|p| [p[0], p[1], p[2]])
                            .collect();
                        Ok(QueryPoints {
                            shape: shape[..ndim - 1].to_vec(),
                            points,
                        })
                    }
                }
            }
            Queries::Axes(axes) => {
                let shapes: Vec<&[usize]> = axes.iter().map(|a| a.shape()).collect();
                let broadcast_err =
                    || ResampleError::Broadcast(shapes.iter().map(|s| s.to_vec()).collect());
                let shape = broadcast_shape(&shapes).ok_or_else(broadcast_err)?;

                let dim = IxDyn(&shape);
                let x = axes[0].broadcast(dim.clone()).ok_or_else(broadcast_err)?;
                let y = axes[1].broadcast(dim.clone()).ok_or_else(broadcast_err)?;
                let z = axes[2].broadcast(dim).ok_or_else(broadcast_err)?;

                // `iter` walks each view in logical order, regardless of strides
                let points = x
                    .iter()
                    .zip(y.iter())
                    .zip(z.iter())
                    .map(|((&x, &y), &z)| [x, y, z])
                    .collect();

                Ok(QueryPoints { shape, points })
            }
        }
    }
}

/// Combined shape of arrays under broadcasting rules: shapes are aligned
/// at their last axis, and each axis must either match or have length 1.
fn broadcast_shape(shapes: &[&[usize]]) -> Option<Vec<usize>> {
    let ndim = shapes.iter().map(|s| s.len()).max().unwrap_or(0);
    let mut out = vec![1_usize; ndim];
    for s in shapes {
        let offset = ndim - s.len();
        for (i, &d) in s.iter().enumerate() {
            let o = &mut out[offset + i];
            if *o == 1 {
                *o = d;
            } else if d != 1 && d != *o {
                return None;
            }
        }
    }
    Some(out)
}

impl<'a, T> From<[T; 3]> for Queries<'a, T> {
    fn from(p: [T; 3]) -> Self {
        Queries::Point(p)
    }
}

impl<'a, T> From<&'a [[T; 3]]> for Queries<'a, T> {
    fn from(pts: &'a [[T; 3]]) -> Self {
        Queries::List(pts)
    }
}

impl<'a, T> From<&'a Vec<[T; 3]>> for Queries<'a, T> {
    fn from(pts: &'a Vec<[T; 3]>) -> Self {
        Queries::List(&pts[..])
    }
}

impl<'a, T, D: Dimension> From<ArrayView<'a, T, D>> for Queries<'a, T> {
    fn from(arr: ArrayView<'a, T, D>) -> Self {
        Queries::Array(arr.into_dyn())
    }
}
