//! Error types for grid construction and resampling.
use thiserror::Error;

/// Failures while building a one-dimensional spline over a grid axis.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid needs at least 2 points, found {0}")]
    NotEnoughPoints(usize),

    #[error("grid has {grid} coordinates but {vals} values")]
    LengthMismatch { grid: usize, vals: usize },

    #[error("grid coordinates must be finite")]
    NonFinite,

    #[error("grid coordinate is repeated; axis must be strictly monotonic")]
    Repeated,

    #[error("unrepresentable number")]
    Unrepresentable,
}

/// Failures surfaced by the 3D resampling pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResampleError {
    #[error("grid axis {axis}: {source}")]
    Axis {
        axis: usize,
        #[source]
        source: GridError,
    },

    #[error("values have {values} entries along axis {axis}, but the grid has {grid}")]
    ShapeMismatch {
        axis: usize,
        grid: usize,
        values: usize,
    },

    #[error("grid of size {expected} was given {found} values")]
    ValueCount { expected: usize, found: usize },

    #[error("grid dimensions must all be nonzero")]
    EmptyDimension,

    #[error("query coordinates must have a trailing axis of length 3, got shape {0:?}")]
    QueryShape(Vec<usize>),

    #[error("query coordinate arrays with shapes {0:?} cannot be broadcast together")]
    Broadcast(Vec<Vec<usize>>),

    #[error("{found} observation points but {expected} output slots")]
    OutputLength { expected: usize, found: usize },
}
