use thiserror::Error;

use crate::types::{Bounds, Point};

/// Errors that abort a triangulation. No partial triangulation is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TriangulationError {
    /// Three points intended to form a triangle are collinear (or coincident).
    #[error("degenerate geometry: vertices {verts:?} are collinear")]
    DegenerateGeometry { verts: [Point; 3] },

    /// No triangle circumcircle strictly contains the vertex, it cannot be inserted.
    #[error("no triangle encloses vertex {point:?}")]
    NoEnclosingTriangle { point: Point },

    /// The input was rejected before the triangulation started.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Input rejected by the validation that runs before any triangle is created.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    #[error("vertex {index} has a non-finite coordinate: {point:?}")]
    NonFiniteVertex { index: usize, point: Point },

    #[error("vertex {index} {point:?} is not strictly inside the bounds {bounds:?}")]
    OutOfBounds {
        index: usize,
        point: Point,
        bounds: Bounds,
    },

    #[error("vertex {index} {point:?} is a duplicate of vertex {first_index}")]
    DuplicateVertex {
        index: usize,
        first_index: usize,
        point: Point,
    },

    #[error("bounds {0:?} are not finite or have an empty area")]
    InvalidBounds(Bounds),
}
