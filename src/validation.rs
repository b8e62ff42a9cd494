use thiserror::Error;

use crate::adjacency::AdjacencyIndex;
use crate::types::{Point, Triangle, TriangleId, Triangles};

#[cfg(feature = "profile_traces")]
use tracing::{span, Level};

/// Invariant violations found by [validate_triangulation]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A vertex of the triangulation is strictly inside the circumcircle of a triangle
    #[error("triangle {triangle:?} has vertex {vertex:?} strictly inside its circumcircle")]
    DelaunayViolation { triangle: Triangle, vertex: Point },

    /// A live triangle is not registered in the adjacency entry of one of its vertices
    #[error("triangle {id} is missing from the adjacency entry of its vertex {vertex:?}")]
    MissingAdjacency { id: TriangleId, vertex: Point },

    /// An adjacency entry references a triangle which is not live, or does not touch the entry's vertex
    #[error("adjacency entry of vertex {vertex:?} references stale triangle {id}")]
    StaleAdjacency { id: TriangleId, vertex: Point },
}

/// Checks that:
/// - every triangle is registered in the adjacency entries of its three vertices, and only there
/// - no vertex lies strictly inside the circumcircle of a triangle (Delaunay property)
///
/// The Delaunay check is quadratic, it is meant for tests and debugging.
pub fn validate_triangulation(
    triangles: &Triangles,
    adjacency: &AdjacencyIndex,
) -> Result<(), ValidationError> {
    #[cfg(feature = "profile_traces")]
    let _span = span!(Level::TRACE, "validate_triangulation").entered();

    for (id, triangle) in triangles.iter() {
        for vertex in triangle.verts() {
            if !adjacency.contains(vertex, id) {
                return Err(ValidationError::MissingAdjacency {
                    id,
                    vertex: *vertex,
                });
            }
        }
    }

    for (vertex, ids) in adjacency.entries() {
        for &id in ids.iter() {
            match triangles.get(id) {
                Some(triangle) if triangle.contains_vertex(*vertex) => (),
                _ => {
                    return Err(ValidationError::StaleAdjacency {
                        id,
                        vertex: *vertex,
                    })
                }
            }
        }
    }

    for triangle in triangles.values() {
        for &vertex in adjacency.vertices() {
            if triangle.is_inside_circumcircle(vertex) && !triangle.contains_vertex(vertex) {
                return Err(ValidationError::DelaunayViolation {
                    triangle: *triangle,
                    vertex,
                });
            }
        }
    }
    Ok(())
}

///////////////////////////////////////////////////////////
///                                                     ///
///                        Tests                        ///
///                                                     ///
///////////////////////////////////////////////////////////
