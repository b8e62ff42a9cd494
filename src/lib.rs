pub mod adjacency;
pub mod error;
pub mod triangulation;
pub mod types;
pub mod utils;
pub mod validation;
pub mod voronoi;

#[cfg(feature = "debug_context")]
pub mod debug;

pub use glam;
pub use hashbrown;

pub use adjacency::AdjacencyIndex;
pub use error::{InvalidInputError, TriangulationError};
pub use triangulation::{triangulation_from_2d_vertices, Triangulation, TriangulationConfiguration};
pub use types::{Bounds, Edge, Point, Triangle};
pub use voronoi::extract_voronoi_edges;

///////////////////////////////////////////////////////////
///                                                     ///
///                        Tests                        ///
///                                                     ///
///////////////////////////////////////////////////////////
