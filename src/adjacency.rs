use hashbrown::{HashMap, HashSet};

use crate::types::{Point, Triangle, TriangleId};

/// Maps every vertex of a triangulation to the live triangles touching it.
///
/// A triangle is registered in the entries of its three vertices if and only if it is part of the triangulation.
/// [crate::triangulation::Triangulation] keeps both in sync, registering (resp. unregistering) a triangle in the same
/// step as it is added to (resp. removed from) the arena.
#[derive(Clone, Debug, Default)]
pub struct AdjacencyIndex {
    entries: HashMap<Point, HashSet<TriangleId>>,
}

impl AdjacencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices_count: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(vertices_count),
        }
    }

    /// Adds `id` to the entry of each vertex of `triangle`, creating the entries if needed
    pub(crate) fn register(&mut self, id: TriangleId, triangle: &Triangle) {
        for vertex in triangle.verts() {
            self.entries.entry(*vertex).or_default().insert(id);
        }
    }

    /// Removes `id` from the entry of each vertex of `triangle`.
    ///
    /// Entries are kept even when emptied: a vertex never leaves the triangulation.
    pub(crate) fn unregister(&mut self, id: TriangleId, triangle: &Triangle) {
        for vertex in triangle.verts() {
            if let Some(entry) = self.entries.get_mut(vertex) {
                entry.remove(&id);
            }
        }
    }

    /// Live triangles touching `point`. Empty for an unknown point.
    pub fn neighbors_of<'a>(&'a self, point: &Point) -> impl Iterator<Item = TriangleId> + 'a {
        self.entries
            .get(point)
            .into_iter()
            .flat_map(|entry| entry.iter().copied())
    }

    #[inline]
    pub fn neighbor_count(&self, point: &Point) -> usize {
        self.entries.get(point).map_or(0, HashSet::len)
    }

    #[inline]
    pub fn contains(&self, point: &Point, id: TriangleId) -> bool {
        self.entries
            .get(point)
            .is_some_and(|entry| entry.contains(&id))
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Point> + '_ {
        self.entries.keys()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Point, &HashSet<TriangleId>)> + '_ {
        self.entries.iter()
    }
}

///////////////////////////////////////////////////////////
///                                                     ///
///                        Tests                        ///
///                                                     ///
///////////////////////////////////////////////////////////
