use hashbrown::{HashMap, HashSet};
use tracing::{debug, error};

#[cfg(feature = "parallel_filtering")]
use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};

use crate::adjacency::AdjacencyIndex;
use crate::error::{InvalidInputError, TriangulationError};
use crate::types::{Bounds, Edge, Float, Point, Triangle, TriangleId, Triangles, Vertex2d};
use crate::utils::validate_vertices;
use crate::validation::{validate_triangulation, ValidationError};
use crate::voronoi::{extract_voronoi_edges, voronoi_cell};

#[cfg(feature = "progress_log")]
use tracing::info;

#[cfg(feature = "debug_context")]
use crate::debug::{DebugConfiguration, DebugContext, TriangulationPhase};

#[cfg(feature = "profile_traces")]
use tracing::{span, Level};

/// When the bounds are derived from the input, each side is pushed away from the vertices by this ratio of their largest extent.
pub const DEFAULT_SCAFFOLD_MARGIN: Float = 0.1;

pub const DEFAULT_FILTER_PARALLEL_TRI_COUNT_THRESHOLD: usize = 100_000;
pub const DEFAULT_FILTER_PARALLEL_MIN_BATCH_LEN: usize = 1000;

#[derive(Clone, Debug)]
pub struct TriangulationConfiguration {
    /// Rectangle covered by the scaffold. Every input vertex must be strictly inside it, or be one of its corners.
    ///
    /// [None] derives it from the input vertices, see [Bounds::enclosing].
    pub bounds: Option<Bounds>,
    /// Margin ratio used when `bounds` is [None]
    pub scaffold_margin: Float,
    /// Above this triangle count, [Triangulation::triangles_without_scaffold] filters in parallel (with the `parallel_filtering` feature)
    pub filter_parallel_tri_count_threshold: usize,
    pub filter_parallel_min_batch_len: usize,
    #[cfg(feature = "debug_context")]
    pub debug_config: DebugConfiguration,
}
impl Default for TriangulationConfiguration {
    fn default() -> Self {
        Self {
            bounds: None,
            scaffold_margin: DEFAULT_SCAFFOLD_MARGIN,
            filter_parallel_tri_count_threshold: DEFAULT_FILTER_PARALLEL_TRI_COUNT_THRESHOLD,
            filter_parallel_min_batch_len: DEFAULT_FILTER_PARALLEL_MIN_BATCH_LEN,
            #[cfg(feature = "debug_context")]
            debug_config: DebugConfiguration::default(),
        }
    }
}

impl TriangulationConfiguration {
    /// Configuration with the explicit `(0, 0)` to `(max_x, max_y)` bounds
    pub fn with_max(max_x: Float, max_y: Float) -> Self {
        Self {
            bounds: Some(Bounds::from_max(max_x, max_y)),
            ..Default::default()
        }
    }
}

/// A Delaunay triangulation and its vertex adjacency index.
///
/// Triangles formed with the four scaffold corners are part of the triangulation: they are not removed at the end of the
/// insertions. Use [Triangulation::triangles_without_scaffold] to only get the triangles of the input vertices.
#[derive(Debug)]
pub struct Triangulation {
    triangles: Triangles,
    adjacency: AdjacencyIndex,
    bounds: Bounds,
    filter_parallel_tri_count_threshold: usize,
    filter_parallel_min_batch_len: usize,

    #[cfg(feature = "debug_context")]
    pub debug_context: DebugContext,
}

/// Creates a Delaunay triangulation of the input vertices with the Bowyer-Watson algorithm.
///
/// The triangulation starts from a scaffold: the bounding rectangle split along its diagonal into two triangles.
/// Vertices are then inserted one by one, in the input order.
///
/// Vertices requirements:
/// - Finite coordinates
/// - No duplicates
/// - Strictly inside the configured bounds. A vertex equal to one of the bounds corners is accepted and ignored, since the scaffold already contains it.
///
/// Collinear vertices which would create a flat triangle abort the triangulation with [TriangulationError::DegenerateGeometry].
/// So do cocircular (or nearly cocircular) vertices when rounding errors on the circumcircles tests make the hole left by an
/// insertion not star-shaped around the inserted vertex. No partial triangulation is returned.
pub fn triangulation_from_2d_vertices<T: Vertex2d>(
    vertices: &[T],
    config: TriangulationConfiguration,
) -> Result<Triangulation, TriangulationError> {
    #[cfg(feature = "profile_traces")]
    let _span = span!(Level::TRACE, "triangulation_from_2d_vertices").entered();

    let points: Vec<Point> = vertices.iter().map(|v| v.to_point()).collect();
    validate_vertices(&points)?;

    let bounds = match config.bounds {
        Some(bounds) => bounds,
        None => Bounds::enclosing(&points, config.scaffold_margin),
    };
    if !bounds.is_valid() {
        return Err(InvalidInputError::InvalidBounds(bounds).into());
    }

    let insertion_points = filter_insertion_vertices(&points, &bounds)?;

    let mut triangulation = Triangulation::with_scaffold(bounds, insertion_points.len(), &config)?;

    // Shared by all the insertions
    let mut buffers = InsertionBuffers::default();

    for (_index, &point) in insertion_points.iter().enumerate() {
        #[cfg(feature = "debug_context")]
        {
            let force_end = triangulation.debug_context.set_step(_index);
            if force_end {
                break;
            }
        }

        if let Err(err) = triangulation.insert_vertex(point, &mut buffers) {
            error!("Failed to insert vertex {:?}, step {}: {}", point, _index, err);
            return Err(err);
        }

        #[cfg(feature = "progress_log")]
        {
            if _index % ((insertion_points.len() / 50) + 1) == 0 {
                let progress = 100. * _index as f32 / insertion_points.len() as f32;
                info!(
                    "Triangulation progress, step n°{}, {}%: {}/{}",
                    _index,
                    progress,
                    _index,
                    insertion_points.len()
                );
            }
        }
    }

    debug!(
        "Triangulated {} vertices into {} triangles",
        triangulation.vertex_count(),
        triangulation.triangle_count()
    );
    Ok(triangulation)
}

/// Returns the vertices to insert, in order. Vertices equal to a corner of `bounds` are skipped.
pub(crate) fn filter_insertion_vertices(
    points: &[Point],
    bounds: &Bounds,
) -> Result<Vec<Point>, InvalidInputError> {
    #[cfg(feature = "profile_traces")]
    let _span = span!(Level::TRACE, "filter_insertion_vertices").entered();

    let corners = bounds.corners();
    let mut first_indexes: HashMap<Point, usize> = HashMap::with_capacity(points.len());
    let mut insertion_points = Vec::with_capacity(points.len());

    for (index, &point) in points.iter().enumerate() {
        if let Some(&first_index) = first_indexes.get(&point) {
            return Err(InvalidInputError::DuplicateVertex {
                index,
                first_index,
                point,
            });
        }
        first_indexes.insert(point, index);

        if corners.contains(&point) {
            debug!("Vertex {} {:?} is a scaffold corner, skipped", index, point);
            continue;
        }
        if !bounds.contains_strictly(point) {
            return Err(InvalidInputError::OutOfBounds {
                index,
                point,
                bounds: *bounds,
            });
        }
        insertion_points.push(point);
    }
    Ok(insertion_points)
}

/// Buffers re-used by every call to [Triangulation::insert_vertex], to share their allocations.
#[derive(Default)]
pub(crate) struct InsertionBuffers {
    bad_triangles: Vec<TriangleId>,
    edge_counts: HashMap<Edge, u8>,
    boundary: Vec<(Edge, TriangleId)>,
    new_triangles: Vec<Triangle>,
}

/// Collects in `bad_triangles` every triangle whose circumcircle strictly contains `vertex`.
///
/// Scans all the triangles: `vertex` is not part of the triangulation yet and has no adjacency to start from.
pub(crate) fn find_bad_triangles(
    triangles: &Triangles,
    vertex: Point,
    bad_triangles: &mut Vec<TriangleId>,
) {
    #[cfg(feature = "more_profile_traces")]
    let _span = span!(Level::TRACE, "find_bad_triangles").entered();

    bad_triangles.clear();
    bad_triangles.extend(
        triangles
            .iter()
            .filter(|(_, triangle)| triangle.is_inside_circumcircle(vertex))
            .map(|(id, _)| id),
    );
}

/// Collects in `boundary` the edges of the polygonal hole left by the bad triangles, each with the bad triangle it
/// belongs to. Edges keep the vertex order of their triangle.
///
/// Those are the edges used by exactly one bad triangle. Edges shared by two bad triangles are inside the hole.
pub(crate) fn find_hole_boundary(
    triangles: &Triangles,
    bad_triangles: &[TriangleId],
    edge_counts: &mut HashMap<Edge, u8>,
    boundary: &mut Vec<(Edge, TriangleId)>,
) {
    #[cfg(feature = "more_profile_traces")]
    let _span = span!(Level::TRACE, "find_hole_boundary").entered();

    edge_counts.clear();
    boundary.clear();

    for triangle in bad_triangles.iter().filter_map(|&id| triangles.get(id)) {
        for edge in triangle.edges() {
            *edge_counts.entry(edge).or_insert(0) += 1;
        }
    }
    // Second pass over the triangles rather than the map, to keep a deterministic order
    for &id in bad_triangles.iter() {
        let Some(triangle) = triangles.get(id) else {
            continue;
        };
        for edge in triangle.edges() {
            if edge_counts.get(&edge) == Some(&1) {
                boundary.push((edge, id));
            }
        }
    }
}

impl Triangulation {
    /// Seeds a triangulation with the two triangles of the `bounds` rectangle
    ///
    /// ```text
    /// c1-----------c2
    /// |          / |
    /// |  t0    /   |
    /// |      /     |
    /// |    /   t1  |
    /// |  /         |
    /// c0-----------c3
    /// ```
    pub(crate) fn with_scaffold(
        bounds: Bounds,
        vertices_count: usize,
        config: &TriangulationConfiguration,
    ) -> Result<Self, TriangulationError> {
        let [c0, c1, c2, c3] = bounds.corners();
        let scaffold = [Triangle::new(c0, c1, c2)?, Triangle::new(c0, c2, c3)?];

        let mut triangulation = Self {
            // A triangulation of n vertices has roughly 2n triangles
            triangles: Triangles::with_capacity(2 * vertices_count + 2),
            adjacency: AdjacencyIndex::with_capacity(vertices_count + 4),
            bounds,
            filter_parallel_tri_count_threshold: config.filter_parallel_tri_count_threshold,
            filter_parallel_min_batch_len: config.filter_parallel_min_batch_len,
            #[cfg(feature = "debug_context")]
            debug_context: DebugContext::new(config.debug_config.clone()),
        };
        for triangle in scaffold {
            triangulation.create_triangle(triangle);
        }

        #[cfg(feature = "debug_context")]
        triangulation.debug_context.push_snapshot(
            TriangulationPhase::ScaffoldInsertion,
            &triangulation.triangles,
            &scaffold,
        );

        Ok(triangulation)
    }

    /// Inserts `vertex`: removes the bad triangles and fills the hole with a fan of triangles around `vertex`.
    ///
    /// The new triangles are all built before the triangulation is modified, so that an error leaves it untouched.
    ///
    /// Fails with [TriangulationError::DegenerateGeometry] when a fan triangle is flat, or when the hole is not star-shaped
    /// around `vertex`: each fan triangle must keep the orientation of the bad triangle its boundary edge comes from.
    pub(crate) fn insert_vertex(
        &mut self,
        vertex: Point,
        buffers: &mut InsertionBuffers,
    ) -> Result<(), TriangulationError> {
        #[cfg(feature = "profile_traces")]
        let _span = span!(Level::TRACE, "insert_vertex").entered();

        find_bad_triangles(&self.triangles, vertex, &mut buffers.bad_triangles);
        if buffers.bad_triangles.is_empty() {
            return Err(TriangulationError::NoEnclosingTriangle { point: vertex });
        }

        find_hole_boundary(
            &self.triangles,
            &buffers.bad_triangles,
            &mut buffers.edge_counts,
            &mut buffers.boundary,
        );

        buffers.new_triangles.clear();
        for &(edge, source_id) in buffers.boundary.iter() {
            let triangle = Triangle::new(vertex, edge.from, edge.to)?;
            let same_orientation = self.triangles.get(source_id).is_some_and(|source| {
                (source.orientation() > 0.) == (triangle.orientation() > 0.)
            });
            if !same_orientation {
                return Err(TriangulationError::DegenerateGeometry {
                    verts: *triangle.verts(),
                });
            }
            buffers.new_triangles.push(triangle);
        }

        #[cfg(feature = "debug_context")]
        let removed: Vec<Triangle> = buffers
            .bad_triangles
            .iter()
            .filter_map(|&id| self.triangles.get(id))
            .copied()
            .collect();

        for &id in buffers.bad_triangles.iter() {
            self.retract_triangle(id);
        }

        #[cfg(feature = "debug_context")]
        self.debug_context.push_snapshot(
            TriangulationPhase::RemoveBadTriangles(vertex),
            &self.triangles,
            &removed,
        );

        for &triangle in buffers.new_triangles.iter() {
            self.create_triangle(triangle);
        }

        #[cfg(feature = "debug_context")]
        self.debug_context.push_snapshot(
            TriangulationPhase::FillHole(vertex),
            &self.triangles,
            &buffers.new_triangles,
        );

        Ok(())
    }

    /// Adds `triangle` to the triangulation and registers it in the adjacency index
    pub(crate) fn create_triangle(&mut self, triangle: Triangle) -> TriangleId {
        let (id, inserted) = self.triangles.insert(triangle);
        if inserted {
            self.adjacency.register(id, &triangle);
        }
        id
    }

    /// Unregisters the triangle from the adjacency index and removes it from the triangulation
    pub(crate) fn retract_triangle(&mut self, id: TriangleId) -> Option<Triangle> {
        let triangle = *self.triangles.get(id)?;
        self.adjacency.unregister(id, &triangle);
        self.triangles.remove(id)
    }

    #[inline]
    pub fn triangles(&self) -> impl Iterator<Item = &Triangle> + '_ {
        self.triangles.values()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.count()
    }

    #[inline]
    pub fn contains(&self, triangle: &Triangle) -> bool {
        self.triangles.contains(triangle)
    }

    /// The triangles arena, with ids matching the ones of [Triangulation::adjacency]
    #[inline]
    pub fn arena(&self) -> &Triangles {
        &self.triangles
    }

    #[inline]
    pub fn adjacency(&self) -> &AdjacencyIndex {
        &self.adjacency
    }

    /// Live triangles touching `point`
    pub fn neighbors_of<'a>(&'a self, point: &Point) -> impl Iterator<Item = &'a Triangle> + 'a {
        self.adjacency
            .neighbors_of(point)
            .filter_map(|id| self.triangles.get(id))
    }

    /// All the vertices, scaffold corners included
    pub fn vertices(&self) -> impl Iterator<Item = &Point> + '_ {
        self.adjacency.vertices()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.vertex_count()
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn scaffold_vertices(&self) -> [Point; 4] {
        self.bounds.corners()
    }

    #[inline]
    pub fn is_scaffold_vertex(&self, point: Point) -> bool {
        self.scaffold_vertices().contains(&point)
    }

    /// Returns the triangles which do not have any scaffold corner as a vertex.
    ///
    /// When the corners were not part of the input, what remains is a triangulation of the convex hull of the input vertices.
    ///
    /// Filters in parallel above the `filter_parallel_tri_count_threshold` of the [TriangulationConfiguration] (with the
    /// `parallel_filtering` feature).
    pub fn triangles_without_scaffold(&self) -> Vec<Triangle> {
        #[cfg(feature = "profile_traces")]
        let _span = span!(Level::TRACE, "triangles_without_scaffold").entered();

        let corners = self.scaffold_vertices();
        let is_inner = |t: &&Triangle| !t.verts().iter().any(|v| corners.contains(v));

        #[cfg(feature = "parallel_filtering")]
        if self.triangles.count() > self.filter_parallel_tri_count_threshold {
            return self
                .triangles
                .buffer()
                .par_iter()
                .with_min_len(self.filter_parallel_min_batch_len)
                .filter_map(|slot| slot.as_ref())
                .filter(is_inner)
                .copied()
                .collect();
        }
        self.triangles.values().filter(is_inner).copied().collect()
    }

    /// Edges of the dual Voronoi diagram, see [extract_voronoi_edges]
    pub fn voronoi_edges(&self) -> HashSet<Edge> {
        extract_voronoi_edges(&self.triangles, &self.adjacency)
    }

    /// Voronoi cell of `site`, see [voronoi_cell]
    pub fn voronoi_cell(&self, site: Point) -> Option<Vec<Point>> {
        voronoi_cell(&self.triangles, &self.adjacency, site)
    }

    /// Checks the Delaunay property and the consistency of the adjacency index, see [validate_triangulation]
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_triangulation(&self.triangles, &self.adjacency)
    }
}

///////////////////////////////////////////////////////////
///                                                     ///
///                        Tests                        ///
///                                                     ///
///////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use hashbrown::HashMap;

    use crate::{
        error::{InvalidInputError, TriangulationError},
        triangulation::{
            filter_insertion_vertices, find_bad_triangles, find_hole_boundary,
            triangulation_from_2d_vertices, InsertionBuffers, Triangulation,
            TriangulationConfiguration,
        },
        types::{Bounds, Edge, Point, Triangle, Triangles},
    };

    fn scaffold(bounds: Bounds) -> Triangulation {
        Triangulation::with_scaffold(bounds, 0, &TriangulationConfiguration::default())
            .expect("Scaffold should not be degenerate")
    }

    #[test]
    fn scaffold_is_two_triangles() {
        let triangulation = scaffold(Bounds::from_max(4., 2.));

        let [c0, c1, c2, c3] = triangulation.scaffold_vertices();
        assert_eq!(2, triangulation.triangle_count());
        assert!(triangulation.contains(&Triangle::new(c0, c1, c2).unwrap()));
        assert!(triangulation.contains(&Triangle::new(c0, c2, c3).unwrap()));
        assert_eq!(4, triangulation.vertex_count());
        assert_eq!(2, triangulation.neighbors_of(&c0).count());
        assert_eq!(1, triangulation.neighbors_of(&c1).count());
    }

    #[test]
    fn bad_triangles_of_interior_vertex() {
        let triangulation = scaffold(Bounds::from_max(4., 2.));

        let mut bad_triangles = Vec::new();
        find_bad_triangles(triangulation.arena(), Point::new(1., 0.5), &mut bad_triangles);

        // Both scaffold triangles share the same circumcircle
        assert_eq!(2, bad_triangles.len());
    }

    #[test]
    fn hole_boundary_cancels_shared_edges() {
        let triangulation = scaffold(Bounds::from_max(4., 2.));
        let ids: Vec<_> = triangulation.arena().iter().map(|(id, _)| id).collect();

        let mut edge_counts = HashMap::new();
        let mut boundary = Vec::new();
        find_hole_boundary(triangulation.arena(), &ids, &mut edge_counts, &mut boundary);

        let [c0, c1, c2, c3] = triangulation.scaffold_vertices();
        assert_eq!(4, boundary.len());
        for edge in [
            Edge::new(c0, c1),
            Edge::new(c1, c2),
            Edge::new(c2, c3),
            Edge::new(c3, c0),
        ] {
            assert!(
                boundary.iter().any(|(e, _)| *e == edge),
                "{:?} should be on the boundary",
                edge
            );
        }
        assert!(!boundary.iter().any(|(e, _)| *e == Edge::new(c0, c2)));
        // Each edge comes with the bad triangle it belongs to, in its vertex order
        for (edge, id) in boundary.iter() {
            let triangle = triangulation.arena().get(*id).unwrap();
            assert!(triangle.edges().iter().any(|e| e.from == edge.from && e.to == edge.to));
        }
    }

    #[test]
    fn insert_vertex_keeps_adjacency_in_sync() {
        let mut triangulation = scaffold(Bounds::from_max(4., 2.));
        let vertex = Point::new(1., 0.5);

        triangulation
            .insert_vertex(vertex, &mut InsertionBuffers::default())
            .expect("Insertion should succeed");

        assert_eq!(4, triangulation.triangle_count());
        assert_eq!(4, triangulation.neighbors_of(&vertex).count());
        for corner in triangulation.scaffold_vertices() {
            assert_eq!(2, triangulation.neighbors_of(&corner).count());
        }
        assert_eq!(Ok(()), triangulation.validate());
    }

    #[test]
    fn degenerate_insertion_leaves_triangulation_untouched() {
        // Bad triangles whose hole boundary contains an edge collinear with the vertex
        let a = Point::new(0., 0.);
        let b = Point::new(2., 0.);
        let c = Point::new(1., 1.);
        let mut triangulation = scaffold(Bounds::from_max(4., 4.));
        let before = triangulation.triangle_count();
        triangulation.retract_triangle(0);
        triangulation.retract_triangle(1);
        triangulation.create_triangle(Triangle::new(a, b, c).unwrap());

        // On the edge ab, which is on the hole boundary
        let result =
            triangulation.insert_vertex(Point::new(1., 0.), &mut InsertionBuffers::default());

        assert!(matches!(
            result,
            Err(TriangulationError::DegenerateGeometry { .. })
        ));
        assert_eq!(1, triangulation.triangle_count());
        assert!(before > triangulation.triangle_count());
        assert_eq!(Ok(()), triangulation.validate());
    }

    #[test]
    fn hole_not_star_shaped_is_rejected() {
        //      c
        //   a     b
        //      v
        // v is inside the circumcircle of abc, but outside of abc: (v, a, b) would be flipped
        let a = Point::new(1., 1.);
        let b = Point::new(3., 1.);
        let c = Point::new(2., 2.);
        let mut triangulation = scaffold(Bounds::from_max(4., 4.));
        triangulation.retract_triangle(0);
        triangulation.retract_triangle(1);
        triangulation.create_triangle(Triangle::new(a, b, c).unwrap());

        let vertex = Point::new(2., 0.5);
        let result = triangulation.insert_vertex(vertex, &mut InsertionBuffers::default());

        assert_eq!(
            Some(TriangulationError::DegenerateGeometry {
                verts: [vertex, a, b]
            }),
            result.err()
        );
        assert_eq!(1, triangulation.triangle_count());
        assert_eq!(0, triangulation.neighbors_of(&vertex).count());
        assert_eq!(Ok(()), triangulation.validate());
    }

    #[test]
    fn no_enclosing_triangle() {
        let mut triangulation = scaffold(Bounds::from_max(4., 4.));
        triangulation.retract_triangle(0);
        triangulation.retract_triangle(1);

        let vertex = Point::new(1., 2.);
        let result = triangulation.insert_vertex(vertex, &mut InsertionBuffers::default());

        assert_eq!(
            Some(TriangulationError::NoEnclosingTriangle { point: vertex }),
            result.err()
        );
        assert_eq!(0, triangulation.triangle_count());
    }

    #[test]
    fn corners_are_skipped() {
        let bounds = Bounds::from_max(4., 2.);
        let points = [
            Point::new(0., 0.),
            Point::new(1., 1.),
            Point::new(4., 2.),
            Point::new(3., 1.5),
        ];

        let insertion_points =
            filter_insertion_vertices(&points, &bounds).expect("Vertices should be valid");

        assert_eq!(vec![Point::new(1., 1.), Point::new(3., 1.5)], insertion_points);
    }

    #[test]
    fn duplicate_vertex_is_rejected() {
        let vertices = [Point::new(1., 1.), Point::new(2., 1.), Point::new(1., 1.)];

        let result =
            triangulation_from_2d_vertices(&vertices, TriangulationConfiguration::with_max(4., 2.));

        assert_eq!(
            Some(TriangulationError::InvalidInput(
                InvalidInputError::DuplicateVertex {
                    index: 2,
                    first_index: 0,
                    point: Point::new(1., 1.)
                }
            )),
            result.err()
        );
    }

    #[test]
    fn out_of_bounds_vertex_is_rejected() {
        let vertices = [Point::new(1., 1.), Point::new(5., 1.)];

        let result =
            triangulation_from_2d_vertices(&vertices, TriangulationConfiguration::with_max(4., 2.));

        assert!(matches!(
            result,
            Err(TriangulationError::InvalidInput(
                InvalidInputError::OutOfBounds { index: 1, .. }
            ))
        ));
    }

    #[test]
    fn vertex_on_border_is_rejected() {
        let vertices = [Point::new(2., 0.)];

        let result =
            triangulation_from_2d_vertices(&vertices, TriangulationConfiguration::with_max(4., 2.));

        assert!(matches!(
            result,
            Err(TriangulationError::InvalidInput(
                InvalidInputError::OutOfBounds { index: 0, .. }
            ))
        ));
    }

    #[test]
    fn non_finite_vertex_is_rejected() {
        let vertices: [[f64; 2]; 2] = [[1., 1.], [f64::NAN, 1.]];

        let result = triangulation_from_2d_vertices(&vertices, TriangulationConfiguration::default());

        assert!(matches!(
            result,
            Err(TriangulationError::InvalidInput(
                InvalidInputError::NonFiniteVertex { index: 1, .. }
            ))
        ));
    }

    #[test]
    fn invalid_bounds_are_rejected() {
        let vertices: [Point; 0] = [];

        let result =
            triangulation_from_2d_vertices(&vertices, TriangulationConfiguration::with_max(0., 2.));

        assert!(matches!(
            result,
            Err(TriangulationError::InvalidInput(
                InvalidInputError::InvalidBounds(_)
            ))
        ));
    }

    #[test]
    fn implicit_bounds_enclose_vertices() {
        let vertices: [[f64; 2]; 5] = [[-3., 2.], [1., 2.5], [1.5, -2.], [-2.5, -1.5], [-1., 0.5]];

        let triangulation =
            triangulation_from_2d_vertices(&vertices, TriangulationConfiguration::default())
                .expect("Triangulation should succeed");

        assert_eq!(9, triangulation.vertex_count());
        // 2V - 2 - B, with the 4 scaffold corners on the hull
        assert_eq!(2 * 9 - 2 - 4, triangulation.triangle_count());
        assert_eq!(Ok(()), triangulation.validate());
    }

    #[test]
    fn without_scaffold_keeps_inner_triangles() {
        // 1-------------2
        // |             |
        // |   a      b  |
        // |      c      |
        // 0-------------3
        let a = Point::new(1., 3.);
        let b = Point::new(3.2, 2.9);
        let c = Point::new(2.1, 1.);
        let config = TriangulationConfiguration::with_max(4., 4.);

        let triangulation = triangulation_from_2d_vertices(&[a, b, c], config)
            .expect("Triangulation should succeed");
        let inner = triangulation.triangles_without_scaffold();

        assert_eq!(vec![Triangle::new(a, b, c).unwrap()], inner);
    }

    #[test]
    fn without_scaffold_uses_configured_thresholds() {
        let vertices: [[f64; 2]; 4] = [[1., 3.], [3.2, 2.9], [2.1, 1.], [2.6, 2.2]];
        let sequential =
            triangulation_from_2d_vertices(&vertices, TriangulationConfiguration::with_max(4., 4.))
                .expect("Triangulation should succeed");
        let parallel = triangulation_from_2d_vertices(
            &vertices,
            TriangulationConfiguration {
                filter_parallel_tri_count_threshold: 0,
                filter_parallel_min_batch_len: 1,
                ..TriangulationConfiguration::with_max(4., 4.)
            },
        )
        .expect("Triangulation should succeed");

        assert_eq!(0, parallel.filter_parallel_tri_count_threshold);
        assert_eq!(1, parallel.filter_parallel_min_batch_len);
        let inner = parallel.triangles_without_scaffold();
        assert_eq!(sequential.triangles_without_scaffold(), inner);
        assert!(!inner.is_empty());
    }

    #[test]
    fn empty_arena_has_no_bad_triangles() {
        let mut bad_triangles = vec![0];

        find_bad_triangles(&Triangles::new(), Point::new(0., 0.), &mut bad_triangles);

        assert!(bad_triangles.is_empty());
    }
}
