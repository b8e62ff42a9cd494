use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use arrayvec::ArrayVec;
use hashbrown::HashMap;

use crate::error::TriangulationError;

pub mod vertex;
pub use vertex::Vertex2d;

#[cfg(not(feature = "f32"))]
mod precision {
    /// The float type used in the algorithm's computations
    pub type Float = f64;
    /// The glam vector type matching [Float], used for the geometric computations
    pub type Vertex = glam::DVec2;
}
#[cfg(feature = "f32")]
mod precision {
    /// The float type used in the algorithm's computations
    pub type Float = f32;
    /// The glam vector type matching [Float], used for the geometric computations
    pub type Vertex = glam::Vec2;
}
pub use precision::{Float, Vertex};

#[cfg(not(feature = "u64_indexes"))]
pub type IndexType = u32;
#[cfg(feature = "u64_indexes")]
pub type IndexType = u64;

pub type TriangleId = IndexType;

pub type TriangleVertexIndex = u8;
pub const VERT_1: TriangleVertexIndex = 0;
pub const VERT_2: TriangleVertexIndex = 1;
pub const VERT_3: TriangleVertexIndex = 2;

pub type TriangleEdgeIndex = u8;
pub const EDGE_12: TriangleEdgeIndex = 0;
pub const EDGE_23: TriangleEdgeIndex = 1;
pub const EDGE_31: TriangleEdgeIndex = 2;

/// From a TriangleEdgeIndex, gives the corresponding pair of TriangleVertexIndex
pub const EDGE_TO_VERTS: [[TriangleVertexIndex; 2]; 3] =
    [[VERT_1, VERT_2], [VERT_2, VERT_3], [VERT_3, VERT_1]];

/// `-0.0` and `0.0` compare equal, they must also hash and order the same way
#[inline]
fn canonical_zero(value: Float) -> Float {
    if value == 0. {
        0.
    } else {
        value
    }
}

/// A 2d point.
///
/// Equality and hashing are exact: there is no epsilon tolerance. NaN coordinates are not supported
/// (see [crate::utils::validate_vertices]).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Point {
    pub x: Float,
    pub y: Float,
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        canonical_zero(self.x).to_bits().hash(state);
        canonical_zero(self.y).to_bits().hash(state);
    }
}

impl Point {
    #[inline]
    pub const fn new(x: Float, y: Float) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn to_vertex(self) -> Vertex {
        Vertex::new(self.x, self.y)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn distance_squared(self, other: Point) -> Float {
        (self.to_vertex() - other.to_vertex()).length_squared()
    }

    /// Total order on x, then on y
    #[inline]
    pub fn lexicographic_cmp(&self, other: &Point) -> Ordering {
        canonical_zero(self.x)
            .total_cmp(&canonical_zero(other.x))
            .then_with(|| canonical_zero(self.y).total_cmp(&canonical_zero(other.y)))
    }
}

impl From<Vertex> for Point {
    fn from(vertex: Vertex) -> Point {
        Point::new(vertex.x, vertex.y)
    }
}
impl From<Point> for Vertex {
    fn from(point: Point) -> Vertex {
        point.to_vertex()
    }
}
impl From<[Float; 2]> for Point {
    fn from(coords: [Float; 2]) -> Point {
        Point::new(coords[0], coords[1])
    }
}

/// An undirected segment between two points.
///
/// `Edge::new(a, b) == Edge::new(b, a)`, and both hash the same.
#[derive(Debug, Copy, Clone)]
pub struct Edge {
    pub from: Point,
    pub to: Point,
}

impl Edge {
    #[inline]
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        self.from == point || self.to == point
    }

    /// Both ends are the same point
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.from == self.to
    }

    #[inline]
    pub fn length(&self) -> Float {
        self.from.distance_squared(self.to).sqrt()
    }

    /// The two ends, in lexicographic order
    #[inline]
    pub fn ordered(&self) -> (Point, Point) {
        match self.from.lexicographic_cmp(&self.to) {
            Ordering::Greater => (self.to, self.from),
            _ => (self.from, self.to),
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Edge) -> bool {
        (self.from == other.from && self.to == other.to)
            || (self.from == other.to && self.to == other.from)
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (first, second) = self.ordered();
        first.hash(state);
        second.hash(state);
    }
}

impl From<(Point, Point)> for Edge {
    fn from(points: (Point, Point)) -> Edge {
        Edge::new(points.0, points.1)
    }
}

/// Identity of a triangle in a set: its vertices in lexicographic order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TriangleKey([Point; 3]);

impl TriangleKey {
    pub fn new(mut verts: [Point; 3]) -> Self {
        verts.sort_unstable_by(Point::lexicographic_cmp);
        Self(verts)
    }

    #[inline]
    pub fn verts(&self) -> &[Point; 3] {
        &self.0
    }
}

/// A triangle with its cached circumcircle.
///
/// Two triangles are equal when they have the same vertices, whatever their order.
#[derive(Debug, Copy, Clone)]
pub struct Triangle {
    verts: [Point; 3],
    circumcenter: Point,
    circumradius_squared: Float,
}

impl Triangle {
    /// Creates a triangle and computes its circumcircle.
    ///
    /// Returns [TriangulationError::DegenerateGeometry] if the three points are collinear.
    pub fn new(a: Point, b: Point, c: Point) -> Result<Self, TriangulationError> {
        let origin = a.to_vertex();
        let ab = b.to_vertex() - origin;
        let ac = c.to_vertex() - origin;

        let det = ab.perp_dot(ac);
        if det == 0. || !det.is_finite() {
            return Err(TriangulationError::DegenerateGeometry { verts: [a, b, c] });
        }

        // Circumcenter relative to `a`
        let d = 2. * det;
        let ab_len = ab.length_squared();
        let ac_len = ac.length_squared();
        let offset = Vertex::new(
            (ac.y * ab_len - ab.y * ac_len) / d,
            (ab.x * ac_len - ac.x * ab_len) / d,
        );
        let circumcenter = Point::from(origin + offset);

        Ok(Self {
            verts: [a, b, c],
            circumcenter,
            // Computed exactly like the distance in `is_inside_circumcircle`, so that a vertex is never inside its own circle
            circumradius_squared: a.distance_squared(circumcenter),
        })
    }

    #[inline]
    pub fn verts(&self) -> &[Point; 3] {
        &self.verts
    }
    #[inline]
    pub fn v1(&self) -> Point {
        self.verts[VERT_1 as usize]
    }
    #[inline]
    pub fn v2(&self) -> Point {
        self.verts[VERT_2 as usize]
    }
    #[inline]
    pub fn v3(&self) -> Point {
        self.verts[VERT_3 as usize]
    }

    /// Twice the signed area: positive when the vertices are in counter-clockwise order, never zero
    #[inline]
    pub fn orientation(&self) -> Float {
        let origin = self.verts[0].to_vertex();
        (self.verts[1].to_vertex() - origin).perp_dot(self.verts[2].to_vertex() - origin)
    }

    #[inline]
    pub fn circumcenter(&self) -> Point {
        self.circumcenter
    }
    #[inline]
    pub fn circumradius(&self) -> Float {
        self.circumradius_squared.sqrt()
    }
    #[inline]
    pub fn circumradius_squared(&self) -> Float {
        self.circumradius_squared
    }

    /// Returns `true` if `point` is strictly inside the circumcircle.
    ///
    /// A point exactly on the circle is outside.
    #[inline]
    pub fn is_inside_circumcircle(&self, point: Point) -> bool {
        point.distance_squared(self.circumcenter) < self.circumradius_squared
    }

    #[inline]
    pub fn edge(&self, edge_index: TriangleEdgeIndex) -> Edge {
        let vert_indexes = EDGE_TO_VERTS[edge_index as usize];
        Edge::new(
            self.verts[vert_indexes[0] as usize],
            self.verts[vert_indexes[1] as usize],
        )
    }

    #[inline]
    pub fn edges(&self) -> [Edge; 3] {
        [self.edge(EDGE_12), self.edge(EDGE_23), self.edge(EDGE_31)]
    }

    #[inline]
    pub fn contains_vertex(&self, point: Point) -> bool {
        self.verts.contains(&point)
    }

    pub fn shared_vertices(&self, other: &Triangle) -> ArrayVec<Point, 3> {
        self.verts
            .iter()
            .filter(|v| other.contains_vertex(**v))
            .copied()
            .collect()
    }

    /// Two triangles are adjacent when they have exactly two vertices in common
    #[inline]
    pub fn shares_edge_with(&self, other: &Triangle) -> bool {
        self.shared_vertices(other).len() == 2
    }

    pub fn shared_edge(&self, other: &Triangle) -> Option<Edge> {
        let shared = self.shared_vertices(other);
        match shared.len() {
            2 => Some(Edge::new(shared[0], shared[1])),
            _ => None,
        }
    }

    #[inline]
    pub fn key(&self) -> TriangleKey {
        TriangleKey::new(self.verts)
    }
}

impl PartialEq for Triangle {
    fn eq(&self, other: &Triangle) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Triangle {}

impl Hash for Triangle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// Arena of the live triangles of a triangulation.
///
/// Triangles are referenced by [TriangleId]. Ids of removed triangles are reused. A triangle (by its vertices) is stored at most once.
#[derive(Clone, Debug, Default)]
pub struct Triangles {
    buffer: Vec<Option<Triangle>>,
    free_ids: Vec<TriangleId>,
    ids: HashMap<TriangleKey, TriangleId>,
}

impl Triangles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            free_ids: Vec::new(),
            ids: HashMap::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn get(&self, id: TriangleId) -> Option<&Triangle> {
        self.buffer.get(id as usize).and_then(Option::as_ref)
    }

    /// Number of live triangles
    #[inline]
    pub fn count(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[inline]
    pub fn contains(&self, triangle: &Triangle) -> bool {
        self.ids.contains_key(&triangle.key())
    }

    #[inline]
    pub fn id_of(&self, triangle: &Triangle) -> Option<TriangleId> {
        self.ids.get(&triangle.key()).copied()
    }

    /// Raw slots, `None` for a free slot
    #[inline]
    pub fn buffer(&self) -> &[Option<Triangle>] {
        &self.buffer
    }

    pub fn iter(&self) -> impl Iterator<Item = (TriangleId, &Triangle)> + '_ {
        self.buffer
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| slot.as_ref().map(|t| (id as TriangleId, t)))
    }

    pub fn values(&self) -> impl Iterator<Item = &Triangle> + '_ {
        self.buffer.iter().filter_map(Option::as_ref)
    }

    /// Returns the id of the triangle and `true` if it was not already present
    pub(crate) fn insert(&mut self, triangle: Triangle) -> (TriangleId, bool) {
        let key = triangle.key();
        if let Some(&id) = self.ids.get(&key) {
            return (id, false);
        }
        let id = match self.free_ids.pop() {
            Some(id) => {
                self.buffer[id as usize] = Some(triangle);
                id
            }
            None => {
                self.buffer.push(Some(triangle));
                (self.buffer.len() - 1) as TriangleId
            }
        };
        self.ids.insert(key, id);
        (id, true)
    }

    pub(crate) fn remove(&mut self, id: TriangleId) -> Option<Triangle> {
        let triangle = self.buffer.get_mut(id as usize)?.take()?;
        self.ids.remove(&triangle.key());
        self.free_ids.push(id);
        Some(triangle)
    }
}

/// Axis-aligned rectangle covered by the initial scaffold of a triangulation
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::from_max(1., 1.)
    }
}

impl Bounds {
    #[inline]
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Rectangle from `(0, 0)` to `(max_x, max_y)`
    #[inline]
    pub fn from_max(max_x: Float, max_y: Float) -> Self {
        Self::new(Point::new(0., 0.), Point::new(max_x, max_y))
    }

    /// Bounding box of `points`, enlarged on each side by `margin` times its largest extent (and at least by `1.`
    /// when the extent is too small), so that every point is strictly inside.
    ///
    /// Returns [Bounds::default] when `points` is empty.
    pub fn enclosing(points: &[Point], margin: Float) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };
        let (mut min, mut max) = (*first, *first);
        for p in points.iter() {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        let extent = (max.x - min.x).max(max.y - min.y);
        let delta = (extent * margin).max(1.);
        Self::new(
            Point::new(min.x - delta, min.y - delta),
            Point::new(max.x + delta, max.y + delta),
        )
    }

    #[inline]
    pub fn width(&self) -> Float {
        self.max.x - self.min.x
    }
    #[inline]
    pub fn height(&self) -> Float {
        self.max.y - self.min.y
    }

    /// Finite, with a non-empty area
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.width() > 0. && self.height() > 0.
    }

    /// The four corners, in the order `(min.x, min.y)`, `(min.x, max.y)`, `(max.x, max.y)`, `(max.x, min.y)`
    ///
    /// ```text
    /// 1-------------2
    /// |             |
    /// |             |
    /// 0-------------3
    /// ```
    #[inline]
    pub fn corners(&self) -> [Point; 4] {
        [
            self.min,
            Point::new(self.min.x, self.max.y),
            self.max,
            Point::new(self.max.x, self.min.y),
        ]
    }

    /// Returns `true` if `point` is inside the rectangle and not on its border
    #[inline]
    pub fn contains_strictly(&self, point: Point) -> bool {
        point.x > self.min.x && point.x < self.max.x && point.y > self.min.y && point.y < self.max.y
    }
}

///////////////////////////////////////////////////////////
///                                                     ///
///                        Tests                        ///
///                                                     ///
///////////////////////////////////////////////////////////
