//! Voronoi diagram, as the dual of a Delaunay triangulation.
//!
//! - The circumcenter of each triangle is a Voronoi vertex
//! - Two triangles sharing an edge give the Voronoi edge between their circumcenters
//! - Triangle edges without a neighbor (on the outer boundary of the triangulation) give no Voronoi edge

use hashbrown::HashSet;

use crate::adjacency::AdjacencyIndex;
use crate::types::{Edge, Point, Triangles};

#[cfg(feature = "profile_traces")]
use tracing::{span, Level};

/// Returns the Voronoi edges of a triangulation: one edge between the circumcenters of each pair of adjacent triangles.
///
/// Neighbors are found through the `adjacency` index of the triangulation, which must have been produced together
/// with `triangles`.
///
/// Adjacent triangles with the same circumcenter (four cocircular vertices, as in the bare scaffold) would give a
/// zero-length edge: those are not emitted.
pub fn extract_voronoi_edges(triangles: &Triangles, adjacency: &AdjacencyIndex) -> HashSet<Edge> {
    #[cfg(feature = "profile_traces")]
    let _span = span!(Level::TRACE, "extract_voronoi_edges").entered();

    let mut voronoi_edges = HashSet::new();
    for (id, triangle) in triangles.iter() {
        for vertex in triangle.verts() {
            for neighbor_id in adjacency.neighbors_of(vertex) {
                if neighbor_id == id {
                    continue;
                }
                let Some(neighbor) = triangles.get(neighbor_id) else {
                    continue;
                };
                if triangle.shares_edge_with(neighbor) {
                    let edge = Edge::new(triangle.circumcenter(), neighbor.circumcenter());
                    if !edge.is_degenerate() {
                        // Already present when visited from the neighbor, or from the other shared vertex
                        voronoi_edges.insert(edge);
                    }
                }
            }
        }
    }
    voronoi_edges
}

/// Returns the Voronoi cell of `site`: the circumcenters of the triangles around it, in counter-clockwise order.
///
/// The polygon is closed for a site surrounded by triangles. For a site on the outer boundary (a scaffold corner),
/// the cell is unbounded and only its finite vertices are returned.
///
/// Returns [None] if `site` is not a vertex of the triangulation.
pub fn voronoi_cell(
    triangles: &Triangles,
    adjacency: &AdjacencyIndex,
    site: Point,
) -> Option<Vec<Point>> {
    let mut cell: Vec<Point> = adjacency
        .neighbors_of(&site)
        .filter_map(|id| triangles.get(id))
        .map(|triangle| triangle.circumcenter())
        .collect();
    if cell.is_empty() {
        return None;
    }

    let angle = |p: &Point| (p.y - site.y).atan2(p.x - site.x);
    cell.sort_by(|a, b| angle(a).total_cmp(&angle(b)));
    // Cocircular neighbors share their circumcenter
    cell.dedup();
    Some(cell)
}

///////////////////////////////////////////////////////////
///                                                     ///
///                        Tests                        ///
///                                                     ///
///////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use crate::{
        adjacency::AdjacencyIndex,
        types::{Edge, Point, Triangle, Triangles},
        voronoi::{extract_voronoi_edges, voronoi_cell},
    };

    fn build(triangles_list: &[Triangle]) -> (Triangles, AdjacencyIndex) {
        let mut triangles = Triangles::new();
        let mut adjacency = AdjacencyIndex::new();
        for t in triangles_list {
            let (id, _) = triangles.insert(*t);
            adjacency.register(id, t);
        }
        (triangles, adjacency)
    }

    #[test]
    fn two_adjacent_triangles() {
        //        1
        //  0  t0      2
        //      t1 3
        let p0 = Point::new(0., 0.);
        let p1 = Point::new(2., 2.);
        let p2 = Point::new(4., 0.);
        let p3 = Point::new(3., -3.);
        let t0 = Triangle::new(p0, p1, p2).unwrap();
        let t1 = Triangle::new(p0, p2, p3).unwrap();
        let (triangles, adjacency) = build(&[t0, t1]);

        let edges = extract_voronoi_edges(&triangles, &adjacency);

        assert_eq!(1, edges.len());
        assert!(edges.contains(&Edge::new(t1.circumcenter(), t0.circumcenter())));
    }

    #[test]
    fn triangles_with_a_single_common_vertex() {
        let p0 = Point::new(0., 0.);
        let t0 = Triangle::new(p0, Point::new(1., 2.), Point::new(2., 1.)).unwrap();
        let t1 = Triangle::new(p0, Point::new(-1., -2.), Point::new(-2., -1.)).unwrap();
        let (triangles, adjacency) = build(&[t0, t1]);

        assert!(extract_voronoi_edges(&triangles, &adjacency).is_empty());
    }

    #[test]
    fn cocircular_neighbors_give_no_edge() {
        // Both halves of a square have the center of the square as circumcenter
        let p0 = Point::new(0., 0.);
        let p1 = Point::new(0., 10.);
        let p2 = Point::new(10., 10.);
        let p3 = Point::new(10., 0.);
        let t0 = Triangle::new(p0, p1, p2).unwrap();
        let t1 = Triangle::new(p0, p2, p3).unwrap();
        let (triangles, adjacency) = build(&[t0, t1]);

        assert_eq!(t0.circumcenter(), t1.circumcenter());
        assert!(extract_voronoi_edges(&triangles, &adjacency).is_empty());
    }

    #[test]
    fn cell_around_fan() {
        // Fan of 4 triangles around the center of a 4x2 rectangle
        let center = Point::new(1., 0.5);
        let corners = [
            Point::new(0., 0.),
            Point::new(0., 2.),
            Point::new(4., 2.),
            Point::new(4., 0.),
        ];
        let fan: Vec<Triangle> = (0..4)
            .map(|i| Triangle::new(center, corners[i], corners[(i + 1) % 4]).unwrap())
            .collect();
        let (triangles, adjacency) = build(&fan);

        let cell = voronoi_cell(&triangles, &adjacency, center).expect("Center is a vertex");

        assert_eq!(4, cell.len());
        for t in fan.iter() {
            assert!(cell.contains(&t.circumcenter()));
        }
        // Counter-clockwise around the center
        let angles: Vec<_> = cell
            .iter()
            .map(|p| (p.y - center.y).atan2(p.x - center.x))
            .collect();
        assert!(angles.windows(2).all(|w| w[0] <= w[1]));

        assert_eq!(None, voronoi_cell(&triangles, &adjacency, Point::new(7., 7.)));
    }
}
