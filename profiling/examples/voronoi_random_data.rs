use ghx_delaunay_voronoi::{
    triangulation_from_2d_vertices, utils::generate_points, TriangulationConfiguration,
};
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::{layer::SubscriberExt, Registry};
use tracing_tracy::TracyLayer;

const VERTICES_COUNT: usize = 10_000;
const MAX_X: f64 = 800.;
const MAX_Y: f64 = 600.;

fn main() {
    let subscriber = Registry::default().with(TracyLayer::default());
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    let mut rng = StdRng::seed_from_u64(42);
    let points = generate_points(VERTICES_COUNT, MAX_X as _, MAX_Y as _, &mut rng);

    let triangulation = triangulation_from_2d_vertices(
        &points,
        TriangulationConfiguration::with_max(MAX_X as _, MAX_Y as _),
    )
    .expect("Triangulation should succeed");

    let voronoi_edges = triangulation.voronoi_edges();
    tracing::info!(
        "{} triangles, {} voronoi edges",
        triangulation.triangle_count(),
        voronoi_edges.len()
    );
}
