use benchmarks::{random_walk_distribution, SEED};
use ghx_delaunay_voronoi::{triangulation_from_2d_vertices, TriangulationConfiguration};
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::{layer::SubscriberExt, Registry};
use tracing_tracy::TracyLayer;

// Bad triangles are searched among all the triangles: keep it reasonable
const VERTICES_COUNT: usize = 20_000;

fn main() {
    let subscriber = Registry::default().with(TracyLayer::default());
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    let mut rng = StdRng::from_seed(*SEED);
    let vertices: Vec<_> = random_walk_distribution(&mut rng, 1.)
        .take(VERTICES_COUNT)
        .collect();

    let triangulation = triangulation_from_2d_vertices(
        &vertices,
        TriangulationConfiguration {
            filter_parallel_tri_count_threshold: 10000,
            filter_parallel_min_batch_len: 10000,
            ..Default::default()
        },
    );

    match triangulation {
        Ok(triangulation) => {
            let inner = triangulation.triangles_without_scaffold();
            tracing::info!("{} triangles without the scaffold", inner.len());
        }
        Err(err) => tracing::error!("Triangulation failed: {}", err),
    }
}
