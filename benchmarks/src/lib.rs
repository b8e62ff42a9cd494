use ghx_delaunay_voronoi::types::{Float, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const SEED: &[u8; 32] = b"\xfb\xdc\x4e\xa0\x30\xde\x82\xba\x69\x97\x3c\x52\x49\x4d\x00\xca\x5c\x21\xa3\x8d\x5c\xf2\x34\x4e\x58\x7d\x80\x16\x66\x23\x30\x01";

pub enum Distribution {
    /// Uniform in the `(0, 0)` to `(size, size)` square
    Uniform,
    /// Random walk, unbounded
    Local,
}

impl Distribution {
    pub fn name(&self) -> &'static str {
        match self {
            Distribution::Uniform => "uniform",
            Distribution::Local => "local",
        }
    }
}

/// `count` distinct points following `distribution`
pub fn generate_vertices(distribution: &Distribution, count: usize, size: Float) -> Vec<Point> {
    let mut rng = StdRng::from_seed(*SEED);
    let points: Box<dyn Iterator<Item = Point> + '_> = match distribution {
        Distribution::Uniform => Box::new(uniform_distribution(&mut rng, size)),
        Distribution::Local => Box::new(random_walk_distribution(&mut rng, 1.)),
    };
    points.take(count).collect()
}

pub fn uniform_distribution(rng: &mut StdRng, size: Float) -> impl Iterator<Item = Point> + '_ {
    let range = rand::distributions::Uniform::new(0.001 * size, 0.999 * size);
    core::iter::from_fn(move || Some(Point::new(rng.sample(range), rng.sample(range))))
}

pub fn random_walk_distribution(
    rng: &mut StdRng,
    step_size: Float,
) -> impl Iterator<Item = Point> + '_ {
    let range = rand::distributions::Uniform::new_inclusive(-step_size, step_size);
    let mut last_x = 0.;
    let mut last_y = 1.;

    let step_fn = move || {
        last_x += rng.sample(range);
        last_y += rng.sample(range);

        Some(Point::new(last_x, last_y))
    };
    core::iter::from_fn(step_fn)
}
