use crate::error::InvalidInputError;
use crate::types::Vertex2d;

#[cfg(feature = "random_points")]
use crate::types::{Bounds, Float, Point};

/// Checks that every vertex has finite coordinates (no NaN or infinity)
pub fn validate_vertices<T: Vertex2d>(vertices: &[T]) -> Result<(), InvalidInputError> {
    for (index, vertex) in vertices.iter().enumerate() {
        let point = vertex.to_point();
        if !point.is_finite() {
            return Err(InvalidInputError::NonFiniteVertex { index, point });
        }
    }
    Ok(())
}

/// Generates `amount` points in the `(0, 0)` to `(max_x, max_y)` rectangle: its four corners, then `amount - 4`
/// uniformly distributed points strictly inside it.
#[cfg(feature = "random_points")]
pub fn generate_points<R: rand::Rng + ?Sized>(
    amount: usize,
    max_x: Float,
    max_y: Float,
    rng: &mut R,
) -> Vec<Point> {
    let bounds = Bounds::from_max(max_x, max_y);
    let mut points = Vec::with_capacity(amount.max(4));
    points.extend(bounds.corners());

    while points.len() < amount {
        let x: Float = rng.sample(rand::distributions::Open01);
        let y: Float = rng.sample(rand::distributions::Open01);
        let point = Point::new(x * max_x, y * max_y);
        // Rounding may still land on the border
        if bounds.contains_strictly(point) {
            points.push(point);
        }
    }
    points
}

///////////////////////////////////////////////////////////
///                                                     ///
///                        Tests                        ///
///                                                     ///
///////////////////////////////////////////////////////////
