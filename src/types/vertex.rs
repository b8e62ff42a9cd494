use glam::{DVec2, Vec2};

use super::{Float, Point};

/// Defines a simple 2d point accepted as triangulation input
pub trait Vertex2d: Clone + Copy + Sized {
    fn x(self) -> Float;
    fn y(self) -> Float;

    #[inline(always)]
    #[must_use]
    fn to_point(self) -> Point {
        Point::new(self.x(), self.y())
    }
}

impl Vertex2d for Point {
    #[inline(always)]
    fn x(self) -> Float {
        self.x
    }

    #[inline(always)]
    fn y(self) -> Float {
        self.y
    }

    #[inline(always)]
    fn to_point(self) -> Point {
        self
    }
}

impl Vertex2d for Vec2 {
    #[inline(always)]
    fn x(self) -> Float {
        self.x as Float
    }

    #[inline(always)]
    fn y(self) -> Float {
        self.y as Float
    }
}

impl Vertex2d for DVec2 {
    #[inline(always)]
    fn x(self) -> Float {
        self.x as Float
    }

    #[inline(always)]
    fn y(self) -> Float {
        self.y as Float
    }
}

impl Vertex2d for [f32; 2] {
    #[inline(always)]
    fn x(self) -> Float {
        self[0] as Float
    }

    #[inline(always)]
    fn y(self) -> Float {
        self[1] as Float
    }
}

impl Vertex2d for [f64; 2] {
    #[inline(always)]
    fn x(self) -> Float {
        self[0] as Float
    }

    #[inline(always)]
    fn y(self) -> Float {
        self[1] as Float
    }
}
