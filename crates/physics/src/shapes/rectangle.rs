use crate::{Scalar, shapes::Shape};
use vek::{Aabr, Vec2};

/// Fills the whole frame, edges included.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RectangleShape;

impl Shape for RectangleShape {
    fn contains_point(&self, point: Vec2<Scalar>, frame: Aabr<Scalar>) -> bool {
        frame.contains_point(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_shape() {
        let frame = Aabr {
            min: Vec2::new(10.0, 20.0),
            max: Vec2::new(30.0, 25.0),
        };
        let shape = RectangleShape;

        assert!(shape.contains_point(Vec2::new(10.0, 20.0), frame));
        assert!(shape.contains_point(Vec2::new(30.0, 25.0), frame));
        assert!(shape.contains_point(Vec2::new(20.0, 22.5), frame));
        assert!(!shape.contains_point(Vec2::new(9.0, 20.0), frame));
        assert!(!shape.contains_point(Vec2::new(20.0, 26.0), frame));
    }
}
