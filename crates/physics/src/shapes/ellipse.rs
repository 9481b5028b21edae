use crate::{Scalar, shapes::Shape};
use vek::{Aabr, Vec2};

/// Ellipse inscribed in the frame, so square frames give circles.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct EllipseShape;

impl Shape for EllipseShape {
    fn contains_point(&self, point: Vec2<Scalar>, frame: Aabr<Scalar>) -> bool {
        let center = (frame.min + frame.max) * 0.5;
        let radius = (frame.max - frame.min) * 0.5;
        let offset = point - center;
        // multiplied out, so zero radius degenerates into a segment.
        frame.contains_point(point)
            && offset.x * offset.x * radius.y * radius.y + offset.y * offset.y * radius.x * radius.x
                <= radius.x * radius.x * radius.y * radius.y
    }
}
