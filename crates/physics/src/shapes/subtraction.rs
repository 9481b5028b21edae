use crate::{
    Scalar,
    shapes::{Shape, ShapeBox},
};
use vek::{Aabr, Vec2};

/// Base shape with holes cut out of it.
///
/// Each hole is placed in a region given in frame-relative units, where
/// `[0, 0]` is the frame minimum and `[1, 1]` the frame maximum.
pub struct SubtractionShape {
    pub base: ShapeBox,
    pub holes: Vec<(ShapeBox, Aabr<Scalar>)>,
}

impl SubtractionShape {
    pub fn new(base: impl Shape + 'static) -> Self {
        Self {
            base: ShapeBox::new(base),
            holes: Default::default(),
        }
    }

    pub fn hole(mut self, shape: impl Shape + 'static, region: Aabr<Scalar>) -> Self {
        self.holes.push((ShapeBox::new(shape), region));
        self
    }
}

impl Shape for SubtractionShape {
    fn contains_point(&self, point: Vec2<Scalar>, frame: Aabr<Scalar>) -> bool {
        if !self.base.contains_point(point, frame) {
            return false;
        }
        let size = frame.max - frame.min;
        !self.holes.iter().any(|(shape, region)| {
            let hole_frame = Aabr {
                min: frame.min + size * region.min,
                max: frame.min + size * region.max,
            };
            hole_frame.contains_point(point) && shape.contains_point(point, hole_frame)
        })
    }
}
