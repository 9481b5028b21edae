use crate::{
    Scalar,
    components::{BodyKind, Mass},
    shapes::{Shape, ShapeBox, rectangle::RectangleShape},
};
use vek::{Aabr, Extent2, Vec2};

/// Capability of anything that takes part in collisions.
///
/// Implemented by [`Body`], but hosts can implement it for their own widget
/// types as long as they can report bounds, velocity and a point test.
pub trait Collidable {
    /// World position of the bounding box minimum corner.
    fn position(&self) -> Vec2<Scalar>;

    fn set_position(&mut self, position: Vec2<Scalar>);

    fn size(&self) -> Extent2<Scalar>;

    fn velocity(&self) -> Vec2<Scalar>;

    fn set_velocity(&mut self, velocity: Vec2<Scalar>);

    fn translate(&mut self, offset: Vec2<Scalar>) {
        self.set_position(self.position() + offset);
    }

    fn mass(&self) -> Mass;

    fn is_dynamic(&self) -> bool {
        true
    }

    /// True shape test at world coordinates.
    fn contains_point(&self, point: Vec2<Scalar>) -> bool;

    fn aabr(&self) -> Aabr<Scalar> {
        let min = self.position();
        let size = self.size();
        Aabr {
            min,
            max: min + Vec2::new(size.w, size.h),
        }
    }

    /// Cheap bounding box test, edges touching count as overlap.
    fn overlaps_bounds(&self, other: &dyn Collidable) -> bool {
        let a = self.aabr();
        let b = other.aabr();
        a.min.x <= b.max.x && a.max.x >= b.min.x && a.min.y <= b.max.y && a.max.y >= b.min.y
    }
}

#[derive(Debug)]
pub struct Body {
    pub position: Vec2<Scalar>,
    pub size: Extent2<Scalar>,
    pub velocity: Vec2<Scalar>,
    pub mass: Mass,
    pub kind: BodyKind,
    pub shape: ShapeBox,
}

impl Body {
    pub fn new(position: impl Into<Vec2<Scalar>>, size: impl Into<Extent2<Scalar>>) -> Self {
        Self {
            position: position.into(),
            size: size.into(),
            velocity: Vec2::zero(),
            mass: Mass::unit(),
            kind: BodyKind::Dynamic,
            shape: ShapeBox::new(RectangleShape),
        }
    }

    pub fn background(
        position: impl Into<Vec2<Scalar>>,
        size: impl Into<Extent2<Scalar>>,
    ) -> Self {
        Self::new(position, size)
            .with_kind(BodyKind::Background)
            .with_mass(Mass::immovable())
    }

    pub fn with_velocity(mut self, velocity: impl Into<Vec2<Scalar>>) -> Self {
        self.velocity = velocity.into();
        self
    }

    pub fn with_mass(mut self, mass: Mass) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_kind(mut self, kind: BodyKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_shape(mut self, shape: impl Shape + 'static) -> Self {
        self.shape = ShapeBox::new(shape);
        self
    }
}

impl Collidable for Body {
    fn position(&self) -> Vec2<Scalar> {
        self.position
    }

    fn set_position(&mut self, position: Vec2<Scalar>) {
        self.position = position;
    }

    fn size(&self) -> Extent2<Scalar> {
        self.size
    }

    fn velocity(&self) -> Vec2<Scalar> {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2<Scalar>) {
        self.velocity = velocity;
    }

    fn mass(&self) -> Mass {
        self.mass
    }

    fn is_dynamic(&self) -> bool {
        self.kind.is_dynamic()
    }

    fn contains_point(&self, point: Vec2<Scalar>) -> bool {
        self.shape.contains_point(point, self.aabr())
    }
}
