pub mod ellipse;
pub mod rectangle;
pub mod subtraction;

use crate::Scalar;
use std::{
    any::Any,
    ops::{Deref, DerefMut},
};
use vek::{Aabr, Vec2};

pub struct ShapeBox(Box<dyn Shape>);

impl ShapeBox {
    pub fn new(shape: impl Shape + 'static) -> Self {
        Self(Box::new(shape))
    }

    pub fn as_any(&self) -> &dyn Any {
        &*self.0
    }

    pub fn as_any_mut(&mut self) -> &mut dyn Any {
        &mut *self.0
    }
}

impl Deref for ShapeBox {
    type Target = dyn Shape;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl DerefMut for ShapeBox {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.0
    }
}

impl std::fmt::Debug for ShapeBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ShapeBox").finish_non_exhaustive()
    }
}

pub trait Shape: Send + Sync + Any {
    /// Tells if shape occupies given world point.
    ///
    /// `frame` is the world space bounding box of the body that owns the
    /// shape. Shapes are expected to never report points outside of it, so
    /// contact queries are free to skip sampling there.
    fn contains_point(&self, point: Vec2<Scalar>, frame: Aabr<Scalar>) -> bool;
}
