use crate::{
    PhysicsSimulation, Scalar,
    body::Collidable,
    queries::intersection::{IntersectionBox, find_intersection_with, lattice_to_world},
};
use vek::Vec2;

/// Sums of offsets below this magnitude are rounding leftovers of free cells
/// cancelling each other out.
const CANCELLATION_EPSILON: f64 = 1.0e-6;

/// Bitmap of cells around an intersection occupied by the checking body.
///
/// Covers the intersection box grown by `expand` cells on every side, stored
/// row by row.
#[derive(Debug, Clone, PartialEq)]
pub struct AffectionZone {
    region: IntersectionBox,
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl AffectionZone {
    pub fn new(checking: &dyn Collidable, intersection: IntersectionBox, expand: i32) -> Self {
        let region = intersection.expanded(expand.max(0));
        let cells = region
            .points()
            .map(|point| checking.contains_point(lattice_to_world(point)))
            .collect();
        Self {
            region,
            width: region.width() as usize,
            height: region.height() as usize,
            cells,
        }
    }

    pub fn region(&self) -> IntersectionBox {
        self.region
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y * self.width + x]
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell).count()
    }

    pub fn free_count(&self) -> usize {
        self.cells.len() - self.occupied_count()
    }

    /// Unit direction from the zone center toward its free cells, or zero
    /// when there are none or they balance each other out.
    pub fn resistance_vector(&self) -> Vec2<Scalar> {
        // accumulated in double precision so mirrored cells cancel out.
        let center = Vec2::new(
            (self.width as f64 - 1.0) * 0.5,
            (self.height as f64 - 1.0) * 0.5,
        );
        let mut sum = Vec2::<f64>::zero();
        for (index, occupied) in self.cells.iter().enumerate() {
            if *occupied {
                continue;
            }
            let cell = Vec2::new((index % self.width) as f64, (index / self.width) as f64);
            if let Some(direction) = (cell - center).try_normalized() {
                sum += direction;
            }
        }
        if sum.magnitude() <= CANCELLATION_EPSILON {
            return Vec2::zero();
        }
        sum.try_normalized()
            .map(|direction| Vec2::new(direction.x as Scalar, direction.y as Scalar))
            .unwrap_or_default()
    }
}

/// Direction pointing away from the region `checking` occupies around the
/// intersection.
pub fn resistance_vector(
    checking: &dyn Collidable,
    intersection: IntersectionBox,
    expand: i32,
) -> Vec2<Scalar> {
    AffectionZone::new(checking, intersection, expand).resistance_vector()
}

/// Resistance `this` puts against `other`, `None` when they do not touch.
pub fn get_resistance_vector(
    this: &dyn Collidable,
    other: &dyn Collidable,
    simulation: &PhysicsSimulation,
) -> Option<Vec2<Scalar>> {
    let intersection = find_intersection_with(this, other, simulation.intersection_sampling)?;
    Some(resistance_vector(
        this,
        intersection,
        simulation.affection_expand,
    ))
}
