use crate::{
    PhysicsSimulation, Scalar,
    body::Collidable,
    queries::affection::get_resistance_vector,
    resolvers::{CollisionError, CollisionStrategy, StrategyKind},
    utils::reflect_vector,
};
use vek::Vec2;

/// Mirrors relative velocity of the first body against resistance of the
/// second one. Second body and positions stay untouched.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImpulseReflection;

impl CollisionStrategy for ImpulseReflection {
    fn kind(&self) -> StrategyKind {
        StrategyKind::ImpulseReflection
    }

    fn resolve(
        &self,
        first: &mut dyn Collidable,
        second: &mut dyn Collidable,
        simulation: &PhysicsSimulation,
    ) -> Result<Vec2<Scalar>, CollisionError> {
        let resistance = get_resistance_vector(&*second, &*first, simulation)
            .ok_or(CollisionError::NoContact)?;
        if resistance == Vec2::zero() {
            return Err(CollisionError::DegenerateResistance);
        }
        let relative = first.velocity() - second.velocity();
        first.set_velocity(reflect_vector(relative, resistance));
        Ok(resistance)
    }
}
