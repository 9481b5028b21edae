pub mod elastic;
pub mod reflection;

use crate::{
    PhysicsSimulation, Scalar,
    body::Collidable,
    resolvers::{elastic::ElasticCollision, reflection::ImpulseReflection},
};
use serde::{Deserialize, Serialize};
use std::error::Error;
use vek::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionError {
    /// Bodies do not share any sampled point.
    NoContact,
    /// Resistance vanished and reflection has no axis to mirror against.
    DegenerateResistance,
    /// Separation did not finish within the step limit.
    SeparationDiverged { steps: usize },
    /// Neither body is dynamic, so there is nothing to resolve.
    NoDynamicBody,
}

impl Error for CollisionError {}

impl std::fmt::Display for CollisionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoContact => write!(f, "Bodies are not in contact"),
            Self::DegenerateResistance => write!(f, "Resistance vector is zero"),
            Self::SeparationDiverged { steps } => {
                write!(f, "Bodies are still overlapping after {} steps", steps)
            }
            Self::NoDynamicBody => write!(f, "None of the bodies is dynamic"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    ImpulseReflection,
    ElasticCollision,
}

impl StrategyKind {
    pub fn strategy(self) -> &'static dyn CollisionStrategy {
        match self {
            Self::ImpulseReflection => &ImpulseReflection,
            Self::ElasticCollision => &ElasticCollision,
        }
    }
}

/// Updates velocities (and possibly positions) of two colliding bodies.
///
/// `first` is the body the collision is resolved for, `second` is the one it
/// collided with. Returns resistance vector that was used.
pub trait CollisionStrategy {
    fn kind(&self) -> StrategyKind;

    fn resolve(
        &self,
        first: &mut dyn Collidable,
        second: &mut dyn Collidable,
        simulation: &PhysicsSimulation,
    ) -> Result<Vec2<Scalar>, CollisionError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionResponse {
    pub strategy: StrategyKind,
    pub resistance: Vec2<Scalar>,
    /// Bodies were passed to the strategy in reversed order.
    pub swapped: bool,
}

/// Picks strategy for a pair and tells if bodies have to swap roles.
///
/// Two dynamic bodies exchange momentum elastically. A dynamic body hitting
/// background one just reflects, so it always goes first.
pub fn select_strategy(
    a: &dyn Collidable,
    b: &dyn Collidable,
) -> Result<(StrategyKind, bool), CollisionError> {
    match (a.is_dynamic(), b.is_dynamic()) {
        (true, true) => Ok((StrategyKind::ElasticCollision, false)),
        (true, false) => Ok((StrategyKind::ImpulseReflection, false)),
        (false, true) => Ok((StrategyKind::ImpulseReflection, true)),
        (false, false) => Err(CollisionError::NoDynamicBody),
    }
}

pub fn resolve_collision(
    a: &mut dyn Collidable,
    b: &mut dyn Collidable,
    simulation: &PhysicsSimulation,
) -> Result<CollisionResponse, CollisionError> {
    let (strategy, swapped) = select_strategy(&*a, &*b)?;
    let resistance = if swapped {
        strategy.strategy().resolve(b, a, simulation)?
    } else {
        strategy.strategy().resolve(a, b, simulation)?
    };
    Ok(CollisionResponse {
        strategy,
        resistance,
        swapped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Body;

    fn approx(a: Vec2<Scalar>, b: Vec2<Scalar>) -> bool {
        (a - b).magnitude() < 1.0e-4
    }

    #[test]
    fn test_select_strategy() {
        let dynamic = Body::new([0.0, 0.0], [10.0, 10.0]);
        let background = Body::background([0.0, 0.0], [10.0, 10.0]);

        assert_eq!(
            select_strategy(&dynamic, &dynamic),
            Ok((StrategyKind::ElasticCollision, false))
        );
        assert_eq!(
            select_strategy(&dynamic, &background),
            Ok((StrategyKind::ImpulseReflection, false))
        );
        assert_eq!(
            select_strategy(&background, &dynamic),
            Ok((StrategyKind::ImpulseReflection, true))
        );
        assert_eq!(
            select_strategy(&background, &background),
            Err(CollisionError::NoDynamicBody)
        );
        assert_eq!(
            StrategyKind::ElasticCollision.strategy().kind(),
            StrategyKind::ElasticCollision
        );
    }

    #[test]
    fn test_resolve_against_background() {
        let simulation = PhysicsSimulation::default();
        let mut wall = Body::background([10.0, -50.0], [10.0, 100.0]);
        let mut ball = Body::new([1.0, 0.0], [10.0, 10.0]).with_velocity([2.0, 1.0]);

        let response = resolve_collision(&mut wall, &mut ball, &simulation).unwrap();
        assert_eq!(response.strategy, StrategyKind::ImpulseReflection);
        assert!(response.swapped);
        assert!(approx(response.resistance, Vec2::new(-1.0, 0.0)));
        assert!(approx(ball.velocity, Vec2::new(-2.0, 1.0)));
        assert_eq!(wall.velocity, Vec2::zero());
        assert_eq!(wall.position, Vec2::new(10.0, -50.0));
    }

    #[test]
    fn test_resolve_dynamic_pair() {
        let simulation = PhysicsSimulation::default();
        let mut a = Body::new([0.0, 0.0], [10.0, 10.0]).with_velocity([3.0, 0.0]);
        let mut b = Body::new([8.0, 0.0], [10.0, 10.0]).with_velocity([-1.0, 0.0]);

        let response = resolve_collision(&mut a, &mut b, &simulation).unwrap();
        assert_eq!(response.strategy, StrategyKind::ElasticCollision);
        assert!(!response.swapped);
        assert!(approx(a.velocity, Vec2::new(-1.0, 0.0)));
        assert!(approx(b.velocity, Vec2::new(3.0, 0.0)));
    }

    #[test]
    fn test_resolve_errors() {
        let simulation = PhysicsSimulation::default();
        let mut a = Body::background([0.0, 0.0], [10.0, 10.0]);
        let mut b = Body::background([5.0, 5.0], [10.0, 10.0]);
        assert_eq!(
            resolve_collision(&mut a, &mut b, &simulation),
            Err(CollisionError::NoDynamicBody)
        );

        let mut a = Body::new([0.0, 0.0], [10.0, 10.0]);
        let mut b = Body::new([50.0, 0.0], [10.0, 10.0]);
        assert_eq!(
            resolve_collision(&mut a, &mut b, &simulation),
            Err(CollisionError::NoContact)
        );
        assert_eq!(
            CollisionError::SeparationDiverged { steps: 3 }.to_string(),
            "Bodies are still overlapping after 3 steps"
        );
    }
}
