use crate::{
    PhysicsSimulation, Scalar,
    body::Collidable,
    queries::{
        affection::get_resistance_vector,
        intersection::{IntersectionSampling, find_intersection_with},
    },
    resolvers::{CollisionError, CollisionStrategy, StrategyKind},
    utils::{angle_from_x_axis, rotate_vector, solve_quadratic},
};
use vek::Vec2;

/// Pushes the first body out of the second one, then exchanges momentum
/// along the resistance axis as perfectly elastic collision.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ElasticCollision;

impl CollisionStrategy for ElasticCollision {
    fn kind(&self) -> StrategyKind {
        StrategyKind::ElasticCollision
    }

    fn resolve(
        &self,
        first: &mut dyn Collidable,
        second: &mut dyn Collidable,
        simulation: &PhysicsSimulation,
    ) -> Result<Vec2<Scalar>, CollisionError> {
        let resistance = clarify_collision_point(first, &*second, simulation)?;
        let [first_velocity, second_velocity] =
            velocity_after_collision(&*first, &*second, resistance);
        first.set_velocity(first_velocity);
        second.set_velocity(second_velocity);
        Ok(resistance)
    }
}

/// Bounds of both bodies touch and their shapes share a sampled point.
pub fn bodies_overlap(
    a: &dyn Collidable,
    b: &dyn Collidable,
    sampling: IntersectionSampling,
) -> bool {
    a.overlaps_bounds(b) && b.overlaps_bounds(a) && find_intersection_with(a, b, sampling).is_some()
}

/// Moves `first` along resistance of `second` until they stop overlapping.
///
/// After separation `first` backs off toward the contact as far as it can
/// without overlapping again, trying one full step and then halves of it.
/// Zero resistance falls back to the simulation fallback axis. If bodies are
/// still overlapping after the step limit, `first` goes back to where it
/// started and the pair is reported as diverged.
pub fn clarify_collision_point(
    first: &mut dyn Collidable,
    second: &dyn Collidable,
    simulation: &PhysicsSimulation,
) -> Result<Vec2<Scalar>, CollisionError> {
    let resistance =
        get_resistance_vector(second, &*first, simulation).ok_or(CollisionError::NoContact)?;
    let resistance = if resistance == Vec2::zero() {
        simulation.fallback_direction()
    } else {
        resistance
    };

    let sampling = simulation.intersection_sampling;
    let origin = first.position();
    let mut steps = 0;
    while bodies_overlap(&*first, second, sampling) {
        if steps >= simulation.separation_step_limit {
            first.set_position(origin);
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "Separation diverged after {} steps at position: {}",
                steps,
                origin
            );
            return Err(CollisionError::SeparationDiverged { steps });
        }
        first.translate(resistance);
        steps += 1;
    }

    if steps > 0 {
        let mut back_off = resistance;
        for _ in 0..=simulation.separation_backoff_attempts {
            first.translate(-back_off);
            if !bodies_overlap(&*first, second, sampling) {
                break;
            }
            first.translate(back_off);
            back_off *= 0.5;
        }
    }

    Ok(resistance)
}

/// Velocities of both bodies after perfectly elastic collision along
/// `resistance` axis.
///
/// Solved in the frame where the second body rests and the first one moves
/// along X axis. Immovable second body makes the first one bounce back while
/// the second keeps its velocity.
pub fn velocity_after_collision(
    first: &dyn Collidable,
    second: &dyn Collidable,
    resistance: Vec2<Scalar>,
) -> [Vec2<Scalar>; 2] {
    let boost = second.velocity();
    let angle = angle_from_x_axis(resistance);
    let velocity = rotate_vector(first.velocity() - boost, -angle);
    let ratio = first.mass().ratio_to(second.mass());

    let incoming = velocity.x;
    let outgoing = solve_quadratic(
        ratio + 1.0,
        -2.0 * ratio * incoming,
        (ratio - 1.0) * incoming * incoming,
    )
    .map(|[a, b]| {
        // one root always keeps the incoming velocity as if nothing happened.
        if (a - incoming).abs() >= (b - incoming).abs() {
            a
        } else {
            b
        }
    })
    .unwrap_or(-incoming);
    let pushed = ratio * (incoming - outgoing);

    let first_velocity = rotate_vector(Vec2::new(outgoing, velocity.y), angle) + boost;
    let second_velocity = rotate_vector(Vec2::new(pushed, 0.0), angle) + boost;
    [first_velocity, second_velocity]
}
