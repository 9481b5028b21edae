use crate::{PhysicsSimulation, body::Collidable, registry::BodyRegistry};

/// Moves every dynamic body by its velocity. Background bodies stay put.
pub fn integrate_velocities<B: Collidable>(
    registry: &mut BodyRegistry<B>,
    simulation: &PhysicsSimulation,
) {
    for (_, body) in registry.iter_mut() {
        if body.is_dynamic() {
            let offset = body.velocity() * simulation.delta_time;
            body.translate(offset);
        }
    }
}
