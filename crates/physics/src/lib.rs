pub mod body;
pub mod collisions;
pub mod components;
pub mod queries;
pub mod registry;
pub mod resolvers;
pub mod shapes;
pub mod solvers;
pub mod utils;

pub mod third_party {
    pub use vek;
}

use crate::{
    body::Collidable,
    collisions::{CollisionCallbacks, CollisionEvent, resolve_collisions},
    queries::intersection::IntersectionSampling,
    registry::BodyRegistry,
    solvers::integrate_velocities,
};
use serde::{Deserialize, Serialize};
use vek::Vec2;

pub type Scalar = f32;
pub use std::f32 as scalar;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSimulation {
    /// Velocities are measured per frame, so default step is one frame.
    pub delta_time: Scalar,
    /// Cells added on every side of an intersection when computing
    /// resistance.
    pub affection_expand: i32,
    pub intersection_sampling: IntersectionSampling,
    pub separation_step_limit: usize,
    pub separation_backoff_attempts: usize,
    /// Separation direction used when resistance vanishes.
    pub fallback_axis: Vec2<Scalar>,
}

impl Default for PhysicsSimulation {
    fn default() -> Self {
        Self {
            delta_time: 1.0,
            affection_expand: 5,
            intersection_sampling: IntersectionSampling::Outlines,
            separation_step_limit: 1000,
            separation_backoff_attempts: 4,
            fallback_axis: Vec2::unit_x(),
        }
    }
}

impl PhysicsSimulation {
    /// Preset for scenes full of small bodies sitting close to each other.
    pub fn tightly_packed() -> Self {
        Self {
            affection_expand: 1,
            intersection_sampling: IntersectionSampling::Interior,
            ..Default::default()
        }
    }

    pub fn fallback_direction(&self) -> Vec2<Scalar> {
        self.fallback_axis
            .try_normalized()
            .unwrap_or_else(Vec2::unit_x)
    }
}

pub struct PhysicsPipeline {
    simulation: PhysicsSimulation,
    install_integrate_velocities: bool,
    install_resolve_collisions: bool,
    callbacks: CollisionCallbacks,
}

impl Default for PhysicsPipeline {
    fn default() -> Self {
        Self {
            simulation: Default::default(),
            install_integrate_velocities: true,
            install_resolve_collisions: true,
            callbacks: Default::default(),
        }
    }
}

impl PhysicsPipeline {
    pub fn barebones() -> Self {
        Self {
            simulation: PhysicsSimulation::default(),
            install_integrate_velocities: false,
            install_resolve_collisions: false,
            callbacks: Default::default(),
        }
    }

    pub fn simulation(mut self, simulation: PhysicsSimulation) -> Self {
        self.simulation = simulation;
        self
    }

    pub fn install_integrate_velocities(mut self, install: bool) -> Self {
        self.install_integrate_velocities = install;
        self
    }

    pub fn install_resolve_collisions(mut self, install: bool) -> Self {
        self.install_resolve_collisions = install;
        self
    }

    pub fn on_collide(
        mut self,
        callback: impl Fn(&CollisionEvent) + Send + Sync + 'static,
    ) -> Self {
        self.callbacks = self.callbacks.on_collide(callback);
        self
    }

    pub fn get_simulation(&self) -> &PhysicsSimulation {
        &self.simulation
    }

    /// Advances registry by single tick: moves bodies, then resolves their
    /// collisions pair by pair.
    pub fn step<B: Collidable + 'static>(
        &self,
        registry: &mut BodyRegistry<B>,
    ) -> Vec<CollisionEvent> {
        if self.install_integrate_velocities {
            integrate_velocities(registry, &self.simulation);
        }
        if self.install_resolve_collisions {
            resolve_collisions(registry, &self.simulation, &self.callbacks)
        } else {
            vec![]
        }
    }
}
