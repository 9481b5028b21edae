pub mod diagnostics;
pub mod scene;

use crate::{diagnostics::Diagnostics, scene::SceneDescription};
use parabox_physics::{
    PhysicsPipeline,
    body::Collidable,
    collisions::{CollisionEvent, CollisionOutcome},
};
use std::{
    collections::HashSet,
    error::Error,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

fn main() -> Result<(), Box<dyn Error>> {
    let _diagnostics = Diagnostics::install()?;

    let scene = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!("Loading scene: {}", path);
            SceneDescription::load(path)?
        }
        None => {
            tracing::info!("Running built-in scene");
            SceneDescription::builtin()
        }
    };

    let mut registry = scene.registry();
    let resolved = Arc::new(AtomicUsize::new(0));
    let pipeline = PhysicsPipeline::default()
        .simulation(scene.simulation.clone())
        .on_collide({
            let resolved = resolved.clone();
            move |event: &CollisionEvent| {
                if event.is_resolved() {
                    resolved.fetch_add(1, Ordering::Relaxed);
                }
            }
        });

    let mut pairs = HashSet::new();
    let mut skipped = 0;
    for frame in 0..scene.frames {
        let _span = tracing::info_span!("frame", frame).entered();
        for event in pipeline.step(&mut registry) {
            pairs.insert(event.pair());
            match event.outcome {
                CollisionOutcome::Skipped(error) => {
                    skipped += 1;
                    tracing::warn!(
                        "Frame {}: collision {} -> {} skipped: {}",
                        frame,
                        event.first,
                        event.second,
                        error
                    );
                }
                outcome => {
                    tracing::debug!(
                        "Frame {}: collision {} -> {} {:?} with resistance: {}",
                        frame,
                        event.first,
                        event.second,
                        outcome,
                        event.resistance
                    );
                }
            }
        }
    }

    for (handle, body) in registry.iter().filter(|(_, body)| body.is_dynamic()) {
        tracing::info!(
            "Body {} | Position: {} | Velocity: {}",
            handle,
            body.position(),
            body.velocity()
        );
    }
    tracing::info!(
        "Simulated {} frames: {} resolved collisions, {} skipped, {} distinct pairs",
        scene.frames,
        resolved.load(Ordering::Relaxed),
        skipped,
        pairs.len()
    );

    Ok(())
}
