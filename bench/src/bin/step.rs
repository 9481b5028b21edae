use bench::random_scene;
use parabox_physics::{PhysicsPipeline, collisions::collect_collisions};

const BODIES: usize = 2000;
const FRAMES: usize = 200;

fn main() {
    ittapi::pause();

    let step_event = ittapi::Event::new("Pipeline step");
    let collect_event = ittapi::Event::new("Collect collisions");

    let mut registry = random_scene(BODIES, 2000.0);
    let pipeline = PhysicsPipeline::default();

    {
        ittapi::resume();
        for _ in 0..FRAMES {
            let event = step_event.start();
            std::hint::black_box(pipeline.step(&mut registry));
            drop(event);
        }
        ittapi::pause();
    }

    {
        ittapi::resume();
        let event = collect_event.start();
        std::hint::black_box(collect_collisions(&registry, pipeline.get_simulation()));
        drop(event);
        ittapi::pause();
    }
}
