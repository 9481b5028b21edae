use bench::random_overlapping_pair;
use parabox_physics::{
    PhysicsSimulation,
    queries::{
        affection::resistance_vector,
        intersection::{IntersectionSampling, find_intersection_with},
    },
};

const ITERATIONS: usize = 100000;

fn main() {
    ittapi::pause();

    let perimeter_event = ittapi::Event::new("Find intersection (perimeter)");
    let outlines_event = ittapi::Event::new("Find intersection (outlines)");
    let interior_event = ittapi::Event::new("Find intersection (interior)");
    let resistance_event = ittapi::Event::new("Resistance vector");

    let simulation = PhysicsSimulation::default();
    let pairs = (0..ITERATIONS)
        .map(|_| random_overlapping_pair(64.0))
        .collect::<Vec<_>>();

    for (sampling, event) in [
        (IntersectionSampling::Perimeter, &perimeter_event),
        (IntersectionSampling::Outlines, &outlines_event),
        (IntersectionSampling::Interior, &interior_event),
    ] {
        ittapi::resume();
        let event = event.start();
        for (a, b) in &pairs {
            std::hint::black_box(find_intersection_with(a, b, sampling));
        }
        drop(event);
        ittapi::pause();
    }

    let intersections = pairs
        .iter()
        .filter_map(|(a, b)| {
            find_intersection_with(a, b, simulation.intersection_sampling)
                .map(|intersection| (b, intersection))
        })
        .collect::<Vec<_>>();

    {
        ittapi::resume();
        let event = resistance_event.start();
        for (checking, intersection) in &intersections {
            std::hint::black_box(resistance_vector(
                *checking,
                *intersection,
                simulation.affection_expand,
            ));
        }
        drop(event);
        ittapi::pause();
    }
}
