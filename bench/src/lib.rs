use parabox_physics::{
    Scalar,
    body::Body,
    components::Mass,
    registry::BodyRegistry,
    shapes::ellipse::EllipseShape,
    third_party::vek::Vec2,
};
use rand::{Rng, rng};

/// Rectangle or circle somewhere in `[0, extent]` square, moving slowly.
pub fn random_body(extent: Scalar, max_size: Scalar) -> Body {
    let mut rng = rng();
    let size = rng.random_range(4.0..max_size);
    let position = Vec2::<Scalar>::new(
        rng.random_range(0.0..extent - size),
        rng.random_range(0.0..extent - size),
    );
    let velocity = Vec2::<Scalar>::new(rng.random_range(-2.0..2.0), rng.random_range(-2.0..2.0));
    let body = Body::new(position, [size, size])
        .with_velocity(velocity)
        .with_mass(Mass::new(rng.random_range(0.5..4.0)).unwrap_or_default());
    if rng.random_bool(0.5) {
        body.with_shape(EllipseShape)
    } else {
        body
    }
}

/// Two bodies of which the second always overlaps the first one.
pub fn random_overlapping_pair(max_size: Scalar) -> (Body, Body) {
    let mut rng = rng();
    let a = random_body(max_size * 2.0, max_size);
    let offset = a.size.w * rng.random_range(0.1..0.9);
    let b = Body::new(
        [a.position.x + offset, a.position.y + offset * 0.5],
        [a.size.w, a.size.h],
    )
    .with_velocity([-a.velocity.x, -a.velocity.y]);
    (a, b)
}

/// Closed box with `count` random dynamic bodies inside.
pub fn random_scene(count: usize, extent: Scalar) -> BodyRegistry {
    let wall = 10.0;
    let mut registry = BodyRegistry::default()
        .with(Body::background([0.0, 0.0], [extent, wall]))
        .with(Body::background([0.0, extent - wall], [extent, wall]))
        .with(Body::background([0.0, wall], [wall, extent - wall * 2.0]))
        .with(Body::background(
            [extent - wall, wall],
            [wall, extent - wall * 2.0],
        ));
    for _ in 0..count {
        let mut body = random_body(extent - wall * 2.0, 16.0);
        body.position += wall;
        registry.add(body);
    }
    registry
}
