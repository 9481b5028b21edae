use parabox_spatial::{SpatialExtractor, SpatialPartitioning, third_party::rstar::AABB};
use std::error::Error;
use vek::Vec2;

fn main() -> Result<(), Box<dyn Error>> {
    // Only markers with `spatial` flag set are put into the tree.
    let markers = vec![
        Marker::new("a", Vec2::new(0.0, 1.0), true),
        Marker::new("b", Vec2::new(0.0, -2.0), false),
        Marker::new("c", Vec2::new(3.0, 0.0), true),
        Marker::new("d", Vec2::new(-4.0, 0.0), true),
    ];

    let spatial = SpatialPartitioning::<MarkersExtractor>::new(&markers);

    // Print all spatial markers and their distances
    // in order by their distance to queried point.
    println!("Nearest markers to [0, 0]:");
    for index in spatial.nearest_keys(&[0.0, 0.0]) {
        let marker = &markers[index];
        let distance = marker.position.magnitude();
        println!(
            "Marker: {} | Position: {} | Distance: {distance}",
            marker.name, marker.position
        );
    }

    // Print all spatial markers contained in the positive X and Y area.
    println!("Markers contained in AABB from [0, 0] to [inf, inf]:");
    for index in spatial.locate_contained_keys(&AABB::from_corners(
        [0.0, 0.0],
        [f32::INFINITY, f32::INFINITY],
    )) {
        let marker = &markers[index];
        println!("Marker: {} | Position: {}", marker.name, marker.position);
    }

    Ok(())
}

struct Marker {
    name: &'static str,
    position: Vec2<f32>,
    spatial: bool,
}

impl Marker {
    fn new(name: &'static str, position: Vec2<f32>, spatial: bool) -> Self {
        Self {
            name,
            position,
            spatial,
        }
    }
}

struct MarkersExtractor;

// Spatial extractor tells how to extract spatial objects from the source collection.
impl SpatialExtractor for MarkersExtractor {
    type Source = [Marker];
    type Key = usize;
    type SpatialObject = [f32; 2];

    fn extract(source: &Self::Source) -> impl Iterator<Item = (Self::Key, Self::SpatialObject)> {
        source
            .iter()
            .enumerate()
            .filter(|(_, marker)| marker.spatial)
            .map(|(index, marker)| (index, [marker.position.x, marker.position.y]))
    }
}
