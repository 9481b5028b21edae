use rstar::{Envelope, PointDistance, RTree, RTreeObject, primitives::GeomWithData};
use std::marker::PhantomData;

pub mod third_party {
    pub use rstar;
}

type SpatialEnvelope<Extractor> =
    <<Extractor as SpatialExtractor>::SpatialObject as RTreeObject>::Envelope;
type SpatialPoint<Extractor> = <SpatialEnvelope<Extractor> as Envelope>::Point;

/// Tells how to turn some source collection into keyed spatial objects.
pub trait SpatialExtractor: 'static {
    type Source: ?Sized;
    type Key: Copy + PartialEq;
    type SpatialObject: RTreeObject + PointDistance;

    fn extract(source: &Self::Source) -> impl Iterator<Item = (Self::Key, Self::SpatialObject)>;
}

pub struct SpatialPartitioning<Extractor: SpatialExtractor> {
    tree: RTree<GeomWithData<Extractor::SpatialObject, Extractor::Key>>,
    _phantom: PhantomData<fn() -> Extractor>,
}

impl<Extractor: SpatialExtractor> Default for SpatialPartitioning<Extractor> {
    fn default() -> Self {
        Self {
            tree: RTree::default(),
            _phantom: PhantomData,
        }
    }
}

impl<Extractor: SpatialExtractor> SpatialPartitioning<Extractor> {
    pub fn new(source: &Extractor::Source) -> Self {
        let mut result = Self::default();
        result.rebuild(source);
        result
    }

    pub fn rebuild(&mut self, source: &Extractor::Source) {
        self.tree = RTree::bulk_load(
            Extractor::extract(source)
                .map(|(key, object)| GeomWithData::new(object, key))
                .collect::<Vec<_>>(),
        );
    }

    pub fn clear(&mut self) {
        self.tree = RTree::default();
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    pub fn tree(&self) -> &RTree<GeomWithData<Extractor::SpatialObject, Extractor::Key>> {
        &self.tree
    }

    pub fn nearest_keys(
        &self,
        point: &SpatialPoint<Extractor>,
    ) -> impl Iterator<Item = Extractor::Key> + '_ {
        self.tree.nearest_neighbor_iter(point).map(|geom| geom.data)
    }

    pub fn locate_contained_keys(
        &self,
        envelope: &SpatialEnvelope<Extractor>,
    ) -> impl Iterator<Item = Extractor::Key> + '_ {
        self.tree.locate_in_envelope(envelope).map(|geom| geom.data)
    }

    pub fn locate_intersecting_keys(
        &self,
        envelope: &SpatialEnvelope<Extractor>,
    ) -> impl Iterator<Item = Extractor::Key> + '_ {
        self.tree
            .locate_in_envelope_intersecting(envelope)
            .map(|geom| geom.data)
    }

    /// Keys of every object whose envelope intersects the one stored under `key`,
    /// excluding `key` itself.
    pub fn neighbours_of(&self, key: Extractor::Key) -> impl Iterator<Item = Extractor::Key> + '_ {
        self.tree
            .iter()
            .filter(move |geom| geom.data == key)
            .flat_map(move |geom| {
                self.tree
                    .locate_in_envelope_intersecting(&geom.envelope())
                    .map(|other| other.data)
            })
            .filter(move |other| *other != key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstar::AABB;

    struct PointsExtractor;

    impl SpatialExtractor for PointsExtractor {
        type Source = [(usize, [f32; 2])];
        type Key = usize;
        type SpatialObject = [f32; 2];

        fn extract(source: &Self::Source) -> impl Iterator<Item = (Self::Key, Self::SpatialObject)> {
            source.iter().copied()
        }
    }

    struct BoxesExtractor;

    impl SpatialExtractor for BoxesExtractor {
        type Source = [(u32, [f32; 2], [f32; 2])];
        type Key = u32;
        type SpatialObject = rstar::primitives::Rectangle<[f32; 2]>;

        fn extract(source: &Self::Source) -> impl Iterator<Item = (Self::Key, Self::SpatialObject)> {
            source
                .iter()
                .map(|(key, min, max)| (*key, rstar::primitives::Rectangle::from_corners(*min, *max)))
        }
    }

    #[test]
    fn test_nearest_and_contained() {
        let source = [
            (0, [0.0, 1.0]),
            (1, [3.0, 0.0]),
            (2, [-4.0, 0.0]),
            (3, [10.0, 10.0]),
        ];
        let spatial = SpatialPartitioning::<PointsExtractor>::new(&source);
        assert_eq!(spatial.len(), 4);

        let nearest = spatial.nearest_keys(&[0.0, 0.0]).collect::<Vec<_>>();
        assert_eq!(nearest, vec![0, 1, 2, 3]);

        let mut contained = spatial
            .locate_contained_keys(&AABB::from_corners([0.0, 0.0], [f32::INFINITY, f32::INFINITY]))
            .collect::<Vec<_>>();
        contained.sort();
        assert_eq!(contained, vec![0, 1, 3]);
    }

    #[test]
    fn test_neighbours() {
        let source = [
            (1, [0.0, 0.0], [10.0, 10.0]),
            (2, [10.0, 5.0], [20.0, 15.0]),
            (3, [30.0, 30.0], [40.0, 40.0]),
        ];
        let mut spatial = SpatialPartitioning::<BoxesExtractor>::new(&source);

        assert_eq!(spatial.neighbours_of(1).collect::<Vec<_>>(), vec![2]);
        assert_eq!(spatial.neighbours_of(2).collect::<Vec<_>>(), vec![1]);
        assert!(spatial.neighbours_of(3).next().is_none());

        let mut intersecting = spatial
            .locate_intersecting_keys(&AABB::from_corners([5.0, 5.0], [35.0, 35.0]))
            .collect::<Vec<_>>();
        intersecting.sort();
        assert_eq!(intersecting, vec![1, 2, 3]);

        spatial.clear();
        assert!(spatial.is_empty());
    }
}
