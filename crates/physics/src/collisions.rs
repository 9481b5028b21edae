use crate::{
    PhysicsSimulation, Scalar,
    body::Collidable,
    queries::affection::get_resistance_vector,
    registry::{BodyHandle, BodyRegistry},
    resolvers::{CollisionError, StrategyKind, resolve_collision},
};
use parabox_spatial::{
    SpatialExtractor, SpatialPartitioning,
    third_party::rstar::{
        AABB, Envelope, Point, PointDistance, RTreeObject, primitives::Rectangle,
    },
};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use vek::{Aabr, Vec2};

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BodyPair([BodyHandle; 2]);

impl BodyPair {
    pub fn new(a: BodyHandle, b: BodyHandle) -> Self {
        if a < b { Self([a, b]) } else { Self([b, a]) }
    }

    pub fn from_array([a, b]: [BodyHandle; 2]) -> Self {
        Self::new(a, b)
    }

    pub fn into_array(self) -> [BodyHandle; 2] {
        self.0
    }

    pub fn a(&self) -> BodyHandle {
        self.0[0]
    }

    pub fn b(&self) -> BodyHandle {
        self.0[1]
    }

    pub fn has(&self, handle: BodyHandle) -> bool {
        self.0[0] == handle || self.0[1] == handle
    }
}

impl From<[BodyHandle; 2]> for BodyPair {
    fn from(array: [BodyHandle; 2]) -> Self {
        Self::from_array(array)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionOutcome {
    /// Contact found by read-only detection, nothing was changed.
    Detected,
    Resolved(StrategyKind),
    Skipped(CollisionError),
}

/// Contact of `first` body with `second` one, in order they were checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionEvent {
    pub first: BodyHandle,
    pub second: BodyHandle,
    /// Resistance of `second` against `first`. Zero for skipped collisions.
    pub resistance: Vec2<Scalar>,
    pub outcome: CollisionOutcome,
}

impl CollisionEvent {
    pub fn pair(&self) -> BodyPair {
        BodyPair::new(self.first, self.second)
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.outcome, CollisionOutcome::Resolved(_))
    }
}

pub struct BodySpatialObject {
    pub aabr: Aabr<Scalar>,
}

impl BodySpatialObject {
    pub fn new(body: &dyn Collidable) -> Self {
        Self { aabr: body.aabr() }
    }

    fn rectangle(&self) -> Rectangle<[Scalar; 2]> {
        Rectangle::from_corners(self.aabr.min.into_array(), self.aabr.max.into_array())
    }
}

impl RTreeObject for BodySpatialObject {
    type Envelope = AABB<[Scalar; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.aabr.min.into_array(), self.aabr.max.into_array())
    }
}

impl PointDistance for BodySpatialObject {
    fn distance_2(
        &self,
        point: &<Self::Envelope as Envelope>::Point,
    ) -> <<Self::Envelope as Envelope>::Point as Point>::Scalar {
        self.rectangle().distance_2(point)
    }

    fn contains_point(&self, point: &<Self::Envelope as Envelope>::Point) -> bool {
        self.rectangle().contains_point(point)
    }

    fn distance_2_if_less_or_equal(
        &self,
        point: &<Self::Envelope as Envelope>::Point,
        max_distance_2: <<Self::Envelope as Envelope>::Point as Point>::Scalar,
    ) -> Option<<<Self::Envelope as Envelope>::Point as Point>::Scalar> {
        self.rectangle()
            .distance_2_if_less_or_equal(point, max_distance_2)
    }
}

pub struct BodySpatialExtractor<B: Collidable = crate::body::Body>(PhantomData<fn() -> B>);

impl<B: Collidable + 'static> SpatialExtractor for BodySpatialExtractor<B> {
    type Source = BodyRegistry<B>;
    type Key = BodyHandle;
    type SpatialObject = BodySpatialObject;

    fn extract(source: &Self::Source) -> impl Iterator<Item = (Self::Key, Self::SpatialObject)> {
        source
            .iter()
            .map(|(handle, body)| (handle, BodySpatialObject::new(body)))
    }
}

pub type BodySpatialPartitioning<B = crate::body::Body> =
    SpatialPartitioning<BodySpatialExtractor<B>>;

/// Handles of bodies whose bounds intersect with `body` bounds, in registry
/// order, excluding `handle` itself.
fn candidates_of<B: Collidable + 'static>(
    spatial: &BodySpatialPartitioning<B>,
    handle: BodyHandle,
    body: &dyn Collidable,
) -> Vec<BodyHandle> {
    let mut result = spatial
        .locate_intersecting_keys(&BodySpatialObject::new(body).envelope())
        .filter(|other| *other != handle)
        .collect::<Vec<_>>();
    result.sort();
    result
}

/// Read-only contact detection.
///
/// Reports every touching pair twice, once from the point of view of each
/// body.
pub fn collect_collisions<B: Collidable + 'static>(
    registry: &BodyRegistry<B>,
    simulation: &PhysicsSimulation,
) -> Vec<CollisionEvent> {
    let spatial = BodySpatialPartitioning::<B>::new(registry);
    let mut result = vec![];
    for (handle, body) in registry.iter() {
        for other in candidates_of(&spatial, handle, body) {
            let Some(other_body) = registry.get(other) else {
                continue;
            };
            if !body.overlaps_bounds(other_body) || !other_body.overlaps_bounds(body) {
                continue;
            }
            if let Some(resistance) = get_resistance_vector(other_body, body, simulation) {
                result.push(CollisionEvent {
                    first: handle,
                    second: other,
                    resistance,
                    outcome: CollisionOutcome::Detected,
                });
            }
        }
    }
    result
}

/// Detects and resolves collisions of every dynamic body against all other
/// bodies.
///
/// Broadphase is built once from current positions, but every pair is
/// checked against live state right before it gets resolved, so results of
/// one pair are visible to the next one.
pub fn resolve_collisions<B: Collidable + 'static>(
    registry: &mut BodyRegistry<B>,
    simulation: &PhysicsSimulation,
    callbacks: &CollisionCallbacks,
) -> Vec<CollisionEvent> {
    let spatial = BodySpatialPartitioning::<B>::new(registry);
    let handles = registry.handles().collect::<Vec<_>>();
    let mut result = vec![];
    for handle in handles {
        let candidates = match registry.get(handle) {
            Some(body) if body.is_dynamic() => candidates_of(&spatial, handle, body),
            _ => continue,
        };
        for other in candidates {
            let Some((first, second)) = registry.pair_mut(handle, other) else {
                continue;
            };
            if !first.overlaps_bounds(second) || !second.overlaps_bounds(first) {
                continue;
            }
            let event = match resolve_collision(first, second, simulation) {
                Ok(response) => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(
                        "Resolved collision {} -> {} using {:?} with resistance: {}",
                        handle,
                        other,
                        response.strategy,
                        response.resistance
                    );
                    CollisionEvent {
                        first: handle,
                        second: other,
                        resistance: response.resistance,
                        outcome: CollisionOutcome::Resolved(response.strategy),
                    }
                }
                Err(CollisionError::NoContact) => continue,
                Err(error) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("Skipped collision {} -> {}: {}", handle, other, error);
                    CollisionEvent {
                        first: handle,
                        second: other,
                        resistance: Vec2::zero(),
                        outcome: CollisionOutcome::Skipped(error),
                    }
                }
            };
            callbacks.run(&event);
            result.push(event);
        }
    }
    result
}

/// Observers notified about every collision event, in order of resolution.
pub struct CollisionCallbacks {
    #[allow(clippy::type_complexity)]
    callbacks: Vec<Box<dyn Fn(&CollisionEvent) + Send + Sync>>,
}

impl Default for CollisionCallbacks {
    fn default() -> Self {
        Self::empty()
    }
}

impl CollisionCallbacks {
    pub fn empty() -> Self {
        Self {
            callbacks: Default::default(),
        }
    }

    pub fn on_collide(
        mut self,
        callback: impl Fn(&CollisionEvent) + Send + Sync + 'static,
    ) -> Self {
        self.callbacks.push(Box::new(callback));
        self
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn run(&self, event: &CollisionEvent) {
        for callback in &self.callbacks {
            callback(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Body;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    fn approx(a: Vec2<Scalar>, b: Vec2<Scalar>) -> bool {
        (a - b).magnitude() < 1.0e-4
    }

    #[test]
    fn test_body_pair() {
        let mut registry = BodyRegistry::<Body>::default();
        let a = registry.add(Body::new([0.0, 0.0], [1.0, 1.0]));
        let b = registry.add(Body::new([0.0, 0.0], [1.0, 1.0]));
        let c = registry.add(Body::new([0.0, 0.0], [1.0, 1.0]));

        assert_eq!(BodyPair::new(a, b), BodyPair([a, b]));
        assert_eq!(BodyPair::new(b, a), BodyPair([a, b]));
        assert_eq!(BodyPair::new(c, a), BodyPair([a, c]));
        assert_eq!(BodyPair::from([c, b]).into_array(), [b, c]);
        assert!(BodyPair::new(b, c).has(c));
        assert!(!BodyPair::new(b, c).has(a));
    }

    #[test]
    fn test_collect_collisions() {
        let simulation = PhysicsSimulation::default();
        let mut registry = BodyRegistry::<Body>::default();
        let a = registry.add(Body::new([0.0, 0.0], [10.0, 10.0]));
        let b = registry.add(Body::new([8.0, 0.0], [10.0, 10.0]));
        let c = registry.add(Body::background([100.0, 0.0], [10.0, 10.0]));
        let d = registry.add(Body::background([105.0, 5.0], [10.0, 10.0]));

        let events = collect_collisions(&registry, &simulation);
        assert_eq!(events.len(), 4);
        assert_eq!((events[0].first, events[0].second), (a, b));
        assert!(approx(events[0].resistance, Vec2::new(-1.0, 0.0)));
        assert_eq!((events[1].first, events[1].second), (b, a));
        assert!(approx(events[1].resistance, Vec2::new(1.0, 0.0)));
        assert_eq!((events[2].first, events[2].second), (c, d));
        assert_eq!((events[3].first, events[3].second), (d, c));
        assert!(
            events
                .iter()
                .all(|event| event.outcome == CollisionOutcome::Detected)
        );
        assert_eq!(events[0].pair(), events[1].pair());

        // detection never moves anything.
        assert_eq!(registry.get(a).unwrap().position, Vec2::new(0.0, 0.0));
        assert_eq!(registry.get(b).unwrap().position, Vec2::new(8.0, 0.0));
    }

    #[test]
    fn test_collect_resting_collisions() {
        let simulation = PhysicsSimulation::default();
        let mut registry = BodyRegistry::<Body>::default();
        let floor = registry.add(Body::background([0.0, 0.0], [100.0, 10.0]));
        let block = registry.add(Body::new([20.0, 10.0], [10.0, 10.0]));

        let events = collect_collisions(&registry, &simulation);
        assert_eq!(events.len(), 2);
        assert_eq!((events[0].first, events[0].second), (floor, block));
        assert_eq!((events[1].first, events[1].second), (block, floor));
        assert!(approx(events[1].resistance, Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn test_resolve_collisions() {
        let simulation = PhysicsSimulation::default();
        let mut registry = BodyRegistry::<Body>::default();
        let a = registry.add(Body::new([0.0, 0.0], [10.0, 10.0]).with_velocity([3.0, 0.0]));
        let b = registry.add(Body::new([8.0, 0.0], [10.0, 10.0]).with_velocity([-1.0, 0.0]));
        let wall = registry.add(Body::background([100.0, -50.0], [10.0, 100.0]));
        let ball = registry.add(Body::new([91.0, 0.0], [10.0, 10.0]).with_velocity([2.0, 1.0]));
        let x = registry.add(Body::background([200.0, 0.0], [10.0, 10.0]));
        let y = registry.add(Body::background([205.0, 0.0], [10.0, 10.0]));

        let counter = Arc::new(AtomicUsize::new(0));
        let callbacks = CollisionCallbacks::empty().on_collide({
            let counter = counter.clone();
            move |event| {
                assert!(event.is_resolved());
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        let events = resolve_collisions(&mut registry, &simulation, &callbacks);
        // second check of the dynamic pair finds them already separated.
        assert_eq!(events.len(), 2);
        assert_eq!(counter.load(Ordering::SeqCst), 2);

        assert_eq!((events[0].first, events[0].second), (a, b));
        assert_eq!(
            events[0].outcome,
            CollisionOutcome::Resolved(StrategyKind::ElasticCollision)
        );
        assert!(approx(
            registry.get(a).unwrap().velocity,
            Vec2::new(-1.0, 0.0)
        ));
        assert!(approx(registry.get(b).unwrap().velocity, Vec2::new(3.0, 0.0)));

        assert_eq!((events[1].first, events[1].second), (ball, wall));
        assert_eq!(
            events[1].outcome,
            CollisionOutcome::Resolved(StrategyKind::ImpulseReflection)
        );
        assert!(approx(
            registry.get(ball).unwrap().velocity,
            Vec2::new(-2.0, 1.0)
        ));

        // background bodies never check collisions on their own.
        assert!(
            events
                .iter()
                .all(|event| !event.pair().has(x) && !event.pair().has(y))
        );
    }

    #[test]
    fn test_resolve_collisions_skipped() {
        let simulation = PhysicsSimulation::default();
        let mut registry = BodyRegistry::<Body>::default();
        let wall = registry.add(Body::background([0.0, 0.0], [100.0, 100.0]));
        let body = registry.add(Body::new([40.0, 40.0], [10.0, 10.0]).with_velocity([1.0, 0.0]));

        let events = resolve_collisions(&mut registry, &simulation, &CollisionCallbacks::empty());
        assert_eq!(events.len(), 1);
        assert_eq!((events[0].first, events[0].second), (body, wall));
        assert_eq!(
            events[0].outcome,
            CollisionOutcome::Skipped(CollisionError::DegenerateResistance)
        );
        assert_eq!(events[0].resistance, Vec2::zero());
        assert_eq!(
            registry.get(body).unwrap().velocity,
            Vec2::new(1.0, 0.0)
        );
    }
}
