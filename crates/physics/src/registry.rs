use crate::body::{Body, Collidable};
use serde::{Deserialize, Serialize};

/// Stable identifier of a body within its registry.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct BodyHandle(u32);

impl BodyHandle {
    pub fn id(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Bodies taking part in a simulation, kept in insertion order.
pub struct BodyRegistry<B: Collidable = Body> {
    bodies: Vec<(BodyHandle, B)>,
    next_id: u32,
}

impl<B: Collidable> Default for BodyRegistry<B> {
    fn default() -> Self {
        Self {
            bodies: Default::default(),
            next_id: 1,
        }
    }
}

impl<B: Collidable> BodyRegistry<B> {
    pub fn with(mut self, body: B) -> Self {
        self.add(body);
        self
    }

    pub fn add(&mut self, body: B) -> BodyHandle {
        let handle = BodyHandle(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.bodies.push((handle, body));
        handle
    }

    pub fn remove(&mut self, handle: BodyHandle) -> Option<B> {
        let index = self.index_of(handle)?;
        Some(self.bodies.remove(index).1)
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
        self.next_id = 1;
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.index_of(handle).is_some()
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&B> {
        let index = self.index_of(handle)?;
        Some(&self.bodies[index].1)
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut B> {
        let index = self.index_of(handle)?;
        Some(&mut self.bodies[index].1)
    }

    /// Mutable access to two different bodies at once.
    pub fn pair_mut(&mut self, a: BodyHandle, b: BodyHandle) -> Option<(&mut B, &mut B)> {
        let a = self.index_of(a)?;
        let b = self.index_of(b)?;
        if a == b {
            return None;
        }
        if a < b {
            let (left, right) = self.bodies.split_at_mut(b);
            Some((&mut left[a].1, &mut right[0].1))
        } else {
            let (left, right) = self.bodies.split_at_mut(a);
            Some((&mut right[0].1, &mut left[b].1))
        }
    }

    pub fn handles(&self) -> impl Iterator<Item = BodyHandle> + '_ {
        self.bodies.iter().map(|(handle, _)| *handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &B)> {
        self.bodies.iter().map(|(handle, body)| (*handle, body))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyHandle, &mut B)> {
        self.bodies.iter_mut().map(|(handle, body)| (*handle, body))
    }

    fn index_of(&self, handle: BodyHandle) -> Option<usize> {
        // handles only grow, so insertion order is sorted.
        self.bodies
            .binary_search_by_key(&handle, |(handle, _)| *handle)
            .ok()
    }
}

impl<B: Collidable> FromIterator<B> for BodyRegistry<B> {
    fn from_iter<T: IntoIterator<Item = B>>(iter: T) -> Self {
        let mut result = Self::default();
        for body in iter {
            result.add(body);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vek::Vec2;

    #[test]
    fn test_registry() {
        let mut registry = BodyRegistry::<Body>::default();
        assert!(registry.is_empty());

        let a = registry.add(Body::new([0.0, 0.0], [1.0, 1.0]));
        let b = registry.add(Body::new([1.0, 0.0], [1.0, 1.0]));
        let c = registry.add(Body::new([2.0, 0.0], [1.0, 1.0]));
        assert_eq!(a.id(), 1);
        assert_eq!(c.id(), 3);
        assert_eq!(registry.len(), 3);

        assert_eq!(registry.remove(b).map(|body| body.position.x), Some(1.0));
        assert!(registry.remove(b).is_none());
        assert!(!registry.contains(b));
        assert_eq!(registry.handles().collect::<Vec<_>>(), vec![a, c]);

        let d = registry.add(Body::new([3.0, 0.0], [1.0, 1.0]));
        assert_eq!(d.id(), 4);
        assert_eq!(registry.get(d).map(|body| body.position.x), Some(3.0));

        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.get(a).is_none());
        assert_eq!(registry.add(Body::new([0.0, 0.0], [1.0, 1.0])).id(), 1);
    }

    #[test]
    fn test_registry_pair_mut() {
        let mut registry = [
            Body::new([0.0, 0.0], [1.0, 1.0]),
            Body::new([5.0, 0.0], [1.0, 1.0]),
        ]
        .into_iter()
        .collect::<BodyRegistry>();
        let [a, b] = [BodyHandle(1), BodyHandle(2)];

        assert!(registry.pair_mut(a, a).is_none());
        assert!(registry.pair_mut(a, BodyHandle(10)).is_none());

        let (first, second) = registry.pair_mut(b, a).unwrap();
        assert_eq!(first.position, Vec2::new(5.0, 0.0));
        first.velocity = Vec2::new(1.0, 0.0);
        second.velocity = Vec2::new(-1.0, 0.0);

        assert_eq!(registry.get(a).unwrap().velocity, Vec2::new(-1.0, 0.0));
        assert_eq!(registry.get_mut(b).unwrap().velocity, Vec2::new(1.0, 0.0));
        assert_eq!(registry.iter().count(), 2);
    }
}
