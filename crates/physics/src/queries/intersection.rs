use crate::{Scalar, body::Collidable};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use vek::{Aabr, Vec2};

/// Which lattice points are tested when looking for the intersection of two
/// bodies.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntersectionSampling {
    /// Outline of the smaller (reference) body only.
    ///
    /// Cheapest, but when the reference outline crosses the other body only
    /// with one of its edges, part of the overlap is not seen.
    Perimeter,
    /// Outlines of both bodies, reference first. Exact for axis-aligned
    /// rectangles.
    #[default]
    Outlines,
    /// Every lattice point covered by the reference body.
    Interior,
}

/// Inclusive integer box enclosing lattice points occupied by both bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntersectionBox {
    pub min: Vec2<i32>,
    pub max: Vec2<i32>,
}

impl IntersectionBox {
    pub fn from_point(point: Vec2<i32>) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    pub fn include(&mut self, point: Vec2<i32>) {
        self.min = Vec2::partial_min(self.min, point);
        self.max = Vec2::partial_max(self.max, point);
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x + 1
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y + 1
    }

    pub fn expanded(&self, amount: i32) -> Self {
        Self {
            min: self.min - amount,
            max: self.max + amount,
        }
    }

    pub fn contains_point(&self, point: Vec2<i32>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Row by row, bottom to top.
    pub fn points(&self) -> impl Iterator<Item = Vec2<i32>> + use<> {
        let Self { min, max } = *self;
        (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| Vec2::new(x, y)))
    }

    pub fn to_world(&self) -> Aabr<Scalar> {
        Aabr {
            min: lattice_to_world(self.min),
            max: lattice_to_world(self.max),
        }
    }
}

#[inline]
pub fn lattice_to_world(point: Vec2<i32>) -> Vec2<Scalar> {
    Vec2::new(point.x as Scalar, point.y as Scalar)
}

/// Origin and size of the lattice rectangle covered by the body bounds,
/// `None` when the bounds contain no lattice point.
pub fn lattice_frame(body: &dyn Collidable) -> Option<(Vec2<i32>, Vec2<i32>)> {
    let aabr = body.aabr();
    let frame = lattice_overlap(aabr, aabr)?;
    Some((frame.min, frame.max - frame.min))
}

/// Lattice points shared by both bounding boxes, if any.
pub fn lattice_overlap(a: Aabr<Scalar>, b: Aabr<Scalar>) -> Option<IntersectionBox> {
    let min: Vec2<Scalar> = Vec2::partial_max(a.min, b.min);
    let max: Vec2<Scalar> = Vec2::partial_min(a.max, b.max);
    let result = IntersectionBox {
        min: Vec2::new(min.x.ceil() as i32, min.y.ceil() as i32),
        max: Vec2::new(max.x.floor() as i32, max.y.floor() as i32),
    };
    if result.min.x > result.max.x || result.min.y > result.max.y {
        None
    } else {
        Some(result)
    }
}

/// Orders bodies so the one with smaller bounding box area comes first.
///
/// Ties are broken by width, height and position, so swapping arguments
/// never changes which body becomes the reference.
pub fn order_by_area<'a>(
    a: &'a dyn Collidable,
    b: &'a dyn Collidable,
) -> [&'a dyn Collidable; 2] {
    fn key(body: &dyn Collidable) -> [Scalar; 5] {
        let size = body.size();
        let position = body.position();
        [size.w * size.h, size.w, size.h, position.x, position.y]
    }

    let ordering = key(a)
        .into_iter()
        .zip(key(b))
        .map(|(a, b)| a.total_cmp(&b))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal);
    if ordering.is_gt() { [b, a] } else { [a, b] }
}

/// Visits outline of the lattice rectangle: whole edge columns, and only top
/// and bottom rows for columns in between. Points outside `clip` are skipped.
pub fn for_each_outline_point(
    origin: Vec2<i32>,
    size: Vec2<i32>,
    clip: IntersectionBox,
    mut f: impl FnMut(Vec2<i32>),
) {
    let from_x = (clip.min.x - origin.x).max(0);
    let to_x = (clip.max.x - origin.x).min(size.x);
    let from_y = origin.y.max(clip.min.y);
    let to_y = (origin.y + size.y).min(clip.max.y);
    for x in from_x..=to_x {
        let world_x = origin.x + x;
        if x == 0 || x == size.x {
            for world_y in from_y..=to_y {
                f(Vec2::new(world_x, world_y));
            }
        } else {
            for world_y in [origin.y, origin.y + size.y] {
                if world_y >= clip.min.y && world_y <= clip.max.y {
                    f(Vec2::new(world_x, world_y));
                }
            }
        }
    }
}

/// Visits every lattice point of the rectangle that lies within `clip`.
pub fn for_each_area_point(
    origin: Vec2<i32>,
    size: Vec2<i32>,
    clip: IntersectionBox,
    mut f: impl FnMut(Vec2<i32>),
) {
    let region = IntersectionBox {
        min: Vec2::partial_max(origin, clip.min),
        max: Vec2::partial_min(origin + size, clip.max),
    };
    if region.min.x > region.max.x || region.min.y > region.max.y {
        return;
    }
    region.points().for_each(&mut f);
}

pub fn find_intersection(a: &dyn Collidable, b: &dyn Collidable) -> Option<IntersectionBox> {
    find_intersection_with(a, b, IntersectionSampling::default())
}

/// Bounding box of sampled lattice points that both bodies contain.
///
/// Returns `None` when no sampled point is shared, which means no contact.
pub fn find_intersection_with(
    a: &dyn Collidable,
    b: &dyn Collidable,
    sampling: IntersectionSampling,
) -> Option<IntersectionBox> {
    let clip = lattice_overlap(a.aabr(), b.aabr())?;
    let [reference, other] = order_by_area(a, b);
    let mut result: Option<IntersectionBox> = None;
    let mut visit = |point: Vec2<i32>| {
        if result.is_some_and(|result| result.contains_point(point)) {
            return;
        }
        let world = lattice_to_world(point);
        if reference.contains_point(world) && other.contains_point(world) {
            match result.as_mut() {
                Some(result) => result.include(point),
                None => result = Some(IntersectionBox::from_point(point)),
            }
        }
    };

    let (origin, size) = lattice_frame(reference)?;
    match sampling {
        IntersectionSampling::Perimeter => {
            for_each_outline_point(origin, size, clip, &mut visit);
        }
        IntersectionSampling::Outlines => {
            for_each_outline_point(origin, size, clip, &mut visit);
            if let Some((origin, size)) = lattice_frame(other) {
                for_each_outline_point(origin, size, clip, &mut visit);
            }
        }
        IntersectionSampling::Interior => {
            for_each_area_point(origin, size, clip, &mut visit);
        }
    }
    result
}
