//! Bounding volume hierarchy over surfaces.
//!
//! Built once per scene, the tree turns linear closest-hit scans into
//! expected-logarithmic descents: a node whose box misses the ray prunes
//! everything below it.

use std::cmp::Ordering;
use std::sync::Arc;

use lume_math::{Aabb, Interval, Ray};
use thiserror::Error;

use crate::surface::{HitRecord, Surface, SurfaceList};

/// Errors raised while building a hierarchy.
#[derive(Debug, Error)]
pub enum BvhError {
    #[error("cannot build a BVH from an empty surface set")]
    EmptySurfaceSet,
}

/// Binary tree node: two child surfaces and their enclosing box.
pub struct BvhNode {
    left: Arc<Surface>,
    right: Arc<Surface>,
    bbox: Aabb,
}

impl BvhNode {
    /// Build a hierarchy over `objects`. An empty set is rejected before
    /// any construction work starts.
    pub fn new(objects: Vec<Arc<Surface>>) -> Result<Self, BvhError> {
        if objects.is_empty() {
            return Err(BvhError::EmptySurfaceSet);
        }
        Ok(Self::build(objects))
    }

    /// Build a hierarchy over the contents of a list.
    pub fn from_list(list: SurfaceList) -> Result<Self, BvhError> {
        Self::new(list.into_objects())
    }

    /// Recursive median split along the longest axis of the union box.
    fn build(mut objects: Vec<Arc<Surface>>) -> Self {
        let bbox = objects.iter().fold(Aabb::EMPTY, |acc, object| {
            Aabb::surrounding(&acc, &object.bounding_box())
        });
        let axis = bbox.longest_axis();

        let (left, right) = match objects.len() {
            1 => {
                // Both children alias the lone surface
                let only = objects.remove(0);
                (only.clone(), only)
            }
            2 => {
                let second = objects.remove(1);
                let first = objects.remove(0);
                if Self::box_compare(&first, &second, axis) == Ordering::Greater {
                    (second, first)
                } else {
                    (first, second)
                }
            }
            n => {
                objects.sort_unstable_by(|a, b| Self::box_compare(a, b, axis));
                let right_objects = objects.split_off(n / 2);
                (
                    Arc::new(Surface::Bvh(Self::build(objects))),
                    Arc::new(Surface::Bvh(Self::build(right_objects))),
                )
            }
        };

        Self { left, right, bbox }
    }

    /// Order two surfaces by the low edge of their box along `axis`.
    fn box_compare(a: &Arc<Surface>, b: &Arc<Surface>, axis: usize) -> Ordering {
        let a_min = a.bounding_box().axis_interval(axis).min;
        let b_min = b.bounding_box().axis_interval(axis).min;
        a_min.partial_cmp(&b_min).unwrap_or(Ordering::Equal)
    }

    /// Closest hit below this node, strictly inside `ray_t`.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        if !self.bbox.hit(ray, ray_t) {
            return None;
        }

        let hit_left = self.left.hit(ray, ray_t);

        // The right child only searches the span not already claimed by
        // the left hit, so any right hit is strictly closer.
        let upper = hit_left.as_ref().map_or(ray_t.max, |rec| rec.t);
        let hit_right = self.right.hit(ray, Interval::new(ray_t.min, upper));

        hit_right.or(hit_left)
    }

    /// The box enclosing both children.
    pub fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
