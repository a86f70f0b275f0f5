//! Planar parallelogram primitive.

use std::sync::Arc;

use lume_math::{Aabb, Interval, Point3, Ray, Vec3};

use crate::material::Material;
use crate::surface::HitRecord;

/// A parallelogram defined by a corner point and two edge vectors.
pub struct Quad {
    q: Point3,
    u: Vec3,
    v: Vec3,
    /// Planar decomposition basis: n / dot(n, n) for the raw normal n.
    w: Vec3,
    normal: Vec3,
    /// Signed plane offset along the unit normal.
    d: f64,
    material: Arc<Material>,
    bbox: Aabb,
}

impl Quad {
    /// Create a new quad spanning `q`, `q + u`, `q + v` and `q + u + v`.
    pub fn new(q: Point3, u: Vec3, v: Vec3, material: Arc<Material>) -> Self {
        let n = u.cross(v);
        let normal = n.normalize();
        let d = normal.dot(q);
        let w = n / n.dot(n);

        // The two diagonals cover the four corners between them
        let bbox_diagonal1 = Aabb::from_points(q, q + u + v);
        let bbox_diagonal2 = Aabb::from_points(q + u, q + v);
        let bbox = Aabb::surrounding(&bbox_diagonal1, &bbox_diagonal2);

        Self {
            q,
            u,
            v,
            w,
            normal,
            d,
            material,
            bbox,
        }
    }

    /// Intersection with the bounded parallelogram, strictly inside
    /// `ray_t`, if any.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let denom = self.normal.dot(ray.direction);

        // Parallel to the plane
        if denom.abs() < 1e-8 {
            return None;
        }

        let t = (self.d - self.normal.dot(ray.origin)) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }

        // Decompose the planar hit point onto the edge basis; the quad
        // covers exactly the unit square in (alpha, beta)
        let p = ray.at(t);
        let planar = p - self.q;
        let alpha = self.w.dot(planar.cross(self.v));
        let beta = self.w.dot(self.u.cross(planar));

        let unit = Interval::new(0.0, 1.0);
        if !unit.contains(alpha) || !unit.contains(beta) {
            return None;
        }

        Some(HitRecord::new(
            ray,
            t,
            p,
            self.normal,
            (alpha, beta),
            &self.material,
        ))
    }

    /// The (padded) box enclosing the quad.
    pub fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
