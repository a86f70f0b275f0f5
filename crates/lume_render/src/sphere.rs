//! Sphere primitive.

use std::f64::consts::PI;
use std::sync::Arc;

use lume_math::{Aabb, Interval, Point3, Ray, Vec3};

use crate::material::Material;
use crate::surface::HitRecord;

/// A sphere defined by center, radius and material.
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: Arc<Material>,
    bbox: Aabb,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Point3, radius: f64, material: Arc<Material>) -> Self {
        let radius = radius.max(0.0);
        let rvec = Vec3::splat(radius);
        let bbox = Aabb::from_points(center - rvec, center + rvec);

        Self {
            center,
            radius,
            material,
            bbox,
        }
    }

    /// UV coordinates for a point on the unit sphere about the origin.
    ///
    /// u wraps around the y axis from x = -1, v runs pole to pole.
    fn sphere_uv(p: Vec3) -> (f64, f64) {
        let theta = (-p.y).acos();
        let phi = (-p.z).atan2(p.x) + PI;

        (phi / (2.0 * PI), theta / PI)
    }

    /// Nearest intersection strictly inside `ray_t`, if any.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let oc = self.center - ray.origin;
        let a = ray.direction.length_squared();
        let h = ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrtd = discriminant.sqrt();

        // Try the smaller root first, then the larger
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = ray.at(root);
        let outward_normal = (p - self.center) / self.radius;

        Some(HitRecord::new(
            ray,
            root,
            p,
            outward_normal,
            Self::sphere_uv(outward_normal),
            &self.material,
        ))
    }

    /// The box enclosing the sphere.
    pub fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
