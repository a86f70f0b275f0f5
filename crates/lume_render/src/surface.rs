//! The surface abstraction: everything a ray can intersect.

use std::sync::Arc;

use lume_math::{Aabb, Interval, Point3, Ray, Vec3};

use crate::bvh::BvhNode;
use crate::material::Material;
use crate::quad::Quad;
use crate::sphere::Sphere;

/// Record of a ray-surface intersection.
///
/// Built when an intersection is found and consumed by the material's
/// scatter step; it never outlives the query that produced it.
pub struct HitRecord<'a> {
    /// Point of intersection.
    pub p: Point3,
    /// Unit surface normal, always oriented against the incoming ray.
    pub normal: Vec3,
    /// Ray parameter of the intersection.
    pub t: f64,
    /// Surface u coordinate.
    pub u: f64,
    /// Surface v coordinate.
    pub v: f64,
    /// Whether the ray arrived on the outward-facing side.
    pub front_face: bool,
    /// Material at the intersection point.
    pub material: &'a Material,
}

impl<'a> HitRecord<'a> {
    /// Build a record, orienting `outward_normal` against the ray.
    pub fn new(
        ray: &Ray,
        t: f64,
        p: Point3,
        outward_normal: Vec3,
        (u, v): (f64, f64),
        material: &'a Material,
    ) -> Self {
        // If the ray and the outward normal agree, we hit the back face
        let front_face = ray.direction.dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            p,
            normal,
            t,
            u,
            v,
            front_face,
            material,
        }
    }
}

/// A surface a ray can intersect over a parameter interval.
///
/// A closed set of shapes dispatched by matching. Instances are shared
/// through `Arc`: the same surface may be aliased by both children of a
/// single-element BVH node, and materials are reused across surfaces.
pub enum Surface {
    Sphere(Sphere),
    Quad(Quad),
    List(SurfaceList),
    Bvh(BvhNode),
}

impl Surface {
    /// Closest intersection whose parameter lies strictly inside
    /// `ray_t`, if any.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        match self {
            Surface::Sphere(sphere) => sphere.hit(ray, ray_t),
            Surface::Quad(quad) => quad.hit(ray, ray_t),
            Surface::List(list) => list.hit(ray, ray_t),
            Surface::Bvh(node) => node.hit(ray, ray_t),
        }
    }

    /// The box enclosing this surface.
    pub fn bounding_box(&self) -> Aabb {
        match self {
            Surface::Sphere(sphere) => sphere.bounding_box(),
            Surface::Quad(quad) => quad.bounding_box(),
            Surface::List(list) => list.bounding_box(),
            Surface::Bvh(node) => node.bounding_box(),
        }
    }

    /// A shared sphere surface.
    pub fn sphere(center: Point3, radius: f64, material: Arc<Material>) -> Arc<Self> {
        Arc::new(Surface::Sphere(Sphere::new(center, radius, material)))
    }

    /// A shared quad surface.
    pub fn quad(q: Point3, u: Vec3, v: Vec3, material: Arc<Material>) -> Arc<Self> {
        Arc::new(Surface::Quad(Quad::new(q, u, v, material)))
    }
}

/// An unordered collection of surfaces.
pub struct SurfaceList {
    objects: Vec<Arc<Surface>>,
    bbox: Aabb,
}

impl SurfaceList {
    /// Create a new empty list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    /// Add a surface to the list, growing the union box.
    pub fn add(&mut self, object: Arc<Surface>) {
        self.bbox = Aabb::surrounding(&self.bbox, &object.bounding_box());
        self.objects.push(object);
    }

    /// Get the number of surfaces.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Consume the list, yielding its surfaces.
    pub fn into_objects(self) -> Vec<Arc<Surface>> {
        self.objects
    }

    /// Closest hit over all members: each candidate searches only up to
    /// the best parameter found so far.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest_so_far = ray_t.max;
        let mut closest_hit = None;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, Interval::new(ray_t.min, closest_so_far)) {
                closest_so_far = rec.t;
                closest_hit = Some(rec);
            }
        }

        closest_hit
    }

    /// Union of all members' boxes.
    pub fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

impl Default for SurfaceList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn test_face_normal_orientation() {
        let material = Material::lambertian(Color::splat(0.5));
        let ray = Ray::new(Point3::new(0.0, 0.0, 2.0), Vec3::new(0.0, 0.0, -1.0));

        // Outward normal opposing the ray: front face, kept as is
        let rec = HitRecord::new(
            &ray,
            1.0,
            Point3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, 1.0),
            (0.0, 0.0),
            &material,
        );
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::new(0.0, 0.0, 1.0));

        // Outward normal along the ray: back face, flipped
        let rec = HitRecord::new(
            &ray,
            3.0,
            Point3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 0.0, -1.0),
            (0.0, 0.0),
            &material,
        );
        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_list_returns_closest() {
        let material = Material::lambertian(Color::splat(0.5));
        let mut list = SurfaceList::new();
        list.add(Surface::sphere(
            Point3::new(0.0, 0.0, -5.0),
            1.0,
            material.clone(),
        ));
        list.add(Surface::sphere(
            Point3::new(0.0, 0.0, -2.0),
            0.5,
            material,
        ));

        let ray = Ray::new(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = list
            .hit(&ray, Interval::new(0.001, f64::INFINITY))
            .expect("ray should hit");

        // The nearer sphere wins regardless of insertion order
        assert!((rec.t - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_list_bounding_box_grows() {
        let material = Material::lambertian(Color::splat(0.5));
        let mut list = SurfaceList::new();
        assert!(list.is_empty());

        list.add(Surface::sphere(Point3::ZERO, 1.0, material.clone()));
        list.add(Surface::sphere(Point3::new(5.0, 0.0, 0.0), 1.0, material));

        assert_eq!(list.len(), 2);
        let bbox = list.bounding_box();
        assert_eq!(bbox.x.min, -1.0);
        assert_eq!(bbox.x.max, 6.0);
    }
}
