use crate::{Point3, Vec3};

/// A ray in 3D space, parametrized as `origin + t * direction`.
///
/// The direction is stored as given and never renormalized; its magnitude
/// scales the parameter `t`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get the point along the ray at parameter t.
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_creation() {
        let origin = Point3::new(1.0, 2.0, 3.0);
        let direction = Vec3::new(0.0, 1.0, 0.0);
        let ray = Ray::new(origin, direction);

        assert_eq!(ray.origin, origin);
        assert_eq!(ray.direction, direction);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Point3::ZERO, Vec3::X);

        assert_eq!(ray.at(0.0), Point3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Point3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Point3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_at_scales_with_direction() {
        // An unnormalized direction shifts where each t lands
        let ray = Ray::new(Point3::ZERO, Vec3::new(0.0, 0.0, -2.0));
        assert_eq!(ray.at(0.5), Point3::new(0.0, 0.0, -1.0));
    }
}
