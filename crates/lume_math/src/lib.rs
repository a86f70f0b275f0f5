// Geometry primitives for the path tracer, built on glam's
// double-precision vectors.
pub use glam::DVec3;

/// Three-component double-precision vector.
pub type Vec3 = DVec3;

/// An affine position in space. Shares representation with [`Vec3`];
/// the distinction is semantic.
pub type Point3 = DVec3;

mod interval;
pub use interval::Interval;

mod ray;
pub use ray::Ray;

mod aabb;
pub use aabb::Aabb;
