//! CPU path tracing core for lume.
//!
//! A Monte Carlo path tracer over double-precision geometry: rays are
//! intersected against surfaces through a bounding volume hierarchy,
//! materials scatter them recursively, and the camera integrates
//! per-pixel radiance estimates in parallel over image rows.

mod surface;
mod sphere;
mod quad;
mod bvh;
mod material;
mod texture;
mod camera;
mod renderer;
mod sample;

pub use surface::{HitRecord, Surface, SurfaceList};
pub use sphere::Sphere;
pub use quad::Quad;
pub use bvh::{BvhError, BvhNode};
pub use material::{Color, Dielectric, DiffuseLight, Lambertian, Material, Metal, Scatter};
pub use texture::Texture;
pub use camera::{Background, Camera, CameraError};
pub use renderer::{
    color_to_rgb8, linear_to_gamma, ray_color, render, render_pixel, ImageBuffer,
};
pub use sample::{
    gen_f64, gen_range, random_in_unit_disk, random_in_unit_sphere, random_unit_vector,
};

/// Re-export the math types the public API is expressed in.
pub use lume_math::{Aabb, Interval, Point3, Ray, Vec3};
