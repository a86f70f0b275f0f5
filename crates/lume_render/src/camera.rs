//! Camera configuration and ray generation.

use lume_math::{Point3, Ray, Vec3};
use rand::RngCore;
use thiserror::Error;

use crate::material::Color;
use crate::sample::{gen_f64, random_in_unit_disk};

/// Radiance of rays that escape the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    /// A constant color.
    Solid(Color),
    /// Vertical white-to-blue gradient.
    Sky,
}

impl Background {
    /// Background radiance along `ray`.
    pub fn color(&self, ray: &Ray) -> Color {
        match self {
            Background::Solid(color) => *color,
            Background::Sky => {
                let unit_direction = ray.direction.normalize();
                let a = 0.5 * (unit_direction.y + 1.0);
                (1.0 - a) * Color::new(1.0, 1.0, 1.0) + a * Color::new(0.5, 0.7, 1.0)
            }
        }
    }
}

/// Configuration rejected before any rendering work starts.
#[derive(Debug, Error)]
pub enum CameraError {
    #[error("image width must be at least 1 pixel")]
    InvalidImageWidth,
    #[error("aspect ratio must be positive and finite, got {0}")]
    InvalidAspectRatio(f64),
    #[error("samples per pixel must be at least 1")]
    InvalidSampleCount,
}

/// Camera generating view rays into the scene.
///
/// Public fields are the configuration surface; everything derived is
/// computed once by [`Camera::initialize`] and immutable afterwards.
pub struct Camera {
    /// Image aspect ratio (width / height).
    pub aspect_ratio: f64,
    /// Rendered image width in pixels.
    pub image_width: u32,
    /// Random samples per pixel for anti-aliasing.
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces.
    pub max_depth: u32,
    /// Vertical field of view in degrees.
    pub vfov: f64,
    /// Point the camera looks from.
    pub look_from: Point3,
    /// Point the camera looks at.
    pub look_at: Point3,
    /// Camera-relative up direction.
    pub vup: Vec3,
    /// Variation angle of rays through each pixel, in degrees.
    /// Zero disables depth of field.
    pub defocus_angle: f64,
    /// Distance from the camera to the plane of perfect focus.
    pub focus_dist: f64,
    /// Radiance for rays that escape the scene.
    pub background: Background,

    // Derived by initialize(), immutable afterwards
    image_height: u32,
    pixel_samples_scale: f64,
    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
    initialized: bool,
}

impl Camera {
    /// Create a camera with default settings: a 100 pixel square image at
    /// 10 samples per pixel, 90 degree field of view looking down -Z
    /// under the sky gradient.
    pub fn new() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 90.0,
            look_from: Point3::ZERO,
            look_at: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            defocus_angle: 0.0,
            focus_dist: 10.0,
            background: Background::Sky,
            image_height: 0,
            pixel_samples_scale: 0.0,
            center: Point3::ZERO,
            pixel00_loc: Point3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            defocus_disk_u: Vec3::ZERO,
            defocus_disk_v: Vec3::ZERO,
            initialized: false,
        }
    }

    /// Set the aspect ratio.
    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set the image width in pixels.
    pub fn with_image_width(mut self, image_width: u32) -> Self {
        self.image_width = image_width;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    /// Set the viewing transform.
    pub fn with_view(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f64, defocus_angle: f64, focus_dist: f64) -> Self {
        self.vfov = vfov;
        self.defocus_angle = defocus_angle;
        self.focus_dist = focus_dist;
        self
    }

    /// Set the background.
    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    /// Validate the configuration and derive the viewing geometry.
    ///
    /// Must be called before generating rays. Idempotent.
    pub fn initialize(&mut self) -> Result<(), CameraError> {
        if self.initialized {
            return Ok(());
        }

        if self.image_width == 0 {
            return Err(CameraError::InvalidImageWidth);
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(CameraError::InvalidAspectRatio(self.aspect_ratio));
        }
        if self.samples_per_pixel == 0 {
            return Err(CameraError::InvalidSampleCount);
        }

        self.image_height = ((self.image_width as f64 / self.aspect_ratio) as u32).max(1);
        self.pixel_samples_scale = 1.0 / self.samples_per_pixel as f64;
        self.center = self.look_from;

        // Viewport dimensions at the focus distance
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.focus_dist;
        let viewport_width =
            viewport_height * (self.image_width as f64 / self.image_height as f64);

        // Orthonormal camera frame
        self.w = (self.look_from - self.look_at).normalize();
        self.u = self.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        // Vectors across the horizontal and down the vertical viewport edges
        let viewport_u = viewport_width * self.u;
        let viewport_v = viewport_height * -self.v;

        self.pixel_delta_u = viewport_u / self.image_width as f64;
        self.pixel_delta_v = viewport_v / self.image_height as f64;

        let viewport_upper_left =
            self.center - self.focus_dist * self.w - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        let defocus_radius = self.focus_dist * (self.defocus_angle / 2.0).to_radians().tan();
        self.defocus_disk_u = self.u * defocus_radius;
        self.defocus_disk_v = self.v * defocus_radius;

        self.initialized = true;
        Ok(())
    }

    /// Derived image height in pixels. Zero until initialized.
    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Color scale factor for a sum of pixel samples.
    pub fn pixel_samples_scale(&self) -> f64 {
        self.pixel_samples_scale
    }

    /// Whether [`Camera::initialize`] has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Generate a ray through pixel (col, row), jittered within the
    /// pixel cell; with a positive defocus angle the origin samples the
    /// aperture disk instead of the camera center.
    pub fn get_ray(&self, col: u32, row: u32, rng: &mut dyn RngCore) -> Ray {
        let offset_x = gen_f64(rng) - 0.5;
        let offset_y = gen_f64(rng) - 0.5;

        let pixel_sample = self.pixel00_loc
            + (col as f64 + offset_x) * self.pixel_delta_u
            + (row as f64 + offset_y) * self.pixel_delta_v;

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(ray_origin, pixel_sample - ray_origin)
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_camera_initialize_basis() {
        let mut camera = Camera::new()
            .with_aspect_ratio(4.0 / 3.0)
            .with_image_width(800)
            .with_view(Point3::ZERO, Point3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 1.0);

        camera.initialize().unwrap();

        assert_eq!(camera.image_height(), 600);
        assert_eq!(camera.center, Point3::ZERO);
        assert!((camera.w - Vec3::Z).length() < 1e-12);
        assert!((camera.u - Vec3::X).length() < 1e-12);
        assert!((camera.v - Vec3::Y).length() < 1e-12);
    }

    #[test]
    fn test_camera_height_floor_is_one() {
        let mut camera = Camera::new()
            .with_aspect_ratio(1000.0)
            .with_image_width(10);
        camera.initialize().unwrap();
        assert_eq!(camera.image_height(), 1);
    }

    #[test]
    fn test_camera_rejects_zero_width() {
        let mut camera = Camera::new().with_image_width(0);
        assert!(matches!(
            camera.initialize(),
            Err(CameraError::InvalidImageWidth)
        ));
    }

    #[test]
    fn test_camera_rejects_bad_aspect() {
        let mut camera = Camera::new().with_aspect_ratio(0.0);
        assert!(matches!(
            camera.initialize(),
            Err(CameraError::InvalidAspectRatio(_))
        ));

        let mut camera = Camera::new().with_aspect_ratio(f64::NAN);
        assert!(camera.initialize().is_err());
    }

    #[test]
    fn test_camera_rejects_zero_samples() {
        let mut camera = Camera::new().with_quality(0, 10);
        assert!(matches!(
            camera.initialize(),
            Err(CameraError::InvalidSampleCount)
        ));
    }

    #[test]
    fn test_rays_share_origin_without_defocus() {
        let mut camera = Camera::new()
            .with_image_width(100)
            .with_view(Point3::new(1.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
            .with_lens(60.0, 0.0, 5.0);
        camera.initialize().unwrap();

        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let ray = camera.get_ray(50, 50, &mut rng);
            assert_eq!(ray.origin, Point3::new(1.0, 2.0, 3.0));
        }
    }

    #[test]
    fn test_defocus_spreads_origins() {
        let mut camera = Camera::new()
            .with_image_width(100)
            .with_view(Point3::ZERO, Point3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(60.0, 2.0, 5.0);
        camera.initialize().unwrap();

        let mut rng = StdRng::seed_from_u64(6);
        let origins: Vec<Point3> = (0..50).map(|_| camera.get_ray(50, 50, &mut rng).origin).collect();
        let moved = origins.iter().filter(|o| o.length() > 1e-12).count();
        assert!(moved > 0, "aperture samples should leave the center");
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let mut camera = Camera::new()
            .with_image_width(101)
            .with_view(Point3::ZERO, Point3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 1.0);
        camera.initialize().unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let ray = camera.get_ray(50, 50, &mut rng);
        assert!(ray.direction.z < 0.0);
        // Within a pixel of straight ahead
        let dir = ray.direction.normalize();
        assert!(dir.x.abs() < 0.05 && dir.y.abs() < 0.05);
    }

    #[test]
    fn test_background_sky_gradient() {
        let up = Ray::new(Point3::ZERO, Vec3::Y);
        let down = Ray::new(Point3::ZERO, -Vec3::Y);

        let sky = Background::Sky;
        // Up is bluer (less red) than down
        assert!(sky.color(&up).x < sky.color(&down).x);
    }

    #[test]
    fn test_background_solid() {
        let bg = Background::Solid(Color::new(0.1, 0.2, 0.3));
        let ray = Ray::new(Point3::ZERO, Vec3::X);
        assert_eq!(bg.color(&ray), Color::new(0.1, 0.2, 0.3));
    }
}
