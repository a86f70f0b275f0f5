//! Radiance estimation and the parallel render loop.
//!
//! Rendering is embarrassingly parallel over image rows: every pixel
//! estimate reads only immutable scene data, each row owns a generator
//! derived from the base seed, and rows write to fixed slots of the
//! output buffer.

use indicatif::{ProgressBar, ProgressStyle};
use lume_math::{Interval, Ray};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

use crate::camera::{Background, Camera, CameraError};
use crate::material::Color;
use crate::surface::Surface;

/// Lower parameter bound keeping bounce rays clear of the surface they
/// just left.
const T_MIN: f64 = 0.001;

/// Estimate the radiance arriving along `ray`.
///
/// Recursion is truncated at `depth` 0; a ray that escapes the scene or
/// exhausts its bounce budget contributes the background, and an
/// absorbed ray contributes only its hit's emission.
pub fn ray_color(
    ray: &Ray,
    world: &Surface,
    depth: u32,
    background: &Background,
    rng: &mut dyn RngCore,
) -> Color {
    if depth == 0 {
        return background.color(ray);
    }

    let Some(rec) = world.hit(ray, Interval::new(T_MIN, f64::INFINITY)) else {
        return background.color(ray);
    };

    let emitted = rec.material.emitted(rec.u, rec.v, rec.p);

    match rec.material.scatter(ray, &rec, rng) {
        Some(scatter) => {
            let bounced = ray_color(&scatter.scattered, world, depth - 1, background, rng);
            emitted + scatter.attenuation * bounced
        }
        None => emitted,
    }
}

/// Mean radiance over the camera's per-pixel sample budget.
pub fn render_pixel(
    camera: &Camera,
    world: &Surface,
    col: u32,
    row: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel {
        let ray = camera.get_ray(col, row, rng);
        pixel_color += ray_color(&ray, world, camera.max_depth, &camera.background, rng);
    }

    pixel_color * camera.pixel_samples_scale()
}

/// Render the scene into a fresh buffer, rows in parallel.
///
/// The same seed and thread-pool-independent row generators make a
/// repeat render of the same scene reproducible.
pub fn render(camera: &mut Camera, world: &Surface, seed: u64) -> Result<ImageBuffer, CameraError> {
    camera.initialize()?;
    let camera = &*camera;

    let width = camera.image_width;
    let height = camera.image_height();
    let mut image = ImageBuffer::new(width, height);

    log::info!(
        "rendering {}x{} at {} spp on {} threads",
        width,
        height,
        camera.samples_per_pixel,
        rayon::current_num_threads()
    );
    let start = std::time::Instant::now();

    let progress = ProgressBar::new(height as u64);
    if let Ok(style) = ProgressStyle::default_bar().template("{bar:40} {pos}/{len} rows ETA: {eta}")
    {
        progress.set_style(style);
    }

    image
        .pixels
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(row, out)| {
            let mut rng = row_rng(seed, row as u64);
            for (col, slot) in out.iter_mut().enumerate() {
                *slot = render_pixel(camera, world, col as u32, row as u32, &mut rng);
            }
            progress.inc(1);
        });

    progress.finish_and_clear();
    log::info!("render finished in {:.2?}", start.elapsed());

    Ok(image)
}

/// Generator for one row, decorrelated from its neighbours.
fn row_rng(seed: u64, row: u64) -> StdRng {
    StdRng::seed_from_u64(seed ^ row.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Gamma 2 transfer from linear to display space.
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Quantize one linear color to gamma-encoded 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.000, 0.999);
    let r = (256.0 * intensity.clamp(linear_to_gamma(color.x))) as u8;
    let g = (256.0 * intensity.clamp(linear_to_gamma(color.y))) as u8;
    let b = (256.0 * intensity.clamp(linear_to_gamma(color.z))) as u8;
    [r, g, b]
}

/// Row-major buffer of linear color values, top-to-bottom.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width as usize) * (height as usize)],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Gamma-encoded 8-bit RGB bytes in buffer order.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb8(*color));
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BvhNode, Material, Point3, Vec3};
    use rand::SeedableRng;

    fn single_sphere_world(material: std::sync::Arc<Material>) -> Surface {
        let sphere = Surface::sphere(Point3::ZERO, 1.0, material);
        Surface::Bvh(BvhNode::new(vec![sphere]).unwrap())
    }

    #[test]
    fn test_depth_zero_returns_background() {
        let world = single_sphere_world(Material::lambertian(Color::splat(0.5)));
        let background = Background::Solid(Color::new(0.7, 0.2, 0.1));
        let ray = Ray::new(Point3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 0.0, -1.0));

        let mut rng = StdRng::seed_from_u64(1);
        let c = ray_color(&ray, &world, 0, &background, &mut rng);
        assert_eq!(c, Color::new(0.7, 0.2, 0.1));
    }

    #[test]
    fn test_miss_returns_background() {
        let world = single_sphere_world(Material::lambertian(Color::splat(0.5)));
        let background = Background::Solid(Color::new(0.0, 1.0, 0.0));
        let ray = Ray::new(Point3::new(0.0, 5.0, 3.0), Vec3::new(0.0, 0.0, -1.0));

        let mut rng = StdRng::seed_from_u64(2);
        let c = ray_color(&ray, &world, 10, &background, &mut rng);
        assert_eq!(c, Color::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_emissive_hit_returns_emission() {
        let emit = Color::new(4.0, 3.0, 2.0);
        let world = single_sphere_world(Material::diffuse_light(emit));
        let background = Background::Solid(Color::ZERO);
        let ray = Ray::new(Point3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 0.0, -1.0));

        let mut rng = StdRng::seed_from_u64(3);
        let c = ray_color(&ray, &world, 10, &background, &mut rng);
        assert_eq!(c, emit);
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 1e-12);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_color_to_rgb8_clamps() {
        assert_eq!(color_to_rgb8(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb8(Color::new(10.0, 10.0, 10.0)), [255, 255, 255]);

        // 0.25 linear is 0.5 after gamma: half intensity
        let [r, _, _] = color_to_rgb8(Color::new(0.25, 0.0, 0.0));
        assert_eq!(r, 128);
    }

    #[test]
    fn test_image_buffer_addressing() {
        let mut image = ImageBuffer::new(4, 3);
        image.set(3, 2, Color::ONE);
        assert_eq!(image.get(3, 2), Color::ONE);
        assert_eq!(image.pixels[2 * 4 + 3], Color::ONE);
        assert_eq!(image.to_rgb8().len(), 4 * 3 * 3);
    }

    #[test]
    fn test_render_rejects_invalid_camera() {
        let world = single_sphere_world(Material::lambertian(Color::splat(0.5)));
        let mut camera = Camera::new().with_image_width(0);
        assert!(render(&mut camera, &world, 0).is_err());
    }

    #[test]
    fn test_render_dimensions_and_determinism() {
        let world = single_sphere_world(Material::lambertian(Color::splat(0.5)));

        let mut camera = Camera::new()
            .with_aspect_ratio(2.0)
            .with_image_width(8)
            .with_quality(2, 4)
            .with_view(Point3::new(0.0, 0.0, 4.0), Point3::ZERO, Vec3::Y)
            .with_lens(45.0, 0.0, 4.0);

        let image = render(&mut camera, &world, 9).unwrap();
        assert_eq!(image.width, 8);
        assert_eq!(image.height, 4);

        // Same seed, same image
        let mut camera2 = Camera::new()
            .with_aspect_ratio(2.0)
            .with_image_width(8)
            .with_quality(2, 4)
            .with_view(Point3::new(0.0, 0.0, 4.0), Point3::ZERO, Vec3::Y)
            .with_lens(45.0, 0.0, 4.0);
        let image2 = render(&mut camera2, &world, 9).unwrap();
        assert_eq!(image.pixels, image2.pixels);
    }

    #[test]
    fn test_render_silhouette() {
        // A lone gray sphere under the sky gradient: the center pixel
        // lands on the sphere and sits closer to the albedo than the
        // corner pixels, which see only sky.
        let albedo = Color::splat(0.5);
        let world = single_sphere_world(Material::lambertian(albedo));

        let mut camera = Camera::new()
            .with_image_width(16)
            .with_quality(16, 10)
            .with_view(Point3::new(0.0, 0.0, 4.0), Point3::ZERO, Vec3::Y)
            .with_lens(45.0, 0.0, 4.0);

        let image = render(&mut camera, &world, 4).unwrap();

        let center = image.get(8, 8);
        let corner = image.get(0, 0);
        assert!(
            (center - albedo).length() < (corner - albedo).length(),
            "center {center:?} should be nearer the albedo than corner {corner:?}"
        );
    }
}
