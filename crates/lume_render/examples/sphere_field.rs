//! Minimal render: a small sphere field written out as PPM.

use std::fs::File;
use std::io::{BufWriter, Write};

use lume_render::{
    color_to_rgb8, gen_f64, render, BvhNode, Camera, Color, Material, Point3, Surface, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    env_logger::init();

    let world = build_scene();

    let mut camera = Camera::new()
        .with_aspect_ratio(16.0 / 9.0)
        .with_image_width(400)
        .with_quality(50, 10)
        .with_view(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.6, 10.0);

    let image = render(&mut camera, &world, 0).expect("camera configuration is valid");

    let filename = "sphere_field.ppm";
    save_ppm(&image, filename).expect("failed to save image");
    println!("Saved to {filename}");
}

fn build_scene() -> Surface {
    let mut rng = StdRng::seed_from_u64(12345);
    let mut objects = Vec::new();

    // Ground
    objects.push(Surface::sphere(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Material::lambertian(Color::splat(0.5)),
    ));

    // Three feature spheres
    objects.push(Surface::sphere(
        Point3::new(0.0, 1.0, 0.0),
        1.0,
        Material::dielectric(1.5),
    ));
    objects.push(Surface::sphere(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        Material::lambertian(Color::new(0.4, 0.2, 0.1)),
    ));
    objects.push(Surface::sphere(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Material::metal(Color::new(0.7, 0.6, 0.5), 0.0),
    ));

    // Small random spheres
    for a in -5..5 {
        for b in -5..5 {
            let center = Point3::new(
                a as f64 + 0.9 * gen_f64(&mut rng),
                0.2,
                b as f64 + 0.9 * gen_f64(&mut rng),
            );

            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let choose_mat = gen_f64(&mut rng);
            let material = if choose_mat < 0.8 {
                let albedo = Color::new(
                    gen_f64(&mut rng) * gen_f64(&mut rng),
                    gen_f64(&mut rng) * gen_f64(&mut rng),
                    gen_f64(&mut rng) * gen_f64(&mut rng),
                );
                Material::lambertian(albedo)
            } else if choose_mat < 0.95 {
                let albedo = Color::new(
                    0.5 + 0.5 * gen_f64(&mut rng),
                    0.5 + 0.5 * gen_f64(&mut rng),
                    0.5 + 0.5 * gen_f64(&mut rng),
                );
                Material::metal(albedo, 0.5 * gen_f64(&mut rng))
            } else {
                Material::dielectric(1.5)
            };
            objects.push(Surface::sphere(center, 0.2, material));
        }
    }

    println!("Created {} objects", objects.len());
    Surface::Bvh(BvhNode::new(objects).expect("scene is not empty"))
}

fn save_ppm(image: &lume_render::ImageBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for y in 0..image.height {
        for x in 0..image.width {
            let [r, g, b] = color_to_rgb8(image.get(x, y));
            writeln!(writer, "{r} {g} {b}")?;
        }
    }

    Ok(())
}
