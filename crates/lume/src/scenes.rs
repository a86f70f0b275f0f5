//! Demo scene constructors.
//!
//! Each returns a BVH-wrapped root surface together with a camera framed
//! for it; the caller still picks resolution and sample budget.

use lume_math::{Point3, Vec3};
use lume_render::{
    gen_f64, gen_range, Background, BvhError, BvhNode, Camera, Color, Material, Surface,
    SurfaceList, Texture,
};
use rand::RngCore;

fn bvh_root(list: SurfaceList) -> Result<Surface, BvhError> {
    Ok(Surface::Bvh(BvhNode::from_list(list)?))
}

fn random_color(rng: &mut dyn RngCore) -> Color {
    Color::new(gen_f64(rng), gen_f64(rng), gen_f64(rng))
}

fn random_color_range(rng: &mut dyn RngCore, min: f64, max: f64) -> Color {
    Color::new(
        gen_range(rng, min, max),
        gen_range(rng, min, max),
        gen_range(rng, min, max),
    )
}

/// The classic cover shot: a checkered ground plane under a 22x22 field
/// of random small spheres and three large feature spheres.
pub fn sphere_field(rng: &mut dyn RngCore) -> Result<(Surface, Camera), BvhError> {
    let mut world = SurfaceList::new();

    let checker =
        Texture::checker_colors(0.32, Color::new(0.2, 0.3, 0.1), Color::new(0.9, 0.9, 0.9));
    world.add(Surface::sphere(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Material::lambertian_textured(checker),
    ));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f64(rng);
            let center = Point3::new(
                a as f64 + 0.9 * gen_f64(rng),
                0.2,
                b as f64 + 0.9 * gen_f64(rng),
            );

            // Keep clear of the large metal sphere
            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.8 {
                let albedo = random_color(rng) * random_color(rng);
                Material::lambertian(albedo)
            } else if choose_mat < 0.95 {
                let albedo = random_color_range(rng, 0.5, 1.0);
                let fuzz = gen_range(rng, 0.0, 0.5);
                Material::metal(albedo, fuzz)
            } else {
                Material::dielectric(1.5)
            };
            world.add(Surface::sphere(center, 0.2, material));
        }
    }

    world.add(Surface::sphere(
        Point3::new(0.0, 1.0, 0.0),
        1.0,
        Material::dielectric(1.5),
    ));
    world.add(Surface::sphere(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        Material::lambertian(Color::new(0.4, 0.2, 0.1)),
    ));
    world.add(Surface::sphere(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Material::metal(Color::new(0.7, 0.6, 0.5), 0.0),
    ));

    let camera = Camera::new()
        .with_aspect_ratio(16.0 / 9.0)
        .with_view(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.6, 10.0)
        .with_background(Background::Sky);

    Ok((bvh_root(world)?, camera))
}

/// Two giant checkered spheres touching at the origin.
pub fn checkered_spheres() -> Result<(Surface, Camera), BvhError> {
    let mut world = SurfaceList::new();

    let checker =
        Texture::checker_colors(0.32, Color::new(0.2, 0.3, 0.1), Color::new(0.9, 0.9, 0.9));

    world.add(Surface::sphere(
        Point3::new(0.0, -10.0, 0.0),
        10.0,
        Material::lambertian_textured(checker.clone()),
    ));
    world.add(Surface::sphere(
        Point3::new(0.0, 10.0, 0.0),
        10.0,
        Material::lambertian_textured(checker),
    ));

    let camera = Camera::new()
        .with_aspect_ratio(16.0 / 9.0)
        .with_view(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.0, 10.0)
        .with_background(Background::Sky);

    Ok((bvh_root(world)?, camera))
}

/// Five colored quads boxing in the view.
pub fn quads() -> Result<(Surface, Camera), BvhError> {
    let mut world = SurfaceList::new();

    let left_red = Material::lambertian(Color::new(1.0, 0.2, 0.2));
    let back_green = Material::lambertian(Color::new(0.2, 1.0, 0.2));
    let right_blue = Material::lambertian(Color::new(0.2, 0.2, 1.0));
    let upper_orange = Material::lambertian(Color::new(1.0, 0.5, 0.0));
    let lower_teal = Material::lambertian(Color::new(0.2, 0.8, 0.8));

    world.add(Surface::quad(
        Point3::new(-3.0, -2.0, 5.0),
        Vec3::new(0.0, 0.0, -4.0),
        Vec3::new(0.0, 4.0, 0.0),
        left_red,
    ));
    world.add(Surface::quad(
        Point3::new(-2.0, -2.0, 0.0),
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(0.0, 4.0, 0.0),
        back_green,
    ));
    world.add(Surface::quad(
        Point3::new(3.0, -2.0, 1.0),
        Vec3::new(0.0, 0.0, 4.0),
        Vec3::new(0.0, 4.0, 0.0),
        right_blue,
    ));
    world.add(Surface::quad(
        Point3::new(-2.0, 3.0, 1.0),
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 4.0),
        upper_orange,
    ));
    world.add(Surface::quad(
        Point3::new(-2.0, -3.0, 5.0),
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -4.0),
        lower_teal,
    ));

    let camera = Camera::new()
        .with_aspect_ratio(1.0)
        .with_view(Point3::new(0.0, 0.0, 9.0), Point3::ZERO, Vec3::Y)
        .with_lens(80.0, 0.0, 10.0)
        .with_background(Background::Sky);

    Ok((bvh_root(world)?, camera))
}

/// An emissive quad and sphere lighting an otherwise dark scene.
pub fn simple_light() -> Result<(Surface, Camera), BvhError> {
    let mut world = SurfaceList::new();

    world.add(Surface::sphere(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Material::lambertian(Color::splat(0.5)),
    ));
    world.add(Surface::sphere(
        Point3::new(0.0, 2.0, 0.0),
        2.0,
        Material::lambertian(Color::new(0.4, 0.2, 0.1)),
    ));

    let light = Material::diffuse_light(Color::new(4.0, 4.0, 4.0));
    world.add(Surface::quad(
        Point3::new(3.0, 1.0, -2.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 2.0, 0.0),
        light.clone(),
    ));
    world.add(Surface::sphere(Point3::new(0.0, 7.0, 0.0), 2.0, light));

    let camera = Camera::new()
        .with_aspect_ratio(16.0 / 9.0)
        .with_view(Point3::new(26.0, 3.0, 6.0), Point3::new(0.0, 2.0, 0.0), Vec3::Y)
        .with_lens(20.0, 0.0, 10.0)
        .with_background(Background::Solid(Color::ZERO));

    Ok((bvh_root(world)?, camera))
}
