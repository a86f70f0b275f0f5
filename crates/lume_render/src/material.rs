//! Material scattering models.

use std::sync::Arc;

use lume_math::{Point3, Ray, Vec3};
use rand::RngCore;

use crate::sample::{gen_f64, random_in_unit_sphere, random_unit_vector};
use crate::surface::HitRecord;
use crate::texture::Texture;

/// Linear RGB color.
pub type Color = Vec3;

/// An attenuated continuation of a light path.
pub struct Scatter {
    pub attenuation: Color,
    pub scattered: Ray,
}

/// How light interacts with a surface.
///
/// A closed set of models dispatched by matching; concrete behavior
/// lives on the per-variant types.
pub enum Material {
    Lambertian(Lambertian),
    Metal(Metal),
    Dielectric(Dielectric),
    DiffuseLight(DiffuseLight),
}

impl Material {
    /// Scatter `ray_in` at `rec`, or absorb it.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<Scatter> {
        match self {
            Material::Lambertian(m) => m.scatter(ray_in, rec, rng),
            Material::Metal(m) => m.scatter(ray_in, rec, rng),
            Material::Dielectric(m) => m.scatter(ray_in, rec, rng),
            // Lights don't scatter rays
            Material::DiffuseLight(_) => None,
        }
    }

    /// Light emitted at the hit point. Black for non-emissive materials.
    pub fn emitted(&self, _u: f64, _v: f64, _p: Point3) -> Color {
        match self {
            Material::DiffuseLight(light) => light.emit,
            _ => Color::ZERO,
        }
    }

    /// A shared diffuse material with a constant albedo.
    pub fn lambertian(albedo: Color) -> Arc<Self> {
        Arc::new(Material::Lambertian(Lambertian::new(albedo)))
    }

    /// A shared diffuse material with a textured albedo.
    pub fn lambertian_textured(albedo: Arc<Texture>) -> Arc<Self> {
        Arc::new(Material::Lambertian(Lambertian::textured(albedo)))
    }

    /// A shared metal material.
    pub fn metal(albedo: Color, fuzz: f64) -> Arc<Self> {
        Arc::new(Material::Metal(Metal::new(albedo, fuzz)))
    }

    /// A shared dielectric material.
    pub fn dielectric(refraction_index: f64) -> Arc<Self> {
        Arc::new(Material::Dielectric(Dielectric::new(refraction_index)))
    }

    /// A shared emissive material.
    pub fn diffuse_light(emit: Color) -> Arc<Self> {
        Arc::new(Material::DiffuseLight(DiffuseLight::new(emit)))
    }
}

/// Lambertian (diffuse) material.
pub struct Lambertian {
    albedo: Arc<Texture>,
}

impl Lambertian {
    /// Diffuse material with a constant albedo color.
    pub fn new(albedo: Color) -> Self {
        Self {
            albedo: Texture::solid(albedo),
        }
    }

    /// Diffuse material reading its albedo from a texture.
    pub fn textured(albedo: Arc<Texture>) -> Self {
        Self { albedo }
    }

    fn scatter(&self, _ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter> {
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // The random vector can nearly cancel the normal; fall back to
        // the normal itself rather than scattering a degenerate ray.
        if scatter_direction.abs().max_element() < 1e-8 {
            scatter_direction = rec.normal;
        }

        Some(Scatter {
            attenuation: self.albedo.value(rec.u, rec.v, rec.p),
            scattered: Ray::new(rec.p, scatter_direction),
        })
    }
}

/// Metal (specular) material.
pub struct Metal {
    albedo: Color,
    fuzz: f64,
}

impl Metal {
    /// Metal with the given color and roughness.
    ///
    /// `fuzz` is clamped to [0, 1]: 0 is a perfect mirror, 1 fully rough.
    pub fn new(albedo: Color, fuzz: f64) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter> {
        let reflected = reflect(ray_in.direction.normalize(), rec.normal);
        let direction = reflected + self.fuzz * random_in_unit_sphere(rng);

        // A grazing perturbation can dip under the surface; absorb it.
        if direction.dot(rec.normal) <= 0.0 {
            return None;
        }

        Some(Scatter {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, direction),
        })
    }
}

/// Dielectric (refractive) material, non-absorbing.
pub struct Dielectric {
    refraction_index: f64,
}

impl Dielectric {
    /// Dielectric with the given index of refraction
    /// (1.0 = vacuum, 1.5 = glass, 2.4 = diamond).
    pub fn new(refraction_index: f64) -> Self {
        Self { refraction_index }
    }

    /// Schlick's reflectance approximation.
    fn reflectance(cosine: f64, refraction_index: f64) -> f64 {
        let r0 = ((1.0 - refraction_index) / (1.0 + refraction_index)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter> {
        // Entering the surface uses the reciprocal ratio
        let ri = if rec.front_face {
            1.0 / self.refraction_index
        } else {
            self.refraction_index
        };

        let unit_direction = ray_in.direction.normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        let cannot_refract = ri * sin_theta > 1.0;
        let direction = if cannot_refract || Self::reflectance(cos_theta, ri) > gen_f64(rng) {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, ri)
        };

        Some(Scatter {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction),
        })
    }
}

/// Diffuse light emitter.
pub struct DiffuseLight {
    emit: Color,
}

impl DiffuseLight {
    /// Emitter with the given constant radiance.
    pub fn new(emit: Color) -> Self {
        Self { emit }
    }
}

/// Reflect `v` about the unit normal `n`.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with unit normal `n`.
#[inline]
fn refract(uv: Vec3, n: Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}
