//! Uniform sampling helpers.
//!
//! Every function takes the generator it draws from; rendering workers
//! each own a seeded generator, so nothing here touches shared state.

use lume_math::Vec3;
use rand::{Rng, RngCore};

/// Uniform double in [0, 1).
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen()
}

/// Uniform double in [min, max).
pub fn gen_range(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    min + (max - min) * gen_f64(rng)
}

/// Uniformly distributed point strictly inside the unit sphere.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Uniformly distributed direction on the unit sphere.
///
/// Rejection sampling; candidates too close to the origin are discarded
/// before normalization so the division cannot blow up.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
        );
        let len_sq = p.length_squared();
        if len_sq > 1e-160 && len_sq <= 1.0 {
            return p / len_sq.sqrt();
        }
    }
}

/// Uniformly distributed point inside the unit disk in the xy plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(gen_range(rng, -1.0, 1.0), gen_range(rng, -1.0, 1.0), 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
