//! Procedural textures feeding material albedos.

use std::sync::Arc;

use lume_math::Point3;

use crate::Color;

/// A color as a function of surface coordinates and position.
pub enum Texture {
    /// A single constant color.
    SolidColor(Color),
    /// Two textures alternating over unit cells of scaled 3D space.
    Checker {
        inv_scale: f64,
        even: Arc<Texture>,
        odd: Arc<Texture>,
    },
}

impl Texture {
    /// A constant-color texture.
    pub fn solid(albedo: Color) -> Arc<Self> {
        Arc::new(Texture::SolidColor(albedo))
    }

    /// A checker pattern alternating two child textures over cells of
    /// `scale` world units.
    pub fn checker(scale: f64, even: Arc<Texture>, odd: Arc<Texture>) -> Arc<Self> {
        Arc::new(Texture::Checker {
            inv_scale: 1.0 / scale,
            even,
            odd,
        })
    }

    /// A checker pattern alternating two solid colors.
    pub fn checker_colors(scale: f64, c1: Color, c2: Color) -> Arc<Self> {
        Self::checker(scale, Self::solid(c1), Self::solid(c2))
    }

    /// Evaluate the texture at surface coordinates (u, v) and position p.
    pub fn value(&self, u: f64, v: f64, p: Point3) -> Color {
        match self {
            Texture::SolidColor(albedo) => *albedo,
            Texture::Checker {
                inv_scale,
                even,
                odd,
            } => {
                let x = (inv_scale * p.x).floor() as i64;
                let y = (inv_scale * p.y).floor() as i64;
                let z = (inv_scale * p.z).floor() as i64;

                if (x + y + z) % 2 == 0 {
                    even.value(u, v, p)
                } else {
                    odd.value(u, v, p)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_color() {
        let tex = Texture::solid(Color::new(1.0, 0.5, 0.0));
        let c = tex.value(0.3, 0.7, Point3::new(9.0, -2.0, 4.0));
        assert_eq!(c, Color::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn test_checker_alternates() {
        let white = Color::ONE;
        let black = Color::ZERO;
        let tex = Texture::checker_colors(1.0, white, black);

        // Cell (0,0,0) has even parity, (1,0,0) odd
        assert_eq!(tex.value(0.0, 0.0, Point3::new(0.5, 0.5, 0.5)), white);
        assert_eq!(tex.value(0.0, 0.0, Point3::new(1.5, 0.5, 0.5)), black);

        // Negative cells keep alternating
        assert_eq!(tex.value(0.0, 0.0, Point3::new(-0.5, 0.5, 0.5)), black);
    }

    #[test]
    fn test_checker_scale() {
        let white = Color::ONE;
        let black = Color::ZERO;
        let tex = Texture::checker_colors(2.0, white, black);

        // Cells are 2 units wide: x in [0, 2) is even, [2, 4) is odd
        assert_eq!(tex.value(0.0, 0.0, Point3::new(1.9, 0.0, 0.0)), white);
        assert_eq!(tex.value(0.0, 0.0, Point3::new(2.1, 0.0, 0.0)), black);
    }

    #[test]
    fn test_checker_nested() {
        let inner = Texture::checker_colors(1.0, Color::ONE, Color::ZERO);
        let tex = Texture::checker(10.0, inner, Texture::solid(Color::new(0.5, 0.5, 0.5)));

        // Inside an even outer cell the inner checker shows through
        assert_eq!(tex.value(0.0, 0.0, Point3::new(0.5, 0.5, 0.5)), Color::ONE);
        assert_eq!(tex.value(0.0, 0.0, Point3::new(1.5, 0.5, 0.5)), Color::ZERO);
    }
}
