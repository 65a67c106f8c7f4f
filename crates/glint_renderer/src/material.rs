//! Whitted-style surface coefficients.

use glint_core::description::SurfaceDesc;
use glint_math::Color;

/// Per-object shading coefficients and base color.
///
/// Each primitive owns exactly one material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Base color (RGB, 0-1)
    pub color: Color,
    /// Ambient weight (ka)
    pub ambient: f64,
    /// Lambertian weight (kd)
    pub diffuse: f64,
    /// Phong highlight weight (ks)
    pub specular: f64,
    /// Mirror reflection weight (kr)
    pub reflection: f64,
    /// Phong exponent
    pub shininess: u32,
}

impl Material {
    /// A purely ambient material of the given color.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ambient: 1.0,
            diffuse: 0.0,
            specular: 0.0,
            reflection: 0.0,
            shininess: 0,
        }
    }

    /// Set the ambient, diffuse, specular and reflection weights.
    ///
    /// Negative weights are clamped to zero.
    pub fn with_coefficients(mut self, ka: f64, kd: f64, ks: f64, kr: f64) -> Self {
        self.ambient = ka.max(0.0);
        self.diffuse = kd.max(0.0);
        self.specular = ks.max(0.0);
        self.reflection = kr.max(0.0);
        self
    }

    pub fn with_shininess(mut self, shininess: u32) -> Self {
        self.shininess = shininess;
        self
    }

    /// True if this material adds any mirror reflection.
    pub fn is_reflective(&self) -> bool {
        self.reflection > 0.0
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(Color::splat(0.5))
    }
}

impl From<&SurfaceDesc> for Material {
    fn from(surface: &SurfaceDesc) -> Self {
        Material::new(surface.color)
            .with_coefficients(
                surface.ambient,
                surface.diffuse,
                surface.specular,
                surface.reflection,
            )
            .with_shininess(surface.shininess)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let material = Material::new(Color::new(1.0, 0.0, 0.0))
            .with_coefficients(0.1, 0.6, 0.3, 0.0)
            .with_shininess(20);

        assert_eq!(material.ambient, 0.1);
        assert_eq!(material.diffuse, 0.6);
        assert_eq!(material.specular, 0.3);
        assert_eq!(material.shininess, 20);
        assert!(!material.is_reflective());
    }

    #[test]
    fn test_negative_coefficients_clamped() {
        let material = Material::default().with_coefficients(-1.0, 0.5, -0.2, 0.4);
        assert_eq!(material.ambient, 0.0);
        assert_eq!(material.specular, 0.0);
        assert!(material.is_reflective());
    }

    #[test]
    fn test_from_surface_desc() {
        let surface = SurfaceDesc {
            color: Color::new(0.0, 0.5, 0.0),
            ambient: 0.4,
            diffuse: 0.2,
            specular: 0.1,
            reflection: 0.3,
            shininess: 30,
        };
        let material = Material::from(&surface);

        assert_eq!(material.color, surface.color);
        assert_eq!(material.reflection, 0.3);
        assert_eq!(material.shininess, 30);
    }
}
