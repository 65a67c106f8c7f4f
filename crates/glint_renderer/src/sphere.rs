//! Sphere primitive for ray tracing.

use crate::{Material, Ray};
use glint_math::{Color, DVec3, Interval};

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: DVec3,
    radius: f64,
    material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: DVec3, radius: f64, material: Material) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Nearest strictly positive root of |O + tD - C|² = r².
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        if ray.is_degenerate() {
            return None;
        }

        let a = ray.direction().length_squared();

        let oc = ray.origin() - self.center;
        let b = 2.0 * oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let near = (-b - sqrtd) / (2.0 * a);
        let far = (-b + sqrtd) / (2.0 * a);

        [near, far]
            .into_iter()
            .find(|&t| Interval::FORWARD.surrounds(t))
    }

    /// Outward surface normal at `point`.
    pub fn normal_at(&self, point: DVec3) -> DVec3 {
        (point - self.center).normalize_or_zero()
    }

    pub fn color_at(&self, _point: DVec3) -> Color {
        self.material.color
    }
}
