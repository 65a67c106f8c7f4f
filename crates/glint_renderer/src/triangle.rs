//! Triangle primitive for ray tracing.
//!
//! Solves the barycentric system with Cramer's rule:
//! `beta (a - b) + gamma (a - c) + t d = a - o`.

use crate::{Material, Ray};
use glint_math::{Color, DMat3, DVec3, Interval};

/// Systems with a smaller determinant are treated as parallel.
pub const MIN_DETERMINANT: f64 = 1e-9;

/// A triangle primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    /// Vertices
    a: DVec3,
    b: DVec3,
    c: DVec3,
    /// Pre-computed face normal (unit length, zero if degenerate)
    normal: DVec3,
    material: Material,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(a: DVec3, b: DVec3, c: DVec3, material: Material) -> Self {
        let normal = (b - a).cross(c - a).normalize_or_zero();

        Self {
            a,
            b,
            c,
            normal,
            material,
        }
    }

    pub fn vertices(&self) -> [DVec3; 3] {
        [self.a, self.b, self.c]
    }

    pub fn centroid(&self) -> DVec3 {
        (self.a + self.b + self.c) / 3.0
    }

    /// Face normal from the `(b - a) x (c - a)` winding.
    pub fn face_normal(&self) -> DVec3 {
        self.normal
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        let ab = self.a - self.b;
        let ac = self.a - self.c;
        let ao = self.a - ray.origin();
        let d = ray.direction();

        let det = DMat3::from_cols(ab, ac, d).determinant();
        if det.abs() < MIN_DETERMINANT {
            return None;
        }

        let beta = DMat3::from_cols(ao, ac, d).determinant() / det;
        let gamma = DMat3::from_cols(ab, ao, d).determinant() / det;
        let t = DMat3::from_cols(ab, ac, ao).determinant() / det;

        let inside = beta > 0.0 && gamma > 0.0 && beta + gamma < 1.0;
        (inside && Interval::FORWARD.surrounds(t)).then_some(t)
    }

    /// Face normal flipped to oppose the incident ray.
    pub fn normal_at(&self, _point: DVec3, incident: &Ray) -> DVec3 {
        facing(self.normal, incident)
    }

    pub fn color_at(&self, _point: DVec3) -> Color {
        self.material.color
    }
}

/// Orient a plane normal against the incident ray direction.
pub(crate) fn facing(normal: DVec3, incident: &Ray) -> DVec3 {
    if normal.dot(incident.direction()) > 0.0 {
        -normal
    } else {
        normal
    }
}
