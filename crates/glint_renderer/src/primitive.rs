//! Closed set of renderable primitives.

use crate::{Checkerboard, Material, Quad, Ray, Sphere, Triangle};
use glint_math::{Color, DVec3};

/// A renderable surface.
///
/// Every variant answers the same three queries: where a ray first hits it,
/// which way the surface faces at a point, and what color it is there.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
    Triangle(Triangle),
    Quad(Quad),
    Checkerboard(Checkerboard),
}

impl Primitive {
    /// Ray parameter of the first hit, always strictly positive.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        match self {
            Primitive::Sphere(s) => s.intersect(ray),
            Primitive::Triangle(t) => t.intersect(ray),
            Primitive::Quad(q) => q.intersect(ray),
            Primitive::Checkerboard(c) => c.intersect(ray),
        }
    }

    /// Unit surface normal at `point`.
    ///
    /// Planar surfaces are oriented against `incident`; spheres always
    /// return the outward normal.
    pub fn normal_at(&self, point: DVec3, incident: &Ray) -> DVec3 {
        match self {
            Primitive::Sphere(s) => s.normal_at(point),
            Primitive::Triangle(t) => t.normal_at(point, incident),
            Primitive::Quad(q) => q.normal_at(point, incident),
            Primitive::Checkerboard(c) => c.normal_at(point, incident),
        }
    }

    pub fn color_at(&self, point: DVec3) -> Color {
        match self {
            Primitive::Sphere(s) => s.color_at(point),
            Primitive::Triangle(t) => t.color_at(point),
            Primitive::Quad(q) => q.color_at(point),
            Primitive::Checkerboard(c) => c.color_at(point),
        }
    }

    pub fn material(&self) -> &Material {
        match self {
            Primitive::Sphere(s) => s.material(),
            Primitive::Triangle(t) => t.material(),
            Primitive::Quad(q) => q.material(),
            Primitive::Checkerboard(c) => c.material(),
        }
    }

    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Primitive::Sphere(_) => "sphere",
            Primitive::Triangle(_) => "triangle",
            Primitive::Quad(_) => "quad",
            Primitive::Checkerboard(_) => "checkerboard",
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<Triangle> for Primitive {
    fn from(triangle: Triangle) -> Self {
        Primitive::Triangle(triangle)
    }
}

impl From<Quad> for Primitive {
    fn from(quad: Quad) -> Self {
        Primitive::Quad(quad)
    }
}

impl From<Checkerboard> for Primitive {
    fn from(board: Checkerboard) -> Self {
        Primitive::Checkerboard(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_matches_variant() {
        let material = Material::new(Color::new(0.2, 0.4, 0.6));
        let sphere = Sphere::new(DVec3::new(0.0, 0.0, 5.0), 1.0, material);
        let primitive = Primitive::from(sphere.clone());
        let ray = Ray::new(DVec3::ZERO, DVec3::Z);

        assert_eq!(primitive.kind(), "sphere");
        assert_eq!(primitive.intersect(&ray), sphere.intersect(&ray));
        assert_eq!(primitive.color_at(DVec3::ZERO), material.color);
        assert_eq!(primitive.material(), &material);
    }

    #[test]
    fn test_sphere_normal_ignores_incident_ray() {
        let primitive = Primitive::from(Sphere::new(DVec3::ZERO, 1.0, Material::default()));
        let outward = DVec3::X;
        let inside = Ray::new(DVec3::ZERO, DVec3::X);
        assert_eq!(primitive.normal_at(outward, &inside), DVec3::X);
    }

    #[test]
    fn test_checkerboard_color_is_procedural() {
        let primitive = Primitive::from(Checkerboard::new(10.0, Material::default()));
        let a = primitive.color_at(DVec3::new(-245.0, -245.0, 0.0));
        let b = primitive.color_at(DVec3::new(-235.0, -245.0, 0.0));
        assert_ne!(a, b);
    }
}
