//! Planar quadrilateral primitive.
//!
//! Containment is tested against the axis-aligned bounding box of the four
//! vertices rather than the polygon itself. That is exact for axis-aligned
//! rectangles (cube faces, pyramid bases) and conservative otherwise.

use crate::triangle::facing;
use crate::{Material, Ray};
use glint_math::{Color, DVec3, Interval};

/// Rays with |n·d| at or below this are treated as parallel to the quad.
pub const PARALLEL_EPSILON: f64 = 1e-6;

/// Slack added around the vertex bounding box on every side.
pub const BOUNDS_PADDING: f64 = 1e-5;

/// A planar, convex quad with consistently wound vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Quad {
    vertices: [DVec3; 4],
    /// Unit normal of the `(a, b, c)` triangle
    normal: DVec3,
    bounds: [Interval; 3],
    material: Material,
}

impl Quad {
    pub fn new(a: DVec3, b: DVec3, c: DVec3, d: DVec3, material: Material) -> Self {
        let vertices = [a, b, c, d];
        let normal = (b - a).cross(c - a).normalize_or_zero();

        let axis = |i: usize| {
            let values: Vec<f64> = vertices.iter().map(|v| v[i]).collect();
            Interval::spanning(&values).expand(2.0 * BOUNDS_PADDING)
        };
        let bounds = [axis(0), axis(1), axis(2)];

        Self {
            vertices,
            normal,
            bounds,
            material,
        }
    }

    pub fn vertices(&self) -> &[DVec3; 4] {
        &self.vertices
    }

    pub fn centroid(&self) -> DVec3 {
        self.vertices.iter().sum::<DVec3>() / 4.0
    }

    pub fn face_normal(&self) -> DVec3 {
        self.normal
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        let denom = self.normal.dot(ray.direction());
        if denom.abs() <= PARALLEL_EPSILON {
            return None;
        }

        let t = self.normal.dot(self.vertices[0] - ray.origin()) / denom;
        if !Interval::FORWARD.surrounds(t) {
            return None;
        }

        let p = ray.at(t);
        self.within_bounds(p).then_some(t)
    }

    fn within_bounds(&self, p: DVec3) -> bool {
        self.bounds
            .iter()
            .enumerate()
            .all(|(axis, range)| range.contains(p[axis]))
    }

    /// Face normal flipped to oppose the incident ray.
    pub fn normal_at(&self, _point: DVec3, incident: &Ray) -> DVec3 {
        facing(self.normal, incident)
    }

    pub fn color_at(&self, _point: DVec3) -> Color {
        self.material.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Quad {
        Quad::new(
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            Material::default(),
        )
    }

    #[test]
    fn test_quad_hit_from_above() {
        let ray = Ray::new(DVec3::new(0.5, 0.5, 5.0), -DVec3::Z);
        let t = unit_square().intersect(&ray).unwrap();
        assert!((t - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_quad_centroid_along_normal() {
        let quad = Quad::new(
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::new(2.0, 3.0, 0.0),
            DVec3::new(2.0, 3.0, 3.0),
            DVec3::new(2.0, 0.0, 3.0),
            Material::default(),
        );
        let n = quad.face_normal();
        let ray = Ray::new(quad.centroid() + n * 4.0, -n);
        assert!((quad.intersect(&ray).unwrap() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_quad_miss_outside_bounds() {
        let ray = Ray::new(DVec3::new(1.5, 0.5, 5.0), -DVec3::Z);
        assert!(unit_square().intersect(&ray).is_none());
    }

    #[test]
    fn test_quad_edge_within_padding() {
        let ray = Ray::new(DVec3::new(1.0 + 0.5 * BOUNDS_PADDING, 0.5, 5.0), -DVec3::Z);
        assert!(unit_square().intersect(&ray).is_some());
    }

    #[test]
    fn test_quad_behind_ray() {
        let ray = Ray::new(DVec3::new(0.5, 0.5, 5.0), DVec3::Z);
        assert!(unit_square().intersect(&ray).is_none());
    }

    #[test]
    fn test_quad_parallel_ray() {
        let ray = Ray::new(DVec3::new(-1.0, 0.5, 0.0), DVec3::X);
        assert!(unit_square().intersect(&ray).is_none());
    }

    #[test]
    fn test_quad_normal_faces_viewer() {
        let quad = unit_square();
        let point = DVec3::new(0.5, 0.5, 0.0);

        let from_above = Ray::new(DVec3::new(0.5, 0.5, 1.0), -DVec3::Z);
        let from_below = Ray::new(DVec3::new(0.5, 0.5, -1.0), DVec3::Z);

        assert_eq!(quad.normal_at(point, &from_above), DVec3::Z);
        assert_eq!(quad.normal_at(point, &from_below), -DVec3::Z);
    }
}
