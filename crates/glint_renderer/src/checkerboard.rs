//! Checkerboard floor in the `z = 0` plane.

use crate::triangle::facing;
use crate::{Material, Ray};
use glint_math::{Color, DVec3, Interval};

/// Default number of tiles along each axis.
pub const DEFAULT_TILES: u32 = 50;

/// Rays with |n·d| below this are treated as parallel to the floor.
pub const GRAZING_EPSILON: f64 = 0.005;

/// An infinite plane at `z = 0` shaded as a finite grid of black and white
/// tiles centered on the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkerboard {
    tile_width: f64,
    tiles: u32,
    /// Minimum corner of the tiled region
    corner: DVec3,
    material: Material,
}

impl Checkerboard {
    pub fn new(tile_width: f64, material: Material) -> Self {
        Self::with_tiles(tile_width, DEFAULT_TILES, material)
    }

    pub fn with_tiles(tile_width: f64, tiles: u32, material: Material) -> Self {
        let half_extent = tiles as f64 * tile_width / 2.0;
        Self {
            tile_width,
            tiles,
            corner: DVec3::new(-half_extent, -half_extent, 0.0),
            material,
        }
    }

    pub fn tile_width(&self) -> f64 {
        self.tile_width
    }

    pub fn tiles(&self) -> u32 {
        self.tiles
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        let denom = DVec3::Z.dot(ray.direction());
        if denom.abs() < GRAZING_EPSILON {
            return None;
        }

        let t = -DVec3::Z.dot(ray.origin()) / denom;
        if !Interval::FORWARD.surrounds(t) {
            return None;
        }

        let p = ray.at(t);
        let (x0, y0) = (self.corner.x, self.corner.y);
        // Suspect bound: the second clause can never hold for a grid centered
        // on the origin, so only hits with x <= x0 are rejected. Other
        // out-of-grid hits shade black.
        let rejected =
            p.x <= x0 || (p.x >= x0.abs() && p.y <= y0 && p.y >= y0.abs());
        (!rejected).then_some(t)
    }

    /// Grid coordinates of the tile containing `point`, if any.
    pub fn tile_at(&self, point: DVec3) -> Option<(u32, u32)> {
        let index = |offset: f64| {
            let i = (offset / self.tile_width).floor();
            (i >= 0.0 && i < self.tiles as f64).then_some(i as u32)
        };
        Some((index(point.x - self.corner.x)?, index(point.y - self.corner.y)?))
    }

    /// `+z` flipped to oppose the incident ray.
    pub fn normal_at(&self, _point: DVec3, incident: &Ray) -> DVec3 {
        facing(DVec3::Z, incident)
    }

    /// White on even tiles, black on odd tiles and outside the grid.
    pub fn color_at(&self, point: DVec3) -> Color {
        match self.tile_at(point) {
            Some((i, j)) if (i + j) % 2 == 0 => Color::ONE,
            _ => Color::ZERO,
        }
    }
}
