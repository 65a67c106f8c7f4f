use crate::DVec3;

/// A ray in 3D space with an origin and a unit-length direction.
///
/// The direction is normalized on construction. A zero-length input
/// direction produces a degenerate ray (zero direction) that no primitive
/// intersects, instead of propagating NaNs.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: DVec3,
    direction: DVec3,
}

impl Ray {
    /// Create a new ray, normalizing `direction`.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Create a ray from `origin` aimed at `target`.
    pub fn towards(origin: DVec3, target: DVec3) -> Self {
        Self::new(origin, target - origin)
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// Get the (unit) direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    /// True when the direction could not be normalized.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.direction == DVec3::ZERO
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}
