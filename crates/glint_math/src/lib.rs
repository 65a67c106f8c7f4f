// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// World-space point. Double precision keeps the shadow and reflection
/// epsilons (1e-5) meaningful at scene scales of a few hundred units.
pub type Point3 = DVec3;

/// Linear RGB color, nominally in [0, 1] per channel.
pub type Color = DVec3;

/// Reflect `v` about the unit normal `n`.
#[inline]
pub fn reflect(v: DVec3, n: DVec3) -> DVec3 {
    v - 2.0 * v.dot(n) * n
}
