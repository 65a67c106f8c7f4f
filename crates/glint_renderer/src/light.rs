//! Point lights and spotlights.

use glint_core::description::{PointLightDesc, SpotLightDesc};
use glint_math::{Color, DVec3};

/// An omnidirectional light with exponential distance falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: DVec3,
    pub color: Color,
    /// Decay rate applied to the squared distance
    pub falloff: f64,
}

impl PointLight {
    pub fn new(position: DVec3, color: Color, falloff: f64) -> Self {
        Self {
            position,
            color,
            falloff: falloff.max(0.0),
        }
    }

    /// Intensity scale at `distance`: `exp(-distance² * falloff)`.
    pub fn attenuation(&self, distance: f64) -> f64 {
        (-distance * distance * self.falloff).exp()
    }
}

impl From<&PointLightDesc> for PointLight {
    fn from(desc: &PointLightDesc) -> Self {
        PointLight::new(desc.position, desc.color, desc.falloff)
    }
}

/// A point light restricted to a cone around `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub light: PointLight,
    /// Unit cone axis
    pub direction: DVec3,
    /// Cone half-angle in degrees
    pub cutoff_degrees: f64,
}

impl SpotLight {
    pub fn new(light: PointLight, direction: DVec3, cutoff_degrees: f64) -> Self {
        Self {
            light,
            direction: direction.normalize_or_zero(),
            cutoff_degrees,
        }
    }

    pub fn position(&self) -> DVec3 {
        self.light.position
    }

    /// Angle in degrees between the cone axis and the light-to-point vector.
    pub fn angle_to(&self, point: DVec3) -> Option<f64> {
        let to_point = (point - self.light.position).try_normalize()?;
        let cos = to_point.dot(self.direction).clamp(-1.0, 1.0);
        Some(cos.acos().to_degrees())
    }

    /// True if `point` lies strictly inside the cone.
    pub fn illuminates(&self, point: DVec3) -> bool {
        self.angle_to(point)
            .is_some_and(|angle| angle < self.cutoff_degrees)
    }
}

impl From<&SpotLightDesc> for SpotLight {
    fn from(desc: &SpotLightDesc) -> Self {
        SpotLight::new(
            PointLight::from(&desc.light),
            desc.direction,
            desc.cutoff_degrees,
        )
    }
}
