//! Scene description types.
//!
//! These types mirror the description file one-to-one, before the
//! renderer expands compound objects (cubes, pyramids) into primitives.

use glint_math::DVec3;
use serde::{Deserialize, Serialize};

/// Number of checkerboard tiles along each floor axis.
pub const FLOOR_TILES: u32 = 50;

/// Largest accepted output resolution along each side.
pub const MAX_PIXEL_SIZE: u32 = 16384;

/// A fully parsed scene description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Camera frustum parameters
    pub lens: LensDesc,

    /// Maximum reflection recursion depth
    pub recursion_depth: u32,

    /// Output resolution (square, pixels per side)
    pub pixel_size: u32,

    /// Checkerboard floor
    pub floor: FloorDesc,

    /// Objects in file order
    pub objects: Vec<ObjectDesc>,

    /// Point lights in file order
    pub point_lights: Vec<PointLightDesc>,

    /// Spotlights in file order
    pub spot_lights: Vec<SpotLightDesc>,
}

impl SceneDescription {
    /// Count of every light in the description.
    pub fn light_count(&self) -> usize {
        self.point_lights.len() + self.spot_lights.len()
    }
}

/// Camera lens settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LensDesc {
    pub near: f64,
    pub far: f64,
    /// Vertical field of view in degrees
    pub fov_y: f64,
    pub aspect_ratio: f64,
}

/// Shading coefficients shared by every object kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceDesc {
    pub color: DVec3,
    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub reflection: f64,
    pub shininess: u32,
}

/// The infinite checkerboard floor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloorDesc {
    pub tile_width: f64,
    pub ambient: f64,
    pub diffuse: f64,
    pub reflection: f64,
}

/// One object block from the description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ObjectDesc {
    Sphere {
        center: DVec3,
        radius: f64,
        surface: SurfaceDesc,
    },
    /// Axis-aligned cube with its minimum corner at `origin`.
    Cube {
        origin: DVec3,
        side: f64,
        surface: SurfaceDesc,
    },
    /// Square-based pyramid standing on `origin` (minimum base corner),
    /// apex above the base center.
    Pyramid {
        origin: DVec3,
        width: f64,
        height: f64,
        surface: SurfaceDesc,
    },
}

impl ObjectDesc {
    /// Keyword used for this object in the description file.
    pub fn keyword(&self) -> &'static str {
        match self {
            ObjectDesc::Sphere { .. } => "sphere",
            ObjectDesc::Cube { .. } => "cube",
            ObjectDesc::Pyramid { .. } => "pyramid",
        }
    }

    pub fn surface(&self) -> &SurfaceDesc {
        match self {
            ObjectDesc::Sphere { surface, .. }
            | ObjectDesc::Cube { surface, .. }
            | ObjectDesc::Pyramid { surface, .. } => surface,
        }
    }
}

/// A point light.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointLightDesc {
    pub position: DVec3,
    pub color: DVec3,
    pub falloff: f64,
}

/// A spotlight. `direction` is already normalized.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpotLightDesc {
    pub light: PointLightDesc,
    pub direction: DVec3,
    pub cutoff_degrees: f64,
}
