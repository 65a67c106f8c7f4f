//! Camera basis and primary ray generation.

use crate::Ray;
use glint_core::description::LensDesc;
use glint_math::{DQuat, DVec3};

/// Pinhole camera with an explicit orthonormal `{look, right, up}` basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: DVec3,
    look: DVec3,
    right: DVec3,
    up: DVec3,

    /// Vertical field of view in degrees
    pub fov_y: f64,
    /// Distance from the eye to the image plane
    pub near: f64,
    pub far: f64,
    pub aspect_ratio: f64,
}

impl Camera {
    /// Default viewpoint: 200 units back along -Y, 35 up, looking at the
    /// origin with +Z up.
    pub fn new() -> Self {
        Self::looking_at(DVec3::new(0.0, -200.0, 35.0), DVec3::ZERO, DVec3::Z)
    }

    /// Place the camera at `position` facing `target`.
    ///
    /// If `world_up` is parallel to the view direction an arbitrary
    /// perpendicular right vector is chosen.
    pub fn looking_at(position: DVec3, target: DVec3, world_up: DVec3) -> Self {
        let look = (target - position).try_normalize().unwrap_or(DVec3::Y);
        let right = look
            .cross(world_up)
            .try_normalize()
            .unwrap_or_else(|| look.any_orthonormal_vector());
        let up = right.cross(look).normalize();

        Self {
            position,
            look,
            right,
            up,
            fov_y: 80.0,
            near: 1.0,
            far: 1000.0,
            aspect_ratio: 1.0,
        }
    }

    /// Set lens settings.
    pub fn with_lens(mut self, fov_y: f64, near: f64, far: f64, aspect_ratio: f64) -> Self {
        self.fov_y = fov_y;
        self.near = near;
        self.far = far;
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Apply lens settings from a scene description.
    pub fn with_lens_desc(self, lens: &LensDesc) -> Self {
        self.with_lens(lens.fov_y, lens.near, lens.far, lens.aspect_ratio)
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn look(&self) -> DVec3 {
        self.look
    }

    pub fn right(&self) -> DVec3 {
        self.right
    }

    pub fn up(&self) -> DVec3 {
        self.up
    }

    /// Move along the view direction.
    pub fn move_forward(&mut self, distance: f64) {
        self.position += self.look * distance;
    }

    /// Strafe along the right vector.
    pub fn move_right(&mut self, distance: f64) {
        self.position += self.right * distance;
    }

    /// Move along the camera's up vector.
    pub fn move_up(&mut self, distance: f64) {
        self.position += self.up * distance;
    }

    /// Turn left (positive) or right (negative) about the up vector.
    pub fn yaw(&mut self, radians: f64) {
        let rotation = DQuat::from_axis_angle(self.up, radians);
        self.look = rotation * self.look;
        self.right = rotation * self.right;
        self.orthonormalize();
    }

    /// Look up (positive) or down (negative) about the right vector.
    pub fn pitch(&mut self, radians: f64) {
        let rotation = DQuat::from_axis_angle(self.right, radians);
        self.look = rotation * self.look;
        self.up = rotation * self.up;
        self.orthonormalize();
    }

    /// Tilt counterclockwise (positive) about the view direction.
    pub fn roll(&mut self, radians: f64) {
        let rotation = DQuat::from_axis_angle(self.look, -radians);
        self.up = rotation * self.up;
        self.right = rotation * self.right;
        self.orthonormalize();
    }

    /// Rebuild `right` and `up` from `look` so rounding never accumulates.
    fn orthonormalize(&mut self) {
        self.look = self.look.normalize();
        self.right = self.look.cross(self.up).normalize();
        self.up = self.right.cross(self.look).normalize();
    }

    /// Sample grid for a square render of `pixel_size` pixels per side.
    pub fn image_plane(&self, pixel_size: u32) -> ImagePlane {
        ImagePlane::new(self, pixel_size)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Pixel-center sample grid on the near plane.
#[derive(Debug, Clone, Copy)]
pub struct ImagePlane {
    eye: DVec3,
    /// Center of pixel (0, 0)
    top_left: DVec3,
    /// Offset between horizontally adjacent pixel centers
    step_right: DVec3,
    /// Offset between vertically adjacent pixel centers
    step_down: DVec3,
    pixel_size: u32,
}

impl ImagePlane {
    pub fn new(camera: &Camera, pixel_size: u32) -> Self {
        let pixel_size = pixel_size.max(1);
        let half_height = camera.near * (camera.fov_y.to_radians() / 2.0).tan();
        let half_width = half_height * camera.aspect_ratio;

        let du = 2.0 * half_width / pixel_size as f64;
        let dv = 2.0 * half_height / pixel_size as f64;

        let corner = camera.position + camera.look * camera.near + camera.up * half_height
            - camera.right * half_width;
        let top_left = corner + camera.right * (du / 2.0) - camera.up * (dv / 2.0);

        Self {
            eye: camera.position,
            top_left,
            step_right: camera.right * du,
            step_down: -camera.up * dv,
            pixel_size,
        }
    }

    pub fn pixel_size(&self) -> u32 {
        self.pixel_size
    }

    /// World-space center of pixel `(i, j)`; `i` runs right, `j` runs down.
    pub fn sample_point(&self, i: u32, j: u32) -> DVec3 {
        self.top_left + self.step_right * i as f64 + self.step_down * j as f64
    }

    /// Primary ray from the eye through the center of pixel `(i, j)`.
    pub fn primary_ray(&self, i: u32, j: u32) -> Ray {
        Ray::towards(self.eye, self.sample_point(i, j))
    }
}
