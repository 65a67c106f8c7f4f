//! Glint renderer - recursive Whitted-style ray tracing on the CPU.
//!
//! Traces primary rays through a square image plane, shades hits with
//! ambient, diffuse and Phong specular terms under hard shadows, and
//! follows mirror reflections up to the scene's recursion depth.

mod bucket;
mod camera;
mod checkerboard;
mod light;
mod material;
mod primitive;
mod quad;
mod renderer;
mod scene;
mod sphere;
mod triangle;

pub use bucket::{generate_buckets, render_bucket, render_parallel, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, ImagePlane};
pub use checkerboard::Checkerboard;
pub use light::{PointLight, SpotLight};
pub use material::Material;
pub use primitive::Primitive;
pub use quad::Quad;
pub use renderer::{
    clamp_color, color_to_rgb, render, render_pixel, render_sequential, shade, shade_traced,
    OutputError, RenderConfig, RenderTarget, TraceStats, BACKGROUND,
};
pub use scene::{cube_faces, pyramid_faces, Hit, Scene};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export common math types from glint_math
pub use glint_math::{Color, Interval, Point3, Ray};
