//! Whitted-style shading engine and frame driver.
//!
//! Implements recursive ray tracing with:
//! - Ambient, diffuse and Phong specular terms per light
//! - Hard shadows from point lights and spotlights
//! - Mirror reflection bounded by the scene's recursion depth

use crate::bucket::render_parallel;
use crate::camera::ImagePlane;
use crate::scene::Hit;
use crate::{Camera, Color, Material, PointLight, Ray, Scene};
use glint_math::{reflect, DVec3, Interval};
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

/// Shadow rays ignore hits within this distance of the light's target.
pub const SHADOW_EPSILON: f64 = 1e-5;

/// Reflected rays start this far along their direction.
pub const REFLECTION_OFFSET: f64 = 1e-5;

/// Lights closer than this to the shaded point are skipped.
pub const COINCIDENT_LIGHT_DISTANCE: f64 = 1e-5;

/// Color returned when a ray escapes the scene.
pub const BACKGROUND: Color = Color::ZERO;

/// Counters gathered while shading.
///
/// Each caller owns its own stats; parallel renders merge them afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceStats {
    /// Number of lit shading evaluations
    pub shade_calls: u64,
    /// Number of occlusion queries cast toward lights
    pub shadow_rays: u64,
    /// Number of reflected rays that hit a surface
    pub reflection_rays: u64,
    /// Deepest recursion level that was shaded
    pub max_depth: u32,
}

impl TraceStats {
    pub fn merge(&mut self, other: &TraceStats) {
        self.shade_calls += other.shade_calls;
        self.shadow_rays += other.shadow_rays;
        self.reflection_rays += other.reflection_rays;
        self.max_depth = self.max_depth.max(other.max_depth);
    }
}

/// Compute the color seen by a ray.
///
/// `depth == 0` returns the nearest surface's unlit color. Higher depths
/// apply full lighting and reflect while `depth <= max_recursion_depth`.
/// The result is not clamped.
pub fn shade(scene: &Scene, ray: &Ray, depth: u32) -> Color {
    shade_traced(scene, ray, depth, &mut TraceStats::default())
}

/// [`shade`] that also records what it traced into `stats`.
pub fn shade_traced(scene: &Scene, ray: &Ray, depth: u32, stats: &mut TraceStats) -> Color {
    match scene.nearest_hit(ray) {
        Some(hit) => shade_hit(scene, ray, &hit, depth, stats),
        None => BACKGROUND,
    }
}

fn shade_hit(scene: &Scene, ray: &Ray, hit: &Hit<'_>, depth: u32, stats: &mut TraceStats) -> Color {
    let point = ray.at(hit.t);
    let base = hit.primitive.color_at(point);

    if depth == 0 {
        return base;
    }

    stats.shade_calls += 1;
    stats.max_depth = stats.max_depth.max(depth);

    let material = hit.primitive.material();
    let normal = hit.primitive.normal_at(point, ray);
    let mirrored = reflect(ray.direction(), normal);

    let mut color = base * material.ambient;

    for light in scene.point_lights() {
        color += direct_light(scene, light, point, normal, mirrored, material, stats);
    }

    for spot in scene.spot_lights() {
        if spot.illuminates(point) {
            color += direct_light(scene, &spot.light, point, normal, mirrored, material, stats);
        }
    }

    if depth <= scene.max_recursion_depth() {
        let reflected = Ray::new(point + mirrored * REFLECTION_OFFSET, mirrored);
        if let Some(next) = scene.nearest_hit(&reflected) {
            stats.reflection_rays += 1;
            color += material.reflection * shade_hit(scene, &reflected, &next, depth + 1, stats);
        }
    }

    color
}

/// Diffuse and specular contribution of one light, or black if shadowed.
fn direct_light(
    scene: &Scene,
    light: &PointLight,
    point: DVec3,
    normal: DVec3,
    mirrored: DVec3,
    material: &Material,
    stats: &mut TraceStats,
) -> Color {
    let distance = light.position.distance(point);
    if distance < COINCIDENT_LIGHT_DISTANCE {
        return Color::ZERO;
    }

    stats.shadow_rays += 1;
    let shadow = Ray::towards(light.position, point);
    if scene.is_occluded(&shadow, distance - SHADOW_EPSILON) {
        return Color::ZERO;
    }

    let to_source = -shadow.direction();
    let intensity = light.color * light.attenuation(distance);

    let diffuse = material.diffuse * normal.dot(to_source).max(0.0);
    let specular = material.specular
        * mirrored
            .dot(to_source)
            .max(0.0)
            .powi(material.shininess as i32);

    (diffuse + specular) * intensity
}

/// Final color of pixel `(x, y)`: lit if the primary ray hits, clamped.
pub fn render_pixel(
    scene: &Scene,
    plane: &ImagePlane,
    x: u32,
    y: u32,
    stats: &mut TraceStats,
) -> Color {
    let ray = plane.primary_ray(x, y);
    let color = match scene.nearest_hit(&ray) {
        Some(hit) => shade_hit(scene, &ray, &hit, 1, stats),
        None => BACKGROUND,
    };
    clamp_color(color)
}

/// Clamp each channel to `[0, 1]`.
pub fn clamp_color(color: Color) -> Color {
    Color::new(
        Interval::UNIT.clamp(color.x),
        Interval::UNIT.clamp(color.y),
        Interval::UNIT.clamp(color.z),
    )
}

/// Convert a color to 8-bit RGB, `round(255 * c)` per clamped channel.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let c = clamp_color(color) * 255.0;
    [c.x.round() as u8, c.y.round() as u8, c.z.round() as u8]
}

/// Errors raised while writing a render to disk.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Render target of {width}x{height} has {len} pixels")]
    SizeMismatch { width: u32, height: u32, len: usize },
}

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output resolution along each side
    pub pixel_size: u32,
    /// Bucket edge length for parallel rendering
    pub bucket_size: u32,
    /// Render buckets on the rayon pool instead of the calling thread
    pub parallel: bool,
}

impl RenderConfig {
    pub fn new(pixel_size: u32) -> Self {
        Self {
            pixel_size,
            ..Default::default()
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pixel_size: 256,
            bucket_size: crate::bucket::DEFAULT_BUCKET_SIZE,
            parallel: true,
        }
    }
}

/// Row-major grid of clamped pixel colors.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTarget {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl RenderTarget {
    /// Create a new render target filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![BACKGROUND; width as usize * height as usize],
        }
    }

    pub fn square(pixel_size: u32) -> Self {
        Self::new(pixel_size, pixel_size)
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Row-major offset of (x, y), computed in `usize` so large sides cannot
    /// overflow.
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Convert to packed RGB bytes.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|color| color_to_rgb(*color))
            .collect()
    }

    pub fn to_rgb_image(&self) -> Result<image::RgbImage, OutputError> {
        image::RgbImage::from_raw(self.width, self.height, self.to_rgb_bytes()).ok_or(
            OutputError::SizeMismatch {
                width: self.width,
                height: self.height,
                len: self.pixels.len(),
            },
        )
    }

    /// Write an 8-bit-per-channel BMP.
    pub fn save_bmp(&self, path: impl AsRef<Path>) -> Result<(), OutputError> {
        let path = path.as_ref();
        self.to_rgb_image()?
            .save_with_format(path, image::ImageFormat::Bmp)
            .map_err(|source| OutputError::Image {
                path: path.to_path_buf(),
                source,
            })?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

/// Render the scene pixel by pixel on the calling thread.
pub fn render_sequential(scene: &Scene, plane: &ImagePlane) -> (RenderTarget, TraceStats) {
    let size = plane.pixel_size();
    let mut target = RenderTarget::square(size);
    let mut stats = TraceStats::default();

    for y in 0..size {
        for x in 0..size {
            let color = render_pixel(scene, plane, x, y, &mut stats);
            target.set(x, y, color);
        }
    }

    (target, stats)
}

/// Render the entire scene as seen from `camera`.
pub fn render(scene: &Scene, camera: &Camera, config: &RenderConfig) -> (RenderTarget, TraceStats) {
    let plane = camera.image_plane(config.pixel_size);
    let start = Instant::now();

    let (target, stats) = if config.parallel {
        render_parallel(scene, &plane, config.bucket_size)
    } else {
        render_sequential(scene, &plane)
    };

    log::info!(
        "Rendered {}x{} in {:.2?} ({} shading calls, {} shadow rays, {} reflections, depth {})",
        target.width,
        target.height,
        start.elapsed(),
        stats.shade_calls,
        stats.shadow_rays,
        stats.reflection_rays,
        stats.max_depth
    );

    (target, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Quad, Sphere, SpotLight};

    fn red_sphere() -> Sphere {
        let material = Material::new(Color::new(0.8, 0.2, 0.2))
            .with_coefficients(0.3, 0.6, 0.4, 0.0)
            .with_shininess(10);
        Sphere::new(DVec3::ZERO, 10.0, material)
    }

    fn front_camera() -> Camera {
        Camera::looking_at(DVec3::new(0.0, 0.0, -30.0), DVec3::ZERO, DVec3::Y)
            .with_lens(60.0, 1.0, 100.0, 1.0)
    }

    fn single_pixel(scene: &Scene) -> Color {
        let plane = front_camera().image_plane(1);
        render_pixel(scene, &plane, 0, 0, &mut TraceStats::default())
    }

    fn light_scene(occluded: bool) -> Scene {
        let mut scene = Scene::new(0);
        scene.add(red_sphere());
        if occluded {
            // Midway between the light and the front of the sphere
            scene.add(Sphere::new(DVec3::new(0.0, 25.0, -25.0), 3.0, Material::default()));
        }
        scene.add_point_light(PointLight::new(DVec3::new(0.0, 50.0, -40.0), Color::ONE, 0.0));
        scene
    }

    #[test]
    fn test_miss_is_background() {
        let scene = Scene::new(3);
        let ray = Ray::new(DVec3::ZERO, DVec3::Z);
        assert_eq!(shade(&scene, &ray, 0), BACKGROUND);
        assert_eq!(shade(&scene, &ray, 1), BACKGROUND);
    }

    #[test]
    fn test_depth_zero_is_unlit() {
        let scene = light_scene(false);
        let ray = Ray::new(DVec3::new(0.0, 0.0, -30.0), DVec3::Z);
        assert_eq!(shade(&scene, &ray, 0), Color::new(0.8, 0.2, 0.2));
    }

    #[test]
    fn test_occluded_light_leaves_ambient() {
        let occluded = single_pixel(&light_scene(true));
        let expected = Color::new(0.8, 0.2, 0.2) * 0.3;
        assert!((occluded - expected).length() < 1e-12, "{occluded}");

        let lit = single_pixel(&light_scene(false));
        assert!(lit.x > occluded.x);
        assert!(lit.y > occluded.y);
        assert!(lit.z > occluded.z);
    }

    #[test]
    fn test_diffuse_term() {
        // Light straight in front: N·L = 1, R·L = 1
        let mut scene = Scene::new(0);
        let material = Material::new(Color::new(0.5, 0.5, 0.5)).with_coefficients(0.2, 0.5, 0.0, 0.0);
        scene.add(Sphere::new(DVec3::ZERO, 10.0, material));
        scene.add_point_light(PointLight::new(DVec3::new(0.0, 0.0, -50.0), Color::ONE, 0.0));

        let color = single_pixel(&scene);
        let expected = Color::splat(0.5 * 0.2 + 0.5);
        assert!((color - expected).length() < 1e-12, "{color}");
    }

    #[test]
    fn test_specular_term_and_falloff() {
        let mut scene = Scene::new(0);
        let material = Material::new(Color::ZERO)
            .with_coefficients(0.0, 0.0, 0.5, 0.0)
            .with_shininess(20);
        scene.add(Sphere::new(DVec3::ZERO, 10.0, material));
        scene.add_point_light(PointLight::new(DVec3::new(0.0, 0.0, -20.0), Color::ONE, 0.001));

        let ray = Ray::new(DVec3::new(0.0, 0.0, -30.0), DVec3::Z);
        let color = shade(&scene, &ray, 1);
        // Light 10 units from the hit point
        let expected = 0.5 * (-100.0f64 * 0.001).exp();
        assert!((color.x - expected).abs() < 1e-12, "{color}");
    }

    #[test]
    fn test_light_behind_surface_contributes_nothing() {
        let mut scene = Scene::new(0);
        scene.add(red_sphere());
        scene.add_point_light(PointLight::new(DVec3::new(0.0, 0.0, 50.0), Color::ONE, 0.0));

        let color = single_pixel(&scene);
        assert!((color - Color::new(0.8, 0.2, 0.2) * 0.3).length() < 1e-12);
    }

    #[test]
    fn test_coincident_light_is_skipped() {
        let mut scene = Scene::new(0);
        scene.add(red_sphere());
        scene.add_point_light(PointLight::new(DVec3::new(0.0, 0.0, -10.0), Color::ONE, 0.0));

        let mut stats = TraceStats::default();
        let ray = Ray::new(DVec3::new(0.0, 0.0, -30.0), DVec3::Z);
        let color = shade_traced(&scene, &ray, 1, &mut stats);
        assert_eq!(stats.shadow_rays, 0);
        assert!((color - Color::new(0.8, 0.2, 0.2) * 0.3).length() < 1e-12);
    }

    #[test]
    fn test_spotlight_cone_gates_light() {
        let light = PointLight::new(DVec3::new(0.0, 0.0, -50.0), Color::ONE, 0.0);

        let mut inside = Scene::new(0);
        inside.add(red_sphere());
        inside.add_spot_light(SpotLight::new(light, DVec3::Z, 10.0));

        let mut outside = Scene::new(0);
        outside.add(red_sphere());
        outside.add_spot_light(SpotLight::new(light, DVec3::X, 10.0));

        let ambient = Color::new(0.8, 0.2, 0.2) * 0.3;
        assert!(single_pixel(&inside).y > ambient.y);
        assert!((single_pixel(&outside) - ambient).length() < 1e-12);
    }

    fn mirror() -> Material {
        Material::new(Color::new(0.1, 0.1, 0.1)).with_coefficients(0.1, 0.0, 0.0, 0.9)
    }

    fn facing_mirrors(depth: u32) -> Scene {
        let mut scene = Scene::new(depth);
        for z in [-10.0, 10.0] {
            scene.add(Quad::new(
                DVec3::new(-5.0, -5.0, z),
                DVec3::new(5.0, -5.0, z),
                DVec3::new(5.0, 5.0, z),
                DVec3::new(-5.0, 5.0, z),
                mirror(),
            ));
        }
        scene
    }

    #[test]
    fn test_reflection_depth_is_bounded() {
        let ray = Ray::new(DVec3::ZERO, DVec3::Z);
        for depth in 0..6 {
            let mut stats = TraceStats::default();
            shade_traced(&facing_mirrors(depth), &ray, 1, &mut stats);
            assert_eq!(stats.reflection_rays, depth as u64);
            assert_eq!(stats.max_depth, depth + 1);
            assert_eq!(stats.shade_calls, depth as u64 + 1);
        }
    }

    #[test]
    fn test_reflection_adds_mirrored_color() {
        let ray = Ray::new(DVec3::ZERO, DVec3::Z);
        let ambient = 0.1 * 0.1;

        let flat = shade(&facing_mirrors(0), &ray, 1);
        assert!((flat.x - ambient).abs() < 1e-12);

        let once = shade(&facing_mirrors(1), &ray, 1);
        assert!((once.x - (ambient + 0.9 * ambient)).abs() < 1e-12);
    }

    #[test]
    fn test_saturating_lights_clamp() {
        let mut scene = Scene::new(4);
        scene.add(red_sphere());
        for x in [-40.0, 0.0, 40.0] {
            scene.add_point_light(PointLight::new(
                DVec3::new(x, 0.0, -50.0),
                Color::splat(25.0),
                0.0,
            ));
        }

        let (target, _) = render(&scene, &front_camera(), &RenderConfig::new(16));
        assert!(target.pixels.iter().any(|c| *c == Color::ONE));
        for color in &target.pixels {
            for channel in color.to_array() {
                assert!((0.0..=1.0).contains(&channel));
            }
        }
    }

    #[test]
    fn test_color_to_rgb() {
        assert_eq!(color_to_rgb(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb(Color::ONE), [255, 255, 255]);
        assert_eq!(color_to_rgb(Color::new(0.5, 2.0, -1.0)), [128, 255, 0]);
        assert_eq!(color_to_rgb(Color::splat(0.001)), [0, 0, 0]);
    }

    #[test]
    fn test_render_target() {
        let mut target = RenderTarget::new(3, 2);
        target.set(2, 1, Color::ONE);
        assert_eq!(target.get(2, 1), Color::ONE);
        assert_eq!(target.get(0, 0), BACKGROUND);

        let bytes = target.to_rgb_bytes();
        assert_eq!(bytes.len(), 3 * 2 * 3);
        assert_eq!(&bytes[15..18], &[255, 255, 255]);
    }

    #[test]
    fn test_index_past_u32_range() {
        // 70000² exceeds u32::MAX; indexing must not wrap.
        let target = RenderTarget {
            width: 70_000,
            height: 70_000,
            pixels: Vec::new(),
        };
        assert_eq!(target.index(69_999, 69_999), 70_000usize * 70_000 - 1);
        assert_eq!(target.index(3, 1), 70_003);

        let wide = RenderTarget::new(70_000, 2);
        assert_eq!(wide.pixels.len(), 140_000);
        assert_eq!(wide.get(69_999, 1), BACKGROUND);
    }

    #[test]
    fn test_save_bmp() {
        let mut target = RenderTarget::square(4);
        target.set(1, 2, Color::new(1.0, 0.5, 0.0));

        let path = std::env::temp_dir().join(format!("glint_test_{}.bmp", std::process::id()));
        target.save_bmp(&path).unwrap();

        let image = image::open(&path).unwrap().to_rgb8();
        std::fs::remove_file(&path).ok();

        assert_eq!(image.dimensions(), (4, 4));
        assert_eq!(image.get_pixel(1, 2).0, [255, 128, 0]);
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0]);
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let mut scene = Scene::new(2);
        scene.add(crate::Checkerboard::new(10.0, mirror()));
        scene.add(Sphere::new(DVec3::new(0.0, 0.0, 10.0), 10.0, mirror()));
        scene.add_point_light(PointLight::new(DVec3::new(20.0, -20.0, 60.0), Color::ONE, 0.0001));

        let camera = Camera::new();
        let sequential = RenderConfig {
            pixel_size: 37,
            bucket_size: 8,
            parallel: false,
        };
        let parallel = RenderConfig {
            parallel: true,
            ..sequential.clone()
        };

        let (a, stats_a) = render(&scene, &camera, &sequential);
        let (b, stats_b) = render(&scene, &camera, &parallel);
        assert_eq!(a, b);
        assert_eq!(stats_a, stats_b);
    }
}
