//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered
//! independently and in parallel using rayon.

use crate::camera::ImagePlane;
use crate::renderer::{render_pixel, RenderTarget, TraceStats};
use crate::{Color, Scene};
use rayon::prelude::*;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets for an image, sorted in spiral order from center.
///
/// A `bucket_size` of zero is treated as one.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();
    let mut index = 0;

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);

    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from image center.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f64 / 2.0;
    let center_y = height as f64 / 2.0;

    let distance = |b: &Bucket| {
        let x = b.x as f64 + b.width as f64 / 2.0;
        let y = b.y as f64 + b.height as f64 / 2.0;
        (x - center_x).powi(2) + (y - center_y).powi(2)
    };

    // Stable sort keeps row-major order between equidistant buckets
    buckets.sort_by(|a, b| {
        distance(a)
            .partial_cmp(&distance(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
    pub stats: TraceStats,
}

/// Render a single bucket.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(bucket: &Bucket, scene: &Scene, plane: &ImagePlane) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);
    let mut stats = TraceStats::default();

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let color = render_pixel(scene, plane, bucket.x + local_x, bucket.y + local_y, &mut stats);
            pixels.push(color);
        }
    }

    log::debug!(
        "Bucket {} at ({}, {}): {} shading calls",
        bucket.index,
        bucket.x,
        bucket.y,
        stats.shade_calls
    );

    BucketResult {
        bucket: *bucket,
        pixels,
        stats,
    }
}

/// Render all buckets on the rayon pool and assemble them into one target.
///
/// Buckets cover disjoint pixels, so results are written back after
/// collection without synchronization.
pub fn render_parallel(
    scene: &Scene,
    plane: &ImagePlane,
    bucket_size: u32,
) -> (RenderTarget, TraceStats) {
    let size = plane.pixel_size();
    let buckets = generate_buckets(size, size, bucket_size);
    log::debug!(
        "Rendering {} buckets of up to {}px on {} threads",
        buckets.len(),
        bucket_size,
        rayon::current_num_threads()
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, scene, plane))
        .collect();

    let mut target = RenderTarget::square(size);
    let mut stats = TraceStats::default();

    for result in &results {
        let bucket = result.bucket;
        for (i, color) in result.pixels.iter().enumerate() {
            let x = bucket.x + i as u32 % bucket.width;
            let y = bucket.y + i as u32 / bucket.width;
            target.set(x, y, *color);
        }
        stats.merge(&result.stats);
    }

    (target, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Camera, Material, PointLight, Sphere};
    use glint_math::DVec3;

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4);

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 100, 64);
        assert_eq!(buckets.len(), 4);

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 100);
    }

    #[test]
    fn test_spiral_order() {
        let buckets = generate_buckets(192, 192, 64);
        assert_eq!(buckets.len(), 9);

        let first = &buckets[0];
        assert_eq!((first.x, first.y), (64, 64));
        assert!(buckets.iter().enumerate().all(|(i, b)| b.index == i));
    }

    #[test]
    fn test_zero_bucket_size() {
        let buckets = generate_buckets(3, 2, 0);
        assert_eq!(buckets.len(), 6);
    }

    #[test]
    fn test_buckets_cover_every_pixel_once() {
        let size = 37;
        let mut seen = vec![0u32; (size * size) as usize];
        for bucket in generate_buckets(size, size, 8) {
            for y in bucket.y..bucket.y + bucket.height {
                for x in bucket.x..bucket.x + bucket.width {
                    seen[(y * size + x) as usize] += 1;
                }
            }
        }
        assert!(seen.iter().all(|&n| n == 1));
    }

    #[test]
    fn test_render_bucket_matches_pixels() {
        let mut scene = Scene::new(1);
        scene.add(Sphere::new(DVec3::ZERO, 20.0, Material::default()));
        scene.add_point_light(PointLight::new(DVec3::new(0.0, -100.0, 50.0), Color::ONE, 0.0));
        let plane = Camera::new().image_plane(20);

        let bucket = Bucket::new(5, 7, 4, 3, 0);
        let result = render_bucket(&bucket, &scene, &plane);
        assert_eq!(result.pixels.len(), 12);

        let mut stats = TraceStats::default();
        let expected = render_pixel(&scene, &plane, 5 + 2, 7 + 1, &mut stats);
        assert_eq!(result.pixels[4 + 2], expected);
    }
}
