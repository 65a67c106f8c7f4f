//! Read-only scene queried by the shading engine.

use crate::{Checkerboard, Material, PointLight, Primitive, Quad, Ray, Sphere, SpotLight, Triangle};
use glint_core::description::{ObjectDesc, SceneDescription};
use glint_math::{DVec3, Interval};

/// Nearest intersection found by a scene query.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// Ray parameter of the hit
    pub t: f64,
    /// Position of the primitive in scene order
    pub index: usize,
    pub primitive: &'a Primitive,
}

/// Primitives, lights and the reflection depth limit.
///
/// Built once before rendering and only read afterwards, so a single
/// `&Scene` can be shared across render threads.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    primitives: Vec<Primitive>,
    point_lights: Vec<PointLight>,
    spot_lights: Vec<SpotLight>,
    max_recursion_depth: u32,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(max_recursion_depth: u32) -> Self {
        Self {
            max_recursion_depth,
            ..Default::default()
        }
    }

    /// Add a primitive. Insertion order breaks exact intersection ties.
    pub fn add(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    pub fn add_point_light(&mut self, light: PointLight) {
        self.point_lights.push(light);
    }

    pub fn add_spot_light(&mut self, light: SpotLight) {
        self.spot_lights.push(light);
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn point_lights(&self) -> &[PointLight] {
        &self.point_lights
    }

    pub fn spot_lights(&self) -> &[SpotLight] {
        &self.spot_lights
    }

    pub fn max_recursion_depth(&self) -> u32 {
        self.max_recursion_depth
    }

    /// Get the number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Check if the scene has no primitives.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Find the closest primitive along `ray`.
    ///
    /// On exact ties the primitive added first wins.
    pub fn nearest_hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        let mut nearest: Option<Hit<'_>> = None;

        for (index, primitive) in self.primitives.iter().enumerate() {
            if let Some(t) = primitive.intersect(ray) {
                if nearest.map_or(true, |hit| t < hit.t) {
                    nearest = Some(Hit {
                        t,
                        index,
                        primitive,
                    });
                }
            }
        }

        nearest
    }

    /// True if any primitive intersects `ray` strictly inside `(0, max_t)`.
    pub fn is_occluded(&self, ray: &Ray, max_t: f64) -> bool {
        let window = Interval::new(0.0, max_t);
        self.primitives
            .iter()
            .filter_map(|primitive| primitive.intersect(ray))
            .any(|t| window.surrounds(t))
    }

    /// Build the render scene from a parsed description.
    ///
    /// The checkerboard floor comes first, then every object in file order.
    /// Cubes become six quads; pyramids become a quad base and four
    /// triangular sides.
    pub fn from_description(desc: &SceneDescription) -> Self {
        let mut scene = Scene::new(desc.recursion_depth);

        let floor = Material::new(DVec3::ONE)
            .with_coefficients(desc.floor.ambient, desc.floor.diffuse, 0.0, desc.floor.reflection);
        scene.add(Checkerboard::new(desc.floor.tile_width, floor));

        for object in &desc.objects {
            let material = Material::from(object.surface());
            match *object {
                ObjectDesc::Sphere { center, radius, .. } => {
                    scene.add(Sphere::new(center, radius, material));
                }
                ObjectDesc::Cube { origin, side, .. } => {
                    for quad in cube_faces(origin, side, material) {
                        scene.add(quad);
                    }
                }
                ObjectDesc::Pyramid {
                    origin,
                    width,
                    height,
                    ..
                } => {
                    let (base, sides) = pyramid_faces(origin, width, height, material);
                    scene.add(base);
                    for side in sides {
                        scene.add(side);
                    }
                }
            }
        }

        for light in &desc.point_lights {
            scene.add_point_light(PointLight::from(light));
        }
        for spot in &desc.spot_lights {
            scene.add_spot_light(SpotLight::from(spot));
        }

        log::info!(
            "Built scene: {} primitives, {} point lights, {} spotlights, recursion depth {}",
            scene.len(),
            scene.point_lights.len(),
            scene.spot_lights.len(),
            scene.max_recursion_depth
        );
        scene
    }
}

/// Six axis-aligned faces of a cube with minimum corner `origin`.
pub fn cube_faces(origin: DVec3, side: f64, material: Material) -> [Quad; 6] {
    let corner = |x: f64, y: f64, z: f64| origin + DVec3::new(x, y, z) * side;

    let a = corner(0.0, 1.0, 0.0);
    let b = corner(0.0, 1.0, 1.0);
    let c = corner(1.0, 1.0, 1.0);
    let d = corner(1.0, 1.0, 0.0);
    let e = corner(0.0, 0.0, 0.0);
    let f = corner(0.0, 0.0, 1.0);
    let g = corner(1.0, 0.0, 1.0);
    let h = corner(1.0, 0.0, 0.0);

    [
        Quad::new(a, b, c, d, material),
        Quad::new(e, f, g, h, material),
        Quad::new(e, a, b, f, material),
        Quad::new(f, b, c, g, material),
        Quad::new(g, c, d, h, material),
        Quad::new(h, d, a, e, material),
    ]
}

/// Square base and four sides of a pyramid standing on `origin`.
pub fn pyramid_faces(
    origin: DVec3,
    width: f64,
    height: f64,
    material: Material,
) -> (Quad, [Triangle; 4]) {
    let a = origin;
    let b = origin + DVec3::new(width, 0.0, 0.0);
    let c = origin + DVec3::new(width, width, 0.0);
    let d = origin + DVec3::new(0.0, width, 0.0);
    let apex = origin + DVec3::new(width / 2.0, width / 2.0, height);

    let base = Quad::new(a, b, c, d, material);
    let sides = [
        Triangle::new(a, b, apex, material),
        Triangle::new(b, c, apex, material),
        Triangle::new(c, d, apex, material),
        Triangle::new(d, a, apex, material),
    ];
    (base, sides)
}
