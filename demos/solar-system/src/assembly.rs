/// Scene assembly: sun, registry bodies, asteroid belt, starfield.
///
/// The frame updater reaches bodies only through [`OrbitHandles`], never by
/// scene order, so anything added later (markers) cannot shift the mapping.

use glam::Vec3;
use orrery_engine::{
    scatter_belt, scatter_cube, BeltSpec, EngineContext, Geometry, Material, ObjectId, SceneObject,
};

use crate::bodies::{self, BODIES, BODY_COUNT, BODY_SEGMENTS};
use crate::config::{BeltConfig, StarConfig};

pub const SUN_TAG: &str = "sun";
pub const BELT_TAG: &str = "belt";
pub const STARS_TAG: &str = "stars";

/// Registry index → scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrbitHandles {
    pub sun: ObjectId,
    bodies: [ObjectId; BODY_COUNT],
}

impl OrbitHandles {
    pub fn body(&self, index: usize) -> Option<ObjectId> {
        self.bodies.get(index).copied()
    }
}

/// Add the sun at the origin and every registry body at `(distance, 0, 0)`.
pub fn add_bodies(ctx: &mut EngineContext) -> OrbitHandles {
    let sun = ctx.next_id();
    ctx.scene.add(
        SceneObject::sphere(sun, bodies::SUN_RADIUS, bodies::SUN_SEGMENTS, bodies::SUN_COLOR)
            .with_tag(SUN_TAG),
    );

    let handles = BODIES.map(|body| {
        let id = ctx.next_id();
        ctx.scene.add(
            SceneObject::sphere(id, body.radius, BODY_SEGMENTS, body.color)
                .with_tag(body.name)
                .with_position(Vec3::new(body.distance, 0.0, 0.0)),
        );
        id
    });

    OrbitHandles { sun, bodies: handles }
}

/// Scatter the belt into the scene, one sphere per body. Returns the count added.
pub fn add_belt(ctx: &mut EngineContext, config: &BeltConfig) -> usize {
    let spec = BeltSpec {
        count: config.count,
        inner_radius: config.inner_radius,
        outer_radius: config.outer_radius,
        size_cap: config.size_cap,
    };
    let samples = scatter_belt(&mut ctx.rng, &spec);
    for sample in &samples {
        let id = ctx.next_id();
        ctx.scene.add(
            SceneObject::sphere(id, sample.size, config.segments, config.color)
                .with_tag(BELT_TAG)
                .with_position(sample.position),
        );
    }
    samples.len()
}

/// Add the starfield as a single point cloud.
pub fn add_stars(ctx: &mut EngineContext, config: &StarConfig) -> ObjectId {
    let positions = scatter_cube(&mut ctx.rng, config.count, config.half_extent);
    let id = ctx.next_id();
    ctx.scene.add(
        SceneObject::new(id, Geometry::points(positions), Material::points(config.color, config.size))
            .with_tag(STARS_TAG),
    );
    id
}
