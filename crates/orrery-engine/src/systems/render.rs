use crate::components::mesh::{Geometry, Material};
use crate::core::scene::Scene;
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::instance::{FrameBuffers, MeshInstance, PointBatch, POINT_FLOATS};

/// Build the frame buffers from the scene and camera.
/// Sphere instances are rebuilt every call. Point clouds are re-packed only
/// when the scene generation differs from the one they were built from.
pub fn build_frame(scene: &Scene, camera: &PerspectiveCamera, frame: &mut FrameBuffers) {
    frame.meshes.clear();
    for object in scene.iter().filter(|o| o.active) {
        if let Geometry::Sphere { radius, segments } = object.geometry {
            let color = object.color();
            frame.meshes.push(MeshInstance {
                x: object.position.x,
                y: object.position.y,
                z: object.position.z,
                radius,
                r: color.r,
                g: color.g,
                b: color.b,
                segments: segments as f32,
            });
        }
    }

    if frame.points_generation != Some(scene.generation()) {
        pack_points(scene, frame);
        frame.points_generation = Some(scene.generation());
    }

    frame.camera = camera.uniform();
}

fn pack_points(scene: &Scene, frame: &mut FrameBuffers) {
    frame.point_batches.clear();
    frame.points.clear();

    for object in scene.iter().filter(|o| o.active) {
        let Geometry::Points { positions } = &object.geometry else {
            continue;
        };
        let (color, size) = match object.material {
            Material::Points { color, size } => (color, size),
            Material::Basic { color } => (color, 1.0),
        };
        let start = frame.points.len() / POINT_FLOATS;
        for p in positions {
            // Cloud positions are relative to the owning object
            let world = *p + object.position;
            frame.points.extend_from_slice(&world.to_array());
        }
        frame.point_batches.push(PointBatch {
            start: start as f32,
            count: positions.len() as f32,
            r: color.r,
            g: color.g,
            b: color.b,
            size,
            ..Default::default()
        });
    }
}
