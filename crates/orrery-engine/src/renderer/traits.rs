//! Renderer boundary.
//!
//! The engine never draws. It packs a [`FrameData`] per tick and hands it to a
//! [`Renderer`]; the browser build ships one that copies the frame into a flat
//! buffer the page's 3D library reads.

use super::camera::CameraUniform;
use super::instance::{FrameBuffers, MeshInstance, PointBatch};

/// Complete frame data for rendering.
#[derive(Debug, Clone, Copy)]
pub struct FrameData<'a> {
    /// Spheres (sun, planets, belt, NEO markers).
    pub meshes: &'a [MeshInstance],
    /// Point cloud descriptors.
    pub point_batches: &'a [PointBatch],
    /// Flat xyz positions referenced by `point_batches`.
    pub points: &'a [f32],
    /// Changes whenever `points` was rebuilt; hosts re-upload only then.
    pub points_generation: u32,
    pub camera: CameraUniform,
    /// Monotonic frame counter.
    pub frame_number: u64,
}

impl<'a> FrameData<'a> {
    pub fn from_buffers(buffers: &'a FrameBuffers, frame_number: u64) -> Self {
        Self {
            meshes: &buffers.meshes,
            point_batches: &buffers.point_batches,
            points: &buffers.points,
            points_generation: buffers.points_generation.unwrap_or(0),
            camera: buffers.camera,
            frame_number,
        }
    }
}

/// Renderer trait for drawing backends.
///
/// # Example Implementation
///
/// ```ignore
/// struct WebGlRenderer { /* ... */ }
///
/// impl Renderer for WebGlRenderer {
///     fn backend(&self) -> &'static str { "webgl" }
///     fn set_size(&mut self, width: u32, height: u32) { /* resize drawing buffer */ }
///     fn output_size(&self) -> (u32, u32) { (self.width, self.height) }
///     fn render(&mut self, frame: &FrameData) { /* issue draw calls */ }
/// }
/// ```
pub trait Renderer {
    /// Backend identifier (e.g., "shared-buffer", "webgl").
    fn backend(&self) -> &'static str;

    /// Resize the output surface, in pixels.
    fn set_size(&mut self, width: u32, height: u32);

    /// Current output surface size.
    fn output_size(&self) -> (u32, u32);

    /// Draw one frame from the given camera.
    fn render(&mut self, frame: &FrameData);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_data_borrows_buffers() {
        let mut buffers = FrameBuffers::new();
        buffers.meshes.push(MeshInstance { radius: 3.0, ..Default::default() });
        buffers.points_generation = Some(4);
        let frame = FrameData::from_buffers(&buffers, 9);
        assert_eq!(frame.meshes.len(), 1);
        assert_eq!(frame.points_generation, 4);
        assert_eq!(frame.frame_number, 9);
    }
}
