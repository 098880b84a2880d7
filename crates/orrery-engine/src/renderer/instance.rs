use bytemuck::{Pod, Zeroable};
use crate::renderer::camera::CameraUniform;

/// Per-sphere render data for the host renderer.
/// Must match the host protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct MeshInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub radius: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Tessellation hint (width and height segments).
    pub segments: f32,
}

impl MeshInstance {
    pub const FLOATS: usize = 8;
}

/// Describes one point cloud inside the flat point array.
/// 8 floats: start, count, r, g, b, size, pad×2.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PointBatch {
    /// First point (not float) index in the point array.
    pub start: f32,
    /// Number of points.
    pub count: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Point size in pixels.
    pub size: f32,
    pub _pad0: f32,
    pub _pad1: f32,
}

impl PointBatch {
    pub const FLOATS: usize = 8;
}

/// Floats per point position (x, y, z).
pub const POINT_FLOATS: usize = 3;

/// Everything the renderer needs for one frame.
/// Meshes are rebuilt every frame; points only when the scene structure changes.
pub struct FrameBuffers {
    pub meshes: Vec<MeshInstance>,
    pub point_batches: Vec<PointBatch>,
    /// Flat xyz positions for all point clouds.
    pub points: Vec<f32>,
    /// Scene generation the point data was built from (`None` = never built).
    pub points_generation: Option<u32>,
    pub camera: CameraUniform,
}

impl FrameBuffers {
    pub fn new() -> Self {
        Self::with_capacity(512, 0)
    }

    pub fn with_capacity(max_meshes: usize, max_points: usize) -> Self {
        Self {
            meshes: Vec::with_capacity(max_meshes),
            point_batches: Vec::new(),
            points: Vec::with_capacity(max_points * POINT_FLOATS),
            points_generation: None,
            camera: CameraUniform {
                view: [[0.0; 4]; 4],
                projection: [[0.0; 4]; 4],
            },
        }
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn point_count(&self) -> usize {
        self.points.len() / POINT_FLOATS
    }
}

impl Default for FrameBuffers {
    fn default() -> Self {
        Self::new()
    }
}
