/// Shared frame buffer layout.
/// The host page reads this buffer straight out of WASM memory, so any change
/// to the header indices or section order must bump [`PROTOCOL_VERSION`].
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Camera: 32 floats (view, projection; column-major)]
/// [Meshes: max_meshes × 8 floats]
/// [Point batches: max_point_batches × 8 floats]
/// [Points: max_points × 3 floats]
/// ```
///
/// Capacities are written once into the header at init.
/// The host reads them from the header to compute offsets dynamically.

use crate::api::game::GameConfig;
use crate::renderer::camera::CameraUniform;
use crate::renderer::instance::{MeshInstance, PointBatch, POINT_FLOATS};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_PROTOCOL_VERSION: usize = 2;
pub const HEADER_MAX_MESHES: usize = 3;
pub const HEADER_MESH_COUNT: usize = 4;
pub const HEADER_MAX_POINT_BATCHES: usize = 5;
pub const HEADER_POINT_BATCH_COUNT: usize = 6;
pub const HEADER_MAX_POINTS: usize = 7;
pub const HEADER_POINT_COUNT: usize = 8;
pub const HEADER_POINTS_GENERATION: usize = 9;
pub const HEADER_OUTPUT_WIDTH: usize = 10;
pub const HEADER_OUTPUT_HEIGHT: usize = 11;
// 12..16 reserved

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats in the camera block.
pub const CAMERA_FLOATS: usize = CameraUniform::FLOATS;

/// Floats per mesh instance (wire format, never changes).
pub const MESH_FLOATS: usize = MeshInstance::FLOATS;

/// Floats per point batch descriptor (wire format, never changes).
pub const POINT_BATCH_FLOATS: usize = PointBatch::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_meshes: usize,
    pub max_point_batches: usize,
    pub max_points: usize,

    /// Size of the mesh section in floats.
    pub mesh_data_floats: usize,
    /// Size of the point batch section in floats.
    pub batch_data_floats: usize,
    /// Size of the point section in floats.
    pub point_data_floats: usize,

    /// Offset (in floats) where the camera block begins.
    pub camera_offset: usize,
    /// Offset (in floats) where mesh data begins.
    pub mesh_data_offset: usize,
    /// Offset (in floats) where point batch descriptors begin.
    pub batch_data_offset: usize,
    /// Offset (in floats) where point positions begin.
    pub point_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_meshes: usize, max_point_batches: usize, max_points: usize) -> Self {
        let mesh_data_floats = max_meshes * MESH_FLOATS;
        let batch_data_floats = max_point_batches * POINT_BATCH_FLOATS;
        let point_data_floats = max_points * POINT_FLOATS;

        let camera_offset = HEADER_FLOATS;
        let mesh_data_offset = camera_offset + CAMERA_FLOATS;
        let batch_data_offset = mesh_data_offset + mesh_data_floats;
        let point_data_offset = batch_data_offset + batch_data_floats;

        let buffer_total_floats = point_data_offset + point_data_floats;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            max_meshes,
            max_point_batches,
            max_points,
            mesh_data_floats,
            batch_data_floats,
            point_data_floats,
            camera_offset,
            mesh_data_offset,
            batch_data_offset,
            point_data_offset,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_meshes, config.max_point_batches, config.max_points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_fits_the_solar_system() {
        let layout = ProtocolLayout::from_config(&GameConfig::default());
        // sun + 9 planets + 500 belt bodies, with room for markers
        assert!(layout.max_meshes >= 510);
        assert!(layout.max_points >= 10_000);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn custom_capacities_compute_correctly() {
        let layout = ProtocolLayout::new(100, 4, 1000);

        assert_eq!(layout.mesh_data_floats, 100 * 8);
        assert_eq!(layout.batch_data_floats, 4 * 8);
        assert_eq!(layout.point_data_floats, 1000 * 3);

        let expected_total = HEADER_FLOATS + 32 + 100 * 8 + 4 * 8 + 1000 * 3;
        assert_eq!(layout.buffer_total_floats, expected_total);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(10, 2, 50);

        assert_eq!(layout.camera_offset, HEADER_FLOATS);
        assert_eq!(layout.mesh_data_offset, layout.camera_offset + CAMERA_FLOATS);
        assert_eq!(layout.batch_data_offset, layout.mesh_data_offset + layout.mesh_data_floats);
        assert_eq!(layout.point_data_offset, layout.batch_data_offset + layout.batch_data_floats);
        assert_eq!(layout.buffer_total_floats, layout.point_data_offset + layout.point_data_floats);
    }

    #[test]
    fn header_fields_fit_in_header() {
        assert!(HEADER_OUTPUT_HEIGHT < HEADER_FLOATS);
    }
}
