use orrery_engine::bridge::protocol::{
    ProtocolLayout, HEADER_FRAME_COUNTER, HEADER_LOCK, HEADER_MAX_MESHES,
    HEADER_MAX_POINTS, HEADER_MAX_POINT_BATCHES, HEADER_MESH_COUNT, HEADER_OUTPUT_HEIGHT,
    HEADER_OUTPUT_WIDTH, HEADER_POINTS_GENERATION, HEADER_POINT_BATCH_COUNT, HEADER_POINT_COUNT,
    HEADER_PROTOCOL_VERSION, PROTOCOL_VERSION,
};
use orrery_engine::renderer::instance::{PointBatch, POINT_FLOATS};
use orrery_engine::{FrameData, Renderer};

/// Renderer that packs each frame into one flat `f32` buffer.
///
/// The page's 3D library reads the buffer straight out of WASM memory
/// through `get_frame_ptr` / `get_frame_len`. The header carries counts and
/// capacities so the host can compute every offset itself.
pub struct SharedBufferRenderer {
    layout: ProtocolLayout,
    buffer: Vec<f32>,
    width: u32,
    height: u32,
    /// Generation of the point data currently in the buffer.
    packed_generation: Option<u32>,
    overflow_logged: bool,
}

impl SharedBufferRenderer {
    pub fn new(layout: ProtocolLayout) -> Self {
        let mut buffer = vec![0.0; layout.buffer_total_floats];
        buffer[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        buffer[HEADER_MAX_MESHES] = layout.max_meshes as f32;
        buffer[HEADER_MAX_POINT_BATCHES] = layout.max_point_batches as f32;
        buffer[HEADER_MAX_POINTS] = layout.max_points as f32;
        Self {
            layout,
            buffer,
            width: 0,
            height: 0,
            packed_generation: None,
            overflow_logged: false,
        }
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    pub fn as_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn mesh_count(&self) -> u32 {
        self.buffer[HEADER_MESH_COUNT] as u32
    }

    pub fn point_count(&self) -> u32 {
        self.buffer[HEADER_POINT_COUNT] as u32
    }

    pub fn points_generation(&self) -> u32 {
        self.buffer[HEADER_POINTS_GENERATION] as u32
    }

    fn warn_overflow(&mut self, what: &str, wanted: usize, capacity: usize) {
        if !self.overflow_logged {
            log::warn!("{what}: {wanted} exceeds capacity {capacity}, extra data is not drawn");
            self.overflow_logged = true;
        }
    }

    fn write_points(&mut self, frame: &FrameData) {
        let mut batches: Vec<PointBatch> = Vec::with_capacity(frame.point_batches.len());
        let mut used = 0usize;
        for batch in frame.point_batches {
            let wanted = batch.count as usize;
            if wanted == 0 {
                continue;
            }
            if batches.len() == self.layout.max_point_batches {
                self.warn_overflow("point batches", frame.point_batches.len(), self.layout.max_point_batches);
                break;
            }
            let room = self.layout.max_points - used;
            if room == 0 {
                self.warn_overflow("points", frame.points.len() / POINT_FLOATS, self.layout.max_points);
                break;
            }
            let count = wanted.min(room);
            if count < wanted {
                self.warn_overflow("points", frame.points.len() / POINT_FLOATS, self.layout.max_points);
            }
            let start = batch.start as usize;
            let src = &frame.points[start * POINT_FLOATS..(start + count) * POINT_FLOATS];
            let dst = self.layout.point_data_offset + used * POINT_FLOATS;
            self.buffer[dst..dst + src.len()].copy_from_slice(src);
            batches.push(PointBatch {
                start: used as f32,
                count: count as f32,
                ..*batch
            });
            used += count;
        }

        let floats: &[f32] = bytemuck::cast_slice(&batches);
        let dst = self.layout.batch_data_offset;
        self.buffer[dst..dst + floats.len()].copy_from_slice(floats);
        self.buffer[HEADER_POINT_BATCH_COUNT] = batches.len() as f32;
        self.buffer[HEADER_POINT_COUNT] = used as f32;
    }
}

impl Renderer for SharedBufferRenderer {
    fn backend(&self) -> &'static str {
        "shared-buffer"
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.buffer[HEADER_OUTPUT_WIDTH] = width as f32;
        self.buffer[HEADER_OUTPUT_HEIGHT] = height as f32;
    }

    fn output_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn render(&mut self, frame: &FrameData) {
        self.buffer[HEADER_LOCK] = 1.0;

        let camera: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&frame.camera));
        let dst = self.layout.camera_offset;
        self.buffer[dst..dst + camera.len()].copy_from_slice(camera);

        let mesh_count = frame.meshes.len().min(self.layout.max_meshes);
        if mesh_count < frame.meshes.len() {
            self.warn_overflow("meshes", frame.meshes.len(), self.layout.max_meshes);
        }
        let meshes: &[f32] = bytemuck::cast_slice(&frame.meshes[..mesh_count]);
        let dst = self.layout.mesh_data_offset;
        self.buffer[dst..dst + meshes.len()].copy_from_slice(meshes);
        self.buffer[HEADER_MESH_COUNT] = mesh_count as f32;

        if self.packed_generation != Some(frame.points_generation) {
            self.write_points(frame);
            self.packed_generation = Some(frame.points_generation);
            self.buffer[HEADER_POINTS_GENERATION] = frame.points_generation as f32;
        }

        self.buffer[HEADER_FRAME_COUNTER] = frame.frame_number as f32;
        self.buffer[HEADER_LOCK] = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::renderer::camera::CameraUniform;
    use orrery_engine::MeshInstance;

    fn frame<'a>(meshes: &'a [MeshInstance], batches: &'a [PointBatch], points: &'a [f32], generation: u32) -> FrameData<'a> {
        FrameData {
            meshes,
            point_batches: batches,
            points,
            points_generation: generation,
            camera: CameraUniform { view: [[1.0; 4]; 4], projection: [[2.0; 4]; 4] },
            frame_number: 3,
        }
    }

    #[test]
    fn header_carries_capacities() {
        let r = SharedBufferRenderer::new(ProtocolLayout::new(4, 2, 10));
        assert_eq!(r.len(), r.layout().buffer_total_floats);
        assert_eq!(r.buffer[HEADER_MAX_MESHES], 4.0);
        assert_eq!(r.buffer[HEADER_MAX_POINTS], 10.0);
        assert_eq!(r.buffer[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
    }

    #[test]
    fn set_size_reports_output_size() {
        let mut r = SharedBufferRenderer::new(ProtocolLayout::new(4, 2, 10));
        r.set_size(1280, 720);
        assert_eq!(r.output_size(), (1280, 720));
        assert_eq!(r.buffer[HEADER_OUTPUT_WIDTH], 1280.0);
    }

    #[test]
    fn render_packs_camera_and_meshes() {
        let mut r = SharedBufferRenderer::new(ProtocolLayout::new(4, 2, 10));
        let meshes = [MeshInstance { x: 6.0, radius: 0.3, ..Default::default() }];
        r.render(&frame(&meshes, &[], &[], 1));

        let layout = r.layout().clone();
        let buf = &r.buffer;
        assert_eq!(r.mesh_count(), 1);
        assert_eq!(buf[layout.camera_offset], 1.0);
        assert_eq!(buf[layout.camera_offset + 16], 2.0);
        assert_eq!(buf[layout.mesh_data_offset], 6.0);
        assert_eq!(buf[layout.mesh_data_offset + 3], 0.3);
        assert_eq!(buf[HEADER_FRAME_COUNTER], 3.0);
        assert_eq!(buf[HEADER_LOCK], 0.0);
    }

    #[test]
    fn meshes_beyond_capacity_are_dropped() {
        let mut r = SharedBufferRenderer::new(ProtocolLayout::new(2, 1, 1));
        let meshes = [MeshInstance::default(); 5];
        r.render(&frame(&meshes, &[], &[], 0));
        assert_eq!(r.mesh_count(), 2);
    }

    #[test]
    fn points_are_clipped_and_repacked_per_generation() {
        let mut r = SharedBufferRenderer::new(ProtocolLayout::new(1, 2, 2));
        let batches = [PointBatch { start: 0.0, count: 3.0, size: 1.0, ..Default::default() }];
        let points = [1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 3.0, 3.0];
        r.render(&frame(&[], &batches, &points, 7));
        assert_eq!(r.point_count(), 2);
        assert_eq!(r.points_generation(), 7);
        let offset = r.layout().point_data_offset;
        assert_eq!(r.buffer[offset + 3], 2.0);

        // Same generation: buffer untouched even if the frame's data differs
        let other = [9.0; 9];
        r.render(&frame(&[], &batches, &other, 7));
        assert_eq!(r.buffer[offset], 1.0);
    }

    #[test]
    fn empty_batches_do_not_hide_later_ones() {
        let mut r = SharedBufferRenderer::new(ProtocolLayout::new(1, 2, 4));
        let batches = [
            PointBatch { start: 0.0, count: 0.0, size: 1.0, ..Default::default() },
            PointBatch { start: 0.0, count: 2.0, size: 2.0, ..Default::default() },
        ];
        let points = [4.0, 4.0, 4.0, 5.0, 5.0, 5.0];
        r.render(&frame(&[], &batches, &points, 1));

        assert_eq!(r.point_count(), 2);
        assert_eq!(r.buffer[HEADER_POINT_BATCH_COUNT], 1.0);
        let batch = r.layout().batch_data_offset;
        assert_eq!(r.buffer[batch + 1], 2.0);
        assert_eq!(r.buffer[batch + 5], 2.0);
        assert_eq!(r.buffer[r.layout().point_data_offset + 3], 5.0);
    }
}
