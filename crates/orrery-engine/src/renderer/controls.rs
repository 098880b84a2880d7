//! Orbit-style camera controller.
//!
//! Primary drag orbits around the target, secondary/middle drag pans,
//! the wheel dollies. Input only accumulates deltas; [`OrbitControls::update`]
//! folds them into the camera once per frame.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::input::queue::{InputEvent, PointerButton};
use crate::renderer::camera::PerspectiveCamera;

/// Keeps the polar angle off the poles so `look_at` stays defined.
const POLAR_EPSILON: f32 = 1e-6;
/// Dolly factor per wheel notch at `zoom_speed == 1`.
const ZOOM_BASE: f32 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragMode {
    Idle,
    Rotate,
    Pan,
}

#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub enabled: bool,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    /// Closest allowed eye-to-target distance.
    pub min_distance: f32,
    /// Farthest allowed eye-to-target distance.
    pub max_distance: f32,

    viewport_width: f32,
    viewport_height: f32,
    mode: DragMode,
    last_pointer: (f32, f32),

    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    pan_offset: Vec3,
}

impl OrbitControls {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            enabled: true,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            viewport_width,
            viewport_height,
            mode: DragMode::Idle,
            last_pointer: (0.0, 0.0),
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
        }
    }

    /// Viewport size in CSS pixels; drag distances are measured against its height.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.viewport_width = width;
            self.viewport_height = height;
        }
    }

    #[cfg(test)]
    pub(crate) fn viewport(&self) -> (f32, f32) {
        (self.viewport_width, self.viewport_height)
    }

    /// Accumulate one input event. The camera is only read (for pan axes).
    pub fn handle(&mut self, event: &InputEvent, camera: &PerspectiveCamera) {
        if !self.enabled {
            return;
        }
        match *event {
            InputEvent::PointerDown { x, y, button } => {
                self.mode = match button {
                    PointerButton::Primary => DragMode::Rotate,
                    PointerButton::Middle | PointerButton::Secondary => DragMode::Pan,
                };
                self.last_pointer = (x, y);
            }
            InputEvent::PointerMove { x, y } => {
                let dx = x - self.last_pointer.0;
                let dy = y - self.last_pointer.1;
                self.last_pointer = (x, y);
                match self.mode {
                    DragMode::Rotate => self.rotate(dx, dy),
                    DragMode::Pan => self.pan(dx, dy, camera),
                    DragMode::Idle => {}
                }
            }
            InputEvent::PointerUp { .. } => {
                self.mode = DragMode::Idle;
            }
            InputEvent::Wheel { delta_y } => {
                let factor = ZOOM_BASE.powf(self.zoom_speed);
                if delta_y < 0.0 {
                    self.scale *= factor;
                } else if delta_y > 0.0 {
                    self.scale /= factor;
                }
            }
        }
    }

    fn rotate(&mut self, dx: f32, dy: f32) {
        let h = self.viewport_height;
        self.delta_theta -= TAU * dx / h * self.rotate_speed;
        self.delta_phi -= TAU * dy / h * self.rotate_speed;
    }

    fn pan(&mut self, dx: f32, dy: f32, camera: &PerspectiveCamera) {
        let distance = (camera.position - camera.target).length();
        // World units spanned by half the viewport height at the target plane
        let half_height = distance * (camera.fov_deg.to_radians() / 2.0).tan();
        let per_pixel = 2.0 * half_height / self.viewport_height * self.pan_speed;

        let forward = camera.forward();
        let right = forward.cross(camera.up).normalize_or_zero();
        let up = right.cross(forward);

        self.pan_offset += -right * (dx * per_pixel) + up * (dy * per_pixel);
    }

    /// Apply accumulated input to the camera. Returns true if the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let pending = self.delta_theta != 0.0
            || self.delta_phi != 0.0
            || self.scale != 1.0
            || self.pan_offset != Vec3::ZERO;
        if !pending {
            return false;
        }

        let offset = camera.position - camera.target;
        let radius = offset.length();
        let (mut theta, mut phi) = if radius > 0.0 {
            (offset.x.atan2(offset.z), (offset.y / radius).clamp(-1.0, 1.0).acos())
        } else {
            (0.0, PI / 2.0)
        };

        theta += self.delta_theta;
        phi = (phi + self.delta_phi).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        let radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        let panned = self.pan_offset != Vec3::ZERO;
        let target = camera.target + self.pan_offset;
        let offset = Vec3::new(
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
            radius * phi.sin() * theta.cos(),
        );

        let before = camera.position;
        camera.target = target;
        camera.position = target + offset;

        self.clear_pending();
        panned || camera.position.distance_squared(before) > f32::EPSILON
    }

    fn clear_pending(&mut self) {
        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        self.scale = 1.0;
        self.pan_offset = Vec3::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::camera::CameraConfig;

    fn setup() -> (OrbitControls, PerspectiveCamera) {
        let camera = PerspectiveCamera::from_config(&CameraConfig::default(), 1.0);
        (OrbitControls::new(800.0, 800.0), camera)
    }

    fn drag(controls: &mut OrbitControls, camera: &PerspectiveCamera, button: PointerButton, dx: f32, dy: f32) {
        controls.handle(&InputEvent::PointerDown { x: 100.0, y: 100.0, button }, camera);
        controls.handle(&InputEvent::PointerMove { x: 100.0 + dx, y: 100.0 + dy }, camera);
        controls.handle(&InputEvent::PointerUp { x: 100.0 + dx, y: 100.0 + dy }, camera);
    }

    #[test]
    fn no_input_leaves_camera_alone() {
        let (mut controls, mut camera) = setup();
        assert!(!controls.update(&mut camera));
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 50.0));
    }

    #[test]
    fn rotate_preserves_distance_to_target() {
        let (mut controls, mut camera) = setup();
        drag(&mut controls, &camera.clone(), PointerButton::Primary, 200.0, 50.0);
        assert!(controls.update(&mut camera));
        let dist = (camera.position - camera.target).length();
        assert!((dist - 50.0).abs() < 1e-3, "distance = {dist}");
        assert!(camera.position.x.abs() > 1.0);
    }

    #[test]
    fn rotation_is_clamped_at_the_pole() {
        let (mut controls, mut camera) = setup();
        drag(&mut controls, &camera.clone(), PointerButton::Primary, 0.0, 5000.0);
        controls.update(&mut camera);
        let offset = camera.position - camera.target;
        assert!(offset.x.abs() + offset.z.abs() > 0.0, "camera collapsed onto the pole");
        assert!(camera.position.is_finite());
    }

    #[test]
    fn wheel_dollies_in_and_out() {
        let (mut controls, mut camera) = setup();
        controls.handle(&InputEvent::Wheel { delta_y: -100.0 }, &camera);
        controls.update(&mut camera);
        assert!((camera.position.z - 47.5).abs() < 1e-3);

        controls.handle(&InputEvent::Wheel { delta_y: 100.0 }, &camera);
        controls.update(&mut camera);
        assert!((camera.position.z - 50.0).abs() < 1e-3);
    }

    #[test]
    fn distance_limits_apply() {
        let (mut controls, mut camera) = setup();
        controls.max_distance = 52.0;
        for _ in 0..10 {
            controls.handle(&InputEvent::Wheel { delta_y: 1.0 }, &camera);
        }
        controls.update(&mut camera);
        assert!((camera.position.length() - 52.0).abs() < 1e-3);
    }

    #[test]
    fn pan_moves_target_and_eye_together() {
        let (mut controls, mut camera) = setup();
        drag(&mut controls, &camera.clone(), PointerButton::Secondary, -40.0, 0.0);
        assert!(controls.update(&mut camera));
        assert!(camera.target.x > 0.0, "dragging left should pan right");
        assert!((camera.position.x - camera.target.x).abs() < 1e-4);
        assert!((camera.position.z - 50.0).abs() < 1e-3);
    }

    #[test]
    fn move_without_press_does_nothing() {
        let (mut controls, mut camera) = setup();
        controls.handle(&InputEvent::PointerMove { x: 300.0, y: 300.0 }, &camera);
        assert!(!controls.update(&mut camera));
    }

    #[test]
    fn disabled_controls_ignore_input() {
        let (mut controls, mut camera) = setup();
        controls.enabled = false;
        controls.handle(&InputEvent::Wheel { delta_y: -1.0 }, &camera);
        assert!(!controls.update(&mut camera));
    }
}
