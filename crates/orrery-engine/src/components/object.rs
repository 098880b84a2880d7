use glam::Vec3;
use crate::api::types::ObjectId;
use crate::components::mesh::{Color, Geometry, Material};

/// A renderable node in the scene graph.
/// Geometry and material are fixed at creation; only `position` is expected to change.
#[derive(Debug, Clone)]
pub struct SceneObject {
    /// Unique identifier.
    pub id: ObjectId,
    /// String tag for finding objects by name.
    pub tag: String,
    /// Whether this object is drawn (inactive objects are skipped).
    pub active: bool,
    /// Position in world space.
    pub position: Vec3,
    pub geometry: Geometry,
    pub material: Material,
}

impl SceneObject {
    /// Create a new object at the origin.
    pub fn new(id: ObjectId, geometry: Geometry, material: Material) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            position: Vec3::ZERO,
            geometry,
            material,
        }
    }

    /// Shorthand for a flat-colored sphere.
    pub fn sphere(id: ObjectId, radius: f32, segments: u32, color: Color) -> Self {
        Self::new(id, Geometry::sphere(radius, segments), Material::basic(color))
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn color(&self) -> Color {
        self.material.color()
    }
}
