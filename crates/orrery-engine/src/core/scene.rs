use glam::Vec3;
use crate::api::types::ObjectId;
use crate::components::object::SceneObject;

/// Scene graph storage using a flat Vec.
/// Designed for small-to-medium object counts (hundreds, not millions).
///
/// Every structural change (add, remove, clear) bumps `generation`, so
/// consumers can skip re-packing data that only changes with the object set.
pub struct Scene {
    objects: Vec<SceneObject>,
    generation: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create a scene with a specific object capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            objects: Vec::with_capacity(capacity),
            generation: 0,
        }
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: SceneObject) {
        self.objects.push(object);
        self.generation = self.generation.wrapping_add(1);
    }

    /// Remove an object by ID. Returns the removed object if found.
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let idx = self.objects.iter().position(|o| o.id == id)?;
        self.generation = self.generation.wrapping_add(1);
        Some(self.objects.swap_remove(idx))
    }

    /// Get a reference to an object by ID.
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Get a mutable reference to an object by ID.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Move an object. Returns false if the ID is unknown.
    pub fn set_position(&mut self, id: ObjectId, position: Vec3) -> bool {
        match self.get_mut(id) {
            Some(object) => {
                object.position = position;
                true
            }
            None => false,
        }
    }

    /// Iterate over all objects in insertion order (until a removal reorders them).
    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    /// Iterate over all objects mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SceneObject> {
        self.objects.iter_mut()
    }

    /// Number of objects in the scene.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Structural change counter.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Remove all objects.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.generation = self.generation.wrapping_add(1);
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
