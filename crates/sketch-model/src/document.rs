//! Documents
//!
//! A document owns named sketch objects and exposes the lookup, creation,
//! and recompute hooks the builder replays against. Names are not unique;
//! lookup returns every object matching both type and name.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::object::SketchObject;

/// A document holding sketch objects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Name of the document
    pub name: String,
    /// Objects in creation order
    objects: Vec<SketchObject>,
    /// Generation counter bumped by each recompute
    recompute_count: u64,
}

impl Document {
    /// Create a new empty document
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
            recompute_count: 0,
        }
    }

    // ============== Object Management ==============

    /// Find all objects matching both type and name
    pub fn find_objects(&self, object_type: &str, name: &str) -> Vec<Uuid> {
        self.objects
            .iter()
            .filter(|o| o.object_type == object_type && o.name == name)
            .map(|o| o.id)
            .collect()
    }

    /// Create a new object of the given type and name, returning its id
    pub fn create_object(&mut self, object_type: &str, name: &str) -> Uuid {
        let object = SketchObject::new(object_type, name);
        let id = object.id;
        self.objects.push(object);
        id
    }

    /// Get an object by id
    pub fn object(&self, id: Uuid) -> Option<&SketchObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Get a mutable object by id
    pub fn object_mut(&mut self, id: Uuid) -> Option<&mut SketchObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Get all objects
    pub fn objects(&self) -> &[SketchObject] {
        &self.objects
    }

    // ============== Recompute ==============

    /// Trigger a recompute of dependent state, returning the new generation
    pub fn recompute(&mut self) -> u64 {
        self.recompute_count += 1;
        tracing::debug!(
            document = %self.name,
            generation = self.recompute_count,
            "document recomputed"
        );
        self.recompute_count
    }

    /// Get the current recompute generation
    pub fn recompute_count(&self) -> u64 {
        self.recompute_count
    }
}
