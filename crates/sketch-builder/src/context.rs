//! Builder Context
//!
//! Mutable session state threaded through one replay pass: the cursor
//! position, the geometry index counter, and the table of indices already
//! assigned to applied features. A context is owned by exactly one build
//! and never reused.

use glam::Vec2;
use std::collections::HashMap;
use uuid::Uuid;

use sketch_model::GeometryIndex;

/// Replay state for a single build pass
#[derive(Debug)]
pub struct BuilderContext {
    /// Current cursor position
    cursor: Vec2,
    /// Index of the most recently committed geometry entry (-1 before any)
    geometry_index: GeometryIndex,
    /// Indices assigned to applied features, for late-bound references
    resolved: HashMap<Uuid, GeometryIndex>,
}

impl BuilderContext {
    /// Create a context with the cursor at the given start point
    pub fn new(start: Vec2) -> Self {
        Self {
            cursor: start,
            geometry_index: -1,
            resolved: HashMap::new(),
        }
    }

    /// Get the current cursor position
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Get the index of the most recently committed geometry entry
    pub fn geometry_index(&self) -> GeometryIndex {
        self.geometry_index
    }

    /// Set the cursor to an absolute position
    pub fn move_to(&mut self, point: Vec2) {
        self.cursor = point;
    }

    /// Advance the cursor by a delta
    ///
    /// Returns the pre-mutation cursor as `start` and the advanced cursor
    /// as `end`; the cursor is left at `end`.
    pub fn add(&mut self, delta: Vec2) -> (Vec2, Vec2) {
        let start = self.cursor;
        let end = start + delta;

        self.cursor = end;

        (start, end)
    }

    /// Claim the next geometry index for a feature
    ///
    /// Must be called exactly once per geometry-producing feature, in
    /// application order, so indices mirror the object's geometry list.
    pub fn next_index(&mut self, feature: Uuid) -> GeometryIndex {
        self.geometry_index += 1;
        self.resolved.insert(feature, self.geometry_index);

        tracing::debug!(index = self.geometry_index, %feature, "geometry index assigned");

        self.geometry_index
    }

    /// Look up the index assigned to an already-applied feature
    pub fn resolve(&self, feature: Uuid) -> Option<GeometryIndex> {
        self.resolved.get(&feature).copied()
    }
}
