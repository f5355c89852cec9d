//! Sketch Builder
//!
//! Fluent accumulation of drawing features and the build pass that replays
//! them against a document: find or create the target object, clear stale
//! constraints and geometry on reuse, replay every feature strictly in
//! insertion order against a fresh context, then trigger a recompute.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sketch_model::Document;

use crate::context::BuilderContext;
use crate::feature::{BSplineFeature, CircleFeature, Feature, LineFeature, MoveFeature};
use crate::{BuildError, BuildResult};

/// Object type tag used for sketch objects in the document
pub const SKETCH_OBJECT_TYPE: &str = "Sketch";

/// Fluent builder for a parametric sketch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SketchBuilder {
    /// Object type the builder resolves and creates
    object_type: String,
    /// Cursor start point for each build pass
    start: Vec2,
    /// Accumulated features in insertion order
    features: Vec<Feature>,
}

impl SketchBuilder {
    /// Create a builder with the cursor starting at the given point
    pub fn new(start_x: f32, start_y: f32) -> Self {
        Self {
            object_type: SKETCH_OBJECT_TYPE.into(),
            start: Vec2::new(start_x, start_y),
            features: Vec::new(),
        }
    }

    /// Get the accumulated features
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    // ============== Feature Accumulation ==============

    /// Move the cursor to an absolute position
    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.features
            .push(Feature::Move(MoveFeature::new(Vec2::new(x, y))));
        self
    }

    /// Draw a line from the cursor covering the given offset
    pub fn line(&mut self, add_x: f32, add_y: f32) -> &mut LineFeature {
        self.features
            .push(Feature::Line(LineFeature::new(Vec2::new(add_x, add_y))));
        match self.features.last_mut() {
            Some(Feature::Line(line)) => line,
            _ => unreachable!(),
        }
    }

    /// Draw a horizontal line, constrained horizontal with a fixed width
    ///
    /// Use [`SketchBuilder::line`] directly to skip the distance constraint.
    pub fn horizontal_line(&mut self, add_x: f32) -> &mut LineFeature {
        let line = self.line(add_x, 0.0);
        line.horizontal();
        line.distance_x(add_x);
        line
    }

    /// Draw a vertical line, constrained vertical with a fixed height
    pub fn vertical_line(&mut self, add_y: f32) -> &mut LineFeature {
        let line = self.line(0.0, add_y);
        line.vertical();
        line.distance_y(add_y);
        line
    }

    /// Place a circle at a fixed center, leaving the cursor untouched
    pub fn circle(&mut self, x: f32, y: f32, radius: f32) -> &mut CircleFeature {
        self.features
            .push(Feature::Circle(CircleFeature::new(Vec2::new(x, y), radius)));
        match self.features.last_mut() {
            Some(Feature::Circle(circle)) => circle,
            _ => unreachable!(),
        }
    }

    /// Start a B-spline; add control points via [`BSplineFeature::point`]
    pub fn bspline(&mut self) -> &mut BSplineFeature {
        self.features.push(Feature::BSpline(BSplineFeature::new()));
        match self.features.last_mut() {
            Some(Feature::BSpline(spline)) => spline,
            _ => unreachable!(),
        }
    }

    // ============== Build ==============

    /// Replay the accumulated features into the named object
    ///
    /// Exactly one existing object of the builder's type and name is reused
    /// after a full reset; zero or ambiguous matches fall through to a fresh
    /// object. There is no rollback: a failing feature leaves the object
    /// partially rebuilt.
    pub fn build(mut self, document: &mut Document, name: &str) -> BuildResult<Uuid> {
        let candidates = document.find_objects(&self.object_type, name);
        let object_id = match candidates.as_slice() {
            [id] => {
                let object = document
                    .object_mut(*id)
                    .ok_or(BuildError::ObjectVanished(*id))?;
                // Constraints reference geometry by index, so they go first.
                object.clear_constraints();
                object.clear_geometry()?;
                *id
            }
            [] => document.create_object(&self.object_type, name),
            _ => {
                // Ambiguous lookups are not an error: none of the candidates
                // is a safe rebuild target, so a fresh object is created.
                tracing::warn!(
                    name,
                    candidates = candidates.len(),
                    "ambiguous rebuild lookup, creating a new object"
                );
                document.create_object(&self.object_type, name)
            }
        };

        let mut context = BuilderContext::new(self.start);
        let object = document
            .object_mut(object_id)
            .ok_or(BuildError::ObjectVanished(object_id))?;

        for feature in &mut self.features {
            feature.apply(object, &mut context)?;
        }

        document.recompute();

        Ok(object_id)
    }
}
