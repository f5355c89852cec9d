//! Fluent Parametric Sketch Builder
//!
//! This crate provides:
//! - A fluent builder accumulating drawing operations (move, line, circle,
//!   B-spline through marker points) with attached constraints
//! - A replay context threading the cursor position and geometry index
//!   counter through feature application
//! - Late-bound cross-feature constraint references, resolved against the
//!   indices assigned during replay
//! - Find-or-create rebuild against a sketch document, clearing stale
//!   constraints and geometry before replaying

pub mod builder;
pub mod constraint;
pub mod context;
pub mod feature;

// Re-exports for convenience
pub use builder::{SKETCH_OBJECT_TYPE, SketchBuilder};
pub use constraint::{Constraint, PointAnchor};
pub use context::BuilderContext;
pub use feature::{
    BSplineFeature, CONTROL_MARKER_RADIUS, CircleFeature, Feature, LineFeature, MoveFeature,
};

use thiserror::Error;
use uuid::Uuid;

/// Build-related errors
#[derive(Debug, Clone, Error)]
pub enum BuildError {
    #[error("Constraint references feature {feature} before it has been applied")]
    UnresolvedReference { feature: Uuid },

    #[error("Feature {feature} has already been applied; rebuilding needs a fresh builder")]
    AlreadyApplied { feature: Uuid },

    #[error("{constraint} constraint needs a second anchor point")]
    MissingAnchor { constraint: &'static str },

    #[error("Sketch object {0} disappeared during build")]
    ObjectVanished(Uuid),

    #[error("Document model error: {0}")]
    Model(#[from] sketch_model::ModelError),
}

/// Result type for build operations
pub type BuildResult<T> = Result<T, BuildError>;
