//! In-Memory Sketch Document Model
//!
//! This crate provides the document side of the sketch builder system:
//! - Named documents holding typed, named sketch objects
//! - Ordered geometry lists (line segments, circles, B-splines) addressed
//!   by insertion index
//! - Constraint records referencing geometry by index plus a point sub-index
//! - Reset hooks (clear constraints, clear geometry) and a recompute trigger

pub mod constraint;
pub mod document;
pub mod geometry;
pub mod object;

// Re-exports for convenience
pub use constraint::{ConstraintRecord, GeoRef, GeometryIndex, ORIGIN_INDEX, PointPos};
pub use document::Document;
pub use geometry::{Geometry, GeometryEntry};
pub use object::SketchObject;

use thiserror::Error;

/// Document model errors
#[derive(Debug, Clone, Error)]
pub enum ModelError {
    #[error("Geometry index {index} out of range (object holds {len} entries)")]
    GeometryOutOfRange { index: GeometryIndex, len: usize },

    #[error("Cannot clear geometry while {count} constraint(s) still reference it")]
    ConstraintsRemain { count: usize },
}

/// Result type for document model operations
pub type ModelResult<T> = Result<T, ModelError>;
