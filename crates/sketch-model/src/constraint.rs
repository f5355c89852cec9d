//! Constraint Records
//!
//! Defines the constraint records a sketch object stores and the index
//! conventions they use. Geometry is referenced by its insertion index plus
//! a point sub-index: line start = 1, line end = 2, circle edge = 3. The
//! document's origin point is the external index -1 with sub-index 1.

use serde::{Deserialize, Serialize};

/// Position of a committed geometry entry within a sketch object
pub type GeometryIndex = i32;

/// External geometry index of the document origin
pub const ORIGIN_INDEX: GeometryIndex = -1;

/// Point sub-index on a geometry entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointPos {
    /// Start point of a line segment
    Start = 1,
    /// End point of a line segment
    End = 2,
    /// Boundary of a circle
    Edge = 3,
}

impl PointPos {
    /// Numeric sub-index as used in constraint records
    pub fn as_index(self) -> i32 {
        self as i32
    }
}

/// A reference to one point on a geometry entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeoRef {
    /// Geometry entry index
    pub index: GeometryIndex,
    /// Point sub-index on that entry
    pub pos: PointPos,
}

impl GeoRef {
    /// The document origin point
    pub const ORIGIN: GeoRef = GeoRef {
        index: ORIGIN_INDEX,
        pos: PointPos::Start,
    };

    /// Create a new geometry reference
    pub fn new(index: GeometryIndex, pos: PointPos) -> Self {
        Self { index, pos }
    }
}

/// A constraint record stored in a sketch object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConstraintRecord {
    /// Two points are horizontally aligned
    Horizontal {
        /// First point
        first: GeoRef,
        /// Second point
        second: GeoRef,
    },

    /// Two points are vertically aligned
    Vertical {
        /// First point
        first: GeoRef,
        /// Second point
        second: GeoRef,
    },

    /// Two points are symmetric about a reference point
    Symmetric {
        /// First point
        first: GeoRef,
        /// Second point
        second: GeoRef,
        /// Symmetry reference point
        reference: GeoRef,
    },

    /// Two points are at the same location
    Coincident {
        /// First point
        first: GeoRef,
        /// Second point
        second: GeoRef,
    },

    /// Horizontal distance between two points
    DistanceX {
        /// First point
        first: GeoRef,
        /// Second point
        second: GeoRef,
        /// Required distance
        distance: f32,
    },

    /// Vertical distance between two points
    DistanceY {
        /// First point
        first: GeoRef,
        /// Second point
        second: GeoRef,
        /// Required distance
        distance: f32,
    },

    /// Radius of a circle
    Radius {
        /// Circle entry index
        circle: GeometryIndex,
        /// Required radius
        radius: f32,
    },
}

impl ConstraintRecord {
    /// Get the kind name of this record
    pub fn kind_name(&self) -> &'static str {
        match self {
            ConstraintRecord::Horizontal { .. } => "Horizontal",
            ConstraintRecord::Vertical { .. } => "Vertical",
            ConstraintRecord::Symmetric { .. } => "Symmetric",
            ConstraintRecord::Coincident { .. } => "Coincident",
            ConstraintRecord::DistanceX { .. } => "DistanceX",
            ConstraintRecord::DistanceY { .. } => "DistanceY",
            ConstraintRecord::Radius { .. } => "Radius",
        }
    }

    /// Get all geometry indices referenced by this record
    pub fn referenced_indices(&self) -> Vec<GeometryIndex> {
        match self {
            ConstraintRecord::Horizontal { first, second }
            | ConstraintRecord::Vertical { first, second }
            | ConstraintRecord::Coincident { first, second }
            | ConstraintRecord::DistanceX { first, second, .. }
            | ConstraintRecord::DistanceY { first, second, .. } => {
                vec![first.index, second.index]
            }
            ConstraintRecord::Symmetric {
                first,
                second,
                reference,
            } => vec![first.index, second.index, reference.index],
            ConstraintRecord::Radius { circle, .. } => vec![*circle],
        }
    }

    /// Check if this record references a specific geometry index
    pub fn references_index(&self, index: GeometryIndex) -> bool {
        self.referenced_indices().contains(&index)
    }

    // ============== Factory Methods ==============

    /// Create a horizontal constraint
    pub fn horizontal(first: GeoRef, second: GeoRef) -> Self {
        ConstraintRecord::Horizontal { first, second }
    }

    /// Create a vertical constraint
    pub fn vertical(first: GeoRef, second: GeoRef) -> Self {
        ConstraintRecord::Vertical { first, second }
    }

    /// Create a symmetry constraint about a reference point
    pub fn symmetric(first: GeoRef, second: GeoRef, reference: GeoRef) -> Self {
        ConstraintRecord::Symmetric {
            first,
            second,
            reference,
        }
    }

    /// Create a coincident constraint
    pub fn coincident(first: GeoRef, second: GeoRef) -> Self {
        ConstraintRecord::Coincident { first, second }
    }

    /// Create a horizontal distance constraint
    pub fn distance_x(first: GeoRef, second: GeoRef, distance: f32) -> Self {
        ConstraintRecord::DistanceX {
            first,
            second,
            distance,
        }
    }

    /// Create a vertical distance constraint
    pub fn distance_y(first: GeoRef, second: GeoRef, distance: f32) -> Self {
        ConstraintRecord::DistanceY {
            first,
            second,
            distance,
        }
    }

    /// Create a radius constraint
    pub fn radius(circle: GeometryIndex, radius: f32) -> Self {
        ConstraintRecord::Radius { circle, radius }
    }
}
