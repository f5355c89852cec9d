//! Sketch Geometry Primitives
//!
//! Defines the geometric primitives a sketch object can hold. Entries are
//! stored in insertion order; constraints refer to them by that index.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A geometric primitive in a sketch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// A straight segment between two points
    LineSegment {
        /// Start point
        start: Vec2,
        /// End point
        end: Vec2,
    },

    /// A full circle
    Circle {
        /// Center point
        center: Vec2,
        /// Radius
        radius: f32,
    },

    /// A B-spline curve over an ordered list of poles
    BSpline {
        /// Interpolation poles in order
        poles: Vec<Vec2>,
        /// Curve degree
        degree: u32,
        /// Whether the curve closes back on itself
        periodic: bool,
    },
}

impl Geometry {
    /// Create a line segment
    pub fn line_segment(start: Vec2, end: Vec2) -> Self {
        Geometry::LineSegment { start, end }
    }

    /// Create a circle
    pub fn circle(center: Vec2, radius: f32) -> Self {
        Geometry::Circle { center, radius }
    }

    /// Create a non-periodic, degree-3 B-spline interpolating the given points
    pub fn bspline_through(points: Vec<Vec2>) -> Self {
        Geometry::BSpline {
            poles: points,
            degree: 3,
            periodic: false,
        }
    }

    /// Get the type name of this primitive
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::LineSegment { .. } => "LineSegment",
            Geometry::Circle { .. } => "Circle",
            Geometry::BSpline { .. } => "BSpline",
        }
    }
}

/// One committed geometry entry in a sketch object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryEntry {
    /// The geometric primitive
    pub geometry: Geometry,
    /// Whether the entry is construction geometry (non-solid scaffolding)
    pub construction: bool,
}

impl GeometryEntry {
    /// Wrap a primitive as a regular (non-construction) entry
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            construction: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bspline_through() {
        let points = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 2.0), Vec2::new(3.0, 0.0)];
        let spline = Geometry::bspline_through(points.clone());

        let Geometry::BSpline {
            poles,
            degree,
            periodic,
        } = spline
        else {
            panic!("expected a BSpline");
        };

        assert_eq!(poles, points);
        assert_eq!(degree, 3);
        assert!(!periodic);
    }

    #[test]
    fn test_entry_defaults_to_solid() {
        let entry = GeometryEntry::new(Geometry::circle(Vec2::ZERO, 5.0));
        assert!(!entry.construction);
        assert_eq!(entry.geometry.type_name(), "Circle");
    }
}
