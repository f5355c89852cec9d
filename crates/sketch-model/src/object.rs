//! Sketch Objects
//!
//! A sketch object owns an ordered geometry list and the constraint records
//! referencing it. Geometry indices are assigned by insertion order and are
//! the sole addressing scheme for constraints, so entries are never
//! reordered or removed individually; the only reset is a full clear.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constraint::{ConstraintRecord, GeometryIndex};
use crate::geometry::{Geometry, GeometryEntry};
use crate::{ModelError, ModelResult};

/// A named, typed object holding sketch geometry and constraints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SketchObject {
    /// Unique identifier
    pub id: Uuid,
    /// Object type tag used for lookup
    pub object_type: String,
    /// Name of the object
    pub name: String,
    /// Committed geometry entries in insertion order
    geometry: Vec<GeometryEntry>,
    /// Constraint records in insertion order
    constraints: Vec<ConstraintRecord>,
}

impl SketchObject {
    /// Create a new empty object
    pub fn new(object_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            object_type: object_type.into(),
            name: name.into(),
            geometry: Vec::new(),
            constraints: Vec::new(),
        }
    }

    // ============== Geometry ==============

    /// Append a geometry entry and return its index
    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryIndex {
        self.geometry.push(GeometryEntry::new(geometry));
        (self.geometry.len() - 1) as GeometryIndex
    }

    /// Get all geometry entries
    pub fn geometry(&self) -> &[GeometryEntry] {
        &self.geometry
    }

    /// Get a geometry entry by index
    pub fn entry(&self, index: GeometryIndex) -> Option<&GeometryEntry> {
        usize::try_from(index).ok().and_then(|i| self.geometry.get(i))
    }

    /// Flip an entry's construction flag
    pub fn toggle_construction(&mut self, index: GeometryIndex) -> ModelResult<()> {
        let len = self.geometry.len();
        let entry = usize::try_from(index)
            .ok()
            .and_then(|i| self.geometry.get_mut(i))
            .ok_or(ModelError::GeometryOutOfRange { index, len })?;

        entry.construction = !entry.construction;
        Ok(())
    }

    /// Remove all geometry entries
    ///
    /// Rejected while constraint records still exist, since they reference
    /// geometry by index; clear constraints first.
    pub fn clear_geometry(&mut self) -> ModelResult<()> {
        if !self.constraints.is_empty() {
            return Err(ModelError::ConstraintsRemain {
                count: self.constraints.len(),
            });
        }

        self.geometry.clear();
        Ok(())
    }

    // ============== Constraints ==============

    /// Append a constraint record
    pub fn add_constraint(&mut self, record: ConstraintRecord) {
        self.constraints.push(record);
    }

    /// Get all constraint records
    pub fn constraints(&self) -> &[ConstraintRecord] {
        &self.constraints
    }

    /// Remove all constraint records
    pub fn clear_constraints(&mut self) {
        self.constraints.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::{GeoRef, PointPos};
    use glam::Vec2;

    #[test]
    fn test_geometry_indices_follow_insertion_order() {
        let mut object = SketchObject::new("Sketch", "Test");

        let a = object.add_geometry(Geometry::line_segment(Vec2::ZERO, Vec2::X));
        let b = object.add_geometry(Geometry::circle(Vec2::ZERO, 1.0));
        let c = object.add_geometry(Geometry::line_segment(Vec2::X, Vec2::Y));

        assert_eq!((a, b, c), (0, 1, 2));
        assert_eq!(object.geometry().len(), 3);
    }

    #[test]
    fn test_clear_geometry_rejected_while_constrained() {
        let mut object = SketchObject::new("Sketch", "Test");
        let index = object.add_geometry(Geometry::circle(Vec2::ZERO, 1.0));
        object.add_constraint(ConstraintRecord::radius(index, 1.0));

        assert!(matches!(
            object.clear_geometry(),
            Err(ModelError::ConstraintsRemain { count: 1 })
        ));

        object.clear_constraints();
        object.clear_geometry().unwrap();
        assert!(object.geometry().is_empty());
    }

    #[test]
    fn test_toggle_construction() {
        let mut object = SketchObject::new("Sketch", "Test");
        let index = object.add_geometry(Geometry::line_segment(Vec2::ZERO, Vec2::X));

        object.toggle_construction(index).unwrap();
        assert!(object.entry(index).unwrap().construction);

        object.toggle_construction(index).unwrap();
        assert!(!object.entry(index).unwrap().construction);

        assert!(matches!(
            object.toggle_construction(5),
            Err(ModelError::GeometryOutOfRange { index: 5, len: 1 })
        ));
    }

    #[test]
    fn test_constraint_records_kept_in_order() {
        let mut object = SketchObject::new("Sketch", "Test");
        let line = object.add_geometry(Geometry::line_segment(Vec2::ZERO, Vec2::X));

        let start = GeoRef::new(line, PointPos::Start);
        let end = GeoRef::new(line, PointPos::End);
        object.add_constraint(ConstraintRecord::horizontal(start, end));
        object.add_constraint(ConstraintRecord::distance_x(start, end, 1.0));

        let kinds: Vec<_> = object.constraints().iter().map(|c| c.kind_name()).collect();
        assert_eq!(kinds, vec!["Horizontal", "DistanceX"]);
    }
}
