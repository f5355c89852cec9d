//! Drawing Features
//!
//! A feature is one unit of drawing work accumulated by the builder: move
//! the cursor, draw a line, place a circle, or interpolate a B-spline
//! through marker circles. Applying a feature mutates the shared context
//! and appends geometry and constraint records to the target object.
//!
//! Application order is the correctness-critical invariant: each
//! geometry-producing feature claims the next index from the context, so
//! features must be replayed exactly in insertion order with no skips.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sketch_model::{GeoRef, Geometry, GeometryIndex, PointPos, SketchObject};

use crate::constraint::{Constraint, PointAnchor};
use crate::context::BuilderContext;
use crate::{BuildError, BuildResult};

/// Radius of the construction circles marking B-spline control points
pub const CONTROL_MARKER_RADIUS: f32 = 10.0;

/// One unit of drawing work
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Feature {
    /// Set the cursor to an absolute position
    Move(MoveFeature),
    /// Draw a line from the cursor
    Line(LineFeature),
    /// Place a circle at a fixed center
    Circle(CircleFeature),
    /// Interpolate a B-spline through marker circles
    BSpline(BSplineFeature),
}

impl Feature {
    /// Get the unique ID of this feature
    pub fn id(&self) -> Uuid {
        match self {
            Feature::Move(f) => f.id,
            Feature::Line(f) => f.id,
            Feature::Circle(f) => f.id,
            Feature::BSpline(f) => f.id,
        }
    }

    /// Get the type name of this feature
    pub fn type_name(&self) -> &'static str {
        match self {
            Feature::Move(_) => "Move",
            Feature::Line(_) => "Line",
            Feature::Circle(_) => "Circle",
            Feature::BSpline(_) => "BSpline",
        }
    }

    /// Get the geometry index assigned during replay, if applied
    pub fn geometry_index(&self) -> Option<GeometryIndex> {
        match self {
            Feature::Move(_) => None,
            Feature::Line(f) => f.geometry_index,
            Feature::Circle(f) => f.geometry_index,
            Feature::BSpline(f) => f.geometry_index,
        }
    }

    /// Apply this feature to the target object and context
    pub fn apply(&mut self, object: &mut SketchObject, ctx: &mut BuilderContext) -> BuildResult<()> {
        match self {
            Feature::Move(f) => {
                f.apply(ctx);
                Ok(())
            }
            Feature::Line(f) => f.apply(object, ctx),
            Feature::Circle(f) => f.apply(object, ctx),
            Feature::BSpline(f) => f.apply(object, ctx),
        }
    }
}

/// Cursor move to an absolute position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveFeature {
    /// Unique identifier
    pub id: Uuid,
    /// Target position
    target: Vec2,
}

impl MoveFeature {
    /// Create a move to the given absolute position
    pub fn new(target: Vec2) -> Self {
        Self {
            id: Uuid::new_v4(),
            target,
        }
    }

    fn apply(&self, ctx: &mut BuilderContext) {
        // Absolute, not cursor-relative.
        ctx.move_to(self.target);
    }
}

/// A line from the cursor to cursor + delta
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineFeature {
    /// Unique identifier
    pub id: Uuid,
    /// Offset from the cursor to the line end
    delta: Vec2,
    /// Constraints applied after the geometry is committed
    constraints: Vec<Constraint>,
    /// Whether the line is construction geometry
    construction: bool,
    /// Index assigned during replay (write-once)
    geometry_index: Option<GeometryIndex>,
}

impl LineFeature {
    /// Create a line covering the given cursor offset
    pub fn new(delta: Vec2) -> Self {
        Self {
            id: Uuid::new_v4(),
            delta,
            constraints: Vec::new(),
            construction: false,
            geometry_index: None,
        }
    }

    /// Get the geometry index assigned during replay, if applied
    pub fn geometry_index(&self) -> Option<GeometryIndex> {
        self.geometry_index
    }

    // ============== Fluent Constraint Attachment ==============

    /// Constrain the line to be horizontal
    pub fn horizontal(&mut self) -> &mut Self {
        self.constraints.push(Constraint::Horizontal);
        self
    }

    /// Constrain the line to be vertical
    pub fn vertical(&mut self) -> &mut Self {
        self.constraints.push(Constraint::Vertical);
        self
    }

    /// Constrain the endpoints to be symmetric about the origin
    pub fn symmetric_to_origin(&mut self) -> &mut Self {
        self.constraints.push(Constraint::Symmetric {
            reference: GeoRef::ORIGIN,
        });
        self
    }

    /// Constrain the start point to coincide with the origin
    pub fn coincident_to_origin(&mut self) -> &mut Self {
        self.constraints.push(Constraint::Coincident {
            other: PointAnchor::Literal(GeoRef::ORIGIN),
        });
        self
    }

    /// Constrain the start point to coincide with a point on another feature
    pub fn coincident(&mut self, feature: Uuid, pos: PointPos) -> &mut Self {
        self.constraints.push(Constraint::Coincident {
            other: PointAnchor::Feature { feature, pos },
        });
        self
    }

    /// Fix the horizontal distance between the endpoints
    pub fn distance_x(&mut self, distance: f32) -> &mut Self {
        self.constraints.push(Constraint::DistanceX { distance });
        self
    }

    /// Fix the vertical distance between the endpoints
    pub fn distance_y(&mut self, distance: f32) -> &mut Self {
        self.constraints.push(Constraint::DistanceY { distance });
        self
    }

    /// Mark the line as construction geometry
    pub fn construction(&mut self) -> &mut Self {
        self.construction = true;
        self
    }

    fn apply(&mut self, object: &mut SketchObject, ctx: &mut BuilderContext) -> BuildResult<()> {
        if self.geometry_index.is_some() {
            return Err(BuildError::AlreadyApplied { feature: self.id });
        }

        let (start, end) = ctx.add(self.delta);
        object.add_geometry(Geometry::line_segment(start, end));
        let index = ctx.next_index(self.id);
        self.geometry_index = Some(index);

        for constraint in &self.constraints {
            constraint.apply(
                object,
                ctx,
                GeoRef::new(index, PointPos::Start),
                Some(GeoRef::new(index, PointPos::End)),
            )?;
        }

        if self.construction {
            object.toggle_construction(index)?;
        }

        Ok(())
    }
}

/// A circle at a fixed center
///
/// Placing a circle does not consume or advance the cursor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircleFeature {
    /// Unique identifier
    pub id: Uuid,
    /// Center point
    center: Vec2,
    /// Radius
    radius: f32,
    /// Constraints applied after the geometry is committed
    constraints: Vec<Constraint>,
    /// Whether the circle is construction geometry
    construction: bool,
    /// Index assigned during replay (write-once)
    geometry_index: Option<GeometryIndex>,
}

impl CircleFeature {
    /// Create a circle at the given center and radius
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius,
            constraints: Vec::new(),
            construction: false,
            geometry_index: None,
        }
    }

    /// Get the center point
    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Get the geometry index assigned during replay, if applied
    pub fn geometry_index(&self) -> Option<GeometryIndex> {
        self.geometry_index
    }

    // ============== Fluent Constraint Attachment ==============

    /// Fix the circle's radius with a dimensional constraint
    pub fn constrain_radius(&mut self) -> &mut Self {
        self.constraints.push(Constraint::Radius {
            radius: self.radius,
        });
        self
    }

    /// Constrain the circle to coincide with the origin
    pub fn coincident_to_origin(&mut self) -> &mut Self {
        self.constraints.push(Constraint::Coincident {
            other: PointAnchor::Literal(GeoRef::ORIGIN),
        });
        self
    }

    /// Constrain the circle to coincide with a point on another feature
    pub fn coincident(&mut self, feature: Uuid, pos: PointPos) -> &mut Self {
        self.constraints.push(Constraint::Coincident {
            other: PointAnchor::Feature { feature, pos },
        });
        self
    }

    /// Mark the circle as construction geometry
    pub fn construction(&mut self) -> &mut Self {
        self.construction = true;
        self
    }

    fn apply(&mut self, object: &mut SketchObject, ctx: &mut BuilderContext) -> BuildResult<()> {
        if self.geometry_index.is_some() {
            return Err(BuildError::AlreadyApplied { feature: self.id });
        }

        object.add_geometry(Geometry::circle(self.center, self.radius));
        let index = ctx.next_index(self.id);
        self.geometry_index = Some(index);

        for constraint in &self.constraints {
            constraint.apply(object, ctx, GeoRef::new(index, PointPos::Edge), None)?;
        }

        if self.construction {
            object.toggle_construction(index)?;
        }

        Ok(())
    }
}

/// A B-spline interpolated through marker circles
///
/// Each control point is a fixed-radius construction circle with a radius
/// constraint, modeling a draggable, non-solid marker. On application every
/// marker is committed first (claiming its own index and recording its
/// center), then one degree-3 non-periodic spline over the centers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BSplineFeature {
    /// Unique identifier
    pub id: Uuid,
    /// Control-point markers in interpolation order
    points: Vec<CircleFeature>,
    /// Index assigned to the spline itself during replay (write-once)
    geometry_index: Option<GeometryIndex>,
}

impl Default for BSplineFeature {
    fn default() -> Self {
        Self::new()
    }
}

impl BSplineFeature {
    /// Create an empty spline
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            points: Vec::new(),
            geometry_index: None,
        }
    }

    /// Get the geometry index assigned during replay, if applied
    pub fn geometry_index(&self) -> Option<GeometryIndex> {
        self.geometry_index
    }

    /// Get the control-point markers
    pub fn points(&self) -> &[CircleFeature] {
        &self.points
    }

    /// Append a control point at the given position
    ///
    /// Returns the marker circle so a coincident reference to another
    /// feature can be chained onto it.
    pub fn point(&mut self, x: f32, y: f32) -> &mut CircleFeature {
        let mut marker = CircleFeature::new(Vec2::new(x, y), CONTROL_MARKER_RADIUS);
        marker.constrain_radius();
        marker.construction();

        let slot = self.points.len();
        self.points.push(marker);
        &mut self.points[slot]
    }

    fn apply(&mut self, object: &mut SketchObject, ctx: &mut BuilderContext) -> BuildResult<()> {
        if self.geometry_index.is_some() {
            return Err(BuildError::AlreadyApplied { feature: self.id });
        }

        let mut poles = Vec::with_capacity(self.points.len());
        for marker in &mut self.points {
            marker.apply(object, ctx)?;
            poles.push(marker.center);
        }

        object.add_geometry(Geometry::bspline_through(poles));
        self.geometry_index = Some(ctx.next_index(self.id));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sketch_model::ConstraintRecord;

    fn apply(feature: &mut Feature, object: &mut SketchObject, ctx: &mut BuilderContext) {
        feature.apply(object, ctx).unwrap();
    }

    #[test]
    fn test_line_advances_cursor_and_claims_index() {
        let mut object = SketchObject::new("Sketch", "Test");
        let mut ctx = BuilderContext::new(Vec2::new(1.0, 1.0));

        let mut line = Feature::Line(LineFeature::new(Vec2::new(3.0, 0.0)));
        apply(&mut line, &mut object, &mut ctx);

        assert_eq!(line.geometry_index(), Some(0));
        assert_relative_eq!(ctx.cursor().x, 4.0);
        assert_relative_eq!(ctx.cursor().y, 1.0);

        let entry = object.entry(0).unwrap();
        assert_eq!(
            entry.geometry,
            Geometry::line_segment(Vec2::new(1.0, 1.0), Vec2::new(4.0, 1.0))
        );
    }

    #[test]
    fn test_line_constraints_use_endpoint_anchors() {
        let mut object = SketchObject::new("Sketch", "Test");
        let mut ctx = BuilderContext::new(Vec2::ZERO);

        let mut inner = LineFeature::new(Vec2::new(10.0, 0.0));
        inner.horizontal().distance_x(10.0).construction();
        let mut line = Feature::Line(inner);
        apply(&mut line, &mut object, &mut ctx);

        let start = GeoRef::new(0, PointPos::Start);
        let end = GeoRef::new(0, PointPos::End);
        assert_eq!(
            object.constraints(),
            &[
                ConstraintRecord::horizontal(start, end),
                ConstraintRecord::distance_x(start, end, 10.0),
            ]
        );
        assert!(object.entry(0).unwrap().construction);
    }

    #[test]
    fn test_circle_leaves_cursor_untouched() {
        let mut object = SketchObject::new("Sketch", "Test");
        let mut ctx = BuilderContext::new(Vec2::new(7.0, 7.0));

        let mut circle = Feature::Circle(CircleFeature::new(Vec2::new(0.0, 0.0), 5.0));
        apply(&mut circle, &mut object, &mut ctx);

        assert_eq!(ctx.cursor(), Vec2::new(7.0, 7.0));
        assert_eq!(circle.geometry_index(), Some(0));
    }

    #[test]
    fn test_move_sets_absolute_position() {
        let mut object = SketchObject::new("Sketch", "Test");
        let mut ctx = BuilderContext::new(Vec2::new(50.0, 50.0));

        let mut feature = Feature::Move(MoveFeature::new(Vec2::new(2.0, 3.0)));
        apply(&mut feature, &mut object, &mut ctx);

        assert_eq!(ctx.cursor(), Vec2::new(2.0, 3.0));
        assert_eq!(feature.geometry_index(), None);
        assert!(object.geometry().is_empty());
    }

    #[test]
    fn test_reapplying_a_feature_is_rejected() {
        let mut object = SketchObject::new("Sketch", "Test");
        let mut ctx = BuilderContext::new(Vec2::ZERO);

        let mut line = Feature::Line(LineFeature::new(Vec2::X));
        apply(&mut line, &mut object, &mut ctx);

        let result = line.apply(&mut object, &mut ctx);
        assert!(matches!(result, Err(BuildError::AlreadyApplied { .. })));
    }

    #[test]
    fn test_bspline_markers_precede_the_curve() {
        let mut object = SketchObject::new("Sketch", "Test");
        let mut ctx = BuilderContext::new(Vec2::ZERO);

        let mut inner = BSplineFeature::new();
        inner.point(0.0, 0.0);
        inner.point(5.0, 5.0);
        inner.point(10.0, 0.0);
        let mut spline = Feature::BSpline(inner);
        apply(&mut spline, &mut object, &mut ctx);

        // Three marker circles then the curve itself.
        assert_eq!(object.geometry().len(), 4);
        assert_eq!(spline.geometry_index(), Some(3));

        for index in 0..3 {
            let entry = object.entry(index).unwrap();
            assert_eq!(entry.geometry.type_name(), "Circle");
            assert!(entry.construction);
        }

        let Geometry::BSpline {
            poles,
            degree,
            periodic,
        } = &object.entry(3).unwrap().geometry
        else {
            panic!("expected a BSpline entry");
        };
        assert_eq!(
            poles,
            &[Vec2::new(0.0, 0.0), Vec2::new(5.0, 5.0), Vec2::new(10.0, 0.0)]
        );
        assert_eq!(*degree, 3);
        assert!(!periodic);

        // Every marker carries its fixed-radius constraint.
        let radius_records = object
            .constraints()
            .iter()
            .filter(|c| matches!(c, ConstraintRecord::Radius { radius, .. } if *radius == CONTROL_MARKER_RADIUS))
            .count();
        assert_eq!(radius_records, 3);
    }
}
