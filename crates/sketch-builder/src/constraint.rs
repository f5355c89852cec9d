//! Builder Constraints
//!
//! Declarative constraints attached to features before a build. Applying a
//! constraint writes one record into the target object, resolving any
//! cross-feature reference against the indices the context assigned during
//! replay. References to a feature that has not been applied yet fail
//! loudly instead of writing a dangling index.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sketch_model::{ConstraintRecord, GeoRef, PointPos, SketchObject};

use crate::context::BuilderContext;
use crate::{BuildError, BuildResult};

/// A reference to a point used by relational constraints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointAnchor {
    /// A literal geometry reference, known when the constraint is built
    Literal(GeoRef),

    /// A point on another feature, resolved when the constraint is applied
    Feature {
        /// Id of the referenced feature
        feature: Uuid,
        /// Point sub-index on that feature's geometry
        pos: PointPos,
    },
}

impl PointAnchor {
    fn resolve(&self, ctx: &BuilderContext) -> BuildResult<GeoRef> {
        match self {
            PointAnchor::Literal(geo_ref) => Ok(*geo_ref),
            PointAnchor::Feature { feature, pos } => {
                let index = ctx
                    .resolve(*feature)
                    .ok_or(BuildError::UnresolvedReference { feature: *feature })?;
                Ok(GeoRef::new(index, *pos))
            }
        }
    }
}

/// One geometric relation attached to a feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Constraint {
    /// The feature's anchor points are horizontally aligned
    Horizontal,

    /// The feature's anchor points are vertically aligned
    Vertical,

    /// The feature's anchor points are symmetric about a reference point
    Symmetric {
        /// Symmetry reference point
        reference: GeoRef,
    },

    /// The feature's first anchor coincides with another point
    Coincident {
        /// The other point
        other: PointAnchor,
    },

    /// Horizontal distance between the feature's anchor points
    DistanceX {
        /// Required distance
        distance: f32,
    },

    /// Vertical distance between the feature's anchor points
    DistanceY {
        /// Required distance
        distance: f32,
    },

    /// Radius of the feature's circle
    Radius {
        /// Required radius
        radius: f32,
    },
}

impl Constraint {
    /// Get the kind name of this constraint
    pub fn kind_name(&self) -> &'static str {
        match self {
            Constraint::Horizontal => "Horizontal",
            Constraint::Vertical => "Vertical",
            Constraint::Symmetric { .. } => "Symmetric",
            Constraint::Coincident { .. } => "Coincident",
            Constraint::DistanceX { .. } => "DistanceX",
            Constraint::DistanceY { .. } => "DistanceY",
            Constraint::Radius { .. } => "Radius",
        }
    }

    /// Write this constraint into the target object
    ///
    /// `first` and `second` are the applying feature's default anchors:
    /// line start/end, or the circle edge with no second anchor.
    pub fn apply(
        &self,
        object: &mut SketchObject,
        ctx: &BuilderContext,
        first: GeoRef,
        second: Option<GeoRef>,
    ) -> BuildResult<()> {
        match self {
            Constraint::Horizontal => {
                let second = self.require_second(second)?;
                object.add_constraint(ConstraintRecord::horizontal(first, second));
            }
            Constraint::Vertical => {
                let second = self.require_second(second)?;
                object.add_constraint(ConstraintRecord::vertical(first, second));
            }
            Constraint::Symmetric { reference } => {
                let second = self.require_second(second)?;
                object.add_constraint(ConstraintRecord::symmetric(first, second, *reference));
            }
            Constraint::Coincident { other } => {
                // Referenced point first, the applying feature's anchor second.
                let referenced = other.resolve(ctx)?;
                object.add_constraint(ConstraintRecord::coincident(referenced, first));
            }
            Constraint::DistanceX { distance } => {
                let second = self.require_second(second)?;
                object.add_constraint(ConstraintRecord::distance_x(first, second, *distance));
            }
            Constraint::DistanceY { distance } => {
                let second = self.require_second(second)?;
                object.add_constraint(ConstraintRecord::distance_y(first, second, *distance));
            }
            Constraint::Radius { radius } => {
                object.add_constraint(ConstraintRecord::radius(first.index, *radius));
            }
        }

        Ok(())
    }

    fn require_second(&self, second: Option<GeoRef>) -> BuildResult<GeoRef> {
        second.ok_or(BuildError::MissingAnchor {
            constraint: self.kind_name(),
        })
    }
}
