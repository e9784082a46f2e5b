//! Errors surfaced by the measurement edge of the solid kernel

use crate::float_types::Real;
use nalgebra::Point3;

/// Failures when deriving measured quantities (mass, volume) from a solid.
///
/// Boolean evaluation itself is total and never reports through this type;
/// only the triangle-mesh measurement path can refuse its input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// The solid has no polygons to triangulate or measure.
    #[error("solid has no polygons to measure")]
    EmptySolid,
    /// A vertex coordinate is NaN or infinite.
    #[error("vertex coordinate is NaN or infinite at {0}")]
    NonFiniteVertex(Point3<Real>),
}
