//! Scalar type and tolerances shared across the crate.

/// Scalar used for all geometry in this crate.
pub type Real = f64;

/// Tolerance band for plane classification and intersection parameters.
///
/// Orientation tests use exact predicates; `EPSILON` only widens the
/// "on the plane" band so hairline slivers produced by repeated splitting
/// are treated as coplanar.
pub const EPSILON: Real = 1e-5;

/// Archimedes' constant (π)
pub const PI: Real = core::f64::consts::PI;

/// π/2
pub const FRAC_PI_2: Real = core::f64::consts::FRAC_PI_2;

/// The full circle constant (τ)
pub const TAU: Real = core::f64::consts::TAU;
