//! Transform drivers: pure functions of elapsed time

use crate::float_types::Real;
use crate::scene::brush::Axis;

/// Sinusoidal displacement along one axis, a pure function of elapsed
/// seconds.
///
/// `displacement(t) = amplitude · sin(t + phase)`; no state accumulates
/// between calls, so replaying any `t` reproduces the same pose exactly.
/// Total over all finite `t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pendulum {
    pub amplitude: Real,
    pub phase: Real,
    pub axis: Axis,
}

impl Pendulum {
    pub const fn new(amplitude: Real, phase: Real, axis: Axis) -> Self {
        Pendulum {
            amplitude,
            phase,
            axis,
        }
    }

    /// Displacement along `axis` at elapsed time `t` (seconds).
    pub fn displacement(&self, t: Real) -> Real {
        self.amplitude * (t + self.phase).sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::float_types::{FRAC_PI_2, PI};

    #[test]
    fn displacement_is_a_pure_sine() {
        let swing = Pendulum::new(3.0, 0.0, Axis::X);
        assert!((swing.displacement(0.0)).abs() < 1e-12);
        assert!((swing.displacement(FRAC_PI_2) - 3.0).abs() < 1e-12);
        assert!((swing.displacement(PI)).abs() < 1e-9);
        // replaying the same t gives the same answer; nothing accumulates
        assert_eq!(swing.displacement(1.25), swing.displacement(1.25));
    }

    #[test]
    fn phase_shift_offsets_the_swing() {
        let swing = Pendulum::new(3.0, FRAC_PI_2, Axis::Z);
        assert!((swing.displacement(0.0) - 3.0).abs() < 1e-12);
    }
}
