//! Joint limit enforcement: an inelastic stop, not a bounce.
//!
//! Hitting a limit is an expected, silently handled event; it is never
//! reported as an error.

use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::state::JointState;

/// Whether joint angles are clamped to the variant's configured range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JointLimitMode {
    Bounded,
    Unbounded,
}

/// Clamp the joint state to the configured angle bounds.
///
/// A joint past a bound is pinned to that bound with zero velocity and zero
/// acceleration. In [`JointLimitMode::Unbounded`] this is a strict no-op for
/// all inputs.
pub fn clamp_to_limits(state: &mut JointState, bounds: &[Bounds; 2], mode: JointLimitMode) {
    if mode == JointLimitMode::Unbounded {
        return;
    }
    for i in 0..2 {
        if state.angle[i] < bounds[i].min {
            log::trace!("joint {i} reached lower stop at {} rad", bounds[i].min);
            state.acceleration[i] = 0.0;
            state.velocity[i] = 0.0;
            state.angle[i] = bounds[i].min;
        } else if state.angle[i] > bounds[i].max {
            log::trace!("joint {i} reached upper stop at {} rad", bounds[i].max);
            state.acceleration[i] = 0.0;
            state.velocity[i] = 0.0;
            state.angle[i] = bounds[i].max;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;

    const BOUNDS: [Bounds; 2] = [Bounds::new(-0.5, 1.5), Bounds::new(0.0, 2.0)];

    #[test]
    fn in_range_state_passes_through() {
        let mut state = JointState {
            angle: Vector2::new(0.3, 1.0),
            velocity: Vector2::new(2.0, -1.0),
            acceleration: Vector2::new(4.0, 4.0),
        };
        let before = state;
        clamp_to_limits(&mut state, &BOUNDS, JointLimitMode::Bounded);
        assert_eq!(state, before);
    }

    #[test]
    fn overshoot_is_pinned_with_zeroed_motion() {
        let mut state = JointState {
            angle: Vector2::new(1.7, -0.2),
            velocity: Vector2::new(3.0, -1.0),
            acceleration: Vector2::new(10.0, -5.0),
        };
        clamp_to_limits(&mut state, &BOUNDS, JointLimitMode::Bounded);
        assert_eq!(state.angle[0], 1.5);
        assert_eq!(state.velocity[0], 0.0);
        assert_eq!(state.acceleration[0], 0.0);
        assert_eq!(state.angle[1], 0.0);
        assert_eq!(state.velocity[1], 0.0);
        assert_eq!(state.acceleration[1], 0.0);
    }

    #[test]
    fn unbounded_mode_is_a_strict_noop() {
        let mut state = JointState {
            angle: Vector2::new(100.0, -100.0),
            velocity: Vector2::new(3.0, -1.0),
            acceleration: Vector2::new(10.0, -5.0),
        };
        let before = state;
        clamp_to_limits(&mut state, &BOUNDS, JointLimitMode::Unbounded);
        assert_eq!(state, before);
    }
}
