//! The seam between the stepper and the muscle models.

use nalgebra::Vector2;

use crate::error::Result;
use crate::state::{MomentArmMatrix, MuscleState};

/// A joint-torque producer driven by a per-tick control signal.
///
/// Implementations are immutable parameter sets; all mutable muscle state
/// lives in the caller-owned [`MuscleState`], which `update` advances in
/// place. An `Err` return must leave `state` untouched.
pub trait MuscleActuator {
    /// Number of components the control signal must carry.
    fn signal_arity(&self) -> usize;

    /// The constant moment-arm matrix, for variants that route muscles over
    /// the joints. `None` for direct torque drives; front ends use this to
    /// decide whether muscle routing can be drawn at all.
    fn moment_arm(&self) -> Option<&MomentArmMatrix> {
        None
    }

    /// Muscle kinematic state consistent with the given posture, with zero
    /// contraction velocity.
    fn initial_state(&self, angle: &Vector2<f64>) -> MuscleState;

    /// Compute joint torque from the control signal at the current posture.
    fn update(
        &self,
        signal: &[f64],
        angle: &Vector2<f64>,
        state: &mut MuscleState,
        dt: f64,
    ) -> Result<Vector2<f64>>;
}
