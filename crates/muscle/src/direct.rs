//! Direct torque drive: an antagonist signal pair per joint, no muscle
//! kinematics at all. Useful as a baseline actuator and for exercising the
//! rigid-body dynamics in isolation.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use simcore::MuscleActuator;
use simcore::error::{Result, SimError};
use simcore::state::MuscleState;

/// Signal layout: `[shoulder+, shoulder-, elbow+, elbow-]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectDrive {
    /// Torque per unit of net signal (N.m).
    pub gain: f64,
}

impl Default for DirectDrive {
    fn default() -> Self {
        DirectDrive { gain: 2.0 }
    }
}

impl MuscleActuator for DirectDrive {
    fn signal_arity(&self) -> usize {
        4
    }

    fn initial_state(&self, _angle: &Vector2<f64>) -> MuscleState {
        MuscleState::default()
    }

    fn update(
        &self,
        signal: &[f64],
        _angle: &Vector2<f64>,
        _state: &mut MuscleState,
        _dt: f64,
    ) -> Result<Vector2<f64>> {
        let u = checked_signal(signal, 4)?;
        Ok(Vector2::new(
            (u[0] - u[1]) * self.gain,
            (u[2] - u[3]) * self.gain,
        ))
    }
}

/// Validate arity and finiteness, then clamp each component into `[0, 1]`.
pub(crate) fn checked_signal(signal: &[f64], arity: usize) -> Result<Vec<f64>> {
    if signal.len() != arity {
        return Err(SimError::invalid_signal(format!(
            "expected {arity} components, got {}",
            signal.len()
        )));
    }
    if let Some(bad) = signal.iter().find(|s| !s.is_finite()) {
        return Err(SimError::invalid_signal(format!(
            "non-finite component {bad}"
        )));
    }
    Ok(signal.iter().map(|s| s.clamp(0.0, 1.0)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn antagonist_pairs_map_to_signed_torque() {
        let drive = DirectDrive::default();
        let mut state = MuscleState::default();
        let angle = Vector2::zeros();

        let torque = drive
            .update(&[1.0, 0.0, 1.0, 0.0], &angle, &mut state, 0.005)
            .unwrap();
        assert_eq!(torque, Vector2::new(2.0, 2.0));

        let torque = drive
            .update(&[0.0, 1.0, 0.0, 1.0], &angle, &mut state, 0.005)
            .unwrap();
        assert_eq!(torque, Vector2::new(-2.0, -2.0));
    }

    #[test]
    fn balanced_activation_cancels() {
        let drive = DirectDrive::default();
        let mut state = MuscleState::default();
        let torque = drive
            .update(&[0.7, 0.7, 0.3, 0.3], &Vector2::zeros(), &mut state, 0.005)
            .unwrap();
        assert_eq!(torque, Vector2::zeros());
    }

    #[test]
    fn wrong_arity_is_rejected() {
        let drive = DirectDrive::default();
        let mut state = MuscleState::default();
        let err = drive
            .update(&[1.0, 0.0, 1.0], &Vector2::zeros(), &mut state, 0.005)
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidControlSignal { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn overdriven_signal_is_clamped() {
        let drive = DirectDrive::default();
        let mut state = MuscleState::default();
        let torque = drive
            .update(&[5.0, -3.0, 0.0, 0.0], &Vector2::zeros(), &mut state, 0.005)
            .unwrap();
        assert_eq!(torque, Vector2::new(2.0, 0.0));
    }

    #[test]
    fn nan_signal_is_rejected_not_clamped() {
        let drive = DirectDrive::default();
        let mut state = MuscleState::default();
        assert!(
            drive
                .update(&[f64::NAN, 0.0, 0.0, 0.0], &Vector2::zeros(), &mut state, 0.005)
                .is_err()
        );
    }
}
