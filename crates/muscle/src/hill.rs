//! Hill-type muscles after Li 2006: tension is the product of an activation
//! response and a force-length/force-velocity surface, plus a passive elastic
//! term. Unlike the Kelvin-Voigt variants this model REJECTS activations
//! outside `[0, 1]` instead of clamping them.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use simcore::MuscleActuator;
use simcore::bounds::Bounds;
use simcore::error::{Result, SimError};
use simcore::state::{MomentArmMatrix, MuscleState, Vector6};

/// Hill-type parameter set; lengths are normalized so the force-length
/// optimum sits at 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HillMuscleParameters {
    /// Muscle length at the zero posture (m).
    pub l0: Vector6,
    /// Constant moment-arm matrix (m).
    pub moment_arm: MomentArmMatrix,
    /// Domain on which the force relationships are defined (m).
    pub length_bounds: Bounds,
}

impl HillMuscleParameters {
    /// Li 2006 parameter set.
    pub fn li() -> Self {
        HillMuscleParameters {
            l0: Vector6::repeat(0.4),
            moment_arm: MomentArmMatrix::from_row_slice(&[
                0.04, 0.0, //
                -0.04, 0.0, //
                0.0, 0.025, //
                0.0, -0.025, //
                0.028, 0.028, //
                -0.035, -0.035,
            ]),
            length_bounds: Bounds::new(0.01, 0.6),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.l0.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err(SimError::invalid_config(
                "zero-posture lengths must be positive and finite",
            ));
        }
        // nf diverges as length approaches zero.
        if !(self.length_bounds.min.is_finite()
            && self.length_bounds.max.is_finite()
            && self.length_bounds.min > 0.0
            && self.length_bounds.min < self.length_bounds.max)
        {
            return Err(SimError::invalid_config(
                "muscle length bounds must be a proper positive interval",
            ));
        }
        Ok(())
    }
}

/// Six Hill-type muscles over the two joints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HillMuscle {
    params: HillMuscleParameters,
}

impl HillMuscle {
    pub fn new(params: HillMuscleParameters) -> Result<Self> {
        params.validate()?;
        Ok(HillMuscle { params })
    }

    pub fn params(&self) -> &HillMuscleParameters {
        &self.params
    }

    fn lengths(&self, angle: &Vector2<f64>) -> Vector6 {
        self.params.l0 - self.params.moment_arm * angle
    }
}

/// Shape factor of the activation-frequency response.
fn nf(length: f64) -> f64 {
    2.11 + 4.16 * (1.0 / length - 1.0)
}

/// Activation-frequency relationship; monotone in the activation.
fn fa(length: f64, activation: f64) -> f64 {
    let nf = nf(length);
    1.0 - (-(activation / (0.56 * nf)).powf(nf)).exp()
}

/// Active force-length relationship; peaks at unit length.
fn fl(length: f64) -> f64 {
    (-((length.powf(1.93) - 1.0) / 1.03).abs().powf(1.87)).exp()
}

/// Force-velocity relationship; unity at zero contraction velocity.
fn fv(length: f64, velocity: f64) -> f64 {
    if velocity <= 0.0 {
        (-5.72 - velocity) / (-5.72 + velocity * (1.38 + 2.09 * length))
    } else {
        (0.62 - (-3.12 + 4.21 * length - 2.67 * length.powi(2)) * velocity) / (0.62 + velocity)
    }
}

/// Passive elastic force; pulls hard below the optimum length.
fn fp(length: f64) -> f64 {
    -0.02 * (13.8 - 18.7 * length).exp()
}

impl MuscleActuator for HillMuscle {
    fn signal_arity(&self) -> usize {
        6
    }

    fn moment_arm(&self) -> Option<&MomentArmMatrix> {
        Some(&self.params.moment_arm)
    }

    fn initial_state(&self, angle: &Vector2<f64>) -> MuscleState {
        MuscleState::with_lengths(self.lengths(angle))
    }

    fn update(
        &self,
        signal: &[f64],
        angle: &Vector2<f64>,
        state: &mut MuscleState,
        dt: f64,
    ) -> Result<Vector2<f64>> {
        if signal.len() != 6 {
            return Err(SimError::invalid_signal(format!(
                "expected 6 components, got {}",
                signal.len()
            )));
        }
        if let Some(bad) = signal
            .iter()
            .find(|s| !s.is_finite() || **s < 0.0 || **s > 1.0)
        {
            return Err(SimError::invalid_signal(format!(
                "activation {bad} outside [0, 1]"
            )));
        }

        let length = self.lengths(angle);
        for (index, l) in length.iter().enumerate() {
            if !self.params.length_bounds.contains(*l) {
                return Err(SimError::DegenerateMuscleLength {
                    index,
                    length: *l,
                    min: self.params.length_bounds.min,
                    max: self.params.length_bounds.max,
                });
            }
        }
        let velocity = (length - state.length) / dt;

        let tension = Vector6::from_fn(|i, _| {
            let l = length[i];
            fa(l, signal[i]) * (fp(l) + fl(l) * fv(l, velocity[i]))
        });

        state.length = length;
        state.velocity = velocity;
        Ok(self.params.moment_arm.transpose() * tension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn force_length_peaks_at_unit_length() {
        assert_relative_eq!(fl(1.0), 1.0);
        assert!(fl(0.8) < 1.0);
        assert!(fl(1.2) < 1.0);
    }

    #[test]
    fn force_velocity_is_unity_at_rest() {
        for l in [0.2, 0.5, 1.0] {
            assert_relative_eq!(fv(l, 0.0), 1.0);
        }
        // Positive velocity is lengthening, which produces more force.
        assert!(fv(1.0, 0.5) > fv(1.0, -0.5));
    }

    #[test]
    fn activation_response_is_monotone() {
        let l = 0.95;
        assert_relative_eq!(fa(l, 0.0), 0.0);
        let mut previous = 0.0;
        for step in 1..=10 {
            let value = fa(l, step as f64 / 10.0);
            assert!(value > previous);
            previous = value;
        }
        assert!(previous < 1.0);
    }

    #[test]
    fn out_of_range_activation_is_rejected_with_state_untouched() {
        let muscle = HillMuscle::new(HillMuscleParameters::li()).unwrap();
        let angle = Vector2::new(0.5, 1.0);
        let mut state = muscle.initial_state(&angle);
        let before = state;

        let err = muscle
            .update(&[1.2, 0.0, 0.0, 0.0, 0.0, 0.0], &angle, &mut state, 0.005)
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidControlSignal { .. }));
        assert_eq!(state, before);

        let err = muscle
            .update(&[-0.1, 0.0, 0.0, 0.0, 0.0, 0.0], &angle, &mut state, 0.005)
            .unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(state, before);
    }

    #[test]
    fn degenerate_length_is_reported_by_muscle_index() {
        let muscle = HillMuscle::new(HillMuscleParameters::li()).unwrap();
        let resting = Vector2::new(0.5, 1.0);
        let mut state = muscle.initial_state(&resting);
        let err = muscle
            .update(&[0.0; 6], &Vector2::new(20.0, 0.0), &mut state, 0.005)
            .unwrap_err();
        assert!(matches!(
            err,
            SimError::DegenerateMuscleLength { index: 0, .. }
        ));
    }

    #[test]
    fn passive_arm_produces_bounded_torque() {
        let muscle = HillMuscle::new(HillMuscleParameters::li()).unwrap();
        let angle = Vector2::new(45.0_f64.to_radians(), 70.0_f64.to_radians());
        let mut state = muscle.initial_state(&angle);
        let torque = muscle
            .update(&[0.0; 6], &angle, &mut state, 0.005)
            .unwrap();
        // Zero activation means fa = 0 and therefore no tension at all.
        assert_relative_eq!(torque[0], 0.0);
        assert_relative_eq!(torque[1], 0.0);
    }
}
