//! Kelvin-Voigt muscles: tension is an elastic term plus a viscous term, with
//! stiffness, viscosity and rest length all modulated linearly by the control
//! signal.
//!
//! Two published parameter sets ship with the crate. They disagree on the
//! sign convention for stretch and on whether the moment-arm matrix carries
//! the extensors' signs; both conventions are preserved verbatim because the
//! reported per-muscle tensions differ even though the resulting joint
//! torques agree.
//!
//! References:
//! - Kambara, Kim, Shin, Sato, Koike. Neural Networks 22(4), 2009.
//! - Katayama, Kawato. Biological Cybernetics 69(5), 1993.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use simcore::MuscleActuator;
use simcore::bounds::{self, Bounds};
use simcore::error::{Result, SimError};
use simcore::state::{MomentArmMatrix, MuscleState, Vector6};

use crate::direct::checked_signal;

/// How stretch and the tension-to-torque map are signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TensionConvention {
    /// `T = K (l - rest) + B v`, `tau = A^T T`; the moment-arm matrix carries
    /// the extensors' signs.
    Elongation,
    /// `T = K (rest - l) - B v`, `tau = -A^T T`; the moment-arm matrix is
    /// all-positive.
    Shortening,
}

/// Per-muscle Kelvin-Voigt parameter set.
///
/// All vectors follow the muscle ordering of [`Vector6`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearMuscleParameters {
    /// Intrinsic stiffness at zero activation (N/m).
    pub k0: Vector6,
    /// Stiffness gain per unit activation (N/m).
    pub k1: Vector6,
    /// Intrinsic viscosity at zero activation (N.s/m).
    pub b0: Vector6,
    /// Viscosity gain per unit activation (N.s/m).
    pub b1: Vector6,
    /// Rest length at zero activation (m).
    pub l0_rest: Vector6,
    /// Rest-length gain per unit activation (m); `rest = l0_rest + l1_rest u`.
    pub l1_rest: Vector6,
    /// Muscle length at the zero posture (m).
    pub l0: Vector6,
    /// Constant moment-arm matrix (m).
    pub moment_arm: MomentArmMatrix,
    pub convention: TensionConvention,
    /// Plausible muscle length range (m); leaving it aborts the tick.
    pub length_bounds: Bounds,
    /// Plausible tension range (N), where the parameter set defines one.
    pub tension_bounds: Option<Bounds>,
}

impl LinearMuscleParameters {
    /// Kambara 2009 parameter set (elongation convention, signed moment arm).
    pub fn kambara() -> Self {
        LinearMuscleParameters {
            k0: Vector6::from_row_slice(&[1000.0, 1000.0, 600.0, 600.0, 300.0, 300.0]),
            k1: Vector6::from_row_slice(&[3000.0, 2000.0, 1400.0, 1200.0, 600.0, 600.0]),
            b0: Vector6::repeat(50.0),
            b1: Vector6::repeat(100.0),
            l0_rest: Vector6::from_row_slice(&[0.26, 0.26, 0.275, 0.275, 0.237, 0.237]),
            l1_rest: Vector6::repeat(-0.15),
            l0: Vector6::from_row_slice(&[0.337, 0.388, 0.375, 0.315, 0.257, 0.256]),
            moment_arm: MomentArmMatrix::from_row_slice(&[
                0.04, 0.0, //
                -0.04, 0.0, //
                0.0, 0.025, //
                0.0, -0.025, //
                0.028, 0.028, //
                -0.035, -0.035,
            ]),
            convention: TensionConvention::Elongation,
            length_bounds: Bounds::new(0.0, 0.5),
            tension_bounds: Some(bounds::TENSION),
        }
    }

    /// Katayama-Kawato 1993 parameter set as used by Mitrovic (shortening
    /// convention, all-positive moment arm).
    pub fn mitrovic() -> Self {
        LinearMuscleParameters {
            k0: Vector6::repeat(810.8),
            k1: Vector6::repeat(1621.6),
            b0: Vector6::repeat(54.1),
            b1: Vector6::repeat(108.1),
            l0_rest: Vector6::from_row_slice(&[0.26, 0.26, 0.275, 0.275, 0.237, 0.237]),
            l1_rest: Vector6::from_row_slice(&[
                -0.03491, 0.03491, -0.02182, 0.02182, -0.05498, 0.05498,
            ]),
            l0: Vector6::from_row_slice(&[0.337, 0.388, 0.375, 0.315, 0.257, 0.256]),
            moment_arm: MomentArmMatrix::from_row_slice(&[
                0.04, 0.0, //
                0.04, 0.0, //
                0.0, 0.025, //
                0.0, 0.025, //
                0.028, 0.035, //
                0.028, 0.035,
            ]),
            convention: TensionConvention::Shortening,
            length_bounds: Bounds::new(0.0, 0.5),
            // The Katayama-Kawato set defines no tension ceiling; tensions
            // well past 200 N occur at full activation.
            tension_bounds: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, vector) in [
            ("k0", &self.k0),
            ("k1", &self.k1),
            ("b0", &self.b0),
            ("b1", &self.b1),
        ] {
            if vector.iter().any(|v| !v.is_finite() || *v < 0.0) {
                return Err(SimError::invalid_config(format!(
                    "{name} must be non-negative and finite"
                )));
            }
        }
        if self.l0_rest.iter().any(|v| !v.is_finite() || *v <= 0.0)
            || self.l0.iter().any(|v| !v.is_finite() || *v <= 0.0)
        {
            return Err(SimError::invalid_config(
                "rest and zero-posture lengths must be positive and finite",
            ));
        }
        if !(self.length_bounds.min.is_finite()
            && self.length_bounds.max.is_finite()
            && self.length_bounds.min < self.length_bounds.max)
        {
            return Err(SimError::invalid_config(
                "muscle length bounds are not a proper interval",
            ));
        }
        Ok(())
    }
}

/// Six Kelvin-Voigt muscles over the two joints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearMuscle {
    params: LinearMuscleParameters,
}

impl LinearMuscle {
    pub fn new(params: LinearMuscleParameters) -> Result<Self> {
        params.validate()?;
        Ok(LinearMuscle { params })
    }

    pub fn params(&self) -> &LinearMuscleParameters {
        &self.params
    }

    /// Muscle lengths at a posture: `l = l0 - A theta`.
    fn lengths(&self, angle: &Vector2<f64>) -> Vector6 {
        self.params.l0 - self.params.moment_arm * angle
    }
}

impl MuscleActuator for LinearMuscle {
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
        let u = Vector6::from_iterator(checked_signal(signal, 6)?);

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

        let p = &self.params;
        let stiffness = p.k0 + p.k1.component_mul(&u);
        let viscosity = p.b0 + p.b1.component_mul(&u);
        let rest = p.l0_rest + p.l1_rest.component_mul(&u);

        let (tension, torque) = match p.convention {
            TensionConvention::Elongation => {
                let tension = stiffness.component_mul(&(length - rest))
                    + viscosity.component_mul(&velocity);
                let torque = p.moment_arm.transpose() * tension;
                (tension, torque)
            }
            TensionConvention::Shortening => {
                let tension = stiffness.component_mul(&(rest - length))
                    - viscosity.component_mul(&velocity);
                let torque = -(p.moment_arm.transpose() * tension);
                (tension, torque)
            }
        };
        if let Some(tension_bounds) = &p.tension_bounds {
            tension_bounds.check("muscle tension", tension.as_slice())?;
        }

        state.length = length;
        state.velocity = velocity;
        Ok(torque)
    }
}
