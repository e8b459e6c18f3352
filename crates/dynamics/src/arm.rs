//! The forward-dynamics model: torque in, committed joint state out.

use nalgebra::{Matrix2, Vector2};
use simcore::bounds;
use simcore::error::{Result, SimError};
use simcore::integrator::semi_implicit_euler;
use simcore::limits::{JointLimitMode, clamp_to_limits};
use simcore::state::JointState;

use crate::params::ArmParameters;

/// Forward dynamics of the two-joint arm.
///
/// The model itself is immutable; the caller owns the [`JointState`] and
/// passes it to [`ArmModel::update`], which advances it through the
/// integrator and the joint limiter.
#[derive(Debug, Clone)]
pub struct ArmModel {
    params: ArmParameters,
    limit_mode: JointLimitMode,
}

impl ArmModel {
    pub fn new(params: ArmParameters, limit_mode: JointLimitMode) -> Result<Self> {
        params.validate()?;
        log::debug!(
            "arm model: gravity={}, friction={}, limits={:?}",
            params.gravity.is_some(),
            params.friction.is_some(),
            limit_mode
        );
        Ok(ArmModel { params, limit_mode })
    }

    pub fn params(&self) -> &ArmParameters {
        &self.params
    }

    /// The variant's initial posture at rest, clamped to the angle bounds.
    pub fn initial_state(&self) -> JointState {
        let mut state = JointState::at_rest(self.params.initial_angle);
        clamp_to_limits(&mut state, &self.params.angle_bounds, self.limit_mode);
        state
    }

    /// Inertia matrix M(theta). Symmetric; depends only on the elbow angle.
    pub fn mass_matrix(&self, angle: &Vector2<f64>) -> Matrix2<f64> {
        let p = &self.params;
        let f1 = p.shoulder_inertia + p.elbow_inertia + p.forearm_mass * p.upperarm_length.powi(2);
        let f2 = p.forearm_mass * p.upperarm_length * p.forearm_cog;
        let f3 = p.elbow_inertia;
        let c = angle[1].cos();
        Matrix2::new(f1 + 2.0 * f2 * c, f3 + f2 * c, f3 + f2 * c, f3)
    }

    /// Centripetal and Coriolis vector C(theta, omega).
    pub fn coriolis(&self, angle: &Vector2<f64>, velocity: &Vector2<f64>) -> Vector2<f64> {
        let p = &self.params;
        let f2 = p.forearm_mass * p.upperarm_length * p.forearm_cog;
        Vector2::new(
            -velocity[1] * (2.0 * velocity[0] + velocity[1]),
            velocity[0].powi(2),
        ) * (f2 * angle[1].sin())
    }

    /// Gravity vector G(theta); zero for horizontally planar variants.
    pub fn gravity(&self, angle: &Vector2<f64>) -> Vector2<f64> {
        let p = &self.params;
        match &p.gravity {
            None => Vector2::zeros(),
            Some(gp) => {
                let elbow_term = p.forearm_mass * gp.g * p.forearm_cog * (angle[0] + angle[1]).cos();
                Vector2::new(
                    gp.upperarm_mass * gp.g * gp.upperarm_cog * angle[0].cos()
                        + p.forearm_mass * gp.g * p.upperarm_length * angle[0].cos()
                        + elbow_term,
                    elbow_term,
                )
            }
        }
    }

    /// One forward-dynamics step: acceleration from torque, then integration
    /// and limit enforcement.
    ///
    /// Fails with [`SimError::OutOfBounds`] when torque, acceleration or
    /// velocity leave the physically plausible range, and with
    /// [`SimError::SingularMassMatrix`] if M(theta) cannot be inverted; in
    /// either case `state` is left unchanged.
    pub fn update(&self, state: &mut JointState, torque: &Vector2<f64>, dt: f64) -> Result<()> {
        bounds::TORQUE.check("torque", torque.as_slice())?;

        let m = self.mass_matrix(&state.angle);
        let m_inv = m.try_inverse().ok_or(SimError::SingularMassMatrix {
            shoulder: state.angle[0],
            elbow: state.angle[1],
        })?;

        let mut load = torque - self.coriolis(&state.angle, &state.velocity);
        if let Some(b) = &self.params.friction {
            load -= b * state.velocity;
        }
        load -= self.gravity(&state.angle);

        let acceleration = m_inv * load;
        bounds::ANGULAR_ACCELERATION.check("angular acceleration", acceleration.as_slice())?;

        let (velocity, angle) =
            semi_implicit_euler(&acceleration, &state.velocity, &state.angle, dt);
        bounds::ANGULAR_VELOCITY.check("angular velocity", velocity.as_slice())?;

        state.acceleration = acceleration;
        state.velocity = velocity;
        state.angle = angle;
        clamp_to_limits(state, &self.params.angle_bounds, self.limit_mode);
        Ok(())
    }
}
