//! The simulation stepper: owns all mutable state and advances it one tick
//! at a time through the muscle model and the rigid-body dynamics.
//!
//! A tick is atomic. Both models work on copies of the state and the copies
//! are committed only once the whole tick has succeeded, so a rejected
//! signal or a physical-bounds abort leaves the simulation exactly where it
//! was.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use simcore::MuscleActuator;
use simcore::config::SimulationConfig;
use simcore::error::{Result, SimError};
use simcore::state::{JointState, MomentArmMatrix, MuscleState};

use dynamics::{ArmModel, ArmParameters};
use muscle::MuscleModel;

/// What one successful tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickOutput {
    pub joint: JointState,
    /// Joint torque applied during the tick (N.m).
    pub torque: Vector2<f64>,
}

/// A complete simulation run: one arm variant, one muscle variant, and the
/// state they advance.
#[derive(Debug, Clone)]
pub struct ArmSimulation {
    config: SimulationConfig,
    arm: ArmModel,
    muscle: MuscleModel,
    joint: JointState,
    muscles: MuscleState,
    torque: Vector2<f64>,
    elapsed: f64,
}

impl ArmSimulation {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let arm = ArmModel::new(ArmParameters::for_variant(config.arm), config.limit_mode)?;
        let muscle = MuscleModel::for_variant(config.muscle)?;
        let joint = arm.initial_state();
        let muscles = muscle.initial_state(&joint.angle);
        log::info!(
            "simulation ready: arm={}, muscle={}, dt={:?}",
            config.arm,
            config.muscle,
            config.timestep
        );
        Ok(ArmSimulation {
            config,
            arm,
            muscle,
            joint,
            muscles,
            torque: Vector2::zeros(),
            elapsed: 0.0,
        })
    }

    /// Advance the simulation by `dt` seconds under the given control signal.
    ///
    /// On error nothing is committed; recoverable errors
    /// ([`SimError::is_recoverable`]) reject this tick only and the run may
    /// continue with the next signal.
    pub fn tick(&mut self, signal: &[f64], dt: f64) -> Result<TickOutput> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SimError::InvalidTimestep(dt));
        }

        let mut muscles = self.muscles;
        let torque = self
            .muscle
            .update(signal, &self.joint.angle, &mut muscles, dt)?;

        let mut joint = self.joint;
        self.arm.update(&mut joint, &torque, dt)?;

        self.muscles = muscles;
        self.joint = joint;
        self.torque = torque;
        self.elapsed += dt;
        Ok(TickOutput { joint, torque })
    }

    /// Force the joints to a posture, bypassing dynamics and joint limits.
    ///
    /// Muscle state is re-derived from the new posture and the last torque is
    /// cleared, exactly as at construction time.
    pub fn override_state(&mut self, angle: Vector2<f64>, velocity: Vector2<f64>) {
        log::debug!(
            "state override: angle=[{}, {}], velocity=[{}, {}]",
            angle[0],
            angle[1],
            velocity[0],
            velocity[1]
        );
        self.joint = JointState {
            angle,
            velocity,
            acceleration: Vector2::zeros(),
        };
        self.muscles = self.muscle.initial_state(&angle);
        self.torque = Vector2::zeros();
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn angle(&self) -> Vector2<f64> {
        self.joint.angle
    }

    pub fn velocity(&self) -> Vector2<f64> {
        self.joint.velocity
    }

    pub fn acceleration(&self) -> Vector2<f64> {
        self.joint.acceleration
    }

    /// Joint torque applied by the last successful tick (N.m).
    pub fn torque(&self) -> Vector2<f64> {
        self.torque
    }

    pub fn joint_state(&self) -> &JointState {
        &self.joint
    }

    pub fn muscle_state(&self) -> &MuscleState {
        &self.muscles
    }

    /// Simulated time accumulated by successful ticks (s).
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of components `tick` expects in the control signal.
    pub fn signal_arity(&self) -> usize {
        self.muscle.signal_arity()
    }

    /// Moment-arm matrix of the active muscle variant, if it has one.
    pub fn moment_arm(&self) -> Option<&MomentArmMatrix> {
        self.muscle.moment_arm()
    }
}
