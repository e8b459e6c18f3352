use nalgebra::{SMatrix, SVector, Vector2};
use serde::{Deserialize, Serialize};

/// Per-muscle vector: six muscles, ordered shoulder flexor/extensor,
/// elbow flexor/extensor, double-joint flexor/extensor.
pub type Vector6 = SVector<f64, 6>;

/// Constant 6x2 matrix mapping joint angles to muscle lengths and muscle
/// tensions to joint torques. Rows follow the muscle ordering of [`Vector6`].
pub type MomentArmMatrix = SMatrix<f64, 6, 2>;

/// Kinematic state of the two joints (shoulder, elbow).
///
/// Owned by the simulation stepper; model code receives it by reference and
/// mutates it only through the integrator and the joint limiter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointState {
    /// Joint angles (rad).
    pub angle: Vector2<f64>,
    /// Angular velocities (rad/s).
    pub velocity: Vector2<f64>,
    /// Angular accelerations (rad/s^2).
    pub acceleration: Vector2<f64>,
}

impl JointState {
    /// State at the given posture with zero velocity and acceleration.
    pub fn at_rest(angle: Vector2<f64>) -> Self {
        JointState {
            angle,
            velocity: Vector2::zeros(),
            acceleration: Vector2::zeros(),
        }
    }
}

impl Default for JointState {
    fn default() -> Self {
        JointState::at_rest(Vector2::zeros())
    }
}

/// Derived per-muscle kinematics, recomputed every tick from [`JointState`]
/// through the muscle variant's kinematic map. Not independently settable.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MuscleState {
    /// Muscle lengths (m).
    pub length: Vector6,
    /// Muscle contraction velocities (m/s).
    pub velocity: Vector6,
}

impl MuscleState {
    /// State with the given lengths and zero contraction velocity, as seeded
    /// at construction time (the first backward difference is defined to be
    /// zero).
    pub fn with_lengths(length: Vector6) -> Self {
        MuscleState {
            length,
            velocity: Vector6::zeros(),
        }
    }
}
