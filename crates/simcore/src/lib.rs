//! Shared vocabulary for the planar arm simulator: state types, configuration,
//! the error taxonomy, physical-bound checking, the integrator and the joint
//! limiter. Model crates (`dynamics`, `muscle`) build on these.

pub mod actuator;
pub mod bounds;
pub mod config;
pub mod error;
pub mod integrator;
pub mod limits;
pub mod state;

pub use actuator::MuscleActuator;
pub use bounds::Bounds;
pub use config::{ArmVariant, MuscleVariant, SimulationConfig, TimestepPolicy};
pub use error::{Result, SimError};
pub use limits::JointLimitMode;
pub use state::{JointState, MomentArmMatrix, MuscleState, Vector6};
