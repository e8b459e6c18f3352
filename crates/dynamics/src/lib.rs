//! Rigid-body forward dynamics of the two-joint planar arm.

pub mod arm;
pub mod params;

pub use arm::ArmModel;
pub use params::{ArmParameters, GravityParams};
