//! Run configuration: which published model variants to simulate and how
//! time and joint limits are handled.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::limits::JointLimitMode;

/// Rigid-body parameter variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArmVariant {
    Kambara,
    Mitrovic,
    Li,
    /// Kambara parameters plus gravity and joint friction.
    Sagittal,
}

impl ArmVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArmVariant::Kambara => "kambara",
            ArmVariant::Mitrovic => "mitrovic",
            ArmVariant::Li => "li",
            ArmVariant::Sagittal => "sagittal",
        }
    }
}

impl fmt::Display for ArmVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArmVariant {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "kambara" => Ok(ArmVariant::Kambara),
            "mitrovic" => Ok(ArmVariant::Mitrovic),
            "li" => Ok(ArmVariant::Li),
            "sagittal" => Ok(ArmVariant::Sagittal),
            other => Err(SimError::invalid_config(format!(
                "unknown arm variant '{other}' (expected kambara, mitrovic, li or sagittal)"
            ))),
        }
    }
}

/// Muscle actuation variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MuscleVariant {
    /// No muscle kinematics: two antagonist flag pairs scaled by a gain.
    Direct,
    Kambara,
    Mitrovic,
    Li,
}

impl MuscleVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            MuscleVariant::Direct => "direct",
            MuscleVariant::Kambara => "kambara",
            MuscleVariant::Mitrovic => "mitrovic",
            MuscleVariant::Li => "li",
        }
    }
}

impl fmt::Display for MuscleVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MuscleVariant {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "direct" | "none" => Ok(MuscleVariant::Direct),
            "kambara" => Ok(MuscleVariant::Kambara),
            "mitrovic" => Ok(MuscleVariant::Mitrovic),
            "li" => Ok(MuscleVariant::Li),
            other => Err(SimError::invalid_config(format!(
                "unknown muscle variant '{other}' (expected direct, kambara, mitrovic or li)"
            ))),
        }
    }
}

/// How the per-tick timestep is produced.
///
/// The core never reads a clock; in `WallClock` mode it is the driving loop
/// that measures deltas and passes them to `tick`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestepPolicy {
    /// A fixed configured constant (recommended for reproducible runs).
    Fixed(f64),
    /// The driver derives `dt` from wall-clock deltas.
    WallClock,
}

/// Complete configuration of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub arm: ArmVariant,
    pub muscle: MuscleVariant,
    pub limit_mode: JointLimitMode,
    pub timestep: TimestepPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            arm: ArmVariant::Li,
            muscle: MuscleVariant::Direct,
            limit_mode: JointLimitMode::Bounded,
            timestep: TimestepPolicy::Fixed(0.005),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if let TimestepPolicy::Fixed(dt) = self.timestep {
            if !(dt.is_finite() && dt > 0.0) {
                return Err(SimError::InvalidTimestep(dt));
            }
        }
        Ok(())
    }
}
