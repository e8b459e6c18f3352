//! Error taxonomy for the simulation core.
//!
//! Configuration errors surface at construction, physical-implausibility
//! errors abort the tick that detects them, and invalid control signals are
//! recoverable: the tick is rejected and state is left unchanged.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// Unknown variant name, bad parameter set or mismatched dimensions.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        reason: String,
    },

    /// Timestep must be positive and finite.
    #[error("invalid timestep: {0} s (must be positive and finite)")]
    InvalidTimestep(f64),

    /// The mass matrix could not be inverted. Structurally impossible for the
    /// shipped parameter sets; reaching this is a modeling error.
    #[error("mass matrix is singular at angles [{shoulder}, {elbow}] rad")]
    SingularMassMatrix {
        shoulder: f64,
        elbow: f64,
    },

    /// A physical quantity left its variant's defined plausible range,
    /// indicating a modeling or integration instability.
    #[error("{quantity} out of physical bounds: {value} not in [{min}, {max}]")]
    OutOfBounds {
        quantity: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A muscle length left the domain on which the force relationships are
    /// defined.
    #[error("muscle {index} length is degenerate: {length} m not in [{min}, {max}]")]
    DegenerateMuscleLength {
        index: usize,
        length: f64,
        min: f64,
        max: f64,
    },

    /// Wrong arity or out-of-domain component; the tick is rejected.
    #[error("invalid control signal: {reason}")]
    InvalidControlSignal {
        reason: String,
    },
}

impl SimError {
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        SimError::InvalidConfig {
            reason: reason.into(),
        }
    }

    pub fn invalid_signal(reason: impl Into<String>) -> Self {
        SimError::InvalidControlSignal {
            reason: reason.into(),
        }
    }

    /// True for errors that reject a single tick without poisoning the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SimError::InvalidControlSignal { .. } | SimError::InvalidTimestep(_)
        )
    }
}
