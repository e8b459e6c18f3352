//! Muscle actuator models for the planar arm: a direct torque drive, two
//! Kelvin-Voigt parameter sets and a Hill-type model.

pub mod direct;
pub mod hill;
pub mod linear;

pub use direct::DirectDrive;
pub use hill::{HillMuscle, HillMuscleParameters};
pub use linear::{LinearMuscle, LinearMuscleParameters, TensionConvention};

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use simcore::MuscleActuator;
use simcore::config::MuscleVariant;
use simcore::error::Result;
use simcore::state::{MomentArmMatrix, MuscleState};

/// The closed set of shipped actuator models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "lowercase")]
pub enum MuscleModel {
    Direct(DirectDrive),
    Linear(LinearMuscle),
    Hill(HillMuscle),
}

impl MuscleModel {
    pub fn for_variant(variant: MuscleVariant) -> Result<Self> {
        log::debug!("muscle model: {variant}");
        let model = match variant {
            MuscleVariant::Direct => MuscleModel::Direct(DirectDrive::default()),
            MuscleVariant::Kambara => {
                MuscleModel::Linear(LinearMuscle::new(LinearMuscleParameters::kambara())?)
            }
            MuscleVariant::Mitrovic => {
                MuscleModel::Linear(LinearMuscle::new(LinearMuscleParameters::mitrovic())?)
            }
            MuscleVariant::Li => MuscleModel::Hill(HillMuscle::new(HillMuscleParameters::li())?),
        };
        Ok(model)
    }

    fn inner(&self) -> &dyn MuscleActuator {
        match self {
            MuscleModel::Direct(m) => m,
            MuscleModel::Linear(m) => m,
            MuscleModel::Hill(m) => m,
        }
    }
}

impl MuscleActuator for MuscleModel {
    fn signal_arity(&self) -> usize {
        self.inner().signal_arity()
    }

    fn moment_arm(&self) -> Option<&MomentArmMatrix> {
        self.inner().moment_arm()
    }

    fn initial_state(&self, angle: &Vector2<f64>) -> MuscleState {
        self.inner().initial_state(angle)
    }

    fn update(
        &self,
        signal: &[f64],
        angle: &Vector2<f64>,
        state: &mut MuscleState,
        dt: f64,
    ) -> Result<Vector2<f64>> {
        self.inner().update(signal, angle, state, dt)
    }
}
