//! Immutable rigid-body parameter sets for the published arm models.
//!
//! References:
//! - Kambara, Kim, Shin, Sato, Koike. "Learning and generation of
//!   goal-directed arm reaching from scratch." Neural Networks 22(4), 2009.
//! - Katayama, Kawato. "Virtual trajectory and stiffness ellipse during
//!   multijoint arm movement predicted by neural inverse models."
//!   Biological Cybernetics 69(5), 1993. (Mitrovic parameter source.)
//! - W. Li. "Optimal control for biological movement systems." PhD thesis,
//!   UCSD, 2006.

use nalgebra::{Matrix2, Vector2};
use serde::{Deserialize, Serialize};
use simcore::bounds::Bounds;
use simcore::config::ArmVariant;
use simcore::error::{Result, SimError};

/// Gravity term parameters; present only for sagittal-plane variants.
///
/// The upperarm mass and center-of-mass distance enter the dynamics only
/// through the gravity vector, which is why they live here rather than in
/// [`ArmParameters`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GravityParams {
    /// Gravitational acceleration (m/s^2).
    pub g: f64,
    /// Upperarm mass (kg).
    pub upperarm_mass: f64,
    /// Shoulder-to-upperarm-center-of-mass distance (m).
    pub upperarm_cog: f64,
}

/// Rigid-body parameter set for one published arm model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmParameters {
    /// Moment of inertia at the shoulder joint (kg.m^2).
    pub shoulder_inertia: f64,
    /// Moment of inertia at the elbow joint (kg.m^2).
    pub elbow_inertia: f64,
    /// Forearm mass (kg).
    pub forearm_mass: f64,
    /// Upperarm length (m).
    pub upperarm_length: f64,
    /// Forearm length (m).
    pub forearm_length: f64,
    /// Elbow-to-forearm-center-of-mass distance (m).
    pub forearm_cog: f64,
    /// Gravity term; `None` for horizontally planar variants.
    pub gravity: Option<GravityParams>,
    /// Constant joint friction matrix; `None` for frictionless variants.
    pub friction: Option<Matrix2<f64>>,
    /// Joint angle range (rad), shoulder then elbow.
    pub angle_bounds: [Bounds; 2],
    /// Initial posture (rad).
    pub initial_angle: Vector2<f64>,
}

impl ArmParameters {
    pub fn for_variant(variant: ArmVariant) -> Self {
        match variant {
            ArmVariant::Kambara => ArmParameters::kambara(),
            ArmVariant::Mitrovic => ArmParameters::mitrovic(),
            ArmVariant::Li => ArmParameters::li(),
            ArmVariant::Sagittal => ArmParameters::sagittal(),
        }
    }

    /// Vertically planar (sagittal) model with gravity, no joint friction.
    pub fn kambara() -> Self {
        ArmParameters {
            shoulder_inertia: 6.78e-2,
            elbow_inertia: 7.99e-2,
            forearm_mass: 1.44,
            upperarm_length: 0.3,
            forearm_length: 0.35,
            forearm_cog: 0.21,
            gravity: Some(GravityParams {
                g: 9.8,
                upperarm_mass: 1.59,
                upperarm_cog: 0.18,
            }),
            friction: None,
            angle_bounds: [
                Bounds::new((-140.0_f64).to_radians(), 90.0_f64.to_radians()),
                Bounds::new(0.0, 160.0_f64.to_radians()),
            ],
            initial_angle: Vector2::zeros(),
        }
    }

    /// Kambara parameters plus a constant joint friction matrix.
    pub fn sagittal() -> Self {
        ArmParameters {
            friction: Some(Matrix2::new(0.2, 0.1, 0.2, 0.1)),
            ..ArmParameters::kambara()
        }
    }

    /// Horizontally planar model, no gravity, no friction.
    pub fn mitrovic() -> Self {
        ArmParameters {
            shoulder_inertia: 4.77e-2,
            elbow_inertia: 5.88e-2,
            forearm_mass: 1.44,
            upperarm_length: 0.3,
            forearm_length: 0.35,
            forearm_cog: 0.21,
            gravity: None,
            friction: None,
            angle_bounds: [
                Bounds::new((-30.0_f64).to_radians(), 140.0_f64.to_radians()),
                Bounds::new(0.0, 160.0_f64.to_radians()),
            ],
            initial_angle: Vector2::new(45.0_f64.to_radians(), 70.0_f64.to_radians()),
        }
    }

    /// Horizontally planar model with joint friction, no gravity.
    pub fn li() -> Self {
        ArmParameters {
            shoulder_inertia: 2.5e-2,
            elbow_inertia: 4.5e-2,
            forearm_mass: 1.1,
            upperarm_length: 0.3,
            forearm_length: 0.33,
            forearm_cog: 0.16,
            gravity: None,
            friction: Some(Matrix2::new(0.05, 0.025, 0.025, 0.05)),
            angle_bounds: [
                Bounds::new((-30.0_f64).to_radians(), 140.0_f64.to_radians()),
                Bounds::new(0.0, 160.0_f64.to_radians()),
            ],
            initial_angle: Vector2::new(45.0_f64.to_radians(), 70.0_f64.to_radians()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("shoulder inertia", self.shoulder_inertia),
            ("elbow inertia", self.elbow_inertia),
            ("forearm mass", self.forearm_mass),
            ("upperarm length", self.upperarm_length),
            ("forearm length", self.forearm_length),
            ("forearm cog", self.forearm_cog),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::invalid_config(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        if let Some(gravity) = &self.gravity {
            if !(gravity.g.is_finite() && gravity.g > 0.0)
                || !(gravity.upperarm_mass.is_finite() && gravity.upperarm_mass > 0.0)
                || !(gravity.upperarm_cog.is_finite() && gravity.upperarm_cog > 0.0)
            {
                return Err(SimError::invalid_config(
                    "gravity parameters must be positive and finite",
                ));
            }
        }
        for (i, bounds) in self.angle_bounds.iter().enumerate() {
            if !(bounds.min.is_finite() && bounds.max.is_finite() && bounds.min < bounds.max) {
                return Err(SimError::invalid_config(format!(
                    "joint {i} angle bounds [{}, {}] are not a proper interval",
                    bounds.min, bounds.max
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_variants_validate() {
        for variant in [
            ArmVariant::Kambara,
            ArmVariant::Mitrovic,
            ArmVariant::Li,
            ArmVariant::Sagittal,
        ] {
            ArmParameters::for_variant(variant).validate().unwrap();
        }
    }

    #[test]
    fn sagittal_is_kambara_with_friction() {
        let kambara = ArmParameters::kambara();
        let sagittal = ArmParameters::sagittal();
        assert!(kambara.friction.is_none());
        assert!(sagittal.friction.is_some());
        assert_eq!(kambara.shoulder_inertia, sagittal.shoulder_inertia);
        assert_eq!(kambara.gravity, sagittal.gravity);
    }

    #[test]
    fn degenerate_bounds_are_rejected() {
        let mut params = ArmParameters::li();
        params.angle_bounds[1] = Bounds::new(1.0, 1.0);
        assert!(matches!(
            params.validate(),
            Err(SimError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn negative_mass_is_rejected() {
        let mut params = ArmParameters::mitrovic();
        params.forearm_mass = -1.0;
        assert!(params.validate().is_err());
    }
}
