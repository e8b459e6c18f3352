//! Closed numeric intervals and the physical plausibility ceilings shared by
//! every arm variant. A violation is a fatal [`SimError::OutOfBounds`], not a
//! clamp: it means the integration has gone unstable and the run must stop.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// A closed `[min, max]` interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Bounds { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Check every component; the first violation aborts with a diagnostic
    /// naming the quantity, the value and the allowed range.
    pub fn check(&self, quantity: &'static str, values: &[f64]) -> Result<()> {
        for &value in values {
            if !self.contains(value) {
                return Err(SimError::OutOfBounds {
                    quantity,
                    value,
                    min: self.min,
                    max: self.max,
                });
            }
        }
        Ok(())
    }
}

/// Angular acceleration ceiling (rad/s^2).
pub const ANGULAR_ACCELERATION: Bounds = Bounds::new(-128.0 * PI, 128.0 * PI);

/// Angular velocity ceiling (rad/s).
pub const ANGULAR_VELOCITY: Bounds = Bounds::new(-8.0 * PI, 8.0 * PI);

/// Joint torque ceiling (N.m).
pub const TORQUE: Bounds = Bounds::new(-200.0, 200.0);

/// Muscle tension ceiling (N).
pub const TENSION: Bounds = Bounds::new(-200.0, 200.0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive() {
        let b = Bounds::new(-1.0, 1.0);
        assert!(b.contains(-1.0));
        assert!(b.contains(1.0));
        assert!(!b.contains(1.0 + 1e-12));
    }

    #[test]
    fn check_reports_first_violation() {
        let b = Bounds::new(0.0, 10.0);
        assert!(b.check("torque", &[0.0, 5.0, 10.0]).is_ok());
        let err = b.check("torque", &[5.0, 11.0, 12.0]).unwrap_err();
        match err {
            SimError::OutOfBounds { quantity, value, .. } => {
                assert_eq!(quantity, "torque");
                assert_eq!(value, 11.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn nan_never_passes() {
        let b = Bounds::new(-1.0, 1.0);
        assert!(b.check("velocity", &[f64::NAN]).is_err());
    }
}
