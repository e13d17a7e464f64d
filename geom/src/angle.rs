use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An angle, stored in radians. In screen space, positive angles rotate clockwise, because Y
/// grows downwards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Angle(f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    pub fn new_rads(rads: f64) -> Angle {
        Angle(rads)
    }

    pub fn degrees(degs: f64) -> Angle {
        Angle(degs.to_radians())
    }

    pub fn opposite(self) -> Angle {
        Angle(self.0 + PI)
    }

    pub fn rotate_degs(self, degrees: f64) -> Angle {
        Angle(self.0 + degrees.to_radians())
    }

    /// Raw radians, not normalized.
    pub fn radians(self) -> f64 {
        self.0
    }

    /// In [0, 2pi)
    pub fn normalized_radians(self) -> f64 {
        self.0.rem_euclid(2.0 * PI)
    }

    /// In [0, 360)
    pub fn normalized_degrees(self) -> f64 {
        self.normalized_radians().to_degrees()
    }

    /// How far to rotate clockwise from `self` to reach `other`, in [0, 360) degrees.
    pub fn clockwise_degrees_to(self, other: Angle) -> f64 {
        Angle(other.0 - self.0).normalized_degrees()
    }

    pub fn approx_eq(self, other: Angle, within_degrees: f64) -> bool {
        let diff = self.clockwise_degrees_to(other);
        diff < within_degrees || 360.0 - diff < within_degrees
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Angle({} degrees)", self.normalized_degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::Angle;

    #[test]
    fn test_normalize() {
        assert!((Angle::degrees(-90.0).normalized_degrees() - 270.0).abs() < 1e-9);
        assert!((Angle::degrees(450.0).normalized_degrees() - 90.0).abs() < 1e-9);
        let turn = Angle::degrees(10.0).clockwise_degrees_to(Angle::degrees(350.0));
        assert!((turn - 340.0).abs() < 1e-9);
        assert!(Angle::degrees(359.0).approx_eq(Angle::degrees(1.0), 5.0));
        assert!(!Angle::degrees(90.0).approx_eq(Angle::degrees(180.0), 5.0));
    }
}
