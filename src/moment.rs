//! Coil voltage to dipole moment mapping

use serde::{Deserialize, Serialize};
use std::fmt;

/// Moment magnitude assigned to each pole
pub type MomentVector = [f64; 3];

/// Which mapping a dataset was generated under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinearityMode {
    Linear,
    Nonlinear,
}

impl fmt::Display for LinearityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinearityMode::Linear => write!(f, "linear"),
            LinearityMode::Nonlinear => write!(f, "nonlinear"),
        }
    }
}

/// Per-coil voltage to moment transform, fixed for a whole dataset run
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MomentMapping {
    /// m = v · scale
    Linear { scale: f64 },
    /// m = v_max · tanh(v / nonlinearity_factor) · scale, saturating at ±v_max · scale
    Saturating { scale: f64, v_max: f64, nonlinearity_factor: f64 },
}

impl MomentMapping {
    pub fn mode(&self) -> LinearityMode {
        match self {
            MomentMapping::Linear { .. } => LinearityMode::Linear,
            MomentMapping::Saturating { .. } => LinearityMode::Nonlinear,
        }
    }

    #[inline]
    pub fn moment(&self, voltage: f64) -> f64 {
        match *self {
            MomentMapping::Linear { scale } => voltage * scale,
            MomentMapping::Saturating { scale, v_max, nonlinearity_factor } => {
                v_max * (voltage / nonlinearity_factor).tanh() * scale
            }
        }
    }

    /// Applies the mapping to each coil independently
    pub fn moments(&self, voltage: &[f64; 3]) -> MomentVector {
        voltage.map(|v| self.moment(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCALE: f64 = 1e8;
    const V_MAX: f64 = 10.0;

    fn saturating() -> MomentMapping {
        MomentMapping::Saturating { scale: SCALE, v_max: V_MAX, nonlinearity_factor: 15.0 }
    }

    #[test]
    fn test_linear_is_proportional() {
        let linear = MomentMapping::Linear { scale: SCALE };
        assert_eq!(linear.moment(0.0), 0.0);
        for v in [-10.0, -3.3, 0.01, 4.0, 9.99] {
            let lhs = linear.moment(2.0 * v);
            let rhs = 2.0 * linear.moment(v);
            assert!((lhs - rhs).abs() <= 1e-9 * rhs.abs().max(1.0));
        }
        assert_eq!(linear.moment(-10.0), -1e9);
    }

    #[test]
    fn test_saturating_is_bounded() {
        let mapping = saturating();
        assert_eq!(mapping.moment(0.0), 0.0);
        for v in [-30.0, -10.0, -0.5, 0.5, 10.0, 30.0] {
            assert!(mapping.moment(v).abs() < V_MAX * SCALE, "v = {v}");
        }
    }

    #[test]
    fn test_saturating_limits() {
        let mapping = saturating();
        assert!((mapping.moment(1e6) - V_MAX * SCALE).abs() < 1e-6);
        assert!((mapping.moment(-1e6) + V_MAX * SCALE).abs() < 1e-6);
        // Odd and monotone
        assert!((mapping.moment(-4.0) + mapping.moment(4.0)).abs() < 1e-6);
        assert!(mapping.moment(5.0) > mapping.moment(4.0));
    }

    #[test]
    fn test_moments_do_not_mix_coils() {
        let mapping = saturating();
        let m = mapping.moments(&[10.0, 0.0, -5.0]);
        assert_eq!(m[0], mapping.moment(10.0));
        assert_eq!(m[1], 0.0);
        assert_eq!(m[2], mapping.moment(-5.0));
    }

    #[test]
    fn test_mode_tags() {
        assert_eq!(MomentMapping::Linear { scale: 1.0 }.mode(), LinearityMode::Linear);
        assert_eq!(saturating().mode(), LinearityMode::Nonlinear);
        assert_eq!(LinearityMode::Nonlinear.to_string(), "nonlinear");
    }
}
