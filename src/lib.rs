//! tripole-field: magnetic field model of a three-pole electromagnet
//!
//! This crate provides:
//! - A point-dipole field model and its superposition over three fixed poles
//! - Linear and saturating coil-voltage to moment mappings
//! - Voltage sampling (per-pole sweeps, uniform random tri-pole samples)
//! - Assembly of the four calibration datasets and their CSV persistence
//!
//! Units follow the reference scenario: voltages in volts, and a model-scale
//! field constant chosen so fields land in a convenient numeric range.

pub mod vector_math;
pub mod geometry;
pub mod dipole;
pub mod superposition;
pub mod moment;
pub mod sampling;
pub mod dataset;
pub mod generate;
pub mod export;
pub mod verify;
pub mod error;

pub use vector_math::Vec3;
pub use geometry::{DipolePose, PoleGeometry};
pub use dipole::field_at;
pub use superposition::{total_field, FieldModel};
pub use moment::{LinearityMode, MomentMapping, MomentVector};
pub use sampling::VoltageVector;
pub use dataset::{assemble, Dataset, DatasetKind, FieldSample};
pub use generate::{DatasetBundle, GenerationOptions, Generator};
pub use export::{read_csv, write_bundle, write_csv, RunManifest};
pub use verify::{verify_run, verify_samples, VerifyReport};
pub use error::{Error, Result};

use serde::{Deserialize, Serialize};

/// Every input of a generation run. Recorded verbatim in the run manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Voltage range is [-v_max, v_max]
    pub v_max: f64,
    /// Voltage at which the saturating mapping reaches tanh(1)
    pub nonlinearity_factor: f64,
    /// Volts to model-scale moment
    pub moment_scale: f64,
    /// Field constant of the dipole model
    pub mu0: f64,
    pub geometry: PoleGeometry,
    pub observation_point: [f64; 3],
    /// Sweep length per pole in the individual datasets
    pub per_pole_samples: usize,
    /// Random tri-pole samples appended to the full dataset
    pub random_samples: usize,
    /// Random tri-pole samples in the validation dataset
    pub validation_samples: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            v_max: 10.0,
            nonlinearity_factor: 15.0,
            moment_scale: 1e8,
            mu0: 1e-7,
            geometry: PoleGeometry::default(),
            observation_point: [0.0, 0.0, 0.0],
            per_pole_samples: 128,
            random_samples: 1024,
            validation_samples: 256,
        }
    }
}

impl SimulationConfig {
    /// Reject parameters that would make generation meaningless.
    /// Runs before any field is computed.
    pub fn validate(&self) -> Result<()> {
        sampling::check_v_max(self.v_max)?;
        if !(self.nonlinearity_factor.is_finite() && self.nonlinearity_factor > 0.0) {
            return Err(Error::invalid(
                "nonlinearity_factor",
                format!("must be positive and finite, got {}", self.nonlinearity_factor),
            ));
        }
        if !self.moment_scale.is_finite() {
            return Err(Error::invalid(
                "moment_scale",
                format!("must be finite, got {}", self.moment_scale),
            ));
        }
        if !self.mu0.is_finite() {
            return Err(Error::invalid("mu0", format!("must be finite, got {}", self.mu0)));
        }
        for (name, count) in [
            ("per_pole_samples", self.per_pole_samples),
            ("random_samples", self.random_samples),
            ("validation_samples", self.validation_samples),
        ] {
            if count == 0 {
                return Err(Error::invalid(name, "sample count must be positive"));
            }
        }

        let g = &self.geometry;
        let scalars = [
            g.radial_distance,
            g.pole_height,
            g.start_angle_deg,
            g.angular_separation_deg,
        ];
        let finite = scalars
            .iter()
            .chain(g.axis.iter())
            .chain(self.observation_point.iter())
            .all(|v| v.is_finite());
        if !finite {
            return Err(Error::invalid(
                "geometry",
                "pole geometry and observation point must be finite",
            ));
        }
        if g.axis.iter().all(|&c| c == 0.0) {
            return Err(Error::invalid("geometry.axis", "dipole axis must be non-zero"));
        }

        Ok(())
    }

    /// The moment mapping used for datasets of the given mode
    pub fn mapping(&self, mode: LinearityMode) -> MomentMapping {
        match mode {
            LinearityMode::Linear => MomentMapping::Linear { scale: self.moment_scale },
            LinearityMode::Nonlinear => MomentMapping::Saturating {
                scale: self.moment_scale,
                v_max: self.v_max,
                nonlinearity_factor: self.nonlinearity_factor,
            },
        }
    }

    pub fn field_model(&self) -> FieldModel {
        FieldModel::new(&self.geometry, self.observation_point, self.mu0)
    }

    /// Expected row count of a dataset under this configuration
    pub fn row_count(&self, kind: DatasetKind) -> usize {
        match kind {
            DatasetKind::IndividualLinear | DatasetKind::IndividualNonlinear => {
                3 * self.per_pole_samples
            }
            DatasetKind::FullNonlinear => 3 * self.per_pole_samples + self.random_samples,
            DatasetKind::ValidationNonlinear => self.validation_samples,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_reference_scenario() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.row_count(DatasetKind::FullNonlinear), 1408);
        assert_eq!(config.row_count(DatasetKind::IndividualLinear), 384);
        assert_eq!(config.row_count(DatasetKind::ValidationNonlinear), 256);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let base = SimulationConfig::default;
        let cases: Vec<(&str, SimulationConfig)> = vec![
            ("v_max", SimulationConfig { v_max: 0.0, ..base() }),
            ("v_max", SimulationConfig { v_max: -10.0, ..base() }),
            ("v_max", SimulationConfig { v_max: f64::NAN, ..base() }),
            ("nonlinearity_factor", SimulationConfig { nonlinearity_factor: 0.0, ..base() }),
            ("per_pole_samples", SimulationConfig { per_pole_samples: 0, ..base() }),
            ("random_samples", SimulationConfig { random_samples: 0, ..base() }),
            ("validation_samples", SimulationConfig { validation_samples: 0, ..base() }),
            ("mu0", SimulationConfig { mu0: f64::INFINITY, ..base() }),
        ];

        for (expected, config) in cases {
            match config.validate() {
                Err(Error::InvalidParameter { name, .. }) => assert_eq!(name, expected),
                other => panic!("{expected}: expected InvalidParameter, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_rejects_zero_axis() {
        let mut config = SimulationConfig::default();
        config.geometry.axis = [0.0, 0.0, 0.0];
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidParameter { name: "geometry.axis", .. })
        ));
    }

    #[test]
    fn test_mapping_follows_mode() {
        let config = SimulationConfig::default();
        assert_eq!(config.mapping(LinearityMode::Linear), MomentMapping::Linear { scale: 1e8 });
        assert_eq!(config.mapping(LinearityMode::Nonlinear).mode(), LinearityMode::Nonlinear);
    }

    #[test]
    fn test_config_json_overrides() {
        let json = r#"{"v_max": 5.0, "random_samples": 10}"#;
        let config: SimulationConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.v_max, 5.0);
        assert_eq!(config.random_samples, 10);
        assert_eq!(config.per_pole_samples, 128);
    }

    #[test]
    fn test_config_json_rejects_misspelled_keys() {
        let json = r#"{"vmax": 5.0, "per_pole": 4}"#;
        let err = serde_json::from_str::<SimulationConfig>(json).unwrap_err();
        assert!(err.to_string().contains("unknown field `vmax`"), "{err}");

        let nested = r#"{"geometry": {"radius": 2.0}}"#;
        let err = serde_json::from_str::<SimulationConfig>(nested).unwrap_err();
        assert!(err.to_string().contains("unknown field `radius`"), "{err}");
    }
}
