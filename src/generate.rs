//! Dataset recipes and the generation run
//!
//! | Dataset | Voltages | Mode |
//! |---|---|---|
//! | individual_linear | individual(N) | linear |
//! | individual_nonlinear | individual(N) | non-linear |
//! | full_nonlinear | individual(N) ++ random(N_rand) | non-linear |
//! | validation_nonlinear | random(N_val) | non-linear |

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::dataset::{assemble, Dataset, DatasetKind};
use crate::moment::MomentMapping;
use crate::sampling::{individual, random, VoltageVector};
use crate::superposition::FieldModel;
use crate::vector_math::Vec3;
use crate::{Result, SimulationConfig};

#[derive(Debug, Clone, Copy, Default)]
pub struct GenerationOptions {
    /// Evaluate samples on the rayon pool. Row order is unchanged.
    pub parallel: bool,
}

/// The four datasets of one run plus the seed that drove the random blocks
#[derive(Debug, Clone)]
pub struct DatasetBundle {
    pub seed: u64,
    pub datasets: Vec<Dataset>,
}

impl DatasetBundle {
    pub fn get(&self, kind: DatasetKind) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.kind == kind)
    }
}

/// Validated configuration plus the field model built from it
#[derive(Debug, Clone)]
pub struct Generator {
    config: SimulationConfig,
    model: FieldModel,
    options: GenerationOptions,
}

impl Generator {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        Self::with_options(config, GenerationOptions::default())
    }

    pub fn with_options(config: SimulationConfig, options: GenerationOptions) -> Result<Self> {
        config.validate()?;
        let model = config.field_model();
        debug!(
            v_max = config.v_max,
            nonlinearity_factor = config.nonlinearity_factor,
            moment_scale = config.moment_scale,
            mu0 = config.mu0,
            "Field model configured"
        );
        Ok(Self { config, model, options })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn model(&self) -> &FieldModel {
        &self.model
    }

    /// Field for each voltage vector under `mapping`, in input order
    pub fn compute_fields(&self, mapping: &MomentMapping, voltages: &[VoltageVector]) -> Vec<Vec3> {
        let eval = |v: &VoltageVector| self.model.total_field(&mapping.moments(v));
        if self.options.parallel {
            voltages.par_iter().map(eval).collect()
        } else {
            voltages.iter().map(eval).collect()
        }
    }

    /// Build one dataset from an already sampled voltage sequence
    pub fn build(&self, kind: DatasetKind, voltages: &[VoltageVector]) -> Result<Dataset> {
        let mode = kind.mode();
        let mapping = self.config.mapping(mode);
        let fields = self.compute_fields(&mapping, voltages);
        let samples = assemble(voltages, &fields)?;

        info!("Generated {} dataset: {} rows ({})", kind, samples.len(), mode);
        Ok(Dataset { kind, mode, samples })
    }

    /// Produce all four datasets.
    ///
    /// A single `StdRng` seeded from `seed` draws the full dataset's random
    /// block first, then the validation block.
    pub fn generate_all(&self, seed: u64) -> Result<DatasetBundle> {
        let c = &self.config;
        let mut rng = StdRng::seed_from_u64(seed);

        let sweep = individual(c.per_pole_samples, c.v_max)?;

        let mut full = sweep.clone();
        full.extend(random(c.random_samples, c.v_max, &mut rng)?);
        let validation = random(c.validation_samples, c.v_max, &mut rng)?;

        let datasets = vec![
            self.build(DatasetKind::IndividualLinear, &sweep)?,
            self.build(DatasetKind::IndividualNonlinear, &sweep)?,
            self.build(DatasetKind::FullNonlinear, &full)?,
            self.build(DatasetKind::ValidationNonlinear, &validation)?,
        ];

        info!("Generation run complete (seed {})", seed);
        Ok(DatasetBundle { seed, datasets })
    }
}
