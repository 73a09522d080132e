//! Dataset rows and assembly

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};
use crate::moment::LinearityMode;
use crate::sampling::VoltageVector;
use crate::vector_math::Vec3;

/// Column names after the leading row index
pub const COLUMNS: [&str; 6] = ["B_x", "B_y", "B_z", "V_1", "V_2", "V_3"];

/// One dataset row: the field produced by a voltage vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSample {
    pub field: Vec3,
    pub voltage: VoltageVector,
}

impl FieldSample {
    /// Row values in column order
    pub fn to_row(&self) -> [f64; 6] {
        [
            self.field.x,
            self.field.y,
            self.field.z,
            self.voltage[0],
            self.voltage[1],
            self.voltage[2],
        ]
    }

    pub fn from_row(row: [f64; 6]) -> Self {
        Self {
            field: Vec3::new(row[0], row[1], row[2]),
            voltage: [row[3], row[4], row[5]],
        }
    }
}

/// The four datasets produced per run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    IndividualLinear,
    IndividualNonlinear,
    FullNonlinear,
    ValidationNonlinear,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 4] = [
        DatasetKind::IndividualLinear,
        DatasetKind::IndividualNonlinear,
        DatasetKind::FullNonlinear,
        DatasetKind::ValidationNonlinear,
    ];

    pub fn mode(&self) -> LinearityMode {
        match self {
            DatasetKind::IndividualLinear => LinearityMode::Linear,
            DatasetKind::IndividualNonlinear
            | DatasetKind::FullNonlinear
            | DatasetKind::ValidationNonlinear => LinearityMode::Nonlinear,
        }
    }

    /// File name without extension
    pub fn file_stem(&self) -> &'static str {
        match self {
            DatasetKind::IndividualLinear => "individual_linear",
            DatasetKind::IndividualNonlinear => "individual_nonlinear",
            DatasetKind::FullNonlinear => "full_nonlinear",
            DatasetKind::ValidationNonlinear => "validation_nonlinear",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// Ordered samples of one dataset, tagged with the mapping they were generated under
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub kind: DatasetKind,
    pub mode: LinearityMode,
    pub samples: Vec<FieldSample>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn file_stem(&self) -> &'static str {
        self.kind.file_stem()
    }
}

/// Zip voltages with their computed fields, preserving order.
///
/// Unequal lengths abort the dataset rather than truncating.
pub fn assemble(voltages: &[VoltageVector], fields: &[Vec3]) -> Result<Vec<FieldSample>> {
    if voltages.len() != fields.len() {
        return Err(Error::LengthMismatch {
            voltages: voltages.len(),
            fields: fields.len(),
        });
    }

    Ok(voltages
        .iter()
        .zip(fields)
        .map(|(&voltage, &field)| FieldSample { field, voltage })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_assemble_preserves_order() {
        let voltages = vec![[1.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 3.0]];
        let fields = vec![
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(2.0, 2.0, 2.0),
            Vec3::new(3.0, 3.0, 3.0),
        ];

        let samples = assemble(&voltages, &fields).unwrap();
        assert_eq!(samples.len(), 3);
        for (i, sample) in samples.iter().enumerate() {
            assert_eq!(sample.voltage, voltages[i]);
            assert_eq!(sample.field, fields[i]);
        }
    }

    #[test]
    fn test_assemble_rejects_length_mismatch() {
        let voltages = vec![[1.0, 0.0, 0.0], [0.0, 2.0, 0.0]];
        let fields = vec![Vec3::zeros()];

        match assemble(&voltages, &fields) {
            Err(Error::LengthMismatch { voltages, fields }) => {
                assert_eq!((voltages, fields), (2, 1));
            }
            other => panic!("Expected LengthMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_row_layout() {
        let sample = FieldSample {
            field: Vec3::new(-53.0, 0.5, -17.6),
            voltage: [-10.0, 0.0, 2.0],
        };
        assert_eq!(sample.to_row(), [-53.0, 0.5, -17.6, -10.0, 0.0, 2.0]);
        assert_eq!(FieldSample::from_row(sample.to_row()), sample);
    }

    #[test]
    fn test_kind_modes_and_stems() {
        let expected = [
            (LinearityMode::Linear, "individual_linear"),
            (LinearityMode::Nonlinear, "individual_nonlinear"),
            (LinearityMode::Nonlinear, "full_nonlinear"),
            (LinearityMode::Nonlinear, "validation_nonlinear"),
        ];
        for (kind, (mode, stem)) in DatasetKind::ALL.iter().zip(expected) {
            assert_eq!(kind.mode(), mode, "{:?}", kind);
            assert_eq!(kind.file_stem(), stem);
            assert_eq!(kind.to_string(), stem);
        }

        // Only the first individual sweep is linear
        let linear = DatasetKind::ALL
            .iter()
            .filter(|k| k.mode() == LinearityMode::Linear)
            .count();
        assert_eq!(linear, 1);
    }
}
