//! Total field of the three poles at the observation point

use crate::dipole::field_at;
use crate::geometry::{DipolePose, PoleGeometry};
use crate::moment::MomentVector;
use crate::vector_math::{from_array, Vec3};

/// Sum of the three dipole contributions. All poles use the shared `axis`;
/// the ambient field is zero and is not added.
pub fn total_field(
    point: &Vec3,
    moments: &MomentVector,
    axis: &Vec3,
    poles: &[DipolePose; 3],
    mu0: f64,
) -> Vec3 {
    let mut b = Vec3::zeros();
    for (pole, &m) in poles.iter().zip(moments.iter()) {
        b += field_at(point, &pole.position, m, axis, mu0);
    }
    b
}

/// Immutable field-model configuration: where the field is observed, how the
/// poles sit, and the field constant. The poles share one orientation.
#[derive(Debug, Clone)]
pub struct FieldModel {
    pub point: Vec3,
    pub poles: [DipolePose; 3],
    pub mu0: f64,
}

impl FieldModel {
    pub fn new(geometry: &PoleGeometry, observation_point: [f64; 3], mu0: f64) -> Self {
        Self {
            point: from_array(observation_point),
            poles: geometry.poses(),
            mu0,
        }
    }

    /// Shared dipole orientation
    pub fn axis(&self) -> &Vec3 {
        &self.poles[0].axis
    }

    pub fn total_field(&self, moments: &MomentVector) -> Vec3 {
        total_field(&self.point, moments, self.axis(), &self.poles, self.mu0)
    }

    /// Contribution of pole `index` alone
    pub fn pole_field(&self, index: usize, moment: f64) -> Vec3 {
        let pole = &self.poles[index];
        field_at(&self.point, &pole.position, moment, &pole.axis, self.mu0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_model() -> FieldModel {
        FieldModel::new(&PoleGeometry::default(), [0.0, 0.0, 0.0], 1e-7)
    }

    #[test]
    fn test_single_pole_decomposes_exactly() {
        let model = reference_model();
        for i in 0..3 {
            let mut moments = [0.0; 3];
            moments[i] = 7.5e8;
            let total = model.total_field(&moments);
            let single = model.pole_field(i, 7.5e8);
            assert_eq!(total, single);
        }
    }

    #[test]
    fn test_sum_of_contributions() {
        let model = reference_model();
        let moments = [1e8, -3e8, 2.5e8];
        let expected = (0..3).fold(Vec3::zeros(), |acc, i| acc + model.pole_field(i, moments[i]));
        assert!((model.total_field(&moments) - expected).norm() < 1e-9);
    }

    #[test]
    fn test_equal_moments_cancel_in_plane() {
        // Three identical poles 120° apart: the in-plane components cancel
        let b = reference_model().total_field(&[1e9, 1e9, 1e9]);
        assert!(b.x.abs() < 1e-9 && b.y.abs() < 1e-9);
        assert!(b.z.abs() > 1.0);
    }

    #[test]
    fn test_axis_comes_from_the_poses() {
        let geometry = PoleGeometry { axis: [1.0, 0.0, 0.0], ..Default::default() };
        let model = FieldModel::new(&geometry, [0.0, 0.0, 0.0], 1e-7);
        assert_eq!(*model.axis(), Vec3::x());

        let moments = [2e8, -1e8, 5e8];
        let poles = geometry.poses();
        let direct = total_field(&Vec3::zeros(), &moments, &Vec3::x(), &poles, 1e-7);
        assert_eq!(model.total_field(&moments), direct);

        // Tilting the shared axis changes the field
        let upright = reference_model().total_field(&moments);
        assert!((model.total_field(&moments) - upright).norm() > 1.0);
    }

    #[test]
    fn test_reference_worked_example() {
        let b = reference_model().total_field(&[-1e9, 0.0, 0.0]);
        assert!((b.x + 53.033).abs() < 1e-2);
        assert!(b.y.abs() < 1e-2);
        assert!((b.z + 17.678).abs() < 1e-2);
    }
}
