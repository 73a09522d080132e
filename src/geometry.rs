//! Pole placement for the tri-pole magnet

use serde::{Deserialize, Serialize};
use crate::vector_math::{from_array, Vec3};

/// One physical pole: a point dipole position and its orientation axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DipolePose {
    pub position: Vec3,
    pub axis: Vec3,
}

/// Geometric constants the three poles are built from.
///
/// Pole `i` sits at `(r cos θᵢ, r sin θᵢ, h)` with
/// `θᵢ = start_angle + i · angular_separation`. All poles share `axis`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoleGeometry {
    /// Distance of each pole from the symmetry axis
    pub radial_distance: f64,
    /// Offset of the pole plane along z from the observation plane
    pub pole_height: f64,
    /// Angle of pole 1 around the symmetry axis (degrees)
    pub start_angle_deg: f64,
    /// Angle between neighbouring poles (degrees)
    pub angular_separation_deg: f64,
    /// Shared dipole orientation
    pub axis: [f64; 3],
}

impl Default for PoleGeometry {
    fn default() -> Self {
        Self {
            radial_distance: 1.0,
            pole_height: 1.0,
            start_angle_deg: 0.0,
            angular_separation_deg: 120.0,
            axis: [0.0, 0.0, 1.0],
        }
    }
}

impl PoleGeometry {
    pub fn axis(&self) -> Vec3 {
        from_array(self.axis)
    }

    /// Position of pole `index` (0-based)
    pub fn position(&self, index: usize) -> Vec3 {
        let step = index as f64 * self.angular_separation_deg;
        let theta = (self.start_angle_deg + step).to_radians();
        Vec3::new(
            self.radial_distance * theta.cos(),
            self.radial_distance * theta.sin(),
            self.pole_height,
        )
    }

    pub fn poses(&self) -> [DipolePose; 3] {
        let axis = self.axis();
        [0usize, 1, 2].map(|i| DipolePose { position: self.position(i), axis })
    }
}
