//! Magnetic field of a single point dipole
//!
//! B(r) = μ₀ · (3 R (M·R) / |R|⁵ − M / |R|³), with R = r − r_pole and
//! M = m · axis. μ₀ here is the model's field constant, not 4π·10⁻⁷.

use crate::vector_math::{dot, Vec3};

/// Field of one dipole at `point`.
///
/// At the dipole location itself (`R == 0`) the field is defined as zero
/// rather than singular. Very small but non-zero `R` is left to floating point.
pub fn field_at(
    point: &Vec3,
    pole_position: &Vec3,
    moment_magnitude: f64,
    axis: &Vec3,
    mu0: f64,
) -> Vec3 {
    let r = point - pole_position;
    let r2 = dot(&r, &r);
    if r2 == 0.0 {
        return Vec3::zeros();
    }

    let m = axis * moment_magnitude;
    let r_mag = r2.sqrt();
    let r3 = r2 * r_mag;
    let r5 = r3 * r2;

    (r * (3.0 * dot(&m, &r) / r5) - m / r3) * mu0
}
