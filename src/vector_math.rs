//! Minimal 3-vector helpers on top of nalgebra

use nalgebra::Vector3;

/// Positions, axes, moments and field values
pub type Vec3 = Vector3<f64>;

#[inline]
pub fn dot(a: &Vec3, b: &Vec3) -> f64 {
    a.dot(b)
}

/// Euclidean length. The zero vector has magnitude 0.
#[inline]
pub fn magnitude(a: &Vec3) -> f64 {
    a.norm()
}

#[inline]
pub fn from_array(v: [f64; 3]) -> Vec3 {
    Vec3::new(v[0], v[1], v[2])
}
