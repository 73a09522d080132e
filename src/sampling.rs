//! Voltage sampling policies
//!
//! - `individual`: one pole swept across the range while the other two are held at zero
//! - `random`: every coordinate uniform on [-v_max, v_max]
//!
//! Validation sets use `random` with their own count.

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::error::{Error, Result};

/// Voltage applied to each of the three coils
pub type VoltageVector = [f64; 3];

/// `n` evenly spaced values from `start` to `stop` inclusive.
///
/// The last element is exactly `stop`; `n == 1` yields `[start]`.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            values[n - 1] = stop;
            values
        }
    }
}

/// Range half-width must be positive and finite
pub fn check_v_max(v_max: f64) -> Result<()> {
    if v_max.is_finite() && v_max > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid("v_max", format!("must be positive and finite, got {}", v_max)))
    }
}

/// Per-pole sweep: `3n` vectors, pole 1 block first, then pole 2, then pole 3.
/// Inactive coordinates are exactly zero.
pub fn individual(n: usize, v_max: f64) -> Result<Vec<VoltageVector>> {
    check_v_max(v_max)?;
    let sweep = linspace(-v_max, v_max, n);
    let mut voltages = Vec::with_capacity(3 * n);
    for pole in 0..3 {
        for &v in &sweep {
            let mut voltage = [0.0; 3];
            voltage[pole] = v;
            voltages.push(voltage);
        }
    }
    Ok(voltages)
}

/// `n` independent tri-pole samples drawn from `rng`
pub fn random<R: Rng + ?Sized>(n: usize, v_max: f64, rng: &mut R) -> Result<Vec<VoltageVector>> {
    check_v_max(v_max)?;
    let dist = Uniform::new_inclusive(-v_max, v_max);
    Ok((0..n)
        .map(|_| [dist.sample(rng), dist.sample(rng), dist.sample(rng)])
        .collect())
}
