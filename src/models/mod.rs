//! Physical system models
//!
//! Each model owns immutable parameters fixed at construction. The
//! projectile evaluates a closed form directly; the pendulum and
//! oscillator define pure derivative functions and drive them through
//! the solver.

mod oscillator;
mod pendulum;
mod projectile;

pub use oscillator::{Damping, Oscillator};
pub use pendulum::Pendulum;
pub use projectile::Projectile;

use crate::error::SimulationError;

/// Evenly spaced evaluation times over `[0, time_end]`, inclusive of
/// both ends
pub(crate) fn evaluation_times(
    time_end: f64,
    num_points: usize,
) -> Result<Vec<f64>, SimulationError> {
    if !time_end.is_finite() || time_end <= 0.0 {
        return Err(SimulationError::invalid(format!(
            "time_end must be positive and finite, got {time_end}"
        )));
    }
    if num_points < 2 {
        return Err(SimulationError::invalid(format!(
            "num_points must be at least 2, got {num_points}"
        )));
    }

    let last = (num_points - 1) as f64;
    Ok((0..num_points)
        .map(|i| time_end * i as f64 / last)
        .collect())
}
