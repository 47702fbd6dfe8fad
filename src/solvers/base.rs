//! Base solver types

use nalgebra::DVector;
use thiserror::Error;

use crate::utils::constants::{
    SOL_REJECTS_MAX, SOL_TIMESTEP_MAX, SOL_TIMESTEP_MIN, SOL_TOLERANCE_LTE_ABS,
    SOL_TOLERANCE_LTE_REL,
};

/// Solver-internal errors
///
/// Converted into [`crate::SimulationError::Integration`] at the
/// `solve_ivp` boundary, where the offending state is attached.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("non-finite value in state or derivative at t = {time}")]
    NonFinite { time: f64 },

    #[error("timestep {dt} fell below the minimum {dt_min} at t = {time}")]
    TimestepTooSmall { time: f64, dt: f64, dt_min: f64 },

    #[error("{count} consecutive step rejections at t = {time}")]
    TooManyRejects { time: f64, count: usize },
}

/// Result of one trial integration step
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// Whether the local error estimate passed the tolerance test
    pub accepted: bool,
    /// Scaled local error norm (acceptable when <= 1)
    pub error_norm: f64,
    /// Recommended timestep scale factor, clipped to [0.1, 10.0]
    pub scale: f64,
    /// 5th-order candidate state at `t + dt`
    pub state: DVector<f64>,
    /// Derivative at `t + dt` (the FSAL stage), reused for dense output
    /// and as the next step's first stage
    pub derivative: DVector<f64>,
}

/// Options for [`crate::solvers::solve_ivp`]
#[derive(Debug, Clone)]
pub struct IvpOptions {
    /// Relative error tolerance (default: 1e-3)
    pub rtol: f64,
    /// Absolute error tolerance (default: 1e-6)
    pub atol: f64,
    /// Initial timestep; `None` picks a fraction of the time span
    pub h_initial: Option<f64>,
    /// Minimum timestep before the solver gives up
    pub h_min: f64,
    /// Maximum timestep
    pub h_max: f64,
    /// Maximum consecutive rejections before the solver gives up
    pub max_rejects: usize,
}

impl Default for IvpOptions {
    fn default() -> Self {
        Self {
            rtol: SOL_TOLERANCE_LTE_REL,
            atol: SOL_TOLERANCE_LTE_ABS,
            h_initial: None,
            h_min: SOL_TIMESTEP_MIN,
            h_max: SOL_TIMESTEP_MAX,
            max_rejects: SOL_REJECTS_MAX,
        }
    }
}

impl IvpOptions {
    /// Options with custom tolerances, other fields at their defaults
    pub fn with_tolerances(rtol: f64, atol: f64) -> Self {
        Self {
            rtol,
            atol,
            ..Self::default()
        }
    }
}
