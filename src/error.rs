//! Simulation error taxonomy

use nalgebra::DVector;
use thiserror::Error;

use crate::solvers::SolverError;

/// Errors surfaced by model construction and `simulate` calls
///
/// No error is ever swallowed and replaced with a default value; every
/// failure propagates to the immediate caller and no partial trajectory
/// escapes.
#[derive(Error, Debug)]
pub enum SimulationError {
    /// Malformed parameters or request, rejected before any integration work
    #[error("invalid simulation request: {reason}")]
    InvalidRequest { reason: String },

    /// The solver detected a non-finite state or failed to converge within
    /// its bounded step-size reductions
    #[error("integration failed at t = {time}: {cause}")]
    Integration {
        time: f64,
        state: DVector<f64>,
        cause: SolverError,
    },
}

impl SimulationError {
    /// Construct an `InvalidRequest` error
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }
}
