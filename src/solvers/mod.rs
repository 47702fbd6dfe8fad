//! Numerical integration
//!
//! Provides the adaptive ODE machinery behind the dynamic models:
//! - Dormand-Prince 5(4) embedded Runge-Kutta stepper with error control
//! - `solve_ivp` driver with adaptive timestepping and dense output

mod base;
mod ivp;
mod rkdp54;

pub use base::{IvpOptions, SolverError, StepOutcome};
pub use ivp::solve_ivp;
pub use rkdp54::RKDP54;
