//! mechsim - Time-evolution simulation of idealized mechanical systems
//!
//! Produces sampled trajectories for three single-degree-of-freedom systems:
//! projectile motion (closed-form kinematics), a damped nonlinear pendulum,
//! and a damped harmonic oscillator (both integrated numerically).
//!
//! # Architecture
//!
//! - Models own immutable physical parameters fixed at construction
//! - Dynamic models hand a pure derivative function and an initial state
//!   to the adaptive Dormand-Prince 5(4) solver
//! - Every `simulate` call returns a freshly allocated [`Trajectory`]
//!   owned by the caller, so concurrent simulations need no locking
//!
//! # Example
//!
//! ```rust,ignore
//! use mechsim::prelude::*;
//!
//! let pendulum = Pendulum::new(1.0, 1.0, 60f64.to_radians())?;
//! let trajectory = pendulum.simulate(10.0, 500)?;
//!
//! for (t, state) in trajectory.iter() {
//!     println!("t={:.3} theta={:.6} omega={:.6}", t, state[0], state[1]);
//! }
//! ```

pub mod error;
pub mod models;
pub mod solvers;
pub mod trajectory;
pub mod utils;

pub use error::SimulationError;
pub use models::{Damping, Oscillator, Pendulum, Projectile};
pub use solvers::{solve_ivp, IvpOptions};
pub use trajectory::Trajectory;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::SimulationError;
    pub use crate::models::{Damping, Oscillator, Pendulum, Projectile};
    pub use crate::solvers::{solve_ivp, IvpOptions};
    pub use crate::trajectory::Trajectory;
}
