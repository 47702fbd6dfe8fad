//! Damped pendulum: nonlinear dynamics through the adaptive solver

use nalgebra::DVector;

use super::evaluation_times;
use crate::error::SimulationError;
use crate::solvers::{solve_ivp, IvpOptions};
use crate::trajectory::Trajectory;
use crate::utils::constants::STANDARD_GRAVITY;

/// Pendulum with viscous damping, full nonlinear dynamics
///
/// State is `[theta, omega]` (angle in rad, angular velocity in rad/s):
///
/// ```text
/// dtheta/dt = omega
/// domega/dt = -(b/m) omega - (g/L) sin(theta)
/// ```
///
/// No small-angle linearization is applied.
///
/// # Example
///
/// ```ignore
/// let pendulum = Pendulum::new(1.0, 1.0, 60f64.to_radians())?
///     .with_damping(0.2)?;
/// let trajectory = pendulum.simulate(10.0, 500)?;
/// ```
#[derive(Debug, Clone)]
pub struct Pendulum {
    length: f64,
    mass: f64,
    theta0: f64,
    omega0: f64,
    damping: f64,
    g: f64,
    options: IvpOptions,
}

impl Pendulum {
    /// Create an undamped pendulum released from rest
    ///
    /// # Arguments
    ///
    /// * `length` - Pendulum length (m), must be positive
    /// * `mass` - Bob mass (kg), must be positive
    /// * `theta0` - Initial angle (rad)
    pub fn new(length: f64, mass: f64, theta0: f64) -> Result<Self, SimulationError> {
        if !length.is_finite() || length <= 0.0 {
            return Err(SimulationError::invalid(format!(
                "pendulum length must be positive, got {length}"
            )));
        }
        if !mass.is_finite() || mass <= 0.0 {
            return Err(SimulationError::invalid(format!(
                "pendulum mass must be positive, got {mass}"
            )));
        }
        if !theta0.is_finite() {
            return Err(SimulationError::invalid("initial angle must be finite"));
        }

        Ok(Self {
            length,
            mass,
            theta0,
            omega0: 0.0,
            damping: 0.0,
            g: STANDARD_GRAVITY,
            options: IvpOptions::default(),
        })
    }

    /// Set the damping coefficient (default: 0)
    pub fn with_damping(mut self, damping: f64) -> Result<Self, SimulationError> {
        if !damping.is_finite() || damping < 0.0 {
            return Err(SimulationError::invalid(format!(
                "damping coefficient must be non-negative, got {damping}"
            )));
        }
        self.damping = damping;
        Ok(self)
    }

    /// Set the initial angular velocity (rad/s, default: 0)
    pub fn with_initial_velocity(mut self, omega0: f64) -> Result<Self, SimulationError> {
        if !omega0.is_finite() {
            return Err(SimulationError::invalid(
                "initial angular velocity must be finite",
            ));
        }
        self.omega0 = omega0;
        Ok(self)
    }

    /// Set solver error tolerances (defaults: rtol 1e-3, atol 1e-6)
    pub fn with_tolerances(mut self, rtol: f64, atol: f64) -> Self {
        self.options = IvpOptions::with_tolerances(rtol, atol);
        self
    }

    /// Pendulum length (m)
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Bob mass (kg)
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Damping coefficient
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Initial state `[theta0, omega0]`
    pub fn initial_state(&self) -> DVector<f64> {
        DVector::from_vec(vec![self.theta0, self.omega0])
    }

    /// State derivative `[dtheta/dt, domega/dt]` at `(t, state)`
    ///
    /// Pure function of its arguments; safe to call concurrently.
    pub fn derivative(&self, _t: f64, state: &DVector<f64>) -> DVector<f64> {
        let theta = state[0];
        let omega = state[1];
        DVector::from_vec(vec![
            omega,
            -(self.damping / self.mass) * omega - (self.g / self.length) * theta.sin(),
        ])
    }

    /// Integrate over `[0, time_end]`, sampled at `num_points` evenly
    /// spaced times inclusive of both ends
    ///
    /// The first sample equals the configured initial state exactly.
    /// States are `[theta, omega]`.
    ///
    /// # Errors
    ///
    /// * `SimulationError::InvalidRequest` if `time_end <= 0` or
    ///   `num_points < 2`
    /// * `SimulationError::Integration` if the solver fails
    pub fn simulate(&self, time_end: f64, num_points: usize) -> Result<Trajectory, SimulationError> {
        let t_eval = evaluation_times(time_end, num_points)?;

        solve_ivp(
            |t, state| self.derivative(t, state),
            (0.0, time_end),
            self.initial_state(),
            &t_eval,
            &self.options,
        )
    }
}
