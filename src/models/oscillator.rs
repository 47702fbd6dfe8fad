//! Damped harmonic oscillator: linear dynamics through the adaptive solver

use nalgebra::DVector;

use super::evaluation_times;
use crate::error::SimulationError;
use crate::solvers::{solve_ivp, IvpOptions};
use crate::trajectory::Trajectory;

/// Damping regime, derived from the parameters
///
/// Classified by the sign of `b^2 - 4 k m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Damping {
    /// `b^2 < 4 k m`: oscillatory decay
    Underdamped,
    /// `b^2 = 4 k m`: fastest non-oscillatory return
    CriticallyDamped,
    /// `b^2 > 4 k m`: slow non-oscillatory decay
    Overdamped,
}

/// Mass on a spring with viscous damping
///
/// State is `[x, v]` (displacement in m, velocity in m/s):
///
/// ```text
/// dx/dt = v
/// dv/dt = -(k/m) x - (b/m) v
/// ```
///
/// # Example
///
/// ```ignore
/// let oscillator = Oscillator::new(1.0, 10.0, 0.5)?;
/// assert_eq!(oscillator.damping_class(), Damping::Underdamped);
/// let trajectory = oscillator.simulate(10.0, 500)?;
/// ```
#[derive(Debug, Clone)]
pub struct Oscillator {
    mass: f64,
    spring_constant: f64,
    damping: f64,
    x0: f64,
    v0: f64,
    options: IvpOptions,
}

impl Oscillator {
    /// Create an oscillator released from unit displacement at rest
    ///
    /// # Arguments
    ///
    /// * `mass` - Mass (kg), must be positive
    /// * `spring_constant` - Spring constant (N/m), must be positive
    /// * `damping` - Damping coefficient (N s/m), must be non-negative
    ///
    /// The initial state defaults to `[1, 0]`; see
    /// [`Oscillator::with_initial_state`].
    pub fn new(mass: f64, spring_constant: f64, damping: f64) -> Result<Self, SimulationError> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(SimulationError::invalid(format!(
                "oscillator mass must be positive, got {mass}"
            )));
        }
        if !spring_constant.is_finite() || spring_constant <= 0.0 {
            return Err(SimulationError::invalid(format!(
                "spring constant must be positive, got {spring_constant}"
            )));
        }
        if !damping.is_finite() || damping < 0.0 {
            return Err(SimulationError::invalid(format!(
                "damping coefficient must be non-negative, got {damping}"
            )));
        }

        Ok(Self {
            mass,
            spring_constant,
            damping,
            x0: 1.0,
            v0: 0.0,
            options: IvpOptions::default(),
        })
    }

    /// Set the initial displacement and velocity (default: `[1, 0]`)
    pub fn with_initial_state(mut self, x0: f64, v0: f64) -> Result<Self, SimulationError> {
        if !x0.is_finite() || !v0.is_finite() {
            return Err(SimulationError::invalid("initial state must be finite"));
        }
        self.x0 = x0;
        self.v0 = v0;
        Ok(self)
    }

    /// Set solver error tolerances (defaults: rtol 1e-3, atol 1e-6)
    pub fn with_tolerances(mut self, rtol: f64, atol: f64) -> Self {
        self.options = IvpOptions::with_tolerances(rtol, atol);
        self
    }

    /// Mass (kg)
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Spring constant (N/m)
    pub fn spring_constant(&self) -> f64 {
        self.spring_constant
    }

    /// Damping coefficient (N s/m)
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Initial state `[x0, v0]`
    pub fn initial_state(&self) -> DVector<f64> {
        DVector::from_vec(vec![self.x0, self.v0])
    }

    /// Damping regime from `b^2` versus `4 k m`
    pub fn damping_class(&self) -> Damping {
        let discriminant = self.damping * self.damping - 4.0 * self.spring_constant * self.mass;
        if discriminant < 0.0 {
            Damping::Underdamped
        } else if discriminant > 0.0 {
            Damping::Overdamped
        } else {
            Damping::CriticallyDamped
        }
    }

    /// State derivative `[dx/dt, dv/dt]` at `(t, state)`
    ///
    /// Pure function of its arguments; safe to call concurrently.
    pub fn derivative(&self, _t: f64, state: &DVector<f64>) -> DVector<f64> {
        let x = state[0];
        let v = state[1];
        DVector::from_vec(vec![
            v,
            -(self.spring_constant / self.mass) * x - (self.damping / self.mass) * v,
        ])
    }

    /// Integrate over `[0, time_end]`, sampled at `num_points` evenly
    /// spaced times inclusive of both ends
    ///
    /// The first sample equals the configured initial state exactly.
    /// States are `[x, v]`.
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
