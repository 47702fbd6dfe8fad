//! Dormand-Prince 5(4) adaptive Runge-Kutta stepper

use nalgebra::DVector;

use super::base::{SolverError, StepOutcome};
use crate::utils::constants::{SOL_BETA, SOL_SCALE_MAX, SOL_SCALE_MIN};

/// Stage evaluation times (c vector)
const C: [f64; 7] = [0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0, 1.0];

/// Butcher tableau coefficients (a_ij)
#[rustfmt::skip]
const A: [&[f64]; 6] = [
    &[1.0/5.0],
    &[3.0/40.0, 9.0/40.0],
    &[44.0/45.0, -56.0/15.0, 32.0/9.0],
    &[19372.0/6561.0, -25360.0/2187.0, 64448.0/6561.0, -212.0/729.0],
    &[9017.0/3168.0, -355.0/33.0, 46732.0/5247.0, 49.0/176.0, -5103.0/18656.0],
    &[35.0/384.0, 0.0, 500.0/1113.0, 125.0/192.0, -2187.0/6784.0, 11.0/84.0],
];

/// Difference of the 5th- and 4th-order weight rows, for the local
/// truncation error estimate
const TR: [f64; 7] = [
    71.0 / 57600.0,
    0.0,
    -71.0 / 16695.0,
    71.0 / 1920.0,
    -17253.0 / 339200.0,
    22.0 / 525.0,
    -1.0 / 40.0,
];

/// Dormand-Prince 5(4) adaptive stepper (DOPRI5)
///
/// Seven-stage, 5th order Runge-Kutta method with embedded 4th order
/// error estimate for adaptive timestepping. The industry-standard
/// adaptive explicit solver and the basis of MATLAB's `ode45` and
/// SciPy's `solve_ivp` default.
///
/// Has the FSAL property (First Same As Last): the seventh stage is the
/// derivative at the step endpoint, so [`StepOutcome::derivative`] doubles
/// as the next step's first stage and as the endpoint slope for cubic
/// Hermite dense output.
///
/// # Characteristics
/// - Order: 5 (propagating) / 4 (embedded)
/// - Stages: 7 (6 fresh evaluations per step with FSAL reuse)
/// - Explicit, adaptive timestep
///
/// # References
/// - Dormand, J. R., & Prince, P. J. (1980). "A family of embedded
///   Runge-Kutta formulae". Journal of Computational and Applied
///   Mathematics, 6(1), 19-26.
/// - Shampine, L. F., & Reichelt, M. W. (1997). "The MATLAB ODE Suite".
///   SIAM Journal on Scientific Computing, 18(1), 1-22.
#[derive(Debug, Clone)]
pub struct RKDP54 {
    tol_abs: f64,
    tol_rel: f64,
    beta: f64,
}

impl RKDP54 {
    /// Create a stepper with the given error tolerances
    pub fn with_tolerances(tol_rel: f64, tol_abs: f64) -> Self {
        Self {
            tol_abs,
            tol_rel,
            beta: SOL_BETA,
        }
    }

    /// Order of the propagating method
    pub fn order(&self) -> usize {
        5
    }

    /// Number of stages
    pub fn stages(&self) -> usize {
        7
    }

    /// Attempt one step of size `dt` from `(t, y)`
    ///
    /// `k1` must be the derivative at `(t, y)`; on the first step evaluate
    /// it directly, afterwards reuse [`StepOutcome::derivative`] from the
    /// previously accepted step (FSAL).
    ///
    /// Returns the 5th-order candidate together with the error-controller
    /// verdict; the caller decides whether to advance or retry with the
    /// recommended scale.
    ///
    /// # Errors
    ///
    /// `SolverError::NonFinite` if any stage produces a non-finite value.
    pub fn try_step<F>(
        &self,
        f: &mut F,
        t: f64,
        y: &DVector<f64>,
        k1: &DVector<f64>,
        dt: f64,
    ) -> Result<StepOutcome, SolverError>
    where
        F: FnMut(f64, &DVector<f64>) -> DVector<f64>,
    {
        let n = y.len();
        let mut slopes: Vec<DVector<f64>> = Vec::with_capacity(6);
        slopes.push(k1.clone());

        // Stages 2..=6
        for stage in 0..5 {
            let mut slope_sum = DVector::zeros(n);
            for (i, &coef) in A[stage].iter().enumerate() {
                slope_sum += coef * &slopes[i];
            }
            let y_stage = y + dt * slope_sum;
            let k = f(t + C[stage + 1] * dt, &y_stage);
            if !all_finite(&k) {
                return Err(SolverError::NonFinite {
                    time: t + C[stage + 1] * dt,
                });
            }
            slopes.push(k);
        }

        // Stage 7 evaluates at the 5th-order candidate itself (FSAL)
        let mut slope_sum = DVector::zeros(n);
        for (i, &coef) in A[5].iter().enumerate() {
            slope_sum += coef * &slopes[i];
        }
        let y_next = y + dt * slope_sum;
        if !all_finite(&y_next) {
            return Err(SolverError::NonFinite { time: t + dt });
        }
        let k_end = f(t + dt, &y_next);
        if !all_finite(&k_end) {
            return Err(SolverError::NonFinite { time: t + dt });
        }

        // Local truncation error slope
        let mut error_slope = TR[6] * &k_end;
        for (i, &coef) in TR.iter().take(6).enumerate() {
            error_slope += coef * &slopes[i];
        }

        // Scaled max-norm error (avoid division by zero via tol_abs)
        let scale = y_next.map(|x| self.tol_abs + self.tol_rel * x.abs());
        let scaled_error = (dt * &error_slope).component_div(&scale).map(f64::abs);
        let error_norm = scaled_error.max().max(1e-16);

        let accepted = error_norm <= 1.0;

        // Timestep scale from the embedded order (4): err ~ dt^5
        let timestep_scale =
            (self.beta / error_norm.powf(1.0 / 5.0)).clamp(SOL_SCALE_MIN, SOL_SCALE_MAX);

        Ok(StepOutcome {
            accepted,
            error_norm,
            scale: timestep_scale,
            state: y_next,
            derivative: k_end,
        })
    }
}

fn all_finite(v: &DVector<f64>) -> bool {
    v.iter().all(|x| x.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tight_stepper() -> RKDP54 {
        RKDP54::with_tolerances(1e-10, 1e-12)
    }

    #[test]
    fn test_rkdp54_exponential_decay() {
        // dx/dt = -x, x(0) = 1, exact solution x(t) = exp(-t)
        let stepper = tight_stepper();
        let mut f = |_t: f64, x: &DVector<f64>| -x;

        let dt = 0.1;
        let mut t = 0.0;
        let mut y = DVector::from_vec(vec![1.0]);
        let mut k = f(t, &y);

        for _ in 0..10 {
            let outcome = stepper.try_step(&mut f, t, &y, &k, dt).unwrap();
            assert!(outcome.accepted);
            y = outcome.state;
            k = outcome.derivative;
            t += dt;
        }

        assert_relative_eq!(y[0], (-1.0f64).exp(), epsilon = 1e-9);
    }

    #[test]
    fn test_rkdp54_harmonic_oscillator_period() {
        // d²x/dt² = -x => [x, v]' = [v, -x], period 2π
        let stepper = tight_stepper();
        let mut f = |_t: f64, x: &DVector<f64>| DVector::from_vec(vec![x[1], -x[0]]);

        let t_final = 2.0 * std::f64::consts::PI;
        let n_steps = 200;
        let dt = t_final / n_steps as f64;

        let mut t = 0.0;
        let mut y = DVector::from_vec(vec![1.0, 0.0]);
        let mut k = f(t, &y);

        for _ in 0..n_steps {
            let outcome = stepper.try_step(&mut f, t, &y, &k, dt).unwrap();
            y = outcome.state;
            k = outcome.derivative;
            t += dt;
        }

        assert_relative_eq!(y[0], 1.0, epsilon = 1e-6);
        assert_relative_eq!(y[1], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rkdp54_fsal_derivative_matches_endpoint() {
        let stepper = tight_stepper();
        let mut f = |_t: f64, x: &DVector<f64>| -2.0 * x;

        let y = DVector::from_vec(vec![1.0]);
        let k = f(0.0, &y);
        let outcome = stepper.try_step(&mut f, 0.0, &y, &k, 0.05).unwrap();

        let k_end = f(0.05, &outcome.state);
        assert_relative_eq!(outcome.derivative[0], k_end[0]);
    }

    #[test]
    fn test_rkdp54_scale_within_clamp() {
        let stepper = RKDP54::with_tolerances(1e-4, 1e-8);
        let mut f = |_t: f64, x: &DVector<f64>| -x;

        let y = DVector::from_vec(vec![1.0]);
        let k = f(0.0, &y);
        let outcome = stepper.try_step(&mut f, 0.0, &y, &k, 0.1).unwrap();

        assert!(outcome.scale >= SOL_SCALE_MIN && outcome.scale <= SOL_SCALE_MAX);
        assert_eq!(stepper.order(), 5);
        assert_eq!(stepper.stages(), 7);
    }

    #[test]
    fn test_rkdp54_rejects_oversized_step() {
        // Fast decay with a huge step must fail the tolerance test
        let stepper = RKDP54::with_tolerances(1e-8, 1e-10);
        let mut f = |_t: f64, x: &DVector<f64>| -50.0 * x;

        let y = DVector::from_vec(vec![1.0]);
        let k = f(0.0, &y);
        let outcome = stepper.try_step(&mut f, 0.0, &y, &k, 1.0).unwrap();

        assert!(!outcome.accepted);
        assert!(outcome.error_norm > 1.0);
        assert!(outcome.scale < 1.0);
    }

    #[test]
    fn test_rkdp54_non_finite_derivative_fails() {
        let stepper = tight_stepper();
        let mut f = |t: f64, x: &DVector<f64>| {
            if t > 0.0 {
                DVector::from_vec(vec![f64::NAN; x.len()])
            } else {
                x.clone()
            }
        };

        let y = DVector::from_vec(vec![1.0]);
        let k = f(0.0, &y);
        let err = stepper.try_step(&mut f, 0.0, &y, &k, 0.1).unwrap_err();
        assert!(matches!(err, SolverError::NonFinite { .. }));
    }
}
