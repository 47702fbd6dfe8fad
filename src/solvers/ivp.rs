//! Initial value problem driver
//!
//! Adaptive integration of `dy/dt = f(t, y)` over a time span, sampled at
//! caller-requested evaluation times. Internal steps are chosen by the
//! error controller; requested times falling strictly inside an accepted
//! step are filled by cubic Hermite dense output rather than by forcing
//! the stepper to land on them.

use nalgebra::DVector;

use super::base::{IvpOptions, SolverError};
use super::rkdp54::RKDP54;
use crate::error::SimulationError;
use crate::trajectory::Trajectory;

/// Solve an initial value problem and sample it at `t_eval`
///
/// # Arguments
///
/// * `f` - Right-hand side of the ODE system, a pure function of `(t, y)`
/// * `t_span` - Integration interval `(t0, t_end)` with `t_end > t0`
/// * `y0` - Initial state at `t0`
/// * `t_eval` - Strictly increasing evaluation times within `t_span`
/// * `options` - Tolerances and step-size bounds
///
/// The returned trajectory has exactly one sample per `t_eval` entry, at
/// exactly the requested times. If `t_eval[0] == t0` the first sample is
/// `y0` unchanged.
///
/// # Errors
///
/// * `SimulationError::InvalidRequest` for an empty span, empty or
///   unsorted `t_eval`, evaluation times outside the span, or non-finite
///   inputs; raised before any integration work
/// * `SimulationError::Integration` when a derivative turns non-finite or
///   the step size collapses; carries the failure time and state
pub fn solve_ivp<F>(
    mut f: F,
    t_span: (f64, f64),
    y0: DVector<f64>,
    t_eval: &[f64],
    options: &IvpOptions,
) -> Result<Trajectory, SimulationError>
where
    F: FnMut(f64, &DVector<f64>) -> DVector<f64>,
{
    let (t0, t_end) = t_span;
    validate_request(t_span, &y0, t_eval, options)?;

    let stepper = RKDP54::with_tolerances(options.rtol, options.atol);

    let mut traj = Trajectory::with_capacity(t_eval.len());
    let mut eval_idx = 0;

    let mut t = t0;
    let mut y = y0;
    let mut k = f(t, &y);
    if !k.iter().all(|x| x.is_finite()) {
        return Err(integration_failure(t, &y, SolverError::NonFinite { time: t }));
    }

    // The configured initial condition is emitted exactly, never re-derived
    if t_eval[eval_idx] == t0 {
        traj.push(t0, y.clone());
        eval_idx += 1;
    }

    let span = t_end - t0;
    let mut h = options
        .h_initial
        .unwrap_or(span / 100.0)
        .clamp(options.h_min, options.h_max);

    while t < t_end && eval_idx < t_eval.len() {
        h = h.min(t_end - t);

        // Retry with shrinking steps until the error controller accepts
        let mut rejects = 0;
        let outcome = loop {
            let outcome = stepper
                .try_step(&mut f, t, &y, &k, h)
                .map_err(|cause| integration_failure(t, &y, cause))?;
            if outcome.accepted {
                break outcome;
            }

            rejects += 1;
            if rejects > options.max_rejects {
                return Err(integration_failure(
                    t,
                    &y,
                    SolverError::TooManyRejects { time: t, count: rejects },
                ));
            }
            let shrunk = h * outcome.scale;
            if shrunk < options.h_min {
                return Err(integration_failure(
                    t,
                    &y,
                    SolverError::TimestepTooSmall {
                        time: t,
                        dt: shrunk,
                        dt_min: options.h_min,
                    },
                ));
            }
            h = shrunk;
        };

        let t_next = t + h;
        if t_next <= t {
            // Step underflowed against t_end; remaining targets are within
            // rounding of the current state
            break;
        }

        // Fill requested samples covered by the accepted step
        while eval_idx < t_eval.len() && t_eval[eval_idx] <= t_next {
            let te = t_eval[eval_idx];
            let state = if te == t_next {
                outcome.state.clone()
            } else {
                hermite_interpolate(t, &y, &k, h, &outcome.state, &outcome.derivative, te)
            };
            traj.push(te, state);
            eval_idx += 1;
        }

        y = outcome.state;
        k = outcome.derivative;
        t = t_next;
        h = (h * outcome.scale).clamp(options.h_min, options.h_max);
    }

    // Endpoint stragglers left by floating-point accumulation of t
    while eval_idx < t_eval.len() {
        traj.push(t_eval[eval_idx], y.clone());
        eval_idx += 1;
    }

    Ok(traj)
}

fn validate_request(
    t_span: (f64, f64),
    y0: &DVector<f64>,
    t_eval: &[f64],
    options: &IvpOptions,
) -> Result<(), SimulationError> {
    let (t0, t_end) = t_span;

    if !t0.is_finite() || !t_end.is_finite() {
        return Err(SimulationError::invalid("time span must be finite"));
    }
    if t_end <= t0 {
        return Err(SimulationError::invalid(format!(
            "time span is empty: t_end ({t_end}) must exceed t0 ({t0})"
        )));
    }
    if !y0.iter().all(|x| x.is_finite()) {
        return Err(SimulationError::invalid("initial state must be finite"));
    }
    if t_eval.is_empty() {
        return Err(SimulationError::invalid("t_eval must not be empty"));
    }
    if !t_eval.iter().all(|x| x.is_finite()) {
        return Err(SimulationError::invalid("t_eval must be finite"));
    }
    if t_eval.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(SimulationError::invalid(
            "t_eval must be strictly increasing",
        ));
    }
    if t_eval[0] < t0 || t_eval[t_eval.len() - 1] > t_end {
        return Err(SimulationError::invalid(format!(
            "t_eval must lie within [{t0}, {t_end}]"
        )));
    }
    if !(options.rtol > 0.0) || !(options.atol > 0.0) {
        return Err(SimulationError::invalid("tolerances must be positive"));
    }

    Ok(())
}

fn integration_failure(t: f64, y: &DVector<f64>, cause: SolverError) -> SimulationError {
    let time = match cause {
        SolverError::NonFinite { time } => time,
        _ => t,
    };
    SimulationError::Integration {
        time,
        state: y.clone(),
        cause,
    }
}

/// Cubic Hermite interpolation over one accepted step
///
/// Given the step endpoints and their derivatives, estimates `y(te)` for
/// `te` strictly inside `[t0, t0 + h]` with O(h^4) accuracy.
#[allow(clippy::too_many_arguments)]
fn hermite_interpolate(
    t0: f64,
    y0: &DVector<f64>,
    k0: &DVector<f64>,
    h: f64,
    y1: &DVector<f64>,
    k1: &DVector<f64>,
    te: f64,
) -> DVector<f64> {
    let alpha = (te - t0) / h;
    let a2 = alpha * alpha;
    let a3 = a2 * alpha;

    // Hermite basis functions
    let h00 = 1.0 - 3.0 * a2 + 2.0 * a3;
    let h10 = alpha - 2.0 * a2 + a3;
    let h01 = 3.0 * a2 - 2.0 * a3;
    let h11 = -a2 + a3;

    h00 * y0 + (h10 * h) * k0 + h01 * y1 + (h11 * h) * k1
}
