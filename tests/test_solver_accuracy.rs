//! Solver accuracy evaluation tests
//!
//! Checks the adaptive Dormand-Prince driver against problems with known
//! closed-form solutions:
//! - exponential decay: dy/dt = -y
//! - simple harmonic oscillator: [x, v]' = [v, -x]
//!
//! Accuracy is evaluated at caller-requested sample times, which exercises
//! the dense-output path as well as the stepping itself.

use approx::assert_relative_eq;
use mechsim::{solve_ivp, IvpOptions, SimulationError};
use nalgebra::DVector;

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| start + (end - start) * i as f64 / (n - 1) as f64)
        .collect()
}

#[test]
fn test_exponential_decay_tracks_tolerance() {
    // Tighter tolerances must not produce worse solutions
    let t_eval = linspace(0.0, 5.0, 51);

    // Global error and dense-output error are both a small multiple of
    // the local tolerance, hence the slack in the bounds
    for (rtol, atol, expected) in [
        (1e-3, 1e-6, 5e-3),
        (1e-6, 1e-9, 5e-6),
        (1e-9, 1e-12, 1e-7),
    ] {
        let options = IvpOptions::with_tolerances(rtol, atol);
        let traj = solve_ivp(
            |_t, y| -y,
            (0.0, 5.0),
            DVector::from_vec(vec![1.0]),
            &t_eval,
            &options,
        )
        .unwrap();

        let max_error = traj
            .iter()
            .map(|(t, state)| (state[0] - (-t).exp()).abs())
            .fold(0.0f64, f64::max);
        assert!(
            max_error < expected,
            "rtol={rtol}: max error {max_error} exceeds {expected}"
        );
    }
}

#[test]
fn test_harmonic_oscillator_over_several_periods() {
    let t_final = 6.0 * std::f64::consts::PI; // three periods
    let t_eval = linspace(0.0, t_final, 301);
    let options = IvpOptions::with_tolerances(1e-9, 1e-12);

    let traj = solve_ivp(
        |_t, y| DVector::from_vec(vec![y[1], -y[0]]),
        (0.0, t_final),
        DVector::from_vec(vec![1.0, 0.0]),
        &t_eval,
        &options,
    )
    .unwrap();

    for (t, state) in traj.iter() {
        assert_relative_eq!(state[0], t.cos(), epsilon = 1e-6);
        assert_relative_eq!(state[1], -t.sin(), epsilon = 1e-6);
    }
}

#[test]
fn test_time_dependent_right_hand_side() {
    // dy/dt = t, y(0) = 0, exact solution t^2 / 2; verifies stage times
    // are offset correctly inside the step
    let t_eval = linspace(0.0, 2.0, 21);
    let options = IvpOptions::with_tolerances(1e-9, 1e-12);

    let traj = solve_ivp(
        |t, _y| DVector::from_vec(vec![t]),
        (0.0, 2.0),
        DVector::from_vec(vec![0.0]),
        &t_eval,
        &options,
    )
    .unwrap();

    for (t, state) in traj.iter() {
        assert_relative_eq!(state[0], 0.5 * t * t, epsilon = 1e-9);
    }
}

#[test]
fn test_sample_times_returned_verbatim() {
    let t_eval = vec![0.0, 0.001, 0.5, 2.4999, 5.0];
    let traj = solve_ivp(
        |_t, y| -y,
        (0.0, 5.0),
        DVector::from_vec(vec![1.0]),
        &t_eval,
        &IvpOptions::default(),
    )
    .unwrap();

    assert_eq!(traj.times(), t_eval.as_slice());
}

#[test]
fn test_blowup_reports_failure_time() {
    // dy/dt = y^2, y(0) = 1 blows up at t = 1; the solver must fail
    // rather than emit garbage samples
    let t_eval = linspace(0.0, 2.0, 21);
    let result = solve_ivp(
        |_t, y: &DVector<f64>| DVector::from_vec(vec![y[0] * y[0]]),
        (0.0, 2.0),
        DVector::from_vec(vec![1.0]),
        &t_eval,
        &IvpOptions::default(),
    );

    match result {
        Err(SimulationError::Integration { time, .. }) => {
            assert!(time >= 0.0 && time <= 2.0);
        }
        Err(other) => panic!("expected Integration failure, got {other:?}"),
        Ok(_) => panic!("integration of a finite-time blowup must fail"),
    }
}
