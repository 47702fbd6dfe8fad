//! Physical constants and solver defaults

/// Acceleration due to gravity (m/s^2)
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Default relative tolerance for local truncation error
pub const SOL_TOLERANCE_LTE_REL: f64 = 1e-3;

/// Default absolute tolerance for local truncation error
pub const SOL_TOLERANCE_LTE_ABS: f64 = 1e-6;

/// Minimum timestep for adaptive stepping
pub const SOL_TIMESTEP_MIN: f64 = 1e-12;

/// Maximum timestep for adaptive stepping
pub const SOL_TIMESTEP_MAX: f64 = 1.0;

/// Minimum scale factor for timestep adjustment
pub const SOL_SCALE_MIN: f64 = 0.1;

/// Maximum scale factor for timestep adjustment
pub const SOL_SCALE_MAX: f64 = 10.0;

/// Safety factor for adaptive error control
pub const SOL_BETA: f64 = 0.9;

/// Maximum consecutive step rejections before giving up
pub const SOL_REJECTS_MAX: usize = 50;
