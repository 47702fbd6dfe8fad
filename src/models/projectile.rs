//! Projectile motion: closed-form kinematics

use nalgebra::DVector;

use crate::error::SimulationError;
use crate::trajectory::Trajectory;
use crate::utils::constants::STANDARD_GRAVITY;

/// Projectile launched at an angle, evaluated in closed form
///
/// No numerical integration is involved: position is a direct function
/// of time. Mass does not enter the trajectory math but is retained for
/// interface symmetry with the dynamic models (and a future drag term).
///
/// # Example
///
/// ```ignore
/// let projectile = Projectile::new(1.0, 45.0, 20.0)?;
/// let trajectory = projectile.simulate(5.0, 0.1)?;
///
/// // States are [x, y] position pairs
/// let (t, last) = trajectory.last().unwrap();
/// println!("landed near x = {:.2} at t = {:.1}", last[0], t);
/// ```
#[derive(Debug, Clone)]
pub struct Projectile {
    mass: f64,
    angle_deg: f64,
    velocity: f64,
    height: f64,
    g: f64,
}

impl Projectile {
    /// Create a projectile from launch parameters
    ///
    /// # Arguments
    ///
    /// * `mass` - Projectile mass (kg), must be positive
    /// * `angle_deg` - Launch angle above horizontal (degrees)
    /// * `velocity` - Launch speed (m/s), must be non-negative
    ///
    /// Initial height defaults to 0; see [`Projectile::with_height`].
    pub fn new(mass: f64, angle_deg: f64, velocity: f64) -> Result<Self, SimulationError> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(SimulationError::invalid(format!(
                "projectile mass must be positive, got {mass}"
            )));
        }
        if !angle_deg.is_finite() {
            return Err(SimulationError::invalid("launch angle must be finite"));
        }
        if !velocity.is_finite() || velocity < 0.0 {
            return Err(SimulationError::invalid(format!(
                "launch speed must be non-negative, got {velocity}"
            )));
        }

        Ok(Self {
            mass,
            angle_deg,
            velocity,
            height: 0.0,
            g: STANDARD_GRAVITY,
        })
    }

    /// Set the initial launch height (m)
    pub fn with_height(mut self, height: f64) -> Result<Self, SimulationError> {
        if !height.is_finite() || height < 0.0 {
            return Err(SimulationError::invalid(format!(
                "launch height must be non-negative, got {height}"
            )));
        }
        self.height = height;
        Ok(self)
    }

    /// Projectile mass (kg)
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Launch angle above horizontal (degrees)
    pub fn angle_deg(&self) -> f64 {
        self.angle_deg
    }

    /// Launch speed (m/s)
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Position `(x, y)` at time `t`
    ///
    /// ```text
    /// vx = v cos(angle), vy = v sin(angle)
    /// x(t) = vx t
    /// y(t) = h0 + vy t - g t^2 / 2
    /// ```
    pub fn position_at(&self, t: f64) -> (f64, f64) {
        let angle_rad = self.angle_deg.to_radians();
        let vx = self.velocity * angle_rad.cos();
        let vy = self.velocity * angle_rad.sin();

        let x = vx * t;
        let y = self.height + vy * t - 0.5 * self.g * t * t;
        (x, y)
    }

    /// Sample the trajectory at uniform steps until `time_end` or ground
    /// impact
    ///
    /// Samples `t = 0, time_step, 2*time_step, ...` while `t < time_end`.
    /// Sampling stops as soon as a computed height is negative; that
    /// ground-penetrating sample is still appended, so the final sample of
    /// a grounded trajectory has `y < 0` and every earlier sample has
    /// `y >= 0`. Callers plotting the curve should expect the last point
    /// to sit just below the axis.
    ///
    /// States are `[x, y]` position pairs.
    ///
    /// # Errors
    ///
    /// `SimulationError::InvalidRequest` if `time_end` or `time_step` is
    /// not positive and finite.
    pub fn simulate(&self, time_end: f64, time_step: f64) -> Result<Trajectory, SimulationError> {
        if !time_end.is_finite() || time_end <= 0.0 {
            return Err(SimulationError::invalid(format!(
                "time_end must be positive and finite, got {time_end}"
            )));
        }
        if !time_step.is_finite() || time_step <= 0.0 {
            return Err(SimulationError::invalid(format!(
                "time_step must be positive and finite, got {time_step}"
            )));
        }

        let capacity = (time_end / time_step).ceil() as usize;
        let mut traj = Trajectory::with_capacity(capacity.min(1 << 20));

        for i in 0u64.. {
            let t = i as f64 * time_step;
            if t >= time_end {
                break;
            }

            let (x, y) = self.position_at(t);
            traj.push(t, DVector::from_vec(vec![x, y]));

            if y < 0.0 {
                break;
            }
        }

        Ok(traj)
    }
}
