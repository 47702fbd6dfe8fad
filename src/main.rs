//! Demo: simulate the three mechanical systems and export the curves
//!
//! Constructs each model with fixed illustrative parameters, prints a
//! summary table per system, and writes one CSV per trajectory for the
//! plotting layer to consume.

use mechsim::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    run_projectile()?;
    run_pendulum()?;
    run_oscillator()?;
    Ok(())
}

fn run_projectile() -> Result<(), Box<dyn std::error::Error>> {
    println!("Projectile Motion: angle = 45°, velocity = 20 m/s");
    println!("==================================================");

    let projectile = Projectile::new(1.0, 45.0, 20.0)?;
    let trajectory = projectile.simulate(5.0, 0.1)?;

    println!("{:>10} {:>12} {:>12}", "Time", "Distance", "Height");
    print_table(&trajectory, 8);

    let (t_last, last) = trajectory.last().expect("trajectory is non-empty");
    println!();
    println!(
        "Ground impact near t = {:.1} s, range ≈ {:.2} m",
        t_last, last[0]
    );
    trajectory.save_with_labels("projectile.csv", &["distance [m]", "height [m]"])?;
    println!("Saved projectile.csv");
    println!();
    Ok(())
}

fn run_pendulum() -> Result<(), Box<dyn std::error::Error>> {
    println!("Pendulum Motion: L = 1 m, m = 1 kg, theta0 = 60°");
    println!("==================================================");

    let pendulum = Pendulum::new(1.0, 1.0, 60f64.to_radians())?;
    let trajectory = pendulum.simulate(10.0, 500)?;

    println!("{:>10} {:>12} {:>12}", "Time", "Angle", "Ang. vel.");
    print_table(&trajectory, 8);

    trajectory.save_with_labels("pendulum.csv", &["theta [rad]", "omega [rad/s]"])?;
    println!();
    println!("Saved pendulum.csv");
    println!();
    Ok(())
}

fn run_oscillator() -> Result<(), Box<dyn std::error::Error>> {
    println!("Damped Harmonic Oscillator: m = 1 kg, k = 10 N/m, b = 0.5");
    println!("==========================================================");

    let oscillator = Oscillator::new(1.0, 10.0, 0.5)?;
    println!("Damping regime: {:?}", oscillator.damping_class());
    let trajectory = oscillator.simulate(10.0, 500)?;

    println!("{:>10} {:>12} {:>12}", "Time", "Displ.", "Velocity");
    print_table(&trajectory, 8);

    trajectory.save_with_labels("oscillator.csv", &["x [m]", "v [m/s]"])?;
    println!();
    println!("Saved oscillator.csv");
    Ok(())
}

/// Print every n-th sample of a two-component trajectory
fn print_table(trajectory: &Trajectory, rows: usize) {
    let stride = (trajectory.len() / rows).max(1);
    for (i, (t, state)) in trajectory.iter().enumerate() {
        if i % stride == 0 {
            println!("{:10.3} {:12.6} {:12.6}", t, state[0], state[1]);
        }
    }
}
