//! Sampled simulation output
//!
//! A [`Trajectory`] is the hand-off boundary to plotting and export:
//! an ordered sequence of `(time, state)` samples, produced once per
//! `simulate` call and immutable afterwards.

use nalgebra::DVector;
use std::io;

/// Ordered sequence of `(time, state)` samples
///
/// Times are strictly increasing. The state dimension is uniform across
/// all samples: `[theta, omega]` for the pendulum, `[x, v]` for the
/// oscillator, `[x, y]` position pairs for the projectile.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    times: Vec<f64>,
    states: Vec<DVector<f64>>,
}

impl Trajectory {
    /// Create an empty trajectory with reserved capacity
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            times: Vec::with_capacity(capacity),
            states: Vec::with_capacity(capacity),
        }
    }

    /// Append a sample (internal; callers receive finished trajectories)
    pub(crate) fn push(&mut self, time: f64, state: DVector<f64>) {
        debug_assert!(
            self.times.last().map_or(true, |&last| time > last),
            "trajectory times must be strictly increasing"
        );
        self.times.push(time);
        self.states.push(state);
    }

    /// Number of recorded samples
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Check whether the trajectory holds no samples
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Sample times, strictly increasing
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// State vectors, one per sample time
    pub fn states(&self) -> &[DVector<f64>] {
        &self.states
    }

    /// Get the sample at `index`
    pub fn sample(&self, index: usize) -> (f64, &DVector<f64>) {
        (self.times[index], &self.states[index])
    }

    /// Most recent sample, if any
    pub fn last(&self) -> Option<(f64, &DVector<f64>)> {
        let last = self.times.len().checked_sub(1)?;
        Some((self.times[last], &self.states[last]))
    }

    /// Iterate over `(time, state)` samples in chronological order
    pub fn iter(&self) -> impl Iterator<Item = (f64, &DVector<f64>)> + '_ {
        self.times.iter().copied().zip(self.states.iter())
    }

    /// Extract one state component as a column, e.g. for plotting
    pub fn component(&self, index: usize) -> Vec<f64> {
        self.states.iter().map(|state| state[index]).collect()
    }

    /// Save samples to a CSV file with default column labels
    ///
    /// Column labels default to "state 0", "state 1", etc.
    ///
    /// # CSV Format
    ///
    /// ```csv
    /// time [s],state 0,state 1
    /// 0.0,1.0,0.0
    /// 0.02,0.998,-0.19
    /// ```
    pub fn save(&self, filename: &str) -> io::Result<()> {
        let dim = self.states.first().map_or(0, DVector::len);
        let labels: Vec<String> = (0..dim).map(|i| format!("state {}", i)).collect();
        let label_refs: Vec<&str> = labels.iter().map(String::as_str).collect();

        self.save_with_labels(filename, &label_refs)
    }

    /// Save samples to a CSV file with custom column labels
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be created or written
    /// - The number of labels doesn't match the state dimension
    pub fn save_with_labels(&self, filename: &str, labels: &[&str]) -> io::Result<()> {
        let dim = self.states.first().map_or(0, DVector::len);
        if labels.len() != dim {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "Number of labels ({}) must match state dimension ({})",
                    labels.len(),
                    dim
                ),
            ));
        }

        // Add .csv extension if not present
        let filename = if filename.to_lowercase().ends_with(".csv") {
            filename.to_string()
        } else {
            format!("{}.csv", filename)
        };

        let file = std::fs::File::create(&filename)?;
        let mut wtr = csv::Writer::from_writer(file);

        let mut header = vec!["time [s]".to_string()];
        header.extend(labels.iter().map(|&s| s.to_string()));
        wtr.write_record(&header)?;

        for (time, state) in self.iter() {
            let mut record = vec![time.to_string()];
            record.extend(state.iter().map(|v| v.to_string()));
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trajectory() -> Trajectory {
        let mut traj = Trajectory::with_capacity(3);
        traj.push(0.0, DVector::from_vec(vec![1.0, 0.0]));
        traj.push(0.5, DVector::from_vec(vec![0.8, -0.5]));
        traj.push(1.0, DVector::from_vec(vec![0.3, -0.9]));
        traj
    }

    #[test]
    fn test_trajectory_accessors() {
        let traj = sample_trajectory();
        assert_eq!(traj.len(), 3);
        assert!(!traj.is_empty());
        assert_eq!(traj.times(), &[0.0, 0.5, 1.0]);

        let (t, state) = traj.sample(1);
        assert_eq!(t, 0.5);
        assert_eq!(state[0], 0.8);

        let (t_last, state_last) = traj.last().unwrap();
        assert_eq!(t_last, 1.0);
        assert_eq!(state_last[1], -0.9);
    }

    #[test]
    fn test_trajectory_component_column() {
        let traj = sample_trajectory();
        assert_eq!(traj.component(0), vec![1.0, 0.8, 0.3]);
        assert_eq!(traj.component(1), vec![0.0, -0.5, -0.9]);
    }

    #[test]
    fn test_trajectory_times_strictly_increasing() {
        let traj = sample_trajectory();
        for pair in traj.times().windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_save_rejects_label_mismatch() {
        let traj = sample_trajectory();
        let err = traj
            .save_with_labels("unused.csv", &["only one label"])
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
