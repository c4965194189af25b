use itertools::{Itertools, MinMaxResult};

use crate::workout::WorkoutState;

/// Aggregates over the rest intervals of a workout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutSummary {
    pub sets: usize,
    pub shortest_rest: Option<u32>,
    pub longest_rest: Option<u32>,
    pub mean_rest: Option<f64>,
    pub rest_std_dev: Option<f64>,
}

impl WorkoutSummary {
    pub fn from_rest_times(rest_times: &[u32]) -> Self {
        let (shortest_rest, longest_rest) = match rest_times.iter().copied().minmax() {
            MinMaxResult::NoElements => (None, None),
            MinMaxResult::OneElement(x) => (Some(x), Some(x)),
            MinMaxResult::MinMax(lo, hi) => (Some(lo), Some(hi)),
        };

        Self {
            sets: rest_times.len(),
            shortest_rest,
            longest_rest,
            mean_rest: mean(rest_times),
            rest_std_dev: std_dev(rest_times),
        }
    }
}

impl From<&WorkoutState> for WorkoutSummary {
    fn from(workout: &WorkoutState) -> Self {
        Self::from_rest_times(workout.set_times())
    }
}

pub fn mean(secs: &[u32]) -> Option<f64> {
    if secs.is_empty() {
        return None;
    }
    let sum: f64 = secs.iter().copied().map(f64::from).sum();
    Some(sum / secs.len() as f64)
}

/// Population standard deviation.
pub fn std_dev(secs: &[u32]) -> Option<f64> {
    let m = mean(secs)?;
    let variance = secs
        .iter()
        .map(|&s| {
            let diff = f64::from(s) - m;
            diff * diff
        })
        .sum::<f64>()
        / secs.len() as f64;
    Some(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[10, 20, 30]), Some(20.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_std_dev() {
        assert_eq!(std_dev(&[5, 5, 5]), Some(0.0));
        assert_eq!(std_dev(&[2, 4, 4, 4, 5, 5, 7, 9]), Some(2.0));
        assert_eq!(std_dev(&[]), None);
    }

    #[test]
    fn test_summary_empty() {
        let summary = WorkoutSummary::from_rest_times(&[]);
        assert_eq!(summary.sets, 0);
        assert_eq!(summary.shortest_rest, None);
        assert_eq!(summary.longest_rest, None);
        assert_eq!(summary.mean_rest, None);
    }

    #[test]
    fn test_summary_single_set() {
        let summary = WorkoutSummary::from_rest_times(&[42]);
        assert_eq!(summary.shortest_rest, Some(42));
        assert_eq!(summary.longest_rest, Some(42));
        assert_eq!(summary.rest_std_dev, Some(0.0));
    }

    #[test]
    fn test_summary_from_workout() {
        let mut workout = WorkoutState::new();
        workout.start().unwrap();
        for rest in [60, 90, 30] {
            for _ in 0..rest {
                workout.tick_rest();
            }
            workout.complete_set().unwrap();
        }

        let summary = WorkoutSummary::from(&workout);
        assert_eq!(summary.sets, 3);
        assert_eq!(summary.shortest_rest, workout.best_time());
        assert_eq!(summary.longest_rest, Some(90));
        assert_eq!(summary.mean_rest, Some(60.0));
    }
}
