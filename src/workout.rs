use crate::error::CommandError;
use tracing::{debug, info};

/// Where the workout is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum Phase {
    #[default]
    Idle,
    Active,
    Paused,
}

/// Result of a successful set completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetRecord {
    /// 1-based number of the set just completed
    pub number: u32,
    /// Rest taken before this set
    pub rest_secs: u32,
    pub is_new_best: bool,
}

/// Counters for one workout.
///
/// `sets_count`, `total_rest_secs` and `best_time` are always derivable
/// from `set_times`; they are kept alongside so readers do not need to
/// recompute them on every frame. Only the transition methods below
/// mutate them, which keeps the three in step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkoutState {
    phase: Phase,
    sets_count: u32,
    rest_secs: u32,
    total_rest_secs: u32,
    total_secs: u32,
    best_time: Option<u32>,
    set_times: Vec<u32>,
}

impl WorkoutState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_started(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    pub fn sets_count(&self) -> u32 {
        self.sets_count
    }

    pub fn rest_secs(&self) -> u32 {
        self.rest_secs
    }

    pub fn total_rest_secs(&self) -> u32 {
        self.total_rest_secs
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    pub fn best_time(&self) -> Option<u32> {
        self.best_time
    }

    pub fn set_times(&self) -> &[u32] {
        &self.set_times
    }

    /// Idle -> Active. The rest counter starts over from zero.
    pub fn start(&mut self) -> Result<(), CommandError> {
        if self.is_started() {
            return Err(CommandError::AlreadyStarted);
        }
        self.phase = Phase::Active;
        self.rest_secs = 0;
        info!("workout started");
        Ok(())
    }

    /// Active <-> Paused. Returns the new paused flag.
    pub fn toggle_pause(&mut self) -> Result<bool, CommandError> {
        self.phase = match self.phase {
            Phase::Idle => return Err(CommandError::NotStarted),
            Phase::Active => Phase::Paused,
            Phase::Paused => Phase::Active,
        };
        info!(phase = %self.phase, "pause toggled");
        Ok(self.is_paused())
    }

    /// Record the current rest interval as a completed set and start a new
    /// rest interval at zero.
    pub fn complete_set(&mut self) -> Result<SetRecord, CommandError> {
        match self.phase {
            Phase::Idle => return Err(CommandError::NotStarted),
            Phase::Paused => return Err(CommandError::Paused),
            Phase::Active => {}
        }

        let rest = self.rest_secs;
        self.set_times.push(rest);
        self.total_rest_secs += rest;
        self.sets_count += 1;

        let is_new_best = self.best_time.map_or(true, |best| rest < best);
        if is_new_best {
            self.best_time = Some(rest);
        }
        self.rest_secs = 0;

        info!(set = self.sets_count, rest, is_new_best, "set completed");
        Ok(SetRecord {
            number: self.sets_count,
            rest_secs: rest,
            is_new_best,
        })
    }

    /// Back to Idle with every counter and the history cleared.
    pub fn reset(&mut self) {
        *self = Self::default();
        info!("workout reset");
    }

    /// Rest ticker body. No-op unless the workout is running.
    pub fn tick_rest(&mut self) {
        if self.is_started() && !self.is_paused() {
            self.rest_secs += 1;
        }
    }

    /// Total ticker body. Guarded on pause only; the ticker itself is only
    /// ever running once the workout has been started.
    pub fn tick_total(&mut self) {
        if !self.is_paused() {
            self.total_secs += 1;
        } else {
            debug!("total tick while paused");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active() -> WorkoutState {
        let mut w = WorkoutState::new();
        w.start().unwrap();
        w
    }

    fn rest_for(w: &mut WorkoutState, secs: u32) {
        for _ in 0..secs {
            w.tick_rest();
            w.tick_total();
        }
    }

    #[test]
    fn test_new_is_idle_and_empty() {
        let w = WorkoutState::new();
        assert_eq!(w.phase(), Phase::Idle);
        assert_eq!(w.sets_count(), 0);
        assert_eq!(w.best_time(), None);
        assert!(w.set_times().is_empty());
    }

    #[test]
    fn test_start_only_from_idle() {
        let mut w = active();
        assert_eq!(w.phase(), Phase::Active);
        assert_eq!(w.start(), Err(CommandError::AlreadyStarted));

        w.toggle_pause().unwrap();
        assert_eq!(w.start(), Err(CommandError::AlreadyStarted));
        assert_eq!(w.phase(), Phase::Paused);
    }

    #[test]
    fn test_toggle_pause_requires_start() {
        let mut w = WorkoutState::new();
        assert_eq!(w.toggle_pause(), Err(CommandError::NotStarted));
        assert_eq!(w.phase(), Phase::Idle);
    }

    #[test]
    fn test_toggle_pause_twice_restores_phase() {
        let mut w = active();
        rest_for(&mut w, 4);
        assert_eq!(w.toggle_pause(), Ok(true));
        assert_eq!(w.toggle_pause(), Ok(false));
        assert_eq!(w.phase(), Phase::Active);
        assert_eq!(w.rest_secs(), 4);
        assert_eq!(w.total_secs(), 4);
    }

    #[test]
    fn test_complete_set_rejected_when_idle() {
        let mut w = WorkoutState::new();
        assert_eq!(w.complete_set(), Err(CommandError::NotStarted));
        assert_eq!(w, WorkoutState::new());
    }

    #[test]
    fn test_complete_set_rejected_when_paused() {
        let mut w = active();
        rest_for(&mut w, 3);
        w.toggle_pause().unwrap();
        let before = w.clone();
        assert_eq!(w.complete_set(), Err(CommandError::Paused));
        assert_eq!(w, before);
    }

    #[test]
    fn test_complete_set_records_rest_and_best() {
        let mut w = active();
        rest_for(&mut w, 5);
        let first = w.complete_set().unwrap();
        assert_eq!(
            first,
            SetRecord {
                number: 1,
                rest_secs: 5,
                is_new_best: true
            }
        );
        assert_eq!(w.rest_secs(), 0);

        rest_for(&mut w, 7);
        let second = w.complete_set().unwrap();
        assert!(!second.is_new_best);
        assert_eq!(w.best_time(), Some(5));

        rest_for(&mut w, 2);
        assert!(w.complete_set().unwrap().is_new_best);
        assert_eq!(w.best_time(), Some(2));
        assert_eq!(w.set_times(), &[5, 7, 2]);
        assert_eq!(w.total_rest_secs(), 14);
        assert_eq!(w.sets_count(), 3);
    }

    #[test]
    fn test_equal_rest_is_not_a_new_best() {
        let mut w = active();
        rest_for(&mut w, 4);
        w.complete_set().unwrap();
        rest_for(&mut w, 4);
        assert!(!w.complete_set().unwrap().is_new_best);
    }

    #[test]
    fn test_invariants_hold_over_many_sets() {
        let mut w = active();
        for rest in [9, 3, 12, 0, 6, 6, 1] {
            rest_for(&mut w, rest);
            w.complete_set().unwrap();
        }
        let times = w.set_times();
        assert_eq!(w.sets_count() as usize, times.len());
        assert_eq!(w.total_rest_secs(), times.iter().sum::<u32>());
        assert_eq!(w.best_time(), times.iter().copied().min());
    }

    #[test]
    fn test_ticks_frozen_while_paused_or_idle() {
        let mut w = WorkoutState::new();
        w.tick_rest();
        assert_eq!(w.rest_secs(), 0);

        w.start().unwrap();
        w.toggle_pause().unwrap();
        w.tick_rest();
        w.tick_total();
        assert_eq!(w.rest_secs(), 0);
        assert_eq!(w.total_secs(), 0);
    }

    #[test]
    fn test_total_tick_not_guarded_on_start() {
        let mut w = WorkoutState::new();
        w.tick_total();
        assert_eq!(w.total_secs(), 1);
    }

    #[test]
    fn test_reset_from_any_phase() {
        for pause in [false, true] {
            let mut w = active();
            rest_for(&mut w, 8);
            w.complete_set().unwrap();
            rest_for(&mut w, 2);
            if pause {
                w.toggle_pause().unwrap();
            }
            w.reset();
            assert_eq!(w, WorkoutState::new());
            assert_eq!(w.phase(), Phase::Idle);
        }
    }
}
