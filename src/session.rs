use std::time::Duration;

use tracing::{info, warn};

use crate::error::CommandError;
use crate::feedback::Feedback;
use crate::sensor::{SensorReadout, SensorSimulator, SensorSource, SensorState, SimulatedSensor};
use crate::timer::{Interval, TimerEngine};
use crate::workout::{SetRecord, WorkoutState};

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Period of the rest and total tickers
    pub tick_period: Duration,
    pub sensor_level_period: Duration,
    pub detection_period: Duration,
    /// Auto-detected sets closer together than this are dropped
    pub min_auto_rest_secs: u32,
    pub sensor_enabled: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_secs(1),
            sensor_level_period: Duration::from_secs(3),
            detection_period: Duration::from_secs(2),
            min_auto_rest_secs: 3,
            sensor_enabled: true,
        }
    }
}

/// The periodic tasks a session schedules, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    RestTick,
    TotalTick,
    /// Runs before the level task, so a detection due together with a
    /// resample still sees the previous level.
    Detection,
    SensorLevel,
}

/// What happened when the sensor tried to complete a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoOutcome {
    Completed(SetRecord),
    /// Too soon after the previous set
    Suppressed,
    /// Not running, paused, or sensor off
    Ignored,
}

/// One workout plus everything that drives it.
///
/// All mutation goes through `&mut self`, so commands and periodic tasks
/// are serialized by construction. Time only moves when the owner calls
/// [`Session::advance`].
#[derive(Debug)]
pub struct Session<S: SensorSource = SimulatedSensor> {
    config: SessionConfig,
    workout: WorkoutState,
    timers: TimerEngine,
    sensor: SensorState,
    simulator: SensorSimulator,
    source: S,
    outbox: Vec<Feedback>,
}

impl Session<SimulatedSensor> {
    /// A session with a random sensor, seeded when reproducibility matters.
    pub fn simulated(config: SessionConfig, seed: Option<u64>) -> Self {
        let source = match seed {
            Some(seed) => SimulatedSensor::seeded(seed),
            None => SimulatedSensor::from_entropy(),
        };
        Self::new(config, source)
    }
}

impl<S: SensorSource> Session<S> {
    pub fn new(config: SessionConfig, source: S) -> Self {
        Self {
            timers: TimerEngine::new(config.tick_period),
            sensor: SensorState::new(config.sensor_enabled),
            simulator: SensorSimulator::new(config.sensor_level_period, config.detection_period),
            workout: WorkoutState::new(),
            source,
            outbox: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn workout(&self) -> &WorkoutState {
        &self.workout
    }

    pub fn sensor(&self) -> &SensorState {
        &self.sensor
    }

    pub fn readout(&self) -> SensorReadout {
        self.sensor.readout()
    }

    /// Take every feedback message emitted since the last call.
    pub fn drain_feedback(&mut self) -> Vec<Feedback> {
        std::mem::take(&mut self.outbox)
    }

    pub fn start(&mut self) -> Result<(), CommandError> {
        let result = self.workout.start();
        match result {
            Ok(()) => {
                self.timers.start_all();
                self.outbox.push(Feedback::started(self.sensor.enabled));
            }
            Err(err) => self.reject("start", err),
        }
        result
    }

    /// Returns the new paused flag.
    pub fn toggle_pause(&mut self) -> Result<bool, CommandError> {
        let result = self.workout.toggle_pause();
        match result {
            Ok(paused) => self.outbox.push(Feedback::paused(paused)),
            Err(err) => self.reject("toggle_pause", err),
        }
        result
    }

    /// Close the current rest interval. The rest ticker restarts in the
    /// same step, so no tick can land between the two.
    pub fn complete_set(&mut self) -> Result<SetRecord, CommandError> {
        let result = self.workout.complete_set();
        match result {
            Ok(record) => {
                self.timers.restart_rest();
                self.outbox.push(Feedback::set_completed(&record));
            }
            Err(err) => self.reject("complete_set", err),
        }
        result
    }

    pub fn reset(&mut self) {
        self.timers.stop_all();
        self.workout.reset();
        self.outbox.push(Feedback::reset());
    }

    /// Returns the new enabled flag. The level task keeps running either
    /// way; only its sampling range changes.
    pub fn toggle_sensor(&mut self) -> bool {
        let enabled = self.sensor.toggle();
        info!(enabled, "sensor toggled");
        self.outbox.push(Feedback::sensor(enabled));
        enabled
    }

    /// Sensor-driven set completion.
    pub fn auto_complete_set(&mut self) -> AutoOutcome {
        if !self.workout.is_active() || !self.sensor.enabled {
            return AutoOutcome::Ignored;
        }
        if self.workout.rest_secs() < self.config.min_auto_rest_secs
            && self.workout.sets_count() > 0
        {
            info!(rest = self.workout.rest_secs(), "auto set suppressed");
            return AutoOutcome::Suppressed;
        }
        match self.complete_set() {
            Ok(record) => AutoOutcome::Completed(record),
            Err(_) => AutoOutcome::Ignored,
        }
    }

    /// Let `dt` of wall-clock time pass, running each task that falls due
    /// in chronological order. Tasks due at the same instant run in
    /// [`Task`] order.
    pub fn advance(&mut self, dt: Duration) {
        let mut budget = dt;
        while let Some((task, wait)) = self.next_due() {
            if wait > budget {
                break;
            }
            self.elapse_all(wait);
            budget -= wait;
            self.interval_mut(task).fire();
            self.run(task);
        }
        self.elapse_all(budget);
    }

    fn next_due(&self) -> Option<(Task, Duration)> {
        [
            (Task::RestTick, &self.timers.rest),
            (Task::TotalTick, &self.timers.total),
            (Task::Detection, &self.simulator.detect),
            (Task::SensorLevel, &self.simulator.level),
        ]
        .into_iter()
        .filter_map(|(task, interval)| interval.until_next().map(|wait| (task, wait)))
        .min_by_key(|&(_, wait)| wait)
    }

    fn interval_mut(&mut self, task: Task) -> &mut Interval {
        match task {
            Task::RestTick => &mut self.timers.rest,
            Task::TotalTick => &mut self.timers.total,
            Task::SensorLevel => &mut self.simulator.level,
            Task::Detection => &mut self.simulator.detect,
        }
    }

    fn elapse_all(&mut self, dt: Duration) {
        self.timers.rest.elapse(dt);
        self.timers.total.elapse(dt);
        self.simulator.level.elapse(dt);
        self.simulator.detect.elapse(dt);
    }

    fn run(&mut self, task: Task) {
        match task {
            Task::RestTick => self.workout.tick_rest(),
            Task::TotalTick => self.workout.tick_total(),
            Task::SensorLevel => SensorSimulator::resample(&mut self.sensor, &mut self.source),
            Task::Detection => {
                if self.workout.is_active()
                    && SensorSimulator::detect(&self.sensor, &mut self.source)
                {
                    self.auto_complete_set();
                }
            }
        }
    }

    fn reject(&mut self, command: &str, err: CommandError) {
        warn!(command, %err, "command rejected");
        self.outbox.push(Feedback::from(err));
    }
}
