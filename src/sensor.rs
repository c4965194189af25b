use std::collections::VecDeque;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::timer::Interval;

/// Level reported before the first sample arrives.
pub const INITIAL_LEVEL: u8 = 96;
/// Detection only runs strictly above this level.
pub const DETECTION_THRESHOLD: u8 = 85;

/// Something that produces sensor levels and detection draws.
///
/// The simulated source is the only real implementation; tests swap in
/// [`ScriptedSensor`] to make detection deterministic.
pub trait SensorSource {
    /// Next sensor level, in `0..=99`.
    fn sample_level(&mut self, enabled: bool) -> u8;

    /// Uniform sample in `[0, 1)` compared against the detection chance.
    fn detection_draw(&mut self) -> f64;
}

/// Random levels: `85..=99` while enabled, `0..=30` while disconnected.
#[derive(Debug, Clone)]
pub struct SimulatedSensor<R: Rng = StdRng> {
    rng: R,
}

impl SimulatedSensor<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> SimulatedSensor<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> SensorSource for SimulatedSensor<R> {
    fn sample_level(&mut self, enabled: bool) -> u8 {
        if enabled {
            self.rng.gen_range(85..=99)
        } else {
            self.rng.gen_range(0..=30)
        }
    }

    fn detection_draw(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays fixed levels and draws in order.
///
/// Once the levels run out the last one repeats; once the draws run out
/// every draw is 1.0, which never triggers a detection.
#[derive(Debug, Clone)]
pub struct ScriptedSensor {
    levels: VecDeque<u8>,
    draws: VecDeque<f64>,
    last_level: u8,
}

impl ScriptedSensor {
    pub fn new(levels: impl IntoIterator<Item = u8>, draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            levels: levels.into_iter().collect(),
            draws: draws.into_iter().collect(),
            last_level: INITIAL_LEVEL,
        }
    }
}

impl Default for ScriptedSensor {
    /// Holds the initial level and never detects anything.
    fn default() -> Self {
        Self::new([], [])
    }
}

impl SensorSource for ScriptedSensor {
    fn sample_level(&mut self, _enabled: bool) -> u8 {
        if let Some(level) = self.levels.pop_front() {
            self.last_level = level;
        }
        self.last_level
    }

    fn detection_draw(&mut self) -> f64 {
        self.draws.pop_front().unwrap_or(1.0)
    }
}

/// User-visible sensor switch plus the latest level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorState {
    pub enabled: bool,
    pub level: u8,
}

impl SensorState {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            level: INITIAL_LEVEL,
        }
    }

    /// Flip the switch. Returns the new enabled flag.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    /// Chance a detection tick completes a set, if detection applies at all.
    pub fn detection_chance(&self) -> Option<f64> {
        (self.enabled && self.level > DETECTION_THRESHOLD)
            .then(|| detection_chance(self.level))
    }

    pub fn readout(&self) -> SensorReadout {
        SensorReadout::from(*self)
    }
}

impl Default for SensorState {
    fn default() -> Self {
        Self::new(true)
    }
}

/// `0.5 + (level - 85) / 100`, so `(0.5, 0.64]` over the enabled range.
pub fn detection_chance(level: u8) -> f64 {
    0.5 + (f64::from(level) - f64::from(DETECTION_THRESHOLD)) / 100.0
}

/// Display values derived from the sensor level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReadout {
    pub enabled: bool,
    pub level: u8,
    /// percent
    pub accuracy: i16,
    /// percent
    pub precision: i16,
    /// Height of the depth bar in percent, 0 when disabled
    pub depth_percent: f64,
    /// Estimated range in metres, 0 when disabled
    pub range_m: f64,
}

impl From<SensorState> for SensorReadout {
    fn from(state: SensorState) -> Self {
        let level = i16::from(state.level);
        let fraction = f64::from(state.level) / 100.0;
        let (depth_percent, range_m) = if state.enabled {
            (15.0 + fraction * 60.0, 1.5 + fraction * 2.5)
        } else {
            (0.0, 0.0)
        };

        Self {
            enabled: state.enabled,
            level: state.level,
            accuracy: level - 2,
            precision: level - 4,
            depth_percent,
            range_m,
        }
    }
}

/// The two sensor tasks: level resampling and rep detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorSimulator {
    pub level: Interval,
    pub detect: Interval,
}

impl SensorSimulator {
    /// Both tasks start running immediately and never stop.
    pub fn new(level_period: Duration, detect_period: Duration) -> Self {
        Self {
            level: Interval::started(level_period),
            detect: Interval::started(detect_period),
        }
    }

    /// Level task body.
    pub fn resample<S: SensorSource + ?Sized>(state: &mut SensorState, source: &mut S) {
        state.level = source.sample_level(state.enabled);
        debug!(level = state.level, enabled = state.enabled, "sensor resampled");
    }

    /// Detection task body, minus the workout gate. Returns true when the
    /// draw lands under the detection chance.
    pub fn detect<S: SensorSource + ?Sized>(state: &SensorState, source: &mut S) -> bool {
        let Some(chance) = state.detection_chance() else {
            return false;
        };
        let draw = source.detection_draw();
        debug!(level = state.level, chance, draw, "detection draw");
        draw < chance
    }
}
