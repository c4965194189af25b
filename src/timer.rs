use std::time::Duration;

/// A periodic task driven by an external clock.
///
/// The interval never reads the wall clock itself: callers feed it elapsed
/// time, which keeps every timer in the app on one logical thread and makes
/// tests deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    period: Duration,
    elapsed: Duration,
    running: bool,
}

impl Interval {
    /// A stopped interval. Zero periods are bumped to 1ms.
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            elapsed: Duration::ZERO,
            running: false,
        }
    }

    /// A running interval, first firing one period from now.
    pub fn started(period: Duration) -> Self {
        let mut interval = Self::new(period);
        interval.start();
        interval
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Cancel any pending firing and start counting a fresh period.
    pub fn start(&mut self) {
        self.running = true;
        self.elapsed = Duration::ZERO;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed = Duration::ZERO;
    }

    /// Time until the next firing, or `None` when stopped.
    pub fn until_next(&self) -> Option<Duration> {
        self.running
            .then(|| self.period.saturating_sub(self.elapsed))
    }

    /// Let `dt` pass without firing. Callers must not step past a due firing.
    pub fn elapse(&mut self, dt: Duration) {
        if self.running {
            self.elapsed = (self.elapsed + dt).min(self.period);
        }
    }

    /// Consume a due firing. Returns false if the interval was not due.
    pub fn fire(&mut self) -> bool {
        if self.running && self.elapsed >= self.period {
            self.elapsed -= self.period;
            true
        } else {
            false
        }
    }
}

/// The two one-second tickers behind the workout clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEngine {
    pub rest: Interval,
    pub total: Interval,
}

impl TimerEngine {
    pub fn new(period: Duration) -> Self {
        Self {
            rest: Interval::new(period),
            total: Interval::new(period),
        }
    }

    /// Restart both tickers from scratch (workout start).
    pub fn start_all(&mut self) {
        self.rest.start();
        self.total.start();
    }

    /// Restart the rest ticker only (set completion).
    pub fn restart_rest(&mut self) {
        self.rest.start();
    }

    pub fn stop_all(&mut self) {
        self.rest.stop();
        self.total.stop();
    }
}
