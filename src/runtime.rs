use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum RestEvent {
    Key(KeyEvent),
    Resize,
    /// Wall-clock time since the previous tick
    Tick(Duration),
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait RestEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<RestEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<RestEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        // Input is read on its own thread; the app state is only ever
        // touched from the thread that calls Runner::step.
        std::thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) if key.kind != KeyEventKind::Release => RestEvent::Key(key),
                Ok(CtEvent::Resize(_, _)) => RestEvent::Resize,
                Ok(_) => continue,
                Err(_) => break,
            };
            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RestEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<RestEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<RestEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<RestEvent>) -> Self {
        Self { rx }
    }
}

impl RestEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<RestEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that turns input plus the wall clock into one event stream.
///
/// A tick is emitted whenever at least one tick interval has passed since
/// the last one, even while keys keep arriving, so timers never starve.
pub struct Runner<E: RestEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    last_tick: Instant,
}

impl<E: RestEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
            last_tick: Instant::now(),
        }
    }

    /// Blocks until the next tick is due and returns the next event, or
    /// Tick carrying the elapsed time.
    pub fn step(&mut self) -> RestEvent {
        let interval = self.ticker.interval();
        let since_tick = self.last_tick.elapsed();
        if since_tick >= interval {
            return self.tick();
        }

        match self.event_source.recv_timeout(interval - since_tick) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => self.tick(),
            Err(RecvTimeoutError::Disconnected) => {
                // nothing left to wait on; keep ticking at the configured rate
                std::thread::sleep(interval.saturating_sub(self.last_tick.elapsed()));
                self.tick()
            }
        }
    }

    fn tick(&mut self) -> RestEvent {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        RestEvent::Tick(elapsed)
    }
}
