pub mod ui;

use chrono::{DateTime, Local};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use restwatch::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    feedback::Banner,
    logging::init_logging,
    runtime::{CrosstermEventSource, FixedTicker, RestEvent, Runner},
    Session,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use tracing::info;

/// terminal rest timer with set tracking and simulated rep detection
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal rest timer for strength workouts. Tracks sets, rest between sets and total workout time, with a simulated proximity sensor that can detect completed sets on its own."
)]
pub struct Cli {
    /// start with the sensor switched off (manual mode)
    #[clap(long)]
    sensor_off: bool,

    /// seed for the simulated sensor, for reproducible runs
    #[clap(long)]
    seed: Option<u64>,

    /// screen refresh interval in milliseconds
    #[clap(short = 't', long)]
    tick_rate_ms: Option<u64>,

    /// write logs to this file instead of the default state directory
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// persist the effective settings to the config file before starting
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Layer command line overrides on top of the stored config
    fn apply(&self, mut cfg: Config) -> Config {
        if self.sensor_off {
            cfg.sensor_enabled = false;
        }
        if let Some(ms) = self.tick_rate_ms {
            cfg.tick_rate_ms = ms;
        }
        cfg
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    Main,
    Help,
    About,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub state: AppState,
    pub banner: Option<Banner>,
    pub config: Config,
    pub started_at: Option<DateTime<Local>>,
}

impl App {
    pub fn new(config: Config, seed: Option<u64>) -> Self {
        Self {
            session: Session::simulated(config.session_config(), seed),
            state: AppState::Main,
            banner: None,
            config,
            started_at: None,
        }
    }

    pub fn on_tick(&mut self, dt: Duration) {
        self.session.advance(dt);
        if let Some(banner) = self.banner.as_mut() {
            if !banner.on_tick(dt) {
                self.banner = None;
            }
        }
        self.pull_feedback();
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Control {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Control::Quit;
        }

        if self.state != AppState::Main {
            // any close key dismisses an overlay
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q' | 'h' | '?' | 'a')
            ) {
                self.state = AppState::Main;
            }
            return Control::Continue;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Control::Quit,
            KeyCode::Char('s') => {
                if self.session.start().is_ok() {
                    self.started_at = Some(Local::now());
                }
            }
            KeyCode::Char('p') | KeyCode::Char(' ') => {
                let _ = self.session.toggle_pause();
            }
            KeyCode::Enter | KeyCode::Char('c') => {
                let _ = self.session.complete_set();
            }
            KeyCode::Char('r') => {
                self.session.reset();
                self.started_at = None;
            }
            KeyCode::Char('t') => {
                self.session.toggle_sensor();
            }
            KeyCode::Char('h') | KeyCode::Char('?') => self.state = AppState::Help,
            KeyCode::Char('a') => self.state = AppState::About,
            _ => {}
        }
        self.pull_feedback();
        Control::Continue
    }

    /// Show the newest message the session emitted, if any
    fn pull_feedback(&mut self) {
        if let Some(feedback) = self.session.drain_feedback().pop() {
            self.banner = Some(Banner::new(feedback, self.config.feedback_ttl()));
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = cli.log_file.clone().or_else(AppDirs::log_path) {
        init_logging(&path);
    }

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());
    if cli.save_config {
        store.save(&config)?;
        info!(path = %store.path().display(), "config saved");
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, cli.seed);
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let ticker = FixedTicker::new(app.config.tick_rate());
    let mut runner = Runner::new(CrosstermEventSource::new(), ticker);

    loop {
        terminal.draw(|f| ui(app, f))?;

        match runner.step() {
            RestEvent::Tick(dt) => app.on_tick(dt),
            RestEvent::Resize => {}
            RestEvent::Key(key) => {
                if app.on_key(key) == Control::Quit {
                    break;
                }
            }
        }
    }

    info!(sets = app.session.workout().sets_count(), "exiting");
    Ok(())
}

fn ui(app: &mut App, f: &mut Frame) {
    ui::screen::current_screen(&app.state).render(app, f);
}

#[cfg(test)]
mod tests {
    use super::*;
    use restwatch::Phase;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn manual_app() -> App {
        let config = Config {
            sensor_enabled: false,
            ..Config::default()
        };
        App::new(config, Some(1))
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["restwatch"]);

        assert!(!cli.sensor_off);
        assert_eq!(cli.seed, None);
        assert_eq!(cli.tick_rate_ms, None);
        assert_eq!(cli.log_file, None);
        assert!(!cli.save_config);
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from(["restwatch", "--sensor-off", "-t", "250", "--seed", "9"]);
        let cfg = cli.apply(Config::default());

        assert!(!cfg.sensor_enabled);
        assert_eq!(cfg.tick_rate_ms, 250);
        assert_eq!(cli.seed, Some(9));
    }

    #[test]
    fn test_cli_keeps_stored_values_when_not_overridden() {
        let cli = Cli::parse_from(["restwatch"]);
        let stored = Config {
            sensor_enabled: false,
            tick_rate_ms: 40,
            ..Config::default()
        };
        assert_eq!(cli.apply(stored.clone()), stored);
    }

    #[test]
    fn test_app_new() {
        let app = App::new(Config::default(), Some(3));
        assert_eq!(app.state, AppState::Main);
        assert!(app.banner.is_none());
        assert!(app.session.sensor().enabled);
        assert_eq!(app.session.workout().phase(), Phase::Idle);
    }

    #[test]
    fn test_keys_drive_workout() {
        let mut app = manual_app();

        app.on_key(key(KeyCode::Char('s')));
        assert_eq!(app.session.workout().phase(), Phase::Active);
        assert!(app.started_at.is_some());

        app.on_tick(Duration::from_secs(4));
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.session.workout().sets_count(), 1);
        assert_eq!(app.session.workout().best_time(), Some(4));

        app.on_key(key(KeyCode::Char('p')));
        assert_eq!(app.session.workout().phase(), Phase::Paused);
        app.on_key(key(KeyCode::Char(' ')));
        assert_eq!(app.session.workout().phase(), Phase::Active);

        app.on_key(key(KeyCode::Char('r')));
        assert_eq!(app.session.workout().phase(), Phase::Idle);
        assert_eq!(app.session.workout().sets_count(), 0);
        assert!(app.started_at.is_none());
    }

    #[test]
    fn test_rejected_command_shows_warning_banner() {
        let mut app = manual_app();
        app.on_key(key(KeyCode::Char('c')));

        let banner = app.banner.as_ref().expect("banner");
        assert!(banner.feedback.is_warning);
        assert_eq!(banner.feedback.message, "Please start workout first!");
    }

    #[test]
    fn test_banner_clears_after_ttl() {
        let mut app = manual_app();
        app.on_key(key(KeyCode::Char('t')));
        assert_eq!(
            app.banner.as_ref().map(|b| b.feedback.message.as_str()),
            Some("Sensor enabled")
        );

        app.on_tick(Duration::from_secs(2));
        assert!(app.banner.is_some());
        app.on_tick(Duration::from_secs(1));
        assert!(app.banner.is_none());
    }

    #[test]
    fn test_toggle_sensor_key() {
        let mut app = manual_app();
        assert!(!app.session.sensor().enabled);
        app.on_key(key(KeyCode::Char('t')));
        assert!(app.session.sensor().enabled);
    }

    #[test]
    fn test_overlays_open_and_close() {
        let mut app = manual_app();
        app.on_key(key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::Help);

        // workout keys are inert while an overlay is up
        assert_eq!(app.on_key(key(KeyCode::Char('s'))), Control::Continue);
        assert_eq!(app.session.workout().phase(), Phase::Idle);

        assert_eq!(app.on_key(key(KeyCode::Esc)), Control::Continue);
        assert_eq!(app.state, AppState::Main);

        app.on_key(key(KeyCode::Char('a')));
        assert_eq!(app.state, AppState::About);
        app.on_key(key(KeyCode::Char('a')));
        assert_eq!(app.state, AppState::Main);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = manual_app();
        assert_eq!(app.on_key(key(KeyCode::Char('q'))), Control::Quit);
        assert_eq!(app.on_key(key(KeyCode::Esc)), Control::Quit);
        assert_eq!(
            app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Control::Quit
        );
    }
}
