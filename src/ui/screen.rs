use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::{App, AppState};

const HELP_TEXT: &str = "\
(s)       start the workout
(p) space pause / resume
(enter)   complete a set
(r)       reset everything
(t)       switch the sensor on or off
(q) esc   quit

With the sensor on, sets are detected automatically while the
workout is running. A detected set within 3s of the previous
one is ignored.";

const ABOUT_TEXT: &str = "\
restwatch tracks the rest you take between sets.

Rest turns orange after 4 minutes and red after 5.
Best time is your shortest rest of the workout.";

/// A UI Screen boundary: responsible for rendering
pub trait Screen {
    fn render(&self, app: &mut App, f: &mut Frame);
}

/// Main dashboard - renders the App widget
pub struct MainScreen;

impl Screen for MainScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        f.render_widget(&*app, f.area());
    }
}

/// Dashboard with a text popup on top
pub struct OverlayScreen {
    title: &'static str,
    body: &'static str,
}

impl Screen for OverlayScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        f.render_widget(&*app, f.area());

        let popup = centered_rect(70, 60, f.area());
        let text = Paragraph::new(self.body)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(self.title)
                    .title_bottom("(esc) close")
                    .style(Style::default().fg(Color::Cyan)),
            )
            .style(Style::default().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false });

        f.render_widget(Clear, popup);
        f.render_widget(text, popup);
    }
}

/// A rectangle of `percent_x` by `percent_y` of `area`, centred in it
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x.min(100)) / 100) as u16;
    let height = (u32::from(area.height) * u32::from(percent_y.min(100)) / 100) as u16;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Main => Box::new(MainScreen),
        AppState::Help => Box::new(OverlayScreen {
            title: "Help",
            body: HELP_TEXT,
        }),
        AppState::About => Box::new(OverlayScreen {
            title: "About",
            body: ABOUT_TEXT,
        }),
    }
}
